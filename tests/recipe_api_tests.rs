mod common;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use common::{delete, get, post, test_app};
use recipe_share::routes::recipes::RECIPE_BODY_LIMIT;
use serde_json::{Value, json};
use tower::ServiceExt;

fn recipe_with_image(image_len: usize) -> Value {
    json!({
        "title": "Photo toast",
        "ingredients": ["bread"],
        "instructions": ["toast"],
        "image": format!("data:image/png;base64,{}", "A".repeat(image_len)),
    })
}

#[tokio::test]
async fn test_created_recipe_is_listed_with_order_preserved() {
    let app = test_app();

    let (status, created) = post(
        &app,
        "/addrecipes",
        json!({
            "title": "Pancakes",
            "ingredients": ["flour", "milk", "eggs", "butter"],
            "instructions": ["whisk", "rest", "fry", "flip"],
            "image": "data:image/png;base64,AAAA",
            "author": "ana"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["message"], "Recipe added successfully");

    let (status, body) = get(&app, "/getrecipe").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "200");

    let recipe = &body["data"][0];
    assert_eq!(recipe["_id"], created["id"]);
    assert_eq!(recipe["title"], "Pancakes");
    assert_eq!(recipe["ingredients"], json!(["flour", "milk", "eggs", "butter"]));
    assert_eq!(recipe["instructions"], json!(["whisk", "rest", "fry", "flip"]));
    assert_eq!(recipe["image"], "data:image/png;base64,AAAA");
    // The author sent by the client is not persisted.
    assert!(recipe.get("author").is_none());
}

#[tokio::test]
async fn test_recipe_missing_instructions_is_rejected() {
    let app = test_app();

    let (status, body) = post(
        &app,
        "/addrecipes",
        json!({ "title": "Soup", "ingredients": ["water", "salt"] }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "instructions");
    assert_eq!(body["errors"][0]["message"], "Instructions are required");

    let (_, list) = get(&app, "/getrecipe").await;
    assert!(list["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_recipe_textarea_lines_are_cleaned() {
    let app = test_app();

    // What the frontend produces from `textarea.split("\n")`.
    let (status, _) = post(
        &app,
        "/addrecipes",
        json!({
            "title": "Tea",
            "ingredients": ["water", "", "tea leaves", ""],
            "instructions": ["boil", "steep"],
            "image": ""
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, list) = get(&app, "/getrecipe").await;
    let recipe = &list["data"][0];
    assert_eq!(recipe["ingredients"], json!(["water", "tea leaves"]));
    assert!(recipe["image"].is_null());
}

#[tokio::test]
async fn test_recipe_with_wrong_type_is_bad_request() {
    let app = test_app();
    let (status, _) = post(
        &app,
        "/addrecipes",
        json!({ "title": "Soup", "ingredients": "water", "instructions": ["boil"] }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_recipe_lifecycle() {
    let app = test_app();
    let (_, keep) = post(
        &app,
        "/addrecipes",
        json!({ "title": "Keep", "ingredients": ["a"], "instructions": ["b"] }),
    )
    .await;
    let (_, gone) = post(
        &app,
        "/addrecipes",
        json!({ "title": "Gone", "ingredients": ["a"], "instructions": ["b"] }),
    )
    .await;
    let gone_id = gone["id"].as_str().unwrap().to_string();

    let (status, body) = delete(&app, &format!("/deleterecipe/{gone_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Recipe deleted successfully");

    let (_, list) = get(&app, "/getrecipe").await;
    let ids: Vec<_> = list["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["_id"].clone())
        .collect();
    assert_eq!(ids, vec![keep["id"].clone()]);

    let (status, body) = delete(&app, &format!("/deleterecipe/{gone_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Recipe not found");
}

#[tokio::test]
async fn test_deleting_user_leaves_recipes_alone() {
    let app = test_app();
    let (_, user) = post(
        &app,
        "/adduser",
        json!({ "username": "ana", "email": "a@x.com", "password": "secret1" }),
    )
    .await;
    post(
        &app,
        "/addrecipes",
        json!({ "title": "Stew", "ingredients": ["beef"], "instructions": ["simmer"] }),
    )
    .await;

    let (status, _) = delete(&app, &format!("/deleteuser/{}", user["id"].as_str().unwrap())).await;
    assert_eq!(status, StatusCode::OK);

    let (_, list) = get(&app, "/getrecipe").await;
    assert_eq!(list["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_large_data_url_image_is_accepted() {
    let app = test_app();

    let (status, _) = post(&app, "/addrecipes", recipe_with_image(3 * 1024 * 1024)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, list) = get(&app, "/getrecipe").await;
    let image = list["data"][0]["image"].as_str().unwrap();
    assert!(image.len() > 3 * 1024 * 1024);
}

#[tokio::test]
async fn test_oversized_body_is_payload_too_large() {
    let app = test_app();

    let oversized = recipe_with_image(RECIPE_BODY_LIMIT + 1);
    let (status, body) = post(&app, "/addrecipes", oversized).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(body.get("errors").is_none());
    assert!(body["message"].as_str().unwrap().contains("length limit"));

    let (_, list) = get(&app, "/getrecipe").await;
    assert!(list["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_content_type_is_unsupported_media_type() {
    let app = test_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/addrecipes")
        .body(Body::from(
            json!({ "title": "Soup", "ingredients": ["water"], "instructions": ["boil"] })
                .to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}
