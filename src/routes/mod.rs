//! Routers, one per resource. `create_router` in the crate root merges them and
//! applies the shared layers.

/// `/user`, `/adduser`, `/login`, `/deleteuser/{id}`.
pub mod users;

/// `/getrecipe`, `/addrecipes`, `/deleterecipe/{id}`.
pub mod recipes;

/// `/admin`, `/admin/register`, `/admin/login`.
pub mod admin;

/// Routes that require a bearer token, plus the health probe.
pub mod session;
