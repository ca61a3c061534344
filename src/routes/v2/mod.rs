//! Mobile surface. Responses here skip the v1 envelope: raw JSON bodies,
//! string ids, cent amounts as integers.

use axum::Router;

use crate::state::AppState;

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod images;
pub mod orders;
pub mod reviews;
pub mod users;
pub mod wishlist;

pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/cart", cart::router())
        .nest("/orders", orders::router())
        .nest("/reviews", reviews::router())
        .nest("/wishlist", wishlist::router())
        .nest("/users", users::router())
        .nest("/images", images::router())
        .merge(catalog::router())
}
