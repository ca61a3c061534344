pub mod auth;
pub mod cart;
pub mod categories;
pub mod images;
pub mod orders;
pub mod products;
pub mod qna;
pub mod reviews;
pub mod users;
pub mod v2;
pub mod wishlist;
