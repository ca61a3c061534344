pub mod answers;
pub mod audit_logs;
pub mod cart_items;
pub mod categories;
pub mod images;
pub mod order_items;
pub mod orders;
pub mod products;
pub mod questions;
pub mod reviews;
pub mod users;
pub mod wishlist_items;

pub use answers::Entity as Answers;
pub use audit_logs::Entity as AuditLogs;
pub use cart_items::Entity as CartItems;
pub use categories::Entity as Categories;
pub use images::Entity as Images;
pub use order_items::Entity as OrderItems;
pub use orders::Entity as Orders;
pub use products::Entity as Products;
pub use questions::Entity as Questions;
pub use reviews::Entity as Reviews;
pub use users::Entity as Users;
pub use wishlist_items::Entity as WishlistItems;
