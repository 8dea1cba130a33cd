pub mod aggregate;
pub mod wishlist;
pub mod product;
