pub mod product;
pub mod recipe;
pub mod secret_key;
pub mod token;
pub mod user;
