pub mod prelude;

pub mod products;
pub mod recipes;
pub mod recipes_products;
pub mod secret_keys;
pub mod tokens;
pub mod users;
