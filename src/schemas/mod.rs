pub mod auth;

pub use auth::BaseToken;
