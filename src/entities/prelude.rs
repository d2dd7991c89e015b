pub use super::products::Entity as Products;
pub use super::recipes::Entity as Recipes;
pub use super::recipes_products::Entity as RecipesProducts;
pub use super::secret_keys::Entity as SecretKeys;
pub use super::tokens::Entity as Tokens;
pub use super::users::Entity as Users;
