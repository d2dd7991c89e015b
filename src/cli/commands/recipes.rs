use super::open_store;
use crate::config::Config;

pub async fn cmd_list_recipes(config: &Config, user_id: Option<i32>) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let repo = store.recipe_repo();

    let recipes = match user_id {
        Some(id) => repo.list_for_user(id).await?,
        None => repo.list().await?,
    };

    if recipes.is_empty() {
        println!("No recipes found.");
        return Ok(());
    }

    println!("Recipes ({} total)", recipes.len());
    println!("{:-<70}", "");

    for recipe in recipes {
        let products = repo.products_of(recipe.id).await?;
        let status = if recipe.is_activated { "✓" } else { "•" };

        println!(
            "{} {} ({} kcal) | ID: {} | Owner: {}",
            status, recipe.title, recipe.calories, recipe.id, recipe.user_id
        );
        for product in products {
            println!("    - {} ({} kcal)", product.name, product.calories);
        }
    }

    Ok(())
}
