//! Integration tests for the recipe/product many-to-many association.

use recipebook::db::{NewProduct, NewRecipe, NewUser, ProductChanges, Store};
use recipebook::entities::{products, users};

async fn spawn_store() -> Store {
    let db_path = std::env::temp_dir().join(format!(
        "recipebook-association-test-{}.db",
        uuid::Uuid::new_v4()
    ));

    Store::new(&format!("sqlite:{}", db_path.display()))
        .await
        .expect("failed to open store")
}

async fn seed(store: &Store) -> (users::Model, Vec<products::Model>) {
    let user = store
        .user_repo()
        .create(NewUser::new("Chef", "Doe", "chef@example.com", "hash"))
        .await
        .unwrap();

    let mut products = Vec::new();
    for (name, calories) in [("Egg", 155), ("Flour", 364), ("Milk", 42)] {
        products.push(
            store
                .product_repo()
                .create(NewProduct::new(name, calories))
                .await
                .unwrap(),
        );
    }

    (user, products)
}

#[tokio::test]
async fn test_recipe_without_products() {
    let store = spawn_store().await;
    let (user, _) = seed(&store).await;

    let recipe = store
        .recipe_repo()
        .create(NewRecipe::new(user.id, "Water", "Just water", 0))
        .await
        .unwrap();

    let loaded = store
        .recipe_repo()
        .get_with_products(recipe.id)
        .await
        .unwrap()
        .unwrap();
    assert!(loaded.products.is_empty());
    assert_eq!(loaded.product_calories(), 0);
}

#[tokio::test]
async fn test_products_link_both_ways() {
    let store = spawn_store().await;
    let (user, products) = seed(&store).await;
    let recipes = store.recipe_repo();

    let pancakes = recipes
        .create(NewRecipe::new(user.id, "Pancakes", "Mix and fry", 520))
        .await
        .unwrap();
    let omelette = recipes
        .create(NewRecipe::new(user.id, "Omelette", "Whisk and fry", 300))
        .await
        .unwrap();

    for product in &products {
        recipes.add_product(pancakes.id, product.id).await.unwrap();
    }
    recipes.add_product(omelette.id, products[0].id).await.unwrap();

    let names: Vec<String> = recipes
        .products_of(pancakes.id)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["Egg", "Flour", "Milk"]);

    let with_egg = recipes.recipes_with(products[0].id).await.unwrap();
    assert_eq!(with_egg.len(), 2);

    let with_milk = recipes.recipes_with(products[2].id).await.unwrap();
    assert_eq!(with_milk.len(), 1);
    assert_eq!(with_milk[0].id, pancakes.id);

    assert_eq!(
        recipes.total_product_calories(pancakes.id).await.unwrap(),
        155 + 364 + 42
    );
    // The stored recipe calories are not recomputed.
    assert_eq!(recipes.get(pancakes.id).await.unwrap().unwrap().calories, 520);
}

#[tokio::test]
async fn test_duplicate_pair_is_rejected() {
    let store = spawn_store().await;
    let (user, products) = seed(&store).await;
    let recipes = store.recipe_repo();

    let recipe = recipes
        .create(NewRecipe::new(user.id, "Boiled egg", "Boil", 78))
        .await
        .unwrap();

    recipes.add_product(recipe.id, products[0].id).await.unwrap();
    let err = recipes
        .add_product(recipe.id, products[0].id)
        .await
        .unwrap_err();

    assert!(err.is_unique_violation(), "unexpected error: {err}");
    assert_eq!(recipes.products_of(recipe.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_link_to_missing_product_is_rejected() {
    let store = spawn_store().await;
    let (user, _) = seed(&store).await;
    let recipes = store.recipe_repo();

    let recipe = recipes
        .create(NewRecipe::new(user.id, "Mystery", "?", 1))
        .await
        .unwrap();

    let err = recipes.add_product(recipe.id, 9999).await.unwrap_err();
    assert!(err.is_foreign_key_violation(), "unexpected error: {err}");
}

#[tokio::test]
async fn test_set_products_replaces_and_collapses_duplicates() {
    let store = spawn_store().await;
    let (user, products) = seed(&store).await;
    let recipes = store.recipe_repo();

    let recipe = recipes
        .create(NewRecipe::new(user.id, "Crepes", "Thin", 400))
        .await
        .unwrap();

    recipes
        .set_products(recipe.id, &[products[0].id, products[1].id, products[0].id])
        .await
        .unwrap();
    assert_eq!(recipes.products_of(recipe.id).await.unwrap().len(), 2);

    recipes
        .set_products(recipe.id, &[products[2].id])
        .await
        .unwrap();
    let current = recipes.products_of(recipe.id).await.unwrap();
    assert_eq!(current.len(), 1);
    assert_eq!(current[0].name, "Milk");

    recipes.set_products(recipe.id, &[]).await.unwrap();
    assert!(recipes.products_of(recipe.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_set_products_is_atomic_on_bad_id() {
    let store = spawn_store().await;
    let (user, products) = seed(&store).await;
    let recipes = store.recipe_repo();

    let recipe = recipes
        .create(NewRecipe::new(user.id, "Bread", "Bake", 250))
        .await
        .unwrap();
    recipes.add_product(recipe.id, products[1].id).await.unwrap();

    let err = recipes
        .set_products(recipe.id, &[products[0].id, 12345])
        .await
        .unwrap_err();
    assert!(err.is_foreign_key_violation());

    let current = recipes.products_of(recipe.id).await.unwrap();
    assert_eq!(current.len(), 1);
    assert_eq!(current[0].id, products[1].id);
}

#[tokio::test]
async fn test_remove_product_and_product_delete_cascade() {
    let store = spawn_store().await;
    let (user, products) = seed(&store).await;
    let recipes = store.recipe_repo();

    let recipe = recipes
        .create(NewRecipe::new(user.id, "Cake", "Bake", 900))
        .await
        .unwrap();
    recipes
        .set_products(recipe.id, &[products[0].id, products[1].id])
        .await
        .unwrap();

    assert!(recipes.remove_product(recipe.id, products[0].id).await.unwrap());
    assert!(!recipes.remove_product(recipe.id, products[0].id).await.unwrap());

    assert!(store.product_repo().delete(products[1].id).await.unwrap());
    assert!(recipes.products_of(recipe.id).await.unwrap().is_empty());
    assert!(recipes.get(recipe.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_product_activation_filter() {
    let store = spawn_store().await;
    let (_, products) = seed(&store).await;
    let repo = store.product_repo();

    assert!(repo.list_activated().await.unwrap().is_empty());

    repo.set_activated(products[1].id, true).await.unwrap();
    let renamed = repo
        .update(
            products[2].id,
            ProductChanges {
                name: Some("Whole milk".to_string()),
                calories: Some(61),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.calories, 61);

    let active = repo.list_activated().await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].name, "Flour");
}
