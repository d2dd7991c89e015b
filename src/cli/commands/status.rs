use super::open_store;
use crate::config::Config;

pub async fn cmd_status(config: &Config) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    store.ping().await?;
    let counts = store.counts().await?;

    println!("Database: {}", config.general.database_path);
    println!("{:-<40}", "");
    println!("  users        {}", counts.users);
    println!("  products     {}", counts.products);
    println!("  recipes      {}", counts.recipes);
    println!("  tokens       {}", counts.tokens);
    println!("  secret keys  {}", counts.secret_keys);

    Ok(())
}
