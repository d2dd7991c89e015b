use super::open_store;
use crate::config::Config;

pub async fn cmd_prune_tokens(config: &Config) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let removed = store.token_repo().delete_expired(chrono::Utc::now()).await?;

    println!("Removed {removed} expired token(s).");
    Ok(())
}
