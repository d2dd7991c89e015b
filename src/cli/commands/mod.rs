mod recipes;
mod status;
mod tokens;
mod users;

pub use recipes::cmd_list_recipes;
pub use status::cmd_status;
pub use tokens::cmd_prune_tokens;
pub use users::cmd_list_users;

use crate::config::Config;
use crate::db::Store;

async fn open_store(config: &Config) -> anyhow::Result<Store> {
    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;
    Ok(store)
}
