use super::open_store;
use crate::config::Config;

pub async fn cmd_list_users(config: &Config) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let users = store.user_repo().list().await?;

    if users.is_empty() {
        println!("No users registered.");
        return Ok(());
    }

    println!("Users ({} total)", users.len());
    println!("{:-<70}", "");

    for user in users {
        let mut flags = Vec::new();
        if user.is_admin {
            flags.push("admin");
        }
        if !user.is_activated {
            flags.push("inactive");
        }

        println!("{} {} <{}>", user.id, user.full_name(), user.email);
        if !flags.is_empty() {
            println!("  [{}]", flags.join(", "));
        }
    }

    Ok(())
}
