use anyhow::Context;
use aud_config::AudConfig;

use crate::cli::{Commands, GlobalFlags};

pub mod call;
pub mod procedures;
pub mod schema;

/// Dispatch a parsed command to its handler.
pub async fn dispatch(command: Commands, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Call { procedure, input } => {
            let config = load_config(flags)?;
            call::handle(&procedure, input.as_deref(), &config, flags).await
        }
        Commands::Procedures => procedures::handle(flags),
        Commands::Schema { name } => schema::handle(name.as_deref(), flags),
    }
}

/// Layered config with `--db` applied on top.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<AudConfig> {
    let mut config = AudConfig::load_with_dotenv().context("failed to load configuration")?;
    if let Some(path) = &flags.db {
        config.database.path.clone_from(path);
        config.validate().context("invalid --db")?;
    }
    tracing::debug!(db = %config.database.path, "configuration loaded");
    Ok(config)
}
