mod score_store;
mod server_config;
mod web_server;

use clap::Parser;

use common::config::{ConfigManager, FileContentConfigProvider};
use common::leaderboard::Leaderboard;
use common::{log, logger};
use score_store::ConfiguredScoreStore;
use server_config::{DEFAULT_CONFIG_PATH, ServerConfig, StorageConfig};
use web_server::{WebServerState, run_web_server};

#[derive(Parser)]
#[command(name = "snake_scores_server")]
struct Args {
    /// YAML config file; defaults are used when it does not exist.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    #[arg(long)]
    use_log_prefix: bool,

    /// Overrides `bind_address` from the config file.
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Server".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config_manager: ConfigManager<FileContentConfigProvider, ServerConfig> =
        ConfigManager::from_yaml_file(&args.config);
    let mut config = config_manager.get_config()?;
    if let Some(bind) = args.bind {
        config.bind_address = bind;
    }

    match &config.storage {
        StorageConfig::Memory => log!("Scores are kept in memory only"),
        StorageConfig::YamlFile { path } => log!("Scores are stored in {}", path.display()),
    }

    let leaderboard = Leaderboard::new(
        ConfiguredScoreStore::from(&config.storage),
        config.leaderboard.clone(),
    );
    let state = WebServerState {
        gateway: leaderboard,
        snake_settings: config.snake.clone(),
    };

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        log!("Shutdown signal received");
    };

    run_web_server(
        state,
        &config.bind_address,
        config.static_files_path.clone(),
        shutdown_signal,
    )
    .await?;

    log!("Server shut down gracefully");
    Ok(())
}
