/// Music Explorer Server - playlists, charts and previews over HTTP
use clap::{Parser, Subcommand};
use explorer_core::{storage::Storage, types::validate, NewUser};
use explorer_server::{config::ServerConfig, create_router, state::AppState};
use explorer_storage::Backend;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "explorer-server")]
#[command(about = "Music Explorer playlist and discovery server", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./config.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// MongoDB connection string. Without one, data is kept in memory.
    #[arg(long, env = "MONGODB_URI", global = true, hide_env_values = true)]
    mongodb_uri: Option<String>,

    /// Last.fm API key
    #[arg(long, env = "LASTFM_API_KEY", global = true, hide_env_values = true)]
    lastfm_api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Create a new user
    AddUser {
        /// Username
        #[arg(short, long)]
        username: String,
        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Connect to the configured storage and report which backend is active
    CheckStorage,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "explorer_server=info,explorer_storage=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = ServerConfig::load(cli.config.as_deref())?
        .with_overrides(cli.mongodb_uri, cli.lastfm_api_key);
    config.validate()?;

    match cli.command {
        Commands::Serve => serve(config).await?,
        Commands::AddUser { username, password } => {
            add_user(&config, NewUser::new(username, password)).await?;
        }
        Commands::CheckStorage => check_storage(&config).await?,
    }

    Ok(())
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    tracing::info!("Starting Music Explorer Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    // Initialize storage
    let storage = Arc::new(Backend::connect(&config.storage).await?);
    tracing::info!("Storage ready ({})", storage.kind());

    // Build application state
    let app_state = AppState::from_config(&config, storage)?;

    // Build router
    let app = create_router(app_state);

    // Create server address
    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

async fn add_user(config: &ServerConfig, user: NewUser) -> anyhow::Result<()> {
    validate::new_user(&user)?;

    let storage = Backend::connect(&config.storage).await?;
    if storage.kind() == explorer_storage::BackendKind::Memory {
        tracing::warn!("In-memory storage: the user exists only until this command exits");
    }

    let user = storage.create_user(user).await?;
    println!("Created user {} ({})", user.username, user.id);

    Ok(())
}

async fn check_storage(config: &ServerConfig) -> anyhow::Result<()> {
    let storage = Backend::connect(&config.storage).await?;
    storage.ping().await?;

    println!("Storage backend: {}", storage.kind());
    if let Backend::Document(document) = &storage {
        println!("Database: {}", document.database_name());
    }

    Ok(())
}
