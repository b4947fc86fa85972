use std::net::SocketAddr;
use std::sync::Arc;

use job_marketplace::{
    config::Config,
    database::{pool::create_pool, MemoryStore, PgStore, Store},
    routes,
    utils::time::{Clock, SystemClock},
    AppState,
};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config);

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let app_state = match config.database_url {
        Some(_) => {
            let pool = create_pool(&config).await?;
            let store = Arc::new(PgStore::new(pool));
            store.prepare().await?;
            info!("Using Postgres storage");
            AppState::new(store, clock, config.monthly_application_limit)
        }
        None => {
            warn!("DATABASE_URL not set; using in-memory storage, data is lost on exit");
            let store = Arc::new(MemoryStore::new());
            store.prepare().await?;
            AppState::new(store, clock, config.monthly_application_limit)
        }
    };

    let app = routes::router(app_state);

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.json_logs {
        builder.json().init();
    } else {
        builder.init();
    }
}
