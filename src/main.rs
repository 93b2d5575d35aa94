use chrono::Utc;
use std::net::SocketAddr;
use tradebook::datasource::MockRecordSource;
use tradebook::{api, config::Config, RecordSource, TradeStore};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::from_env().map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;

    // Fresh random data on every start; nothing is persisted.
    let source = MockRecordSource::generated(&config.mock, Utc::now(), &mut rand::thread_rng());
    let store = TradeStore::new(source.fetch_trades().await?);
    tracing::info!(
        "Generated {} mock trades across {} trade ids",
        store.len(),
        config.mock.unique_trades
    );

    let addr = SocketAddr::new(config.bind_addr, config.port);
    let app = api::create_router(api::AppState::new(store, config));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", addr, e))?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
