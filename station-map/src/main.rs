use std::process::ExitCode;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use station_map::config::AppConfig;
use station_map::pipeline::refresh_view;
use station_map::store::{JsonRecordStore, StoreConfig};
use station_map::web::{AppState, create_router};
use station_map::wikidata::{
    StaticRowSource, StationSource, WikidataClient, WikidataConfig, load_query,
};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "station map failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    let source = match &config.static_rows {
        Some(path) => {
            let rows = StaticRowSource::new(path)?;
            info!(path = %rows.path().display(), "serving saved station rows");
            StationSource::Static(rows)
        }
        None => {
            let mut wikidata = WikidataConfig::new()
                .with_endpoint(&config.endpoint)
                .with_timeout(config.fetch_timeout_secs);
            if let Some(path) = &config.query_file {
                wikidata = wikidata.with_query(load_query(path)?);
            }
            StationSource::Live(WikidataClient::new(wikidata)?)
        }
    };

    let store = JsonRecordStore::open(StoreConfig::new(&config.store_path))?;
    info!(path = %store.path().display(), records = store.len(), "opened record store");

    let addr = config.listen_addr;
    let refresh_interval = config.refresh_interval;
    let state = AppState::new(source, store, config);

    // Fall back to whatever was stored last time if the source is unavailable
    match state.ingest().await {
        Ok((ingest, view)) => info!(
            stored = ingest.stored,
            skipped = ingest.skipped.len(),
            markers = view.added,
            "initial ingest complete"
        ),
        Err(e) => {
            warn!(error = %e, "initial ingest failed; showing stored stations");
            let store = state.store.lock().await;
            let mut board = state.board.write().await;
            refresh_view(&*store, &mut *board, &[])?;
        }
    }

    // Re-ingest periodically
    let refresh_state = state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(refresh_interval);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            match refresh_state.ingest().await {
                Ok((ingest, view)) => info!(
                    stored = ingest.stored,
                    added = view.added,
                    removed = view.removed,
                    "refreshed stations"
                ),
                Err(e) => warn!(error = %e, "failed to refresh stations"),
            }
        }
    });

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Station map listening on http://{addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
