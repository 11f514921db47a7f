// src/main.rs
//
// Interactive demo host: wires config -> gateways -> services, resolves a
// location label, then runs a search / select / resolve loop on stdin.
// Type a title to search, a result number to open it, or "quit".

use std::io::Write;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use moviehub::application::AppState;
use moviehub::config::AppConfig;
use moviehub::domain::ResolutionState;
use moviehub::events::{create_event_bus, MovieSelected};
use moviehub::gateways::{
    CityLabelGateway, CrossReferenceGateway, DetailsGateway, DevicePositionSource,
    IpstackGateway, OmdbSearchGateway, SearchGateway, TmdbCatalogGateway,
    UnavailableDevicePosition,
};
use moviehub::services::{GeolocationService, ResolutionService, SearchPresenter, SearchService};

const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    // 1. CONFIGURATION (validated once, here)
    let config = AppConfig::from_env()?;

    // 2. INFRASTRUCTURE
    let event_bus = Arc::new(create_event_bus());

    // 3. GATEWAYS
    // The type `Arc<dyn Trait>` matches the service constructor signatures.
    let search_gateway: Arc<dyn SearchGateway> = Arc::new(OmdbSearchGateway::new(
        &config.search,
        config.request_timeout,
    )?);
    let catalog_gateway = Arc::new(TmdbCatalogGateway::new(
        &config.catalog,
        config.request_timeout,
    )?);
    let cross_reference: Arc<dyn CrossReferenceGateway> = catalog_gateway.clone();
    let details: Arc<dyn DetailsGateway> = catalog_gateway;
    let device_position: Arc<dyn DevicePositionSource> = Arc::new(UnavailableDevicePosition);
    let city_labels: Option<Arc<dyn CityLabelGateway>> = match &config.geolocation {
        Some(geo) => Some(Arc::new(IpstackGateway::new(geo, config.request_timeout)?)),
        None => None,
    };

    // 4. SERVICES
    let search_service = Arc::new(SearchService::new(search_gateway));
    let search_presenter = Arc::new(SearchPresenter::new(
        search_service.clone(),
        event_bus.clone(),
        config.search_debounce,
    ));
    let resolution_service = Arc::new(ResolutionService::new(
        cross_reference,
        details,
        event_bus.clone(),
    ));
    let geolocation_service = Arc::new(GeolocationService::new(
        device_position,
        city_labels,
        config.default_location.clone(),
        event_bus.clone(),
    ));

    let state = AppState {
        event_bus: event_bus.clone(),
        search_service,
        search_presenter,
        resolution_service,
        geolocation_service,
    };

    // 5. NAVIGATION: selections arrive as MovieSelected events
    let (selection_tx, mut selection_rx) = tokio::sync::mpsc::unbounded_channel::<String>();
    state.event_bus.subscribe::<MovieSelected, _>(move |event| {
        let _ = selection_tx.send(event.external_id.clone());
    });

    let location = state.geolocation_service.resolve_location().await;
    println!("Location: {location}");
    println!("Type a title to search, a result number to open it, or \"quit\".");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if input == "quit" {
            break;
        }

        if let Ok(index) = input.parse::<usize>() {
            let results = state.search_presenter.results();
            match index.checked_sub(1).and_then(|i| results.get(i)) {
                Some(result) => {
                    state.search_presenter.select(&result.external_id);
                    if let Some(external_id) = selection_rx.recv().await {
                        render_resolution(&state, &external_id).await;
                    }
                }
                None => println!("No result #{index} in the current list."),
            }
            continue;
        }

        state.search_presenter.input_changed(input).await;
        let results = state.search_presenter.results();
        if results.is_empty() {
            println!("No matches.");
        }
        for (i, result) in results.iter().enumerate() {
            println!(
                "{:>2}. {} ({}) [{}]",
                i + 1,
                result.title,
                result.year,
                result.external_id
            );
        }
    }

    Ok(())
}

async fn render_resolution(state: &AppState, external_id: &str) {
    match state.resolution_service.resolve(external_id).await {
        Some(ResolutionState::Ready(record)) => {
            println!("{} ({})", record.title, record.release_date);
            if let Some(poster) = &record.poster_path {
                println!("Poster: {POSTER_BASE_URL}{poster}");
            }
            if !record.overview.is_empty() {
                println!("{}", record.overview);
            }
            println!("Rating: {}/10", record.rating);
        }
        Some(ResolutionState::NoMapping) => {
            println!("No details available for {external_id}.");
        }
        Some(ResolutionState::Failed(failure)) => {
            println!("Details lookup failed ({failure}).");
        }
        // resolve only ever returns a terminal state or None
        Some(state @ (ResolutionState::Idle
        | ResolutionState::ResolvingId
        | ResolutionState::ResolvingDetails)) => {
            debug_assert!(state.is_terminal(), "resolve returned {}", state.name());
            log::error!("resolution ended in non-terminal state {}", state.name());
        }
        None => {
            // A newer selection took over mid-flight; its own render wins
        }
    }
}
