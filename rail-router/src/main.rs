use rail_router::config::AppConfig;
use rail_router::geocoder::NominatimClient;
use rail_router::overpass::OverpassClient;
use rail_router::route::RouteBuilder;
use rail_router::web::{ServerState, create_router};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rail_router=info")),
        )
        .init();

    let config = AppConfig::from_env();

    let geocoder = NominatimClient::new(config.nominatim.clone())?;
    let network = OverpassClient::new(config.overpass.clone())?;

    let state = ServerState::new(RouteBuilder::new(geocoder, network));
    let app = create_router(state);

    info!(
        addr = %config.addr,
        nominatim = %config.nominatim.base_url,
        overpass = %config.overpass.interpreter_url,
        "rail router listening"
    );
    info!("  GET  /health          - Health check");
    info!("  GET  /geocode?q=NAME  - Resolve one stop");
    info!("  POST /route           - Build a route through a stop list");

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
