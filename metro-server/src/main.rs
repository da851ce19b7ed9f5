use std::net::SocketAddr;
use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use metro_server::domain::FareSchedule;
use metro_server::network::MetroNetwork;
use metro_server::network::seed::sample_network_with_fares;
use metro_server::store;
use metro_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Fare schedule from environment, defaulting to the standard tariff.
    let fares = FareSchedule::new(
        env_u32("METRO_BASE_FARE", FareSchedule::default().base),
        env_u32("METRO_FARE_PER_HOP", FareSchedule::default().per_hop),
    );

    // Load persisted state, or seed the sample network on first run.
    let data_path =
        PathBuf::from(std::env::var("METRO_DATA").unwrap_or_else(|_| "metro.json".to_string()));
    let network = if data_path.exists() {
        match store::load(&data_path, fares) {
            Ok(network) => {
                println!(
                    "Loaded {} stations from {}",
                    network.station_count(),
                    data_path.display()
                );
                network
            }
            Err(e) => {
                eprintln!("Failed to load {}: {}", data_path.display(), e);
                std::process::exit(1);
            }
        }
    } else {
        println!("No data at {}; seeding sample network", data_path.display());
        let network = sample_network_with_fares(fares);
        if let Err(e) = store::save(&network, &data_path) {
            eprintln!("Warning: failed to write seed snapshot: {}", e);
        }
        network
    };

    serve(network, data_path).await;
}

async fn serve(network: MetroNetwork, data_path: PathBuf) {
    let state = AppState::new(network, Some(data_path));
    let app = create_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    println!("Metro ticketing server listening on http://{addr}");
    println!();
    println!("API Endpoints:");
    println!("  GET  /health    - Health check");
    println!("  GET  /stations  - Stations grouped by line");
    println!("  GET  /route     - Shortest route and fare quote");
    println!("  GET  /tickets   - List purchased tickets");
    println!("  POST /tickets   - Purchase a ticket");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listen address");
    axum::serve(listener, app)
        .await
        .expect("server terminated unexpectedly");
}

fn env_u32(var: &str, default: u32) -> u32 {
    match std::env::var(var) {
        Ok(value) => value.parse().unwrap_or_else(|_| {
            eprintln!("Warning: {} is not a number; using {}", var, default);
            default
        }),
        Err(_) => default,
    }
}
