use routepilot::config::Config;
use routepilot::models::{CandidateRoute, RouteBounds, TravelMode};
use routepilot::navigation::host::NavigationHost;
use routepilot::navigation::info_panel::InfoPanel;
use routepilot::navigation::overlay::{LayerKind, OverlayDelta};
use routepilot::navigation::{NavigationState, Navigator};
use routepilot::services::directions::DirectionsClient;
use routepilot::services::geocoding::GeocodingClient;
use routepilot::services::route_provider::RouteProvider;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Prints navigator callbacks to the terminal
struct TerminalHost;

impl NavigationHost for TerminalHost {
    fn on_route_ready(&mut self, candidates: &[CandidateRoute], selected_index: usize) {
        for (i, route) in candidates.iter().enumerate() {
            let marker = if i == selected_index { '*' } else { ' ' };
            println!(
                "{} [{}] {} ({}): {:.2} km",
                marker,
                i,
                route.label(i),
                route.preference,
                route.distance_km()
            );
        }
    }

    fn on_selection_changed(&mut self, _selected_index: usize, panel: &InfoPanel) {
        println!();
        println!("Từ:   {}", panel.start_address);
        println!("Đến:  {}", panel.end_address);
        println!("{} · {} km · {}", panel.route_label, panel.distance_km, panel.route_duration);
        for (mode, duration) in &panel.durations {
            println!("  {:<10} {}", mode.to_string(), duration);
        }
    }

    fn on_error(&mut self, message: &str) {
        eprintln!("{}", message);
    }

    fn on_closed(&mut self) {}

    fn on_overlays(&mut self, layer: LayerKind, delta: &OverlayDelta) {
        tracing::debug!(
            layer = ?layer,
            added = delta.added.len(),
            restyled = delta.restyled.len(),
            removed = delta.removed.len(),
            "Overlay update"
        );
    }

    fn on_fit_bounds(&mut self, bounds: RouteBounds) {
        tracing::debug!(?bounds, "Fit bounds");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "routepilot=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 {
        return Err("usage: routepilot <from> <to> [walking|bike|motorbike|car]".into());
    }

    // Load configuration
    let config = Config::from_env().map_err(|e| format!("Failed to load configuration: {}", e))?;
    let mode: TravelMode = match args.get(2) {
        Some(raw) => raw.parse()?,
        None => config.default_mode,
    };

    let geocoder = GeocodingClient::from_config(&config)?;
    let start = geocoder.resolve(&args[0]).await?;
    let end = geocoder.resolve(&args[1]).await?;
    tracing::info!(start = %start.full_address, end = %end.full_address, "Endpoints resolved");

    let directions = DirectionsClient::from_config(&config)?;
    let provider = RouteProvider::new(Arc::new(directions));
    let mut navigator = Navigator::new(provider, TerminalHost, mode);

    match navigator.navigate(start, end).await {
        NavigationState::Active => Ok(()),
        NavigationState::Error(message) => Err(message.clone().into()),
        other => Err(format!("Unexpected navigation state: {:?}", other).into()),
    }
}
