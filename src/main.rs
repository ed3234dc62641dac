//! whereclock - whereabouts clock daemon
//!
//! Tracks the current location of a fixed roster of people from OwnTracks
//! presence events delivered over MQTT, and serves the latest state to a
//! display frontend.
//!
//! Module structure:
//! - `domain/` - Core types (Person, Location, InboundEvent, Registry, Roster)
//! - `io/` - External interfaces (MQTT ingest, state HTTP server)
//! - `services/` - Business logic (Tracker, ChangeNotifier)
//! - `infra/` - Infrastructure (Config)

use clap::Parser;
use tokio::sync::{mpsc, watch};
use tracing::info;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;
use whereclock::domain::registry::{LocationRegistry, Roster};
use whereclock::infra::Config;
use whereclock::io::WaypointStore;
use whereclock::services::{ChangeNotifier, Tracker};

/// Whereabouts clock - household presence tracking daemon
#[derive(Parser, Debug)]
#[command(name = "whereclock", version, about)]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "config/dev.toml")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments using clap
    let args = Args::parse();

    // Load configuration from TOML file (needed before logging: the debug
    // flag selects the default filter level)
    let config = Config::load_from_path(&args.config);

    // Initialize structured logging; RUST_LOG overrides the config flag
    let default_filter = if config.debug() { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(UtcTime::rfc_3339())
        .with_target(false)
        .init();

    info!(git_hash = env!("GIT_HASH"), "whereclock starting");

    // Log configuration
    info!(
        config_file = %config.config_file(),
        mqtt_host = %config.mqtt_host(),
        mqtt_port = %config.mqtt_port(),
        base_topic = %config.mqtt_base_topic(),
        http_port = %config.http_port(),
        locations = ?config.locations(),
        people = ?config.people(),
        "config_loaded"
    );

    // Build the immutable startup sets
    let registry = LocationRegistry::new(config.locations().iter().cloned());
    let roster = Roster::new(config.people().iter().cloned());

    // Create shutdown signal
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // Create event channel (bounded for backpressure)
    let (event_tx, event_rx) = mpsc::channel(1000);

    // Create shared components
    let changes = ChangeNotifier::new();
    let waypoints = WaypointStore::new();
    let (mut tracker, snapshot_rx) =
        Tracker::new(registry, roster, changes.clone(), waypoints.clone());

    // Start MQTT ingest client
    let mqtt_config = config.clone();
    let mqtt_shutdown = shutdown_rx.clone();
    tokio::spawn(async move {
        if let Err(e) =
            whereclock::io::mqtt::start_mqtt_client(&mqtt_config, event_tx, mqtt_shutdown).await
        {
            tracing::error!(error = %e, "MQTT client error");
        }
    });

    // Start state HTTP server (if port > 0)
    let http_port = config.http_port();
    if http_port > 0 {
        let http_snapshot_rx = snapshot_rx.clone();
        let http_waypoints = waypoints.clone();
        let http_changes = changes.clone();
        let http_shutdown = shutdown_rx.clone();
        tokio::spawn(async move {
            if let Err(e) = whereclock::io::http::start_state_server(
                http_port,
                http_snapshot_rx,
                http_waypoints,
                http_changes,
                http_shutdown,
            )
            .await
            {
                tracing::error!(error = %e, "State server error");
            }
        });
    }

    // Handle shutdown on Ctrl+C
    let shutdown_signal = shutdown_tx;
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("shutdown_signal_received");
        let _ = shutdown_signal.send(true);
    });

    // Run tracker - consumes events until shutdown or channel close
    info!(people = %tracker.tracked_count(), "tracker_started");
    tracker.run(event_rx, shutdown_rx).await;

    info!("whereclock shutdown complete");
    Ok(())
}
