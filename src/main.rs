use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use swarm_dashboard::adapters::inbound::SocketFeed;
use swarm_dashboard::adapters::outbound::{init_buffered_logger, init_dashboard_logger, MockLedgerClient};
use swarm_dashboard::common::{DomainEvent, EventEnvelope};
use swarm_dashboard::domains::ledger::LedgerClient;
use swarm_dashboard::{Config, DashboardService, TopologyService};

const DEMO_PATHS: &str = "0,0 1,0 2,0 3,0 4,0\n0,1 0,2 0,3 0,4 0,5\n2,2 3,3 4,4 5,5 6,6";

/// Forward events from `rx` to the tracing log as JSON envelopes.
fn spawn_event_logger<E>(source: &'static str, mut rx: mpsc::Receiver<E>) -> tokio::task::JoinHandle<()>
where
    E: DomainEvent + serde::Serialize + Send + 'static,
{
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match EventEnvelope::new(&event, source).and_then(|envelope| serde_json::to_string(&envelope)) {
                Ok(json) => info!(target: "events", "{}", json),
                Err(e) => warn!(source, "failed to serialize event: {}", e),
            }
        }
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting swarm dashboard");

    let config_path = std::env::var("SWARM_DASHBOARD_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let config = match Config::from_file(&config_path).await {
        Ok(config) => {
            info!(path = config_path.as_str(), "Configuration loaded successfully");
            config
        }
        Err(e) => {
            warn!(path = config_path.as_str(), "Using default configuration: {:#}", e);
            Config::default()
        }
    };

    let logger = init_buffered_logger(init_dashboard_logger(config.logging.file.as_deref()), 256);

    let (topology_tx, topology_rx) = mpsc::channel(100);
    let (simulation_tx, simulation_rx) = mpsc::channel(100);
    spawn_event_logger("topology", topology_rx);
    spawn_event_logger("simulation", simulation_rx);

    let mut topology = TopologyService::new(&config.topology, logger.clone(), Some(topology_tx));
    topology.generate(config.topology.node_count);
    topology.start_transmissions()?;

    let ledger: Arc<dyn LedgerClient> = Arc::new(MockLedgerClient::new(&config.ledger));
    let mut dashboard = DashboardService::new(&config.simulation, ledger, logger.clone(), Some(simulation_tx));

    let input = config.simulation.initial_paths.clone().unwrap_or_else(|| DEMO_PATHS.to_string());
    dashboard.load_paths(&input)?;

    let (feed, injector) = SocketFeed::connect(&config.network.socket_url, 32);
    let feed_task = dashboard.spawn_feed(feed);

    if let Err(e) = dashboard.deploy_agent(1).await {
        error!("Deployment skipped: {}", e);
    }

    dashboard.start()?;
    injector
        .push(r#"{"type":"agentUpdate","agentId":1,"update":{"battery":90}}"#)
        .await?;

    let mut updates = dashboard.subscribe();
    tokio::select! {
        _ = async {
            loop {
                let running = updates.borrow_and_update().is_running();
                if !running || updates.changed().await.is_err() {
                    break;
                }
            }
        } => info!("Simulation complete"),
        _ = tokio::signal::ctrl_c() => info!("Interrupted"),
    }

    dashboard.pause();
    topology.stop_transmissions();
    drop(injector);
    let applied = feed_task.await.unwrap_or_default();

    let snapshot = dashboard.snapshot();
    info!(
        steps = snapshot.cursor,
        remaining = snapshot.remaining_steps(),
        visited = snapshot.visited_cells.len(),
        applied,
        "Final state"
    );
    println!("{}", serde_json::to_string_pretty(&dashboard.scene())?);
    println!("{}", serde_json::to_string_pretty(&dashboard.block_chart())?);
    println!("{}", serde_json::to_string_pretty(&topology.snapshot().transmissions)?);

    // Let the buffered logger drain before the runtime shuts down
    tokio::time::sleep(Duration::from_millis(20)).await;
    info!("Shutting down swarm dashboard");

    Ok(())
}
