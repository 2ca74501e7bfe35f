use std::sync::{Arc, Mutex};
use std::time::Duration;

use swarm_dashboard::adapters::outbound::{init_buffered_logger, init_noop_logger, MockLedgerClient, MultiLogger};
use swarm_dashboard::config::{LedgerConfig, SimulationConfig};
use swarm_dashboard::domains::logger::{DomainLogger, DynLogger};
use swarm_dashboard::DashboardService;

struct BridgeCapture {
    messages: Arc<Mutex<Vec<String>>>,
}

impl BridgeCapture {
    fn new() -> Self { Self { messages: Arc::new(Mutex::new(Vec::new())) } }
}

impl DomainLogger for BridgeCapture {
    fn info(&self, msg: &str) { self.messages.lock().unwrap().push(format!("INFO:{}", msg)); }
    fn warn(&self, msg: &str) { self.messages.lock().unwrap().push(format!("WARN:{}", msg)); }
    fn error(&self, msg: &str) { self.messages.lock().unwrap().push(format!("ERR:{}", msg)); }
}

fn dashboard(logger: DynLogger) -> DashboardService {
    let config = SimulationConfig { seed: Some(1), ..SimulationConfig::default() };
    let ledger = Arc::new(MockLedgerClient::new(&LedgerConfig::default()).with_latency(Duration::ZERO));
    DashboardService::new(&config, ledger, logger, None)
}

#[tokio::test]
async fn test_buffered_and_noop_logger() {
    let capture = Arc::new(BridgeCapture::new());
    let bridge = capture.clone() as DynLogger;

    let buffered = init_buffered_logger(bridge.clone(), 8);

    buffered.info("one");
    buffered.warn("two");
    buffered.error("three");

    // Give the background task a moment
    tokio::time::sleep(Duration::from_millis(50)).await;

    let msgs = capture.messages.lock().unwrap();
    assert_eq!(*msgs, vec!["INFO:one", "WARN:two", "ERR:three"]);

    let noop = init_noop_logger();
    noop.info("ignored");
    noop.error("ignored-err");
}

#[test]
fn test_multi_logger_fans_out() {
    let first = Arc::new(BridgeCapture::new());
    let second = Arc::new(BridgeCapture::new());
    let multi = MultiLogger::new(vec![first.clone() as DynLogger, second.clone() as DynLogger]);

    multi.warn("low battery");

    assert_eq!(*first.messages.lock().unwrap(), vec!["WARN:low battery"]);
    assert_eq!(*second.messages.lock().unwrap(), vec!["WARN:low battery"]);
}

#[test]
fn test_path_errors_are_logged() {
    let capture = Arc::new(BridgeCapture::new());
    let mut service = dashboard(capture.clone());

    assert!(service.load_paths("0,0 x,y").is_err());

    let msgs = capture.messages.lock().unwrap();
    assert_eq!(msgs.len(), 1);
    assert!(msgs[0].starts_with("ERR:Error processing path input:"));
}

#[test]
fn test_message_outcomes_are_logged_by_severity() {
    let capture = Arc::new(BridgeCapture::new());
    let service = dashboard(capture.clone());

    service.handle_message(r#"{"type":"weather"}"#);
    service.handle_message("{broken");
    service.handle_message(r#"{"type":"agentUpdate","agentId":42,"update":{}}"#);

    let msgs = capture.messages.lock().unwrap();
    assert_eq!(msgs[0], "WARN:Unknown message type: weather");
    assert!(msgs[1].starts_with("ERR:Error processing message:"));
    assert!(msgs[2].starts_with("INFO:Ignored message:"));
}

#[tokio::test]
async fn test_deploy_failure_is_logged() {
    let capture = Arc::new(BridgeCapture::new());
    let service = dashboard(capture.clone());

    assert!(service.deploy_agent(1).await.is_err());

    let msgs = capture.messages.lock().unwrap();
    assert!(msgs.iter().any(|m| m.starts_with("ERR:Error deploying agent 1:")));
}

#[test]
fn test_seeded_rng_is_reproducible() {
    // services built from the same seed see the same grid
    let a = dashboard(init_noop_logger()).snapshot();
    let b = dashboard(init_noop_logger()).snapshot();
    assert_eq!(a.grid, b.grid);
}
