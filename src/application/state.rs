use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{mpsc, watch};
use tracing::debug;

use crate::domains::simulation::{SimulationController, SimulationSnapshot};
use crate::domains::topology::{TopologyController, TopologySnapshot};

/// A controller that can describe itself as an immutable view.
pub trait Snapshotting: Send + 'static {
    type View: Send + Sync + 'static;

    fn view(&self) -> Self::View;
}

impl Snapshotting for TopologyController {
    type View = TopologySnapshot;

    fn view(&self) -> TopologySnapshot {
        self.snapshot()
    }
}

impl Snapshotting for SimulationController {
    type View = SimulationSnapshot;

    fn view(&self) -> SimulationSnapshot {
        self.snapshot()
    }
}

/// Shared ownership of one controller. Every `update` runs under the lock and
/// publishes a fresh view, so subscribers only ever see whole states.
pub struct SharedState<C: Snapshotting, E> {
    controller: Arc<Mutex<C>>,
    views: Arc<watch::Sender<Arc<C::View>>>,
    events: Option<mpsc::Sender<E>>,
}

impl<C: Snapshotting, E> Clone for SharedState<C, E> {
    fn clone(&self) -> Self {
        Self {
            controller: self.controller.clone(),
            views: self.views.clone(),
            events: self.events.clone(),
        }
    }
}

impl<C: Snapshotting, E: Send + 'static> SharedState<C, E> {
    pub fn new(controller: C, events: Option<mpsc::Sender<E>>) -> Self {
        let (views, _) = watch::channel(Arc::new(controller.view()));
        Self {
            controller: Arc::new(Mutex::new(controller)),
            views: Arc::new(views),
            events,
        }
    }

    pub fn update<T>(&self, f: impl FnOnce(&mut C) -> T) -> T {
        let mut guard = self.controller.lock().unwrap_or_else(PoisonError::into_inner);
        let out = f(&mut guard);
        self.views.send_replace(Arc::new(guard.view()));
        out
    }

    pub fn read<T>(&self, f: impl FnOnce(&C) -> T) -> T {
        let guard = self.controller.lock().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    pub fn current(&self) -> Arc<C::View> {
        self.views.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<C::View>> {
        self.views.subscribe()
    }

    /// Forward an event to the view consumer. Dropped when the channel is full
    /// or nobody listens.
    pub fn emit(&self, event: E) {
        if let Some(tx) = &self.events {
            if tx.try_send(event).is_err() {
                debug!("event channel full or closed, dropping event");
            }
        }
    }

    pub fn emit_all(&self, events: impl IntoIterator<Item = E>) {
        for event in events {
            self.emit(event);
        }
    }
}
