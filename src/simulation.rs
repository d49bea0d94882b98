use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::debug;

use crate::graph::NoteGraph;
use crate::physics::{self, PhysicsConfig};

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(16);

/// Graph shared between the simulation worker and render/hit-test readers.
pub type SharedGraph = Arc<RwLock<NoteGraph>>;

/// Invoked after every published tick.
pub type TickObserver = Box<dyn Fn(&NoteGraph) + Send>;

/// Drives the force step on a fixed cadence from a worker thread.
///
/// Positions are published by swapping the node vector under a write lock,
/// so readers never observe a half-updated tick. Pausing clears the running
/// flag; the worker checks it before every tick, so no further ticks run.
/// The loop has no convergence condition; it runs until paused or dropped.
pub struct SimulationLoop {
    shared: SharedGraph,
    running: Arc<AtomicBool>,
    shutdown: Arc<AtomicBool>,
    observer: Arc<Mutex<Option<TickObserver>>>,
    worker: Option<JoinHandle<()>>,
    config: PhysicsConfig,
    tick_interval: Duration,
}

impl SimulationLoop {
    pub fn new(config: PhysicsConfig, tick_interval: Duration) -> Self {
        Self {
            shared: Arc::new(RwLock::new(NoteGraph::default())),
            running: Arc::new(AtomicBool::new(false)),
            shutdown: Arc::new(AtomicBool::new(false)),
            observer: Arc::new(Mutex::new(None)),
            worker: None,
            config,
            tick_interval,
        }
    }

    /// Replaces the simulated graph and begins ticking.
    /// An empty graph is refused; the loop stays paused.
    pub fn start(&mut self, graph: NoteGraph) {
        if graph.is_empty() {
            debug!("not starting simulation: graph has no nodes");
            *write_graph(&self.shared) = graph;
            self.running.store(false, Ordering::Release);
            return;
        }

        *write_graph(&self.shared) = graph;
        self.spawn_worker();
        self.running.store(true, Ordering::Release);
    }

    pub fn pause(&self) {
        self.running.store(false, Ordering::Release);
    }

    pub fn resume(&self) {
        if !read_graph(&self.shared).is_empty() {
            self.running.store(true, Ordering::Release);
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Handle for readers; the worker is the only writer.
    pub fn graph(&self) -> SharedGraph {
        Arc::clone(&self.shared)
    }

    /// Owned copy of the current graph state.
    pub fn snapshot(&self) -> NoteGraph {
        read_graph(&self.shared).clone()
    }

    /// Registers the observer notified after each published tick.
    pub fn set_observer(&self, observer: impl Fn(&NoteGraph) + Send + 'static) {
        *lock_observer(&self.observer) = Some(Box::new(observer));
    }

    fn spawn_worker(&mut self) {
        if self.worker.is_some() {
            return;
        }

        let shared = Arc::clone(&self.shared);
        let running = Arc::clone(&self.running);
        let shutdown = Arc::clone(&self.shutdown);
        let observer = Arc::clone(&self.observer);
        let config = self.config;
        let tick_interval = self.tick_interval;

        self.worker = Some(thread::spawn(move || {
            debug!("simulation worker started");
            while !shutdown.load(Ordering::Acquire) {
                if running.load(Ordering::Acquire) {
                    let stepped = {
                        let graph = read_graph(&shared);
                        if graph.is_empty() {
                            None
                        } else {
                            Some(physics::step(&graph.nodes, &graph.edges, &config))
                        }
                    };

                    if let Some(nodes) = stepped {
                        write_graph(&shared).nodes = nodes;
                        if let Some(observer) = lock_observer(&observer).as_ref() {
                            observer(&read_graph(&shared));
                        }
                    }
                }

                thread::sleep(tick_interval);
            }
            debug!("simulation worker stopped");
        }));
    }
}

impl Drop for SimulationLoop {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Release);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

// Lock poisoning only happens if a tick panicked; recover with the inner
// value rather than propagating the panic to readers.
fn read_graph(shared: &SharedGraph) -> RwLockReadGuard<'_, NoteGraph> {
    shared.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write_graph(shared: &SharedGraph) -> RwLockWriteGuard<'_, NoteGraph> {
    shared.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn lock_observer(
    observer: &Arc<Mutex<Option<TickObserver>>>,
) -> std::sync::MutexGuard<'_, Option<TickObserver>> {
    observer.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
