use std::time::Duration;

use tracing::info;

use crate::geometry::Vec2;
use crate::graph::build_graph;
use crate::links::extract_links;
use crate::note::Document;
use crate::physics::PhysicsConfig;
use crate::simulation::{DEFAULT_TICK_INTERVAL, SharedGraph, SimulationLoop};
use crate::viewport::Viewport;

/// Invoked with a document id when a click lands on a node.
pub type SelectionHandler = Box<dyn Fn(&str) + Send>;

/// Ties the pieces together for a host UI: owns the document set, the
/// simulation loop, the viewport and the selection callback.
///
/// The graph is rebuilt from scratch on every document-set change; node
/// positions are reseeded, not preserved.
pub struct NoteGraphEngine {
    documents: Vec<Document>,
    simulation: SimulationLoop,
    pub viewport: Viewport,
    on_select: Option<SelectionHandler>,
}

impl NoteGraphEngine {
    pub fn new(config: PhysicsConfig) -> Self {
        Self::with_tick_interval(config, DEFAULT_TICK_INTERVAL)
    }

    pub fn with_tick_interval(config: PhysicsConfig, tick_interval: Duration) -> Self {
        Self {
            documents: Vec::new(),
            simulation: SimulationLoop::new(config, tick_interval),
            viewport: Viewport::default(),
            on_select: None,
        }
    }

    pub fn on_select(&mut self, handler: impl Fn(&str) + Send + 'static) {
        self.on_select = Some(Box::new(handler));
    }

    /// Replaces the document set, rebuilds the graph and (re)starts the
    /// simulation. The viewport is left untouched.
    pub fn set_documents(&mut self, documents: Vec<Document>) {
        let links = extract_links(&documents);
        let graph = build_graph(&documents, &links);
        info!(
            documents = documents.len(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "rebuilt note graph"
        );

        self.documents = documents;
        self.simulation.start(graph);
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Live graph handle for the external renderer.
    pub fn graph(&self) -> SharedGraph {
        self.simulation.graph()
    }

    pub fn simulation(&self) -> &SimulationLoop {
        &self.simulation
    }

    pub fn pause(&self) {
        self.simulation.pause();
    }

    pub fn resume(&self) {
        self.simulation.resume();
    }

    pub fn is_running(&self) -> bool {
        self.simulation.is_running()
    }

    /// Hit-tests a tap/click in screen space; on a hit the selection
    /// handler receives the document id, which is also returned.
    pub fn click(&self, screen_point: Vec2) -> Option<String> {
        let graph = self.simulation.snapshot();
        let node = self.viewport.hit_test(screen_point, &graph.nodes)?;

        if let Some(handler) = &self.on_select {
            handler(&node.id);
        }
        Some(node.id.clone())
    }
}
