//! Force-directed graph core for wiki-linked note collections.
//!
//! Documents flow through [`links::extract_links`] and
//! [`graph::build_graph`] into a [`graph::NoteGraph`], which
//! [`simulation::SimulationLoop`] relaxes on a fixed cadence while
//! [`viewport::Viewport`] maps screen points to graph space for
//! hit-testing. [`engine::NoteGraphEngine`] wires the pieces together for a
//! host UI; all drawing is left to the host.

pub mod engine;
pub mod geometry;
pub mod graph;
pub mod links;
pub mod note;
pub mod physics;
pub mod simulation;
pub mod viewport;

pub use engine::NoteGraphEngine;
pub use geometry::{Vec2, vec2};
pub use graph::{GraphNode, NoteGraph, build_graph};
pub use links::{LinkIndex, extract_links};
pub use note::{Document, load_documents};
pub use physics::PhysicsConfig;
pub use simulation::SimulationLoop;
pub use viewport::Viewport;
