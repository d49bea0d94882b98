use crate::geometry::Vec2;
use crate::graph::GraphNode;

pub const ZOOM_MIN: f32 = 0.3;
pub const ZOOM_MAX: f32 = 3.0;
pub const ZOOM_STEP: f32 = 1.2;
/// Selection radius around a node center, in graph units.
pub const HIT_TEST_RADIUS: f32 = 30.0;

/// Zoom/pan state mapping screen space to graph space.
/// Persists independently of graph rebuilds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub scale: f32,
    pub offset: Vec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: Vec2::ZERO,
        }
    }
}

impl Viewport {
    pub fn zoom_in(&mut self) {
        self.scale = (self.scale * ZOOM_STEP).clamp(ZOOM_MIN, ZOOM_MAX);
    }

    pub fn zoom_out(&mut self) {
        self.scale = (self.scale / ZOOM_STEP).clamp(ZOOM_MIN, ZOOM_MAX);
    }

    pub fn reset_view(&mut self) {
        *self = Self::default();
    }

    /// Accumulates the raw screen delta; pan speed in screen pixels is the
    /// same at every zoom level.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    pub fn screen_to_graph(&self, point: Vec2) -> Vec2 {
        (point - self.offset) / self.scale
    }

    pub fn graph_to_screen(&self, point: Vec2) -> Vec2 {
        point * self.scale + self.offset
    }

    /// First node in iteration order within [`HIT_TEST_RADIUS`] of the
    /// screen point, not necessarily the nearest one.
    pub fn hit_test<'nodes>(
        &self,
        point: Vec2,
        nodes: &'nodes [GraphNode],
    ) -> Option<&'nodes GraphNode> {
        let graph_point = self.screen_to_graph(point);
        nodes
            .iter()
            .find(|node| node.position.distance(graph_point) < HIT_TEST_RADIUS)
    }
}
