use serde::Deserialize;

use crate::geometry::Vec2;
use crate::graph::GraphNode;

/// Tunable force constants. Defaults are the product values.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub repulsion: f32,
    pub attraction: f32,
    pub ideal_edge_length: f32,
    pub gravity: f32,
    pub damping: f32,
    pub max_speed: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            repulsion: 5000.0,
            attraction: 0.05,
            ideal_edge_length: 120.0,
            gravity: 0.01,
            damping: 0.85,
            max_speed: 10.0,
        }
    }
}

/// Computes one simulation tick and returns the updated nodes.
///
/// Quasi-static relaxation: accumulated force is damped directly into a
/// velocity estimate each tick; no previous-tick velocity is carried
/// forward. All pairwise distances are floored at 1.0 before dividing,
/// which is the only numerical guard.
pub fn step(nodes: &[GraphNode], edges: &[(usize, usize)], config: &PhysicsConfig) -> Vec<GraphNode> {
    let node_count = nodes.len();
    let mut forces = vec![Vec2::ZERO; node_count];

    // Repulsion over all distinct pairs, O(n²).
    for a in 0..node_count {
        for b in (a + 1)..node_count {
            let delta = nodes[a].position - nodes[b].position;
            let distance = delta.length().max(1.0);
            let push = delta * (config.repulsion / (distance * distance));
            forces[a] += push;
            forces[b] -= push;
        }
    }

    // Hooke attraction per edge: shorter than ideal pushes apart, longer
    // pulls together.
    for &(source, target) in edges {
        if source >= node_count || target >= node_count || source == target {
            continue;
        }
        let delta = nodes[target].position - nodes[source].position;
        let distance = delta.length().max(1.0);
        let pull = delta * (config.attraction * (distance - config.ideal_edge_length));
        forces[source] += pull;
        forces[target] -= pull;
    }

    nodes
        .iter()
        .zip(forces)
        .map(|(node, mut force)| {
            force -= node.position * config.gravity;

            let velocity = (force * config.damping).clamp_length(config.max_speed);
            let mut next = node.clone();
            next.velocity = velocity;
            next.position = node.position + velocity;
            next
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::vec2;

    fn node_at(id: &str, x: f32, y: f32) -> GraphNode {
        GraphNode {
            id: id.to_string(),
            label: id.to_string(),
            neighbor_count: 0,
            position: vec2(x, y),
            velocity: Vec2::ZERO,
            pinned: false,
        }
    }

    fn distance_between(nodes: &[GraphNode]) -> f32 {
        nodes[0].position.distance(nodes[1].position)
    }

    #[test]
    fn unconnected_nodes_separate() {
        let nodes = vec![node_at("a", 0.0, 0.0), node_at("b", 10.0, 0.0)];

        let stepped = step(&nodes, &[], &PhysicsConfig::default());
        assert!(distance_between(&stepped) > 10.0);
    }

    #[test]
    fn repulsion_never_decreases_unconnected_distance() {
        let nodes = vec![node_at("a", -40.0, 3.0), node_at("b", 55.0, -17.0)];
        let before = distance_between(&nodes);

        let stepped = step(&nodes, &[], &PhysicsConfig::default());
        assert!(distance_between(&stepped) >= before);
    }

    #[test]
    fn coincident_nodes_stay_finite() {
        let nodes = vec![node_at("a", 5.0, 5.0), node_at("b", 5.0, 5.0)];

        let stepped = step(&nodes, &[(0, 1)], &PhysicsConfig::default());
        for node in &stepped {
            assert!(node.position.is_finite());
            assert!(node.velocity.is_finite());
        }
    }

    #[test]
    fn speed_is_clamped_to_max() {
        let nodes = vec![node_at("a", 0.0, 0.0), node_at("b", 1.0, 0.0)];

        let config = PhysicsConfig::default();
        let stepped = step(&nodes, &[], &config);
        for node in &stepped {
            assert!(node.velocity.length() <= config.max_speed + 1e-3);
        }
    }

    #[test]
    fn connected_nodes_beyond_ideal_length_pull_together() {
        let nodes = vec![node_at("a", -150.0, 0.0), node_at("b", 150.0, 0.0)];
        let before = distance_between(&nodes);

        let stepped = step(&nodes, &[(0, 1)], &PhysicsConfig::default());
        assert!(distance_between(&stepped) < before);
    }

    #[test]
    fn gravity_pulls_a_lone_node_toward_origin() {
        let nodes = vec![node_at("a", 100.0, 0.0)];

        let stepped = step(&nodes, &[], &PhysicsConfig::default());
        assert!(stepped[0].position.x < 100.0);
        assert!(stepped[0].position.x > 0.0);
    }

    #[test]
    fn velocity_is_rederived_each_tick() {
        let mut node = node_at("a", 0.0, 0.0);
        node.velocity = vec2(5.0, 5.0);

        // A lone node at the origin accumulates zero force; stale velocity
        // must not carry it anywhere.
        let stepped = step(&[node], &[], &PhysicsConfig::default());
        assert_eq!(stepped[0].velocity, Vec2::ZERO);
        assert_eq!(stepped[0].position, Vec2::ZERO);
    }

    #[test]
    fn step_does_not_mutate_its_input() {
        let nodes = vec![node_at("a", 0.0, 0.0), node_at("b", 10.0, 0.0)];

        let _ = step(&nodes, &[], &PhysicsConfig::default());
        assert_eq!(nodes[0].position, vec2(0.0, 0.0));
        assert_eq!(nodes[1].position, vec2(10.0, 0.0));
    }
}
