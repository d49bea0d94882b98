use std::collections::HashMap;
use std::f32::consts::TAU;

use tracing::debug;

use crate::geometry::{Vec2, vec2};
use crate::links::LinkIndex;
use crate::note::Document;

use super::{GraphNode, NoteGraph};

const SEED_RADIUS_BASE: f32 = 150.0;
const SEED_RADIUS_GROWTH: f32 = 10.0;
const SEED_RADIUS_CAP: f32 = 300.0;

/// Builds the spatial graph from documents and their resolved links.
///
/// Documents with zero resolved references never become nodes; leaving
/// isolated points out keeps the rendered graph meaningful. Nodes are seeded
/// on a circle whose radius grows mildly with graph size, then caps.
pub fn build_graph(documents: &[Document], links: &LinkIndex) -> NoteGraph {
    let linked = documents
        .iter()
        .filter(|document| {
            links
                .neighbor_counts
                .get(&document.id)
                .is_some_and(|&count| count > 0)
        })
        .collect::<Vec<_>>();

    let node_count = linked.len();
    let seed_radius = SEED_RADIUS_BASE + (SEED_RADIUS_GROWTH * node_count as f32).min(SEED_RADIUS_CAP);

    let mut index_by_id = HashMap::with_capacity(node_count);
    let mut nodes = Vec::with_capacity(node_count);
    for (index, document) in linked.iter().enumerate() {
        index_by_id.insert(document.id.clone(), index);

        let angle = TAU * index as f32 / node_count as f32;
        nodes.push(GraphNode {
            id: document.id.clone(),
            label: document.title.clone(),
            neighbor_count: links
                .neighbor_counts
                .get(&document.id)
                .copied()
                .unwrap_or(0),
            position: vec2(angle.cos(), angle.sin()) * seed_radius,
            velocity: Vec2::ZERO,
            pinned: document.pinned,
        });
    }

    let mut edges = links
        .edges
        .iter()
        .filter_map(|(source_id, target_id)| {
            let source = *index_by_id.get(source_id)?;
            let target = *index_by_id.get(target_id)?;
            if source == target {
                return None;
            }
            Some(if source < target {
                (source, target)
            } else {
                (target, source)
            })
        })
        .collect::<Vec<_>>();
    edges.sort_unstable();
    edges.dedup();

    debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        "built note graph"
    );
    NoteGraph {
        nodes,
        edges,
        index_by_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::extract_links;

    fn doc(id: &str, title: &str, content: &str) -> Document {
        Document {
            id: id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            pinned: false,
        }
    }

    fn build(documents: &[Document]) -> NoteGraph {
        let links = extract_links(documents);
        build_graph(documents, &links)
    }

    #[test]
    fn unlinked_documents_are_excluded() {
        let documents = vec![
            doc("a", "Project", "...[[Implementation]]..."),
            doc("b", "Implementation", "...[[Project]]..."),
            doc("c", "Notes", "no links here"),
        ];

        let graph = build(&documents);
        assert_eq!(graph.node_count(), 2);
        assert!(graph.node_by_id("a").is_some());
        assert!(graph.node_by_id("b").is_some());
        assert!(graph.node_by_id("c").is_none());
        assert_eq!(graph.edges.len(), 1);
    }

    #[test]
    fn empty_document_set_yields_empty_graph() {
        let graph = build(&[]);
        assert!(graph.is_empty());
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn initial_positions_lie_on_the_seed_circle() {
        let documents = vec![
            doc("a", "Project", "[[Implementation]]"),
            doc("b", "Implementation", ""),
        ];

        let graph = build(&documents);
        // radius = 150 + min(10 * 2, 300)
        for node in &graph.nodes {
            assert!((node.position.length() - 170.0).abs() < 1e-2);
            assert_eq!(node.velocity, Vec2::ZERO);
        }
    }

    #[test]
    fn seed_radius_caps_for_large_graphs() {
        let mut documents = vec![doc("hub", "Hub", "")];
        for index in 0..40 {
            documents.push(doc(
                &format!("n{index}"),
                &format!("Note {index}"),
                "[[Hub]]",
            ));
        }

        let graph = build(&documents);
        assert_eq!(graph.node_count(), 41);
        // radius = 150 + min(10 * 41, 300)
        for node in &graph.nodes {
            assert!((node.position.length() - 450.0).abs() < 1e-1);
        }
    }

    #[test]
    fn pinned_hint_is_copied_through() {
        let mut pinned = doc("a", "Project", "[[Implementation]]");
        pinned.pinned = true;
        let documents = vec![pinned, doc("b", "Implementation", "")];

        let graph = build(&documents);
        assert!(graph.node_by_id("a").unwrap().pinned);
        assert!(!graph.node_by_id("b").unwrap().pinned);
    }

    #[test]
    fn rebuild_is_deterministic() {
        let documents = vec![
            doc("a", "Project", "[[Implementation]] [[Meeting Notes]]"),
            doc("b", "Implementation", "[[Project]]"),
            doc("c", "Meeting Notes", "[[Implementation]]"),
        ];

        let first = build(&documents);
        let second = build(&documents);

        assert_eq!(first.node_count(), second.node_count());
        assert_eq!(first.edges, second.edges);
        for (left, right) in first.nodes.iter().zip(&second.nodes) {
            assert_eq!(left.id, right.id);
            assert_eq!(left.position, right.position);
        }
    }
}
