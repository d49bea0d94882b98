mod build;

pub use build::build_graph;

use std::collections::HashMap;

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::geometry::Vec2;

/// A note that participates in at least one resolved link.
#[derive(Clone, Debug)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    /// Resolved link occurrences touching this node; can exceed edge degree.
    pub neighbor_count: usize,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Rendering hint only; the simulation still moves pinned nodes.
    pub pinned: bool,
}

/// The spatial graph handed to the simulation and the external renderer.
///
/// Edges are index pairs into `nodes`, normalized to `source < target` and
/// deduplicated; no self-pairs occur.
#[derive(Clone, Debug, Default)]
pub struct NoteGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<(usize, usize)>,
    index_by_id: HashMap<String, usize>,
}

impl NoteGraph {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    pub fn node_by_id(&self, id: &str) -> Option<&GraphNode> {
        self.index_of(id).and_then(|index| self.nodes.get(index))
    }

    /// Ids adjacent to `id` in edge order.
    pub fn neighbors(&self, id: &str) -> Vec<&str> {
        let Some(index) = self.index_of(id) else {
            return Vec::new();
        };

        self.edges
            .iter()
            .filter_map(|&(source, target)| {
                if source == index {
                    Some(self.nodes[target].id.as_str())
                } else if target == index {
                    Some(self.nodes[source].id.as_str())
                } else {
                    None
                }
            })
            .collect()
    }

    /// Ids ranked by neighbor count, ties broken by id.
    pub fn top_by_degree(&self, limit: usize) -> Vec<&str> {
        let mut ranked = self.nodes.iter().collect::<Vec<_>>();
        ranked.sort_by(|a, b| {
            b.neighbor_count
                .cmp(&a.neighbor_count)
                .then_with(|| a.id.cmp(&b.id))
        });
        ranked.truncate(limit);
        ranked.into_iter().map(|node| node.id.as_str()).collect()
    }

    /// Fuzzy-matches `query` against node labels, best scores first.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&GraphNode> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let matcher = SkimMatcherV2::default();
        let mut ranked = self
            .nodes
            .iter()
            .filter_map(|node| {
                fuzzy_match_score(&matcher, &node.label, query).map(|score| (score, node))
            })
            .collect::<Vec<_>>();
        ranked.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.id.cmp(&b.1.id)));
        ranked.truncate(limit);
        ranked.into_iter().map(|(_score, node)| node).collect()
    }
}

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}
