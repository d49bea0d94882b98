use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::note::Document;

/// Resolved cross-references for one document set.
#[derive(Clone, Debug, Default)]
pub struct LinkIndex {
    /// Deduplicated by unordered id pair; no self-edges.
    pub edges: Vec<(String, String)>,
    /// Incremented once per resolved reference occurrence, on both
    /// endpoints, so a count can exceed a node's edge degree.
    pub neighbor_counts: HashMap<String, usize>,
}

/// Scans every document for `[[Name]]` / `[[Name|Alias]]` tokens and
/// resolves them against document titles.
///
/// Titles match case-insensitively; when several documents share a title the
/// first by input order wins. Unresolved names and self-references are
/// dropped without error.
pub fn extract_links(documents: &[Document]) -> LinkIndex {
    let mut id_by_title: HashMap<String, &str> = HashMap::with_capacity(documents.len());
    for document in documents {
        id_by_title
            .entry(document.title.to_lowercase())
            .or_insert(document.id.as_str());
    }

    let mut edges = Vec::new();
    let mut seen_pairs = HashSet::new();
    let mut neighbor_counts: HashMap<String, usize> = HashMap::new();

    for document in documents {
        for name in wiki_link_names(&document.content) {
            let Some(&target_id) = id_by_title.get(&name.to_lowercase()) else {
                continue;
            };
            if target_id == document.id {
                continue;
            }

            *neighbor_counts.entry(document.id.clone()).or_insert(0) += 1;
            *neighbor_counts.entry(target_id.to_string()).or_insert(0) += 1;

            let pair = if document.id.as_str() <= target_id {
                (document.id.clone(), target_id.to_string())
            } else {
                (target_id.to_string(), document.id.clone())
            };
            if seen_pairs.insert(pair) {
                edges.push((document.id.clone(), target_id.to_string()));
            }
        }
    }

    debug!(
        edges = edges.len(),
        linked = neighbor_counts.len(),
        "extracted wiki-links"
    );
    LinkIndex {
        edges,
        neighbor_counts,
    }
}

/// Names referenced by `[[..]]` tokens, alias text stripped.
/// An unterminated `[[` ends the scan; the remainder is plain text.
fn wiki_link_names(content: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = content;

    while let Some(open) = rest.find("[[") {
        rest = &rest[open + 2..];
        let Some(close) = rest.find("]]") else {
            break;
        };
        let inner = &rest[..close];
        rest = &rest[close + 2..];

        let name = inner.split('|').next().unwrap_or(inner).trim();
        if !name.is_empty() {
            names.push(name);
        }
    }

    names
}
