use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

/// A note supplied by the external store. Read-only to this crate.
#[derive(Clone, Debug, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Rendering hint carried through to the graph; never constrains physics.
    #[serde(default)]
    pub pinned: bool,
}

/// Loads every `*.md` file in `dir` as a document.
///
/// The file stem becomes the id; the first `# ` heading becomes the title,
/// falling back to the stem. Documents are returned sorted by id so that
/// link resolution order is stable across runs.
pub fn load_documents(dir: &Path) -> Result<Vec<Document>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read notes directory {}", dir.display()))?;

    let mut documents = Vec::new();
    for entry in entries {
        let entry = entry.context("failed to read notes directory entry")?;
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("md") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };

        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read note {}", path.display()))?;
        let title = title_of(&content).unwrap_or(stem).to_string();
        let pinned = pinned_marker(&content);

        documents.push(Document {
            id: stem.to_string(),
            title,
            content,
            pinned,
        });
    }

    documents.sort_by(|a, b| a.id.cmp(&b.id));
    debug!(count = documents.len(), "loaded notes from {}", dir.display());
    Ok(documents)
}

/// First `# ` heading in the document, if any.
pub(crate) fn title_of(content: &str) -> Option<&str> {
    content.lines().find_map(|line| {
        let heading = line.strip_prefix("# ")?.trim();
        (!heading.is_empty()).then_some(heading)
    })
}

/// A `<!-- pinned -->` marker near the top of the note marks it pinned.
pub(crate) fn pinned_marker(content: &str) -> bool {
    content
        .lines()
        .take(5)
        .any(|line| line.trim() == "<!-- pinned -->")
}
