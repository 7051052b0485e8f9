//! Graph documents saved to disk.
//!
//! A document wraps the plain [`GraphSnapshot`] export with a name, a format
//! version and the time it was saved. The snapshot itself is what the
//! surrounding application sends to its backend; the wrapper only exists for
//! local files picked through the Export/Import menu.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::model::GraphSnapshot;
use crate::error::{FlowCanvasError, Result};

/// File extension used by the export dialog.
pub const GRAPH_FILE_EXTENSION: &str = "json";

const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default = "default_version")]
    pub version: u32,

    pub name: String,

    pub saved_at: DateTime<Utc>,

    pub graph: GraphSnapshot,
}

fn default_version() -> u32 {
    CURRENT_VERSION
}

impl GraphDocument {
    pub fn new(name: impl Into<String>, graph: GraphSnapshot) -> Self {
        Self {
            version: CURRENT_VERSION,
            name: name.into(),
            saved_at: Utc::now(),
            graph,
        }
    }

    /// Load a document from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let document: GraphDocument = serde_json::from_str(&content)?;
        if document.version > CURRENT_VERSION {
            return Err(FlowCanvasError::Serialization(format!(
                "{} uses document version {}, newest supported is {}",
                path.display(),
                document.version,
                CURRENT_VERSION
            )));
        }
        tracing::info!("Loaded graph document '{}' from {:?}", document.name, path);
        Ok(document)
    }

    /// Save the document as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::info!("Saved graph document '{}' to {:?}", self.name, path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::graph::{GraphStore, HandleSide, NodeKind};

    #[test]
    fn test_save_and_load() {
        let mut store = GraphStore::new();
        let a = store.add_node(NodeKind::Trigger, "Form submitted", "", Point::ZERO);
        let b = store.add_node(NodeKind::Action, "Email", "", Point::new(300.0, 0.0));
        store.add_edge(a, b, HandleSide::Right, HandleSide::Left);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flow.json");
        GraphDocument::new("Welcome", store.export())
            .save(&path)
            .unwrap();

        let loaded = GraphDocument::load(&path).unwrap();
        assert_eq!(loaded.name, "Welcome");
        assert_eq!(loaded.version, CURRENT_VERSION);
        assert_eq!(loaded.graph, store.export());
    }

    #[test]
    fn test_rejects_newer_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("future.json");
        let mut doc = GraphDocument::new("Future", GraphSnapshot::default());
        doc.version = CURRENT_VERSION + 1;
        doc.save(&path).unwrap();
        assert!(matches!(
            GraphDocument::load(&path),
            Err(FlowCanvasError::Serialization(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = GraphDocument::load(dir.path().join("nope.json"));
        assert!(matches!(result, Err(FlowCanvasError::Io(_))));
    }
}
