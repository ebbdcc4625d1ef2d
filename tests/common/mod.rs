//! Shared test utilities for dxf-loader integration tests.

#![allow(dead_code)]

pub mod builders;

pub use builders::{modern_layout_blocks, modern_tables, DxfBuilder};

use dxf_loader::entities::EntityType;
use dxf_loader::{read_document, CadDocument, NotificationType};

// ===========================================================================
// Read helpers
// ===========================================================================

/// Install a test subscriber once so `RUST_LOG` shows decoder traces
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Decode `text`, failing the test on error
pub fn read(text: &str) -> CadDocument {
    init_tracing();
    match read_document(text.as_bytes()) {
        Ok(document) => document,
        Err(err) => panic!("decoding failed: {err}"),
    }
}

/// Messages of all warnings raised while reading
pub fn warnings(document: &CadDocument) -> Vec<String> {
    document
        .notifications
        .of_type(NotificationType::Warning)
        .into_iter()
        .map(|n| n.message())
        .collect()
}

// ===========================================================================
// Entity helpers
// ===========================================================================

/// Count the entities of one kind across all layouts
pub fn count_kind(document: &CadDocument, kind: &str) -> usize {
    document
        .entities()
        .filter(|e| e.as_entity().entity_type() == kind)
        .count()
}

/// The model space lines
pub fn model_lines(document: &CadDocument) -> Vec<&dxf_loader::Line> {
    document
        .model_space_entities()
        .iter()
        .filter_map(|e| match e {
            EntityType::Line(line) => Some(line),
            _ => None,
        })
        .collect()
}
