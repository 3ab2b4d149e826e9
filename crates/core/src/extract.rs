//! Train record extraction from a parsed booking results page.
//!
//! Every node matching the schema's container selector becomes one
//! [`TrainRecord`], in document order. Containers are read independently; a
//! field whose selector matches nothing is left empty without affecting the
//! rest of the record or any other container.
//!
//! # Example
//!
//! ```rust
//! use kereta_core::{Document, extract};
//!
//! let html = r#"
//!     <div class="data-wrapper">
//!         <div class="name">ARGO LAWU</div>
//!         <div class="price">Rp 350.000,-</div>
//!     </div>
//! "#;
//!
//! let doc = Document::parse(html).unwrap();
//! let trains = extract(&doc);
//! assert_eq!(trains.len(), 1);
//! assert_eq!(trains.records()[0].train_name, "ARGO LAWU");
//! assert_eq!(trains.records()[0].seat_availability, "");
//! ```

use std::sync::LazyLock;

use crate::parse::Document;
use crate::record::ResultSet;
use crate::schema::{CompiledSchema, ExtractionSchema};

static DEFAULT_SCHEMA: LazyLock<CompiledSchema> =
    LazyLock::new(|| ExtractionSchema::default().compile().unwrap());

/// Extracts trains using the default schema.
pub fn extract(document: &Document) -> ResultSet {
    extract_with_schema(document, &DEFAULT_SCHEMA)
}

/// Extracts trains using a compiled schema.
///
/// Returns an empty set when no container is found.
pub fn extract_with_schema(document: &Document, schema: &CompiledSchema) -> ResultSet {
    let containers = document.select_compiled(schema.container());
    tracing::debug!(containers = containers.len(), "found train containers");

    containers
        .iter()
        .enumerate()
        .map(|(index, container)| {
            let record = schema.record(container);
            tracing::debug!(index, train = record.train_name.as_str(), "extracted train");
            record
        })
        .collect()
}
