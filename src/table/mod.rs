//! In-memory tabular form of query results
//!
//! One row per document. The columns are the union of every field name seen
//! in the result set, in sorted order, so the same documents always produce
//! the same table regardless of field order inside each document. A document
//! without a given field gets an empty cell in that column.

use std::collections::BTreeSet;

use mongodb::bson::Document;

use crate::formatter::{BsonConverter, CellConverter};

/// Rows and columns built from a set of review documents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl ReviewTable {
    /// Build a table from documents using the default cell conversion
    pub fn from_documents(docs: &[Document]) -> Self {
        Self::from_documents_with(docs, &CellConverter::new())
    }

    /// Build a table from documents with a custom cell converter
    pub fn from_documents_with<C>(docs: &[Document], converter: &C) -> Self
    where
        C: BsonConverter<Output = String>,
    {
        let columns = collect_columns(docs);
        let rows = docs
            .iter()
            .map(|doc| {
                columns
                    .iter()
                    .map(|column| converter.convert_optional(doc.get(column)))
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    /// Column names, sorted
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Row cells, aligned with [`columns`](Self::columns)
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Union of all field names across documents, sorted
fn collect_columns(docs: &[Document]) -> Vec<String> {
    docs.iter()
        .flat_map(|doc| doc.keys().cloned())
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}
