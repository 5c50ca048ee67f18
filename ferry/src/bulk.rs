//! Bulk write chunking and NDJSON payload assembly
//!
//! Documents are split into size-bounded batches in input order; a document
//! is never split across batches. Each batch becomes one `_bulk` payload of
//! action-descriptor/document line pairs, terminated by a blank line.

use serde_json::{json, Value};

/// A `(document id, document body)` pair in submission order
pub type BulkDoc = (String, Value);

/// Split documents into batches of at most `max_batch_size`
///
/// Yields `ceil(N / max_batch_size)` batches; concatenating them reproduces
/// the input order exactly.
pub fn chunk(docs: &[BulkDoc], max_batch_size: usize) -> Vec<&[BulkDoc]> {
    docs.chunks(max_batch_size.max(1)).collect()
}

/// Assemble one batch into an engine `_bulk` request body
pub fn assemble(batch: &[BulkDoc], index: &str, type_name: &str) -> String {
    let mut payload = String::new();
    for (id, doc) in batch {
        let action = json!({
            "index": {"_index": index, "_type": type_name, "_id": id}
        });
        payload.push_str(&action.to_string());
        payload.push('\n');
        payload.push_str(&doc.to_string());
        payload.push('\n');
    }
    // the engine requires the payload to end with a blank line
    payload.push('\n');
    payload
}
