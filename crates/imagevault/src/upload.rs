//! Upload orchestration: filter -> fan out -> persist.
//!
//! The filter decision is the only synchronous gate. Each store definition
//! of the collection is then an independent write path: the original's
//! bytes pass through untouched, variants go through the transformer, and
//! writes run concurrently with no ordering between their completions. A
//! failed transform or write is terminal for that one store and leaves the
//! others untouched.

use bytes::Bytes;
use futures::future;
use imagevault_core::{AppResult, FileRecord, StoreDefinition};
use imagevault_processing::{FileMetadata, ImageTransformer, UploadFilter};
use imagevault_storage::{object_key, ObjectStore};
use std::sync::Arc;

fn sanitize_filename(filename: &str) -> String {
    const MAX: usize = 255;
    let path = std::path::Path::new(filename);
    let base = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(filename);
    if base.contains("..") {
        return "invalid_filename".to_string();
    }
    let s: String = base
        .chars()
        .take(MAX)
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if s.trim().is_empty() {
        "file".to_string()
    } else {
        s
    }
}

/// Run one file through the pipeline.
///
/// Returns `Ok(None)` when the filter rejects (the `on_invalid` hook has
/// fired; nothing was stored). On admission, returns the file record with
/// `stored` listing every store whose write completed.
pub async fn store_file(
    collection: &str,
    stores: &[StoreDefinition],
    filter: &UploadFilter,
    transformer: Option<Arc<dyn ImageTransformer>>,
    object_store: Arc<dyn ObjectStore>,
    meta: &FileMetadata,
    data: Bytes,
) -> AppResult<Option<FileRecord>> {
    if !filter.accept(meta) {
        return Ok(None);
    }

    let mut record = FileRecord::new(sanitize_filename(&meta.name), collection);

    let writes = stores.iter().map(|definition| {
        write_one_store(
            definition,
            &record,
            meta,
            data.clone(),
            transformer.clone(),
            object_store.clone(),
        )
    });

    for completed in future::join_all(writes).await.into_iter().flatten() {
        record.stored.insert(completed);
    }

    tracing::info!(
        collection = %collection,
        file_id = %record.id,
        stores_total = stores.len(),
        stores_completed = record.stored.len(),
        "Upload processed"
    );

    Ok(Some(record))
}

/// Persist one store's copy. Returns the store name on success; `None`
/// covers every per-store failure mode (degraded transformer, transform
/// error, write error), each already logged.
async fn write_one_store(
    definition: &StoreDefinition,
    record: &FileRecord,
    meta: &FileMetadata,
    data: Bytes,
    transformer: Option<Arc<dyn ImageTransformer>>,
    object_store: Arc<dyn ObjectStore>,
) -> Option<String> {
    let payload = match definition.variant {
        None => data,
        Some(dims) => {
            let Some(transformer) = transformer else {
                tracing::warn!(
                    store = %definition.name,
                    "Image transformer unavailable, variant skipped"
                );
                return None;
            };
            match transformer.render(&data, dims) {
                Ok(rendered) => rendered,
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        store = %definition.name,
                        width = dims.width,
                        height = dims.height,
                        "Variant transform failed"
                    );
                    return None;
                }
            }
        }
    };

    let key = object_key(&definition.name, &record.collection, record.id, &record.name);
    match object_store.put(&key, &meta.content_type, payload).await {
        Ok(()) => Some(definition.name.clone()),
        Err(e) => {
            tracing::error!(
                error = %e,
                store = %definition.name,
                key = %key,
                "Store write failed"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("photo.jpg"), "photo.jpg");
        assert_eq!(sanitize_filename("my photo!.png"), "my_photo_.png");
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("a..b.png"), "invalid_filename");
        assert_eq!(sanitize_filename(""), "file");
    }
}
