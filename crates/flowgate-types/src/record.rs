//! Record-operation vocabulary for the Directus CRUD dispatcher.
//!
//! Each variant maps onto one HTTP call against a per-collection
//! endpoint; the mapping itself lives in `flowgate-infra`.

use serde_json::Value;

/// One CRUD operation against a Directus collection or the files
/// endpoint.
#[derive(Debug, Clone)]
pub enum RecordOperation {
    Create {
        collection: String,
        data: Value,
    },
    Update {
        collection: String,
        record_id: String,
        data: Value,
    },
    Delete {
        collection: String,
        record_id: String,
    },
    FindOne {
        collection: String,
        record_id: String,
    },
    FindMany {
        collection: String,
        /// Directus filter rules object, passed through as the `filter`
        /// query parameter.
        filter: Option<Value>,
        /// Comma-separated field list for the `fields` query parameter.
        fields: Option<String>,
    },
    Upload(FileUpload),
}

impl RecordOperation {
    /// Operation name for logging and CLI output.
    pub fn name(&self) -> &'static str {
        match self {
            RecordOperation::Create { .. } => "create",
            RecordOperation::Update { .. } => "update",
            RecordOperation::Delete { .. } => "delete",
            RecordOperation::FindOne { .. } => "findOne",
            RecordOperation::FindMany { .. } => "findMany",
            RecordOperation::Upload(_) => "upload",
        }
    }
}

/// A named binary payload for the multipart upload path, plus optional
/// file metadata.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
    /// Target folder UUID.
    pub folder: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl FileUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data,
            folder: None,
            title: None,
            description: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_names() {
        let op = RecordOperation::FindMany {
            collection: "articles".to_string(),
            filter: None,
            fields: None,
        };
        assert_eq!(op.name(), "findMany");

        let op = RecordOperation::Upload(FileUpload::new("a.mp3", "audio/mpeg", vec![1, 2]));
        assert_eq!(op.name(), "upload");
    }
}
