use serde::Serialize;

/// Metadata reported back after a file lands on disk
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct UploadedFile {
    pub original_name: String,
    pub stored_name: String,
    pub mime_type: String,
    pub size: u64,
}
