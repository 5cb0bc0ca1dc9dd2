//! Shared key generation for storage backends.
//!
//! Key format: `{file_id}/{file_name}`.

use uuid::Uuid;

/// Generate the blob key for a file.
pub fn file_key(file_id: Uuid, file_name: &str) -> String {
    format!("{}/{}", file_id, file_name)
}

/// Reject keys and bucket names that could escape a storage root.
pub(crate) fn is_safe_segment_path(path: &str) -> bool {
    !path.is_empty()
        && !path.starts_with('/')
        && !path.split('/').any(|segment| segment == ".." || segment == ".")
}
