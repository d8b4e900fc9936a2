//! Content addressing
//!
//! The photo service indexes every ingested file by the SHA-1 of its raw
//! bytes. Computing the same digest locally lets the gateway find the records
//! created from a batch without the upload call ever returning identifiers.

use sha1::{Digest, Sha1};

/// Lowercase hex SHA-1 of the file's raw bytes, matching the photo service's
/// `Hash` field.
pub fn content_hash(data: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
