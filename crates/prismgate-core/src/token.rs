//! Random token generation for batch tokens, staging album names, and result
//! tokens. Not secrets, but collisions within a process' concurrent-request
//! window would cross-wire unrelated requests, so sizes are chosen to make
//! that probability negligible.

use rand::Rng;

/// Generate a random lowercase hex token of `bytes * 2` characters.
pub fn generate_token(bytes: usize) -> String {
    let mut rng = rand::rng();
    let random_bytes: Vec<u8> = (0..bytes).map(|_| rng.random()).collect();
    hex::encode(random_bytes)
}

/// Batch token scoping one set of uploads within the photo service.
pub fn batch_token() -> String {
    generate_token(8)
}

/// Unique name for an ephemeral staging album.
pub fn staging_album_name() -> String {
    format!("staging-{}", generate_token(12))
}

/// Result token handed back to the caller (128 bits).
pub fn result_token() -> String {
    generate_token(16)
}
