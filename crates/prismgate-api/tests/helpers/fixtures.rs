//! Test fixtures.

/// Distinct fake image bytes per seed. The gateway treats file content as
/// opaque, so no real JPEG structure is needed.
pub fn image_bytes(seed: u8) -> Vec<u8> {
    let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0];
    data.extend(std::iter::repeat(seed).take(64));
    data
}
