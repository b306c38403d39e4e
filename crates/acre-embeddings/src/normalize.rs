//! Output dimension normalization.

/// Coerce `vector` to exactly `dimensions` entries: longer vectors are
/// truncated, shorter ones zero-padded. Applying it twice is a no-op.
pub fn normalize_dimensions(mut vector: Vec<f32>, dimensions: usize) -> Vec<f32> {
    if vector.len() > dimensions {
        vector.truncate(dimensions);
    } else if vector.len() < dimensions {
        vector.resize(dimensions, 0.0);
    }
    vector
}
