/// Scales a vector to unit L2 length in place. Zero vectors are left
/// untouched (there is no direction to preserve).
pub fn l2_normalize_in_place(vector: &mut [f32]) {
    let norm: f32 = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > f32::EPSILON {
        for value in vector.iter_mut() {
            *value /= norm;
        }
    }
}
