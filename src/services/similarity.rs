/// Cosine similarity between two embedding vectors
///
/// Returns 0.0 instead of failing when either vector is missing, the
/// lengths differ, either vector has zero magnitude, or a component is not
/// finite.
pub fn cosine_similarity(a: Option<&[f32]>, b: Option<&[f32]>) -> f64 {
    let (a, b) = match (a, b) {
        (Some(a), Some(b)) if a.len() == b.len() => (a, b),
        _ => return 0.0,
    };

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b.iter()) {
        let (x, y) = (*x as f64, *y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let similarity = dot / (norm_a.sqrt() * norm_b.sqrt());
    if !similarity.is_finite() {
        return 0.0;
    }
    similarity.clamp(-1.0, 1.0)
}
