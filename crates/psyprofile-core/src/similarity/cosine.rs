//! Vector math shared by similarity and clustering.

/// Cosine similarity between two equal-length vectors.
///
/// Returns 0.0 when either vector has zero magnitude.
#[inline]
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());

    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < f64::EPSILON {
        0.0
    } else {
        (dot / denom).clamp(-1.0, 1.0)
    }
}

/// Cosine distance, `1 - cosine_similarity`.
#[inline]
pub fn cosine_distance(a: &[f64], b: &[f64]) -> f64 {
    1.0 - cosine_similarity(a, b)
}

/// Min-max normalize each column of `rows` in place.
///
/// A constant column becomes all zeros. Rows must share one length.
pub fn min_max_normalize(rows: &mut [Vec<f64>]) {
    let Some(width) = rows.first().map(Vec::len) else {
        return;
    };

    for col in 0..width {
        let (min, max) = rows
            .iter()
            .map(|row| row[col])
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        let range = max - min;
        for row in rows.iter_mut() {
            row[col] = if range > 0.0 {
                (row[col] - min) / range
            } else {
                0.0
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_basic() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-12);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-12);
        assert!((cosine_similarity(&[1.0, 1.0], &[2.0, 2.0]) - 1.0).abs() < 1e-12);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
        assert!((cosine_distance(&[1.0, 0.0], &[0.0, 1.0]) - 1.0).abs() < 1e-12);
        println!("[PASS] test_cosine_basic - orthogonal 0, parallel 1, zero row 0");
    }

    #[test]
    fn test_min_max_normalize() {
        let mut rows = vec![vec![1.0, 0.5, 2.0], vec![3.0, 0.5, 4.0], vec![2.0, 0.5, 3.0]];
        min_max_normalize(&mut rows);
        assert_eq!(rows[0], vec![0.0, 0.0, 0.0]);
        assert_eq!(rows[1], vec![1.0, 0.0, 1.0]);
        assert_eq!(rows[2], vec![0.5, 0.0, 0.5]);

        let mut empty: Vec<Vec<f64>> = Vec::new();
        min_max_normalize(&mut empty);
        assert!(empty.is_empty());
        println!("[PASS] test_min_max_normalize - constant column -> 0");
    }
}
