//! Re-binning of per-basepair vectors into lower-resolution bins.

///
/// Condense a per-basepair vector into non-overlapping bins of `resolution`
/// basepairs by summation. The output has exactly `len / resolution` bins;
/// trailing elements past the last full bin are dropped. This truncation is
/// a fixed contract, pinned by tests. A resolution of 1 (or 0) is the
/// identity.
///
/// No rounding happens here; callers round at the matrix level, which keeps
/// `condense(a, 1) == a` exact.
///
pub fn condense(values: &[f64], resolution: usize) -> Vec<f64> {
    if resolution <= 1 {
        return values.to_vec();
    }

    let bins = values.len() / resolution;
    let mut condensed = vec![0.0; bins];
    for (i, value) in values.iter().enumerate() {
        let bin = i / resolution;
        if bin >= bins {
            break;
        }
        condensed[bin] += value;
    }

    condensed
}
