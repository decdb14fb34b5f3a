/// Rescale every point to `[0, 1]` per objective using `ideal` and `nadir`.
/// Objectives with a degenerate range are only shifted.
pub fn normalize_front(front: &[Vec<f64>], ideal: &[f64], nadir: &[f64]) -> Vec<Vec<f64>> {
    front
        .iter()
        .map(|point| {
            point
                .iter()
                .zip(ideal.iter().zip(nadir))
                .map(|(value, (lo, hi))| {
                    let range = hi - lo;
                    if range.abs() < 1e-12 {
                        value - lo
                    } else {
                        (value - lo) / range
                    }
                })
                .collect()
        })
        .collect()
}

/// Component-wise minimum and maximum over a front
pub fn bounds_of(front: &[Vec<f64>]) -> Option<(Vec<f64>, Vec<f64>)> {
    let first = front.first()?;
    let mut ideal = first.clone();
    let mut nadir = first.clone();
    for point in &front[1..] {
        extend_bounds(&mut ideal, &mut nadir, point);
    }
    Some((ideal, nadir))
}

pub(crate) fn extend_bounds(ideal: &mut [f64], nadir: &mut [f64], point: &[f64]) {
    for ((lo, hi), value) in ideal.iter_mut().zip(nadir.iter_mut()).zip(point) {
        *lo = lo.min(*value);
        *hi = hi.max(*value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_front() {
        let front = vec![vec![1.0, 10.0], vec![3.0, 20.0]];
        let normalized = normalize_front(&front, &[1.0, 10.0], &[3.0, 20.0]);
        assert_eq!(normalized, vec![vec![0.0, 0.0], vec![1.0, 1.0]]);
    }

    #[test]
    fn test_degenerate_range_is_shifted() {
        let normalized = normalize_front(&[vec![2.0]], &[2.0], &[2.0]);
        assert_eq!(normalized, vec![vec![0.0]]);
    }

    #[test]
    fn test_bounds_of() {
        let (ideal, nadir) = bounds_of(&[vec![1.0, 5.0], vec![3.0, 2.0]]).unwrap();
        assert_eq!(ideal, vec![1.0, 2.0]);
        assert_eq!(nadir, vec![3.0, 5.0]);
        assert!(bounds_of(&[]).is_none());
    }
}
