//! Ramer–Douglas–Peucker track simplification.
//!
//! Distances are planar, in raw degrees (see [`segment_distance`]). A fixed
//! epsilon therefore tolerates less ground deviation east-west as latitude
//! grows. Playback only needs visual fidelity, so this is accepted.
//!
//! The divide-and-conquer is driven by an explicit work stack instead of call
//! recursion, so a pathological track of a few hundred thousand points cannot
//! exhaust the call stack. The kept set is identical to the recursive
//! formulation: same split point, same lowest-index tie-break.

use crate::geometry::{segment_distance, Point};

/// Simplifies `points`, keeping every point that deviates more than `epsilon`
/// from the chord of its enclosing range.
///
/// Sequences of two points or fewer are returned unchanged. For anything
/// longer, the first and last point are always kept and the output is an
/// ordered subsequence of the input.
pub fn simplify(points: &[Point], epsilon: f64) -> Vec<Point> {
    simplify_indices(points, epsilon)
        .into_iter()
        .map(|i| points[i])
        .collect()
}

/// Same as [`simplify`], but returns the indices of the kept points.
///
/// A negative `epsilon` is treated as zero.
pub fn simplify_indices(points: &[Point], epsilon: f64) -> Vec<usize> {
    if points.len() <= 2 {
        return (0..points.len()).collect();
    }

    let epsilon = epsilon.max(0.0);
    let mut keep = vec![false; points.len()];
    let mut stack = vec![(0, points.len() - 1)];

    while let Some((start, end)) = stack.pop() {
        keep[start] = true;
        keep[end] = true;

        if end - start < 2 {
            continue;
        }

        match farthest_interior(points, start, end) {
            Some((split, distance)) if distance > epsilon => {
                stack.push((split, end));
                stack.push((start, split));
            }
            _ => {}
        }
    }

    keep.iter()
        .enumerate()
        .filter_map(|(i, &k)| if k { Some(i) } else { None })
        .collect()
}

/// Interior point of `start..=end` farthest from the chord, with its distance.
///
/// Only a strictly greater distance replaces the current candidate, so ties go
/// to the lowest index. Returns None when every interior point lies on the
/// chord.
fn farthest_interior(points: &[Point], start: usize, end: usize) -> Option<(usize, f64)> {
    let first = &points[start];
    let last = &points[end];

    let mut best: Option<(usize, f64)> = None;
    let mut max_distance = 0.0;

    for (offset, point) in points[start + 1..end].iter().enumerate() {
        let distance = segment_distance(point, first, last);
        if distance > max_distance {
            max_distance = distance;
            best = Some((start + 1 + offset, distance));
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&(lat, lon)| Point::new(lat, lon)).collect()
    }

    /// Textbook recursive RDP, kept as an oracle for the stack version.
    fn simplify_recursive(points: &[Point], epsilon: f64) -> Vec<Point> {
        if points.len() <= 2 {
            return points.to_vec();
        }
        let last = points.len() - 1;
        let mut index = 0;
        let mut max_distance = 0.0;
        for i in 1..last {
            let d = segment_distance(&points[i], &points[0], &points[last]);
            if d > max_distance {
                index = i;
                max_distance = d;
            }
        }
        if max_distance > epsilon {
            let mut left = simplify_recursive(&points[..=index], epsilon);
            let right = simplify_recursive(&points[index..], epsilon);
            left.pop();
            left.extend(right);
            left
        } else {
            vec![points[0], points[last]]
        }
    }

    #[test]
    fn test_short_inputs_unchanged() {
        assert!(simplify(&[], 0.1).is_empty());

        let one = pts(&[(1.0, 2.0)]);
        assert_eq!(simplify(&one, 0.1), one);

        let two = pts(&[(1.0, 2.0), (1.0, 2.0)]);
        assert_eq!(simplify(&two, 0.1), two);
    }

    #[test]
    fn test_collinear_middle_dropped() {
        let input = pts(&[(0.0, 0.0), (0.0, 1.0), (0.0, 2.0)]);
        assert_eq!(simplify(&input, 0.1), pts(&[(0.0, 0.0), (0.0, 2.0)]));
    }

    #[test]
    fn test_peak_threshold() {
        let input = pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]);

        // Perpendicular distance of the peak from the chord is exactly 1.0
        assert_eq!(simplify(&input, 0.999), input);
        assert_eq!(simplify(&input, 1.0), pts(&[(0.0, 0.0), (2.0, 0.0)]));
        assert_eq!(simplify(&input, 5.0), pts(&[(0.0, 0.0), (2.0, 0.0)]));
    }

    #[test]
    fn test_identical_points_collapse() {
        let input = vec![Point::new(53.5, -113.5); 50];
        let out = simplify(&input, 0.0);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_tie_breaks_to_lowest_index() {
        // Two symmetric peaks at equal distance from the chord; index 1 wins,
        // so index 1 is the split and index 3 survives in the right half.
        let input = pts(&[(0.0, 0.0), (1.0, 1.0), (0.0, 2.0), (1.0, 3.0), (0.0, 4.0)]);
        assert_eq!(simplify_indices(&input, 0.5), vec![0, 1, 2, 3, 4]);

        // With a wider tolerance inside the halves, the split point still appears once
        let out = simplify_indices(&input, 0.9);
        let mut deduped = out.clone();
        deduped.dedup();
        assert_eq!(out, deduped);
    }

    #[test]
    fn test_tie_choice_changes_output() {
        // Indices 1 and 2 are both exactly 1.0 from the chord. Splitting at 1
        // leaves index 2 within 0.9 of the (1,1)-(0,4) chord, so it is dropped;
        // splitting at 2 would keep it and drop index 1 instead.
        let input = pts(&[(0.0, 0.0), (1.0, 1.0), (1.0, 3.0), (0.0, 4.0)]);
        assert_eq!(simplify_indices(&input, 0.9), vec![0, 1, 3]);
    }

    #[test]
    fn test_zero_epsilon_without_collinear_runs_is_identity() {
        let peak = pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]);
        assert_eq!(simplify(&peak, 0.0), peak);

        let zigzag: Vec<Point> = (0..12)
            .map(|i| Point::new((i % 2) as f64, i as f64))
            .collect();
        assert_eq!(simplify(&zigzag, 0.0), zigzag);
    }

    #[test]
    fn test_zero_epsilon_keeps_corners_only() {
        // An L shape with collinear runs on both legs
        let input = pts(&[(0.0, 0.0), (0.0, 1.0), (0.0, 2.0), (1.0, 2.0), (2.0, 2.0)]);
        assert_eq!(
            simplify(&input, 0.0),
            pts(&[(0.0, 0.0), (0.0, 2.0), (2.0, 2.0)])
        );
    }

    #[test]
    fn test_negative_epsilon_treated_as_zero() {
        let input = vec![Point::new(0.0, 0.0); 5];
        assert_eq!(simplify(&input, -1.0).len(), 2);
    }

    #[test]
    fn test_unbalanced_zigzag_keeps_every_point() {
        // Splits land next to the range ends here, the worst case for depth
        let input: Vec<Point> = (0..5_000)
            .map(|i| Point::new((i % 2) as f64 * 1e-3, i as f64 * 1e-3))
            .collect();
        let out = simplify(&input, 1e-6);
        assert_eq!(out.len(), input.len());
    }

    fn track_strategy() -> impl Strategy<Value = Vec<Point>> {
        prop::collection::vec((-1.0f64..1.0, -1.0f64..1.0), 2..60).prop_map(|coords| {
            coords
                .into_iter()
                .map(|(lat, lon)| Point::new(53.5 + lat * 1e-3, -113.5 + lon * 1e-3))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_endpoints_preserved(points in track_strategy(), epsilon in 0.0f64..1e-3) {
            let out = simplify(&points, epsilon);
            prop_assert!(out.len() >= 2);
            prop_assert!(out.len() <= points.len());
            prop_assert_eq!(out[0], points[0]);
            prop_assert_eq!(out[out.len() - 1], points[points.len() - 1]);
        }

        #[test]
        fn prop_ordered_subsequence(points in track_strategy(), epsilon in 0.0f64..1e-3) {
            let indices = simplify_indices(&points, epsilon);
            prop_assert!(indices.windows(2).all(|w| w[0] < w[1]));
        }

        #[test]
        fn prop_idempotent(points in track_strategy(), epsilon in 0.0f64..1e-3) {
            let once = simplify(&points, epsilon);
            let twice = simplify(&once, epsilon);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_matches_recursive(points in track_strategy(), epsilon in 0.0f64..1e-3) {
            prop_assert_eq!(simplify(&points, epsilon), simplify_recursive(&points, epsilon));
        }
    }
}
