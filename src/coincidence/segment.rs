//! Segmented coincidence matching for parallel execution.
//!
//! The greedy walk in [`match_pairs`] never pairs events across a quiet
//! gap: if no event of either channel lies within `window` on both sides
//! of a time `T`, the events before `T` are consumed exactly as if the
//! later ones did not exist. Cutting both channels at such gaps yields
//! independent segments whose results concatenate to the sequential one.

use super::matcher::{match_pairs, CoincidencePairs};
use crate::data::Window;
use rayon::prelude::*;

/// Index bounds of one independent segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start: (usize, usize),
    pub stop: (usize, usize),
}

/// Check whether both channels can be cut in front of `start[i]`.
///
/// Returns the matching cut index into `stop` when the merged stream has
/// a gap wider than the window at that time.
fn cut_at(start: &[i64], stop: &[i64], i: usize, window: Window) -> Option<usize> {
    if i == 0 || i >= start.len() {
        return None;
    }

    let t = start[i];
    let j = stop.partition_point(|&x| x < t);

    // Latest event strictly before `t` across both channels. The earliest
    // event at or after `t` is `t` itself.
    let mut last = start[i - 1];
    if j > 0 {
        last = last.max(stop[j - 1]);
    }

    if t as i128 - last as i128 > window.get() as i128 {
        Some(j)
    } else {
        None
    }
}

/// Split both channels into at most `segments` independent pieces.
///
/// Cut candidates are spread evenly over the start channel; each one
/// scans forward for a usable gap and is dropped if none is found before
/// the next candidate.
pub fn plan_segments(start: &[i64], stop: &[i64], window: Window, segments: usize) -> Vec<Segment> {
    let n = start.len();
    let mut cuts: Vec<(usize, usize)> = Vec::new();

    if segments > 1 && n > 1 {
        let mut prev = 0;
        for k in 1..segments {
            let target = (k * n / segments).max(prev + 1);
            let limit = ((k + 1) * n / segments).min(n);

            if let Some(cut) = (target..limit).find_map(|i| cut_at(start, stop, i, window).map(|j| (i, j))) {
                prev = cut.0;
                cuts.push(cut);
            }
        }
    }

    let mut bounds = Vec::with_capacity(cuts.len() + 1);
    let mut lower = (0, 0);
    for (i, j) in cuts {
        bounds.push(Segment {
            start: (lower.0, i),
            stop: (lower.1, j),
        });
        lower = (i, j);
    }
    bounds.push(Segment {
        start: (lower.0, n),
        stop: (lower.1, stop.len()),
    });

    bounds
}

/// Match pairs by running independent segments in parallel.
///
/// Runs on the current rayon pool. The result equals
/// `match_pairs(start, stop, window)`.
pub fn match_pairs_segmented(
    start: &[i64],
    stop: &[i64],
    window: Window,
    segments: usize,
) -> CoincidencePairs {
    let plan = plan_segments(start, stop, window, segments);
    if plan.len() == 1 {
        return match_pairs(start, stop, window);
    }

    log::debug!("matching {} events in {} segments", start.len(), plan.len());

    let parts: Vec<CoincidencePairs> = plan
        .par_iter()
        .map(|seg| {
            match_pairs(
                &start[seg.start.0..seg.start.1],
                &stop[seg.stop.0..seg.stop.1],
                window,
            )
        })
        .collect();

    let total = parts.iter().map(CoincidencePairs::len).sum();
    let mut pairs = CoincidencePairs::with_capacity(total);
    for part in parts {
        pairs.extend(part);
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn w(width: i64) -> Window {
        Window::new(width).unwrap()
    }

    /// Sorted stamps with bursts separated by occasional quiet gaps.
    fn bursty_channel(rng: &mut StdRng, len: usize) -> Vec<i64> {
        let mut t = 0i64;
        (0..len)
            .map(|_| {
                t += if rng.random_range(0..20) == 0 {
                    rng.random_range(500..2000)
                } else {
                    rng.random_range(0..15)
                };
                t
            })
            .collect()
    }

    #[test]
    fn test_no_gap_gives_single_segment() {
        let start: Vec<i64> = (0..100).collect();
        let stop: Vec<i64> = (0..100).collect();
        let plan = plan_segments(&start, &stop, w(5), 4);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].start, (0, 100));
        assert_eq!(plan[0].stop, (0, 100));
    }

    #[test]
    fn test_cut_requires_gap_on_both_channels() {
        let start = vec![0, 10, 1000, 1010];
        // A stop event sits inside the start gap, close to 1000.
        let stop = vec![5, 995, 1005];
        assert_eq!(cut_at(&start, &stop, 2, w(10)), None);

        let stop = vec![5, 500, 1005];
        assert_eq!(cut_at(&start, &stop, 2, w(10)), Some(2));
    }

    #[test]
    fn test_segments_cover_both_channels() {
        let start = vec![0, 10, 1000, 1010, 5000, 5010];
        let stop = vec![2, 1003, 5004];
        let plan = plan_segments(&start, &stop, w(10), 3);

        assert_eq!(plan.len(), 3);
        assert_eq!(plan[0].start.0, 0);
        assert_eq!(plan.last().unwrap().start.1, start.len());
        assert_eq!(plan.last().unwrap().stop.1, stop.len());
        for pair in plan.windows(2) {
            assert_eq!(pair[0].start.1, pair[1].start.0);
            assert_eq!(pair[0].stop.1, pair[1].stop.0);
        }
    }

    #[test]
    fn test_segmented_matches_sequential() {
        let mut rng = StdRng::seed_from_u64(7);
        for round in 0..20 {
            let start = bursty_channel(&mut rng, 2_000 + round * 37);
            let stop = bursty_channel(&mut rng, 1_800 + round * 53);
            let window = w(rng.random_range(0..40));

            let expected = match_pairs(&start, &stop, window);
            for segments in [2, 3, 8, 64] {
                let got = match_pairs_segmented(&start, &stop, window, segments);
                assert_eq!(got, expected, "round {} segments {}", round, segments);
            }
        }
    }
}
