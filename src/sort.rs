//! In-place co-permuting quicksort for the population and score buffers.
//!
//! The engine ranks each generation by sorting the score table ascending
//! while applying the identical permutation to the candidate pool, so that
//! `pool[i]` is always the candidate whose fitness is `scores[i]`.
//!
//! Hoare partition-exchange with the range's first score as pivot, driven
//! by an explicit work list instead of native recursion: the smaller
//! partition is processed immediately and the larger one deferred, keeping
//! the auxiliary stack at O(log n) regardless of input order. Not stable;
//! ties keep their scan order.

use crate::types::Score;

/// Sorts `(pool, scores)` jointly, ascending by score.
///
/// NaN scores compare as neither smaller nor larger and end up at an
/// unspecified position; the sort still terminates.
///
/// # Panics
/// Panics if the slices differ in length.
pub(crate) fn co_sort<C, S: Score>(pool: &mut [C], scores: &mut [S]) {
    assert_eq!(
        pool.len(),
        scores.len(),
        "population and score table must be index-aligned"
    );
    let n = pool.len();
    if n < 2 {
        return;
    }

    let mut pending: Vec<(usize, usize)> = Vec::new();
    let (mut lo, mut hi) = (0usize, n - 1);
    loop {
        while lo < hi {
            let p = partition(pool, scores, lo, hi);
            // Left partition is [lo, p], right is [p + 1, hi]. Keep the
            // smaller one, defer the larger.
            if p - lo < hi - p {
                pending.push((p + 1, hi));
                hi = p;
            } else {
                pending.push((lo, p));
                lo = p + 1;
            }
        }
        match pending.pop() {
            Some((next_lo, next_hi)) => {
                lo = next_lo;
                hi = next_hi;
            }
            None => return,
        }
    }
}

/// Hoare partition around `scores[lo]`, swapping pool entries in lockstep.
///
/// Returns `j` such that `[lo, j]` holds scores `<=` pivot and `[j + 1, hi]`
/// scores `>=` pivot, with `j < hi`.
fn partition<C, S: Score>(pool: &mut [C], scores: &mut [S], lo: usize, hi: usize) -> usize {
    let pivot = scores[lo];
    let mut i = lo;
    let mut j = hi;
    loop {
        while scores[i] < pivot {
            i += 1;
        }
        while scores[j] > pivot {
            j -= 1;
        }
        if i >= j {
            return j;
        }
        pool.swap(i, j);
        scores.swap(i, j);
        i += 1;
        j -= 1;
    }
}
