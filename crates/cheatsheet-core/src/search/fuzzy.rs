//! Matching-block similarity ratio (Ratcliff/Obershelp).
//!
//! `ratio = 2 * M / (len(a) + len(b))`, where `M` is the total length of the
//! matching blocks found by taking the longest common substring and recursing
//! on the pieces to its left and right. Lengths are counted in chars.

/// Similarity of two strings in `0.0..=1.0`. Two empty strings are identical.
#[must_use]
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a = a.chars().collect::<Vec<_>>();
    let b = b.chars().collect::<Vec<_>>();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched = matching_chars(&a, &b);
    usize_to_f64(2 * matched) / usize_to_f64(total)
}

fn matching_chars(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, size) = longest_match(a, b, alo, ahi, blo, bhi);
        if size == 0 {
            continue;
        }
        matched += size;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + size < ahi && j + size < bhi {
            pending.push((i + size, ahi, j + size, bhi));
        }
    }
    matched
}

/// Longest common run of `a[alo..ahi]` and `b[blo..bhi]`.
///
/// Ties resolve to the smallest `i`, then the smallest `j`.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let width = bhi - blo;
    let mut best = (alo, blo, 0);
    // run_len[x] is the length of the common run ending at b[blo + x - 1].
    let mut previous = vec![0usize; width + 1];
    let mut current = vec![0usize; width + 1];
    for i in alo..ahi {
        for j in blo..bhi {
            let x = j - blo + 1;
            current[x] = if a[i] == b[j] { previous[x - 1] + 1 } else { 0 };
            let size = current[x];
            if size > best.2 {
                best = (i + 1 - size, j + 1 - size, size);
            }
        }
        std::mem::swap(&mut previous, &mut current);
    }
    best
}

#[allow(
    clippy::cast_precision_loss,
    reason = "string lengths stay far below f64 mantissa precision"
)]
const fn usize_to_f64(value: usize) -> f64 {
    value as f64
}
