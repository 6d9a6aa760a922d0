/*!
# Sequence Matcher

Longest-matching-blocks ratio over two sequences. The longest common
contiguous block is found first (earliest in `a`, then earliest in `b` on
ties), and the procedure recurses on the unmatched regions to its left and
right. The ratio is `2 * M / T`, with `M` the total matched length and `T`
the combined length of both sequences; two empty sequences have ratio 1.0.

When `b` has at least [`POPULAR_MIN_LEN`] elements, elements occurring in
more than 1% of it (plus one) are "popular": they never seed a match, only
extend one found from rarer elements. This keeps repetitive sources from
degenerating into a quadratic scan per region.

The ratio helpers put the two inputs in a canonical order first, so the
score of `(a, b)` equals the score of `(b, a)`.
*/

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Shortest `b` for which popular elements are pruned
pub const POPULAR_MIN_LEN: usize = 200;

/// Contiguous run where `a[a_start..a_start + size] == b[b_start..b_start + size]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingBlock {
    pub a_start: usize,
    pub b_start: usize,
    pub size: usize,
}

pub struct SequenceMatcher<'a, T> {
    a: &'a [T],
    b: &'a [T],
    b2j: HashMap<&'a T, Vec<usize>>,
}

/// Run-length rows reused by every region of one `matching_blocks` call
struct RunLengths {
    prev: Vec<usize>,
    cur: Vec<usize>,
    prev_touched: Vec<usize>,
    cur_touched: Vec<usize>,
}

impl RunLengths {
    fn new(len: usize) -> Self {
        Self {
            prev: vec![0; len + 1],
            cur: vec![0; len + 1],
            prev_touched: Vec::new(),
            cur_touched: Vec::new(),
        }
    }

    /// Zeroes the previous row and makes the current row the previous one
    fn advance(&mut self) {
        for &slot in &self.prev_touched {
            self.prev[slot] = 0;
        }
        self.prev_touched.clear();
        std::mem::swap(&mut self.prev, &mut self.cur);
        std::mem::swap(&mut self.prev_touched, &mut self.cur_touched);
    }
}

impl<'a, T: Eq + Hash> SequenceMatcher<'a, T> {
    pub fn new(a: &'a [T], b: &'a [T]) -> Self {
        let mut b2j: HashMap<&'a T, Vec<usize>> = HashMap::new();
        for (j, element) in b.iter().enumerate() {
            b2j.entry(element).or_default().push(j);
        }

        if b.len() >= POPULAR_MIN_LEN {
            let limit = b.len() / 100 + 1;
            let popular: HashSet<&'a T> = b2j
                .iter()
                .filter(|(_, indices)| indices.len() > limit)
                .map(|(element, _)| *element)
                .collect();
            b2j.retain(|element, _| !popular.contains(element));
        }

        Self { a, b, b2j }
    }

    /// Longest matching block in `a[alo..ahi]` and `b[blo..bhi]`
    fn find_longest_match(
        &self,
        rows: &mut RunLengths,
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
    ) -> MatchingBlock {
        let (a, b) = (self.a, self.b);
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);

        // run length ending at b[j] is stored at slot j + 1
        for i in alo..ahi {
            if let Some(indices) = self.b2j.get(&a[i]) {
                for &j in indices {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = rows.prev[j] + 1;
                    rows.cur[j + 1] = k;
                    rows.cur_touched.push(j + 1);
                    if k > best_size {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_size = k;
                    }
                }
            }
            rows.advance();
        }
        // clears the last row for the next region
        rows.advance();

        // popular elements extend the match on both sides
        while best_i > alo && best_j > blo && a[best_i - 1] == b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_size += 1;
        }
        while best_i + best_size < ahi
            && best_j + best_size < bhi
            && a[best_i + best_size] == b[best_j + best_size]
        {
            best_size += 1;
        }

        MatchingBlock {
            a_start: best_i,
            b_start: best_j,
            size: best_size,
        }
    }

    /// Non-overlapping matching blocks in ascending order, adjacent blocks merged
    pub fn matching_blocks(&self) -> Vec<MatchingBlock> {
        let mut rows = RunLengths::new(self.b.len());
        let mut pending = vec![(0, self.a.len(), 0, self.b.len())];
        let mut blocks = Vec::new();

        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let found = self.find_longest_match(&mut rows, alo, ahi, blo, bhi);
            if found.size == 0 {
                continue;
            }
            let (i, j, k) = (found.a_start, found.b_start, found.size);
            if alo < i && blo < j {
                pending.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                pending.push((i + k, ahi, j + k, bhi));
            }
            blocks.push(found);
        }

        blocks.sort_by_key(|block| (block.a_start, block.b_start));

        let mut merged: Vec<MatchingBlock> = Vec::with_capacity(blocks.len());
        for block in blocks {
            match merged.last_mut() {
                Some(last)
                    if last.a_start + last.size == block.a_start
                        && last.b_start + last.size == block.b_start =>
                {
                    last.size += block.size;
                }
                _ => merged.push(block),
            }
        }

        merged
    }

    pub fn matched_len(&self) -> usize {
        self.matching_blocks().iter().map(|block| block.size).sum()
    }

    /// Ratio with `a` and `b` in the order given
    pub fn ratio(&self) -> f64 {
        let total = self.a.len() + self.b.len();
        if total == 0 {
            return 1.0;
        }
        2.0 * self.matched_len() as f64 / total as f64
    }
}

/// Order-independent ratio: the lexicographically smaller input is matched as `a`
pub fn sequence_ratio<T: Ord + Hash>(a: &[T], b: &[T]) -> f64 {
    let (first, second) = if a <= b { (a, b) } else { (b, a) };
    SequenceMatcher::new(first, second).ratio()
}

/// Character-level ratio of two strings
pub fn text_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    sequence_ratio(&a, &b)
}

/// Character blocks shared by two strings whose size exceeds `min_size`.
/// Offsets are character indices.
pub fn matching_blocks(a: &str, b: &str, min_size: usize) -> Vec<MatchingBlock> {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    SequenceMatcher::new(&a, &b)
        .matching_blocks()
        .into_iter()
        .filter(|block| block.size > min_size)
        .collect()
}
