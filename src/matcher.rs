// src/matcher.rs
//! Ratcliff–Obershelp similarity ("gestalt pattern matching").
//!
//! Reproduces `difflib.SequenceMatcher` block for block: same longest-match
//! tie-breaking (earliest in `a`, then earliest in `b`), same junk extension,
//! and the same popularity pruning for `b` of 200+ elements. Result sets near the
//! threshold depend on those details, so an edit-distance ratio is not a substitute.

use std::collections::{HashMap, HashSet};

/// A matching block: `a[a_start..a_start + size] == b[b_start..b_start + size]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Match {
    pub a_start: usize,
    pub b_start: usize,
    pub size: usize,
}

/// Autojunk only applies once `b` reaches this length.
const AUTOJUNK_MIN_LEN: usize = 200;

pub struct SequenceMatcher {
    a: Vec<char>,
    b: Vec<char>,
    b2j: HashMap<char, Vec<usize>>,
    bjunk: HashSet<char>,
}

impl SequenceMatcher {
    /// `is_junk` marks elements of `b` that may only extend a match, never seed one.
    pub fn new<J>(a: &str, b: &str, is_junk: J) -> Self
    where
        J: Fn(char) -> bool,
    {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();

        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, &ch) in b.iter().enumerate() {
            b2j.entry(ch).or_default().push(j);
        }

        let mut bjunk = HashSet::new();
        b2j.retain(|&ch, _| {
            if is_junk(ch) { bjunk.insert(ch); false } else { true }
        });

        let n = b.len();
        if n >= AUTOJUNK_MIN_LEN {
            let ntest = n / 100 + 1;
            b2j.retain(|_, idxs| idxs.len() <= ntest);
        }

        Self { a, b, b2j, bjunk }
    }

    /// No junk at all.
    pub fn plain(a: &str, b: &str) -> Self {
        Self::new(a, b, |_| false)
    }

    fn is_bjunk(&self, ch: char) -> bool {
        self.bjunk.contains(&ch)
    }

    /// Longest matching block in `a[alo..ahi]` × `b[blo..bhi]`.
    pub fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> Match {
        let (a, b) = (&self.a, &self.b);
        let (mut besti, mut bestj, mut bestsize) = (alo, blo, 0usize);

        // j2len[j] = length of the longest match ending at a[i-1], b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for i in alo..ahi {
            let mut newj2len: HashMap<usize, usize> = HashMap::new();
            if let Some(idxs) = self.b2j.get(&a[i]) {
                for &j in idxs {
                    if j < blo { continue; }
                    if j >= bhi { break; }
                    let k = j.checked_sub(1).and_then(|p| j2len.get(&p)).copied().unwrap_or(0) + 1;
                    newj2len.insert(j, k);
                    if k > bestsize {
                        besti = i + 1 - k;
                        bestj = j + 1 - k;
                        bestsize = k;
                    }
                }
            }
            j2len = newj2len;
        }

        // Extend with non-junk elements that were pruned as popular...
        while besti > alo && bestj > blo && !self.is_bjunk(b[bestj - 1]) && a[besti - 1] == b[bestj - 1] {
            besti -= 1; bestj -= 1; bestsize += 1;
        }
        while besti + bestsize < ahi && bestj + bestsize < bhi
            && !self.is_bjunk(b[bestj + bestsize]) && a[besti + bestsize] == b[bestj + bestsize]
        {
            bestsize += 1;
        }
        // ...then soak up adjacent junk on both sides.
        while besti > alo && bestj > blo && self.is_bjunk(b[bestj - 1]) && a[besti - 1] == b[bestj - 1] {
            besti -= 1; bestj -= 1; bestsize += 1;
        }
        while besti + bestsize < ahi && bestj + bestsize < bhi
            && self.is_bjunk(b[bestj + bestsize]) && a[besti + bestsize] == b[bestj + bestsize]
        {
            bestsize += 1;
        }

        Match { a_start: besti, b_start: bestj, size: bestsize }
    }

    /// All matching blocks, sorted, adjacent blocks collapsed.
    pub fn matching_blocks(&self) -> Vec<Match> {
        let (la, lb) = (self.a.len(), self.b.len());
        let mut queue = vec![(0usize, la, 0usize, lb)];
        let mut blocks: Vec<Match> = Vec::new();

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let m = self.find_longest_match(alo, ahi, blo, bhi);
            if m.size == 0 { continue; }
            blocks.push(m);
            if alo < m.a_start && blo < m.b_start {
                queue.push((alo, m.a_start, blo, m.b_start));
            }
            if m.a_start + m.size < ahi && m.b_start + m.size < bhi {
                queue.push((m.a_start + m.size, ahi, m.b_start + m.size, bhi));
            }
        }
        blocks.sort();

        let mut collapsed: Vec<Match> = Vec::with_capacity(blocks.len());
        for m in blocks {
            match collapsed.last_mut() {
                Some(prev) if prev.a_start + prev.size == m.a_start && prev.b_start + prev.size == m.b_start => {
                    prev.size += m.size;
                }
                _ => collapsed.push(m),
            }
        }
        collapsed
    }

    /// 2·M / T, where M is matched characters and T the combined length. 1.0 for two empty strings.
    pub fn ratio(&self) -> f64 {
        let matches: usize = self.matching_blocks().iter().map(|m| m.size).sum();
        calculate_ratio(matches, self.a.len() + self.b.len())
    }
}

fn calculate_ratio(matches: usize, length: usize) -> f64 {
    if length == 0 { 1.0 } else { 2.0 * matches as f64 / length as f64 }
}

/// Similarity used by the catalog search: hyphens are removed from the
/// candidate and treated as junk.
pub fn name_ratio(query: &str, candidate: &str) -> f64 {
    let candidate = crate::core::sanitize::strip_hyphens(candidate);
    SequenceMatcher::new(query, &candidate, |c| c == '-').ratio()
}
