// Bounded edit distance over three rolling rows
//
// Optimal string alignment distance: insertion, deletion, substitution and
// transposition of two adjacent characters each cost 1. Only the current row
// and the two before it are kept, one cell per candidate character.

use radixspell_core::CharIdx;

use crate::error::SpellError;

/// Scratch rows for repeated distance computations.
#[derive(Debug, Clone, Default)]
pub struct EditRows {
    prev2: Vec<u32>,
    prev: Vec<u32>,
    cur: Vec<u32>,
}

fn alloc_row(width: usize) -> Result<Vec<u32>, SpellError> {
    let mut row = Vec::new();
    row.try_reserve_exact(width)
        .map_err(|_| SpellError::OutOfMemory {
            what: "edit distance rows",
        })?;
    row.resize(width, 0);
    Ok(row)
}

impl EditRows {
    /// Rows for candidates of up to `width - 1` characters.
    pub fn try_new(width: usize) -> Result<Self, SpellError> {
        Ok(Self {
            prev2: alloc_row(width)?,
            prev: alloc_row(width)?,
            cur: alloc_row(width)?,
        })
    }

    /// Longest candidate the rows hold without growing.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.cur.len().saturating_sub(1)
    }

    /// Grow the rows so that candidates of `len` characters fit.
    pub fn fit(&mut self, len: usize) -> Result<(), SpellError> {
        if len <= self.capacity() && !self.cur.is_empty() {
            return Ok(());
        }
        *self = Self::try_new(len + 1)?;
        Ok(())
    }

    /// Unbounded distance between `a` and `b`.
    pub fn distance(&mut self, a: &[CharIdx], b: &[CharIdx]) -> u32 {
        self.distance_within(a, b, u32::MAX).unwrap_or(u32::MAX)
    }

    /// Distance between `a` and `b` if it is at most `bound`.
    ///
    /// Returns `None` as soon as two consecutive rows lie entirely above
    /// `bound`: no later cell can come back under it. `b` must fit the rows
    /// (see [`fit`](Self::fit)); longer candidates are reported as `None`.
    pub fn distance_within(&mut self, a: &[CharIdx], b: &[CharIdx], bound: u32) -> Option<u32> {
        let width = b.len() + 1;
        if width > self.cur.len() {
            return None;
        }
        if a.is_empty() {
            let len = b.len() as u32;
            return (len <= bound).then_some(len);
        }

        for (j, cell) in self.prev[..width].iter_mut().enumerate() {
            *cell = j as u32;
        }
        let mut prev_min = 0u32;

        for i in 1..=a.len() {
            let ai = a[i - 1];
            self.cur[0] = i as u32;
            let mut row_min = self.cur[0];
            for j in 1..width {
                let bj = b[j - 1];
                let cost = u32::from(ai != bj);
                let mut best = (self.prev[j] + 1)
                    .min(self.cur[j - 1] + 1)
                    .min(self.prev[j - 1] + cost);
                if i > 1 && j > 1 && ai == b[j - 2] && a[i - 2] == bj {
                    best = best.min(self.prev2[j - 2] + 1);
                }
                self.cur[j] = best;
                row_min = row_min.min(best);
            }
            if row_min > bound && prev_min > bound {
                return None;
            }
            prev_min = row_min;
            // prev2 <- prev <- cur; the old prev2 becomes the next cur.
            std::mem::swap(&mut self.prev2, &mut self.prev);
            std::mem::swap(&mut self.prev, &mut self.cur);
        }

        let distance = self.prev[b.len()];
        (distance <= bound).then_some(distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct XorShift(u64);

    impl XorShift {
        fn next(&mut self) -> u64 {
            self.0 ^= self.0 << 13;
            self.0 ^= self.0 >> 7;
            self.0 ^= self.0 << 17;
            self.0
        }

        fn below(&mut self, n: usize) -> usize {
            (self.next() % n as u64) as usize
        }
    }

    /// Full-matrix optimal string alignment distance.
    fn full_matrix(a: &[CharIdx], b: &[CharIdx]) -> u32 {
        let mut d = vec![vec![0u32; b.len() + 1]; a.len() + 1];
        for (i, row) in d.iter_mut().enumerate() {
            row[0] = i as u32;
        }
        for j in 0..=b.len() {
            d[0][j] = j as u32;
        }
        for i in 1..=a.len() {
            for j in 1..=b.len() {
                let cost = u32::from(a[i - 1] != b[j - 1]);
                let mut best = (d[i - 1][j] + 1)
                    .min(d[i][j - 1] + 1)
                    .min(d[i - 1][j - 1] + cost);
                if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                    best = best.min(d[i - 2][j - 2] + 1);
                }
                d[i][j] = best;
            }
        }
        d[a.len()][b.len()]
    }

    fn w(s: &str) -> Vec<CharIdx> {
        s.bytes().map(|b| (b - b'a') as CharIdx).collect()
    }

    #[test]
    fn known_distances() {
        let mut rows = EditRows::try_new(16).unwrap();
        assert_eq!(rows.distance(&w("caat"), &w("cat")), 1);
        assert_eq!(rows.distance(&w("caat"), &w("cats")), 2);
        assert_eq!(rows.distance(&w("caat"), &w("dog")), 4);
        assert_eq!(rows.distance(&w("form"), &w("from")), 1);
        assert_eq!(rows.distance(&w("ab"), &w("ba")), 1);
        // OSA does not edit a transposed pair again.
        assert_eq!(rows.distance(&w("ca"), &w("abc")), 3);
        assert_eq!(rows.distance(&[], &w("abc")), 3);
        assert_eq!(rows.distance(&w("abc"), &[]), 3);
        assert_eq!(rows.distance(&w("same"), &w("same")), 0);
    }

    #[test]
    fn rolling_rows_match_full_matrix() {
        let mut rng = XorShift(0x9e37_79b9_7f4a_7c15);
        let mut rows = EditRows::try_new(13).unwrap();
        for _ in 0..2000 {
            let a: Vec<CharIdx> = (0..rng.below(13)).map(|_| rng.below(4) as CharIdx).collect();
            let mut b: Vec<CharIdx> =
                (0..rng.below(13)).map(|_| rng.below(4) as CharIdx).collect();
            // Seed some transpositions of `a`.
            if rng.below(3) == 0 && a.len() >= 2 {
                b = a.clone();
                let k = rng.below(a.len() - 1);
                b.swap(k, k + 1);
            }
            assert_eq!(rows.distance(&a, &b), full_matrix(&a, &b), "{a:?} {b:?}");
        }
    }

    #[test]
    fn bounded_agrees_with_unbounded() {
        let mut rng = XorShift(42);
        let mut rows = EditRows::try_new(13).unwrap();
        for _ in 0..2000 {
            let a: Vec<CharIdx> = (0..rng.below(13)).map(|_| rng.below(3) as CharIdx).collect();
            let b: Vec<CharIdx> = (0..rng.below(13)).map(|_| rng.below(3) as CharIdx).collect();
            let bound = rng.below(6) as u32;
            let exact = full_matrix(&a, &b);
            let expected = (exact <= bound).then_some(exact);
            assert_eq!(rows.distance_within(&a, &b, bound), expected, "{a:?} {b:?} {bound}");
        }
    }

    #[test]
    fn rows_grow_on_demand() {
        let mut rows = EditRows::try_new(3).unwrap();
        assert_eq!(rows.distance_within(&w("a"), &w("abcd"), 10), None);
        rows.fit(4).unwrap();
        assert_eq!(rows.capacity(), 4);
        assert_eq!(rows.distance_within(&w("a"), &w("abcd"), 10), Some(3));
    }
}
