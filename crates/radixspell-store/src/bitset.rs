// Fixed-width bit sets and packed bit matrices

use crate::{StoreError, try_grow};

/// Bits per storage unit.
pub const UNIT_BITS: usize = u64::BITS as usize;

/// Number of `u64` units needed to hold `bits` bits.
#[inline]
pub fn units_for(bits: usize) -> usize {
    bits.div_ceil(UNIT_BITS)
}

#[inline]
fn split(bit: usize) -> (usize, u64) {
    (bit / UNIT_BITS, 1u64 << (bit % UNIT_BITS))
}

/// A set of `len` bits packed into `u64` units.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BitSet {
    units: Vec<u64>,
    len: usize,
}

impl BitSet {
    /// All-zero set of `len` bits.
    pub fn try_new(len: usize) -> Result<Self, StoreError> {
        let n = units_for(len);
        let mut units = Vec::new();
        try_grow(&mut units, n, "bit set")?;
        units.resize(n, 0);
        Ok(Self { units, len })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn units(&self) -> &[u64] {
        &self.units
    }

    #[inline]
    pub fn set(&mut self, bit: usize) {
        debug_assert!(bit < self.len);
        let (u, mask) = split(bit);
        self.units[u] |= mask;
    }

    #[inline]
    pub fn clear(&mut self, bit: usize) {
        debug_assert!(bit < self.len);
        let (u, mask) = split(bit);
        self.units[u] &= !mask;
    }

    #[inline]
    pub fn test(&self, bit: usize) -> bool {
        if bit >= self.len {
            return false;
        }
        let (u, mask) = split(bit);
        self.units[u] & mask != 0
    }

    /// Set every bit below `len`.
    pub fn fill(&mut self) {
        self.units.fill(u64::MAX);
        let tail = self.len % UNIT_BITS;
        if tail != 0 {
            if let Some(last) = self.units.last_mut() {
                *last = (1u64 << tail) - 1;
            }
        }
    }

    pub fn clear_all(&mut self) {
        self.units.fill(0);
    }

    /// True when no bit is set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.units.iter().all(|&u| u == 0)
    }

    pub fn count_ones(&self) -> usize {
        self.units.iter().map(|u| u.count_ones() as usize).sum()
    }

    /// Intersect with a matrix row of the same width.
    #[inline]
    pub fn and_with(&mut self, row: &[u64]) {
        for (dst, &src) in self.units.iter_mut().zip(row) {
            *dst &= src;
        }
    }

    /// OR this set into `target`.
    #[inline]
    pub fn union_into(&self, target: &mut [u64]) {
        for (dst, &src) in target.iter_mut().zip(&self.units) {
            *dst |= src;
        }
    }

    /// Remove the bits shared with `row` from this set, reporting each one.
    pub fn drain_common(&mut self, row: &[u64], mut emit: impl FnMut(usize)) {
        for (u, (dst, &src)) in self.units.iter_mut().zip(row).enumerate() {
            let mut hits = *dst & src;
            *dst &= !hits;
            while hits != 0 {
                let bit = hits.trailing_zeros() as usize;
                emit(u * UNIT_BITS + bit);
                hits &= hits - 1;
            }
        }
    }

    /// Indices of the set bits in ascending order.
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.units.iter().enumerate().flat_map(|(u, &unit)| {
            let mut rest = unit;
            std::iter::from_fn(move || {
                if rest == 0 {
                    return None;
                }
                let bit = rest.trailing_zeros() as usize;
                rest &= rest - 1;
                Some(u * UNIT_BITS + bit)
            })
        })
    }
}

/// `rows` bit sets of equal width stored back to back in one allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    rows: usize,
    width: usize,
    stride: usize,
    data: Vec<u64>,
}

impl BitMatrix {
    /// All-zero matrix with `rows` rows of `width` bits.
    pub fn try_new(rows: usize, width: usize) -> Result<Self, StoreError> {
        let stride = units_for(width);
        let total = rows
            .checked_mul(stride)
            .ok_or(StoreError::OutOfMemory { what: "bit matrix" })?;
        let mut data = Vec::new();
        try_grow(&mut data, total, "bit matrix")?;
        data.resize(total, 0);
        Ok(Self {
            rows,
            width,
            stride,
            data,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Units per row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn row(&self, r: usize) -> &[u64] {
        &self.data[r * self.stride..(r + 1) * self.stride]
    }

    #[inline]
    pub fn set(&mut self, r: usize, bit: usize) {
        debug_assert!(r < self.rows && bit < self.width);
        let (u, mask) = split(bit);
        self.data[r * self.stride + u] |= mask;
    }

    #[inline]
    pub fn clear(&mut self, r: usize, bit: usize) {
        debug_assert!(r < self.rows && bit < self.width);
        let (u, mask) = split(bit);
        self.data[r * self.stride + u] &= !mask;
    }

    #[inline]
    pub fn test(&self, r: usize, bit: usize) -> bool {
        if r >= self.rows || bit >= self.width {
            return false;
        }
        let (u, mask) = split(bit);
        self.data[r * self.stride + u] & mask != 0
    }

    /// OR row `r` into `target`.
    pub fn union_into(&self, r: usize, target: &mut BitSet) {
        for (dst, &src) in target.units.iter_mut().zip(self.row(r)) {
            *dst |= src;
        }
    }

    /// Heap bytes held by the matrix.
    pub fn memory_size(&self) -> usize {
        self.data.len() * std::mem::size_of::<u64>()
    }
}
