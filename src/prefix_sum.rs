/// A mutable sequence of non-negative integers supporting cumulative-sum
/// lookups and inverse lookups in amortized `O(log n)`.
///
/// The prefix-sum array is rebuilt lazily: mutations only lower a "valid up
/// to" watermark instead of recomputing the whole array, and lookups rebuild
/// just enough of the suffix to answer the query. This mirrors the structure
/// backing both the per-piece line-start index ([`crate::piece::Piece`]) and
/// the table-level piece-offset/line-feed indices in [`crate::PieceTable`].
#[derive(Debug, Clone, Default)]
pub struct PrefixSumComputer {
    values: Vec<usize>,
    prefix_sum: Vec<usize>,
    /// Highest index for which `prefix_sum[i] == values[0..=i].sum()`.
    /// `None` means nothing is valid (including the empty case).
    valid_index: Option<usize>,
}

impl PrefixSumComputer {
    /// Builds a computer over `values`, taking ownership of them.
    pub fn new(values: Vec<usize>) -> Self {
        let len = values.len();
        Self {
            values,
            prefix_sum: vec![0; len],
            valid_index: None,
        }
    }

    /// Produces an independent instance over a copy of `values`. Used on
    /// piece split so that two live pieces never alias the same index.
    pub fn deep_copy(values: &[usize]) -> Self {
        Self::new(values.to_vec())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Borrowed view of the raw values.
    pub fn values(&self) -> &[usize] {
        &self.values
    }

    fn ensure_valid_up_to(&mut self, index: usize) {
        if self.values.is_empty() {
            return;
        }
        let index = index.min(self.values.len() - 1);
        let start = match self.valid_index {
            Some(v) if v >= index => return,
            Some(v) => v + 1,
            None => 0,
        };
        let mut running = if start == 0 { 0 } else { self.prefix_sum[start - 1] };
        for i in start..=index {
            running += self.values[i];
            self.prefix_sum[i] = running;
        }
        self.valid_index = Some(index);
    }

    /// Sets entry `i` to `v`, invalidating cached sums from `i` onward.
    pub fn change_value(&mut self, i: usize, v: usize) {
        if self.values[i] == v {
            return;
        }
        self.values[i] = v;
        if let Some(valid) = self.valid_index {
            if valid >= i {
                self.valid_index = if i == 0 { None } else { Some(i - 1) };
            }
        }
    }

    /// Removes `cnt` contiguous entries starting at `start`.
    pub fn remove_values(&mut self, start: usize, cnt: usize) {
        if cnt == 0 {
            return;
        }
        let end = (start + cnt).min(self.values.len());
        self.values.drain(start..end);
        self.prefix_sum.resize(self.values.len(), 0);
        self.invalidate_from(start);
    }

    /// Inserts `vs` before position `start`.
    pub fn insert_values(&mut self, start: usize, vs: &[usize]) {
        if vs.is_empty() {
            return;
        }
        self.values.splice(start..start, vs.iter().copied());
        self.prefix_sum.resize(self.values.len(), 0);
        self.invalidate_from(start);
    }

    /// Drops any cached sums at or after `start`.
    fn invalidate_from(&mut self, start: usize) {
        if self.values.is_empty() {
            self.valid_index = None;
            return;
        }
        self.valid_index = match self.valid_index {
            Some(v) if start > 0 => Some(v.min(start - 1).min(self.values.len() - 1)),
            _ => None,
        };
    }

    /// Truncates to the first `len` entries, discarding the rest.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.values.len() {
            return;
        }
        self.values.truncate(len);
        self.prefix_sum.truncate(len);
        self.valid_index = if self.values.is_empty() {
            None
        } else {
            self.valid_index.map(|v| v.min(self.values.len() - 1))
        };
    }

    /// Returns `sum(v[0..=i])`. `i < 0` yields `0`; `i >= len - 1` yields the total.
    pub fn accumulated_value(&mut self, index: isize) -> usize {
        if index < 0 || self.values.is_empty() {
            return 0;
        }
        let idx = (index as usize).min(self.values.len() - 1);
        self.ensure_valid_up_to(idx);
        self.prefix_sum[idx]
    }

    /// `sum(v)`.
    pub fn total_value(&mut self) -> usize {
        if self.values.is_empty() {
            return 0;
        }
        let last = self.values.len() - 1;
        self.ensure_valid_up_to(last);
        self.prefix_sum[last]
    }

    /// Given `0 <= target <= total_value()`, returns `(index, remainder)` such
    /// that `accumulated_value(index - 1) + remainder == target` and
    /// `0 <= remainder <= v[index]`.
    ///
    /// When `target` lands exactly on a segment boundary, the *later* segment
    /// is returned with `remainder == 0`, except `target == 0`, which always
    /// returns `(0, 0)`.
    pub fn index_of(&mut self, target: usize) -> (usize, usize) {
        if self.values.is_empty() || target == 0 {
            return (0, 0);
        }
        let last = self.values.len() - 1;
        self.ensure_valid_up_to(last);

        let mut lo = 0usize;
        let mut hi = last;
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if self.prefix_sum[mid] > target {
                hi = mid;
            } else {
                lo = mid + 1;
            }
        }
        let index = lo.min(last);
        let before = if index == 0 { 0 } else { self.prefix_sum[index - 1] };
        let remainder = target.saturating_sub(before);
        (index, remainder)
    }
}
