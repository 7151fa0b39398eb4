use std::ops::Range as StdRange;

use crate::config::PieceTableConfig;
use crate::error::{PieceTableError, Result};
use crate::piece::{BufferKind, Piece};
use crate::position::{Position, Range};
use crate::prefix_sum::PrefixSumComputer;

/// Where a byte offset lands: which piece, its absolute buffer offset, and
/// the remainder (bytes into that piece). Never exposed outside this module.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    index: usize,
    buffer_offset: usize,
    remainder: usize,
}

/// Where a 1-based line starts: which piece, the 1-based line index within
/// that piece, the piece's own line-feed count, and the byte offset within
/// the piece where the line begins.
struct LineStart {
    piece_index: usize,
    line_in_piece: usize,
    lf_count: usize,
    base_remainder: usize,
}

/// A piece-table text buffer.
///
/// Two append-only backing buffers (`original`, set once at construction, and
/// `change`, which grows with every insert) are sliced by an ordered sequence
/// of [`Piece`]s; the document is the concatenation of those slices. Edits
/// splice the piece sequence rather than shifting bytes, giving inserts and
/// deletes amortized `O(log n)` addressing plus a small, bounded splice.
///
/// `piece_lengths` and `piece_line_feeds` are table-level prefix sums kept in
/// lockstep with `pieces` (same indices) purely so offset→piece and
/// line→piece lookups are `O(log P)` instead of a linear walk.
#[derive(Debug, Clone)]
pub struct PieceTable {
    original: String,
    change: String,
    pieces: Vec<Piece>,
    piece_lengths: PrefixSumComputer,
    piece_line_feeds: PrefixSumComputer,
    config: PieceTableConfig,
}

impl PieceTable {
    /// Builds a table over `original` with default configuration.
    pub fn new(original: impl Into<String>) -> Self {
        Self::with_config(original, PieceTableConfig::default())
    }

    /// Builds a table over `original` with an explicit [`PieceTableConfig`].
    pub fn with_config(original: impl Into<String>, config: PieceTableConfig) -> Self {
        let original = original.into();
        let seed_piece = if original.is_empty() {
            None
        } else {
            Some(Piece::new(BufferKind::Original, 0, &original))
        };
        let mut table = PieceTable {
            original,
            change: String::new(),
            pieces: Vec::new(),
            piece_lengths: PrefixSumComputer::new(Vec::new()),
            piece_line_feeds: PrefixSumComputer::new(Vec::new()),
            config,
        };
        if let Some(piece) = seed_piece {
            table.splice_pieces(0..0, vec![piece]);
        }
        table
    }

    /// Total document length in bytes.
    pub fn len(&mut self) -> usize {
        self.piece_lengths.total_value()
    }

    /// Whether the document is empty.
    pub fn is_empty(&mut self) -> bool {
        self.len() == 0
    }

    /// Total number of lines; always `>= 1`.
    pub fn line_count(&mut self) -> usize {
        self.piece_line_feeds.total_value() + 1
    }

    /// Whether `should_compact` suggests calling [`Self::compact`], per
    /// `config.compact_piece_count`.
    pub fn should_compact(&self) -> bool {
        match self.config.compact_piece_count {
            Some(threshold) => self.pieces.len() >= threshold,
            None => false,
        }
    }

    /// Rebuilds the table as a single piece over a fresh `change` buffer.
    /// Content, line count, and every query result are unchanged; only
    /// internal fragmentation resets. Never called automatically.
    pub fn compact(&mut self) {
        let content = self.get_lines_content();
        self.original = String::new();
        self.pieces.clear();
        self.piece_lengths = PrefixSumComputer::new(Vec::new());
        self.piece_line_feeds = PrefixSumComputer::new(Vec::new());
        let seed_piece = if content.is_empty() {
            None
        } else {
            Some(Piece::new(BufferKind::Change, 0, &content))
        };
        self.change = content;
        if let Some(piece) = seed_piece {
            self.splice_pieces(0..0, vec![piece]);
        }
        log::debug!(
            "compact: rebuilt table as {} piece(s)",
            self.pieces.len()
        );
    }

    /// Inserts `value` at byte `offset`. A no-op for empty `value`.
    ///
    /// # Arguments
    ///
    /// * `value` - The text to insert.
    /// * `offset` - The byte offset to insert it at.
    ///
    /// # Errors
    ///
    /// Returns [`PieceTableError::OutOfRange`], leaving the table untouched,
    /// if `offset` is not a valid position in the current document.
    pub fn insert(&mut self, value: &str, offset: usize) -> Result<()> {
        if value.is_empty() {
            return Ok(());
        }

        let had_pieces = !self.pieces.is_empty();
        let change_offset = self.change.len();
        self.change.push_str(value);
        let new_piece = Piece::new(BufferKind::Change, change_offset, value);

        let cursor = match self.offset_to_cursor(offset) {
            Some(c) => c,
            None if !had_pieces && offset == 0 => {
                log::trace!("insert: seeding empty table with {} byte(s)", value.len());
                self.splice_pieces(0..0, vec![new_piece]);
                self.debug_assert_invariants();
                return Ok(());
            }
            None => {
                let doc_len = self.piece_lengths.total_value();
                return Err(PieceTableError::OutOfRange { offset, doc_len });
            }
        };

        let orig_index = cursor.index;
        let mut orig = self.pieces[orig_index].clone();
        let prefix_len = cursor.buffer_offset - orig.offset;
        let (split_line, split_rem) = orig.line_starts.index_of(cursor.remainder);

        let mut replacement = Vec::with_capacity(3);
        if prefix_len > 0 {
            replacement.push(Self::piece_prefix(&orig, prefix_len, split_line, split_rem));
        }
        replacement.push(new_piece);
        if orig.length - prefix_len > 0 {
            replacement.push(Self::piece_suffix(&orig, prefix_len, split_line, split_rem));
        }

        log::trace!(
            "insert: splitting piece {} at byte {} into {} piece(s)",
            orig_index,
            prefix_len,
            replacement.len()
        );
        self.splice_pieces(orig_index..orig_index + 1, replacement);
        self.debug_assert_invariants();
        Ok(())
    }

    /// Deletes `count` bytes starting at `offset`. A no-op when `count == 0`
    /// or `offset` is at or past the document end. Clamps when the range
    /// extends past the document end (see `delete`'s clamp rule below: the
    /// clamp only reaches the end of the piece containing `offset`, never
    /// further).
    ///
    /// # Arguments
    ///
    /// * `offset` - The byte offset the deletion starts at.
    /// * `count` - The number of bytes to remove.
    pub fn delete(&mut self, offset: usize, count: usize) {
        if count == 0 || self.pieces.is_empty() {
            return;
        }
        let first = match self.offset_to_cursor(offset) {
            Some(c) => c,
            None => return,
        };
        let last = match self.offset_to_cursor(offset + count) {
            Some(c) => c,
            None => {
                let piece = &self.pieces[first.index];
                Cursor {
                    index: first.index,
                    buffer_offset: piece.offset + piece.length,
                    remainder: piece.length,
                }
            }
        };

        if first.index == last.index {
            let piece = self.pieces[first.index].clone();
            if first.buffer_offset == piece.offset {
                self.head_trim(first.index, last.remainder - first.remainder);
                self.debug_assert_invariants();
                return;
            }
            if last.buffer_offset == piece.offset + piece.length {
                let removed = last.remainder - first.remainder;
                self.tail_trim(first.index, first.remainder, removed);
                self.debug_assert_invariants();
                return;
            }
        }

        let first_piece = self.pieces[first.index].clone();
        let last_piece = self.pieces[last.index].clone();
        let mut replacement = Vec::with_capacity(2);

        if first.remainder > 0 {
            let mut fp = first_piece.clone();
            let (split_line, split_rem) = fp.line_starts.index_of(first.remainder);
            replacement.push(Self::piece_prefix(&first_piece, first.remainder, split_line, split_rem));
        }

        let last_prefix_len = last.buffer_offset - last_piece.offset;
        if last_piece.length - last_prefix_len > 0 {
            let mut lp = last_piece.clone();
            let (split_line, split_rem) = lp.line_starts.index_of(last.remainder);
            replacement.push(Self::piece_suffix(&last_piece, last_prefix_len, split_line, split_rem));
        }

        log::debug!(
            "delete: splicing pieces {}..={} into {} piece(s)",
            first.index,
            last.index,
            replacement.len()
        );
        self.splice_pieces(first.index..last.index + 1, replacement);
        self.debug_assert_invariants();
    }

    /// Returns the `count` bytes starting at `offset` as an owned `String`.
    /// Clamps `count` to the document end; returns `""` if `offset` is at or
    /// past the document end.
    ///
    /// # Arguments
    ///
    /// * `offset` - The byte offset the substring starts at.
    /// * `count` - The number of bytes to return.
    pub fn substr(&mut self, offset: usize, count: usize) -> String {
        if count == 0 || self.pieces.is_empty() {
            return String::new();
        }
        let total = self.piece_lengths.total_value();
        if offset >= total {
            return String::new();
        }
        let end = (offset + count).min(total);

        let first = match self.offset_to_cursor(offset) {
            Some(c) => c,
            None => return String::new(),
        };
        let last = match self.offset_to_cursor(end) {
            Some(c) => c,
            None => return String::new(),
        };

        if first.index == last.index {
            return self.piece_slice(first.index)[first.remainder..last.remainder].to_string();
        }

        let mut result = String::with_capacity(end - offset);
        result.push_str(&self.piece_slice(first.index)[first.remainder..]);
        for idx in (first.index + 1)..last.index {
            result.push_str(self.piece_slice(idx));
        }
        result.push_str(&self.piece_slice(last.index)[..last.remainder]);
        result
    }

    /// Returns the substring named by `range` (positions, start inclusive,
    /// end exclusive).
    ///
    /// # Arguments
    ///
    /// * `range` - The start (inclusive) and end (exclusive) positions.
    pub fn get_value_in_range(&mut self, range: Range) -> String {
        let start = self.get_offset_at(range.start);
        let end = self.get_offset_at(range.end);
        if end <= start {
            return String::new();
        }
        self.substr(start, end - start)
    }

    /// Returns the byte offset of `position`.
    ///
    /// # Arguments
    ///
    /// * `position` - A 1-based line/column position in the current document.
    pub fn get_offset_at(&mut self, position: Position) -> usize {
        if self.pieces.is_empty() {
            return 0;
        }
        let cursor = self.position_to_cursor(position.line, position.column);
        let left = self.piece_lengths.accumulated_value(cursor.index as isize - 1);
        left + cursor.remainder
    }

    /// Returns the 1-based `(line, column)` of byte `offset`.
    ///
    /// # Arguments
    ///
    /// * `offset` - A byte offset in the current document, clamped to the
    ///   document end.
    pub fn get_position_at(&mut self, offset: usize) -> Position {
        if self.pieces.is_empty() {
            return Position::new(1, 1);
        }
        let total = self.piece_lengths.total_value();
        let offset = offset.min(total);
        let cursor = self.offset_to_cursor(offset).unwrap_or_else(|| {
            let last = self.pieces.len() - 1;
            self.cursor_at(last, self.pieces[last].length)
        });

        let index = cursor.index;
        let (line_in_piece, col0) = self.pieces[index].line_starts.index_of(cursor.remainder);
        let cumulative_lf_before = self.piece_line_feeds.accumulated_value(index as isize - 1);
        let line = 1 + cumulative_lf_before + line_in_piece;
        let column = if line_in_piece == 0 {
            col0 + 1 + self.column_prefix_before(index)
        } else {
            col0 + 1
        };
        Position::new(line, column)
    }

    /// Returns the content of 1-based `line`, without its terminating `\n`.
    ///
    /// # Arguments
    ///
    /// * `line` - A 1-based line number, clamped to the document's line count.
    pub fn get_line_content(&mut self, line: usize) -> String {
        if self.pieces.is_empty() {
            return String::new();
        }
        let ls = self.locate_line_start(line);
        let k = ls.piece_index;

        if ls.line_in_piece <= ls.lf_count {
            let end = self.pieces[k].line_starts.accumulated_value(ls.line_in_piece as isize - 1);
            let text = self.piece_slice(k)[ls.base_remainder..end].to_string();
            return strip_trailing_newline(text);
        }

        if k < self.pieces.len() - 1 {
            let mut result = self.piece_slice(k)[ls.base_remainder..].to_string();
            let mut idx = k + 1;
            loop {
                if idx >= self.pieces.len() {
                    break;
                }
                if self.pieces[idx].line_feed_count == 0 {
                    result.push_str(self.piece_slice(idx));
                    idx += 1;
                    continue;
                }
                let end = self.pieces[idx].line_starts.accumulated_value(0);
                result.push_str(&self.piece_slice(idx)[..end]);
                break;
            }
            return strip_trailing_newline(result);
        }

        self.piece_slice(k)[ls.base_remainder..].to_string()
    }

    /// Returns the entire document content.
    pub fn get_lines_content(&self) -> String {
        let total: usize = self.pieces.iter().map(|p| p.length).sum();
        let mut result = String::with_capacity(total);
        for idx in 0..self.pieces.len() {
            result.push_str(self.piece_slice(idx));
        }
        result
    }

    // -- cursor lookups ----------------------------------------------------

    /// Locates the piece containing byte `offset`, preferring the later
    /// piece when `offset` lands exactly on a piece boundary. `None` if
    /// `offset` is past the document end.
    fn offset_to_cursor(&mut self, offset: usize) -> Option<Cursor> {
        if self.pieces.is_empty() {
            return None;
        }
        let total = self.piece_lengths.total_value();
        if offset > total {
            return None;
        }
        let (index, remainder) = self.piece_lengths.index_of(offset);
        Some(self.cursor_at(index, remainder))
    }

    fn cursor_at(&self, index: usize, remainder: usize) -> Cursor {
        let piece = &self.pieces[index];
        Cursor {
            index,
            buffer_offset: piece.offset + remainder,
            remainder,
        }
    }

    /// Locates the piece and in-piece byte offset where 1-based `line`
    /// begins, without resolving a column.
    fn locate_line_start(&mut self, line: usize) -> LineStart {
        if self.pieces.is_empty() {
            return LineStart {
                piece_index: 0,
                line_in_piece: 1,
                lf_count: 0,
                base_remainder: 0,
            };
        }
        let line = line.max(1);
        let total_lf = self.piece_line_feeds.total_value();
        let target_lf = (line - 1).min(total_lf);
        let k = self.piece_index_for_line_feed_target(target_lf);
        let cumulative_before = self.piece_line_feeds.accumulated_value(k as isize - 1);
        let line_clamped = target_lf + 1;
        let line_in_piece = line_clamped - cumulative_before;
        let base_remainder = self.pieces[k].line_starts.accumulated_value(line_in_piece as isize - 2);
        let lf_count = self.pieces[k].line_feed_count as usize;
        LineStart {
            piece_index: k,
            line_in_piece,
            lf_count,
            base_remainder,
        }
    }

    /// Resolves a 1-based `(line, column)` to a cursor, walking forward
    /// through line-feed-free pieces when the line has no terminator inside
    /// the piece it starts in (spec's "line spans pieces" case). Clamps to
    /// the document end if `column` overruns every remaining piece.
    fn position_to_cursor(&mut self, line: usize, column: usize) -> Cursor {
        if self.pieces.is_empty() {
            return Cursor {
                index: 0,
                buffer_offset: 0,
                remainder: 0,
            };
        }
        let ls = self.locate_line_start(line);
        let k = ls.piece_index;
        let piece_len_k = self.pieces[k].length;

        if ls.line_in_piece == ls.lf_count + 1 && k < self.pieces.len() - 1 {
            if ls.base_remainder + column.saturating_sub(1) <= piece_len_k {
                let remainder = (ls.base_remainder + column.saturating_sub(1)).min(piece_len_k);
                return self.cursor_at(k, remainder);
            }
            let mut remaining_col = column - (piece_len_k - ls.base_remainder);
            let mut idx = k + 1;
            while idx < self.pieces.len() {
                let p_len = self.pieces[idx].length;
                if self.pieces[idx].line_feed_count > 0 {
                    let remainder = remaining_col.saturating_sub(1).min(p_len);
                    return self.cursor_at(idx, remainder);
                }
                if remaining_col <= p_len {
                    let remainder = remaining_col.saturating_sub(1).min(p_len);
                    return self.cursor_at(idx, remainder);
                }
                remaining_col -= p_len;
                idx += 1;
            }
            let last = self.pieces.len() - 1;
            return self.cursor_at(last, self.pieces[last].length);
        }

        let remainder = (ls.base_remainder + column.saturating_sub(1)).min(piece_len_k);
        self.cursor_at(k, remainder)
    }

    /// Smallest piece index `k` such that the cumulative line-feed count
    /// through piece `k` is at least `target` (first piece satisfying the
    /// condition, unlike [`PrefixSumComputer::index_of`]'s later-segment
    /// tie-break, since addressing by line prefers the piece a line actually
    /// starts in).
    fn piece_index_for_line_feed_target(&mut self, target: usize) -> usize {
        let last = self.pieces.len() - 1;
        let mut lo = 0usize;
        let mut hi = last;
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if self.piece_line_feeds.accumulated_value(mid as isize) >= target {
                hi = mid;
            } else {
                lo = mid + 1;
            }
        }
        lo
    }

    /// When a located line starts before `index` (its first segment has no
    /// preceding `\n` of its own), walks backward accumulating the full
    /// length of each line-feed-free piece, stopping at (and including the
    /// trailing segment of) the first piece that actually contains the
    /// line's starting `\n`.
    fn column_prefix_before(&self, index: usize) -> usize {
        let mut total = 0usize;
        let mut i = index;
        while i > 0 {
            i -= 1;
            let piece = &self.pieces[i];
            if piece.line_feed_count == 0 {
                total += piece.length;
                continue;
            }
            total += *piece.line_starts.values().last().expect("line_starts is never empty");
            break;
        }
        total
    }

    // -- piece splitting -----------------------------------------------------

    /// Builds the kept-prefix half of a split piece: same buffer and start
    /// offset as `orig`, truncated to `prefix_len` bytes.
    fn piece_prefix(orig: &Piece, prefix_len: usize, split_line: usize, split_rem: usize) -> Piece {
        let mut line_starts = orig.line_starts.clone();
        line_starts.truncate(split_line + 1);
        line_starts.change_value(split_line, split_rem);
        Piece {
            source: orig.source,
            offset: orig.offset,
            length: prefix_len,
            line_feed_count: split_line as u32,
            line_starts,
        }
    }

    /// Builds the kept-suffix half of a split piece: same buffer as `orig`,
    /// starting `prefix_len` bytes in.
    fn piece_suffix(orig: &Piece, prefix_len: usize, split_line: usize, split_rem: usize) -> Piece {
        let mut line_starts = orig.line_starts.clone();
        let entry_at_split = line_starts.values()[split_line];
        line_starts.change_value(split_line, entry_at_split - split_rem);
        if split_line > 0 {
            line_starts.remove_values(0, split_line);
        }
        Piece {
            source: orig.source,
            offset: orig.offset + prefix_len,
            length: orig.length - prefix_len,
            line_feed_count: orig.line_feed_count - split_line as u32,
            line_starts,
        }
    }

    /// Head-trim fast path: `count` bytes are removed from the *start* of
    /// the piece at `idx` (the delete range's first byte coincides with the
    /// piece's own first byte).
    fn head_trim(&mut self, idx: usize, count: usize) {
        let (new_len, new_lf, emptied, removed_lines) = {
            let piece = &mut self.pieces[idx];
            let (d_end, d_rem) = piece.line_starts.index_of(count);
            let remaining_in_segment = piece.line_starts.values()[d_end] - d_rem;
            piece.line_starts.change_value(d_end, remaining_in_segment);
            if d_end > 0 {
                piece.line_starts.remove_values(0, d_end);
            }
            piece.offset += count;
            piece.length -= count;
            piece.line_feed_count -= d_end as u32;
            (piece.length, piece.line_feed_count, piece.length == 0, d_end)
        };
        if emptied {
            self.splice_pieces(idx..idx + 1, Vec::new());
        } else {
            self.piece_lengths.change_value(idx, new_len);
            self.piece_line_feeds.change_value(idx, new_lf as usize);
        }
        log::trace!(
            "delete: head-trimmed piece {idx} by {count} byte(s) ({removed_lines} line feed(s) removed)"
        );
    }

    /// Tail-trim fast path: `count` bytes are removed from the *end* of the
    /// piece at `idx` (the delete range's last byte coincides with the
    /// piece's own last byte). `first_remainder` is the in-piece offset
    /// where the kept prefix ends.
    fn tail_trim(&mut self, idx: usize, first_remainder: usize, count: usize) {
        let (new_len, new_lf, emptied) = {
            let piece = &mut self.pieces[idx];
            let old_entries = piece.line_starts.len();
            let (d_begin, d_rem_b) = piece.line_starts.index_of(first_remainder);
            piece.line_feed_count -= (old_entries - d_begin - 1) as u32;
            piece.line_starts.truncate(d_begin + 1);
            piece.line_starts.change_value(d_begin, d_rem_b);
            piece.length -= count;
            (piece.length, piece.line_feed_count, piece.length == 0)
        };
        if emptied {
            self.splice_pieces(idx..idx + 1, Vec::new());
        } else {
            self.piece_lengths.change_value(idx, new_len);
            self.piece_line_feeds.change_value(idx, new_lf as usize);
        }
        log::trace!("delete: tail-trimmed piece {idx} by {count} byte(s)");
    }

    /// Replaces `pieces[range]` with `new_pieces`, keeping `piece_lengths`
    /// and `piece_line_feeds` in lockstep. The one place that mutates
    /// `pieces`'s shape.
    fn splice_pieces(&mut self, range: StdRange<usize>, new_pieces: Vec<Piece>) {
        debug_assert!(
            new_pieces.iter().all(|p| p.length > 0),
            "splice_pieces received a zero-length piece"
        );
        let removed = range.end - range.start;
        let inserted = new_pieces.len();
        if removed > 0 {
            self.piece_lengths.remove_values(range.start, removed);
            self.piece_line_feeds.remove_values(range.start, removed);
            self.pieces.drain(range.start..range.start + removed);
        }
        if inserted > 0 {
            let lengths: Vec<usize> = new_pieces.iter().map(|p| p.length).collect();
            let lfs: Vec<usize> = new_pieces.iter().map(|p| p.line_feed_count as usize).collect();
            self.piece_lengths.insert_values(range.start, &lengths);
            self.piece_line_feeds.insert_values(range.start, &lfs);
            for (offset, piece) in new_pieces.into_iter().enumerate() {
                self.pieces.insert(range.start + offset, piece);
            }
        }
        log::trace!(
            "splice_pieces: removed {removed} piece(s) at {}, inserted {inserted}; table now has {} piece(s)",
            range.start,
            self.pieces.len()
        );
    }

    fn piece_slice(&self, index: usize) -> &str {
        let piece = &self.pieces[index];
        let buf = match piece.source {
            BufferKind::Original => &self.original,
            BufferKind::Change => &self.change,
        };
        &buf[piece.offset..piece.offset + piece.length]
    }

    #[cfg(debug_assertions)]
    fn debug_assert_invariants(&self) {
        for (i, piece) in self.pieces.iter().enumerate() {
            assert!(piece.length > 0, "piece {i} has zero length");
            let mut line_starts = piece.line_starts.clone();
            let sum = line_starts.total_value();
            assert_eq!(
                sum, piece.length,
                "{}",
                PieceTableError::InvariantViolation(format!(
                    "piece {i} lineStarts sums to {sum}, expected length {}",
                    piece.length
                ))
            );
            assert_eq!(
                line_starts.len() as u32,
                piece.line_feed_count + 1,
                "{}",
                PieceTableError::InvariantViolation(format!(
                    "piece {i} has {} lineStarts entries, expected {}",
                    line_starts.len(),
                    piece.line_feed_count + 1
                ))
            );
        }
    }

    #[cfg(not(debug_assertions))]
    fn debug_assert_invariants(&self) {}
}

fn strip_trailing_newline(mut s: String) -> String {
    if s.ends_with('\n') {
        s.pop();
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_table_reports_length_and_line_count() {
        let mut t = PieceTable::new("hello\nworld");
        assert_eq!(t.len(), 11);
        assert_eq!(t.line_count(), 2);
    }

    #[test]
    fn empty_table_has_one_line_and_zero_length() {
        let mut t = PieceTable::new("");
        assert_eq!(t.len(), 0);
        assert_eq!(t.line_count(), 1);
        assert_eq!(t.get_lines_content(), "");
    }

    #[test]
    fn insert_at_start_middle_and_end() {
        let mut t = PieceTable::new("World");
        t.insert("Hello ", 0).unwrap();
        assert_eq!(t.get_lines_content(), "Hello World");
        t.insert("!", 11).unwrap();
        assert_eq!(t.get_lines_content(), "Hello World!");
        t.insert(" there", 5).unwrap();
        assert_eq!(t.get_lines_content(), "Hello there World!");
    }

    #[test]
    fn insert_empty_string_is_noop() {
        let mut t = PieceTable::new("abc");
        t.insert("", 1).unwrap();
        assert_eq!(t.get_lines_content(), "abc");
    }

    #[test]
    fn insert_into_empty_table_seeds_it() {
        let mut t = PieceTable::new("");
        t.insert("hi", 0).unwrap();
        assert_eq!(t.get_lines_content(), "hi");
    }

    #[test]
    fn insert_out_of_range_errors_and_leaves_table_untouched() {
        let mut t = PieceTable::new("abc");
        let err = t.insert("x", 10).unwrap_err();
        assert_eq!(err, PieceTableError::OutOfRange { offset: 10, doc_len: 3 });
        assert_eq!(t.get_lines_content(), "abc");
    }

    #[test]
    fn delete_head_trim_fast_path() {
        let mut t = PieceTable::new("hello world");
        t.delete(0, 6);
        assert_eq!(t.get_lines_content(), "world");
    }

    #[test]
    fn delete_tail_trim_fast_path() {
        let mut t = PieceTable::new("hello world");
        t.delete(5, 6);
        assert_eq!(t.get_lines_content(), "hello");
    }

    #[test]
    fn delete_middle_of_single_piece() {
        let mut t = PieceTable::new("hello world");
        t.delete(5, 1);
        assert_eq!(t.get_lines_content(), "helloworld");
    }

    #[test]
    fn delete_spanning_multiple_pieces() {
        let mut t = PieceTable::new("world");
        t.insert("hello ", 0).unwrap();
        t.insert("!", 11).unwrap();
        assert_eq!(t.get_lines_content(), "hello world!");
        t.delete(4, 4);
        assert_eq!(t.get_lines_content(), "hellrld!");
    }

    #[test]
    fn delete_entire_content_results_in_empty() {
        let mut t = PieceTable::new("hello");
        t.delete(0, 5);
        assert_eq!(t.get_lines_content(), "");
        assert_eq!(t.len(), 0);
        assert_eq!(t.line_count(), 1);
    }

    #[test]
    fn delete_count_zero_is_noop() {
        let mut t = PieceTable::new("hello");
        t.delete(2, 0);
        assert_eq!(t.get_lines_content(), "hello");
    }

    #[test]
    fn delete_past_end_clamps_to_first_piece_end() {
        let mut t = PieceTable::new("world");
        t.insert("hello ", 0).unwrap();
        assert_eq!(t.get_lines_content(), "hello world");
        // "hello " occupies piece 0 (6 bytes); deleting from offset 2 with a
        // count far past the document end must only remove through the end
        // of that piece, not into piece 1 ("world").
        t.delete(2, 1_000_000);
        assert_eq!(t.get_lines_content(), "heworld");
    }

    #[test]
    fn substr_within_and_across_pieces() {
        let mut t = PieceTable::new("world");
        t.insert("hello ", 0).unwrap();
        assert_eq!(t.substr(0, 5), "hello");
        assert_eq!(t.substr(6, 5), "world");
        assert_eq!(t.substr(3, 5), "lo wo");
        assert_eq!(t.substr(0, 1000), "hello world");
    }

    #[test]
    fn substr_past_end_returns_empty() {
        let mut t = PieceTable::new("abc");
        assert_eq!(t.substr(10, 5), "");
        assert_eq!(t.substr(3, 5), "");
    }

    #[test]
    fn get_line_content_single_piece() {
        let mut t = PieceTable::new("one\ntwo\nthree");
        assert_eq!(t.get_line_content(1), "one");
        assert_eq!(t.get_line_content(2), "two");
        assert_eq!(t.get_line_content(3), "three");
    }

    #[test]
    fn get_line_content_spanning_pieces() {
        let mut t = PieceTable::new("one\ntwo\nthree");
        // split "two" across a piece boundary
        t.insert("-X-", 5).unwrap();
        assert_eq!(t.get_lines_content(), "one\nt-X-wo\nthree");
        assert_eq!(t.get_line_content(2), "t-X-wo");
    }

    #[test]
    fn get_line_content_on_trailing_newline_yields_empty_last_line() {
        let mut t = PieceTable::new("abc\n");
        assert_eq!(t.line_count(), 2);
        assert_eq!(t.get_line_content(1), "abc");
        assert_eq!(t.get_line_content(2), "");
    }

    #[test]
    fn offset_position_round_trip_single_piece() {
        let mut t = PieceTable::new("abc\ndef\nghi");
        for offset in 0..=t.len() {
            let pos = t.get_position_at(offset);
            assert_eq!(t.get_offset_at(pos), offset, "offset {offset} -> {pos:?}");
        }
    }

    #[test]
    fn offset_position_round_trip_multi_piece_line_spanning_three_pieces() {
        let mut t = PieceTable::new("c");
        t.insert("b", 0).unwrap();
        t.insert("a", 0).unwrap();
        t.insert("\ndef", 3).unwrap();
        assert_eq!(t.get_lines_content(), "abc\ndef");
        for offset in 0..=t.len() {
            let pos = t.get_position_at(offset);
            assert_eq!(t.get_offset_at(pos), offset, "offset {offset} -> {pos:?}");
        }
        assert_eq!(t.get_position_at(3), Position::new(1, 4));
        assert_eq!(t.get_position_at(7), Position::new(2, 4));
    }

    #[test]
    fn get_value_in_range_matches_substr() {
        let mut t = PieceTable::new("one\ntwo\nthree");
        let range = Range::new(Position::new(2, 1), Position::new(3, 1));
        assert_eq!(t.get_value_in_range(range), "two\n");
    }

    #[test]
    fn compact_preserves_content_and_reduces_to_one_piece() {
        let mut t = PieceTable::new("world");
        t.insert("hello ", 0).unwrap();
        t.insert("!", 11).unwrap();
        let before = t.get_lines_content();
        t.compact();
        assert_eq!(t.get_lines_content(), before);
        assert_eq!(t.pieces.len(), 1);
    }

    #[test]
    fn should_compact_respects_threshold() {
        let mut t = PieceTable::with_config(
            "c",
            PieceTableConfig { compact_piece_count: Some(2) },
        );
        assert!(!t.should_compact());
        t.insert("a", 0).unwrap();
        t.insert("b", 0).unwrap();
        assert!(t.should_compact());
    }
}
