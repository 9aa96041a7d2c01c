//! Caret translation across rendered chunks
//!
//! The host reports a caret as (chunk position, offset inside that
//! chunk's text). `CaretIndex` turns that into a flat offset into the
//! visible text and back. Offsets are in characters of visible text:
//! whitespace dropped by rendering cannot be measured from the chunks.

use tracing::{trace, warn};

/// A caret placed inside a chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CaretAnchor {
    /// Position of the chunk in the chunk sequence (zero-width chunks included)
    pub chunk: usize,
    /// Character offset inside the chunk's visible text
    pub offset: usize,
}

impl CaretAnchor {
    pub fn new(chunk: usize, offset: usize) -> Self {
        Self { chunk, offset }
    }
}

/// Cumulative visible-length index over a chunk sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaretIndex {
    /// Visible length of each chunk
    lengths: Vec<usize>,
    /// `cumulative[i]` is the visible length of chunks `0..i`; one entry longer than `lengths`
    cumulative: Vec<usize>,
}

impl CaretIndex {
    /// Build an index from per-chunk visible lengths
    ///
    /// Hosts that keep their own chunk layout (for example one the user
    /// has just typed into) describe it this way.
    pub fn from_lengths<I>(lengths: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let lengths: Vec<usize> = lengths.into_iter().collect();
        let mut cumulative = Vec::with_capacity(lengths.len() + 1);
        let mut covered = 0;
        cumulative.push(covered);
        for len in &lengths {
            covered += len;
            cumulative.push(covered);
        }
        Self { lengths, cumulative }
    }

    /// Number of chunks, zero-width ones included
    pub fn chunk_count(&self) -> usize {
        self.lengths.len()
    }

    /// Total visible length
    pub fn total(&self) -> usize {
        self.cumulative.last().copied().unwrap_or(0)
    }

    /// Visible length of one chunk
    pub fn chunk_len(&self, chunk: usize) -> Option<usize> {
        self.lengths.get(chunk).copied()
    }

    /// Visible offset at which a chunk starts
    pub fn chunk_start(&self, chunk: usize) -> Option<usize> {
        if chunk < self.lengths.len() {
            self.cumulative.get(chunk).copied()
        } else {
            None
        }
    }

    /// Flat visible offset of a caret anchored inside a chunk
    ///
    /// Anchors past the last chunk clamp to the end of the text, and
    /// offsets past the end of their chunk clamp to that chunk's end.
    pub fn capture(&self, anchor: CaretAnchor) -> usize {
        let Some(&len) = self.lengths.get(anchor.chunk) else {
            warn!(chunk = anchor.chunk, chunks = self.lengths.len(), "caret anchor outside layout, clamping to end");
            return self.total();
        };
        if anchor.offset > len {
            warn!(chunk = anchor.chunk, offset = anchor.offset, len, "caret offset past chunk end, clamping");
        }
        self.cumulative[anchor.chunk] + anchor.offset.min(len)
    }

    /// Place a flat visible offset inside a chunk
    ///
    /// The offset is clamped to the visible length. On a boundary between
    /// two chunks the earlier chunk wins: the caret goes at the end of the
    /// first chunk whose cumulative length reaches the target. Zero-width
    /// chunks never receive the caret. Returns `None` when no chunk has
    /// visible text.
    pub fn restore(&self, offset: usize) -> Option<CaretAnchor> {
        let target = offset.min(self.total());

        // First chunk whose inclusive cumulative length reaches the target.
        // For a non-zero target that chunk is never zero-width.
        let first_fit = self.cumulative[1..].partition_point(|&covered| covered < target);
        let chunk = (first_fit..self.lengths.len()).find(|&i| self.lengths[i] > 0)?;

        let anchor = CaretAnchor::new(chunk, target - self.cumulative[chunk]);
        trace!(target: "formula.caret", offset, clamped = target, ?anchor, "restored caret");
        Some(anchor)
    }
}

impl Default for CaretIndex {
    fn default() -> Self {
        Self::from_lengths(Vec::new())
    }
}
