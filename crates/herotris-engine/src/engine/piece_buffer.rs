use crate::PieceKind;

use super::piece_source::{PieceSource, RandomPieceSource};

/// Holds the preview ("next") piece and refills it from a [`PieceSource`].
///
/// Exactly one upcoming kind is buffered at any time. Popping it draws a
/// replacement from the source immediately, so the preview is never empty.
///
/// # Example
///
/// ```
/// use herotris_engine::{PieceBuffer, PieceKind, SequencePieceSource};
///
/// let source = SequencePieceSource::new([PieceKind::T, PieceKind::I, PieceKind::O]);
/// let mut buffer = PieceBuffer::new(source);
///
/// assert_eq!(buffer.next_piece(), PieceKind::T);
/// assert_eq!(buffer.pop_next(), PieceKind::T);
/// assert_eq!(buffer.next_piece(), PieceKind::I);
/// ```
#[derive(Debug, Clone)]
pub struct PieceBuffer<S = RandomPieceSource> {
    source: S,
    next: PieceKind,
}

impl Default for PieceBuffer {
    fn default() -> Self {
        Self::new(RandomPieceSource::new())
    }
}

impl<S> PieceBuffer<S>
where
    S: PieceSource,
{
    /// Creates a buffer, drawing the first preview piece from `source`.
    #[must_use]
    pub fn new(mut source: S) -> Self {
        let next = source.next_kind();
        Self { source, next }
    }

    /// Returns the upcoming piece without consuming it.
    #[must_use]
    pub fn next_piece(&self) -> PieceKind {
        self.next
    }

    /// Takes the upcoming piece and draws a new one in its place.
    pub fn pop_next(&mut self) -> PieceKind {
        let next = self.source.next_kind();
        std::mem::replace(&mut self.next, next)
    }

    /// Discards the buffered piece and draws a fresh pair from the source:
    /// the returned kind for immediate use, then a new upcoming piece.
    pub fn restart(&mut self) -> PieceKind {
        let current = self.source.next_kind();
        self.next = self.source.next_kind();
        current
    }
}
