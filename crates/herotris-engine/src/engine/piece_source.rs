use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::PieceKind;

/// Supplier of piece kinds for the piece queue.
///
/// The engine draws one kind each time the current piece is consumed. The
/// default [`RandomPieceSource`] picks uniformly at random;
/// [`SequencePieceSource`] replays a fixed list, which makes piece ordering
/// and collision outcomes exact in tests.
pub trait PieceSource {
    /// Draws the next piece kind.
    fn next_kind(&mut self) -> PieceKind;
}

impl<S> PieceSource for Box<S>
where
    S: PieceSource + ?Sized,
{
    fn next_kind(&mut self) -> PieceKind {
        (**self).next_kind()
    }
}

/// Seed for deterministic piece generation.
///
/// A 128-bit seed; the same seed always produces the same piece sequence,
/// which enables reproducible sessions and simulations. Serialized (and
/// parsed) as 32 hexadecimal digits.
///
/// # Example
///
/// ```
/// use herotris_engine::{GameSession, PieceSeed};
/// use rand::Rng as _;
///
/// let seed: PieceSeed = rand::rng().random();
/// let session1 = GameSession::with_seed(seed);
/// let session2 = GameSession::with_seed(seed);
///
/// assert_eq!(session1.next_piece(), session2.next_piece());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

impl From<u128> for PieceSeed {
    fn from(value: u128) -> Self {
        Self(value.to_be_bytes())
    }
}

impl From<PieceSeed> for u128 {
    fn from(seed: PieceSeed) -> Self {
        u128::from_be_bytes(seed.0)
    }
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from(*self))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParsePieceSeedError {
    #[display("invalid seed: expected 32 hex characters, got {_0}")]
    InvalidLength(#[error(not(source))] usize),
    #[display("invalid seed: {_0} is not hexadecimal")]
    InvalidDigit(#[error(not(source))] String),
}

impl FromStr for PieceSeed {
    type Err = ParsePieceSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParsePieceSeedError::InvalidLength(s.len()));
        }
        let num = u128::from_str_radix(s, 16)
            .map_err(|_| ParsePieceSeedError::InvalidDigit(s.to_owned()))?;
        Ok(Self::from(num))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values with `rng.random()`.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

/// Uniformly random piece kinds from a seeded PCG32 generator.
#[derive(Debug, Clone)]
pub struct RandomPieceSource {
    rng: Pcg32,
}

impl Default for RandomPieceSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPieceSource {
    /// Creates a source with a random seed.
    ///
    /// For deterministic piece generation, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
        }
    }
}

impl PieceSource for RandomPieceSource {
    fn next_kind(&mut self) -> PieceKind {
        self.rng.random()
    }
}

/// Replays a fixed list of piece kinds, starting over after the last one.
///
/// # Example
///
/// ```
/// use herotris_engine::{PieceKind, PieceSource, SequencePieceSource};
///
/// let mut source = SequencePieceSource::new([PieceKind::I, PieceKind::O]);
/// assert_eq!(source.next_kind(), PieceKind::I);
/// assert_eq!(source.next_kind(), PieceKind::O);
/// assert_eq!(source.next_kind(), PieceKind::I);
/// ```
#[derive(Debug, Clone)]
pub struct SequencePieceSource {
    kinds: Vec<PieceKind>,
    index: usize,
}

impl SequencePieceSource {
    /// # Panics
    ///
    /// Panics if `kinds` is empty.
    #[must_use]
    pub fn new(kinds: impl IntoIterator<Item = PieceKind>) -> Self {
        let kinds: Vec<_> = kinds.into_iter().collect();
        assert!(!kinds.is_empty(), "piece sequence must not be empty");
        Self { kinds, index: 0 }
    }
}

impl PieceSource for SequencePieceSource {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.index];
        self.index = (self.index + 1) % self.kinds.len();
        kind
    }
}
