//! Roll log: the ordered record of every ball thrown in one game.
//!
//! The log is append-only. Entries are never edited or removed, and bonus balls
//! from the 10th frame are stored inline after the frame's own rolls.

/// Pins knocked down by a single ball (0..=10 in a well-formed game).
pub type Pins = u8;

/// Pins standing at the start of every frame.
pub const PINS_PER_FRAME: Pins = 10;

/// Append-only sequence of rolls.
///
/// No validation happens here; callers (the input layer and [`crate::Game`])
/// are responsible for only recording legal pin counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RollLog {
    rolls: Vec<Pins>,
}

impl RollLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one ball to the end of the log.
    pub fn record(&mut self, pins: Pins) {
        self.rolls.push(pins);
    }

    pub fn len(&self) -> usize {
        self.rolls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rolls.is_empty()
    }

    /// Roll at `index`, or `None` past the end of the log.
    pub fn at(&self, index: usize) -> Option<Pins> {
        self.rolls.get(index).copied()
    }

    pub fn as_slice(&self) -> &[Pins] {
        &self.rolls
    }
}

impl FromIterator<Pins> for RollLog {
    fn from_iter<I: IntoIterator<Item = Pins>>(iter: I) -> Self {
        Self {
            rolls: iter.into_iter().collect(),
        }
    }
}

impl From<&[Pins]> for RollLog {
    fn from(rolls: &[Pins]) -> Self {
        rolls.iter().copied().collect()
    }
}
