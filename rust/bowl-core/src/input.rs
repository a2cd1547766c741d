//! Parsing and validation of one line of frame input.
//!
//! Accepted forms are `x` or `x, y` (whitespace around each value is ignored).
//! `q` quits. Anything else is an [`InputError`], whose display text is the
//! message shown before re-prompting.

use thiserror::Error;

use crate::rolls::{Pins, PINS_PER_FRAME};

/// Literal the user types to abandon the game.
pub const QUIT: &str = "q";

const FORMAT_HINT: &str = "Invalid input. Please make sure you either input '10' or two numbers separated by a comma and a space, like '5, 5'.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("{}", FORMAT_HINT)]
    Empty,
    #[error("{}", FORMAT_HINT)]
    NotANumber { token: String },
    #[error("{}", FORMAT_HINT)]
    OutOfRange { value: i64 },
    #[error("{}", FORMAT_HINT)]
    TooManyValues { count: usize },
    #[error("Invalid input. Please make sure your score for a frame does not exceed 10.")]
    PairSumExceeds { sum: u16 },
    #[error("Invalid input. Please enter {expected} bonus ball(s) for the 10th frame.")]
    BonusCount { expected: usize, got: usize },
}

/// A parsed line: either a value or the quit command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<T> {
    Quit,
    Enter(T),
}

/// The balls of one regular frame as entered by the user.
///
/// A single value below 10 is an open frame whose second ball is 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameEntry {
    pub first: Pins,
    pub second: Option<Pins>,
}

impl FrameEntry {
    pub fn strike() -> Self {
        Self {
            first: PINS_PER_FRAME,
            second: None,
        }
    }

    /// Validate each ball and the frame's pin total.
    pub fn new(first: Pins, second: Option<Pins>) -> Result<Self, InputError> {
        check_range(first)?;
        if let Some(second) = second {
            check_range(second)?;
        }
        let sum = u16::from(first) + u16::from(second.unwrap_or(0));
        if sum > u16::from(PINS_PER_FRAME) {
            return Err(InputError::PairSumExceeds { sum });
        }
        Ok(Self { first, second })
    }

    pub fn is_strike(&self) -> bool {
        self.first == PINS_PER_FRAME
    }

    pub fn is_spare(&self) -> bool {
        !self.is_strike()
            && u16::from(self.first) + u16::from(self.second_or_zero()) == u16::from(PINS_PER_FRAME)
    }

    /// Second ball as recorded in the roll log.
    pub fn second_or_zero(&self) -> Pins {
        self.second.unwrap_or(0)
    }
}

/// The extra balls thrown after a 10th-frame strike or spare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BonusSet {
    balls: Vec<Pins>,
}

impl BonusSet {
    /// Validate `balls` against the number of bonus balls the frame allows.
    pub fn new(balls: Vec<Pins>, expected: usize) -> Result<Self, InputError> {
        if balls.len() != expected {
            return Err(InputError::BonusCount {
                expected,
                got: balls.len(),
            });
        }
        for &pins in &balls {
            check_range(pins)?;
        }
        Ok(Self { balls })
    }

    /// Two balls thrown after a strike: a first ball below 10 leaves a
    /// partial rack, so the pair may not exceed 10.
    pub fn check_fresh_rack(&self) -> Result<(), InputError> {
        if let [first, second] = self.balls[..] {
            if first < PINS_PER_FRAME {
                FrameEntry::new(first, Some(second))?;
            }
        }
        Ok(())
    }

    pub fn balls(&self) -> &[Pins] {
        &self.balls
    }
}

fn check_range(pins: Pins) -> Result<(), InputError> {
    if pins > PINS_PER_FRAME {
        return Err(InputError::OutOfRange {
            value: i64::from(pins),
        });
    }
    Ok(())
}

/// Parse a line typed at a `Frame N - Set:` prompt.
pub fn parse_frame_line(line: &str) -> Result<Command<FrameEntry>, InputError> {
    if is_quit(line) {
        return Ok(Command::Quit);
    }
    let values = parse_values(line)?;
    let entry = match values[..] {
        [first] if first == PINS_PER_FRAME => FrameEntry::strike(),
        [first] => FrameEntry::new(first, None)?,
        [first, second] => FrameEntry::new(first, Some(second))?,
        _ => {
            return Err(InputError::TooManyValues {
                count: values.len(),
            })
        }
    };
    Ok(Command::Enter(entry))
}

/// Parse a line typed at the 10th-frame bonus prompt.
pub fn parse_bonus_line(line: &str, expected: usize) -> Result<Command<BonusSet>, InputError> {
    if is_quit(line) {
        return Ok(Command::Quit);
    }
    let balls = parse_values(line)?;
    Ok(Command::Enter(BonusSet::new(balls, expected)?))
}

pub fn is_quit(line: &str) -> bool {
    line.trim() == QUIT
}

/// Split on commas and parse each value as a pin count in 0..=10.
///
/// Returns one or two values.
pub fn parse_values(line: &str) -> Result<Vec<Pins>, InputError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(InputError::Empty);
    }
    let parts: Vec<&str> = line.split(',').collect();
    if parts.len() > 2 {
        return Err(InputError::TooManyValues { count: parts.len() });
    }
    parts.into_iter().map(parse_pins).collect()
}

fn parse_pins(token: &str) -> Result<Pins, InputError> {
    let token = token.trim();
    let value: i64 = token.parse().map_err(|_| InputError::NotANumber {
        token: token.to_string(),
    })?;
    if !(0..=i64::from(PINS_PER_FRAME)).contains(&value) {
        return Err(InputError::OutOfRange { value });
    }
    Ok(value as Pins)
}
