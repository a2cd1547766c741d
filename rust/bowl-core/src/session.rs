//! Game session: frame advancement on top of the roll log.
//!
//! This module is the single place that appends to a game's `RollLog`. It
//! decides how many rolls each frame contributes and whether the 10th frame
//! needs a bonus set.

use thiserror::Error;

use crate::config::BonusPolicy;
use crate::input::{BonusSet, FrameEntry, InputError};
use crate::rolls::{Pins, RollLog, PINS_PER_FRAME};
use crate::scoring::{compute_score, frame_scores, FrameScore, Score, FRAMES_PER_GAME};

const LAST_FRAME: u8 = FRAMES_PER_GAME as u8;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("frame {frame} is waiting for its bonus set")]
    BonusPending { frame: u8 },
    #[error("no bonus set is expected in frame {frame}")]
    UnexpectedBonus { frame: u8 },
    #[error("game is already complete")]
    GameComplete,
    #[error("roll log ends before frame {frame} is complete")]
    Incomplete { frame: u8 },
    #[error("{count} roll(s) left over after the 10th frame")]
    TrailingRolls { count: usize },
    #[error(transparent)]
    Input(#[from] InputError),
}

/// What the session is waiting for next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the balls of this 1-based frame.
    Frame(u8),
    /// 10th frame was a strike or spare; waiting for `balls` bonus balls.
    Bonus { balls: usize },
    Complete,
}

/// Result of recording one frame entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Move on to the next frame.
    Advanced,
    /// Ask for the 10th-frame bonus set.
    BonusRequired { balls: usize },
    /// All ten frames recorded.
    Complete,
}

/// One game in progress.
#[derive(Debug, Clone)]
pub struct Game {
    rolls: RollLog,
    phase: Phase,
    policy: BonusPolicy,
    /// Bonus balls follow a 10th-frame strike (both are scored).
    bonus_after_strike: bool,
}

impl Game {
    pub fn new(policy: BonusPolicy) -> Self {
        Self {
            rolls: RollLog::new(),
            phase: Phase::Frame(1),
            policy,
            bonus_after_strike: false,
        }
    }

    /// Rebuild a game from a flat, ball-by-ball roll sequence.
    ///
    /// Every frame is validated exactly as interactive input would be, and the
    /// sequence must end with the 10th frame (bonus balls included).
    pub fn replay(policy: BonusPolicy, rolls: &[Pins]) -> Result<Self, SessionError> {
        let mut game = Self::new(policy);
        let mut it = rolls.iter().copied();

        loop {
            match game.phase {
                Phase::Frame(frame) => {
                    let first = it.next().ok_or(SessionError::Incomplete { frame })?;
                    let entry = if first == PINS_PER_FRAME {
                        FrameEntry::strike()
                    } else {
                        let second = it.next().ok_or(SessionError::Incomplete { frame })?;
                        FrameEntry::new(first, Some(second))?
                    };
                    game.record_frame(entry)?;
                }
                Phase::Bonus { balls } => {
                    let bonus: Vec<Pins> = it.by_ref().take(balls).collect();
                    if bonus.len() < balls {
                        return Err(SessionError::Incomplete { frame: LAST_FRAME });
                    }
                    game.record_bonus(&BonusSet::new(bonus, balls)?)?;
                }
                Phase::Complete => break,
            }
        }

        let left = it.count();
        if left > 0 {
            return Err(SessionError::TrailingRolls { count: left });
        }
        Ok(game)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn policy(&self) -> BonusPolicy {
        self.policy
    }

    pub fn rolls(&self) -> &RollLog {
        &self.rolls
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    /// Final score, once all ten frames (and any bonus set) are recorded.
    pub fn score(&self) -> Option<Score> {
        self.is_complete().then(|| compute_score(&self.rolls))
    }

    /// Frame-by-frame score sheet, once the game is complete.
    pub fn frame_scores(&self) -> Option<Vec<FrameScore>> {
        self.is_complete().then(|| frame_scores(&self.rolls))
    }

    /// Record the balls of the current frame.
    ///
    /// Frames 1-9 append one roll for a strike and two otherwise. The 10th
    /// frame does the same, then asks for a bonus set after a strike or spare.
    pub fn record_frame(&mut self, entry: FrameEntry) -> Result<FrameOutcome, SessionError> {
        let frame = match self.phase {
            Phase::Frame(frame) => frame,
            Phase::Bonus { .. } => return Err(SessionError::BonusPending { frame: LAST_FRAME }),
            Phase::Complete => return Err(SessionError::GameComplete),
        };

        self.rolls.record(entry.first);
        if !entry.is_strike() {
            self.rolls.record(entry.second_or_zero());
        }

        if frame < LAST_FRAME {
            self.phase = Phase::Frame(frame + 1);
            return Ok(FrameOutcome::Advanced);
        }

        match self.bonus_balls_for(&entry) {
            0 => {
                self.phase = Phase::Complete;
                Ok(FrameOutcome::Complete)
            }
            balls => {
                self.bonus_after_strike = entry.is_strike();
                self.phase = Phase::Bonus { balls };
                Ok(FrameOutcome::BonusRequired { balls })
            }
        }
    }

    /// Record the 10th-frame bonus set and complete the game.
    ///
    /// After a strike both bonus balls are scored, so they must fit one rack.
    /// After a spare only the first ball is scored.
    pub fn record_bonus(&mut self, bonus: &BonusSet) -> Result<(), SessionError> {
        let balls = match self.phase {
            Phase::Bonus { balls } => balls,
            Phase::Frame(frame) => return Err(SessionError::UnexpectedBonus { frame }),
            Phase::Complete => return Err(SessionError::GameComplete),
        };
        if bonus.balls().len() != balls {
            return Err(InputError::BonusCount {
                expected: balls,
                got: bonus.balls().len(),
            }
            .into());
        }
        if self.bonus_after_strike {
            bonus.check_fresh_rack()?;
        }

        for &pins in bonus.balls() {
            self.rolls.record(pins);
        }
        self.phase = Phase::Complete;
        Ok(())
    }

    fn bonus_balls_for(&self, last_frame: &FrameEntry) -> usize {
        match (self.policy, last_frame.is_strike(), last_frame.is_spare()) {
            (_, true, _) => 2,
            (BonusPolicy::Legacy, false, true) => 2,
            (BonusPolicy::Rules, false, true) => 1,
            (_, false, false) => 0,
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(BonusPolicy::default())
    }
}
