//! Score engine: maps a completed roll log to the official ten-pin score.
//!
//! The engine is a pure walk over the log with a frame cursor. Strikes advance
//! the cursor by one roll, every other frame by two. Bonus look-aheads read
//! past the current frame and never fail: a missing roll contributes 0.

use serde::Serialize;

use crate::rolls::{Pins, RollLog, PINS_PER_FRAME};

/// Final (or running) game score.
pub type Score = u16;

pub const FRAMES_PER_GAME: usize = 10;

/// Score of a perfect game.
pub const MAX_SCORE: Score = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameKind {
    Strike,
    Spare,
    Open,
}

/// One frame of the score sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameScore {
    /// 1-based frame number.
    pub frame: u8,
    pub kind: FrameKind,
    /// Index of the frame's first roll in the log.
    pub first_roll: usize,
    /// Pins knocked down by the frame's own balls.
    pub pins: Score,
    /// Strike/spare bonus taken from later rolls.
    pub bonus: Score,
    /// Score through this frame.
    pub running_total: Score,
}

impl FrameScore {
    pub fn total(&self) -> Score {
        self.pins + self.bonus
    }
}

/// Compute the game score for a completed ten-frame log.
///
/// Only meaningful on a completed log (10th-frame bonus balls included). On a
/// partial log the frames that have no rolls yet contribute 0.
pub fn compute_score(log: &RollLog) -> Score {
    frame_scores(log).iter().map(FrameScore::total).sum()
}

/// Per-frame breakdown of [`compute_score`]; always exactly ten entries.
pub fn frame_scores(log: &RollLog) -> Vec<FrameScore> {
    let mut out = Vec::with_capacity(FRAMES_PER_GAME);
    let mut running_total: Score = 0;
    let mut frame_index = 0usize;

    for frame in 1..=FRAMES_PER_GAME as u8 {
        let (kind, pins, bonus, advance) = if is_strike(log, frame_index) {
            (
                FrameKind::Strike,
                Score::from(PINS_PER_FRAME),
                strike_bonus(log, frame_index),
                1,
            )
        } else if is_spare(log, frame_index) {
            (
                FrameKind::Spare,
                Score::from(PINS_PER_FRAME),
                spare_bonus(log, frame_index),
                2,
            )
        } else {
            (FrameKind::Open, pair_sum(log, frame_index), 0, 2)
        };

        running_total += pins + bonus;
        out.push(FrameScore {
            frame,
            kind,
            first_roll: frame_index,
            pins,
            bonus,
            running_total,
        });
        frame_index += advance;
    }

    out
}

fn roll(log: &RollLog, index: usize) -> Option<Score> {
    log.at(index).map(Score::from)
}

fn is_strike(log: &RollLog, frame_index: usize) -> bool {
    log.at(frame_index) == Some(PINS_PER_FRAME)
}

fn is_spare(log: &RollLog, frame_index: usize) -> bool {
    pair_sum(log, frame_index) == Score::from(PINS_PER_FRAME)
}

/// Next two rolls when both exist, else whatever single roll follows.
fn strike_bonus(log: &RollLog, frame_index: usize) -> Score {
    match (roll(log, frame_index + 1), roll(log, frame_index + 2)) {
        (Some(a), Some(b)) => a + b,
        (Some(a), None) => a,
        _ => 0,
    }
}

fn spare_bonus(log: &RollLog, frame_index: usize) -> Score {
    roll(log, frame_index + 2).unwrap_or(0)
}

/// Both balls of the frame; a trailing single roll counts alone.
fn pair_sum(log: &RollLog, frame_index: usize) -> Score {
    match (roll(log, frame_index), roll(log, frame_index + 1)) {
        (Some(a), Some(b)) => a + b,
        (Some(a), None) => a,
        _ => 0,
    }
}

/// Score for a flat pin sequence; convenience for callers holding raw rolls.
pub fn score_rolls(rolls: &[Pins]) -> Score {
    compute_score(&RollLog::from(rolls))
}
