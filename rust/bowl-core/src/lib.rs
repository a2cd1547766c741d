//! bowl-core: Ten-pin rules, roll log, scoring engine, frame input and reports.

pub mod config;
pub mod input;
pub mod report;
pub mod rolls;
pub mod scoring;
pub mod session;

pub use config::{BonusPolicy, Config, ConfigError};
pub use input::{parse_bonus_line, parse_frame_line, BonusSet, Command, FrameEntry, InputError};
pub use report::{Advice, GameReport};
pub use rolls::{Pins, RollLog, PINS_PER_FRAME};
pub use scoring::{
    compute_score, frame_scores, score_rolls, FrameKind, FrameScore, Score, FRAMES_PER_GAME,
    MAX_SCORE,
};
pub use session::{FrameOutcome, Game, Phase, SessionError};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");


#[cfg(test)]
mod scoring_tests;
