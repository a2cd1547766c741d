//! Interactive game loop: prompts, re-prompts and the final report.

use std::io::{self, BufRead, Write};

use bowl_core::{
    compute_score, frame_scores, parse_bonus_line, parse_frame_line, BonusPolicy, Command,
    Config, Game, GameReport, Phase, Pins, Score, SessionError, FRAMES_PER_GAME,
};
use bowl_logging::{
    debug_log, FrameRecordedEventV1, GameAbortedEventV1, GameCompletedEventV1,
    GameStartedEventV1, InputRejectedEventV1,
};

use crate::events::EventSink;

pub const INTRO: [&str; 3] = [
    "Enter each set as 'x' or 'x, y' where x and y represent the number of pins knocked down.",
    "If you strike, just input '10'. For a spare, input two numbers like '5, 5'.",
    "Enter 'q' to quit the application without scoring your game.",
];

pub const GOODBYE: &str =
    "You have chosen to quit the application. Your score will not be calculated. Goodbye.";

pub const BONUS_PROMPT: &str = "Bonus Set for 10th frame - Set: ";

#[derive(Debug)]
pub enum PlayOutcome {
    Completed { score: Score },
    Aborted { frame: u8 },
}

enum Step {
    Quit,
    /// Rolls appended to the log by this line.
    Recorded(Vec<Pins>),
}

/// Run one interactive game reading lines from `input`.
///
/// End of input is treated like `q`. A line that is not valid UTF-8 is
/// decoded lossily and rejected like any other malformed entry.
pub fn run_play<R: BufRead, W: Write>(
    mut input: R,
    out: &mut W,
    cfg: &Config,
    config_hash: Option<String>,
    events: &mut EventSink,
) -> io::Result<PlayOutcome> {
    for line in INTRO {
        writeln!(out, "{line}")?;
    }

    let mut game = Game::new(cfg.bonus_policy);
    events.emit(&GameStartedEventV1::new(
        policy_name(cfg.bonus_policy),
        config_hash,
    ));

    let mut buf: Vec<u8> = Vec::new();
    loop {
        let (frame, bonus) = match game.phase() {
            Phase::Frame(n) => {
                write!(out, "Frame {n} - Set: ")?;
                (n, false)
            }
            Phase::Bonus { .. } => {
                write!(out, "{BONUS_PROMPT}")?;
                (FRAMES_PER_GAME as u8, true)
            }
            Phase::Complete => break,
        };
        out.flush()?;

        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            writeln!(out)?;
            writeln!(out, "{GOODBYE}")?;
            events.emit(&GameAbortedEventV1::new(frame, "eof"));
            return Ok(PlayOutcome::Aborted { frame });
        }
        let line = String::from_utf8_lossy(&buf);
        let text = line.trim_end_matches(['\r', '\n']);

        match step(&mut game, text) {
            Ok(Step::Quit) => {
                writeln!(out, "{GOODBYE}")?;
                events.emit(&GameAbortedEventV1::new(frame, "quit"));
                return Ok(PlayOutcome::Aborted { frame });
            }
            Ok(Step::Recorded(rolls)) => {
                debug_log(|| format!("frame {frame}: recorded {rolls:?}"));
                events.emit(&FrameRecordedEventV1::new(
                    frame,
                    bonus,
                    rolls,
                    game.rolls().len(),
                ));
            }
            Err(e) => {
                debug_log(|| format!("frame {frame}: rejected {text:?}: {e:?}"));
                writeln!(out, "{e}")?;
                events.emit(&InputRejectedEventV1::new(frame, text, format!("{e:?}")));
            }
        }
    }

    let score = compute_score(game.rolls());
    for line in GameReport::new(score, &cfg.report).lines() {
        writeln!(out, "{line}")?;
    }
    events.emit(&GameCompletedEventV1::new(
        score,
        game.rolls().as_slice().to_vec(),
        frame_scores(game.rolls())
            .iter()
            .map(|f| f.running_total)
            .collect(),
    ));
    Ok(PlayOutcome::Completed { score })
}

/// Apply one input line to the game. Invalid lines leave the game untouched.
fn step(game: &mut Game, text: &str) -> Result<Step, SessionError> {
    let before = game.rolls().len();
    match game.phase() {
        Phase::Frame(_) => match parse_frame_line(text)? {
            Command::Quit => return Ok(Step::Quit),
            Command::Enter(entry) => {
                game.record_frame(entry)?;
            }
        },
        Phase::Bonus { balls } => match parse_bonus_line(text, balls)? {
            Command::Quit => return Ok(Step::Quit),
            Command::Enter(bonus) => game.record_bonus(&bonus)?,
        },
        Phase::Complete => return Err(SessionError::GameComplete),
    }
    Ok(Step::Recorded(game.rolls().as_slice()[before..].to_vec()))
}

fn policy_name(policy: BonusPolicy) -> &'static str {
    match policy {
        BonusPolicy::Legacy => "legacy",
        BonusPolicy::Rules => "rules",
    }
}
