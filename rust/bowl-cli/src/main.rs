//! bowl: CLI binary for the ten-pin bowling score calculator.
//!
//! Subcommands:
//! - play (default)
//! - score

use std::env;
use std::io;
use std::process;

use bowl_core::{BonusPolicy, Config, FrameKind, Game, GameReport, Pins, PINS_PER_FRAME};
use bowl_logging::{debug_log, hash_config_bytes, GameCompletedEventV1, GameStartedEventV1};

mod events;
mod play;

use events::EventSink;
use play::{run_play, PlayOutcome};

/// `--config` / `--log` shared by every subcommand.
#[derive(Debug, Default)]
struct CommonOpts {
    config: Option<String>,
    log: Option<String>,
}

impl CommonOpts {
    /// Consume a shared option at `args[i]`; returns how many args were used.
    fn take(&mut self, args: &[String], i: usize) -> Option<usize> {
        let slot = match args[i].as_str() {
            "--config" => &mut self.config,
            "--log" => &mut self.log,
            _ => return None,
        };
        let Some(value) = args.get(i + 1) else {
            eprintln!("Missing value for {}", args[i]);
            process::exit(1);
        };
        *slot = Some(value.clone());
        Some(2)
    }

    /// Load the YAML config (or defaults) plus the hash of its bytes.
    fn load_config(&self) -> (Config, Option<String>) {
        let Some(path) = self.config.as_deref() else {
            return (Config::default(), None);
        };
        let bytes = std::fs::read(path).unwrap_or_else(|e| {
            eprintln!("Failed to read config file {path}: {e}");
            process::exit(1);
        });
        let cfg = Config::from_yaml(&String::from_utf8_lossy(&bytes)).unwrap_or_else(|e| {
            eprintln!("{path}: {e}");
            process::exit(1);
        });
        debug_log(|| format!("loaded config from {path}: {cfg:?}"));
        (cfg, Some(hash_config_bytes(&bytes)))
    }

    fn open_events(&self) -> EventSink {
        match self.log.as_deref() {
            None => EventSink::disabled(),
            Some(path) => EventSink::open(path).unwrap_or_else(|e| {
                eprintln!("Failed to open event log {path}: {e}");
                process::exit(1);
            }),
        }
    }
}

fn print_help() {
    eprintln!(
        r#"bowl - ten-pin bowling score calculator

USAGE:
    bowl [play] [OPTIONS]
    bowl score [OPTIONS] <PINS>...

COMMANDS:
    play        Enter a game frame by frame and print the score report (default)
    score       Score a complete game given ball by ball, e.g. `bowl score 10 7,3 9 0 ...`

OPTIONS:
    --config PATH   YAML config (bonus_policy, report settings)
    --log PATH      Append NDJSON game events to PATH
    -h, --help      Print this help message
    -V, --version   Print version

Set BOWL_DEBUG_LOG=1 for debug output on stderr.
"#
    );
}

fn print_version() {
    println!("bowl {}", env!("CARGO_PKG_VERSION"));
}

fn cmd_play(args: &[String]) {
    let mut common = CommonOpts::default();

    let mut i = 0usize;
    while i < args.len() {
        if let Some(used) = common.take(args, i) {
            i += used;
            continue;
        }
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"bowl play

USAGE:
    bowl play [--config PATH] [--log PATH]

Prompts for frames 1-10 on stdin. Enter 'x' or 'x, y'; 'q' quits.
"#
                );
                return;
            }
            other => {
                eprintln!("Unknown option for `bowl play`: {}", other);
                eprintln!("Run `bowl play --help` for usage.");
                process::exit(1);
            }
        }
    }

    let (cfg, config_hash) = common.load_config();
    let mut events = common.open_events();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let outcome = run_play(stdin.lock(), &mut stdout.lock(), &cfg, config_hash, &mut events);
    events.flush();

    match outcome {
        Ok(PlayOutcome::Completed { score }) => debug_log(|| format!("game completed: {score}")),
        Ok(PlayOutcome::Aborted { frame }) => debug_log(|| format!("game aborted at frame {frame}")),
        Err(e) => {
            eprintln!("I/O error: {e}");
            process::exit(1);
        }
    }
}

fn cmd_score(args: &[String]) {
    let mut common = CommonOpts::default();
    let mut show_frames = false;
    let mut rolls: Vec<Pins> = Vec::new();

    let mut i = 0usize;
    while i < args.len() {
        if let Some(used) = common.take(args, i) {
            i += used;
            continue;
        }
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"bowl score

USAGE:
    bowl score [--frames] [--config PATH] [--log PATH] <PINS>...

Scores a complete game given ball by ball. Values may be separate
arguments or comma-separated, and must include 10th-frame bonus balls
(two after a strike, one after a spare).

OPTIONS:
    --frames    Also print the frame-by-frame score sheet
"#
                );
                return;
            }
            "--frames" => {
                show_frames = true;
                i += 1;
            }
            other => {
                for token in other.split(',').map(str::trim).filter(|t| !t.is_empty()) {
                    rolls.push(parse_pins_arg(token));
                }
                i += 1;
            }
        }
    }

    if rolls.is_empty() {
        eprintln!("No rolls given. Run `bowl score --help` for usage.");
        process::exit(1);
    }

    let (cfg, config_hash) = common.load_config();
    let mut events = common.open_events();
    events.emit(&GameStartedEventV1::new("rules", config_hash));

    // Ball-by-ball input carries its own bonus count, so replay with the rules policy.
    let game = Game::replay(BonusPolicy::Rules, &rolls).unwrap_or_else(|e| {
        eprintln!("Invalid game: {e}");
        process::exit(1);
    });
    let (Some(score), Some(frames)) = (game.score(), game.frame_scores()) else {
        eprintln!("Invalid game: incomplete");
        process::exit(1);
    };

    if show_frames {
        for f in &frames {
            let kind = match f.kind {
                FrameKind::Strike => "strike",
                FrameKind::Spare => "spare",
                FrameKind::Open => "open",
            };
            println!(
                "Frame {:>2}: {:<6} pins {:>2}  bonus {:>2}  total {:>3}",
                f.frame, kind, f.pins, f.bonus, f.running_total
            );
        }
    }
    for line in GameReport::new(score, &cfg.report).lines() {
        println!("{line}");
    }

    events.emit(&GameCompletedEventV1::new(
        score,
        rolls,
        frames.iter().map(|f| f.running_total).collect(),
    ));
    events.flush();
}

fn parse_pins_arg(token: &str) -> Pins {
    match token.parse::<u8>() {
        Ok(p) if p <= PINS_PER_FRAME => p,
        _ => {
            eprintln!("Invalid roll value: {token} (expected 0-{PINS_PER_FRAME})");
            process::exit(1);
        }
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let Some(cmd) = args.get(1) else {
        cmd_play(&[]);
        return;
    };

    match cmd.as_str() {
        "-h" | "--help" | "help" => print_help(),
        "-V" | "--version" => print_version(),
        "play" => cmd_play(&args[2..]),
        "score" => cmd_score(&args[2..]),
        flag if flag.starts_with("--") => cmd_play(&args[1..]),
        other => {
            eprintln!("Unknown command: {}", other);
            eprintln!("Run `bowl --help` for usage.");
            process::exit(1);
        }
    }
}
