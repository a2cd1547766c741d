//! bowl-bench: deterministic game generators shared by the criterion benches.

use bowl_core::{BonusPolicy, BonusSet, FrameEntry, Game, Phase, Pins, RollLog, PINS_PER_FRAME};

/// Simple deterministic xorshift64, no rand dependency.
fn next(x: &mut u64) -> u64 {
    *x ^= *x << 13;
    *x ^= *x >> 7;
    *x ^= *x << 17;
    *x
}

fn pins_upto(x: &mut u64, max: Pins) -> Pins {
    (next(x) % (u64::from(max) + 1)) as Pins
}

/// Generate `n` complete, well-formed roll logs.
pub fn gen_games(n: usize) -> Vec<RollLog> {
    let mut x: u64 = 0x1234_5678_9ABC_DEF0;
    (0..n).map(|_| gen_game(&mut x)).collect()
}

fn gen_game(x: &mut u64) -> RollLog {
    let mut game = Game::new(BonusPolicy::Rules);
    loop {
        let step = match game.phase() {
            Phase::Frame(_) => {
                let first = pins_upto(x, PINS_PER_FRAME);
                let entry = if first == PINS_PER_FRAME {
                    Ok(FrameEntry::strike())
                } else {
                    FrameEntry::new(first, Some(pins_upto(x, PINS_PER_FRAME - first)))
                };
                entry
                    .map_err(Into::into)
                    .and_then(|e| game.record_frame(e).map(|_| ()))
            }
            Phase::Bonus { balls } => {
                let first = pins_upto(x, PINS_PER_FRAME);
                let mut v = vec![first];
                if balls == 2 {
                    let rack = if first == PINS_PER_FRAME {
                        PINS_PER_FRAME
                    } else {
                        PINS_PER_FRAME - first
                    };
                    v.push(pins_upto(x, rack));
                }
                BonusSet::new(v, balls)
                    .map_err(Into::into)
                    .and_then(|b| game.record_bonus(&b))
            }
            Phase::Complete => return game.rolls().clone(),
        };
        // Generated entries are always legal.
        debug_assert!(step.is_ok(), "generator produced an illegal entry: {step:?}");
    }
}
