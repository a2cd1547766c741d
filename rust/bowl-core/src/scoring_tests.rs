#[cfg(test)]
mod tests {
    use crate::{
        compute_score, frame_scores, score_rolls, BonusPolicy, FrameEntry, FrameKind, Game,
        RollLog, MAX_SCORE,
    };

    fn log(rolls: &[u8]) -> RollLog {
        RollLog::from(rolls)
    }

    fn with_zeros(prefix: &[u8], total_len: usize) -> Vec<u8> {
        let mut v = prefix.to_vec();
        v.resize(total_len, 0);
        v
    }

    #[test]
    fn gutter_game_scores_zero() {
        assert_eq!(score_rolls(&[0; 20]), 0);
    }

    #[test]
    fn all_ones_scores_twenty() {
        assert_eq!(score_rolls(&[1; 20]), 20);
    }

    #[test]
    fn one_spare_counts_next_roll() {
        // 5,5 | 3,0 | eight frames of 0
        let rolls = with_zeros(&[5, 5, 3], 20);
        assert_eq!(score_rolls(&rolls), 10 + 3 + 3);
    }

    #[test]
    fn one_strike_counts_next_two_rolls() {
        // X | 3,4 | eight frames of 0
        let rolls = with_zeros(&[10, 3, 4], 19);
        assert_eq!(score_rolls(&rolls), 10 + 3 + 4 + 3 + 4);
    }

    #[test]
    fn perfect_game_is_300() {
        assert_eq!(score_rolls(&[10; 12]), MAX_SCORE);
    }

    #[test]
    fn all_spares_with_five_bonus_is_150() {
        assert_eq!(score_rolls(&[5; 21]), 150);
    }

    #[test]
    fn scoring_is_idempotent() {
        let l = log(&[10, 7, 3, 9, 0, 10, 0, 8, 8, 2, 0, 6, 10, 10, 10, 8, 1]);
        let a = compute_score(&l);
        let b = compute_score(&l);
        assert_eq!(a, b);
        assert_eq!(a, 167);
    }

    #[test]
    fn strike_in_ninth_sees_tenth_frame_rolls() {
        // Frames 1-8 open zeros, frame 9 strike, frame 10 = 10, 10 + bonus 10.
        let mut rolls = vec![0u8; 16];
        rolls.extend_from_slice(&[10, 10, 10, 10]);
        let frames = frame_scores(&log(&rolls));

        assert_eq!(frames[8].kind, FrameKind::Strike);
        assert_eq!(frames[8].bonus, 20);
        assert_eq!(frames[9].kind, FrameKind::Strike);
        assert_eq!(frames[9].pins, 10);
        assert_eq!(frames[9].bonus, 20);
        assert_eq!(score_rolls(&rolls), 30 + 30);
    }

    #[test]
    fn strike_in_ninth_with_open_tenth() {
        // Frame 9 strike, frame 10 = 3,4: both count for frame 9's bonus and frame 10's base.
        let mut rolls = vec![0u8; 16];
        rolls.extend_from_slice(&[10, 3, 4]);
        let frames = frame_scores(&log(&rolls));

        assert_eq!(frames[8].total(), 17);
        assert_eq!(frames[9].kind, FrameKind::Open);
        assert_eq!(frames[9].total(), 7);
        assert_eq!(score_rolls(&rolls), 24);
    }

    #[test]
    fn tenth_frame_spare_uses_single_bonus_ball() {
        let mut rolls = vec![0u8; 18];
        rolls.extend_from_slice(&[6, 4, 7]);
        assert_eq!(score_rolls(&rolls), 17);

        // A second trailing bonus entry (legacy prompt) is never read.
        rolls.push(2);
        assert_eq!(score_rolls(&rolls), 17);
    }

    #[test]
    fn breakdown_running_total_matches_engine() {
        let l = log(&[10, 7, 3, 9, 0, 10, 0, 8, 8, 2, 0, 6, 10, 10, 10, 8, 1]);
        let frames = frame_scores(&l);
        assert_eq!(frames.len(), 10);
        assert_eq!(
            frames.iter().map(|f| f.running_total).collect::<Vec<_>>(),
            vec![20, 39, 48, 66, 74, 84, 90, 120, 148, 167]
        );
        assert_eq!(frames[9].running_total, compute_score(&l));
        assert_eq!(frames[1].kind, FrameKind::Spare);
        assert_eq!(frames[1].first_roll, 1);
    }

    #[test]
    fn partial_log_never_panics() {
        assert_eq!(score_rolls(&[]), 0);
        assert_eq!(score_rolls(&[7]), 7);
        assert_eq!(score_rolls(&[10]), 10);
        assert_eq!(score_rolls(&[10, 10]), 30);
        assert_eq!(score_rolls(&[5, 5]), 10);
    }

    /// Deterministic xorshift64 so the property test needs no rand dependency.
    fn next(x: &mut u64) -> u64 {
        *x ^= *x << 13;
        *x ^= *x >> 7;
        *x ^= *x << 17;
        *x
    }

    fn random_game(seed: u64) -> Game {
        let mut x = seed | 1;
        let mut game = Game::new(BonusPolicy::Rules);
        while !game.is_complete() {
            match game.phase() {
                crate::Phase::Frame(_) => {
                    let first = (next(&mut x) % 11) as u8;
                    let entry = if first == 10 {
                        FrameEntry::strike()
                    } else {
                        let second = (next(&mut x) % u64::from(11 - first)) as u8;
                        FrameEntry::new(first, Some(second)).unwrap()
                    };
                    game.record_frame(entry).unwrap();
                }
                crate::Phase::Bonus { balls } => {
                    let first = (next(&mut x) % 11) as u8;
                    let mut v = vec![first];
                    if balls == 2 {
                        let rack = if first == 10 { 11 } else { 11 - first };
                        v.push((next(&mut x) % u64::from(rack)) as u8);
                    }
                    game.record_bonus(&crate::BonusSet::new(v, balls).unwrap())
                        .unwrap();
                }
                crate::Phase::Complete => unreachable!(),
            }
        }
        game
    }

    #[test]
    fn well_formed_games_score_within_bounds() {
        for seed in 0..2_000u64 {
            let game = random_game(seed.wrapping_mul(0x9E37_79B9_7F4A_7C15));
            let score = game.score().unwrap();
            assert!(score <= MAX_SCORE, "score {} for rolls {:?}", score, game.rolls());
            let frames = game.frame_scores().unwrap();
            assert_eq!(frames[9].running_total, score);
        }
    }
}
