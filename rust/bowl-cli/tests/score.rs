use std::process::Command;

fn bowl_bin() -> String {
    env!("CARGO_BIN_EXE_bowl").to_string()
}

fn score(args: &[&str]) -> std::process::Output {
    Command::new(bowl_bin())
        .arg("score")
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn perfect_game_from_args() {
    let out = score(&["10"; 12]);
    assert!(out.status.success());
    let s = String::from_utf8_lossy(&out.stdout);
    assert!(s.contains("Your game score is: 300 / 300"));
    assert!(s.contains("Advice for improvement: You're doing great!"));
}

#[test]
fn comma_separated_values_and_frames_table() {
    let out = score(&["--frames", "10,7,3,9,0,10,0,8,8,2,0,6,10,10,10,8,1"]);
    assert!(out.status.success());
    let s = String::from_utf8_lossy(&out.stdout);
    assert!(s.contains("Frame  1: strike"));
    assert!(s.contains("Frame  2: spare"));
    assert!(s.contains("total 167"));
    assert!(s.contains("Your game score is: 167 / 300"));
}

#[test]
fn incomplete_game_is_rejected() {
    let out = score(&["10", "10"]);
    assert!(!out.status.success());
    let s = String::from_utf8_lossy(&out.stderr);
    assert!(s.contains("Invalid game"));
}

#[test]
fn out_of_range_value_is_rejected() {
    let out = score(&["11"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Invalid roll value"));
}

#[test]
fn help_runs() {
    let out = score(&["--help"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("bowl score"));
}

#[test]
fn log_flag_writes_started_and_completed_events() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("events.ndjson");
    let cfg = dir.path().join("bowl.yaml");
    std::fs::write(&cfg, "report:\n  reference_average: 180\n").unwrap();

    let mut args = vec![
        "--log",
        log.to_str().unwrap(),
        "--config",
        cfg.to_str().unwrap(),
    ];
    args.extend(["10"; 12]);
    let out = score(&args);
    assert!(out.status.success());

    let events: Vec<serde_json::Value> = std::fs::read_to_string(&log)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["event"], "game_started");
    assert_eq!(events[0]["bonus_policy"], "rules");
    assert_eq!(events[0]["config_hash"].as_str().unwrap().len(), 64);
    assert_eq!(events[1]["event"], "game_completed");
    assert_eq!(events[1]["score"], 300);
}
