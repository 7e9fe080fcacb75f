//! Integration test: headless simulator reports

use dinorun::runner::format_score;
use dinorun::simulator::{run_simulation, SimConfig};
use dinorun::GameConfig;

#[test]
fn test_report_json_matches_runs() {
    let report = run_simulation(&SimConfig::quick(11));
    let value: serde_json::Value =
        serde_json::from_str(&report.to_json()).expect("report should be valid JSON");

    assert_eq!(value["num_runs"], 5);
    assert_eq!(value["runs"].as_array().map(Vec::len), Some(5));
    assert_eq!(value["spawn_histogram"].as_array().map(Vec::len), Some(7));
    assert_eq!(value["high_score"], report.high_score);
    assert!(value["generated_at"].is_string());
}

#[test]
fn test_histogram_counts_every_spawn() {
    let report = run_simulation(&SimConfig::quick(12));
    let per_run: u64 = report.runs.iter().map(|r| r.obstacles_spawned).sum();
    assert_eq!(report.total_spawns(), per_run);
    assert!(report.best_score >= report.high_score);
}

#[test]
fn test_custom_game_config_is_used() {
    let game = GameConfig::from_json(r#"{ "initial_speed": 20.0 }"#).expect("valid config");
    let config = SimConfig {
        game,
        fumble_chance: 1.0,
        ..SimConfig::quick(13)
    };
    let fast = run_simulation(&config);
    let normal = run_simulation(&SimConfig {
        fumble_chance: 1.0,
        ..SimConfig::quick(13)
    });

    // Obstacles arrive sooner at the higher starting speed
    assert!(fast.avg_frames < normal.avg_frames);
}

#[test]
fn test_text_report_mentions_scores() {
    let report = run_simulation(&SimConfig::quick(14));
    let text = report.to_text();

    let best_line = text
        .lines()
        .find(|line| line.trim_start().starts_with("Best:"))
        .expect("report should have a Best line");
    assert!(best_line.ends_with(&format_score(report.best_score)));

    let high_line = text
        .lines()
        .find(|line| line.trim_start().starts_with("High score:"))
        .expect("report should have a High score line");
    assert!(high_line.ends_with(&format_score(report.high_score)));
}
