//! Simulation report generation.

use crate::core::constants::OBSTACLE_CATEGORIES;
use crate::runner::format_score;
use serde::Serialize;

/// Outcome of a single simulated run.
#[derive(Debug, Clone, Serialize)]
pub struct RunRecord {
    pub score: u32,
    pub frames: u64,
    /// True if the run hit the frame cap instead of crashing.
    pub timed_out: bool,
    pub obstacles_spawned: u64,
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub generated_at: String,
    pub num_runs: u32,
    pub runs_timed_out: u32,
    pub avg_score: f64,
    pub best_score: u32,
    /// Session high score after all runs (crashed runs only).
    pub high_score: u32,
    pub avg_frames: f64,
    /// Spawn counts by category (index 0 = ground variant 1, index 6 = flyer).
    pub spawn_histogram: Vec<u64>,
    pub runs: Vec<RunRecord>,
}

impl SimReport {
    pub fn from_runs(runs: Vec<RunRecord>, spawn_histogram: Vec<u64>, high_score: u32) -> Self {
        let num_runs = runs.len() as u32;
        let divisor = num_runs.max(1) as f64;
        let runs_timed_out = runs.iter().filter(|r| r.timed_out).count() as u32;
        let avg_score = runs.iter().map(|r| r.score as f64).sum::<f64>() / divisor;
        let best_score = runs.iter().map(|r| r.score).max().unwrap_or(0);
        let avg_frames = runs.iter().map(|r| r.frames as f64).sum::<f64>() / divisor;

        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            num_runs,
            runs_timed_out,
            avg_score,
            best_score,
            high_score,
            avg_frames,
            spawn_histogram,
            runs,
        }
    }

    pub fn total_spawns(&self) -> u64 {
        self.spawn_histogram.iter().sum()
    }

    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} timed out\n\n",
            self.num_runs, self.runs_timed_out
        ));

        report.push_str("── Scores ─────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Average:     {:.1}\n", self.avg_score));
        report.push_str(&format!("  Best:        {}\n", format_score(self.best_score)));
        report.push_str(&format!("  High score:  {}\n", format_score(self.high_score)));
        report.push_str(&format!(
            "  Avg length:  {:.1}s\n\n",
            self.avg_frames / 60.0
        ));

        report.push_str("── Spawns ─────────────────────────────────────────────────────\n");
        let total = self.total_spawns().max(1) as f64;
        for (index, count) in self.spawn_histogram.iter().enumerate() {
            let category = index as u8 + 1;
            let label = if category == OBSTACLE_CATEGORIES {
                "flyer   ".to_string()
            } else {
                format!("ground {}", category)
            };
            report.push_str(&format!(
                "  {}  {:>7}  ({:>5.1}%)\n",
                label,
                count,
                *count as f64 / total * 100.0
            ));
        }

        report
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
