//! Dino Run scene rendering.
//!
//! Uses a cell buffer for per-character color control. Clouds, ground,
//! obstacles and the runner are scaled from world units into a 2D grid and
//! then stamped row-by-row as Paragraph widgets.

use super::layout::{render_cue_lines, render_overlay, render_side_panel, split_screen};
use dinorun::core::constants::{CLOUD_HEIGHT, PLAYER_WIDTH};
use dinorun::core::Session;
use dinorun::runner::{format_score, ObstacleKind, Phase, Posture, RunnerGame};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

// ── Ground rendering ────────────────────────────────────────────────
const GROUND_PATTERN: [char; 8] = ['▔', '▔', '_', '▔', '▔', '.', '▔', '▔'];
/// World units per ground pattern character.
const GROUND_TILE_UNITS: f64 = 20.0;

const INK: Color = Color::Rgb(83, 83, 83);

/// Cell in the render buffer with foreground color.
#[derive(Clone, Copy)]
struct Cell {
    ch: char,
    fg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
        }
    }
}

/// World-to-cell mapping for the current play field size.
struct Projection {
    x_scale: f64,
    y_scale: f64,
    width: usize,
    height: usize,
}

impl Projection {
    fn col(&self, x: f64) -> i32 {
        (x * self.x_scale).floor() as i32
    }

    fn row(&self, y: f64) -> i32 {
        (y * self.y_scale).floor() as i32
    }

    /// Fill the world rectangle [left, right) x [top, bottom) with `cell`.
    fn fill(
        &self,
        buffer: &mut [Vec<Cell>],
        left: f64,
        top: f64,
        right: f64,
        bottom: f64,
        cell: Cell,
    ) {
        let c0 = self.col(left).max(0);
        let c1 = self.col(right).max(c0 + 1).min(self.width as i32);
        let r0 = self.row(top).max(0);
        let r1 = self.row(bottom).max(r0 + 1).min(self.height as i32);
        for row in r0..r1 {
            for col in c0..c1 {
                buffer[row as usize][col as usize] = cell;
            }
        }
    }
}

/// Render the full Dino Run scene.
pub fn render_runner_scene(
    frame: &mut Frame,
    area: Rect,
    game: &RunnerGame,
    session: &Session,
    status: Option<&str>,
) {
    let areas = split_screen(frame, area, " Dino Run ", Color::Gray);

    render_play_field(frame, areas.field, game, session);

    match game.phase {
        Phase::Idle => render_overlay(
            frame,
            areas.field,
            "DINO RUN",
            Color::White,
            &["[Space/Up] Jump to start".to_string()],
        ),
        Phase::GameOver if game.overlay_visible => render_overlay(
            frame,
            areas.field,
            "G A M E   O V E R",
            Color::LightRed,
            &[
                format!(
                    "Score {}  Best {}",
                    format_score(session.last_run_score.unwrap_or(0)),
                    format_score(session.high_score.value)
                ),
                "[Enter/R] Restart".to_string(),
            ],
        ),
        _ => {}
    }

    render_cue_content(frame, areas.cues, game, status);
    render_run_panel(frame, areas.side_panel, game, session);
}

fn render_play_field(frame: &mut Frame, area: Rect, game: &RunnerGame, session: &Session) {
    if area.height < 4 || area.width < 10 {
        return;
    }

    let config = &game.config;
    let proj = Projection {
        x_scale: area.width as f64 / config.viewport_width,
        y_scale: area.height as f64 / config.viewport_height,
        width: area.width as usize,
        height: area.height as usize,
    };
    let mut buffer = vec![vec![Cell::default(); proj.width]; proj.height];

    // ── Clouds ────────────────────────────────────────────────────────
    if game.decorations_visible {
        let cloud = Cell {
            ch: '~',
            fg: Color::Rgb(170, 170, 170),
        };
        for decoration in &game.decorations {
            let half = decoration.width / 2.0;
            proj.fill(
                &mut buffer,
                decoration.x - half,
                decoration.y - CLOUD_HEIGHT / 2.0,
                decoration.x + half,
                decoration.y + CLOUD_HEIGHT / 2.0,
                cloud,
            );
        }
    }

    // ── Ground (bottom row, only as wide as it has been revealed) ─────
    let ground_row = proj.height - 1;
    let ground_cols = proj.col(game.ground.width).clamp(0, proj.width as i32) as usize;
    for (col, cell) in buffer[ground_row].iter_mut().enumerate().take(ground_cols) {
        let world_x = col as f64 / proj.x_scale + game.ground.tile_offset;
        let index = (world_x / GROUND_TILE_UNITS) as usize % GROUND_PATTERN.len();
        *cell = Cell {
            ch: GROUND_PATTERN[index],
            fg: INK,
        };
    }

    // ── Obstacles ─────────────────────────────────────────────────────
    let wing_up = !game.frozen && (game.frame_count / 10) % 2 == 0;
    for obstacle in game.obstacles.iter().filter(|o| o.alive) {
        let (ch, fg) = match obstacle.kind {
            ObstacleKind::Ground(variant) if variant <= 3 => ('|', Color::Rgb(60, 140, 60)),
            ObstacleKind::Ground(_) => ('║', Color::Rgb(50, 120, 50)),
            ObstacleKind::Flying if wing_up => ('^', Color::Rgb(160, 80, 160)),
            ObstacleKind::Flying => ('v', Color::Rgb(160, 80, 160)),
        };
        proj.fill(
            &mut buffer,
            obstacle.x,
            obstacle.feet_y - obstacle.height(),
            obstacle.right(),
            obstacle.feet_y,
            Cell { ch, fg },
        );
    }

    // ── Runner ────────────────────────────────────────────────────────
    let player = &game.player;
    let top = player.hitbox().top;
    let (ch, fg) = match player.posture {
        Posture::Hurt => ('X', Color::LightRed),
        Posture::Ducking => ('▄', INK),
        Posture::Running if (game.frame_count / 6) % 2 == 0 => ('▛', INK),
        Posture::Running => ('▜', INK),
        Posture::Idle | Posture::Airborne => ('█', INK),
    };
    proj.fill(
        &mut buffer,
        player.x,
        top,
        player.x + PLAYER_WIDTH,
        player.feet_y,
        Cell { ch, fg },
    );

    // ── Score line (top-right): "HI 00120 00042" ──────────────────────
    let mut score_text = String::new();
    if session.runs_completed > 0 {
        score_text.push_str(&format!("HI {} ", format_score(session.high_score.value)));
    }
    if game.score_alpha() >= 0.5 {
        let shown = if game.phase == Phase::GameOver {
            session.last_run_score.unwrap_or(0)
        } else {
            game.run.score
        };
        score_text.push_str(&format_score(shown));
    }
    let start = proj.width.saturating_sub(score_text.chars().count() + 1);
    for (i, ch) in score_text.chars().enumerate() {
        if let Some(cell) = buffer[0].get_mut(start + i) {
            *cell = Cell {
                ch,
                fg: Color::White,
            };
        }
    }

    // ── Render buffer to terminal ─────────────────────────────────────
    for (row_idx, row_data) in buffer.iter().enumerate() {
        let mut spans: Vec<Span> = Vec::new();
        let mut current_fg = Color::Reset;
        let mut current_text = String::new();

        for cell in row_data {
            if cell.fg != current_fg && !current_text.is_empty() {
                spans.push(Span::styled(
                    std::mem::take(&mut current_text),
                    Style::default().fg(current_fg),
                ));
            }
            current_fg = cell.fg;
            current_text.push(cell.ch);
        }
        if !current_text.is_empty() {
            spans.push(Span::styled(current_text, Style::default().fg(current_fg)));
        }

        let row_area = Rect::new(area.x, area.y + row_idx as u16, area.width, 1);
        frame.render_widget(Paragraph::new(Line::from(spans)), row_area);
    }
}

fn render_cue_content(
    frame: &mut Frame,
    area: Rect,
    game: &RunnerGame,
    status: Option<&str>,
) {
    let (default_cue, keys): (&str, &[(&str, &str)]) = match game.phase {
        Phase::Idle => ("Ready", &[("[Space/Up]", "Jump"), ("[Esc]", "Quit")]),
        Phase::Starting => ("Get ready...", &[("[Esc]", "Quit")]),
        Phase::Running => (
            "Run!",
            &[("[Space/Up]", "Jump"), ("[Down]", "Duck"), ("[Esc]", "Quit")],
        ),
        Phase::GameOver => ("Game over", &[("[Enter/R]", "Restart"), ("[Esc]", "Quit")]),
    };
    render_cue_lines(
        frame,
        area,
        status.unwrap_or(default_cue),
        Color::White,
        keys,
    );
}

fn render_run_panel(frame: &mut Frame, area: Rect, game: &RunnerGame, session: &Session) {
    let inner = render_side_panel(frame, area);
    let label = Style::default().fg(Color::DarkGray);

    let lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(
                format_score(game.run.score),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Best:  ", label),
            Span::styled(
                format_score(session.high_score.value),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Speed: ", label),
            Span::styled(
                format!("{:.2}", game.run.speed),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(vec![
            Span::styled("Runs:  ", label),
            Span::styled(
                session.runs_completed.to_string(),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Legend:",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(" █ ", Style::default().fg(Color::Gray)),
            Span::styled("Runner", label),
        ]),
        Line::from(vec![
            Span::styled(" | ", Style::default().fg(Color::Rgb(60, 140, 60))),
            Span::styled("Cactus", label),
        ]),
        Line::from(vec![
            Span::styled(" ^ ", Style::default().fg(Color::Rgb(160, 80, 160))),
            Span::styled("Bird", label),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}
