//! Screen layout for the runner: play field, cue lines, side panel and overlays.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Minimum play field rows.
const FIELD_MIN_HEIGHT: u16 = 10;
const SIDE_PANEL_WIDTH: u16 = 22;
const CUE_LINES: u16 = 2;
const OVERLAY_MAX_WIDTH: u16 = 40;

/// Areas returned by `split_screen`.
pub struct ScreenAreas {
    /// Scaled world view, top left inside the outer border
    pub field: Rect,
    /// Cue message and key hints, under the field
    pub cues: Rect,
    /// Run statistics, right side with its own border
    pub side_panel: Rect,
}

/// Draw the outer border and split the screen.
///
/// ```text
/// ┌─ Dino Run ──────────────────────┬─ Run ───────┐
/// │                                 │             │
/// │   [play field]                  │  [stats]    │
/// │                                 │             │
/// │ [cue line + key hints]          │             │
/// └─────────────────────────────────┴─────────────┘
/// ```
///
/// # Arguments
/// * `frame` - The frame to render to
/// * `area` - The whole terminal area
/// * `title` - Title on the outer border, padded with spaces
/// * `border_color` - Color of the outer border
pub fn split_screen(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    border_color: Color,
) -> ScreenAreas {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(SIDE_PANEL_WIDTH)])
        .split(inner);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(FIELD_MIN_HEIGHT),
            Constraint::Length(CUE_LINES),
        ])
        .split(columns[0]);

    ScreenAreas {
        field: rows[0],
        cues: rows[1],
        side_panel: columns[1],
    }
}

/// Render the latest cue on the first line and key hints on the second.
///
/// # Arguments
/// * `frame` - The frame to render to
/// * `area` - The cue area from `split_screen`
/// * `cue` - Cue message, e.g. "Run!" or "Crashed at 00042"
/// * `cue_color` - Color of the cue message
/// * `keys` - (key, action) pairs, e.g. `[("[Space/Up]", "Jump"), ("[Esc]", "Quit")]`
pub fn render_cue_lines(
    frame: &mut Frame,
    area: Rect,
    cue: &str,
    cue_color: Color,
    keys: &[(&str, &str)],
) {
    if area.height < 1 {
        return;
    }

    let cue_line = Paragraph::new(cue)
        .style(Style::default().fg(cue_color))
        .alignment(Alignment::Center);
    frame.render_widget(cue_line, Rect { height: 1, ..area });

    if area.height < 2 || keys.is_empty() {
        return;
    }

    let mut spans = Vec::new();
    for (i, (key, action)) in keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(*key, Style::default().fg(Color::White)));
        spans.push(Span::styled(
            format!(" {}", action),
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        Rect {
            y: area.y + 1,
            height: 1,
            ..area
        },
    );
}

/// Render the side panel border titled " Run " and return its inner area.
pub fn render_side_panel(frame: &mut Frame, area: Rect) -> Rect {
    let block = Block::default()
        .title(" Run ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// Render a bordered overlay in the middle of the play field, leaving the
/// world around it visible. Used for the start prompt and the game-over card.
///
/// # Arguments
/// * `frame` - The frame to render to
/// * `field` - The play field area
/// * `heading` - Bold first line, e.g. "G A M E   O V E R"
/// * `accent` - Color of the heading and border
/// * `lines` - Dimmed lines under the heading
pub fn render_overlay(
    frame: &mut Frame,
    field: Rect,
    heading: &str,
    accent: Color,
    lines: &[String],
) {
    let width = field.width.min(OVERLAY_MAX_WIDTH);
    let height = (lines.len() as u16 + 3).min(field.height);
    if width < 10 || height < 3 {
        return;
    }

    let card = Rect {
        x: field.x + (field.width - width) / 2,
        y: field.y + (field.height - height) / 2,
        width,
        height,
    };
    frame.render_widget(Clear, card);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent));
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let mut text = vec![Line::from(Span::styled(
        heading,
        Style::default().fg(accent).add_modifier(Modifier::BOLD),
    ))];
    text.extend(lines.iter().map(|line| {
        Line::from(Span::styled(
            line.as_str(),
            Style::default().fg(Color::DarkGray),
        ))
    }));

    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), inner);
}
