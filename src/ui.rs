//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`, plus
//! the time formatting shared with the status line.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    widgets::{Block, Borders, Clear, Gauge, Padding, Paragraph, Wrap},
};
use std::time::Duration;

use crate::app::App;
use crate::config::{ControlsSettings, TrackDisplayField, UiSettings};
use crate::track::TrackInfo;

const LEFT_PAD: Padding = Padding {
    left: 1,
    right: 0,
    top: 0,
    bottom: 0,
};

/// Format a `Duration` as `MM:SS`.
pub fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Format a `Duration` as `MM:SS.t`, truncating to tenths.
pub fn format_mmss_tenths(d: Duration) -> String {
    let tenths = d.subsec_millis() / 100;
    format!("{}.{}", format_mmss(d), tenths)
}

fn format_time(d: Duration, ui: &UiSettings) -> String {
    if ui.show_tenths {
        format_mmss_tenths(d)
    } else {
        format_mmss(d)
    }
}

/// Format a duration for the metadata popup, rounding partial seconds up.
fn format_duration_mmss_ceil(d: Duration) -> String {
    let mut total_secs = d.as_secs();
    if d.subsec_nanos() > 0 {
        total_secs = total_secs.saturating_add(1);
    }
    format!("{}:{:02} ({}s)", total_secs / 60, total_secs % 60, total_secs)
}

/// Render the controls help text with the configured step sizes.
fn controls_text(controls: &ControlsSettings) -> String {
    [
        "[space/p] play/pause".to_string(),
        "[s] stop".to_string(),
        format!("[ [ / ] ] start -/+{}ms", controls.nudge_ms),
        format!("[ {{ / }} ] end -/+{}ms", controls.nudge_ms),
        format!("[H/L] seek -/+{}s", controls.scrub_seconds),
        format!("[-/+] infinite at -/+{}", controls.threshold_step),
        format!("[9/0] volume -/+{:.0}%", controls.volume_step * 100.0),
        "[r] whole track".to_string(),
        "[o] open".to_string(),
        "[K] metadata".to_string(),
        "[q] quit".to_string(),
    ]
    .join(" | ")
}

/// Build the "now looping" text according to `ui` settings.
fn track_text(track: &TrackInfo, ui: &UiSettings) -> String {
    let non_empty = |s: Option<&str>| {
        s.map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let parts: Vec<String> = ui
        .track_fields
        .iter()
        .filter_map(|f| match f {
            TrackDisplayField::Title => non_empty(Some(track.title.as_str())),
            TrackDisplayField::Artist => non_empty(track.artist.as_deref()),
            TrackDisplayField::Album => non_empty(track.album.as_deref()),
            TrackDisplayField::Filename => {
                non_empty(track.location.file_name().and_then(|s| s.to_str()))
            }
            TrackDisplayField::Path => Some(track.location.display().to_string()),
        })
        .collect();

    if parts.is_empty() {
        track.display()
    } else {
        parts.join(&ui.track_separator)
    }
}

/// Loop counter with its threshold, or ∞ once the counter has frozen.
fn loop_count_text(app: &App) -> String {
    if app.infinite {
        format!("∞ (after {})", app.loop_infinite_count)
    } else {
        format!("{} (∞ at {})", app.loop_count, app.loop_infinite_count)
    }
}

fn status_text(app: &App, ui: &UiSettings) -> String {
    let mut parts = vec![app.playback.label().to_string()];
    match &app.track {
        Some(track) => {
            parts.push(track_text(track, ui));
            if track.cover_art.is_some() {
                parts.push("cover art".to_string());
            }
        }
        None => parts.push("no track".to_string()),
    }
    parts.join(" • ")
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn metadata_text(app: &App) -> String {
    let Some(track) = &app.track else {
        return "No track loaded".to_string();
    };
    format!(
        "Title: {}\nArtist: {}\nAlbum: {}\nDuration: {}\nCover art: {}\nPath: {}",
        track.title,
        track.artist.as_deref().unwrap_or("-"),
        track.album.as_deref().unwrap_or("-"),
        format_duration_mmss_ceil(track.duration),
        if track.cover_art.is_some() { "embedded" } else { "-" },
        track.location.display()
    )
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(frame: &mut Frame, app: &App, ui: &UiSettings, controls: &ControlsSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" perpetual ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let status = Paragraph::new(status_text(app, ui))
        .block(Block::bordered().padding(LEFT_PAD).title(" now looping "))
        .wrap(Wrap { trim: true });
    frame.render_widget(status, chunks[1]);

    let volume = format!("Volume: {:.0}%", app.volume * 100.0);
    let range_text = match app.range {
        Some(range) => format!(
            "Range: {} → {}   Position: {}   Loops: {}   {}",
            format_time(range.start, ui),
            format_time(range.end, ui),
            format_time(app.position, ui),
            loop_count_text(app),
            volume
        ),
        None => format!("Range: -   {volume}"),
    };
    let range_par = Paragraph::new(range_text)
        .block(Block::bordered().padding(LEFT_PAD).title(" loop "))
        .wrap(Wrap { trim: true });
    frame.render_widget(range_par, chunks[2]);

    let gauge = Gauge::default()
        .block(Block::bordered().title(" progress "))
        .gauge_style(Style::default().add_modifier(Modifier::BOLD))
        .ratio(app.loop_progress())
        .label(format!("{:.0}%", app.loop_progress() * 100.0));
    frame.render_widget(gauge, chunks[3]);

    if let Some(err) = &app.last_error {
        let err_par = Paragraph::new(err.as_str())
            .red()
            .block(Block::bordered().padding(LEFT_PAD).title(" error "))
            .wrap(Wrap { trim: true });
        frame.render_widget(err_par, chunks[4]);
    }

    let footer = Paragraph::new(controls_text(controls))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(LEFT_PAD),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[5]);

    // Overlays go last so nothing below draws over them.
    if app.metadata_window {
        let popup_area = centered_rect_sized(72, 10, frame.area());
        frame.render_widget(Clear, popup_area);
        let meta = Paragraph::new(metadata_text(app))
            .block(
                Block::default()
                    .padding(LEFT_PAD)
                    .borders(Borders::ALL)
                    .title(" metadata (K closes) "),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(meta, popup_area);
    }

    if let Some(line) = &app.open_prompt {
        let prompt_area = centered_rect_sized(72, 3, frame.area());
        frame.render_widget(Clear, prompt_area);
        let prompt = Paragraph::new(format!("{line}_")).block(
            Block::bordered()
                .padding(LEFT_PAD)
                .title(" open file (Enter loads, Esc cancels) "),
        );
        frame.render_widget(prompt, prompt_area);
    }
}
