//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`:
//! header, playlist, volume gauge, status line and the text-entry popup.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Paragraph},
};
use std::time::Duration;

use crate::app::{App, InputMode};
use crate::config::UiSettings;
use crate::player::{AudioSink, PlaybackState, Player};

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    // Keep the popup smaller and avoid covering the entire UI.
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(3);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn state_marker(state: PlaybackState) -> &'static str {
    match state {
        PlaybackState::Playing => "▶ ",
        PlaybackState::Paused => "⏸ ",
        PlaybackState::Stopped => "■ ",
    }
}

fn controls_text() -> &'static str {
    "[space] play/pause | [enter] play | [s] stop | [h/l] prev/next | \
     [up/down] volume | [a] add file | [u] add url | [q] quit"
}

/// Render the entire UI into the provided `frame`.
pub fn draw<S: AudioSink>(
    frame: &mut Frame,
    app: &App,
    player: &Player<S>,
    ui_settings: &UiSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" vivace ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Main area: playlist on the left, volume on the right.
    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(14)])
        .split(chunks[1]);

    let items: Vec<ListItem> = app
        .playlist
        .tracks()
        .iter()
        .enumerate()
        .map(|(i, track)| {
            if i == player.current_index() && app.has_tracks() {
                let marker = state_marker(player.state());
                ListItem::new(format!("{marker}{}", track.title()))
                    .style(Style::default().add_modifier(Modifier::BOLD))
            } else {
                ListItem::new(format!("  {}", track.title()))
            }
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Playlist ({}) ", app.playlist.len())),
    );
    frame.render_widget(list, main[0]);

    let volume = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Volume "))
        .percent(u16::from(player.volume_percent()))
        .label(format!("{}%", player.volume_percent()));
    frame.render_widget(volume, main[1]);

    // Status: the latest message, or the now-playing line.
    let status_text = match &app.status {
        Some(message) => message.clone(),
        None => now_playing_text(app, player),
    };
    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title(" Status "));
    frame.render_widget(status, chunks[2]);

    // Controls help
    let controls = Paragraph::new(controls_text())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(controls, chunks[3]);

    // Text-entry popup on top of everything else.
    let popup_title = match app.input_mode {
        InputMode::Normal => None,
        InputMode::LocalPath => Some(" Add local file (enter to add, esc to cancel) "),
        InputMode::RemoteUrl => Some(" Add URL (enter to resolve, esc to cancel) "),
    };
    if let Some(title) = popup_title {
        let area = centered_rect_sized(64, 3, frame.area());
        let entry = Paragraph::new(format!("> {}", app.input))
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(Clear, area);
        frame.render_widget(entry, area);
    }
}

fn now_playing_text<S: AudioSink>(app: &App, player: &Player<S>) -> String {
    match player.state() {
        PlaybackState::Stopped => "Stopped".to_string(),
        state => {
            let title = app
                .playlist
                .track_at(player.current_index())
                .map(|t| t.title().to_string())
                .unwrap_or_default();
            let verb = match state {
                PlaybackState::Playing => "Playing",
                _ => "Paused",
            };
            format!("{verb}: {title} [{}]", format_mmss(player.position()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_mmss_pads_minutes_and_seconds() {
        assert_eq!(format_mmss(Duration::ZERO), "00:00");
        assert_eq!(format_mmss(Duration::from_secs(65)), "01:05");
        assert_eq!(format_mmss(Duration::from_secs(600)), "10:00");
    }

    #[test]
    fn centered_rect_stays_inside_the_area() {
        let outer = Rect {
            x: 0,
            y: 0,
            width: 80,
            height: 24,
        };
        let inner = centered_rect_sized(64, 3, outer);
        assert!(inner.x + inner.width <= outer.width);
        assert!(inner.y + inner.height <= outer.height);
    }
}
