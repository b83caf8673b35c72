use std::path::Path;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, InputMode};
use crate::config;
use crate::player::{AudioSink, PlayReport, Player, PlayerError};
use crate::resolver::Resolve;
use crate::ui;

/// Main terminal event loop: draws the UI and handles one discrete user
/// action at a time. Everything, including URL resolution, runs on this
/// thread; the resolver call blocks until it returns.
pub fn run<S: AudioSink>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    player: &mut Player<S>,
    resolver: &dyn Resolve,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app, player, &settings.ui))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, player, resolver) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Handle one key press; returns true when the app should quit.
fn handle_key_event<S: AudioSink>(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    player: &mut Player<S>,
    resolver: &dyn Resolve,
) -> bool {
    if app.input_mode != InputMode::Normal {
        handle_entry_key(key, settings, app, resolver);
        return false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char(' ') | KeyCode::Char('p') => {
            let result = player.toggle(&app.playlist);
            report_outcome(app, result);
        }
        KeyCode::Enter => {
            let result = player.play(&app.playlist);
            report_outcome(app, result);
        }
        KeyCode::Char('s') => {
            player.stop();
            app.set_status("Stopped");
        }
        KeyCode::Char('l') | KeyCode::Right => {
            let result = player.next(&app.playlist);
            report_outcome(app, result);
        }
        KeyCode::Char('h') | KeyCode::Left => {
            let result = player.previous(&app.playlist);
            report_outcome(app, result);
        }
        KeyCode::Up => {
            let step = settings.controls.volume_step_percent;
            player.set_volume(player.volume_percent().saturating_add(step));
        }
        KeyCode::Down => {
            let step = settings.controls.volume_step_percent;
            player.set_volume(player.volume_percent().saturating_sub(step));
        }
        KeyCode::Char('a') => app.begin_local_entry(),
        KeyCode::Char('u') => app.begin_remote_entry(),
        _ => {}
    }

    false
}

/// Key handling while a text entry (path or URL) is open.
fn handle_entry_key(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    resolver: &dyn Resolve,
) {
    match key.code {
        KeyCode::Esc => app.cancel_entry(),
        KeyCode::Backspace => app.pop_input_char(),
        KeyCode::Enter => {
            let mode = app.input_mode;
            let entered = app.take_input();
            let entered = entered.trim();
            if entered.is_empty() {
                return;
            }
            match mode {
                InputMode::LocalPath => {
                    match app.playlist.add_local(Path::new(entered), &settings.library) {
                        Ok(track) => {
                            let added = format!("Added: {}", track.title());
                            app.set_status(added);
                        }
                        Err(err) => app.set_status(err.to_string()),
                    }
                }
                InputMode::RemoteUrl => {
                    // Blocks until yt-dlp returns; the playlist is only
                    // touched on success.
                    match app.playlist.add_remote(entered, resolver) {
                        Ok(track) => {
                            let added = format!("Added: {}", track.title());
                            app.set_status(added);
                        }
                        Err(err) => app.set_status(format!("Cannot add the song: {err}")),
                    }
                }
                InputMode::Normal => {}
            }
        }
        KeyCode::Char(c) if !c.is_control() => app.push_input_char(c),
        _ => {}
    }
}

/// Surface the outcome of a transport intent on the status line.
fn report_outcome(app: &mut App, result: Result<PlayReport, PlayerError>) {
    match result {
        Ok(report) => {
            if let Some(skipped) = report.skipped.last() {
                let title = app
                    .playlist
                    .track_at(skipped.index)
                    .map(|t| t.title().to_string())
                    .unwrap_or_default();
                app.set_status(format!(
                    "Skipped {} unplayable track(s), last: {title} ({})",
                    report.skipped.len(),
                    skipped.error
                ));
            } else if let Some(index) = report.started {
                let title = app
                    .playlist
                    .track_at(index)
                    .map(|t| t.title().to_string());
                if let Some(title) = title {
                    app.set_status(format!("Playing: {title}"));
                }
            }
        }
        Err(err) => app.set_status(err.to_string()),
    }
}
