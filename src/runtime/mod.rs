use std::env;

use anyhow::Context;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::library;
use crate::player::{Player, RodioSink};
use crate::resolver::YtDlp;

mod event_loop;
mod settings;

pub fn run() -> anyhow::Result<()> {
    let settings = settings::load_settings();

    let mut app = App::new();
    let args: Vec<String> = env::args().skip(1).collect();
    for path in library::gather(&args, &settings.library) {
        if let Err(err) = app.playlist.add_local(&path, &settings.library) {
            // Startup arguments are best-effort; the terminal is not in
            // raw mode yet, so stderr is still readable.
            eprintln!("vivace: {err}");
        }
    }

    let sink = RodioSink::new().context("failed to open the audio output device")?;
    let mut player = Player::new(sink, settings.audio.default_volume_percent);
    let resolver = YtDlp::new(&settings.resolver);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app, &mut player, &resolver);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
