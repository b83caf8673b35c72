mod app;
mod config;
mod library;
mod player;
mod playlist;
mod resolver;
mod runtime;
mod ui;

fn main() {
    if let Err(err) = runtime::run() {
        // Startup/teardown failures land here; the terminal is out of raw
        // mode by now, so the message is readable.
        eprintln!("vivace: {err:#}");
        std::process::exit(1);
    }
}
