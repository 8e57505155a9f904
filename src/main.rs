//! Application entry point

use log::{info, warn};
use std::io::{self, Write};
use std::time::Duration;

mod activity;
mod chart;
mod config;
mod nav;
mod theme;
mod tooltip;
mod ui;

/// Environment variable naming a file to write logs to
const LOG_ENV: &str = "ACTIVITY_DASHBOARD_LOG";

/// Leave the alternate screen and give the terminal back in cooked mode.
fn restore_terminal() {
    let mut stdout = io::stdout();
    let _ = crossterm::execute!(
        stdout,
        crossterm::event::DisableMouseCapture,
        crossterm::event::DisableBracketedPaste,
        crossterm::terminal::LeaveAlternateScreen,
        crossterm::cursor::Show
    );
    let _ = crossterm::terminal::disable_raw_mode();
    let _ = stdout.flush();
}

/// Install panic hook to restore terminal before printing error.
fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        eprintln!("Application panicked!");
        if let Some(location) = panic_info.location() {
            eprintln!("Location: {}", location);
        }
        original_hook(panic_info);
    }));
}

/// Stop every mouse reporting mode, then swallow the reports already in
/// flight so they don't leak into the shell prompt.
fn quiesce_input() {
    let mut stdout = io::stdout();
    let _ = crossterm::execute!(
        stdout,
        crossterm::event::DisableMouseCapture,
        crossterm::event::DisableBracketedPaste
    );
    let _ = stdout.write_all(b"\x1b[?1000l\x1b[?1002l\x1b[?1003l\x1b[?1006l\x1b[?1015l\x1b[?2004l");
    let _ = stdout.flush();

    let silence = Duration::from_millis(100);
    while crossterm::event::poll(silence).unwrap_or(false) {
        let _ = crossterm::event::read();
    }
    flush_stdin_buffer();
}

/// Flush OS-level terminal input buffer.
#[cfg(unix)]
fn flush_stdin_buffer() {
    use std::os::unix::io::AsRawFd;
    unsafe {
        libc::tcflush(io::stdin().as_raw_fd(), libc::TCIFLUSH);
    }
}

#[cfg(not(unix))]
fn flush_stdin_buffer() {}

/// Route `log` output to `$ACTIVITY_DASHBOARD_LOG`. The terminal is owned by the
/// UI, so without that variable logging stays off.
fn init_logging() {
    let Some(path) = std::env::var_os(LOG_ENV) else {
        return;
    };
    match std::fs::File::create(&path) {
        Ok(file) => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        Err(e) => eprintln!("Cannot open log file {:?}: {}", path, e),
    }
}

fn main() -> io::Result<()> {
    setup_panic_hook();
    init_logging();

    let config = config::ShellConfig::load().unwrap_or_else(|e| {
        warn!("{}; using default shell config", e);
        config::ShellConfig::default()
    });
    info!("Starting dashboard for {}", config.username);

    crossterm::execute!(
        io::stdout(),
        crossterm::terminal::EnterAlternateScreen,
        crossterm::event::EnableMouseCapture,
        crossterm::event::EnableBracketedPaste
    )?;
    crossterm::terminal::enable_raw_mode()?;

    let backend = ratatui::backend::CrosstermBackend::new(io::stdout());
    let mut terminal = ratatui::Terminal::new(backend)?;

    let result = ui::App::new(config).run(&mut terminal);

    quiesce_input();
    restore_terminal();

    info!("Dashboard closed");
    result
}
