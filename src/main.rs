// ABOUTME: Main entry point for the notification center TUI application

use std::{
    fs::OpenOptions,
    io,
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use directories::ProjectDirs;
use ratatui::{prelude::*, Terminal};
use tracing::{error, info};

use notification_center::app::{App, EventHandler};
use notification_center::components::LayoutComponent;
use notification_center::config::AppConfig;
use notification_center::models::Severity;

#[derive(Debug, Parser)]
#[command(name = "notification-center", version, about = "Terminal notification list")]
struct Cli {
    /// Path to a config file (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Built-in theme: dark, light or high-contrast
    #[arg(long)]
    theme: Option<String>,

    /// Notification shown at startup, e.g. --notify "error:Disk full"
    #[arg(long = "notify", value_name = "SEVERITY:TEXT", value_parser = parse_notification)]
    notify: Vec<(Severity, String)>,
}

fn parse_notification(value: &str) -> Result<(Severity, String), String> {
    let (severity, text) = value
        .split_once(':')
        .ok_or_else(|| "expected <severity>:<text>".to_string())?;
    Ok((severity.parse()?, text.trim().to_string()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }

    setup_logging(&config.log_filter)?;
    setup_panic_handler();

    let mut app = App::new(config).context("Failed to initialize application")?;
    for (severity, text) in &cli.notify {
        app.state.show(*severity, text);
    }
    let mut layout = LayoutComponent::new();

    run_tui(&mut app, &mut layout)
}

fn run_tui(app: &mut App, layout: &mut LayoutComponent) -> Result<()> {
    if let Err(e) = crossterm::terminal::is_raw_mode_enabled() {
        eprintln!("Cannot check terminal raw mode: {}", e);
        return Err(anyhow::anyhow!("Terminal not compatible: {}", e));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    info!("Notification center started");

    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| {
            layout.render(frame, &mut app.state);
        })?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key_event) = event::read()? {
                if let Some(app_event) = EventHandler::handle_key_event(key_event, &app.state) {
                    EventHandler::process_event(app_event, &mut app.state);
                }
            }
            // Action handlers and theme switches take effect before the next frame
            app.tick();
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }

        if app.state.should_quit {
            break;
        }
    }

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("Notification center stopped");
    Ok(())
}

fn setup_logging(filter: &str) -> Result<()> {
    use tracing_subscriber::prelude::*;

    let log_dir = ProjectDirs::from("dev", "notification-center", "notification-center")
        .map(|dirs| dirs.data_local_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from(".notification-center/logs"));
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let log_file = log_dir.join(format!(
        "notification-center-{}.log",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    ));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .with_context(|| format!("Failed to create log file {}", log_file.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(file)
                .with_ansi(false) // No ANSI colors in log file
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into())
        )
        .init();
    Ok(())
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        // Restore the terminal before reporting
        let _ = disable_raw_mode();
        let _ = execute!(
            std::io::stderr(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );

        error!("Application panicked: {}", panic_info);
        eprintln!("Application panicked: {}", panic_info);
        eprintln!("Please check the logs for more details.");
    }));
}
