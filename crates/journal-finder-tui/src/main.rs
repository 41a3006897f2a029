use std::io;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use ratatui::Terminal;
use ratatui::crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    Event,
};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::CrosstermBackend;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use journal_finder_core::{Config, ENDPOINT_ENV, LlmModel, config_file};

mod action;
mod app;
mod backend;
mod input;
mod model;
mod theme;
mod tui_event;
mod view;

use app::App;

/// Journal Finder TUI: rank journals for a paper abstract from the terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Ranking service endpoint (overrides JOURNAL_FINDER_ENDPOINT and config)
    #[arg(long)]
    endpoint: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Initial ranking model (faiss, gemini-pro, groq, mixtral, openai)
    #[arg(long)]
    model: Option<LlmModel>,

    /// Color theme: blue (default) or mono
    #[arg(long)]
    theme: Option<String>,
}

/// Route logs to a file in the cache directory; the terminal belongs to the UI.
fn init_logging() -> Option<WorkerGuard> {
    let dir = dirs::cache_dir()?.join("journal-finder");
    std::fs::create_dir_all(&dir).ok()?;
    let appender = tracing_appender::rolling::never(&dir, "journal-finder-tui.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "journal_finder_core=info,journal_finder_tui=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .init();
    Some(guard)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    let _log_guard = init_logging();

    // Resolve config from CLI flags > env vars > config file > defaults
    let file = config_file::load_config();
    let endpoint = args
        .endpoint
        .or_else(|| std::env::var(ENDPOINT_ENV).ok());
    let mut config = Config::from_file(&file).with_overrides(endpoint, args.timeout);
    if let Some(model) = args.model {
        config.defaults.llm_model = model;
    }

    let theme_name = args
        .theme
        .or_else(|| file.display.as_ref().and_then(|d| d.theme.clone()))
        .unwrap_or_else(|| "blue".to_string());
    let theme = theme::Theme::from_name(&theme_name);

    let service = backend::build_service(&config)?;
    tracing::info!(endpoint = %config.endpoint, timeout_secs = config.timeout_secs, "starting");

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;

    // Install panic hook that restores terminal before printing panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableBracketedPaste
        );
        original_hook(panic_info);
    }));

    let backend_terminal = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend_terminal)?;

    // Drain any stray input events (e.g. Enter keypress from launching the command)
    while event::poll(Duration::from_millis(50)).unwrap_or(false) {
        let _ = event::read();
    }

    let mut app = App::new(theme, &config.defaults);
    app.endpoint = config.endpoint.clone();

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel::<tui_event::BackendCommand>();
    let cancel = CancellationToken::new();

    app.backend_cmd_tx = Some(cmd_tx);

    // Spawn backend command listener. Each search runs in its own task so a
    // slow request never blocks a newer one.
    let service_for_backend = Arc::clone(&service);
    tokio::spawn(async move {
        while let Some(cmd) = cmd_rx.recv().await {
            match cmd {
                tui_event::BackendCommand::Search(ticket) => {
                    let service = Arc::clone(&service_for_backend);
                    let tx = event_tx.clone();
                    tokio::spawn(backend::run_search(service, ticket, tx));
                }
            }
        }
    });

    // Also handle Ctrl+C at the OS level for clean shutdown
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel_for_signal.cancel();
        }
    });

    // Main event loop
    let tick_rate = Duration::from_millis(100);

    loop {
        terminal.draw(|f| app.view(f))?;

        tokio::select! {
            maybe_event = event_rx.recv() => {
                if let Some(backend_event) = maybe_event {
                    app.handle_backend_event(backend_event);
                    // Drain any additional queued backend events
                    while let Ok(evt) = event_rx.try_recv() {
                        app.handle_backend_event(evt);
                    }
                }
            }
            _ = cancel.cancelled() => {
                app.should_quit = true;
            }
            // Terminal input events
            _ = async {
                if event::poll(tick_rate).unwrap_or(false)
                    && let Ok(evt) = event::read()
                {
                    if let Event::Paste(text) = &evt {
                        app.paste(text);
                    } else {
                        let action = input::map_event(&evt, &app.input_mode);
                        app.update(action);
                    }
                }
            } => {}
        }

        app.update(action::Action::Tick);

        if app.should_quit {
            cancel.cancel();
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;

    Ok(())
}
