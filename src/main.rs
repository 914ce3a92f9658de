use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use spotimini::app::cli::Args;
use spotimini::app::config::{AppConfig, UserConfig, TOKEN_ENV};
use spotimini::app::events::AppEvent;
use spotimini::app::inputs::{self, Action};
use spotimini::app::{tasks, App};
use spotimini::artwork::ArtworkFetcher;
use spotimini::icons::IconProvider;
use spotimini::player::{Dispatcher, Poller, SpotifyApi, WebApiClient};
use spotimini::ui;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const UI_TICK: Duration = Duration::from_millis(100);

fn init_logging(level: &str) -> Result<WorkerGuard> {
    let log_dir = AppConfig::get_log_dir();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("creating log directory {}", log_dir.display()))?;

    let appender = tracing_appender::rolling::daily(&log_dir, "spotimini.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    // Quiet the HTTP stack unless RUST_LOG asks for it
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},hyper_util=warn,reqwest=warn", level)));

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_env_filter(filter)
        .with_ansi(false)
        .init();

    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    human_panic::setup_panic!();

    let args = Args::parse();

    if args.generate_config {
        println!("{}", toml::to_string_pretty(&UserConfig::default())?);
        return Ok(());
    }

    let config = AppConfig::resolve(AppConfig::load(), std::env::var(TOKEN_ENV).ok(), &args);
    let _log_guard = init_logging(&config.log_level)?;
    info!("spotimini {} starting", env!("CARGO_PKG_VERSION"));

    if config.access_token.is_empty() {
        warn!(
            "No access token; set {} or pass --token. Every poll will fail.",
            TOKEN_ENV
        );
    }

    // The blocking client owns its own runtime; build it off the async workers
    let (token, base_url) = (config.access_token.clone(), config.api_base_url.clone());
    let client = tokio::task::spawn_blocking(move || WebApiClient::new(&token, &base_url))
        .await?
        .context("building the Web API client")?;
    let api: Arc<dyn SpotifyApi> = Arc::new(client);

    let poller = Arc::new(Poller::new(api.clone(), config.recent_limit));
    let dispatcher = Arc::new(Dispatcher::new(api, poller.clone()));

    let (tx, mut rx) = mpsc::channel(100);

    let http = reqwest::Client::builder()
        .user_agent(concat!("spotimini/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(10))
        .build()?;
    let fetcher = ArtworkFetcher::new(http);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&config);

    tasks::spawn_input_reader(tx.clone());
    tasks::spawn_poll_ticker(
        poller.clone(),
        Duration::from_millis(config.poll_interval_ms),
        tx.clone(),
    );
    tasks::spawn_recent_refresh(poller.clone(), tx.clone());
    let (intents, _worker) = tasks::spawn_command_worker(dispatcher, tx.clone());
    tasks::spawn_icon_cache(
        IconProvider::new(IconProvider::default_dir(), config.icons_enabled),
        tx.clone(),
    );
    tasks::spawn_ui_tick(tx.clone(), UI_TICK);

    let result = async {
        loop {
            terminal.draw(|f| ui::ui(f, &mut app))?;

            let Some(event) = rx.recv().await else {
                break;
            };

            let art = match event {
                AppEvent::Input(Event::Key(key)) => {
                    match inputs::handle_key(key, &mut app) {
                        Action::Quit => app.is_running = false,
                        Action::Dispatch(intent) => match intents.try_send(intent.clone()) {
                            Ok(()) => app.on_queued(&intent),
                            Err(_) => {
                                warn!("Command queue full, dropping {:?}", intent);
                                app.show_toast("⏳ Busy, try again");
                            }
                        },
                        Action::RefreshRecent => {
                            tasks::spawn_recent_refresh(poller.clone(), tx.clone());
                        }
                        Action::None => {}
                    }
                    None
                }
                AppEvent::Input(_) => None,
                AppEvent::Poll(outcome) => app.apply_poll(outcome),
                AppEvent::Command(result) => app.apply_dispatch(result),
                AppEvent::RecentUpdate(result) => {
                    app.apply_recent(result);
                    None
                }
                AppEvent::ArtworkUpdate(url, state) => {
                    app.apply_artwork(&url, state);
                    None
                }
                AppEvent::LogoUpdate(img) => {
                    app.logo = Some(img);
                    None
                }
                AppEvent::Tick => {
                    app.on_tick();
                    None
                }
            };

            if let Some(url) = art {
                tasks::spawn_artwork_fetch(fetcher.clone(), url, tx.clone());
            }

            if !app.is_running {
                break;
            }
        }
        Ok::<(), anyhow::Error>(())
    }
    .await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("spotimini exiting");
    result
}
