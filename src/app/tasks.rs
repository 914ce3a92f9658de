//! Background tasks feeding the UI loop. Blocking API calls run on the
//! blocking pool and come back as [`AppEvent`]s.

use crate::app::events::AppEvent;
use crate::app::ArtworkState;
use crate::artwork::ArtworkFetcher;
use crate::icons::{Icon, IconProvider};
use crate::player::{Dispatcher, Intent, Poller};
use crossterm::event::EventStream;
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Queued commands beyond the one being executed
const COMMAND_QUEUE: usize = 8;

pub fn spawn_input_reader(tx: mpsc::Sender<AppEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        while let Some(Ok(event)) = reader.next().await {
            if tx.send(AppEvent::Input(event)).await.is_err() {
                break;
            }
        }
    })
}

pub fn spawn_ui_tick(tx: mpsc::Sender<AppEvent>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            if tx.send(AppEvent::Tick).await.is_err() {
                break;
            }
        }
    })
}

/// Start one scheduled poll unless one is still outstanding.
pub fn schedule_poll(poller: &Arc<Poller>, tx: &mpsc::Sender<AppEvent>) -> bool {
    let Some(ticket) = poller.try_begin() else {
        debug!("Previous poll still running, skipping tick");
        return false;
    };

    let poller = poller.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = tokio::task::spawn_blocking(move || poller.poll_sequenced()).await;
        // Free the slot only once the result is on its way
        match result {
            Ok(outcome) => {
                let _ = tx.send(AppEvent::Poll(outcome)).await;
            }
            Err(e) => warn!("Poll task failed: {}", e),
        }
        drop(ticket);
    });
    true
}

pub fn spawn_poll_ticker(
    poller: Arc<Poller>,
    period: Duration,
    tx: mpsc::Sender<AppEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            if tx.is_closed() {
                break;
            }
            schedule_poll(&poller, &tx);
        }
    })
}

pub fn spawn_recent_refresh(poller: Arc<Poller>, tx: mpsc::Sender<AppEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        match tokio::task::spawn_blocking(move || poller.refresh_recent()).await {
            Ok(result) => {
                let _ = tx.send(AppEvent::RecentUpdate(result)).await;
            }
            Err(e) => warn!("Recently played task failed: {}", e),
        }
    })
}

/// Executes intents one at a time, in the order they were queued.
pub fn spawn_command_worker(
    dispatcher: Arc<Dispatcher>,
    tx: mpsc::Sender<AppEvent>,
) -> (mpsc::Sender<Intent>, JoinHandle<()>) {
    let (intent_tx, mut intent_rx) = mpsc::channel::<Intent>(COMMAND_QUEUE);
    let handle = tokio::spawn(async move {
        while let Some(intent) = intent_rx.recv().await {
            let dispatcher = dispatcher.clone();
            let action = intent.action();
            match tokio::task::spawn_blocking(move || dispatcher.dispatch(intent)).await {
                Ok(result) => {
                    if tx.send(AppEvent::Command(result)).await.is_err() {
                        break;
                    }
                }
                Err(e) => warn!("{} task failed: {}", action, e),
            }
        }
    });
    (intent_tx, handle)
}

pub fn spawn_artwork_fetch(
    fetcher: ArtworkFetcher,
    url: String,
    tx: mpsc::Sender<AppEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let state = match fetcher.fetch_image(&url).await {
            Ok(img) => ArtworkState::Loaded(img),
            Err(e) => {
                debug!("Album art unavailable for {}: {}", url, e);
                ArtworkState::Failed
            }
        };
        let _ = tx.send(AppEvent::ArtworkUpdate(url, state)).await;
    })
}

/// Make sure every icon is cached, then hand the header logo to the UI.
pub fn spawn_icon_cache(provider: IconProvider, tx: mpsc::Sender<AppEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let logo = tokio::task::spawn_blocking(move || {
            let cached = provider.ensure_all();
            info!(
                "{}/{} icons available in {}",
                cached,
                Icon::ALL.len(),
                provider.dir().display()
            );
            provider.load(Icon::Spotify)
        })
        .await;

        if let Ok(Some(img)) = logo {
            let _ = tx.send(AppEvent::LogoUpdate(img)).await;
        }
    })
}
