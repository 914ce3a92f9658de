use crate::app::ArtworkState;
use crate::player::{CommandError, Dispatched, PollError, PollOutcome, RecentItem};
use crossterm::event::Event;
use image::DynamicImage;

pub enum AppEvent {
    Input(Event),
    Poll(PollOutcome),
    RecentUpdate(Result<Vec<RecentItem>, PollError>),
    Command(Result<Dispatched, CommandError>),
    ArtworkUpdate(String, ArtworkState),
    LogoUpdate(DynamicImage),
    Tick,
}
