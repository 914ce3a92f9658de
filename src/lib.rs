pub mod app;
pub mod artwork;
pub mod icons;
pub mod player;
pub mod ui;
