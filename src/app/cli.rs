use clap::Parser;

/// spotimini - a tiny Spotify widget for your terminal 🎵
#[derive(Parser, Debug)]
#[command(name = "spotimini", version, about)]
pub struct Args {
    /// Web API access token (overrides config and SPOTIFY_ACCESS_TOKEN)
    #[arg(long)]
    pub token: Option<String>,

    /// Poll interval in milliseconds (default: 1000)
    #[arg(long)]
    pub poll_ms: Option<u64>,

    /// Widget width in pixels, 300-800 (default: 450)
    #[arg(long)]
    pub scale: Option<u16>,

    /// Never download icons, only use cached ones
    #[arg(long)]
    pub no_icons: bool,

    /// Generate default config.toml to stdout
    #[arg(long)]
    pub generate_config: bool,
}
