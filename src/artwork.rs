use crate::player::AssetFetchError;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use reqwest::Client;

/// Downloads and decodes album art.
#[derive(Clone)]
pub struct ArtworkFetcher {
    client: Client,
}

impl ArtworkFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn fetch_image(&self, url: &str) -> Result<DynamicImage, AssetFetchError> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(AssetFetchError::Status(response.status().as_u16()));
        }
        let bytes = response.bytes().await?;
        Ok(image::load_from_memory(&bytes)?)
    }
}

/// Draw an image with upper half blocks, two pixel rows per terminal row.
///
/// The image is resized to fit `width` x `height` cells keeping its aspect
/// ratio.
pub fn half_block_lines(img: &DynamicImage, width: u16, height: u16) -> Vec<Line<'static>> {
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let resized = img.resize(width as u32, height as u32 * 2, FilterType::Triangle);
    let (w, h) = resized.dimensions();

    let mut lines = Vec::with_capacity(h.div_ceil(2) as usize);
    for y in (0..h).step_by(2) {
        let spans: Vec<Span<'static>> = (0..w)
            .map(|x| {
                let top = resized.get_pixel(x, y);
                let bottom = if y + 1 < h {
                    resized.get_pixel(x, y + 1)
                } else {
                    top
                };
                Span::styled(
                    "▀",
                    Style::default()
                        .fg(Color::Rgb(top[0], top[1], top[2]))
                        .bg(Color::Rgb(bottom[0], bottom[1], bottom[2])),
                )
            })
            .collect();
        lines.push(Line::from(spans));
    }
    lines
}
