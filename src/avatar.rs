use crate::error::Result;
use crate::terminal::Canvas;
use colored::Colorize;
use image::DynamicImage;
use image::imageops::FilterType;
use reqwest::Client;
use tracing::debug;

pub const DEFAULT_AVATAR_HOST: &str = "https://github.com";

/// Darkest to brightest.
const GLYPHS: [char; 7] = [' ', '.', '-', '=', '+', '#', '@'];

pub fn avatar_url(host: &str, login: &str) -> String {
    format!("{}/{login}.png", host.trim_end_matches('/'))
}

pub async fn fetch_avatar(http: &Client, url: &str) -> Result<DynamicImage> {
    debug!(url, "downloading avatar");
    let bytes = http
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;
    Ok(image::load_from_memory(&bytes)?)
}

/// Download the avatar at `url` and draw it as ASCII art sized to `canvas`.
/// An empty canvas skips the download entirely.
pub async fn rasterize(http: &Client, url: &str, canvas: Canvas, colored: bool) -> Result<String> {
    if canvas.is_empty() {
        return Ok(String::new());
    }
    let img = fetch_avatar(http, url).await?;
    Ok(render_ascii(&img, canvas, colored))
}

pub fn render_ascii(img: &DynamicImage, canvas: Canvas, colored: bool) -> String {
    let resized = img
        .resize_exact(canvas.width, canvas.height, FilterType::Triangle)
        .to_rgba8();

    let mut out = String::new();
    for (y, row) in resized.rows().enumerate() {
        if y > 0 {
            out.push('\n');
        }
        for px in row {
            let [r, g, b, a] = px.0;
            let glyph = glyph_for(r, g, b, a);
            if colored && glyph != ' ' {
                out.push_str(&glyph.to_string().truecolor(r, g, b).to_string());
            } else {
                out.push(glyph);
            }
        }
    }
    out
}

/// Picks a glyph by Rec. 709 luminance, treating transparency as dark.
fn glyph_for(r: u8, g: u8, b: u8, a: u8) -> char {
    let luma = 0.2126 * f64::from(r) + 0.7152 * f64::from(g) + 0.0722 * f64::from(b);
    let luma = luma * f64::from(a) / 255.0;
    let last = GLYPHS.len() - 1;
    let idx = (luma / 255.0 * last as f64).round() as usize;
    GLYPHS[idx.min(last)]
}
