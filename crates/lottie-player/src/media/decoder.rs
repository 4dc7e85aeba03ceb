use std::path::Path;

use image::RgbaImage;
use image::imageops::FilterType;

use super::timing;
use super::types::{PixelSurface, fit_rect};

/// An opened, decodable animation.
///
/// Metadata is fixed for the lifetime of the handle. `render` must accept any
/// frame index in `[0, total_frames]` and must tolerate an empty surface.
pub trait AnimationHandle: Send {
    /// Index of the last frame (the cursor runs over `0..=total_frames`).
    fn total_frames(&self) -> u32;
    fn frame_rate(&self) -> f64;
    fn duration_seconds(&self) -> f64;
    /// Native (width, height) of the animation.
    fn intrinsic_size(&self) -> (u32, u32);
    /// Synchronously render `frame` into `surface` as BGRA pixels.
    fn render(&self, frame: u32, surface: &mut PixelSurface, keep_aspect: bool);
    /// Frame index for a position in `[0, 1]` of the total duration.
    fn frame_at_normalized_position(&self, position: f64) -> u32;
}

/// Opens animation files. Failure of any kind is reported as `None`.
pub trait AnimationDecoder: Send {
    type Handle: AnimationHandle;

    fn load(&self, path: &Path) -> Option<Self::Handle>;
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("failed to read animation: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode GIF: {0}")]
    Gif(#[from] gif::DecodingError),
    #[error("animation has no frames")]
    Empty,
    #[error("invalid frame buffer for {width}x{height} canvas")]
    InvalidFrame { width: u32, height: u32 },
    #[error("unsupported animation format '{0}'")]
    Unsupported(String),
}

/// Decoder for the raster formats bundled with the crate, dispatched by extension.
///
/// Lottie JSON is rendered by host-provided decoders; this one reports it as unsupported.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileDecoder;

impl AnimationDecoder for FileDecoder {
    type Handle = GifAnimation;

    fn load(&self, path: &Path) -> Option<GifAnimation> {
        match open_animation(path) {
            Ok(animation) => Some(animation),
            Err(e) => {
                log::warn!("Failed to load animation {}: {e}", path.display());
                None
            }
        }
    }
}

/// Open an animation file, keeping the reason for failure.
pub fn open_animation(path: &Path) -> Result<GifAnimation, DecodeError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "gif" => load_gif(path),
        _ => Err(DecodeError::Unsupported(ext)),
    }
}

/// Animated GIF, pre-decoded into full-canvas frames.
pub struct GifAnimation {
    frames: Vec<RgbaImage>,
    delays_ms: Vec<u32>,
    width: u32,
    height: u32,
}

impl AnimationHandle for GifAnimation {
    fn total_frames(&self) -> u32 {
        self.frames.len().saturating_sub(1) as u32
    }

    fn frame_rate(&self) -> f64 {
        let duration = self.duration_seconds();
        if duration > 0.0 {
            self.frames.len() as f64 / duration
        } else {
            0.0
        }
    }

    fn duration_seconds(&self) -> f64 {
        self.delays_ms.iter().map(|&d| d as f64).sum::<f64>() / 1000.0
    }

    fn intrinsic_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn render(&self, frame: u32, surface: &mut PixelSurface, keep_aspect: bool) {
        surface.clear();
        if surface.is_empty() {
            return;
        }
        let Some(source) = self
            .frames
            .get((frame as usize).min(self.frames.len().saturating_sub(1)))
        else {
            return;
        };

        let (x, y, w, h) = if keep_aspect {
            fit_rect(self.width, self.height, surface.width, surface.height)
        } else {
            (0, 0, surface.width, surface.height)
        };
        if w == 0 || h == 0 {
            return;
        }

        let resized;
        let scaled: &RgbaImage = if (w, h) == (self.width, self.height) {
            source
        } else {
            resized = image::imageops::resize(source, w, h, FilterType::Triangle);
            &resized
        };
        surface.blit_rgba(scaled, x, y);
    }

    fn frame_at_normalized_position(&self, position: f64) -> u32 {
        timing::frame_at_position(position, self.total_frames())
    }
}

/// Largest GIF canvas side accepted. Bigger headers are treated as corrupt.
const MAX_GIF_DIMENSION: u32 = 8192;

/// Byte length of an RGBA canvas, rejecting sizes past the cap.
fn canvas_len(width: u32, height: u32) -> Result<usize, DecodeError> {
    let invalid = DecodeError::InvalidFrame { width, height };
    if width > MAX_GIF_DIMENSION || height > MAX_GIF_DIMENSION {
        return Err(invalid);
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(4))
        .ok_or(invalid)
}

/// Draw a (possibly partial) GIF frame onto the accumulated canvas.
fn composite(canvas: &mut [u8], canvas_w: usize, canvas_h: usize, frame: &gif::Frame<'_>) {
    let frame_w = usize::from(frame.width);
    if frame_w == 0 {
        return;
    }
    let left = usize::from(frame.left);
    let top = usize::from(frame.top);

    let rows = frame
        .buffer
        .chunks_exact(frame_w * 4)
        .take(usize::from(frame.height));
    for (row, src_row) in rows.enumerate() {
        let y = top + row;
        if y >= canvas_h {
            break;
        }
        for (col, src) in src_row.chunks_exact(4).enumerate() {
            let x = left + col;
            if x >= canvas_w {
                break;
            }
            // Transparent pixels keep the previous frame visible
            if src[3] > 0 {
                let dst = (y * canvas_w + x) * 4;
                canvas[dst..dst + 4].copy_from_slice(src);
            }
        }
    }
}

/// Load an animated GIF, pre-decoding all frames.
fn load_gif(path: &Path) -> Result<GifAnimation, DecodeError> {
    let file = std::fs::File::open(path)?;
    let mut options = gif::DecodeOptions::new();
    options.set_color_output(gif::ColorOutput::RGBA);
    let mut reader = options.read_info(file)?;

    let width = u32::from(reader.width());
    let height = u32::from(reader.height());
    let mut canvas = vec![0u8; canvas_len(width, height)?];

    let mut frames = Vec::new();
    let mut delays_ms = Vec::new();
    while let Some(frame) = reader.read_next_frame()? {
        // Centiseconds, with a 20ms floor for zero-delay frames
        delays_ms.push((u32::from(frame.delay) * 10).max(20));
        composite(&mut canvas, width as usize, height as usize, frame);

        let image = RgbaImage::from_raw(width, height, canvas.clone())
            .ok_or(DecodeError::InvalidFrame { width, height })?;
        frames.push(image);
    }

    if frames.is_empty() {
        return Err(DecodeError::Empty);
    }

    log::info!("Loaded GIF: {width}x{height}, {} frames", frames.len());

    Ok(GifAnimation {
        frames,
        delays_ms,
        width,
        height,
    })
}
