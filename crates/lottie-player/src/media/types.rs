use image::RgbaImage;

/// Playback state of a source as reported to the host's transport UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// No animation is open.
    #[default]
    None,
    Playing,
    Paused,
    /// Stop requested; the next tick turns this into `Ended`.
    Stopped,
    Ended,
}

impl PlaybackState {
    pub fn display_name(&self) -> &'static str {
        match self {
            PlaybackState::None => "None",
            PlaybackState::Playing => "Playing",
            PlaybackState::Paused => "Paused",
            PlaybackState::Stopped => "Stopped",
            PlaybackState::Ended => "Ended",
        }
    }
}

impl std::fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Pack an RGBA pixel into a BGRA word (bytes B, G, R, A in memory order).
pub fn bgra_from_rgba(px: [u8; 4]) -> u32 {
    u32::from_le_bytes([px[2], px[1], px[0], px[3]])
}

/// Unpack a BGRA word back into RGBA bytes.
pub fn rgba_from_bgra(px: u32) -> [u8; 4] {
    let [b, g, r, a] = px.to_le_bytes();
    [r, g, b, a]
}

/// Render target owned by the playback controller: `width * height` BGRA pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelSurface {
    pub data: Vec<u32>,
    pub width: u32,
    pub height: u32,
}

impl PixelSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0; (width as usize) * (height as usize)],
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Reset every pixel to transparent black.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    pub fn fill(&mut self, px: u32) {
        self.data.fill(px);
    }

    /// Copy an RGBA image into the surface at (x, y), converting to BGRA.
    /// Pixels falling outside the surface are dropped.
    pub fn blit_rgba(&mut self, image: &RgbaImage, x: u32, y: u32) {
        let (img_w, img_h) = image.dimensions();
        for row in 0..img_h {
            let dst_y = y + row;
            if dst_y >= self.height {
                break;
            }
            for col in 0..img_w {
                let dst_x = x + col;
                if dst_x >= self.width {
                    break;
                }
                let idx = dst_y as usize * self.width as usize + dst_x as usize;
                self.data[idx] = bgra_from_rgba(image.get_pixel(col, row).0);
            }
        }
    }

    pub fn as_frame(&self) -> Frame<'_> {
        Frame {
            pixels: &self.data,
            width: self.width,
            height: self.height,
        }
    }
}

/// Borrowed view of a presentable buffer, handed to the host for upload.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub pixels: &'a [u32],
    pub width: u32,
    pub height: u32,
}

impl Frame<'_> {
    /// Row pitch in bytes.
    pub fn stride(&self) -> usize {
        self.width as usize * 4
    }

    /// Raw BGRA bytes, row-major, `width * 4` bytes per row.
    pub fn to_bgra_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|px| px.to_le_bytes()).collect()
    }

    /// Convert to an RGBA image (for PNG export and inspection).
    pub fn to_rgba_image(&self) -> Option<RgbaImage> {
        let data = self
            .pixels
            .iter()
            .flat_map(|&px| rgba_from_bgra(px))
            .collect();
        RgbaImage::from_raw(self.width, self.height, data)
    }
}

/// Pick the output size from the requested size and the animation's intrinsic size.
/// A zero side means "auto" and takes the intrinsic value for that side.
pub fn effective_size(requested: (u32, u32), intrinsic: (u32, u32)) -> (u32, u32) {
    let width = if requested.0 == 0 { intrinsic.0 } else { requested.0 };
    let height = if requested.1 == 0 { intrinsic.1 } else { requested.1 };
    (width, height)
}

/// Compute the letterboxed rectangle (x, y, w, h) that fits media into a viewport
/// while preserving aspect ratio, centered.
pub fn fit_rect(media_w: u32, media_h: u32, viewport_w: u32, viewport_h: u32) -> (u32, u32, u32, u32) {
    let media_aspect = media_w as f32 / media_h.max(1) as f32;
    let viewport_aspect = viewport_w as f32 / viewport_h.max(1) as f32;

    let (w, h) = if media_aspect > viewport_aspect {
        // Media is wider: fit width, letterbox top/bottom
        let h = (viewport_w as f32 / media_aspect).round() as u32;
        (viewport_w, h.min(viewport_h))
    } else {
        // Media is taller: fit height, pillarbox left/right
        let w = (viewport_h as f32 * media_aspect).round() as u32;
        (w.min(viewport_w), viewport_h)
    };

    ((viewport_w - w) / 2, (viewport_h - h) / 2, w, h)
}
