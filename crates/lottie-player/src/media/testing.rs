//! Scripted decoder for controller tests.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use super::decoder::{AnimationDecoder, AnimationHandle};
use super::timing;
use super::types::PixelSurface;

/// Write a solid-color animated GIF, one frame per color, 50ms per frame.
pub fn write_gif(path: &Path, width: u16, height: u16, colors: &[[u8; 4]]) {
    let file = std::fs::File::create(path).unwrap();
    let mut encoder = gif::Encoder::new(file, width, height, &[]).unwrap();
    for color in colors {
        let mut rgba: Vec<u8> = std::iter::repeat_n(*color, width as usize * height as usize)
            .flatten()
            .collect();
        let mut frame = gif::Frame::from_rgba_speed(width, height, &mut rgba, 10);
        frame.delay = 5;
        encoder.write_frame(&frame).unwrap();
    }
}

/// Decoder that hands out synthetic animations and records every load and render.
pub struct FakeDecoder {
    total_frames: u32,
    frame_rate: f64,
    size: (u32, u32),
    fail: bool,
    loads: AtomicUsize,
    renders: Arc<Mutex<Vec<u32>>>,
}

impl FakeDecoder {
    pub fn new(total_frames: u32, frame_rate: f64, size: (u32, u32)) -> Self {
        Self {
            total_frames,
            frame_rate,
            size,
            fail: false,
            loads: AtomicUsize::new(0),
            renders: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every load fails, as with a corrupt file.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(0, 0.0, (0, 0))
        }
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }

    /// Frame indices rendered so far, across every handle this decoder opened.
    pub fn renders(&self) -> Vec<u32> {
        self.renders.lock().clone()
    }
}

impl AnimationDecoder for FakeDecoder {
    type Handle = FakeAnimation;

    fn load(&self, _path: &Path) -> Option<FakeAnimation> {
        self.loads.fetch_add(1, Ordering::Relaxed);
        if self.fail {
            return None;
        }
        Some(FakeAnimation {
            total_frames: self.total_frames,
            frame_rate: self.frame_rate,
            size: self.size,
            renders: Arc::clone(&self.renders),
        })
    }
}

pub struct FakeAnimation {
    total_frames: u32,
    frame_rate: f64,
    size: (u32, u32),
    renders: Arc<Mutex<Vec<u32>>>,
}

impl AnimationHandle for FakeAnimation {
    fn total_frames(&self) -> u32 {
        self.total_frames
    }

    fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    fn duration_seconds(&self) -> f64 {
        if self.frame_rate > 0.0 {
            self.total_frames as f64 / self.frame_rate
        } else {
            0.0
        }
    }

    fn intrinsic_size(&self) -> (u32, u32) {
        self.size
    }

    /// Fills the surface with the frame index so tests can tell frames apart.
    fn render(&self, frame: u32, surface: &mut PixelSurface, _keep_aspect: bool) {
        self.renders.lock().push(frame);
        surface.fill(frame);
    }

    fn frame_at_normalized_position(&self, position: f64) -> u32 {
        timing::frame_at_position(position, self.total_frames)
    }
}
