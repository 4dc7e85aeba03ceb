pub mod decoder;
pub mod host;
pub mod shared;
pub mod source;
pub mod timing;
pub mod types;

#[cfg(test)]
mod testing;

use std::path::Path;

use crate::config::PlayerConfig;
use decoder::{AnimationDecoder, AnimationHandle};
use host::PlaybackHost;
use types::{Frame, PixelSurface, PlaybackState, effective_size};

/// Playback state machine for one animation source.
///
/// Everything is driven from outside: the host calls `tick` once per video
/// frame, `render_if_visible` on each draw, and the transport methods from
/// its media controls. The animation is opened lazily on the first `start`.
pub struct PlaybackController<D: AnimationDecoder, H: PlaybackHost> {
    decoder: D,
    host: H,
    config: PlayerConfig,
    animation: Option<D::Handle>,
    buffer: Option<PixelSurface>,
    state: PlaybackState,
    /// Next frame `tick` renders. May sit one past `total_frames` once the
    /// last frame has been shown without looping; reads clamp it. Wider than
    /// the frame index so that step never overflows.
    current_frame: u64,
    /// The configured path failed to open. Cleared when the path changes.
    load_failed: bool,
}

impl<D: AnimationDecoder, H: PlaybackHost> PlaybackController<D, H> {
    /// Create a controller and apply the initial settings.
    pub fn create(config: PlayerConfig, decoder: D, host: H) -> Self {
        let mut controller = Self {
            decoder,
            host,
            config: PlayerConfig::default(),
            animation: None,
            buffer: None,
            state: PlaybackState::None,
            current_frame: 0,
            load_failed: false,
        };
        controller.configure(config);
        controller
    }

    /// Release the animation and pixel buffer.
    pub fn destroy(mut self) {
        self.close();
        log::debug!("Playback controller destroyed");
    }

    /// Apply a full settings snapshot.
    pub fn configure(&mut self, config: PlayerConfig) {
        let config = config.sanitized();

        if config.source_path != self.config.source_path {
            log::info!(
                "Animation source changed: '{}' -> '{}'",
                self.config.source_path,
                config.source_path
            );
            self.close();
        }

        let resized = config.requested_size() != self.config.requested_size();
        self.config = config;

        if resized && self.animation.is_some() {
            self.allocate_buffer();
        }

        if !self.config.restart_on_activate || self.host.is_active() {
            self.start();
        }
    }

    /// Begin playing, opening the animation first if needed.
    pub fn start(&mut self) {
        if self.animation.is_none() && !self.open() {
            return;
        }
        self.set_state(PlaybackState::Playing);
        self.host.playback_started();
    }

    pub fn on_activate(&mut self) {
        if self.config.restart_on_activate {
            self.restart();
        }
    }

    /// Losing visibility counts as a natural end when restarting on activation,
    /// so the next activation starts again from frame 0.
    pub fn on_deactivate(&mut self) {
        if self.config.restart_on_activate
            && self.animation.is_some()
            && self.state != PlaybackState::Ended
        {
            self.end();
        }
    }

    /// Advance playback by one host tick, rendering the current frame.
    pub fn tick(&mut self) {
        let Some(total_frames) = self.animation.as_ref().map(|a| u64::from(a.total_frames()))
        else {
            return;
        };

        match self.state {
            PlaybackState::Stopped => {
                self.end();
                return;
            }
            PlaybackState::Playing => {}
            _ => return,
        }

        if self.current_frame > total_frames {
            self.end();
            return;
        }

        self.render_current();
        log::trace!("Rendered frame {}/{}", self.current_frame, total_frames);

        if self.current_frame == total_frames {
            // Without looping, step past the end so the next tick ends playback
            // after the last frame has been shown exactly once.
            self.current_frame = if self.config.looping { 0 } else { total_frames + 1 };
        } else {
            self.current_frame += 1;
        }
    }

    /// The buffer to present this draw, or `None` when nothing should be shown.
    pub fn render_if_visible(&self) -> Option<Frame<'_>> {
        self.animation.as_ref()?;
        if !self.host.is_active() {
            return None;
        }
        match self.state {
            PlaybackState::Stopped => return None,
            PlaybackState::Ended if self.config.clear_on_end => return None,
            _ => {}
        }
        self.buffer.as_ref().map(PixelSurface::as_frame)
    }

    pub fn play_pause(&mut self, pause: bool) {
        if self.animation.is_none() {
            return;
        }
        if pause {
            self.set_state(PlaybackState::Paused);
        } else {
            self.set_state(PlaybackState::Playing);
            self.host.playback_started();
        }
    }

    /// Rewind to frame 0 and play. Opens the animation if the source is visible.
    pub fn restart(&mut self) {
        self.current_frame = 0;
        if self.host.is_visible() {
            self.start();
        }
        if self.animation.is_some() {
            self.set_state(PlaybackState::Playing);
        }
    }

    pub fn stop(&mut self) {
        if self.animation.is_none() {
            return;
        }
        self.set_state(PlaybackState::Stopped);
    }

    /// Jump to the last frame and show it now.
    pub fn next_frame(&mut self) {
        let Some(total_frames) = self.animation.as_ref().map(|a| a.total_frames()) else {
            return;
        };
        self.current_frame = u64::from(total_frames);
        self.render_current();
    }

    /// Jump to the first frame and show it now.
    pub fn previous_frame(&mut self) {
        if self.animation.is_none() {
            return;
        }
        self.current_frame = 0;
        self.render_current();
    }

    pub fn get_duration_ms(&self) -> u64 {
        self.animation
            .as_ref()
            .map_or(0, |a| timing::seconds_to_ms(a.duration_seconds()))
    }

    pub fn get_time_ms(&self) -> u64 {
        self.animation
            .as_ref()
            .map_or(0, |a| timing::frame_to_ms(self.current_frame(), a.frame_rate()))
    }

    /// Seek to a time offset and show the frame there now.
    pub fn set_time_ms(&mut self, ms: u64) {
        let Some(animation) = self.animation.as_ref() else {
            return;
        };
        let position = timing::normalized_position(ms, animation.duration_seconds());
        let frame = animation
            .frame_at_normalized_position(position)
            .min(animation.total_frames());
        log::debug!("Seek to {ms}ms -> frame {frame}");
        self.current_frame = u64::from(frame);
        self.render_current();
    }

    pub fn get_state(&self) -> PlaybackState {
        self.state
    }

    /// Frame cursor, within `[0, total_frames]`.
    pub fn current_frame(&self) -> u32 {
        self.animation
            .as_ref()
            .map_or(0, |a| self.current_frame.min(u64::from(a.total_frames())) as u32)
    }

    pub fn total_frames(&self) -> u32 {
        self.animation.as_ref().map_or(0, |a| a.total_frames())
    }

    pub fn frame_rate(&self) -> f64 {
        self.animation.as_ref().map_or(0.0, |a| a.frame_rate())
    }

    /// Effective output width (0 while nothing is open).
    pub fn width(&self) -> u32 {
        self.buffer.as_ref().map_or(0, |b| b.width)
    }

    /// Effective output height (0 while nothing is open).
    pub fn height(&self) -> u32 {
        self.buffer.as_ref().map_or(0, |b| b.height)
    }

    pub fn is_open(&self) -> bool {
        self.animation.is_some()
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn decoder(&self) -> &D {
        &self.decoder
    }

    /// Load the animation at the configured path. A failed load leaves the
    /// controller with nothing open, and the same path is not tried again.
    fn open(&mut self) -> bool {
        if !self.config.has_source() {
            return false;
        }
        if self.load_failed {
            log::debug!("Skipping open of {}, it failed to load", self.config.source_path);
            return false;
        }

        let path = Path::new(&self.config.source_path);
        let Some(animation) = self.decoder.load(path) else {
            log::warn!("No animation available from {}", path.display());
            self.close();
            self.load_failed = true;
            return false;
        };

        let (w, h) = animation.intrinsic_size();
        log::info!(
            "Opened animation {}: {}x{}, {} frames @ {:.2} fps, {:.2}s",
            path.display(),
            w,
            h,
            u64::from(animation.total_frames()) + 1,
            animation.frame_rate(),
            animation.duration_seconds()
        );

        self.animation = Some(animation);
        self.current_frame = 0;
        self.set_state(PlaybackState::None);
        self.allocate_buffer();
        true
    }

    fn close(&mut self) {
        if self.animation.take().is_some() {
            log::debug!("Closed animation");
        }
        self.buffer = None;
        self.current_frame = 0;
        self.load_failed = false;
        self.set_state(PlaybackState::None);
    }

    /// (Re)allocate the pixel buffer for the current effective size.
    fn allocate_buffer(&mut self) {
        let Some(animation) = self.animation.as_ref() else {
            return;
        };
        let requested = self.config.requested_size();
        let (width, height) = effective_size(requested, animation.intrinsic_size());

        if self
            .buffer
            .as_ref()
            .is_some_and(|b| b.width == width && b.height == height)
        {
            return;
        }

        log::debug!("Allocating {width}x{height} pixel buffer");
        self.buffer = Some(PixelSurface::new(width, height));

        if requested.0 == 0 || requested.1 == 0 {
            self.host.size_changed(width, height);
        }
    }

    fn render_current(&mut self) {
        let (Some(animation), Some(buffer)) = (self.animation.as_ref(), self.buffer.as_mut())
        else {
            return;
        };
        let frame = self.current_frame.min(u64::from(animation.total_frames())) as u32;
        animation.render(frame, buffer, self.config.keep_aspect_ratio);
    }

    fn end(&mut self) {
        self.set_state(PlaybackState::Ended);
        self.host.playback_ended();
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            log::debug!("Playback state: {} -> {}", self.state, state);
            self.state = state;
        }
    }
}
