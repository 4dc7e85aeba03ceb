//! The fixed set of callbacks a host's source registry calls on a media source.

use crate::config::PlayerConfig;

use super::PlaybackController;
use super::decoder::AnimationDecoder;
use super::host::PlaybackHost;
use super::types::{Frame, PlaybackState};

/// Registry id under which hosts register the source.
pub const SOURCE_ID: &str = "lottie_source";

/// File picker filter for hosts that build a file property.
pub const LOTTIE_FILE_FILTER: &str = "Lottie Files (*.json);;GIF Files (*.gif);;All Files (*.*)";

/// Capability interface of an animation source as seen by a host registry.
pub trait SourceCallbacks {
    fn id(&self) -> &'static str {
        SOURCE_ID
    }
    fn display_name(&self) -> &'static str {
        "Lottie"
    }
    fn defaults() -> PlayerConfig
    where
        Self: Sized,
    {
        PlayerConfig::default()
    }

    fn update(&mut self, config: PlayerConfig);
    fn activate(&mut self);
    fn deactivate(&mut self);
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn video_tick(&mut self);
    fn video_render(&self) -> Option<Frame<'_>>;

    fn media_play_pause(&mut self, pause: bool);
    fn media_restart(&mut self);
    fn media_stop(&mut self);
    fn media_next(&mut self);
    fn media_previous(&mut self);
    fn media_get_duration(&self) -> u64;
    fn media_get_time(&self) -> u64;
    fn media_set_time(&mut self, ms: u64);
    fn media_get_state(&self) -> PlaybackState;
}

impl<D: AnimationDecoder, H: PlaybackHost> SourceCallbacks for PlaybackController<D, H> {
    fn update(&mut self, config: PlayerConfig) {
        self.configure(config);
    }

    fn activate(&mut self) {
        self.on_activate();
    }

    fn deactivate(&mut self) {
        self.on_deactivate();
    }

    fn width(&self) -> u32 {
        PlaybackController::width(self)
    }

    fn height(&self) -> u32 {
        PlaybackController::height(self)
    }

    fn video_tick(&mut self) {
        self.tick();
    }

    fn video_render(&self) -> Option<Frame<'_>> {
        self.render_if_visible()
    }

    fn media_play_pause(&mut self, pause: bool) {
        self.play_pause(pause);
    }

    fn media_restart(&mut self) {
        self.restart();
    }

    fn media_stop(&mut self) {
        self.stop();
    }

    fn media_next(&mut self) {
        self.next_frame();
    }

    fn media_previous(&mut self) {
        self.previous_frame();
    }

    fn media_get_duration(&self) -> u64 {
        self.get_duration_ms()
    }

    fn media_get_time(&self) -> u64 {
        self.get_time_ms()
    }

    fn media_set_time(&mut self, ms: u64) {
        self.set_time_ms(ms);
    }

    fn media_get_state(&self) -> PlaybackState {
        self.get_state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::host::HeadlessHost;
    use crate::media::testing::FakeDecoder;

    fn boxed() -> Box<dyn SourceCallbacks> {
        Box::new(PlaybackController::create(
            PlayerConfig::default(),
            FakeDecoder::new(4, 10.0, (8, 6)),
            HeadlessHost::new(),
        ))
    }

    #[test]
    fn registry_identity() {
        let source = boxed();
        assert_eq!(source.id(), "lottie_source");
        assert_eq!(source.display_name(), "Lottie");
        let defaults = <PlaybackController<FakeDecoder, HeadlessHost> as SourceCallbacks>::defaults();
        assert!(defaults.keep_aspect_ratio);
    }

    #[test]
    fn callbacks_drive_the_controller() {
        let mut source = boxed();
        assert_eq!(source.media_get_state(), PlaybackState::None);

        source.update(PlayerConfig::with_source("a.json"));
        assert_eq!(source.media_get_state(), PlaybackState::Playing);
        assert_eq!((source.width(), source.height()), (8, 6));
        assert_eq!(source.media_get_duration(), 400);

        source.video_tick();
        assert!(source.video_render().is_some());

        source.media_set_time(200);
        assert_eq!(source.media_get_time(), 200);

        source.media_play_pause(true);
        assert_eq!(source.media_get_state(), PlaybackState::Paused);
        source.media_next();
        assert_eq!(source.media_get_time(), 400);
        source.media_previous();
        assert_eq!(source.media_get_time(), 0);

        source.media_stop();
        assert!(source.video_render().is_none());
        source.media_restart();
        assert_eq!(source.media_get_state(), PlaybackState::Playing);

        source.deactivate();
        source.activate();
        assert_eq!(source.media_get_state(), PlaybackState::Playing);
    }
}
