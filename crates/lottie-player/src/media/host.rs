/// The host side of a playback source: visibility queries and fire-and-forget notifications.
pub trait PlaybackHost: Send {
    /// Whether the source is currently active (shown in an output).
    fn is_active(&self) -> bool;
    /// Whether the source is currently visible anywhere.
    fn is_visible(&self) -> bool;
    fn playback_started(&mut self);
    fn playback_ended(&mut self);
    /// The controller derived its output size from the animation. Hosts may
    /// reflect it in their property UI.
    fn size_changed(&mut self, _width: u32, _height: u32) {}
}

/// Host with no windowing system behind it. Visibility is set directly and
/// notifications are counted, which is all the CLI and tests need.
#[derive(Debug, Clone)]
pub struct HeadlessHost {
    pub active: bool,
    pub visible: bool,
    pub started: u32,
    pub ended: u32,
    pub last_size: Option<(u32, u32)>,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self {
            active: true,
            visible: true,
            started: 0,
            ended: 0,
            last_size: None,
        }
    }

    /// A host whose source is not shown yet.
    pub fn hidden() -> Self {
        Self {
            active: false,
            visible: false,
            ..Self::new()
        }
    }

    pub fn set_shown(&mut self, shown: bool) {
        self.active = shown;
        self.visible = shown;
    }
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackHost for HeadlessHost {
    fn is_active(&self) -> bool {
        self.active
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn playback_started(&mut self) {
        self.started += 1;
        log::debug!("Playback started");
    }

    fn playback_ended(&mut self) {
        self.ended += 1;
        log::debug!("Playback ended");
    }

    fn size_changed(&mut self, width: u32, height: u32) {
        self.last_size = Some((width, height));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headless_host_defaults_shown() {
        let h = HeadlessHost::default();
        assert!(h.is_active());
        assert!(h.is_visible());
        assert_eq!(h.started, 0);
    }

    #[test]
    fn hidden_host_toggles() {
        let mut h = HeadlessHost::hidden();
        assert!(!h.is_active());
        h.set_shown(true);
        assert!(h.is_active() && h.is_visible());
    }

    #[test]
    fn notifications_are_counted() {
        let mut h = HeadlessHost::new();
        h.playback_started();
        h.playback_ended();
        h.playback_ended();
        h.size_changed(10, 20);
        assert_eq!(h.started, 1);
        assert_eq!(h.ended, 2);
        assert_eq!(h.last_size, Some((10, 20)));
    }
}
