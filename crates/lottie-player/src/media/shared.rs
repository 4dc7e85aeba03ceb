use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use super::PlaybackController;
use super::decoder::AnimationDecoder;
use super::host::PlaybackHost;

/// A controller behind one lock, for hosts that tick and handle transport
/// commands on different threads.
pub struct SharedController<D: AnimationDecoder, H: PlaybackHost> {
    inner: Arc<Mutex<PlaybackController<D, H>>>,
}

impl<D: AnimationDecoder, H: PlaybackHost> SharedController<D, H> {
    pub fn new(controller: PlaybackController<D, H>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(controller)),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, PlaybackController<D, H>> {
        self.inner.lock()
    }

    /// Run `f` with exclusive access to the controller.
    pub fn with<R>(&self, f: impl FnOnce(&mut PlaybackController<D, H>) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl<D: AnimationDecoder, H: PlaybackHost> Clone for SharedController<D, H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
