//! Host-driven playback controller for frame-based animations.
//!
//! The host owns the render loop and the display surface. It feeds a
//! [`PlaybackController`] with settings, activation changes, transport
//! commands and one `tick` per video frame, and reads back a BGRA pixel
//! buffer to present. Decoding sits behind [`AnimationDecoder`]; the bundled
//! [`FileDecoder`] handles animated GIFs.

pub mod config;
pub mod media;

pub use config::PlayerConfig;
pub use media::PlaybackController;
pub use media::decoder::{AnimationDecoder, AnimationHandle, DecodeError, FileDecoder};
pub use media::host::{HeadlessHost, PlaybackHost};
pub use media::shared::SharedController;
pub use media::source::{LOTTIE_FILE_FILTER, SOURCE_ID, SourceCallbacks};
pub use media::types::{Frame, PixelSurface, PlaybackState};
