//! Pure conversions between frame indices, milliseconds and normalized positions.

/// Seconds to the nearest whole millisecond. Non-finite or negative input reads as 0.
pub fn seconds_to_ms(secs: f64) -> u64 {
    if !secs.is_finite() || secs <= 0.0 {
        return 0;
    }
    (secs * 1000.0).round() as u64
}

/// Position of a frame index in milliseconds. Float division, so sub-frame
/// precision survives until the final rounding.
pub fn frame_to_ms(frame: u32, frame_rate: f64) -> u64 {
    if !frame_rate.is_finite() || frame_rate <= 0.0 {
        return 0;
    }
    seconds_to_ms(frame as f64 / frame_rate)
}

/// Duration of a single frame in milliseconds.
pub fn frame_duration_ms(frame_rate: f64) -> f64 {
    if !frame_rate.is_finite() || frame_rate <= 0.0 {
        return 0.0;
    }
    1000.0 / frame_rate
}

/// Map a millisecond offset to a fraction of the total duration, clamped to [0, 1].
pub fn normalized_position(ms: u64, duration_secs: f64) -> f64 {
    if !duration_secs.is_finite() || duration_secs <= 0.0 {
        return 0.0;
    }
    (ms as f64 / 1000.0 / duration_secs).clamp(0.0, 1.0)
}

/// Nearest frame index for a normalized position over `[0, total_frames]`.
pub fn frame_at_position(position: f64, total_frames: u32) -> u32 {
    if !position.is_finite() {
        return 0;
    }
    let frame = (position.clamp(0.0, 1.0) * total_frames as f64).round() as u32;
    frame.min(total_frames)
}
