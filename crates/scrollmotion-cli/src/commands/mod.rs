pub mod config;
pub mod play;
pub mod sample;
pub mod section;
pub mod theme;

use scrollmotion_core::MotionSnapshot;

/// One-line human readable rendering of a snapshot
pub fn format_snapshot(s: &MotionSnapshot) -> String {
    format!(
        "scale {:>6.4}  rotateX {:>7.2}°  z {:>7.2}px  y {:>7.2}px  opacity {:>5.3}",
        s.scale, s.rotate_x, s.translate_z, s.translate_y, s.opacity
    )
}
