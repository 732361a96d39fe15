//! Molecular: timed entrance transitions
//!
//! Entrances play once when an element first appears, before scroll takes
//! over. They interpolate between two snapshots over a fixed duration.

use std::time::Duration;

use super::easing::EasingType;
use super::snapshot::{Channel, MotionSnapshot};
use super::spring::{apply_smoothing, SmoothingState, SpringParams};
use super::timing::{after_delay, lerp, progress};
use crate::error::Result;

/// Interpolation from `from` to `to` over `duration`, after `delay`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub from: MotionSnapshot,
    pub to: MotionSnapshot,
    pub duration: Duration,
    pub delay: Duration,
    pub easing: EasingType,
}

impl Transition {
    pub fn new(from: MotionSnapshot, to: MotionSnapshot, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            delay: Duration::ZERO,
            easing: EasingType::Premium,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_easing(mut self, easing: EasingType) -> Self {
        self.easing = easing;
        self
    }

    /// Collapse to an instant jump when the user prefers reduced motion
    pub fn reduced(mut self, reduced_motion: bool) -> Self {
        if reduced_motion {
            self.duration = Duration::ZERO;
            self.delay = Duration::ZERO;
        }
        self
    }

    /// Snapshot at `elapsed` since the transition was started
    pub fn sample(&self, elapsed: Duration) -> MotionSnapshot {
        if elapsed < self.delay {
            return self.from;
        }
        let t = progress(after_delay(elapsed, self.delay), self.duration);
        if t >= 1.0 {
            return self.to;
        }
        let eased = self.easing.apply(t);
        let mut out = self.from;
        for channel in Channel::ALL {
            out.set(channel, lerp(self.from.get(channel), self.to.get(channel), eased));
        }
        out
    }

    pub fn is_complete(&self, elapsed: Duration) -> bool {
        elapsed >= self.delay + self.duration
    }

    /// `section_entrance`: rise out of a tilt while fading in
    pub fn section_entrance() -> Self {
        Self::new(
            MotionSnapshot {
                opacity: 0.0,
                scale: 0.95,
                rotate_x: 15.0,
                ..MotionSnapshot::REST
            },
            MotionSnapshot::REST,
            Duration::from_millis(800),
        )
    }

    /// `content_entrance`: short lift and fade
    pub fn content_entrance() -> Self {
        Self::new(
            MotionSnapshot {
                opacity: 0.0,
                translate_y: 30.0,
                ..MotionSnapshot::REST
            },
            MotionSnapshot::REST,
            Duration::from_millis(600),
        )
    }

    /// `stack_reveal`: section slides up from below
    pub fn stack_reveal() -> Self {
        Self::new(
            MotionSnapshot {
                opacity: 0.0,
                translate_y: 100.0,
                scale: 0.95,
                ..MotionSnapshot::REST
            },
            MotionSnapshot::REST,
            Duration::from_millis(800),
        )
    }

    /// `section_depth`: comes forward out of 3D depth
    pub fn section_depth() -> Self {
        Self::new(
            MotionSnapshot {
                opacity: 0.0,
                scale: 0.92,
                rotate_x: 15.0,
                translate_z: -100.0,
                ..MotionSnapshot::REST
            },
            MotionSnapshot::REST,
            Duration::from_millis(900),
        )
    }

    /// `section_depth_exit`: recede into depth as the section leaves
    pub fn section_depth_exit() -> Self {
        Self::new(
            MotionSnapshot::REST,
            MotionSnapshot {
                opacity: 0.3,
                scale: 0.98,
                rotate_x: -8.0,
                translate_z: -50.0,
                ..MotionSnapshot::REST
            },
            Duration::from_millis(600),
        )
    }

    /// `content_item`: child of a staggered container
    pub fn content_item() -> Self {
        Self::new(
            MotionSnapshot {
                opacity: 0.0,
                translate_y: 20.0,
                scale: 0.95,
                ..MotionSnapshot::REST
            },
            MotionSnapshot::REST,
            Duration::from_millis(600),
        )
    }

    /// `grid_item`: grid cell tipping up out of a slight tilt
    pub fn grid_item() -> Self {
        Self::new(
            MotionSnapshot {
                opacity: 0.0,
                translate_y: 30.0,
                scale: 0.95,
                rotate_x: 10.0,
                ..MotionSnapshot::REST
            },
            MotionSnapshot::REST,
            Duration::from_millis(700),
        )
    }

    /// `badge`: small pill popping in
    pub fn badge() -> Self {
        Self::new(
            MotionSnapshot {
                opacity: 0.0,
                scale: 0.8,
                translate_y: 10.0,
                ..MotionSnapshot::REST
            },
            MotionSnapshot::REST,
            Duration::from_millis(500),
        )
    }

    fn fade_up(lift: f64, duration_ms: u64) -> Self {
        Self::new(
            MotionSnapshot {
                opacity: 0.0,
                translate_y: lift,
                ..MotionSnapshot::REST
            },
            MotionSnapshot::REST,
            Duration::from_millis(duration_ms),
        )
    }

    pub fn hero_title() -> Self {
        Self::fade_up(40.0, 800)
    }

    pub fn hero_subtitle() -> Self {
        Self::fade_up(30.0, 800).with_delay(Duration::from_millis(150))
    }

    pub fn hero_cta() -> Self {
        Self::fade_up(20.0, 800).with_delay(Duration::from_millis(300))
    }

    /// `section_fade_up`: section content lifting into place
    pub fn section_fade_up() -> Self {
        Self::fade_up(50.0, 700)
    }

    /// `stagger_fade_item`: child of a `Stagger::CARDS` fade-in
    pub fn stagger_fade_item() -> Self {
        Self::fade_up(40.0, 700)
    }
}

/// Spring-driven hover lift between a rest and a hover pose
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hover {
    pub rest: MotionSnapshot,
    pub hover: MotionSnapshot,
    pub spring: SpringParams,
}

impl Hover {
    /// Cards tilt back slightly and come forward
    pub const CARD_3D: Hover = Hover {
        rest: MotionSnapshot::REST,
        hover: MotionSnapshot {
            scale: 1.02,
            rotate_x: -5.0,
            translate_z: 30.0,
            opacity: 1.0,
            translate_y: 0.0,
        },
        spring: SpringParams::HOVER,
    };

    pub fn target(&self, hovered: bool) -> MotionSnapshot {
        if hovered {
            self.hover
        } else {
            self.rest
        }
    }

    /// Advance the lift one frame toward the pose for `hovered`
    pub fn sample(
        &self,
        hovered: bool,
        state: &SmoothingState,
        dt: f64,
    ) -> Result<(MotionSnapshot, SmoothingState)> {
        let state = match state {
            // Elements mount at rest, not already hovered
            SmoothingState::Uninitialized => SmoothingState::Tracking {
                current: self.rest,
                velocity: MotionSnapshot::ZERO,
            },
            tracking => *tracking,
        };
        apply_smoothing(self.target(hovered), &state, self.spring, dt)
    }
}

/// Start offsets for children of a staggered container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stagger {
    /// Delay before the first child starts
    pub delay_children: Duration,
    /// Additional delay per child
    pub stagger_children: Duration,
}

impl Stagger {
    /// Section content: 100ms lead-in, 100ms apart
    pub const CONTENT: Stagger = Stagger {
        delay_children: Duration::from_millis(100),
        stagger_children: Duration::from_millis(100),
    };

    /// Card grids and staggered fade-ins: 200ms lead-in, 120ms apart
    pub const CARDS: Stagger = Stagger {
        delay_children: Duration::from_millis(200),
        stagger_children: Duration::from_millis(120),
    };

    /// Stacked section content: 200ms lead-in, 100ms apart
    pub const STACKED_CONTENT: Stagger = Stagger {
        delay_children: Duration::from_millis(200),
        stagger_children: Duration::from_millis(100),
    };

    /// Perspective grids: 150ms lead-in, 80ms apart
    pub const GRID: Stagger = Stagger {
        delay_children: Duration::from_millis(150),
        stagger_children: Duration::from_millis(80),
    };

    /// Hero and full-screen section containers: 100ms lead-in, 120ms apart
    pub const HERO: Stagger = Stagger {
        delay_children: Duration::from_millis(100),
        stagger_children: Duration::from_millis(120),
    };

    pub fn delay_for(&self, index: usize) -> Duration {
        let steps = u32::try_from(index).unwrap_or(u32::MAX);
        self.delay_children + self.stagger_children.saturating_mul(steps)
    }

    /// `transition` delayed for child `index`
    pub fn apply(&self, transition: Transition, index: usize) -> Transition {
        transition.with_delay(transition.delay + self.delay_for(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_from_and_ends_exactly_at_to() {
        let t = Transition::section_entrance();
        assert_eq!(t.sample(Duration::ZERO), t.from);
        assert_eq!(t.sample(Duration::from_millis(800)), MotionSnapshot::REST);
        assert_eq!(t.sample(Duration::from_secs(5)), MotionSnapshot::REST);
        assert!(t.is_complete(Duration::from_millis(800)));
        assert!(!t.is_complete(Duration::from_millis(799)));
    }

    #[test]
    fn test_midway_is_between() {
        let t = Transition::content_entrance().with_easing(EasingType::Linear);
        let s = t.sample(Duration::from_millis(300));
        assert!((s.opacity - 0.5).abs() < 1e-9);
        assert!((s.translate_y - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_delay_holds_from() {
        let t = Transition::stack_reveal().with_delay(Duration::from_millis(200));
        assert_eq!(t.sample(Duration::from_millis(150)), t.from);
        assert!(t.sample(Duration::from_millis(500)).opacity > 0.0);
        assert!(!t.is_complete(Duration::from_millis(900)));
        assert!(t.is_complete(Duration::from_millis(1000)));
    }

    #[test]
    fn test_reduced_motion_is_instant() {
        let t = Transition::section_depth()
            .with_delay(Duration::from_millis(300))
            .reduced(true);
        assert_eq!(t.sample(Duration::ZERO), MotionSnapshot::REST);
        assert!(t.is_complete(Duration::ZERO));
    }

    #[test]
    fn test_stagger_delays() {
        let stagger = Stagger::CARDS;
        assert_eq!(stagger.delay_for(0), Duration::from_millis(200));
        assert_eq!(stagger.delay_for(3), Duration::from_millis(560));

        let item = stagger.apply(Transition::content_item(), 2);
        assert_eq!(item.delay, Duration::from_millis(440));
    }

    #[test]
    fn test_section_depth_exit_ends_receded() {
        let t = Transition::section_depth_exit();
        assert_eq!(t.sample(Duration::ZERO), MotionSnapshot::REST);
        let end = t.sample(Duration::from_millis(600));
        assert_eq!(end.opacity, 0.3);
        assert_eq!(end.scale, 0.98);
        assert_eq!(end.rotate_x, -8.0);
        assert_eq!(end.translate_z, -50.0);
    }

    #[test]
    fn test_hero_sequence_delays() {
        let title = Transition::hero_title();
        let subtitle = Transition::hero_subtitle();
        let cta = Transition::hero_cta();
        assert_eq!(title.delay, Duration::ZERO);
        assert_eq!(subtitle.delay, Duration::from_millis(150));
        assert_eq!(cta.delay, Duration::from_millis(300));
        assert_eq!(title.from.translate_y, 40.0);
        assert_eq!(cta.from.translate_y, 20.0);

        // Subtitle is still hidden while the title moves
        let at = Duration::from_millis(100);
        assert!(title.sample(at).opacity > 0.0);
        assert_eq!(subtitle.sample(at), subtitle.from);
        assert!(cta.is_complete(Duration::from_millis(1100)));
    }

    #[test]
    fn test_item_variants() {
        let grid = Transition::grid_item();
        assert_eq!(grid.from.rotate_x, 10.0);
        assert_eq!(grid.duration, Duration::from_millis(700));

        let badge = Transition::badge();
        assert_eq!(badge.from.scale, 0.8);
        assert_eq!(badge.duration, Duration::from_millis(500));

        assert_eq!(Transition::section_fade_up().from.translate_y, 50.0);
        assert_eq!(Transition::stagger_fade_item().from.translate_y, 40.0);
        for t in [grid, badge, Transition::section_fade_up()] {
            assert_eq!(t.sample(t.duration), MotionSnapshot::REST);
        }
    }

    #[test]
    fn test_stagger_constants() {
        assert_eq!(Stagger::STACKED_CONTENT.delay_for(2), Duration::from_millis(400));
        assert_eq!(Stagger::GRID.delay_for(3), Duration::from_millis(390));
        assert_eq!(Stagger::HERO.delay_for(1), Duration::from_millis(220));
    }

    #[test]
    fn test_hover_lifts_and_returns() {
        let hover = Hover::CARD_3D;
        let dt = 1.0 / 60.0;

        let (first, mut state) = hover.sample(true, &SmoothingState::Uninitialized, dt).unwrap();
        assert!(first.scale > 1.0 && first.scale < 1.02);
        assert!(first.translate_z > 0.0);

        for _ in 0..300 {
            let (_, next) = hover.sample(true, &state, dt).unwrap();
            state = next;
        }
        assert!(state.is_settled(&hover.hover, 1e-3));

        for _ in 0..300 {
            let (_, next) = hover.sample(false, &state, dt).unwrap();
            state = next;
        }
        assert!(state.is_settled(&MotionSnapshot::REST, 1e-3));
    }
}
