use std::time::{Duration, Instant};

use anyhow::Result;
use serde::Serialize;

use scrollmotion_core::motion::timing::{frame_interval, lerp, progress};
use scrollmotion_core::{AppConfig, EasingType, MotionSnapshot, Preset, SectionLayout, SectionMotion};

use super::format_snapshot;

/// Settle tolerance for ending playback after the scroll stops
const SETTLE_TOLERANCE: f64 = 1e-3;

/// Extra time allowed for springs to settle after the scroll ends
const SETTLE_LIMIT: Duration = Duration::from_secs(3);

pub struct PlayOptions {
    pub preset: Preset,
    pub index: usize,
    pub distance: Option<f64>,
    pub duration_ms: u64,
    pub json: bool,
}

#[derive(Serialize)]
struct Frame {
    frame: u64,
    elapsed_ms: f64,
    scroll_y: f64,
    progress: f64,
    #[serde(flatten)]
    snapshot: MotionSnapshot,
}

pub async fn run(config: &AppConfig, options: PlayOptions) -> Result<()> {
    let layout = SectionLayout::from_config(&config.motion)?;
    let mut section = SectionMotion::from_preset(&options.preset, &config.motion);

    let from = layout.section_start(options.index);
    let to = from + options.distance.unwrap_or(layout.viewport_height());
    let scroll_duration = Duration::from_millis(options.duration_ms);

    tracing::info!(
        "Playing {} on section {}: {}px -> {}px over {}ms",
        options.preset,
        options.index,
        from,
        to,
        options.duration_ms
    );

    let mut ticker = tokio::time::interval(frame_interval(config.motion.animation_fps));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let start = Instant::now();
    let mut last = start;
    let mut frame = 0u64;

    loop {
        ticker.tick().await;
        let now = Instant::now();
        let elapsed = now.duration_since(start);
        let dt = now.duration_since(last).as_secs_f64();
        last = now;

        // Host-side smooth scroll, as a browser would perform it
        let t = EasingType::Cubic.apply(progress(elapsed, scroll_duration));
        let scroll_y = lerp(from, to, t);
        let section_progress = layout.progress(scroll_y, options.index)?;
        let snapshot = section.sample(section_progress, dt)?;

        if options.json {
            let line = Frame {
                frame,
                elapsed_ms: elapsed.as_secs_f64() * 1000.0,
                scroll_y,
                progress: section_progress,
                snapshot,
            };
            println!("{}", serde_json::to_string(&line)?);
        } else {
            println!(
                "{:>4}  {:>7.1}ms  y={:>8.1}  p={:>6.3}  {}",
                frame,
                elapsed.as_secs_f64() * 1000.0,
                scroll_y,
                section_progress,
                format_snapshot(&snapshot)
            );
        }
        frame += 1;

        if elapsed >= scroll_duration {
            if !section.needs_update(SETTLE_TOLERANCE) {
                break;
            }
            if elapsed >= scroll_duration + SETTLE_LIMIT {
                tracing::warn!("Spring did not settle within {:?}", SETTLE_LIMIT);
                break;
            }
        }
    }

    tracing::debug!("Rendered {} frames", frame);
    section.reset();
    Ok(())
}
