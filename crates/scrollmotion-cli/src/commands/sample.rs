use anyhow::Result;

use scrollmotion_core::{compute_raw_snapshot, AppConfig, Preset};

use super::format_snapshot;

pub fn run(config: &AppConfig, preset: &Preset, progress: f64, json: bool) -> Result<()> {
    let ranges = preset.ranges(&config.motion);
    let snapshot = compute_raw_snapshot(progress, &ranges)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    println!("{} at progress {}:", preset, progress);
    println!("  {}", format_snapshot(&snapshot));
    match preset.spring(&config.motion) {
        Some(springs) if !config.motion.reduced_motion => {
            let base = springs.base();
            println!(
                "  spring: stiffness {}, damping {}, mass {}",
                base.stiffness, base.damping, base.mass
            );
            for (channel, spring) in springs.overrides() {
                println!(
                    "    {}: stiffness {}, damping {}, mass {}",
                    channel.name(),
                    spring.stiffness,
                    spring.damping,
                    spring.mass
                );
            }
        }
        _ => println!("  spring: none (tracks scroll directly)"),
    }

    Ok(())
}
