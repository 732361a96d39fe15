use anyhow::Result;

use scrollmotion_core::{AppConfig, SectionLayout};

pub fn run(config: &AppConfig, offset: f64, index: usize, viewport: Option<f64>) -> Result<()> {
    let mut layout = SectionLayout::from_config(&config.motion)?;
    if let Some(height) = viewport {
        layout = SectionLayout::new(height)?
            .with_trigger_offset(config.motion.trigger_offset)
            .with_header_height(config.motion.header_height);
    }

    let progress = layout.progress(offset, index)?;

    println!("Section {} (viewport {}px):", index, layout.viewport_height());
    println!(
        "  spans {}px .. {}px",
        layout.section_start(index),
        layout.section_end(index)
    );
    println!("  progress at {}px: {}", offset, progress);
    println!("  navigation offset: {}px", layout.section_offset(index));
    println!("  section under viewport top: {}", layout.section_at(offset));

    Ok(())
}
