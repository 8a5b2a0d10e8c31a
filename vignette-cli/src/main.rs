mod args;
mod color;
mod config;
mod input;
mod types;

use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use vignette_core::{Compositor, VignetteConfig};
use vignette_utils::{
    OutputFormat, OutputOptions, OutputPaths, PreviewSettings, configure_telemetry, init_logging,
    load_image, normalize_path, output_path_for, preview_path_for, resize_for_preview,
    save_rgb_image, timing_guard,
};

use crate::{
    args::VignetteArgs,
    config::{apply_cli_overrides, load_settings},
    input::collect_images,
    types::ImageRecord,
};

/// Everything needed to render one image, resolved once per run.
struct RenderPlan {
    config: VignetteConfig,
    format: OutputFormat,
    output: OutputOptions,
    output_dir: Option<PathBuf>,
    preview: PreviewSettings,
}

fn main() -> Result<()> {
    init_logging(log::LevelFilter::Info)?;
    let args = VignetteArgs::parse();

    let mut settings = load_settings(args.config.as_ref())?;
    apply_cli_overrides(&mut settings, &args)?;
    configure_telemetry(
        settings.telemetry.enabled,
        settings.telemetry.level_filter(),
    );

    let config = VignetteConfig::from(&settings.vignette);
    config.validate()?;
    let output = OutputOptions::from_settings(&settings.output)?;
    let format = output.format.unwrap_or_default();

    let input_path = normalize_path(&args.input)?;
    let output_dir = match args.output_dir.as_ref() {
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create output directory {}", dir.display()))?;
            Some(normalize_path(dir)?)
        }
        None => None,
    };

    let images = collect_images(&input_path)?;
    if images.is_empty() {
        anyhow::bail!(
            "no images found at {} (supported extensions: {})",
            input_path.display(),
            input::IMAGE_EXTENSIONS.join(", ")
        );
    }

    let plan = RenderPlan {
        config,
        format,
        output,
        output_dir,
        preview: settings.preview,
    };

    info!(
        "Applying {} vignette to {} image(s)...",
        plan.config.shape,
        images.len()
    );
    let mut paths = OutputPaths::new(&images);
    let mut results = Vec::with_capacity(images.len());
    for image_path in images {
        match render_image(&image_path, &plan, &mut paths) {
            Ok(record) => {
                info!("{} -> {}", record.source, record.output);
                results.push(record);
            }
            Err(err) => warn!("Skipping {}: {err:#}", image_path.display()),
        }
    }

    if results.is_empty() {
        anyhow::bail!("no image could be processed");
    }

    if let Some(json_path) = args.json.as_ref() {
        if let Some(dir) = json_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create directory {}", dir.display()))?;
        }
        let file = File::create(json_path)
            .with_context(|| format!("failed to create {}", json_path.display()))?;
        serde_json::to_writer_pretty(file, &results)
            .with_context(|| format!("failed to write summary JSON to {}", json_path.display()))?;
        info!("Wrote summary to {}", json_path.display());
    } else {
        let json = serde_json::to_string_pretty(&results).context("failed to serialize summary")?;
        println!("{json}");
    }

    Ok(())
}

fn render_image(
    source: &Path,
    plan: &RenderPlan,
    paths: &mut OutputPaths,
) -> Result<ImageRecord> {
    let _guard = timing_guard(format!("render {}", source.display()), log::Level::Info);
    let image = load_image(source)?;
    let (width, height) = image.dimensions();

    let rendered = Compositor::new(&plan.config, width, height)?.composite(&image)?;
    let destination = paths.claim(output_path_for(
        source,
        plan.output_dir.as_deref(),
        plan.format,
    ));
    save_rgb_image(&rendered, &destination, &plan.output)?;

    let preview = if plan.preview.enabled {
        let (small, factor) = resize_for_preview(&image, plan.preview.viewport);
        let scaled = plan.config.scaled(factor);
        let (pw, ph) = small.dimensions();
        let shaded = Compositor::new(&scaled, pw, ph)
            .and_then(|compositor| compositor.composite(&small))
            .with_context(|| format!("failed to render preview at scale {factor:.3}"))?;
        let preview_path = paths.claim(preview_path_for(&destination));
        save_rgb_image(&shaded, &preview_path, &plan.output)?;
        Some(preview_path.display().to_string())
    } else {
        None
    };

    Ok(ImageRecord {
        source: source.display().to_string(),
        output: destination.display().to_string(),
        preview,
        width,
        height,
        shape: plan.config.shape.to_string(),
    })
}
