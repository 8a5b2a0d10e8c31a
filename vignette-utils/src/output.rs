//! Encoding and naming helpers for rendered images.

use crate::config::OutputSettings;

use anyhow::{Context, Result};
use image::{
    ExtendedColorType, ImageEncoder, RgbImage,
    codecs::{
        bmp::BmpEncoder,
        jpeg::JpegEncoder,
        png::{CompressionType, FilterType, PngEncoder},
    },
};
use log::debug;
use std::{
    collections::HashSet,
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// Formats a rendered vignette can be written as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
    Bmp,
}

impl OutputFormat {
    /// Determine format from a filesystem extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        ext.parse().ok()
    }

    /// Canonical settings name.
    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Bmp => "bmp",
        }
    }

    /// Extension used for files written in this format.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Bmp => "bmp",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "bmp" => Ok(Self::Bmp),
            other => Err(format!(
                "unknown output format '{other}'; expected png, jpeg, or bmp"
            )),
        }
    }
}

/// Resolved encoder options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputOptions {
    /// Explicit format. `None` means "derive from the destination extension".
    pub format: Option<OutputFormat>,
    pub jpeg_quality: u8,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format: None,
            jpeg_quality: 90,
        }
    }
}

impl OutputOptions {
    pub fn from_settings(settings: &OutputSettings) -> Result<Self> {
        let format = settings
            .format
            .parse::<OutputFormat>()
            .map_err(anyhow::Error::msg)?;
        Ok(Self {
            format: Some(format),
            jpeg_quality: settings.jpeg_quality.clamp(1, 100),
        })
    }

    fn format_for(&self, destination: &Path) -> OutputFormat {
        self.format
            .or_else(|| {
                destination
                    .extension()
                    .and_then(|e| e.to_str())
                    .and_then(OutputFormat::from_extension)
            })
            .unwrap_or_default()
    }
}

/// Encode `image` and write it to `destination`, creating parent directories as needed.
pub fn save_rgb_image(
    image: &RgbImage,
    destination: &Path,
    options: &OutputOptions,
) -> Result<()> {
    if let Some(parent) = destination
        .parent()
        .filter(|p| !p.as_os_str().is_empty() && !p.exists())
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let format = options.format_for(destination);
    debug!(
        "Writing {}x{} image to {} as {:?}",
        image.width(),
        image.height(),
        destination.display(),
        format
    );

    let encoded = encode(image, format, options.jpeg_quality)?;
    let file = File::create(destination)
        .with_context(|| format!("failed to create {}", destination.display()))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(&encoded)
        .and_then(|_| writer.flush())
        .with_context(|| format!("failed to write {}", destination.display()))?;
    Ok(())
}

fn encode(image: &RgbImage, format: OutputFormat, jpeg_quality: u8) -> Result<Vec<u8>> {
    let (w, h) = image.dimensions();
    let mut buffer = Vec::new();
    match format {
        OutputFormat::Png => {
            let encoder = PngEncoder::new_with_quality(
                &mut buffer,
                CompressionType::Default,
                FilterType::Adaptive,
            );
            encoder
                .write_image(image.as_raw(), w, h, ExtendedColorType::Rgb8)
                .context("failed to encode PNG")?;
        }
        OutputFormat::Jpeg => {
            JpegEncoder::new_with_quality(&mut buffer, jpeg_quality.clamp(1, 100))
                .write_image(image.as_raw(), w, h, ExtendedColorType::Rgb8)
                .context("failed to encode JPEG")?;
        }
        OutputFormat::Bmp => {
            BmpEncoder::new(&mut buffer)
                .write_image(image.as_raw(), w, h, ExtendedColorType::Rgb8)
                .context("failed to encode BMP")?;
        }
    }
    Ok(buffer)
}

/// Insert `suffix` between a file name's stem and its extension.
pub fn append_suffix_to_filename(name: &str, suffix: &str) -> String {
    if suffix.is_empty() {
        return name.to_string();
    }
    match name.rfind('.').filter(|&idx| idx > 0) {
        Some(idx) => {
            let (base, ext) = name.split_at(idx);
            format!("{base}{suffix}{ext}")
        }
        None => format!("{name}{suffix}"),
    }
}

/// Destination paths handed out during one batch run.
///
/// Every input file is protected and every claimed path is remembered, so no render can land on
/// a source image or on another render from the same run. A taken candidate gets an underscore
/// appended to its stem until it is free.
#[derive(Debug, Default)]
pub struct OutputPaths {
    protected: HashSet<PathBuf>,
    claimed: HashSet<PathBuf>,
}

impl OutputPaths {
    pub fn new<I, P>(sources: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self {
            protected: sources.into_iter().map(|p| path_key(p.as_ref())).collect(),
            claimed: HashSet::new(),
        }
    }

    /// Reserve `candidate`, or the first free underscore-suffixed variant of it.
    pub fn claim(&mut self, candidate: PathBuf) -> PathBuf {
        let mut candidate = candidate;
        while self.is_taken(&candidate) {
            let Some(name) = candidate.file_name().and_then(|n| n.to_str()) else {
                break;
            };
            let renamed = append_suffix_to_filename(name, "_");
            candidate.set_file_name(renamed);
        }
        self.claimed.insert(path_key(&candidate));
        candidate
    }

    pub fn is_taken(&self, path: &Path) -> bool {
        let key = path_key(path);
        self.protected.contains(&key) || self.claimed.contains(&key)
    }
}

/// Canonical form of `path`; paths not yet on disk resolve through their parent directory.
fn path_key(path: &Path) -> PathBuf {
    if let Ok(resolved) = path.canonicalize() {
        return resolved;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => parent
            .canonicalize()
            .map(|dir| dir.join(name))
            .unwrap_or_else(|_| path.to_path_buf()),
        _ => path.to_path_buf(),
    }
}

/// Default destination for the render of `source`: its stem plus the format extension, placed in
/// `output_dir` or next to the source. Collisions are resolved by [`OutputPaths::claim`].
pub fn output_path_for(source: &Path, output_dir: Option<&Path>, format: OutputFormat) -> PathBuf {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("vignette");
    let dir = output_dir
        .map(Path::to_path_buf)
        .or_else(|| source.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    dir.join(format!("{stem}.{}", format.extension()))
}

/// Sibling of `output` carrying the `_preview` suffix.
pub fn preview_path_for(output: &Path) -> PathBuf {
    let name = output
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("vignette.png");
    output.with_file_name(append_suffix_to_filename(name, "_preview"))
}
