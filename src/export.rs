//! Export of compositions to PNG artifacts.
//!
//! Exporting reads the full-resolution composition (never the preview),
//! rasterizes it at [`OVERSAMPLING_FACTOR`] times its native size, encodes it
//! losslessly as PNG and hands it to a [`Delivery`].
//!
//! Rasterization and delivery are capabilities behind traits so the
//! dimension contract can be checked without a real render surface.
//!
//! # Example
//!
//! ```
//! use ad_composer::{ConfigurationStore, ExportJob, Exporter, MemoryDelivery};
//!
//! let mut store = ConfigurationStore::new();
//! store.select_size_by_name("Google Display");
//!
//! let exporter = Exporter::default();
//! let job = ExportJob::new(store.get());
//! let mut delivery = MemoryDelivery::default();
//! let artifact = exporter.export(&job, 1700000000000, &mut delivery).unwrap();
//!
//! assert_eq!(artifact.filename, "ad-google-display-1700000000000.png");
//! assert_eq!((artifact.size.width, artifact.size.height), (1940, 500));
//! ```

use std::fs;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use image::{ImageFormat, RgbaImage};
use log::{debug, info};
use resvg::usvg::fontdb;

use crate::catalog::SizePreset;
use crate::compose::{Composition, compose};
use crate::config::Configuration;
use crate::error::{ExportError, ExportResult, RasterError};
use crate::geometry::SizePx;
use crate::svg::{render_svg, system_fonts, to_svg};

/// Multiplier applied to the native size of every export.
pub const OVERSAMPLING_FACTOR: u32 = 2;

/// Prefix of every artifact filename.
pub const ARTIFACT_PREFIX: &str = "ad";

// ============================================================================
// Rasterizer capability
// ============================================================================

/// What to rasterize: a composition of `native` size drawn at `pixel_ratio`
/// into an `output`-sized image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterRequest {
    pub native: SizePx,
    pub pixel_ratio: f32,
    pub output: SizePx,
}

impl RasterRequest {
    /// Request for an integer oversampling of the native size.
    pub fn oversampled(native: SizePx, factor: u32) -> Self {
        Self {
            native,
            pixel_ratio: factor as f32,
            output: native.times(factor),
        }
    }

    /// Request for an arbitrary scale with an explicit output size.
    pub fn scaled(native: SizePx, pixel_ratio: f32, output: SizePx) -> Self {
        Self {
            native,
            pixel_ratio,
            output,
        }
    }
}

/// Turns a composition into pixels.
pub trait Rasterizer {
    /// Renders `composition` as described by `request`.
    ///
    /// Implementations must return an image of exactly `request.output`
    /// pixels or fail.
    fn rasterize(
        &self,
        composition: &Composition,
        request: &RasterRequest,
    ) -> Result<RgbaImage, RasterError>;
}

/// The resvg-backed rasterizer.
#[derive(Clone)]
pub struct SvgRasterizer {
    fonts: Arc<fontdb::Database>,
}

impl SvgRasterizer {
    /// Creates a rasterizer using the system fonts.
    pub fn new() -> Self {
        Self::with_fonts(system_fonts())
    }

    /// Creates a rasterizer with a specific font database.
    pub fn with_fonts(fonts: Arc<fontdb::Database>) -> Self {
        Self { fonts }
    }
}

impl Default for SvgRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for SvgRasterizer {
    fn rasterize(
        &self,
        composition: &Composition,
        request: &RasterRequest,
    ) -> Result<RgbaImage, RasterError> {
        debug!(
            "Rasterizing {} composition at {}x into {}",
            request.native, request.pixel_ratio, request.output
        );
        let svg = to_svg(composition);
        render_svg(&svg, request.output, request.pixel_ratio, self.fonts.clone())
    }
}

// ============================================================================
// Delivery capability
// ============================================================================

/// An encoded export ready for delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub filename: String,
    /// Pixel size of the encoded image.
    pub size: SizePx,
    /// PNG bytes.
    pub png: Vec<u8>,
}

/// Saves artifacts to the user's environment.
pub trait Delivery {
    /// Saves `artifact` and returns the filename it was saved under, which
    /// differs from `artifact.filename` when that name was already taken.
    fn deliver(&mut self, artifact: &ExportArtifact) -> io::Result<String>;
}

/// Number of suffixed names tried before a clash is reported.
const MAX_NAME_ATTEMPTS: u32 = 1000;

/// Writes artifacts into a directory.
///
/// Each file is written under a temporary name and renamed into place, so a
/// failed write never leaves a truncated artifact behind. Existing files are
/// never replaced: a clashing name gets a `-1`, `-2`, ... suffix before its
/// extension.
#[derive(Debug, Clone)]
pub struct DirectoryDelivery {
    dir: PathBuf,
}

impl DirectoryDelivery {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Final path of an artifact with `filename`.
    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }

    /// Renames `partial` to the first free variant of `filename`.
    fn place(&self, partial: &Path, filename: &str) -> io::Result<String> {
        for attempt in 0..MAX_NAME_ATTEMPTS {
            let candidate = numbered_filename(filename, attempt);
            let target = self.path_for(&candidate);
            if target.try_exists()? {
                debug!("{} exists, trying another name", target.display());
                continue;
            }
            fs::rename(partial, &target)?;
            return Ok(candidate);
        }
        Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("no free name for {filename}"),
        ))
    }
}

impl Delivery for DirectoryDelivery {
    fn deliver(&mut self, artifact: &ExportArtifact) -> io::Result<String> {
        let partial = self.path_for(&format!("{}.part", artifact.filename));

        let placed = fs::write(&partial, &artifact.png)
            .and_then(|()| self.place(&partial, &artifact.filename));
        match placed {
            Ok(filename) => {
                info!("Saved {}", self.path_for(&filename).display());
                Ok(filename)
            }
            Err(err) => {
                let _ = fs::remove_file(&partial);
                Err(err)
            }
        }
    }
}

/// `filename` with `-<n>` inserted before the extension; unchanged for 0.
fn numbered_filename(filename: &str, n: u32) -> String {
    if n == 0 {
        return filename.to_string();
    }
    match filename.rsplit_once('.') {
        Some((stem, extension)) if !stem.is_empty() => format!("{stem}-{n}.{extension}"),
        _ => format!("{filename}-{n}"),
    }
}

/// Keeps delivered artifacts in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryDelivery {
    pub delivered: Vec<ExportArtifact>,
}

impl Delivery for MemoryDelivery {
    fn deliver(&mut self, artifact: &ExportArtifact) -> io::Result<String> {
        self.delivered.push(artifact.clone());
        Ok(artifact.filename.clone())
    }
}

// ============================================================================
// Filenames
// ============================================================================

/// Filename-safe form of a preset name: lower-cased, with runs of whitespace
/// and path separators collapsed into single hyphens.
pub fn artifact_slug(name: &str) -> String {
    name.to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '/' || c == '\\')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// `ad-<slug>-<token>.png` for the given preset.
pub fn artifact_filename(preset: &SizePreset, token: u128) -> String {
    format!("{ARTIFACT_PREFIX}-{}-{token}.png", artifact_slug(preset.name))
}

/// Milliseconds since the Unix epoch, used as the uniqueness token.
pub fn timestamp_token() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default()
}

/// Encodes an image as PNG (lossless, 8-bit RGBA).
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, image::ImageError> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

// ============================================================================
// Export job
// ============================================================================

/// A snapshot of the configuration and its composition taken when an export
/// starts.
///
/// Edits made after the job is created do not affect it, so the job can run
/// while the user keeps editing.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportJob {
    configuration: Configuration,
    composition: Composition,
}

impl ExportJob {
    pub fn new(configuration: &Configuration) -> Self {
        Self {
            configuration: configuration.clone(),
            composition: compose(configuration),
        }
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn composition(&self) -> &Composition {
        &self.composition
    }
}

// ============================================================================
// Exporter
// ============================================================================

/// Rasterizes, encodes and delivers export jobs.
pub struct Exporter<R = SvgRasterizer> {
    rasterizer: R,
}

impl Default for Exporter<SvgRasterizer> {
    fn default() -> Self {
        Self::new(SvgRasterizer::default())
    }
}

impl<R: Rasterizer> Exporter<R> {
    pub fn new(rasterizer: R) -> Self {
        Self { rasterizer }
    }

    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    /// The raster request for a job: native size times [`OVERSAMPLING_FACTOR`].
    pub fn request_for(&self, job: &ExportJob) -> RasterRequest {
        RasterRequest::oversampled(job.composition.size, OVERSAMPLING_FACTOR)
    }

    /// Rasterizes and encodes a job without delivering it.
    pub fn render(&self, job: &ExportJob, token: u128) -> ExportResult<ExportArtifact> {
        let request = self.request_for(job);
        let image = self.rasterizer.rasterize(&job.composition, &request)?;

        let actual = SizePx::new(image.width(), image.height());
        if actual != request.output {
            return Err(ExportError::DimensionMismatch {
                expected: request.output,
                actual,
            });
        }

        let png = encode_png(&image)?;
        Ok(ExportArtifact {
            filename: artifact_filename(job.configuration.size(), token),
            size: actual,
            png,
        })
    }

    /// Rasterizes, encodes and delivers a job.
    ///
    /// Nothing reaches `delivery` unless rendering succeeded. The returned
    /// artifact carries the filename it was actually saved under.
    pub fn export<D: Delivery + ?Sized>(
        &self,
        job: &ExportJob,
        token: u128,
        delivery: &mut D,
    ) -> ExportResult<ExportArtifact> {
        let mut artifact = self.render(job, token)?;
        let saved = delivery
            .deliver(&artifact)
            .map_err(|source| ExportError::Delivery {
                filename: artifact.filename.clone(),
                source,
            })?;
        artifact.filename = saved;
        Ok(artifact)
    }
}
