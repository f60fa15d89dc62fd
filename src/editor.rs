//! The editor session: configuration, live composition, preview and export.

use image::RgbaImage;
use log::{error, info};

use crate::compose::{Composition, compose};
use crate::config::{Configurable, ConfigurationStore};
use crate::error::{ExportError, ExportResult, RasterError};
use crate::export::{
    Delivery, ExportArtifact, ExportJob, Exporter, Rasterizer, SvgRasterizer, timestamp_token,
};
use crate::preview::{PreviewTransform, PreviewViewport, render_preview};
use crate::profile::EditorProfile;
use crate::svg::to_svg;

// ============================================================================
// Notifier
// ============================================================================

/// Receives the outcome of exports so it can be surfaced to the user.
pub trait Notifier {
    /// Called once for every failed export.
    fn export_failed(&mut self, error: &ExportError);

    /// Called once for every successful export.
    fn export_succeeded(&mut self, _artifact: &ExportArtifact) {}
}

/// Writes the user-facing failure message to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn export_failed(&mut self, error: &ExportError) {
        eprintln!("{}", error.user_message());
    }
}

/// Collects the user-facing messages of failed exports.
#[derive(Debug, Clone, Default)]
pub struct CollectingNotifier {
    pub failures: Vec<String>,
    pub successes: Vec<String>,
}

impl Notifier for CollectingNotifier {
    fn export_failed(&mut self, error: &ExportError) {
        self.failures.push(error.user_message().to_string());
    }

    fn export_succeeded(&mut self, artifact: &ExportArtifact) {
        self.successes.push(artifact.filename.clone());
    }
}

// ============================================================================
// Editor
// ============================================================================

/// One editing session.
///
/// The editor owns the [`ConfigurationStore`] and keeps the composition in
/// step with it: every update that changes the store re-projects the
/// composition, so the preview always shows the latest state.
///
/// # Example
///
/// ```
/// use ad_composer::Editor;
///
/// let mut editor = Editor::default();
/// editor.update(|store| store.set_headline("Summer Sale"));
///
/// assert_eq!(editor.composition().headline.text, "Summer Sale");
/// assert!((editor.preview_scale() - 400.0 / 1080.0).abs() < 1e-6);
/// ```
pub struct Editor<R = SvgRasterizer> {
    store: ConfigurationStore,
    composition: Composition,
    composed_revision: u64,
    exporter: Exporter<R>,
    viewport: PreviewViewport,
}

impl Default for Editor<SvgRasterizer> {
    fn default() -> Self {
        Self::new(SvgRasterizer::default())
    }
}

impl<R: Rasterizer> Editor<R> {
    /// Creates an editor with default configuration and preview viewport.
    pub fn new(rasterizer: R) -> Self {
        let store = ConfigurationStore::new();
        let composition = compose(store.get());
        let composed_revision = store.revision();
        Self {
            store,
            composition,
            composed_revision,
            exporter: Exporter::new(rasterizer),
            viewport: PreviewViewport::default(),
        }
    }

    /// Replaces the preview viewport.
    pub fn with_viewport(mut self, viewport: PreviewViewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn store(&self) -> &ConfigurationStore {
        &self.store
    }

    pub fn viewport(&self) -> &PreviewViewport {
        &self.viewport
    }

    /// Applies an edit to the store and re-projects if anything changed.
    ///
    /// Returns whatever the edit returns.
    pub fn update<T>(&mut self, edit: impl FnOnce(&mut ConfigurationStore) -> T) -> T {
        let result = edit(&mut self.store);
        self.refresh();
        result
    }

    fn refresh(&mut self) {
        if self.store.revision() != self.composed_revision {
            self.composition = compose(self.store.get());
            self.composed_revision = self.store.revision();
        }
    }

    /// The composition of the current configuration at native size.
    pub fn composition(&self) -> &Composition {
        &self.composition
    }

    pub fn preview_transform(&self) -> PreviewTransform {
        self.viewport.transform_for(self.composition.size)
    }

    /// Uniform factor that fits the current composition in the viewport.
    pub fn preview_scale(&self) -> f32 {
        self.viewport.scale_for(self.composition.size)
    }

    /// Rasterizes the current composition at preview scale.
    pub fn render_preview(&self) -> Result<RgbaImage, RasterError> {
        render_preview(self.exporter.rasterizer(), &self.composition, &self.viewport)
    }

    /// The current composition as a native-size SVG document.
    pub fn to_svg(&self) -> String {
        to_svg(&self.composition)
    }

    /// Snapshots the current configuration for export.
    pub fn begin_export(&self) -> ExportJob {
        ExportJob::new(self.store.get())
    }

    /// Exports the current configuration, timestamped now.
    pub fn export<D, N>(&self, delivery: &mut D, notifier: &mut N) -> ExportResult<ExportArtifact>
    where
        D: Delivery + ?Sized,
        N: Notifier + ?Sized,
    {
        self.export_job(&self.begin_export(), timestamp_token(), delivery, notifier)
    }

    /// Runs an export job and reports the outcome to `notifier`.
    ///
    /// A failure is reported exactly once and leaves the configuration
    /// untouched.
    pub fn export_job<D, N>(
        &self,
        job: &ExportJob,
        token: u128,
        delivery: &mut D,
        notifier: &mut N,
    ) -> ExportResult<ExportArtifact>
    where
        D: Delivery + ?Sized,
        N: Notifier + ?Sized,
    {
        match self.exporter.export(job, token, delivery) {
            Ok(artifact) => {
                info!(
                    "Exported {} at {} ({} bytes)",
                    artifact.filename,
                    artifact.size,
                    artifact.png.len()
                );
                notifier.export_succeeded(&artifact);
                Ok(artifact)
            }
            Err(err) => {
                error!("Export of {} failed: {err}", job.configuration().size());
                notifier.export_failed(&err);
                Err(err)
            }
        }
    }
}

impl<R: Rasterizer> Configurable for Editor<R> {
    fn apply_profile(&mut self, profile: &EditorProfile) {
        self.update(|store| store.apply_profile(profile));
    }

    fn export_profile(&self) -> EditorProfile {
        self.store.export_profile()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EXPORT_FAILURE_MESSAGE;
    use crate::export::{MemoryDelivery, RasterRequest};
    use crate::geometry::SizePx;
    use std::cell::RefCell;

    #[derive(Default)]
    struct BlankRasterizer {
        requests: RefCell<Vec<RasterRequest>>,
    }

    impl Rasterizer for BlankRasterizer {
        fn rasterize(
            &self,
            _composition: &Composition,
            request: &RasterRequest,
        ) -> Result<RgbaImage, RasterError> {
            self.requests.borrow_mut().push(*request);
            Ok(RgbaImage::new(request.output.width, request.output.height))
        }
    }

    struct BrokenRasterizer;

    impl Rasterizer for BrokenRasterizer {
        fn rasterize(
            &self,
            _composition: &Composition,
            request: &RasterRequest,
        ) -> Result<RgbaImage, RasterError> {
            Err(RasterError::SurfaceUnavailable(request.output))
        }
    }

    #[test]
    fn edits_are_reflected_in_composition() {
        let mut editor = Editor::new(BlankRasterizer::default());
        let changed = editor.update(|store| store.select_size_by_name("YouTube Thumbnail"));
        assert!(changed);
        assert_eq!(editor.composition().size, SizePx::new(1280, 720));

        editor.update(|store| store.set_cta("Buy"));
        assert_eq!(editor.composition().cta.label.text, "Buy");
    }

    #[test]
    fn noop_edit_keeps_composition() {
        let mut editor = Editor::new(BlankRasterizer::default());
        let before = editor.composition().clone();
        let changed = editor.update(|store| store.set_headline("Amazing Product"));
        assert!(!changed);
        assert_eq!(editor.composition(), &before);
    }

    #[test]
    fn preview_uses_scale_and_export_does_not() {
        let mut editor = Editor::new(BlankRasterizer::default());
        editor.update(|store| store.select_size_by_name("Instagram Post"));

        let preview = editor.render_preview().unwrap();
        assert_eq!(preview.dimensions(), (400, 400));

        let mut delivery = MemoryDelivery::default();
        let mut notifier = CollectingNotifier::default();
        let artifact = editor.export(&mut delivery, &mut notifier).unwrap();
        assert_eq!(artifact.size, SizePx::new(2160, 2160));
        assert_eq!(delivery.delivered.len(), 1);
        assert_eq!(notifier.successes, vec![artifact.filename.clone()]);

        let requests = editor.exporter.rasterizer().requests.borrow();
        assert_eq!(requests[1].native, SizePx::new(1080, 1080));
        assert_eq!(requests[1].pixel_ratio, 2.0);
    }

    #[test]
    fn failed_export_notifies_once_and_keeps_state() {
        let mut editor = Editor::new(BrokenRasterizer);
        editor.update(|store| store.set_headline("Keep me"));
        let revision = editor.store().revision();
        let profile = editor.export_profile();

        let mut delivery = MemoryDelivery::default();
        let mut notifier = CollectingNotifier::default();
        assert!(editor.export(&mut delivery, &mut notifier).is_err());

        assert_eq!(notifier.failures, vec![EXPORT_FAILURE_MESSAGE.to_string()]);
        assert!(notifier.successes.is_empty());
        assert!(delivery.delivered.is_empty());
        assert_eq!(editor.store().revision(), revision);
        assert_eq!(editor.export_profile(), profile);

        // Still editable afterwards
        editor.update(|store| store.set_headline("Retry"));
        assert_eq!(editor.composition().headline.text, "Retry");
    }

    #[test]
    fn export_uses_snapshot_taken_at_start() {
        let mut editor = Editor::new(BlankRasterizer::default());
        let job = editor.begin_export();
        editor.update(|store| store.select_size_by_name("Billboard"));

        let mut delivery = MemoryDelivery::default();
        let mut notifier = CollectingNotifier::default();
        let artifact = editor
            .export_job(&job, 5, &mut delivery, &mut notifier)
            .unwrap();
        assert_eq!(artifact.filename, "ad-instagram-post-5.png");
        assert_eq!(artifact.size, SizePx::new(2160, 2160));
    }

    #[test]
    fn control_characters_in_text_still_export() {
        let mut editor = Editor::default();
        editor.update(|store| {
            store.select_size_by_name("Google Display");
            store.set_headline("Sale\u{7}Now");
            store.set_logo_text("\u{1b}ACME\u{ffff}");
        });

        let mut delivery = MemoryDelivery::default();
        let mut notifier = CollectingNotifier::default();
        let artifact = editor.export(&mut delivery, &mut notifier).unwrap();
        assert_eq!(artifact.size, SizePx::new(1940, 500));
        assert!(notifier.failures.is_empty());
        assert_eq!(delivery.delivered.len(), 1);
    }

    #[test]
    fn profile_round_trip_through_editor() {
        let mut editor = Editor::new(BlankRasterizer::default());
        let mut profile = EditorProfile::new();
        profile.headline = "From profile".into();
        profile.size = "Facebook Ad".into();
        profile.logo.enabled = false;

        editor.apply_profile(&profile);
        assert_eq!(editor.composition().headline.text, "From profile");
        assert_eq!(editor.composition().size, SizePx::new(1200, 628));
        assert!(editor.composition().logo.is_none());
        assert_eq!(editor.export_profile(), profile);
    }

    #[test]
    fn custom_viewport() {
        let viewport = PreviewViewport::new(540.0, 540.0);
        let editor = Editor::new(BlankRasterizer::default()).with_viewport(viewport);
        assert_eq!(editor.preview_scale(), 0.5);
        assert_eq!(editor.preview_transform().to_css(), "scale(0.5)");
    }
}
