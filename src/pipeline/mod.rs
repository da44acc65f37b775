//! Text-layer reconstruction pipeline.
//!
//! One page flows through the pipeline as a single non-preemptible unit:
//!
//! ```text
//! RawGlyphRun[] + Viewport
//!     ↓
//! [normalize_runs] (geometry extraction)
//!     ↓
//! NormalizedItem[] (single intermediate representation)
//!     ↓
//! [ReadingOrderStrategy] (pluggable ordering)
//!     ↓
//! [merge_spans] (de-fragmentation)
//!     ↓
//! [Materializer] (positioned, width-corrected boxes)
//!     ↓
//! PageLayer (items + spans + boxes, scale-scoped)
//! ```
//!
//! A run is triggered by a page entering the visible/pre-load region or by
//! its scale changing while visible. Starting a new run for the same page
//! supersedes any in-flight run: the [`PageController`] hands out
//! generation-stamped [`RunToken`]s, and a stale token turns the pipeline's
//! next stage boundary into [`Error::Cancelled`] — an expected, silent
//! outcome. The interactive consumers (selection mapping, stroke
//! extraction) read the finished [`PageLayer`] synchronously and never
//! mutate it.

pub mod config;
pub mod reading_order;

pub use config::{LayoutProfile, ReadingOrderConfig, TextLayerConfig};
pub use reading_order::{
    create_strategy, BaselineStrategy, ColumnAwareStrategy, OrderingContext, ReadingOrderStrategy,
};

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::content::{ContentProvider, PageRaster, PageTextContent, Viewport};
use crate::error::{Error, Result};
use crate::extractors::ocr::{should_attempt_ocr, OcrEngine, OcrStatus};
use crate::extractors::{normalize_ocr_words, normalize_runs};
use crate::layout::{
    merge_spans, page_plain_text, FontRequestCache, FontSource, LayoutBox, Materializer,
    MergedSpan, NormalizedItem, WidthMeasurer,
};

/// Issues generation-stamped run tokens for one page and cancels
/// superseded runs.
///
/// Beginning a new run invalidates every token issued before it; the
/// cancelled pipeline observes this at its next stage boundary. There is no
/// retry; the newer run is already the restart.
#[derive(Debug, Default)]
pub struct PageController {
    generation: Arc<AtomicU64>,
}

impl PageController {
    /// Create a controller with no runs issued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new run, superseding any in-flight one.
    pub fn begin_run(&self) -> RunToken {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        RunToken {
            current: Arc::clone(&self.generation),
            generation,
        }
    }
}

/// Cancellation token for one pipeline run.
#[derive(Debug, Clone)]
pub struct RunToken {
    current: Arc<AtomicU64>,
    generation: u64,
}

impl RunToken {
    /// Whether a newer run has superseded this one.
    pub fn is_cancelled(&self) -> bool {
        self.current.load(Ordering::SeqCst) != self.generation
    }

    /// Stage-boundary check: `Err(Error::Cancelled)` once superseded.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(Error::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// A fully reconstructed, scale-scoped text layer for one page.
///
/// Owned exclusively by the page's pipeline instance; discarded and
/// recomputed whenever the scale changes or the page leaves the
/// visible/pre-load region.
#[derive(Debug)]
pub struct PageLayer {
    /// Page number (0-indexed)
    pub page_number: u32,
    /// Scale every coordinate in this layer was produced at
    pub scale: f32,
    /// Normalized items in reading order
    pub items: Vec<NormalizedItem>,
    /// Merged spans in reading order
    pub spans: Vec<MergedSpan>,
    /// Materialized boxes, one per span
    pub boxes: Vec<LayoutBox>,
    /// Whether the page carried embedded glyph runs
    pub has_embedded_text: bool,
    /// State of the background OCR task for this page
    pub ocr_status: OcrStatus,
}

impl PageLayer {
    /// The page's text with reading-flow separators, as handed to the
    /// clipboard on native copy.
    pub fn plain_text(&self, config: &TextLayerConfig) -> String {
        page_plain_text(
            &self.spans,
            config.reading_order.column_mode,
            &config.separators,
        )
    }
}

/// The text-layer pipeline - orchestrates the full flow for one page.
pub struct TextLayerPipeline {
    config: TextLayerConfig,
    strategy: Box<dyn ReadingOrderStrategy>,
}

impl TextLayerPipeline {
    /// Create a pipeline with default configuration.
    pub fn new() -> Self {
        Self::with_config(TextLayerConfig::default())
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(config: TextLayerConfig) -> Self {
        let strategy = create_strategy(&config.reading_order);
        Self { config, strategy }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &TextLayerConfig {
        &self.config
    }

    /// Reconstruct a page's text layer from its glyph runs.
    ///
    /// Runs extraction, ordering, merging and materialization as one unit,
    /// checking `token` between stages. Returns [`Error::Cancelled`] when
    /// superseded and [`Error::InvalidViewport`] for a degenerate scale.
    #[allow(clippy::too_many_arguments)]
    pub fn process(
        &self,
        page_number: u32,
        content: &PageTextContent,
        viewport: &Viewport,
        measurer: &dyn WidthMeasurer,
        fonts: &dyn FontSource,
        font_requests: &mut FontRequestCache,
        token: &RunToken,
    ) -> Result<PageLayer> {
        if !(viewport.scale.is_finite() && viewport.scale > 0.0) {
            return Err(Error::InvalidViewport(format!(
                "scale {} is not a positive finite number",
                viewport.scale
            )));
        }

        token.check()?;
        let mut items = normalize_runs(&content.runs, viewport);

        token.check()?;
        let context = OrderingContext::new(page_number, viewport.width);
        self.strategy.apply(&mut items, &context);

        token.check()?;
        let spans = merge_spans(items.clone(), &self.config.merge);

        token.check()?;
        let mut materializer = Materializer::new(
            self.config.materialize,
            measurer,
            fonts,
            font_requests,
        );
        let boxes = materializer.materialize(&spans, &content.font_hints);

        log::debug!(
            "Page {} materialized: {} runs -> {} spans at scale {}",
            page_number,
            content.runs.len(),
            boxes.len(),
            viewport.scale
        );

        Ok(PageLayer {
            page_number,
            scale: viewport.scale,
            items,
            spans,
            boxes,
            has_embedded_text: content.has_text(),
            ocr_status: OcrStatus::NotAttempted,
        })
    }

    /// Fetch a page's content from the provider and reconstruct its layer.
    ///
    /// Convenience entry point for the viewport trigger path: builds the
    /// viewport, fetches the text content, then runs [`Self::process`]. The
    /// token is checked before the fetch, so a superseded run never issues
    /// one; a fetch torn down mid-flight surfaces the provider's
    /// [`Error::Cancelled`] unchanged.
    #[allow(clippy::too_many_arguments)]
    pub fn process_from_provider(
        &self,
        provider: &dyn ContentProvider,
        page_number: u32,
        scale: f32,
        measurer: &dyn WidthMeasurer,
        fonts: &dyn FontSource,
        font_requests: &mut FontRequestCache,
        token: &RunToken,
    ) -> Result<PageLayer> {
        token.check()?;
        let viewport = provider.viewport(page_number, scale);
        let content = provider.text_content(page_number)?;
        self.process(
            page_number,
            &content,
            &viewport,
            measurer,
            fonts,
            font_requests,
            token,
        )
    }

    /// Run the background OCR task for an image-only page and fold the
    /// recognized words into its layer.
    ///
    /// No-op unless the gate holds (page materialized without embedded
    /// text, still visible, OCR not yet attempted). Recognized words skip
    /// the merge pass — they are already atomic — and are materialized
    /// directly. Engine failure marks the page [`OcrStatus::Failed`] and
    /// propagates the error for logging; the page remains usable as an
    /// image-only page.
    #[allow(clippy::too_many_arguments)]
    pub fn run_ocr(
        &self,
        layer: &mut PageLayer,
        engine: &dyn OcrEngine,
        raster: &PageRaster,
        visible: bool,
        measurer: &dyn WidthMeasurer,
        fonts: &dyn FontSource,
        font_requests: &mut FontRequestCache,
        progress: &mut dyn FnMut(f32),
    ) -> Result<()> {
        if !should_attempt_ocr(true, layer.has_embedded_text, visible, layer.ocr_status) {
            log::debug!("Skipping OCR for page {}", layer.page_number);
            return Ok(());
        }

        layer.ocr_status = OcrStatus::Running { progress: 0.0 };
        let words = match engine.recognize(raster, progress) {
            Ok(words) => words,
            Err(err) => {
                layer.ocr_status = OcrStatus::Failed;
                log::warn!("OCR failed on page {}: {}", layer.page_number, err);
                return Err(err);
            },
        };

        let items = normalize_ocr_words(&words, raster.scale, layer.scale);
        let mut materializer = Materializer::new(
            self.config.materialize,
            measurer,
            fonts,
            font_requests,
        );
        let boxes = materializer.materialize(&items, &HashMap::new());

        log::debug!(
            "OCR produced {} words on page {}",
            items.len(),
            layer.page_number
        );

        layer.spans.extend(items.iter().cloned());
        layer.items.extend(items);
        layer.boxes.extend(boxes);
        layer.ocr_status = OcrStatus::Complete;
        Ok(())
    }
}

impl Default for TextLayerPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-page text layers for the currently relevant region of the document.
///
/// Layers are owned here exclusively; the single-threaded cooperative
/// model needs no locking. Pages are evicted when they leave the
/// visible/pre-load region, and replaced when their scale changes.
#[derive(Debug, Default)]
pub struct LayerStore {
    layers: HashMap<u32, PageLayer>,
}

impl LayerStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a page needs a (re)build at the given scale.
    pub fn needs_refresh(&self, page: u32, scale: f32) -> bool {
        match self.layers.get(&page) {
            Some(layer) => layer.scale != scale,
            None => true,
        }
    }

    /// Insert or replace a page's layer.
    pub fn insert(&mut self, layer: PageLayer) {
        if let Some(old) = self.layers.insert(layer.page_number, layer) {
            log::debug!(
                "Replaced layer for page {} (was scale {})",
                old.page_number,
                old.scale
            );
        }
    }

    /// Get a page's layer, if materialized.
    pub fn get(&self, page: u32) -> Option<&PageLayer> {
        self.layers.get(&page)
    }

    /// Get a page's layer mutably (OCR task updates).
    pub fn get_mut(&mut self, page: u32) -> Option<&mut PageLayer> {
        self.layers.get_mut(&page)
    }

    /// Drop a page's layer when it leaves the visible/pre-load region.
    pub fn evict(&mut self, page: u32) -> bool {
        self.layers.remove(&page).is_some()
    }

    /// Keep only the pages the predicate approves of.
    pub fn retain_visible<F: FnMut(u32) -> bool>(&mut self, mut visible: F) {
        self.layers.retain(|page, _| visible(*page));
    }

    /// Number of materialized pages.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether no page is materialized.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Coverage statistics over the materialized pages.
    pub fn stats(&self) -> LayerStats {
        LayerStats {
            pages: self.layers.len(),
            ocr_pages: self
                .layers
                .values()
                .filter(|l| l.ocr_status == OcrStatus::Complete)
                .count(),
            box_count: self.layers.values().map(|l| l.boxes.len()).sum(),
        }
    }
}

/// Statistics about materialized text layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerStats {
    /// Pages with a materialized layer
    pub pages: usize,
    /// Pages whose text came from OCR
    pub ocr_pages: usize,
    /// Total layout boxes across all pages
    pub box_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_token_supersession() {
        let controller = PageController::new();

        let first = controller.begin_run();
        assert!(!first.is_cancelled());
        assert!(first.check().is_ok());

        let second = controller.begin_run();
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());

        let err = first.check().unwrap_err();
        assert!(err.is_cancelled());
    }

    #[test]
    fn test_layer_store_refresh_and_evict() {
        let mut store = LayerStore::new();
        assert!(store.needs_refresh(0, 1.0));

        store.insert(PageLayer {
            page_number: 0,
            scale: 1.0,
            items: Vec::new(),
            spans: Vec::new(),
            boxes: Vec::new(),
            has_embedded_text: true,
            ocr_status: OcrStatus::NotAttempted,
        });

        assert!(!store.needs_refresh(0, 1.0));
        // Scale change invalidates the layer.
        assert!(store.needs_refresh(0, 1.5));

        assert!(store.evict(0));
        assert!(!store.evict(0));
        assert!(store.is_empty());
    }

    #[test]
    fn test_layer_store_retain_visible() {
        let mut store = LayerStore::new();
        for page in 0..4 {
            store.insert(PageLayer {
                page_number: page,
                scale: 1.0,
                items: Vec::new(),
                spans: Vec::new(),
                boxes: Vec::new(),
                has_embedded_text: true,
                ocr_status: OcrStatus::NotAttempted,
            });
        }

        store.retain_visible(|page| (1..=2).contains(&page));
        assert_eq!(store.len(), 2);
        assert!(store.get(0).is_none());
        assert!(store.get(1).is_some());
        assert!(store.get(2).is_some());
    }

    #[test]
    fn test_layer_store_stats() {
        let mut store = LayerStore::new();
        for page in 0..2 {
            store.insert(PageLayer {
                page_number: page,
                scale: 1.0,
                items: Vec::new(),
                spans: Vec::new(),
                boxes: Vec::new(),
                has_embedded_text: page == 0,
                ocr_status: OcrStatus::NotAttempted,
            });
        }

        store.get_mut(1).unwrap().ocr_status = OcrStatus::Complete;

        let stats = store.stats();
        assert_eq!(stats.pages, 2);
        assert_eq!(stats.ocr_pages, 1);
        assert_eq!(stats.box_count, 0);
    }
}
