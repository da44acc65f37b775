//! Dump a reconstructed text layer for a page of glyph runs.
//!
//! Reads a JSON array of glyph runs, runs the full pipeline and prints the
//! merged spans, their boxes and the plain-text rendering. Useful when
//! diagnosing merge or reading-order defects on a captured page.
//!
//! Usage:
//!   cargo run --bin dump_layer -- runs.json
//!   cargo run --bin dump_layer -- runs.json --scale 2.0 --columns
//!
//! Input format:
//!   [{"text": "Hel", "matrix": [12, 0, 0, 12, 0, 100], "width": 20, "font": "F1"}, ...]

use std::fs;
use std::process::ExitCode;

use serde::Deserialize;

use textlayer::content::{PageTextContent, RawGlyphRun, Viewport};
use textlayer::geometry::Transform;
use textlayer::layout::{FontDescriptor, FontRequestCache, FontSource, WidthMeasurer};
use textlayer::pipeline::{LayoutProfile, PageController, TextLayerPipeline};

#[derive(Debug, Deserialize)]
struct RunSpec {
    text: String,
    matrix: [f32; 6],
    #[serde(default)]
    width: Option<f32>,
    #[serde(default = "default_font")]
    font: String,
}

fn default_font() -> String {
    "F1".to_string()
}

struct DumpConfig {
    input: String,
    scale: f32,
    columns: bool,
    page_width: f32,
}

impl DumpConfig {
    fn from_args() -> Option<Self> {
        let args: Vec<String> = std::env::args().collect();
        let mut input = None;
        let mut scale = 1.0;
        let mut columns = false;
        let mut page_width = 612.0;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--scale" => {
                    i += 1;
                    scale = args.get(i)?.parse().ok()?;
                },
                "--page-width" => {
                    i += 1;
                    page_width = args.get(i)?.parse().ok()?;
                },
                "--columns" => {
                    columns = true;
                },
                other => {
                    input = Some(other.to_string());
                },
            }
            i += 1;
        }

        Some(Self {
            input: input?,
            scale,
            columns,
            page_width,
        })
    }
}

/// Length-based measurer standing in for a rendering surface.
struct HeuristicMeasurer;

impl WidthMeasurer for HeuristicMeasurer {
    fn measure_rendered_width(&self, text: &str, font: &FontDescriptor) -> f32 {
        text.chars().count() as f32 * font.size * 0.5
    }
}

struct OfflineFonts;

impl FontSource for OfflineFonts {
    fn has_family(&self, _family: &str) -> bool {
        true
    }

    fn request_family(&self, _family: &str) {}
}

fn main() -> ExitCode {
    env_logger::init();

    let Some(config) = DumpConfig::from_args() else {
        eprintln!("Usage: dump_layer <runs.json> [--scale S] [--columns] [--page-width W]");
        return ExitCode::FAILURE;
    };

    let raw = match fs::read_to_string(&config.input) {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("Error reading {}: {}", config.input, e);
            return ExitCode::FAILURE;
        },
    };

    let specs: Vec<RunSpec> = match serde_json::from_str(&raw) {
        Ok(specs) => specs,
        Err(e) => {
            eprintln!("Error parsing {}: {}", config.input, e);
            return ExitCode::FAILURE;
        },
    };

    let runs: Vec<RawGlyphRun> = specs
        .into_iter()
        .map(|spec| RawGlyphRun {
            text: spec.text,
            transform: Transform { m: spec.matrix },
            declared_width: spec.width,
            font_id: spec.font,
        })
        .collect();

    let profile = if config.columns {
        LayoutProfile::DoublePage
    } else {
        LayoutProfile::SinglePage
    };
    let pipeline = TextLayerPipeline::with_config(profile.create_config());
    let controller = PageController::new();
    let mut font_requests = FontRequestCache::new();

    let content = PageTextContent {
        runs,
        font_hints: Default::default(),
    };
    let viewport = Viewport::axis_aligned(
        config.scale,
        config.page_width * config.scale,
        792.0 * config.scale,
    );

    let layer = match pipeline.process(
        0,
        &content,
        &viewport,
        &HeuristicMeasurer,
        &OfflineFonts,
        &mut font_requests,
        &controller.begin_run(),
    ) {
        Ok(layer) => layer,
        Err(e) => {
            eprintln!("Pipeline failed: {}", e);
            return ExitCode::FAILURE;
        },
    };

    println!("{} spans at scale {}:", layer.spans.len(), layer.scale);
    for (layout_box, span) in layer.boxes.iter().zip(layer.spans.iter()) {
        println!(
            "  [{:8.2} {:8.2} {:8.2}x{:5.2}] scale_x={:.3} {:?}",
            layout_box.page_x,
            layout_box.page_top,
            layout_box.page_width,
            layout_box.page_height,
            layout_box.horizontal_scale,
            span.text
        );
    }
    println!("\nPlain text:\n{}", layer.plain_text(pipeline.config()));

    ExitCode::SUCCESS
}
