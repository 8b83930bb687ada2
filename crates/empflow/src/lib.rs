#![forbid(unsafe_code)]

//! `empflow` renders a fixed, responsive flowchart infographic headlessly.
//!
//! The caller supplies the container and viewport sizes it would have measured; token
//! derivation, layout and SVG output are pure functions of that measurement and the slot
//! inputs.
//!
//! # Features
//!
//! - `render`: enable layout + SVG rendering (`empflow::render`)
//! - `raster`: enable PNG/JPG/PDF output via pure-Rust SVG rasterization/conversion

pub use empflow_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use empflow_render::model::FlowchartLayout;
    pub use empflow_render::svg::SvgRenderOptions;
    pub use empflow_render::text::{DeterministicTextMeasurer, TextMeasurer, TextStyle};
    pub use empflow_render::{LayoutOptions, layout_flowchart};

    use base64::Engine as _;
    use empflow_core::{
        EmpflowConfig, InputFormat, Measurement, ScaleTokens, Settings, SlotInputs,
    };
    use std::path::{Path, PathBuf};

    #[cfg(feature = "raster")]
    pub mod raster;

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Core(#[from] empflow_core::Error),
        #[error("failed to read image `{}`: {source}", path.display())]
        Asset {
            path: PathBuf,
            #[source]
            source: std::io::Error,
        },
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Converts an arbitrary string into a conservative SVG `id` token, so several rendered
    /// infographics can be inlined into one document without colliding filter ids.
    ///
    /// This helper:
    /// - trims whitespace
    /// - replaces unsupported characters with `-`
    /// - ensures the id starts with an ASCII letter by prefixing `e-` when needed
    pub fn sanitize_svg_id(raw: &str) -> String {
        let raw = raw.trim();
        if raw.is_empty() {
            return "e-untitled".to_string();
        }

        let mut out = String::with_capacity(raw.len() + 4);
        for ch in raw.chars() {
            let ok = ch.is_ascii_alphanumeric() || ch == '-' || ch == '_';
            out.push(if ok { ch } else { '-' });
        }

        let starts_ok = out.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
        if !starts_ok {
            out.insert_str(0, "e-");
        }

        while out.contains("--") {
            out = out.replace("--", "-");
        }
        let out = out.trim_matches('-');
        if out.is_empty() || out == "e" {
            return "e-untitled".to_string();
        }
        out.to_string()
    }

    /// Synchronous layout helper (executor-free).
    pub fn layout_sync(
        inputs: &SlotInputs,
        measurement: &Measurement,
        settings: &Settings,
        layout_options: &LayoutOptions,
    ) -> FlowchartLayout {
        let tokens = empflow_core::compute_tokens(settings, measurement);
        layout_flowchart(inputs, measurement, &tokens, layout_options)
    }

    /// Synchronous SVG render helper (executor-free).
    pub fn render_svg_sync(
        inputs: &SlotInputs,
        measurement: &Measurement,
        settings: &Settings,
        layout_options: &LayoutOptions,
        svg_options: &SvgRenderOptions,
    ) -> String {
        let layout = layout_sync(inputs, measurement, settings, layout_options);
        empflow_render::svg::render_flowchart_svg(&layout, svg_options)
    }

    pub async fn render_svg(
        inputs: &SlotInputs,
        measurement: &Measurement,
        settings: &Settings,
        layout_options: &LayoutOptions,
        svg_options: &SvgRenderOptions,
    ) -> String {
        render_svg_sync(inputs, measurement, settings, layout_options, svg_options)
    }

    fn mime_for(path: &Path) -> &'static str {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("png") => "image/png",
            Some("jpg" | "jpeg") => "image/jpeg",
            Some("gif") => "image/gif",
            Some("webp") => "image/webp",
            Some("svg") => "image/svg+xml",
            _ => "application/octet-stream",
        }
    }

    fn is_external(reference: &str) -> bool {
        let r = reference.trim();
        r.is_empty() || r.starts_with("data:") || r.contains("://")
    }

    /// Replaces local image paths with `data:` URLs so the SVG is self-contained.
    ///
    /// Relative paths resolve against `base_dir`. URLs and existing data URLs are left alone.
    /// Returns the number of embedded images.
    pub fn embed_local_images(inputs: &mut SlotInputs, base_dir: &Path) -> Result<usize> {
        let mut embedded = 0usize;
        for reference in inputs.image_refs_mut() {
            if is_external(reference) {
                continue;
            }
            let path = base_dir.join(reference.trim());
            let bytes = std::fs::read(&path).map_err(|source| HeadlessError::Asset {
                path: path.clone(),
                source,
            })?;
            let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);
            *reference = format!("data:{};base64,{encoded}", mime_for(&path));
            embedded += 1;
        }
        tracing::debug!(embedded, base_dir = %base_dir.display(), "embedded local images");
        Ok(embedded)
    }

    /// Convenience wrapper that bundles settings and common options for headless rendering.
    ///
    /// It stays runtime-agnostic: all work is CPU-bound and does not perform I/O.
    #[derive(Clone, Default)]
    pub struct HeadlessRenderer {
        pub settings: Settings,
        pub layout: LayoutOptions,
        pub svg: SvgRenderOptions,
    }

    impl HeadlessRenderer {
        pub fn new() -> Self {
            Self::default()
        }

        /// Uses `settings` for scaling and its theme for layout.
        pub fn with_settings(mut self, settings: Settings) -> Self {
            self.layout.theme = settings.theme.clone();
            self.settings = settings;
            self
        }

        pub fn with_config(self, config: &EmpflowConfig) -> Result<Self> {
            Ok(self.with_settings(Settings::from_config(config)?))
        }

        pub fn tokens(&self, measurement: &Measurement) -> ScaleTokens {
            empflow_core::compute_tokens(&self.settings, measurement)
        }

        pub fn parse_inputs(&self, text: &str, format: InputFormat) -> Result<SlotInputs> {
            Ok(SlotInputs::parse(text, format)?)
        }

        pub fn layout_sync(&self, inputs: &SlotInputs, measurement: &Measurement) -> FlowchartLayout {
            layout_sync(inputs, measurement, &self.settings, &self.layout)
        }

        pub fn render_svg_sync(&self, inputs: &SlotInputs, measurement: &Measurement) -> String {
            self.render_svg_sync_with(inputs, measurement, &self.svg)
        }

        pub fn render_svg_sync_with(
            &self,
            inputs: &SlotInputs,
            measurement: &Measurement,
            svg: &SvgRenderOptions,
        ) -> String {
            render_svg_sync(inputs, measurement, &self.settings, &self.layout, svg)
        }

        pub fn render_svg_sync_with_diagram_id(
            &self,
            inputs: &SlotInputs,
            measurement: &Measurement,
            diagram_id: &str,
        ) -> String {
            let mut svg = self.svg.clone();
            svg.diagram_id = Some(sanitize_svg_id(diagram_id));
            self.render_svg_sync_with(inputs, measurement, &svg)
        }

        /// Parses an inputs document and renders it in one step.
        pub fn render_svg_from_str_sync(
            &self,
            text: &str,
            format: InputFormat,
            measurement: &Measurement,
        ) -> Result<String> {
            let inputs = self.parse_inputs(text, format)?;
            Ok(self.render_svg_sync(&inputs, measurement))
        }

        pub async fn render_svg(&self, inputs: &SlotInputs, measurement: &Measurement) -> String {
            self.render_svg_sync(inputs, measurement)
        }

        #[cfg(feature = "raster")]
        pub fn render_png_sync(
            &self,
            inputs: &SlotInputs,
            measurement: &Measurement,
            raster: &raster::RasterOptions,
        ) -> raster::Result<Vec<u8>> {
            raster::svg_to_png(&self.render_svg_sync_static(inputs, measurement), raster)
        }

        #[cfg(feature = "raster")]
        pub fn render_jpeg_sync(
            &self,
            inputs: &SlotInputs,
            measurement: &Measurement,
            raster: &raster::RasterOptions,
        ) -> raster::Result<Vec<u8>> {
            raster::svg_to_jpeg(&self.render_svg_sync_static(inputs, measurement), raster)
        }

        #[cfg(feature = "raster")]
        pub fn render_pdf_sync(
            &self,
            inputs: &SlotInputs,
            measurement: &Measurement,
            raster: &raster::RasterOptions,
        ) -> raster::Result<Vec<u8>> {
            raster::svg_to_pdf_with(&self.render_svg_sync_static(inputs, measurement), raster)
        }

        /// Raster formats are single frames; dots are drawn at their start positions.
        #[cfg(feature = "raster")]
        fn render_svg_sync_static(&self, inputs: &SlotInputs, measurement: &Measurement) -> String {
            let mut svg = self.svg.clone();
            svg.animate = false;
            self.render_svg_sync_with(inputs, measurement, &svg)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn sanitize_svg_id_keeps_safe_tokens() {
            assert_eq!(sanitize_svg_id("chart-1"), "chart-1");
            assert_eq!(sanitize_svg_id("  my chart!  "), "my-chart");
            assert_eq!(sanitize_svg_id("1st"), "e-1st");
            assert_eq!(sanitize_svg_id(""), "e-untitled");
            assert_eq!(sanitize_svg_id("!!!"), "e-untitled");
        }

        #[test]
        fn external_references_are_not_embedded() {
            assert!(is_external("https://example.com/a.png"));
            assert!(is_external("data:image/png;base64,AAAA"));
            assert!(is_external("  "));
            assert!(!is_external("img/a.png"));
            assert_eq!(mime_for(Path::new("a.SVG")), "image/svg+xml");
            assert_eq!(mime_for(Path::new("a.jpeg")), "image/jpeg");
        }
    }
}
