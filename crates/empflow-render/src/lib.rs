#![forbid(unsafe_code)]

//! Headless layout and SVG output for the empflow infographic.
//!
//! [`layout_flowchart`] turns slot inputs plus a token set into a [`model::FlowchartLayout`]
//! in frame pixels; [`svg::render_flowchart_svg`] serializes that layout.

pub mod animation;
pub mod layout;
pub mod model;
pub mod overrides;
pub mod svg;
pub mod text;

pub use layout::layout_flowchart;

use crate::text::{DeterministicTextMeasurer, TextMeasurer};
use empflow_core::Theme;
use std::sync::Arc;

#[derive(Clone)]
pub struct LayoutOptions {
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
    pub theme: Theme,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
            theme: Theme::default(),
        }
    }
}

impl LayoutOptions {
    pub fn with_theme(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }
}
