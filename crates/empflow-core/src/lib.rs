#![forbid(unsafe_code)]

//! Responsive scale tokens and slot inputs for the empflow infographic (headless).
//!
//! Design goals:
//! - pure, deterministic token derivation from a container/viewport measurement
//! - presence-driven slot inputs (absent values are a normal state, never an error)
//! - runtime-agnostic: no I/O, no executor, no global state

pub mod config;
pub mod error;
pub mod format;
pub mod geom;
pub mod inputs;
pub mod observer;
pub mod scale;
pub mod theme;
pub mod tokens;
pub mod viewport;

pub use config::{EmpflowConfig, Settings};
pub use error::{Error, Result};
pub use format::format_stat;
pub use inputs::{CenterImage, Corner, DisplayValue, ErpRow, InputFormat, SlotInputs, StatCell, StatIcon};
pub use observer::ScaleObserver;
pub use scale::{ClampRange, ScaleProfile};
pub use theme::Theme;
pub use tokens::{ScaleTokens, TokenName};
pub use viewport::{Breakpoints, ContainerSize, Measurement, Viewport, ViewportClass, ViewportProfile};

/// Classifies a viewport and derives the token set for one measurement.
///
/// Convenience over [`ScaleProfile::compute`] for callers that only hold [`Settings`].
pub fn compute_tokens(settings: &Settings, measurement: &Measurement) -> ScaleTokens {
    settings.scale.compute(measurement, &settings.breakpoints)
}
