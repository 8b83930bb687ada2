//! Breakpoint-specific adjustments layered over the token-driven layout.
//!
//! Tokens already scale everything continuously; these are the few places where a viewport
//! class switches to a different rule outright.

use empflow_core::{ClampRange, ScaleTokens, Viewport, ViewportProfile};
use serde::{Deserialize, Serialize};

/// Fixed card sizes used on mobile instead of frame fractions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedCardSizes {
    pub corner_width: f64,
    pub corner_height: f64,
    pub center_height: f64,
    pub card_padding: f64,
    pub big_number_size: f64,
}

pub const MOBILE_CARDS: FixedCardSizes = FixedCardSizes {
    corner_width: 80.0,
    corner_height: 60.0,
    center_height: 70.0,
    card_padding: 5.0,
    big_number_size: 20.0,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakpointOverrides {
    /// Length of the parallel return line as a fraction of its full run.
    pub straight_extent: f64,
    /// Arrow glyph width as a fraction of the frame width.
    pub arrow_fraction: f64,
    pub fixed_cards: Option<FixedCardSizes>,
    /// Stats and ERP text use viewport-relative compact sizes.
    pub compact_text: bool,
}

impl BreakpointOverrides {
    pub fn for_profile(profile: ViewportProfile) -> Self {
        let straight_extent = if profile.tall {
            0.75
        } else if profile.is_large() {
            0.7
        } else {
            0.6
        };
        let arrow_fraction = if profile.is_mobile() {
            0.038
        } else if profile.is_large() {
            0.018
        } else {
            0.015
        };
        Self {
            straight_extent,
            arrow_fraction,
            fixed_cards: profile.is_mobile().then_some(MOBILE_CARDS),
            compact_text: profile.is_mobile(),
        }
    }

    /// Arrow glyph size: the frame fraction, kept between 12 px and the arrow token.
    pub fn arrow_size(&self, frame_width: f64, tokens: &ScaleTokens) -> f64 {
        ClampRange::new(12.0, tokens.arrow_width.max(12.0)).clamp(self.arrow_fraction * frame_width)
    }
}

/// Sizes and gaps for stat rows and the ERP block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextMetricsSet {
    pub value_size: f64,
    pub suffix_size: f64,
    pub icon_size: f64,
    pub row_gap: f64,
    pub column_gap: f64,
    pub pair_gap: f64,
    pub erp_row_gap: f64,
}

impl TextMetricsSet {
    pub fn resolve(tokens: &ScaleTokens, overrides: &BreakpointOverrides, viewport: Viewport) -> Self {
        let vmin = viewport.vmin();
        if overrides.compact_text {
            return Self {
                value_size: ClampRange::new(12.0, 16.0).clamp(3.5 * vmin),
                suffix_size: ClampRange::new(10.0, 12.0).clamp(2.5 * vmin),
                icon_size: ClampRange::new(12.0, 16.0).clamp(3.0 * vmin),
                row_gap: 2.0,
                column_gap: 2.0,
                pair_gap: 4.0,
                erp_row_gap: 2.0,
            };
        }
        Self {
            value_size: tokens.stat_size,
            suffix_size: tokens.suffix_size,
            icon_size: tokens.icon_size,
            row_gap: ClampRange::new(6.0, 12.0).clamp(vmin),
            column_gap: ClampRange::new(4.0, 10.0).clamp(vmin),
            pair_gap: ClampRange::new(8.0, 16.0).clamp(2.0 * vmin),
            erp_row_gap: ClampRange::new(4.0, 10.0).clamp(vmin),
        }
    }
}
