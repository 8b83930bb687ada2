use serde::{Deserialize, Serialize};

/// Browser viewport (window inner size) in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: sanitize_px(width),
            height: sanitize_px(height),
        }
    }

    /// One percent of the smaller viewport side (CSS `1vmin`).
    pub fn vmin(&self) -> f64 {
        self.width.min(self.height) / 100.0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
        }
    }
}

/// Rendered size of the container element the template is drawn into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerSize {
    pub width: f64,
    pub height: f64,
}

impl ContainerSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: sanitize_px(width),
            height: sanitize_px(height),
        }
    }

    /// A container that has not been laid out yet reports a zero box; such a measurement is
    /// treated as "not measured".
    pub fn is_measured(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Everything the token calculator and the layout need to know about the environment.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Measurement {
    pub container: Option<ContainerSize>,
    pub viewport: Viewport,
}

impl Measurement {
    pub fn new(container: Option<ContainerSize>, viewport: Viewport) -> Self {
        Self {
            container,
            viewport,
        }
    }

    /// The container when it has a usable (non-empty) box.
    pub fn measured_container(&self) -> Option<ContainerSize> {
        self.container.filter(ContainerSize::is_measured)
    }
}

fn sanitize_px(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewportClass {
    Mobile,
    Tablet,
    Desktop,
    Large,
}

impl ViewportClass {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewportClass::Mobile => "mobile",
            ViewportClass::Tablet => "tablet",
            ViewportClass::Desktop => "desktop",
            ViewportClass::Large => "large",
        }
    }
}

impl std::fmt::Display for ViewportClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Width class plus the independent "tall" flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewportProfile {
    pub class: ViewportClass,
    pub tall: bool,
}

impl ViewportProfile {
    pub fn is_mobile(&self) -> bool {
        self.class == ViewportClass::Mobile
    }

    pub fn is_tablet(&self) -> bool {
        self.class == ViewportClass::Tablet
    }

    pub fn is_large(&self) -> bool {
        self.class == ViewportClass::Large
    }
}

impl Default for ViewportProfile {
    fn default() -> Self {
        Self {
            class: ViewportClass::Desktop,
            tall: false,
        }
    }
}

/// Viewport thresholds in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Breakpoints {
    /// Widths up to and including this value are mobile.
    pub mobile_max_width: f64,
    /// Widths up to and including this value (and above mobile) are tablet.
    pub tablet_max_width: f64,
    /// Widths strictly above this value are large.
    pub large_min_width: f64,
    /// Heights strictly above this value are tall.
    pub tall_min_height: f64,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            mobile_max_width: 768.0,
            tablet_max_width: 1024.0,
            large_min_width: 1920.0,
            tall_min_height: 1080.0,
        }
    }
}

impl Breakpoints {
    pub fn classify(&self, viewport: Viewport) -> ViewportProfile {
        let w = viewport.width;
        let class = if w <= self.mobile_max_width {
            ViewportClass::Mobile
        } else if w <= self.tablet_max_width {
            ViewportClass::Tablet
        } else if w > self.large_min_width {
            ViewportClass::Large
        } else {
            ViewportClass::Desktop
        };
        ViewportProfile {
            class,
            tall: viewport.height > self.tall_min_height,
        }
    }
}
