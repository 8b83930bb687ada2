use crate::scale::{ClassFactors, ScaleProfile};
use crate::tokens::TokenName;
use crate::theme::Theme;
use crate::viewport::Breakpoints;
use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Untyped settings document (JSON object), merged from one or more sources.
#[derive(Debug, Clone, PartialEq)]
pub struct EmpflowConfig(Value);

impl Default for EmpflowConfig {
    fn default() -> Self {
        Self::empty_object()
    }
}

impl EmpflowConfig {
    pub fn empty_object() -> Self {
        Self(Value::Object(Map::new()))
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text).map_err(|e| invalid("", e))?;
        Ok(Self(value))
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::empty_object());
        }
        let value: Value = serde_yaml::from_str(text).map_err(|e| invalid("", e))?;
        Ok(Self(value))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn get(&self, dotted_path: &str) -> Option<&Value> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        Some(cur)
    }

    pub fn get_str(&self, dotted_path: &str) -> Option<&str> {
        self.get(dotted_path)?.as_str()
    }

    pub fn get_f64(&self, dotted_path: &str) -> Option<f64> {
        self.get(dotted_path)?.as_f64()
    }

    pub fn set_value(&mut self, dotted_path: &str, value: Value) {
        // Configs are objects; coerce anything else so this never panics on user input.
        if !self.0.is_object() {
            self.0 = Value::Object(Map::new());
        }

        let Value::Object(ref mut root) = self.0 else {
            return;
        };
        let mut cur: &mut Map<String, Value> = root;
        let mut segments = dotted_path.split('.').peekable();
        while let Some(seg) = segments.next() {
            if segments.peek().is_none() {
                cur.insert(seg.to_string(), value);
                return;
            }
            let slot = cur.entry(seg).or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            let Some(next) = slot.as_object_mut() else {
                return;
            };
            cur = next;
        }
    }

    pub fn deep_merge(&mut self, other: &Value) {
        deep_merge_value(&mut self.0, other);
    }
}

fn deep_merge_value(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge_value(base_value, in_value),
                    None => {
                        base_map.insert(key.clone(), in_value.clone());
                    }
                }
            }
        }
        (base_slot, in_value) => {
            *base_slot = in_value.clone();
        }
    }
}

fn invalid(path: &str, err: impl std::fmt::Display) -> Error {
    Error::InvalidConfig {
        path: path.to_string(),
        message: err.to_string(),
    }
}

/// Typed view over an [`EmpflowConfig`].
///
/// ```yaml
/// breakpoints:
///   mobileMaxWidth: 640
/// scale:
///   large: { scale: 1.5, scaleCeil: 2.5, line: 1.4, font: 1.2, card: 1.15 }
/// theme:
///   dotColor: "#0a84ff"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub breakpoints: Breakpoints,
    pub scale: ScaleProfile,
    pub theme: Theme,
}

const SECTIONS: [&str; 3] = ["breakpoints", "scale", "theme"];

impl Settings {
    pub fn from_config(config: &EmpflowConfig) -> Result<Self> {
        let Some(root) = config.as_value().as_object() else {
            return Err(invalid("", "settings must be an object"));
        };
        if let Some(unknown) = root.keys().find(|k| !SECTIONS.contains(&k.as_str())) {
            return Err(invalid(unknown, "unknown settings section"));
        }

        let settings = Self {
            breakpoints: section(config, "breakpoints")?,
            scale: section(config, "scale")?,
            theme: section(config, "theme")?,
        };
        settings.validate()?;
        tracing::debug!(
            overridden = root.len(),
            mobile_max_width = settings.breakpoints.mobile_max_width,
            "loaded settings"
        );
        Ok(settings)
    }
}

impl Settings {
    /// Rejects values that would break token clamping or animation timing.
    pub fn validate(&self) -> Result<()> {
        let b = &self.breakpoints;
        for (key, v) in [
            ("mobileMaxWidth", b.mobile_max_width),
            ("tabletMaxWidth", b.tablet_max_width),
            ("largeMinWidth", b.large_min_width),
            ("tallMinHeight", b.tall_min_height),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(invalid(&format!("breakpoints.{key}"), "must be a non-negative number"));
            }
        }
        if b.tablet_max_width < b.mobile_max_width {
            return Err(invalid(
                "breakpoints.tabletMaxWidth",
                format!("must not be below mobileMaxWidth ({})", b.mobile_max_width),
            ));
        }
        if b.large_min_width < b.tablet_max_width {
            return Err(invalid(
                "breakpoints.largeMinWidth",
                format!("must not be below tabletMaxWidth ({})", b.tablet_max_width),
            ));
        }

        let scale = &self.scale;
        positive("scale.designWidth", scale.design_width)?;
        positive("scale.designHeight", scale.design_height)?;
        for (key, factors) in [
            ("mobile", &scale.mobile),
            ("tablet", &scale.tablet),
            ("desktop", &scale.desktop),
            ("large", &scale.large),
        ] {
            validate_factors(key, factors)?;
        }
        positive("scale.tallBoost.line", scale.tall_boost.line)?;
        positive("scale.tallBoost.card", scale.tall_boost.card)?;
        for name in TokenName::ALL {
            let range = scale.ranges.get(name);
            if !range.min.is_finite() || !range.max.is_finite() || range.min > range.max {
                return Err(invalid(
                    &format!("scale.ranges.{}", name.key()),
                    format!("min ({}) must not exceed max ({})", range.min, range.max),
                ));
            }
        }

        positive("theme.animationPeriod", self.theme.animation_period)?;
        if !(0.0..=1.0).contains(&self.theme.shadow_opacity) {
            return Err(invalid("theme.shadowOpacity", "must be between 0 and 1"));
        }
        if !self.theme.shadow_blur.is_finite() || self.theme.shadow_blur < 0.0 {
            return Err(invalid("theme.shadowBlur", "must be a non-negative number"));
        }
        Ok(())
    }
}

fn positive(path: &str, v: f64) -> Result<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(invalid(path, format!("must be a positive number, got {v}")))
    }
}

fn validate_factors(class: &str, f: &ClassFactors) -> Result<()> {
    positive(&format!("scale.{class}.scale"), f.scale)?;
    positive(&format!("scale.{class}.line"), f.line)?;
    positive(&format!("scale.{class}.font"), f.font)?;
    positive(&format!("scale.{class}.card"), f.card)?;
    if let Some(floor) = f.scale_floor {
        positive(&format!("scale.{class}.scaleFloor"), floor)?;
    }
    if let Some(ceil) = f.scale_ceil {
        positive(&format!("scale.{class}.scaleCeil"), ceil)?;
    }
    match (f.scale_floor, f.scale_ceil) {
        (Some(floor), Some(ceil)) if floor > ceil => Err(invalid(
            &format!("scale.{class}.scaleFloor"),
            format!("must not exceed scaleCeil ({ceil})"),
        )),
        _ => Ok(()),
    }
}

fn section<T: DeserializeOwned + Default>(config: &EmpflowConfig, key: &str) -> Result<T> {
    match config.get(key) {
        None | Some(Value::Null) => Ok(T::default()),
        Some(v) => T::deserialize(v).map_err(|e| invalid(key, e)),
    }
}
