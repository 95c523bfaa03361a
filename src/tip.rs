// 💁 Tip Selection - preset buttons or free-text custom entry

use crate::input::coerce_tip;
use serde::{Deserialize, Serialize};

/// Preset tip percentages offered as buttons
pub const TIP_PRESETS: [f64; 4] = [15.0, 20.0, 25.0, 30.0];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum TipSelection {
    /// Index into [`TIP_PRESETS`]
    Preset(usize),

    /// Raw text typed by the user
    Custom(String),
}

impl TipSelection {
    /// Preset matching `percentage`, otherwise a custom entry
    pub fn from_percentage(percentage: f64) -> Self {
        match TIP_PRESETS.iter().position(|p| *p == percentage) {
            Some(index) => TipSelection::Preset(index),
            None => TipSelection::Custom(percentage.to_string()),
        }
    }

    /// Effective percentage. Custom text goes through numeric coercion, so
    /// garbage yields NaN. An out-of-range preset index falls back to the first preset.
    pub fn percentage(&self) -> f64 {
        match self {
            TipSelection::Preset(index) => TIP_PRESETS.get(*index).copied().unwrap_or(TIP_PRESETS[0]),
            TipSelection::Custom(raw) => coerce_tip(raw),
        }
    }

    pub fn label(&self) -> String {
        match self {
            TipSelection::Preset(_) => format!("{}%", self.percentage()),
            TipSelection::Custom(raw) => format!("custom: {}%", raw),
        }
    }
}

impl Default for TipSelection {
    fn default() -> Self {
        TipSelection::Preset(0)
    }
}
