// 🥧 Proportional-Angle Engine - radial chart spans
//
// The circle is divided by participant COUNT, not by share weight.
// Spans are positioned by participant index and are not compacted around
// the exempt participant, so the chart matches the legend order.

use serde::{Deserialize, Serialize};

/// Chart colours, cycled by participant index
pub const PALETTE: [&str; 5] = ["#FF6B6B", "#4ECDC4", "#45B7D1", "#FFA07A", "#FFD93D"];

pub fn color_for(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngleSpan {
    pub index: usize,

    /// Degrees, inclusive
    pub start: f64,

    /// Degrees, exclusive
    pub end: f64,

    /// `None` for the exempt participant
    pub color: Option<String>,
}

impl AngleSpan {
    pub fn sweep(&self) -> f64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.color.is_none() || self.sweep() == 0.0
    }
}

/// Degrees per non-exempt participant. Non-finite when nobody is left.
pub fn angle_per_person(num_people: usize, exempt_index: Option<usize>) -> f64 {
    let active = num_people.saturating_sub(usize::from(exempt_index.is_some()));
    360.0 / active as f64
}

pub fn compute_angles(num_people: usize, exempt_index: Option<usize>) -> Vec<AngleSpan> {
    let per_person = angle_per_person(num_people, exempt_index);

    (0..num_people)
        .map(|i| {
            let start = i as f64 * per_person;
            if Some(i) == exempt_index {
                AngleSpan {
                    index: i,
                    start,
                    end: start,
                    color: None,
                }
            } else {
                AngleSpan {
                    index: i,
                    start,
                    end: (i + 1) as f64 * per_person,
                    color: Some(color_for(i).to_string()),
                }
            }
        })
        .collect()
}

/// CSS `conic-gradient(...)` for the web chart. Exempt spans are skipped.
pub fn conic_gradient(spans: &[AngleSpan]) -> String {
    let stops: Vec<String> = spans
        .iter()
        .filter_map(|span| {
            span.color
                .as_ref()
                .map(|color| format!("{} {}deg {}deg", color, span.start, span.end))
        })
        .collect();

    format!("conic-gradient({})", stops.join(", "))
}
