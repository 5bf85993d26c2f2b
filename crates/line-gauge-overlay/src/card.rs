//! Info-card content model: what the overlay displays for one subject.
//!
//! Backend-agnostic: a binding renders these fields into whatever card
//! surface it owns (a fixed-position DOM node, a TUI popup, a debug log).

use serde::{Deserialize, Serialize};

use line_gauge::LineStats;

/// Stats payload carried by a card.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardStats {
    /// Greatest measured line length.
    pub max: usize,
    /// Median measured line length.
    pub median: f64,
}

impl From<LineStats> for CardStats {
    fn from(value: LineStats) -> Self {
        Self {
            max: value.max,
            median: value.median,
        }
    }
}

/// Content of the floating info card for one hovered subject.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardContent {
    /// Short subject descriptor, e.g. `p#intro.note.wide`.
    pub subject: String,
    /// Measured stats; `None` when the subject holds no measurable text.
    pub stats: Option<CardStats>,
}

impl CardContent {
    /// Body lines in display order.
    pub fn body_lines(&self) -> Vec<String> {
        match &self.stats {
            Some(stats) => vec![
                format!("Median: {}", format_length(stats.median)),
                format!("Max: {}", stats.max),
            ],
            None => vec!["No text found".to_string()],
        }
    }

    /// Footer hint shown under the body.
    pub fn footer(&self) -> &'static str {
        "Esc to close"
    }
}

/// Formats a median without a trailing `.0` when it is integral.
fn format_length(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
