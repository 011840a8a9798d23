/// Generic three-tier severity classification of a derived metric.
///
/// A table carries minor/average/major breakpoints, the direction in which a
/// value gets worse, and a display style. The style only affects formatting
/// for human consumption — classification ignores it.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    None,
    Minor,
    Average,
    Major,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareDirection {
    /// Higher is worse.
    GreaterThan,
    /// Lower is worse.
    LessThan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayStyle {
    Raw,
    Percentage,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ThresholdTable {
    pub minor:     f64,
    pub average:   f64,
    pub major:     f64,
    pub direction: CompareDirection,
    pub style:     DisplayStyle,
}

/// Classify a value against a table. Worst tier wins; comparisons are strict.
pub fn classify(value: f64, table: &ThresholdTable) -> Severity {
    let worse_than = |breakpoint: f64| match table.direction {
        CompareDirection::GreaterThan => value > breakpoint,
        CompareDirection::LessThan => value < breakpoint,
    };
    if worse_than(table.major) {
        Severity::Major
    } else if worse_than(table.average) {
        Severity::Average
    } else if worse_than(table.minor) {
        Severity::Minor
    } else {
        Severity::None
    }
}

/// Format a metric value for display: raw numbers with one decimal,
/// percentages scaled to 0–100 with one decimal and a suffix.
pub fn format_value(value: f64, style: DisplayStyle) -> String {
    match style {
        DisplayStyle::Raw => format!("{:.1}", value),
        DisplayStyle::Percentage => format!("{:.1}%", value * 100.0),
    }
}
