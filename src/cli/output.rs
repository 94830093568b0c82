use serde::Serialize;

use crate::cell::fit::PLACEHOLDER;
use crate::cell::{CellLayout, EmailCell};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct FitJson {
    pub visible: usize,
    pub total: usize,
    pub hidden: usize,
    /// Visible addresses joined, or the placeholder
    pub text: String,
    pub truncated: bool,
    /// `+N`, absent when everything fits
    pub badge: Option<String>,
    pub accessible_label: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RowJson {
    pub label: String,
    #[serde(flatten)]
    pub fit: FitJson,
}

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

pub fn fit_to_json(cell: &EmailCell) -> FitJson {
    let total = cell.emails().len();
    match cell.layout() {
        CellLayout::Placeholder => FitJson {
            visible: 0,
            total,
            hidden: 0,
            text: PLACEHOLDER.to_string(),
            truncated: false,
            badge: None,
            accessible_label: None,
        },
        CellLayout::List {
            text,
            truncate,
            badge,
        } => {
            let hidden = badge.as_ref().map_or(0, |b| b.hidden);
            FitJson {
                visible: total - hidden,
                total,
                hidden,
                text,
                truncated: truncate,
                badge: badge.as_ref().map(|b| b.label.clone()),
                accessible_label: badge.map(|b| b.accessible_label),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// Summary line under a fitted row, e.g. `1 of 4 visible`
pub fn format_fit_summary(fit: &FitJson) -> String {
    format!("{} of {} visible", fit.visible, fit.total)
}
