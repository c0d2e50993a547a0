//! Per-shortcode click ledger aggregate.

use super::ClickEvent;

/// Append-only list of visits for one shortcode plus its running total.
///
/// Created empty together with the [`super::UrlRecord`] it belongs to and
/// dropped together with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickAggregate {
    pub shortcode: String,
    pub total_clicks: u64,
    pub events: Vec<ClickEvent>,
}

impl ClickAggregate {
    pub fn new(shortcode: impl Into<String>) -> Self {
        Self {
            shortcode: shortcode.into(),
            total_clicks: 0,
            events: Vec::new(),
        }
    }

    /// Appends a visit and returns the new total.
    pub fn append(&mut self, event: ClickEvent) -> u64 {
        self.events.push(event);
        self.total_clicks += 1;
        self.total_clicks
    }
}
