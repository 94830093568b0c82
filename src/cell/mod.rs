//! The email cell: a list of addresses fitted into a single row.
//!
//! [`EmailCell`] owns the item list and the transient per-render state
//! (visible count, hover and focus). It is mounted on a [`WidthSource`] and
//! recomputes its fit from scratch whenever the observed width or the item
//! list changes. [`EmailCell::layout`] turns that state into what the
//! renderer draws.

pub mod fit;
pub mod measure;
pub mod observe;

use std::cell::Cell;
use std::rc::Rc;

use tracing::debug;

use fit::{PLACEHOLDER, SEPARATOR, fit_items};
use measure::{Font, TextMeasurer};
use observe::{Subscription, WidthSource};

/// What to draw for a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellLayout {
    /// Nothing to show: draw [`PLACEHOLDER`]
    Placeholder,
    List {
        /// Visible addresses joined with [`SEPARATOR`]
        text: String,
        /// Clip the text with an ellipsis (single visible address)
        truncate: bool,
        badge: Option<Badge>,
    },
}

impl CellLayout {
    /// Plain-text rendition of the cell, used by the CLI
    pub fn plain(&self) -> String {
        match self {
            CellLayout::Placeholder => PLACEHOLDER.to_string(),
            CellLayout::List { text, badge, .. } => match badge {
                Some(badge) => format!("{} {}", text, badge.label),
                None => text.clone(),
            },
        }
    }

    pub fn badge(&self) -> Option<&Badge> {
        match self {
            CellLayout::List { badge, .. } => badge.as_ref(),
            CellLayout::Placeholder => None,
        }
    }
}

/// The `+N` overflow badge. Always focusable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    /// Number of addresses not shown in the row
    pub hidden: usize,
    /// `+N`
    pub label: String,
    /// Name announced for the badge, e.g. `2 more emails: a@x, b@x, c@x`
    pub accessible_label: String,
    /// Full joined list shown on hover/focus
    pub tooltip: String,
}

impl Badge {
    fn new(hidden: usize, all: &[String]) -> Self {
        let joined = all.join(SEPARATOR);
        Badge {
            hidden,
            label: format!("+{}", hidden),
            accessible_label: format!(
                "{} more email{}: {}",
                hidden,
                if hidden != 1 { "s" } else { "" },
                joined
            ),
            tooltip: joined,
        }
    }
}

/// A row of email addresses with overflow summarization.
pub struct EmailCell {
    emails: Vec<String>,
    reserve_width: f64,
    visible_count: usize,
    hovered: bool,
    focused: bool,
    /// Width the current fit was computed for
    width: Option<u16>,
    /// Latest width written by the observer, applied on the next sync
    pending_width: Rc<Cell<Option<u16>>>,
    subscription: Option<Subscription>,
    dirty: bool,
}

impl EmailCell {
    pub fn new(emails: Vec<String>, reserve_width: f64) -> Self {
        let visible_count = emails.len();
        EmailCell {
            emails,
            reserve_width,
            visible_count,
            hovered: false,
            focused: false,
            width: None,
            pending_width: Rc::new(Cell::new(None)),
            subscription: None,
            dirty: true,
        }
    }

    pub fn emails(&self) -> &[String] {
        &self.emails
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    /// Width the current fit was computed for
    pub fn width(&self) -> Option<u16> {
        self.width
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    /// Nothing to show: no addresses, or only empty ones.
    pub fn is_placeholder(&self) -> bool {
        self.emails.iter().all(|e| e.is_empty())
    }

    /// Start observing the width of the region this cell is drawn in.
    /// An empty list has nothing to fit, so it is not observed.
    pub fn mount(&mut self, source: &dyn WidthSource) {
        if self.emails.is_empty() {
            return;
        }
        // Remount replaces the previous observation
        self.subscription = None;
        let pending = Rc::clone(&self.pending_width);
        let subscription = source.subscribe(Box::new(move |width: u16| pending.set(Some(width))));
        self.subscription = Some(subscription);
    }

    /// Stop observing. Safe to call more than once.
    pub fn unmount(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
            debug!(emails = self.emails.len(), "email cell unmounted");
        }
        self.pending_width.set(None);
    }

    /// Replace the item list. The fit is recomputed on the next sync.
    pub fn set_emails(&mut self, emails: Vec<String>) {
        self.visible_count = emails.len();
        self.emails = emails;
        self.dirty = true;
        if !self.has_badge() {
            self.hovered = false;
            self.focused = false;
        }
    }

    /// Apply the latest observed width and recompute the fit if anything
    /// changed. Returns true if a fit pass ran.
    ///
    /// Only the most recent notification matters: widths reported between
    /// two syncs overwrite each other.
    pub fn sync(&mut self, measurer: &dyn TextMeasurer, font: &Font, fallback_per_char: f64) -> bool {
        if self.subscription.is_none() {
            return false;
        }
        if let Some(width) = self.pending_width.take()
            && self.width != Some(width)
        {
            self.width = Some(width);
            self.dirty = true;
        }
        let Some(width) = self.width else {
            return false;
        };
        if !self.dirty {
            return false;
        }
        self.dirty = false;

        if self.is_placeholder() {
            return false;
        }
        if let Some(fit) = fit_items(
            &self.emails,
            f64::from(width),
            self.reserve_width,
            measurer,
            font,
            fallback_per_char,
        ) {
            self.visible_count = fit.visible;
        }
        if !self.has_badge() {
            self.hovered = false;
            self.focused = false;
        }
        true
    }

    pub fn has_badge(&self) -> bool {
        !self.is_placeholder() && self.visible_count < self.emails.len()
    }

    pub fn hover(&mut self, hovered: bool) {
        self.hovered = hovered && self.has_badge();
    }

    /// Move keyboard focus to the badge. Returns false if there is no badge.
    pub fn focus(&mut self) -> bool {
        self.focused = self.has_badge();
        self.focused
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn tooltip_visible(&self) -> bool {
        self.has_badge() && (self.hovered || self.focused)
    }

    pub fn layout(&self) -> CellLayout {
        if self.is_placeholder() {
            return CellLayout::Placeholder;
        }
        let visible = self.visible_count.clamp(1, self.emails.len());
        let text = self.emails[..visible].join(SEPARATOR);
        let hidden = self.emails.len() - visible;
        CellLayout::List {
            text,
            truncate: visible == 1,
            badge: (hidden > 0).then(|| Badge::new(hidden, &self.emails)),
        }
    }
}

impl Drop for EmailCell {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::measure::FixedMeasurer;
    use crate::cell::observe::SizeObserver;
    use pretty_assertions::assert_eq;

    fn emails(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    /// Mount on a fresh observer at `width` using 8 units per character and
    /// a 40-unit badge reserve.
    fn mounted(list: &[&str], width: u16) -> (EmailCell, SizeObserver) {
        let observer = SizeObserver::new();
        let mut cell = EmailCell::new(emails(list), 40.0);
        cell.mount(&observer);
        observer.report(width);
        cell.sync(&FixedMeasurer::new(8.0), &Font::monospace(), 8.0);
        (cell, observer)
    }

    #[test]
    fn empty_list_is_placeholder() {
        let (cell, observer) = mounted(&[], 400);
        assert_eq!(cell.layout(), CellLayout::Placeholder);
        assert_eq!(cell.layout().plain(), "\u{2013}");
        assert!(!cell.is_mounted());
        assert_eq!(observer.subscriber_count(), 0);
    }

    #[test]
    fn single_empty_string_is_placeholder() {
        let (cell, _observer) = mounted(&[""], 400);
        assert_eq!(cell.layout(), CellLayout::Placeholder);
    }

    #[test]
    fn all_empty_strings_are_placeholder() {
        let (cell, _observer) = mounted(&["", ""], 400);
        assert_eq!(cell.layout(), CellLayout::Placeholder);
    }

    #[test]
    fn single_email_no_separator() {
        let (cell, _observer) = mounted(&["single@test.com"], 400);
        assert_eq!(
            cell.layout(),
            CellLayout::List {
                text: "single@test.com".into(),
                truncate: true,
                badge: None,
            }
        );
    }

    #[test]
    fn wide_row_shows_everything_untruncated() {
        let (cell, _observer) = mounted(&["a@test.com", "b@test.com"], 800);
        assert_eq!(
            cell.layout(),
            CellLayout::List {
                text: "a@test.com, b@test.com".into(),
                truncate: false,
                badge: None,
            }
        );
    }

    #[test]
    fn narrow_row_gets_badge() {
        let all = ["a@test.com", "b@test.com", "c@test.com", "d@test.com"];
        let (cell, _observer) = mounted(&all, 150);
        assert!(cell.visible_count() < 4);
        let CellLayout::List { badge: Some(badge), text, .. } = cell.layout() else {
            panic!("expected a badge");
        };
        assert_eq!(badge.label, format!("+{}", 4 - cell.visible_count()));
        assert!(
            badge
                .accessible_label
                .contains("a@test.com, b@test.com, c@test.com, d@test.com")
        );
        // No joiner between the last visible address and the badge
        assert!(!text.ends_with(','));
        assert!(!text.ends_with(", "));
    }

    #[test]
    fn accessible_label_pluralization() {
        let (cell, _observer) = mounted(&["first@test.com", "second@test.com", "third@test.com"], 100);
        let CellLayout::List { badge: Some(badge), .. } = cell.layout() else {
            panic!("expected a badge");
        };
        assert_eq!(
            badge.accessible_label,
            "2 more emails: first@test.com, second@test.com, third@test.com"
        );
        assert_eq!(badge.tooltip, "first@test.com, second@test.com, third@test.com");

        let (cell, _observer) = mounted(&["a@test.com", "b@test.com"], 100);
        let CellLayout::List { badge: Some(badge), .. } = cell.layout() else {
            panic!("expected a badge");
        };
        assert_eq!(badge.accessible_label, "1 more email: a@test.com, b@test.com");
    }

    #[test]
    fn long_single_email_is_truncated() {
        let long = "very-long-email-address-that-should-be-truncated@example-domain.com";
        let (cell, _observer) = mounted(&[long], 100);
        assert_eq!(cell.visible_count(), 1);
        assert!(matches!(cell.layout(), CellLayout::List { truncate: true, .. }));
    }

    #[test]
    fn duplicates_are_kept() {
        let (cell, _observer) = mounted(&["dup@test.com", "dup@test.com", "unique@test.com"], 800);
        assert_eq!(cell.layout().plain(), "dup@test.com, dup@test.com, unique@test.com");
    }

    #[test]
    fn many_emails_show_first() {
        let many: Vec<String> = (0..20).map(|i| format!("user{}@test.com", i)).collect();
        let refs: Vec<&str> = many.iter().map(String::as_str).collect();
        let (cell, _observer) = mounted(&refs, 400);
        let plain = cell.layout().plain();
        assert!(plain.starts_with("user0@test.com"));
        assert!(plain.ends_with(&format!("+{}", 20 - cell.visible_count())));
    }

    #[test]
    fn width_change_recomputes() {
        let all = ["a@test.com", "b@test.com", "c@test.com"];
        let (mut cell, observer) = mounted(&all, 150);
        assert_eq!(cell.visible_count(), 1);

        observer.report(800);
        assert!(cell.sync(&FixedMeasurer::new(8.0), &Font::monospace(), 8.0));
        assert_eq!(cell.visible_count(), 3);

        // Same width again: nothing to do
        observer.report(800);
        assert!(!cell.sync(&FixedMeasurer::new(8.0), &Font::monospace(), 8.0));
    }

    #[test]
    fn only_latest_width_is_applied() {
        let all = ["a@test.com", "b@test.com", "c@test.com"];
        let (mut cell, observer) = mounted(&all, 800);
        observer.report(150);
        observer.report(216);
        cell.sync(&FixedMeasurer::new(8.0), &Font::monospace(), 8.0);
        assert_eq!(cell.width(), Some(216));
        assert_eq!(cell.visible_count(), 2);
    }

    #[test]
    fn item_change_recomputes_at_same_width() {
        let (mut cell, _observer) = mounted(&["a@test.com"], 150);
        cell.set_emails(emails(&["a@test.com", "b@test.com", "c@test.com"]));
        assert!(cell.sync(&FixedMeasurer::new(8.0), &Font::monospace(), 8.0));
        assert_eq!(cell.visible_count(), 1);
        assert!(cell.has_badge());
    }

    #[test]
    fn unmount_releases_once_and_stops_recomputing() {
        let all = ["a@test.com", "b@test.com", "c@test.com"];
        let (mut cell, observer) = mounted(&all, 150);
        assert_eq!(observer.subscriber_count(), 1);

        cell.unmount();
        assert_eq!(observer.subscriber_count(), 0);
        cell.unmount();
        assert_eq!(observer.subscriber_count(), 0);

        observer.report(800);
        assert!(!cell.sync(&FixedMeasurer::new(8.0), &Font::monospace(), 8.0));
        assert_eq!(cell.visible_count(), 1);
    }

    #[test]
    fn dropping_the_cell_releases_observation() {
        let (cell, observer) = mounted(&["a@test.com"], 150);
        assert_eq!(observer.subscriber_count(), 1);
        drop(cell);
        assert_eq!(observer.subscriber_count(), 0);
    }

    #[test]
    fn tooltip_on_hover_and_focus() {
        let (mut cell, _observer) = mounted(&["first@test.com", "second@test.com", "third@test.com"], 150);
        assert!(!cell.tooltip_visible());

        cell.hover(true);
        assert!(cell.tooltip_visible());
        cell.hover(false);
        assert!(!cell.tooltip_visible());

        assert!(cell.focus());
        assert!(cell.tooltip_visible());
        cell.blur();
        assert!(!cell.tooltip_visible());
    }

    #[test]
    fn no_focus_without_badge() {
        let (mut cell, _observer) = mounted(&["a@test.com", "b@test.com"], 800);
        assert!(!cell.focus());
        cell.hover(true);
        assert!(!cell.tooltip_visible());
    }

    #[test]
    fn unavailable_measurer_still_renders() {
        let observer = SizeObserver::new();
        let mut cell = EmailCell::new(emails(&["a@test.com", "b@test.com"]), 40.0);
        cell.mount(&observer);
        observer.report(150);
        let unavailable = |_: &str, _: &Font| -> Option<f64> { None };
        cell.sync(&unavailable, &Font::monospace(), 8.0);
        assert_eq!(cell.visible_count(), 1);
        assert_eq!(cell.layout().plain(), "a@test.com +1");
    }
}
