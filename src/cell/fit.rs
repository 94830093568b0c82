use tracing::debug;

use super::measure::{Font, TextMeasurer, measure_or_estimate};

/// Joiner placed between consecutive visible addresses.
pub const SEPARATOR: &str = ", ";

/// Glyph shown instead of the list when there is nothing to show.
pub const PLACEHOLDER: &str = "\u{2013}";

/// Room kept free for the `+N` badge, in terminal cells.
/// Covers ` +NN ` plus the one-cell margin before it; [`fit_items`] grows
/// it for wider badges.
pub const DEFAULT_RESERVE_WIDTH: f64 = 6.0;

/// Cells between the last visible address and the badge.
pub const BADGE_MARGIN: usize = 1;

/// The badge as drawn, ` +N `.
pub fn badge_text(hidden: usize) -> String {
    format!(" +{} ", hidden)
}

/// Everything the badge takes after the text: margin plus [`badge_text`].
fn badge_slot(hidden: usize) -> String {
    format!("{}{}", " ".repeat(BADGE_MARGIN), badge_text(hidden))
}

/// Budget for one fit pass. All widths share the measurer's unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitParams {
    pub available_width: f64,
    pub separator_width: f64,
    /// Reserved for the overflow badge while more items remain
    pub reserve_width: f64,
}

/// Outcome of a fit pass: how many leading items are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fit {
    pub visible: usize,
    pub total: usize,
}

impl Fit {
    /// Number of items summarized by the badge
    pub fn hidden(&self) -> usize {
        self.total - self.visible
    }

    pub fn has_overflow(&self) -> bool {
        self.visible < self.total
    }
}

/// Greedy prefix fit: accept items left to right while they (plus the badge
/// reserve, when more items follow) fit in the available width. Stops at
/// the first item that does not fit; later items are never considered, so
/// reading order is preserved.
///
/// At least one item is always visible: a first item that overflows on its
/// own is shown truncated rather than hidden.
///
/// Returns `None` for an empty list (the caller shows the placeholder).
pub fn visible_count<S, M>(items: &[S], params: FitParams, mut measure: M) -> Option<Fit>
where
    S: AsRef<str>,
    M: FnMut(&str) -> f64,
{
    if items.is_empty() {
        return None;
    }

    let last = items.len() - 1;
    let mut count = 0;
    let mut total_width = 0.0;

    for (i, item) in items.iter().enumerate() {
        let email_width = measure(item.as_ref());
        let separator_space = if i > 0 { params.separator_width } else { 0.0 };
        let potential_width = total_width + separator_space + email_width;

        let required_width = if i < last {
            potential_width + params.reserve_width
        } else {
            potential_width
        };

        if required_width <= params.available_width {
            total_width = potential_width;
            count = i + 1;
        } else {
            break;
        }
    }

    Some(Fit {
        visible: count.max(1),
        total: items.len(),
    })
}

/// Measure the separator once, then run [`visible_count`] with `measurer`,
/// degrading to a per-character estimate wherever it cannot measure.
///
/// `reserve_width` is a floor: when the badge for the resulting hidden
/// count is wider (e.g. `+100`), the pass reruns with the badge's width as
/// the reserve until the badge fits in what was reserved.
pub fn fit_items<S: AsRef<str>>(
    items: &[S],
    available_width: f64,
    reserve_width: f64,
    measurer: &dyn TextMeasurer,
    font: &Font,
    fallback_per_char: f64,
) -> Option<Fit> {
    let separator_width = measure_or_estimate(measurer, SEPARATOR, font, fallback_per_char);
    let mut params = FitParams {
        available_width: available_width.max(0.0),
        separator_width,
        reserve_width: reserve_width.max(0.0),
    };
    loop {
        let fit = visible_count(items, params, |text| {
            measure_or_estimate(measurer, text, font, fallback_per_char)
        })?;
        // The reserve strictly grows and only takes badge widths for some
        // hidden count in 1..total, so this ends. NaN never grows it.
        let badge_width = if fit.has_overflow() {
            measure_or_estimate(measurer, &badge_slot(fit.hidden()), font, fallback_per_char)
        } else {
            0.0
        };
        if badge_width.is_nan() || badge_width <= params.reserve_width {
            debug!(
                available_width,
                reserve_width = params.reserve_width,
                visible = fit.visible,
                total = fit.total,
                "fit email list"
            );
            return Some(fit);
        }
        params.reserve_width = badge_width;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::measure::FixedMeasurer;

    /// The reference setting: 8 units per character, 40 units for the badge.
    fn px(available_width: f64) -> FitParams {
        FitParams {
            available_width,
            separator_width: 16.0,
            reserve_width: 40.0,
        }
    }

    fn eight_per_char(text: &str) -> f64 {
        text.chars().count() as f64 * 8.0
    }

    const FOUR: [&str; 4] = ["a@test.com", "b@test.com", "c@test.com", "d@test.com"];

    #[test]
    fn empty_list_has_no_fit() {
        let items: [&str; 0] = [];
        assert_eq!(visible_count(&items, px(800.0), eight_per_char), None);
    }

    #[test]
    fn everything_fits_when_wide() {
        let fit = visible_count(&["a@test.com", "b@test.com"], px(800.0), eight_per_char).unwrap();
        assert_eq!(fit, Fit { visible: 2, total: 2 });
        assert!(!fit.has_overflow());
    }

    #[test]
    fn narrow_width_overflows() {
        // a@test.com = 80, + reserve 40 = 120 <= 150; adding b gives 176 + 40
        let fit = visible_count(&FOUR, px(150.0), eight_per_char).unwrap();
        assert_eq!(fit.visible, 1);
        assert_eq!(fit.hidden(), 3);
    }

    #[test]
    fn last_item_needs_no_reserve() {
        // Two items: 80 + 16 + 80 = 176 fits exactly without reserving for a badge
        let fit = visible_count(&["a@test.com", "b@test.com"], px(176.0), eight_per_char).unwrap();
        assert_eq!(fit.visible, 2);
        let fit = visible_count(&["a@test.com", "b@test.com"], px(175.0), eight_per_char).unwrap();
        assert_eq!(fit.visible, 1);
    }

    #[test]
    fn boundary_is_inclusive() {
        // First of three needs 80 + 40 = 120
        let items = ["a@test.com", "b@test.com", "c@test.com"];
        assert_eq!(visible_count(&items, px(120.0), eight_per_char).unwrap().visible, 1);
        // Second needs 176 + 40 = 216
        assert_eq!(visible_count(&items, px(216.0), eight_per_char).unwrap().visible, 2);
        assert_eq!(visible_count(&items, px(215.9), eight_per_char).unwrap().visible, 1);
    }

    #[test]
    fn zero_width_forces_one() {
        let fit = visible_count(&FOUR, px(0.0), eight_per_char).unwrap();
        assert_eq!(fit.visible, 1);
    }

    #[test]
    fn long_single_item_forced_visible() {
        let items = ["very-long-email-address-that-should-be-truncated@example-domain.com"];
        let fit = visible_count(&items, px(100.0), eight_per_char).unwrap();
        assert_eq!(fit, Fit { visible: 1, total: 1 });
    }

    #[test]
    fn stops_at_first_misfit_even_if_later_items_are_narrow() {
        let items = ["a@x.io", "a-very-long-address@example.com", "b@x.io", "c@x.io"];
        let params = FitParams {
            available_width: 20.0,
            separator_width: 2.0,
            reserve_width: 5.0,
        };
        let fit = visible_count(&items, params, |s| s.chars().count() as f64).unwrap();
        // "a@x.io" fits (6 + 5); the long one does not, and b/c are never tried
        assert_eq!(fit.visible, 1);
    }

    #[test]
    fn measures_lazily_and_at_most_once_per_item() {
        let mut calls = Vec::new();
        let _ = visible_count(&FOUR, px(150.0), |s| {
            calls.push(s.to_string());
            eight_per_char(s)
        });
        // Pass stops after the second item
        assert_eq!(calls, vec!["a@test.com", "b@test.com"]);
    }

    #[test]
    fn empty_strings_are_items() {
        let items = ["", "a@test.com"];
        let fit = visible_count(&items, px(100.0), eight_per_char).unwrap();
        // "" + reserve = 40; then 0 + 16 + 80 = 96 (last, no reserve)
        assert_eq!(fit.visible, 2);
    }

    #[test]
    fn invariants_hold_across_widths() {
        let lists: Vec<Vec<&str>> = vec![
            vec!["x@y.z"],
            FOUR.to_vec(),
            vec!["dup@test.com", "dup@test.com", "unique@test.com"],
            vec!["user+tag@domain.com", "name.surname@company.co.uk", "a@a.com", "b@b.com"],
        ];
        for items in &lists {
            for w in 0..=600 {
                let params = px(w as f64);
                let fit = visible_count(items, params, eight_per_char).unwrap();
                assert!(fit.visible >= 1 && fit.visible <= items.len());

                // Unless forced, the accepted prefix respects the budget
                let used: f64 = items[..fit.visible].iter().map(|s| eight_per_char(s)).sum::<f64>()
                    + params.separator_width * (fit.visible - 1) as f64;
                let first_fits = if items.len() > 1 {
                    eight_per_char(items[0]) + params.reserve_width <= params.available_width
                } else {
                    eight_per_char(items[0]) <= params.available_width
                };
                if first_fits {
                    let reserve = if fit.has_overflow() { params.reserve_width } else { 0.0 };
                    assert!(used + reserve <= params.available_width, "w={w} items={items:?}");
                }
            }
        }
    }

    #[test]
    fn visible_count_is_monotonic_in_width() {
        let mut prev = 0;
        for w in 0..=500 {
            let fit = visible_count(&FOUR, px(w as f64), eight_per_char).unwrap();
            assert!(fit.visible >= prev);
            prev = fit.visible;
        }
        assert_eq!(prev, 4);
    }

    #[test]
    fn fit_items_measures_separator_with_measurer() {
        let measurer = FixedMeasurer::new(8.0);
        let font = Font::monospace();
        let fit = fit_items(&FOUR, 150.0, 40.0, &measurer, &font, 1.0).unwrap();
        assert_eq!(fit.visible, 1);
        let fit = fit_items(&["a@test.com", "b@test.com"], 800.0, 40.0, &measurer, &font, 1.0).unwrap();
        assert_eq!(fit.visible, 2);
    }

    #[test]
    fn fit_items_reserves_room_for_a_wide_badge() {
        let items = vec!["a@b.c"; 102];
        let measurer = FixedMeasurer::new(1.0);
        // With 6 cells reserved two addresses fit (12 + 6 = 18), but that
        // leaves `+100`, whose slot `  +100 ` takes 7
        let fit = fit_items(&items, 18.0, 6.0, &measurer, &Font::monospace(), 1.0).unwrap();
        assert_eq!(fit.visible, 1);
        assert_eq!(fit.hidden(), 101);

        // One more cell and both fit next to the wider badge
        let fit = fit_items(&items, 19.0, 6.0, &measurer, &Font::monospace(), 1.0).unwrap();
        assert_eq!(fit.visible, 2);
    }

    #[test]
    fn fit_items_accepted_prefix_leaves_room_for_badge() {
        let items: Vec<String> = (0..150).map(|i| format!("u{}@x.io", i)).collect();
        let measurer = FixedMeasurer::new(1.0);
        for w in 0..=200u16 {
            let fit = fit_items(&items, f64::from(w), 2.0, &measurer, &Font::monospace(), 1.0)
                .unwrap();
            let used: usize = items[..fit.visible].iter().map(|s| s.len()).sum::<usize>()
                + SEPARATOR.len() * (fit.visible - 1);
            let slot = badge_slot(fit.hidden()).len();
            if fit.visible > 1 && fit.has_overflow() {
                assert!(used + slot <= w as usize, "w={w}");
            }
        }
    }

    #[test]
    fn fit_items_clamps_negative_width() {
        let measurer = FixedMeasurer::new(1.0);
        let fit = fit_items(&FOUR, -5.0, 6.0, &measurer, &Font::monospace(), 1.0).unwrap();
        assert_eq!(fit.visible, 1);
    }
}
