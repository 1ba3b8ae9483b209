//! Weekly schedule templates.
//!
//! Maps days-per-week onto a fixed pattern of pillar combinations per day,
//! filtered to the user's selected pillars and biased toward a primary
//! focus. The bias is a heuristic frequency boost, not an optimizer.

use crate::types::Pillar;

use Pillar::{Cardio, Mobility, Running, Strength, TaiChi};

static THREE_DAYS: &[&[Pillar]] = &[
    &[Strength, Mobility],
    &[Running, TaiChi],
    &[Strength, Mobility],
];

static FOUR_DAYS: &[&[Pillar]] = &[
    &[Strength, Mobility],
    &[Running, TaiChi],
    &[Mobility, TaiChi],
    &[Strength, Cardio],
];

static FIVE_DAYS: &[&[Pillar]] = &[
    &[Strength, Mobility],
    &[Running, TaiChi],
    &[Mobility, TaiChi],
    &[Cardio, Strength],
    &[Strength, Mobility],
];

static SIX_DAYS: &[&[Pillar]] = &[
    &[Strength, Mobility],
    &[Running, TaiChi],
    &[Mobility, TaiChi],
    &[Cardio, Strength],
    &[Strength, Mobility],
    &[Running, TaiChi],
];

/// Base pattern for a days-per-week count; anything outside 3-6 falls back
/// to the five-day table.
fn base_template(days_per_week: u32) -> &'static [&'static [Pillar]] {
    match days_per_week {
        3 => THREE_DAYS,
        4 => FOUR_DAYS,
        5 => FIVE_DAYS,
        6 => SIX_DAYS,
        _ => FIVE_DAYS,
    }
}

/// Build the weekly schedule: one pillar list per day.
///
/// Each day is filtered to the intersection with the selected pillars. If a
/// primary focus is set and selected, every even-indexed day lacking it gets
/// its last entry replaced with the focus (day length preserved); days that
/// filtered down to nothing are left alone.
pub fn schedule_for(
    days_per_week: u32,
    pillars: &[Pillar],
    primary_focus: Option<Pillar>,
) -> Vec<Vec<Pillar>> {
    let mut days: Vec<Vec<Pillar>> = base_template(days_per_week)
        .iter()
        .map(|day| {
            day.iter()
                .copied()
                .filter(|p| pillars.contains(p))
                .collect()
        })
        .collect();

    if let Some(focus) = primary_focus {
        if pillars.contains(&focus) {
            for (idx, day) in days.iter_mut().enumerate() {
                if idx % 2 == 0 && !day.contains(&focus) {
                    if let Some(last) = day.last_mut() {
                        *last = focus;
                    }
                }
            }
        }
    }

    days
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_counts_match_tables() {
        let all = Pillar::ALL.to_vec();
        assert_eq!(schedule_for(3, &all, None).len(), 3);
        assert_eq!(schedule_for(4, &all, None).len(), 4);
        assert_eq!(schedule_for(5, &all, None).len(), 5);
        assert_eq!(schedule_for(6, &all, None).len(), 6);
    }

    #[test]
    fn test_unknown_day_count_falls_back_to_five() {
        let all = Pillar::ALL.to_vec();
        assert_eq!(schedule_for(2, &all, None), schedule_for(5, &all, None));
        assert_eq!(schedule_for(9, &all, None).len(), 5);
    }

    #[test]
    fn test_days_filtered_to_selected_pillars() {
        let selected = vec![Strength, Mobility];
        let days = schedule_for(4, &selected, None);

        assert_eq!(days.len(), 4);
        for day in &days {
            for pillar in day {
                assert!(selected.contains(pillar));
            }
        }
        // Day 2 of the 4-day table is running + tai chi, neither selected
        assert!(days[1].is_empty());
    }

    #[test]
    fn test_primary_focus_replaces_last_on_even_days() {
        let all = Pillar::ALL.to_vec();
        let days = schedule_for(4, &all, Some(Strength));

        // Day index 2 ([mobility, tai_chi]) lacks strength; last slot swapped
        assert_eq!(days[2], vec![Mobility, Strength]);
        // Day index 0 already contains strength; untouched
        assert_eq!(days[0], vec![Strength, Mobility]);
        // Odd-indexed days untouched even without the focus
        assert_eq!(days[1], vec![Running, TaiChi]);
    }

    #[test]
    fn test_focus_outside_selection_is_ignored() {
        let selected = vec![Strength, Mobility];
        let with = schedule_for(4, &selected, Some(Running));
        let without = schedule_for(4, &selected, None);
        assert_eq!(with, without);
    }

    #[test]
    fn test_empty_day_left_unchanged_by_focus() {
        // Day 2 of the 4-day table filters to empty; the focus pass skips it
        let selected = vec![Strength, Mobility];
        let days = schedule_for(4, &selected, Some(Strength));
        assert!(days[1].is_empty());
    }
}
