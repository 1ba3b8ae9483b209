//! Week theme progression table.
//!
//! Weekly intensity follows a fixed ten-week curve with a deload at week 5.
//! Programs longer than ten weeks keep reusing the final entry, so theme
//! lookup is a total function with no failure mode.

use crate::types::WeekTheme;

/// Week number reserved for the recovery week in every program
pub const DELOAD_WEEK: u32 = 5;

static THEMES: [WeekTheme; 10] = [
    WeekTheme {
        name: "Foundation",
        intensity: 0.6,
        rest_multiplier: 1.3,
        focus: &["form", "basics"],
    },
    WeekTheme {
        name: "Consistency",
        intensity: 0.7,
        rest_multiplier: 1.2,
        focus: &["habits", "routine"],
    },
    WeekTheme {
        name: "Quality",
        intensity: 0.7,
        rest_multiplier: 1.1,
        focus: &["technique", "control"],
    },
    WeekTheme {
        name: "Strength",
        intensity: 0.8,
        rest_multiplier: 1.0,
        focus: &["strength", "stability"],
    },
    WeekTheme {
        name: "Deload",
        intensity: 0.5,
        rest_multiplier: 1.5,
        focus: &["recovery", "mobility"],
    },
    WeekTheme {
        name: "Tempo",
        intensity: 0.8,
        rest_multiplier: 1.0,
        focus: &["tempo", "control"],
    },
    WeekTheme {
        name: "Unilateral",
        intensity: 0.8,
        rest_multiplier: 1.0,
        focus: &["single-leg", "balance"],
    },
    WeekTheme {
        name: "Flow",
        intensity: 0.9,
        rest_multiplier: 0.9,
        focus: &["power", "flow"],
    },
    WeekTheme {
        name: "Integration",
        intensity: 0.9,
        rest_multiplier: 0.9,
        focus: &["complex", "chains"],
    },
    WeekTheme {
        name: "Mastery",
        intensity: 0.95,
        rest_multiplier: 0.8,
        focus: &["mastery", "progress"],
    },
];

/// Look up the theme parameters for a week (1-based).
///
/// Weeks past the table reuse the week-10 entry.
pub fn theme_for_week(week: u32) -> &'static WeekTheme {
    let idx = week.clamp(1, THEMES.len() as u32) - 1;
    &THEMES[idx as usize]
}

/// Whether a week is the scheduled deload week
pub fn is_deload_week(week: u32) -> bool {
    week == DELOAD_WEEK
}

/// Display label for a week record.
///
/// Twelve named entries for up-to-12-week programs, generic label beyond.
pub fn week_label(week: u32) -> String {
    match week {
        1 => "Foundation & Form".into(),
        2 => "Building Consistency".into(),
        3 => "Movement Quality".into(),
        4 => "Strength & Stability".into(),
        5 => "Deload & Recovery".into(),
        6 => "Tempo & Control".into(),
        7 => "Unilateral Focus".into(),
        8 => "Power & Flow".into(),
        9 => "Integration".into(),
        10 => "Mastery & Progress".into(),
        11 => "Advanced Patterns".into(),
        12 => "Peak Performance".into(),
        n => format!("Week {}", n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deload_week_parameters() {
        let theme = theme_for_week(DELOAD_WEEK);
        assert_eq!(theme.name, "Deload");
        assert_eq!(theme.intensity, 0.5);
        assert_eq!(theme.rest_multiplier, 1.5);
        assert!(theme.has_focus("recovery"));
    }

    #[test]
    fn test_weeks_past_table_reuse_final_entry() {
        assert_eq!(theme_for_week(10), theme_for_week(11));
        assert_eq!(theme_for_week(10), theme_for_week(52));
        assert_eq!(theme_for_week(10).name, "Mastery");
    }

    #[test]
    fn test_intensity_within_bounds() {
        for week in 1..=20 {
            let theme = theme_for_week(week);
            assert!(theme.intensity > 0.0 && theme.intensity <= 1.0);
            assert!(theme.rest_multiplier > 0.0);
        }
    }

    #[test]
    fn test_week_labels() {
        assert_eq!(week_label(1), "Foundation & Form");
        assert_eq!(week_label(5), "Deload & Recovery");
        assert_eq!(week_label(12), "Peak Performance");
        assert_eq!(week_label(13), "Week 13");
    }
}
