//! Block generation for one (week, day, pillar) slot.
//!
//! Running/cardio slots pick an interval set by week-indexed progression;
//! all other pillars prefer a difficulty-matched template and fall back to
//! raw exercises. Missing content means a missing block, never an error.

use crate::budget::recommended_time_splits;
use crate::estimates::{estimate_block_minutes, estimate_interval_minutes, estimate_template_minutes};
use crate::themes::{is_deload_week, theme_for_week};
use crate::types::{
    Exercise, GenerationSettings, IntervalSet, Library, Mode, Pillar, WeekTheme, WorkoutBlock,
    WorkoutItem,
};
use once_cell::sync::Lazy;
use regex::Regex;

/// Templates may run slightly over the slot allocation before being rejected
const TEMPLATE_SLACK: f64 = 1.2;

/// Weeks at or below this prefer basic/assisted exercise variations
const EARLY_WEEK_CUTOFF: u32 = 3;

/// Generate the raw (pre-trim) blocks for one day of a given week.
pub fn generate_day_blocks(
    day_pillars: &[Pillar],
    week: u32,
    settings: &GenerationSettings,
    library: &Library,
) -> Vec<WorkoutBlock> {
    let theme = theme_for_week(week);
    let is_deload = is_deload_week(week);
    let splits = recommended_time_splits(
        settings.max_duration_min,
        settings.mode,
        day_pillars,
        settings.primary_focus,
    );

    let mut blocks = Vec::new();
    for &pillar in day_pillars {
        let allocated = splits.get(&pillar).copied().unwrap_or_else(|| {
            f64::from(settings.max_duration_min) / day_pillars.len().max(1) as f64
        });

        let block = if pillar.is_interval_based() {
            interval_block(pillar, allocated, week, is_deload, &library.intervals)
        } else {
            exercise_block(ExerciseBlockRequest {
                pillar,
                allocated_min: allocated,
                week,
                theme,
                is_deload,
                mode: settings.mode,
                fitness_level: settings.fitness_level,
                library,
            })
        };

        if let Some(block) = block {
            blocks.push(block);
        } else {
            tracing::debug!(week, %pillar, "no library content for slot, skipping block");
        }
    }

    blocks
}

/// Build an interval-backed block for a running/cardio slot.
///
/// Candidates are the pillar's interval sets in library order (assumed
/// easiest-first); week 1 picks index 0 and later weeks walk forward. A
/// deload week steps back two entries from wherever progression landed.
fn interval_block(
    pillar: Pillar,
    allocated_min: f64,
    week: u32,
    is_deload: bool,
    intervals: &[IntervalSet],
) -> Option<WorkoutBlock> {
    let candidates: Vec<&IntervalSet> = intervals.iter().filter(|i| i.pillar == pillar).collect();
    if candidates.is_empty() {
        return None;
    }

    let mut index = (week as usize - 1).min(candidates.len() - 1);
    if is_deload && index > 0 {
        index = index.saturating_sub(2);
    }
    let selected = candidates[index];

    tracing::debug!(week, %pillar, interval = %selected.id, "selected interval set");

    let computed = estimate_interval_minutes(selected);
    let cap = allocated_min.max(0.0).ceil() as u32;
    Some(WorkoutBlock {
        pillar,
        title: selected.name.clone(),
        items: vec![],
        rest_sec: None,
        estimated_duration_min: computed.min(cap),
    })
}

struct ExerciseBlockRequest<'a> {
    pillar: Pillar,
    allocated_min: f64,
    week: u32,
    theme: &'static WeekTheme,
    is_deload: bool,
    mode: Mode,
    fitness_level: crate::types::Difficulty,
    library: &'a Library,
}

/// Build a template- or exercise-derived block for a non-interval slot.
fn exercise_block(req: ExerciseBlockRequest<'_>) -> Option<WorkoutBlock> {
    // Prefer a curated template matching pillar and fitness level
    let template = req.library.templates.iter().find(|t| {
        t.pillar == req.pillar
            && t.difficulty == Some(req.fitness_level)
            && f64::from(estimate_template_minutes(t)) <= req.allocated_min * TEMPLATE_SLACK
    });

    if let Some(template) = template {
        tracing::debug!(week = req.week, %req.pillar, template = %template.id, "selected template");
        return Some(block_from_template(template, req.theme, req.is_deload));
    }

    let exercises: Vec<&Exercise> = req
        .library
        .exercises
        .iter()
        .filter(|e| e.pillar == req.pillar)
        .collect();
    if exercises.is_empty() {
        return None;
    }

    Some(block_from_exercises(&req, &exercises))
}

fn block_from_template(
    template: &crate::types::WorkoutTemplate,
    theme: &WeekTheme,
    is_deload: bool,
) -> WorkoutBlock {
    let mut entries: Vec<_> = template.items.iter().collect();
    entries.sort_by_key(|item| item.sort_order.unwrap_or(0));

    let items: Vec<WorkoutItem> = entries
        .into_iter()
        .map(|item| WorkoutItem {
            name: item.name.clone().unwrap_or_else(|| "Exercise".into()),
            reps: Some(adjust_reps(
                item.reps.as_deref().unwrap_or("2×8-12"),
                theme,
                is_deload,
            )),
            rest_sec: Some(scale_rest(item.rest_sec.unwrap_or(45), theme)),
            cues: vec![],
            notes: item.notes.clone(),
            exercise_id: item.exercise_id.clone(),
        })
        .collect();

    let mut block = WorkoutBlock {
        pillar: template.pillar,
        title: template.name.clone(),
        items,
        rest_sec: None,
        estimated_duration_min: 0,
    };
    block.estimated_duration_min = estimate_block_minutes(&block);
    block
}

fn block_from_exercises(req: &ExerciseBlockRequest<'_>, exercises: &[&Exercise]) -> WorkoutBlock {
    let selected = select_exercises_for_week(exercises, req.week, req.mode, req.pillar);

    let items: Vec<WorkoutItem> = selected
        .iter()
        .map(|exercise| WorkoutItem {
            name: exercise.name.clone(),
            reps: Some(adjust_reps(
                exercise
                    .default_reps
                    .as_deref()
                    .unwrap_or_else(|| req.pillar.default_reps()),
                req.theme,
                req.is_deload,
            )),
            rest_sec: Some(scale_rest(
                exercise
                    .default_rest_sec
                    .unwrap_or_else(|| req.pillar.default_rest_sec()),
                req.theme,
            )),
            cues: exercise.cues.clone(),
            notes: None,
            exercise_id: Some(exercise.id.clone()),
        })
        .collect();

    let mut block = WorkoutBlock {
        pillar: req.pillar,
        title: format!("{} Block", req.pillar.label()),
        items,
        rest_sec: None,
        estimated_duration_min: 0,
    };
    block.estimated_duration_min = estimate_block_minutes(&block);
    block
}

/// Pick up to the per-pillar cap of exercises for the given week.
///
/// Early weeks prefer names signalling basic/assisted variations and drop
/// anything marked advanced; later weeks take the library order as-is.
fn select_exercises_for_week<'a>(
    exercises: &[&'a Exercise],
    week: u32,
    mode: Mode,
    pillar: Pillar,
) -> Vec<&'a Exercise> {
    let cap = max_exercises(pillar, mode);

    if week <= EARLY_WEEK_CUTOFF {
        exercises
            .iter()
            .copied()
            .filter(|e| {
                let name = e.name.to_lowercase();
                name.contains("basic") || name.contains("assist") || !name.contains("advanced")
            })
            .take(cap)
            .collect()
    } else {
        exercises.iter().copied().take(cap).collect()
    }
}

/// Per-block exercise cap by pillar and mode
fn max_exercises(pillar: Pillar, mode: Mode) -> usize {
    match (pillar, mode) {
        (Pillar::Strength, Mode::Short) => 3,
        (Pillar::Strength, Mode::Full) => 5,
        (Pillar::Mobility, Mode::Short) => 4,
        (Pillar::Mobility, Mode::Full) => 6,
        (Pillar::TaiChi, Mode::Short) => 3,
        (Pillar::TaiChi, Mode::Full) => 5,
        (Pillar::Running | Pillar::Cardio, _) => 1,
    }
}

fn scale_rest(rest_sec: u32, theme: &WeekTheme) -> u32 {
    (f64::from(rest_sec) * theme.rest_multiplier).floor() as u32
}

// Leading set count of a set×rep spec ("3×8-12" → sets 3, tail "8-12")
static SET_PREFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)\s*[x×]\s*(.+)$").unwrap());

/// Adjust a repetition spec for the week theme.
///
/// Exactly one rule applies per call; deload takes precedence over any
/// theme-focus rule.
pub fn adjust_reps(base: &str, theme: &WeekTheme, is_deload: bool) -> String {
    if is_deload {
        return reduce_sets_for_deload(base);
    }
    if theme.has_focus("tempo") {
        return format!("{} (3-1-1 tempo)", base);
    }
    if theme.has_focus("power") {
        return base.replace("8-12", "5-8").replace("10-15", "6-10");
    }
    base.to_string()
}

/// Drop one set from a set×rep spec, never below one set
fn reduce_sets_for_deload(reps: &str) -> String {
    if let Some(caps) = SET_PREFIX_RE.captures(reps) {
        let sets: u32 = caps[1].parse().unwrap_or(1);
        let reduced = sets.saturating_sub(1).max(1);
        return format!("{}×{}", reduced, &caps[2]);
    }
    reps.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::starter_library;
    use crate::types::{Difficulty, IntervalStep, Preferences};

    fn interval(id: &str, work_sec: u32) -> IntervalSet {
        IntervalSet {
            id: id.into(),
            pillar: Pillar::Running,
            name: format!("Interval {}", id),
            warmup_sec: Some(300),
            cooldown_sec: Some(300),
            steps: vec![IntervalStep {
                label: "Run".into(),
                work_sec,
                rest_sec: 60,
                repeat: 4,
            }],
            difficulty: None,
            is_public: true,
        }
    }

    fn ten_intervals() -> Vec<IntervalSet> {
        (0..10).map(|i| interval(&format!("iv{}", i), 30 + i * 15)).collect()
    }

    #[test]
    fn test_interval_progression_week_one_to_ten() {
        let intervals = ten_intervals();

        let first = interval_block(Pillar::Running, 60.0, 1, false, &intervals).unwrap();
        assert_eq!(first.title, "Interval iv0");

        let last = interval_block(Pillar::Running, 60.0, 10, false, &intervals).unwrap();
        assert_eq!(last.title, "Interval iv9");
    }

    #[test]
    fn test_interval_progression_clamps_to_available() {
        let intervals: Vec<IntervalSet> = (0..3).map(|i| interval(&format!("iv{}", i), 30)).collect();
        let block = interval_block(Pillar::Running, 60.0, 10, false, &intervals).unwrap();
        assert_eq!(block.title, "Interval iv2");
    }

    #[test]
    fn test_deload_steps_back_two() {
        let intervals = ten_intervals();
        let block = interval_block(Pillar::Running, 60.0, 5, true, &intervals).unwrap();
        // Progression index 4, stepped back to 2
        assert_eq!(block.title, "Interval iv2");

        // Week 1 deload (hypothetical) has nothing to step back from
        let block = interval_block(Pillar::Running, 60.0, 1, true, &intervals).unwrap();
        assert_eq!(block.title, "Interval iv0");
    }

    #[test]
    fn test_interval_duration_capped_at_allocation() {
        let intervals = ten_intervals();
        let block = interval_block(Pillar::Running, 10.0, 1, false, &intervals).unwrap();
        assert_eq!(block.estimated_duration_min, 10);
        assert!(block.items.is_empty());
    }

    #[test]
    fn test_no_candidates_means_no_block() {
        assert!(interval_block(Pillar::Cardio, 30.0, 1, false, &ten_intervals()).is_none());
        assert!(interval_block(Pillar::Running, 30.0, 1, false, &[]).is_none());
    }

    #[test]
    fn test_adjust_reps_deload_drops_a_set() {
        let theme = theme_for_week(5);
        assert_eq!(adjust_reps("3×8-12", theme, true), "2×8-12");
        assert_eq!(adjust_reps("2x10", theme, true), "1×10");
        // Floor at one set
        assert_eq!(adjust_reps("1×8-12", theme, true), "1×8-12");
        // Non set×rep specs pass through
        assert_eq!(adjust_reps("30-45s", theme, true), "30-45s");
    }

    #[test]
    fn test_adjust_reps_tempo_appends_annotation() {
        let tempo = theme_for_week(6);
        assert!(tempo.has_focus("tempo"));
        assert_eq!(adjust_reps("2×8-12", tempo, false), "2×8-12 (3-1-1 tempo)");
    }

    #[test]
    fn test_adjust_reps_power_substitutes_ranges() {
        let power = theme_for_week(8);
        assert!(power.has_focus("power"));
        assert_eq!(adjust_reps("2×8-12", power, false), "2×5-8");
        assert_eq!(adjust_reps("10-15", power, false), "6-10");
    }

    #[test]
    fn test_adjust_reps_deload_precedes_theme_focus() {
        let power = theme_for_week(8);
        assert_eq!(adjust_reps("3×8-12", power, true), "2×8-12");
    }

    #[test]
    fn test_adjust_reps_neutral_theme_passthrough() {
        let theme = theme_for_week(1);
        assert_eq!(adjust_reps("2×8-12", theme, false), "2×8-12");
    }

    #[test]
    fn test_early_weeks_exclude_advanced_exercises() {
        let library = starter_library();
        let exercises: Vec<&Exercise> = library
            .exercises
            .iter()
            .filter(|e| e.pillar == Pillar::Strength)
            .collect();

        let early = select_exercises_for_week(&exercises, 2, Mode::Full, Pillar::Strength);
        assert!(early
            .iter()
            .all(|e| !e.name.to_lowercase().contains("advanced")));

        let late = select_exercises_for_week(&exercises, 8, Mode::Full, Pillar::Strength);
        assert_eq!(late.len(), max_exercises(Pillar::Strength, Mode::Full));
    }

    #[test]
    fn test_template_preferred_over_exercises() {
        let library = starter_library();
        let settings = Preferences {
            fitness_level: Some(Difficulty::Beginner),
            ..Default::default()
        }
        .resolve();

        let blocks = generate_day_blocks(&[Pillar::Strength], 1, &settings, &library);
        assert_eq!(blocks.len(), 1);
        // Starter library ships a beginner strength template
        let template_titles: Vec<&str> = library
            .templates
            .iter()
            .filter(|t| t.pillar == Pillar::Strength)
            .map(|t| t.name.as_str())
            .collect();
        assert!(template_titles.contains(&blocks[0].title.as_str()));
    }

    #[test]
    fn test_missing_pillar_content_skips_slot() {
        let library = Library::default();
        let settings = Preferences::default().resolve();
        let blocks = generate_day_blocks(&[Pillar::Strength, Pillar::Running], 1, &settings, &library);
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_rest_scaled_by_theme_multiplier() {
        let theme = theme_for_week(1); // rest multiplier 1.3
        assert_eq!(scale_rest(60, theme), 78);
        let mastery = theme_for_week(10); // rest multiplier 0.8
        assert_eq!(scale_rest(60, mastery), 48);
    }
}
