//! Time-budget allocation and trimming.
//!
//! When a day's raw blocks run over the session cap, three ordered passes
//! rebuild the day against a shrinking remaining budget: core pillars first,
//! then the primary focus, then everything else. Individual blocks are
//! shrunk by a keyword-priority greedy pass over their items. This is a
//! best-effort heuristic; callers wanting a hard guarantee check the result
//! with [`validate_time_budget`].

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::estimates::{estimate_block_minutes, estimate_item_seconds};
use crate::types::{Mode, Pillar, WorkoutBlock, WorkoutItem};

/// Pillars that are never cut from a day
pub const CORE_PILLARS: [Pillar; 1] = [Pillar::Mobility];

/// Secondary blocks shorter than this after trimming are dropped
const MIN_BLOCK_MINUTES: f64 = 5.0;

/// Flat priority bonus for items carrying coaching cues
const CUE_BONUS: i32 = 2;

fn is_core(pillar: Pillar) -> bool {
    CORE_PILLARS.contains(&pillar)
}

/// Trim a day's blocks to fit the session cap.
///
/// Blocks already within budget pass through untouched. Otherwise the day
/// is rebuilt in priority order and each placed block's actual duration is
/// charged against the remaining budget.
pub fn trim_to_time_budget(
    blocks: Vec<WorkoutBlock>,
    max_duration_min: u32,
    mode: Mode,
    primary_focus: Option<Pillar>,
) -> Vec<WorkoutBlock> {
    let total: u32 = blocks.iter().map(estimate_block_minutes).sum();
    if total <= max_duration_min {
        return blocks;
    }

    tracing::debug!(total, budget = max_duration_min, "day over budget, trimming");

    let mut trimmed: Vec<WorkoutBlock> = Vec::with_capacity(blocks.len());
    let mut remaining = f64::from(max_duration_min);

    // Pass 1: core blocks are always kept, shrunk to what is left
    for block in blocks.iter().filter(|b| is_core(b.pillar)) {
        let own = f64::from(estimate_block_minutes(block));
        let placed = trim_block(block, remaining.min(own), mode);
        remaining -= f64::from(estimate_block_minutes(&placed));
        trimmed.push(placed);
    }

    // Pass 2: primary focus gets the larger share of the remainder
    if let Some(focus) = primary_focus {
        if remaining > 0.0 {
            for block in blocks
                .iter()
                .filter(|b| b.pillar == focus && !is_core(b.pillar))
            {
                if remaining <= 0.0 {
                    break;
                }
                let own = f64::from(estimate_block_minutes(block));
                let allocated = match mode {
                    Mode::Short => remaining * 0.7,
                    Mode::Full => (remaining * 0.6).min(own),
                };
                let placed = trim_block(block, allocated, mode);
                remaining -= f64::from(estimate_block_minutes(&placed));
                trimmed.push(placed);
            }
        }
    }

    // Pass 3: remaining pillars split what is left, dropped when too short
    let secondary: Vec<&WorkoutBlock> = blocks
        .iter()
        .filter(|b| {
            !is_core(b.pillar)
                && Some(b.pillar) != primary_focus
                && !trimmed.iter().any(|t| t.pillar == b.pillar)
        })
        .collect();

    for block in secondary {
        if remaining <= MIN_BLOCK_MINUTES {
            break;
        }
        let own = f64::from(estimate_block_minutes(block));
        let placed = trim_block(block, (remaining / 2.0).min(own), mode);
        let placed_min = f64::from(estimate_block_minutes(&placed));
        if placed_min >= MIN_BLOCK_MINUTES {
            remaining -= placed_min;
            trimmed.push(placed);
        } else {
            tracing::debug!(%block.pillar, "secondary block too short after trim, dropped");
        }
    }

    trimmed
}

/// Shrink one block to at most `target_minutes`.
///
/// Item-bearing blocks are rebuilt by greedy item selection; item-less
/// blocks (intervals) only have their stored duration capped, since their
/// content is not itemized.
pub fn trim_block(block: &WorkoutBlock, target_minutes: f64, mode: Mode) -> WorkoutBlock {
    let current = estimate_block_minutes(block);
    if f64::from(current) <= target_minutes {
        return block.clone();
    }

    if block.items.is_empty() {
        let mut capped = block.clone();
        capped.estimated_duration_min = current.min(target_minutes.max(0.0).floor() as u32);
        return capped;
    }

    let target_sec = target_minutes * 60.0;
    let prioritized = prioritize_items(&block.items, block.pillar, mode);

    let mut kept: Vec<WorkoutItem> = Vec::new();
    let mut used = 0.0_f64;
    for item in prioritized {
        let item_sec = estimate_item_seconds(item);
        if used + item_sec <= target_sec {
            kept.push(item.clone());
            used += item_sec;
        } else if used < target_sec * 0.8 {
            // Room left: shrink the item instead of dropping it outright
            if let Some(modified) = modify_item_for_time(item, target_sec - used) {
                used += estimate_item_seconds(&modified);
                kept.push(modified);
            }
        }
        if used >= target_sec * 0.95 {
            break;
        }
    }

    let mut out = block.clone();
    out.items = kept;
    out.estimated_duration_min = (used / 60.0).ceil() as u32;
    out
}

/// Order items by descending priority score, stable for equal scores.
fn prioritize_items(items: &[WorkoutItem], pillar: Pillar, mode: Mode) -> Vec<&WorkoutItem> {
    let priorities = pillar_priorities(pillar, mode);
    let mut ordered: Vec<&WorkoutItem> = items.iter().collect();
    ordered.sort_by_key(|item| std::cmp::Reverse(item_priority(item, priorities)));
    ordered
}

// Strength favors compound hip-hinge and push/pull patterns; short mode
// boosts the big lifts further.
static STRENGTH_PRIORITIES: &[(&str, i32)] = &[
    ("squat", 10),
    ("deadlift", 10),
    ("push", 9),
    ("pull", 9),
    ("hip", 8),
    ("bridge", 7),
    ("lunge", 7),
    ("split", 7),
    ("plank", 6),
    ("single", 5),
    ("core", 5),
    ("calf", 3),
];

static STRENGTH_SHORT_PRIORITIES: &[(&str, i32)] = &[
    ("squat", 12),
    ("deadlift", 12),
    ("push", 10),
    ("pull", 10),
    ("hip", 8),
    ("bridge", 7),
    ("lunge", 7),
    ("split", 7),
    ("plank", 6),
    ("single", 5),
    ("core", 5),
    ("calf", 3),
];

static MOBILITY_PRIORITIES: &[(&str, i32)] = &[
    ("hip", 10),
    ("shoulder", 9),
    ("spine", 8),
    ("car", 8),
    ("ankle", 7),
    ("neck", 6),
    ("hamstring", 6),
    ("couch", 5),
    ("stretch", 4),
];

static TAI_CHI_PRIORITIES: &[(&str, i32)] = &[
    ("commencement", 10),
    ("stance", 9),
    ("wild horse", 8),
    ("white crane", 8),
    ("brush knee", 7),
    ("repulse", 6),
    ("wave hands", 6),
    ("golden", 5),
    ("flow", 4),
];

static RUNNING_PRIORITIES: &[(&str, i32)] = &[
    ("interval", 10),
    ("tempo", 8),
    ("easy", 6),
    ("recovery", 4),
];

static CARDIO_PRIORITIES: &[(&str, i32)] = &[
    ("interval", 10),
    ("brisk", 8),
    ("walk", 6),
    ("low impact", 5),
];

fn pillar_priorities(pillar: Pillar, mode: Mode) -> &'static [(&'static str, i32)] {
    match (pillar, mode) {
        (Pillar::Strength, Mode::Short) => STRENGTH_SHORT_PRIORITIES,
        (Pillar::Strength, Mode::Full) => STRENGTH_PRIORITIES,
        (Pillar::Mobility, _) => MOBILITY_PRIORITIES,
        (Pillar::TaiChi, _) => TAI_CHI_PRIORITIES,
        (Pillar::Running, _) => RUNNING_PRIORITIES,
        (Pillar::Cardio, _) => CARDIO_PRIORITIES,
    }
}

/// Score an item by keyword substring matches plus the cue bonus.
fn item_priority(item: &WorkoutItem, priorities: &[(&str, i32)]) -> i32 {
    let name = item.name.to_lowercase();
    let mut score: i32 = priorities
        .iter()
        .filter(|(keyword, _)| name.contains(keyword))
        .map(|(_, points)| points)
        .sum();
    if !item.cues.is_empty() {
        score += CUE_BONUS;
    }
    score
}

// Leading set count ahead of a rep tail ("3×8-12")
static SET_REP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*[x×]\s*(\d+(?:[-–]\d+)?)").unwrap());
// Two-endpoint time range ("45-60s")
static TIME_RANGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)[-–](\d+)s?").unwrap());

/// Shrink a single item to fit the available seconds, or give up on it.
///
/// Tried in order: drop one set, narrow a time range downward, cut rest by
/// 30%. The first modification that fits wins; a narrowed time range is
/// accepted without a fit re-check since narrowing always reduces work.
fn modify_item_for_time(item: &WorkoutItem, available_sec: f64) -> Option<WorkoutItem> {
    if available_sec < 15.0 {
        return None;
    }
    if estimate_item_seconds(item) <= available_sec {
        return Some(item.clone());
    }

    if let Some(reps) = &item.reps {
        let lower = reps.to_lowercase();

        if let Some(caps) = SET_REP_RE.captures(&lower) {
            let sets: u32 = caps[1].parse().unwrap_or(1);
            if sets > 1 {
                let mut modified = item.clone();
                modified.reps = Some(format!("{}×{}", sets - 1, &caps[2]));
                if estimate_item_seconds(&modified) <= available_sec {
                    return Some(modified);
                }
            }
        }

        if let Some(caps) = TIME_RANGE_RE.captures(&lower) {
            let min_sec: u32 = caps[1].parse().unwrap_or(0);
            let max_sec: u32 = caps[2].parse().unwrap_or(0);
            let target = max_sec.min((available_sec * 0.8).floor() as u32);
            if target >= min_sec {
                let mut modified = item.clone();
                modified.reps = Some(format!(
                    "{}-{}s",
                    min_sec.max(target.saturating_sub(10)),
                    target
                ));
                return Some(modified);
            }
        }
    }

    if let Some(rest) = item.rest_sec {
        if rest > 15 {
            let mut modified = item.clone();
            modified.rest_sec = Some(((f64::from(rest) * 0.7).floor() as u32).max(15));
            if estimate_item_seconds(&modified) <= available_sec {
                return Some(modified);
            }
        }
    }

    None
}

/// Recommended per-pillar minute allocations for one day.
///
/// Mobility always gets a floored share first; a non-mobility primary focus
/// takes most of the remainder and the other pillars split the rest evenly.
pub fn recommended_time_splits(
    max_duration_min: u32,
    mode: Mode,
    pillars: &[Pillar],
    primary_focus: Option<Pillar>,
) -> BTreeMap<Pillar, f64> {
    let mut splits = BTreeMap::new();
    let total = f64::from(max_duration_min);

    let mobility = match mode {
        Mode::Short => (total * 0.25).max(5.0),
        Mode::Full => (total * 0.2).max(8.0),
    };
    splits.insert(Pillar::Mobility, mobility);
    let mut remaining = total - mobility;

    let focus = primary_focus.filter(|f| pillars.contains(f) && *f != Pillar::Mobility);
    if let Some(focus) = focus {
        let share = match mode {
            Mode::Short => remaining * 0.7,
            Mode::Full => remaining * 0.5,
        };
        splits.insert(focus, share);
        remaining -= share;
    }

    let others: Vec<Pillar> = pillars
        .iter()
        .copied()
        .filter(|p| *p != Pillar::Mobility && Some(*p) != focus)
        .collect();
    if !others.is_empty() && remaining > 0.0 {
        let per_pillar = remaining / others.len() as f64;
        for pillar in others {
            splits.insert(pillar, per_pillar);
        }
    }

    splits
}

/// Result of checking a day's blocks against the session cap
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BudgetCheck {
    pub valid: bool,
    pub total_min: u32,
    pub overage_min: u32,
}

/// Compare a block set's total estimate against the session cap.
pub fn validate_time_budget(blocks: &[WorkoutBlock], max_duration_min: u32) -> BudgetCheck {
    let total_min: u32 = blocks.iter().map(estimate_block_minutes).sum();
    let overage_min = total_min.saturating_sub(max_duration_min);
    BudgetCheck {
        valid: overage_min == 0,
        total_min,
        overage_min,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, reps: &str, rest_sec: u32) -> WorkoutItem {
        WorkoutItem {
            name: name.into(),
            reps: Some(reps.into()),
            rest_sec: Some(rest_sec),
            cues: vec![],
            notes: None,
            exercise_id: None,
        }
    }

    fn block(pillar: Pillar, items: Vec<WorkoutItem>) -> WorkoutBlock {
        let mut b = WorkoutBlock {
            pillar,
            title: format!("{} Block", pillar.label()),
            items,
            rest_sec: None,
            estimated_duration_min: 0,
        };
        b.estimated_duration_min = estimate_block_minutes(&b);
        b
    }

    fn heavy_strength_block() -> WorkoutBlock {
        block(
            Pillar::Strength,
            vec![
                item("Goblet Squat", "3×8-12", 90),
                item("Push-Up", "3×8-12", 60),
                item("Calf Raise", "3×10-15", 60),
                item("Plank", "45-60s", 45),
            ],
        )
    }

    fn mobility_block() -> WorkoutBlock {
        block(
            Pillar::Mobility,
            vec![
                item("Hip CARs", "5-8", 15),
                item("Shoulder Circles", "30-45s", 15),
            ],
        )
    }

    #[test]
    fn test_within_budget_is_untouched() {
        let blocks = vec![mobility_block()];
        let before = blocks.clone();
        let after = trim_to_time_budget(blocks, 60, Mode::Full, None);
        assert_eq!(after.len(), before.len());
        assert_eq!(after[0].items.len(), before[0].items.len());
    }

    #[test]
    fn test_trimming_never_increases_duration() {
        let blocks = vec![mobility_block(), heavy_strength_block()];
        let before: u32 = blocks.iter().map(estimate_block_minutes).sum();
        assert!(before > 15);

        let after = trim_to_time_budget(blocks, 15, Mode::Full, None);
        let total: u32 = after.iter().map(estimate_block_minutes).sum();
        assert!(total <= before);
    }

    #[test]
    fn test_core_mobility_survives_trimming() {
        let blocks = vec![heavy_strength_block(), mobility_block()];
        let after = trim_to_time_budget(blocks, 10, Mode::Short, Some(Pillar::Strength));
        assert!(after.iter().any(|b| b.pillar == Pillar::Mobility));
    }

    #[test]
    fn test_secondary_block_dropped_when_too_short() {
        // Large focus block eats the budget, leaving the secondary with a
        // sub-5-minute allocation
        let blocks = vec![
            heavy_strength_block(),
            block(Pillar::TaiChi, vec![item("Opening Flow", "2-3", 30)]),
        ];
        let after = trim_to_time_budget(blocks, 12, Mode::Short, Some(Pillar::Strength));
        assert!(after.iter().all(|b| b.pillar != Pillar::TaiChi));
    }

    #[test]
    fn test_trim_block_prefers_high_priority_items() {
        let b = heavy_strength_block();
        let trimmed = trim_block(&b, 5.0, Mode::Full);
        assert!(!trimmed.items.is_empty());
        assert_eq!(trimmed.items[0].name, "Goblet Squat");
        assert!(trimmed.items.iter().all(|i| i.name != "Calf Raise"));
        assert!(trimmed.estimated_duration_min <= 5);
    }

    #[test]
    fn test_trim_block_caps_itemless_block() {
        let interval = WorkoutBlock {
            pillar: Pillar::Running,
            title: "Run/Walk Intervals".into(),
            items: vec![],
            rest_sec: None,
            estimated_duration_min: 30,
        };
        let trimmed = trim_block(&interval, 12.0, Mode::Full);
        assert_eq!(trimmed.estimated_duration_min, 12);
        assert_eq!(trim_block(&interval, 45.0, Mode::Full).estimated_duration_min, 30);
    }

    #[test]
    fn test_cue_bonus_breaks_keyword_ties() {
        let mut cued = item("Wall Push-Up", "2×8-12", 60);
        cued.cues = vec!["Brace the trunk".into()];
        let plain = item("Incline Push-Up", "2×8-12", 60);

        let items = vec![plain, cued];
        let ordered = prioritize_items(&items, Pillar::Strength, Mode::Full);
        assert_eq!(ordered[0].name, "Wall Push-Up");
    }

    #[test]
    fn test_modify_item_reduces_sets_first() {
        let i = item("Goblet Squat", "3×8-12", 30);
        // 3 sets: 3*10*2.5 + 2*30 = 135s work + 30 rest = 165s.
        // 2 sets: 2*10*2.5 + 30 = 80 + 30 rest = 110s.
        let modified = modify_item_for_time(&i, 120.0).unwrap();
        assert_eq!(modified.reps.as_deref(), Some("2×8-12"));
    }

    #[test]
    fn test_modify_item_narrows_time_range() {
        let i = item("Plank", "45-60s", 0);
        // avail 40s, target = min(60, 32) = 32 < min 45 -> range fails,
        // no rest to cut -> item dropped
        assert!(modify_item_for_time(&i, 40.0).is_none());

        let i = item("Plank", "20-60s", 0);
        // avg 40s > 30s available; target = floor(30*0.8) = 24
        let modified = modify_item_for_time(&i, 30.0).unwrap();
        assert_eq!(modified.reps.as_deref(), Some("20-24s"));
    }

    #[test]
    fn test_modify_item_minimum_window() {
        let i = item("Goblet Squat", "3×8-12", 30);
        assert!(modify_item_for_time(&i, 10.0).is_none());
    }

    #[test]
    fn test_splits_always_fund_mobility() {
        let pillars = [Pillar::Strength, Pillar::Mobility];
        let splits = recommended_time_splits(30, Mode::Short, &pillars, Some(Pillar::Strength));
        assert_eq!(splits.get(&Pillar::Mobility), Some(&7.5));
        // 70% of the 22.5 minute remainder
        assert_eq!(splits.get(&Pillar::Strength), Some(&15.75));

        // Minimum floor kicks in for tiny sessions
        let splits = recommended_time_splits(10, Mode::Full, &pillars, None);
        assert_eq!(splits.get(&Pillar::Mobility), Some(&8.0));
    }

    #[test]
    fn test_splits_even_without_focus() {
        let pillars = [Pillar::Strength, Pillar::TaiChi, Pillar::Mobility];
        let splits = recommended_time_splits(40, Mode::Full, &pillars, None);
        let strength = splits[&Pillar::Strength];
        let tai_chi = splits[&Pillar::TaiChi];
        assert!((strength - tai_chi).abs() < f64::EPSILON);
        assert_eq!(strength, 16.0);
    }

    #[test]
    fn test_validate_budget_reports_overage() {
        let blocks = vec![heavy_strength_block()];
        let total = estimate_block_minutes(&blocks[0]);
        let check = validate_time_budget(&blocks, total);
        assert!(check.valid);
        assert_eq!(check.overage_min, 0);

        let check = validate_time_budget(&blocks, total - 3);
        assert!(!check.valid);
        assert_eq!(check.overage_min, 3);
        assert_eq!(check.total_min, total);
    }
}
