//! Duration estimation from free-text repetition specifications.
//!
//! Repetition specs are free text ("2×8-12", "30-45s", "3-5 circles/side").
//! Parsing is a single tagged-result function over ordered patterns; later
//! patterns are textual supersets of earlier ones, so the order of attempts
//! is what disambiguates, not pattern exclusivity.

use crate::types::{Difficulty, IntervalSet, Pillar, WorkoutBlock, WorkoutItem, WorkoutTemplate};
use once_cell::sync::Lazy;
use regex::Regex;

/// Seconds of work attributed to a single repetition
const SECONDS_PER_REP: f64 = 2.5;

/// Fallback estimate for specs that match no pattern
const DEFAULT_ITEM_SECONDS: f64 = 60.0;

/// Default warmup/cooldown when an interval set specifies none
const DEFAULT_RAMP_SECONDS: u32 = 300;

// Number range immediately followed by a seconds marker ("30-45s", "45 sec")
static TIMED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*(?:[-–]\s*(\d+))?\s*s(?:ec(?:ond)?s?)?\b").unwrap());

// Set × rep format ("2×8-12", "3x10")
static SET_REP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*[x×]\s*(\d+)\s*(?:[-–]\s*(\d+))?").unwrap());

// Bare rep range or single number ("8-12", "10")
static REP_RANGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\s*(?:[-–]\s*(\d+))?").unwrap());

/// Parsed form of a repetition specification
#[derive(Clone, Debug, PartialEq)]
pub enum RepSpec {
    /// Time under tension in seconds, as a range
    Timed { min_sec: u32, max_sec: u32 },
    /// Multiple sets of a rep range
    SetRep {
        sets: u32,
        min_reps: u32,
        max_reps: u32,
    },
    /// Single implied set of a rep range
    RepRange { min: u32, max: u32 },
    /// Digit-free spec recognized by keyword ("circles", "flow")
    Keyword { seconds: u32 },
    /// Nothing matched
    Unparsed,
}

/// Parse a repetition spec into its tagged form.
///
/// Patterns are tried in a fixed order: timed, set×rep, bare rep range,
/// keyword, unparsed. The keyword branch is only reachable for digit-free
/// specs since the rep-range pattern accepts any number.
pub fn parse_rep_spec(spec: &str) -> RepSpec {
    let lower = spec.to_lowercase();

    if let Some(caps) = TIMED_RE.captures(&lower) {
        let min_sec: u32 = caps[1].parse().unwrap_or(30);
        let max_sec: u32 = caps
            .get(2)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(min_sec);
        return RepSpec::Timed { min_sec, max_sec };
    }

    if let Some(caps) = SET_REP_RE.captures(&lower) {
        let sets: u32 = caps[1].parse().unwrap_or(1);
        let min_reps: u32 = caps[2].parse().unwrap_or(1);
        let max_reps: u32 = caps
            .get(3)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(min_reps);
        return RepSpec::SetRep {
            sets,
            min_reps,
            max_reps,
        };
    }

    if let Some(caps) = REP_RANGE_RE.captures(&lower) {
        let min: u32 = caps[1].parse().unwrap_or(1);
        let max: u32 = caps
            .get(2)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(min);
        return RepSpec::RepRange { min, max };
    }

    if lower.contains("circle") || lower.contains("car") {
        return RepSpec::Keyword { seconds: 45 };
    }
    if lower.contains("flow") || lower.contains("sequence") {
        return RepSpec::Keyword { seconds: 120 };
    }

    RepSpec::Unparsed
}

/// Estimate working seconds for a repetition spec.
///
/// `rest_sec` is only charged between sets of a set×rep spec; single-set
/// and timed specs carry no inter-set rest. Empty specs estimate to zero.
pub fn estimate_reps_seconds(spec: &str, rest_sec: u32) -> f64 {
    if spec.is_empty() {
        return 0.0;
    }

    match parse_rep_spec(spec) {
        RepSpec::Timed { min_sec, max_sec } => f64::from(min_sec + max_sec) / 2.0,
        RepSpec::SetRep {
            sets,
            min_reps,
            max_reps,
        } => {
            let avg_reps = f64::from(min_reps + max_reps) / 2.0;
            let work = f64::from(sets) * avg_reps * SECONDS_PER_REP;
            let inter_set_rest = f64::from(sets.saturating_sub(1)) * f64::from(rest_sec);
            work + inter_set_rest
        }
        RepSpec::RepRange { min, max } => f64::from(min + max) / 2.0 * SECONDS_PER_REP,
        RepSpec::Keyword { seconds } => f64::from(seconds),
        RepSpec::Unparsed => DEFAULT_ITEM_SECONDS,
    }
}

/// Estimate total seconds for one workout item (work plus its own rest)
pub fn estimate_item_seconds(item: &WorkoutItem) -> f64 {
    let work = estimate_reps_seconds(
        item.reps.as_deref().unwrap_or(""),
        item.rest_sec.unwrap_or(45),
    );
    work + f64::from(item.rest_sec.unwrap_or(0))
}

/// Estimate minutes for a block, recomputed from its items.
///
/// Item-less blocks (interval-backed) have no content to sum; their stored
/// duration is authoritative instead.
pub fn estimate_block_minutes(block: &WorkoutBlock) -> u32 {
    if block.items.is_empty() {
        return block.estimated_duration_min;
    }

    let items_sec: f64 = block.items.iter().map(estimate_item_seconds).sum();
    let block_rest = f64::from(block.rest_sec.unwrap_or(0));
    ((items_sec + block_rest) / 60.0).ceil() as u32
}

/// Estimate minutes for a workout template
pub fn estimate_template_minutes(template: &WorkoutTemplate) -> u32 {
    let total_sec: f64 = template
        .items
        .iter()
        .map(|item| {
            let rest = item.rest_sec.unwrap_or(45);
            estimate_reps_seconds(item.reps.as_deref().unwrap_or(""), rest) + f64::from(rest)
        })
        .sum();

    (total_sec / 60.0).ceil() as u32
}

/// Estimate minutes for an interval set, warmup and cooldown included
pub fn estimate_interval_minutes(interval: &IntervalSet) -> u32 {
    let warmup = interval.warmup_sec.unwrap_or(DEFAULT_RAMP_SECONDS);
    let cooldown = interval.cooldown_sec.unwrap_or(DEFAULT_RAMP_SECONDS);
    let work: u32 = interval
        .steps
        .iter()
        .map(|step| (step.work_sec + step.rest_sec) * step.repeat)
        .sum();

    (f64::from(warmup + work + cooldown) / 60.0).ceil() as u32
}

/// Render a minute count for display ("42min", "1h 5min")
pub fn format_duration(minutes: u32) -> String {
    if minutes < 60 {
        return format!("{}min", minutes);
    }

    let hours = minutes / 60;
    let remaining = minutes % 60;
    if remaining == 0 {
        format!("{}h", hours)
    } else {
        format!("{}h {}min", hours, remaining)
    }
}

/// Rough RPE estimate for a pillar/difficulty/fitness-level combination.
///
/// Display heuristic only; the generator does not schedule off of it.
pub fn estimate_rpe(pillar: Pillar, difficulty: Option<Difficulty>, fitness_level: Difficulty) -> u8 {
    let mut rpe: f64 = match pillar {
        Pillar::Strength => 6.0,
        Pillar::Running => 7.0,
        Pillar::Cardio => 6.0,
        Pillar::TaiChi => 4.0,
        Pillar::Mobility => 3.0,
    };

    match difficulty {
        Some(Difficulty::Beginner) => rpe -= 1.0,
        Some(Difficulty::Moderate) => rpe += 1.0,
        _ => {}
    }

    match fitness_level {
        Difficulty::Beginner => rpe += 1.0,
        Difficulty::Moderate => rpe -= 0.5,
        Difficulty::Easy => {}
    }

    rpe.round().clamp(1.0, 10.0) as u8
}
