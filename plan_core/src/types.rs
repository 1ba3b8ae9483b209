//! Core domain types for the Pillarplan program generator.
//!
//! This module defines the fundamental types used throughout the system:
//! - Pillars, modes, and difficulty tags
//! - User preferences and their resolved generation settings
//! - Library records (exercises, templates, interval sets)
//! - Transient generation artifacts (items, blocks)
//! - Week themes and the generated program structure

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Pillar and Mode Types
// ============================================================================

/// A fitness category used to tag content and schedule slots
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Pillar {
    Strength,
    Cardio,
    Running,
    TaiChi,
    Mobility,
}

impl Pillar {
    pub const ALL: [Pillar; 5] = [
        Pillar::Strength,
        Pillar::Cardio,
        Pillar::Running,
        Pillar::TaiChi,
        Pillar::Mobility,
    ];

    /// Running and cardio slots are filled from interval sets,
    /// everything else from templates/exercises.
    pub fn is_interval_based(self) -> bool {
        matches!(self, Pillar::Running | Pillar::Cardio)
    }

    /// Default repetition spec used when an exercise carries none
    pub fn default_reps(self) -> &'static str {
        match self {
            Pillar::Strength => "2×8-12",
            Pillar::Mobility => "30-45s",
            Pillar::TaiChi => "3-5 repetitions",
            Pillar::Running | Pillar::Cardio => "See intervals",
        }
    }

    /// Default rest seconds used when an exercise carries none
    pub fn default_rest_sec(self) -> u32 {
        match self {
            Pillar::Strength => 60,
            Pillar::TaiChi => 30,
            Pillar::Mobility | Pillar::Running | Pillar::Cardio => 0,
        }
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            Pillar::Strength => "Strength",
            Pillar::Cardio => "Cardio",
            Pillar::Running => "Running",
            Pillar::TaiChi => "Tai Chi",
            Pillar::Mobility => "Mobility",
        }
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Session variant: time-constrained vs complete
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Short,
    Full,
}

/// Difficulty tag shared by library content and the user's fitness level
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Beginner,
    Easy,
    Moderate,
}

// ============================================================================
// Preferences
// ============================================================================

/// User preference record as supplied by the settings/onboarding flow.
///
/// All fields are optional; [`Preferences::resolve`] fills in the documented
/// defaults before generation.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_per_week: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_duration_min: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_mode: Option<Mode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fitness_level: Option<Difficulty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pillars: Option<Vec<Pillar>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_focus: Option<Pillar>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub equipment: BTreeMap<String, bool>,
}

/// Fully-resolved generation settings with defaults applied
#[derive(Clone, Debug)]
pub struct GenerationSettings {
    pub week_length: u32,
    pub days_per_week: u32,
    pub max_duration_min: u32,
    pub mode: Mode,
    pub fitness_level: Difficulty,
    pub pillars: Vec<Pillar>,
    pub primary_focus: Option<Pillar>,
    pub equipment: BTreeMap<String, bool>,
}

/// Default pillar rotation when the user selected none
const DEFAULT_PILLARS: [Pillar; 4] = [
    Pillar::Strength,
    Pillar::TaiChi,
    Pillar::Running,
    Pillar::Mobility,
];

impl Preferences {
    /// Apply documented defaults and invariants.
    ///
    /// Defaults: 10 weeks, 5 days/week, 45 minute cap, full mode, beginner.
    /// An empty pillar set falls back to the default rotation; a primary
    /// focus outside the selected pillars is dropped rather than rejected.
    pub fn resolve(&self) -> GenerationSettings {
        let pillars = match &self.pillars {
            Some(p) if !p.is_empty() => p.clone(),
            _ => DEFAULT_PILLARS.to_vec(),
        };

        let primary_focus = self.primary_focus.filter(|p| pillars.contains(p));
        if self.primary_focus.is_some() && primary_focus.is_none() {
            tracing::warn!(
                "Primary focus {:?} is not among selected pillars; ignoring",
                self.primary_focus
            );
        }

        GenerationSettings {
            week_length: self.week_length.filter(|w| *w > 0).unwrap_or(10),
            days_per_week: self.days_per_week.filter(|d| *d > 0).unwrap_or(5),
            max_duration_min: self.max_duration_min.filter(|m| *m > 0).unwrap_or(45),
            mode: self.default_mode.unwrap_or(Mode::Full),
            fitness_level: self.fitness_level.unwrap_or(Difficulty::Beginner),
            pillars,
            primary_focus,
            equipment: self.equipment.clone(),
        }
    }
}

// ============================================================================
// Library Records
// ============================================================================

/// A single exercise in the content library
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub pillar: Pillar,
    pub name: String,
    /// Ordered coaching cues shown alongside the exercise
    #[serde(default)]
    pub cues: Vec<String>,
    #[serde(default)]
    pub default_reps: Option<String>,
    #[serde(default)]
    pub default_rest_sec: Option<u32>,
    #[serde(default = "default_true")]
    pub is_public: bool,
}

/// One entry of a workout template (exercise reference or free-standing name)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TemplateItem {
    #[serde(default)]
    pub exercise_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub reps: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub rest_sec: Option<u32>,
    #[serde(default)]
    pub sort_order: Option<u32>,
}

/// A curated, ordered workout for one pillar
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkoutTemplate {
    pub id: String,
    pub pillar: Pillar,
    pub name: String,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub items: Vec<TemplateItem>,
    #[serde(default = "default_true")]
    pub is_public: bool,
}

/// One step of an interval set (e.g. "run 60s, walk 90s, ×6")
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IntervalStep {
    pub label: String,
    pub work_sec: u32,
    pub rest_sec: u32,
    pub repeat: u32,
}

/// A structured interval workout for running/cardio slots
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IntervalSet {
    pub id: String,
    pub pillar: Pillar,
    pub name: String,
    #[serde(default)]
    pub warmup_sec: Option<u32>,
    #[serde(default)]
    pub cooldown_sec: Option<u32>,
    pub steps: Vec<IntervalStep>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default = "default_true")]
    pub is_public: bool,
}

/// Immutable content snapshot consumed by one generation call.
///
/// Interval sets are expected sorted easiest-first per pillar; week-based
/// progression indexes into that order.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Library {
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    #[serde(default)]
    pub templates: Vec<WorkoutTemplate>,
    #[serde(default)]
    pub intervals: Vec<IntervalSet>,
}

fn default_true() -> bool {
    true
}

// ============================================================================
// Generation Artifacts
// ============================================================================

/// One exercise occurrence inside a generated block
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutItem {
    pub name: String,
    #[serde(default)]
    pub reps: Option<String>,
    #[serde(default)]
    pub rest_sec: Option<u32>,
    #[serde(default)]
    pub cues: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub exercise_id: Option<String>,
}

/// One pillar-scoped segment of a generated day.
///
/// Interval-backed blocks carry no items; their stored duration is the
/// lesser of the interval's computed minutes and the slot allocation.
/// Item-bearing blocks always have their duration recomputed from contents.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkoutBlock {
    #[serde(rename = "type")]
    pub pillar: Pillar,
    pub title: String,
    pub items: Vec<WorkoutItem>,
    #[serde(default)]
    pub rest_sec: Option<u32>,
    pub estimated_duration_min: u32,
}

// ============================================================================
// Week Themes
// ============================================================================

/// Parameters of one week of the progression curve
#[derive(Clone, Debug, PartialEq)]
pub struct WeekTheme {
    pub name: &'static str,
    /// Intensity factor in (0, 1]
    pub intensity: f64,
    /// Multiplier applied to per-item rest seconds
    pub rest_multiplier: f64,
    pub focus: &'static [&'static str],
}

impl WeekTheme {
    pub fn has_focus(&self, tag: &str) -> bool {
        self.focus.contains(&tag)
    }
}

// ============================================================================
// Generated Program
// ============================================================================

/// Program-level metadata
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProgramRecord {
    pub start_date: NaiveDate,
    pub length_weeks: u32,
}

/// One week record with its display theme
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProgramWeek {
    pub week_number: u32,
    pub theme: String,
}

/// One finalized day with its trimmed blocks
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProgramDay {
    pub week_number: u32,
    /// Day-of-week index, 1-7
    pub day_of_week: u32,
    pub mode: Mode,
    pub blocks: Vec<WorkoutBlock>,
    pub est_total_min: u32,
}

/// The complete output of one generation run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeneratedProgram {
    pub program: ProgramRecord,
    pub weeks: Vec<ProgramWeek>,
    pub days: Vec<ProgramDay>,
}
