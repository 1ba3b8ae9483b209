//! Built-in starter content library.
//!
//! This module provides the default exercises, templates, and interval sets
//! used when no external library file is configured.

use crate::types::*;
use once_cell::sync::Lazy;

/// Cached starter library - built once and reused across all operations
static STARTER_LIBRARY: Lazy<Library> = Lazy::new(build_starter_library);

/// Get a copy of the cached starter library
pub fn starter_library() -> Library {
    STARTER_LIBRARY.clone()
}

/// Builds the starter library with built-in exercises, templates, and
/// interval sets
///
/// Interval sets are listed easiest-first per pillar; weekly progression
/// indexes into that order.
pub fn build_starter_library() -> Library {
    let mut exercises = Vec::new();
    let mut templates = Vec::new();
    let mut intervals = Vec::new();

    // ========================================================================
    // Exercises
    // ========================================================================

    exercises.push(Exercise {
        id: "goblet_squat".into(),
        pillar: Pillar::Strength,
        name: "Goblet Squat".into(),
        cues: vec![
            "Chest up, elbows inside knees".into(),
            "Push the floor apart".into(),
        ],
        default_reps: Some("2×8-12".into()),
        default_rest_sec: Some(60),
        is_public: true,
    });

    exercises.push(Exercise {
        id: "incline_pushup".into(),
        pillar: Pillar::Strength,
        name: "Incline Push-Up".into(),
        cues: vec!["Brace the trunk, full lockout".into()],
        default_reps: Some("2×8-12".into()),
        default_rest_sec: Some(60),
        is_public: true,
    });

    exercises.push(Exercise {
        id: "band_row".into(),
        pillar: Pillar::Strength,
        name: "Band Pull-Apart".into(),
        cues: vec!["Squeeze the shoulder blades".into()],
        default_reps: Some("2×10-15".into()),
        default_rest_sec: Some(45),
        is_public: true,
    });

    exercises.push(Exercise {
        id: "sl_glute_bridge".into(),
        pillar: Pillar::Strength,
        name: "Single-Leg Glute Bridge".into(),
        cues: vec!["Drive through the heel".into()],
        default_reps: Some("2×10-15".into()),
        default_rest_sec: Some(45),
        is_public: true,
    });

    exercises.push(Exercise {
        id: "pistol_squat_adv".into(),
        pillar: Pillar::Strength,
        name: "Advanced Pistol Squat".into(),
        cues: vec![],
        default_reps: Some("2×5-8".into()),
        default_rest_sec: Some(90),
        is_public: true,
    });

    exercises.push(Exercise {
        id: "hip_cars".into(),
        pillar: Pillar::Mobility,
        name: "Hip CARs".into(),
        cues: vec!["Slow, biggest pain-free circle".into()],
        default_reps: Some("3-5".into()),
        default_rest_sec: Some(15),
        is_public: true,
    });

    exercises.push(Exercise {
        id: "shoulder_cars".into(),
        pillar: Pillar::Mobility,
        name: "Shoulder CARs".into(),
        cues: vec!["Keep the trunk still".into()],
        default_reps: Some("3-5".into()),
        default_rest_sec: Some(15),
        is_public: true,
    });

    exercises.push(Exercise {
        id: "cat_cow".into(),
        pillar: Pillar::Mobility,
        name: "Cat-Cow Spine Waves".into(),
        cues: vec![],
        default_reps: Some("30-45s".into()),
        default_rest_sec: Some(15),
        is_public: true,
    });

    exercises.push(Exercise {
        id: "ankle_rocks".into(),
        pillar: Pillar::Mobility,
        name: "Ankle Rocks".into(),
        cues: vec![],
        default_reps: Some("30-45s".into()),
        default_rest_sec: Some(15),
        is_public: true,
    });

    exercises.push(Exercise {
        id: "couch_stretch".into(),
        pillar: Pillar::Mobility,
        name: "Couch Stretch".into(),
        cues: vec!["Squeeze the glute of the down leg".into()],
        default_reps: Some("45-60s".into()),
        default_rest_sec: Some(15),
        is_public: true,
    });

    exercises.push(Exercise {
        id: "commencement".into(),
        pillar: Pillar::TaiChi,
        name: "Commencement Form".into(),
        cues: vec!["Sink the weight before the arms rise".into()],
        default_reps: Some("2-3 repetitions".into()),
        default_rest_sec: Some(0),
        is_public: true,
    });

    exercises.push(Exercise {
        id: "horse_stance".into(),
        pillar: Pillar::TaiChi,
        name: "Horse Stance Hold".into(),
        cues: vec![],
        default_reps: Some("30-45s".into()),
        default_rest_sec: Some(30),
        is_public: true,
    });

    exercises.push(Exercise {
        id: "wild_horse".into(),
        pillar: Pillar::TaiChi,
        name: "Part the Wild Horse's Mane".into(),
        cues: vec!["Weight shifts before the hands move".into()],
        default_reps: Some("3-5 repetitions".into()),
        default_rest_sec: Some(0),
        is_public: true,
    });

    exercises.push(Exercise {
        id: "brush_knee".into(),
        pillar: Pillar::TaiChi,
        name: "Brush Knee and Push".into(),
        cues: vec![],
        default_reps: Some("3-5 repetitions".into()),
        default_rest_sec: Some(0),
        is_public: true,
    });

    // ========================================================================
    // Workout Templates
    // ========================================================================

    templates.push(WorkoutTemplate {
        id: "strength_foundations".into(),
        pillar: Pillar::Strength,
        name: "Foundations Strength".into(),
        difficulty: Some(Difficulty::Beginner),
        items: vec![
            TemplateItem {
                exercise_id: Some("goblet_squat".into()),
                name: Some("Goblet Squat".into()),
                reps: Some("2×8-12".into()),
                notes: None,
                rest_sec: Some(60),
                sort_order: Some(1),
            },
            TemplateItem {
                exercise_id: Some("incline_pushup".into()),
                name: Some("Incline Push-Up".into()),
                reps: Some("2×8-12".into()),
                notes: None,
                rest_sec: Some(60),
                sort_order: Some(2),
            },
            TemplateItem {
                exercise_id: Some("band_row".into()),
                name: Some("Band Pull-Apart".into()),
                reps: Some("2×10-15".into()),
                notes: None,
                rest_sec: Some(45),
                sort_order: Some(3),
            },
            TemplateItem {
                exercise_id: Some("sl_glute_bridge".into()),
                name: Some("Single-Leg Glute Bridge".into()),
                reps: Some("2×10-15".into()),
                notes: Some("Alternate sides each set".into()),
                rest_sec: Some(45),
                sort_order: Some(4),
            },
        ],
        is_public: true,
    });

    templates.push(WorkoutTemplate {
        id: "mobility_reset".into(),
        pillar: Pillar::Mobility,
        name: "Morning Mobility Reset".into(),
        difficulty: Some(Difficulty::Beginner),
        items: vec![
            TemplateItem {
                exercise_id: Some("hip_cars".into()),
                name: Some("Hip CARs".into()),
                reps: Some("3-5".into()),
                notes: None,
                rest_sec: Some(15),
                sort_order: Some(1),
            },
            TemplateItem {
                exercise_id: Some("cat_cow".into()),
                name: Some("Cat-Cow Spine Waves".into()),
                reps: Some("30-45s".into()),
                notes: None,
                rest_sec: Some(15),
                sort_order: Some(2),
            },
            TemplateItem {
                exercise_id: Some("couch_stretch".into()),
                name: Some("Couch Stretch".into()),
                reps: Some("45-60s".into()),
                notes: Some("Each side".into()),
                rest_sec: Some(15),
                sort_order: Some(3),
            },
        ],
        is_public: true,
    });

    templates.push(WorkoutTemplate {
        id: "tai_chi_opening".into(),
        pillar: Pillar::TaiChi,
        name: "Opening Sequence".into(),
        difficulty: Some(Difficulty::Beginner),
        items: vec![
            TemplateItem {
                exercise_id: Some("commencement".into()),
                name: Some("Commencement Form".into()),
                reps: Some("2-3 repetitions".into()),
                notes: None,
                rest_sec: Some(0),
                sort_order: Some(1),
            },
            TemplateItem {
                exercise_id: Some("horse_stance".into()),
                name: Some("Horse Stance Hold".into()),
                reps: Some("30-45s".into()),
                notes: None,
                rest_sec: Some(30),
                sort_order: Some(2),
            },
            TemplateItem {
                exercise_id: Some("wild_horse".into()),
                name: Some("Part the Wild Horse's Mane".into()),
                reps: Some("3-5 repetitions".into()),
                notes: None,
                rest_sec: Some(0),
                sort_order: Some(3),
            },
        ],
        is_public: true,
    });

    // ========================================================================
    // Interval Sets
    // ========================================================================

    intervals.push(IntervalSet {
        id: "run_walk_1_2".into(),
        pillar: Pillar::Running,
        name: "Run/Walk 1:2".into(),
        warmup_sec: Some(300),
        cooldown_sec: Some(300),
        steps: vec![IntervalStep {
            label: "Easy run".into(),
            work_sec: 60,
            rest_sec: 120,
            repeat: 6,
        }],
        difficulty: Some(Difficulty::Beginner),
        is_public: true,
    });

    intervals.push(IntervalSet {
        id: "run_walk_1_1".into(),
        pillar: Pillar::Running,
        name: "Run/Walk 1:1".into(),
        warmup_sec: Some(300),
        cooldown_sec: Some(300),
        steps: vec![IntervalStep {
            label: "Easy run".into(),
            work_sec: 60,
            rest_sec: 60,
            repeat: 8,
        }],
        difficulty: Some(Difficulty::Beginner),
        is_public: true,
    });

    intervals.push(IntervalSet {
        id: "run_tempo_intro".into(),
        pillar: Pillar::Running,
        name: "Tempo Introduction".into(),
        warmup_sec: Some(300),
        cooldown_sec: Some(300),
        steps: vec![IntervalStep {
            label: "Tempo run".into(),
            work_sec: 120,
            rest_sec: 60,
            repeat: 5,
        }],
        difficulty: Some(Difficulty::Easy),
        is_public: true,
    });

    intervals.push(IntervalSet {
        id: "run_repeats".into(),
        pillar: Pillar::Running,
        name: "Interval Repeats".into(),
        warmup_sec: Some(300),
        cooldown_sec: Some(300),
        steps: vec![IntervalStep {
            label: "Hard interval".into(),
            work_sec: 90,
            rest_sec: 90,
            repeat: 6,
        }],
        difficulty: Some(Difficulty::Moderate),
        is_public: true,
    });

    intervals.push(IntervalSet {
        id: "cardio_brisk_walk".into(),
        pillar: Pillar::Cardio,
        name: "Brisk Walk Intervals".into(),
        warmup_sec: Some(180),
        cooldown_sec: Some(180),
        steps: vec![IntervalStep {
            label: "Brisk pace".into(),
            work_sec: 180,
            rest_sec: 60,
            repeat: 4,
        }],
        difficulty: Some(Difficulty::Beginner),
        is_public: true,
    });

    intervals.push(IntervalSet {
        id: "cardio_low_impact".into(),
        pillar: Pillar::Cardio,
        name: "Low Impact Circuit".into(),
        warmup_sec: Some(180),
        cooldown_sec: Some(180),
        steps: vec![IntervalStep {
            label: "Work".into(),
            work_sec: 45,
            rest_sec: 15,
            repeat: 8,
        }],
        difficulty: Some(Difficulty::Easy),
        is_public: true,
    });

    Library {
        exercises,
        templates,
        intervals,
    }
}

impl Library {
    /// Validate the library for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let mut seen_ids = std::collections::BTreeSet::new();
        for exercise in &self.exercises {
            if exercise.id.is_empty() {
                errors.push("Exercise has empty ID".to_string());
            } else if !seen_ids.insert(exercise.id.clone()) {
                errors.push(format!("Duplicate exercise ID '{}'", exercise.id));
            }
            if exercise.name.is_empty() {
                errors.push(format!("Exercise '{}' has empty name", exercise.id));
            }
        }

        let mut seen_template_ids = std::collections::BTreeSet::new();
        for template in &self.templates {
            if template.id.is_empty() {
                errors.push("Template has empty ID".to_string());
            } else if !seen_template_ids.insert(template.id.clone()) {
                errors.push(format!("Duplicate template ID '{}'", template.id));
            }
            if template.name.is_empty() {
                errors.push(format!("Template '{}' has empty name", template.id));
            }
            if template.items.is_empty() {
                errors.push(format!("Template '{}' has no items", template.id));
            }

            for item in &template.items {
                if item.exercise_id.is_none() && item.name.is_none() {
                    errors.push(format!(
                        "Template '{}' has an item with neither exercise reference nor name",
                        template.id
                    ));
                }
                if let Some(exercise_id) = &item.exercise_id {
                    if !self.exercises.iter().any(|e| &e.id == exercise_id) {
                        errors.push(format!(
                            "Template '{}' references non-existent exercise '{}'",
                            template.id, exercise_id
                        ));
                    }
                }
            }
        }

        let mut seen_interval_ids = std::collections::BTreeSet::new();
        for interval in &self.intervals {
            if interval.id.is_empty() {
                errors.push("Interval set has empty ID".to_string());
            } else if !seen_interval_ids.insert(interval.id.clone()) {
                errors.push(format!("Duplicate interval set ID '{}'", interval.id));
            }
            if interval.name.is_empty() {
                errors.push(format!("Interval set '{}' has empty name", interval.id));
            }
            if interval.steps.is_empty() {
                errors.push(format!("Interval set '{}' has no steps", interval.id));
            }
            for step in &interval.steps {
                if step.work_sec == 0 {
                    errors.push(format!(
                        "Interval set '{}' has a step with zero work time",
                        interval.id
                    ));
                }
                if step.repeat == 0 {
                    errors.push(format!(
                        "Interval set '{}' has a step with zero repeats",
                        interval.id
                    ));
                }
            }
            if !interval.pillar.is_interval_based() {
                errors.push(format!(
                    "Interval set '{}' belongs to non-interval pillar '{}'",
                    interval.id, interval.pillar
                ));
            }
        }

        errors
    }
}
