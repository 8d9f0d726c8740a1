//! Project completion formulas.
//!
//! The sync layer's progress aggregator is parameterized by a
//! [`ProgressFormula`]; [`AverageProgress`] is the default.

use crate::models::Schedule;

/// Derives a project's completion percentage (0–100) from its tasks.
pub trait ProgressFormula: Send + Sync {
    fn project_progress(&self, tasks: &[&Schedule]) -> u8;
}

/// Mean of task progress. Tasks marked done count as 100 whatever their
/// progress field says. No tasks means 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct AverageProgress;

impl ProgressFormula for AverageProgress {
    fn project_progress(&self, tasks: &[&Schedule]) -> u8 {
        if tasks.is_empty() {
            return 0;
        }
        let total: u32 = tasks.iter().map(|t| task_progress(t)).sum();
        let mean = (total as f64 / tasks.len() as f64).round();
        mean.clamp(0.0, 100.0) as u8
    }
}

/// Mean weighted by planned cost, falling back to [`AverageProgress`] when
/// no task carries a planned cost.
#[derive(Debug, Clone, Copy, Default)]
pub struct CostWeightedProgress;

impl ProgressFormula for CostWeightedProgress {
    fn project_progress(&self, tasks: &[&Schedule]) -> u8 {
        let weight: f64 = tasks.iter().map(|t| t.planned_cost.max(0.0)).sum();
        if weight <= 0.0 {
            return AverageProgress.project_progress(tasks);
        }
        let weighted: f64 = tasks
            .iter()
            .map(|t| f64::from(task_progress(t)) * t.planned_cost.max(0.0))
            .sum();
        (weighted / weight).round().clamp(0.0, 100.0) as u8
    }
}

fn task_progress(task: &Schedule) -> u32 {
    if task.is_done() {
        100
    } else {
        u32::from(task.progress.min(100))
    }
}
