//! Owner dashboard counters.

use serde::Serialize;

use crate::status::ProjectStatus;

/// Aggregate figures over the projects a staff member owns.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_projects: usize,
    pub in_progress_projects: usize,
    pub completed_projects: usize,
    /// Sum of `total_value` over completed projects.
    pub total_revenue: f64,
}

impl DashboardStats {
    pub fn from_projects<I>(projects: I) -> Self
    where
        I: IntoIterator<Item = (ProjectStatus, Option<f64>)>,
    {
        projects
            .into_iter()
            .fold(Self::default(), |mut stats, (status, value)| {
                stats.total_projects += 1;
                match status {
                    ProjectStatus::InProgress => stats.in_progress_projects += 1,
                    ProjectStatus::Completed => {
                        stats.completed_projects += 1;
                        stats.total_revenue += value.unwrap_or(0.0);
                    }
                    _ => {}
                }
                stats
            })
    }
}
