// src/dashboard_data.rs

use log::error;

use crate::api::Backend;
use crate::models::{ActiveProject, DashboardStats, EndingSoon};

/// Everything the dashboard page shows. Parts that failed to load keep their
/// default (zero / empty) value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardData {
    pub stats: DashboardStats,
    pub ending_soon: Vec<EndingSoon>,
    pub active_projects: Vec<ActiveProject>,
}

/// Loads the three dashboard sections concurrently.
pub async fn load_dashboard<B: Backend + ?Sized>(backend: &B, ending_within_days: u32) -> DashboardData {
    let mut data = DashboardData::default();
    data.reload(backend, ending_within_days).await;
    data
}

impl DashboardData {
    /// Reloads in place. A section that fails keeps what it showed before.
    pub async fn reload<B: Backend + ?Sized>(&mut self, backend: &B, ending_within_days: u32) {
        let (stats, ending_soon, active_projects) = futures::join!(
            backend.dashboard_stats(),
            backend.ending_soon(ending_within_days),
            backend.active_projects(),
        );
        self.refresh_from(stats, ending_soon, active_projects);
    }

    fn refresh_from(
        &mut self,
        stats: crate::error::Result<DashboardStats>,
        ending_soon: crate::error::Result<Vec<EndingSoon>>,
        active_projects: crate::error::Result<Vec<ActiveProject>>,
    ) {
        // 1) Headline counters
        match stats {
            Ok(stats) => self.stats = stats,
            Err(e) => error!("Error fetching dashboard stats: {}", e),
        }

        // 2) Assignments about to end, soonest first
        match ending_soon {
            Ok(mut rows) => {
                rows.sort_by_key(|r| (r.days_left, r.end_date));
                self.ending_soon = rows;
            }
            Err(e) => error!("Error fetching assignments ending soon: {}", e),
        }

        // 3) Active projects
        match active_projects {
            Ok(rows) => self.active_projects = rows,
            Err(e) => error!("Error fetching active projects: {}", e),
        }
    }
}
