//! Read-only analytics services built over repository snapshots.
//!
//! Each service clones the data it needs out of the stores and aggregates
//! without holding any lock, so reports never block checkouts.

mod activity;
mod dashboard;
mod recommendations;

pub use activity::{
    ActivityReport, ActivitySummary, CustomerActivityService, GenreActivity, Insight,
    InsightSeverity, MonthlyActivityPoint,
};
pub use dashboard::{
    DashboardData, DashboardService, GenreRevenue, MembershipRevenue, MonthlyTrendPoint,
    TopCustomer, TopMovie,
};
pub use recommendations::{Recommendation, RecommendationService};
