mod dashboard;

pub use dashboard::BusinessSummaryDashboard;
