use contracts::dashboards::d400_business_summary::{DashboardRequest, DashboardSummary};

use crate::shared::api_utils::{get_json, with_query};

pub async fn get_summary(request: &DashboardRequest) -> Result<DashboardSummary, String> {
    get_json(&with_query("/api/dashboard", request)).await
}
