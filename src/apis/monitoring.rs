use crate::{
    client::IsMonClient,
    error::IsMonResult,
    models::{LatestStatusQuery, Page, StatsQuery},
};
use log::{debug, info};

/// Monitoring API operations
pub struct MonitoringApi<'a> {
    client: &'a IsMonClient,
}

impl<'a> MonitoringApi<'a> {
    pub fn new(client: &'a IsMonClient) -> Self {
        Self { client }
    }

    /// Get the last reported value of a metric for an element
    ///
    /// # Arguments
    /// * `query` - Element, metric and element type; `humanReadable` is always sent
    pub async fn latest_status(&self, query: &LatestStatusQuery) -> IsMonResult<Vec<Page>> {
        info!(
            "Getting last metric status for element {} metric {}",
            query.element_id, query.metric_id
        );
        debug!("Latest status query: {:?}", query);
        self.client.get("monitoring/latestStatus", query).await
    }

    /// Get time-series statistics of a metric
    ///
    /// # Arguments
    /// * `query` - Start date, element and metric, plus optional range/sort/resolution
    pub async fn stats(&self, query: &StatsQuery) -> IsMonResult<Vec<Page>> {
        info!(
            "Getting monitoring statistics for element {} metric {} from {}",
            query.element_id, query.metric_id, query.date_from
        );
        debug!("Stats query: {:?}", query);
        self.client.get("monitoring/stats", query).await
    }

    /// Convenience wrapper for [`stats`](Self::stats) over a closed date range
    pub async fn stats_between(
        &self,
        date_from: &str,
        date_to: &str,
        element_id: i64,
        metric_id: i64,
    ) -> IsMonResult<Vec<Page>> {
        let query = StatsQuery {
            date_to: Some(date_to.to_string()),
            ..StatsQuery::new(date_from, element_id, metric_id)
        };
        self.stats(&query).await
    }
}
