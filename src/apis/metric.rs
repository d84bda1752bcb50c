use crate::{
    client::IsMonClient,
    error::IsMonResult,
    models::{MetricFilter, Page},
};
use log::{debug, info};

/// Metric API operations
pub struct MetricApi<'a> {
    client: &'a IsMonClient,
}

impl<'a> MetricApi<'a> {
    pub fn new(client: &'a IsMonClient) -> Self {
        Self { client }
    }

    /// List the metrics known to the API
    ///
    /// # Arguments
    /// * `filter` - Listing filters; unset fields are not sent
    pub async fn list(&self, filter: &MetricFilter) -> IsMonResult<Vec<Page>> {
        info!("Getting metric list");
        debug!("Metric filter: {:?}", filter);
        self.client.get("metric/listing", filter).await
    }
}
