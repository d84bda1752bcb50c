use crate::{client::IsMonClient, error::IsMonResult, models::Page};
use log::info;

/// System API operations
pub struct SystemApi<'a> {
    client: &'a IsMonClient,
}

impl<'a> SystemApi<'a> {
    pub fn new(client: &'a IsMonClient) -> Self {
        Self { client }
    }

    /// Get the login status of the current session
    pub async fn login_status(&self) -> IsMonResult<Vec<Page>> {
        info!("Getting login status");
        self.client.get_all("auth/login").await
    }

    /// Get the systemwide filters available to the account
    pub async fn systemwide_filters(&self) -> IsMonResult<Vec<Page>> {
        info!("Getting systemwide filters");
        self.client.get_all("core/availableSystemwidefilter").await
    }
}
