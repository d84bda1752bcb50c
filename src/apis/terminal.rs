use crate::{
    client::IsMonClient,
    error::IsMonResult,
    models::{AlarmFilter, EventFilter, Page, TerminalFilter},
};
use log::{debug, info};
use std::fmt::Display;

/// Terminal API operations
pub struct TerminalApi<'a> {
    client: &'a IsMonClient,
}

impl<'a> TerminalApi<'a> {
    pub fn new(client: &'a IsMonClient) -> Self {
        Self { client }
    }

    /// List terminals
    ///
    /// # Arguments
    /// * `filter` - Listing filters; unset fields are not sent
    pub async fn list(&self, filter: &TerminalFilter) -> IsMonResult<Vec<Page>> {
        info!("Getting terminal list");
        debug!("Terminal filter: {:?}", filter);
        self.client.get("terminal/listing", filter).await
    }

    /// List the alarms of one terminal
    ///
    /// # Arguments
    /// * `terminal_id` - Terminal identifier substituted into the path
    /// * `filter` - Alarm filters; unset fields are not sent
    pub async fn alarms(
        &self,
        terminal_id: impl Display,
        filter: &AlarmFilter,
    ) -> IsMonResult<Vec<Page>> {
        info!("Getting alarms for terminal {}", terminal_id);
        let path = terminal_path(&terminal_id, "alarms");
        debug!("HTTP GET {} with {:?}", path, filter);
        self.client.get(&path, filter).await
    }

    /// List the events of one terminal
    ///
    /// # Arguments
    /// * `terminal_id` - Terminal identifier substituted into the path
    /// * `filter` - Event filters; unset fields are not sent
    pub async fn events(
        &self,
        terminal_id: impl Display,
        filter: &EventFilter,
    ) -> IsMonResult<Vec<Page>> {
        info!("Getting events for terminal {}", terminal_id);
        let path = terminal_path(&terminal_id, "events");
        debug!("HTTP GET {} with {:?}", path, filter);
        self.client.get(&path, filter).await
    }
}

fn terminal_path(terminal_id: &impl Display, resource: &str) -> String {
    format!(
        "terminal/{}/{}",
        urlencoding::encode(&terminal_id.to_string()),
        resource
    )
}
