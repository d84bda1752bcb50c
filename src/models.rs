use serde::{Deserialize, Serialize};

/// Pagination metadata carried by every successful response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMeta {
    pub status: Option<u16>,
    #[serde(rename = "countTotal")]
    pub count_total: Option<u64>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<u64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PageMeta {
    /// Number of pages the full result spans, `ceil(countTotal / pageSize)`.
    ///
    /// A response without usable metadata is a single page.
    pub fn page_count(&self) -> u64 {
        match (self.count_total, self.page_size) {
            (Some(total), Some(size)) if size > 0 => total.div_ceil(size),
            _ => 1,
        }
    }
}

/// One page of a response, kept as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub meta: PageMeta,
    #[serde(default)]
    pub data: serde_json::Value,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Page {
    /// Items of this page: the elements of `data` when it is an array, the
    /// value itself otherwise, nothing when `data` is null.
    pub fn items(&self) -> Vec<serde_json::Value> {
        match &self.data {
            serde_json::Value::Array(items) => items.clone(),
            serde_json::Value::Null => Vec::new(),
            other => vec![other.clone()],
        }
    }
}

/// Flatten a multi-page result into its items, in page order
pub fn pages_into_items(pages: &[Page]) -> Vec<serde_json::Value> {
    pages.iter().flat_map(Page::items).collect()
}

/// Pagination query parameters added to every dispatched request
#[derive(Debug, Clone, Serialize)]
pub struct PageRequest {
    #[serde(rename = "__page")]
    pub page: u64,
    #[serde(rename = "__pageSize")]
    pub page_size: u64,
}

/// `data` section of the login response
#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    pub email: Option<String>,
    pub sessionid: String,
}

/// Login response
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub data: LoginData,
}

/// `{statusCode, message}` error payload
#[derive(Debug, Clone, Deserialize)]
pub struct StatusCodeError {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    #[serde(default)]
    pub message: Option<String>,
}

/// One entry of an `{errors: [...]}` payload
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEntry {
    #[serde(default)]
    pub message: Option<String>,
}

/// `{errors: [{message}, ...]}` error payload
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorList {
    pub errors: Vec<ErrorEntry>,
}

/// Filters for `GET terminal/listing`
#[derive(Debug, Clone, Default, Serialize)]
pub struct TerminalFilter {
    #[serde(rename = "ID", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "OrganizationID", skip_serializing_if = "Option::is_none")]
    pub org_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(rename = "TerminalSubscriptionID", skip_serializing_if = "Option::is_none")]
    pub terminal_subscription_id: Option<i64>,
    #[serde(rename = "NetworkTypeID", skip_serializing_if = "Option::is_none")]
    pub network_type_id: Option<i64>,
    #[serde(rename = "TerminalTypeID", skip_serializing_if = "Option::is_none")]
    pub terminal_type_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(rename = "lastUpdated", skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(rename = "lastSync", skip_serializing_if = "Option::is_none")]
    pub last_sync: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    #[serde(rename = "externalID", skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(rename = "externalName", skip_serializing_if = "Option::is_none")]
    pub external_name: Option<String>,
}

/// Filters for `GET metric/listing`
#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricFilter {
    #[serde(rename = "ID", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(rename = "aggregationType", skip_serializing_if = "Option::is_none")]
    pub aggregation_type: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub metric_type: Option<String>,
    #[serde(rename = "elementType", skip_serializing_if = "Option::is_none")]
    pub element_type: Option<String>,
}

/// Filters for `GET terminal/{id}/alarms`
#[derive(Debug, Clone, Default, Serialize)]
pub struct AlarmFilter {
    #[serde(rename = "ID", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "AlarmTypeID", skip_serializing_if = "Option::is_none")]
    pub alarm_type_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acknowledged: Option<bool>,
    #[serde(rename = "acknowledgedDate", skip_serializing_if = "Option::is_none")]
    pub acknowledged_date: Option<String>,
    #[serde(rename = "startDate", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// Filters for `GET terminal/{id}/events`
#[derive(Debug, Clone, Default, Serialize)]
pub struct EventFilter {
    #[serde(rename = "ID", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "EventTypeID", skip_serializing_if = "Option::is_none")]
    pub event_type_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Query for `GET monitoring/latestStatus`
#[derive(Debug, Clone, Serialize)]
pub struct LatestStatusQuery {
    #[serde(rename = "ElementID")]
    pub element_id: i64,
    #[serde(rename = "MetricID")]
    pub metric_id: i64,
    #[serde(rename = "elementType")]
    pub element_type: String,
    #[serde(rename = "humanReadable")]
    pub human_readable: bool,
}

impl LatestStatusQuery {
    pub fn new(element_id: i64, metric_id: i64, element_type: impl Into<String>) -> Self {
        Self {
            element_id,
            metric_id,
            element_type: element_type.into(),
            human_readable: false,
        }
    }
}

/// Query for `GET monitoring/stats`
#[derive(Debug, Clone, Serialize)]
pub struct StatsQuery {
    #[serde(rename = "from")]
    pub date_from: String,
    #[serde(rename = "to", skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
    #[serde(rename = "ElementID")]
    pub element_id: i64,
    #[serde(rename = "MetricID")]
    pub metric_id: i64,
    #[serde(rename = "elementType", skip_serializing_if = "Option::is_none")]
    pub element_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(rename = "sortOrder", skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
}

impl StatsQuery {
    pub fn new(date_from: impl Into<String>, element_id: i64, metric_id: i64) -> Self {
        Self {
            date_from: date_from.into(),
            date_to: None,
            element_id,
            metric_id,
            element_type: None,
            limit: None,
            sort_order: None,
            resolution: None,
        }
    }
}
