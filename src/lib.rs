/*
 * Monitoring API client - async Rust client for satellite terminal monitoring
 */

// Internal modules
mod client;
pub mod models;  // Make models public
mod apis;
mod error;
mod auth;

// Re-export public types and interfaces
pub use client::{IsMonClient, DEFAULT_BASE_URL, LOGIN_ENDPOINT, LOGOUT_ENDPOINT, PAGE_SIZE};
pub use models::*;
pub use apis::*;
pub use error::{ErrorKind, IsMonError, IsMonResult};
pub use auth::{auth_headers, Credentials, RequestKind, SessionInfo, SUBSCRIPTION_KEY_HEADER};

// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        IsMonClient,
        Credentials, SessionInfo,
        IsMonError, IsMonResult, ErrorKind,
        // Common model types
        Page, PageMeta,
        TerminalFilter, MetricFilter, AlarmFilter, EventFilter,
        LatestStatusQuery, StatsQuery,
    };
}
