//! Implements a struct that holds the state of the server.

use std::sync::Arc;

use crate::{pagination::PaginationConfig, records::RecordStore};

/// The state of the server.
///
/// Route handlers take the parts they need through the `FromRef` impls of
/// their own state structs.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The gateway to the remote record store.
    pub record_store: Arc<dyn RecordStore>,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// The config that controls how to display pages of data.
    pub pagination_config: PaginationConfig,
}

impl AppState {
    /// Create a new [AppState].
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    pub fn new(
        record_store: Arc<dyn RecordStore>,
        local_timezone: &str,
        pagination_config: PaginationConfig,
    ) -> Self {
        Self {
            record_store,
            local_timezone: local_timezone.to_owned(),
            pagination_config,
        }
    }
}
