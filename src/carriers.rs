//! Carrier code to display name cache used by flight listings.

use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock},
};

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;

/// Source of carrier display names (e.g., a reference-data API).
#[async_trait]
pub trait CarrierLookup: Send + Sync {
    /// Display name for an IATA carrier code, `None` when unknown.
    async fn lookup(&self, code: &str) -> Result<Option<String>>;
}

/// Process-wide, read-mostly carrier name cache filled lazily on miss.
///
/// Unknown codes and lookup errors fall back to the code itself and are not
/// cached, so a later lookup can still succeed.
#[derive(Debug)]
pub struct CarrierNameCache<L> {
    lookup: L,
    names: RwLock<HashMap<String, String>>,
}

impl<L: CarrierLookup> CarrierNameCache<L> {
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            names: RwLock::new(HashMap::new()),
        }
    }

    pub async fn display_name(&self, code: &str) -> String {
        let code = code.trim().to_ascii_uppercase();
        if code.is_empty() {
            return "N/A".to_string();
        }

        if let Some(name) = self.cached(&code) {
            return name;
        }

        match self.lookup.lookup(&code).await {
            Ok(Some(name)) => {
                self.names
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .insert(code, name.clone());
                name
            }
            Ok(None) => code,
            Err(err) => {
                debug!(target: "itinerary::carriers", code = %code, error = %err, "carrier lookup failed");
                code
            }
        }
    }

    pub fn cached(&self, code: &str) -> Option<String> {
        self.names
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(code)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.names
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
