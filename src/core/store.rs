use std::{
    collections::BTreeMap,
    sync::atomic::{AtomicU64, Ordering},
};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    error::{PlannerError, Result},
    types::{ItineraryDocument, ItineraryUpdate, StoredItinerary},
};

/// Persistence for itinerary documents.
#[async_trait]
pub trait ItineraryStore: Send + Sync {
    /// Store a new document and return its id.
    async fn create(&self, document: ItineraryDocument) -> Result<String>;

    /// All itineraries owned by `user_id`, oldest first. Empty when none.
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<StoredItinerary>>;

    async fn update(&self, id: &str, update: ItineraryUpdate) -> Result<()>;

    async fn delete(&self, id: &str) -> Result<()>;
}

/// Process-local store, mainly for tests and the CLI.
#[derive(Debug, Default)]
pub struct InMemoryItineraryStore {
    next_id: AtomicU64,
    documents: RwLock<BTreeMap<u64, ItineraryDocument>>,
}

impl InMemoryItineraryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, id: &str) -> Option<ItineraryDocument> {
        let key = parse_id(id)?;
        self.documents.read().await.get(&key).cloned()
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

fn format_id(key: u64) -> String {
    format!("itn-{key}")
}

fn parse_id(id: &str) -> Option<u64> {
    id.strip_prefix("itn-")?.parse().ok()
}

#[async_trait]
impl ItineraryStore for InMemoryItineraryStore {
    async fn create(&self, document: ItineraryDocument) -> Result<String> {
        if document.user_id.trim().is_empty() {
            return Err(PlannerError::Validation(
                "`userId` must not be empty".to_string(),
            ));
        }

        let key = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.documents.write().await.insert(key, document);
        Ok(format_id(key))
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<StoredItinerary>> {
        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .filter(|(_, doc)| doc.user_id == user_id)
            .map(|(key, doc)| StoredItinerary {
                id: format_id(*key),
                document: doc.clone(),
            })
            .collect())
    }

    async fn update(&self, id: &str, update: ItineraryUpdate) -> Result<()> {
        let key = parse_id(id).ok_or_else(|| PlannerError::NotFound(id.to_string()))?;
        let mut documents = self.documents.write().await;
        let document = documents
            .get_mut(&key)
            .ok_or_else(|| PlannerError::NotFound(id.to_string()))?;

        let mut patched = document.clone();
        patched.apply(update);
        if patched.start_date > patched.end_date {
            return Err(PlannerError::Validation(format!(
                "`startDate` {} is after `endDate` {}",
                patched.start_date, patched.end_date
            )));
        }

        *document = patched;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut documents = self.documents.write().await;
        parse_id(id)
            .and_then(|key| documents.remove(&key))
            .map(|_| ())
            .ok_or_else(|| PlannerError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ActivityEntry, Preferences, TripRequest};

    fn document(user_id: &str, destination: &str) -> ItineraryDocument {
        let trip =
            TripRequest::new(destination, "2025-05-10", "2025-05-15", Preferences::default())
                .unwrap();
        ItineraryDocument::from_trip(
            user_id,
            &trip,
            vec![ActivityEntry::new(1, "Visit Central Park", destination, "$0")],
        )
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let store = InMemoryItineraryStore::new();
        let first = store.create(document("u1", "New York")).await.unwrap();
        let second = store.create(document("u1", "Boston")).await.unwrap();
        store.create(document("u2", "Paris")).await.unwrap();

        assert_ne!(first, second);
        let listed = store.list_for_user("u1").await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, first);
        assert_eq!(listed[1].document.destination, "Boston");
        assert!(store.list_for_user("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let store = InMemoryItineraryStore::new();
        let id = store.create(document("u1", "New York")).await.unwrap();

        store
            .update(
                &id,
                ItineraryUpdate {
                    activities: Some(Vec::new()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(store.get(&id).await.unwrap().activities.is_empty());

        store.delete(&id).await.unwrap();
        assert!(store.is_empty().await);

        let err = store.delete(&id).await.unwrap_err();
        assert_eq!(err.error_code(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_update_rejects_inverted_dates() {
        let store = InMemoryItineraryStore::new();
        let id = store.create(document("u1", "New York")).await.unwrap();

        let update = ItineraryUpdate {
            end_date: chrono::NaiveDate::from_ymd_opt(2025, 5, 1),
            ..Default::default()
        };
        assert!(store.update(&id, update).await.is_err());
        assert_eq!(store.get(&id).await.unwrap().end_date.to_string(), "2025-05-15");
    }

    #[tokio::test]
    async fn test_create_requires_user() {
        let store = InMemoryItineraryStore::new();
        assert!(store.create(document(" ", "Paris")).await.is_err());
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_unknown_id_update() {
        let store = InMemoryItineraryStore::new();
        let err = store
            .update("bogus", ItineraryUpdate::default())
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "NOT_FOUND");
    }
}
