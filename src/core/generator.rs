use std::time::Duration;

use serde::Serialize;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::{
    config::GeneratorConfig,
    core::{
        endpoint::CompletionEndpoint, prompt::PromptBuilder, reconciler::Reconciler,
        store::ItineraryStore,
    },
    error::{PlannerError, Result},
    services::OpenAIClient,
    types::{
        ActivityEntry, ItineraryDocument, ReconciliationResult, ReconciliationStatus, TripRequest,
    },
};

/// Itinerary-generation workflow: prompt, one completion call, reconcile.
#[derive(Debug)]
pub struct ItineraryGenerator<E = OpenAIClient> {
    endpoint: E,
    prompts: PromptBuilder,
    reconciler: Reconciler,
    timeout: Duration,
}

/// Response of [`ItineraryGenerator::generate_and_store`].
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedItinerary {
    pub id: String,
    pub activities: Vec<ActivityEntry>,
    #[serde(flatten)]
    pub status: ReconciliationStatus,
}

impl ItineraryGenerator<OpenAIClient> {
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        let endpoint = OpenAIClient::from_config(&config)?;
        Ok(Self::with_endpoint(endpoint, &config))
    }

    pub fn from_env() -> Result<Self> {
        Self::new(GeneratorConfig::from_env()?)
    }
}

impl<E: CompletionEndpoint> ItineraryGenerator<E> {
    pub fn with_endpoint(endpoint: E, config: &GeneratorConfig) -> Self {
        Self {
            endpoint,
            prompts: PromptBuilder::new(config),
            reconciler: Reconciler::new(),
            timeout: config.timeout(),
        }
    }

    pub fn endpoint(&self) -> &E {
        &self.endpoint
    }

    /// Generate activities, surfacing transport faults as errors.
    pub async fn try_generate(&self, trip: &TripRequest) -> Result<ReconciliationResult> {
        let request = self.prompts.build(trip);

        debug!(
            target: "itinerary::generator",
            destination = trip.destination(),
            model = request.model(),
            max_tokens = request.max_tokens(),
            "requesting itinerary completion"
        );

        let raw = timeout(self.timeout, self.endpoint.complete(&request))
            .await
            .map_err(|_| {
                PlannerError::Timeout(format!(
                    "completion call exceeded {}s",
                    self.timeout.as_secs_f64()
                ))
            })??;

        let result = self.reconciler.reconcile(raw.as_deref());
        log_reconciliation(trip, &result);
        Ok(result)
    }

    /// Generate activities. Transport faults are logged and yield an
    /// `empty-response` result instead of an error.
    pub async fn generate(&self, trip: &TripRequest) -> ReconciliationResult {
        match self.try_generate(trip).await {
            Ok(result) => result,
            Err(err) => {
                warn!(
                    target: "itinerary::generator",
                    destination = trip.destination(),
                    code = err.error_code(),
                    error = %err,
                    "itinerary completion failed"
                );
                ReconciliationResult::empty_response()
            }
        }
    }

    /// Generate an itinerary for `user_id` and persist it, even when no
    /// activities could be produced.
    pub async fn generate_and_store(
        &self,
        user_id: &str,
        trip: &TripRequest,
        store: &dyn ItineraryStore,
    ) -> Result<GeneratedItinerary> {
        if user_id.trim().is_empty() {
            return Err(PlannerError::Validation(
                "`userId` must not be empty".to_string(),
            ));
        }

        let result = self.generate(trip).await;
        let status = result.status();
        let activities = result.into_activities();

        let document = ItineraryDocument::from_trip(user_id, trip, activities.clone());
        let id = store.create(document).await?;

        info!(
            target: "itinerary::generator",
            id = %id,
            user_id,
            activities = activities.len(),
            "generated itinerary stored"
        );

        Ok(GeneratedItinerary {
            id,
            activities,
            status,
        })
    }
}

fn log_reconciliation(trip: &TripRequest, result: &ReconciliationResult) {
    match result.failure_reason() {
        None => {
            debug!(
                target: "itinerary::generator",
                destination = trip.destination(),
                activities = result.activities().len(),
                repaired = result.was_repaired(),
                "itinerary reconciled"
            );
            if !result.is_day_ordered() {
                warn!(
                    target: "itinerary::generator",
                    destination = trip.destination(),
                    "model returned activities out of day order"
                );
            }
        }
        Some(reason) => {
            warn!(
                target: "itinerary::generator",
                destination = trip.destination(),
                reason = %reason,
                raw = result.raw_text().unwrap_or_default(),
                repaired = result.repaired_text().unwrap_or_default(),
                "itinerary output could not be reconciled"
            );
        }
    }
}
