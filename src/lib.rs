//! trip-itinerary-rs: AI-assisted travel itinerary generation with
//! bounded-output recovery.
//!
//! A [`TripRequest`] is turned into a single chat-completion request with a
//! fixed output-token ceiling. The model's answer is reconciled into a list
//! of [`ActivityEntry`] values; output truncated by the ceiling gets one
//! deterministic repair pass, and anything beyond repair fails closed with a
//! [`FailureReason`] instead of an error.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use trip_itinerary_rs::{GeneratorConfig, ItineraryGenerator, Preferences, TripRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let generator = ItineraryGenerator::new(GeneratorConfig::from_env()?)?;
//!     let trip = TripRequest::new("Paris", "2025-06-01", "2025-06-03", Preferences::default())?;
//!
//!     let result = generator.generate(&trip).await;
//!     for entry in result.activities() {
//!         println!("day {}: {} ({})", entry.day, entry.activity, entry.cost);
//!     }
//!     Ok(())
//! }
//! ```

pub mod carriers;
pub mod config;
pub mod core;
pub mod error;
pub mod services;
pub mod types;

pub use carriers::{CarrierLookup, CarrierNameCache};
pub use config::GeneratorConfig;
pub use crate::core::{
    CompletionEndpoint, GeneratedItinerary, InMemoryItineraryStore, ItineraryGenerator,
    ItineraryStore, PromptBuilder, Reconciler,
};
pub use error::{PlannerError, Result};
pub use services::OpenAIClient;
pub use types::{
    ActivityEntry, ChatMessage, CompletionRequest, FailureReason, ItineraryDocument,
    ItineraryUpdate, Preferences, ReconciliationResult, ReconciliationStatus, Role,
    StoredItinerary, TripRequest,
};

#[cfg(feature = "cli")]
pub mod cli;
