pub mod endpoint;
pub mod generator;
pub mod prompt;
pub mod reconciler;
pub mod store;

pub use endpoint::CompletionEndpoint;
pub use generator::{GeneratedItinerary, ItineraryGenerator};
pub use prompt::PromptBuilder;
pub use reconciler::{repair_truncated, Reconciler, REPAIR_SUFFIX};
pub use store::{InMemoryItineraryStore, ItineraryStore};
