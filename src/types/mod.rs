pub mod activity;
pub mod completion;
pub mod itinerary;
pub mod reconciliation;
pub mod trip;

pub use activity::ActivityEntry;
pub use completion::{ChatMessage, CompletionRequest, Role};
pub use itinerary::{ItineraryDocument, ItineraryUpdate, StoredItinerary};
pub use reconciliation::{FailureReason, ReconciliationResult, ReconciliationStatus};
pub use trip::{Preferences, TripRequest};
