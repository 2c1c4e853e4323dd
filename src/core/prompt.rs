use crate::{
    config::GeneratorConfig,
    types::{ChatMessage, CompletionRequest, TripRequest},
};

const SYSTEM_INSTRUCTION: &str = "You are a travel itinerary generator. You always answer with a single valid JSON object and nothing else.";

/// Example of the exact document shape the model must return.
const RESPONSE_SHAPE: &str = r#"{
  "itinerary": {
    "dates": { "start": "YYYY-MM-DD", "end": "YYYY-MM-DD" },
    "activities": [
      { "day": 1, "activity": "Visit the Eiffel Tower", "location": "Paris", "cost": "$30" },
      { "day": 2, "activity": "Explore the Louvre Museum", "location": "Paris", "cost": "$20" }
    ]
  }
}"#;

/// Turns trip parameters into a single bounded completion request.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    model: String,
    max_tokens: u32,
    temperature: f64,
    json_output: bool,
}

impl PromptBuilder {
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            model: config.model().to_string(),
            max_tokens: config.max_tokens(),
            temperature: config.temperature(),
            json_output: config.json_output(),
        }
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    pub fn build(&self, trip: &TripRequest) -> CompletionRequest {
        CompletionRequest::new(
            self.model.clone(),
            ChatMessage::system(SYSTEM_INSTRUCTION),
            ChatMessage::user(self.user_instruction(trip)),
        )
        .with_max_tokens(self.max_tokens)
        .with_temperature(self.temperature)
        .with_json_output(self.json_output)
    }

    fn user_instruction(&self, trip: &TripRequest) -> String {
        let prefs = trip.preferences();
        format!(
            "Create a {style} travel itinerary for {destination} from {start} to {end} with a {budget} budget.\n\n\
             Respond with JSON exactly in this shape:\n{shape}\n\n\
             Use \"{start}\" and \"{end}\" for the dates. List activities in day order, one object per activity.\n\
             Do not write any text, markdown or explanation outside the JSON object.\n\
             Your answer must fit in {max_tokens} tokens. If the full plan would not fit, leave out whole days \
             from the end of the trip instead. Never stop in the middle of an activity object: the answer must \
             end after a complete activity and close every array and object.",
            style = prefs.style,
            budget = prefs.budget,
            destination = trip.destination(),
            start = trip.start_date(),
            end = trip.end_date(),
            shape = RESPONSE_SHAPE,
            max_tokens = self.max_tokens,
        )
    }
}
