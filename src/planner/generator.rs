use std::{sync::Arc, time::Instant};

use tracing::{debug, error, info, warn};

use crate::{
    core::{
        errors::AppResult,
        types::{GeneratedTrip, PlanOutcome},
    },
    planner::{
        normalizer::{NormalizationResult, Normalizer},
        prompts::trip_prompt,
        request::{TripPlanRequest, MAX_TRIP_DAYS},
    },
    providers::TextGenerator,
};

/// Validate, prompt, generate, normalize. One provider call per request.
#[derive(Clone)]
pub struct TripGenerator {
    text: Arc<dyn TextGenerator>,
    normalizer: Normalizer,
    max_days: u32,
}

impl TripGenerator {
    pub fn new(text: Arc<dyn TextGenerator>) -> Self {
        Self {
            text,
            normalizer: Normalizer::default(),
            max_days: MAX_TRIP_DAYS,
        }
    }

    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn with_max_days(mut self, max_days: u32) -> Self {
        self.max_days = max_days;
        self
    }

    pub async fn generate(&self, request: &TripPlanRequest, api_key: &str) -> AppResult<GeneratedTrip> {
        request.validate_with_limit(self.max_days)?;

        let prompt = trip_prompt(request);
        debug!(chars = prompt.len(), "trip prompt built");

        let started = Instant::now();
        let raw = self.text.generate_text(api_key, &prompt).await?;
        let latency_ms = started.elapsed().as_millis() as u64;

        match self.normalizer.normalize(&raw) {
            NormalizationResult::Full(plan) => {
                info!(
                    destination = %request.destination_label,
                    hotels = plan.hotels.len(),
                    days = plan.itinerary.len(),
                    latency_ms,
                    "trip generated"
                );
                Ok(GeneratedTrip {
                    outcome: PlanOutcome::Full,
                    plan,
                })
            }
            NormalizationResult::Partial(partial) => {
                warn!(
                    destination = %request.destination_label,
                    hotels_matched = partial.hotels_matched,
                    itinerary_matched = partial.itinerary_matched,
                    "trip generated with partial data"
                );
                Ok(GeneratedTrip {
                    outcome: PlanOutcome::Partial,
                    plan: partial.into_plan(),
                })
            }
            NormalizationResult::Failure(failure) => {
                error!(excerpt = %failure.excerpt, "model response could not be normalized");
                Err(failure.into())
            }
        }
    }
}
