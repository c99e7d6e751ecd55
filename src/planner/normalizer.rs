//! Turns free-form model output into a [`TripPlan`].
//!
//! The model is asked for bare JSON but frequently wraps it in markdown fences
//! or surrounds it with prose. Normalization first trims the text down to the
//! outermost JSON delimiters and parses that. Any JSON object is read as a
//! full plan; fields of an unexpected type are carried through as they came.
//! When the trimmed text is not a JSON object it falls back to pulling the
//! `hotels` and `itinerary` arrays out of the raw text one at a time.
//!
//! The fallback patterns are lazy (`.*?`), so a captured array ends at the
//! first `]`. An itinerary day that carries a nested `places` array therefore
//! never survives the fallback path; only flat arrays do.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::{
    core::errors::{AppError, AppResult},
    planner::{
        lenient::FromFields,
        trip_plan::{DayPlan, Entry, Hotel, TripPlan},
    },
};

pub const DEFAULT_FENCE_PATTERN: &str = r"```(?:json)?\s*";
pub const DEFAULT_HOTELS_PATTERN: &str = r#"(?s)"hotels":\s*\[(.*?)\]"#;
pub const DEFAULT_ITINERARY_PATTERN: &str = r#"(?s)"itinerary":\s*\[(.*?)\]"#;
pub const DEFAULT_EXCERPT_CHARS: usize = 200;
pub const DEFAULT_FAILURE_MESSAGE: &str = "AI response is not in valid JSON format.";

// Constant patterns; `default_patterns_compile` covers them.
static FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(DEFAULT_FENCE_PATTERN).expect("fence regex"));
static HOTELS: Lazy<Regex> = Lazy::new(|| Regex::new(DEFAULT_HOTELS_PATTERN).expect("hotels regex"));
static ITINERARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(DEFAULT_ITINERARY_PATTERN).expect("itinerary regex"));
static DEFAULT_NORMALIZER: Lazy<Normalizer> = Lazy::new(Normalizer::default);

#[derive(Debug, Clone)]
pub struct NormalizerConfig {
    /// Removed everywhere before delimiter trimming.
    pub fence_pattern: String,
    /// Must capture the array body (without brackets) in group 1.
    pub hotels_pattern: String,
    /// Must capture the array body (without brackets) in group 1.
    pub itinerary_pattern: String,
    pub excerpt_chars: usize,
    pub failure_message: String,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            fence_pattern: DEFAULT_FENCE_PATTERN.to_string(),
            hotels_pattern: DEFAULT_HOTELS_PATTERN.to_string(),
            itinerary_pattern: DEFAULT_ITINERARY_PATTERN.to_string(),
            excerpt_chars: DEFAULT_EXCERPT_CHARS,
            failure_message: DEFAULT_FAILURE_MESSAGE.to_string(),
        }
    }
}

/// Outcome of a single normalization attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "data", rename_all = "snake_case")]
pub enum NormalizationResult {
    Full(TripPlan),
    Partial(PartialTripPlan),
    Failure(NormalizationFailure),
}

impl NormalizationResult {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Full(_) => "full",
            Self::Partial(_) => "partial",
            Self::Failure(_) => "failure",
        }
    }

    pub fn is_full(&self) -> bool {
        matches!(self, Self::Full(_))
    }

    /// The recovered plan, if any. Partial results lose their match flags.
    pub fn into_plan(self) -> Option<TripPlan> {
        match self {
            Self::Full(plan) => Some(plan),
            Self::Partial(partial) => Some(partial.into_plan()),
            Self::Failure(_) => None,
        }
    }
}

/// Whatever the fallback extraction could isolate.
///
/// `*_matched` records whether the key pattern was found at all; a matched
/// key whose fragment failed to parse still yields an empty sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PartialTripPlan {
    pub hotels: Vec<Entry<Hotel>>,
    pub itinerary: Vec<Entry<DayPlan>>,
    pub hotels_matched: bool,
    pub itinerary_matched: bool,
}

impl PartialTripPlan {
    pub fn into_plan(self) -> TripPlan {
        TripPlan {
            hotels: self.hotels,
            itinerary: self.itinerary,
            ..TripPlan::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizationFailure {
    pub message: String,
    /// Leading characters of the raw response, for display.
    pub excerpt: String,
}

impl From<NormalizationFailure> for AppError {
    fn from(value: NormalizationFailure) -> Self {
        AppError::Normalization {
            message: value.message,
            excerpt: value.excerpt,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Normalizer {
    fence: Regex,
    hotels: Regex,
    itinerary: Regex,
    excerpt_chars: usize,
    failure_message: String,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            fence: FENCE.clone(),
            hotels: HOTELS.clone(),
            itinerary: ITINERARY.clone(),
            excerpt_chars: DEFAULT_EXCERPT_CHARS,
            failure_message: DEFAULT_FAILURE_MESSAGE.to_string(),
        }
    }
}

impl Normalizer {
    pub fn new(config: NormalizerConfig) -> AppResult<Self> {
        let fence = Regex::new(&config.fence_pattern)?;
        let hotels = capture_pattern("hotels", &config.hotels_pattern)?;
        let itinerary = capture_pattern("itinerary", &config.itinerary_pattern)?;
        Ok(Self {
            fence,
            hotels,
            itinerary,
            excerpt_chars: config.excerpt_chars,
            failure_message: config.failure_message,
        })
    }

    pub fn normalize(&self, raw_text: &str) -> NormalizationResult {
        let cleaned = self.clean(raw_text);
        debug!(
            raw_len = raw_text.len(),
            cleaned_len = cleaned.len(),
            "normalizing model response"
        );

        if let Some(plan) = parse_plan(&cleaned) {
            return NormalizationResult::Full(plan);
        }

        // Fallback always looks at the untouched response.
        self.extract_fragments(raw_text)
    }

    /// Strips fences and trims to the outermost JSON delimiters.
    pub fn clean(&self, raw_text: &str) -> String {
        let unfenced = self.fence.replace_all(raw_text, "");
        let mut text: &str = &unfenced;

        if let Some(start) = [text.find('{'), text.find('[')].into_iter().flatten().min() {
            text = &text[start..];
        }
        if let Some(end) = [text.rfind('}'), text.rfind(']')].into_iter().flatten().max() {
            text = &text[..=end];
        }
        text.to_string()
    }

    fn extract_fragments(&self, raw_text: &str) -> NormalizationResult {
        let hotels_body = capture_body(&self.hotels, raw_text);
        let itinerary_body = capture_body(&self.itinerary, raw_text);

        if hotels_body.is_none() && itinerary_body.is_none() {
            return NormalizationResult::Failure(NormalizationFailure {
                message: self.failure_message.clone(),
                excerpt: raw_text.chars().take(self.excerpt_chars).collect(),
            });
        }

        NormalizationResult::Partial(PartialTripPlan {
            hotels_matched: hotels_body.is_some(),
            itinerary_matched: itinerary_body.is_some(),
            hotels: hotels_body.map(parse_fragment).unwrap_or_default(),
            itinerary: itinerary_body.map(parse_fragment).unwrap_or_default(),
        })
    }
}

/// Normalizes with the default configuration.
pub fn normalize(raw_text: &str) -> NormalizationResult {
    DEFAULT_NORMALIZER.normalize(raw_text)
}

fn capture_pattern(field: &str, pattern: &str) -> AppResult<Regex> {
    let regex = Regex::new(pattern)?;
    if regex.captures_len() < 2 {
        return Err(AppError::Config(format!(
            "{field} pattern must capture the array body in group 1"
        )));
    }
    Ok(regex)
}

fn capture_body<'t>(regex: &Regex, text: &'t str) -> Option<&'t str> {
    regex
        .captures(text)
        .map(|captures| captures.get(1).map_or("", |body| body.as_str()))
}

fn parse_plan(text: &str) -> Option<TripPlan> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Some(TripPlan::from_object(map)),
        Ok(_) => {
            debug!("cleaned response is JSON but not an object");
            None
        }
        Err(err) => {
            debug!(error = %err, "cleaned response is not JSON");
            None
        }
    }
}

fn parse_fragment<T: FromFields>(body: &str) -> Vec<Entry<T>> {
    match serde_json::from_str::<Vec<Value>>(&format!("[{body}]")) {
        Ok(items) => items.into_iter().map(Entry::from_value).collect(),
        Err(err) => {
            debug!(error = %err, "fallback fragment did not parse");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_patterns_compile() {
        assert!(Normalizer::new(NormalizerConfig::default()).is_ok());
        assert_eq!(HOTELS.captures_len(), 2);
        assert_eq!(ITINERARY.captures_len(), 2);
        assert!(FENCE.is_match("```json\n"));
    }
}
