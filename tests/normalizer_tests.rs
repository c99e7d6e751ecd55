use serde_json::{json, Value};

use trip_planner_lib::{
    core::errors::AppError,
    planner::{
        normalizer::{normalize, NormalizationResult, Normalizer, NormalizerConfig},
        trip_plan::{Entry, TripPlan},
    },
};

const PLAN_JSON: &str = r#"{
  "hotels": [
    {
      "name": "Hotel Lumiere",
      "address": "12 Rue de Rivoli, Paris",
      "price_per_night": "$180",
      "image_url": "https://example.com/lumiere.jpg",
      "geo_coordinates": { "lat": 48.8566, "lng": 2.3522 },
      "rating": 4.5,
      "description": "Boutique hotel near the Louvre"
    },
    {
      "name": "Canal Inn",
      "address": "3 Quai de Valmy, Paris",
      "price_per_night": "$95",
      "geo_coordinates": { "lat": 48.8712, "lng": 2.3651 },
      "rating": 3.5,
      "description": "Quiet rooms by the canal"
    }
  ],
  "itinerary": [
    {
      "day": 1,
      "best_time_to_visit": "9:00 AM - 6:00 PM",
      "places": [
        {
          "place_name": "Louvre Museum",
          "place_details": "World-famous art museum",
          "image_url": "https://example.com/louvre.jpg",
          "geo_coordinates": { "lat": 48.8606, "lng": 2.3376 },
          "ticket_price": "$20 for 2 people",
          "travel_time": "10 minutes from hotel"
        }
      ]
    },
    {
      "day": 2,
      "best_time_to_visit": "Morning",
      "places": []
    }
  ]
}"#;

fn expect_full(result: NormalizationResult) -> TripPlan {
    match result {
        NormalizationResult::Full(plan) => plan,
        other => panic!("expected full result, got {other:?}"),
    }
}

fn record<T: std::fmt::Debug>(entry: &Entry<T>) -> &T {
    entry
        .record()
        .unwrap_or_else(|| panic!("expected a record, got {entry:?}"))
}

#[test]
fn bare_json_yields_full_result_equal_to_input() {
    let plan = expect_full(normalize(PLAN_JSON));

    assert_eq!(plan.hotels.len(), 2);
    assert_eq!(plan.itinerary.len(), 2);
    assert_eq!(record(&plan.hotels[0]).name.as_deref(), Some("Hotel Lumiere"));
    assert_eq!(record(&plan.hotels[1]).image_url, None);
    let first_day = record(&plan.itinerary[0]);
    assert_eq!(record(&first_day.places[0]).place_name.as_deref(), Some("Louvre Museum"));

    let original: Value = serde_json::from_str(PLAN_JSON).expect("fixture is json");
    let encoded = serde_json::to_value(&plan).expect("plan encodes");
    assert_eq!(encoded, original);
}

#[test]
fn fenced_json_matches_bare_json() {
    let bare = normalize(PLAN_JSON);
    let tagged = normalize(&format!("```json\n{PLAN_JSON}\n```"));
    let untagged = normalize(&format!("```\n{PLAN_JSON}\n```"));

    assert_eq!(tagged, bare);
    assert_eq!(untagged, bare);
}

#[test]
fn surrounding_prose_is_discarded() {
    let bare = normalize(PLAN_JSON);
    let wrapped = normalize(&format!(
        "Sure! Here is your plan for Paris.\n\n{PLAN_JSON}\n\nEnjoy your trip and let me know if you need changes."
    ));

    assert_eq!(wrapped, bare);
}

#[test]
fn fences_inside_the_text_are_stripped_too() {
    let normalizer = Normalizer::default();
    let cleaned = normalizer.clean("Intro ```json {\"hotels\": []} ``` outro ``` tail");

    assert_eq!(cleaned, "{\"hotels\": []}");
}

#[test]
fn renormalizing_an_encoded_plan_is_stable() {
    let first = expect_full(normalize(PLAN_JSON));
    let encoded = serde_json::to_string(&first).expect("plan encodes");
    let second = expect_full(normalize(&encoded));

    assert_eq!(first, second);
}

#[test]
fn hotels_fragment_alone_yields_partial_result() {
    let raw = r#"Here you go: "hotels": [{"name": "Harbor View", "rating": 4.0}, {"name": "Old Town Rooms"}] and that is all I have"#;

    match normalize(raw) {
        NormalizationResult::Partial(partial) => {
            assert!(partial.hotels_matched);
            assert!(!partial.itinerary_matched);
            assert_eq!(partial.hotels.len(), 2);
            assert_eq!(record(&partial.hotels[0]).name.as_deref(), Some("Harbor View"));
            assert_eq!(record(&partial.hotels[0]).rating, Some(4.0));
            assert!(partial.itinerary.is_empty());
        }
        other => panic!("expected partial result, got {other:?}"),
    }
}

#[test]
fn truncated_response_recovers_hotels() {
    let raw = r#"{"hotels": [{"name": "A"}], "itinerary": [{"day": 1, "places": [{"place_name": "X""#;

    match normalize(raw) {
        NormalizationResult::Partial(partial) => {
            assert_eq!(partial.hotels.len(), 1);
            assert!(!partial.itinerary_matched);
            assert!(partial.itinerary.is_empty());
        }
        other => panic!("expected partial result, got {other:?}"),
    }
}

#[test]
fn nested_places_defeat_itinerary_fallback_without_failing() {
    let raw = r#"{"hotels": [{"name": "A"}], "itinerary": [{"day": 1, "places": [{"place_name": "X"}]}]"#;

    match normalize(raw) {
        NormalizationResult::Partial(partial) => {
            assert_eq!(partial.hotels.len(), 1);
            assert!(partial.itinerary_matched);
            assert!(partial.itinerary.is_empty());
        }
        other => panic!("expected partial result, got {other:?}"),
    }
}

#[test]
fn flat_itinerary_fragment_is_recovered() {
    let raw = r#"{"hotels": unavailable, "itinerary": [{"day": 1, "best_time_to_visit": "Morning"}, {"day": 2}]}"#;

    match normalize(raw) {
        NormalizationResult::Partial(partial) => {
            assert!(!partial.hotels_matched);
            assert!(partial.hotels.is_empty());
            assert_eq!(partial.itinerary.len(), 2);
            assert_eq!(record(&partial.itinerary[1]).day, Some(2));
        }
        other => panic!("expected partial result, got {other:?}"),
    }
}

#[test]
fn plain_refusal_yields_failure_with_full_excerpt() {
    let raw = "sorry, I cannot help with that";

    match normalize(raw) {
        NormalizationResult::Failure(failure) => {
            assert_eq!(failure.excerpt, raw);
            assert!(!failure.message.is_empty());
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[test]
fn failure_excerpt_is_capped_at_two_hundred_characters() {
    let raw = "no plan available today ".repeat(40);

    match normalize(&raw) {
        NormalizationResult::Failure(failure) => {
            assert_eq!(failure.excerpt.chars().count(), 200);
            assert!(raw.starts_with(&failure.excerpt));
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[test]
fn failure_excerpt_respects_multibyte_characters() {
    let raw = "é".repeat(300);

    match normalize(&raw) {
        NormalizationResult::Failure(failure) => {
            assert_eq!(failure.excerpt, "é".repeat(200));
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[test]
fn empty_input_yields_failure() {
    match normalize("") {
        NormalizationResult::Failure(failure) => assert!(failure.excerpt.is_empty()),
        other => panic!("expected failure, got {other:?}"),
    }
}

#[test]
fn deeply_nested_garbage_does_not_panic() {
    let raw = "[".repeat(10_000);
    assert_eq!(normalize(&raw).kind(), "failure");

    let raw = format!("{}{}", "{\"a\":".repeat(5_000), "}".repeat(4_000));
    assert_eq!(normalize(&raw).kind(), "failure");
}

#[test]
fn top_level_array_is_not_a_full_plan() {
    let result = normalize(r#"[{"name": "A"}, {"name": "B"}]"#);
    assert!(!result.is_full());
}

#[test]
fn null_sequences_read_as_empty() {
    let plan = expect_full(normalize(r#"{"hotels": null}"#));
    assert!(plan.is_empty());
}

#[test]
fn loosely_typed_fields_are_coerced() {
    let raw = r#"{
      "hotels": [{
        "name": "Casa Azul",
        "pricePerNight": 120,
        "rating": "4.5",
        "geo_coordinates": {"lat": "19.43", "lng": -99.13}
      }],
      "itinerary": [{"day": "2", "bestTimeToVisit": "Evening", "places": [{"placeName": "Zocalo", "ticket_price": 0}]}]
    }"#;

    let plan = expect_full(normalize(raw));
    let hotel = record(&plan.hotels[0]);
    assert_eq!(hotel.price_per_night.as_deref(), Some("120"));
    assert_eq!(hotel.rating, Some(4.5));
    let coordinates = hotel.geo_coordinates.as_ref().expect("coordinates");
    assert_eq!(coordinates.lat, Some(19.43));
    assert!(hotel.extra.is_empty());

    let day = record(&plan.itinerary[0]);
    assert_eq!(day.day, Some(2));
    assert_eq!(day.best_time_to_visit.as_deref(), Some("Evening"));
    let place = record(&day.places[0]);
    assert_eq!(place.place_name.as_deref(), Some("Zocalo"));
    assert_eq!(place.ticket_price.as_deref(), Some("0"));
    assert_eq!(plan.place_count(), 1);
}

#[test]
fn mistyped_fields_are_carried_through_unchanged() {
    let raw = r#"{"hotels":[{"name":"A","rating":"great","geo_coordinates":"near the station"}],"itinerary":[{"day":"Day 1","places":[]}]}"#;

    let plan = expect_full(normalize(raw));
    let hotel = record(&plan.hotels[0]);
    assert_eq!(hotel.rating, None);
    assert_eq!(hotel.geo_coordinates, None);
    assert_eq!(record(&plan.itinerary[0]).day, None);

    let encoded = serde_json::to_value(&plan).expect("plan encodes");
    assert_eq!(encoded, serde_json::from_str::<Value>(raw).expect("fixture is json"));
}

#[test]
fn lone_hotel_object_still_yields_full_result() {
    let raw = r#"{"hotels":{"name":"Only Hotel"},"itinerary":[{"day":1,"places":[{"place_name":"X"}]}]}"#;

    let plan = expect_full(normalize(raw));
    assert_eq!(plan.hotels.len(), 1);
    assert_eq!(record(&plan.hotels[0]).name.as_deref(), Some("Only Hotel"));
    assert_eq!(plan.itinerary.len(), 1);
    assert_eq!(plan.place_count(), 1);
}

#[test]
fn scalar_sequence_values_are_kept_as_raw_entries() {
    let plan = expect_full(normalize(r#"{"hotels": "none available", "itinerary": [1, {"day": 1}]}"#));

    assert_eq!(plan.hotels, vec![Entry::Raw(json!("none available"))]);
    assert_eq!(plan.itinerary[0].raw(), Some(&json!(1)));
    assert_eq!(record(&plan.itinerary[1]).day, Some(1));
    assert_eq!(plan.day_records().count(), 1);
}

#[test]
fn fallback_keeps_non_object_fragment_elements() {
    let raw = r#"garbage { "hotels": ["Hotel A", "Hotel B"], "itinerary": oops"#;

    match normalize(raw) {
        NormalizationResult::Partial(partial) => {
            assert!(partial.hotels_matched);
            assert!(!partial.itinerary_matched);
            assert_eq!(
                partial.hotels,
                vec![Entry::Raw(json!("Hotel A")), Entry::Raw(json!("Hotel B"))]
            );
        }
        other => panic!("expected partial result, got {other:?}"),
    }
}

#[test]
fn unknown_keys_are_carried_through() {
    let raw = r#"{"currency": "EUR", "hotels": [{"name": "A", "amenities": ["wifi", "pool"]}], "itinerary": []}"#;

    let plan = expect_full(normalize(raw));
    assert_eq!(plan.extra.get("currency"), Some(&Value::from("EUR")));
    assert_eq!(
        record(&plan.hotels[0]).extra.get("amenities"),
        Some(&serde_json::json!(["wifi", "pool"]))
    );
}

#[test]
fn custom_config_controls_excerpt_and_message() {
    let normalizer = Normalizer::new(NormalizerConfig {
        excerpt_chars: 5,
        failure_message: "model said no".to_string(),
        ..NormalizerConfig::default()
    })
    .expect("config is valid");

    match normalizer.normalize("nothing useful here") {
        NormalizationResult::Failure(failure) => {
            assert_eq!(failure.excerpt, "nothi");
            assert_eq!(failure.message, "model said no");
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[test]
fn invalid_custom_patterns_are_rejected_up_front() {
    let broken = Normalizer::new(NormalizerConfig {
        hotels_pattern: "(unclosed".to_string(),
        ..NormalizerConfig::default()
    });
    assert!(matches!(broken, Err(AppError::Config(_))));

    let no_group = Normalizer::new(NormalizerConfig {
        itinerary_pattern: r#""itinerary":\s*\[.*?\]"#.to_string(),
        ..NormalizerConfig::default()
    });
    assert!(matches!(no_group, Err(AppError::Config(_))));
}

#[test]
fn result_serializes_with_outcome_tag() {
    let encoded = serde_json::to_value(normalize("nope")).expect("result encodes");
    assert_eq!(encoded["outcome"], "failure");
    assert_eq!(encoded["data"]["excerpt"], "nope");
}
