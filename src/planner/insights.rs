use std::collections::HashSet;

use crate::core::types::{TripRecord, TripStats};

/// Budget, duration and party tags attached to a stored trip.
pub fn trip_tags(budget_label: &str, day_count: u32, traveler_label: &str) -> Vec<String> {
    let budget = budget_label.to_lowercase();
    let traveler = traveler_label.to_lowercase();
    let mut tags = Vec::with_capacity(3);

    if budget.contains("budget") {
        tags.push("budget-friendly");
    } else if budget.contains("luxury") {
        tags.push("luxury");
    } else {
        tags.push("moderate");
    }

    tags.push(match day_count {
        0..=3 => "short-trip",
        4..=7 => "week-long",
        _ => "extended-trip",
    });

    if traveler.contains("solo") {
        tags.push("solo-travel");
    } else if traveler.contains("couple") {
        tags.push("couple-travel");
    } else if traveler.contains("family") {
        tags.push("family-travel");
    } else {
        tags.push("group-travel");
    }

    tags.into_iter().map(ToString::to_string).collect()
}

/// Filters trips by destination substring and, when given, any matching tag.
pub fn search_trips<'a>(
    trips: &'a [TripRecord],
    query: Option<&str>,
    tags: &[String],
) -> Vec<&'a TripRecord> {
    let needle = query
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_lowercase);

    trips
        .iter()
        .filter(|trip| {
            needle
                .as_deref()
                .map_or(true, |needle| trip.destination.to_lowercase().contains(needle))
        })
        .filter(|trip| tags.is_empty() || tags.iter().any(|tag| trip.tags.contains(tag)))
        .collect()
}

pub fn trip_stats(trips: &[TripRecord]) -> TripStats {
    let mut stats = TripStats {
        total_trips: trips.len(),
        ..TripStats::default()
    };
    let mut destinations = HashSet::new();

    for trip in trips {
        destinations.insert(trip.destination.as_str());
        stats.total_days += u64::from(trip.day_count);
        *stats
            .budget_breakdown
            .entry(trip.budget_label.clone())
            .or_insert(0) += 1;
        *stats
            .traveler_breakdown
            .entry(trip.traveler_label.clone())
            .or_insert(0) += 1;
    }

    stats.total_destinations = destinations.len();
    stats
}
