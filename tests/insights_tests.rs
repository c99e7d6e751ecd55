use chrono::Utc;

use trip_planner_lib::{
    core::types::{PlanOutcome, TripRecord, TripStatus},
    planner::{
        catalog::{budget_option, traveler_option},
        insights::{search_trips, trip_stats, trip_tags},
        trip_plan::TripPlan,
    },
};

fn record(id: &str, destination: &str, days: u32, budget: &str, traveler: &str) -> TripRecord {
    TripRecord {
        id: id.to_string(),
        user_id: "u-1".to_string(),
        destination: destination.to_string(),
        day_count: days,
        budget_label: budget.to_string(),
        traveler_label: traveler.to_string(),
        traveler_count: 1,
        status: TripStatus::Saved,
        outcome: PlanOutcome::Full,
        tags: trip_tags(budget, days, traveler),
        plan: TripPlan::default(),
        is_public: false,
        likes: 0,
        views: 0,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[test]
fn tags_follow_budget_duration_and_party() {
    assert_eq!(
        trip_tags("Luxury", 3, "Solo Trip"),
        vec!["luxury", "short-trip", "solo-travel"]
    );
    assert_eq!(
        trip_tags("Tight budget", 7, "Family Vacation"),
        vec!["budget-friendly", "week-long", "family-travel"]
    );
    assert_eq!(
        trip_tags("Backpacker", 8, "Group Tour"),
        vec!["moderate", "extended-trip", "group-travel"]
    );
    assert_eq!(
        trip_tags("Standard", 4, "COUPLE Getaway"),
        vec!["moderate", "week-long", "couple-travel"]
    );
}

#[test]
fn search_matches_destination_and_any_tag() {
    let trips = vec![
        record("1", "Paris, France", 3, "Luxury", "Couple Getaway"),
        record("2", "Kyoto, Japan", 10, "Cheap", "Solo Trip"),
        record("3", "Paris, Texas", 2, "Standard", "Group Tour"),
    ];

    let paris = search_trips(&trips, Some("PARIS"), &[]);
    assert_eq!(paris.len(), 2);

    let solo_or_luxury = search_trips(&trips, None, &["solo-travel".to_string(), "luxury".to_string()]);
    let ids = solo_or_luxury.iter().map(|trip| trip.id.as_str()).collect::<Vec<_>>();
    assert_eq!(ids, vec!["1", "2"]);

    let both = search_trips(&trips, Some("paris"), &["group-travel".to_string()]);
    assert_eq!(both.len(), 1);
    assert_eq!(both[0].id, "3");

    assert_eq!(search_trips(&trips, Some("  "), &[]).len(), 3);
}

#[test]
fn stats_count_destinations_days_and_breakdowns() {
    let trips = vec![
        record("1", "Paris, France", 3, "Luxury", "Couple Getaway"),
        record("2", "Paris, France", 5, "Luxury", "Solo Trip"),
        record("3", "Kyoto, Japan", 10, "Cheap", "Solo Trip"),
    ];

    let stats = trip_stats(&trips);
    assert_eq!(stats.total_trips, 3);
    assert_eq!(stats.total_destinations, 2);
    assert_eq!(stats.total_days, 18);
    assert_eq!(stats.budget_breakdown.get("Luxury"), Some(&2));
    assert_eq!(stats.traveler_breakdown.get("Solo Trip"), Some(&2));

    assert_eq!(trip_stats(&[]).total_trips, 0);
}

#[test]
fn catalog_lookup_accepts_ids_and_titles() {
    assert_eq!(budget_option("3").map(|option| option.title), Some("Luxury"));
    assert_eq!(budget_option("backpacker").map(|option| option.id), Some(4));
    assert_eq!(traveler_option("Group Tour").map(|option| option.people), Some(5));
    assert_eq!(traveler_option(" 2 ").map(|option| option.title), Some("Couple Getaway"));
    assert!(budget_option("7").is_none());
    assert!(traveler_option("Caravan").is_none());
}
