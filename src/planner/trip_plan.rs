use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::planner::lenient::{Fields, FromFields};

/// One element of a plan sequence. Elements that are not JSON objects are
/// kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum Entry<T> {
    Record(T),
    Raw(Value),
}

impl<T: FromFields> Entry<T> {
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::Record(T::from_object(map)),
            other => Self::Raw(other),
        }
    }
}

impl<T> Entry<T> {
    pub fn record(&self) -> Option<&T> {
        match self {
            Self::Record(record) => Some(record),
            Self::Raw(_) => None,
        }
    }

    pub fn raw(&self) -> Option<&Value> {
        match self {
            Self::Record(_) => None,
            Self::Raw(value) => Some(value),
        }
    }
}

impl<T> From<T> for Entry<T> {
    fn from(record: T) -> Self {
        Self::Record(record)
    }
}

impl<'de, T: FromFields> Deserialize<'de> for Entry<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

/// Implements `Deserialize` for records read through [`Fields`]. Any JSON
/// object is accepted.
macro_rules! deserialize_from_fields {
    ($($record:ty),+ $(,)?) => {
        $(
            impl<'de> Deserialize<'de> for $record {
                fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                    Map::<String, Value>::deserialize(deserializer).map(Self::from_object)
                }
            }
        )+
    };
}

deserialize_from_fields!(TripPlan, GeoCoordinates, Hotel, DayPlan, PlaceVisit);

/// Hotel recommendations plus a day-by-day itinerary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, JsonSchema)]
pub struct TripPlan {
    #[serde(default)]
    pub hotels: Vec<Entry<Hotel>>,
    #[serde(default)]
    pub itinerary: Vec<Entry<DayPlan>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TripPlan {
    pub fn is_empty(&self) -> bool {
        self.hotels.is_empty() && self.itinerary.is_empty()
    }

    pub fn hotel_records(&self) -> impl Iterator<Item = &Hotel> {
        self.hotels.iter().filter_map(Entry::record)
    }

    pub fn day_records(&self) -> impl Iterator<Item = &DayPlan> {
        self.itinerary.iter().filter_map(Entry::record)
    }

    pub fn place_count(&self) -> usize {
        self.day_records().map(|day| day.places.len()).sum()
    }
}

impl FromFields for TripPlan {
    fn from_fields(mut fields: Fields) -> Self {
        Self {
            hotels: fields.sequence("hotels"),
            itinerary: fields.sequence("itinerary"),
            extra: fields.into_extra(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, JsonSchema)]
pub struct GeoCoordinates {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FromFields for GeoCoordinates {
    fn from_fields(mut fields: Fields) -> Self {
        Self {
            lat: fields.f64(&["lat"]),
            lng: fields.f64(&["lng"]),
            extra: fields.into_extra(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, JsonSchema)]
pub struct Hotel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_night: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo_coordinates: Option<GeoCoordinates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FromFields for Hotel {
    fn from_fields(mut fields: Fields) -> Self {
        Self {
            name: fields.string(&["name"]),
            address: fields.string(&["address"]),
            price_per_night: fields.string(&["price_per_night", "pricePerNight"]),
            image_url: fields.string(&["image_url", "imageUrl"]),
            geo_coordinates: fields.object(&["geo_coordinates", "geoCoordinates"]),
            rating: fields.f64(&["rating"]),
            description: fields.string(&["description"]),
            extra: fields.into_extra(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, JsonSchema)]
pub struct DayPlan {
    /// 1-based position in the itinerary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_time_to_visit: Option<String>,
    #[serde(default)]
    pub places: Vec<Entry<PlaceVisit>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DayPlan {
    pub fn place_records(&self) -> impl Iterator<Item = &PlaceVisit> {
        self.places.iter().filter_map(Entry::record)
    }
}

impl FromFields for DayPlan {
    fn from_fields(mut fields: Fields) -> Self {
        Self {
            day: fields.u32(&["day"]),
            best_time_to_visit: fields.string(&["best_time_to_visit", "bestTimeToVisit"]),
            places: fields.sequence("places"),
            extra: fields.into_extra(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, JsonSchema)]
pub struct PlaceVisit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo_coordinates: Option<GeoCoordinates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travel_time: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FromFields for PlaceVisit {
    fn from_fields(mut fields: Fields) -> Self {
        Self {
            place_name: fields.string(&["place_name", "placeName"]),
            place_details: fields.string(&["place_details", "placeDetails"]),
            image_url: fields.string(&["image_url", "imageUrl"]),
            geo_coordinates: fields.object(&["geo_coordinates", "geoCoordinates"]),
            ticket_price: fields.string(&["ticket_price", "ticketPrice"]),
            travel_time: fields.string(&["travel_time", "travelTime"]),
            extra: fields.into_extra(),
        }
    }
}

pub fn trip_plan_schema() -> Value {
    serde_json::to_value(schemars::schema_for!(TripPlan)).unwrap_or_else(|_| serde_json::json!({}))
}
