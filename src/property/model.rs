//! Property record types
//!
//! `Property` is the stored record. `NewProperty` and `PropertyUpdate` are the
//! validated inputs the store accepts; neither can carry an ID or timestamps.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Rental status of a property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyStatus {
    #[default]
    Available,
    Rented,
    Maintenance,
}

impl PropertyStatus {
    /// All statuses, in the order they are listed in error messages
    pub const ALL: [PropertyStatus; 3] = [
        PropertyStatus::Available,
        PropertyStatus::Rented,
        PropertyStatus::Maintenance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyStatus::Available => "available",
            PropertyStatus::Rented => "rented",
            PropertyStatus::Maintenance => "maintenance",
        }
    }

    /// Parse the wire name. Matching is exact and case-sensitive.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

impl fmt::Display for PropertyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Store-assigned property identifier (always >= 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyId(u64);

impl PropertyId {
    pub const FIRST: PropertyId = PropertyId(1);

    /// Returns `None` for zero.
    pub fn new(id: u64) -> Option<Self> {
        (id > 0).then_some(Self(id))
    }

    pub fn get(&self) -> u64 {
        self.0
    }

    pub(crate) fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored rental property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: PropertyId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub address: String,
    pub price: f64,
    pub status: PropertyStatus,
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "iso_millis")]
    pub updated_at: DateTime<Utc>,
}

/// Validated payload for creating a property
#[derive(Debug, Clone, PartialEq)]
pub struct NewProperty {
    pub title: String,
    pub description: Option<String>,
    pub address: String,
    pub price: f64,
    pub status: PropertyStatus,
}

/// Partial update. Only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub price: Option<f64>,
    pub status: Option<PropertyStatus>,
}

impl PropertyUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.address.is_none()
            && self.price.is_none()
            && self.status.is_none()
    }

    /// Overwrite the fields present in this update. Timestamps are left alone.
    pub fn apply_to(self, property: &mut Property) {
        if let Some(title) = self.title {
            property.title = title;
        }
        if let Some(description) = self.description {
            property.description = Some(description);
        }
        if let Some(address) = self.address {
            property.address = address;
        }
        if let Some(price) = self.price {
            property.price = price;
        }
        if let Some(status) = self.status {
            property.status = status;
        }
    }
}

/// List criteria. All fields optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub status: Option<PropertyStatus>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// Result of a list query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyList {
    pub properties: Vec<Property>,
    /// Size of the whole store, ignoring the filter
    pub total: usize,
    /// Size of `properties`
    pub filtered: usize,
}

/// ISO 8601 timestamps with millisecond precision and a `Z` suffix
pub mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn format(ts: &DateTime<Utc>) -> String {
        ts.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Property {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        Property {
            id: PropertyId::new(7).unwrap(),
            title: "Flat A".to_string(),
            description: None,
            address: "1 Main St".to_string(),
            price: 1200.0,
            status: PropertyStatus::Available,
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn test_property_serializes_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["status"], "available");
        assert_eq!(json["createdAt"], "2024-05-01T12:00:00.000Z");
        assert_eq!(json["updatedAt"], "2024-05-01T12:00:00.000Z");
        assert!(json.get("description").is_none());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn test_status_parse_is_exact() {
        assert_eq!(PropertyStatus::parse("rented"), Some(PropertyStatus::Rented));
        assert_eq!(PropertyStatus::parse("Rented"), None);
        assert_eq!(PropertyStatus::parse(""), None);
        assert_eq!(PropertyStatus::default(), PropertyStatus::Available);
    }

    #[test]
    fn test_property_id_rejects_zero() {
        assert!(PropertyId::new(0).is_none());
        assert_eq!(PropertyId::new(3).map(|id| id.get()), Some(3));
    }

    #[test]
    fn test_update_applies_only_present_fields() {
        let mut property = sample();
        let update = PropertyUpdate {
            status: Some(PropertyStatus::Rented),
            description: Some(String::new()),
            ..Default::default()
        };
        assert!(!update.is_empty());

        update.apply_to(&mut property);
        assert_eq!(property.status, PropertyStatus::Rented);
        assert_eq!(property.description.as_deref(), Some(""));
        assert_eq!(property.title, "Flat A");
        assert_eq!(property.price, 1200.0);
    }

    #[test]
    fn test_empty_update() {
        assert!(PropertyUpdate::default().is_empty());
    }
}
