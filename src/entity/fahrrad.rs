//! Bicycle record and its stored form

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::id::FahrradId;

/// Kind of a bicycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FahrradKind {
    MountainBike,
    RoadBike,
    TrekkingBike,
}

impl FahrradKind {
    /// Wire name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            FahrradKind::MountainBike => "MOUNTAIN_BIKE",
            FahrradKind::RoadBike => "ROAD_BIKE",
            FahrradKind::TrekkingBike => "TREKKING_BIKE",
        }
    }

    /// Parse a wire name; the empty string is not a kind
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "MOUNTAIN_BIKE" => Some(FahrradKind::MountainBike),
            "ROAD_BIKE" => Some(FahrradKind::RoadBike),
            "TREKKING_BIKE" => Some(FahrradKind::TrekkingBike),
            _ => None,
        }
    }
}

/// A bicycle as supplied by callers (no id, no version)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fahrrad {
    pub model: String,

    #[serde(default)]
    pub weight: Option<f64>,

    #[serde(default, with = "kind_or_empty")]
    pub kind: Option<FahrradKind>,

    pub brand: String,

    #[serde(default)]
    pub price: Option<f64>,
}

/// Stored form of a bicycle: the payload plus server-assigned fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FahrradDocument {
    pub id: FahrradId,
    pub version: u64,
    #[serde(flatten)]
    pub fahrrad: Fahrrad,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FahrradDocument {
    /// Wrap a freshly created record (version 0)
    pub fn new(id: FahrradId, fahrrad: Fahrrad) -> Self {
        let now = Utc::now();
        Self {
            id,
            version: 0,
            fahrrad,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the payload and bump the version by exactly one
    pub fn apply_update(&mut self, fahrrad: Fahrrad) {
        self.fahrrad = fahrrad;
        self.version += 1;
        self.updated_at = Utc::now();
    }

    /// JSON projection used for filter evaluation
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// `kind` travels as a string where "" means "no kind"
mod kind_or_empty {
    use super::*;

    pub fn serialize<S: Serializer>(kind: &Option<FahrradKind>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(kind.map(|k| k.as_str()).unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<FahrradKind>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref() {
            None | Some("") => Ok(None),
            Some(s) => FahrradKind::parse(s)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("unknown kind: {}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_wire_names() {
        assert_eq!(FahrradKind::MountainBike.as_str(), "MOUNTAIN_BIKE");
        assert_eq!(FahrradKind::parse("ROAD_BIKE"), Some(FahrradKind::RoadBike));
        assert_eq!(FahrradKind::parse(""), None);
        assert_eq!(FahrradKind::parse("road_bike"), None);
    }

    #[test]
    fn test_empty_kind_is_none() {
        let fahrrad: Fahrrad = serde_json::from_value(json!({
            "model": "Stereo 120",
            "kind": "",
            "brand": "Cube"
        }))
        .unwrap();
        assert_eq!(fahrrad.kind, None);
        assert_eq!(fahrrad.weight, None);
    }

    #[test]
    fn test_document_projection_is_flat() {
        let doc = FahrradDocument::new(
            "000000000000000000000001".parse().unwrap(),
            Fahrrad {
                model: "Stereo 120".into(),
                weight: Some(12.3),
                kind: Some(FahrradKind::MountainBike),
                brand: "Cube".into(),
                price: Some(2500.0),
            },
        );

        let value = doc.to_value();
        assert_eq!(value["id"], "000000000000000000000001");
        assert_eq!(value["version"], 0);
        assert_eq!(value["model"], "Stereo 120");
        assert_eq!(value["kind"], "MOUNTAIN_BIKE");
    }

    #[test]
    fn test_apply_update_bumps_version() {
        let mut doc = FahrradDocument::new(
            FahrradId::generate(),
            Fahrrad {
                model: "A".into(),
                weight: None,
                kind: None,
                brand: "B".into(),
                price: None,
            },
        );
        let mut changed = doc.fahrrad.clone();
        changed.brand = "C".into();

        doc.apply_update(changed);
        assert_eq!(doc.version, 1);
        assert_eq!(doc.fahrrad.brand, "C");
    }
}
