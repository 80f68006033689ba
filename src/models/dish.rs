use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize, Serializer};
use strum::{Display, EnumIter, EnumString};

/// Dish categories accepted by the dishes API.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DishType {
    Pizza,
    Soup,
    Sandwich,
}

/// Pizza diameter with a granularity of 0.01, stored as hundredths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diameter(u32);

impl Diameter {
    pub fn from_hundredths(hundredths: u32) -> Self {
        Self(hundredths)
    }

    pub fn hundredths(&self) -> u32 {
        self.0
    }

    pub fn as_f64(&self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl fmt::Display for Diameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 % 100 {
            0 => write!(f, "{}", self.0 / 100),
            frac if frac % 10 == 0 => write!(f, "{}.{}", self.0 / 100, frac / 10),
            frac => write!(f, "{}.{:02}", self.0 / 100, frac),
        }
    }
}

// Whole diameters go out as JSON integers so `32` stays `32` on the wire.
impl Serialize for Diameter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % 100 == 0 {
            serializer.serialize_u32(self.0 / 100)
        } else {
            serializer.serialize_f64(self.as_f64())
        }
    }
}

/// Type-specific attributes. Only the selected type's fields exist.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DishDetails {
    Pizza { no_of_slices: u32, diameter: Diameter },
    Soup { spiciness_scale: u8 },
    Sandwich { slices_of_bread: u32 },
}

impl DishDetails {
    pub fn dish_type(&self) -> DishType {
        match self {
            DishDetails::Pizza { .. } => DishType::Pizza,
            DishDetails::Soup { .. } => DishType::Soup,
            DishDetails::Sandwich { .. } => DishType::Sandwich,
        }
    }
}

/// A validated dish, ready to be sent to the dishes API.
///
/// Serializes to the wire shape expected by the backend:
/// snake_case keys, `type` as the variant tag and `preparation_time`
/// as an unpadded `H:m:s` string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DishRecord {
    pub name: String,
    #[serde(serialize_with = "serialize_preparation_time")]
    pub preparation_time: NaiveTime,
    #[serde(flatten)]
    pub details: DishDetails,
}

impl DishRecord {
    pub fn dish_type(&self) -> DishType {
        self.details.dish_type()
    }
}

/// Format a time of day as `H:m:s` without zero padding (01:30:00 -> "1:30:0").
pub fn format_preparation_time(time: &NaiveTime) -> String {
    format!("{}:{}:{}", time.hour(), time.minute(), time.second())
}

fn serialize_preparation_time<S: Serializer>(
    time: &NaiveTime,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_preparation_time(time))
}
