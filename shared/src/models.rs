//! Shared data models.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One catalog record as returned by the data service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: i64,
    /// Display name, may contain `**bold**` markup
    pub name: String,
    #[serde(deserialize_with = "non_negative")]
    pub price: f64,
    /// Expected range 0 to 5
    pub rating: f64,
    #[serde(rename = "veg")]
    pub diet: Diet,
    pub calories: u32,
    pub image_url: String,
}

fn non_negative<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = f64::deserialize(deserializer)?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(serde::de::Error::custom(format!(
            "price must be a non-negative amount, got {}",
            value
        )))
    }
}

/// Dietary flag of a food item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diet {
    Vegetarian,
    NonVegetarian,
}

impl Diet {
    /// Wire value stored in the `veg` column.
    pub fn as_wire(&self) -> &'static str {
        match self {
            Diet::Vegetarian => "Yes",
            Diet::NonVegetarian => "No",
        }
    }

    fn from_wire(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "yes" | "y" | "true" | "veg" | "vegetarian" => Some(Diet::Vegetarian),
            "no" | "n" | "false" | "non-veg" | "nonveg" | "non-vegetarian" => {
                Some(Diet::NonVegetarian)
            }
            _ => None,
        }
    }
}

impl Serialize for Diet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for Diet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flag(bool),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Flag(true) => Ok(Diet::Vegetarian),
            Raw::Flag(false) => Ok(Diet::NonVegetarian),
            Raw::Text(text) => Diet::from_wire(&text).ok_or_else(|| {
                serde::de::Error::custom(format!("unknown veg value: {:?}", text))
            }),
        }
    }
}

/// One entry of the assistant transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub is_user: bool,
    pub is_welcome: bool,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_user: true,
            is_welcome: false,
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_user: false,
            is_welcome: false,
        }
    }

    pub fn welcome(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_user: false,
            is_welcome: true,
        }
    }
}

/// Error object returned by the data service on failure.
#[derive(Debug, Deserialize)]
pub struct ServiceErrorBody {
    pub message: String,
    pub code: Option<String>,
    pub details: Option<String>,
    pub hint: Option<String>,
}
