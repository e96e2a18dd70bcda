use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Continent of a reporter country, as labelled in the soil dataset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Continent {
    Africa,
    Oceania,
    SouthAmerica,
    Asia,
    NorthAmerica,
    Europe,
}

impl Continent {
    /// Display order of the density-range chart's x axis.
    pub const CHART_ORDER: [Continent; 6] = [
        Continent::Africa,
        Continent::Oceania,
        Continent::SouthAmerica,
        Continent::Asia,
        Continent::NorthAmerica,
        Continent::Europe,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Continent::Africa => "Africa",
            Continent::Oceania => "Oceania",
            Continent::SouthAmerica => "South America",
            Continent::Asia => "Asia",
            Continent::NorthAmerica => "North America",
            Continent::Europe => "Europe",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "africa" => Some(Continent::Africa),
            "oceania" => Some(Continent::Oceania),
            "south america" => Some(Continent::SouthAmerica),
            "asia" => Some(Continent::Asia),
            "north america" => Some(Continent::NorthAmerica),
            "europe" => Some(Continent::Europe),
            _ => None,
        }
    }
}

impl fmt::Display for Continent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Continent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Continent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Continent::from_str(&raw)
            .ok_or_else(|| de::Error::custom(format!("unknown continent `{}`", raw)))
    }
}
