use std::fmt;

use crate::error::WeatherError;

/// A city name that has passed validation: trimmed and non-empty.
///
/// No other normalization is applied; case and diacritics are preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CityQuery(String);

impl CityQuery {
    pub fn parse(raw: &str) -> Result<Self, WeatherError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(WeatherError::Validation);
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for CityQuery {
    type Error = WeatherError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl fmt::Display for CityQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
