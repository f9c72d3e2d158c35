use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Largest magnitude accepted from text, in hundredths (100 diopters).
pub const POWER_LIMIT: i32 = 10_000;

/// A lens power in diopters, held as a whole number of hundredths.
///
/// Always rendered with an explicit sign and two decimals (`+0.00`, `-2.50`).
/// Zero is non-negative, so a value that rounds to zero renders as `+0.00`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct PowerValue {
    hundredths: i32,
}

impl PowerValue {
    pub const ZERO: PowerValue = PowerValue { hundredths: 0 };

    pub const fn from_hundredths(hundredths: i32) -> Self {
        PowerValue { hundredths }
    }

    pub fn hundredths(&self) -> i32 {
        self.hundredths
    }

    pub fn as_f64(&self) -> f64 {
        self.hundredths as f64 / 100.0
    }

    /// Parse free-form numeric text the way a form field is read.
    ///
    /// Returns `None` for empty, non-numeric, non-finite input, or a
    /// magnitude beyond [`POWER_LIMIT`].
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        let numeric: f64 = trimmed.parse().ok()?;
        if !numeric.is_finite() || numeric.abs() * 100.0 > POWER_LIMIT as f64 {
            return None;
        }
        Some(format(numeric))
    }

    pub fn is_negative(&self) -> bool {
        self.hundredths < 0
    }

    /// Power shifted by an addition category (zero offset when unset).
    ///
    /// `None` when the result does not fit.
    pub fn plus_addition(self, add: Option<AdditionCategory>) -> Option<Self> {
        self.hundredths
            .checked_add(offset_hundredths(add))
            .map(PowerValue::from_hundredths)
    }

    pub fn minus_addition(self, add: Option<AdditionCategory>) -> Option<Self> {
        self.hundredths
            .checked_sub(offset_hundredths(add))
            .map(PowerValue::from_hundredths)
    }
}

/// Render a number as a [`PowerValue`], rounding to two decimals.
pub fn format(numeric: f64) -> PowerValue {
    PowerValue::from_hundredths((numeric * 100.0).round() as i32)
}

impl fmt::Display for PowerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.hundredths < 0 { '-' } else { '+' };
        let abs = self.hundredths.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl FromStr for PowerValue {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PowerValue::parse(s).ok_or_else(|| Error::InvalidPower(s.to_string()))
    }
}

impl From<PowerValue> for String {
    fn from(value: PowerValue) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for PowerValue {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Reading addition, chosen as a category rather than a free number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AdditionCategory {
    Low,
    High,
}

impl AdditionCategory {
    pub const ALL: [AdditionCategory; 2] = [AdditionCategory::Low, AdditionCategory::High];

    pub fn offset(&self) -> PowerValue {
        match self {
            AdditionCategory::Low => PowerValue::from_hundredths(100),
            AdditionCategory::High => PowerValue::from_hundredths(250),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AdditionCategory::Low => "LOW",
            AdditionCategory::High => "HIGH",
        }
    }

    /// Read a select-box value. Empty means "not chosen".
    pub fn parse_selection(text: &str) -> Result<Option<Self>, Error> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed.parse().map(Some)
    }
}

impl fmt::Display for AdditionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdditionCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "LOW" => Ok(AdditionCategory::Low),
            "HIGH" => Ok(AdditionCategory::High),
            _ => Err(Error::InvalidAddition(s.to_string())),
        }
    }
}

/// Offset contributed by an optional addition, in hundredths.
pub fn offset_hundredths(add: Option<AdditionCategory>) -> i32 {
    add.map_or(0, |category| category.offset().hundredths())
}
