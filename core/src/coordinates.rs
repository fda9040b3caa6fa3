//! Validated latitude/longitude pairs.
//!
//! # Design
//! Components are kept as exact decimal text (`Degrees`) rather than `f64`,
//! so `51.381051` prints back as `51.381051` and the range check at the
//! boundary (`90.0000001`) is decided on the digits, not on a rounded float.
//! Exponent notation is rewritten by moving the decimal point in the text.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// One coordinate component as exact decimal text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Degrees(String);

impl Degrees {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Nearest `f64`. The text is validated on construction, so this is lossy
    /// only in precision.
    pub fn to_f64(&self) -> f64 {
        self.0.parse().unwrap_or(f64::NAN)
    }

    /// `-limit <= self <= limit`, compared digit by digit.
    fn within(&self, limit: u32) -> bool {
        let unsigned = self.0.strip_prefix('-').unwrap_or(self.0.as_str());
        let (integer, fraction) = match unsigned.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (unsigned, None),
        };
        let integer = integer.trim_start_matches('0');
        if integer.len() > 3 {
            return false;
        }
        let whole: u32 = if integer.is_empty() {
            0
        } else {
            integer.parse().unwrap_or(u32::MAX)
        };
        match whole.cmp(&limit) {
            Ordering::Less => true,
            Ordering::Equal => fraction.map_or(true, |f| f.bytes().all(|b| b == b'0')),
            Ordering::Greater => false,
        }
    }
}

/// Largest exponent magnitude rewritten as plain text.
const MAX_EXPONENT: i64 = 1024;

fn all_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// Splits `digits[.digits]` into its integer and fraction parts.
fn split_decimal(text: &str) -> Option<(&str, &str)> {
    match text.split_once('.') {
        Some((integer, fraction)) if all_digits(integer) && all_digits(fraction) => {
            Some((integer, fraction))
        }
        Some(_) => None,
        None if all_digits(text) => Some((text, "")),
        None => None,
    }
}

/// Moves the decimal point of `integer.fraction` by `exponent` places.
/// Fraction digits, trailing zeros included, are kept.
fn shift_point(integer: &str, fraction: &str, exponent: i64) -> String {
    let digits = format!("{integer}{fraction}");
    // Both operands are bounded by the input length and MAX_EXPONENT.
    let point = integer.len() as i64 + exponent;
    let (whole, fraction) = if point <= 0 {
        let zeros = "0".repeat(point.unsigned_abs() as usize);
        (String::new(), format!("{zeros}{digits}"))
    } else if point as usize >= digits.len() {
        let zeros = "0".repeat(point as usize - digits.len());
        (format!("{digits}{zeros}"), String::new())
    } else {
        let (whole, fraction) = digits.split_at(point as usize);
        (whole.to_string(), fraction.to_string())
    };

    let whole = whole.trim_start_matches('0');
    let whole = if whole.is_empty() { "0" } else { whole };
    if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{whole}.{fraction}")
    }
}

impl FromStr for Degrees {
    type Err = ValidationError;

    /// Plain decimals are kept verbatim apart from a leading `+`. Exponent
    /// notation is rewritten as plain decimal text by moving the point, so
    /// every mantissa digit survives.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let invalid = || ValidationError::InvalidNumber(text.to_string());

        let (negative, unsigned) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };
        let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
            Some((mantissa, exponent)) => (mantissa, Some(exponent)),
            None => (unsigned, None),
        };
        let (integer, fraction) = split_decimal(mantissa).ok_or_else(invalid)?;

        let magnitude = match exponent {
            None => mantissa.to_string(),
            Some(exponent) => {
                let exponent_digits = exponent.strip_prefix(['-', '+']).unwrap_or(exponent);
                if !all_digits(exponent_digits) {
                    return Err(invalid());
                }
                let is_zero = integer.bytes().chain(fraction.bytes()).all(|b| b == b'0');
                // Saturates for exponents too long for i64.
                let size: i64 = exponent_digits.parse().unwrap_or(i64::MAX);
                let shift = if exponent.starts_with('-') { -size } else { size };
                if is_zero {
                    "0".to_string()
                } else if shift > MAX_EXPONENT {
                    return Err(ValidationError::Range {
                        field: "degrees",
                        limit: Coordinates::LONGITUDE_LIMIT,
                    });
                } else if shift < -MAX_EXPONENT {
                    return Err(invalid());
                } else {
                    shift_point(integer, fraction, shift)
                }
            }
        };

        if negative {
            Ok(Degrees(format!("-{magnitude}")))
        } else {
            Ok(Degrees(magnitude))
        }
    }
}

impl TryFrom<f64> for Degrees {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(ValidationError::InvalidNumber(value.to_string()));
        }
        // `Display` for f64 never uses exponent notation.
        Ok(Degrees(value.to_string()))
    }
}

impl fmt::Display for Degrees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An immutable, range-checked latitude/longitude pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coordinates {
    latitude: Degrees,
    longitude: Degrees,
}

impl Coordinates {
    pub const LATITUDE_LIMIT: u32 = 90;
    pub const LONGITUDE_LIMIT: u32 = 180;

    pub fn new(latitude: Degrees, longitude: Degrees) -> Result<Self, ValidationError> {
        if !latitude.within(Self::LATITUDE_LIMIT) {
            return Err(ValidationError::Range {
                field: "latitude",
                limit: Self::LATITUDE_LIMIT,
            });
        }
        if !longitude.within(Self::LONGITUDE_LIMIT) {
            return Err(ValidationError::Range {
                field: "longitude",
                limit: Self::LONGITUDE_LIMIT,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn from_f64(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        Self::new(Degrees::try_from(latitude)?, Degrees::try_from(longitude)?)
    }

    pub fn builder() -> CoordinatesBuilder {
        CoordinatesBuilder::default()
    }

    pub fn latitude(&self) -> &Degrees {
        &self.latitude
    }

    pub fn longitude(&self) -> &Degrees {
        &self.longitude
    }
}

/// `"<lat>,<lng>"`, the form the service uses in query strings.
impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

impl FromStr for Coordinates {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (latitude, longitude) = s
            .split_once(',')
            .ok_or_else(|| ValidationError::InvalidNumber(s.to_string()))?;
        Self::new(latitude.parse()?, longitude.parse()?)
    }
}

/// Collects both components before validating them together.
#[derive(Debug, Default, Clone)]
pub struct CoordinatesBuilder {
    latitude: Option<Degrees>,
    longitude: Option<Degrees>,
}

impl CoordinatesBuilder {
    pub fn latitude(mut self, latitude: Degrees) -> Self {
        self.latitude = Some(latitude);
        self
    }

    pub fn longitude(mut self, longitude: Degrees) -> Self {
        self.longitude = Some(longitude);
        self
    }

    pub fn build(self) -> Result<Coordinates, ValidationError> {
        let latitude = self.latitude.ok_or(ValidationError::MissingField("latitude"))?;
        let longitude = self.longitude.ok_or(ValidationError::MissingField("longitude"))?;
        Coordinates::new(latitude, longitude)
    }
}
