use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use crate::error::{AppError, Result};

/// A validated calendar date, used as the canonical storage key for a
/// diary entry.
///
/// Every `DateKey` in existence passed Gregorian validation at
/// construction time; there is no partially valid state. Ordering is
/// chronological, so a sorted collection of keys is already in
/// calendar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey {
    year: u16,
    month: u8,
    day: u8,
}

impl DateKey {
    /// Creates a `DateKey` from its numeric parts.
    ///
    /// # Arguments
    ///
    /// * `year` - The 4-digit year (1-9999).
    /// * `month` - The month (1-12).
    /// * `day` - The day of month, validated against the actual month
    ///   length including leap years.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `DateKey`, or `MalformedDate` if the
    /// parts do not name a real calendar date.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self> {
        // Years outside 1-9999 have no 4-digit compact encoding, so
        // they can never be storage keys.
        if year == 0 || year > 9999 {
            return Err(AppError::MalformedDate(format!(
                "year {} is outside the supported range 1-9999",
                year
            )));
        }

        NaiveDate::from_ymd_opt(i32::from(year), u32::from(month), u32::from(day))
            .ok_or_else(|| {
                AppError::MalformedDate(format!(
                    "{:04}-{:02}-{:02} is not a valid calendar date",
                    year, month, day
                ))
            })?;

        Ok(Self { year, month, day })
    }

    /// Normalizes an external date string into a `DateKey`.
    ///
    /// Exactly two shapes are accepted: 8 contiguous digits
    /// (`YYYYMMDD`) or 10 characters with literal hyphens at positions
    /// 4 and 7 (`YYYY-MM-DD`). Both normalize to the same key. Any
    /// other length or shape is rejected without partial parsing.
    pub fn parse(raw: &str) -> Result<Self> {
        // Shape checks run on the raw bytes before any slicing, so a
        // multi-byte character can never land on a slice boundary.
        let bytes = raw.as_bytes();
        let digits = |slots: &[u8]| slots.iter().all(|b| b.is_ascii_digit());

        let (year, month, day) = match bytes.len() {
            8 => {
                if !digits(bytes) {
                    return Err(AppError::MalformedDate(format!(
                        "non-digit characters in {:?}",
                        raw
                    )));
                }
                (&raw[0..4], &raw[4..6], &raw[6..8])
            }
            10 => {
                if bytes[4] != b'-' || bytes[7] != b'-' {
                    return Err(AppError::MalformedDate(format!(
                        "expected hyphens at positions 4 and 7 in {:?}",
                        raw
                    )));
                }
                if !digits(&bytes[0..4]) || !digits(&bytes[5..7]) || !digits(&bytes[8..10]) {
                    return Err(AppError::MalformedDate(format!(
                        "non-digit characters in {:?}",
                        raw
                    )));
                }
                (&raw[0..4], &raw[5..7], &raw[8..10])
            }
            _ => {
                return Err(AppError::MalformedDate(format!(
                    "expected YYYYMMDD or YYYY-MM-DD, got {:?}",
                    raw
                )));
            }
        };

        // Slices are all-ASCII-digit and at most 4 chars, so these
        // cannot fail.
        let year: u16 = year.parse().unwrap_or(0);
        let month: u8 = month.parse().unwrap_or(0);
        let day: u8 = day.parse().unwrap_or(0);

        Self::new(year, month, day)
    }

    /// The compact encoding `YYYYMMDD`, also the storage filename stem.
    pub fn compact(&self) -> String {
        format!("{:04}{:02}{:02}", self.year, self.month, self.day)
    }

    /// The hyphenated presentation encoding `YYYY-MM-DD`.
    pub fn hyphenated(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }

    /// The 4-digit year string, used as the grouping directory name.
    pub fn year_group(&self) -> String {
        format!("{:04}", self.year)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hyphenated())
    }
}

impl FromStr for DateKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for DateKey {
    /// Serializes as the compact encoding, the canonical wire form.
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.compact())
    }
}
