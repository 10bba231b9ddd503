use std::{convert::TryFrom, fmt::Display, str::FromStr};

use crate::error::{ErrorKind, Result};

/// Separator between the ready and the unacknowledged limit
const LIMIT_SEPARATOR: char = ',';

/// A pair of thresholds, one per queue counter.
///
/// Parsed from strings of the form `ready,unacknowledged`, e.g. `10000,10000`.
/// Limits are inclusive lower bounds: a counter equal to a limit trips it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Limits {
    /// Limit for messages ready for delivery
    pub ready: i64,
    /// Limit for messages delivered but not yet acknowledged
    pub unacknowledged: i64,
}

impl Limits {
    pub fn new(ready: i64, unacknowledged: i64) -> Self {
        Limits {
            ready,
            unacknowledged,
        }
    }
}

impl FromStr for Limits {
    type Err = ErrorKind;

    fn from_str(s: &str) -> Result<Self> {
        let fields: Vec<_> = s.split(LIMIT_SEPARATOR).collect();
        if fields.len() != 2 {
            return Err(ErrorKind::MalformedLimits(s.to_string(), fields.len()));
        }
        Ok(Limits::new(parse_limit(fields[0])?, parse_limit(fields[1])?))
    }
}

impl TryFrom<&str> for Limits {
    type Error = ErrorKind;

    fn try_from(s: &str) -> Result<Self> {
        s.parse()
    }
}

impl Display for Limits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.ready, LIMIT_SEPARATOR, self.unacknowledged)
    }
}

fn parse_limit(field: &str) -> Result<i64> {
    field
        .parse::<i64>()
        .map_err(|e| ErrorKind::NonNumericLimit(field.to_string(), e))
}
