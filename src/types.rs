use serde::{Deserialize, Deserializer};
use std::fmt::Display;

/// The part of `GET /api/overview` this crate cares about.
///
/// Decoding is permissive: a missing or `null` `queue_totals`
/// object, as well as missing or `null` counters inside it, decode as zero.
/// Unknown keys are ignored.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Overview {
    #[serde(default, deserialize_with = "null_as_default")]
    pub queue_totals: QueueTotals,
}

/// The `queue_totals` object of the overview
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
pub struct QueueTotals {
    #[serde(default, deserialize_with = "null_as_default")]
    pub messages_ready: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub messages_unacknowledged: i64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The two queue counters observed on one host at one point in time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct QueueSnapshot {
    /// Messages enqueued and available for delivery
    pub messages_ready: i64,
    /// Messages delivered to a consumer but not yet acknowledged
    pub messages_unacknowledged: i64,
}

impl QueueSnapshot {
    pub fn new(messages_ready: i64, messages_unacknowledged: i64) -> Self {
        QueueSnapshot {
            messages_ready,
            messages_unacknowledged,
        }
    }
}

impl From<Overview> for QueueSnapshot {
    fn from(overview: Overview) -> Self {
        let totals = overview.queue_totals;
        QueueSnapshot::new(totals.messages_ready, totals.messages_unacknowledged)
    }
}

/// Transport used to reach the management API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    /// `Https` if `secure` is set, `Http` otherwise
    pub fn from_secure(secure: bool) -> Self {
        if secure {
            Scheme::Https
        } else {
            Scheme::Http
        }
    }
}

impl Default for Scheme {
    fn default() -> Self {
        Scheme::Http
    }
}

impl Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let out = match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        };
        write!(f, "{}", out)
    }
}
