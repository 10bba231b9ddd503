use std::{fmt::Display, io::Write};

use crate::{error::Result, limits::Limits, types::QueueSnapshot};

/// Severity of a single queue counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Ok,
    Warning,
    Critical,
}

impl Verdict {
    /// Classify `value` against inclusive `warning` and `critical` limits.
    ///
    /// The critical limit is checked first, so a value reaching both limits
    /// is only ever critical, even when the critical limit is below the
    /// warning limit.
    pub fn classify(value: i64, warning: i64, critical: i64) -> Self {
        if value >= critical {
            Verdict::Critical
        } else if value >= warning {
            Verdict::Warning
        } else {
            Verdict::Ok
        }
    }
}

impl Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let out = match self {
            Verdict::Ok => "OK",
            Verdict::Warning => "WARNING",
            Verdict::Critical => "CRITICAL",
        };
        write!(f, "{}", out)
    }
}

/// The queue counters reported for every host, in output order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Ready,
    Unacknowledged,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Metric::Ready, Metric::Unacknowledged];

    pub fn label(self) -> &'static str {
        match self {
            Metric::Ready => "messages ready",
            Metric::Unacknowledged => "messages unacknowledged",
        }
    }

    fn value(self, snapshot: &QueueSnapshot) -> i64 {
        match self {
            Metric::Ready => snapshot.messages_ready,
            Metric::Unacknowledged => snapshot.messages_unacknowledged,
        }
    }

    fn limit(self, limits: &Limits) -> i64 {
        match self {
            Metric::Ready => limits.ready,
            Metric::Unacknowledged => limits.unacknowledged,
        }
    }
}

/// One line of output: `<LEVEL> <value> <label>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusLine {
    pub verdict: Verdict,
    pub value: i64,
    pub metric: Metric,
}

impl Display for StatusLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.verdict, self.value, self.metric.label())
    }
}

/// Warning and critical limits, shared by all hosts of a check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub warning: Limits,
    pub critical: Limits,
}

impl Thresholds {
    pub fn new(warning: Limits, critical: Limits) -> Self {
        Thresholds { warning, critical }
    }

    /// Classify both counters of `snapshot`, ready messages first
    pub fn evaluate(&self, snapshot: &QueueSnapshot) -> [StatusLine; 2] {
        let line = |metric: Metric| {
            let value = metric.value(snapshot);
            StatusLine {
                verdict: Verdict::classify(
                    value,
                    metric.limit(&self.warning),
                    metric.limit(&self.critical),
                ),
                value,
                metric,
            }
        };
        [line(Metric::ALL[0]), line(Metric::ALL[1])]
    }

    /// Evaluate `snapshot` and write one status line per counter to `out`
    pub fn report<W: Write>(&self, snapshot: &QueueSnapshot, out: &mut W) -> Result<()> {
        for line in self.evaluate(snapshot).iter() {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }
}
