//! `check_rabbitmq_overview` polls the RabbitMQ management overview of one
//! or more hosts and classifies the ready and unacknowledged message counters
//! against warning and critical thresholds.
//!
//! The main struct of this crate is [`Check`], which ties a [`Client`] to the
//! thresholds and the host list of a single run.
//!
//! ```no_run
//! use check_rabbitmq_overview::{Check, ClientBuilder};
//! use std::error::Error;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn Error>> {
//!     let client = ClientBuilder::default().port(15672u16).build()?;
//!     let check = Check::new(client, "rabbit-1,rabbit-2", "10000,10000", "50000,50000")?;
//!     check.run(&mut std::io::stdout()).await?;
//!     Ok(())
//! }
//! ```

#[macro_use]
extern crate log;

mod check;
mod client;
mod error;
mod evaluator;
mod limits;
mod types;

#[cfg(test)]
mod test_utils;

pub use check::{split_hosts, Check};
pub use client::{Client, ClientBuilder, DEFAULT_PORT, DEFAULT_USER_AGENT, OVERVIEW_PATH};
pub use error::{ErrorKind, Result};
pub use evaluator::{Metric, StatusLine, Thresholds, Verdict};
pub use limits::Limits;
pub use types::{Overview, QueueSnapshot, QueueTotals, Scheme};
