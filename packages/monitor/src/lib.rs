// Page Monitor - Core
//
// Checks one web page per invocation: fetch (plain HTTP or a real browser),
// narrow to the content region, filter the results table and push a summary
// to the configured notification channels. Scheduling is left to cron.

pub mod config;
pub mod message;
pub mod monitor;

pub use config::*;
pub use monitor::{build_fetcher, build_notifier, Monitor, RunOptions, RunReport};
