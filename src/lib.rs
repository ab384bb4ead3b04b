//! Scheduled cleaner for self-destructing Mastodon statuses.
//!
//! Statuses carrying the command tag (default `#deleteit`) embed their own
//! deletion deadline, either as an absolute date/time (`#deleteit 3-15
//! 14:00`) or as a relative duration (`#deleteit 1w2d3h`). The sweeper
//! periodically lists the authenticated account's tagged statuses, parses
//! each command against the status's last-modified time, and deletes the
//! expired ones. A status that consists of nothing but the directive also
//! deletes the status it replies to.

pub mod client;
pub mod config;
pub mod core;
pub mod parse;
pub mod store;
pub mod sweep;
pub mod types;
