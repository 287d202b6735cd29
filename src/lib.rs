//! Deterministic test sharding.
//!
//! kishard splits one test suite across several independent nodes. Every node flattens the
//! same [`Suite`](suite::Suite) into the same ordered sequence, narrows it with a fixed chain of
//! filters (exclude-group, include-group, name-pattern, shard), runs what is left and reports it
//! to a [`ResultListener`](listener::ResultListener), TAP by default. Nodes never talk to each
//! other: the shard filter keeps the tests whose position modulo the node count equals the
//! node's index, so together the nodes run every test exactly once.
//!
//! ```no_run
//! use kishard::{
//!     FilterOptions, harness,
//!     suite::Suite,
//!     test::{Test, TestFnHandle, TestMeta},
//! };
//!
//! let suite = Suite::new("app")
//!     .with_child(Test::new(
//!         TestFnHandle::from_boxed(|| assert_eq!(2 + 2, 4)),
//!         TestMeta::new("adds"),
//!     ))
//!     .with_child(Test::new(
//!         TestFnHandle::from_boxed(|| kishard::println!("hello")),
//!         TestMeta::new("greets").with_groups(["slow"]),
//!     ));
//!
//! let options = FilterOptions::new().with_shard(0, 2).extend_exclude_groups(["flaky"]);
//! let report = harness(&suite).with_options(&options)?.run();
//! assert!(report.is_success());
//! # Ok::<(), kishard::ConfigError>(())
//! ```

pub mod capture;
pub mod listener;
pub mod outcome;
pub mod suite;

mod error;
pub use error::ConfigError;

mod options;
pub use options::FilterOptions;

mod strategy;
pub use strategy::*;

mod harness;
pub use harness::*;

mod report;
pub use report::*;

#[cfg(test)]
mod test_support;
