//! Command line front end for header remapping.
//!
//! The `remap` binary replays `EXTRA=MISSING` pairs as drag gestures against
//! a [`MappingController`](remap_core::MappingController), optionally undoes
//! the latest of them, then downloads the merged CSV.

#![allow(missing_docs)]

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
