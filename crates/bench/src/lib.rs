//! Batch runner for bot-vs-bot chess matches.
//!
//! This crate provides:
//! - Sequential execution of many independent games (`run_batch`)
//! - Aggregate outcome counters and a running score pair (`BatchStats`)
//!
//! The CLI binary (`chessbots`) adds single-game and human-vs-bot runs on
//! top.

mod batch;

pub use batch::*;
