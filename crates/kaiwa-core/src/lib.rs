//! kaiwa-core — Conversation scoring pipeline and JLPT level estimation.
//!
//! This crate defines the data model, pattern tables, skill analyzers, and
//! aggregation logic that the rest of the kaiwa system builds on. The whole
//! pipeline is synchronous and pure: it receives already-fetched text and
//! already-measured latencies as plain values and never performs I/O.

pub mod analyzers;
pub mod error;
pub mod estimator;
pub mod model;
pub mod patterns;
pub mod pipeline;
pub mod prompt;
pub mod report;
pub mod scoring;
pub mod traits;
pub mod transcript;
