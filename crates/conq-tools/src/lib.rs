//! Tooling primitives for deterministic unit AI.
//!
//! This crate is intentionally lightweight and engine-agnostic. It records structured diagnostic
//! events alongside (not instead of) `tracing` log output, so tests and tools can assert on what
//! a simulation reported.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod trace;

pub use trace::{TraceEvent, TraceLog, TraceSink, Tracer};
