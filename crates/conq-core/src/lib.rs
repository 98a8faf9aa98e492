//! Deterministic, engine-agnostic unit AI kernel primitives.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod error;
pub mod math;
pub mod rng;
pub mod tick;

pub use agent::{IdAllocator, UnitId};
pub use error::{AiError, AiResult};
pub use math::Vec2;
pub use rng::{DeterministicRng, SplitMix64};
pub use tick::TickContext;
