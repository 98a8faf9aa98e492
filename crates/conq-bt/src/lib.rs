//! Two-valued behavior tree runtime.
//!
//! Every node answers `run(ctx) -> bool`. Composites short-circuit (`Sequence` is AND,
//! `Selector` is OR), `Inverter` negates, and leaves wrap closures over the context. The tagged
//! [`BtStatus`] result (with `Running`) is available through `tick` for multi-tick leaves such as
//! [`Task`]; under `run` a running task counts as success.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod bt;
pub mod nodes;
pub mod tree;

pub use bt::{BtNode, BtStatus, NodeName};
pub use nodes::{Action, Condition, Inverter, Selector, Sequence, Task};
pub use tree::BehaviorTree;
