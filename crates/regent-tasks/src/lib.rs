//! Hierarchical multi-turn task scheduler.
//!
//! A [`TaskNode`] wraps one [`Task`] and owns its children. Once per turn the owner calls
//! [`TaskNode::scheduling_pass`]; the node advances its children (in order, or all at once
//! for [`Composition::Parallel`]), runs its own step when they have drained, propagates
//! failures upward unless the spawner absorbed them, and force-fails itself when its
//! progress fingerprints start repeating.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod composition;
pub mod context;
pub mod history;
pub mod node;
pub mod snapshot;
pub mod task;

pub use composition::{ParallelGroup, Sequence};
pub use context::{PendingChild, TaskContext, TaskIds};
pub use history::ProgressHistory;
pub use node::{TaskNode, TaskStatus};
pub use snapshot::TaskSnapshot;
pub use task::{ChildReport, Composition, Handlers, HandlerKey, Outcome, Step, Task, TaskId};
