use core::fmt;

use regent_core::UnitId;
use serde::{Deserialize, Serialize};

use crate::TaskContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task#{}", self.0)
    }
}

/// What a task reports from `init`/`step`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Not done; revisit next turn.
    Pending,
    Complete,
    Fail(String),
}

impl Step {
    pub fn fail(reason: impl Into<String>) -> Self {
        Step::Fail(reason.into())
    }
}

/// Terminal outcome of a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Composition {
    /// Children form an ordered continuation queue.
    #[default]
    Sequential,
    /// Every child advances every pass.
    Parallel,
}

/// Names a handler on the parent task. Passed back to [`Task::handle`] when the child it
/// was attached to resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandlerKey(pub &'static str);

/// Handlers captured when a child is spawned.
///
/// A child failure without `on_fail` fails the parent too; with `on_fail` it is absorbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Handlers {
    pub on_complete: Option<HandlerKey>,
    pub on_fail: Option<HandlerKey>,
}

/// What a parent learns about a child that just resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildReport {
    pub id: TaskId,
    pub kind: &'static str,
    pub outcome: Outcome,
    pub produced: Option<UnitId>,
}

/// One kind of multi-turn work.
///
/// Only `kind` and `step` are required. Tasks never resolve themselves directly: they
/// return a [`Step`] and the owning [`TaskNode`](crate::TaskNode) applies it.
pub trait Task<W>: 'static
where
    W: 'static,
{
    fn kind(&self) -> &'static str;

    fn composition(&self) -> Composition {
        Composition::Sequential
    }

    /// Runs once, when the task is attached to a parent (or rooted).
    fn init(&mut self, _cx: &mut TaskContext<'_, W>) -> Step {
        Step::Pending
    }

    fn step(&mut self, cx: &mut TaskContext<'_, W>) -> Step;

    /// Called for a child spawned with a handler naming `key`.
    fn handle(&mut self, _key: HandlerKey, _report: &ChildReport, _cx: &mut TaskContext<'_, W>) {
    }

    /// Release anything held (registry entries, reservations). Runs exactly once, when the
    /// task resolves or an ancestor does.
    fn cleanup(&mut self, _cx: &mut TaskContext<'_, W>) {}

    /// Fingerprint used for stall detection. `None` opts out.
    fn progress_state(&self, _world: &W) -> Option<String> {
        None
    }

    /// A unit this task yields to its parent (e.g. a freshly built transport).
    fn produced_unit(&self) -> Option<UnitId> {
        None
    }

    fn snapshot(&self) -> serde_json::Value {
        serde_json::Value::Null
    }
}
