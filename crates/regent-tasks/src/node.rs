use core::fmt;

use tracing::{debug, warn};

use crate::{
    ChildReport, Composition, Handlers, Outcome, PendingChild, ProgressHistory, Step, Task,
    TaskContext, TaskId, TaskSnapshot,
};

const STUCK_REASON: &str = "stuck in cycle";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    Unresolved,
    Completed,
    Failed(String),
}

impl TaskStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TaskStatus::Unresolved)
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            TaskStatus::Unresolved => None,
            TaskStatus::Completed => Some(Outcome::Completed),
            TaskStatus::Failed(reason) => Some(Outcome::Failed(reason.clone())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Unresolved => "unresolved",
            TaskStatus::Completed => "completed",
            TaskStatus::Failed(_) => "failed",
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            TaskStatus::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

struct Child<W>
where
    W: 'static,
{
    node: TaskNode<W>,
    handlers: Handlers,
    reported: bool,
}

/// A task plus the children it owns.
pub struct TaskNode<W>
where
    W: 'static,
{
    id: TaskId,
    task: Box<dyn Task<W>>,
    status: TaskStatus,
    children: Vec<Child<W>>,
    history: ProgressHistory,
    initialized: bool,
    cleaned: bool,
}

impl<W> TaskNode<W>
where
    W: 'static,
{
    /// Create a root node and run its `init`.
    pub fn root(task: impl Task<W>, cx: &mut TaskContext<'_, W>) -> Self {
        Self::root_boxed(Box::new(task), cx)
    }

    pub fn root_boxed(task: Box<dyn Task<W>>, cx: &mut TaskContext<'_, W>) -> Self {
        let mut node = Self::new(cx.next_id(), task);
        node.init(cx);
        node
    }

    fn new(id: TaskId, task: Box<dyn Task<W>>) -> Self {
        Self {
            id,
            task,
            status: TaskStatus::Unresolved,
            children: Vec::new(),
            history: ProgressHistory::new(),
            initialized: false,
            cleaned: false,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn kind(&self) -> &'static str {
        self.task.kind()
    }

    pub fn status(&self) -> &TaskStatus {
        &self.status
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn task(&self) -> &dyn Task<W> {
        self.task.as_ref()
    }

    pub fn history(&self) -> &ProgressHistory {
        &self.history
    }

    pub fn children(&self) -> impl Iterator<Item = &TaskNode<W>> {
        self.children.iter().map(|c| &c.node)
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Advance this node (and, recursively, its children) by one turn. No-op once terminal.
    pub fn scheduling_pass(&mut self, cx: &mut TaskContext<'_, W>) {
        if self.is_terminal() {
            return;
        }
        if self.history.is_cycling() {
            self.fail_stuck(cx);
            return;
        }

        // Children resolved in an earlier pass were fully handled then.
        self.children.retain(|c| !c.node.is_terminal());

        match self.task.composition() {
            Composition::Sequential => self.sequential_pass(cx),
            Composition::Parallel => self.parallel_pass(cx),
        }
    }

    fn sequential_pass(&mut self, cx: &mut TaskContext<'_, W>) {
        let pending = self.children.len();
        for i in 0..pending {
            self.children[i].node.scheduling_pass(cx);
            if !self.children[i].node.is_terminal() {
                return;
            }
            self.observe_child(i, cx);
            if self.is_terminal() {
                return;
            }
        }

        // A handler may have queued fresh children; they get their turn first.
        if self.children.iter().any(|c| !c.node.is_terminal()) {
            return;
        }

        self.run_step(cx);
    }

    fn parallel_pass(&mut self, cx: &mut TaskContext<'_, W>) {
        let pending = self.children.len();
        for i in 0..pending {
            if self.children[i].node.is_terminal() {
                continue;
            }
            self.children[i].node.scheduling_pass(cx);
            if self.children[i].node.is_terminal() {
                self.observe_child(i, cx);
                if self.is_terminal() {
                    return;
                }
            }
        }

        if self.children.iter().all(|c| c.node.is_terminal()) {
            self.resolve(TaskStatus::Completed, cx);
        }
    }

    fn init(&mut self, cx: &mut TaskContext<'_, W>) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        let step = self.task.init(cx);
        self.attach_spawned(cx);
        self.apply(step, cx);
    }

    fn run_step(&mut self, cx: &mut TaskContext<'_, W>) {
        let step = self.task.step(cx);
        self.attach_spawned(cx);
        self.apply(step, cx);
        if self.is_terminal() {
            return;
        }

        if let Some(fingerprint) = self.task.progress_state(&*cx.world) {
            self.history.push(fingerprint);
            if self.history.is_cycling() {
                self.fail_stuck(cx);
            }
        }
    }

    fn apply(&mut self, step: Step, cx: &mut TaskContext<'_, W>) {
        if self.is_terminal() {
            return;
        }
        match step {
            Step::Pending => {}
            Step::Complete => self.resolve(TaskStatus::Completed, cx),
            Step::Fail(reason) => self.resolve(TaskStatus::Failed(reason), cx),
        }
    }

    fn attach_spawned(&mut self, cx: &mut TaskContext<'_, W>) {
        let pending = cx.take_spawned();
        if self.is_terminal() {
            return;
        }

        for PendingChild { task, handlers } in pending {
            let mut node = TaskNode::new(cx.next_id(), task);
            node.init(cx);
            let resolved = node.is_terminal();
            self.children.push(Child {
                node,
                handlers,
                reported: false,
            });

            if resolved {
                let idx = self.children.len() - 1;
                self.observe_child(idx, cx);
                if self.is_terminal() {
                    return;
                }
            }
        }
    }

    /// Fire the child's handler, or fail this node when an unhandled failure arrives.
    fn observe_child(&mut self, idx: usize, cx: &mut TaskContext<'_, W>) {
        if self.is_terminal() {
            return;
        }

        let (report, handlers) = {
            let child = &mut self.children[idx];
            let Some(outcome) = child.node.status.outcome() else {
                return;
            };
            if child.reported {
                return;
            }
            child.reported = true;
            let report = ChildReport {
                id: child.node.id,
                kind: child.node.kind(),
                outcome,
                produced: child.node.task.produced_unit(),
            };
            (report, child.handlers)
        };

        let key = match &report.outcome {
            Outcome::Completed => handlers.on_complete,
            Outcome::Failed(reason) => match handlers.on_fail {
                Some(key) => {
                    debug!(
                        task_id = %self.id,
                        child = %report.id,
                        %reason,
                        "child failure absorbed"
                    );
                    Some(key)
                }
                None => {
                    let breadcrumb = format!("{}: {}", report.kind, reason);
                    self.resolve(TaskStatus::Failed(breadcrumb), cx);
                    return;
                }
            },
        };

        if let Some(key) = key {
            self.task.handle(key, &report, cx);
            self.attach_spawned(cx);
        }
    }

    fn resolve(&mut self, status: TaskStatus, cx: &mut TaskContext<'_, W>) {
        if self.is_terminal() {
            return;
        }
        match &status {
            TaskStatus::Failed(reason) => {
                debug!(task_id = %self.id, kind = self.kind(), %reason, "task failed")
            }
            _ => debug!(task_id = %self.id, kind = self.kind(), "task completed"),
        }
        self.status = status;
        self.cleanup_branch(cx);
    }

    fn cleanup_branch(&mut self, cx: &mut TaskContext<'_, W>) {
        if !self.cleaned {
            self.cleaned = true;
            self.task.cleanup(cx);
            // Nothing may be started from a resolved branch.
            drop(cx.take_spawned());
        }
        for child in &mut self.children {
            child.node.cleanup_branch(cx);
        }
    }

    fn fail_stuck(&mut self, cx: &mut TaskContext<'_, W>) {
        warn!(
            task_id = %self.id,
            kind = self.kind(),
            turn = cx.turn.turn,
            history = ?self.history,
            "task stuck in cycle"
        );
        self.resolve(TaskStatus::Failed(STUCK_REASON.to_string()), cx);
    }

    /// Plain tree view for debugging tools.
    pub fn snapshot(&self) -> TaskSnapshot {
        TaskSnapshot {
            kind: self.kind().to_string(),
            id: self.id,
            status: self.status.as_str().to_string(),
            reason: self.status.reason().map(str::to_string),
            data: self.task.snapshot(),
            children: self.children.iter().map(|c| c.node.snapshot()).collect(),
        }
    }
}

impl<W> fmt::Debug for TaskNode<W>
where
    W: 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskNode")
            .field("id", &self.id)
            .field("kind", &self.kind())
            .field("status", &self.status)
            .field("children", &self.children.len())
            .finish()
    }
}
