//! Plain structural tasks.

use crate::{Composition, Step, Task, TaskContext};

/// Runs its children one after another; completes once all have completed.
pub struct Sequence<W>
where
    W: 'static,
{
    queued: Vec<Box<dyn Task<W>>>,
}

impl<W> Sequence<W>
where
    W: 'static,
{
    pub fn new(children: Vec<Box<dyn Task<W>>>) -> Self {
        Self { queued: children }
    }
}

impl<W> Task<W> for Sequence<W>
where
    W: 'static,
{
    fn kind(&self) -> &'static str {
        "sequence"
    }

    fn init(&mut self, cx: &mut TaskContext<'_, W>) -> Step {
        for child in self.queued.drain(..) {
            cx.spawn_boxed(child);
        }
        Step::Pending
    }

    fn step(&mut self, _cx: &mut TaskContext<'_, W>) -> Step {
        Step::Complete
    }
}

/// Advances every child each pass; completes when all have resolved.
pub struct ParallelGroup<W>
where
    W: 'static,
{
    queued: Vec<Box<dyn Task<W>>>,
}

impl<W> ParallelGroup<W>
where
    W: 'static,
{
    pub fn new(children: Vec<Box<dyn Task<W>>>) -> Self {
        Self { queued: children }
    }
}

impl<W> Task<W> for ParallelGroup<W>
where
    W: 'static,
{
    fn kind(&self) -> &'static str {
        "parallel"
    }

    fn composition(&self) -> Composition {
        Composition::Parallel
    }

    fn init(&mut self, cx: &mut TaskContext<'_, W>) -> Step {
        if self.queued.is_empty() {
            return Step::Complete;
        }
        for child in self.queued.drain(..) {
            cx.spawn_boxed(child);
        }
        Step::Pending
    }

    fn step(&mut self, _cx: &mut TaskContext<'_, W>) -> Step {
        Step::Complete
    }
}
