use regent_core::{AssignmentRegistry, Order, SplitMix64, TurnContext};

use crate::{HandlerKey, Handlers, Task, TaskId};

/// Allocates stable task ids for one player.
#[derive(Debug, Default, Clone)]
pub struct TaskIds {
    next: u64,
}

impl TaskIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> TaskId {
        self.next = self.next.saturating_add(1);
        TaskId(self.next)
    }
}

/// A child requested during `init`/`step`/`handle`. Attached once the call returns.
pub struct PendingChild<W>
where
    W: 'static,
{
    pub(crate) task: Box<dyn Task<W>>,
    pub(crate) handlers: Handlers,
}

impl<W> PendingChild<W>
where
    W: 'static,
{
    pub fn on_complete(&mut self, key: HandlerKey) -> &mut Self {
        self.handlers.on_complete = Some(key);
        self
    }

    pub fn on_fail(&mut self, key: HandlerKey) -> &mut Self {
        self.handlers.on_fail = Some(key);
        self
    }
}

/// Everything a task may touch during one scheduling pass.
pub struct TaskContext<'a, W>
where
    W: 'static,
{
    pub turn: TurnContext,
    pub world: &'a mut W,
    pub registry: &'a mut AssignmentRegistry,
    orders: &'a mut Vec<Order<W>>,
    ids: &'a mut TaskIds,
    rng: &'a mut SplitMix64,
    pub(crate) spawned: Vec<PendingChild<W>>,
}

impl<'a, W> TaskContext<'a, W>
where
    W: 'static,
{
    pub fn new(
        turn: TurnContext,
        world: &'a mut W,
        registry: &'a mut AssignmentRegistry,
        orders: &'a mut Vec<Order<W>>,
        ids: &'a mut TaskIds,
        rng: &'a mut SplitMix64,
    ) -> Self {
        Self {
            turn,
            world,
            registry,
            orders,
            ids,
            rng,
            spawned: Vec::new(),
        }
    }

    /// Request a child. It is attached (and initialized) as soon as the current
    /// `init`/`step`/`handle` call returns.
    pub fn spawn(&mut self, task: impl Task<W>) -> &mut PendingChild<W> {
        self.spawn_boxed(Box::new(task))
    }

    pub fn spawn_boxed(&mut self, task: Box<dyn Task<W>>) -> &mut PendingChild<W> {
        self.spawned.push(PendingChild {
            task,
            handlers: Handlers::default(),
        });
        let last = self.spawned.len() - 1;
        &mut self.spawned[last]
    }

    /// Propose an order for this turn's arbitration.
    pub fn emit(&mut self, order: Order<W>) {
        self.orders.push(order);
    }

    pub fn rng(&mut self) -> &mut SplitMix64 {
        &mut *self.rng
    }

    pub(crate) fn next_id(&mut self) -> TaskId {
        self.ids.next_id()
    }

    pub(crate) fn take_spawned(&mut self) -> Vec<PendingChild<W>> {
        std::mem::take(&mut self.spawned)
    }
}
