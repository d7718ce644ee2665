use regent_core::{AssignmentRegistry, Order, Priorities, SplitMix64, TurnContext};
use regent_tasks::Task;

/// Something a planner wants done: a one-turn order, or multi-turn work to root.
pub enum Proposal<W>
where
    W: 'static,
{
    Order(Order<W>),
    Task(Box<dyn Task<W>>),
}

impl<W> Proposal<W>
where
    W: 'static,
{
    pub fn task(task: impl Task<W>) -> Self {
        Proposal::Task(Box::new(task))
    }
}

impl<W> From<Order<W>> for Proposal<W>
where
    W: 'static,
{
    fn from(order: Order<W>) -> Self {
        Proposal::Order(order)
    }
}

pub struct PlanContext<'a, W> {
    pub turn: TurnContext,
    pub world: &'a W,
    pub registry: &'a mut AssignmentRegistry,
    pub priorities: &'a Priorities,
    pub rng: &'a mut SplitMix64,
}

/// A planning subsystem. Decides *what* to propose; the orchestrator decides what runs.
pub trait Planner<W>: 'static
where
    W: 'static,
{
    fn name(&self) -> &'static str;

    fn plan(&mut self, cx: &mut PlanContext<'_, W>) -> Vec<Proposal<W>>;
}
