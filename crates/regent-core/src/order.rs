use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Category used to partition conflicting proposals. Two orders only compete when both
/// their group and entity id match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum OrderGroup {
    Unit,
    City,
    CityProduce,
}

impl OrderGroup {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderGroup::Unit => "unit",
            OrderGroup::City => "city",
            OrderGroup::CityProduce => "city-produce",
        }
    }
}

/// Strategic emphasis an order is weighted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Focus {
    Expansion,
    Economy,
    Military,
}

pub type Effect<W> = Box<dyn FnOnce(&mut W)>;

/// A one-shot proposal for this turn only.
pub struct Order<W> {
    pub group: OrderGroup,
    pub entity_id: u32,
    pub focus: Option<Focus>,
    pub priority: f64,
    pub effect: Effect<W>,
}

impl<W> Order<W> {
    pub fn new(
        group: OrderGroup,
        entity_id: u32,
        priority: f64,
        effect: impl FnOnce(&mut W) + 'static,
    ) -> Self {
        Self {
            group,
            entity_id,
            focus: None,
            priority,
            effect: Box::new(effect),
        }
    }

    pub fn with_focus(mut self, focus: Focus) -> Self {
        self.focus = Some(focus);
        self
    }

    pub fn bucket(&self) -> (OrderGroup, u32) {
        (self.group, self.entity_id)
    }

    pub fn perform(self, world: &mut W) {
        (self.effect)(world);
    }
}

impl<W> fmt::Debug for Order<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Order")
            .field("group", &self.group)
            .field("entity_id", &self.entity_id)
            .field("focus", &self.focus)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}
