//! Task selection for a pricing request.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Sensitivity category, in the order the orchestrator evaluates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Equity spot (single names and baskets).
    Equity,
    /// Dividend curves.
    Dividend,
    /// Repo curves.
    Repo,
    /// FX spots.
    Fx,
    /// Overnight-indexed discounting curves.
    OisDiscounting,
    /// Forward-fixing (projection) curves.
    ForwardFixing,
    /// Libor discounting curves.
    LiborDiscounting,
}

impl Category {
    /// All categories in evaluation order.
    pub const ALL: [Category; 7] = [
        Category::Equity,
        Category::Dividend,
        Category::Repo,
        Category::Fx,
        Category::OisDiscounting,
        Category::ForwardFixing,
        Category::LiborDiscounting,
    ];

    /// The task that enables this category.
    #[must_use]
    pub fn task(&self) -> Task {
        match self {
            Self::Equity => Task::EquityDelta,
            Self::Dividend => Task::DividendDelta,
            Self::Repo => Task::RepoDelta,
            Self::Fx => Task::FxDelta,
            Self::OisDiscounting => Task::OisDelta,
            Self::ForwardFixing => Task::ForwardFixingDelta,
            Self::LiborDiscounting => Task::LiborDiscountingDelta,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A unit of work requested from the pricing engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Task {
    /// Base price only.
    Price,
    /// Equity spot delta.
    EquityDelta,
    /// Repo curve delta.
    RepoDelta,
    /// Dividend curve delta.
    DividendDelta,
    /// OIS discounting delta.
    OisDelta,
    /// FX delta.
    FxDelta,
    /// Forward-fixing curve delta.
    ForwardFixingDelta,
    /// Libor discounting delta.
    LiborDiscountingDelta,
    /// Everything above.
    All,
}

impl Task {
    /// The sensitivity category driven by this task, if any.
    #[must_use]
    pub fn category(&self) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.task() == *self)
    }
}

impl FromStr for Task {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let task = match s.to_ascii_lowercase().as_str() {
            "price" => Self::Price,
            "equitydelta" => Self::EquityDelta,
            "repodelta" => Self::RepoDelta,
            "dividenddelta" => Self::DividendDelta,
            "oisdelta" => Self::OisDelta,
            "fxdelta" => Self::FxDelta,
            "forwardfixingdelta" => Self::ForwardFixingDelta,
            "libordiscountingdelta" => Self::LiborDiscountingDelta,
            "all" => Self::All,
            _ => return Err(CoreError::UnknownTask(s.to_string())),
        };
        Ok(task)
    }
}

/// The set of tasks chosen for one pricing request.
///
/// [`Task::All`] expands to every category; the base price is always computed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSet {
    tasks: BTreeSet<Task>,
}

impl TaskSet {
    /// Price only.
    #[must_use]
    pub fn price_only() -> Self {
        Self::from_tasks([Task::Price])
    }

    /// Every task.
    #[must_use]
    pub fn all() -> Self {
        Self::from_tasks([Task::All])
    }

    /// Builds a set from tasks.
    pub fn from_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        Self {
            tasks: tasks.into_iter().collect(),
        }
    }

    /// Adds a task.
    #[must_use]
    pub fn with(mut self, task: Task) -> Self {
        self.tasks.insert(task);
        self
    }

    /// Returns true if the set contains the task (directly or through `All`).
    #[must_use]
    pub fn contains(&self, task: Task) -> bool {
        self.tasks.contains(&task) || self.tasks.contains(&Task::All)
    }

    /// Returns true if sensitivities of this category were requested.
    #[must_use]
    pub fn contains_category(&self, category: Category) -> bool {
        self.contains(category.task())
    }

    /// Requested categories in evaluation order.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL
            .into_iter()
            .filter(move |c| self.contains_category(*c))
    }
}
