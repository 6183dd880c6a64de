//! User-defined repeatable or one-shot actions against a character.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::character::Counter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Merit,
    Demerit,
}

impl TaskKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Merit => "merit",
            Self::Demerit => "demerit",
        }
    }

    /// Which character counter this task drives.
    #[must_use]
    pub const fn counter(self) -> Counter {
        match self {
            Self::Merit => Counter::Merit,
            Self::Demerit => Counter::Demerit,
        }
    }

    /// Badge shown on the task card.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Merit => "\u{1F44D}",
            Self::Demerit => "\u{1F44E}",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "merit" => Ok(Self::Merit),
            "demerit" => Ok(Self::Demerit),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskMode {
    Once,
    #[default]
    Infinite,
}

impl TaskMode {
    /// Lenient parse used for user input: anything that is not exactly
    /// `once` falls back to `infinite`.
    #[must_use]
    pub fn from_input(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("once") {
            Self::Once
        } else {
            Self::Infinite
        }
    }
}

fn default_amount() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: TaskKind,
    #[serde(default = "default_amount")]
    pub amount: u32,
    #[serde(default)]
    pub used: bool,
    #[serde(default)]
    pub mode: TaskMode,
    #[serde(default)]
    pub icon: String,
}

impl Task {
    /// A once-mode task that already ran is permanently inert.
    #[must_use]
    pub fn is_inert(&self) -> bool {
        self.mode == TaskMode::Once && self.used
    }
}

/// Owns the task list and id allocation.
#[derive(Debug, Clone, Default)]
pub struct TaskRegistry {
    tasks: Vec<Task>,
    next_seq: u64,
}

impl TaskRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Create a task. A non-positive amount becomes 1; mode parsing is
    /// the caller's concern (see [`TaskMode::from_input`]).
    pub fn create(&mut self, title: &str, kind: TaskKind, amount: i64, mode: TaskMode) -> &Task {
        let amount = u32::try_from(amount).ok().filter(|a| *a >= 1).unwrap_or(1);
        self.next_seq += 1;
        self.tasks.push(Task {
            id: format!("task-{}", self.next_seq),
            title: title.to_string(),
            kind,
            amount,
            used: false,
            mode,
            icon: kind.icon().to_string(),
        });
        self.tasks.last().expect("pushed above")
    }

    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    pub fn mark_used(&mut self, id: &str) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.used = true;
                true
            }
            None => false,
        }
    }

    pub fn reset(&mut self) {
        self.tasks.clear();
    }

    /// Replace the list with persisted tasks, advancing the id sequence
    /// past any numeric suffix already in use so future ids stay unique.
    pub fn hydrate(&mut self, tasks: Vec<Task>) {
        let high = tasks
            .iter()
            .filter_map(|t| t.id.strip_prefix("task-").and_then(|s| s.parse::<u64>().ok()))
            .max()
            .unwrap_or(0);
        self.next_seq = self.next_seq.max(high);
        self.tasks = tasks;
    }

    #[must_use]
    pub fn to_tasks(&self) -> Vec<Task> {
        self.tasks.clone()
    }
}
