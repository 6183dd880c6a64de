//! Yew-side state wrapper: one reducer over the core tracker.

use branchboard_core::{CharId, Character, Counter, Field, TaskKind, TaskMode, Tracker};
use std::rc::Rc;
use yew::prelude::*;

use crate::dom;
use crate::effects::DomEffectSink;
use crate::storage::LocalSettingsStore;

pub type Board = Tracker<LocalSettingsStore, DomEffectSink>;

/// Every UI mutation, routed through a single reducer so the
/// mutate -> snapshot -> signal sequence always runs in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    AddCharacter,
    RemoveCharacter(CharId),
    AdjustCounter(CharId, Counter, i32),
    SetField(CharId, Field),
    ToggleDead(CharId),
    ResetCharacters,
    CreateTask {
        title: String,
        kind: TaskKind,
        amount: i64,
        mode: TaskMode,
    },
    DeleteTask(String),
    ExecuteTask {
        task_id: String,
        target: CharId,
    },
    ResetTasks,
    SetBranchName(String),
    IncrementWitness,
    DecrementWitness,
    IncrementChaos,
    DecrementChaos,
    /// Full-snapshot settings file contents.
    ApplySettings(String),
    /// Single-agent export file contents.
    ApplyAgent(String),
}

pub struct BoardState {
    pub board: Board,
}

impl BoardState {
    /// Build the tracker and hydrate it from localStorage.
    #[must_use]
    pub fn bootstrap() -> Self {
        let mut board = Tracker::new(LocalSettingsStore::new(), DomEffectSink::new());
        board.restore();
        Self { board }
    }
}

impl Reducible for BoardState {
    type Action = Action;

    fn reduce(self: Rc<Self>, action: Action) -> Rc<Self> {
        let mut board = self.board.clone();
        match action {
            Action::AddCharacter => {
                board.add_character(Character::default());
            }
            Action::RemoveCharacter(id) => {
                board.remove_character(id);
            }
            Action::AdjustCounter(id, which, delta) => {
                board.adjust_counter(id, which, delta);
            }
            Action::SetField(id, field) => {
                board.set_field(id, field);
            }
            Action::ToggleDead(id) => {
                board.toggle_dead(id);
            }
            Action::ResetCharacters => board.reset_characters(),
            Action::CreateTask {
                title,
                kind,
                amount,
                mode,
            } => {
                board.create_task(&title, kind, amount, mode);
            }
            Action::DeleteTask(id) => {
                board.delete_task(&id);
            }
            Action::ExecuteTask { task_id, target } => {
                board.execute_task(&task_id, target);
            }
            Action::ResetTasks => board.reset_tasks(),
            Action::SetBranchName(name) => board.set_branch_name(&name),
            Action::IncrementWitness => {
                board.increment_witness();
            }
            Action::DecrementWitness => {
                board.decrement_witness();
            }
            Action::IncrementChaos => {
                board.increment_chaos();
            }
            Action::DecrementChaos => {
                board.decrement_chaos();
            }
            Action::ApplySettings(text) => {
                if let Err(err) = board.import_settings(&text) {
                    dom::alert(&format!("Failed to load settings file: {err}"));
                }
            }
            Action::ApplyAgent(text) => {
                if let Err(err) = board.import_agent(&text) {
                    dom::alert(&format!("Failed to import character: {err}"));
                }
            }
        }
        Rc::new(Self { board })
    }
}
