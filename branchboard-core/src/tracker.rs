//! The tracker ties the registries, the durable store and the effect sink
//! together: every mutation recomputes what it must, snapshots the whole
//! state and pushes the updated scalars out.

use serde_json::Value;

use crate::character::{CharId, Character, Counter};
use crate::export::{AgentExport, agent_file_name};
use crate::registry::{CharacterRegistry, Field};
use crate::snapshot::{Snapshot, WorldSnapshot};
use crate::tasks::{TaskKind, TaskMode, TaskRegistry};
use crate::world::World;
use crate::{EffectSink, SettingsStore};

/// Failures surfaced to the user when applying an imported file.
/// Routine saves never raise; import is the one user-visible error path.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("settings file must contain a JSON object")]
    NotAnObject,
    #[error("not a single-agent export (kind: {0:?})")]
    UnsupportedKind(String),
    #[error("character roster is full")]
    RosterFull,
    #[error("storage write failed: {0}")]
    Store(String),
}

/// Main aggregate for a running board.
///
/// All mutation funnels through here so the sequence is always the same:
/// mutate fully, then snapshot, then signal. A snapshot is never taken
/// mid-mutation, which is what keeps the durable entry consistent.
#[derive(Debug, Clone)]
pub struct Tracker<S, F>
where
    S: SettingsStore,
    F: EffectSink,
{
    store: S,
    effects: F,
    characters: CharacterRegistry,
    tasks: TaskRegistry,
    world: World,
}

impl<S, F> Tracker<S, F>
where
    S: SettingsStore,
    F: EffectSink,
{
    /// Create an empty tracker over the provided store and effect sink.
    pub fn new(store: S, effects: F) -> Self {
        Self {
            store,
            effects,
            characters: CharacterRegistry::new(),
            tasks: TaskRegistry::new(),
            world: World::new(),
        }
    }

    #[must_use]
    pub fn characters(&self) -> &CharacterRegistry {
        &self.characters
    }

    #[must_use]
    pub fn tasks(&self) -> &TaskRegistry {
        &self.tasks
    }

    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Hydrate from the durable entry. Returns whether a snapshot was
    /// found; absence and malformed data both leave the defaults in place.
    pub fn restore(&mut self) -> bool {
        match self.store.load() {
            Ok(Some(snapshot)) => {
                self.apply_snapshot(snapshot);
                true
            }
            Ok(None) => false,
            Err(err) => {
                log::warn!("settings restore failed: {err}");
                false
            }
        }
    }

    /// Replace all live state with the given snapshot and re-emit the
    /// effect scalars so collaborators catch up.
    pub fn apply_snapshot(&mut self, snapshot: Snapshot) {
        let Snapshot { chars, world, .. } = snapshot;
        self.characters.hydrate(chars);
        self.tasks.hydrate(world.tasks);
        self.world = World {
            branch_name: world.branch_name,
            witness: world.witness,
            chaos: world.chaos,
        };
        self.effects.chaos_level(self.world.chaos);
        self.effects.witness_level(self.world.witness, false);
    }

    /// Serialize the live registries into the aggregate wire shape.
    #[must_use]
    pub fn live_snapshot(&self) -> Snapshot {
        Snapshot {
            chars: self.characters.to_cards(),
            world: WorldSnapshot {
                branch_name: self.world.branch_name.clone(),
                witness: self.world.witness,
                chaos: self.world.chaos,
                tasks: self.tasks.to_tasks(),
                extra: serde_json::Map::new(),
            },
            extra: serde_json::Map::new(),
        }
    }

    /// Snapshot the live state, merge it over the stored entry and write
    /// it back. Fire-and-forget: failures are logged and swallowed, as
    /// routine saves have no caller that could act on them.
    pub fn persist(&self) {
        let existing = match self.store.load() {
            Ok(existing) => existing,
            Err(err) => {
                log::warn!("settings read-before-save failed: {err}");
                None
            }
        };
        let snapshot = self.live_snapshot().merged_over(existing);
        if let Err(err) = self.store.save(&snapshot) {
            log::error!("settings save failed: {err}");
        }
    }

    // ----- characters -----

    /// Add a character card; `None` when the roster is at capacity.
    pub fn add_character(&mut self, seed: Character) -> Option<CharId> {
        let id = self.characters.add(seed)?;
        self.persist();
        Some(id)
    }

    pub fn remove_character(&mut self, id: CharId) -> bool {
        let removed = self.characters.remove(id);
        if removed {
            self.persist();
        }
        removed
    }

    /// Bump merit or demerit by +/-1 (or any delta), floored at zero.
    pub fn adjust_counter(&mut self, id: CharId, which: Counter, delta: i32) -> Option<u32> {
        let value = self.characters.adjust_counter(id, which, delta)?;
        self.persist();
        Some(value)
    }

    pub fn set_field(&mut self, id: CharId, field: Field) -> bool {
        let applied = self.characters.set_field(id, field);
        if applied {
            self.persist();
        }
        applied
    }

    pub fn toggle_dead(&mut self, id: CharId) -> Option<bool> {
        let dead = self.characters.toggle_dead(id)?;
        self.persist();
        Some(dead)
    }

    /// Zero out every card; one snapshot at the end, not one per card.
    pub fn reset_characters(&mut self) {
        self.characters.reset_all();
        self.persist();
    }

    // ----- tasks -----

    /// Create a task and return its id.
    pub fn create_task(&mut self, title: &str, kind: TaskKind, amount: i64, mode: TaskMode) -> String {
        let id = self.tasks.create(title, kind, amount, mode).id.clone();
        self.persist();
        id
    }

    pub fn delete_task(&mut self, id: &str) -> bool {
        let deleted = self.tasks.delete(id);
        if deleted {
            self.persist();
        }
        deleted
    }

    pub fn reset_tasks(&mut self) {
        self.tasks.reset();
        self.persist();
    }

    /// Run a task against a character: `amount` unit increments through
    /// the registry's counter op, one snapshot at the end. Silent no-op
    /// when the task is spent or the target does not exist. Returns
    /// whether anything was applied.
    pub fn execute_task(&mut self, task_id: &str, target: CharId) -> bool {
        let Some(task) = self.tasks.get(task_id) else {
            return false;
        };
        if task.is_inert() || !self.characters.contains(target) {
            return false;
        }
        let times = task.amount.max(1);
        let counter = task.kind.counter();
        let once = task.mode == TaskMode::Once;

        for _ in 0..times {
            self.characters.adjust_counter(target, counter, 1);
        }
        if once {
            self.tasks.mark_used(task_id);
        }
        self.persist();
        true
    }

    // ----- world -----

    pub fn set_branch_name(&mut self, name: &str) {
        self.world.branch_name = name.to_string();
        self.persist();
    }

    pub fn increment_witness(&mut self) -> u32 {
        let value = self.world.increment_witness();
        self.persist();
        self.effects.witness_level(value, true);
        value
    }

    pub fn decrement_witness(&mut self) -> u32 {
        let value = self.world.decrement_witness();
        self.persist();
        self.effects.witness_level(value, false);
        value
    }

    pub fn increment_chaos(&mut self) -> u32 {
        let value = self.world.increment_chaos();
        self.persist();
        self.effects.chaos_level(value);
        value
    }

    pub fn decrement_chaos(&mut self) -> u32 {
        let value = self.world.decrement_chaos();
        self.persist();
        self.effects.chaos_level(value);
        value
    }

    // ----- export / import -----

    /// Serialize the durable entry for download. `None` signals failure to
    /// the caller (the one save-path error a call site checks).
    #[must_use]
    pub fn export_settings(&self) -> Option<String> {
        match self.store.load() {
            Ok(Some(snapshot)) => serde_json::to_string(&snapshot).ok(),
            Ok(None) => Some("{}".to_string()),
            Err(err) => {
                log::error!("settings export failed: {err}");
                None
            }
        }
    }

    /// Build the single-character download: `(file name, JSON payload)`.
    #[must_use]
    pub fn export_agent(&self, id: CharId, created_ms: i64) -> Option<(String, String)> {
        let character = self.characters.get(id)?.clone();
        let file_name = agent_file_name(&character.name);
        let payload = serde_json::to_string_pretty(&AgentExport::new(character, created_ms)).ok()?;
        Some((file_name, payload))
    }

    /// Apply a full-snapshot settings file: overwrite the durable entry,
    /// then rebuild the live registries from it. A file that fails
    /// validation leaves both the durable entry and the live state
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns an [`ImportError`] when the text is not valid JSON, not an
    /// object, or the overwrite fails.
    pub fn import_settings(&mut self, text: &str) -> Result<(), ImportError> {
        let value: Value = serde_json::from_str(text)?;
        if !value.is_object() {
            return Err(ImportError::NotAnObject);
        }
        let snapshot: Snapshot = serde_json::from_value(value)?;
        self.store
            .save(&snapshot)
            .map_err(|err| ImportError::Store(err.to_string()))?;
        self.apply_snapshot(snapshot);
        Ok(())
    }

    /// Append one character from a single-agent export file.
    ///
    /// # Errors
    ///
    /// Returns an [`ImportError`] for malformed payloads, an unknown
    /// `kind`, or a full roster.
    pub fn import_agent(&mut self, text: &str) -> Result<CharId, ImportError> {
        let export: AgentExport = serde_json::from_str(text)?;
        if !export.is_supported() {
            return Err(ImportError::UnsupportedKind(export.meta.kind));
        }
        self.add_character(export.character)
            .ok_or(ImportError::RosterFull)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NullSink;
    use std::cell::RefCell;
    use std::convert::Infallible;
    use std::rc::Rc;

    /// Stores the serialized entry like localStorage would; malformed
    /// content reads back as absent.
    #[derive(Clone, Default)]
    struct MemoryStore {
        slot: Rc<RefCell<Option<String>>>,
    }

    impl MemoryStore {
        fn raw(&self) -> Option<String> {
            self.slot.borrow().clone()
        }

        fn set_raw(&self, text: &str) {
            *self.slot.borrow_mut() = Some(text.to_string());
        }
    }

    impl SettingsStore for MemoryStore {
        type Error = Infallible;

        fn save(&self, snapshot: &Snapshot) -> Result<(), Self::Error> {
            let text = serde_json::to_string(snapshot).expect("snapshot serializes");
            *self.slot.borrow_mut() = Some(text);
            Ok(())
        }

        fn load(&self) -> Result<Option<Snapshot>, Self::Error> {
            Ok(self
                .slot
                .borrow()
                .as_deref()
                .and_then(|raw| serde_json::from_str(raw).ok()))
        }
    }

    #[derive(Clone, Default)]
    struct RecordingSink {
        chaos: Rc<RefCell<Vec<u32>>>,
        witness: Rc<RefCell<Vec<(u32, bool)>>>,
    }

    impl EffectSink for RecordingSink {
        fn chaos_level(&self, level: u32) {
            self.chaos.borrow_mut().push(level);
        }

        fn witness_level(&self, level: u32, rapid: bool) {
            self.witness.borrow_mut().push((level, rapid));
        }
    }

    fn tracker() -> Tracker<MemoryStore, NullSink> {
        Tracker::new(MemoryStore::default(), NullSink)
    }

    #[test]
    fn mutations_reach_the_store() {
        let store = MemoryStore::default();
        let mut board = Tracker::new(store.clone(), NullSink);
        let id = board.add_character(Character::named("Mark")).unwrap();
        board.adjust_counter(id, Counter::Merit, 1);

        let stored = store.load().unwrap().unwrap();
        assert_eq!(stored.chars.len(), 1);
        assert_eq!(stored.chars[0].merit, 1);
        assert_eq!(stored.chars[0].name, "Mark");
    }

    #[test]
    fn restore_then_snapshot_is_deep_equal() {
        let store = MemoryStore::default();
        store.set_raw(
            r#"{
                "chars": [{"name":"Helly","merit":2,"demerit":1}],
                "world": {"branchName":"MDR","witness":4,"chaos":7,
                          "tasks":[{"id":"task-1","title":"t","type":"merit","amount":2,"used":false,"mode":"infinite","icon":""}],
                          "palette":"teal"},
                "pageZoom": 1.25
            }"#,
        );
        let mut board = Tracker::new(store.clone(), NullSink);
        assert!(board.restore());
        board.persist();

        let stored = store.load().unwrap().unwrap();
        assert_eq!(stored.chars[0].name, "Helly");
        assert_eq!(stored.world.branch_name, "MDR");
        assert_eq!(stored.world.witness, 4);
        assert_eq!(stored.world.tasks.len(), 1);
        // fields this build does not own survive the save
        assert_eq!(stored.world.extra["palette"], "teal");
        assert_eq!(stored.extra["pageZoom"], 1.25);
    }

    #[test]
    fn malformed_stored_entry_is_treated_as_absent() {
        let store = MemoryStore::default();
        store.set_raw("{not json");
        let mut board = Tracker::new(store, NullSink);
        assert!(!board.restore());
        assert!(board.characters().is_empty());
    }

    #[test]
    fn once_task_applies_exactly_once() {
        let mut board = tracker();
        let id = board.add_character(Character::default()).unwrap();
        board.adjust_counter(id, Counter::Merit, 2);
        let task = board.create_task("Clean desk", TaskKind::Merit, 3, TaskMode::Once);

        assert!(board.execute_task(&task, id));
        assert_eq!(board.characters().get(id).unwrap().merit, 5);
        assert!(board.tasks().get(&task).unwrap().used);

        assert!(!board.execute_task(&task, id));
        assert_eq!(board.characters().get(id).unwrap().merit, 5);
        assert!(board.tasks().get(&task).unwrap().used);
    }

    #[test]
    fn infinite_task_never_goes_inert() {
        let mut board = tracker();
        let id = board.add_character(Character::default()).unwrap();
        let task = board.create_task("Praise", TaskKind::Merit, 2, TaskMode::Infinite);
        assert!(board.execute_task(&task, id));
        assert!(board.execute_task(&task, id));
        assert_eq!(board.characters().get(id).unwrap().merit, 4);
        assert!(!board.tasks().get(&task).unwrap().used);
    }

    #[test]
    fn task_against_missing_character_is_a_noop() {
        let mut board = tracker();
        let id = board.add_character(Character::default()).unwrap();
        let task = board.create_task("Ghost", TaskKind::Demerit, 1, TaskMode::Once);
        board.remove_character(id);
        assert!(!board.execute_task(&task, id));
        // the no-op must not consume the once-task
        assert!(!board.tasks().get(&task).unwrap().used);
    }

    #[test]
    fn task_execution_updates_top_flags_once_at_the_end() {
        let mut board = tracker();
        let a = board.add_character(Character::default()).unwrap();
        let b = board.add_character(Character::default()).unwrap();
        board.adjust_counter(b, Counter::Merit, 2);
        assert_eq!(board.characters().top_merit(), Some(b));

        let task = board.create_task("Surge", TaskKind::Merit, 5, TaskMode::Infinite);
        board.execute_task(&task, a);
        assert_eq!(board.characters().top_merit(), Some(a));
    }

    #[test]
    fn world_signals_fire_after_persist() {
        let sink = RecordingSink::default();
        let mut board = Tracker::new(MemoryStore::default(), sink.clone());
        board.increment_witness();
        board.increment_witness();
        board.decrement_witness();
        board.increment_chaos();

        assert_eq!(
            *sink.witness.borrow(),
            vec![(1, true), (2, true), (1, false)]
        );
        assert_eq!(*sink.chaos.borrow(), vec![1]);
        assert_eq!(board.world().witness, 1);
        assert_eq!(board.world().chaos, 1);
    }

    #[test]
    fn import_rejects_non_objects_without_touching_state() {
        let store = MemoryStore::default();
        let mut board = Tracker::new(store.clone(), NullSink);
        board.add_character(Character::named("Dylan"));
        let before = store.raw();

        assert!(matches!(
            board.import_settings("[1,2,3]"),
            Err(ImportError::NotAnObject)
        ));
        assert!(matches!(
            board.import_settings("{oops"),
            Err(ImportError::Json(_))
        ));
        assert_eq!(store.raw(), before);
        assert_eq!(board.characters().len(), 1);
        assert_eq!(board.characters().iter().next().unwrap().1.name, "Dylan");
    }

    #[test]
    fn import_overwrites_entry_and_live_state() {
        let store = MemoryStore::default();
        let mut board = Tracker::new(store.clone(), NullSink);
        board.add_character(Character::named("Old"));

        board
            .import_settings(r#"{"chars":[{"name":"New"}],"world":{"branchName":"O&D","witness":1,"chaos":2,"tasks":[]}}"#)
            .unwrap();

        assert_eq!(board.characters().len(), 1);
        assert_eq!(board.characters().iter().next().unwrap().1.name, "New");
        assert_eq!(board.world().branch_name, "O&D");
        let stored = store.load().unwrap().unwrap();
        assert_eq!(stored.chars[0].name, "New");
    }

    #[test]
    fn agent_import_appends_one_character() {
        let mut board = tracker();
        let (name, payload) = {
            let id = board.add_character(Character::named("Irving B")).unwrap();
            board.adjust_counter(id, Counter::Merit, 3);
            let out = board.export_agent(id, 1_756_400_000_000).unwrap();
            board.remove_character(id);
            out
        };
        assert_eq!(name, "Irving_B.agent.json");

        let id = board.import_agent(&payload).unwrap();
        let card = board.characters().get(id).unwrap();
        assert_eq!(card.name, "Irving B");
        assert_eq!(card.merit, 3);

        assert!(matches!(
            board.import_agent(r#"{"meta":{"kind":"roster","version":1,"created":0},"char":{}}"#),
            Err(ImportError::UnsupportedKind(_))
        ));
    }

    #[test]
    fn export_settings_reflects_the_durable_entry() {
        let store = MemoryStore::default();
        let mut board = Tracker::new(store, NullSink);
        assert_eq!(board.export_settings().as_deref(), Some("{}"));

        board.set_branch_name("Kier PE");
        let text = board.export_settings().unwrap();
        let snap: Snapshot = serde_json::from_str(&text).unwrap();
        assert_eq!(snap.world.branch_name, "Kier PE");
    }
}
