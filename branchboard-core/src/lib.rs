//! Branchboard state engine
//!
//! Platform-agnostic state and persistence model for the Branchboard
//! character tracker. This crate owns the character roster, the task list,
//! the world counters and the snapshot merge protocol; rendering, audio
//! and the actual storage backend live behind the trait seams below.

pub mod character;
pub mod export;
pub mod registry;
pub mod snapshot;
pub mod tasks;
pub mod tracker;
pub mod world;

// Re-export commonly used types
pub use character::{CharId, Character, Counter, PLACEHOLDER_ICON, Tint};
pub use export::{
    AGENT_KIND, AGENT_VERSION, AgentExport, AgentMeta, agent_file_name, settings_file_name,
};
pub use registry::{CharacterRegistry, Field, MAX_CHARS};
pub use snapshot::{SETTINGS_KEY, Snapshot, WorldSnapshot};
pub use tasks::{Task, TaskKind, TaskMode, TaskRegistry};
pub use tracker::{ImportError, Tracker};
pub use world::World;

/// Trait for abstracting the durable settings entry.
/// Platform-specific implementations should provide this.
///
/// A malformed stored entry is the implementation's problem to absorb:
/// `load` returns `Ok(None)` for missing *and* unparsable data, and only
/// errors when the storage layer itself fails.
pub trait SettingsStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Overwrite the durable entry with this snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be written.
    fn save(&self, snapshot: &Snapshot) -> Result<(), Self::Error>;

    /// Read and parse the durable entry, `None` when absent or malformed.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage layer cannot be reached.
    fn load(&self) -> Result<Option<Snapshot>, Self::Error>;
}

/// Receiver for the scalar signals that drive decorative rendering.
/// Fire-and-forget; implementations own their animation cadence.
pub trait EffectSink {
    fn chaos_level(&self, level: u32);
    /// `rapid` is true when the witness count just increased.
    fn witness_level(&self, level: u32, rapid: bool);
}

/// Sink that drops every signal; useful headless and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EffectSink for NullSink {
    fn chaos_level(&self, _level: u32) {}
    fn witness_level(&self, _level: u32, _rapid: bool) {}
}
