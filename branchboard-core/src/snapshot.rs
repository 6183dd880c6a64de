//! The persisted aggregate and its forward-compatible merge.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::character::Character;
use crate::tasks::Task;

/// Single durable key under which the snapshot is stored.
pub const SETTINGS_KEY: &str = "rpgSettings";

/// World section of the snapshot. Fields a newer build may have written
/// are captured in `extra` and survive a save untouched; `branchName`,
/// `witness`, `chaos` and `tasks` are always rewritten from live state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldSnapshot {
    #[serde(default)]
    pub branch_name: String,
    #[serde(default)]
    pub witness: u32,
    #[serde(default)]
    pub chaos: u32,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The full serializable aggregate: characters plus world (which owns the
/// task list on the wire, as the original format did).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub chars: Vec<Character>,
    #[serde(default)]
    pub world: WorldSnapshot,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Snapshot {
    /// Merge this live snapshot over the previously stored one.
    ///
    /// Unknown top-level and world-level fields from the stored entry are
    /// preserved; anything the live state owns wins. This keeps saves from
    /// clobbering data written by components this build does not carry.
    #[must_use]
    pub fn merged_over(mut self, existing: Option<Snapshot>) -> Self {
        if let Some(prev) = existing {
            let mut extra = prev.extra;
            extra.extend(self.extra);
            self.extra = extra;

            let mut world_extra = prev.world.extra;
            world_extra.extend(self.world.extra);
            self.world.extra = world_extra;
        }
        self
    }
}
