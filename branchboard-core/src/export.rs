//! File export payloads and download naming.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::character::Character;

/// `kind` discriminator carried by single-character export files.
pub const AGENT_KIND: &str = "single-agent";
/// Current single-character export format version.
pub const AGENT_VERSION: u32 = 1;

static UNSAFE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9._-]+").expect("static pattern compiles"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentMeta {
    pub kind: String,
    pub version: u32,
    /// Unix timestamp in milliseconds at export time.
    pub created: i64,
}

/// Wrapper for exporting one character on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentExport {
    pub meta: AgentMeta,
    #[serde(rename = "char")]
    pub character: Character,
}

impl AgentExport {
    #[must_use]
    pub fn new(character: Character, created_ms: i64) -> Self {
        Self {
            meta: AgentMeta {
                kind: AGENT_KIND.to_string(),
                version: AGENT_VERSION,
                created: created_ms,
            },
            character,
        }
    }

    /// Whether this payload is something we know how to import.
    #[must_use]
    pub fn is_supported(&self) -> bool {
        self.meta.kind == AGENT_KIND
    }
}

/// Default download name for the full settings file, e.g.
/// `rpgSettings-20260829-153000.json`. The stamp is caller-formatted
/// `YYYYMMDD-HHMMSS` so the core stays clock-free.
#[must_use]
pub fn settings_file_name(stamp: &str) -> String {
    format!("rpgSettings-{stamp}.json")
}

/// Download name for a single-character export: the character's name with
/// anything shell-hostile squashed to underscores, or `agent` when the
/// name is empty.
#[must_use]
pub fn agent_file_name(name: &str) -> String {
    let safe = UNSAFE_NAME.replace_all(name.trim(), "_");
    let safe = safe.trim_matches('_');
    if safe.is_empty() {
        "agent.agent.json".to_string()
    } else {
        format!("{safe}.agent.json")
    }
}
