//! Character registry: ordered roster, counter mutation, top-card scan.

use std::collections::HashMap;

use crate::character::{CharId, Character, Counter, PLACEHOLDER_ICON};

/// Hard cap on roster size; the add that would exceed it is a no-op.
pub const MAX_CHARS: usize = 41;

/// Editable character fields that do not feed the top-card scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Name(String),
    Anomaly(String),
    Reality(String),
    Competency(String),
    SessionMerit(u32),
    SessionDemerit(u32),
    Icon(String),
    PrimeDirective(String),
    EncouragedBehavior(String),
}

/// The set of character cards, addressed by stable id, rendered in
/// insertion order.
///
/// The unique-maximum holders for merit and demerit are recomputed by a
/// full rescan after every relevant mutation; there is no incremental
/// bookkeeping to drift out of sync.
#[derive(Debug, Clone, Default)]
pub struct CharacterRegistry {
    order: Vec<CharId>,
    by_id: HashMap<CharId, Character>,
    next_id: u64,
    top_merit: Option<CharId>,
    top_demerit: Option<CharId>,
}

impl CharacterRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: CharId) -> Option<&Character> {
        self.by_id.get(&id)
    }

    #[must_use]
    pub fn contains(&self, id: CharId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Cards in display order.
    pub fn iter(&self) -> impl Iterator<Item = (CharId, &Character)> {
        self.order
            .iter()
            .filter_map(move |id| self.by_id.get(id).map(|c| (*id, c)))
    }

    #[must_use]
    pub fn top_merit(&self) -> Option<CharId> {
        self.top_merit
    }

    #[must_use]
    pub fn top_demerit(&self) -> Option<CharId> {
        self.top_demerit
    }

    #[must_use]
    pub fn is_top_merit(&self, id: CharId) -> bool {
        self.top_merit == Some(id)
    }

    #[must_use]
    pub fn is_top_demerit(&self, id: CharId) -> bool {
        self.top_demerit == Some(id)
    }

    /// Add a card, rejecting silently once the roster is full.
    ///
    /// An empty icon is replaced with the placeholder so the stored
    /// snapshot always carries a renderable source.
    pub fn add(&mut self, mut seed: Character) -> Option<CharId> {
        if self.order.len() >= MAX_CHARS {
            return None;
        }
        if seed.icon.is_empty() {
            seed.icon = PLACEHOLDER_ICON.to_string();
        }
        let id = CharId(self.next_id);
        self.next_id += 1;
        self.order.push(id);
        self.by_id.insert(id, seed);
        self.recompute_top();
        Some(id)
    }

    pub fn remove(&mut self, id: CharId) -> bool {
        if self.by_id.remove(&id).is_none() {
            return false;
        }
        self.order.retain(|other| *other != id);
        self.recompute_top();
        true
    }

    /// Apply a +/- delta to a counter, flooring at zero. Returns the new
    /// value, or `None` when the card does not exist.
    pub fn adjust_counter(&mut self, id: CharId, which: Counter, delta: i32) -> Option<u32> {
        let card = self.by_id.get_mut(&id)?;
        let slot = card.counter_mut(which);
        *slot = slot.saturating_add_signed(delta);
        let value = *slot;
        self.recompute_top();
        Some(value)
    }

    /// Direct field write. Fields here never change merit/demerit, so no
    /// rescan is required.
    pub fn set_field(&mut self, id: CharId, field: Field) -> bool {
        let Some(card) = self.by_id.get_mut(&id) else {
            return false;
        };
        match field {
            Field::Name(v) => card.name = v,
            Field::Anomaly(v) => card.anomaly = v,
            Field::Reality(v) => card.reality = v,
            Field::Competency(v) => card.competency = v,
            Field::SessionMerit(v) => card.session_merit = v,
            Field::SessionDemerit(v) => card.session_demerit = v,
            Field::Icon(v) => card.icon = v,
            Field::PrimeDirective(v) => card.prime_directive = v,
            Field::EncouragedBehavior(v) => card.encouraged_behavior = v,
        }
        true
    }

    /// Flip the dead flag; dead state is cosmetic and does not feed the
    /// counter math, but the scan runs anyway to keep the visual
    /// classification pass in one place.
    pub fn toggle_dead(&mut self, id: CharId) -> Option<bool> {
        let card = self.by_id.get_mut(&id)?;
        card.dead = !card.dead;
        let dead = card.dead;
        self.recompute_top();
        Some(dead)
    }

    /// Full O(n) rescan for the unique maximum holders. A card is top for
    /// a category only when its count equals the category maximum, the
    /// maximum is strictly positive, and no other card ties it.
    pub fn recompute_top(&mut self) {
        let merit = Self::unique_max(self.iter().map(|(id, c)| (id, c.merit)));
        let demerit = Self::unique_max(self.iter().map(|(id, c)| (id, c.demerit)));
        self.top_merit = merit;
        self.top_demerit = demerit;
    }

    fn unique_max(values: impl Iterator<Item = (CharId, u32)>) -> Option<CharId> {
        let mut best: Option<(CharId, u32)> = None;
        let mut holders = 0usize;
        for (id, value) in values {
            match best {
                Some((_, top)) if value > top => {
                    best = Some((id, value));
                    holders = 1;
                }
                Some((_, top)) if value == top => holders += 1,
                None => {
                    best = Some((id, value));
                    holders = 1;
                }
                _ => {}
            }
        }
        match best {
            Some((id, top)) if top > 0 && holders == 1 => Some(id),
            _ => None,
        }
    }

    /// Zero every counter, clear text and dead flags, restore placeholder
    /// icons, and drop the top classification.
    pub fn reset_all(&mut self) {
        for card in self.by_id.values_mut() {
            card.merit = 0;
            card.demerit = 0;
            card.session_merit = 0;
            card.session_demerit = 0;
            card.name.clear();
            card.anomaly.clear();
            card.reality.clear();
            card.competency.clear();
            card.prime_directive.clear();
            card.encouraged_behavior.clear();
            card.dead = false;
            card.icon = PLACEHOLDER_ICON.to_string();
        }
        self.recompute_top();
    }

    /// Rebuild the roster from persisted cards, in order, assigning fresh
    /// ids. Entries past the roster cap are dropped.
    pub fn hydrate(&mut self, cards: Vec<Character>) {
        self.order.clear();
        self.by_id.clear();
        for card in cards {
            if self.add(card).is_none() {
                break;
            }
        }
    }

    /// Cards in display order, cloned for the snapshot.
    #[must_use]
    pub fn to_cards(&self) -> Vec<Character> {
        self.iter().map(|(_, c)| c.clone()).collect()
    }
}
