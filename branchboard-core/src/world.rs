//! World-level counters consumed by the cosmetic effect collaborators.

/// Singleton world state: the branch label plus the witness and chaos
/// counters. Both counters clamp at zero on decrement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct World {
    pub branch_name: String,
    pub witness: u32,
    pub chaos: u32,
}

impl World {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_witness(&mut self) -> u32 {
        self.witness = self.witness.saturating_add(1);
        self.witness
    }

    pub fn decrement_witness(&mut self) -> u32 {
        self.witness = self.witness.saturating_sub(1);
        self.witness
    }

    pub fn increment_chaos(&mut self) -> u32 {
        self.chaos = self.chaos.saturating_add(1);
        self.chaos
    }

    pub fn decrement_chaos(&mut self) -> u32 {
        self.chaos = self.chaos.saturating_sub(1);
        self.chaos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_clamp_at_zero() {
        let mut world = World::new();
        assert_eq!(world.decrement_witness(), 0);
        assert_eq!(world.decrement_chaos(), 0);
        assert_eq!(world.increment_witness(), 1);
        assert_eq!(world.increment_chaos(), 1);
        assert_eq!(world.decrement_chaos(), 0);
        assert_eq!(world.decrement_chaos(), 0);
    }
}
