use serde::{Deserialize, Serialize};

use crate::{Position, config::StatLimits, inventory::Inventory};

/// The player's three bounded stats.
///
/// Higher hunger and thirst values mean the player is better fed and watered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub health: u32,
    pub hunger: u32,
    pub thirst: u32,
}

impl Stats {
    pub const fn new(health: u32, hunger: u32, thirst: u32) -> Self {
        Stats {
            health,
            hunger,
            thirst,
        }
    }
}

/// Adds `delta` to `value`, saturating to `[0, max]`.
fn clamp_add(value: u32, delta: i64, max: u32) -> u32 {
    (i64::from(value) + delta).clamp(0, i64::from(max)) as u32
}

/// Holds the state of the player within the current maze.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    position: Position,
    stats: Stats,
    limits: StatLimits,
    inventory: Inventory,
}

impl Player {
    /// Creates a player with an empty inventory. Stats above `limits` are clamped.
    pub fn new(position: Position, stats: Stats, limits: StatLimits) -> Self {
        let mut player = Player {
            position,
            stats,
            limits,
            inventory: Inventory::new(),
        };
        player.apply_stat_delta(0, 0, 0);
        player
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Moves the player without any bounds checking; callers validate the target first.
    pub fn move_by(&mut self, delta: (isize, isize)) {
        if let Some(target) = self.position.offset(delta) {
            self.position = target;
        }
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Applies the given deltas, clamping every stat to `[0, max]`.
    pub fn apply_stat_delta(&mut self, health: i64, hunger: i64, thirst: i64) {
        self.stats = Stats {
            health: clamp_add(self.stats.health, health, self.limits.health),
            hunger: clamp_add(self.stats.hunger, hunger, self.limits.hunger),
            thirst: clamp_add(self.stats.thirst, thirst, self.limits.thirst),
        };
    }

    pub fn is_dead(&self) -> bool {
        self.stats.health == 0
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> StatLimits {
        StatLimits {
            health: 10,
            hunger: 5,
            thirst: 5,
        }
    }

    #[test]
    fn deltas_saturate_at_both_ends() {
        let mut player = Player::new(Position::new(1, 1), Stats::new(5, 2, 4), limits());
        player.apply_stat_delta(100, -100, 1);
        assert_eq!(player.stats(), Stats::new(10, 0, 5));
        player.apply_stat_delta(-11, 0, -2);
        assert_eq!(player.stats(), Stats::new(0, 0, 3));
        assert!(player.is_dead());
    }

    #[test]
    fn construction_clamps_oversized_stats() {
        let player = Player::new(Position::new(0, 0), Stats::new(99, 99, 99), limits());
        assert_eq!(player.stats(), Stats::new(10, 5, 5));
    }

    #[test]
    fn move_by_shifts_position() {
        let mut player = Player::new(Position::new(2, 2), Stats::new(1, 1, 1), limits());
        player.move_by((-1, 0));
        player.move_by((0, 1));
        assert_eq!(player.position(), Position::new(1, 3));
    }
}
