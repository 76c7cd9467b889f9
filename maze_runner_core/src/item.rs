use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{config::ItemEffects, player::Player};

/// The kinds of collectible items a maze can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemKind {
    Coin,
    Potion,
    Honey,
    Apple,
    Water,
}

impl ItemKind {
    pub const ALL: [ItemKind; 5] = [
        ItemKind::Coin,
        ItemKind::Potion,
        ItemKind::Honey,
        ItemKind::Apple,
        ItemKind::Water,
    ];

    /// The character used for this item in level files.
    pub fn id(self) -> char {
        match self {
            ItemKind::Coin => 'C',
            ItemKind::Potion => 'M',
            ItemKind::Honey => 'H',
            ItemKind::Apple => 'A',
            ItemKind::Water => 'W',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<ItemKind> {
        ItemKind::ALL.into_iter().find(|kind| kind.id() == symbol)
    }

    pub fn name(self) -> &'static str {
        match self {
            ItemKind::Coin => "Coin",
            ItemKind::Potion => "Potion",
            ItemKind::Honey => "Honey",
            ItemKind::Apple => "Apple",
            ItemKind::Water => "Water",
        }
    }

    /// Currency is only counted, never applied.
    pub fn is_currency(self) -> bool {
        matches!(self, ItemKind::Coin)
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown item kind '{0}'")]
pub struct UnknownItemKind(pub String);

impl FromStr for ItemKind {
    type Err = UnknownItemKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownItemKind(s.to_string()))
    }
}

/// A single collectible placed in a maze or held in an inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    kind: ItemKind,
}

impl Item {
    pub fn new(kind: ItemKind) -> Self {
        Item { kind }
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn id(&self) -> char {
        self.kind.id()
    }

    /// Applies this item's effect to `player`. Effects saturate at the stat limits.
    pub fn apply(&self, player: &mut Player, effects: &ItemEffects) {
        let (health, hunger, thirst) = effects.delta_for(self.kind);
        player.apply_stat_delta(health, hunger, thirst);
    }
}

impl From<ItemKind> for Item {
    fn from(kind: ItemKind) -> Self {
        Item::new(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Position, StatLimits, Stats};

    fn player_with(stats: Stats) -> Player {
        Player::new(Position::new(0, 0), stats, StatLimits::default())
    }

    #[test]
    fn names_parse_case_insensitively() {
        assert_eq!("potion".parse::<ItemKind>(), Ok(ItemKind::Potion));
        assert_eq!(" Water ".parse::<ItemKind>(), Ok(ItemKind::Water));
        assert!("sword".parse::<ItemKind>().is_err());
    }

    #[test]
    fn potion_heals_up_to_the_cap() {
        let limits = StatLimits::default();
        let mut player = player_with(Stats::new(limits.health - 3, 10, 10));
        Item::new(ItemKind::Potion).apply(&mut player, &ItemEffects::default());
        assert_eq!(player.stats().health, limits.health);
    }

    #[test]
    fn food_and_water_restore_their_stat() {
        let effects = ItemEffects::default();
        let mut player = player_with(Stats::new(50, 10, 10));
        Item::new(ItemKind::Apple).apply(&mut player, &effects);
        Item::new(ItemKind::Water).apply(&mut player, &effects);
        assert_eq!(
            player.stats(),
            Stats::new(50, 10 + effects.apple, 10 + effects.water)
        );
    }

    #[test]
    fn coins_have_no_stat_effect() {
        let mut player = player_with(Stats::new(40, 20, 30));
        Item::new(ItemKind::Coin).apply(&mut player, &ItemEffects::default());
        assert_eq!(player.stats(), Stats::new(40, 20, 30));
    }
}
