//! Player identification and per-seat data storage.
//!
//! ## PlayerId
//!
//! Type-safe identifier for a seat at the table. The engine supports up to
//! 8 seats (bounded by the secret-identity list).
//!
//! ## PlayerMap
//!
//! Per-player storage backed by `Vec` for O(1) access, indexable by
//! `PlayerId`. Used for public summaries and private states alike.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Seat identifier, 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` seats.
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data with O(1) access.
///
/// ## Example
///
/// ```
/// use harbinger_engine::core::{PlayerId, PlayerMap};
///
/// let mut points: PlayerMap<i64> = PlayerMap::new(4, |_| 0);
/// points[PlayerId::new(1)] += 5;
/// assert_eq!(points[PlayerId::new(1)], 5);
/// assert_eq!(points[PlayerId::new(0)], 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new map with values from a factory function.
    ///
    /// The factory receives the `PlayerId` of each seat.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8)
            .map(|i| factory(PlayerId(i)))
            .collect();

        Self { data }
    }

    /// Create a map from a `Vec` whose index order is seat order.
    #[must_use]
    pub fn from_vec(data: Vec<T>) -> Self {
        assert!(!data.is_empty(), "Must have at least 1 player");
        assert!(data.len() <= 255, "At most 255 players supported");
        Self { data }
    }

    /// Get the number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over `(PlayerId, &T)` pairs in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over `(PlayerId, &mut T)` pairs in seat order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over all player IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        (0..self.data.len() as u8).map(PlayerId)
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        let p0 = PlayerId::new(0);
        assert_eq!(p0.index(), 0);
        assert_eq!(format!("{}", p0), "Player 0");

        let all: Vec<_> = PlayerId::all(3).collect();
        assert_eq!(all, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    }

    #[test]
    fn test_player_map_factory() {
        let map: PlayerMap<i64> = PlayerMap::new(4, |p| p.index() as i64 * 10);
        assert_eq!(map[PlayerId::new(0)], 0);
        assert_eq!(map[PlayerId::new(3)], 30);
        assert_eq!(map.player_count(), 4);
    }

    #[test]
    fn test_player_map_from_vec() {
        let map = PlayerMap::from_vec(vec!["a", "b", "c"]);
        assert_eq!(map[PlayerId::new(1)], "b");
        assert_eq!(map.player_count(), 3);
    }

    #[test]
    fn test_player_map_mutation_and_iter() {
        let mut map: PlayerMap<i64> = PlayerMap::new(2, |_| 0);
        map[PlayerId::new(1)] = 7;

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(PlayerId::new(0), &0), (PlayerId::new(1), &7)]);

        for (_, v) in map.iter_mut() {
            *v += 1;
        }
        assert_eq!(map[PlayerId::new(0)], 1);
        assert_eq!(map[PlayerId::new(1)], 8);
    }

    #[test]
    fn test_player_map_serialization() {
        let map: PlayerMap<i64> = PlayerMap::new(2, |p| p.index() as i64 + 1);
        let json = serde_json::to_string(&map).unwrap();
        let back: PlayerMap<i64> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, back);
    }

    #[test]
    #[should_panic(expected = "Must have at least 1 player")]
    fn test_player_map_zero_players() {
        let _: PlayerMap<i64> = PlayerMap::new(0, |_| 0);
    }
}
