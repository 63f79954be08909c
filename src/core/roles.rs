//! Hidden player alignments.
//!
//! Each player carries a role (broad alignment), a sub-role (scoring
//! specialization within that role), and a secret identity (a cosmetic
//! epithet bound 1:1 to a priority-track slot - distinct from the role).
//!
//! Sub-role scoring triggers are evaluated by the end-of-round pass, except
//! the Instigator bonus, which fires the moment a cancellation card is
//! played.

use serde::{Deserialize, Serialize};

/// Broad hidden alignment. Sampled uniformly at setup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Courts the Harbinger's arrival.
    Zealot,
    /// Stands watch against it.
    Warden,
    /// Follows their own map.
    Seeker,
}

impl Role {
    /// All roles, in sampling order.
    pub const ALL: [Role; 3] = [Role::Zealot, Role::Warden, Role::Seeker];

    /// The two sub-roles belonging to this role.
    #[must_use]
    pub const fn sub_roles(self) -> [SubRole; 2] {
        match self {
            Role::Zealot => [SubRole::Instigator, SubRole::Fanatic],
            Role::Warden => [SubRole::Sentinel, SubRole::Purist],
            Role::Seeker => [SubRole::Pilgrim, SubRole::Cartographer],
        }
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Role::Zealot => "Zealot",
            Role::Warden => "Warden",
            Role::Seeker => "Seeker",
        }
    }
}

/// Scoring specialization within a role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubRole {
    /// +5 VP whenever they play a denial or cancellation card.
    Instigator,
    /// +2 VP when the Harbinger ends the round on any named location.
    Fanatic,
    /// +2 VP when the Harbinger ends the round within one cell of the
    /// doomsday site.
    Sentinel,
    /// +1 VP for every round that ends with no active complications.
    Purist,
    /// Carries a personal pilgrimage; +3 VP and one station of progress when
    /// the Harbinger ends the round on the next station.
    Pilgrim,
    /// +1 VP when the Harbinger ends the round on the board rim.
    Cartographer,
}

impl SubRole {
    /// The role this sub-role belongs to.
    #[must_use]
    pub const fn role(self) -> Role {
        match self {
            SubRole::Instigator | SubRole::Fanatic => Role::Zealot,
            SubRole::Sentinel | SubRole::Purist => Role::Warden,
            SubRole::Pilgrim | SubRole::Cartographer => Role::Seeker,
        }
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            SubRole::Instigator => "Instigator",
            SubRole::Fanatic => "Fanatic",
            SubRole::Sentinel => "Sentinel",
            SubRole::Purist => "Purist",
            SubRole::Pilgrim => "Pilgrim",
            SubRole::Cartographer => "Cartographer",
        }
    }
}

/// Cosmetic epithet bound 1:1 to a priority-track slot.
///
/// Identities are assigned by shuffled seating order at setup and reveal
/// nothing about role or sub-role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SecretIdentity(pub u8);

impl SecretIdentity {
    /// The fixed epithet list; its length bounds the supported player count.
    pub const EPITHETS: [&'static str; 8] = [
        "the Raven",
        "the Lantern",
        "the Hollow",
        "the Vesper",
        "the Thorn",
        "the Gloam",
        "the Cinder",
        "the Shade",
    ];

    /// Display epithet for this identity.
    #[must_use]
    pub fn epithet(self) -> &'static str {
        Self::EPITHETS[self.0 as usize]
    }
}

/// A Pilgrim's ordered list of stations to lead the Harbinger through.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalGoal {
    /// Location names, visited in order.
    pub stations: Vec<String>,
    /// Index of the next unvisited station.
    pub progress: usize,
}

impl PersonalGoal {
    /// Create a goal with no progress.
    #[must_use]
    pub fn new(stations: Vec<String>) -> Self {
        Self {
            stations,
            progress: 0,
        }
    }

    /// The next station to reach, or `None` when the pilgrimage is done.
    #[must_use]
    pub fn next_station(&self) -> Option<&str> {
        self.stations.get(self.progress).map(String::as_str)
    }

    /// Mark the next station reached.
    pub fn advance(&mut self) {
        if self.progress < self.stations.len() {
            self.progress += 1;
        }
    }

    /// Check whether every station has been visited.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.progress >= self.stations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sub_roles_round_trip() {
        for role in Role::ALL {
            for sub in role.sub_roles() {
                assert_eq!(sub.role(), role);
            }
        }
    }

    #[test]
    fn test_identity_epithets_are_distinct() {
        let mut seen = std::collections::HashSet::new();
        for name in SecretIdentity::EPITHETS {
            assert!(seen.insert(name));
        }
        assert_eq!(SecretIdentity(0).epithet(), "the Raven");
    }

    #[test]
    fn test_goal_progress() {
        let mut goal = PersonalGoal::new(vec!["a".into(), "b".into()]);
        assert_eq!(goal.next_station(), Some("a"));
        assert!(!goal.is_complete());

        goal.advance();
        assert_eq!(goal.next_station(), Some("b"));

        goal.advance();
        assert_eq!(goal.next_station(), None);
        assert!(goal.is_complete());

        goal.advance();
        assert_eq!(goal.progress, 2);
    }
}
