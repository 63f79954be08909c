//! The command-card catalog.
//!
//! `CardKind` is a closed enum over the full catalog; round resolution
//! dispatches on it with an exhaustive match, so adding a card without a
//! handler fails to compile. `CommandCard` pairs a kind with a unique id so
//! individual copies can be tracked through hands, queues, and re-deals.

use serde::{Deserialize, Serialize};

/// Unique identifier for one physical card copy.
///
/// Allocated by `GameState`; ids stay unique across re-deals within a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Every card name in the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    MoveOne,
    MoveTwo,
    MoveThree,
    Impulse,
    Hesitate,
    Charge,
    Empower,
    Degrade,
    Deny,
    Rethink,
    Homage,
    Foresight,
    Inhibit,
    Interact,
    Gamble,
    HailMary,
    Reload,
    Buffer,
}

impl CardKind {
    /// The full catalog, in template order.
    pub const CATALOG: [CardKind; 18] = [
        CardKind::MoveOne,
        CardKind::MoveTwo,
        CardKind::MoveThree,
        CardKind::Impulse,
        CardKind::Hesitate,
        CardKind::Charge,
        CardKind::Empower,
        CardKind::Degrade,
        CardKind::Deny,
        CardKind::Rethink,
        CardKind::Homage,
        CardKind::Foresight,
        CardKind::Inhibit,
        CardKind::Interact,
        CardKind::Gamble,
        CardKind::HailMary,
        CardKind::Reload,
        CardKind::Buffer,
    ];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            CardKind::MoveOne => "Move 1",
            CardKind::MoveTwo => "Move 2",
            CardKind::MoveThree => "Move 3",
            CardKind::Impulse => "Impulse",
            CardKind::Hesitate => "Hesitate",
            CardKind::Charge => "Charge",
            CardKind::Empower => "Empower",
            CardKind::Degrade => "Degrade",
            CardKind::Deny => "Deny",
            CardKind::Rethink => "Rethink",
            CardKind::Homage => "Homage",
            CardKind::Foresight => "Foresight",
            CardKind::Inhibit => "Inhibit",
            CardKind::Interact => "Interact",
            CardKind::Gamble => "Gamble",
            CardKind::HailMary => "Hail Mary",
            CardKind::Reload => "Reload",
            CardKind::Buffer => "Buffer",
        }
    }

    /// Static effect description, suitable for a card face.
    #[must_use]
    pub const fn effect_text(self) -> &'static str {
        match self {
            CardKind::MoveOne => "Move the Harbinger with 1 movement point.",
            CardKind::MoveTwo => "Move the Harbinger with 2 movement points.",
            CardKind::MoveThree => "Move the Harbinger with 3 movement points.",
            CardKind::Impulse => "The Harbinger lurches to a random adjacent cell.",
            CardKind::Hesitate => "The next move loses 1 movement point.",
            CardKind::Charge => "The next move gains 1 movement point.",
            CardKind::Empower => "The next move gains 2 movement points.",
            CardKind::Degrade => "The next move loses 1 movement point.",
            CardKind::Deny => "The next action is denied outright.",
            CardKind::Rethink => "The previous action is declared undone.",
            CardKind::Homage => "Repeat the previous action as your own.",
            CardKind::Foresight => "Preemptively mirror whatever comes next.",
            CardKind::Inhibit => "The next Interact is suppressed.",
            CardKind::Interact => "Commune with whatever shares the Harbinger's cell.",
            CardKind::Gamble => "Every action still queued is redrawn from pooled hands.",
            CardKind::HailMary => "Reshuffle the deck; everyone draws a fresh hand.",
            CardKind::Reload => "Draw a fresh hand and immediately play from it at random.",
            CardKind::Buffer => "Do nothing, deliberately.",
        }
    }

    /// Movement-point budget for movement cards, `None` otherwise.
    #[must_use]
    pub const fn move_points(self) -> Option<i32> {
        match self {
            CardKind::MoveOne => Some(1),
            CardKind::MoveTwo => Some(2),
            CardKind::MoveThree => Some(3),
            _ => None,
        }
    }

    /// Whether this card denies or cancels another action (triggers the
    /// Instigator bonus).
    #[must_use]
    pub const fn is_cancellation(self) -> bool {
        matches!(self, CardKind::Deny | CardKind::Rethink | CardKind::Gamble)
    }
}

impl std::fmt::Display for CardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One physical card copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommandCard {
    pub id: CardId,
    pub kind: CardKind,
}

impl CommandCard {
    /// Create a card copy.
    #[must_use]
    pub const fn new(id: CardId, kind: CardKind) -> Self {
        Self { id, kind }
    }
}

impl std::fmt::Display for CommandCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.kind.name())
    }
}
