//! Room registry and player pairing.
//!
//! The transport layer keeps exactly one [`SessionManager`] and funnels
//! all intents for a room through it: matches are looked up by [`RoomId`]
//! and passed by reference into intent handlers, never captured in
//! module-wide state. Independent matches share no mutable state, so a
//! caller may process different rooms in parallel; intents for one room
//! must be serialized by the caller.

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::core::DiceRng;
use crate::game::Match;

/// Opaque room identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct RoomId(u64);

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "room_{}", self.0)
    }
}

/// Result of a player asking to play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JoinOutcome {
    /// No opponent yet; the player is queued.
    Waiting,
    /// Paired with a waiting opponent; a match was created.
    Paired {
        room: RoomId,
        white: String,
        black: String,
    },
}

/// Result of a player leaving: the opponent wins by forfeit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Forfeit {
    pub room: RoomId,
    pub winner: String,
}

/// Owns every live match, keyed by room.
#[derive(Debug)]
pub struct SessionManager {
    rooms: FxHashMap<RoomId, Match>,
    waiting: Vec<String>,
    next_room: u64,
    rng: DiceRng,
}

impl SessionManager {
    /// Create a manager; each match's dice RNG is forked from `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rooms: FxHashMap::default(),
            waiting: Vec::new(),
            next_room: 0,
            rng: DiceRng::new(seed),
        }
    }

    /// Queue `player`, or pair them with the longest-waiting player.
    ///
    /// The waiting player takes white and moves first. A player already
    /// queued is not queued twice.
    pub fn join(&mut self, player: impl Into<String>) -> JoinOutcome {
        let player = player.into();
        if let Some(pos) = self.waiting.iter().position(|w| w != &player) {
            let white = self.waiting.remove(pos);
            let room = RoomId(self.next_room);
            self.next_room += 1;

            let dice = self.rng.fork();
            self.rooms
                .insert(room, Match::with_rng(white.clone(), player.clone(), dice));
            JoinOutcome::Paired {
                room,
                white,
                black: player,
            }
        } else {
            if !self.waiting.contains(&player) {
                self.waiting.push(player);
            }
            JoinOutcome::Waiting
        }
    }

    /// Look up a room's match.
    #[must_use]
    pub fn get(&self, room: RoomId) -> Option<&Match> {
        self.rooms.get(&room)
    }

    /// Look up a room's match for an intent handler.
    pub fn get_mut(&mut self, room: RoomId) -> Option<&mut Match> {
        self.rooms.get_mut(&room)
    }

    /// The room a player is part of, if any.
    #[must_use]
    pub fn room_of(&self, player: &str) -> Option<RoomId> {
        self.rooms
            .iter()
            .find(|(_, m)| m.players().iter().any(|(_, p)| p == player))
            .map(|(&room, _)| room)
    }

    /// Tear down a finished room.
    pub fn remove(&mut self, room: RoomId) -> Option<Match> {
        self.rooms.remove(&room)
    }

    /// Handle a disconnect: drop the player from the queue, or tear down
    /// their room and report the opponent as forfeit winner.
    pub fn disconnect(&mut self, player: &str) -> Option<Forfeit> {
        self.waiting.retain(|w| w != player);

        let room = self.room_of(player)?;
        let m = self.rooms.remove(&room)?;
        let winner = m
            .players()
            .iter()
            .map(|(_, p)| p)
            .find(|p| p.as_str() != player)?
            .clone();
        Some(Forfeit { room, winner })
    }

    /// Number of live rooms.
    #[must_use]
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Number of queued players.
    #[must_use]
    pub fn waiting_count(&self) -> usize {
        self.waiting.len()
    }
}
