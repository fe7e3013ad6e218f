//! The player-facing collaborator seam.
//!
//! The host game engine owns sessions, spell books and message transport;
//! the talent runtime only ever touches them through [`PlayerLink`]. Tests
//! drive the runtime with [`RecordingLink`].

use std::sync::Mutex;
use std::sync::atomic::{AtomicU8, Ordering};

use talent_core::types::{CharacterId, SpellId};

use crate::router::Topic;

/// Host-engine surface for one connected player.
pub trait PlayerLink {
    /// Stable id of the player's character.
    fn character(&self) -> CharacterId;

    /// Current character level.
    fn level(&self) -> u8;

    /// Pushes a serialized payload to the remote UI.
    fn send(&self, topic: Topic, payload: &str);

    /// Grants a spell to the character's spell book.
    fn learn_spell(&self, spell: SpellId);

    /// Removes a spell from the character's spell book.
    fn remove_spell(&self, spell: SpellId);
}

/// In-memory [`PlayerLink`] that records every interaction, for tests.
pub struct RecordingLink {
    character: CharacterId,
    level: AtomicU8,
    sent: Mutex<Vec<(Topic, String)>>,
    learned: Mutex<Vec<SpellId>>,
    removed: Mutex<Vec<SpellId>>,
}

impl RecordingLink {
    pub fn new(character: CharacterId, level: u8) -> Self {
        Self {
            character,
            level: AtomicU8::new(level),
            sent: Mutex::new(Vec::new()),
            learned: Mutex::new(Vec::new()),
            removed: Mutex::new(Vec::new()),
        }
    }

    pub fn set_level(&self, level: u8) {
        self.level.store(level, Ordering::Relaxed);
    }

    /// Every payload sent so far, in order.
    pub fn sent(&self) -> Vec<(Topic, String)> {
        self.sent.lock().unwrap().clone()
    }

    /// Payloads sent on one topic, in order.
    pub fn sent_on(&self, topic: Topic) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|(sent_topic, _)| *sent_topic == topic)
            .map(|(_, payload)| payload.clone())
            .collect()
    }

    pub fn learned(&self) -> Vec<SpellId> {
        self.learned.lock().unwrap().clone()
    }

    pub fn removed(&self) -> Vec<SpellId> {
        self.removed.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
        self.learned.lock().unwrap().clear();
        self.removed.lock().unwrap().clear();
    }
}

impl PlayerLink for RecordingLink {
    fn character(&self) -> CharacterId {
        self.character
    }

    fn level(&self) -> u8 {
        self.level.load(Ordering::Relaxed)
    }

    fn send(&self, topic: Topic, payload: &str) {
        self.sent.lock().unwrap().push((topic, payload.to_owned()));
    }

    fn learn_spell(&self, spell: SpellId) {
        self.learned.lock().unwrap().push(spell);
    }

    fn remove_spell(&self, spell: SpellId) {
        self.removed.lock().unwrap().push(spell);
    }
}
