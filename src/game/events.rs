//! Game events (messages).

use bevy::prelude::*;

/// Message written once when a session ends on a fatal collision.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionEnded {
    pub score: u32,
}
