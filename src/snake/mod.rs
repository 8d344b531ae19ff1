//! Snake plugin - feeds keyboard steering into the running session and advances it on its schedule.

mod session;

pub use session::*;

use bevy::prelude::*;

use crate::game::{Direction, SessionEnded};

/// Plugin for snake-related systems.
pub struct SnakePlugin;

impl Plugin for SnakePlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<SessionEnded>().add_systems(
            Update,
            (snake_steering, snake_tick)
                .chain()
                .run_if(session_is_ticking),
        );
    }
}

fn session_is_ticking(session: Option<Res<Session>>) -> bool {
    session.is_some_and(|session| session.is_ticking())
}

// Checked in this order; the first accepted turn in a frame wins.
const STEERING_KEYS: [KeyCode; 8] = [
    KeyCode::ArrowUp,
    KeyCode::ArrowDown,
    KeyCode::ArrowLeft,
    KeyCode::ArrowRight,
    KeyCode::KeyW,
    KeyCode::KeyS,
    KeyCode::KeyA,
    KeyCode::KeyD,
];

/// System to turn arrow/WASD presses into buffered direction changes.
fn snake_steering(keyboard_input: Res<ButtonInput<KeyCode>>, mut session: ResMut<Session>) {
    let accepted = STEERING_KEYS
        .into_iter()
        .filter(|key| keyboard_input.just_pressed(*key))
        .filter_map(Direction::from_key)
        .find(|direction| session.steer(*direction));

    if let Some(direction) = accepted {
        debug!("steering {direction:?}");
    }
}

/// System to run a tick when the session's interval has elapsed.
fn snake_tick(
    time: Res<Time>,
    mut session: ResMut<Session>,
    mut ended_writer: MessageWriter<SessionEnded>,
) {
    let mut rng = rand::rng();
    if let Some(score) = session.advance(time.delta(), &mut rng) {
        ended_writer.write(SessionEnded { score });
    }
}
