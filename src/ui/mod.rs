//! UI plugin - configuration screen, live score, game over screen, and the flow between them.

use bevy::prelude::*;

use crate::game::{
    ConfigErrorText, ConfigField, ConfigForm, FieldText, GameOverUI, GamePhase, GameState,
    MenuUI, ScoreText, SessionEnded,
};
use crate::snake::{Session, SessionPhase};

/// Plugin for UI and game flow systems.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_system).add_systems(
            Update,
            (
                config_input,
                refresh_config_texts,
                abort_session,
                finish_session,
                spawn_game_over_screen_system,
                restart_game,
                update_score_text,
            )
                .chain(),
        );
    }
}

const TITLE_COLOR: Color = Color::srgb(0.1, 0.1, 0.1);
const TEXT_COLOR: Color = Color::srgb(0.15, 0.15, 0.15);
const HINT_COLOR: Color = Color::srgb(0.3, 0.3, 0.3);
const ERROR_COLOR: Color = Color::srgb(0.8, 0.0, 0.0);
const OVERLAY_COLOR: Color = Color::srgba(0.58, 0.58, 0.58, 0.95);

fn text_line(content: impl Into<String>, font_size: f32, color: Color, bottom: f32) -> impl Bundle {
    (
        Text::new(content),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(color),
        Node {
            margin: UiRect::bottom(Val::Px(bottom)),
            ..default()
        },
    )
}

fn screen_root(marker: impl Component) -> impl Bundle {
    (
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            align_items: AlignItems::Center,
            justify_content: JustifyContent::Center,
            flex_direction: FlexDirection::Column,
            ..default()
        },
        BackgroundColor(OVERLAY_COLOR),
        marker,
    )
}

/// Initial setup system - camera, score label, configuration screen.
fn setup_system(mut commands: Commands, game_state: Res<GameState>, form: Res<ConfigForm>) {
    commands.spawn(Camera2d);

    // Score label, empty outside a session
    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        TextColor(TEXT_COLOR),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
        ScoreText,
    ));

    if game_state.phase == GamePhase::Configuring {
        spawn_config_screen(&mut commands, &form);
    }
}

/// Text shown for one configuration field, with a focus marker.
fn field_line(form: &ConfigForm, field: ConfigField) -> String {
    let marker = if form.focus == field { ">" } else { " " };
    let value = match field {
        ConfigField::Width => format!("[{:<2}]", form.width),
        ConfigField::Height => format!("[{:<2}]", form.height),
        ConfigField::Speed => format!("< {} >", form.speed.title()),
    };
    format!("{marker} {}: {value}", field.label())
}

/// Spawns the configuration screen UI.
fn spawn_config_screen(commands: &mut Commands, form: &ConfigForm) {
    commands
        .spawn(screen_root(MenuUI))
        .with_children(|parent| {
            parent.spawn(text_line("Snake game", 48.0, TITLE_COLOR, 10.0));
            parent.spawn(text_line("Game options", 24.0, TEXT_COLOR, 25.0));

            // Editable fields
            for field in [ConfigField::Width, ConfigField::Height, ConfigField::Speed] {
                parent.spawn((
                    text_line(field_line(form, field), 20.0, TEXT_COLOR, 10.0),
                    FieldText(field),
                ));
            }

            // Validation message
            parent.spawn((
                text_line(form.error.clone().unwrap_or_default(), 18.0, ERROR_COLOR, 20.0),
                ConfigErrorText,
            ));

            // Key hints
            parent.spawn(text_line(
                "Tab or Up/Down: select field   Left/Right: change speed",
                16.0,
                HINT_COLOR,
                8.0,
            ));
            parent.spawn(text_line("Press ENTER: let's start", 22.0, TITLE_COLOR, 0.0));
        });
}

/// Spawns the game over screen UI.
fn spawn_game_over_screen(commands: &mut Commands, score: u32) {
    commands
        .spawn(screen_root(GameOverUI))
        .with_children(|parent| {
            parent.spawn(text_line("Game over!", 48.0, TITLE_COLOR, 20.0));
            parent.spawn(text_line(format!("You scored: {score}"), 30.0, TEXT_COLOR, 10.0));
            parent.spawn(text_line("Good Job!", 24.0, TEXT_COLOR, 30.0));

            // Restart prompt
            parent.spawn(text_line(
                "Press ENTER to do it again",
                20.0,
                HINT_COLOR,
                0.0,
            ));
        });
}

fn digit_for_key(key: KeyCode) -> Option<char> {
    let digit = match key {
        KeyCode::Digit0 | KeyCode::Numpad0 => '0',
        KeyCode::Digit1 | KeyCode::Numpad1 => '1',
        KeyCode::Digit2 | KeyCode::Numpad2 => '2',
        KeyCode::Digit3 | KeyCode::Numpad3 => '3',
        KeyCode::Digit4 | KeyCode::Numpad4 => '4',
        KeyCode::Digit5 | KeyCode::Numpad5 => '5',
        KeyCode::Digit6 | KeyCode::Numpad6 => '6',
        KeyCode::Digit7 | KeyCode::Numpad7 => '7',
        KeyCode::Digit8 | KeyCode::Numpad8 => '8',
        KeyCode::Digit9 | KeyCode::Numpad9 => '9',
        _ => return None,
    };
    Some(digit)
}

/// System to edit the configuration form and start a session on Enter.
fn config_input(
    mut commands: Commands,
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut game_state: ResMut<GameState>,
    mut form: ResMut<ConfigForm>,
    menu_ui: Query<Entity, With<MenuUI>>,
) {
    if game_state.phase != GamePhase::Configuring {
        return;
    }

    for key in keyboard_input.get_just_pressed() {
        match *key {
            KeyCode::Tab | KeyCode::ArrowDown => form.focus = form.focus.next(),
            KeyCode::ArrowUp => form.focus = form.focus.previous(),
            KeyCode::ArrowLeft if form.focus == ConfigField::Speed => form.cycle_speed(false),
            KeyCode::ArrowRight if form.focus == ConfigField::Speed => form.cycle_speed(true),
            KeyCode::Backspace => form.backspace(),
            other => {
                if let Some(digit) = digit_for_key(other) {
                    form.push_digit(digit);
                }
            }
        }
    }

    if !keyboard_input.any_just_pressed([KeyCode::Enter, KeyCode::NumpadEnter]) {
        return;
    }

    match form.submit() {
        Ok(config) => {
            form.error = None;
            for entity in menu_ui.iter() {
                commands.entity(entity).despawn();
            }

            let mut session = Session::new(config);
            session.start(&mut rand::rng());
            commands.insert_resource(session);
            game_state.begin(config);
        }
        Err(error) => {
            warn!("configuration rejected: {error}");
            form.error = Some(error.to_string());
        }
    }
}

/// System to mirror the configuration form into the screen texts.
fn refresh_config_texts(
    form: Res<ConfigForm>,
    mut fields: Query<(&FieldText, &mut Text), Without<ConfigErrorText>>,
    mut errors: Query<&mut Text, With<ConfigErrorText>>,
) {
    if !form.is_changed() {
        return;
    }

    for (field, mut text) in fields.iter_mut() {
        text.0 = field_line(&form, field.0);
    }
    for mut text in errors.iter_mut() {
        text.0 = form.error.clone().unwrap_or_default();
    }
}

/// System to tear the session down and go back to the configuration screen on Escape.
fn abort_session(
    mut commands: Commands,
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut game_state: ResMut<GameState>,
    session: Option<ResMut<Session>>,
    form: Res<ConfigForm>,
) {
    if game_state.phase != GamePhase::Playing || !keyboard_input.just_pressed(KeyCode::Escape) {
        return;
    }

    if let Some(mut session) = session
        && session.phase() == SessionPhase::Running
    {
        session.stop();
    }

    // Back to configuration
    commands.remove_resource::<Session>();
    game_state.restart();
    spawn_config_screen(&mut commands, &form);
}

/// System to receive the final score and leave the active screen.
fn finish_session(
    mut commands: Commands,
    mut ended_reader: MessageReader<SessionEnded>,
    mut game_state: ResMut<GameState>,
) {
    let Some(ended) = ended_reader.read().last() else {
        return;
    };
    if game_state.phase != GamePhase::Playing {
        return;
    }

    game_state.finish(ended.score);
    commands.remove_resource::<Session>();
}

/// System to spawn game over screen when game ends.
fn spawn_game_over_screen_system(
    mut commands: Commands,
    game_state: Res<GameState>,
    game_over_ui: Query<Entity, With<GameOverUI>>,
) {
    if game_state.is_changed()
        && game_state.phase == GamePhase::GameOver
        && game_over_ui.is_empty()
        && let Some(score) = game_state.final_score
    {
        spawn_game_over_screen(&mut commands, score);
    }
}

/// System to return from the game over screen to the configuration screen.
fn restart_game(
    mut commands: Commands,
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut game_state: ResMut<GameState>,
    mut form: ResMut<ConfigForm>,
    game_over_ui: Query<Entity, With<GameOverUI>>,
) {
    if game_state.phase != GamePhase::GameOver
        || !keyboard_input.any_just_pressed([KeyCode::Enter, KeyCode::NumpadEnter, KeyCode::Space])
    {
        return;
    }

    for entity in game_over_ui.iter() {
        commands.entity(entity).despawn();
    }

    game_state.restart();
    form.error = None;
    spawn_config_screen(&mut commands, &form);
}

/// System to update the score display.
fn update_score_text(session: Option<Res<Session>>, mut query: Query<&mut Text, With<ScoreText>>) {
    if let Ok(mut text) = query.single_mut() {
        text.0 = match session {
            Some(session) => format!("Score: {}", session.score()),
            None => String::new(),
        };
    }
}
