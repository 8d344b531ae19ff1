mod food;
mod game;
mod rendering;
mod snake;
mod ui;

use bevy::{
    log::{Level, LogPlugin},
    prelude::*,
    window::WindowResolution,
};
use bevy_vector_shapes::prelude::*;
use clap::Parser;

use game::{
    BACKGROUND_COLOR, CANVAS_SELECTOR, ConfigForm, DEFAULT_HEIGHT, DEFAULT_WIDTH, GameState,
    MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH, SpeedTier,
};
use rendering::RenderingPlugin;
use snake::SnakePlugin;
use ui::UiPlugin;

#[derive(Parser, Debug)]
#[command(name = "snake_canvas", about = "Snake on a 2D canvas")]
struct Cli {
    /// Initial field width in cells
    #[arg(long, default_value_t = DEFAULT_WIDTH.to_string())]
    width: String,

    /// Initial field height in cells
    #[arg(long, default_value_t = DEFAULT_HEIGHT.to_string())]
    height: String,

    /// Initial speed: slow, normal, fast or expert
    #[arg(long, default_value = "normal")]
    speed: String,

    /// Log game events at debug level
    #[arg(long)]
    verbose: bool,
}

impl Cli {
    fn config_form(&self) -> ConfigForm {
        if SpeedTier::from_name(&self.speed).is_none() {
            warn!("unknown speed {:?}, using normal", self.speed);
        }
        ConfigForm::new(
            &self.width,
            &self.height,
            SpeedTier::from_name_or_default(&self.speed),
        )
    }

    fn log_plugin(&self) -> LogPlugin {
        let crate_level = if self.verbose { "debug" } else { "info" };
        LogPlugin {
            level: Level::INFO,
            filter: format!("wgpu=error,naga=warn,{}={crate_level}", env!("CARGO_CRATE_NAME")),
            ..default()
        }
    }
}

fn main() {
    let cli = Cli::parse();

    App::new()
        .add_plugins((
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        resolution: WindowResolution::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT),
                        title: "Snake game".to_string(),
                        canvas: Some(CANVAS_SELECTOR.to_string()),
                        ..default()
                    }),
                    ..default()
                })
                .set(cli.log_plugin()),
            Shape2dPlugin::default(),
        ))
        .insert_resource(ClearColor(BACKGROUND_COLOR))
        .init_resource::<GameState>()
        .insert_resource(cli.config_form())
        .add_plugins((SnakePlugin, RenderingPlugin, UiPlugin))
        .run();
}
