use std::{env::args, process::exit};

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sparselife::{config::USAGE, pos, Config, ConfigError, Game};

pub use view::View;
mod view;

/// logs go to stderr, silent below `warn` unless `RUST_LOG` says otherwise.
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}

pub fn main() -> Result<()> {
    init_logging();

    let config = match Config::from_args(args().skip(1)) {
        Ok(config) => config,
        Err(ConfigError::Help) => {
            let patterns: Vec<_> = Config::pattern_names().collect();
            println!("{USAGE}\n\npatterns: {}", patterns.join(", "));
            return Ok(());
        }
        Err(error) => {
            eprintln!("[error] {error}\n\n{USAGE}");
            exit(1);
        }
    };
    info!(
        rules = %config.rules,
        interval = ?config.tick_interval,
        pattern = config.pattern.name,
        "starting"
    );

    let mut game = Game::with_config(&config);
    config.pattern.place_on(game.world_mut(), pos!(0, 0));
    let focus = config.pattern.size().as_vec2() / 2.0;

    View::new(config.cell_pixel_size).run(&mut game, focus)
}
