use std::process;

use clap::Parser;
use kiss3d::window::Window;

use rust_orrery::config::{CliArgs, Config, ConfigError};
use rust_orrery::gui::Simulation;
use rust_orrery::logging::init_logging;

fn main() {
    let args = CliArgs::parse();

    let loaded = Config::load_or_default(args.config.as_deref()).map(|mut config| {
        config.apply_cli_overrides(&args);
        config
    });

    // Logging can only start once we know the level, so config errors are
    // reported right after
    let level = match (&loaded, &args.log_level) {
        (Ok(config), _) => config.debug.log_level.clone(),
        (Err(_), Some(level)) => level.clone(),
        (Err(_), None) => String::new(),
    };
    init_logging(&level);

    if let Err(err) = run(loaded, &args) {
        tracing::error!("{}", err);
        process::exit(1);
    }
}

fn run(loaded: Result<Config, ConfigError>, args: &CliArgs) -> Result<(), ConfigError> {
    let config = loaded?;
    let scene = config.validate()?;

    if let Some(path) = &args.write_config {
        return config.save(path);
    }

    let mut window =
        Window::new_with_size(&config.window.title, config.window.width, config.window.height);
    window.set_background_color(0.0, 0.0, 0.0);

    let simulation = Simulation::new(&config, scene, &window);
    window.render_loop(simulation);
    Ok(())
}
