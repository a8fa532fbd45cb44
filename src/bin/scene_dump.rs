use std::path::PathBuf;
use std::process;

use clap::Parser;

use rust_orrery::config::{Config, ConfigError};
use rust_orrery::logging::init_logging;
use rust_orrery::model::{
    Clock, FramePacer, ManualClock, NodeKind, SceneHierarchy, StepRenderer, WorldTransforms,
};

/// Runs the scene without a window and prints where everything ended up.
#[derive(Debug, Parser)]
struct Args {
    /// Path to a RON config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of steps to take before printing.
    #[arg(long, default_value_t = 1)]
    steps: u64,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, default_value = "warn")]
    log_level: String,
}

/// Keeps the transforms from the latest step.
struct LastStep(Option<WorldTransforms>);

impl StepRenderer for LastStep {
    fn submit(&mut self, transforms: &WorldTransforms) {
        self.0 = Some(transforms.clone());
    }
}

fn main() {
    let args = Args::parse();
    init_logging(&args.log_level);

    if let Err(err) = run(&args) {
        tracing::error!("{}", err);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), ConfigError> {
    let config = Config::load_or_default(args.config.as_deref())?;
    let mut scene = config.validate()?;

    // Drive the same pacer the window uses, with a clock that jumps just past
    // the interval every poll
    let clock = ManualClock::new(0.0);
    let interval = config.pacing.update_interval_seconds;
    let mut pacer = FramePacer::new(interval, config.pacing.step_size, clock.now());
    let mut last = LastStep(None);
    while pacer.steps_taken() < args.steps {
        clock.advance_by(interval * 1.5 + 1e-9);
        pacer.poll(&clock, &mut scene, &mut last);
    }

    let transforms = last
        .0
        .unwrap_or_else(|| scene.compute_world_transforms());
    print_scene(&scene, &transforms, pacer.steps_taken());
    Ok(())
}

fn print_scene(scene: &SceneHierarchy, transforms: &WorldTransforms, steps: u64) {
    println!("Scene after {} steps", steps);
    for body in scene.bodies() {
        let position = transforms.position(body.id);
        let parent = match body.params.parent {
            Some(id) => scene.get_body(id).params.name.clone(),
            None => String::from("-"),
        };
        println!("{} ({})", body.params.name, body.id.0);
        println!("- Parent: {}", parent);
        println!(
            "- World position: ({:.4}, {:.4}, {:.4})",
            position.x, position.y, position.z
        );
        if body.params.kind == NodeKind::Body {
            println!("- Rotation angle: {:.4}", body.phase.rotation_angle);
            println!("- Orbit angle: {:.4}", body.phase.orbit_angle);
        }
        println!();
    }
}
