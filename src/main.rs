//! Headless runner.
//!
//! Builds a simulation from a preset or a JSON parameter file, optionally feeds
//! it a command script (one character per step) and prints text snapshots.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use fogwalk::simulation::commands::Command;
use fogwalk::{Params, Simulation};

/// Headless cellular automaton runner with radar and observer visibility
#[derive(Parser, Debug)]
#[command(name = "fogwalk")]
#[command(about = "Run the automaton headless and print text snapshots")]
struct Args {
    /// Named preset: radar, campfire, observer or structures
    #[arg(long, default_value = "radar")]
    preset: String,

    /// JSON parameter file (overrides --preset)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the resolved parameters to this JSON file and exit
    #[arg(long)]
    write_config: Option<PathBuf>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Override the grid width
    #[arg(long)]
    width: Option<usize>,

    /// Number of steps to run
    #[arg(long, default_value_t = 20)]
    steps: u64,

    /// Command script consumed one character per step:
    /// U/D/L/R move the observer, C toggles a campfire, anything else waits
    #[arg(long, default_value = "")]
    commands: String,

    /// Print a snapshot every N steps (0 prints only the final grid)
    #[arg(long, default_value_t = 0)]
    dump_every: u64,

    /// Print unsensed cells as '?'
    #[arg(long)]
    visible_only: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut params = match &args.config {
        Some(path) => Params::load_from_file(path)?,
        None => Params::preset(&args.preset).ok_or_else(|| {
            format!(
                "unknown preset '{}', expected one of {:?}",
                args.preset,
                Params::preset_names()
            )
        })?,
    };
    if let Some(seed) = args.seed {
        params.seed = Some(seed);
    }
    if let Some(width) = args.width {
        params.width = width;
    }

    if let Some(path) = &args.write_config {
        params.validate()?;
        params.save_to_file(path)?;
        tracing::info!("wrote parameters to {}", path.display());
        return Ok(());
    }

    let mut sim = Simulation::new(params)?;
    tracing::info!("Running {} steps with the {} layer", args.steps, sim.policy_name());

    let mut script = args.commands.chars();
    for step in 1..=args.steps {
        if let Some(command) = script.next().and_then(Command::from_script_char) {
            sim.submit(command);
        }
        sim.step_with_commands();

        if args.dump_every > 0 && step % args.dump_every == 0 && step != args.steps {
            print_snapshot(&sim, args.visible_only);
        }
    }

    print_snapshot(&sim, args.visible_only);
    Ok(())
}

fn print_snapshot(sim: &Simulation, visible_only: bool) {
    println!("tick {}", sim.tick());
    let rows = if visible_only {
        sim.dump_visible_text()
    } else {
        sim.dump_text()
    };
    for row in rows {
        println!("{row}");
    }
    println!("alive: {}", sim.grid().alive_count());
}
