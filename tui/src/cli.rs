use crate::{args::Args, settings};
use log::info;
use rand::{rngs::StdRng, SeedableRng};
use rlifesim_lib::{Pattern, Simulation};
use std::{
    error::Error,
    fs::File,
    io::{self, BufWriter},
    thread,
    time::Duration,
};

#[cfg(feature = "tui")]
use crate::tui::run_with_tui;

/// Random number generator for randomizing the universe.
pub(crate) fn rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Sets up the simulation, and the comments of the input pattern if there is one.
fn init(args: &Args) -> Result<(Simulation, Vec<String>), Box<dyn Error>> {
    let mut sim = args.config.simulation()?;
    let mut comments = Vec::new();
    if let Some(path) = &args.input {
        let file = File::open(path)
            .map_err(|e| format!("unable to open {}: {}", path.display(), e))?;
        comments = sim.load(file)?.comments;
    } else if args.random {
        sim.randomize(&mut rng(args.config.seed));
    }
    Ok((sim, comments))
}

/// Writes the result to the output file, or to the standard output.
pub(crate) fn write_result(
    args: &Args,
    sim: &Simulation,
    comments: Vec<String>,
) -> Result<(), Box<dyn Error>> {
    let pattern = Pattern {
        comments,
        grid: sim.grid().clone(),
    };
    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| format!("unable to create {}: {}", path.display(), e))?;
            pattern.write(BufWriter::new(file), args.line_ending)?;
            info!("Wrote generation {} to {}", sim.generation(), path.display());
        }
        None => pattern.write(io::stdout().lock(), args.line_ending)?,
    }
    Ok(())
}

/// Prints one generation as a Plaintext pattern, with its number as a comment.
fn print_gen(args: &Args, sim: &Simulation) -> Result<(), Box<dyn Error>> {
    let mut comments = vec![format!("Generation: {}", sim.generation())];
    if args.config.show_cells_alive {
        comments.push(format!("Cells alive: {}", sim.alive_count()));
    }
    let pattern = Pattern {
        comments,
        grid: sim.grid().clone(),
    };
    pattern.write(io::stdout().lock(), args.line_ending)?;
    Ok(())
}

/// Runs the requested number of generations without a TUI.
fn run_batch(
    args: &Args,
    mut sim: Simulation,
    comments: Vec<String>,
) -> Result<(), Box<dyn Error>> {
    let generation_length = Duration::from_millis(args.config.generation_length);
    for _ in 0..args.generations {
        if args.all {
            print_gen(args, &sim)?;
            thread::sleep(generation_length);
        }
        sim.step();
    }
    info!(
        "Stopped at generation {} with {} cells alive",
        sim.generation(),
        sim.alive_count()
    );
    if args.all {
        print_gen(args, &sim)
    } else {
        write_result(args, &sim, comments)
    }
}

pub(crate) fn run(args: Args) -> Result<(), Box<dyn Error>> {
    if let Some(path) = &args.dump_config {
        settings::write_config(path, &args.config)?;
    }
    let (sim, comments) = init(&args)?;

    #[cfg(feature = "tui")]
    {
        if !args.no_tui {
            return run_with_tui(&args, sim, comments);
        }
    }

    run_batch(&args, sim, comments)
}
