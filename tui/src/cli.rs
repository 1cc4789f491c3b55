//! Runs a simulation without user interaction.

use crate::args::{Args, Placement};
use anyhow::{Context, Result};
use golsim_lib::{patterns, Error, SaveDir, World};
use log::warn;

/// Places a built-in pattern, or a pattern file if there is no built-in
/// pattern with that name.
fn place(dir: &SaveDir, world: &mut World, placement: &Placement) -> Result<()> {
    match patterns::find(&placement.name) {
        Ok(pattern) => world.stamp_pattern(pattern, placement.offset),
        Err(Error::UnknownPattern(_)) => dir
            .load_pattern(&placement.name, world, placement.offset)
            .with_context(|| format!("cannot load pattern {:?}", placement.name))?,
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

/// Prints the built-in patterns and the files in the save directory.
fn list(dir: &SaveDir) {
    for group in patterns::GROUPS {
        println!("{}:", group.name);
        for pattern in group.patterns {
            println!(
                "    {} ({}×{})",
                pattern.name,
                pattern.height(),
                pattern.width()
            );
        }
    }
    match (dir.list_boards(), dir.list_patterns()) {
        (Ok(boards), Ok(patterns)) => {
            println!("Saved boards in {}:", dir.root().display());
            for name in boards {
                println!("    {}", name);
            }
            println!("Saved patterns in {}:", dir.root().display());
            for name in patterns {
                println!("    {}", name);
            }
        }
        (Err(e), _) | (_, Err(e)) => warn!("Cannot read {}: {}", dir.root().display(), e),
    }
}

/// Builds the world, runs it, and reports the result.
pub(crate) fn run(args: Args) -> Result<()> {
    if args.list {
        list(&args.dir);
        return Ok(());
    }

    let mut world = match &args.load {
        Some(name) => args
            .dir
            .load_board(name, args.config.seed)
            .with_context(|| format!("cannot load board {:?}", name))?,
        None => args.config.world().context("invalid board settings")?,
    };
    for placement in &args.patterns {
        place(&args.dir, &mut world, placement)?;
    }

    world.advance(args.steps);

    if let Some(name) = &args.save {
        args.dir
            .save_board(name, &world)
            .with_context(|| format!("cannot save board {:?}", name))?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&world.ser())?);
    } else if !args.quiet {
        print!("{}", world.plaintext());
        println!(
            "Mode: {}  Generation: {}  Cells: {}",
            world.mode(),
            world.generation(),
            world.cell_count()
        );
    }
    Ok(())
}
