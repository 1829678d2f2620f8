use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use gridstag::{logging, ExecutionMode, Pipeline, RunConfig, Stage};

mod args;

use args::Args;

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // Usage errors exit with 1; --help and --version are not errors.
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    logging::init(&args.log_level);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let mode = if args.sequential {
        ExecutionMode::Sequential
    } else {
        ExecutionMode::Parallel
    };
    let config = RunConfig::new(&args.image_path, args.mask_size, args.num_workers)?
        .with_output_dir(&args.output_dir)
        .with_mode(mode);

    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!("Failed to create output directory '{}'", config.output_dir.display())
    })?;

    let mask = config.mask_size;
    let workers = config.workers;
    Pipeline::new(config)
        .run(|output| match output.stage {
            Stage::Grayscale => {
                println!("Grayscale image saved to {}", output.path.display())
            }
            Stage::Median => println!(
                "Median filter ({mask}x{mask}, {workers} workers) saved to {}",
                output.path.display()
            ),
            Stage::Laplacian => {
                println!("Laplacian filter saved to {}", output.path.display())
            }
        })
        .with_context(|| format!("Failed to process '{}'", args.image_path.display()))?;

    Ok(())
}
