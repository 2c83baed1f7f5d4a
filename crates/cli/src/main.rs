mod cli;
mod config;
mod logging;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use favicon_core::{GenerationReport, IcoOutcome, Progress};

use cli::Cli;
use config::{Config, get_current_dir};

fn print_progress(progress: Progress<'_>) {
    match progress {
        Progress::Started { source, output_dir } => {
            println!("Using SVG source: {}", source.display());
            println!("Output directory: {}", output_dir.display());
            println!();
        }
        Progress::Rendering(spec) => {
            println!(
                "Generating {} ({}x{})...",
                spec.file_name, spec.size, spec.size
            );
        }
        Progress::AssemblingIco => println!("Generating favicon.ico..."),
        Progress::IcoFinished(IcoOutcome::Written { path, .. }) => {
            let name = path.file_name().unwrap_or(path.as_os_str());
            println!("Created {}", name.to_string_lossy());
        }
        Progress::IcoFinished(IcoOutcome::Skipped { .. }) => {
            println!("Warning: Could not create ICO file - missing required PNG sizes");
        }
    }
}

fn run(cli: Cli) -> Result<GenerationReport> {
    let root = cli.root.unwrap_or_else(get_current_dir);
    let generator = Config::load(&root, cli.config.as_deref())?.into_generator(&root)?;

    generator.run(print_progress)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli) {
        Ok(report) => {
            println!("\n✅ Favicon generation complete!");
            println!("Files created in: {}", report.output_dir.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
