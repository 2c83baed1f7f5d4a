use std::path::PathBuf;

use clap::Parser;

/// Generate favicon PNGs and favicon.ico from the project's SVG icon
#[derive(Parser, Debug)]
#[command(name = "generate-favicons")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Project root holding packages/react-ui/public/favicons
    #[arg(long, env = "FAVICONS_ROOT")]
    pub root: Option<PathBuf>,

    /// YAML configuration file (defaults to <root>/favicons.yaml when present)
    #[arg(short, long, env = "FAVICONS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
