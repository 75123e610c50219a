use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "xcskips",
    about = "Lists the tests suppressed in Xcode scheme files"
)]
pub struct Cli {
    #[arg(long, help = "Path to the .xcodeproj to read skipped tests from")]
    pub project: Option<PathBuf>,

    #[arg(long, help = "Path to the .xcworkspace, used when no project is given")]
    pub workspace: Option<PathBuf>,

    #[arg(long, help = "Restrict to the scheme with this exact name")]
    pub scheme: Option<String>,

    #[arg(long, help = "Emit the report as JSON")]
    pub json: bool,
}
