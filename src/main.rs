mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use xcskips::{SchemeSource, suppressed_tests};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let source = SchemeSource::from_args(cli.project, cli.workspace)?;
    let report = suppressed_tests(&source, cli.scheme.as_deref()).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for test in &report.suppressed {
            println!("{}", test);
        }
    }

    Ok(())
}
