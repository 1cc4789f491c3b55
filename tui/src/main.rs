mod args;
mod cli;

use anyhow::Result;
use simple_logger::SimpleLogger;

fn main() -> Result<()> {
    let matches = args::command().get_matches();
    let args = args::Args::from_matches(&matches)?;
    SimpleLogger::new().with_level(args.log_level).init()?;
    cli::run(args)
}
