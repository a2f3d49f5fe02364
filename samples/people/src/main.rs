//! people
//!
//! Reads person records from a built-in script, optionally from a file, and
//! from the console, greeting everyone it reads.
//!
//! # Usage
//!
//! ```bash
//! # Script and console
//! cargo run --bin people
//!
//! # Script and file only, with reader logging
//! RUST_LOG=people=debug,lazyfp=debug cargo run --bin people -- \
//!   --file samples/people/data/people.txt --no-console
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use lazyfp::effect::{ConsoleReader, FileReader, IO, ScriptReader};
use lazyfp::persistent::PersistentList;
use people_sample::{Person, greet_all, read_people};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SCRIPT: [&str; 10] = [
    "1", "Mickey", "Mouse", "2", "Minnie", "Mouse", "3", "Donald", "Duck", "-1",
];

#[derive(Parser, Debug)]
#[command(name = "people")]
#[command(about = "Reads person records through lazy streams and greets them")]
struct Arguments {
    /// Also read records from this file (one field per line)
    #[arg(long)]
    file: Option<PathBuf>,

    /// Skip the interactive console session
    #[arg(long)]
    no_console: bool,
}

fn report(source: &str, people: &PersistentList<Person>) -> IO<()> {
    info!(source, count = people.len(), "read people");
    IO::print_line(format!("From {source}:")) + greet_all(people)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "people=info,lazyfp=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let arguments = Arguments::parse();

    let scripted = read_people(SCRIPT.into_iter().collect::<ScriptReader>());
    report("script", &scripted).run_unsafe();

    if let Some(path) = &arguments.file {
        let reader = FileReader::open(path)
            .with_context(|| format!("reading people from {}", path.display()))?;
        report("file", &read_people(reader)).run_unsafe();
    }

    if !arguments.no_console {
        report("console", &read_people(ConsoleReader::new())).run_unsafe();
    }

    Ok(())
}
