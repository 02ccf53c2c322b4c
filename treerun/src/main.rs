//! `trn`: run a terminal command from every selected directory of a tree.
//!
//! The input YAML holds a `Tree` block (directory names per level) and a
//! `Modes` block (commands). See `trn --example`.

use std::collections::BTreeSet;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use treerun::climb::{RunOptions, climb};
use treerun::error::exit_code_for;
use treerun::exit_codes;
use treerun::io::config::load_config;
use treerun::io::console::{header, tabulate};
use treerun::io::plant::plant;
use treerun::io::prompt::ConsoleSource;
use treerun::io::shell::ShRunner;
use treerun::logging;

const EXAMPLE: &str = "\
Example tree structure:
---
root-dir                <-- arbitrary root directory
├── tree.yaml           <-- input file; its directory is the default root
├── dir1
│   ├── subdir1
│   │   ├── run.sh
│   │   └── test-mod    <-- mod is whatever follows the --modifier flag
│   │       └── run.sh
│   └── subdir2
│       ├── run.sh
│       └── test-mod
│           └── run.sh
└── dir2
    ├── subdir1
    │   ├── run.sh
    │   └── test-mod
    │       └── run.sh
    └── subdir2
        ├── run.sh
        └── test-mod
            └── run.sh
---
and its associated input:
---
Tree:
  First directory level:   <-- arbitrary name (shown during selection)
    - dir1
    - dir2
  Second directory level:
    - subdir1              <-- each dir above contains all of these
    - subdir2

Modes:
  Mode 1:                  <-- name of mode (shown during selection)
    cmd: ./run.sh          <-- 'command:' is equally valid
  Mode 2:
    cmd: ./run.sh
    dir: test-{mod}        <-- run below each leaf, {mod} from --modifier
    args: [--verbose]      <-- appended to the command
---";

#[derive(Parser, Debug)]
#[command(
    name = "trn",
    version,
    about = "Run terminal commands from every selected directory of a tree",
    after_help = "Run `trn --plant -i input.yaml` to create the tree defined in the input file.\n\
                  Run `trn --example` to see an example tree and its input file."
)]
struct Cli {
    /// Input YAML file with a `Tree` block and a `Modes` block.
    #[arg(short, long, default_value = "tree.yaml")]
    input: PathBuf,

    /// Value substituted for `{mod}` in the `Modes` block.
    #[arg(short, long)]
    modifier: Option<String>,

    /// Select every non-excluded directory without prompting.
    #[arg(short, long)]
    all: bool,

    /// Append a summary of the run to this log file.
    #[arg(short, long)]
    output: Option<String>,

    /// Directory names to exclude at every level.
    #[arg(short, long, num_args = 1..)]
    excluded: Vec<String>,

    /// Create the tree defined in the input file, then exit.
    #[arg(short, long)]
    plant: bool,

    /// Print an example tree and its input file.
    #[arg(long)]
    example: bool,

    /// Print the legend for exit codes.
    #[arg(long)]
    codes: bool,
}

fn main() {
    logging::init();
    let cli = Cli::parse();
    std::process::exit(run(&cli));
}

/// Execute `cli` and return the process exit code.
fn run(cli: &Cli) -> i32 {
    match dispatch(cli) {
        Ok(()) => exit_codes::OK,
        Err(err) => {
            let code = exit_code_for(&err);
            if code != exit_codes::OK {
                eprintln!("{err:#}");
                println!("exit code: {code}");
            }
            code
        }
    }
}

fn dispatch(cli: &Cli) -> Result<()> {
    let mut out = io::stdout();
    if cli.example {
        writeln!(out, "{EXAMPLE}")?;
        return Ok(());
    }
    if cli.codes {
        print_codes(&mut out)?;
        return Ok(());
    }

    let config = load_config(&cli.input)?;
    let excluded: BTreeSet<String> = cli.excluded.iter().cloned().collect();

    if cli.plant {
        let planted = plant(&config.levels, &config.root, &excluded)?;
        writeln!(
            out,
            "Planted {} directories under {}",
            planted.len(),
            config.root.display()
        )?;
        return Ok(());
    }

    let options = RunOptions {
        modifier: cli.modifier.clone(),
        excluded,
        select_all: cli.all,
        log_file: cli.output.clone(),
    };
    let report = climb(&config, &options, &mut ConsoleSource::stdin(), &ShRunner, &mut out)?;
    debug!(
        successful = report.outcome.successful.len(),
        log = ?report.log_path,
        "run complete"
    );
    Ok(())
}

fn print_codes<W: Write>(out: &mut W) -> io::Result<()> {
    header(out, "Exit codes:")?;
    let mut rows = vec![("Code:".to_string(), "Interpretation:")];
    for (code, _) in exit_codes::LEGEND {
        if let Some(text) = exit_codes::describe(code) {
            rows.push((code.to_string(), text));
        }
    }
    tabulate(out, &rows, None)
}
