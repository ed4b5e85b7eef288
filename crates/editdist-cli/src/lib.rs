// editdist-cli: argument model, alphabet loading and output for the editdist tool.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::filter::LevelFilter;

use editdist_fst::alphabet::read_binary_alphabet;
use editdist_fst::overrides::read_overrides;
use editdist_fst::symbols::DEFAULT_EPSILON;
use editdist_fst::{Alphabet, EditDistError, EditDistanceOptions, EditTransducer, Overrides};

#[derive(Parser, Debug)]
#[command(name = "editdist")]
#[command(about = "Generate an edit-distance error model as an AT&T transducer table")]
#[command(version)]
pub struct Cli {
    /// Alphabet as a literal string, one symbol per character
    pub alphabet: Option<String>,

    /// Spelling of the empty symbol in the output
    #[arg(short, long, default_value = DEFAULT_EPSILON)]
    pub epsilon: String,

    /// Maximum number of edits
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub distance: u32,

    /// Also generate transpositions of adjacent symbols
    #[arg(short, long)]
    pub swap: bool,

    /// Override file: alphabet tokens, `@@`, then explicit edit weights
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Read the alphabet from an optimized-lookup transducer
    #[arg(short = 'a', long = "alphabet", value_name = "FILE")]
    pub alphabet_file: Option<PathBuf>,

    /// Write the table here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Report state and transition counts on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn options(&self) -> EditDistanceOptions {
        EditDistanceOptions {
            epsilon: self.epsilon.clone(),
            distance: self.distance,
            swaps: self.swap,
        }
    }
}

/// Install the stderr log subscriber: `INFO` when verbose, `WARN` otherwise.
pub fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::INFO
    } else {
        LevelFilter::WARN
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

/// Collect the alphabet from every source given on the command line.
///
/// Sources are merged in the order override file, literal string, binary
/// transducer; the first source naming a symbol fixes its penalty.
pub fn load_sources(cli: &Cli) -> Result<(Alphabet, Overrides)> {
    let mut alphabet = Alphabet::new();
    let mut overrides = Overrides::default();
    let mut any_source = false;

    if let Some(path) = &cli.input {
        let file =
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
        overrides = read_overrides(BufReader::new(file), &cli.epsilon)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        debug!(
            symbols = overrides.alphabet.len(),
            substitutions = overrides.substitutions.len(),
            swaps = overrides.swaps.len(),
            "read override file"
        );
        alphabet.merge(&overrides.alphabet);
        any_source = true;
    }

    if let Some(text) = &cli.alphabet {
        alphabet.merge(&Alphabet::from_chars(text));
        any_source = true;
    }

    if let Some(path) = &cli.alphabet_file {
        let file =
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
        let binary = read_binary_alphabet(BufReader::new(file))
            .with_context(|| format!("failed to read alphabet from {}", path.display()))?;
        alphabet.merge(&binary.to_alphabet());
        any_source = true;
    }

    if !any_source {
        return Err(EditDistError::NoAlphabet.into());
    }
    Ok((alphabet, overrides))
}

/// Counts reported on stderr after a run with `--verbose`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub states: u32,
    pub transitions: usize,
    pub distance: u32,
    pub alphabet_size: usize,
}

impl RunSummary {
    pub fn new(transducer: &EditTransducer, distance: u32, alphabet: &Alphabet) -> Self {
        Self {
            states: transducer.state_count(),
            transitions: transducer.transition_count(),
            distance,
            alphabet_size: alphabet.len(),
        }
    }

    /// Log the counts at `INFO`, which `init_logging(true)` lets through.
    pub fn report(&self) {
        info!(
            states = self.states,
            transitions = self.transitions,
            distance = self.distance,
            alphabet = self.alphabet_size,
            "generated edit-distance transducer"
        );
    }
}

/// Load the sources, generate the transducer and write it out.
///
/// Nothing is written unless generation succeeds.
pub fn run(cli: &Cli) -> Result<RunSummary> {
    let (alphabet, overrides) = load_sources(cli)?;
    let transducer = editdist_fst::generate(&alphabet, &overrides, &cli.options())?;

    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            transducer.write_att(BufWriter::new(file))?;
        }
        None => {
            let stdout = io::stdout();
            transducer.write_att(BufWriter::new(stdout.lock()))?;
        }
    }

    let summary = RunSummary::new(&transducer, cli.distance, &alphabet);
    summary.report();
    Ok(summary)
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    let _ = writeln!(io::stderr(), "error: {msg}");
    process::exit(1);
}
