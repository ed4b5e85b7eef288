// editdist: Generate an edit-distance error model in AT&T format.
//
// Writes a weighted transducer accepting string pairs within the given edit
// distance. Compile the output with an FST toolkit (e.g. hfst-txt2fst) to get
// an error source for a speller.
//
// Usage:
//   editdist [OPTIONS] [ALPHABET]
//
// Options:
//   -e, --epsilon SYM      Epsilon spelling (default @0@)
//   -d, --distance N       Maximum edit distance (default 1)
//   -s, --swap             Generate adjacent transpositions
//   -i, --input FILE       Override file with alphabet and weights
//   -a, --alphabet FILE    Take the alphabet from an optimized-lookup transducer
//   -o, --output FILE      Output file (default stdout)
//   -v, --verbose          Print counts to stderr
//   -h, --help             Print help

use clap::Parser;

use editdist_cli::Cli;

fn main() {
    let cli = Cli::parse();
    editdist_cli::init_logging(cli.verbose);

    if let Err(e) = editdist_cli::run(&cli) {
        editdist_cli::fatal(&format!("{e:#}"));
    }
}
