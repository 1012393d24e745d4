use clap::Parser;

/// Live vote-tallying tool for department elections.
///
/// Loads a plaintext roster (one `department - name (class)` line per
/// candidate), runs an interactive tally loop with pinyin quick-vote
/// search, and exports the final results as JSON or text.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The roster file to load at startup. The file
    /// contents are handed to the parser unmodified.
    #[clap(short, long, value_parser)]
    pub roster: Option<String>,

    /// Start with the built-in demo roster instead of a file.
    #[clap(long, takes_value = false)]
    pub demo: bool,

    /// Disable pinyin matching in the quick-vote search: only literal
    /// name substrings will match.
    #[clap(long, takes_value = false)]
    pub no_pinyin: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
