//! Command line interface for the lzhuf compressor.

use std::fmt::{Display, Formatter};

use clap::Parser;
use log::info;

/// Zip or Unzip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Zip,
    Unzip,
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Resolved options controlling program behavior.
#[derive(Debug)]
pub struct LzOpts {
    /// Compress/Decompress
    pub op_mode: Mode,
    /// Names of files to process
    pub files: Vec<String>,
    /// Don't remove input files after processing
    pub keep_input_files: bool,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Send decompressed output to stdout
    pub stdout: bool,
}

/// Command line definition - uses the external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    name = "lzhuf",
    version,
    about = "A DEFLATE-style file compressor: LZ77 dictionary substitution \
             followed by Huffman coding."
)]
struct Args {
    /// Files to process
    #[clap(required = true)]
    files: Vec<String>,

    /// Force compression
    #[clap(short = 'z', long = "compress", conflicts_with = "decompress")]
    compress: bool,

    /// Force decompression
    #[clap(short = 'd', long = "decompress")]
    decompress: bool,

    /// Keep (don't delete) input files
    #[clap(short = 'k', long = "keep")]
    keep: bool,

    /// Overwrite existing output files
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Write decompressed output to stdout
    #[clap(short = 'c', long = "stdout")]
    stdout: bool,

    /// Be verbose; repeat for more detail (-v info, -vv debug, -vvv trace)
    #[clap(short = 'v', long = "verbose", parse(from_occurrences))]
    verbose: usize,
}

/// Parse the command line into an LzOpts and set the log level.
pub fn lzopts_init() -> LzOpts {
    let args = Args::parse();

    // Available log levels are Error, Warn, Info, Debug, Trace
    match args.verbose {
        0 => log::set_max_level(log::LevelFilter::Warn),
        1 => log::set_max_level(log::LevelFilter::Info),
        2 => log::set_max_level(log::LevelFilter::Debug),
        _ => log::set_max_level(log::LevelFilter::Trace),
    };

    // If invoked plain, default action is to compress. The two mode
    // flags conflict at parse time, so -d alone selects Unzip.
    let op_mode = match (args.compress, args.decompress) {
        (_, true) => Mode::Unzip,
        _ => Mode::Zip,
    };
    info!("Operational mode set to {}", op_mode);

    LzOpts {
        op_mode,
        files: args.files,
        keep_input_files: args.keep,
        force_overwrite: args.force,
        stdout: args.stdout,
    }
}
