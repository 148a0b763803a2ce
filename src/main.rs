//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use std::fs;
use std::io::Write;
use std::path::Path;

use log::{error, info, LevelFilter};
use simplelog::{Config, TermLogger, TerminalMode};

use lzhuf::tools::cli::{lzopts_init, LzOpts, Mode};
use lzhuf::{compress, decompress, Error, Result};

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Suffix of the payload container written next to every compressed file.
const PAYLOAD_SUFFIX: &str = ".lzh";
/// Suffix of the tree container.
const TREE_SUFFIX: &str = ".lzt";

fn main() -> Result<()> {
    // Available log levels are Error, Warn, Info, Debug, Trace
    TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stdout,
        simplelog::ColorChoice::AlwaysAnsi,
    )
    .unwrap();

    let options = lzopts_init();

    //----- Figure out what we need to do and go do it
    let result = match options.op_mode {
        Mode::Zip => zip(&options),
        Mode::Unzip => unzip(&options),
    };
    if let Err(e) = &result {
        error!("{}", e);
    }
    result?;

    info!("Done.\n");
    Ok(())
}

/// Compress every input file into its payload (.lzh) and tree (.lzt)
/// artifacts. The input is removed afterwards unless --keep is given.
fn zip(opts: &LzOpts) -> Result<()> {
    for file in &opts.files {
        let input = fs::read(file)?;
        info!("Compressing {} ({} bytes)", file, input.len());

        let artifacts = compress(&input)?;
        let payload_path = format!("{file}{PAYLOAD_SUFFIX}");
        let tree_path = format!("{file}{TREE_SUFFIX}");
        write_file(&payload_path, &artifacts.payload, opts.force_overwrite)?;
        write_file(&tree_path, &artifacts.tree, opts.force_overwrite)?;
        info!("Wrote {} and {}.", payload_path, tree_path);

        if !opts.keep_input_files {
            fs::remove_file(file)?;
        }
    }
    Ok(())
}

/// Decompress every input payload, locating the sibling tree container.
/// The artifact pair is removed afterwards unless --keep is given.
fn unzip(opts: &LzOpts) -> Result<()> {
    for file in &opts.files {
        let stem = file.strip_suffix(PAYLOAD_SUFFIX);
        let tree_path = match stem {
            Some(stem) => format!("{stem}{TREE_SUFFIX}"),
            None => format!("{file}{TREE_SUFFIX}"),
        };
        let out_path = match stem {
            Some(stem) => stem.to_string(),
            None => format!("{file}.out"),
        };

        let payload = fs::read(file)?;
        let tree = fs::read(&tree_path)?;
        info!("Decompressing {} with tree {}", file, tree_path);

        let output = decompress(&tree, &payload)?;

        if opts.stdout {
            std::io::stdout().write_all(&output)?;
        } else {
            write_file(&out_path, &output, opts.force_overwrite)?;
            info!("Wrote {} ({} bytes).", out_path, output.len());
        }

        if !opts.keep_input_files && !opts.stdout {
            fs::remove_file(file)?;
            fs::remove_file(&tree_path)?;
        }
    }
    Ok(())
}

/// Write a whole buffer to `path`, refusing to clobber an existing file
/// unless forced.
fn write_file(path: &str, data: &[u8], force: bool) -> Result<()> {
    if !force && Path::new(path).exists() {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("{path} exists; use --force to overwrite"),
        )));
    }
    fs::write(path, data)?;
    Ok(())
}
