use anyhow::{Context, Result};
use std::fs::File;
use std::io::{prelude::*, stdin, stdout, BufWriter};
use std::path::Path;

/// Reads the full statistics report from a file, or from standard input when
/// the path is the `-` sentinel. The report is consumed whole before any
/// computation happens, and the handle is released on return.
pub fn read_stats_text(path: &str) -> Result<String> {
    let mut text = String::new();
    match path {
        "-" => {
            stdin()
                .read_to_string(&mut text)
                .context("Could not read statistics report from stdin")?;
        }
        path => {
            File::open(path)
                .with_context(|| format!("Could not open statistics report `{path}`"))?
                .read_to_string(&mut text)
                .with_context(|| format!("Could not read statistics report `{path}`"))?;
        }
    }
    Ok(text)
}

/// Creates a `BufWriter` for the given output option. This allows for an
/// output file to be passed or otherwise will default to using standard
/// output.
pub fn get_writer(output: &Option<String>) -> Result<impl Write> {
    // get output as a BufWriter - equal to stdout if None
    let writer = BufWriter::new(match output {
        Some(ref x) => {
            let file = File::create(Path::new(x))?;
            Box::new(file) as Box<dyn Write + Send>
        }
        None => Box::new(stdout()) as Box<dyn Write + Send>,
    });
    Ok(writer)
}
