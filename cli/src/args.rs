//! Command-line arguments.

use std::path::PathBuf;

pub const USAGE: &str = "Usage: delta [-v|--verbose] [--config FILE] INPUT OUTPUT";

/// Parsed command line of the `delta` binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub input: PathBuf,
    pub output: PathBuf,
    pub config: Option<PathBuf>,
    pub verbose: bool,
}

impl CliArgs {
    /// Parse arguments, program name excluded.
    pub fn parse(args: &[String]) -> Result<Self, String> {
        let mut positional = Vec::new();
        let mut config = None;
        let mut verbose = false;

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "-v" | "--verbose" => verbose = true,
                "--config" => match iter.next() {
                    Some(path) => config = Some(PathBuf::from(path)),
                    None => return Err("--config requires a file argument".to_string()),
                },
                flag if flag.starts_with('-') && flag.len() > 1 => {
                    return Err(format!("unknown option '{}'", flag));
                }
                _ => positional.push(PathBuf::from(arg)),
            }
        }

        let [input, output]: [PathBuf; 2] = positional.try_into().map_err(|p: Vec<PathBuf>| {
            format!("expected INPUT and OUTPUT, found {} path(s)", p.len())
        })?;

        Ok(Self {
            input,
            output,
            config,
            verbose,
        })
    }
}
