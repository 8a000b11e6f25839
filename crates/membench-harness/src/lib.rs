//! Reference subjects and CLI plumbing for the membench binaries.

pub mod system_heap;

pub use system_heap::SystemHeap;

/// Parses a seed given as decimal or `0x`-prefixed hex, with optional
/// underscore separators.
pub fn parse_seed(raw: &str) -> Result<u64, String> {
    let s = raw.trim();
    let parsed = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u64::from_str_radix(&hex.replace('_', ""), 16)
    } else {
        s.replace('_', "").parse::<u64>()
    };
    parsed.map_err(|err| format!("invalid seed '{raw}': {err}"))
}

/// Parses the command line, exiting 0 for `--help`/`--version` and 1 for
/// usage errors (the sysexits-style convention both binaries follow).
pub fn parse_or_exit<C: clap::Parser>() -> C {
    use clap::error::ErrorKind;

    match C::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            // Renders help to stdout and errors to stderr.
            let _ = err.print();
            std::process::exit(code);
        }
    }
}
