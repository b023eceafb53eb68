//! Dissect hex-dumped 5250 records.
//!
//! Reads one record per line (hex, whitespace and `0x` prefixes ignored,
//! `#` starts a comment) from a file or stdin and prints the decoded tree.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};

use tn5250_dissect::config::DecoderConfig;
use tn5250_dissect::conversation::Role;
use tn5250_dissect::lib5250::record::{decode_record_as, DecodedRecord};

struct Options {
    role: Role,
    extended: bool,
    json: bool,
    config: Option<PathBuf>,
    input: Option<PathBuf>,
}

fn print_usage() {
    println!("tn5250-dissect - decode hex-dumped 5250 records");
    println!();
    println!("Usage: tn5250-dissect [OPTIONS] [FILE]");
    println!();
    println!("Options:");
    println!("  --role <host|terminal> or -r       Sender of the records (default: host)");
    println!("  --extended or -e                   Decode as an extended-mode conversation");
    println!("  --json or -j                       Print records as JSON");
    println!("  --config <path> or -c <path>       Load decoder settings from a JSON file");
    println!("  --help or -h                       Show this help message");
    println!();
    println!("Records are read from FILE, or stdin when FILE is omitted or '-'.");
}

fn parse_args(args: &[String]) -> Result<Option<Options>> {
    let mut options = Options {
        role: Role::Host,
        extended: false,
        json: false,
        config: None,
        input: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--role" | "-r" => {
                let value = args.get(i + 1).ok_or_else(|| anyhow!("--role requires a value"))?;
                options.role = match value.as_str() {
                    "host" => Role::Host,
                    "terminal" => Role::Terminal,
                    other => bail!("unknown role '{}', expected host or terminal", other),
                };
                i += 1;
            }
            "--config" | "-c" => {
                let value = args.get(i + 1).ok_or_else(|| anyhow!("--config requires a path"))?;
                options.config = Some(PathBuf::from(value));
                i += 1;
            }
            "--extended" | "-e" => options.extended = true,
            "--json" | "-j" => options.json = true,
            "--help" | "-h" => {
                print_usage();
                return Ok(None);
            }
            "-" => options.input = None,
            other if other.starts_with('-') => bail!("unknown option '{}'", other),
            path => options.input = Some(PathBuf::from(path)),
        }
        i += 1;
    }
    Ok(Some(options))
}

/// Parse one line of hex. Returns `None` for blank and comment-only lines.
fn parse_hex_line(line: &str) -> Result<Option<Vec<u8>>> {
    let content = line.split('#').next().unwrap_or_default();
    let mut digits = String::new();
    for token in content.split_whitespace() {
        let token = token
            .strip_prefix("0x")
            .or_else(|| token.strip_prefix("0X"))
            .unwrap_or(token);
        digits.push_str(token.trim_end_matches(','));
    }
    if digits.is_empty() {
        return Ok(None);
    }
    if !digits.is_ascii() {
        bail!("non-hex characters in record");
    }
    if digits.len() % 2 != 0 {
        bail!("odd number of hex digits");
    }

    let bytes = (0..digits.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .with_context(|| format!("invalid hex byte '{}'", &digits[i..i + 2]))
        })
        .collect::<Result<Vec<u8>>>()?;
    Ok(Some(bytes))
}

fn print_record(index: usize, record: &DecodedRecord) {
    println!("record {} ({} bytes)", index, record.length);
    let mut tree = String::new();
    record.to_item().render(1, &mut tree);
    print!("{}", tree);
    for diagnostic in &record.diagnostics {
        println!("  ! {}", diagnostic);
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let Some(options) = parse_args(&args)? else {
        return Ok(());
    };

    let config = match &options.config {
        Some(path) => DecoderConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => DecoderConfig::load_or_default().context("loading default configuration")?,
    };

    let input = match &options.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("reading stdin")?;
            buf
        }
    };

    let mut index = 0;
    for (line_no, line) in input.lines().enumerate() {
        let bytes = match parse_hex_line(line).with_context(|| format!("line {}", line_no + 1))? {
            Some(bytes) => bytes,
            None => continue,
        };
        index += 1;

        match decode_record_as(&bytes, options.role, options.extended, &config) {
            Ok(record) if options.json => {
                println!("{}", serde_json::to_string(&record.to_item())?);
            }
            Ok(record) => print_record(index, &record),
            Err(err) => {
                log::error!("record {} on line {}: {}", index, line_no + 1, err);
                println!("record {} ({} bytes): {}", index, bytes.len(), err);
            }
        }
    }

    log::info!("decoded {} records", index);
    Ok(())
}
