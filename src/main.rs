use srx_seg::Segmenter;
use srx_seg::api::{DEFAULT_MARGIN, DEFAULT_MAX_LOOKBEHIND, DEFAULT_WINDOW};
use std::io::{self, BufRead, Read, Write};

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    if let Err(err) = run(&config) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Iterator_ {
    Accurate,
    Streaming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Line,
    Whole,
}

struct CliConfig {
    ruleset: String,
    language: String,
    iterator: Iterator_,
    max_lookbehind: usize,
    window: usize,
    margin: usize,
    mode: Mode,
    // Accepted for interface compatibility with the SRX loader contract;
    // schema validation is out of scope (see Non-goals).
    schema: Option<String>,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut ruleset: Option<String> = None;
    let mut language: Option<String> = None;
    let mut iterator = Iterator_::Accurate;
    let mut max_lookbehind = DEFAULT_MAX_LOOKBEHIND;
    let mut window = DEFAULT_WINDOW;
    let mut margin = DEFAULT_MARGIN;
    let mut mode = Mode::Line;
    let mut schema: Option<String> = None;

    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("srx-seg {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--ruleset" => ruleset = Some(next_value(&mut args, "--ruleset")?),
            "--schema" => schema = Some(next_value(&mut args, "--schema")?),
            "--language" => language = Some(next_value(&mut args, "--language")?),
            "--iterator" => {
                iterator = match next_value(&mut args, "--iterator")?.as_str() {
                    "accurate" => Iterator_::Accurate,
                    "streaming" => Iterator_::Streaming,
                    other => return Err(format!("error: unknown --iterator value '{other}'")),
                }
            }
            "--max-lookbehind" => {
                let value = next_value(&mut args, "--max-lookbehind")?;
                max_lookbehind = value.parse().map_err(|_| format!("error: invalid --max-lookbehind '{value}'"))?;
            }
            "--window" => {
                let value = next_value(&mut args, "--window")?;
                window = value.parse().map_err(|_| format!("error: invalid --window '{value}'"))?;
            }
            "--margin" => {
                let value = next_value(&mut args, "--margin")?;
                margin = value.parse().map_err(|_| format!("error: invalid --margin '{value}'"))?;
            }
            "--mode" => {
                mode = match next_value(&mut args, "--mode")?.as_str() {
                    "line" => Mode::Line,
                    "whole" => Mode::Whole,
                    other => return Err(format!("error: unknown --mode value '{other}'")),
                }
            }
            _ if arg.starts_with('-') => return Err(format!("error: unknown option '{arg}'")),
            _ => return Err(format!("error: unexpected positional argument '{arg}'")),
        }
    }

    let ruleset = ruleset.ok_or_else(|| format!("error: --ruleset is required\n\n{}", help_text()))?;
    let language = language.ok_or_else(|| format!("error: --language is required\n\n{}", help_text()))?;

    Ok(CliConfig { ruleset, language, iterator, max_lookbehind, window, margin, mode, schema })
}

fn next_value(args: &mut impl std::iter::Iterator<Item = String>, flag: &str) -> Result<String, String> {
    args.next().ok_or_else(|| format!("error: {flag} expects a value"))
}

fn run(config: &CliConfig) -> Result<(), srx_seg::Error> {
    let xml = std::fs::read_to_string(&config.ruleset)?;
    if config.schema.is_some() {
        eprintln!("warning: --schema is accepted but validation is not performed");
    }

    let document = srx_seg::srx_xml::from_xml_str(&xml)?;
    let segmenter = Segmenter::new(&document, &config.language).max_lookbehind(config.max_lookbehind);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match config.mode {
        Mode::Whole => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input)?;
            let input = input.replace('\n', " ");
            emit(&segmenter, config, &input, &mut out)?;
        }
        Mode::Line => {
            for line in io::stdin().lock().lines() {
                emit(&segmenter, config, &line?, &mut out)?;
            }
        }
    }

    Ok(())
}

fn emit(
    segmenter: &Segmenter,
    config: &CliConfig,
    text: &str,
    out: &mut impl Write,
) -> Result<(), srx_seg::Error> {
    match config.iterator {
        Iterator_::Accurate => {
            for segment in segmenter.accurate(std::sync::Arc::from(text))? {
                writeln!(out, "{}", segment?)?;
            }
        }
        Iterator_::Streaming => {
            for segment in segmenter.streaming_str(text, config.window, config.margin)? {
                writeln!(out, "{}", segment?)?;
            }
        }
    }
    Ok(())
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "srx-seg {version}

SRX 2.0-driven text segmentation.

Usage:
  srx-seg --ruleset <path> --language <code> [OPTIONS]

Reads text from standard input, writes one segment per output line.

Options:
  --ruleset <path>           SRX ruleset file (required).
  --schema <path>            Schema file; accepted, not validated against.
  --language <code>          Language code to select rules for (required).
  --iterator <kind>          accurate | streaming. Default: accurate.
  --max-lookbehind <n>       Bound for finitized lookbehind constructs. Default: {max_lookbehind}.
  --window <n>               Streaming window size, in characters. Default: {window}.
  --margin <n>               Streaming margin, in characters. Default: {margin}.
  --mode <mode>               line | whole. In whole mode, newlines in the
                             input are replaced with spaces before segmenting.
                             Default: line.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Exit codes:
  0  Success.
  1  Internal error (invalid ruleset, regex compile failure, buffer too small, reader error).
  2  Invalid arguments.
",
        version = env!("CARGO_PKG_VERSION"),
        max_lookbehind = DEFAULT_MAX_LOOKBEHIND,
        window = DEFAULT_WINDOW,
        margin = DEFAULT_MARGIN,
    )
}
