//! Command-line interface for semtok
//! Encodes classified token lists into the semantic tokens wire format and reads
//! encoded streams back.
//!
//! Usage:
//!   semtok encode `<path>` [--format `<format>`] [--result-id `<id>`] [--pretty]  - Encode a JSON token list
//!   semtok decode `<path>`                                                    - Print the tokens of a flat stream
//!   semtok legend                                                             - Print the configured legend
//!
//! Every command accepts `--config <file>` (layered over the built-in defaults)
//! and `--log-level <filter>`. A `semtok.toml` in the working directory, when
//! present, is layered between the defaults and `--config`.
#[path = "semtok/logging.rs"]
mod logging;

use std::error::Error;

use clap::{Arg, ArgAction, ArgMatches, Command};
use semtok::input::{parse_entries, parse_flat, push_entries};
use semtok::tokens::{AbsoluteToken, SemanticTokens, SemanticTokensBuilder, SemanticTokensLegend};
use semtok_config::{Loader, OutputConfig, OutputFormat, SemtokConfig};
use tracing::{debug, info};

fn main() {
    let matches = build_cli().get_matches();
    if let Err(e) = run(&matches) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn build_cli() -> Command {
    Command::new("semtok")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Encode and inspect semantic token streams")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Configuration file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .help("Log filter (e.g. 'debug' or 'semtok=trace'); overrides RUST_LOG"),
        )
        .subcommand(
            Command::new("encode")
                .about("Encode a JSON list of tokens")
                .arg(
                    Arg::new("path")
                        .help("Path to the JSON token list")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .value_parser(["flat", "lsp", "yaml"])
                        .help("Output format (defaults to the configured one)"),
                )
                .arg(
                    Arg::new("result-id")
                        .long("result-id")
                        .help("Result id attached to the built stream"),
                )
                .arg(
                    Arg::new("pretty")
                        .long("pretty")
                        .action(ArgAction::SetTrue)
                        .help("Pretty-print JSON output"),
                ),
        )
        .subcommand(
            Command::new("decode")
                .about("Print the absolute tokens of a flat encoded stream")
                .arg(
                    Arg::new("path")
                        .help("Path to the JSON integer array")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(Command::new("legend").about("Print the configured legend"))
}

fn run(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let config = load_config(matches)?;
    logging::init(
        matches.get_one::<String>("log-level").map(String::as_str),
        &config.logging.level,
    )?;
    let legend = SemanticTokensLegend::new(
        config.legend.token_types.clone(),
        config.legend.token_modifiers.clone(),
    )?;

    match matches.subcommand() {
        Some(("encode", encode_matches)) => {
            let path = required_arg(encode_matches, "path")?;
            let result_id = encode_matches.get_one::<String>("result-id").cloned();
            let output = handle_encode_command(path, &legend, result_id, &config.output)?;
            println!("{}", output);
        }
        Some(("decode", decode_matches)) => {
            let path = required_arg(decode_matches, "path")?;
            for line in handle_decode_command(path, &legend)? {
                println!("{}", line);
            }
        }
        Some(("legend", _)) => {
            print!("{}", describe_legend(&legend));
        }
        _ => unreachable!(),
    }
    Ok(())
}

fn required_arg<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str, Box<dyn Error>> {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .ok_or_else(|| format!("missing argument <{name}>").into())
}

/// Project-local configuration picked up from the working directory.
const LOCAL_CONFIG: &str = "semtok.toml";

/// Defaults, then `./semtok.toml`, then `--config`, then per-command flags.
fn load_config(matches: &ArgMatches) -> Result<SemtokConfig, Box<dyn Error>> {
    let mut loader = Loader::new().with_optional_file(LOCAL_CONFIG);
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(("encode", encode_matches)) = matches.subcommand() {
        if let Some(format) = encode_matches.get_one::<String>("format") {
            loader = loader.set_override("output.format", format.as_str())?;
        }
        if encode_matches.get_flag("pretty") {
            loader = loader.set_override("output.pretty", true)?;
        }
    }
    Ok(loader.build()?)
}

/// Handle the encode command
fn handle_encode_command(
    path: &str,
    legend: &SemanticTokensLegend,
    result_id: Option<String>,
    output: &OutputConfig,
) -> Result<String, Box<dyn Error>> {
    let source = std::fs::read_to_string(path)
        .map_err(|e| format!("Error reading file {}: {}", path, e))?;
    let entries = parse_entries(&source)?;

    let mut builder = SemanticTokensBuilder::with_legend(legend);
    push_entries(&mut builder, &entries)?;
    if !builder.is_sorted() {
        debug!(path, "input tokens were not in document order");
    }
    let tokens = builder.build(result_id);
    info!(path, tokens = tokens.token_count(), "encoded tokens");
    render(&tokens, output)
}

/// Handle the decode command
fn handle_decode_command(
    path: &str,
    legend: &SemanticTokensLegend,
) -> Result<Vec<String>, Box<dyn Error>> {
    let source = std::fs::read_to_string(path)
        .map_err(|e| format!("Error reading file {}: {}", path, e))?;
    let tokens = parse_flat(&source)?;
    Ok(tokens
        .decode()?
        .iter()
        .map(|token| describe_token(token, legend))
        .collect())
}

fn render(tokens: &SemanticTokens, output: &OutputConfig) -> Result<String, Box<dyn Error>> {
    let rendered = match (output.format, output.pretty) {
        (OutputFormat::Flat, false) => serde_json::to_string(tokens.data())?,
        (OutputFormat::Flat, true) => serde_json::to_string_pretty(tokens.data())?,
        (OutputFormat::Lsp, false) => serde_json::to_string(tokens)?,
        (OutputFormat::Lsp, true) => serde_json::to_string_pretty(tokens)?,
        (OutputFormat::Yaml, _) => serde_yaml::to_string(tokens)?.trim_end().to_string(),
    };
    Ok(rendered)
}

fn describe_token(token: &AbsoluteToken, legend: &SemanticTokensLegend) -> String {
    let token_type = legend
        .token_types()
        .get(token.token_type as usize)
        .cloned()
        .unwrap_or_else(|| token.token_type.to_string());
    let modifiers: Vec<&str> = legend
        .token_modifiers()
        .iter()
        .enumerate()
        .filter(|(bit, _)| token.token_modifiers & (1u32 << bit) != 0)
        .map(|(_, name)| name.as_str())
        .collect();
    let modifiers = if modifiers.is_empty() {
        "-".to_string()
    } else {
        modifiers.join("|")
    };
    format!(
        "{}:{} len={} type={} mods={}",
        token.line, token.character, token.length, token_type, modifiers
    )
}

fn describe_legend(legend: &SemanticTokensLegend) -> String {
    let mut out = String::from("Token types:\n");
    for (index, name) in legend.token_types().iter().enumerate() {
        out.push_str(&format!("  {:>2}  {}\n", index, name));
    }
    out.push_str("Token modifiers:\n");
    for (bit, name) in legend.token_modifiers().iter().enumerate() {
        out.push_str(&format!("  {:>2}  {}\n", bit, name));
    }
    out
}
