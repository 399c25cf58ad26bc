// Command-line interface for telecord
//
// This binary exposes the telecord-markup converters for inspection and scripting. It never
// talks to Discord or Telegram: input comes from files, output goes to stdout.
//
// Converting:
//
// Discord markdown is the only inbound tree format. The --from format is auto-detected from the
// file extension (.md, .discord) and can be overridden explicitly.
// Usage:
//  telecord <input> --to <format> [--from <format>] [--output <file>]  - Convert (default)
//  telecord convert <input> --to <format> [--from <format>] [--output <file>]  - Same as above
//  telecord inspect <path> [<transform>] [--normalize]   - Dump the formatting tree
//  telecord slice <message.json> [--max-length N]         - Telegram message to Discord parts
//  telecord read <input> --author <name> [--attachment <url>]... [--json]
//                                                         - Discord message to Telegram HTML
//  telecord --list-transforms                             - List available transforms
//
// Extra Parameters:
//
// Configuration keys can be overridden for a single run with --extra-<parameter-name> <value>.
// Example:
//  telecord slice msg.json --extra-quote-max-length 80

mod transforms;

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use std::collections::HashMap;
use std::fs;
use telecord_config::{Loader, TelecordConfig};
use telecord_markup::formats::html::HtmlFormat;
use telecord_markup::{
    BaseUrlFiles, ConverterOptions, DiscordReader, FormatRegistry, LiteralNames, Message,
    TelegramConverter,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Base URL used for Telegram file links when `--file-base` is not given.
const DEFAULT_FILE_BASE: &str = "https://files.telecord.invalid";

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = if let Some(key) = arg.strip_prefix("--extra-") {
            Some(key)
        } else {
            arg.strip_prefix("--extras-")
        };

        if let Some(key) = key_opt {
            let has_value = if i + 1 < args.len() {
                !args[i + 1].starts_with('-')
            } else {
                false
            };

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("telecord")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert chat formatting between Discord and Telegram")
        .long_about(
            "telecord converts message formatting between Discord markdown and\n\
            Telegram entities.\n\n\
            Commands:\n  \
            - convert: Discord markdown to html, telegram, treeviz or json\n  \
            - inspect: View the parsed formatting tree\n  \
            - slice:   Split a Telegram message (Bot API JSON) into Discord parts\n  \
            - read:    Render a Discord message for Telegram, author header included\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> <value> to override a configuration key for one run:\n  \
            max-length, quote-max-length, inline-header-limit, code-class.\n\n\
            Examples:\n  \
            telecord msg.md --to html                 # Convert to HTML (stdout)\n  \
            telecord inspect msg.md                   # Tree visualization\n  \
            telecord slice update.json --max-length 500",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-transforms")
                .long("list-transforms")
                .help("List available transforms")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a telecord.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log debug events to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect the formatting tree of a Discord message")
                .arg(
                    Arg::new("path")
                        .help("Path to the Discord markdown file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help("Transform to apply. Defaults to 'treeviz'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            transforms::AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("normalize")
                        .long("normalize")
                        .help("Flatten containers and merge text before printing")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert Discord markdown to another format (default command)")
                .long_about(
                    "Convert a Discord message to another format.\n\n\
                    Supported target formats:\n  \
                    - html:     HTML fragment (.html)\n  \
                    - telegram: Telegram Bot API HTML (.tg)\n  \
                    - treeviz:  Tree visualization (.tree)\n  \
                    - json:     Formatting tree as JSON (.json)\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("slice")
                .about("Split a Telegram message into Discord-sized parts")
                .long_about(
                    "Read a Telegram Bot API message object (JSON) and print the Discord\n\
                    messages it converts to, separated by lines containing '---'.\n\
                    An image embed, if any, is printed last as 'embed: <url>'.",
                )
                .arg(
                    Arg::new("input")
                        .help("Path to the message JSON")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("max-length")
                        .long("max-length")
                        .help("Discord message length cap (defaults to the configured value)")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("file-base")
                        .long("file-base")
                        .value_name("URL")
                        .help("Base URL for Telegram file links")
                        .value_hint(ValueHint::Url),
                ),
        )
        .subcommand(
            Command::new("read")
                .about("Render a Discord message for Telegram")
                .arg(
                    Arg::new("input")
                        .help("Path to the Discord markdown file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("author")
                        .long("author")
                        .help("Author name shown in the header")
                        .required(true),
                )
                .arg(
                    Arg::new("attachment")
                        .long("attachment")
                        .help("Attachment URL (repeatable)")
                        .action(ArgAction::Append)
                        .value_hint(ValueHint::Url),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the whole message as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    // A bare file argument means "convert"
    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && !["inspect", "convert", "slice", "read", "help"]
                    .contains(&cleaned_args[1].as_str())
            {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    init_tracing(matches.get_flag("verbose"));

    if matches.get_flag("list-transforms") {
        handle_list_transforms_command();
        return;
    }

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);
    if !extra_params.is_empty() {
        let mut unknown: Vec<&String> = extra_params.keys().collect();
        unknown.sort();
        eprintln!("Warning: ignoring unknown extra parameters: {unknown:?}");
    }

    match matches.subcommand() {
        Some(("inspect", sub_matches)) => {
            let path = sub_matches
                .get_one::<String>("path")
                .expect("path is required");
            let transform = sub_matches
                .get_one::<String>("transform")
                .map(|s| s.as_str())
                .unwrap_or("treeviz");
            handle_inspect_command(path, transform, sub_matches.get_flag("normalize"));
        }
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let from_arg = sub_matches.get_one::<String>("from");
            let to = sub_matches.get_one::<String>("to").expect("to is required");

            let from = if let Some(f) = from_arg {
                f.to_string()
            } else {
                let registry = FormatRegistry::default();
                match registry.detect_format_from_filename(input) {
                    Some(detected) => detected,
                    None => {
                        eprintln!("Error: Could not detect format from filename '{input}'");
                        eprintln!("Please specify --from explicitly");
                        std::process::exit(1);
                    }
                }
            };

            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, &from, to, output, &config);
        }
        Some(("slice", sub_matches)) => handle_slice_command(sub_matches, &config),
        Some(("read", sub_matches)) => handle_read_command(sub_matches, &config),
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Library events go to stderr so stdout only carries converted output.
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_input(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    })
}

/// Handle the inspect command
fn handle_inspect_command(path: &str, transform: &str, normalize: bool) {
    let source = read_input(path);

    let output = transforms::execute_transform(&source, transform, normalize).unwrap_or_else(|e| {
        eprintln!("Execution error: {e}");
        std::process::exit(1);
    });

    print!("{output}");
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    config: &TelecordConfig,
) {
    let mut registry = FormatRegistry::default();
    registry.register(HtmlFormat::new((&config.html).into()));

    if let Err(e) = registry.get(from) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    if let Err(e) = registry.get(to) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let source = read_input(input);

    let tree = registry.parse(&source, from).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });
    let text = registry.serialize(&tree, to).unwrap_or_else(|e| {
        eprintln!("Serialization error: {e}");
        std::process::exit(1);
    });

    match output {
        Some(path) => {
            fs::write(path, text).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print!("{text}"),
    }
}

/// Handle the slice command
fn handle_slice_command(matches: &ArgMatches, config: &TelecordConfig) {
    let input = matches
        .get_one::<String>("input")
        .expect("input is required");
    let source = read_input(input);
    let message: Message = serde_json::from_str(&source).unwrap_or_else(|e| {
        eprintln!("Invalid message JSON in '{input}': {e}");
        std::process::exit(1);
    });

    let mut options = ConverterOptions::from(&config.discord);
    if let Some(max) = matches.get_one::<usize>("max-length") {
        options.max_message_length = *max;
    }
    let base = matches
        .get_one::<String>("file-base")
        .map(|s| s.as_str())
        .unwrap_or(DEFAULT_FILE_BASE);
    let files = BaseUrlFiles::new(base);
    debug!(?options, base, "slicing telegram message");

    let converted = TelegramConverter::new(options, &files)
        .convert(&message)
        .unwrap_or_else(|e| {
            eprintln!("Conversion error: {e}");
            std::process::exit(1);
        });

    println!("{}", converted.parts.join("\n---\n"));
    if let Some(embed) = converted.embed {
        println!("---\nembed: {}", embed.image_url);
    }
}

/// Handle the read command
fn handle_read_command(matches: &ArgMatches, config: &TelecordConfig) {
    let input = matches
        .get_one::<String>("input")
        .expect("input is required");
    let author = matches
        .get_one::<String>("author")
        .expect("author is required");
    let attachments: Vec<String> = matches
        .get_many::<String>("attachment")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let source = read_input(input);

    let reader = DiscordReader::new(&LiteralNames)
        .with_inline_header_limit(config.telegram.inline_header_limit);
    let message = reader
        .read(author, &source, &attachments)
        .unwrap_or_else(|e| {
            eprintln!("Parse error: {e}");
            std::process::exit(1);
        });

    if matches.get_flag("json") {
        let json = serde_json::to_string_pretty(&message).unwrap_or_else(|e| {
            eprintln!("JSON serialization failed: {e}");
            std::process::exit(1);
        });
        println!("{json}");
    } else {
        println!("{}", message.text);
    }
}

/// Handle the list-transforms command
fn handle_list_transforms_command() {
    println!("Available transforms:\n");
    println!("  treeviz     - Tree visualization with icons");
    println!("  json        - Formatting tree as JSON");
    println!("  plain       - Visible text only\n");

    println!("Conversion formats:");
    let registry = FormatRegistry::default();
    for format_name in registry.list_formats() {
        println!("  {format_name}");
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> TelecordConfig {
    let loader = Loader::new().with_optional_file("telecord.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

fn apply_config_overrides(config: &mut TelecordConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(raw) = take_override(extra_params, &["max-length", "max-message-length"]) {
        config.discord.max_message_length = parse_usize_arg("max-length", &raw);
    }
    if let Some(raw) = take_override(extra_params, &["quote-max-length"]) {
        config.discord.quote_max_length = parse_usize_arg("quote-max-length", &raw);
    }
    if let Some(raw) = take_override(extra_params, &["inline-header-limit"]) {
        config.telegram.inline_header_limit = parse_usize_arg("inline-header-limit", &raw);
    }
    if let Some(raw) = take_override(extra_params, &["code-class"]) {
        config.html.code_class = raw;
    }
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
}

fn parse_usize_arg(flag: &str, raw: &str) -> usize {
    raw.parse().unwrap_or_else(|_| {
        eprintln!("Invalid number '{raw}' for --extra-{flag}");
        std::process::exit(1);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_extra_args_empty() {
        let args = args(&["telecord", "inspect", "msg.md"]);
        let (cleaned, extra) = parse_extra_args(&args);

        assert_eq!(cleaned, args);
        assert!(extra.is_empty());
    }

    #[test]
    fn test_parse_extra_args_single_param() {
        let (cleaned, extra) = parse_extra_args(&args(&[
            "telecord",
            "slice",
            "msg.json",
            "--extra-max-length",
            "500",
        ]));

        assert_eq!(cleaned, args(&["telecord", "slice", "msg.json"]));
        assert_eq!(extra.get("max-length"), Some(&"500".to_string()));
    }

    #[test]
    fn test_parse_extra_args_boolean_flag_at_end() {
        let (cleaned, extra) =
            parse_extra_args(&args(&["telecord", "inspect", "msg.md", "--extra-flag"]));

        assert_eq!(cleaned, args(&["telecord", "inspect", "msg.md"]));
        assert_eq!(extra.get("flag"), Some(&"true".to_string()));
    }

    #[test]
    fn test_parse_extra_args_allows_extras_alias() {
        let (_, extra) = parse_extra_args(&args(&[
            "telecord",
            "msg.md",
            "--extras-code-class",
            "code",
            "--to",
            "html",
        ]));

        assert_eq!(extra.get("code-class"), Some(&"code".to_string()));
    }

    #[test]
    fn apply_config_overrides_updates_known_keys() {
        let mut config = load_cli_config(None);
        let mut extras = HashMap::new();
        extras.insert("max-length".to_string(), "300".to_string());
        extras.insert("quote-max-length".to_string(), "20".to_string());
        extras.insert("inline-header-limit".to_string(), "10".to_string());
        extras.insert("code-class".to_string(), "code".to_string());

        apply_config_overrides(&mut config, &mut extras);

        assert_eq!(config.discord.max_message_length, 300);
        assert_eq!(config.discord.quote_max_length, 20);
        assert_eq!(config.telegram.inline_header_limit, 10);
        assert_eq!(config.html.code_class, "code");
        assert!(extras.is_empty());
    }

    #[test]
    fn apply_config_overrides_leaves_unknown_keys() {
        let mut config = load_cli_config(None);
        let mut extras = HashMap::new();
        extras.insert("theme".to_string(), "dark".to_string());

        apply_config_overrides(&mut config, &mut extras);

        assert_eq!(extras.len(), 1);
        assert_eq!(config.discord.max_message_length, 2000);
    }

    #[test]
    fn cli_definition_is_consistent() {
        build_cli().debug_assert();
    }
}
