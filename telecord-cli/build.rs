use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the transforms from src/transforms.rs
// We need to duplicate this here since build scripts can't access src/ modules
const AVAILABLE_TRANSFORMS: &[&str] = &["treeviz", "json", "plain"];

const FORMATS: &[&str] = &["discord", "html", "telegram", "treeviz", "json"];

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let path_arg = |name: &'static str| {
        Arg::new(name)
            .required(true)
            .index(1)
            .value_hint(ValueHint::FilePath)
    };

    let mut cmd = Command::new("telecord")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert chat formatting between Discord and Telegram")
        .arg(
            Arg::new("config")
                .long("config")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("inspect")
                .arg(path_arg("path"))
                .arg(
                    Arg::new("transform")
                        .index(2)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            AVAILABLE_TRANSFORMS,
                        )),
                )
                .arg(
                    Arg::new("normalize")
                        .long("normalize")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("convert")
                .arg(path_arg("input"))
                .arg(
                    Arg::new("from")
                        .long("from")
                        .value_parser(clap::builder::PossibleValuesParser::new(FORMATS)),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .value_parser(clap::builder::PossibleValuesParser::new(FORMATS)),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("slice")
                .arg(path_arg("input"))
                .arg(Arg::new("max-length").long("max-length"))
                .arg(
                    Arg::new("file-base")
                        .long("file-base")
                        .value_hint(ValueHint::Url),
                ),
        )
        .subcommand(
            Command::new("read")
                .arg(path_arg("input"))
                .arg(Arg::new("author").long("author"))
                .arg(
                    Arg::new("attachment")
                        .long("attachment")
                        .action(ArgAction::Append)
                        .value_hint(ValueHint::Url),
                )
                .arg(Arg::new("json").long("json").action(ArgAction::SetTrue)),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "telecord", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "telecord", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "telecord", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
