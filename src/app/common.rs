use super::{
    AppHelper, ABAPlusCommand, ArgumentsCommand, AuthorsCommand, CheckCommand, Command,
};
use anyhow::{Context, Result};
use clap::{Arg, ArgMatches};
use crustaba::{
    aba::{ABAFramework, ABAFrameworkBuilder, ABAPlusMode},
    io::{ABAInstanceReader, ABAPlusReader, Iccma23ABAReader},
};
use log::{info, warn};
use std::{
    fs::{self, File},
    io::{BufReader, Read},
    path::PathBuf,
    str::FromStr,
};

pub(crate) fn create_app_helper() -> AppHelper<'static> {
    let app_name = option_env!("CARGO_PKG_NAME").unwrap_or("unknown app name");
    let app_version = option_env!("CARGO_PKG_VERSION").unwrap_or("unknown version");
    let authors = option_env!("CARGO_PKG_AUTHORS").unwrap_or("unknown authors");
    let mut app = AppHelper::new(
        app_name,
        app_version,
        authors,
        "Crustaba, an ABA and ABA+ argument and attack generator.",
    );
    let commands: Vec<Box<dyn Command>> = vec![
        Box::new(AuthorsCommand::new(app_name, app_version, authors)),
        Box::new(CheckCommand::new()),
        Box::new(ArgumentsCommand::new()),
        Box::new(ABAPlusCommand::new()),
    ];
    for c in commands {
        app.add_command(c);
    }
    app
}

pub(crate) const ARG_INPUT: &str = "INPUT";

pub(crate) fn input_args() -> Arg<'static, 'static> {
    Arg::with_name(ARG_INPUT)
        .short("f")
        .long("file")
        .empty_values(false)
        .multiple(false)
        .help("the input file that contains the framework")
        .required(true)
}

pub(crate) const ARG_READER: &str = "READER";

pub(crate) fn reader_arg() -> Arg<'static, 'static> {
    Arg::with_name(ARG_READER)
        .short("r")
        .long("reader")
        .empty_values(false)
        .multiple(false)
        .possible_values(&["aba-plus", "iccma23-aba"])
        .default_value("aba-plus")
        .help("the input file format")
        .required(false)
}

pub(crate) const ARG_STRICT: &str = "STRICT";

pub(crate) fn strict_arg() -> Arg<'static, 'static> {
    Arg::with_name(ARG_STRICT)
        .long("strict")
        .takes_value(false)
        .help("fail on references to literals that are not in the language instead of dropping them")
        .required(false)
}

pub(crate) const ARG_NO_TRANSFORM: &str = "NO_TRANSFORM";

pub(crate) fn no_transform_arg() -> Arg<'static, 'static> {
    Arg::with_name(ARG_NO_TRANSFORM)
        .long("no-transform")
        .takes_value(false)
        .help("do not remove cycles nor make the framework atomic before generating arguments")
        .required(false)
}

pub(crate) const ARG_MODE: &str = "MODE";

pub(crate) fn mode_arg() -> Arg<'static, 'static> {
    Arg::with_name(ARG_MODE)
        .long("mode")
        .empty_values(false)
        .multiple(false)
        .possible_values(&["assumption-sets", "arguments"])
        .default_value("assumption-sets")
        .help("compute the ABA+ attacks between sets of assumptions or between arguments")
        .required(false)
}

pub(crate) fn read_mode(arg_matches: &ArgMatches<'_>) -> Result<ABAPlusMode> {
    let mode = arg_matches.value_of(ARG_MODE).unwrap_or_default();
    ABAPlusMode::from_str(mode).with_context(|| format!("invalid mode {:?}", mode))
}

/// Reads the framework given by the input and reader args, and builds it according to the strict arg.
pub(crate) fn read_framework(arg_matches: &ArgMatches<'_>) -> Result<ABAFramework> {
    let file = arg_matches.value_of(ARG_INPUT).unwrap();
    let mut reader: Box<dyn ABAInstanceReader> = match arg_matches.value_of(ARG_READER) {
        Some("iccma23-aba") => Box::<Iccma23ABAReader>::default(),
        _ => Box::<ABAPlusReader>::default(),
    };
    reader.add_warning_handler(Box::new(|line, msg| warn!("at line {}: {}", line, msg)));
    let raw = read_file_path_with(file, &|r| reader.read(r))?;
    let framework = ABAFrameworkBuilder::new()
        .strict(arg_matches.is_present(ARG_STRICT))
        .build(&raw)
        .context("while building the framework")?;
    info!(
        "the framework has {} literal(s), {} assumption(s), {} contrary relation(s), {} rule(s) and {} preference(s)",
        framework.language().len(),
        framework.n_assumptions(),
        framework.n_contraries(),
        framework.n_rules(),
        framework.preferences().len(),
    );
    Ok(framework)
}

/// Returns the framework to generate arguments on, depending on the no-transform arg.
pub(crate) fn prepare_framework(
    framework: ABAFramework,
    arg_matches: &ArgMatches<'_>,
) -> ABAFramework {
    if arg_matches.is_present(ARG_NO_TRANSFORM) {
        info!("skipping the cycle removal and atomicity transforms");
        framework
    } else {
        let prepared = framework.prepare();
        info!(
            "the prepared framework has {} literal(s), {} assumption(s) and {} rule(s)",
            prepared.language().len(),
            prepared.n_assumptions(),
            prepared.n_rules(),
        );
        prepared
    }
}

pub(crate) fn read_file_path_with<F, R>(file_path: &str, reader: &F) -> Result<R>
where
    F: Fn(&mut dyn Read) -> Result<R>,
{
    let canonicalized = canonicalize_file_path(file_path)?;
    info!("reading input file {:?}", canonicalized);
    let mut file_reader = BufReader::new(
        File::open(&canonicalized)
            .with_context(|| format!(r#"while opening file "{}""#, file_path))?,
    );
    (reader)(&mut file_reader).with_context(|| format!(r#"while reading file "{}""#, file_path))
}

/// Canonicalize a path given by the user.
pub(crate) fn canonicalize_file_path(file_path: &str) -> Result<PathBuf> {
    fs::canonicalize(PathBuf::from(file_path))
        .with_context(|| format!(r#"while opening file "{}""#, file_path))
}
