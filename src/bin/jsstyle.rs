//! Command-line interface for jsstyle
//! Inspects how the core passes see a file and runs the file level checks.
//!
//! Usage:
//!   jsstyle tokens `<path>`                                - List the token chain
//!   jsstyle contexts `<path>` [--format `<format>`]        - Print the context tree
//!   jsstyle check `<path>`... [--config `<file>`] [--disable `<codes>`] [--strict]

use clap::{value_parser, Arg, ArgAction, Command};
use jsstyle::config::{LintConfig, Loader};
use jsstyle::ecma::checking::{FindingCollector, NoRules, Runner};
use jsstyle::ecma::formats::{Analysis, FormatRegistry};
use jsstyle::ecma::lexing::{tokenize, LexerMode};
use jsstyle::ecma::structure::build_contexts;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("jsstyle")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect and check ECMAScript sources")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("tokens").about("List the token chain of a file").arg(
                Arg::new("path")
                    .help("Path to the source file")
                    .required(true)
                    .index(1),
            ),
        )
        .subcommand(
            Command::new("contexts")
                .about("Print the context tree of a file")
                .arg(
                    Arg::new("path")
                        .help("Path to the source file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format ('treeviz' or 'json')")
                        .default_value("treeviz"),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Run the file level checks")
                .arg(
                    Arg::new("paths")
                        .help("Files to check")
                        .required(true)
                        .num_args(1..)
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .help("Configuration file layered over the defaults")
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("disable")
                        .long("disable")
                        .help("Comma separated error codes to suppress")
                        .value_delimiter(',')
                        .action(ArgAction::Append)
                        .value_parser(value_parser!(i32)),
                )
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .help("Enable the stricter optional rules")
                        .action(ArgAction::SetTrue),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("tokens", tokens_matches)) => {
            let path = tokens_matches.get_one::<String>("path").unwrap();
            handle_format_command(path, "tokens");
        }
        Some(("contexts", contexts_matches)) => {
            let path = contexts_matches.get_one::<String>("path").unwrap();
            let format = contexts_matches.get_one::<String>("format").unwrap();
            handle_format_command(path, format);
        }
        Some(("check", check_matches)) => {
            let paths: Vec<&PathBuf> = check_matches.get_many::<PathBuf>("paths").unwrap().collect();
            let config_file = check_matches.get_one::<PathBuf>("config");
            let disabled: Vec<i32> = check_matches
                .get_many::<i32>("disable")
                .map(|codes| codes.copied().collect())
                .unwrap_or_default();
            let strict = check_matches.get_flag("strict");
            let config = load_config(config_file, disabled, strict).unwrap_or_else(|e| {
                eprintln!("Configuration error: {}", e);
                std::process::exit(2);
            });
            let clean = handle_check_command(&paths, &config);
            if !clean {
                std::process::exit(1);
            }
        }
        _ => unreachable!(),
    }
}

fn load_config(
    file: Option<&PathBuf>,
    disabled: Vec<i32>,
    strict: bool,
) -> Result<LintConfig, ::config::ConfigError> {
    let mut loader = Loader::new().with_project_dir(".");
    if let Some(file) = file {
        loader = loader.with_file(file);
    }
    if !disabled.is_empty() {
        loader = loader.disable(&disabled)?;
    }
    if strict {
        loader = loader.strict(true)?;
    }
    loader.build()
}

/// Lex and structure a file, then print it in `format`.
fn handle_format_command(path: &str, format: &str) {
    let source = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file: {}", e);
        std::process::exit(1);
    });

    let lexed = tokenize(&source);
    if lexed.final_mode != LexerMode::Text {
        eprintln!("warning: file ended in mode \"{}\"", lexed.final_mode);
    }
    let tree = match build_contexts(&lexed.chain) {
        Ok(tree) => tree,
        Err(e) => {
            let line = lexed.chain[e.token()].line_number;
            eprintln!("warning: {} (line {}); output is partial", e, line);
            e.partial
        }
    };

    let analysis = Analysis {
        chain: &lexed.chain,
        tree: &tree,
    };
    let output = FormatRegistry::default()
        .serialize(&analysis, format)
        .unwrap_or_else(|e| {
            eprintln!("Format error: {}", e);
            std::process::exit(1);
        });
    print!("{}", output);
}

/// Check every file and print the findings. Returns whether nothing was found.
fn handle_check_command(paths: &[&PathBuf], config: &LintConfig) -> bool {
    let runner = Runner::new(config);
    let mut collector = FindingCollector::default();
    let mut reports = Vec::new();

    for path in paths {
        let path: &Path = path.as_path();
        let mut rules = NoRules;
        match runner.check_path(path, &mut rules, &mut collector) {
            Ok(report) => reports.push(Some(report)),
            Err(e) => {
                eprintln!("{}", e);
                reports.push(None);
            }
        }
    }

    for (file, report) in collector.files().iter().zip(&reports) {
        if file.findings.is_empty() {
            continue;
        }
        println!("----- FILE  :  {} -----", file.filename);
        for finding in &file.findings {
            match report.as_ref().and_then(|report| report.line_of(finding)) {
                Some(line) => println!("Line {}, {}", line, finding),
                None => println!("{}", finding),
            }
        }
    }

    let total = collector.findings().len();
    if total == 0 {
        println!("{} files checked, no errors found.", paths.len());
    } else {
        println!("Found {} errors in {} files.", total, collector.files().len());
    }
    total == 0
}
