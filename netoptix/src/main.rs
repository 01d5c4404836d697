use clap::ArgMatches;
use colored::Colorize;
use commands::command_argument_builder;
use netoptix::handlers::{
    handle_check, handle_init, handle_logs, handle_show, handle_ui, verbosity_level,
};
use netoptix_core::print_banner;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

mod commands;

fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");
    let interactive = matches!(chosen_command.subcommand(), None | Some(("ui", _)));

    init_tracing(&chosen_command, interactive);

    // The banner would be wiped by the alternate screen anyway
    if !quiet && !interactive {
        print_banner();
    }

    let topology = chosen_command.get_one::<PathBuf>("topology").map(PathBuf::as_path);

    let result = match chosen_command.subcommand() {
        None | Some(("ui", _)) => handle_ui(topology),
        Some(("show", _)) => handle_show(topology),
        Some(("logs", primary_command)) => {
            let node = primary_command
                .get_one::<String>("NODE")
                .map(String::as_str)
                .unwrap_or_default();
            handle_logs(topology, node)
        }
        Some(("check", primary_command)) => {
            let path = primary_command.get_one::<PathBuf>("PATH").map(PathBuf::as_path);
            handle_check(path.or(topology))
        }
        Some(("init", primary_command)) => {
            let path = primary_command
                .get_one::<String>("PATH")
                .map(String::as_str)
                .unwrap_or(netoptix_core::config::DEFAULT_CONFIG_PATH);
            handle_init(Path::new(path), primary_command.get_flag("force"))
        }
        _ => unreachable!("clap should ensure we don't get here"),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}

/// stderr for one-shot commands; the full-screen UI only logs to `--log-file`.
fn init_tracing(matches: &ArgMatches, interactive: bool) {
    let level = verbosity_level(matches.get_count("verbose"));
    let builder = tracing_subscriber::fmt().with_max_level(level).with_target(false);

    match matches.get_one::<PathBuf>("log-file") {
        Some(path) => match File::create(path) {
            Ok(file) => builder.with_writer(Mutex::new(file)).with_ansi(false).init(),
            Err(e) => eprintln!(
                "{} Cannot open log file {}: {}",
                "⚠".yellow().bold(),
                path.display(),
                e
            ),
        },
        None if interactive => {}
        None => builder.with_writer(std::io::stderr).init(),
    }
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
