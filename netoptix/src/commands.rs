use crate::CLAP_STYLING;
use clap::{arg, command};
use netoptix_core::config::DEFAULT_CONFIG_PATH;
use std::path::PathBuf;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("netoptix")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("netoptix")
        .about("Interactive network topology inspector")
        .styles(CLAP_STYLING)
        .arg(
            arg!(-q --"quiet" "Suppress banner and non-essential output")
                .required(false)
                .global(true),
        )
        .arg(
            arg!(-t --"topology" <PATH>)
                .required(false)
                .global(true)
                .help("Topology file to load (default: ~/.config/netoptix/topology.json, then the bundled lab)")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            arg!(-v --"verbose" ...)
                .help("Increase log verbosity (-v info, -vv debug, -vvv trace)")
                .global(true),
        )
        .arg(
            arg!(--"log-file" <PATH>)
                .required(false)
                .global(true)
                .help("Write logs to this file instead of stderr (required to see logs from `ui`)")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .subcommand_required(false)
        .subcommand(command!("ui").about("Launch the interactive topology diagram (default)"))
        .subcommand(
            command!("show").about("Print every node with its status and neighbours, then every link"),
        )
        .subcommand(
            command!("logs")
                .about("Print the classified log stream of one node")
                .arg(arg!(<NODE>).required(true).help("Node id, e.g. N2")),
        )
        .subcommand(
            command!("check")
                .about("Validate a topology file and report what it contains")
                .arg(
                    arg!([PATH])
                        .required(false)
                        .help("File to validate (default: the topology that would be loaded)")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            command!("init")
                .about("Writes the bundled lab topology to disk as a starting point")
                .arg(
                    arg!([PATH])
                        .required(false)
                        .help("Where to write the topology file")
                        .default_value(DEFAULT_CONFIG_PATH),
                )
                .arg(
                    arg!(-f - -"force")
                        .help("Overwrite an existing file at the specified location.")
                        .required(false),
                ),
        )
}
