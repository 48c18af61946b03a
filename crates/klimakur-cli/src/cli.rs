//! Command-line definition

use clap::{value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;

fn measure_arg() -> Arg {
    Arg::new("measure")
        .required(true)
        .help("Measure title or code (e.g. T05)")
}

/// Build the `klimakur` command
#[must_use]
pub fn build_cli() -> Command {
    Command::new("klimakur")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Explore the Klimakur 2030 measure catalog against national targets")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("store")
                .long("store")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("JSON file the state is read from and written through to"),
        )
        .arg(
            Arg::new("state")
                .long("state")
                .global(true)
                .help("State token or share link; takes priority over --store"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Engine configuration (TOML)"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Output as JSON"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Debug logging to stderr"),
        )
        .subcommand(Command::new("summary").about("Totals, target gap and groupings for the selection"))
        .subcommand(
            Command::new("table")
                .about("List measures with the current filters and sort")
                .arg(
                    Arg::new("category")
                        .long("category")
                        .help("Sector key or label, or 'alle'"),
                )
                .arg(Arg::new("search").long("search").help("Case-insensitive title search"))
                .arg(
                    Arg::new("cost-type")
                        .long("cost-type")
                        .value_parser(["all", "known", "assumed"])
                        .help("Filter on catalog cost"),
                )
                .arg(
                    Arg::new("sort")
                        .long("sort")
                        .value_parser(["none", "title", "category", "potential", "unit_cost", "total_cost"])
                        .help("Sort column"),
                )
                .arg(
                    Arg::new("desc")
                        .long("desc")
                        .action(ArgAction::SetTrue)
                        .requires("sort")
                        .help("Sort descending"),
                ),
        )
        .subcommand(Command::new("conflicts").about("Overlapping measures in the selection"))
        .subcommand(Command::new("validate").about("Check the catalog for duplicate codes and invalid figures"))
        .subcommand(
            Command::new("share")
                .about("Print a shareable link for the current state")
                .arg(Arg::new("base").help("Address the token is appended to; prints only the fragment if omitted")),
        )
        .subcommand(
            Command::new("toggle")
                .about("Include or exclude a measure")
                .arg(measure_arg().action(ArgAction::Append).num_args(1..)),
        )
        .subcommand(Command::new("select-all").about("Include every visible measure"))
        .subcommand(Command::new("deselect-all").about("Exclude every visible measure"))
        .subcommand(
            Command::new("set-cost")
                .about("Override a measure's unit cost (NOK per tonne)")
                .arg(measure_arg())
                .arg(
                    Arg::new("value")
                        .required(true)
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(f64)),
                ),
        )
        .subcommand(
            Command::new("clear-cost")
                .about("Remove a cost override")
                .arg(measure_arg()),
        )
        .subcommand(
            Command::new("default-cost")
                .about("Unit cost assumed for measures without an assessed cost")
                .arg(Arg::new("value").required(true).value_parser(value_parser!(f64))),
        )
        .subcommand(
            Command::new("target")
                .about("Select the target scenario")
                .arg(
                    Arg::new("key")
                        .required(true)
                        .value_parser(["cut55_2030", "cut70_2035", "cut75_2035", "cut90_2050"]),
                ),
        )
        .subcommand(
            Command::new("reset")
                .about("Reset state to defaults")
                .arg(
                    Arg::new("costs")
                        .long("costs")
                        .action(ArgAction::SetTrue)
                        .help("Only reset cost overrides and the unknown-cost default"),
                ),
        )
}
