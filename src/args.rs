use clap::{Arg, ArgAction, Command};

/// Flags shared by every subcommand
fn common_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("threads")
                .short('t')
                .long("threads")
                .help("Number of CPU threads for computation (0 = auto-detect)")
                .value_name("N")
                .default_value("0"),
        )
        .arg(
            Arg::new("no-parallel")
                .long("no-parallel")
                .help("Disable all parallel processing")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-lut")
                .long("no-lut")
                .help("Multiply through log tables instead of the full product table")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Quiet mode - minimal output")
                .action(ArgAction::SetTrue),
        )
}

pub fn build_cli() -> Command {
    Command::new("rsecc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Reed-Solomon erasure coding for files: split into n pieces, rebuild from any k")
        .arg_required_else_help(true)
        .subcommand_required(true)
        .subcommand(common_args(
            Command::new("encode")
                .visible_alias("e")
                .about("Split a file into n pieces")
                .arg(
                    Arg::new("source")
                        .help("File to encode")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("prefix")
                        .help("Output prefix; pieces are named <prefix>.p_<i>")
                        .required(true)
                        .index(2),
                )
                .arg(
                    Arg::new("n")
                        .short('n')
                        .long("pieces")
                        .help("Total number of pieces")
                        .value_name("N")
                        .value_parser(clap::value_parser!(usize))
                        .required(true),
                )
                .arg(
                    Arg::new("k")
                        .short('k')
                        .long("required")
                        .help("Pieces needed to rebuild the file")
                        .value_name("K")
                        .value_parser(clap::value_parser!(usize))
                        .required(true),
                ),
        ))
        .subcommand(common_args(
            Command::new("decode")
                .visible_alias("d")
                .about("Rebuild a file from at least k pieces")
                .arg(
                    Arg::new("output")
                        .help("Path of the rebuilt file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("pieces")
                        .help("Piece files; the first k are used")
                        .required(true)
                        .num_args(1..)
                        .index(2),
                ),
        ))
}

pub fn parse_args() -> clap::ArgMatches {
    build_cli().get_matches()
}
