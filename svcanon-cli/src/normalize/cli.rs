use clap::{Command, arg, value_parser};

pub const NORMALIZE_CMD: &str = "normalize";

pub fn create_normalize_cli() -> Command {
    Command::new(NORMALIZE_CMD)
        .author("Databio")
        .about("Reduce SV records of a VCF to canonical intervals with stable identifiers")
        .arg_required_else_help(true)
        .arg(arg!(-i --input <input> "The SV input file (VCF, optionally gzipped, or BED)").required(true))
        .arg(arg!(-o --output <output> "Directory the output files are written to").required(true))
        .arg(arg!(-c --config <config> "TOML file with run settings"))
        .arg(
            arg!(--"sv-min-size" <size> "Minimum SV length for sequence-notation records")
                .value_parser(value_parser!(u64).range(1..)),
        )
        .arg(
            arg!(--"include-ci" <flag> "Widen intervals with CIPOS/CIEND (0 or 1)")
                .value_parser(["0", "1"]),
        )
        .arg(
            arg!(--"sv-input-info" <flag> "Carry every input column instead of REF, ALT and FORMAT (0 or 1)")
                .value_parser(["0", "1"]),
        )
}
