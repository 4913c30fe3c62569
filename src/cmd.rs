use std::path::PathBuf;

use clap::Parser;

use crate::{
    app::{run_lotbook_app_to_console, Options},
    lots::csv_common::LotCol,
    util::rw::{DescribedReader, WriteHandle},
};

const ABOUT: &str = "Security lot bookkeeping tool";

fn get_long_about() -> String {
    format!("\
Loads a CSV of security lots (buys, optionally matched with their sales),
and prints each lot along with basis, proceeds and adjustment totals.

The CSV columns are, in order:
{}
Rows are read positionally. A row starting with '{}' is treated as a header
and skipped. Dates are MM/DD/YYYY. Amounts may include '$' and commas.

Lots without a BuyLot are numbered sequentially as they are read.",
        LotCol::header_order().join(", "), LotCol::COUNT)
}

#[derive(Parser, Debug)]
#[command(version = crate::app::LOTBOOK_APP_VERSION,
          about = ABOUT, long_about = get_long_about())]
pub struct Args {
    #[arg(required = true)]
    pub csv_file: PathBuf,

    /// Save the loaded lots to this file, with all buy lots filled in.
    /// May be the same as the input file.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Do not print the lots and totals
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    /// Print verbose output
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Args {
    pub fn to_options(&self) -> Options {
        Options {
            output_path: self.output.clone(),
            skip_report: self.quiet,
        }
    }
}

pub fn command_main() -> Result<(), ()> {
    let args = Args::parse();

    crate::log::set_verbose(args.verbose);
    if args.verbose {
        crate::tracing::enable_trace_env("lotbook=debug");
    }
    crate::tracing::setup_tracing();

    tracing::debug!("command_main: {:?}", args);

    run_lotbook_app_to_console(
        DescribedReader::from_file_path(args.csv_file.clone()),
        args.to_options(),
        WriteHandle::stderr(),
    )
}
