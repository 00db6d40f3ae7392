use clap::Parser;

mod cli;
mod cmd;
mod error;
mod format;
mod io;

pub use cli::{Cli, Command, OutputFormat, PathOrStdin};

use crate::cmd::find::FindOptions;
use crate::error::CliError;
use crate::format::FormatterConfig;

fn main() {
    let cli = Cli::parse();
    let config = FormatterConfig::from_flags(cli.no_color, cli.quiet, cli.verbose);

    if let Err(e) = dispatch(&cli, &config) {
        // Nothing more can be reported if stderr itself is gone.
        format::write_error(&mut std::io::stderr().lock(), &e, &config).ok();
        std::process::exit(e.exit_code());
    }
}

fn dispatch(cli: &Cli, config: &FormatterConfig) -> Result<(), CliError> {
    match &cli.command {
        Command::Find {
            file,
            skip_header,
            recursive,
            sort_by_length,
            parent_first,
        } => {
            let options = FindOptions {
                skip_header: *skip_header,
                recursive: *recursive,
                sort_by_length: *sort_by_length,
                parent_first: *parent_first,
            };
            cmd::find::run(file, &options, cli.format, cli.max_file_size, config)
        }
        Command::Inspect { file, skip_header } => {
            cmd::inspect::run(file, *skip_header, cli.format, cli.max_file_size, config)
        }
    }
}
