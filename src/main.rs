mod affected_vfs;
mod callgraph;
mod cli;
mod diff;
mod driver;
mod emit;
mod error;
mod model;
mod ordered_set;
mod propagate;
mod visitor;

use clap::error::ErrorKind;
use clap::Parser;

use cli::Cli;
use error::exit_codes;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => exit_codes::SUCCESS,
                _ => exit_codes::USER_ERROR,
            };
            std::process::exit(code);
        }
    };

    for source in &cli.sources {
        driver::run_one(source, &cli);
    }

    std::process::exit(exit_codes::SUCCESS);
}
