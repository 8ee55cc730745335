use std::env::args_os;
use std::process::ExitCode;

use image_stats::{run, CLIParser};

fn main() -> ExitCode {
    let mut cli_parser = CLIParser::default();
    let arguments = cli_parser.parse(args_os());
    match run(&arguments) {
        Ok(report) => {
            println!("{}", report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Processing of {:?} failed: {}", arguments, e);
            eprintln!("Processing failed because of: {}", e);
            ExitCode::FAILURE
        }
    }
}
