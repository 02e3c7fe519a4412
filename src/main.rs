//! Times every configured interpreter on every configured benchmark and prints the report.

use std::io;
use std::process;

use hydrogen_bench::{cli, config, CliReport, Harness};

fn main() {
    let args = cli::parse_args();

    pretty_env_logger::formatted_builder()
        .filter_level(args.log_level())
        .init();

    let filter = match args.filter() {
        Ok(filter) => filter,
        Err(e) => {
            eprintln!("Error parsing CLI args: {}", e);
            process::exit(1);
        }
    };

    let report = CliReport::new(io::stdout(), args.color.enabled());
    let mut harness = Harness::new(report)
        .iterations(args.iterations)
        .dispersion(args.dispersion);
    if let Some(filter) = filter {
        harness = harness.filter(filter);
    }

    let languages = config::languages();
    let benchmarks = config::benchmarks();
    let written = if args.list {
        harness.list(&languages, &benchmarks)
    } else {
        // Failed pairs are already in the report and do not change the exit status
        harness.run(&languages, &benchmarks).map(|_| ())
    };

    if let Err(e) = written {
        if e.kind() != io::ErrorKind::BrokenPipe {
            eprintln!("Failed to write the report: {}", e);
            process::exit(1);
        }
    }
}
