//! CLI entry point: hand-parses the DIMACS-solver convention's single-dash
//! flags the way the teacher crate's `web_server.rs` hand-parses its one
//! argument rather than pulling in `clap`.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use steiner_emv::{Driver, SolveMode, SolverConfig};

fn usage() -> &'static str {
    "usage: steiner -in <path.stp> [-el|-erickson | -dijkstra] [-list] [-seed N] [-threads N] [-v|-vv]\n\
     \n\
     -in <path>          input graph in DIMACS STP format (reads stdin if omitted)\n\
     -seed <integer>     RNG seed for the -dijkstra demo (default 123456789)\n\
     -el, -erickson      run the Erickson-Monma-Veinott DP (default)\n\
     -dijkstra           run one Dijkstra from a random source\n\
     -list               emit the reconstructed Steiner tree edge list\n\
     -threads, -T <n>    worker pool size (default: one per hardware thread)\n\
     -v, -vv             increase log verbosity\n\
     -h, -help           print this message"
}

fn parse_args(args: &[String]) -> Result<SolverConfig, String> {
    let mut config = SolverConfig::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-in" => {
                i += 1;
                let path = args.get(i).ok_or("-in requires a path argument")?;
                config.input_path = Some(PathBuf::from(path));
            }
            "-seed" => {
                i += 1;
                let seed = args.get(i).ok_or("-seed requires an integer argument")?;
                config.seed = seed.parse().map_err(|_| "invalid -seed value")?;
            }
            "-el" | "-erickson" => config.mode = SolveMode::Erickson,
            "-dijkstra" => config.mode = SolveMode::Dijkstra,
            "-list" => config.emit_solution = true,
            "-threads" | "-T" => {
                i += 1;
                let n = args.get(i).ok_or("-threads requires an integer argument")?;
                config.workers = n.parse().map_err(|_| "invalid -threads value")?;
            }
            "-v" => std::env::set_var("RUST_LOG", "debug"),
            "-vv" => std::env::set_var("RUST_LOG", "trace"),
            "-h" | "-help" | "--help" => return Err(usage().to_string()),
            other => return Err(format!("unrecognised argument '{other}'\n\n{}", usage())),
        }
        i += 1;
    }
    Ok(config)
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match parse_args(&args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    // -v/-vv set RUST_LOG before env_logger reads it.
    env_logger::init();

    let result = match &config.input_path {
        Some(path) => File::open(path)
            .map_err(|e| format!("failed to open '{}': {e}", path.display()))
            .and_then(|f| {
                Driver::new(config.clone())
                    .run(BufReader::new(f))
                    .map_err(|e| e.to_string())
            }),
        None => {
            let stdin = io::stdin();
            Driver::new(config.clone())
                .run(stdin.lock())
                .map_err(|e| e.to_string())
        }
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}
