//! Wires a parsed DIMACS instance to the solver kernels and emits the
//! stdout reporting contract from spec.md §6.
//!
//! Grounded on the teacher's `src/bin/web_server.rs`: a plain config struct
//! with a `Default` impl (`ServerConfig`), `env_logger::init()` called once
//! by the binary, and `println!` used for the user-facing report rather
//! than routed through `log` (the report is a stable protocol consumers
//! parse, not a debug trace).

mod timing;

use std::io::BufRead;
use std::path::PathBuf;

use log::{debug, warn};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::algorithm::dijkstra::{dijkstra, Scratch};
use crate::{dimacs, Csr, Emv, SteinerError};
use timing::Timer;

/// Which kernel the driver should run once the graph is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveMode {
    /// Run the full EMV dynamic program over the declared terminal set.
    Erickson,
    /// Run one Dijkstra from a random source (spec.md §6's `-dijkstra`).
    Dijkstra,
}

/// Everything the CLI surface needs to hand the driver, built by
/// `src/bin/steiner.rs` from `std::env::args()`.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    pub input_path: Option<PathBuf>,
    pub seed: u64,
    pub mode: SolveMode,
    pub emit_solution: bool,
    pub workers: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            input_path: None,
            seed: 123_456_789,
            mode: SolveMode::Erickson,
            emit_solution: false,
            workers: 0,
        }
    }
}

/// The outcome of one `Driver::run`, returned so callers (the CLI binary,
/// or a test) can inspect it without re-parsing stdout.
#[derive(Debug, Clone)]
pub struct DriverReport {
    pub cost: i64,
    pub edges: Vec<(u32, u32)>,
}

pub struct Driver {
    config: SolverConfig,
}

impl Driver {
    pub fn new(config: SolverConfig) -> Self {
        Driver { config }
    }

    /// Parses `reader` as a DIMACS STP instance and runs the configured
    /// solve mode, printing spec.md §6's reporting lines to stdout.
    pub fn run<R: BufRead>(&self, reader: R) -> crate::Result<DriverReport> {
        let graph = dimacs::parse(reader)?;
        let csr = Csr::build(graph.n, &graph.edges)?;

        println!(
            "input: n = {}, m = {}, k = {}, cost = {}",
            csr.vertex_count(),
            csr.edge_count(),
            graph.terminals.len(),
            graph
                .known_cost
                .map(|c| c.to_string())
                .unwrap_or_else(|| "?".to_string())
        );
        println!(
            "terminals: {}",
            graph
                .terminals
                .iter()
                .map(|t| (t + 1).to_string())
                .collect::<Vec<_>>()
                .join(" ")
        );

        let report = match self.config.mode {
            SolveMode::Dijkstra => self.run_dijkstra(&csr),
            SolveMode::Erickson => self.run_erickson(&csr, &graph),
        }?;

        if self.config.mode == SolveMode::Erickson {
            if let Some(expected) = graph.known_cost {
                if expected != report.cost {
                    warn!(
                        "declared cost {} does not match computed cost {}",
                        expected, report.cost
                    );
                    return Err(SteinerError::CostMismatch {
                        expected,
                        computed: report.cost,
                    });
                }
            }
        }

        if self.config.emit_solution {
            let edges: Vec<String> = report
                .edges
                .iter()
                .map(|(u, v)| format!("\"{} {}\"", u + 1, v + 1))
                .collect();
            println!("solution: [{}]", edges.join(", "));
        }

        print_footer(self.config.workers);

        Ok(report)
    }

    fn run_dijkstra(&self, csr: &Csr) -> crate::Result<DriverReport> {
        let timer = Timer::start();
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let source = rng.gen_range(0..csr.vertex_count());
        let mut scratch = Scratch::with_capacity(csr.vertex_count());
        dijkstra(csr, source, &mut scratch);
        let elapsed = timer.elapsed_ms();
        debug!("dijkstra from {} finished in {} ms", source, elapsed);
        println!("dijkstra: [{} ms] source: {}", elapsed, source + 1);
        Ok(DriverReport {
            cost: 0,
            edges: Vec::new(),
        })
    }

    fn run_erickson(
        &self,
        csr: &Csr,
        graph: &dimacs::DimacsGraph,
    ) -> crate::Result<DriverReport> {
        let kernel_timer = Timer::start();
        let emv = Emv::new(self.config.workers, self.config.emit_solution)?;
        let kernel_ms = kernel_timer.elapsed_ms();

        let solve_timer = Timer::start();
        let solution = emv.solve(csr, &graph.terminals)?;
        let total_ms = solve_timer.elapsed_ms();

        debug!(
            "erickson: {} workers, {} terminals",
            emv.worker_count(),
            graph.terminals.len()
        );
        println!(
            "erickson: [kernel: {} ms] done. [{} ms] [cost: {}]",
            kernel_ms, total_ms, solution.cost
        );

        Ok(DriverReport {
            cost: solution.cost,
            edges: solution.edges,
        })
    }
}

fn print_footer(workers: usize) {
    let workers = if workers == 0 {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    } else {
        workers
    };
    let host = std::env::consts::OS;
    let build = if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    };
    println!("host: {}-{}", host, std::env::consts::ARCH);
    println!("build: {}", build);
    println!("num threads: {}", workers);
    println!("compiler: rustc");
}
