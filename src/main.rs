//! Clique cover decision through a reduction to SAT

#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(unsafe_code)]

use std::process;
use std::time::Instant;

use clap::{App, load_yaml};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use clique_cover_sat::cover::{report, solve_clique_cover, CoverOutcome};
use clique_cover_sat::encoder::encode;
use clique_cover_sat::error::Result;
use clique_cover_sat::solver::ExternalSolver;
use clique_cover_sat::util::{export_results, read_instance, read_params, Params};


/**
reads an instance, builds the CNF formula, calls the solver and prints
whether a clique cover of size k exists.
*/
pub fn main() {
    // parse arguments
    let yaml = load_yaml!("main_args.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    let params = match read_params(&main_args) {
        Ok(params) => params,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };
    // setup logging (on stderr, stdout is kept for the answer)
    let filter = match params.verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();
    if let Err(e) = run(&params) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(params:&Params) -> Result<()> {
    let instance = read_instance(params)?;
    let k = instance.k;
    info!("searching a clique cover of size {}", k);
    if params.print_cnf || params.cnf_file.is_some() {
        let formula = encode(&instance.graph, k, params.amo);
        if let Some(filename) = &params.cnf_file {
            info!("printing the CNF formula in: {}", filename);
            formula.write_dimacs(filename)?;
        }
        if params.print_cnf {
            print!("{}", formula.to_dimacs());
            return Ok(());
        }
    }
    // solve it
    let t_start = Instant::now();
    let solver = ExternalSolver::with_config(params.solver.clone());
    let outcome = solve_clique_cover(&instance.graph, k, params.amo, &solver)?;
    let duration = t_start.elapsed().as_secs_f32();
    print!("{}", report(&outcome, k));
    let partition = match &outcome {
        CoverOutcome::Cover(partition) => Some(partition),
        CoverOutcome::NoCover => None,
    };
    let stats = json!({
        "inst_name": params.inst_filename,
        "nb_vertices": instance.graph.nb_vertices(),
        "nb_edges": instance.graph.nb_edges(),
        "k": k,
        "sat": partition.is_some(),
        "nb_cliques": partition.map(|p| p.nb_cliques()),
        "cliques": partition,
        "time_searched": duration,
    });
    // export results
    export_results(&outcome, &stats, params.perf_file.as_deref(), params.sol_file.as_deref())
}
