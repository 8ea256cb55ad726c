use std::fs;
use std::time::Duration;

use clap::ArgMatches;
use serde_json::Value;
use tracing::info;

use crate::{
    cover::CoverOutcome,
    dimacs::read_dimacs_graph,
    encoder::AmoEncoding,
    error::{Error, Result},
    input::CoverInstance,
    solver::SolverConfig,
};

/** command line parameters of the executable */
#[derive(Debug, Clone)]
pub struct Params {
    /// instance file
    pub inst_filename: String,
    /// instance format ("cover" or "dimacs")
    pub instance_type: String,
    /// k given on the command line
    pub k: Option<usize>,
    /// only print the CNF formula
    pub print_cnf: bool,
    /// file where the CNF formula is written
    pub cnf_file: Option<String>,
    /// external solver to call
    pub solver: SolverConfig,
    /// at-most-one-color encoding
    pub amo: AmoEncoding,
    /// file where the solution is written
    pub sol_file: Option<String>,
    /// file where the statistics are written
    pub perf_file: Option<String>,
    /// number of -v flags
    pub verbosity: u64,
}

/** reads command line input */
pub fn read_params(main_args:&ArgMatches) -> Result<Params> {
    let inst_filename = main_args.value_of("input")
        .ok_or_else(|| Error::InvalidInput("missing --input".to_string()))?
        .to_string();
    let instance_type = main_args.value_of("type").unwrap_or("cover").to_string();
    let k = match main_args.value_of("k") {
        None => None,
        Some(s) => Some(s.parse::<usize>().map_err(|_|
            Error::InvalidInput(format!("unable to parse k: {}", s))
        )?),
    };
    let timeout = match main_args.value_of("timeout") {
        None => None,
        Some(s) => match s.parse::<f32>().ok().map(Duration::try_from_secs_f32) {
            Some(Ok(t)) if !t.is_zero() => Some(t),
            _ => return Err(Error::InvalidInput(format!("unable to parse the time given: {}", s))),
        },
    };
    let mut solver = SolverConfig {
        timeout,
        ..SolverConfig::default()
    };
    if let Some(program) = main_args.value_of("solver") {
        solver.program = program.to_string();
    }
    if let Some(args) = main_args.values_of("solver_arg") {
        solver.args = args.map(|a| a.to_string()).collect();
    }
    let amo = match main_args.value_of("amo") {
        None => AmoEncoding::default(),
        Some(s) => s.parse()?,
    };
    let sol_file = main_args.value_of("solution").map(|e| e.to_string());
    let perf_file = main_args.value_of("perf").map(|e| e.to_string());
    Ok(Params {
        inst_filename,
        instance_type,
        k,
        print_cnf: main_args.is_present("printcnf"),
        cnf_file: main_args.value_of("cnf").map(|e| e.to_string()),
        solver,
        amo,
        sol_file,
        perf_file,
        verbosity: main_args.occurrences_of("verbose"),
    })
}

/** reads the instance described by the parameters.
`k` on the command line replaces the one of the file. It is required for DIMACS instances.
*/
pub fn read_instance(params:&Params) -> Result<CoverInstance> {
    info!("reading instance: {}...", params.inst_filename);
    let instance = match params.instance_type.as_str() {
        "cover" => {
            let mut inst = CoverInstance::from_file(&params.inst_filename)?;
            if let Some(k) = params.k { inst.k = k; }
            inst
        },
        "dimacs" => {
            let k = params.k.ok_or_else(|| Error::InvalidInput(
                "DIMACS instances need the number of cliques (--k)".to_string()
            ))?;
            CoverInstance { graph: read_dimacs_graph(&params.inst_filename)?, k }
        },
        t => return Err(Error::InvalidInput(format!(
            "instance type unknown {} (valid: 'cover', 'dimacs')", t
        ))),
    };
    instance.graph.display_statistics();
    Ok(instance)
}

/** writes a string encoding the solution. each line corresponds to a clique. */
pub fn solution_to_string(outcome:&CoverOutcome) -> String {
    let mut res = String::default();
    if let CoverOutcome::Cover(partition) = outcome {
        for clique in partition.cliques() {
            let line:Vec<String> = clique.iter().map(|v| v.to_string()).collect();
            res += line.join(" ").as_str();
            res += "\n";
        }
    }
    res
}

/// exports search results to files
pub fn export_results(
    outcome:&CoverOutcome,
    stats:&Value,
    perf_file:Option<&str>,
    sol_file:Option<&str>,
) -> Result<()> {
    if let Some(filename) = perf_file {
        info!("printing perfs in: {}", filename);
        fs::write(filename, serde_json::to_string(stats)?)?;
    }
    match (sol_file, outcome) {
        (Some(filename), CoverOutcome::Cover(_)) => {
            info!("printing solutions in: {}", filename);
            fs::write(filename, solution_to_string(outcome))?;
        },
        _ => {},
    }
    Ok(())
}
