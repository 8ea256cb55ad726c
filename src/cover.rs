use std::fmt::Write as _;
use std::time::Instant;

use tracing::{debug, info};

use crate::decoder::{decode, CliquePartition};
use crate::encoder::{encode, AmoEncoding};
use crate::error::{Error, Result};
use crate::graph::{checker, CheckerResult, Graph};
use crate::solver::{SatSolver, SolveResult};

/** answer to "can the graph be covered by k cliques?" */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverOutcome {
    /// a partition into at most k cliques
    Cover(CliquePartition),
    /// no clique cover of size k exists
    NoCover,
}

/**
decides if `graph` has a clique cover of size k, using `solver` on the
encoding built by `encode`.

k = 0 is answered without calling the solver. Returned covers are checked
against the graph.
*/
pub fn solve_clique_cover<S:SatSolver + ?Sized>(
    graph:&Graph,
    k:usize,
    amo:AmoEncoding,
    solver:&S
) -> Result<CoverOutcome> {
    if k == 0 {
        info!("k = 0: no clique cover");
        return Ok(CoverOutcome::NoCover);
    }
    let formula = encode(graph, k, amo);
    let t_start = Instant::now();
    let result = solver.solve(&formula)?;
    debug!("solved in {:.3}s", t_start.elapsed().as_secs_f32());
    match result {
        SolveResult::Unsatisfiable => Ok(CoverOutcome::NoCover),
        SolveResult::Satisfiable(model) => {
            let partition = decode(&model, graph.nb_vertices(), k)?;
            match checker(graph, partition.cliques()) {
                CheckerResult::Ok(nb) => {
                    info!("found a cover with {} cliques", nb);
                    Ok(CoverOutcome::Cover(partition))
                }
                e => Err(Error::InternalConsistency(format!(
                    "decoded partition is not a clique cover: {:?}", e
                ))),
            }
        }
    }
}

/** human readable verdict:
```text
SAT: clique cover exists with 2 cliques
clique 1: 1 2 3
clique 2: 4 5 6
```
or `UNSAT: no clique cover of size k`.
*/
pub fn report(outcome:&CoverOutcome, k:usize) -> String {
    match outcome {
        CoverOutcome::NoCover => format!("UNSAT: no clique cover of size {}\n", k),
        CoverOutcome::Cover(partition) => {
            let mut res = format!(
                "SAT: clique cover exists with {} cliques\n", partition.nb_cliques()
            );
            for (c,vertices) in partition.iter() {
                let _ = write!(res, "clique {}:", c);
                for v in vertices {
                    let _ = write!(res, " {}", v);
                }
                res.push('\n');
            }
            res
        }
    }
}
