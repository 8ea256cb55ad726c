use std::io::{self, Read, Write};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use bit_set::BitSet;
use tracing::{debug, info, warn};

use crate::cnf::{CnfFormula, Literal};
use crate::error::{Error, Result};

/** satisfying assignment returned by a solver: one signed literal per variable */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    literals: Vec<Literal>,
}

impl Model {
    /// wraps a list of literals
    pub fn new(literals:Vec<Literal>) -> Self { Self { literals } }

    /// literals, in the order given by the solver
    pub fn literals(&self) -> &[Literal] { &self.literals }

    /// number of assigned variables
    pub fn len(&self) -> usize { self.literals.len() }

    /// true if nothing is assigned
    pub fn is_empty(&self) -> bool { self.literals.is_empty() }
}

/** verdict of a solver on a formula */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveResult {
    /// the formula is satisfiable, and the model satisfies it
    Satisfiable(Model),
    /// the formula has no model
    Unsatisfiable,
}

/** a SAT solving backend.

Failures to run the solver (or to understand its answer) are errors, they
are never reported as `Unsatisfiable`.
*/
pub trait SatSolver {
    /// solves the formula
    fn solve(&self, formula:&CnfFormula) -> Result<SolveResult>;
}


/** configuration of an external DIMACS solver process */
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// executable name or path
    pub program: String,
    /// arguments given before the CNF file path
    pub args: Vec<String>,
    /// kills the solver after this duration
    pub timeout: Option<Duration>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            program: "glucose".to_string(),
            args: vec!["-model".to_string()],
            timeout: None,
        }
    }
}

/** runs a DIMACS solver executable on a temporary CNF file and reads its
    standard output (`s ...` status line, `v ...` model lines).
*/
#[derive(Debug, Clone, Default)]
pub struct ExternalSolver {
    config: SolverConfig,
}

impl ExternalSolver {
    /// default solver (glucose -model)
    pub fn new() -> Self { Self::default() }

    /// solver with a custom configuration
    pub fn with_config(config:SolverConfig) -> Self { Self { config } }

    /// configuration
    pub fn config(&self) -> &SolverConfig { &self.config }
}

impl SatSolver for ExternalSolver {
    fn solve(&self, formula:&CnfFormula) -> Result<SolveResult> {
        let mut cnf_file = tempfile::Builder::new()
            .prefix("clique-cover-")
            .suffix(".cnf")
            .tempfile()?;
        cnf_file.write_all(formula.to_dimacs().as_bytes())?;
        cnf_file.flush()?;
        info!(
            program = self.config.program.as_str(),
            cnf = %cnf_file.path().display(),
            "calling the solver"
        );
        let t_start = Instant::now();
        let mut child = Command::new(&self.config.program)
            .args(&self.config.args)
            .arg(cnf_file.path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => Error::AdapterUnavailable(format!(
                    "{} not found. Ensure it is installed and in PATH", self.config.program
                )),
                _ => Error::AdapterUnavailable(format!(
                    "unable to start {}: {}", self.config.program, e
                )),
            })?;
        // drain pipes while waiting, large models do not fit in a pipe buffer
        let stdout_reader = child.stdout.take().map(spawn_reader);
        let stderr_reader = child.stderr.take().map(spawn_reader);
        let status = match self.config.timeout {
            None => child.wait()?,
            Some(limit) => loop {
                if let Some(status) = child.try_wait()? {
                    break status;
                }
                if t_start.elapsed() >= limit {
                    warn!("solver exceeded {:.1}s, killing it", limit.as_secs_f32());
                    // the process may exit between try_wait and kill
                    let _ = child.kill();
                    child.wait()?;
                    // processes spawned by the solver may still hold the pipes:
                    // the readers are detached instead of joined
                    drop(stdout_reader);
                    drop(stderr_reader);
                    return Err(Error::SolverTimeout(limit.as_secs_f32()));
                }
                thread::sleep(Duration::from_millis(10));
            },
        };
        let stdout = join_reader(stdout_reader)?;
        let stderr = join_reader(stderr_reader)?;
        info!(
            exit = ?status.code(),
            "solver returned in {:.3}s", t_start.elapsed().as_secs_f32()
        );
        if !stderr.trim().is_empty() {
            debug!("solver stderr: {}", stderr.trim());
        }
        parse_solver_output(&stdout, formula.num_vars())
    }
}

fn spawn_reader<R:Read + Send + 'static>(mut pipe:R) -> thread::JoinHandle<io::Result<String>> {
    thread::spawn(move || {
        let mut buf = String::new();
        pipe.read_to_string(&mut buf)?;
        Ok(buf)
    })
}

fn join_reader(reader:Option<thread::JoinHandle<io::Result<String>>>) -> Result<String> {
    match reader {
        None => Ok(String::new()),
        Some(handle) => match handle.join() {
            Ok(res) => Ok(res?),
            Err(_) => Err(Error::AdapterUnavailable(
                "solver output reader panicked".to_string()
            )),
        }
    }
}


/**
interprets the standard output of a DIMACS solver.

 - `c` lines are comments
 - any other line containing "UNSAT" means the formula is unsatisfiable
 - `v` lines list the model, possibly over several lines, ended by a 0

the model must give exactly one value to each variable 1..=num_vars.
Anything else is a `MalformedSolverOutput` error.
*/
pub fn parse_solver_output(stdout:&str, num_vars:usize) -> Result<SolveResult> {
    let lines:Vec<&str> = stdout.lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();
    if lines.is_empty() {
        return Err(Error::MalformedSolverOutput("empty solver output".to_string()));
    }
    let lines:Vec<&str> = lines.into_iter().filter(|l| !l.starts_with('c')).collect();
    if lines.iter().any(|l| l.contains("UNSAT")) {
        return Ok(SolveResult::Unsatisfiable);
    }
    let mut literals = Vec::with_capacity(num_vars);
    let mut nb_model_lines = 0;
    let mut terminated = false;
    for line in lines.iter().filter(|l| l.starts_with('v')) {
        nb_model_lines += 1;
        for token in line[1..].split_whitespace() {
            if terminated {
                return Err(Error::MalformedSolverOutput(format!(
                    "literal {} after the end of the model", token
                )));
            }
            let lit:Literal = token.parse().map_err(|_|
                Error::MalformedSolverOutput(format!("invalid literal {}", token))
            )?;
            if lit == 0 {
                terminated = true;
            } else {
                literals.push(lit);
            }
        }
    }
    if nb_model_lines == 0 {
        return Err(Error::MalformedSolverOutput(format!(
            "neither UNSAT nor a model in the solver output: {}", lines.join(" | ")
        )));
    }
    // exactly one value per variable
    let mut assigned = BitSet::with_capacity(num_vars + 1);
    for &lit in &literals {
        let var = lit.unsigned_abs() as usize;
        if var > num_vars {
            return Err(Error::MalformedSolverOutput(format!(
                "literal {} outside of the {} variables", lit, num_vars
            )));
        }
        if !assigned.insert(var) {
            return Err(Error::MalformedSolverOutput(format!("variable {} assigned twice", var)));
        }
    }
    if literals.len() != num_vars {
        return Err(Error::MalformedSolverOutput(format!(
            "model assigns {} variables out of {}", literals.len(), num_vars
        )));
    }
    debug!(nb_model_lines, "model read");
    Ok(SolveResult::Satisfiable(Model::new(literals)))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unsat() {
        let out = "c glucose 4.1\nc restarts: 3\ns UNSATISFIABLE\n";
        assert_eq!(parse_solver_output(out, 4).unwrap(), SolveResult::Unsatisfiable);
    }

    #[test]
    fn test_parse_model_over_several_lines() {
        let out = "c comment\ns SATISFIABLE\nv 1 -2\nv -3 4 0\n";
        assert_eq!(
            parse_solver_output(out, 4).unwrap(),
            SolveResult::Satisfiable(Model::new(vec![1, -2, -3, 4]))
        );
    }

    #[test]
    fn test_parse_empty_output() {
        assert!(matches!(parse_solver_output("", 3), Err(Error::MalformedSolverOutput(_))));
        assert!(matches!(parse_solver_output("\n  \n", 3), Err(Error::MalformedSolverOutput(_))));
    }

    #[test]
    fn test_parse_no_verdict() {
        let out = "c parsing\nSegmentation fault\n";
        assert!(matches!(parse_solver_output(out, 3), Err(Error::MalformedSolverOutput(_))));
    }

    #[test]
    fn test_parse_unsat_in_comment_is_ignored() {
        let out = "c UNSAT cores: 0\ns SATISFIABLE\nv 1 0\n";
        assert_eq!(
            parse_solver_output(out, 1).unwrap(),
            SolveResult::Satisfiable(Model::new(vec![1]))
        );
    }

    #[test]
    fn test_parse_bad_models() {
        // not a number
        assert!(parse_solver_output("v 1 x 0\n", 2).is_err());
        // out of range
        assert!(parse_solver_output("v 1 -3 0\n", 2).is_err());
        // repeated variable
        assert!(parse_solver_output("v 1 -1 0\n", 2).is_err());
        // missing variable
        assert!(parse_solver_output("v 1 0\n", 2).is_err());
        // literal after the terminator
        assert!(parse_solver_output("v 1 0\nv 2\n", 2).is_err());
    }

    #[test]
    fn test_missing_executable() {
        let solver = ExternalSolver::with_config(SolverConfig {
            program: "clique-cover-no-such-solver".to_string(),
            args: vec![],
            timeout: None,
        });
        let res = solver.solve(&CnfFormula::contradiction());
        assert!(matches!(res, Err(Error::AdapterUnavailable(_))));
    }

    #[cfg(unix)]
    fn shell_solver(script:&str, timeout:Option<Duration>) -> ExternalSolver {
        // sh -c <script> sh <cnf file>: the script sees the file as $1
        ExternalSolver::with_config(SolverConfig {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), script.to_string(), "sh".to_string()],
            timeout,
        })
    }

    #[cfg(unix)]
    #[test]
    fn test_external_unsat() {
        let solver = shell_solver("echo 's UNSATISFIABLE'; exit 20", None);
        assert_eq!(solver.solve(&CnfFormula::contradiction()).unwrap(), SolveResult::Unsatisfiable);
    }

    #[cfg(unix)]
    #[test]
    fn test_external_receives_the_formula() {
        // echoes the header back as a model line of the right size
        let solver = shell_solver(
            "head -n 1 \"$1\" | grep -q '^p cnf 1 2$' && echo 's SATISFIABLE' && echo 'v -1 0'",
            None
        );
        assert_eq!(
            solver.solve(&CnfFormula::contradiction()).unwrap(),
            SolveResult::Satisfiable(Model::new(vec![-1]))
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_external_crash_is_not_unsat() {
        let solver = shell_solver("exit 1", None);
        assert!(matches!(
            solver.solve(&CnfFormula::contradiction()),
            Err(Error::MalformedSolverOutput(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_external_timeout() {
        let solver = shell_solver("exec sleep 5", Some(Duration::from_millis(100)));
        assert!(matches!(
            solver.solve(&CnfFormula::contradiction()),
            Err(Error::SolverTimeout(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_external_timeout_with_child_process() {
        // sleep runs in a child of the shell and keeps stdout open after the kill
        let solver = shell_solver("sleep 3; echo 's UNSATISFIABLE'", Some(Duration::from_millis(100)));
        let t_start = Instant::now();
        assert!(matches!(
            solver.solve(&CnfFormula::contradiction()),
            Err(Error::SolverTimeout(_))
        ));
        assert!(t_start.elapsed() < Duration::from_secs(2));
    }
}
