use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::error::Result;

/// signed DIMACS literal (positive: variable true, negative: variable false)
pub type Literal = i64;

/// disjunction of literals
pub type Clause = Vec<Literal>;

/** CNF formula: number of variables and ordered list of (non-empty) clauses */
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CnfFormula {
    /// nb variables (indices 1..=num_vars)
    num_vars: usize,
    /// clauses, in generation order
    clauses: Vec<Clause>,
}

impl CnfFormula {
    /// creates an empty formula over `num_vars` variables
    pub fn new(num_vars:usize) -> Self {
        Self { num_vars, clauses: Vec::new() }
    }

    /** smallest well-formed formula that is unsatisfiable: `x1 ∧ ¬x1`.
    Stands in for an empty clause, which DIMACS solvers reject.
    */
    pub fn contradiction() -> Self {
        Self { num_vars: 1, clauses: vec![vec![1], vec![-1]] }
    }

    /// number of variables
    pub fn num_vars(&self) -> usize { self.num_vars }

    /// number of clauses
    pub fn num_clauses(&self) -> usize { self.clauses.len() }

    /// clause list
    pub fn clauses(&self) -> &[Clause] { &self.clauses }

    /// declares `nb` additional variables and returns the index of the first
    pub fn new_vars(&mut self, nb:usize) -> usize {
        let first = self.num_vars + 1;
        self.num_vars += nb;
        first
    }

    /// adds a clause
    pub fn add_clause(&mut self, clause:Clause) {
        debug_assert!(!clause.is_empty(), "empty clause");
        debug_assert!(clause.iter().all(|l| *l != 0 && l.unsigned_abs() as usize <= self.num_vars));
        self.clauses.push(clause);
    }

    /** renders the formula in the DIMACS CNF format:
    a `p cnf <vars> <clauses>` header, then one line per clause terminated by `0`.
    */
    pub fn to_dimacs(&self) -> String {
        let mut res = String::with_capacity(16 + 8 * self.clauses.len());
        let _ = writeln!(res, "p cnf {} {}", self.num_vars, self.clauses.len());
        for clause in &self.clauses {
            for lit in clause {
                let _ = write!(res, "{} ", lit);
            }
            res.push_str("0\n");
        }
        res
    }

    /// writes the DIMACS rendering into a file
    pub fn write_dimacs<P:AsRef<Path>>(&self, filename:P) -> Result<()> {
        fs::write(filename, self.to_dimacs())?;
        Ok(())
    }
}
