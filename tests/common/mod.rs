#![allow(dead_code)]

use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

use clique_cover_sat::cnf::{CnfFormula, Literal};
use clique_cover_sat::error::Result;
use clique_cover_sat::graph::{Graph, VertexId};
use clique_cover_sat::solver::{Model, SatSolver, SolveResult};

/** small DPLL solver (unit propagation + branching), enough for tiny formulas */
#[derive(Debug, Default)]
pub struct DpllSolver;

impl SatSolver for DpllSolver {
    fn solve(&self, formula:&CnfFormula) -> Result<SolveResult> {
        let mut assignment = vec![0i8 ; formula.num_vars() + 1];
        if !dpll(formula.clauses(), &mut assignment) {
            return Ok(SolveResult::Unsatisfiable);
        }
        let literals:Vec<Literal> = (1..=formula.num_vars())
            .map(|v| if assignment[v] < 0 { -(v as Literal) } else { v as Literal })
            .collect();
        assert!(satisfies(formula, &literals), "DPLL returned a wrong model");
        Ok(SolveResult::Satisfiable(Model::new(literals)))
    }
}

fn dpll(clauses:&[Vec<Literal>], assignment:&mut Vec<i8>) -> bool {
    let mut trail:Vec<usize> = Vec::new();
    // unit propagation
    loop {
        let mut changed = false;
        for clause in clauses {
            let mut nb_free = 0;
            let mut free_lit = 0;
            let mut satisfied = false;
            for &l in clause {
                match assignment[l.unsigned_abs() as usize] {
                    0 => { nb_free += 1; free_lit = l; },
                    x => if (x > 0) == (l > 0) { satisfied = true; break; },
                }
            }
            if satisfied { continue; }
            if nb_free == 0 {
                for v in trail { assignment[v] = 0; }
                return false;
            }
            if nb_free == 1 {
                let v = free_lit.unsigned_abs() as usize;
                assignment[v] = if free_lit > 0 { 1 } else { -1 };
                trail.push(v);
                changed = true;
            }
        }
        if !changed { break; }
    }
    // branching
    match (1..assignment.len()).find(|&v| assignment[v] == 0) {
        None => true,
        Some(v) => {
            for value in [1, -1] {
                assignment[v] = value;
                if dpll(clauses, assignment) { return true; }
            }
            assignment[v] = 0;
            for v in trail { assignment[v] = 0; }
            false
        }
    }
}

/// true if the (complete) list of literals satisfies every clause
pub fn satisfies(formula:&CnfFormula, literals:&[Literal]) -> bool {
    let mut value = vec![false ; formula.num_vars() + 1];
    for &l in literals {
        value[l.unsigned_abs() as usize] = l > 0;
    }
    formula.clauses().iter().all(|c|
        c.iter().any(|&l| value[l.unsigned_abs() as usize] == (l > 0))
    )
}

/// random graph where each pair is an edge with probability p
pub fn random_graph(rng:&mut StdRng, n:usize, p:f64) -> Graph {
    let mut edges = Vec::new();
    for u in 1..=n {
        for v in u+1..=n {
            if rng.gen_bool(p) { edges.push((u,v)); }
        }
    }
    Graph::new(n, &edges).unwrap()
}

/// seeded random generator
pub fn rng(seed:u64) -> StdRng { StdRng::seed_from_u64(seed) }

/** brute force: is there a clique cover of size k? */
pub fn has_clique_cover(graph:&Graph, k:usize) -> bool {
    let mut color:Vec<usize> = vec![0 ; graph.nb_vertices() + 1];
    assign_colors(graph, k, 1, &mut color)
}

fn assign_colors(graph:&Graph, k:usize, v:VertexId, color:&mut Vec<usize>) -> bool {
    if v > graph.nb_vertices() { return true; }
    for c in 1..=k {
        if (1..v).all(|u| color[u] != c || graph.are_adjacent(u, v)) {
            color[v] = c;
            if assign_colors(graph, k, v+1, color) { return true; }
        }
    }
    color[v] = 0;
    false
}
