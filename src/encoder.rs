use std::str::FromStr;
use std::time::Instant;

use tracing::{debug, info};

use crate::cnf::{CnfFormula, Literal};
use crate::error::Error;
use crate::graph::{Graph, VertexId};

/** bijection between (vertex, color) pairs and the variables 1..=n·k
    index(v,c) = (v-1)·k + c
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarIndex {
    /// nb vertices
    n: usize,
    /// nb colors
    k: usize,
}

impl VarIndex {
    /// indexing for n vertices and k colors
    pub fn new(n:usize, k:usize) -> Self { Self { n, k } }

    /// number of vertices
    pub fn n(&self) -> usize { self.n }

    /// number of colors
    pub fn k(&self) -> usize { self.k }

    /// number of color assignment variables (n·k)
    pub fn nb_color_vars(&self) -> usize { self.n * self.k }

    /// variable stating that vertex v has color c (v in [1,n], c in [1,k])
    pub fn index(&self, v:VertexId, c:usize) -> usize {
        debug_assert!(v >= 1 && v <= self.n && c >= 1 && c <= self.k);
        (v-1) * self.k + c
    }

    /// positive literal of index(v,c)
    pub fn lit(&self, v:VertexId, c:usize) -> Literal {
        self.index(v, c) as Literal
    }

    /** inverse of `index`: returns (v,c), or None if the variable is not
    a color assignment variable.
    */
    pub fn vertex_color(&self, var:usize) -> Option<(VertexId,usize)> {
        if var < 1 || var > self.nb_color_vars() {
            return None;
        }
        Some(((var-1) / self.k + 1, (var-1) % self.k + 1))
    }
}


/** at-most-one-color encoding used for each vertex */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmoEncoding {
    /// one binary clause per pair of colors. O(k²) clauses, no extra variable
    Pairwise,
    /// sequential counter (Sinz). O(k) clauses, k-1 auxiliary variables per vertex
    Sequential,
}

impl Default for AmoEncoding {
    fn default() -> Self { Self::Pairwise }
}

impl FromStr for AmoEncoding {
    type Err = Error;

    fn from_str(s:&str) -> Result<Self, Self::Err> {
        match s {
            "pairwise" => Ok(Self::Pairwise),
            "sequential" => Ok(Self::Sequential),
            _ => Err(Error::InvalidInput(format!(
                "unknown at-most-one encoding {} (valid: 'pairwise', 'sequential')", s
            ))),
        }
    }
}


/**
builds a CNF formula that is satisfiable iff the vertices of `graph` can be
partitioned into at most k cliques.

variables 1..=n·k follow `VarIndex`. Clauses are generated in this order:
 1. every vertex has at least one color
 2. every vertex has at most one color (see `AmoEncoding`)
 3. for each edge {u,v} of the complement and each color c: ¬(u,c) ∨ ¬(v,c)

with the sequential encoding, auxiliary variables are numbered after n·k.
k = 0 has no cover: the result is `CnfFormula::contradiction()`.
*/
pub fn encode(graph:&Graph, k:usize, amo:AmoEncoding) -> CnfFormula {
    if k == 0 {
        debug!("k = 0: emitting a contradiction");
        return CnfFormula::contradiction();
    }
    let t_start = Instant::now();
    let n = graph.nb_vertices();
    let idx = VarIndex::new(n, k);
    let mut formula = CnfFormula::new(idx.nb_color_vars());
    // 1) at least one color
    for v in 1..=n {
        formula.add_clause((1..=k).map(|c| idx.lit(v, c)).collect());
    }
    // 2) at most one color
    match amo {
        AmoEncoding::Pairwise => {
            for v in 1..=n {
                for c in 1..=k {
                    for d in c+1..=k {
                        formula.add_clause(vec![-idx.lit(v, c), -idx.lit(v, d)]);
                    }
                }
            }
        }
        AmoEncoding::Sequential => {
            if k > 1 {
                let first_aux = formula.new_vars(n * (k-1));
                for v in 1..=n {
                    // s(i) is true if one of the colors 1..=i is taken
                    let s = |i:usize| (first_aux + (v-1)*(k-1) + i - 1) as Literal;
                    formula.add_clause(vec![-idx.lit(v, 1), s(1)]);
                    for i in 2..k {
                        formula.add_clause(vec![-idx.lit(v, i), s(i)]);
                        formula.add_clause(vec![-s(i-1), s(i)]);
                        formula.add_clause(vec![-idx.lit(v, i), -s(i-1)]);
                    }
                    formula.add_clause(vec![-idx.lit(v, k), -s(k-1)]);
                }
            }
        }
    }
    // 3) vertices not adjacent in the graph can not share a color
    let complement = graph.complement();
    for &(u,v) in complement.edges() {
        for c in 1..=k {
            formula.add_clause(vec![-idx.lit(u, c), -idx.lit(v, c)]);
        }
    }
    info!(
        vars = formula.num_vars(),
        clauses = formula.num_clauses(),
        complement_edges = complement.nb_edges(),
        "encoded clique cover of size {} in {:.3}s", k, t_start.elapsed().as_secs_f32()
    );
    formula
}
