use bit_set::BitSet;
use tracing::info;

use crate::error::{Error, Result};

/** Vertex Id (1-indexed: vertices are 1..=n) */
pub type VertexId = usize;

/** models an undirected graph whose vertices should be covered by cliques */
#[derive(Debug, Clone)]
pub struct Graph {
    /// nb vertices
    n: usize,
    /// edges of the graph, normalized as (u,v) with u < v
    edges: Vec<(VertexId,VertexId)>,
    /// adj_list[u-1]: list of vertices adjacent to u
    adj_list: Vec<Vec<VertexId>>,
    /// adj_matrix[u-1] represents a bitset of the neighbors of u
    adj_matrix: Vec<BitSet>,
}

/** complement of a graph: every pair u < v that is not an edge of it.
Pairs are listed in lexicographic order.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplementGraph {
    /// nb vertices
    n: usize,
    /// non-edges of the original graph
    edges: Vec<(VertexId,VertexId)>,
}

impl ComplementGraph {
    /// number of vertices
    pub fn nb_vertices(&self) -> usize { self.n }

    /// number of edges of the complement
    pub fn nb_edges(&self) -> usize { self.edges.len() }

    /// edge list (u < v)
    pub fn edges(&self) -> &[(VertexId,VertexId)] { &self.edges }
}


impl Graph {

    /// builds a graph on vertices 1..=n.
    ///
    /// # Errors
    ///  - n < 1
    ///  - an endpoint outside [1,n]
    ///  - a self-loop
    ///  - the same edge given twice (in any orientation)
    pub fn new(n:usize, edge_list:&[(VertexId,VertexId)]) -> Result<Self> {
        if n < 1 {
            return Err(Error::InvalidInput(
                "the graph must have at least one vertex".to_string()
            ));
        }
        let mut adj_matrix = vec![BitSet::with_capacity(n); n];
        let mut adj_list = vec![Vec::new(); n];
        let mut edges = Vec::with_capacity(edge_list.len());
        for &(a,b) in edge_list {
            if a < 1 || a > n || b < 1 || b > n {
                return Err(Error::InvalidInput(format!(
                    "edge ({},{}) references a vertex outside [1,{}]", a, b, n
                )));
            }
            if a == b {
                return Err(Error::InvalidInput(format!("self-loop on vertex {}", a)));
            }
            if adj_matrix[a-1].contains(b-1) {
                return Err(Error::InvalidInput(format!("duplicate edge ({},{})", a, b)));
            }
            adj_matrix[a-1].insert(b-1);
            adj_matrix[b-1].insert(a-1);
            adj_list[a-1].push(b);
            adj_list[b-1].push(a);
            edges.push((a.min(b), a.max(b)));
        }
        Ok(Self { n, edges, adj_list, adj_matrix })
    }

    /// number of vertices
    pub fn nb_vertices(&self) -> usize { self.n }

    /// number of edges
    pub fn nb_edges(&self) -> usize { self.edges.len() }

    /// edge list, in insertion order
    pub fn edges(&self) -> &[(VertexId,VertexId)] { &self.edges }

    /// list of vertices adjacent to u
    pub fn neighbors(&self, u:VertexId) -> &[VertexId] { &self.adj_list[u-1] }

    /// degree of u
    pub fn degree(&self, u:VertexId) -> usize { self.adj_list[u-1].len() }

    /** returns if a and b are adjacent. O(1) */
    pub fn are_adjacent(&self, a:VertexId, b:VertexId) -> bool {
        self.adj_matrix[a-1].contains(b-1)
    }

    /** enumerates all pairs u < v that are not edges. O(n²) */
    pub fn complement(&self) -> ComplementGraph {
        let mut edges = Vec::with_capacity(self.n*(self.n-1)/2 - self.nb_edges());
        for u in 1..=self.n {
            for v in u+1..=self.n {
                if !self.are_adjacent(u, v) {
                    edges.push((u,v));
                }
            }
        }
        ComplementGraph { n: self.n, edges }
    }

    /// logs statistics of the instance
    pub fn display_statistics(&self) {
        let degrees:Vec<usize> = (1..=self.n).map(|u| self.degree(u)).collect();
        info!(
            vertices = self.n,
            edges = self.nb_edges(),
            min_degree = degrees.iter().min().copied().unwrap_or(0),
            max_degree = degrees.iter().max().copied().unwrap_or(0),
            "graph statistics"
        );
    }
}


/** result of the partition checker */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckerResult {
    /// valid partition into the given number of cliques
    Ok(usize),
    /// vertex covered by no clique
    MissingVertex(VertexId),
    /// vertex covered by two cliques (or twice by the same one)
    DuplicateVertex(VertexId),
    /// two vertices of the same class that are not adjacent
    NotAClique(VertexId,VertexId),
    /// vertex id outside [1,n]
    InvalidVertex(VertexId),
}

/**
checks that `cliques` partitions the vertices of `graph` into cliques.
returns the number of cliques if it does.
*/
pub fn checker<'a, I>(graph:&Graph, cliques:I) -> CheckerResult
where I: IntoIterator<Item=&'a [VertexId]> {
    let cliques:Vec<&[VertexId]> = cliques.into_iter().collect();
    // check that all vertices are added exactly once
    let mut visited = BitSet::with_capacity(graph.nb_vertices());
    for c in &cliques {
        for &v in c.iter() {
            if v < 1 || v > graph.nb_vertices() {
                return CheckerResult::InvalidVertex(v);
            }
            if !visited.insert(v-1) {
                return CheckerResult::DuplicateVertex(v);
            }
        }
    }
    if let Some(v) = (1..=graph.nb_vertices()).find(|v| !visited.contains(v-1)) {
        return CheckerResult::MissingVertex(v);
    }
    // check that each class is a clique
    for c in &cliques {
        for (i,&v1) in c.iter().enumerate() {
            for &v2 in &c[i+1..] {
                if !graph.are_adjacent(v1, v2) {
                    return CheckerResult::NotAClique(v1, v2);
                }
            }
        }
    }
    CheckerResult::Ok(cliques.len())
}
