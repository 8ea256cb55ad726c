use std::fs;
use std::path::Path;

use nom::IResult;
use nom::character::complete::{digit1, space0, space1};
use nom::bytes::complete::is_not;
use nom::combinator::{all_consuming, map_res};
use nom::multi::separated_list1;
use nom::sequence::{delimited, tuple};

use crate::error::{Error, Result};
use crate::graph::{Graph, VertexId};

/** clique cover question: can `graph` be covered by k cliques? */
#[derive(Debug, Clone)]
pub struct CoverInstance {
    /// graph to cover
    pub graph: Graph,
    /// maximum number of cliques
    pub k: usize,
}

impl CoverInstance {
    /** reads an instance from a file in the `n m k` format:
    ```text
    n m k
    u1 v1
    ...
    um vm
    ```
    */
    pub fn from_file<P:AsRef<Path>>(filename:P) -> Result<Self> {
        let content = fs::read_to_string(filename.as_ref()).map_err(|e|
            Error::InvalidInput(format!(
                "unable to read {}: {}", filename.as_ref().display(), e
            ))
        )?;
        parse_cover_instance(&content)
    }
}


/// reads a non-negative integer
fn unsigned(s:&str) -> IResult<&str, usize> {
    map_res(digit1, |d:&str| d.parse::<usize>())(s)
}

/// number of edges of the complete graph on n vertices
pub(crate) fn max_nb_edges(n:usize) -> usize {
    n.saturating_mul(n.saturating_sub(1)) / 2
}

/// splits a line into whitespace separated tokens
fn tokens(s:&str) -> IResult<&str, Vec<&str>> {
    all_consuming(delimited(space0, separated_list1(space1, is_not(" \t")), space0))(s)
}

/// reads an edge line "u v"
fn edge_line(s:&str) -> IResult<&str, (VertexId,VertexId)> {
    let (remaining,(_,u,_,v,_)) = all_consuming(
        tuple((space0, unsigned, space1, unsigned, space0))
    )(s)?;
    Ok((remaining,(u,v)))
}

/// reads the header "n m k"
fn header(line:&str) -> Result<(usize,usize,usize)> {
    let toks = match tokens(line) {
        Ok((_,toks)) => toks,
        Err(_) => vec![],
    };
    if toks.len() != 3 {
        return Err(Error::InvalidInput(format!(
            "first line valid input format: n m k (got \"{}\")", line
        )));
    }
    let mut values = [0 ; 3];
    for (value,tok) in values.iter_mut().zip(toks.iter().copied()) {
        *value = match all_consuming(unsigned)(tok) {
            Ok((_,x)) => x,
            Err(_) => return Err(Error::InvalidInput(format!(
                "invalid number \"{}\" in the first line", tok
            ))),
        };
    }
    Ok((values[0], values[1], values[2]))
}

/**
parses an instance in the `n m k` format. Blank lines and lines starting
with 'c' are skipped.

# Errors
`InvalidInput` if the header does not contain exactly 3 integers, if an edge
line is malformed, if the number of edge lines differs from m, or if the
graph itself is invalid (see `Graph::new`).
*/
pub fn parse_cover_instance(content:&str) -> Result<CoverInstance> {
    let mut lines = content.lines()
        .enumerate()
        .map(|(i,l)| (i+1, l.trim_end_matches('\r')))
        .filter(|(_,l)| !l.trim().is_empty() && !l.trim_start().starts_with('c'));
    let (n,m,k) = match lines.next() {
        None => return Err(Error::InvalidInput("empty input".to_string())),
        Some((_,l)) => header(l)?,
    };
    if m > max_nb_edges(n) {
        return Err(Error::InvalidInput(format!(
            "{} edges announced, a simple graph on {} vertices has at most {}", m, n, max_nb_edges(n)
        )));
    }
    let mut edges = Vec::new();
    for (line_nb,l) in lines {
        if edges.len() == m {
            return Err(Error::InvalidInput(format!(
                "line {}: more than the {} announced edges", line_nb, m
            )));
        }
        match edge_line(l) {
            Ok((_,e)) => edges.push(e),
            Err(_) => return Err(Error::InvalidInput(format!(
                "line {}: expected an edge \"u v\", got \"{}\"", line_nb, l
            ))),
        }
    }
    if edges.len() != m {
        return Err(Error::InvalidInput(format!(
            "expected {} edges, found {}", m, edges.len()
        )));
    }
    let graph = Graph::new(n, &edges)?;
    Ok(CoverInstance { graph, k })
}
