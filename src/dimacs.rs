use std::fs;
use std::path::Path;

use bit_set::BitSet;
use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{digit1, line_ending, multispace0, not_line_ending, space0, space1};
use nom::combinator::{map_res, opt};
use nom::multi::many0;
use nom::sequence::{pair, preceded, terminated, tuple};

use crate::error::{Error, Result};
use crate::graph::{Graph, VertexId};
use crate::input::max_nb_edges;


/** reads a graph in the DIMACS graph format:
```text
c comment
p edge <n> <m>
e <u> <v>
...
```
edges given in both orientations are only added once.
*/
pub fn read_dimacs_graph<P:AsRef<Path>>(filename:P) -> Result<Graph> {
    let content = fs::read_to_string(filename.as_ref()).map_err(|e|
        Error::InvalidInput(format!(
            "unable to read {}: {}", filename.as_ref().display(), e
        ))
    )?;
    parse_dimacs_graph(&content)
}

/// parses the content of a DIMACS graph file
pub fn parse_dimacs_graph(content:&str) -> Result<Graph> {
    let s1 = content.replace("\r","");
    let (mut s2,_) = skip_comments(s1.as_str()).map_err(|_|
        Error::InvalidInput("DIMACS: unable to skip comments".to_string())
    )?;
    let (n,m) = match read_header(s2) {
        Ok((remaining,header)) => { s2 = remaining; header },
        Err(_) => return Err(Error::InvalidInput(
            "DIMACS: header 'p edge <n> <m>' not found".to_string()
        )),
    };
    // each edge may be listed in both orientations
    if m > max_nb_edges(n).saturating_mul(2) {
        return Err(Error::InvalidInput(format!(
            "DIMACS: {} edges announced for {} vertices", m, n
        )));
    }
    // grown with the edges actually read, n comes from the header
    let mut seen:Vec<BitSet> = Vec::new();
    let mut edges:Vec<(VertexId,VertexId)> = Vec::new();
    let mut nb_edge_lines = 0;
    while let Ok((remaining,(a,b))) = read_edge(s2) {
        s2 = remaining;
        nb_edge_lines += 1;
        // duplicates are dropped here, validity is checked by Graph::new
        let valid = a != b && a >= 1 && a <= n && b >= 1 && b <= n;
        if valid {
            let (lo,hi) = (a.min(b)-1, a.max(b)-1);
            if seen.len() <= lo {
                seen.resize_with(lo+1, BitSet::default);
            }
            if !seen[lo].insert(hi) {
                continue;
            }
        }
        edges.push((a,b));
    }
    let (rest,_) = skip_comments(s2).map_err(|_|
        Error::InvalidInput("DIMACS: unable to skip comments".to_string())
    )?;
    if !rest.trim().is_empty() {
        let line = rest.lines().next().unwrap_or_default();
        return Err(Error::InvalidInput(format!("DIMACS: unexpected line \"{}\"", line)));
    }
    if nb_edge_lines != m && edges.len() != m && 2*edges.len() != m {
        return Err(Error::InvalidInput(format!(
            "DIMACS: header announces {} edges, found {}", m, nb_edge_lines
        )));
    }
    Graph::new(n, &edges)
}

/// skips a single comment line (or an empty line)
fn skip_comment(s:&str) -> IResult<&str, &str> {
    alt((
        preceded(pair(tag("c"), not_line_ending), line_ending),
        preceded(space0, line_ending),
    ))(s)
}

/// skips all comments
pub fn skip_comments(s:&str) -> IResult<&str, Vec<&str>> {
    // the last line may be a comment without a newline
    terminated(many0(skip_comment), opt(preceded(tag("c"), not_line_ending)))(s)
}

/// reads a non-negative integer
fn unsigned(s:&str) -> IResult<&str, usize> {
    map_res(digit1, |d:&str| d.parse::<usize>())(s)
}

/// reads two numbers separated by spaces, and the end of the line
fn read_two_integers(s:&str) -> IResult<&str, (usize,usize)> {
    let (remaining,(a,_,b,_,_)) = tuple((
        unsigned, space1, unsigned, space0, alt((line_ending, multispace0))
    ))(s)?;
    Ok((remaining,(a,b)))
}

/// reads header containing (n,m)
pub fn read_header(s:&str) -> IResult<&str, (usize,usize)> {
    preceded(
        pair(alt((tag("p edge"), tag("p col"))), space1),
        read_two_integers
    )(s)
}

/// reads edge line (WARNING: indices start at 1 in the DIMACS format)
pub fn read_edge(s:&str) -> IResult<&str, (usize,usize)> {
    let (s,_) = skip_comments(s)?;
    preceded(pair(tag("e"), space1), read_two_integers)(s)
}
