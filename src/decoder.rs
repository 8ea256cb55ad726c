use std::collections::BTreeMap;

use serde::Serialize;

use crate::encoder::VarIndex;
use crate::error::{Error, Result};
use crate::graph::VertexId;
use crate::solver::Model;

/** partition of the vertices into cliques, indexed by color.
    Only non-empty colors are present, iterated by increasing color.
*/
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CliquePartition {
    classes: BTreeMap<usize, Vec<VertexId>>,
}

impl CliquePartition {
    /// number of (non-empty) cliques
    pub fn nb_cliques(&self) -> usize { self.classes.len() }

    /// vertices of color c (sorted), if any
    pub fn clique(&self, c:usize) -> Option<&[VertexId]> {
        self.classes.get(&c).map(|v| v.as_slice())
    }

    /// (color, vertices) pairs by increasing color
    pub fn iter(&self) -> impl Iterator<Item=(usize, &[VertexId])> {
        self.classes.iter().map(|(c,v)| (*c, v.as_slice()))
    }

    /// vertex lists by increasing color
    pub fn cliques(&self) -> impl Iterator<Item=&[VertexId]> {
        self.classes.values().map(|v| v.as_slice())
    }
}


/**
turns a model of the formula built by `encode` into a clique partition.
variables above n·k (auxiliary variables) are ignored.

# Errors
`InternalConsistency` if the model gives no color, or several colors, to a vertex.
*/
pub fn decode(model:&Model, n:usize, k:usize) -> Result<CliquePartition> {
    let idx = VarIndex::new(n, k);
    let mut color_of:Vec<Option<usize>> = vec![None ; n];
    let mut classes:BTreeMap<usize, Vec<VertexId>> = BTreeMap::new();
    for &lit in model.literals() {
        if lit <= 0 { continue; }
        let (v,c) = match idx.vertex_color(lit as usize) {
            None => continue,
            Some(vc) => vc,
        };
        if let Some(previous) = color_of[v-1] {
            return Err(Error::InternalConsistency(format!(
                "vertex {} has colors {} and {}", v, previous, c
            )));
        }
        color_of[v-1] = Some(c);
        classes.entry(c).or_insert_with(Vec::new).push(v);
    }
    if let Some(v) = color_of.iter().position(|c| c.is_none()) {
        return Err(Error::InternalConsistency(format!("vertex {} has no color", v+1)));
    }
    for vertices in classes.values_mut() {
        vertices.sort_unstable();
    }
    Ok(CliquePartition { classes })
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode() {
        // n = 3, k = 2: 1 -> color 2, 2 -> color 2, 3 -> color 1
        let model = Model::new(vec![-1, 2, -3, 4, 5, -6]);
        let partition = decode(&model, 3, 2).unwrap();
        assert_eq!(partition.nb_cliques(), 2);
        assert_eq!(partition.clique(1), Some(&[3][..]));
        assert_eq!(partition.clique(2), Some(&[1,2][..]));
        let colors:Vec<usize> = partition.iter().map(|(c,_)| c).collect();
        assert_eq!(colors, vec![1,2]);
    }

    #[test]
    fn test_decode_omits_empty_colors() {
        // n = 2, k = 3: everyone in color 3
        let model = Model::new(vec![-1, -2, 3, -4, -5, 6]);
        let partition = decode(&model, 2, 3).unwrap();
        assert_eq!(partition.nb_cliques(), 1);
        assert_eq!(partition.clique(1), None);
        assert_eq!(partition.clique(3), Some(&[1,2][..]));
    }

    #[test]
    fn test_decode_sorts_vertices() {
        // literals given in a shuffled order
        let model = Model::new(vec![5, -6, -4, 3, 1, -2]);
        let partition = decode(&model, 3, 2).unwrap();
        assert_eq!(partition.clique(1), Some(&[1,2,3][..]));
    }

    #[test]
    fn test_decode_ignores_auxiliary_variables() {
        let model = Model::new(vec![1, -2, -3, 4, 5, -6]);
        let partition = decode(&model, 2, 2).unwrap();
        assert_eq!(partition.clique(1), Some(&[1][..]));
        assert_eq!(partition.clique(2), Some(&[2][..]));
    }

    #[test]
    fn test_decode_two_colors() {
        let model = Model::new(vec![1, 2, -3, 4]);
        assert!(matches!(decode(&model, 2, 2), Err(Error::InternalConsistency(_))));
    }

    #[test]
    fn test_decode_no_color() {
        let model = Model::new(vec![1, -2, -3, -4]);
        assert!(matches!(decode(&model, 2, 2), Err(Error::InternalConsistency(_))));
    }
}
