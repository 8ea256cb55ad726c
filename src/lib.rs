//! Clique cover decision through a reduction to SAT

// #![warn(clippy::all, clippy::pedantic)]
// useful additional warnings if docs are missing, or crates imported but unused, etc.
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unsafe_code)]
#![warn(unused_extern_crates)]
#![warn(variant_size_differences)]

// not sure if already by default in clippy
#![warn(clippy::similar_names)]
#![warn(clippy::shadow_unrelated)]


/// error types
pub mod error;

/// graph, complement graph and clique partition checker
pub mod graph;

/// read the "n m k" instance format
pub mod input;

/// read DIMACS graph files
pub mod dimacs;

/// CNF formulas and their DIMACS serialization
pub mod cnf;

/// reduction from clique cover to SAT
pub mod encoder;

/// SAT solver interface and external solver process
pub mod solver;

/// turns a model back into a clique partition
pub mod decoder;

/// full pipeline and result reporting
pub mod cover;

/// helper and utility methods for the executable
pub mod util;
