//! Contagion core library.
//!
//! Loads a weighted contact network, keeps only the edges at or above a
//! transmissibility threshold and answers structural questions about how an
//! infection would spread across it: neighbour lists, weighted paths, degree
//! and clustering statistics, generation counts and basic reproduction
//! numbers, optionally after removing selected nodes.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod clustering;
mod degree;
mod error;
mod loader;
mod network;
mod path;
mod removal;
mod reproduction;
mod spread;
mod store;

#[cfg(test)]
mod property;
#[cfg(test)]
mod test_utils;

pub use crate::{
    clustering::Hundredths,
    error::{
        LoadError, LoadErrorCode, NetworkError, NetworkErrorCode, QueryError, QueryErrorCode,
        QueryResult, Result,
    },
    loader::{LoadReport, NetworkBuilder},
    network::SpreadNetwork,
    removal::{RemovalCriterion, RemovalRule},
    spread::legacy_generations,
    store::{AdjacencyGraph, GraphStore},
};
