//! Generation counting for a spreading process.
//!
//! A generation is one breadth-first wavefront. The simulator counts how
//! many wavefronts leave the seed before the reached fraction of the
//! population meets the requested threshold.

use std::collections::VecDeque;

use tracing::{debug, instrument};

use crate::{
    error::{QueryError, QueryResult},
    network::SpreadNetwork,
    removal::RemovalCriterion,
    store::GraphStore,
};

/// Collapses a generations result into the integer reported by legacy
/// tooling: the level on success and `-1` for every failure.
///
/// # Examples
/// ```
/// use contagion_core::{QueryError, legacy_generations};
///
/// assert_eq!(legacy_generations(&Ok(3)), 3);
/// assert_eq!(legacy_generations(&Err(QueryError::EmptySelection)), -1);
/// ```
#[must_use]
pub fn legacy_generations(result: &QueryResult<usize>) -> i64 {
    match result {
        Ok(level) => i64::try_from(*level).unwrap_or(i64::MAX),
        Err(_) => -1,
    }
}

impl<G: GraphStore> SpreadNetwork<G> {
    /// Counts the wavefronts needed before at least `threshold` of the
    /// population has been reached from `seed`.
    ///
    /// The seed counts as reached. The population is every node slot except
    /// the reserved slot, whether or not the node appears in an edge.
    ///
    /// # Errors
    /// - [`QueryError::SeedOutOfRange`] when `seed` lies outside
    ///   `[1, node_slots())`.
    /// - [`QueryError::ThresholdOutOfRange`] when `threshold` is outside
    ///   `[0, 1]`.
    /// - [`QueryError::ThresholdUnreachable`] when the seed's component is
    ///   too small to reach `threshold`.
    ///
    /// # Examples
    /// ```
    /// use std::io::Cursor;
    /// use contagion_core::NetworkBuilder;
    ///
    /// let mut network = NetworkBuilder::new()
    ///     .load_reader(Cursor::new("4 3\n1 2 1\n2 3 1\n3 4 1\n"))?;
    /// assert_eq!(network.generations(1, 1.0)?, 3);
    /// assert_eq!(network.generations(2, 0.75)?, 1);
    /// assert_eq!(network.generations(2, 0.0)?, 0);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[instrument(
        name = "core.generations",
        err(level = "debug"),
        skip(self),
        fields(dataset = %self.name()),
    )]
    pub fn generations(&mut self, seed: usize, threshold: f64) -> QueryResult<usize> {
        self.check_generation_inputs(seed, threshold)?;
        if threshold == 0.0 {
            return Ok(0);
        }

        let population = self.population() as f64;
        let mut reached = 1_usize;
        if reached as f64 / population >= threshold {
            return Ok(0);
        }

        record_traversal();
        self.graph_mut().reset_scratch();
        self.graph_mut().set_scratch(seed, true);
        let mut queue = VecDeque::from([seed]);
        let mut level = 0_usize;
        let mut current_level = 1_usize;
        let mut next_level = 0_usize;

        while let Some(current) = queue.pop_front() {
            let neighbors = self.neighbors(current);
            next_level += neighbors.len();
            for neighbor in neighbors {
                if self.graph().scratch(neighbor) {
                    next_level -= 1;
                } else {
                    self.graph_mut().set_scratch(neighbor, true);
                    queue.push_back(neighbor);
                    reached += 1;
                }
            }

            current_level = current_level.saturating_sub(1);
            if current_level == 0 {
                level += 1;
                debug!(level, reached, "wavefront complete");
                if reached as f64 / population >= threshold {
                    return Ok(level);
                }
                current_level = next_level;
                next_level = 0;
            }
        }

        Err(QueryError::ThresholdUnreachable {
            reached,
            required: threshold,
        })
    }

    /// Removes every active node of the given degree, cutting only edges
    /// between two removed nodes, then counts generations.
    ///
    /// # Errors
    /// Fails like [`Self::generations`], and with
    /// [`QueryError::EmptySelection`] when no node has that degree. A seed
    /// inside the selection yields `Ok(0)` and leaves the graph untouched.
    pub fn generations_degree(
        &mut self,
        seed: usize,
        threshold: f64,
        degree: usize,
    ) -> QueryResult<usize> {
        self.generations_after_removal(seed, threshold, RemovalCriterion::Degree(degree))
    }

    /// Removes every active node whose truncated clustering coefficient lies
    /// in `[low, high]`, cutting all of their edges, then counts generations.
    ///
    /// # Errors
    /// Same conditions as [`Self::generations_degree`].
    pub fn generations_cc(
        &mut self,
        seed: usize,
        threshold: f64,
        low: f64,
        high: f64,
    ) -> QueryResult<usize> {
        self.generations_after_removal(
            seed,
            threshold,
            RemovalCriterion::ClusteringRange { low, high },
        )
    }

    /// Removes high-degree, low-clustering nodes, cutting only edges between
    /// two removed nodes, then counts generations.
    ///
    /// # Errors
    /// Same conditions as [`Self::generations_degree`].
    ///
    /// # Examples
    /// ```
    /// use std::io::Cursor;
    /// use contagion_core::{NetworkBuilder, QueryError};
    ///
    /// let raw = "5 4\n1 2 1\n1 3 1\n1 4 1\n1 5 1\n";
    /// let mut network = NetworkBuilder::new().load_reader(Cursor::new(raw))?;
    /// // The hub is the only selected node, so no edge has both ends selected.
    /// assert_eq!(network.generations_high_deg_low_cc(2, 1.0, 4, 0.0)?, 2);
    /// assert_eq!(
    ///     network.generations_high_deg_low_cc(2, 1.0, 9, 0.0),
    ///     Err(QueryError::EmptySelection),
    /// );
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn generations_high_deg_low_cc(
        &mut self,
        seed: usize,
        threshold: f64,
        low_bound_degree: usize,
        up_bound_cc: f64,
    ) -> QueryResult<usize> {
        self.generations_after_removal(
            seed,
            threshold,
            RemovalCriterion::HighDegreeLowClustering {
                low_bound_degree,
                up_bound_cc,
            },
        )
    }

    fn generations_after_removal(
        &mut self,
        seed: usize,
        threshold: f64,
        criterion: RemovalCriterion,
    ) -> QueryResult<usize> {
        self.check_generation_inputs(seed, threshold)?;
        let selection = self.select(criterion);
        if selection.is_empty() {
            return Err(QueryError::EmptySelection);
        }
        if selection.contains(&seed) {
            return Ok(0);
        }
        self.remove_edges(&selection, criterion.generations_rule());
        self.generations(seed, threshold)
    }

    fn check_generation_inputs(&self, seed: usize, threshold: f64) -> QueryResult<()> {
        if !self.contains_node(seed) {
            return Err(QueryError::SeedOutOfRange {
                seed,
                node_slots: self.node_slots(),
            });
        }
        if !(0.0..=1.0).contains(&threshold) {
            return Err(QueryError::ThresholdOutOfRange { threshold });
        }
        Ok(())
    }
}

#[cfg(feature = "metrics")]
fn record_traversal() {
    metrics::counter!("contagion_traversals").increment(1);
}

#[cfg(not(feature = "metrics"))]
fn record_traversal() {}
