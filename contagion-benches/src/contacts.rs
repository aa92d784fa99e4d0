//! Seeded synthetic contact networks in the edge-list text format.
//!
//! Every network starts from a chain backbone `1-2-...-n` at weight `1` so a
//! spread from any seed can cover the population at any transmissibility up
//! to `1`. The remaining records join random node pairs with weights drawn in
//! hundredths from `0.01` to `1`.

use std::io::Cursor;

use contagion_core::{NetworkBuilder, SpreadNetwork};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use thiserror::Error;

/// Configuration for [`SyntheticContacts::generate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContactConfig {
    /// Number of nodes, numbered from `1`.
    pub node_count: usize,
    /// Total edge records, backbone included.
    pub edge_count: usize,
    /// Seed for the random number generator.
    pub seed: u64,
}

/// Errors raised while generating a synthetic contact network.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SyntheticError {
    /// At least two nodes are needed to form a contact.
    #[error("node_count must be at least 2 (got {node_count})")]
    TooFewNodes {
        /// Rejected node count.
        node_count: usize,
    },
    /// The edge budget cannot hold the chain backbone.
    #[error("edge_count {edge_count} is below the {backbone} backbone edges")]
    EdgeCountBelowBackbone {
        /// Requested edge records.
        edge_count: usize,
        /// Edges needed by the chain backbone.
        backbone: usize,
    },
}

/// A generated edge list and its shape.
#[derive(Clone, Debug)]
pub struct SyntheticContacts {
    text: String,
    node_count: usize,
    edge_count: usize,
}

impl SyntheticContacts {
    /// Generates a contact network deterministically from `config`.
    ///
    /// # Errors
    /// Returns [`SyntheticError`] when the node count is below two or the
    /// edge count cannot hold the backbone.
    ///
    /// # Examples
    /// ```
    /// use contagion_benches::contacts::{ContactConfig, SyntheticContacts};
    ///
    /// let config = ContactConfig { node_count: 4, edge_count: 5, seed: 7 };
    /// let contacts = SyntheticContacts::generate(&config)?;
    /// assert!(contacts.text().starts_with("4 5\n1 2 1\n2 3 1\n3 4 1\n"));
    /// # Ok::<(), contagion_benches::contacts::SyntheticError>(())
    /// ```
    pub fn generate(config: &ContactConfig) -> Result<Self, SyntheticError> {
        let ContactConfig {
            node_count,
            edge_count,
            seed,
        } = *config;
        if node_count < 2 {
            return Err(SyntheticError::TooFewNodes { node_count });
        }
        let backbone = node_count.saturating_sub(1);
        if edge_count < backbone {
            return Err(SyntheticError::EdgeCountBelowBackbone {
                edge_count,
                backbone,
            });
        }

        let mut rng = SmallRng::seed_from_u64(seed);
        let mut text = format!("{node_count} {edge_count}\n");
        for source in 1..node_count {
            text.push_str(&format!("{source} {} 1\n", source.saturating_add(1)));
        }
        for _ in backbone..edge_count {
            let source = rng.gen_range(1..=node_count);
            let mut target = rng.gen_range(1..=node_count);
            while target == source {
                target = rng.gen_range(1..=node_count);
            }
            let percent: u32 = rng.gen_range(1..=100);
            text.push_str(&format!("{source} {target} {}\n", format_weight(percent)));
        }

        Ok(Self {
            text,
            node_count,
            edge_count,
        })
    }

    /// Returns the edge list text, header included.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the number of nodes.
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.node_count
    }

    /// Returns the number of edge records.
    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Loads the edge list at transmissibility `tau`.
    ///
    /// # Errors
    /// Returns [`contagion_core::NetworkError`] when `tau` is invalid.
    pub fn load(&self, tau: f64) -> contagion_core::Result<SpreadNetwork> {
        NetworkBuilder::new()
            .with_transmissibility(tau)
            .with_name("synthetic")
            .load_reader(Cursor::new(self.text.as_bytes()))
    }
}

fn format_weight(percent: u32) -> String {
    if percent >= 100 {
        "1".to_owned()
    } else {
        format!("0.{percent:02}")
    }
}
