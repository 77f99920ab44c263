//! # Radial Layout
//!
//! Gives every node a concrete, stable 2-D position: the self node pinned at
//! the canvas origin, direct contacts in an inner annulus, indirect contacts
//! in an outer one.
//!
//! Stability is generate-then-cache, never a seeded formula: the first time
//! an id is seen on a client, a pseudo-random point in its tier's annulus is
//! drawn and written to the position store; every later layout pass reuses
//! the stored point. A different installation may place the same id
//! elsewhere — only per-client stability is guaranteed.

use std::f64::consts::TAU;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::model::{Coordinate, Node, Tier};
use crate::store::PositionStore;
use crate::{Error, Result};

// ============================================================================
// Annulus
// ============================================================================

/// A ring between two radii around the layout origin. `min == max`
/// degenerates to a circle, which is valid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Annulus {
    pub min: f64,
    pub max: f64,
}

impl Annulus {
    /// Construct a validated annulus. Bounds must be finite, non-negative,
    /// and ordered — invalid bounds are a contract violation, never clamped.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        let annulus = Self { min, max };
        annulus.validate()?;
        Ok(annulus)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(Error::InvalidAnnulus(format!(
                "bounds must be finite, got [{}, {})",
                self.min, self.max
            )));
        }
        if self.min < 0.0 {
            return Err(Error::InvalidAnnulus(format!(
                "negative min radius {}",
                self.min
            )));
        }
        if self.min > self.max {
            return Err(Error::InvalidAnnulus(format!(
                "min radius {} exceeds max radius {}",
                self.min, self.max
            )));
        }
        Ok(())
    }

    /// Whether a distance from the origin falls inside the closed annulus.
    pub fn contains(&self, distance: f64) -> bool {
        distance >= self.min && distance <= self.max
    }
}

// ============================================================================
// Layout configuration
// ============================================================================

/// Canvas origin plus one annulus per non-self tier.
///
/// The default reproduces the product's 2000×2000 canvas: origin at
/// (1000, 1000), direct contacts at radius 200–400, indirect at 450–700.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub origin: Coordinate,
    pub direct: Annulus,
    pub indirect: Annulus,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            origin: Coordinate::new(1000.0, 1000.0),
            direct: Annulus { min: 200.0, max: 400.0 },
            indirect: Annulus { min: 450.0, max: 700.0 },
        }
    }
}

impl LayoutConfig {
    pub fn new(origin: Coordinate, direct: Annulus, indirect: Annulus) -> Result<Self> {
        let config = Self { origin, direct, indirect };
        config.validate()?;
        Ok(config)
    }

    /// Validate both annuli and the tier separation invariant: the direct
    /// ring must end before the indirect ring begins, so tiers never
    /// visually overlap.
    pub fn validate(&self) -> Result<()> {
        self.direct.validate()?;
        self.indirect.validate()?;
        if self.direct.max > self.indirect.min {
            return Err(Error::InvalidAnnulus(format!(
                "direct annulus [{}, {}) overlaps indirect annulus [{}, {})",
                self.direct.min, self.direct.max, self.indirect.min, self.indirect.max
            )));
        }
        Ok(())
    }

    /// The annulus for a non-self tier. The self tier has no annulus — it is
    /// pinned at the origin.
    pub fn annulus_for(&self, tier: Tier) -> Option<&Annulus> {
        match tier {
            Tier::Self_ => None,
            Tier::Direct => Some(&self.direct),
            Tier::Indirect => Some(&self.indirect),
        }
    }
}

// ============================================================================
// Radial generator
// ============================================================================

/// Draw a uniform pseudo-random point within `annulus` around `origin`:
/// angle uniform in `[0, 2π)`, radius uniform in `[min, max)`.
pub fn random_point_in_annulus<R: Rng>(
    rng: &mut R,
    origin: Coordinate,
    annulus: &Annulus,
) -> Coordinate {
    let angle = rng.gen_range(0.0..TAU);
    let radius = if annulus.min < annulus.max {
        rng.gen_range(annulus.min..annulus.max)
    } else {
        annulus.min
    };
    Coordinate::new(
        origin.x + radius * angle.cos(),
        origin.y + radius * angle.sin(),
    )
}

// ============================================================================
// Assigner
// ============================================================================

/// Fill in a position for every node: origin for the self node, cache hit or
/// generate-then-cache for everyone else.
///
/// Idempotent over the store: assigning twice for the same ids yields the
/// same coordinates. The store is keyed by id only, so a node whose tier
/// changed since its position was cached keeps the old coordinate, possibly
/// outside its new tier's annulus. A promoted contact stays where the user
/// last saw it instead of jumping rings.
pub fn assign<S>(nodes: &mut [Node], store: &S, config: &LayoutConfig) -> Result<()>
where
    S: PositionStore + ?Sized,
{
    assign_with_rng(nodes, store, config, &mut rand::thread_rng())
}

/// `assign` with an injected RNG, for deterministic tests.
pub fn assign_with_rng<S, R>(
    nodes: &mut [Node],
    store: &S,
    config: &LayoutConfig,
    rng: &mut R,
) -> Result<()>
where
    S: PositionStore + ?Sized,
    R: Rng,
{
    for node in nodes {
        let Some(annulus) = config.annulus_for(node.tier) else {
            node.position = Some(config.origin);
            continue;
        };
        let position = match store.get(&node.id) {
            Some(cached) => cached,
            None => {
                let fresh = random_point_in_annulus(rng, config.origin, annulus);
                store.set(&node.id, fresh)?;
                fresh
            }
        };
        node.position = Some(position);
    }
    Ok(())
}
