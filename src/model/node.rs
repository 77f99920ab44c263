//! Node in the proximity graph.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::{Coordinate, Profile, UserId};

/// Relationship distance class relative to the self node.
///
/// Variant order gives the total ordering by distance: `Self_` < `Direct`
/// < `Indirect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    /// The logged-in user. Exactly one node per graph carries this tier.
    #[serde(rename = "self")]
    Self_,
    /// A direct contact of the self user.
    #[serde(rename = "direct")]
    Direct,
    /// A contact of a direct contact, not itself a direct contact.
    #[serde(rename = "indirect")]
    Indirect,
}

impl Tier {
    /// Hop distance from the self node.
    pub fn depth(&self) -> u8 {
        match self {
            Tier::Self_ => 0,
            Tier::Direct => 1,
            Tier::Indirect => 2,
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::Self_ => write!(f, "self"),
            Tier::Direct => write!(f, "direct"),
            Tier::Indirect => write!(f, "indirect"),
        }
    }
}

/// One graph participant: identity, display payload, tier, layout position,
/// and (for `Indirect` nodes) the direct contacts that introduced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: UserId,
    pub profile: Profile,
    pub tier: Tier,
    /// Filled in by the layout assigner; `None` straight out of the builder.
    pub position: Option<Coordinate>,
    /// Sorted set of Direct-tier ids through which this node was discovered.
    /// Empty for `Self_` and `Direct` tiers; non-empty for `Indirect`.
    pub introduced_by: SmallVec<[UserId; 2]>,
}

impl Node {
    pub fn new(id: UserId, profile: Profile, tier: Tier) -> Self {
        Self {
            id,
            profile,
            tier,
            position: None,
            introduced_by: SmallVec::new(),
        }
    }

    pub fn with_position(mut self, position: Coordinate) -> Self {
        self.position = Some(position);
        self
    }

    /// Record a direct contact as a provenance path to this node.
    /// Set semantics: duplicates are ignored, order of insertion is
    /// irrelevant to the final contents.
    pub fn add_introducer(&mut self, id: UserId) {
        if let Err(pos) = self.introduced_by.binary_search(&id) {
            self.introduced_by.insert(pos, id);
        }
    }

    pub fn has_introducer(&self, id: &UserId) -> bool {
        self.introduced_by.binary_search(id).is_ok()
    }
}
