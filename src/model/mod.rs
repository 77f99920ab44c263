//! # Proximity Graph Model
//!
//! Clean DTOs shared by every layer: builder ↔ layout ↔ selection ↔ caller.
//!
//! Design rule: this module is pure data — no I/O, no randomness, no state.
//! The engine never interprets a node's display payload; it only routes it.

pub mod coordinate;
pub mod edge;
pub mod node;
pub mod user;

pub use coordinate::Coordinate;
pub use edge::{Edge, EdgeKind};
pub use node::{Node, Tier};
pub use user::{Profile, UserId, UserInfo};

/// Second-degree input: each direct contact's own contact list, keyed by the
/// direct contact's id. Contacts whose lists could not be fetched are simply
/// absent — that is expected, not an error.
pub type SecondDegree = hashbrown::HashMap<UserId, Vec<UserInfo>>;
