//! # Graph Builder
//!
//! Consolidates the self user, their direct contacts, and each direct
//! contact's own contact list into a single deduplicated node set with
//! relation tiers and full multi-parent provenance.
//!
//! `build` is a pure function of its inputs: no I/O, no randomness, and the
//! resulting node set does not depend on the order second-degree entries are
//! processed in.

use hashbrown::HashMap;
use tracing::debug;

use crate::model::{Node, SecondDegree, Tier, UserId, UserInfo};

/// Build the deduplicated 2-hop proximity graph.
///
/// Tiering rules:
/// - the self user is the single `Self_` node;
/// - every entry of `direct` becomes a `Direct` node (a record that repeats
///   the self id is skipped);
/// - a contact found in some direct contact's list becomes `Indirect` only
///   if it is not already present at a closer tier. Each direct contact
///   whose list names it is recorded in `introduced_by`.
///
/// Partial input degrades gracefully: empty collections yield a graph
/// containing only the self node, and a `second_degree` entry keyed by an
/// unknown id contributes nothing.
pub fn build(
    self_user: &UserInfo,
    direct: &[UserInfo],
    second_degree: &SecondDegree,
) -> Vec<Node> {
    let mut nodes: Vec<Node> = Vec::with_capacity(1 + direct.len());
    let mut index: HashMap<UserId, usize> = HashMap::with_capacity(1 + direct.len());

    nodes.push(Node::new(
        self_user.id.clone(),
        self_user.profile.clone(),
        Tier::Self_,
    ));
    index.insert(self_user.id.clone(), 0);

    // Tier 1: direct contacts. Ids are unique by contract, but a repeated or
    // self-referencing record must not produce a duplicate node.
    for contact in direct {
        if contact.id == self_user.id || index.contains_key(&contact.id) {
            continue;
        }
        index.insert(contact.id.clone(), nodes.len());
        nodes.push(Node::new(
            contact.id.clone(),
            contact.profile.clone(),
            Tier::Direct,
        ));
    }

    // Tier 2: contacts-of-contacts, deduplicated against every closer tier.
    // An id introduced by several direct contacts accumulates all of them.
    for (introducer, their_contacts) in second_degree {
        let known_direct = index
            .get(introducer)
            .is_some_and(|&i| nodes[i].tier == Tier::Direct);
        if !known_direct {
            debug!(introducer = %introducer, "second-degree list for unknown contact, skipping");
            continue;
        }

        for contact in their_contacts {
            if contact.id == self_user.id {
                continue;
            }
            match index.get(&contact.id).copied() {
                Some(i) => {
                    // Already present. Only an Indirect node gains provenance;
                    // a closer tier wins outright.
                    if nodes[i].tier == Tier::Indirect {
                        nodes[i].add_introducer(introducer.clone());
                    }
                }
                None => {
                    let mut node = Node::new(
                        contact.id.clone(),
                        contact.profile.clone(),
                        Tier::Indirect,
                    );
                    node.add_introducer(introducer.clone());
                    index.insert(contact.id.clone(), nodes.len());
                    nodes.push(node);
                }
            }
        }
    }

    debug!(
        total = nodes.len(),
        direct = nodes.iter().filter(|n| n.tier == Tier::Direct).count(),
        indirect = nodes.iter().filter(|n| n.tier == Tier::Indirect).count(),
        "built proximity graph"
    );

    nodes
}
