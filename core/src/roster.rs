//! The hierarchical roster document of a match.
//!
//! A match's `structure` is a tree of named groups terminating in slots
//! (e.g. company → platoon → squad → fireteam → slot). The tree is
//! admin-authored JSON, deserialized into [`RosterNode`]s; slot ids are
//! author-supplied and must be unique within one match.

use crate::types::{MatchId, SlotId, TopicId, UserId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One node of the roster tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RosterNode {
    /// A named grouping of further nodes.
    Group(RosterGroup),
    /// A claimable leaf position.
    Slot(Slot),
}

/// A named grouping of roster nodes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterGroup {
    /// Display name (e.g. "Alpha Squad").
    pub name: String,
    /// Child groups and slots.
    #[serde(default)]
    pub children: Vec<RosterNode>,
}

/// A single claimable position.
///
/// `reserved_for` marks intent, `occupant` marks fact; the two are not
/// mutually exclusive. At most one user occupies a slot at any instant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// Slot id, unique within the match.
    pub id: SlotId,
    /// Display name (e.g. "Medic").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The user currently occupying the slot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupant: Option<UserId>,
    /// The user the slot is pre-assigned to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reserved_for: Option<UserId>,
}

/// One scheduled session within an event topic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Match id, unique per `(topic_id, id)`.
    pub id: MatchId,
    /// The topic this match belongs to.
    pub topic_id: TopicId,
    /// The roster tree.
    pub structure: Vec<RosterNode>,
}

impl Match {
    /// Create a match with a fresh id.
    #[must_use]
    pub fn new(topic_id: TopicId, structure: Vec<RosterNode>) -> Self {
        Self {
            id: MatchId::new(),
            topic_id,
            structure,
        }
    }

    /// All slots of the match, in document order.
    #[must_use]
    pub fn slots(&self) -> Vec<&Slot> {
        let mut out = Vec::new();
        collect_slots(&self.structure, &mut out);
        out
    }

    /// Look up a slot by id.
    #[must_use]
    pub fn slot(&self, id: &SlotId) -> Option<&Slot> {
        self.slots().into_iter().find(|slot| &slot.id == id)
    }

    /// Look up a slot by id, mutably.
    pub fn slot_mut(&mut self, id: &SlotId) -> Option<&mut Slot> {
        find_slot_mut(&mut self.structure, id)
    }

    /// Total number of slots.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots().len()
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.slots().iter().filter(|slot| slot.occupant.is_some()).count()
    }

    /// Occupant user ids, in document order, without duplicates.
    #[must_use]
    pub fn occupant_user_ids(&self) -> Vec<UserId> {
        let mut seen = HashSet::new();
        self.slots()
            .into_iter()
            .filter_map(|slot| slot.occupant)
            .filter(|user| seen.insert(*user))
            .collect()
    }

    /// Clear `user` from every slot they occupy. Returns the freed slot
    /// ids, in document order. Reservations are left untouched.
    pub fn release_user(&mut self, user: UserId) -> Vec<SlotId> {
        let mut freed = Vec::new();
        release_user_in(&mut self.structure, user, &mut freed);
        freed
    }
}

/// First slot id that appears more than once in a structure, if any.
///
/// Used to reject admin-submitted documents on create and replace.
#[must_use]
pub fn duplicate_slot_id(structure: &[RosterNode]) -> Option<SlotId> {
    let mut slots = Vec::new();
    collect_slots(structure, &mut slots);
    let mut seen = HashSet::new();
    slots
        .into_iter()
        .find(|slot| !seen.insert(slot.id.clone()))
        .map(|slot| slot.id.clone())
}

fn collect_slots<'a>(nodes: &'a [RosterNode], out: &mut Vec<&'a Slot>) {
    for node in nodes {
        match node {
            RosterNode::Slot(slot) => out.push(slot),
            RosterNode::Group(group) => collect_slots(&group.children, out),
        }
    }
}

fn release_user_in(nodes: &mut [RosterNode], user: UserId, freed: &mut Vec<SlotId>) {
    for node in nodes {
        match node {
            RosterNode::Slot(slot) => {
                if slot.occupant == Some(user) {
                    slot.occupant = None;
                    freed.push(slot.id.clone());
                }
            }
            RosterNode::Group(group) => release_user_in(&mut group.children, user, freed),
        }
    }
}

fn find_slot_mut<'a>(nodes: &'a mut [RosterNode], id: &SlotId) -> Option<&'a mut Slot> {
    for node in nodes {
        match node {
            RosterNode::Slot(slot) if &slot.id == id => return Some(slot),
            RosterNode::Slot(_) => {}
            RosterNode::Group(group) => {
                if let Some(found) = find_slot_mut(&mut group.children, id) {
                    return Some(found);
                }
            }
        }
    }
    None
}
