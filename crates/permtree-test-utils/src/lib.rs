//! Testing utilities for the permtree workspace
//!
//! Shared tree fixtures and builders.

#![allow(missing_docs)]

use permtree_core::{ResourceId, ResourceNode};

pub fn id(n: u64) -> ResourceId {
    ResourceId::from(n)
}

pub fn leaf(id: u64, name: &str) -> ResourceNode {
    ResourceNode::new(id, name)
}

pub fn branch(id: u64, name: &str, children: Vec<ResourceNode>) -> ResourceNode {
    ResourceNode::new(id, name).with_children(children)
}

/// Two-leaf fixture: A(B, C)
pub fn two_leaf_tree() -> Vec<ResourceNode> {
    vec![branch(1, "A", vec![leaf(2, "B"), leaf(3, "C")])]
}

/// Role & Access style catalog: three sections of mixed depth
pub fn sample_catalog() -> Vec<ResourceNode> {
    vec![
        branch(
            10,
            "Franchisees",
            vec![
                leaf(11, "View"),
                leaf(12, "Edit"),
                branch(13, "Contracts", vec![leaf(14, "Approve"), leaf(15, "Void")]),
            ],
        ),
        branch(
            20,
            "Education Materials",
            vec![leaf(21, "Catalog"), leaf(22, "Publishing")],
        ),
        branch(30, "Orders", vec![leaf(31, "View"), leaf(32, "Refund")]),
    ]
}

/// Recursively set `isAllowed` on every node whose numeric id is in `granted`
pub fn grant_by_id(nodes: &mut [ResourceNode], granted: &[u64]) {
    for node in nodes {
        if let ResourceId::Num(n) = &node.id {
            if granted.contains(n) {
                node.is_allowed = Some(true);
            }
        }
        grant_by_id(&mut node.children, granted);
    }
}

/// Build a forest from a parent table; entry `i` is the parent slot of node
/// `i`, or `None` for roots. Node ids are the slot numbers as `u64`.
/// Parents must point at lower slots so the table stays acyclic.
///
/// Useful for property tests that generate arbitrary shapes without having
/// to generate nested structures directly.
pub fn forest_from_parents(parents: &[Option<usize>]) -> Vec<ResourceNode> {
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); parents.len()];
    let mut roots: Vec<usize> = Vec::new();
    for (slot, parent) in parents.iter().enumerate() {
        match parent {
            Some(p) => children[*p].push(slot),
            None => roots.push(slot),
        }
    }

    fn build(slot: usize, children: &[Vec<usize>]) -> ResourceNode {
        let node = ResourceNode::new(slot as u64, format!("node-{slot}"));
        let kids: Vec<ResourceNode> = children[slot]
            .iter()
            .map(|child| build(*child, children))
            .collect();
        node.with_children(kids)
    }

    roots.into_iter().map(|slot| build(slot, &children)).collect()
}
