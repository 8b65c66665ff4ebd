//! Organization tree types
//!
//! Nodes are plain values built bottom-up: a parent is constructed only once
//! all of its children are complete, and nothing is mutated afterwards.
//!
//! On disk every node is written as a single-key mapping from its ID to its
//! body, so the cache file reads as an outline keyed by OU ID:
//!
//! ```yaml
//! - ou-ab12-34cd56ef:
//!     name: Workloads
//!     accounts: []
//!     units: []
//! ```

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::client::{Account, NodeDescriptor};

/// A root or organizational unit with its direct accounts and child units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizationNode {
    pub id: String,
    pub name: String,
    pub arn: Option<String>,
    /// Accounts attached directly to this node, in API order
    pub accounts: Vec<Account>,
    /// Direct child units, in API order
    pub children: Vec<OrganizationNode>,
}

/// One node visited by [`OrganizationNode::walk`].
#[derive(Debug, Clone, Copy)]
pub struct Visit<'a> {
    pub node: &'a OrganizationNode,
    /// ID of the enclosing node, `None` for the node the walk started at
    pub parent_id: Option<&'a str>,
    /// 0 for the starting node
    pub depth: usize,
}

impl OrganizationNode {
    /// Assemble a node from its descriptor and already-built contents.
    pub fn new(
        descriptor: &NodeDescriptor,
        accounts: Vec<Account>,
        children: Vec<OrganizationNode>,
    ) -> Self {
        Self {
            id: descriptor.id.clone(),
            name: descriptor.name.clone(),
            arn: descriptor.arn.clone(),
            accounts,
            children,
        }
    }

    /// Accounts attached to this node and every descendant.
    ///
    /// Computed on each call; totals are never stored on the node.
    pub fn total_accounts(&self) -> usize {
        self.accounts.len()
            + self
                .children
                .iter()
                .map(OrganizationNode::total_accounts)
                .sum::<usize>()
    }

    /// Number of units below this node at any depth.
    pub fn total_units(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.total_units())
            .sum()
    }

    /// Levels from this node down to its deepest accounts.
    ///
    /// A node holding accounts directly has depth 1; a node with no accounts
    /// anywhere below it has depth 0.
    pub fn depth(&self) -> usize {
        let below = self
            .children
            .iter()
            .map(OrganizationNode::depth)
            .filter(|d| *d > 0)
            .max()
            .map(|d| d + 1);

        match below {
            Some(d) => d,
            None if !self.accounts.is_empty() => 1,
            None => 0,
        }
    }

    /// Pre-order traversal of this node and every descendant.
    pub fn walk(&self) -> Vec<Visit<'_>> {
        let mut visits = Vec::new();
        self.walk_into(None, 0, &mut visits);
        visits
    }

    fn walk_into<'a>(&'a self, parent_id: Option<&'a str>, depth: usize, out: &mut Vec<Visit<'a>>) {
        out.push(Visit {
            node: self,
            parent_id,
            depth,
        });
        for child in &self.children {
            child.walk_into(Some(self.id.as_str()), depth + 1, out);
        }
    }

    /// Find a direct child unit by ID or name.
    pub fn find_child(&self, id_or_name: &str) -> Option<&OrganizationNode> {
        self.children
            .iter()
            .find(|child| child.matches(id_or_name))
    }

    /// Find a descendant unit by ID or name. Direct children are checked
    /// before their subtrees.
    pub fn find(&self, id_or_name: &str) -> Option<&OrganizationNode> {
        self.find_child(id_or_name)
            .or_else(|| self.children.iter().find_map(|child| child.find(id_or_name)))
    }

    fn matches(&self, id_or_name: &str) -> bool {
        self.id == id_or_name || self.name == id_or_name
    }
}

/// Body of a node as written to disk (borrowed for serialization)
#[derive(Serialize)]
struct NodeBodyRef<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    arn: Option<&'a str>,
    accounts: &'a [Account],
    units: &'a [OrganizationNode],
}

/// Body of a node as read from disk
#[derive(Deserialize)]
struct NodeBody {
    name: String,
    #[serde(default)]
    arn: Option<String>,
    #[serde(default)]
    accounts: Vec<Account>,
    #[serde(default)]
    units: Vec<OrganizationNode>,
}

impl Serialize for OrganizationNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(
            &self.id,
            &NodeBodyRef {
                name: &self.name,
                arn: self.arn.as_deref(),
                accounts: &self.accounts,
                units: &self.children,
            },
        )?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for OrganizationNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = BTreeMap::<String, NodeBody>::deserialize(deserializer)?;
        let mut entries = entries.into_iter();

        match (entries.next(), entries.next()) {
            (Some((id, body)), None) => Ok(Self {
                id,
                name: body.name,
                arn: body.arn,
                accounts: body.accounts,
                children: body.units,
            }),
            _ => Err(D::Error::custom(
                "expected exactly one unit ID per tree entry",
            )),
        }
    }
}

/// The persisted hierarchy for one profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationSnapshot {
    /// Cache partition key (the AWS profile name)
    #[serde(rename = "profile")]
    pub profile_key: String,

    /// Friendly name shown in output
    #[serde(rename = "name")]
    pub display_name: String,

    /// Unix seconds when the snapshot was persisted; unset until written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,

    /// Top-level roots (normally exactly one)
    #[serde(default)]
    pub roots: Vec<OrganizationNode>,
}

impl OrganizationSnapshot {
    pub fn new(
        profile_key: impl Into<String>,
        display_name: impl Into<String>,
        roots: Vec<OrganizationNode>,
    ) -> Self {
        Self {
            profile_key: profile_key.into(),
            display_name: display_name.into(),
            timestamp: None,
            roots,
        }
    }

    /// Accounts across every root and unit
    pub fn total_accounts(&self) -> usize {
        self.roots.iter().map(OrganizationNode::total_accounts).sum()
    }

    /// Units across every root (roots themselves not counted)
    pub fn total_units(&self) -> usize {
        self.roots.iter().map(OrganizationNode::total_units).sum()
    }

    /// A root or unit anywhere in the snapshot, by ID or name.
    pub fn find(&self, id_or_name: &str) -> Option<&OrganizationNode> {
        self.roots
            .iter()
            .find(|root| root.matches(id_or_name))
            .or_else(|| self.roots.iter().find_map(|root| root.find(id_or_name)))
    }
}
