//! Organization display models
//!
//! Rows for `roots`, `summary` and `tree`. Counts are computed from the
//! snapshot at display time; nothing here is persisted.

use serde::Serialize;
use tabled::Tabled;

use super::common::{indent, or_dash, truncate_string};
use crate::client::Account;
use crate::tree::{OrganizationNode, OrganizationSnapshot, Visit};

const MAX_NAME_WIDTH: usize = 48;

/// One row per organization root.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct RootDisplay {
    #[tabled(rename = "ROOT")]
    pub name: String,

    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "ARN")]
    pub arn: String,

    #[tabled(rename = "OUs")]
    pub child_units: usize,

    #[tabled(rename = "ACCOUNTS")]
    pub direct_accounts: usize,
}

impl From<&OrganizationNode> for RootDisplay {
    fn from(node: &OrganizationNode) -> Self {
        Self {
            name: node.name.clone(),
            id: node.id.clone(),
            arn: or_dash(node.arn.as_deref()),
            child_units: node.children.len(),
            direct_accounts: node.accounts.len(),
        }
    }
}

/// Organization-wide totals for one root.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct RootSummaryDisplay {
    #[tabled(rename = "ROOT")]
    pub name: String,

    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "CHILD OUs")]
    pub child_units: usize,

    #[tabled(rename = "ALL OUs")]
    pub total_units: usize,

    #[tabled(rename = "DIRECT ACCTS")]
    pub direct_accounts: usize,

    #[tabled(rename = "TOTAL ACCTS")]
    pub total_accounts: usize,

    #[tabled(rename = "LEVELS")]
    pub levels: usize,
}

impl From<&OrganizationNode> for RootSummaryDisplay {
    fn from(node: &OrganizationNode) -> Self {
        Self {
            name: node.name.clone(),
            id: node.id.clone(),
            child_units: node.children.len(),
            total_units: node.total_units(),
            direct_accounts: node.accounts.len(),
            total_accounts: node.total_accounts(),
            levels: node.depth(),
        }
    }
}

/// One row per organizational unit, at any depth.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct UnitSummaryDisplay {
    #[tabled(rename = "OU")]
    pub name: String,

    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "PARENT")]
    pub parent_id: String,

    #[tabled(rename = "DEPTH")]
    pub depth: usize,

    #[tabled(rename = "CHILD OUs")]
    pub child_units: usize,

    #[tabled(rename = "DIRECT ACCTS")]
    pub direct_accounts: usize,

    #[tabled(rename = "TOTAL ACCTS")]
    pub total_accounts: usize,
}

impl UnitSummaryDisplay {
    fn from_visit(visit: &Visit<'_>) -> Self {
        let node = visit.node;
        Self {
            name: truncate_string(&node.name, MAX_NAME_WIDTH),
            id: node.id.clone(),
            parent_id: visit.parent_id.unwrap_or("-").to_string(),
            depth: visit.depth,
            child_units: node.children.len(),
            direct_accounts: node.accounts.len(),
            total_accounts: node.total_accounts(),
        }
    }
}

/// Row kinds in the flattened tree table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeRowKind {
    Root,
    Unit,
    Account,
}

impl std::fmt::Display for TreeRowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TreeRowKind::Root => "root",
            TreeRowKind::Unit => "ou",
            TreeRowKind::Account => "account",
        };
        f.write_str(label)
    }
}

/// One row per root, unit or account, indented by depth.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct TreeRowDisplay {
    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "TYPE")]
    pub kind: TreeRowKind,

    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "EMAIL / ACCOUNTS")]
    pub detail: String,

    #[tabled(rename = "STATUS")]
    pub status: String,
}

impl TreeRowDisplay {
    fn for_node(node: &OrganizationNode, depth: usize) -> Self {
        Self {
            name: indent(depth, &node.name),
            kind: if depth == 0 && node.id.starts_with("r-") {
                TreeRowKind::Root
            } else {
                TreeRowKind::Unit
            },
            id: node.id.clone(),
            detail: node.total_accounts().to_string(),
            status: "-".to_string(),
        }
    }

    fn for_account(account: &Account, depth: usize) -> Self {
        Self {
            name: indent(depth, &account.name),
            kind: TreeRowKind::Account,
            id: account.id.clone(),
            detail: account.email.clone(),
            status: or_dash(account.status.as_deref()),
        }
    }
}

/// Root rows for a snapshot
pub fn root_rows(snapshot: &OrganizationSnapshot) -> Vec<RootDisplay> {
    snapshot.roots.iter().map(RootDisplay::from).collect()
}

/// Root totals for a snapshot
pub fn root_summary_rows(snapshot: &OrganizationSnapshot) -> Vec<RootSummaryDisplay> {
    snapshot.roots.iter().map(RootSummaryDisplay::from).collect()
}

/// Every unit below every root, in pre-order. Roots themselves are excluded.
pub fn unit_summary_rows(snapshot: &OrganizationSnapshot) -> Vec<UnitSummaryDisplay> {
    snapshot
        .roots
        .iter()
        .flat_map(|root| root.walk().into_iter().skip(1))
        .map(|visit| UnitSummaryDisplay::from_visit(&visit))
        .collect()
}

/// The full hierarchy flattened into rows; a node's accounts come before its
/// child units.
pub fn tree_rows(snapshot: &OrganizationSnapshot) -> Vec<TreeRowDisplay> {
    snapshot.roots.iter().flat_map(node_rows).collect()
}

/// Rows for one node and everything below it. The starting node is shown at
/// depth 0.
pub fn node_rows(node: &OrganizationNode) -> Vec<TreeRowDisplay> {
    let mut rows = Vec::new();
    for visit in node.walk() {
        rows.push(TreeRowDisplay::for_node(visit.node, visit.depth));
        rows.extend(
            visit
                .node
                .accounts
                .iter()
                .map(|account| TreeRowDisplay::for_account(account, visit.depth + 1)),
        );
    }
    rows
}
