//! Pretty tree rendering
//!
//! Draws the organization with box-drawing connectors. Within a node, direct
//! accounts are listed before child units.

use colored::Colorize;

use crate::client::Account;
use crate::tree::{OrganizationNode, OrganizationSnapshot};

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

/// `word` or its plural, depending on `amount`
pub fn pluralise(amount: usize, word: &str) -> String {
    if amount == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

/// Render a whole snapshot, one block per root.
pub fn render_snapshot(snapshot: &OrganizationSnapshot) -> String {
    let mut out = String::new();

    let title = if snapshot.display_name == snapshot.profile_key {
        snapshot.display_name.clone()
    } else {
        format!("{} ({})", snapshot.display_name, snapshot.profile_key)
    };
    out.push_str(&format!("{}\n", title.bold()));

    for root in &snapshot.roots {
        out.push_str(&render_subtree(root));
    }

    out
}

/// Render one node and everything below it.
pub fn render_subtree(node: &OrganizationNode) -> String {
    let mut out = format!("{}\n", node_label(node));
    render_contents(node, "", &mut out);
    out
}

fn render_contents(node: &OrganizationNode, prefix: &str, out: &mut String) {
    let total = node.accounts.len() + node.children.len();
    let mut index = 0;

    for account in &node.accounts {
        index += 1;
        let connector = if index == total { LAST_BRANCH } else { BRANCH };
        out.push_str(&format!("{}{}{}\n", prefix, connector, account_label(account)));
    }

    for child in &node.children {
        index += 1;
        let last = index == total;
        let connector = if last { LAST_BRANCH } else { BRANCH };
        out.push_str(&format!("{}{}{}\n", prefix, connector, node_label(child)));

        let child_prefix = format!("{}{}", prefix, if last { SPACE } else { PIPE });
        render_contents(child, &child_prefix, out);
    }
}

fn node_label(node: &OrganizationNode) -> String {
    let accounts = node.total_accounts();
    let units = node.children.len();
    format!(
        "{}  {}  [{} {}, {} {}]",
        node.name.cyan().bold(),
        node.id.dimmed(),
        accounts,
        pluralise(accounts, "account"),
        units,
        pluralise(units, "OU"),
    )
}

fn account_label(account: &Account) -> String {
    let mut label = format!("{}  {}  {}", account.name, account.id.dimmed(), account.email);
    if let Some(status) = account.status.as_deref().filter(|s| *s != "ACTIVE") {
        label.push_str(&format!("  {}", status.yellow()));
    }
    label
}
