//! Organization models

use serde::{Deserialize, Serialize};

/// A root or organizational unit as returned by a list call, before its
/// accounts and child units have been fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDescriptor {
    /// Root or OU ID (`r-xxxx` / `ou-xxxx-xxxxxxxx`)
    pub id: String,

    /// Display name (not guaranteed unique)
    pub name: String,

    /// Fully-qualified resource ARN
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arn: Option<String>,
}

impl NodeDescriptor {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arn: None,
        }
    }

    pub fn with_arn(mut self, arn: impl Into<String>) -> Self {
        self.arn = Some(arn.into());
        self
    }
}

/// Member account attached directly to a root or OU
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// 12-digit account ID
    pub id: String,

    /// Account name
    pub name: String,

    /// Root user email address
    pub email: String,

    /// Account ARN (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arn: Option<String>,

    /// Account status, e.g. ACTIVE or SUSPENDED (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Account {
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            arn: None,
            status: None,
        }
    }
}
