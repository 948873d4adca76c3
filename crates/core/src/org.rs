//! Organization records (districts, schools, security companies).
//!
//! Organizations form a tree: every record carries a parent pointer and a
//! caller-maintained depth, and the nested view is rebuilt on demand by
//! [`crate::hierarchy`].

use serde::{Deserialize, Serialize};

use crate::hierarchy::HierarchyNode;
use crate::types::{DbId, Timestamp};

/// Kind of organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrgType {
    /// An administrative grouping (district, bureau).
    Group,
    /// A school receiving assessment tasks.
    School,
    /// A security-personnel company.
    Company,
}

/// A flat organization row.
///
/// `level` is 1 for roots and `parent.level + 1` otherwise, assigned when
/// the record is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: DbId,
    pub parent_id: Option<DbId>,
    pub level: i32,
    pub name: String,
    pub org_type: OrgType,
    /// Display order within the full list, ascending.
    pub sequence: i32,
    pub created_date: Timestamp,
}

impl HierarchyNode for Organization {
    fn node_id(&self) -> DbId {
        self.id
    }

    fn parent_id(&self) -> Option<DbId> {
        self.parent_id
    }

    fn level(&self) -> i32 {
        self.level
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

/// Derive the level for a new organization from its parent, if any.
pub fn child_level(parent_level: Option<i32>) -> i32 {
    match parent_level {
        Some(level) => level + 1,
        None => 1,
    }
}
