//! HTTP DTOs for the hierarchy and dashboard read models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::adapters::http::StatusParam;
use crate::domain::foundation::RecordStatus;
use crate::domain::organization::{NodeKind, ProcessTree, TreeFilter};

/// Query parameters for the hierarchy endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HierarchyQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub status: Option<StatusParam>,
}

impl HierarchyQuery {
    pub fn into_filter(self) -> TreeFilter {
        TreeFilter {
            search: self.search.filter(|s| !s.trim().is_empty()),
            status: self.status.and_then(StatusParam::to_criterion),
        }
    }
}

/// One node of the nested tree response.
#[derive(Debug, Clone, Serialize)]
pub struct TreeNodeResponse {
    pub id: Uuid,
    pub name: String,
    pub kind: NodeKind,
    pub level: u8,
    pub parent_id: Option<Uuid>,
    pub status: RecordStatus,
    pub risk_count: u32,
    pub children: Vec<TreeNodeResponse>,
}

/// The hierarchy tree as nested JSON.
#[derive(Debug, Clone, Serialize)]
pub struct HierarchyResponse {
    pub roots: Vec<TreeNodeResponse>,
    pub total_nodes: usize,
    pub max_depth: u8,
}

impl HierarchyResponse {
    /// Nests the arena into the recursive response shape.
    pub fn from_tree(tree: &ProcessTree) -> Self {
        fn nest(tree: &ProcessTree, idx: usize) -> TreeNodeResponse {
            let node = &tree.nodes()[idx];
            TreeNodeResponse {
                id: node.id,
                name: node.name.clone(),
                kind: node.kind,
                level: node.level,
                parent_id: node.parent_id,
                status: node.status,
                risk_count: node.risk_count,
                children: node.children.iter().map(|&c| nest(tree, c)).collect(),
            }
        }

        Self {
            roots: tree.roots().iter().map(|&r| nest(tree, r)).collect(),
            total_nodes: tree.total_nodes(),
            max_depth: tree.max_depth(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{MacroprocessId, Timestamp};
    use crate::domain::organization::{
        Macroprocess, MacroprocessKind, MacroprocessWithProcesses,
    };

    #[test]
    fn from_tree_nests_and_counts() {
        let catalog = vec![MacroprocessWithProcesses {
            macroprocess: Macroprocess {
                id: MacroprocessId::new(),
                kind: MacroprocessKind::Strategic,
                name: "Planning".to_string(),
                external_link: None,
                status: RecordStatus::Active,
                created_at: Timestamp::now(),
                updated_at: Timestamp::now(),
            },
            processes: vec![],
        }];
        let tree = ProcessTree::build(&catalog);
        let response = HierarchyResponse::from_tree(&tree);

        assert_eq!(response.total_nodes, 1);
        assert_eq!(response.max_depth, 3);
        assert_eq!(response.roots.len(), 1);
        assert_eq!(response.roots[0].name, "Planning");
        assert!(response.roots[0].children.is_empty());
    }

    #[test]
    fn hierarchy_query_treats_blank_search_as_absent() {
        let query = HierarchyQuery {
            search: Some("  ".to_string()),
            status: None,
        };
        assert!(query.into_filter().is_empty());
    }
}
