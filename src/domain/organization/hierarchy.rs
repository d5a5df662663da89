//! Hierarchy construction over the fetched catalog.
//!
//! Reshapes the enriched macroprocess rows into a three-level tree of view
//! nodes. Nodes live in a flat arena (parents inserted before children,
//! children referenced by index) so future risk-linkage backreferences do
//! not create ownership cycles.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::foundation::RecordStatus;

use super::macroprocess::MacroprocessWithProcesses;

/// The hierarchy always spans exactly three levels.
pub const MAX_DEPTH: u8 = 3;

/// Which entity kind a hierarchy node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Macroprocess,
    Process,
    Subprocess,
}

impl NodeKind {
    /// Depth level of this kind: 0, 1 or 2.
    pub fn level(&self) -> u8 {
        match self {
            NodeKind::Macroprocess => 0,
            NodeKind::Process => 1,
            NodeKind::Subprocess => 2,
        }
    }
}

/// A node in the hierarchy view model.
///
/// `parent` and `children` are arena indices into the owning
/// [`ProcessTree`]; `parent_id` is the owning entity's id for display.
#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyNode {
    pub id: Uuid,
    pub name: String,
    pub kind: NodeKind,
    pub level: u8,
    pub parent: Option<usize>,
    pub parent_id: Option<Uuid>,
    pub children: Vec<usize>,
    pub status: RecordStatus,
    /// Always zero until risk linkage lands.
    pub risk_count: u32,
}

/// Predicate applied when pruning the tree.
///
/// A node is retained when it matches directly or any descendant does, so a
/// matching leaf keeps its whole ancestor chain visible.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeFilter {
    /// Case-insensitive substring match on the node name.
    pub search: Option<String>,
    /// Exact status match; `None` accepts both statuses.
    pub status: Option<RecordStatus>,
}

impl TreeFilter {
    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.status.is_none()
    }

    fn matches(&self, node: &HierarchyNode) -> bool {
        let search_ok = self.search.as_deref().map_or(true, |text| {
            node.name.to_lowercase().contains(&text.to_lowercase())
        });
        let status_ok = self.status.map_or(true, |status| node.status == status);
        search_ok && status_ok
    }
}

/// The three-level catalog tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessTree {
    nodes: Vec<HierarchyNode>,
    roots: Vec<usize>,
}

impl ProcessTree {
    /// Builds the tree from enriched macroprocess rows.
    ///
    /// Child order preserves the fetch order (ascending by name); no
    /// re-sorting happens here.
    pub fn build(macroprocesses: &[MacroprocessWithProcesses]) -> Self {
        let mut tree = ProcessTree::default();

        for record in macroprocesses {
            let m = &record.macroprocess;
            let m_idx = tree.push_node(HierarchyNode {
                id: *m.id.as_uuid(),
                name: m.name.clone(),
                kind: NodeKind::Macroprocess,
                level: 0,
                parent: None,
                parent_id: None,
                children: Vec::new(),
                status: m.status,
                risk_count: 0,
            });
            tree.roots.push(m_idx);

            for child in &record.processes {
                let p = &child.process;
                let p_idx = tree.push_node(HierarchyNode {
                    id: *p.id.as_uuid(),
                    name: p.name.clone(),
                    kind: NodeKind::Process,
                    level: 1,
                    parent: Some(m_idx),
                    parent_id: Some(*m.id.as_uuid()),
                    children: Vec::new(),
                    status: p.status,
                    risk_count: 0,
                });
                tree.nodes[m_idx].children.push(p_idx);

                for s in &child.subprocesses {
                    let s_idx = tree.push_node(HierarchyNode {
                        id: *s.id.as_uuid(),
                        name: s.name.clone(),
                        kind: NodeKind::Subprocess,
                        level: 2,
                        parent: Some(p_idx),
                        parent_id: Some(*p.id.as_uuid()),
                        children: Vec::new(),
                        status: s.status,
                        risk_count: 0,
                    });
                    tree.nodes[p_idx].children.push(s_idx);
                }
            }
        }

        tree
    }

    fn push_node(&mut self, node: HierarchyNode) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn nodes(&self) -> &[HierarchyNode] {
        &self.nodes
    }

    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    /// Every emitted node counts, across all three levels.
    pub fn total_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn max_depth(&self) -> u8 {
        MAX_DEPTH
    }

    /// Prunes the tree, keeping nodes that match the filter or have a
    /// matching descendant.
    ///
    /// Parents precede their children in the arena, so one reverse pass
    /// settles the retention flags; a second pass rebuilds the pruned arena.
    pub fn retain(&self, filter: &TreeFilter) -> ProcessTree {
        if filter.is_empty() {
            return self.clone();
        }

        let mut keep = vec![false; self.nodes.len()];
        for idx in (0..self.nodes.len()).rev() {
            let node = &self.nodes[idx];
            keep[idx] =
                filter.matches(node) || node.children.iter().any(|&child| keep[child]);
        }

        let mut remap = vec![usize::MAX; self.nodes.len()];
        let mut pruned = ProcessTree::default();
        for (idx, node) in self.nodes.iter().enumerate() {
            if !keep[idx] {
                continue;
            }
            let mut copy = node.clone();
            // Parents have smaller indices, so their remap entry is settled.
            copy.parent = node.parent.map(|p| remap[p]);
            // Children have larger indices; keep the old indices for now and
            // translate them once every kept node has a new slot.
            copy.children = node.children.iter().copied().filter(|&c| keep[c]).collect();
            remap[idx] = pruned.nodes.len();
            if node.parent.is_none() {
                pruned.roots.push(remap[idx]);
            }
            pruned.nodes.push(copy);
        }
        for node in &mut pruned.nodes {
            for child in &mut node.children {
                *child = remap[*child];
            }
        }

        pruned
    }
}
