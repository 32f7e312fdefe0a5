// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Spatial structure tree shown by the relations tree

use crate::{ExpressId, IfcType};
use serde::{Deserialize, Serialize};

/// Type of spatial structure node
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpatialNodeType {
    /// IfcProject - root of the hierarchy
    Project,
    /// IfcSite - geographic site
    Site,
    /// IfcBuilding - a building structure
    Building,
    /// IfcBuildingStorey - a floor/level
    Storey,
    /// IfcSpace - a room or area
    Space,
    /// Contained element (wall, door, etc.)
    Element,
}

impl SpatialNodeType {
    /// Get icon for UI
    pub fn icon(&self) -> &'static str {
        match self {
            SpatialNodeType::Project => "📋",
            SpatialNodeType::Site => "🌍",
            SpatialNodeType::Building => "🏢",
            SpatialNodeType::Storey => "📐",
            SpatialNodeType::Space => "🚪",
            SpatialNodeType::Element => "🧱",
        }
    }

    /// Determine node type from IFC type
    pub fn from_ifc_type(ifc_type: &IfcType) -> Self {
        match ifc_type {
            IfcType::IfcProject => SpatialNodeType::Project,
            IfcType::IfcSite => SpatialNodeType::Site,
            IfcType::IfcBuilding => SpatialNodeType::Building,
            IfcType::IfcBuildingStorey => SpatialNodeType::Storey,
            IfcType::IfcSpace => SpatialNodeType::Space,
            _ => SpatialNodeType::Element,
        }
    }
}

/// Node in the spatial hierarchy tree
///
/// The tree follows Project → Site → Building → Storey → Elements.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpatialNode {
    pub id: ExpressId,
    pub node_type: SpatialNodeType,
    /// Display name
    pub name: String,
    /// Upper-case IFC class (e.g., "IFCWALL")
    pub entity_type: String,
    pub children: Vec<SpatialNode>,
}

impl SpatialNode {
    pub fn new(
        id: ExpressId,
        node_type: SpatialNodeType,
        name: impl Into<String>,
        entity_type: impl Into<String>,
    ) -> Self {
        Self {
            id,
            node_type,
            name: name.into(),
            entity_type: entity_type.into(),
            children: Vec::new(),
        }
    }

    pub fn add_child(&mut self, child: SpatialNode) {
        self.children.push(child);
    }

    /// Get total element count (recursive)
    pub fn element_count(&self) -> usize {
        let own = usize::from(self.node_type == SpatialNodeType::Element);
        own + self
            .children
            .iter()
            .map(|c| c.element_count())
            .sum::<usize>()
    }

    /// Find a node by ID (recursive)
    pub fn find(&self, id: ExpressId) -> Option<&SpatialNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Iterate all nodes (depth-first)
    pub fn iter(&self) -> SpatialNodeIter<'_> {
        SpatialNodeIter { stack: vec![self] }
    }

    /// Ids of this node and all descendants
    pub fn subtree_ids(&self) -> Vec<ExpressId> {
        self.iter().map(|n| n.id).collect()
    }

    /// Case-insensitive match on name or entity type
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self.entity_type.to_lowercase().contains(&query)
    }

    /// Copy of the tree keeping only matches and their ancestors
    ///
    /// A matching node keeps its whole subtree. An empty query keeps all.
    pub fn filtered(&self, query: &str) -> Option<SpatialNode> {
        if query.is_empty() || self.matches(query) {
            return Some(self.clone());
        }
        let children: Vec<SpatialNode> = self
            .children
            .iter()
            .filter_map(|child| child.filtered(query))
            .collect();
        if children.is_empty() {
            None
        } else {
            Some(SpatialNode {
                children,
                ..SpatialNode::new(self.id, self.node_type, &self.name, &self.entity_type)
            })
        }
    }
}

/// Iterator over spatial nodes (depth-first)
pub struct SpatialNodeIter<'a> {
    stack: Vec<&'a SpatialNode>,
}

impl<'a> Iterator for SpatialNodeIter<'a> {
    type Item = &'a SpatialNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Reverse so the first child is visited first
        for child in node.children.iter().rev() {
            self.stack.push(child);
        }
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> SpatialNode {
        let mut project = SpatialNode::new(ExpressId(1), SpatialNodeType::Project, "Proj", "IFCPROJECT");
        let mut storey =
            SpatialNode::new(ExpressId(2), SpatialNodeType::Storey, "Level 1", "IFCBUILDINGSTOREY");
        storey.add_child(SpatialNode::new(ExpressId(3), SpatialNodeType::Element, "Wall A", "IFCWALL"));
        storey.add_child(SpatialNode::new(ExpressId(4), SpatialNodeType::Element, "Door B", "IFCDOOR"));
        project.add_child(storey);
        project
    }

    #[test]
    fn test_iter_order_and_count() {
        let t = tree();
        let ids: Vec<u32> = t.iter().map(|n| n.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(t.element_count(), 2);
        assert_eq!(t.find(ExpressId(4)).map(|n| n.name.as_str()), Some("Door B"));
    }

    #[test]
    fn test_filter_preserves_ancestors() {
        let filtered = tree().filtered("door").unwrap();
        assert_eq!(filtered.id, ExpressId(1));
        assert_eq!(filtered.children.len(), 1);
        assert_eq!(filtered.children[0].children.len(), 1);
        assert_eq!(filtered.children[0].children[0].id, ExpressId(4));
        assert!(tree().filtered("window").is_none());
    }

    #[test]
    fn test_filter_matching_node_keeps_subtree() {
        let filtered = tree().filtered("level").unwrap();
        assert_eq!(filtered.children[0].children.len(), 2);
    }
}
