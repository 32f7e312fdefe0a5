// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Spatial tree builder for the relations tree

use bim_panels_model::{
    ExpressId, FragmentsGroup, IfcType, PropertiesTable, RelationsMap, SpatialNode,
    SpatialNodeType,
};
use rustc_hash::FxHashSet;

/// Build the Project → … → Elements tree of a group
///
/// Follows `IsDecomposedBy` then `ContainsElements` from the project record.
/// Returns `None` without properties, relations or a project.
pub fn build_spatial_tree(group: &FragmentsGroup) -> Option<SpatialNode> {
    let properties = group.local_properties()?;
    let relations = group.relations_map()?;
    let (project_id, _) = properties.of_type(&IfcType::IfcProject).next()?;

    let mut builder = SpatialBuilder {
        properties,
        relations,
        visited: FxHashSet::default(),
    };
    let tree = builder.build_node(project_id);
    log::debug!(
        "Spatial tree for {}: {} elements",
        group.name,
        tree.element_count()
    );
    Some(tree)
}

struct SpatialBuilder<'a> {
    properties: &'a PropertiesTable,
    relations: &'a RelationsMap,
    /// Guards against cycles in malformed relation maps
    visited: FxHashSet<ExpressId>,
}

impl SpatialBuilder<'_> {
    fn build_node(&mut self, id: ExpressId) -> SpatialNode {
        self.visited.insert(id);
        let mut node = self.create_node(id);

        let children: Vec<ExpressId> = self
            .relations
            .related(id, "IsDecomposedBy")
            .iter()
            .chain(self.relations.related(id, "ContainsElements"))
            .copied()
            .collect();

        for child in children {
            if self.visited.contains(&child) {
                continue;
            }
            let child_node = self.build_node(child);
            node.add_child(child_node);
        }
        node
    }

    fn create_node(&self, id: ExpressId) -> SpatialNode {
        let record = self.properties.get(id);
        let ifc_type = record
            .and_then(|r| r.ifc_type())
            .unwrap_or_else(|| IfcType::Unknown("UNKNOWN".to_string()));
        let name = record
            .and_then(|r| r.name())
            .map(str::to_string)
            .unwrap_or_else(|| id.to_string());

        SpatialNode::new(
            id,
            SpatialNodeType::from_ifc_type(&ifc_type),
            name,
            ifc_type.name(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::group;

    #[test]
    fn test_builds_hierarchy() {
        let tree = build_spatial_tree(&group()).unwrap();
        assert_eq!(tree.name, "Demo Project");
        assert_eq!(tree.node_type, SpatialNodeType::Project);

        let building = &tree.children[0].children[0];
        assert_eq!(building.name, "House");
        assert_eq!(building.children.len(), 2);

        let ground = &building.children[0];
        assert_eq!(ground.node_type, SpatialNodeType::Storey);
        assert_eq!(ground.children.len(), 3);
        assert_eq!(tree.element_count(), 4);
    }

    #[test]
    fn test_cycle_terminates() {
        let g = group().with_relations(RelationsMap::from_json(r#"{"1": {"0": [1]}}"#).ok());
        let tree = build_spatial_tree(&g).unwrap();
        assert!(tree.children.is_empty());
    }

    #[test]
    fn test_requires_relations() {
        let g = group().with_relations(None);
        assert!(build_spatial_tree(&g).is_none());
    }
}
