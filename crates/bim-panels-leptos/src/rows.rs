//! Flattened rows for the panel trees
//!
//! Pure functions over the classifier list and spatial trees, so the views
//! only decide how rows look.

use crate::state::ModelTree;
use bim_panels_model::{
    ClassificationEntry, ClassificationList, ExpressId, FragmentIdMap, FragmentsGroup,
    SpatialNode, SpatialNodeType,
};
use rustc_hash::FxHashSet;
use std::sync::Arc;

/// Row background while hovered
pub const HOVER_BACKGROUND: &str = "var(--bim-ui_bg-contrast-20)";

/// One row of a classification tree
#[derive(Clone, Debug, PartialEq)]
pub struct ClassificationRow {
    pub system: String,
    /// Group name, or the system label for header rows
    pub name: String,
    pub depth: usize,
    /// Ids in the group, or groups in the system for header rows
    pub count: usize,
    /// Highlight target; `None` rows get no hover or click handlers
    pub map: Option<FragmentIdMap>,
}

impl ClassificationRow {
    pub fn is_interactive(&self) -> bool {
        self.map.is_some()
    }
}

/// Fragment map behind a `(system, Name)` row
///
/// Missing systems, missing groups and empty maps all yield `None`.
pub fn row_fragment_map<'a>(
    list: &'a ClassificationList,
    system: &str,
    name: &str,
) -> Option<&'a FragmentIdMap> {
    list.get(system)?
        .get(name)
        .map(|group| &group.map)
        .filter(|map| !map.is_empty())
}

/// Rows for the given systems, filtered by `query`
///
/// A system whose label matches keeps all its groups. Otherwise only groups
/// whose name contains the query (case-insensitive) are kept, and the header
/// is dropped when none are.
pub fn classification_rows(
    list: &ClassificationList,
    systems: &[ClassificationEntry],
    query: &str,
) -> Vec<ClassificationRow> {
    let query = query.trim().to_lowercase();
    let mut rows = Vec::new();

    for entry in systems {
        let Some(groups) = list.get(&entry.system) else {
            continue;
        };
        let label_matches = query.is_empty() || entry.label.to_lowercase().contains(&query);

        let children: Vec<ClassificationRow> = groups
            .iter()
            .filter(|(name, _)| label_matches || name.to_lowercase().contains(&query))
            .map(|(name, group)| ClassificationRow {
                system: entry.system.clone(),
                name: name.clone(),
                depth: 1,
                count: group.map.id_count(),
                map: row_fragment_map(list, &entry.system, name).cloned(),
            })
            .collect();

        if children.is_empty() && !label_matches {
            continue;
        }
        rows.push(ClassificationRow {
            system: entry.system.clone(),
            name: entry.label.clone(),
            depth: 0,
            count: children.len(),
            map: None,
        });
        rows.extend(children);
    }
    rows
}

/// One row of the relations tree
#[derive(Clone, Debug, PartialEq)]
pub struct RelationsRow {
    pub group_uuid: String,
    pub id: ExpressId,
    pub name: String,
    pub entity_type: String,
    pub node_type: SpatialNodeType,
    pub depth: usize,
    pub has_children: bool,
    pub expanded: bool,
}

/// Visible rows of the relations tree
///
/// A non-empty query shows the filtered tree fully open with every match's
/// ancestors kept. Otherwise children show when `expand_all` is set or the
/// node was opened by hand.
pub fn relations_rows(
    trees: &[ModelTree],
    query: &str,
    expand_all: bool,
    expanded: &FxHashSet<(String, ExpressId)>,
) -> Vec<RelationsRow> {
    let query = query.trim();
    let mut rows = Vec::new();

    for tree in trees {
        let Some(root) = tree.root.filtered(query) else {
            continue;
        };
        let open_all = expand_all || !query.is_empty();
        push_relations_rows(&tree.group_uuid, &root, 0, open_all, expanded, &mut rows);
    }
    rows
}

fn push_relations_rows(
    group_uuid: &str,
    node: &SpatialNode,
    depth: usize,
    open_all: bool,
    expanded: &FxHashSet<(String, ExpressId)>,
    rows: &mut Vec<RelationsRow>,
) {
    let is_open = open_all || expanded.contains(&(group_uuid.to_string(), node.id));
    rows.push(RelationsRow {
        group_uuid: group_uuid.to_string(),
        id: node.id,
        name: node.name.clone(),
        entity_type: node.entity_type.clone(),
        node_type: node.node_type,
        depth,
        has_children: !node.children.is_empty(),
        expanded: is_open,
    });

    if is_open {
        for child in &node.children {
            push_relations_rows(group_uuid, child, depth + 1, open_all, expanded, rows);
        }
    }
}

/// Fragment map of a relations row: the node and everything below it
pub fn relations_row_map(
    groups: &[Arc<FragmentsGroup>],
    trees: &[ModelTree],
    group_uuid: &str,
    id: ExpressId,
) -> Option<FragmentIdMap> {
    let group = groups.iter().find(|g| g.uuid == group_uuid)?;
    let node = trees
        .iter()
        .find(|t| t.group_uuid == group_uuid)?
        .root
        .find(id)?;
    let map = group.fragment_map(node.subtree_ids());
    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bim_panels_model::{ClassificationGroup, ClassificationSystem, FragmentItem};

    fn list() -> ClassificationList {
        let mut walls = FragmentIdMap::new();
        walls.insert("frag-a", ExpressId(10));
        walls.insert("frag-a", ExpressId(11));

        let mut entities = ClassificationSystem::new();
        entities.insert(
            "IFCWALL".to_string(),
            ClassificationGroup {
                map: walls,
                id: None,
            },
        );
        entities.insert(
            "IFCSPACE".to_string(),
            ClassificationGroup {
                map: FragmentIdMap::new(),
                id: None,
            },
        );

        let mut list = ClassificationList::new();
        list.insert("entities".to_string(), entities);
        list
    }

    fn systems() -> Vec<ClassificationEntry> {
        vec![
            ClassificationEntry::new("entities", "Entities"),
            ClassificationEntry::new("value", "Properties"),
        ]
    }

    #[test]
    fn test_row_map_requires_non_empty_group() {
        let list = list();
        assert_eq!(row_fragment_map(&list, "entities", "IFCWALL").unwrap().id_count(), 2);
        assert!(row_fragment_map(&list, "entities", "IFCSPACE").is_none());
        assert!(row_fragment_map(&list, "entities", "IFCDOOR").is_none());
        assert!(row_fragment_map(&list, "value", "IFCWALL").is_none());
    }

    #[test]
    fn test_rows_skip_unknown_systems() {
        let rows = classification_rows(&list(), &systems(), "");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].name, "Entities");
        assert!(!rows[0].is_interactive());
        assert_eq!(rows[0].count, 2);

        let space = rows.iter().find(|r| r.name == "IFCSPACE").unwrap();
        assert!(!space.is_interactive());
        let wall = rows.iter().find(|r| r.name == "IFCWALL").unwrap();
        assert!(wall.is_interactive());
    }

    #[test]
    fn test_rows_query() {
        let rows = classification_rows(&list(), &systems(), "wall");
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Entities", "IFCWALL"]);

        let by_label = classification_rows(&list(), &systems(), "entit");
        assert_eq!(by_label.len(), 3);

        assert!(classification_rows(&list(), &systems(), "door").is_empty());
    }

    fn tree() -> ModelTree {
        let mut root = SpatialNode::new(ExpressId(1), SpatialNodeType::Project, "Demo", "IFCPROJECT");
        let mut storey = SpatialNode::new(ExpressId(4), SpatialNodeType::Storey, "Ground", "IFCBUILDINGSTOREY");
        storey.add_child(SpatialNode::new(ExpressId(10), SpatialNodeType::Element, "Wall A", "IFCWALL"));
        storey.add_child(SpatialNode::new(ExpressId(12), SpatialNodeType::Element, "Door", "IFCDOOR"));
        root.add_child(storey);
        ModelTree {
            group_uuid: "g".to_string(),
            model_name: "House".to_string(),
            root,
        }
    }

    #[test]
    fn test_relations_collapsed_by_default() {
        let rows = relations_rows(&[tree()], "", false, &FxHashSet::default());
        assert_eq!(rows.len(), 1);
        assert!(rows[0].has_children);
        assert!(!rows[0].expanded);
    }

    #[test]
    fn test_relations_expand_toggle_and_manual() {
        let all = relations_rows(&[tree()], "", true, &FxHashSet::default());
        assert_eq!(all.len(), 4);
        assert_eq!(all[3].depth, 2);

        let mut opened = FxHashSet::default();
        opened.insert(("g".to_string(), ExpressId(1)));
        let rows = relations_rows(&[tree()], "", false, &opened);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].name, "Ground");
    }

    #[test]
    fn test_relations_filter_keeps_ancestors() {
        let rows = relations_rows(&[tree()], "door", false, &FxHashSet::default());
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Demo", "Ground", "Door"]);

        assert!(relations_rows(&[tree()], "roof", true, &FxHashSet::default()).is_empty());
    }

    #[test]
    fn test_relations_row_map_covers_subtree() {
        let group = Arc::new(FragmentsGroup::new(
            "g",
            "House",
            vec![
                FragmentItem::new("frag-a", [ExpressId(10)]),
                FragmentItem::new("frag-b", [ExpressId(12)]),
            ],
            Vec::new(),
        ));
        let trees = [tree()];
        let map = relations_row_map(&[group.clone()], &trees, "g", ExpressId(4)).unwrap();
        assert_eq!(map.id_count(), 2);
        let door = relations_row_map(&[group.clone()], &trees, "g", ExpressId(12)).unwrap();
        assert!(door.contains("frag-b", ExpressId(12)));
        assert!(relations_row_map(&[group], &trees, "other", ExpressId(4)).is_none());
    }
}
