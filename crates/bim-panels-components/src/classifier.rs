// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Element classification
//!
//! Every `by_*` method adds to [`Classifier::list`]; classifying a second
//! group merges into the same systems.

use bim_panels_model::{
    ClassificationFilter, ClassificationGroup, ClassificationList, ClassificationSystem, Color,
    ExpressId, FragmentIdMap, FragmentsGroup, IfcType, PanelsConfig, ENTITIES_SYSTEM,
    PREDEFINED_TYPES_SYSTEM, PROPERTIES_SYSTEM, SPATIAL_STRUCTURES_SYSTEM,
};
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;

/// Spatial containers considered by [`Classifier::by_spatial_structure`]
const SPATIAL_CONTAINERS: &[IfcType] = &[
    IfcType::IfcSite,
    IfcType::IfcBuilding,
    IfcType::IfcBuildingStorey,
    IfcType::IfcSpace,
];

/// Colour overrides, for the renderer host
#[derive(Clone, Debug, PartialEq)]
pub enum ColorEvent {
    /// Elements of `map` are now painted `color`
    Set { map: FragmentIdMap, color: Color },
    /// Elements of `map` are back to their own material
    Reset { map: FragmentIdMap },
}

pub type ColorListener = Box<dyn FnMut(&ColorEvent)>;

#[derive(Default)]
pub struct Classifier {
    list: ClassificationList,
    /// fragment uuid -> express id -> colour override
    colors: FxHashMap<String, BTreeMap<ExpressId, Color>>,
    listeners: Vec<ColorListener>,
}

impl Classifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_color(&mut self, listener: impl FnMut(&ColorEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Run every classification a freshly loaded group gets
    ///
    /// Returns the walls of every group classified so far, as picked by
    /// `config.wall_entities`.
    pub fn classify_loaded(&mut self, group: &FragmentsGroup, config: &PanelsConfig) -> FragmentIdMap {
        self.by_entity(group);
        self.by_ifc_rel(group, &IfcType::IfcRelDefinesByProperties, PROPERTIES_SYSTEM);
        self.by_predefined_type(group);
        self.by_spatial_structure(group);

        let entities: Vec<&str> = config.wall_entities.iter().map(String::as_str).collect();
        let walls = self.find(&ClassificationFilter::new().with(ENTITIES_SYSTEM, &entities));
        log::debug!("{} walls in {}", walls.id_count(), group.name);
        walls
    }

    /// All systems computed so far
    pub fn list(&self) -> &ClassificationList {
        &self.list
    }

    pub fn system(&self, system: &str) -> Option<&ClassificationSystem> {
        self.list.get(system)
    }

    /// Fragment map of one group, if it exists
    pub fn group_map(&self, system: &str, name: &str) -> Option<&FragmentIdMap> {
        self.list.get(system)?.get(name).map(|g| &g.map)
    }

    /// Classify by IFC class into the `entities` system
    pub fn by_entity(&mut self, group: &FragmentsGroup) {
        let Some(properties) = group.local_properties() else {
            log::warn!("Group {} has no properties; skipping entity classification", group.name);
            return;
        };
        let index = group.fragments_by_id();
        for (id, fragments) in &index {
            let Some(ifc_type) = properties.get(*id).and_then(|r| r.ifc_type()) else {
                continue;
            };
            let entry = self.entry(ENTITIES_SYSTEM, ifc_type.name());
            for fragment in fragments {
                entry.map.insert(*fragment, *id);
            }
        }
        log::debug!(
            "Entity classification: {} groups",
            self.list.get(ENTITIES_SYSTEM).map_or(0, |s| s.len())
        );
    }

    /// Classify by `PredefinedType` into the `predefinedTypes` system
    pub fn by_predefined_type(&mut self, group: &FragmentsGroup) {
        let Some(properties) = group.local_properties() else {
            log::warn!("Group {} has no properties; skipping predefined types", group.name);
            return;
        };
        let index = group.fragments_by_id();
        for (id, fragments) in &index {
            let Some(predefined) = properties.get(*id).and_then(|r| r.predefined_type()) else {
                continue;
            };
            let entry = self.entry(PREDEFINED_TYPES_SYSTEM, &predefined.to_uppercase());
            for fragment in fragments {
                entry.map.insert(*fragment, *id);
            }
        }
    }

    /// Classify by spatial container into the `spatialStructures` system
    ///
    /// Membership comes from each container's `ContainsElements` relations.
    pub fn by_spatial_structure(&mut self, group: &FragmentsGroup) {
        let (Some(properties), Some(relations)) = (group.local_properties(), group.relations_map())
        else {
            log::warn!(
                "Group {} needs properties and relations for spatial classification",
                group.name
            );
            return;
        };

        for container_type in SPATIAL_CONTAINERS {
            for (container, record) in properties.of_type(container_type) {
                let name = record
                    .name()
                    .map(str::to_string)
                    .unwrap_or_else(|| container.to_string());
                let members = std::iter::once(container)
                    .chain(relations.related(container, "ContainsElements").iter().copied());
                let map = group.fragment_map(members);

                let entry = self.entry(SPATIAL_STRUCTURES_SYSTEM, &name);
                entry.id = Some(container);
                entry.map.merge(&map);
            }
        }
    }

    /// Classify by a relationship class into `system`
    ///
    /// For each relationship record of `rel_type`, the group is named after the
    /// entity its `Relating*` attribute points at, and holds its `Related*` ids.
    pub fn by_ifc_rel(&mut self, group: &FragmentsGroup, rel_type: &IfcType, system: &str) {
        let Some(properties) = group.local_properties() else {
            log::warn!("Group {} has no properties; skipping {}", group.name, rel_type);
            return;
        };

        for (rel_id, record) in properties.of_type(rel_type) {
            let Some(relating_key) = record.key_with_prefix("Relating") else {
                log::debug!("Relationship {} has no relating attribute", rel_id);
                continue;
            };
            let Some(relating) = record.handle(relating_key) else {
                continue;
            };
            let related = record
                .key_with_prefix("Related")
                .map(|key| record.handles(key))
                .unwrap_or_default();

            let name = properties
                .get(relating)
                .and_then(|r| r.name())
                .map(str::to_string)
                .unwrap_or_else(|| relating.to_string());
            let map = group.fragment_map(related);

            let entry = self.entry(system, &name);
            entry.id = Some(relating);
            entry.map.merge(&map);
        }
    }

    /// Elements matching `filter`
    ///
    /// Groups of one system are united, systems are intersected. Unknown
    /// systems or groups contribute nothing.
    pub fn find(&self, filter: &ClassificationFilter) -> FragmentIdMap {
        let mut result: Option<FragmentIdMap> = None;
        for (system, names) in filter.iter() {
            let mut union = FragmentIdMap::new();
            if let Some(groups) = self.list.get(system) {
                for name in names {
                    if let Some(group) = groups.get(name) {
                        union.merge(&group.map);
                    }
                }
            }
            result = Some(match result {
                Some(acc) => acc.intersection(&union),
                None => union,
            });
        }
        result.unwrap_or_default()
    }

    /// Override the colour of every element in `map`
    pub fn set_color(&mut self, map: &FragmentIdMap, color: Color) {
        for (fragment, ids) in map.iter() {
            let colors = self.colors.entry(fragment.to_string()).or_default();
            for id in ids {
                colors.insert(*id, color);
            }
        }
        self.emit(ColorEvent::Set {
            map: map.clone(),
            color,
        });
    }

    /// Drop colour overrides for every element in `map`
    pub fn reset_color(&mut self, map: &FragmentIdMap) {
        for (fragment, ids) in map.iter() {
            if let Some(colors) = self.colors.get_mut(fragment) {
                for id in ids {
                    colors.remove(id);
                }
                if colors.is_empty() {
                    self.colors.remove(fragment);
                }
            }
        }
        self.emit(ColorEvent::Reset { map: map.clone() });
    }

    /// Current colour override of one element
    pub fn color_of(&self, fragment: &str, id: ExpressId) -> Option<Color> {
        self.colors.get(fragment)?.get(&id).copied()
    }

    /// Forget a group's fragments in every system; empty groups are dropped
    pub fn remove_group(&mut self, group: &FragmentsGroup) {
        for system in self.list.values_mut() {
            for entry in system.values_mut() {
                for item in &group.items {
                    entry.map.remove_fragment(&item.uuid);
                }
            }
            system.retain(|_, entry| !entry.map.is_empty());
        }
        self.list.retain(|_, system| !system.is_empty());
        for item in &group.items {
            self.colors.remove(&item.uuid);
        }
    }

    fn emit(&mut self, event: ColorEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }

    fn entry(&mut self, system: &str, name: &str) -> &mut ClassificationGroup {
        self.list
            .entry(system.to_string())
            .or_default()
            .entry(name.to_string())
            .or_default()
    }
}
