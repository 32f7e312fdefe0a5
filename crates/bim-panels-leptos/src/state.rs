//! Shared panel state
//!
//! Collaborators live in local stored values; everything the views render
//! from is a signal.

use bim_panels_components::{
    build_spatial_tree, Classifier, ColorEvent, ColorListener, FragmentsManager, HighlightEvent,
    HighlightListener, Highlighter, IfcRelationsIndexer,
};
use bim_panels_model::{
    ExpressId, FragmentIdMap, FragmentsCodec, FragmentsGroup, IfcLoader, PanelsConfig,
    SpatialNode,
};
use leptos::prelude::*;
use rustc_hash::FxHashSet;
use std::sync::Arc;

/// Spatial tree of one loaded model
#[derive(Clone, Debug, PartialEq)]
pub struct ModelTree {
    pub group_uuid: String,
    pub model_name: String,
    pub root: SpatialNode,
}

// ============================================================================
// Signal groups
// ============================================================================

/// Loaded models, in load order
#[derive(Clone, Copy)]
pub struct ModelsState {
    pub groups: RwSignal<Vec<Arc<FragmentsGroup>>>,
    pub trees: RwSignal<Vec<ModelTree>>,
    /// Bumped whenever the classifier list changes
    pub classifications_version: RwSignal<u64>,
}

impl ModelsState {
    pub fn new() -> Self {
        Self {
            groups: RwSignal::new(Vec::new()),
            trees: RwSignal::new(Vec::new()),
            classifications_version: RwSignal::new(0),
        }
    }

    pub fn add(&self, group: Arc<FragmentsGroup>) {
        if let Some(root) = build_spatial_tree(&group) {
            self.trees.update(|trees| {
                trees.push(ModelTree {
                    group_uuid: group.uuid.clone(),
                    model_name: group.name.clone(),
                    root,
                })
            });
        }
        self.groups.update(|groups| groups.push(group));
    }

    pub fn remove(&self, uuid: &str) {
        self.groups.update(|groups| groups.retain(|g| g.uuid != uuid));
        self.trees.update(|trees| trees.retain(|t| t.group_uuid != uuid));
        self.touch_classifications();
    }

    pub fn touch_classifications(&self) {
        self.classifications_version.update(|v| *v += 1);
    }
}

impl Default for ModelsState {
    fn default() -> Self {
        Self::new()
    }
}

/// Search and expand state of the panel trees
#[derive(Clone, Copy)]
pub struct TreesState {
    pub classification_query: RwSignal<String>,
    pub relations_query: RwSignal<String>,
    pub entity_query: RwSignal<String>,
    /// Relations tree expand toggle
    pub relations_expanded: RwSignal<bool>,
    /// Nodes expanded by hand while the tree is collapsed, keyed by group
    pub expanded_nodes: RwSignal<FxHashSet<(String, ExpressId)>>,
}

impl TreesState {
    pub fn new() -> Self {
        Self {
            classification_query: RwSignal::new(String::new()),
            relations_query: RwSignal::new(String::new()),
            entity_query: RwSignal::new(String::new()),
            relations_expanded: RwSignal::new(false),
            expanded_nodes: RwSignal::new(FxHashSet::default()),
        }
    }

    pub fn toggle_relations_expanded(&self) {
        self.relations_expanded.update(|e| *e = !*e);
    }

    pub fn toggle_node(&self, group_uuid: &str, id: ExpressId) {
        let key = (group_uuid.to_string(), id);
        self.expanded_nodes.update(|nodes| {
            if !nodes.remove(&key) {
                nodes.insert(key);
            }
        });
    }
}

impl Default for TreesState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Host hooks
// ============================================================================

/// Renderer-side listeners supplied by the host
#[derive(Default)]
pub struct PanelsHooks {
    highlight: Vec<HighlightListener>,
    color: Vec<ColorListener>,
}

impl PanelsHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Receive selection, clear and zoom changes
    pub fn with_highlight_listener(
        mut self,
        listener: impl FnMut(&HighlightEvent) + 'static,
    ) -> Self {
        self.highlight.push(Box::new(listener));
        self
    }

    /// Receive colour overrides and resets
    pub fn with_color_listener(mut self, listener: impl FnMut(&ColorEvent) + 'static) -> Self {
        self.color.push(Box::new(listener));
        self
    }

    fn install(self, highlighter: &mut Highlighter, classifier: &mut Classifier) {
        for listener in self.highlight {
            highlighter.on_event(listener);
        }
        for listener in self.color {
            classifier.on_color(listener);
        }
    }
}

// ============================================================================
// Panels state
// ============================================================================

/// Everything the panels share
#[derive(Clone, Copy)]
pub struct PanelsState {
    pub fragments: StoredValue<FragmentsManager, LocalStorage>,
    pub classifier: StoredValue<Classifier, LocalStorage>,
    pub highlighter: StoredValue<Highlighter, LocalStorage>,
    pub indexer: StoredValue<IfcRelationsIndexer, LocalStorage>,
    pub ifc_loader: StoredValue<Option<Box<dyn IfcLoader>>, LocalStorage>,
    pub config: StoredValue<PanelsConfig>,
    /// Walls found by the last classification; unset before the first load
    pub walls: StoredValue<Option<FragmentIdMap>>,
    pub models: ModelsState,
    pub trees: TreesState,
}

impl PanelsState {
    pub fn new(
        codec: impl FragmentsCodec + 'static,
        ifc_loader: Option<Box<dyn IfcLoader>>,
        config: PanelsConfig,
        hooks: PanelsHooks,
    ) -> Self {
        let mut highlighter = Highlighter::new();
        let mut classifier = Classifier::new();
        hooks.install(&mut highlighter, &mut classifier);

        let state = Self {
            fragments: StoredValue::new_local(FragmentsManager::new(codec)),
            classifier: StoredValue::new_local(classifier),
            highlighter: StoredValue::new_local(highlighter),
            indexer: StoredValue::new_local(IfcRelationsIndexer::new()),
            ifc_loader: StoredValue::new_local(ifc_loader),
            config: StoredValue::new(config),
            walls: StoredValue::new(None),
            models: ModelsState::new(),
            trees: TreesState::new(),
        };

        // Runs inside the manager's update, so it must not touch `fragments`
        state.fragments.update_value(|manager| {
            manager.on_fragments_loaded(move |group| {
                state.indexer.update_value(|indexer| {
                    indexer.process(group);
                });
                state.models.add(group.clone());

                let walls = state.config.with_value(|config| {
                    state
                        .classifier
                        .try_update_value(|classifier| classifier.classify_loaded(group, config))
                });
                if let Some(walls) = walls {
                    state.walls.set_value(Some(walls));
                }
                state.models.touch_classifications();
            });
        });
        state
    }

    /// Drop a model from every collaborator
    pub fn remove_model(&self, uuid: &str) {
        let removed = self
            .fragments
            .try_update_value(|manager| manager.dispose_group(uuid))
            .flatten();
        if let Some(group) = removed {
            self.classifier
                .update_value(|classifier| classifier.remove_group(&group));
            self.indexer.update_value(|indexer| indexer.forget(uuid));
            self.models.remove(uuid);
        }
    }

    pub fn config(&self) -> PanelsConfig {
        self.config.get_value()
    }
}

/// Provide panels state to the component tree
pub fn provide_panels_state(state: PanelsState) {
    provide_context(state);
}

/// Hook to access panels state from context
pub fn use_panels_state() -> PanelsState {
    expect_context::<PanelsState>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bim_panels_model::Color;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_hooks_receive_highlighter_and_classifier_events() {
        let highlights = Rc::new(RefCell::new(Vec::new()));
        let colors = Rc::new(RefCell::new(Vec::new()));
        let (h, c) = (highlights.clone(), colors.clone());
        let hooks = PanelsHooks::new()
            .with_highlight_listener(move |event| h.borrow_mut().push(event.clone()))
            .with_color_listener(move |event| c.borrow_mut().push(event.clone()));

        let mut highlighter = Highlighter::new();
        let mut classifier = Classifier::new();
        hooks.install(&mut highlighter, &mut classifier);

        let mut map = FragmentIdMap::new();
        map.insert("frag-a", ExpressId(10));
        highlighter.clear("select");
        classifier.set_color(&map, Color::new(1.0, 0.0, 0.0));
        classifier.reset_color(&map);

        assert_eq!(
            *highlights.borrow(),
            vec![HighlightEvent::Clear {
                name: "select".to_string()
            }]
        );
        assert_eq!(colors.borrow().len(), 2);
        assert_eq!(*colors.borrow().last().unwrap(), ColorEvent::Reset { map });
    }
}
