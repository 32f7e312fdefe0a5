// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Registry of loaded fragment groups

use bim_panels_model::{
    FragmentsCodec, FragmentsExporter, FragmentsGroup, FragmentsLoader, LoadData, Result,
};
use std::sync::Arc;

/// Callback run after every successful load
pub type LoadedListener = Box<dyn FnMut(&Arc<FragmentsGroup>)>;

/// Loaded groups in load order
///
/// "First group" means the oldest one still loaded; there is no other
/// selection mechanism.
pub struct FragmentsManager {
    codec: Box<dyn FragmentsCodec>,
    groups: Vec<Arc<FragmentsGroup>>,
    on_loaded: Vec<LoadedListener>,
}

impl FragmentsManager {
    pub fn new(codec: impl FragmentsCodec + 'static) -> Self {
        Self {
            codec: Box::new(codec),
            groups: Vec::new(),
            on_loaded: Vec::new(),
        }
    }

    /// Register a listener for new groups
    pub fn on_fragments_loaded(&mut self, listener: impl FnMut(&Arc<FragmentsGroup>) + 'static) {
        self.on_loaded.push(Box::new(listener));
    }

    /// Remove a group; returns it if it was loaded
    pub fn dispose_group(&mut self, uuid: &str) -> Option<Arc<FragmentsGroup>> {
        let index = self.groups.iter().position(|g| g.uuid == uuid)?;
        let group = self.groups.remove(index);
        log::info!("Disposed fragments group {} ({})", group.name, group.uuid);
        Some(group)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl FragmentsLoader for FragmentsManager {
    fn load(&mut self, geometry: Vec<u8>, data: LoadData) -> Result<Arc<FragmentsGroup>> {
        let items = self.codec.decode(&geometry)?;
        let uuid = uuid::Uuid::new_v4().to_string();
        let name = data
            .name
            .unwrap_or_else(|| format!("Model {}", self.groups.len() + 1));

        log::info!(
            "Loaded fragments group {} with {} items ({} bytes)",
            name,
            items.len(),
            geometry.len()
        );

        let group = Arc::new(
            FragmentsGroup::new(uuid, name, items, geometry)
                .with_properties(data.properties)
                .with_relations(data.relations_map),
        );
        self.groups.push(group.clone());

        for listener in &mut self.on_loaded {
            listener(&group);
        }
        Ok(group)
    }
}

impl FragmentsExporter for FragmentsManager {
    fn first_group(&self) -> Option<Arc<FragmentsGroup>> {
        self.groups.first().cloned()
    }

    fn export(&self, group: &FragmentsGroup) -> Result<Vec<u8>> {
        self.codec.encode(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{geometry, TextCodec};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_load_notifies_and_orders() {
        let mut manager = FragmentsManager::new(TextCodec);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        manager.on_fragments_loaded(move |group| sink.borrow_mut().push(group.name.clone()));

        let first = manager
            .load(geometry(), LoadData::default().with_name("A"))
            .unwrap();
        manager
            .load(geometry(), LoadData::default().with_name("B"))
            .unwrap();

        assert_eq!(*seen.borrow(), vec!["A".to_string(), "B".to_string()]);
        assert_eq!(manager.first_group().unwrap().uuid, first.uuid);
        assert_eq!(first.items.len(), 3);
    }

    #[test]
    fn test_export_round_trips_through_codec() {
        let mut manager = FragmentsManager::new(TextCodec);
        let group = manager.load(geometry(), LoadData::default()).unwrap();
        assert_eq!(manager.export(&group).unwrap(), geometry());
        assert_eq!(group.name, "Model 1");
    }

    #[test]
    fn test_decode_failure_registers_nothing() {
        let mut manager = FragmentsManager::new(TextCodec);
        assert!(manager.load(b"broken".to_vec(), LoadData::default()).is_err());
        assert!(manager.is_empty());
    }

    #[test]
    fn test_dispose() {
        let mut manager = FragmentsManager::new(TextCodec);
        let group = manager.load(geometry(), LoadData::default()).unwrap();
        assert!(manager.dispose_group(&group.uuid).is_some());
        assert!(manager.first_group().is_none());
        assert!(manager.dispose_group(&group.uuid).is_none());
    }
}
