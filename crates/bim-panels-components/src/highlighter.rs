// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Named highlight selections

use bim_panels_model::FragmentIdMap;
use rustc_hash::FxHashMap;

/// What changed, for the renderer host
#[derive(Clone, Debug, PartialEq)]
pub enum HighlightEvent {
    /// Selection `name` now covers `map`
    Highlight { name: String, map: FragmentIdMap },
    /// Selection `name` was emptied
    Clear { name: String },
    /// Camera should frame `map`
    Zoom { map: FragmentIdMap },
}

pub type HighlightListener = Box<dyn FnMut(&HighlightEvent)>;

#[derive(Default)]
pub struct Highlighter {
    selection: FxHashMap<String, FragmentIdMap>,
    zoom_target: Option<FragmentIdMap>,
    listeners: Vec<HighlightListener>,
}

impl Highlighter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_event(&mut self, listener: impl FnMut(&HighlightEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Highlight `map` under style `name`
    ///
    /// With `remove_previous` the selection is replaced, otherwise merged.
    /// Ids in `exclude` are left out, so hovering never repaints what is
    /// already selected.
    pub fn highlight_by_id(
        &mut self,
        name: &str,
        map: &FragmentIdMap,
        remove_previous: bool,
        zoom: bool,
        exclude: Option<&FragmentIdMap>,
    ) {
        let mut target = map.clone();
        if let Some(exclude) = exclude {
            target.subtract(exclude);
        }

        let selection = self.selection.entry(name.to_string()).or_default();
        if remove_previous {
            *selection = target;
        } else {
            selection.merge(&target);
        }
        let event = HighlightEvent::Highlight {
            name: name.to_string(),
            map: selection.clone(),
        };
        self.emit(event);

        if zoom && !map.is_empty() {
            self.zoom_target = Some(map.clone());
            self.emit(HighlightEvent::Zoom { map: map.clone() });
        }
    }

    /// Empty selection `name`
    pub fn clear(&mut self, name: &str) {
        if let Some(selection) = self.selection.get_mut(name) {
            *selection = FragmentIdMap::new();
        }
        self.emit(HighlightEvent::Clear {
            name: name.to_string(),
        });
    }

    /// Current selection under `name`
    pub fn selection(&self, name: &str) -> Option<&FragmentIdMap> {
        self.selection.get(name)
    }

    /// Last zoom request, consumed
    pub fn take_zoom_target(&mut self) -> Option<FragmentIdMap> {
        self.zoom_target.take()
    }

    fn emit(&mut self, event: HighlightEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bim_panels_model::ExpressId;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn map(ids: &[u32]) -> FragmentIdMap {
        let mut m = FragmentIdMap::new();
        for id in ids {
            m.insert("frag", ExpressId(*id));
        }
        m
    }

    #[test]
    fn test_replace_and_merge() {
        let mut highlighter = Highlighter::new();
        highlighter.highlight_by_id("select", &map(&[1, 2]), true, false, None);
        highlighter.highlight_by_id("select", &map(&[3]), false, false, None);
        assert_eq!(highlighter.selection("select").unwrap().id_count(), 3);

        highlighter.highlight_by_id("select", &map(&[4]), true, false, None);
        assert_eq!(highlighter.selection("select"), Some(&map(&[4])));
    }

    #[test]
    fn test_hover_excludes_selection() {
        let mut highlighter = Highlighter::new();
        highlighter.highlight_by_id("select", &map(&[1]), true, true, None);
        let selected = highlighter.selection("select").cloned();
        highlighter.highlight_by_id("hover", &map(&[1, 2]), true, false, selected.as_ref());

        assert_eq!(highlighter.selection("hover"), Some(&map(&[2])));
        assert_eq!(highlighter.take_zoom_target(), Some(map(&[1])));
        assert_eq!(highlighter.take_zoom_target(), None);
    }

    #[test]
    fn test_clear_emits() {
        let mut highlighter = Highlighter::new();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        highlighter.on_event(move |e| sink.borrow_mut().push(e.clone()));

        highlighter.highlight_by_id("hover", &map(&[5]), true, false, None);
        highlighter.clear("hover");

        assert!(highlighter.selection("hover").unwrap().is_empty());
        assert_eq!(
            events.borrow().last(),
            Some(&HighlightEvent::Clear {
                name: "hover".to_string()
            })
        );
        assert_eq!(events.borrow().len(), 2);
    }
}
