//=========================================================================
// Window Index
//=========================================================================
//
// Owns registered windows and indexes them by view type and by scene.
//
// Storage:
//   slots     SlotMap<WindowKey, Window>     owning storage
//   order     Vec<WindowKey>                 registration order
//   by_type   TypeId → [WindowKey]           first-registered first
//   by_scene  S → [WindowKey]                windows each scene contributed
//
// Empty type and scene entries are pruned on removal.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::TypeId;
use std::collections::HashMap;

use slotmap::{SecondaryMap, SlotMap};

//=== Internal Dependencies ===============================================

use crate::core::host::SceneKey;
use crate::core::window::{Window, WindowKey};

//=== WindowIndex =========================================================

pub(crate) struct WindowIndex<S: SceneKey> {
    slots: SlotMap<WindowKey, Window>,
    order: Vec<WindowKey>,
    by_type: HashMap<TypeId, Vec<WindowKey>>,
    by_scene: HashMap<S, Vec<WindowKey>>,
    owner: SecondaryMap<WindowKey, S>,
}

impl<S: SceneKey> WindowIndex<S> {
    pub fn new() -> Self {
        Self {
            slots: SlotMap::with_key(),
            order: Vec::new(),
            by_type: HashMap::new(),
            by_scene: HashMap::new(),
            owner: SecondaryMap::new(),
        }
    }

    //--- Mutation ---------------------------------------------------------

    /// True if a window of `type_id` with the same non-empty `id` exists.
    pub fn has_duplicate(&self, type_id: TypeId, id: &str) -> bool {
        if id.is_empty() {
            return false;
        }

        self.by_type
            .get(&type_id)
            .map_or(false, |keys| keys.iter().any(|&k| self.slots[k].id() == id))
    }

    /// Takes ownership of `window` and records it under `scene`.
    pub fn insert(&mut self, window: Window, scene: S) -> WindowKey {
        let type_id = window.type_id();
        let key = self.slots.insert(window);

        self.order.push(key);
        self.by_type.entry(type_id).or_default().push(key);
        self.by_scene.entry(scene).or_default().push(key);
        self.owner.insert(key, scene);
        key
    }

    /// Removes `key` from storage and every index.
    pub fn remove(&mut self, key: WindowKey) -> Option<Window> {
        let window = self.slots.remove(key)?;

        self.order.retain(|&k| k != key);
        prune(&mut self.by_type, window.type_id(), key);
        if let Some(scene) = self.owner.remove(key) {
            prune(&mut self.by_scene, scene, key);
        }

        Some(window)
    }

    /// Empties the index, returning windows in registration order.
    pub fn drain(&mut self) -> Vec<Window> {
        let order = std::mem::take(&mut self.order);
        let windows = order.into_iter().filter_map(|key| self.slots.remove(key)).collect();

        self.slots.clear();
        self.by_type.clear();
        self.by_scene.clear();
        self.owner.clear();
        windows
    }

    //--- Lookup -----------------------------------------------------------

    /// First window of `type_id`, optionally matching `id`.
    pub fn find_by_type(&self, type_id: TypeId, id: Option<&str>) -> Option<WindowKey> {
        let keys = self.by_type.get(&type_id)?;
        match id.filter(|id| !id.is_empty()) {
            None => keys.first().copied(),
            Some(id) => keys.iter().copied().find(|&k| self.slots[k].id() == id),
        }
    }

    /// First registered window with `id`, across all types.
    pub fn find_by_id(&self, id: &str) -> Option<WindowKey> {
        if id.is_empty() {
            return None;
        }
        self.order.iter().copied().find(|&k| self.slots[k].id() == id)
    }

    pub fn get(&self, key: WindowKey) -> Option<&Window> {
        self.slots.get(key)
    }

    pub fn get_mut(&mut self, key: WindowKey) -> Option<&mut Window> {
        self.slots.get_mut(key)
    }

    pub fn contains(&self, key: WindowKey) -> bool {
        self.slots.contains_key(key)
    }

    pub fn scene_windows(&self, scene: S) -> &[WindowKey] {
        self.by_scene.get(&scene).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (WindowKey, &mut Window)> {
        self.slots.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }
}

impl<S: SceneKey> Default for WindowIndex<S> {
    fn default() -> Self {
        Self::new()
    }
}

fn prune<K: Eq + std::hash::Hash>(index: &mut HashMap<K, Vec<WindowKey>>, bucket: K, key: WindowKey) {
    if let Some(keys) = index.get_mut(&bucket) {
        keys.retain(|&k| k != key);
        if keys.is_empty() {
            index.remove(&bucket);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
