//! Process-wide overlay root.
//!
//! Popups that float above the grid (the event editor, the "+N more" list)
//! are registered here rather than inside a view, so a re-render of the grid
//! does not close them. The root is created lazily on first use and the same
//! instance is returned from then on.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use chrono::NaiveDate;
use tracing::debug;

static OVERLAY_ROOT: OnceLock<OverlayRoot> = OnceLock::new();

/// The shared overlay root, created on first call.
pub fn overlay_root() -> &'static OverlayRoot {
    OVERLAY_ROOT.get_or_init(|| {
        debug!("Creating overlay root");
        OverlayRoot::new()
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    /// Editor for an existing event, or for a new one when `event_id` is None
    EventEditor {
        event_id: Option<String>,
        date: NaiveDate,
    },
    /// Full list of a month cell's events
    ShowMore { date: NaiveDate },
}

/// Stack of open overlays, most recent last.
#[derive(Debug, Default)]
pub struct OverlayRoot {
    next_id: AtomicU64,
    layers: Mutex<Vec<(OverlayId, Overlay)>>,
}

impl OverlayRoot {
    pub fn new() -> Self {
        Self::default()
    }

    fn layers_mut(&self) -> MutexGuard<'_, Vec<(OverlayId, Overlay)>> {
        self.layers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn open(&self, overlay: Overlay) -> OverlayId {
        let id = OverlayId(self.next_id.fetch_add(1, Ordering::Relaxed));
        debug!(?id, ?overlay, "Opening overlay");
        self.layers_mut().push((id, overlay));
        id
    }

    /// Close an overlay. Returns false if it was not open.
    pub fn close(&self, id: OverlayId) -> bool {
        let mut layers = self.layers_mut();
        let before = layers.len();
        layers.retain(|(open_id, _)| *open_id != id);
        before != layers.len()
    }

    pub fn get(&self, id: OverlayId) -> Option<Overlay> {
        self.layers_mut()
            .iter()
            .find(|(open_id, _)| *open_id == id)
            .map(|(_, overlay)| overlay.clone())
    }

    pub fn layers(&self) -> Vec<(OverlayId, Overlay)> {
        self.layers_mut().clone()
    }

    pub fn top(&self) -> Option<(OverlayId, Overlay)> {
        self.layers_mut().last().cloned()
    }

    pub fn clear(&self) {
        self.layers_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn april(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, day).unwrap()
    }

    #[test]
    fn test_overlay_root_is_created_once() {
        let first = overlay_root() as *const OverlayRoot;
        let second = overlay_root() as *const OverlayRoot;
        assert_eq!(first, second);
    }

    #[test]
    fn test_shared_root_open_and_close() {
        // Other tests share this root, so only look at our own ids
        let root = overlay_root();
        let id = root.open(Overlay::ShowMore { date: april(2) });

        assert_eq!(root.get(id), Some(Overlay::ShowMore { date: april(2) }));
        assert!(root.close(id));
        assert!(!root.close(id));
        assert_eq!(root.get(id), None);
    }

    #[test]
    fn test_layers_stack_in_open_order() {
        let root = OverlayRoot::new();
        let cell = root.open(Overlay::ShowMore { date: april(13) });
        let editor = root.open(Overlay::EventEditor {
            event_id: Some("1".into()),
            date: april(13),
        });

        assert_ne!(cell, editor);
        assert_eq!(root.layers().len(), 2);
        assert_eq!(root.top().map(|(id, _)| id), Some(editor));

        root.close(editor);
        assert_eq!(root.top().map(|(id, _)| id), Some(cell));

        root.clear();
        assert!(root.layers().is_empty());
    }
}
