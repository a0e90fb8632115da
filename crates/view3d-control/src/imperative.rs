//! Imperative handle on the mounted visualization
//!
//! Holds a weak reference to at most one mounted instance. Every call goes
//! through a "call if present" guard: with nothing mounted the call is a
//! no-op, not an error.

use std::sync::{Arc, Weak};
use tracing::trace;

use crate::chrome::ResizeEvent;
use crate::module::VisualizationInstance;

/// Weak, non-owning handle on the mounted visualization instance
#[derive(Default)]
pub struct ImperativeHandle {
    instance: Option<Weak<dyn VisualizationInstance>>,
}

impl ImperativeHandle {
    /// Create an empty handle
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the handle at a newly mounted instance, replacing any previous one
    pub fn set(&mut self, instance: &Arc<dyn VisualizationInstance>) {
        self.instance = Some(Arc::downgrade(instance));
    }

    /// Drop the reference
    pub fn clear(&mut self) {
        self.instance = None;
    }

    /// Whether a live instance is referenced
    pub fn is_set(&self) -> bool {
        self.upgrade().is_some()
    }

    fn upgrade(&self) -> Option<Arc<dyn VisualizationInstance>> {
        self.instance.as_ref().and_then(Weak::upgrade)
    }

    /// Move the 3D camera to a 2D extent. Returns `false` if nothing is mounted.
    pub fn recenter_view(&self, bounds: [f64; 4], rotation: f64) -> bool {
        match self.upgrade() {
            Some(instance) => {
                instance.set_view_to_extent(bounds, rotation);
                true
            }
            None => {
                trace!("recenter_view ignored, no instance mounted");
                false
            }
        }
    }

    /// Ask the visualization to recompute its viewport. Returns `false` if nothing is mounted.
    pub fn redraw(&self, event: &ResizeEvent) -> bool {
        match self.upgrade() {
            Some(instance) => {
                instance.redraw_scene(event);
                true
            }
            None => {
                trace!("redraw ignored, no instance mounted");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Recorder {
        extents: Mutex<Vec<([f64; 4], f64)>>,
        redraws: Mutex<Vec<ResizeEvent>>,
    }

    impl VisualizationInstance for Recorder {
        fn set_view_to_extent(&self, bounds: [f64; 4], rotation: f64) {
            self.extents.lock().push((bounds, rotation));
        }

        fn redraw_scene(&self, event: &ResizeEvent) {
            self.redraws.lock().push(*event);
        }

        fn update_props(&self, _props: &crate::module::MountProps) {}
    }

    #[test]
    fn test_calls_without_instance_are_noops() {
        let handle = ImperativeHandle::new();
        assert!(!handle.is_set());
        assert!(!handle.recenter_view([0.0; 4], 0.0));
        assert!(!handle.redraw(&ResizeEvent::default()));
    }

    #[test]
    fn test_forwards_to_instance() {
        let recorder = Arc::new(Recorder::default());
        let instance: Arc<dyn VisualizationInstance> = recorder.clone();
        let mut handle = ImperativeHandle::new();
        handle.set(&instance);

        assert!(handle.recenter_view([1.0, 2.0, 3.0, 4.0], 0.5));
        assert!(handle.redraw(&ResizeEvent {
            width: 640,
            height: 480
        }));
        assert_eq!(recorder.extents.lock().as_slice(), &[([1.0, 2.0, 3.0, 4.0], 0.5)]);
        assert_eq!(recorder.redraws.lock()[0].width, 640);
    }

    #[test]
    fn test_does_not_keep_instance_alive() {
        let instance: Arc<dyn VisualizationInstance> = Arc::new(Recorder::default());
        let mut handle = ImperativeHandle::new();
        handle.set(&instance);
        assert!(handle.is_set());
        drop(instance);
        assert!(!handle.is_set());
        assert!(!handle.recenter_view([0.0; 4], 0.0));
    }

    #[test]
    fn test_clear() {
        let instance: Arc<dyn VisualizationInstance> = Arc::new(Recorder::default());
        let mut handle = ImperativeHandle::new();
        handle.set(&instance);
        handle.clear();
        assert!(!handle.is_set());
    }
}
