//! Notification bus decoupling the graph scene from UI chrome.
//!
//! Publishers fan events out synchronously to every live subscriber; each
//! subscriber drains its own channel whenever it gets scheduled. Nothing is
//! persisted: an event published before `subscribe` is never seen.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};

use crate::graph::GraphData;

#[derive(Clone, Debug)]
pub enum SceneEvent {
    /// A graph finished loading and the scene serving it is live.
    GraphReady(Arc<GraphData>),
    /// Request to focus a node and highlight its neighborhood.
    FocusNode { id: String, recenter: bool },
    /// Show the hover tooltip, or hide it when `None`.
    ShowTooltip(Option<TooltipPayload>),
    /// Externally supplied graph that should replace the current scene.
    LoadGraph(Arc<GraphData>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct TooltipPayload {
    pub screen_x: f32,
    pub screen_y: f32,
    pub node_id: String,
}

#[derive(Clone, Default)]
pub struct Bus {
    subscribers: Rc<RefCell<Vec<Sender<SceneEvent>>>>,
}

impl Bus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> Receiver<SceneEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.borrow_mut().push(tx);
        rx
    }

    /// Sends `event` to every subscriber, dropping the ones that went away.
    pub fn publish(&self, event: SceneEvent) {
        self.subscribers
            .borrow_mut()
            .retain(|tx| tx.send(event.clone()).is_ok());
    }

    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }
}
