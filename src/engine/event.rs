//! Selection notifications.
//!
//! Clicking a wedge publishes a `datumSelected` event carrying the clicked
//! node's input data. Delivery is fire-and-forget: listeners get a shared
//! reference and nothing flows back to the chart.

use std::fmt;
use std::sync::mpsc;

use serde::Serialize;

use crate::data::Node;

pub const DATUM_SELECTED: &str = "datumSelected";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionEvent {
    pub name: &'static str,
    /// The clicked node's subtree, children in input order.
    pub detail: Node,
}

impl SelectionEvent {
    pub fn datum_selected(detail: Node) -> Self {
        Self {
            name: DATUM_SELECTED,
            detail,
        }
    }
}

pub type Listener = Box<dyn FnMut(&SelectionEvent)>;

/// Fan-out of selection events to any number of listeners.
#[derive(Default)]
pub struct SelectionBus {
    listeners: Vec<Listener>,
}

impl fmt::Debug for SelectionBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionBus")
            .field("listeners", &self.len())
            .finish()
    }
}

impl SelectionBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&SelectionEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Subscribe a channel; events are dropped once the receiver goes away.
    pub fn subscribe_channel(&mut self) -> mpsc::Receiver<SelectionEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribe(move |ev: &SelectionEvent| {
            let _ = tx.send(ev.clone());
        });
        rx
    }

    /// Deliver `event` to every listener in subscription order.
    pub fn dispatch(&mut self, event: &SelectionEvent) {
        if self.is_empty() {
            log::debug!("{} '{}' has no listeners", event.name, event.detail.name);
            return;
        }
        log::debug!(
            "{} '{}' -> {} listener(s)",
            event.name,
            event.detail.name,
            self.len()
        );
        for listener in &mut self.listeners {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

/// Text sink for the "selected datum" label: keeps the name of the most
/// recently selected node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectedDatum {
    text: String,
}

impl SelectedDatum {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: &SelectionEvent) {
        self.text = event.detail.name.clone();
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}
