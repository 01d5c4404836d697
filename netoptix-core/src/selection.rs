use crate::error::SelectionError;
use crate::model::{NodeId, Topology};
use std::collections::HashSet;
use std::fmt;

/// Which node, if any, is under inspection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Idle,
    Inspecting(NodeId),
}

impl Selection {
    pub fn node_id(&self) -> Option<&NodeId> {
        match self {
            Selection::Idle => None,
            Selection::Inspecting(id) => Some(id),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Selection::Idle)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Click,
    Dismiss,
}

/// Emitted on every transition, including re-entries into the same state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionEvent {
    pub trigger: Trigger,
    pub previous: Selection,
    pub current: Selection,
}

impl SelectionEvent {
    pub fn changed(&self) -> bool {
        self.previous != self.current
    }
}

/// Callback invoked synchronously after each transition
pub type SelectionListener = Box<dyn FnMut(&SelectionEvent)>;

/// Owns the single mutable piece of view state.
pub struct SelectionController {
    state: Selection,
    known: HashSet<NodeId>,
    listeners: Vec<SelectionListener>,
}

impl SelectionController {
    pub fn new(topology: &Topology) -> Self {
        Self {
            state: Selection::Idle,
            known: topology.nodes().iter().map(|n| n.id.clone()).collect(),
            listeners: Vec::new(),
        }
    }

    pub fn current(&self) -> &Selection {
        &self.state
    }

    pub fn subscribe(&mut self, listener: SelectionListener) {
        self.listeners.push(listener);
    }

    /// Click on `node_id`: always lands in `Inspecting(node_id)`.
    pub fn select(&mut self, node_id: &str) -> Result<SelectionEvent, SelectionError> {
        let Some(id) = self.known.get(node_id).cloned() else {
            return Err(SelectionError::UnknownNode(node_id.to_string()));
        };
        Ok(self.transition(Trigger::Click, Selection::Inspecting(id)))
    }

    pub fn dismiss(&mut self) -> SelectionEvent {
        self.transition(Trigger::Dismiss, Selection::Idle)
    }

    fn transition(&mut self, trigger: Trigger, next: Selection) -> SelectionEvent {
        let previous = std::mem::replace(&mut self.state, next);
        let event = SelectionEvent {
            trigger,
            previous,
            current: self.state.clone(),
        };

        tracing::debug!(
            trigger = ?event.trigger,
            from = ?event.previous.node_id(),
            to = ?event.current.node_id(),
            "selection transition"
        );

        for listener in self.listeners.iter_mut() {
            listener(&event);
        }
        event
    }
}

impl fmt::Debug for SelectionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionController")
            .field("state", &self.state)
            .field("known", &self.known.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
