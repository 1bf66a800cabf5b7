use crate::node::NodeId;

/// What activating a node did to the connect-mode selection.
#[derive(Debug, Clone, PartialEq)]
pub enum Activation {
    /// Connect mode is off; the activation is left to the host
    Ignored,
    /// The node became the connection source
    SourceSelected(NodeId),
    /// A second node was activated; the host should link the pair
    Completed { source: NodeId, target: NodeId },
    /// The current source was activated again and deselected
    Cancelled(NodeId),
}

/// Connect-mode state: whether connect mode is on and which node, if any, is
/// the pending connection source.
///
/// Per node the machine is `idle -> source-selected -> idle`.
#[derive(Default, Debug)]
pub struct ConnectSelection {
    active: bool,
    source: Option<NodeId>,
}

impl ConnectSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn source(&self) -> Option<&NodeId> {
        self.source.as_ref()
    }

    /// Turn connect mode on or off.
    ///
    /// Leaving connect mode releases the pending source, which is returned so
    /// the caller can clear its marker.
    pub fn set_active(&mut self, active: bool) -> Option<NodeId> {
        self.active = active;
        if active {
            None
        } else {
            self.source.take()
        }
    }

    pub fn toggle(&mut self) -> Option<NodeId> {
        self.set_active(!self.active)
    }

    /// Handle a click (or equivalent) on a node
    pub fn activate(&mut self, node: &NodeId) -> Activation {
        if !self.active {
            return Activation::Ignored;
        }
        match self.source.take() {
            None => {
                self.source = Some(node.clone());
                Activation::SourceSelected(node.clone())
            }
            Some(source) if &source == node => Activation::Cancelled(source),
            Some(source) => Activation::Completed { source, target: node.clone() },
        }
    }

    /// Drop the pending source if it is `node` (e.g. the node was deleted).
    pub fn forget(&mut self, node: &NodeId) -> bool {
        if self.source.as_ref() == Some(node) {
            self.source = None;
            true
        } else {
            false
        }
    }
}
