//! Node identity and per-node marker state.

use rand::Rng;
use std::collections::HashSet;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

const SUFFIX_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 9;

/// Identifier of a node on the canvas.
///
/// Ids handed out by [`NodeIdGenerator`] look like `node-1718900000000-k3j9x0a1b`.
/// Ids from an external node store can be wrapped with `NodeId::from`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(String);

impl NodeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<slint::SharedString> for NodeId {
    fn from(id: slint::SharedString) -> Self {
        Self(id.as_str().to_owned())
    }
}

/// Visual marker applied to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeMarker {
    #[default]
    None,
    /// The node was picked as the source of a connection in connect mode
    SelectedAsSource,
}

/// Generates session-unique node ids from a millisecond timestamp and a
/// random base-36 suffix.
#[derive(Default)]
pub struct NodeIdGenerator {
    issued: HashSet<NodeId>,
}

impl NodeIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce an id that has not been issued or reserved in this session.
    pub fn next_id(&mut self) -> NodeId {
        let mut rng = rand::rng();
        loop {
            let millis = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default();
            let suffix: String = (0..SUFFIX_LEN)
                .map(|_| SUFFIX_ALPHABET[rng.random_range(0..SUFFIX_ALPHABET.len())] as char)
                .collect();
            let id = NodeId(format!("node-{}-{}", millis, suffix));
            if self.issued.insert(id.clone()) {
                return id;
            }
            log::debug!("node id {} collided, regenerating", id);
        }
    }

    /// Mark an externally created id as taken.
    ///
    /// Returns `false` if the id was already issued or reserved.
    pub fn reserve(&mut self, id: &NodeId) -> bool {
        self.issued.insert(id.clone())
    }

    pub fn is_issued(&self, id: &NodeId) -> bool {
        self.issued.contains(id)
    }
}
