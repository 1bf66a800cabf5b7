//! Connection storage keyed by unordered node pairs.

use crate::node::NodeId;
use std::collections::BTreeMap;
use std::fmt;

/// Canonical key of an unordered node pair.
///
/// Both orderings of the same pair produce the same key; it displays as the
/// two ids sorted and joined with `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionKey {
    low: NodeId,
    high: NodeId,
}

impl ConnectionKey {
    pub fn new(a: &NodeId, b: &NodeId) -> Self {
        if a <= b {
            Self { low: a.clone(), high: b.clone() }
        } else {
            Self { low: b.clone(), high: a.clone() }
        }
    }

    pub fn involves(&self, node: &NodeId) -> bool {
        &self.low == node || &self.high == node
    }
}

impl fmt::Display for ConnectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

/// A drawn edge between two nodes.
///
/// `from` and `to` keep the order in which the user linked the nodes; identity
/// is given by [`ConnectionKey`], which ignores that order.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub from: NodeId,
    pub to: NodeId,
}

impl Connection {
    pub fn new(from: NodeId, to: NodeId) -> Self {
        Self { from, to }
    }

    pub fn key(&self) -> ConnectionKey {
        ConnectionKey::new(&self.from, &self.to)
    }

    pub fn touches(&self, node: &NodeId) -> bool {
        &self.from == node || &self.to == node
    }
}

/// The set of live connections, at most one per unordered node pair.
#[derive(Debug, Default)]
pub struct ConnectionSet {
    connections: BTreeMap<ConnectionKey, Connection>,
}

impl ConnectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Link two nodes, replacing any existing connection between them.
    ///
    /// Linking a node to itself does nothing and returns `None`.
    pub fn connect(&mut self, from: &NodeId, to: &NodeId) -> Option<ConnectionKey> {
        if from == to {
            return None;
        }
        let connection = Connection::new(from.clone(), to.clone());
        let key = connection.key();
        self.connections.insert(key.clone(), connection);
        Some(key)
    }

    /// Remove every connection touching `node`. Returns the removed keys.
    pub fn disconnect(&mut self, node: &NodeId) -> Vec<ConnectionKey> {
        let removed: Vec<ConnectionKey> = self
            .connections
            .keys()
            .filter(|key| key.involves(node))
            .cloned()
            .collect();
        for key in &removed {
            self.connections.remove(key);
        }
        removed
    }

    pub fn remove(&mut self, key: &ConnectionKey) -> Option<Connection> {
        self.connections.remove(key)
    }

    pub fn get(&self, key: &ConnectionKey) -> Option<&Connection> {
        self.connections.get(key)
    }

    pub fn contains(&self, a: &NodeId, b: &NodeId) -> bool {
        self.connections.contains_key(&ConnectionKey::new(a, b))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ConnectionKey, &Connection)> {
        self.connections.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &ConnectionKey> {
        self.connections.keys()
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    pub fn clear(&mut self) {
        self.connections.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> (NodeId, NodeId, NodeId) {
        (NodeId::from("node-a"), NodeId::from("node-b"), NodeId::from("node-c"))
    }

    // ========================================================================
    // ConnectionKey
    // ========================================================================

    #[test]
    fn test_key_is_order_independent() {
        let (a, b, _) = ids();
        assert_eq!(ConnectionKey::new(&a, &b), ConnectionKey::new(&b, &a));
    }

    #[test]
    fn test_key_display_is_sorted_and_joined() {
        let (a, b, _) = ids();
        assert_eq!(ConnectionKey::new(&b, &a).to_string(), "node-a-node-b");
    }

    #[test]
    fn test_key_involves() {
        let (a, b, c) = ids();
        let key = ConnectionKey::new(&a, &b);
        assert!(key.involves(&a));
        assert!(key.involves(&b));
        assert!(!key.involves(&c));
    }

    // ========================================================================
    // connect()
    // ========================================================================

    #[test]
    fn test_connect_both_directions_collapses() {
        let (a, b, _) = ids();
        let mut set = ConnectionSet::new();

        let k1 = set.connect(&a, &b);
        let k2 = set.connect(&b, &a);

        assert_eq!(k1, k2);
        assert_eq!(set.len(), 1);
        // Latest direction wins
        let stored = set.get(&ConnectionKey::new(&a, &b)).expect("Connection should exist");
        assert_eq!(stored.from, b);
        assert_eq!(stored.to, a);
    }

    #[test]
    fn test_connect_is_idempotent() {
        let (a, b, _) = ids();
        let mut set = ConnectionSet::new();
        set.connect(&a, &b);
        set.connect(&a, &b);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_self_connection_is_noop() {
        let (a, _, _) = ids();
        let mut set = ConnectionSet::new();
        assert_eq!(set.connect(&a, &a), None);
        assert!(set.is_empty());
    }

    // ========================================================================
    // disconnect()
    // ========================================================================

    #[test]
    fn test_disconnect_removes_all_touching_connections() {
        let (a, b, c) = ids();
        let mut set = ConnectionSet::new();
        set.connect(&a, &b);
        set.connect(&a, &c);
        set.connect(&b, &c);

        let removed = set.disconnect(&a);

        assert_eq!(removed.len(), 2);
        assert_eq!(set.len(), 1);
        assert!(set.contains(&b, &c));
        assert!(!set.contains(&a, &b));
        assert!(!set.contains(&a, &c));
    }

    #[test]
    fn test_disconnect_unknown_node_is_noop() {
        let (a, b, c) = ids();
        let mut set = ConnectionSet::new();
        set.connect(&a, &b);
        assert!(set.disconnect(&c).is_empty());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_clear() {
        let (a, b, c) = ids();
        let mut set = ConnectionSet::new();
        set.connect(&a, &b);
        set.connect(&b, &c);
        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn test_connection_touches() {
        let (a, b, c) = ids();
        let conn = Connection::new(a.clone(), b.clone());
        assert!(conn.touches(&a));
        assert!(conn.touches(&b));
        assert!(!conn.touches(&c));
    }
}
