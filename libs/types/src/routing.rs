//! Source-routing envelope
//!
//! Separates the two routing concerns every message carries:
//!
//! - [`Destination`] is the *intended* target, supplied by the sender: either
//!   a single node or an explicit source route through named hops.
//! - [`NetworkPath`] is the *actual* provenance, appended to by every node
//!   that relays the message. A response is source-routed back along the
//!   reverse of the inbound path, never recomputed.
//!
//! Both are immutable values: recording a hop returns a new path, so a
//! concurrent sender can never observe a partially updated route.

use crate::hashing::{hash_seq, StableHash};
use crate::identifiers::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Routing failures, surfaced by the transport layer before any field
/// parsing begins.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoutingError {
    /// The inbound request carried no provenance, so no reply route exists.
    #[error("network path is empty: cannot derive a reply route")]
    EmptyNetworkPath,

    /// A source route must name at least one hop.
    #[error("source route is empty: a destination must name at least one node")]
    EmptySourceRoute,

    /// The next hop is not reachable from this node.
    ///
    /// Reserved for the transport layer, which is the only component with
    /// reachability knowledge; no parse or construction path in this crate
    /// produces it.
    #[error("destination unreachable: no route to node '{node}'")]
    UnreachableDestination { node: NodeId },
}

/// Ordered, append-only record of the nodes a message actually traversed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetworkPath {
    hops: Vec<NodeId>,
}

impl NetworkPath {
    /// A path that has not traversed any node yet.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_hops(hops: Vec<NodeId>) -> Self {
        Self { hops }
    }

    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hops.len()
    }

    pub fn hops(&self) -> &[NodeId] {
        &self.hops
    }

    /// The node the message originated from, when known.
    pub fn source(&self) -> Option<&NodeId> {
        self.hops.first()
    }

    /// The most recent relay, when any.
    pub fn last(&self) -> Option<&NodeId> {
        self.hops.last()
    }

    /// Record a relay hop, returning the extended path.
    ///
    /// Never mutates in place: the original path stays valid for any
    /// concurrent reader.
    #[must_use]
    pub fn with_hop(&self, node: NodeId) -> Self {
        let mut hops = self.hops.clone();
        hops.push(node);
        Self { hops }
    }

    /// The reverse path, used to source-route a response back to the sender.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut hops = self.hops.clone();
        hops.reverse();
        Self { hops }
    }
}

impl fmt::Display for NetworkPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for hop in &self.hops {
            if !first {
                f.write_str(" -> ")?;
            }
            write!(f, "{hop}")?;
            first = false;
        }
        Ok(())
    }
}

impl StableHash for NetworkPath {
    fn stable_hash(&self) -> u64 {
        hash_seq(&self.hops)
    }
}

/// Validated hop list of an explicit source route.
///
/// The hop list is private and every way in — [`SourceRoute::new`],
/// [`Destination::source_route`], deserialization — rejects an empty list,
/// so a constructed route always has a first and a last hop.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SourceRoute {
    hops: Vec<NodeId>,
}

impl SourceRoute {
    /// Build a route; the hop list must be non-empty.
    pub fn new(hops: Vec<NodeId>) -> Result<Self, RoutingError> {
        if hops.is_empty() {
            return Err(RoutingError::EmptySourceRoute);
        }
        Ok(Self { hops })
    }

    pub fn hops(&self) -> &[NodeId] {
        &self.hops
    }

    pub fn first(&self) -> &NodeId {
        // Non-empty by construction.
        &self.hops[0]
    }

    pub fn last(&self) -> &NodeId {
        self.hops.last().unwrap_or(&self.hops[0])
    }
}

impl<'de> Deserialize<'de> for SourceRoute {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let hops = Vec::<NodeId>::deserialize(deserializer)?;
        Self::new(hops).map_err(serde::de::Error::custom)
    }
}

/// Intended delivery target of a message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Destination {
    /// Direct delivery to one node.
    Node(NodeId),
    /// Explicit source route through the named hops, in traversal order.
    SourceRoute(SourceRoute),
}

impl Destination {
    pub fn node(id: impl Into<NodeId>) -> Self {
        Self::Node(id.into())
    }

    /// Address the central system directly.
    pub fn csms() -> Self {
        Self::Node(NodeId::csms())
    }

    /// Build an explicit source route; the hop list must be non-empty.
    pub fn source_route(hops: Vec<NodeId>) -> Result<Self, RoutingError> {
        Ok(Self::SourceRoute(SourceRoute::new(hops)?))
    }

    /// The node the message should be handed to next.
    pub fn next_hop(&self) -> &NodeId {
        match self {
            Self::Node(id) => id,
            Self::SourceRoute(route) => route.first(),
        }
    }

    /// The node the message is ultimately for.
    pub fn final_target(&self) -> &NodeId {
        match self {
            Self::Node(id) => id,
            Self::SourceRoute(route) => route.last(),
        }
    }

    /// The full target node list, in delivery order.
    pub fn resolve(&self) -> Vec<NodeId> {
        match self {
            Self::Node(id) => vec![id.clone()],
            Self::SourceRoute(route) => route.hops.clone(),
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(id) => write!(f, "{id}"),
            Self::SourceRoute(route) => {
                write!(f, "{}", NetworkPath::from_hops(route.hops.clone()))
            }
        }
    }
}

impl StableHash for Destination {
    fn stable_hash(&self) -> u64 {
        match self {
            Self::Node(id) => id.stable_hash(),
            Self::SourceRoute(route) => hash_seq(&route.hops).wrapping_mul(31),
        }
    }
}

/// Derive the reply destination for a response: the reverse of the path the
/// request actually took.
///
/// An empty inbound path is a transport-level error and must be rejected
/// before field parsing begins.
pub fn reply_destination(inbound: &NetworkPath) -> Result<Destination, RoutingError> {
    let reversed = inbound.reversed();
    Destination::source_route(reversed.hops().to_vec()).map_err(|_| RoutingError::EmptyNetworkPath)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_hop_does_not_mutate_the_original() {
        let path = NetworkPath::from_hops(vec![NodeId::new("CP001")]);
        let extended = path.with_hop(NodeId::new("NN-A"));
        assert_eq!(path.len(), 1);
        assert_eq!(extended.len(), 2);
        assert_eq!(extended.last(), Some(&NodeId::new("NN-A")));
    }

    #[test]
    fn reply_destination_reverses_the_inbound_path() {
        let inbound = NetworkPath::from_hops(vec![
            NodeId::new("CP001"),
            NodeId::new("NN-A"),
            NodeId::new("NN-B"),
        ]);
        let reply = reply_destination(&inbound).unwrap();
        assert_eq!(
            reply.resolve(),
            vec![NodeId::new("NN-B"), NodeId::new("NN-A"), NodeId::new("CP001")]
        );
        assert_eq!(reply.final_target(), &NodeId::new("CP001"));
    }

    #[test]
    fn empty_inbound_path_is_a_routing_error() {
        assert_eq!(
            reply_destination(&NetworkPath::empty()),
            Err(RoutingError::EmptyNetworkPath)
        );
    }

    #[test]
    fn empty_source_route_cannot_be_deserialized() {
        let err = serde_json::from_value::<Destination>(serde_json::json!({
            "sourceRoute": []
        }))
        .unwrap_err();
        assert!(err.to_string().contains("source route is empty"), "{err}");

        let routed: Destination = serde_json::from_value(serde_json::json!({
            "sourceRoute": ["NN-A", "CSMS"]
        }))
        .unwrap();
        assert_eq!(routed.next_hop(), &NodeId::new("NN-A"));
        assert_eq!(routed.final_target(), &NodeId::csms());
    }

    #[test]
    fn empty_hop_list_is_rejected_by_every_constructor() {
        assert_eq!(
            SourceRoute::new(Vec::new()),
            Err(RoutingError::EmptySourceRoute)
        );
        assert_eq!(
            Destination::source_route(Vec::new()),
            Err(RoutingError::EmptySourceRoute)
        );
    }

    #[test]
    fn routing_errors_name_the_failing_node() {
        let err = RoutingError::UnreachableDestination {
            node: NodeId::new("NN-GONE"),
        };
        assert_eq!(
            err.to_string(),
            "destination unreachable: no route to node 'NN-GONE'"
        );
    }

    #[test]
    fn next_hop_and_final_target() {
        let direct = Destination::csms();
        assert_eq!(direct.next_hop(), &NodeId::csms());
        assert_eq!(direct.final_target(), &NodeId::csms());

        let routed =
            Destination::source_route(vec![NodeId::new("NN-A"), NodeId::csms()]).unwrap();
        assert_eq!(routed.next_hop(), &NodeId::new("NN-A"));
        assert_eq!(routed.final_target(), &NodeId::csms());
    }
}
