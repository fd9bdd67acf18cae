use std::fmt;

use aodv_core::NodeId;
use serde::{Deserialize, Serialize};

/// One route request transmission observed while flooding.
///
/// A request travels from `from` to its neighbor `to` on behalf of the
/// discovery `origin -> target`; `hops` is how many links it had already
/// crossed when `from` sent it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRequest {
    /// Node that started the discovery.
    pub origin: NodeId,
    /// Node being searched for.
    pub target: NodeId,
    /// Transmitting node.
    pub from: NodeId,
    /// Receiving neighbor.
    pub to: NodeId,
    /// Links crossed before this transmission.
    pub hops: u32,
}

impl RouteRequest {
    /// Returns true if the transmission was sent by the discovery origin
    /// itself rather than relayed.
    pub fn is_initial(&self) -> bool {
        self.from == self.origin
    }
}

impl fmt::Display for RouteRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RREQ({} -> {}) {} -> {}",
            self.origin, self.target, self.from, self.to
        )
    }
}
