use aodv_core::{NodeId, TopologyError};

/// Errors that can occur within the routing layer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RoutingError {
    #[error("endpoint {node} is not in the topology")]
    InvalidEndpoint { node: NodeId },

    #[error("no route from {from} to {to}")]
    Unreachable { from: NodeId, to: NodeId },

    #[error("repair of route {source_node} -> {destination} failed: {reason}")]
    RepairAttemptFailed {
        source_node: NodeId,
        destination: NodeId,
        reason: String,
    },

    #[error(transparent)]
    Topology(TopologyError),
}

impl From<TopologyError> for RoutingError {
    fn from(err: TopologyError) -> Self {
        match err {
            TopologyError::UnknownNode(node) => RoutingError::InvalidEndpoint { node },
            TopologyError::Unreachable { from, to, .. } => RoutingError::Unreachable { from, to },
            other => RoutingError::Topology(other),
        }
    }
}
