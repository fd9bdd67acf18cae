use crate::types::{Metric, NodeId};

/// Errors raised by topology construction and queries.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TopologyError {
    #[error("node {0} is not in the topology")]
    UnknownNode(NodeId),

    #[error("no {metric} path from {from} to {to}")]
    Unreachable {
        from: NodeId,
        to: NodeId,
        metric: Metric,
    },

    #[error("invalid topology parameter: {0}")]
    InvalidParameter(String),

    #[error("no connected topology generated after {attempts} attempts")]
    GenerationExhausted { attempts: u32 },
}
