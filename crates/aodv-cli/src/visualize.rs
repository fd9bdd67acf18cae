//! Graphviz rendering of a topology with a discovered path highlighted.

use std::fmt::Write;

use aodv_core::{Graph, Topology};
use aodv_routing::Path;

/// Render `graph` as an undirected DOT graph. Links used by `path` are drawn
/// red and bold; an empty path highlights nothing.
pub fn to_dot(graph: &Graph, path: &Path) -> String {
    let mut out = String::from("graph aodv {\n");
    out.push_str("    node [shape=circle, style=filled, fillcolor=skyblue];\n");
    out.push_str("    edge [color=gray];\n");

    for node in graph.nodes() {
        let on_path = path.nodes().contains(&node);
        if on_path {
            let _ = writeln!(out, "    {node} [fillcolor=salmon];");
        } else {
            let _ = writeln!(out, "    {node};");
        }
    }

    for edge in graph.edges() {
        let label = format_weight(edge.weight);
        if path.uses_link(edge.a, edge.b) {
            let _ = writeln!(
                out,
                "    {} -- {} [label=\"{label}\", color=red, penwidth=2];",
                edge.a, edge.b
            );
        } else {
            let _ = writeln!(out, "    {} -- {} [label=\"{label}\"];", edge.a, edge.b);
        }
    }

    out.push_str("}\n");
    out
}

fn format_weight(weight: f64) -> String {
    if weight.fract() == 0.0 {
        format!("{weight:.0}")
    } else {
        format!("{weight:.1}")
    }
}
