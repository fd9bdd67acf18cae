//! Text rendering of routing tables and run summaries.

use std::fmt::Write;

use aodv_routing::{RepairReport, RouteOrigin, TableSnapshot};

const HEADERS: [&str; 4] = ["Destination", "Next Hop", "Hop Count", "Distance"];

/// Render one grid per node that holds at least one record.
pub fn render_tables(snapshot: &TableSnapshot) -> String {
    let mut out = String::from("Routing Tables:\n");
    for (node, records) in &snapshot.tables {
        if records.is_empty() {
            continue;
        }
        let seeded = records
            .iter()
            .filter(|r| r.origin == RouteOrigin::Seeded)
            .count();
        let _ = writeln!(out, "Node {node}: ({seeded} seeded, {} discovered)", records.len() - seeded);

        let rows: Vec<[String; 4]> = records
            .iter()
            .map(|r| {
                [
                    r.destination.to_string(),
                    r.next_hop.to_string(),
                    r.hop_count.to_string(),
                    format_distance(r.distance),
                ]
            })
            .collect();
        out.push_str(&render_grid(&rows));
    }
    out
}

/// Summarize a repair sweep, one line per affected route.
pub fn render_repair(report: &RepairReport) -> String {
    let mut out = String::new();
    if let Some(node) = report.failed_node {
        let _ = writeln!(out, "Node {node} failed: {} routes affected", report.affected());
    }
    for route in &report.repaired {
        let _ = writeln!(
            out,
            "  repaired {} -> {}: {}",
            route.source, route.destination, route.path
        );
    }
    for (source, destination) in &report.stale {
        let _ = writeln!(out, "  stale    {source} -> {destination}: no alternate route");
    }
    for (source, destination) in &report.skipped {
        let _ = writeln!(out, "  skipped  {source} -> {destination}: destination failed");
    }
    for (source, destination) in &report.superseded {
        let _ = writeln!(out, "  rerouted {source} -> {destination}: by an earlier repair");
    }
    for failure in &report.failures {
        let _ = writeln!(out, "  failed   {failure}");
    }
    out
}

fn format_distance(distance: f64) -> String {
    if distance.fract() == 0.0 {
        format!("{distance:.0}")
    } else {
        format!("{distance:.2}")
    }
}

fn render_grid(rows: &[[String; 4]]) -> String {
    let mut widths = HEADERS.map(str::len);
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let rule = |left: &str, mid: &str, right: &str| {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{left}{}{right}\n", segments.join(mid))
    };
    let line = |cells: &[&str]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!(" {cell:<w$} "))
            .collect();
        format!("│{}│\n", padded.join("│"))
    };

    let mut out = rule("╒", "╤", "╕").replace('─', "═");
    out.push_str(&line(&HEADERS[..]));
    out.push_str(&rule("╞", "╪", "╡").replace('─', "═"));
    for (i, row) in rows.iter().enumerate() {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        out.push_str(&line(&cells[..]));
        if i + 1 < rows.len() {
            out.push_str(&rule("├", "┼", "┤"));
        }
    }
    out.push_str(&rule("╘", "╧", "╛").replace('─', "═"));
    out
}
