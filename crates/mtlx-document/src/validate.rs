//! Structural document validation.

use std::fmt::Write;

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::element::Document;

#[derive(Debug, Error)]
#[error("validation warnings:\n{warnings}")]
pub struct ValidateError {
    pub warnings: String,
}

/// Validates document structure: element names must be present and unique
/// at the top level, node-graph outputs must reference nodes that exist in
/// their graph, and connected inputs must reference known node graphs.
pub fn validate(doc: &Document) -> Result<(), ValidateError> {
    let mut warnings = String::new();

    let mut seen = FxHashSet::default();
    for node in &doc.nodes {
        if node.name.is_empty() {
            let _ = writeln!(warnings, "unnamed `{}` element", node.category);
        } else if !seen.insert(node.name.as_str()) {
            let _ = writeln!(warnings, "duplicate element name `{}`", node.name);
        }
    }

    for graph in &doc.nodegraphs {
        if !seen.insert(graph.name.as_str()) {
            let _ = writeln!(warnings, "duplicate element name `{}`", graph.name);
        }
        for output in &graph.outputs {
            if graph.node(&output.nodename).is_none() {
                let _ = writeln!(
                    warnings,
                    "output `{}` in graph `{}` references missing node `{}`",
                    output.name, graph.name, output.nodename
                );
            }
        }
    }

    for node in &doc.nodes {
        for input in &node.inputs {
            if let Some(graph) = &input.nodegraph {
                if doc.nodegraph(graph).is_none() {
                    let _ = writeln!(
                        warnings,
                        "input `{}` on `{}` references missing node graph `{}`",
                        input.name, node.name, graph
                    );
                }
            }
        }
    }

    if warnings.is_empty() {
        Ok(())
    } else {
        Err(ValidateError { warnings })
    }
}
