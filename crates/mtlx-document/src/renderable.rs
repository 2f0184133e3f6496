//! Renderable shading node discovery.

use crate::element::{Document, Node};

/// Finds the renderable shading nodes of a document, in document order.
///
/// A renderable node is a shader node reached through a material node's
/// `surfaceshader` bindings. When the document has no material nodes,
/// standalone surface-shader nodes count directly, which is what baked
/// documents that omit the material wrapper look like.
pub fn renderables(doc: &Document) -> Vec<&Node> {
    let mut found = Vec::new();

    for material in doc.nodes.iter().filter(|n| n.ty == "material") {
        for input in &material.inputs {
            if input.ty != "surfaceshader" {
                continue;
            }
            let Some(name) = &input.nodename else {
                continue;
            };
            if let Some(shader) = doc.node(name) {
                if !found.iter().any(|n: &&Node| n.name == shader.name) {
                    found.push(shader);
                }
            }
        }
    }

    if found.is_empty() {
        found.extend(doc.nodes.iter().filter(|n| n.ty == "surfaceshader"));
    }

    found
}
