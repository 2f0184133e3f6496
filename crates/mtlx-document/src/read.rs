//! MaterialX XML reading.
//!
//! Grammar coverage is deliberately limited to what baked documents and the
//! standard-library files the importer needs can contain: top-level nodes,
//! node graphs, inputs, outputs and XInclude references. Unknown elements
//! are skipped.

use camino::{Utf8Path, Utf8PathBuf};
use mtlx_log::{debug, warn};
use roxmltree::Node as XmlNode;
use thiserror::Error;

use crate::element::{Document, Input, Node, NodeGraph, Output};
use crate::paths::SearchPath;

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("i/o error reading `{path}`: {source}")]
    Io {
        path: Utf8PathBuf,
        source: std::io::Error,
    },
    #[error("xml error: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("not a MaterialX document (root element is `{0}`)")]
    NotMaterialX(String),
}

/// Reads a document from disk. XInclude references are resolved through the
/// search path; an include that cannot be found is logged and skipped, the
/// way the reference loader reports missing include files.
pub fn from_file(path: &Utf8Path, search: &SearchPath) -> Result<Document, ReadError> {
    let content = std::fs::read_to_string(path).map_err(|source| ReadError::Io {
        path: path.to_owned(),
        source,
    })?;
    from_str_with_includes(&content, search)
}

/// Reads a document from a string. Includes cannot be resolved.
pub fn from_str(content: &str) -> Result<Document, ReadError> {
    from_str_with_includes(content, &SearchPath::new())
}

pub fn from_str_with_includes(content: &str, search: &SearchPath) -> Result<Document, ReadError> {
    let xml = roxmltree::Document::parse(content)?;
    let root = xml.root_element();
    if root.tag_name().name() != "materialx" {
        return Err(ReadError::NotMaterialX(root.tag_name().name().to_owned()));
    }

    let mut doc = Document {
        version: root.attribute("version").unwrap_or("1.38").to_owned(),
        colorspace: root.attribute("colorspace").map(str::to_owned),
        file_prefix: root.attribute("fileprefix").map(str::to_owned),
        ..Default::default()
    };

    for child in root.children().filter(XmlNode::is_element) {
        match child.tag_name().name() {
            "nodegraph" => {
                if let Some(graph) = parse_nodegraph(&child) {
                    doc.nodegraphs.push(graph);
                }
            }
            "include" => resolve_include(&child, search, &mut doc),
            // Elements owned by the full MaterialX object model that a
            // flattened document has no use for.
            "nodedef" | "implementation" | "typedef" | "unittypedef" | "attributedef" => {
                debug!("skipping library element `{}`", child.tag_name().name());
            }
            _ => {
                if let Some(node) = parse_node(&child) {
                    doc.nodes.push(node);
                } else {
                    debug!("skipping unnamed element `{}`", child.tag_name().name());
                }
            }
        }
    }

    Ok(doc)
}

fn resolve_include(child: &XmlNode, search: &SearchPath, doc: &mut Document) {
    let Some(href) = child.attribute("href") else {
        warn!("include element without href attribute");
        return;
    };
    match search.find(Utf8Path::new(href)) {
        Some(resolved) => match from_file(&resolved, search) {
            Ok(included) => doc.import_library(&included),
            Err(err) => warn!("failed to read include `{href}`: {err}"),
        },
        None => warn!("include file not found: {href}"),
    }
}

fn parse_node(element: &XmlNode) -> Option<Node> {
    let name = element.attribute("name")?.to_owned();
    Some(Node {
        name,
        category: element.tag_name().name().to_owned(),
        ty: element.attribute("type").unwrap_or_default().to_owned(),
        inputs: element
            .children()
            .filter(|c| c.is_element() && c.tag_name().name() == "input")
            .filter_map(|c| parse_input(&c))
            .collect(),
    })
}

fn parse_input(element: &XmlNode) -> Option<Input> {
    let name = element.attribute("name")?.to_owned();
    Some(Input {
        name,
        ty: element.attribute("type").unwrap_or_default().to_owned(),
        value: element.attribute("value").map(str::to_owned),
        nodegraph: element.attribute("nodegraph").map(str::to_owned),
        output: element.attribute("output").map(str::to_owned),
        nodename: element.attribute("nodename").map(str::to_owned),
    })
}

fn parse_nodegraph(element: &XmlNode) -> Option<NodeGraph> {
    let name = element.attribute("name")?.to_owned();
    let mut graph = NodeGraph {
        name,
        file_prefix: element.attribute("fileprefix").map(str::to_owned),
        ..Default::default()
    };
    for child in element.children().filter(XmlNode::is_element) {
        if child.tag_name().name() == "output" {
            let Some(name) = child.attribute("name") else {
                continue;
            };
            graph.outputs.push(Output {
                name: name.to_owned(),
                ty: child.attribute("type").unwrap_or_default().to_owned(),
                nodename: child.attribute("nodename").unwrap_or_default().to_owned(),
            });
        } else if let Some(node) = parse_node(&child) {
            graph.nodes.push(node);
        }
    }
    Some(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BAKED: &str = r#"
        <materialx version="1.38" colorspace="lin_rec709">
          <nodegraph name="NG_baked">
            <image name="base_color_image" type="color3">
              <input name="file" type="filename" value="baked\base_color.png" />
            </image>
            <output name="base_color_output" type="color3" nodename="base_color_image" />
          </nodegraph>
          <standard_surface name="surface" type="surfaceshader">
            <input name="base_color" type="color3" nodegraph="NG_baked" output="base_color_output" />
            <input name="roughness" type="float" value="0.5" />
          </standard_surface>
          <surfacematerial name="material" type="material">
            <input name="surfaceshader" type="surfaceshader" nodename="surface" />
          </surfacematerial>
        </materialx>
    "#;

    #[test]
    fn parses_a_baked_document() {
        let doc = from_str(BAKED).unwrap();
        assert_eq!(doc.version, "1.38");
        assert_eq!(doc.colorspace.as_deref(), Some("lin_rec709"));
        assert_eq!(doc.nodes.len(), 2);
        assert_eq!(doc.nodegraphs.len(), 1);

        let surface = doc.node("surface").unwrap();
        assert_eq!(surface.category, "standard_surface");
        assert_eq!(surface.inputs.len(), 2);
        assert!(surface.inputs[0].is_connection());
        assert!(!surface.inputs[1].is_connection());

        let graph = doc.nodegraph("NG_baked").unwrap();
        let output = graph.output("base_color_output").unwrap();
        let image = graph.node(&output.nodename).unwrap();
        assert_eq!(
            image.inputs[0].value.as_deref(),
            Some("baked\\base_color.png")
        );
    }

    #[test]
    fn input_order_is_preserved() {
        let doc = from_str(BAKED).unwrap();
        let names: Vec<&str> = doc
            .node("surface")
            .unwrap()
            .inputs
            .iter()
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(names, ["base_color", "roughness"]);
    }

    #[test]
    fn rejects_non_materialx_documents() {
        assert!(matches!(
            from_str("<svg></svg>"),
            Err(ReadError::NotMaterialX(_))
        ));
    }

    #[test]
    fn missing_includes_are_skipped() {
        let content = r#"
            <materialx version="1.38">
              <include href="does_not_exist.mtlx" />
              <standard_surface name="surface" type="surfaceshader" />
            </materialx>
        "#;
        let doc = from_str(content).unwrap();
        assert_eq!(doc.nodes.len(), 1);
    }
}
