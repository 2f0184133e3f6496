//! In-memory model of a (baked) MaterialX document.
//!
//! Only the subset of the MaterialX element hierarchy that a flattened
//! document can contain is modeled: top-level nodes, node graphs with their
//! nodes and outputs, and typed inputs. Everything upstream of baking
//! (node defs, implementations, shader generation) belongs to the external
//! MaterialX library and never reaches this model.

/// A single input on a node. Either carries a literal value or references
/// an upstream node-graph output (a texture-producing connection).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Input {
    pub name: String,
    /// MaterialX type string (`float`, `color3`, `surfaceshader`, ...).
    pub ty: String,
    /// Literal value string, if any.
    pub value: Option<String>,
    /// Name of the node graph the referenced output lives in.
    pub nodegraph: Option<String>,
    /// Name of the referenced output within that graph.
    pub output: Option<String>,
    /// Direct upstream node reference (used inside node graphs and for
    /// shader bindings on material nodes).
    pub nodename: Option<String>,
}

impl Input {
    /// Whether this input references an upstream output rather than a
    /// literal value.
    #[inline]
    pub fn is_connection(&self) -> bool {
        self.output.is_some()
    }
}

/// A shading or image node. `category` is the XML element tag
/// (`standard_surface`, `image`, `normalmap`, `surfacematerial`, ...).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    pub name: String,
    pub category: String,
    pub ty: String,
    /// Inputs in declaration order. Order matters to the translator.
    pub inputs: Vec<Input>,
}

impl Node {
    pub fn input(&self, name: &str) -> Option<&Input> {
        self.inputs.iter().find(|i| i.name == name)
    }
}

/// An output exposed by a node graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Output {
    pub name: String,
    pub ty: String,
    /// The node inside the graph that produces this output.
    pub nodename: String,
}

/// A node graph: a named container of nodes and the outputs they feed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeGraph {
    pub name: String,
    pub file_prefix: Option<String>,
    pub nodes: Vec<Node>,
    pub outputs: Vec<Output>,
}

impl NodeGraph {
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name == name)
    }

    pub fn output(&self, name: &str) -> Option<&Output> {
        self.outputs.iter().find(|o| o.name == name)
    }
}

/// A parsed MaterialX document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub version: String,
    pub colorspace: Option<String>,
    pub file_prefix: Option<String>,
    pub nodes: Vec<Node>,
    pub nodegraphs: Vec<NodeGraph>,
}

impl Document {
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name == name)
    }

    pub fn nodegraph(&self, name: &str) -> Option<&NodeGraph> {
        self.nodegraphs.iter().find(|g| g.name == name)
    }

    /// Imports the contents of a library document. Elements whose names
    /// collide with existing ones are skipped; the content document wins.
    pub fn import_library(&mut self, library: &Document) {
        for node in &library.nodes {
            if self.node(&node.name).is_none() {
                self.nodes.push(node.clone());
            }
        }
        for graph in &library.nodegraphs {
            if self.nodegraph(&graph.name).is_none() {
                self.nodegraphs.push(graph.clone());
            }
        }
    }
}
