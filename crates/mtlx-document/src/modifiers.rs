//! Whole-document modifiers applied after reading and before validation.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::element::{Document, Input, Node};

/// Token remapping, element skipping and file-prefix termination, applied
/// as one pass over the whole document tree.
#[derive(Debug, Clone, Default)]
pub struct DocumentModifiers {
    /// Maps old categories, names and reference tokens to replacements.
    pub remap_elements: FxHashMap<String, String>,
    /// Elements whose category or name matches are removed.
    pub skip_elements: FxHashSet<String>,
    /// Enforced terminator for file prefixes (e.g. a trailing `/`).
    pub file_prefix_terminator: String,
}

impl DocumentModifiers {
    pub fn is_empty(&self) -> bool {
        self.remap_elements.is_empty()
            && self.skip_elements.is_empty()
            && self.file_prefix_terminator.is_empty()
    }

    pub fn apply(&self, doc: &mut Document) {
        if self.is_empty() {
            return;
        }

        doc.nodes
            .retain(|n| !self.skipped(&n.category) && !self.skipped(&n.name));
        for node in &mut doc.nodes {
            self.apply_node(node);
        }

        doc.nodegraphs
            .retain(|g| !self.skipped(&g.name));
        for graph in &mut doc.nodegraphs {
            graph
                .nodes
                .retain(|n| !self.skipped(&n.category) && !self.skipped(&n.name));
            for node in &mut graph.nodes {
                self.apply_node(node);
            }
            for output in &mut graph.outputs {
                self.remap(&mut output.nodename);
            }
            self.terminate_prefix(&mut graph.file_prefix);
        }

        self.terminate_prefix(&mut doc.file_prefix);
    }

    fn apply_node(&self, node: &mut Node) {
        self.remap(&mut node.category);
        self.remap(&mut node.name);
        for input in &mut node.inputs {
            self.apply_input(input);
        }
    }

    fn apply_input(&self, input: &mut Input) {
        for field in [&mut input.nodename, &mut input.nodegraph, &mut input.output] {
            if let Some(value) = field {
                self.remap(value);
            }
        }
    }

    fn remap(&self, token: &mut String) {
        if let Some(replacement) = self.remap_elements.get(token.as_str()) {
            *token = replacement.clone();
        }
    }

    fn skipped(&self, token: &str) -> bool {
        self.skip_elements.contains(token)
    }

    fn terminate_prefix(&self, prefix: &mut Option<String>) {
        if self.file_prefix_terminator.is_empty() {
            return;
        }
        if let Some(prefix) = prefix {
            if !prefix.ends_with(&self.file_prefix_terminator) {
                prefix.push_str(&self.file_prefix_terminator);
            }
        }
    }
}
