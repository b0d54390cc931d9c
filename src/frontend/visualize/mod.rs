//! Rendering a parsed `Ast` as a Graphviz DOT description.
//!
//! Every top-level form gets its own cluster. Node ids come from a single counter shared by
//! the whole traversal, so they are unique across clusters, and statements are emitted in
//! pre-order with children in source order. Rendering the same `Ast` twice yields the same text.

use super::ast::{Arena, Ast, AstNode, NodeId};
use super::visualize::graph::{Cluster, Edge, Graph, Node};
use crate::error::SeedError;

use std::io::Write;
use std::process::{Command, Stdio};

pub mod graph;

/// Names used in the generated DOT text.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Name of the top-level graph; left out when empty.
    pub graph_name: String,
    /// Cluster titles are this prefix followed by the index of the root.
    pub cluster_prefix: String,
    /// Node ids are this prefix followed by the value of the node counter.
    pub node_prefix: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            graph_name: String::new(),
            cluster_prefix: "cluster".to_string(),
            node_prefix: "n".to_string(),
        }
    }
}

pub struct Visualizer {
    /// Counter used for giving each node a unique name.
    node_counter: u32,
    options: RenderOptions,
    /// Graph that will be filled.
    pub graph: Graph,
}

impl Visualizer {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            node_counter: 0,
            graph: Graph::new(&options.graph_name, true),
            options,
        }
    }

    /// Render `ast` with the given options in one go.
    pub fn render(ast: &Ast<'_>, options: RenderOptions) -> String {
        let mut viz = Visualizer::new(options);
        viz.visualize_ast(ast);
        viz.graph.to_string()
    }

    /// Add one cluster per root of `ast`.
    pub fn visualize_ast(&mut self, ast: &Ast<'_>) {
        for (idx, root) in ast.roots.iter().enumerate() {
            let title = format!("{}{}", self.options.cluster_prefix, idx);
            log::debug!("emitting {} for root {:?}", title, root);
            let mut cluster = Cluster::new(&title);
            // The first node of a cluster gets the current counter value as its id, so using
            // that value as the parent marks it as having no parent.
            let parent = self.node_counter;
            self.visualize_node(&ast.arena, *root, parent, &mut cluster);
            self.node_counter += 1;
            self.graph.add_cluster(cluster);
        }
    }

    fn visualize_node(
        &mut self,
        arena: &Arena<'_>,
        id: NodeId,
        parent: u32,
        cluster: &mut Cluster,
    ) {
        match &arena[id] {
            AstNode::Empty => (),
            AstNode::Ident(token) | AstNode::Str(token) => {
                self.add_node(cluster, parent, token.lexeme());
            }
            AstNode::List { op, children } => {
                let own = self.add_node(cluster, parent, op.lexeme());
                for child in children {
                    self.visualize_node(arena, *child, own, cluster);
                    self.node_counter += 1;
                }
            }
        }
    }

    /// Declare a node labeled `label`, connect it to `parent` and return its id.
    fn add_node(&mut self, cluster: &mut Cluster, parent: u32, label: &str) -> u32 {
        let own = self.node_counter;
        self.node_counter += 1;
        let name = self.node_name(own);
        cluster.add_node(Node::new(&name, Some(label)));
        if own != parent {
            cluster.add_edge(Edge::new(
                &self.node_name(parent),
                &name,
                self.graph.is_directed,
            ));
        }
        own
    }

    fn node_name(&self, id: u32) -> String {
        format!("{}{}", self.options.node_prefix, id)
    }

    /// Pipe the graph into Graphviz and let it write a PDF to `outfile`.
    pub fn write_to_pdf(&self, outfile: &str) -> Result<(), SeedError> {
        let buf = self.graph.to_string();

        let mut dot = Command::new("dot")
            .stdin(Stdio::piped())
            .arg("-Tpdf")
            .arg("-o")
            .arg(outfile)
            .spawn()
            .map_err(|source| SeedError::Graphviz { source })?;

        if let Some(mut stdin) = dot.stdin.take() {
            stdin
                .write_all(buf.as_bytes())
                .map_err(|source| SeedError::Graphviz { source })?;
        }
        let status = dot.wait().map_err(|source| SeedError::Graphviz { source })?;
        if status.success() {
            Ok(())
        } else {
            Err(SeedError::Graphviz {
                source: std::io::Error::new(
                    std::io::ErrorKind::Other,
                    format!("`dot` exited with {}", status),
                ),
            })
        }
    }
}
