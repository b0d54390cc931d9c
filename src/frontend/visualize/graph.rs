//! Structs and functions concerned with generating graphs in the Graphviz DOT language.

use phf::phf_map;
use std::fmt::{self, Display};

/// A graph whose statements are grouped into clusters, one `subgraph` block each.
pub struct Graph {
    name: String,
    pub is_directed: bool,
    clusters: Vec<Cluster>,
}

impl Graph {
    pub fn new(name: &str, is_directed: bool) -> Self {
        Graph {
            name: name.to_string(),
            is_directed,
            clusters: Vec::new(),
        }
    }

    pub fn add_cluster(&mut self, cluster: Cluster) {
        self.clusters.push(cluster);
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn as_dot<W: fmt::Write>(&self, writer: &mut W) -> fmt::Result {
        write!(writer, "{}", self)
    }
}

impl Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let graph_type = if self.is_directed {
            "digraph"
        } else {
            "graph"
        };
        if self.name.is_empty() {
            writeln!(f, "{} {{", graph_type)?;
        } else {
            writeln!(f, "{} {} {{", graph_type, &self.name)?;
        }
        for cluster in self.clusters.iter() {
            writeln!(f, "\tsubgraph {} {{", cluster.title)?;
            for statement in cluster.statements.iter() {
                writeln!(f, "\t\t{}", statement)?;
            }
            writeln!(f, "\t}}")?;
        }
        writeln!(f, "}}")
    }
}

/// Statements of a single cluster, kept in the order they were added.
pub struct Cluster {
    title: String,
    statements: Vec<Statement>,
}

impl Cluster {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            statements: Vec::new(),
        }
    }

    pub fn add_node(&mut self, node: Node) {
        self.statements.push(Statement::Node(node));
    }

    pub fn add_edge(&mut self, edge: Edge) {
        self.statements.push(Statement::Edge(edge));
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.statements.iter().filter_map(|s| match s {
            Statement::Node(node) => Some(node),
            _ => None,
        })
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.statements.iter().filter_map(|s| match s {
            Statement::Edge(edge) => Some(edge),
            _ => None,
        })
    }
}

pub enum Statement {
    Node(Node),
    Edge(Edge),
}

impl Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Statement::Node(node) => node.fmt(f),
            Statement::Edge(edge) => edge.fmt(f),
        }
    }
}

pub struct Node {
    pub id: String,
    pub label: Option<String>,
}

impl Node {
    pub fn new(id: &str, label: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            label: label.map(|x| x.to_string()),
        }
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.label {
            Some(ref l) => write!(f, "{} [label=\"{}\"];", self.id, Escaped(l)),
            None => write!(f, "{};", self.id),
        }
    }
}

static LABEL_ESCAPES: phf::Map<char, &'static str> = phf_map! {
    '"' => "\\\"",
    '\\' => "\\\\",
    '\n' => "\\n",
};

/// Label text with the characters that would end or corrupt a DOT string escaped.
struct Escaped<'a>(&'a str);

impl Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for c in self.0.chars() {
            match LABEL_ESCAPES.get(&c) {
                Some(escape) => f.write_str(escape)?,
                None => write!(f, "{}", c)?,
            }
        }
        Ok(())
    }
}

/// Add new nodes to a given cluster by passing a node name and an optional label.
#[macro_export]
macro_rules! add_nodes {
    ($cluster:ident, $($id:literal : $label:literal),+) => {
        $(
            $cluster.add_node(Node::new($id, Some($label)));
        )+
    };
    ($cluster:ident, $($id:literal),+) => {
        $($cluster.add_node(Node::new($id, None));)+
    }
}

/// Add new edges to a given cluster.
#[macro_export]
macro_rules! add_edges {
    ($cluster:ident, $($from:literal -> $to:literal),+) => {
        $(
            $cluster.add_edge(Edge::new($from, $to, true));
        )+
    };
    ($cluster:ident, $($from:literal -- $to:literal),+) => {
        $(
            $cluster.add_edge(Edge::new($from, $to, false));
        )+
    }
}

pub struct Edge {
    pub from: String,
    pub to: String,
    is_directed: bool,
}

impl Edge {
    pub fn new(from: &str, to: &str, is_directed: bool) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            is_directed,
        }
    }
}

impl Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {};",
            self.from,
            if self.is_directed { "->" } else { "--" },
            self.to
        )
    }
}
