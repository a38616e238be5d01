//! Structs and functions concerned with generating graphs with Graphviz and DOT language.

use std::fmt::{self, Display};

pub struct Graph {
    name: String,
    pub is_directed: bool,
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new(name: &str, is_directed: bool) -> Self {
        Graph {
            name: name.to_string(),
            is_directed,
            vertices: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn add_vertex(&mut self, vertex: Vertex) {
        self.vertices.push(vertex);
    }

    pub fn add_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn as_dot<W: fmt::Write>(&self, writer: &mut W) -> fmt::Result {
        write!(writer, "{}", self)
    }
}

impl Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let graph_type = if self.is_directed { "digraph" } else { "graph" };
        writeln!(f, "{} {} {{", graph_type, &self.name)?;
        for vertex in self.vertices.iter() {
            writeln!(f, "\t{}", vertex)?;
        }
        for edge in self.edges.iter() {
            writeln!(f, "\t{}", edge)?;
        }
        write!(f, "}}")
    }
}

/// Quote a label so that it is a valid DOT string.
fn escape(label: &str) -> String {
    let mut escaped = String::with_capacity(label.len());
    for c in label.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            c => escaped.push(c),
        }
    }
    escaped
}

pub struct Vertex {
    id: String,
    label: Option<String>,
}

impl Vertex {
    pub fn new(id: &str, label: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            label: label.map(str::to_string),
        }
    }
}

impl Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.label {
            Some(ref l) => write!(f, "{} [ label=\"{}\" ];", self.id, escape(l)),
            None => write!(f, "{};", self.id),
        }
    }
}

/// Add new vertices to a given graph by passing a vertex name and an optional label.
#[macro_export]
macro_rules! add_vertices {
    ($graph:ident, $($id:literal : $label:literal),+) => {
        $($graph.add_vertex(Vertex::new($id, Some($label)));)+
    };
    ($graph:ident, $($id:literal),+) => {
        $($graph.add_vertex(Vertex::new($id, None));)+
    }
}

/// Add new edges to a given graph, optionally labelled.
#[macro_export]
macro_rules! add_edges {
    ($graph:ident, $($from:literal -> $to:literal $(: $label:literal)?),+) => {
        assert!($graph.is_directed);
        $(
            $graph.add_edge(Edge::new($from, $to, None $(.or(Some($label)))?, true));
        )+
    };
    ($graph:ident, $($from:literal -- $to:literal $(: $label:literal)?),+) => {
        assert!(!$graph.is_directed);
        $(
            $graph.add_edge(Edge::new($from, $to, None $(.or(Some($label)))?, false));
        )+
    }
}

pub struct Edge {
    from: String,
    to: String,
    label: Option<String>,
    is_directed: bool,
}

impl Edge {
    pub fn new(from: &str, to: &str, label: Option<&str>, is_directed: bool) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            label: label.map(str::to_string),
            is_directed,
        }
    }
}

impl Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let arrow = if self.is_directed { "->" } else { "--" };
        write!(f, "{} {} {}", self.from, arrow, self.to)?;
        match self.label {
            Some(ref l) => write!(f, " [ label=\"{}\" ];", escape(l)),
            None => write!(f, ";"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Edge, Graph, Vertex};
    use crate::add_edges;
    use crate::add_vertices;

    #[test]
    fn test_empty_graph() {
        let empty_graph = Graph::new("empty", true);
        let mut buf = String::new();
        empty_graph.as_dot(&mut buf).unwrap();

        assert_eq!(buf, "digraph empty {\n}");
    }

    #[test]
    fn test_directed_graph() {
        let mut graph = Graph::new("g", true);
        let mut buf = String::new();
        add_vertices!(
            graph,
            "node1" : "Program",
            "node2" : "Ident:ab",
            "node3" : "Decimal:1.0"
        );
        add_edges!(
            graph,
            "node1" -> "node2" : "statements",
            "node1" -> "node3",
            "node3" -> "node1"
        );
        graph.as_dot(&mut buf).unwrap();
        assert_eq!(
            buf,
            "digraph g {\n\tnode1 [ label=\"Program\" ];\n\tnode2 [ label=\"Ident:ab\" ];\
            \n\tnode3 [ label=\"Decimal:1.0\" ];\n\tnode1 -> node2 [ label=\"statements\" ];\
            \n\tnode1 -> node3;\n\tnode3 -> node1;\n}"
        );
        assert_eq!(graph.vertex_count(), 3);
    }

    #[test]
    fn test_undirected_graph() {
        let mut graph = Graph::new("g", false);
        let mut buf = String::new();
        add_vertices!(graph, "node1", "node2");
        add_edges!(graph, "node1" -- "node2");
        graph.as_dot(&mut buf).unwrap();
        assert_eq!(buf, "graph g {\n\tnode1;\n\tnode2;\n\tnode1 -- node2;\n}");
    }

    #[test]
    fn test_labels_are_escaped() {
        let vertex = Vertex::new("node1", Some("InfoString:say \"hi\" \\o/"));
        assert_eq!(
            vertex.to_string(),
            "node1 [ label=\"InfoString:say \\\"hi\\\" \\\\o/\" ];"
        );
    }
}
