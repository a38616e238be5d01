//! Renders the node view of a parsed program as a Graphviz graph.

use std::{
    fs,
    io::{self, Write},
    process::{Command, Stdio},
};

use super::node::{Node, Relation};
use graph::{Edge, Graph, Vertex};

pub mod graph;

pub struct Visualizer {
    /// Counter used for giving each vertex a unique name.
    vertex_counter: u32,
    /// Graph that will be filled.
    pub graph: Graph,
}

impl Visualizer {
    const VERTEX_NAME_PREFIX: &'static str = "node";

    pub fn new(graph_name: &str, is_directed: bool) -> Self {
        Self {
            vertex_counter: 1,
            graph: Graph::new(graph_name, is_directed),
        }
    }

    /// Add `node` and everything below it to the graph. Every relation member becomes an edge
    /// labelled with the relation name. Returns the vertex name of `node`.
    pub fn visualize_node(&mut self, node: &Node) -> String {
        let id = self.add_vertex(&node.label());
        for (name, relation) in node.relations.iter() {
            match relation {
                Relation::Child(child) => {
                    let child_id = self.visualize_node(child);
                    self.add_edge(&id, &child_id, name);
                }
                Relation::Children(children) => {
                    for child in children {
                        let child_id = self.visualize_node(child);
                        self.add_edge(&id, &child_id, name);
                    }
                }
            }
        }
        id
    }

    fn add_vertex(&mut self, label: &str) -> String {
        let id = format!("{}{}", Visualizer::VERTEX_NAME_PREFIX, self.vertex_counter);
        self.vertex_counter += 1;
        self.graph.add_vertex(Vertex::new(&id, Some(label)));
        id
    }

    fn add_edge(&mut self, from: &str, to: &str, label: &str) {
        self.graph
            .add_edge(Edge::new(from, to, Some(label), self.graph.is_directed))
    }

    pub fn write_to_dot(&self, outfile: &str) -> io::Result<()> {
        fs::write(outfile, self.graph.to_string())
    }

    /// Pipe the graph through the Graphviz `dot` tool, which has to be installed.
    pub fn write_to_pdf(&self, outfile: &str) -> io::Result<()> {
        let mut dot = Command::new("dot")
            .stdin(Stdio::piped())
            .arg("-Tpdf")
            .arg("-o")
            .arg(outfile)
            .spawn()?;

        if let Some(mut stdin) = dot.stdin.take() {
            stdin.write_all(self.graph.to_string().as_bytes())?;
        }
        let status = dot.wait()?;
        if status.success() {
            Ok(())
        } else {
            Err(io::Error::new(
                io::ErrorKind::Other,
                format!("dot exited with {}", status),
            ))
        }
    }
}
