//! Text diagrams of computational graphs.
//!
//! A computational graph is a directed acyclic multigraph whose nodes are
//! operations with named inputs and outputs, and whose edges connect one
//! output of a node to one input of another. Nodes that declare both
//! `inputs` and `outputs` are drawn as boxes; every other node is treated
//! as an external source or sink.
//!
//! ```
//! use compgraph2txt::{CompGraph, Connection, Node, RenderOptions, render_graph};
//!
//! let mut graph = CompGraph::new();
//! graph.add_node(Node::new("A").with_inputs(Vec::<String>::new()).with_outputs(["a"]));
//! graph.add_node(Node::new("B").with_inputs(["b"]).with_outputs(Vec::<String>::new()));
//! graph.add_edge("A", "B", Connection::new().output("a").input("b"));
//!
//! let text = render_graph(&graph, &RenderOptions::default()).unwrap();
//! assert!(text.contains("a ─┼─╮"));
//! assert!(text.contains("┼→ b"));
//! ```

pub mod display_width;
pub mod error;
pub mod graph;
pub mod margin;
pub mod parser;
pub mod renderer;
pub mod validate;

pub use error::{Error, ErrorKind, Result};
pub use graph::{CompGraph, Connection, Node, NodeData};
pub use renderer::{RenderOptions, render_graph, round_corners};
pub use validate::{ValidatedGraph, validate};

/// Parse a `compgraph` document and render it with rounded corners.
pub fn render(input: &str) -> Result<String> {
    render_with_options(input, &RenderOptions::default())
}

/// Parse a `compgraph` document and render it with the given options.
pub fn render_with_options(input: &str, options: &RenderOptions) -> Result<String> {
    let graph = parser::parse_compgraph(input)?;
    render_graph(&graph, options)
}

/// Parse and validate a `compgraph` document without rendering it.
pub fn check(input: &str) -> Result<()> {
    let graph = parser::parse_compgraph(input)?;
    validate(&graph)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_without_header_returns_error() {
        let err = render("graph TD\n  A --> B\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
        assert!(err.to_string().contains("graph TD"), "got: {err}");
    }

    #[test]
    fn render_empty_document_returns_error() {
        let err = render("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
    }

    #[test]
    fn render_header_only_has_nothing_to_draw() {
        let err = render("compgraph\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoVisualizableNodes);
    }

    #[test]
    fn render_simple_document() {
        let output = render("compgraph\nnode A (x) -> (y)\nin -> A.x\n").unwrap();
        assert!(output.contains("┼→ x"));
        assert!(output.starts_with("│ ╭"));
    }

    #[test]
    fn render_square_corners() {
        let options = RenderOptions {
            rounded_corners: false,
        };
        let output = render_with_options("compgraph\nnode A (x) -> (y)\n", &options).unwrap();
        assert!(output.starts_with('┌'));
        assert!(!output.contains('╭'));
    }

    #[test]
    fn check_reports_validation_errors() {
        assert!(check("compgraph\nnode A (x) -> (y)\n").is_ok());
        let err = check("compgraph\nnode A (x, x) -> (y)\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateLabel);
    }
}
