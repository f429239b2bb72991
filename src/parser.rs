//! Line-based text format for computational graphs.
//!
//! ```text
//! compgraph
//! node A "A!" (w, x) -> (y, z)
//! node B (i, j) -> (k)
//! ext1 -> A.x
//! A.z -> B.j
//! A.y -> ext2
//! ```

use winnow::prelude::*;
use winnow::ascii::{space0, space1};
use winnow::combinator::{alt, delimited, opt, preceded, separated};
use winnow::token::{take_till, take_while};

use crate::error::{Error, Result};
use crate::graph::{CompGraph, Connection, Node};

const HEADER: &str = "compgraph";

#[derive(Debug, Clone, PartialEq)]
enum Statement {
    Node(Node),
    Edge { from: Endpoint, to: Endpoint },
}

#[derive(Debug, Clone, PartialEq)]
struct Endpoint {
    node: String,
    port: Option<String>,
}

pub fn parse_compgraph(input: &str) -> Result<CompGraph> {
    let mut lines = input
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !is_comment(line));

    match lines.next() {
        Some((_, HEADER)) => {}
        Some((_, found)) => {
            return Err(Error::NotMultigraph {
                found: truncate(found),
            });
        }
        None => {
            return Err(Error::NotMultigraph {
                found: String::new(),
            });
        }
    }

    let mut graph = CompGraph::new();
    for (line_no, line) in lines {
        let stmt = statement.parse(line).map_err(|e| Error::Syntax {
            line: line_no,
            message: format!("unexpected `{}`", truncate(&line[e.offset()..])),
        })?;
        match stmt {
            Statement::Node(node) => {
                graph.add_node(node);
            }
            Statement::Edge { from, to } => {
                let connection = Connection {
                    output: from.port,
                    input: to.port,
                };
                graph.add_edge(&from.node, &to.node, connection);
            }
        }
    }
    tracing::debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "parsed compgraph document"
    );

    Ok(graph)
}

fn is_comment(line: &str) -> bool {
    line.starts_with('#') || line.starts_with("%%")
}

fn truncate(context: &str) -> String {
    if context.chars().count() > 40 {
        let head: String = context.chars().take(40).collect();
        format!("{head}...")
    } else {
        context.to_string()
    }
}

fn statement(input: &mut &str) -> winnow::Result<Statement> {
    let stmt = alt((node_stmt, edge_stmt)).parse_next(input)?;
    space0.parse_next(input)?;
    Ok(stmt)
}

fn identifier<'s>(input: &mut &'s str) -> winnow::Result<&'s str> {
    take_while(1.., |c: char| c.is_alphanumeric() || c == '_').parse_next(input)
}

fn quoted(input: &mut &str) -> winnow::Result<String> {
    delimited('"', take_till(0.., '"'), '"')
        .map(str::to_string)
        .parse_next(input)
}

fn port_list(input: &mut &str) -> winnow::Result<Vec<String>> {
    "(".parse_next(input)?;
    space0.parse_next(input)?;
    let ports: Vec<&str> = separated(0.., identifier, (space0, ',', space0)).parse_next(input)?;
    space0.parse_next(input)?;
    ")".parse_next(input)?;
    Ok(ports.into_iter().map(str::to_string).collect())
}

fn ports(input: &mut &str) -> winnow::Result<(Vec<String>, Vec<String>)> {
    let inputs = port_list.parse_next(input)?;
    space0.parse_next(input)?;
    "->".parse_next(input)?;
    space0.parse_next(input)?;
    let outputs = port_list.parse_next(input)?;
    Ok((inputs, outputs))
}

fn node_stmt(input: &mut &str) -> winnow::Result<Statement> {
    "node".parse_next(input)?;
    space1.parse_next(input)?;
    let id = identifier.parse_next(input)?;
    let name = opt(preceded(space1, quoted)).parse_next(input)?;
    let ports = opt(preceded(space0, ports)).parse_next(input)?;

    let mut node = Node::new(id);
    node.name = name;
    if let Some((inputs, outputs)) = ports {
        node.inputs = Some(inputs);
        node.outputs = Some(outputs);
    }
    Ok(Statement::Node(node))
}

fn endpoint(input: &mut &str) -> winnow::Result<Endpoint> {
    let node = identifier.parse_next(input)?;
    let port = opt(preceded('.', identifier)).parse_next(input)?;
    Ok(Endpoint {
        node: node.to_string(),
        port: port.map(str::to_string),
    })
}

fn edge_stmt(input: &mut &str) -> winnow::Result<Statement> {
    let from = endpoint.parse_next(input)?;
    space0.parse_next(input)?;
    "->".parse_next(input)?;
    space0.parse_next(input)?;
    let to = endpoint.parse_next(input)?;
    Ok(Statement::Edge { from, to })
}
