use std::collections::{HashMap, HashSet};

use petgraph::graph::NodeIndex;

use crate::error::{Error, Result};
use crate::graph::CompGraph;
use crate::margin::Source;

/// Result of a successful validation: for every wired input of an internal
/// node, the source feeding it.
#[derive(Debug, Clone, Default)]
pub struct ValidatedGraph {
    bindings: HashMap<(NodeIndex, String), Source>,
}

impl ValidatedGraph {
    pub fn source_of(&self, node: NodeIndex, input: &str) -> Option<&Source> {
        self.bindings.get(&(node, input.to_string()))
    }

    #[cfg(test)]
    pub(crate) fn binding_count(&self) -> usize {
        self.bindings.len()
    }
}

/// Check that `graph` can be drawn. Fails on the first violation found.
pub fn validate(graph: &CompGraph) -> Result<ValidatedGraph> {
    if graph.is_cyclic() {
        return Err(Error::Cycle);
    }

    let mut internal_count = 0;
    for (_, data) in graph.nodes() {
        let (Some(inputs), Some(outputs)) = (&data.inputs, &data.outputs) else {
            continue;
        };
        internal_count += 1;

        let mut seen = HashSet::new();
        for input in inputs {
            if !seen.insert(input.as_str()) {
                return Err(Error::DuplicateInput {
                    node: data.id.clone(),
                    input: input.clone(),
                });
            }
        }

        let mut seen = HashSet::new();
        for output in outputs {
            if !seen.insert(output.as_str()) {
                return Err(Error::DuplicateOutput {
                    node: data.id.clone(),
                    output: output.clone(),
                });
            }
        }
    }
    tracing::trace!(internal_count, "validate: port labels unique");

    if internal_count == 0 {
        return Err(Error::NoVisualizableNodes);
    }

    let mut bindings: HashMap<(NodeIndex, String), Source> = HashMap::new();
    for (from, to, connection) in graph.edges() {
        let from_data = graph.node(from);
        let to_data = graph.node(to);

        if from_data.is_internal() {
            match &connection.output {
                None => {
                    return Err(Error::MissingOutputAttribute {
                        from: from_data.id.clone(),
                        to: to_data.id.clone(),
                    });
                }
                Some(output) if !from_data.has_output(output) => {
                    return Err(Error::UnknownOutput {
                        from: from_data.id.clone(),
                        to: to_data.id.clone(),
                        output: output.clone(),
                    });
                }
                Some(_) => {}
            }
        }

        if !to_data.is_internal() {
            continue;
        }
        let input = match &connection.input {
            None => {
                return Err(Error::MissingInputAttribute {
                    from: from_data.id.clone(),
                    to: to_data.id.clone(),
                });
            }
            Some(input) if !to_data.has_input(input) => {
                return Err(Error::UnknownInput {
                    from: from_data.id.clone(),
                    to: to_data.id.clone(),
                    input: input.clone(),
                });
            }
            Some(input) => input,
        };

        let source = Source::new(from, connection.output.as_deref());
        let dest = (to, input.clone());
        if let Some(bound) = bindings.get(&dest) {
            if *bound == source {
                return Err(Error::DuplicateEdge {
                    from: from_data.id.clone(),
                    output: connection.output.clone(),
                    to: to_data.id.clone(),
                    input: input.clone(),
                });
            }
            return Err(Error::MultipleSources {
                to: to_data.id.clone(),
                input: input.clone(),
            });
        }
        bindings.insert(dest, source);
    }
    tracing::trace!(bindings = bindings.len(), "validate: edges bound");

    Ok(ValidatedGraph { bindings })
}
