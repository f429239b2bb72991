pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of [`Error`], one per way a graph can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Type,
    Cycle,
    NoVisualizableNodes,
    DuplicateLabel,
    MissingPortAttribute,
    UnknownPort,
    DuplicateEdge,
    MultipleSources,
    Syntax,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Graph must be a compgraph document (expected `compgraph` header, found `{found}`).")]
    NotMultigraph { found: String },

    #[error("Graph cannot contain a cycle.")]
    Cycle,

    #[error(
        "Graph nodes must have both 'inputs' and 'outputs' attributes to be displayed. None of the nodes in the provided graph have both 'inputs' and 'outputs' attributes."
    )]
    NoVisualizableNodes,

    #[error("Node '{node}' contains two instances of the same input '{input}'.")]
    DuplicateInput { node: String, input: String },

    #[error("Node '{node}' contains two instances of the same output '{output}'.")]
    DuplicateOutput { node: String, output: String },

    #[error(
        "Edge from '{from}' to '{to}' requires the 'output' attribute, which specifies the output of '{from}' from which the edge originates."
    )]
    MissingOutputAttribute { from: String, to: String },

    #[error(
        "Edge from '{from}' to '{to}' requires the 'input' attribute, which specifies the input of '{to}' at which the edge ends."
    )]
    MissingInputAttribute { from: String, to: String },

    #[error("Edge from '{from}' to '{to}' references output '{output}' of '{from}', which does not exist.")]
    UnknownOutput {
        from: String,
        to: String,
        output: String,
    },

    #[error("Edge from '{from}' to '{to}' references input '{input}' of '{to}', which does not exist.")]
    UnknownInput {
        from: String,
        to: String,
        input: String,
    },

    #[error(
        "Edge from output '{}' of node '{}' to input '{}' of node '{}' exists twice in the graph.",
        .output.as_deref().unwrap_or("None"),
        .from,
        .input,
        .to
    )]
    DuplicateEdge {
        from: String,
        output: Option<String>,
        to: String,
        input: String,
    },

    #[error(
        "Each node input may have at most one source. Two (or more) sources exist for input '{input}' of node '{to}'."
    )]
    MultipleSources { to: String, input: String },

    #[error("syntax error on line {line}: {message}")]
    Syntax { line: usize, message: String },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotMultigraph { .. } => ErrorKind::Type,
            Error::Cycle => ErrorKind::Cycle,
            Error::NoVisualizableNodes => ErrorKind::NoVisualizableNodes,
            Error::DuplicateInput { .. } | Error::DuplicateOutput { .. } => {
                ErrorKind::DuplicateLabel
            }
            Error::MissingOutputAttribute { .. } | Error::MissingInputAttribute { .. } => {
                ErrorKind::MissingPortAttribute
            }
            Error::UnknownOutput { .. } | Error::UnknownInput { .. } => ErrorKind::UnknownPort,
            Error::DuplicateEdge { .. } => ErrorKind::DuplicateEdge,
            Error::MultipleSources { .. } => ErrorKind::MultipleSources,
            Error::Syntax { .. } => ErrorKind::Syntax,
        }
    }
}
