//! Text rendering of a validated computational graph.
//!
//! Internal nodes are drawn as boxes, one after another in topological
//! order. Each box row pairs one input (left) with one output (right).
//! Signals that must travel between boxes run down the left margin; an
//! output consumed by a later box is routed from the box's right edge back
//! into a margin column by an elbow line drawn under the box.

use petgraph::graph::NodeIndex;

use crate::display_width::{display_width, max_width};
use crate::error::Result;
use crate::graph::CompGraph;
use crate::margin::{Margin, Source, SubscriberCounts, Subscribers};
use crate::validate::{ValidatedGraph, validate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Draw `╭╮╯╰` instead of `┌┐┘└`.
    pub rounded_corners: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            rounded_corners: true,
        }
    }
}

pub fn render_graph(graph: &CompGraph, options: &RenderOptions) -> Result<String> {
    let validated = validate(graph)?;
    let order = graph.topological_order()?;

    let mut renderer = Renderer::new(graph, &validated);
    for idx in order {
        renderer.render_node(idx);
    }
    let output = renderer.lines.join("\n");

    if options.rounded_corners {
        Ok(round_corners(&output))
    } else {
        Ok(output)
    }
}

/// Swap square corners for rounded ones. Every other character is kept.
pub fn round_corners(text: &str) -> String {
    text.chars()
        .map(|ch| match ch {
            '┌' => '╭',
            '┐' => '╮',
            '┘' => '╯',
            '└' => '╰',
            other => other,
        })
        .collect()
}

struct Renderer<'g> {
    graph: &'g CompGraph,
    validated: &'g ValidatedGraph,
    margin: Margin,
    counts: SubscriberCounts,
    lines: Vec<String>,
}

impl<'g> Renderer<'g> {
    /// Count subscribers for every source and give external sources that
    /// feed a box their margin column.
    fn new(graph: &'g CompGraph, validated: &'g ValidatedGraph) -> Self {
        let mut margin = Margin::new();
        let mut counts = SubscriberCounts::new();

        for (from, to, connection) in graph.edges() {
            let source = Source::new(from, connection.output.as_deref());
            let feeds_internal = graph.node(to).is_internal();
            if feeds_internal && !graph.node(from).is_internal() {
                margin.register_external_source(&source);
            }
            counts.note_edge(&source, feeds_internal);
        }

        Self {
            graph,
            validated,
            margin,
            counts,
            lines: Vec::new(),
        }
    }

    fn render_node(&mut self, idx: NodeIndex) {
        let graph = self.graph;
        let data = graph.node(idx);
        let (Some(inputs), Some(outputs)) = (&data.inputs, &data.outputs) else {
            return;
        };

        let name_width = display_width(&data.label);
        let ports_width = match (max_width(inputs), max_width(outputs)) {
            (Some(i), Some(o)) => i + o + 2,
            (Some(i), None) => i,
            (None, Some(o)) => o,
            (None, None) => 0,
        };
        let mut width = name_width.max(ports_width);
        if width % 2 != name_width % 2 {
            width += 1;
        }
        let rows = inputs.len().max(outputs.len());
        tracing::debug!(node = %data.id, width, rows, margin = self.margin.len(), "render: node");

        let prefix = self.margin.render_prefix();
        let rule = "─".repeat(width + 4);
        let pad = " ".repeat((width - name_width) / 2);
        self.lines.push(format!("{prefix}┌{rule}┐"));
        self.lines.push(format!("{prefix}│  {pad}{}{pad}  │", data.label));
        self.lines.push(format!("{prefix}├{rule}┤"));

        let mut routed: Vec<&str> = Vec::new();
        for row in 0..rows {
            let input = inputs.get(row).map(String::as_str);
            let output = outputs.get(row).map(String::as_str);
            let used = input.map_or(0, display_width) + output.map_or(0, display_width);
            let gap = " ".repeat(width.saturating_sub(used));

            let (indent, input_cell) = self.input_cell(idx, input);
            let output_cell = self.output_cell(idx, output, &mut routed);
            self.lines.push(format!("{indent}{input_cell}{gap}{output_cell}"));
        }

        let prefix = self.margin.render_prefix();
        self.lines
            .push(format!("{prefix}└{rule}┘ {}", "│ ".repeat(routed.len())));

        self.route_elbows(idx, width, &routed);
        self.margin.trim_trailing_empty();
    }

    /// Margin indent and input text for one row. `None` means the box has
    /// fewer inputs than outputs and this row has no input.
    fn input_cell(&mut self, idx: NodeIndex, input: Option<&str>) -> (String, String) {
        let Some(input) = input else {
            return (self.margin.render_prefix(), "│  ".to_string());
        };

        let validated = self.validated;
        let Some(source) = validated.source_of(idx, input) else {
            return (self.margin.render_prefix(), format!("│─ {input}"));
        };
        let Some(column) = self.margin.index_of(source) else {
            tracing::warn!(?source, input, "render: bound input has no margin column");
            return (self.margin.render_prefix(), format!("│─ {input}"));
        };

        let connector = self.margin.consume(source, &mut self.counts);
        let run = self.margin.width() - column * 2 - 1;
        let indent = format!(
            "{}{}{}",
            self.margin.render_prefix_upto(column),
            connector.glyph(),
            "─".repeat(run)
        );
        (indent, format!("┼→ {input}"))
    }

    /// Output text for one row. Outputs consumed by later boxes are pushed
    /// onto `routed` so they get an elbow below the box.
    fn output_cell<'a>(
        &self,
        idx: NodeIndex,
        output: Option<&'a str>,
        routed: &mut Vec<&'a str>,
    ) -> String {
        let Some(output) = output else {
            return format!("  │{}", " │".repeat(routed.len()));
        };

        match self.counts.get(&Source::new(idx, Some(output))) {
            Subscribers::Unseen => format!("{output} ─│{}", " │".repeat(routed.len())),
            Subscribers::Exhausted => format!("{output} ─┼{}→", "─".repeat(routed.len() * 2)),
            Subscribers::Pending(_) => {
                let run = "─".repeat(routed.len() * 2 + 1);
                routed.push(output);
                format!("{output} ─┼{run}┐")
            }
        }
    }

    /// Carry each routed output from the box's right edge into a margin
    /// column. Later elbows sit two columns further right so they stack.
    fn route_elbows(&mut self, idx: NodeIndex, width: usize, routed: &[&str]) {
        let left = self.margin.width();
        for (i, &output) in routed.iter().enumerate() {
            let source = Source::new(idx, Some(output));
            let column = self.margin.allocate_or_reuse(&source);
            let run = (left + width + 6 + i * 2).saturating_sub(column * 2);
            self.lines.push(format!(
                "{}┌{}┘{}",
                self.margin.render_prefix_upto(column),
                "─".repeat(run),
                " │".repeat(routed.len() - i - 1)
            ));
        }
    }
}
