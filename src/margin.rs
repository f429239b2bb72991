//! Left-margin signal tracking.
//!
//! The margin is a row of columns ("slots") to the left of the diagram. A
//! slot carries a signal vertically from the row where it becomes pending
//! down to the rows that consume it. Slots are reused once freed.

use std::collections::HashMap;

use petgraph::graph::NodeIndex;

/// A logical signal: the node it originates from and, for labelled
/// signals, the output it leaves through.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Source {
    pub node: NodeIndex,
    pub output: Option<String>,
}

impl Source {
    pub fn new(node: NodeIndex, output: Option<&str>) -> Self {
        Self {
            node,
            output: output.map(str::to_string),
        }
    }
}

/// How many not-yet-rendered internal nodes still consume a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subscribers {
    /// No edge references the source.
    Unseen,
    /// Internal consumers remain.
    Pending(usize),
    /// Referenced only by external nodes, or every internal consumer has
    /// been rendered.
    Exhausted,
}

/// Whether a consumed source ends at the consuming row or keeps going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connector {
    Terminal,
    Continuing,
}

impl Connector {
    pub fn glyph(self) -> char {
        match self {
            Connector::Terminal => '└',
            Connector::Continuing => '├',
        }
    }
}

/// Subscriber counts, built in full before rendering starts.
#[derive(Debug, Clone, Default)]
pub struct SubscriberCounts {
    counts: HashMap<Source, usize>,
}

impl SubscriberCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one edge leaving `source`.
    pub fn note_edge(&mut self, source: &Source, feeds_internal: bool) {
        let count = self.counts.entry(source.clone()).or_insert(0);
        if feeds_internal {
            *count += 1;
        }
    }

    pub fn get(&self, source: &Source) -> Subscribers {
        match self.counts.get(source) {
            None => Subscribers::Unseen,
            Some(0) => Subscribers::Exhausted,
            Some(&n) => Subscribers::Pending(n),
        }
    }

    /// Consume one internal subscription and report the remaining state.
    fn decrement(&mut self, source: &Source) -> Subscribers {
        match self.counts.get_mut(source) {
            Some(count) if *count > 0 => {
                *count -= 1;
                if *count == 0 {
                    Subscribers::Exhausted
                } else {
                    Subscribers::Pending(*count)
                }
            }
            Some(_) => Subscribers::Exhausted,
            None => Subscribers::Unseen,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Margin {
    slots: Vec<Option<Source>>,
    index_of: HashMap<Source, usize>,
}

impl Margin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Give an external source its own column. Registering the same source
    /// again is a no-op.
    pub fn register_external_source(&mut self, source: &Source) {
        if self.index_of.contains_key(source) {
            return;
        }
        tracing::debug!(column = self.slots.len(), ?source, "margin: external source");
        self.index_of.insert(source.clone(), self.slots.len());
        self.slots.push(Some(source.clone()));
    }

    pub fn index_of(&self, source: &Source) -> Option<usize> {
        self.index_of.get(source).copied()
    }

    /// Consume `source` once. When its last internal subscriber is consumed
    /// the slot is freed and the connector closes the wire.
    pub fn consume(&mut self, source: &Source, counts: &mut SubscriberCounts) -> Connector {
        match counts.decrement(source) {
            Subscribers::Pending(_) => Connector::Continuing,
            Subscribers::Exhausted | Subscribers::Unseen => {
                if let Some(index) = self.index_of.remove(source) {
                    tracing::debug!(column = index, ?source, "margin: slot freed");
                    self.slots[index] = None;
                }
                Connector::Terminal
            }
        }
    }

    /// Margin text for every slot.
    pub fn render_prefix(&self) -> String {
        self.render_prefix_upto(self.slots.len())
    }

    /// Margin text for the first `upto` slots: `"│ "` for a live slot, two
    /// spaces for a free one.
    pub fn render_prefix_upto(&self, upto: usize) -> String {
        self.slots
            .iter()
            .take(upto)
            .map(|slot| if slot.is_some() { "│ " } else { "  " })
            .collect()
    }

    /// Display width of the full margin.
    pub fn width(&self) -> usize {
        self.slots.len() * 2
    }

    /// Place `source` in the leftmost free slot, or a new one on the right.
    pub fn allocate_or_reuse(&mut self, source: &Source) -> usize {
        let index = match self.slots.iter().position(Option::is_none) {
            Some(index) => {
                self.slots[index] = Some(source.clone());
                index
            }
            None => {
                self.slots.push(Some(source.clone()));
                self.slots.len() - 1
            }
        };
        tracing::debug!(column = index, ?source, "margin: slot allocated");
        self.index_of.insert(source.clone(), index);
        index
    }

    pub fn trim_trailing_empty(&mut self) {
        while matches!(self.slots.last(), Some(None)) {
            self.slots.pop();
        }
    }

    /// Number of slots still carrying a signal.
    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
