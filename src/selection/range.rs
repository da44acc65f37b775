//! Host selection-range abstraction.
//!
//! The host UI's text-selection primitive reports a range as a pair of
//! anchors, each a node reference plus an intra-node offset. Here a node is
//! either a layout box or the box's text node; this mirrors the host's
//! element/text distinction without coupling to a concrete UI tree.

/// Node a selection anchor points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorNode {
    /// The layout box element itself; the offset is a child index, so the
    /// boundary falls either before (0) or after (>0) the box's text.
    Box {
        /// Index of the box in the page's materialized sequence
        box_index: usize,
    },
    /// The box's text node; the offset counts characters into the text.
    Text {
        /// Index of the box in the page's materialized sequence
        box_index: usize,
    },
}

impl AnchorNode {
    /// The layout box this node belongs to.
    pub fn box_index(&self) -> usize {
        match *self {
            AnchorNode::Box { box_index } | AnchorNode::Text { box_index } => box_index,
        }
    }
}

/// One boundary of a selection range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionAnchor {
    /// Node the boundary sits in
    pub node: AnchorNode,
    /// Offset within the node (characters for text nodes, child index for
    /// box nodes)
    pub offset: usize,
}

impl SelectionAnchor {
    /// Anchor inside a box's text node at a character offset.
    pub fn text(box_index: usize, offset: usize) -> Self {
        Self {
            node: AnchorNode::Text { box_index },
            offset,
        }
    }

    /// Anchor on the box element itself.
    pub fn on_box(box_index: usize, offset: usize) -> Self {
        Self {
            node: AnchorNode::Box { box_index },
            offset,
        }
    }
}

/// A selection range between two anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRange {
    /// Boundary where the selection starts
    pub start: SelectionAnchor,
    /// Boundary where the selection ends
    pub end: SelectionAnchor,
}

impl SelectionRange {
    /// Create a range between two anchors.
    pub fn new(start: SelectionAnchor, end: SelectionAnchor) -> Self {
        Self { start, end }
    }

    /// Whether the range collapses to a single point.
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// First box index touched by the range.
    pub fn first_box(&self) -> usize {
        self.start.node.box_index().min(self.end.node.box_index())
    }

    /// Last box index touched by the range.
    pub fn last_box(&self) -> usize {
        self.start.node.box_index().max(self.end.node.box_index())
    }

    /// Whether the range touches the given box.
    pub fn intersects_box(&self, box_index: usize) -> bool {
        box_index >= self.first_box() && box_index <= self.last_box()
    }

    /// The range with anchors ordered so `start` precedes `end` in box
    /// order. Hosts normally report forward ranges; backward drags are
    /// normalized here.
    pub fn normalized(self) -> Self {
        let start_box = self.start.node.box_index();
        let end_box = self.end.node.box_index();
        let backwards = start_box > end_box
            || (start_box == end_box && self.start.offset > self.end.offset);
        if backwards {
            Self {
                start: self.end,
                end: self.start,
            }
        } else {
            self
        }
    }
}
