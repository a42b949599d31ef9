//! Tree construction interface for parsers.

use smallvec::SmallVec;

use crate::tree::RawNode;
use crate::{NodeId, SyntaxKind, SyntaxTree, TextRange};

/// Event-style builder: `start_node`/`token`/`finish_node` calls mirror the
/// parser's recognition order, so the resulting children are in document
/// order by construction.
///
/// Unbalanced calls are contract violations and panic.
pub struct TreeBuilder {
    text: String,
    nodes: Vec<RawNode>,
    /// Open composite nodes; per frame we track the last attached child so
    /// sibling links can be patched in O(1).
    stack: SmallVec<[Frame; 16]>,
    root: NodeId,
}

struct Frame {
    node: NodeId,
    last_child: NodeId,
}

/// A builder position recorded by [`TreeBuilder::checkpoint`]. Valid for
/// [`TreeBuilder::start_node_at`] while the frame it was taken in is still
/// the innermost open node.
#[derive(Clone, Copy, Debug)]
pub struct Checkpoint {
    text_pos: u32,
    frame_depth: usize,
    last_child: NodeId,
}

impl TreeBuilder {
    pub fn new() -> TreeBuilder {
        TreeBuilder {
            text: String::new(),
            nodes: Vec::new(),
            stack: SmallVec::new(),
            root: NodeId::NONE,
        }
    }

    fn add_node(&mut self, kind: SyntaxKind, range: TextRange) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(RawNode {
            kind,
            range,
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            next_sibling: NodeId::NONE,
            prev_sibling: NodeId::NONE,
        });
        id
    }

    fn attach(&mut self, child: NodeId) {
        let Some(frame) = self.stack.last_mut() else {
            assert!(self.root.is_none(), "more than one root node");
            self.root = child;
            return;
        };
        let parent = frame.node;
        let prev = frame.last_child;
        frame.last_child = child;

        self.nodes[child.0 as usize].parent = parent;
        if prev.is_none() {
            self.nodes[parent.0 as usize].first_child = child;
        } else {
            self.nodes[prev.0 as usize].next_sibling = child;
            self.nodes[child.0 as usize].prev_sibling = prev;
        }
    }

    /// Open a composite node. Its range starts at the current text position.
    pub fn start_node(&mut self, kind: SyntaxKind) {
        let pos = self.text.len() as u32;
        let node = self.add_node(kind, TextRange::new(pos, pos));
        self.stack.push(Frame {
            node,
            last_child: NodeId::NONE,
        });
    }

    /// Append a leaf token. The builder accumulates the source text, so the
    /// token's range is derived from what has been emitted so far.
    pub fn token(&mut self, kind: SyntaxKind, text: &str) {
        let start = self.text.len() as u32;
        self.text.push_str(text);
        let end = self.text.len() as u32;
        let leaf = self.add_node(kind, TextRange::new(start, end));
        self.attach(leaf);
    }

    /// Record a position so a node started later can adopt everything
    /// attached since. This is how a parser builds left-nested structure
    /// (`a + b + c`) without knowing in advance that a wrapper is coming.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            text_pos: self.text.len() as u32,
            frame_depth: self.stack.len(),
            last_child: self.stack.last().map_or(NodeId::NONE, |f| f.last_child),
        }
    }

    /// Open a composite node at `checkpoint`: children attached to the
    /// current frame since the checkpoint move under the new node. The
    /// checkpoint must have been taken in the currently open frame.
    pub fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        assert_eq!(
            self.stack.len(),
            checkpoint.frame_depth,
            "checkpoint taken in a different frame"
        );
        let frame = self
            .stack
            .last_mut()
            .expect("start_node_at outside any open node");
        let parent = frame.node;

        // Detach the sibling chain attached after the checkpoint.
        let head = if checkpoint.last_child.is_none() {
            let head = self.nodes[parent.0 as usize].first_child;
            self.nodes[parent.0 as usize].first_child = NodeId::NONE;
            head
        } else {
            let head = self.nodes[checkpoint.last_child.0 as usize].next_sibling;
            self.nodes[checkpoint.last_child.0 as usize].next_sibling = NodeId::NONE;
            head
        };
        frame.last_child = checkpoint.last_child;

        let pos = checkpoint.text_pos;
        let node = self.add_node(kind, TextRange::new(pos, pos));

        // Re-parent the chain under the new node.
        let mut tail = NodeId::NONE;
        let mut current = head;
        if current.is_some() {
            self.nodes[current.0 as usize].prev_sibling = NodeId::NONE;
        }
        while current.is_some() {
            self.nodes[current.0 as usize].parent = node;
            tail = current;
            current = self.nodes[current.0 as usize].next_sibling;
        }
        self.nodes[node.0 as usize].first_child = head;

        self.stack.push(Frame {
            node,
            last_child: tail,
        });
    }

    /// Close the innermost open node and attach it to its parent.
    pub fn finish_node(&mut self) {
        let frame = self.stack.pop().expect("finish_node without start_node");
        let end = self.text.len() as u32;
        self.nodes[frame.node.0 as usize].range.end = end;
        self.attach(frame.node);
    }

    pub fn finish(self) -> SyntaxTree {
        assert!(self.stack.is_empty(), "unclosed node at finish");
        assert!(self.root.is_some(), "empty tree");
        SyntaxTree {
            text: self.text,
            nodes: self.nodes,
            root: self.root,
        }
    }
}
