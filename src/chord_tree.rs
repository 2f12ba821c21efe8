//! Chord Tree
//!
//! Binary tree of stacked thirds rooted at one note. Each node's children are
//! the notes a minor third and a major third above it, so every root-to-leaf
//! path spells one possible stacked-third chord.

use crate::pitch_class::{Note, NoteError, PitchClass};
use tracing::{debug, instrument};

/// Default depth: a triad.
pub const DEFAULT_DEPTH: usize = 3;

/// Which third a child sits above its parent.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Third {
    /// Three semitones
    Minor,
    /// Four semitones
    Major,
}

/// A node in the stacked-third tree.
///
/// Children come in pairs: either both thirds are present or the node is a leaf.
#[derive(Debug, Clone)]
pub struct ChordNode {
    note: Note,
    children: Option<Box<Children>>,
}

#[derive(Debug, Clone)]
struct Children {
    minor: ChordNode,
    major: ChordNode,
}

impl ChordNode {
    fn grow(note: Note, level: usize, depth: usize) -> ChordNode {
        let children = (level < depth).then(|| {
            Box::new(Children {
                minor: ChordNode::grow(note.minor_third(), level + 1, depth),
                major: ChordNode::grow(note.major_third(), level + 1, depth),
            })
        });
        ChordNode { note, children }
    }

    /// Note at this node.
    pub fn note(&self) -> Note {
        self.note
    }

    /// Pitch class at this node.
    pub fn pitch(&self) -> PitchClass {
        self.note.pitch()
    }

    /// Child a minor third above, absent at a leaf.
    pub fn minor(&self) -> Option<&ChordNode> {
        self.children.as_deref().map(|c| &c.minor)
    }

    /// Child a major third above, absent at a leaf.
    pub fn major(&self) -> Option<&ChordNode> {
        self.children.as_deref().map(|c| &c.major)
    }

    /// Child reached by stacking `third`.
    pub fn child(&self, third: Third) -> Option<&ChordNode> {
        match third {
            Third::Minor => self.minor(),
            Third::Major => self.major(),
        }
    }

    /// Both children in traversal order, minor first.
    pub fn children(&self) -> Option<[&ChordNode; 2]> {
        self.children.as_deref().map(|c| [&c.minor, &c.major])
    }

    /// True when the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

/// Builder for [`ChordTree`] to customize root and depth
pub struct ChordTreeBuilder {
    root: String,
    depth: usize,
}

impl ChordTreeBuilder {
    /// Create a new builder rooted at C with depth 3
    pub fn new() -> Self {
        ChordTreeBuilder {
            root: "C".to_string(),
            depth: DEFAULT_DEPTH,
        }
    }

    /// Set the root note name.
    pub fn root(mut self, name: &str) -> Self {
        self.root = name.to_string();
        self
    }

    /// Set the number of stacking levels.
    pub fn depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Build the tree. Fails only when the root name is not recognized.
    pub fn build(self) -> Result<ChordTree, NoteError> {
        ChordTree::new(&self.root, self.depth)
    }
}

impl Default for ChordTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// An immutable stacked-third tree.
///
/// A tree of depth `d` has `d + 1` levels and `2^d` leaves. Depth 0 is a
/// single leaf.
#[derive(Debug, Clone)]
pub struct ChordTree {
    root: ChordNode,
    depth: usize,
}

impl ChordTree {
    /// Return a builder to customize root and depth
    pub fn builder() -> ChordTreeBuilder {
        ChordTreeBuilder::new()
    }

    /// Build the tree of thirds stacked `depth` times on `root`.
    ///
    /// The root keeps the caller's spelling.
    #[instrument(level = "trace")]
    pub fn new(root: &str, depth: usize) -> Result<ChordTree, NoteError> {
        let note = Note::parse(root)?;
        let tree = ChordTree::from_note(note, depth);
        debug!(root = %note, depth, leaves = tree.leaf_count(), "built chord tree");
        Ok(tree)
    }

    /// Build from an already resolved note.
    pub fn from_note(note: Note, depth: usize) -> ChordTree {
        ChordTree {
            root: ChordNode::grow(note, 0, depth),
            depth,
        }
    }

    /// Root node.
    pub fn root(&self) -> &ChordNode {
        &self.root
    }

    /// Configured depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Tallest branch, in edges. Equal to [`depth`](Self::depth) for a built tree.
    pub fn max_depth(&self) -> usize {
        fn height(node: &ChordNode) -> usize {
            node.children()
                .map(|kids| 1 + kids.iter().map(|k| height(k)).max().unwrap_or(0))
                .unwrap_or(0)
        }
        height(&self.root)
    }

    /// Leaf nodes in traversal order.
    pub fn leaves(&self) -> Vec<&ChordNode> {
        let mut out = Vec::with_capacity(self.leaf_count());
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            match node.children() {
                // push major first so minor is visited first
                Some([minor, major]) => {
                    stack.push(major);
                    stack.push(minor);
                }
                None => out.push(node),
            }
        }
        out
    }

    /// Number of leaves, `2^depth`.
    pub fn leaf_count(&self) -> usize {
        1usize << self.depth.min(usize::BITS as usize - 1)
    }

    /// Every root-to-leaf path in traversal order, each `depth + 1` notes long.
    pub fn paths(&self) -> Vec<Vec<Note>> {
        self.prefixes(self.depth + 1)
    }

    /// Distinct root paths of `len` notes in traversal order.
    ///
    /// `len` is capped at the tree height; `len == 0` yields nothing.
    pub fn prefixes(&self, len: usize) -> Vec<Vec<Note>> {
        fn walk(node: &ChordNode, len: usize, path: &mut Vec<Note>, out: &mut Vec<Vec<Note>>) {
            path.push(node.note());
            match node.children() {
                Some(kids) if path.len() < len => {
                    for kid in kids {
                        walk(kid, len, path, out);
                    }
                }
                _ => out.push(path.clone()),
            }
            path.pop();
        }

        let mut out = Vec::new();
        if len > 0 {
            walk(&self.root, len, &mut Vec::with_capacity(len), &mut out);
        }
        out
    }
}
