//! The decomposition tree produced by the search.
//!
//! Each edge is labelled with the key of the word taken at that step, and
//! every root-to-leaf path spells one decomposition. Dead branches are never
//! stored: a search step with nothing to show returns `None` rather than an
//! empty `Branch`.

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node<K> {
    /// The remainder is fully consumed.
    Terminal,
    /// At least one edge, each leading to a live subtree.
    Branch(Vec<(K, Node<K>)>),
}

impl<K> Node<K> {
    /// Wraps `edges` in a branch, or `None` if there are none.
    pub fn branch(edges: Vec<(K, Node<K>)>) -> Option<Self> {
        if edges.is_empty() {
            None
        } else {
            Some(Node::Branch(edges))
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Node::Terminal)
    }

    pub fn edges(&self) -> &[(K, Node<K>)] {
        match self {
            Node::Terminal => &[],
            Node::Branch(edges) => edges,
        }
    }

    /// Number of root-to-leaf paths.
    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Terminal => 1,
            Node::Branch(edges) => edges.iter().map(|(_, child)| child.leaf_count()).sum(),
        }
    }

    pub fn edge_count(&self) -> usize {
        self.edges()
            .iter()
            .map(|(_, child)| 1 + child.edge_count())
            .sum()
    }

    /// Length of the longest path, in edges.
    pub fn depth(&self) -> usize {
        self.edges()
            .iter()
            .map(|(_, child)| 1 + child.depth())
            .max()
            .unwrap_or(0)
    }
}
