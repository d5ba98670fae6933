// bst-rust/src/tree/bst_tree.rs

use std::cmp::Ordering;
use std::mem;

use log::debug;

use crate::error::{BstError, Result};
use crate::node::Node;

use super::cursor::Cursor;

/// The main binary search tree structure.
///
/// Keys are kept in strict BST order: every node's left subtree holds
/// smaller keys, its right subtree larger ones. The shape is determined
/// purely by insertion order until [`BstTree::balance`] rebuilds it; later
/// inserts perturb the shape again without triggering a rebuild.
#[derive(Debug)]
pub struct BstTree<K, V> {
    pub(crate) root: Option<Box<Node<K, V>>>,
    size: usize,
}

impl<K, V> BstTree<K, V> {
    /// Creates a new, empty tree.
    pub fn new() -> Self {
        BstTree {
            root: None,
            size: 0,
        }
    }

    /// Number of entries currently stored. Maintained incrementally, O(1).
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Height of the tree in edges: the length of the longest path from the
    /// root down to a leaf. A single-node tree has height 0; the empty tree
    /// is defined as -1 so callers can print or compare it without
    /// special-casing emptiness.
    pub fn height(&self) -> i64 {
        Self::subtree_height(self.root.as_deref())
    }

    fn subtree_height(node: Option<&Node<K, V>>) -> i64 {
        match node {
            None => -1,
            Some(n) => {
                1 + Self::subtree_height(n.left.as_deref())
                    .max(Self::subtree_height(n.right.as_deref()))
            }
        }
    }

    /// Returns true when every node's left and right subtree heights differ
    /// by at most one. Holds for a freshly rebalanced tree until further
    /// insertions perturb the shape; the empty tree counts as balanced.
    pub fn is_balanced(&self) -> bool {
        Self::balanced_height(self.root.as_deref()).is_some()
    }

    // Height of the subtree, or None as soon as any node violates the
    // height-difference bound.
    fn balanced_height(node: Option<&Node<K, V>>) -> Option<i64> {
        let Some(n) = node else { return Some(-1) };
        let left = Self::balanced_height(n.left.as_deref())?;
        let right = Self::balanced_height(n.right.as_deref())?;
        if (left - right).abs() > 1 {
            return None;
        }
        Some(1 + left.max(right))
    }

    /// Returns a cursor over all entries in ascending key order.
    ///
    /// The cursor borrows the tree; restart iteration by calling `iter`
    /// again. Mutation while a cursor is live is rejected by the borrow
    /// checker, so a traversal can never observe a restructured graph.
    pub fn iter(&self) -> Cursor<'_, K, V> {
        Cursor::new_at_start(self)
    }

    /// Rebuilds the tree into a minimum-height shape, preserving all
    /// entries and their key order.
    ///
    /// Drains the whole graph in order into a sorted buffer, then rebuilds
    /// by rooting each sub-range at its median (lower middle for
    /// even-length ranges). The entry count is unchanged and the resulting
    /// height is ceil(log2(n + 1)) - 1. O(n) time, O(n) auxiliary space,
    /// O(log n) rebuild recursion depth.
    pub fn balance(&mut self) {
        let mut entries = Vec::with_capacity(self.size);
        Self::drain_in_order(self.root.take(), &mut entries);
        let n = entries.len();
        let mut sorted = entries.into_iter();
        self.root = Self::rebuild(&mut sorted, n);
        debug!("rebalanced {} entries, height now {}", n, self.height());
    }

    // Consumes a node graph, pushing its entries into `out` in ascending
    // key order. Iterative: the graph may be a degenerate O(n)-height
    // chain, which recursion would not survive.
    fn drain_in_order(root: Option<Box<Node<K, V>>>, out: &mut Vec<(K, V)>) {
        let mut stack: Vec<Box<Node<K, V>>> = Vec::new();
        let mut current = root;
        loop {
            while let Some(mut node) = current {
                current = node.left.take();
                stack.push(node);
            }
            match stack.pop() {
                Some(mut boxed) => {
                    current = boxed.right.take();
                    let node = *boxed;
                    out.push((node.key, node.value));
                }
                None => break,
            }
        }
    }

    // Builds a minimum-height subtree holding the next `n` entries of the
    // sorted sequence, consuming it strictly in order: left half first,
    // then the median as the subtree root, then the right half.
    fn rebuild<I>(sorted: &mut I, n: usize) -> Option<Box<Node<K, V>>>
    where
        I: Iterator<Item = (K, V)>,
    {
        if n == 0 {
            return None;
        }
        let left_len = (n - 1) / 2;
        let left = Self::rebuild(sorted, left_len);
        let (key, value) = sorted.next()?;
        let mut node = Box::new(Node::new(key, value));
        node.left = left;
        node.right = Self::rebuild(sorted, n - 1 - left_len);
        Some(node)
    }

    /// Removes every entry, discarding the whole node graph.
    pub fn clear(&mut self) {
        // Tear down iteratively; the default drop glue recurses per node
        // and a degenerate chain would overflow the stack.
        let mut stack = Vec::new();
        if let Some(root) = self.root.take() {
            stack.push(root);
        }
        while let Some(mut node) = stack.pop() {
            if let Some(left) = node.left.take() {
                stack.push(left);
            }
            if let Some(right) = node.right.take() {
                stack.push(right);
            }
        }
        self.size = 0;
    }
}

impl<K: Ord, V> BstTree<K, V> {
    /// Inserts a key-value pair, descending from the root by comparison.
    ///
    /// A duplicate key overwrites the stored value in place (last write
    /// wins) and leaves the entry count unchanged; the previous value is
    /// returned. Inserting a duplicate is never an error.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut current = &mut self.root;
        while let Some(node) = current {
            match key.cmp(&node.key) {
                Ordering::Less => current = &mut node.left,
                Ordering::Greater => current = &mut node.right,
                Ordering::Equal => return Some(mem::replace(&mut node.value, value)),
            }
        }
        *current = Some(Box::new(Node::new(key, value)));
        self.size += 1;
        None
    }

    /// Returns a reference to the value stored under `key`, if any.
    pub fn get(&self, key: &K) -> Option<&V> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match key.cmp(&node.key) {
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Greater => current = node.right.as_deref(),
                Ordering::Equal => return Some(&node.value),
            }
        }
        None
    }

    /// Exact-key lookup. A miss reports [`BstError::KeyNotFound`].
    pub fn find(&self, key: &K) -> Result<&V> {
        self.get(key).ok_or(BstError::KeyNotFound)
    }

    /// Returns true if the tree holds an entry for `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Returns a cursor positioned at `key`, or at the smallest key greater
    /// than it when `key` is absent. Iteration continues in ascending order
    /// to the end of the tree; a start key past the maximum yields nothing.
    pub fn iter_from(&self, key: &K) -> Cursor<'_, K, V> {
        Cursor::new_at_key(self, key)
    }
}

impl<K, V> Default for BstTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Drop for BstTree<K, V> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<'a, K, V> IntoIterator for &'a BstTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Cursor<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
