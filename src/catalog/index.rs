//! Ordered index over catalog records.
//!
//! An unbalanced binary search tree keyed by title. The tree is a derived
//! view of the catalog: it is grown with [`OrderedIndex::insert_one`] and
//! otherwise thrown away and rebuilt with [`OrderedIndex::rebuild_from`].
//! There is no removal or in-place update of individual nodes.

use crate::core::book::Book;

#[derive(Debug)]
struct Node {
    book: Book,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

impl Node {
    fn leaf(book: Book) -> Self {
        Self {
            book,
            left: None,
            right: None,
        }
    }
}

/// Binary search tree of books ordered by title
///
/// Titles are compared lexicographically; a title that is not strictly less
/// than a node's title (including an equal one) goes to the right subtree.
/// Insertion order determines the shape, so sorted input degenerates into a
/// linked list. All traversals are iterative to tolerate that.
#[derive(Debug, Default)]
pub struct OrderedIndex {
    root: Option<Box<Node>>,
    len: usize,
}

impl OrderedIndex {
    /// Create an empty tree
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one record as a new leaf
    pub fn insert_one(&mut self, book: Book) {
        let mut slot = &mut self.root;
        loop {
            match slot {
                Some(node) => {
                    slot = if book.title < node.book.title {
                        &mut node.left
                    } else {
                        &mut node.right
                    };
                }
                None => {
                    *slot = Some(Box::new(Node::leaf(book)));
                    self.len += 1;
                    return;
                }
            }
        }
    }

    /// Discard the current tree and reinsert every record in iteration order
    pub fn rebuild_from<'a, I>(&mut self, books: I)
    where
        I: IntoIterator<Item = &'a Book>,
    {
        *self = Self::new();
        for book in books {
            self.insert_one(book.clone());
        }
    }

    /// In-order traversal (ascending title)
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self.root.as_deref())
    }

    /// Number of nodes in the tree
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the tree is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the tree (0 when empty, 1 for a single node)
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(&Node, usize)> =
            self.root.as_deref().map(|n| (n, 1)).into_iter().collect();

        while let Some((node, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            if let Some(left) = node.left.as_deref() {
                stack.push((left, depth + 1));
            }
            if let Some(right) = node.right.as_deref() {
                stack.push((right, depth + 1));
            }
        }

        max_depth
    }
}

impl Drop for OrderedIndex {
    fn drop(&mut self) {
        // Unlink nodes one by one; the default recursive drop can overflow
        // the stack on a degenerate tree.
        let mut stack: Vec<Box<Node>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl<'a> IntoIterator for &'a OrderedIndex {
    type Item = &'a Book;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over an [`OrderedIndex`]
pub struct Iter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iter<'a> {
    fn new(root: Option<&'a Node>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left.as_deref();
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Book;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some(&node.book)
    }
}
