//! Binomial tree node
//!
//! A [`Node`] is one vertex of a binomial tree. Strong references flow
//! downward (`child`, `sibling`) and a weak reference flows upward
//! (`parent`), so dropping a root tears down its whole subtree without a
//! manual `Drop` impl and without reference cycles.
//!
//! A node's `order` is its live child count. A freshly linked tree of order
//! k holds exactly 2^k nodes, but delete-by-identity and duplicate-tree
//! operations can thin a subtree without touching `order`, so the field is
//! maintained strictly as "current number of children", never as a
//! population guarantee.

use crate::error::HeapError;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Type alias for node reference (strong reference)
pub type NodeRef<T> = Rc<RefCell<Node<T>>>;

/// Type alias for weak node reference (used for parent backlinks)
pub type WeakNodeRef<T> = Weak<RefCell<Node<T>>>;

/// Type alias for optional node reference
pub type NodePtr<T> = Option<NodeRef<T>>;

/// A single vertex of a binomial tree
///
/// Fields are private; the renderer reads the tree shape through the
/// accessors below. Accessor-returned references are transient: any
/// mutating heap operation may reparent, relocate, or free nodes, so
/// observers must re-resolve after every mutation rather than cache
/// `NodeRef`s across calls.
pub struct Node<T> {
    pub(crate) value: T,
    /// Number of direct children
    pub(crate) order: usize,
    /// Parent backlink, `Weak::new()` for roots
    pub(crate) parent: WeakNodeRef<T>,
    /// First child; remaining children hang off its sibling chain.
    /// Children are prepended, so the chain is reverse-chronological
    /// by attachment.
    pub(crate) child: NodePtr<T>,
    /// Next root, or next child of the same parent
    pub(crate) sibling: NodePtr<T>,
}

impl<T> Node<T> {
    /// The value stored at this node
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Number of direct children (the binomial order of the tree this
    /// node heads, for freshly linked trees)
    pub fn order(&self) -> usize {
        self.order
    }

    /// Parent node, or `None` for a root
    pub fn parent(&self) -> NodePtr<T> {
        self.parent.upgrade()
    }

    /// First child, or `None` for a leaf
    pub fn child(&self) -> NodePtr<T> {
        self.child.clone()
    }

    /// Next sibling in the same root list or child list
    pub fn sibling(&self) -> NodePtr<T> {
        self.sibling.clone()
    }
}

impl<T: Ord> Node<T> {
    /// Creates a detached single-node tree of order 0
    pub fn new(value: T) -> NodeRef<T> {
        Rc::new(RefCell::new(Node {
            value,
            order: 0,
            parent: Weak::new(),
            child: None,
            sibling: None,
        }))
    }

    /// Makes `child` the new first child of `parent`
    ///
    /// Precondition: `child.value >= parent.value` and `child` is a
    /// detached root (no parent, no sibling). On a value violation the
    /// attach is refused and `HeapError::AttachViolation` is returned;
    /// the violation is a bug in the calling algorithm, which must sort
    /// operands so the smaller value becomes the parent.
    pub fn attach_child(parent: &NodeRef<T>, child: NodeRef<T>) -> Result<(), HeapError> {
        if child.borrow().value < parent.borrow().value {
            log::warn!("refusing to attach a child smaller than its parent");
            return Err(HeapError::AttachViolation);
        }

        {
            let mut parent_ref = parent.borrow_mut();
            let mut child_ref = child.borrow_mut();
            child_ref.parent = Rc::downgrade(parent);
            child_ref.sibling = parent_ref.child.take();
            drop(child_ref);
            parent_ref.child = Some(child);
            parent_ref.order += 1;
        }

        Ok(())
    }

    /// Pre-order search of the subtree rooted at `node`
    ///
    /// Visits `node` itself, then each child's entire subtree in
    /// child-list order; the first match wins. Among equal-valued
    /// duplicates there is no guarantee beyond "earliest visited".
    pub fn find(node: &NodeRef<T>, value: &T) -> NodePtr<T> {
        if node.borrow().value == *value {
            return Some(Rc::clone(node));
        }

        let mut child = node.borrow().child.clone();
        while let Some(c) = child {
            if let Some(found) = Node::find(&c, value) {
                return Some(found);
            }
            child = c.borrow().sibling.clone();
        }
        None
    }

    /// Number of nodes in the subtree rooted at `node`
    ///
    /// Counted by walking, not derived from `order`: a thinned tree holds
    /// fewer than 2^order nodes.
    pub(crate) fn subtree_count(node: &NodeRef<T>) -> usize {
        let mut count = 1;
        let mut child = node.borrow().child.clone();
        while let Some(c) = child {
            count += Node::subtree_count(&c);
            child = c.borrow().sibling.clone();
        }
        count
    }

    /// Takes this node's value out, consuming the node
    ///
    /// Precondition: `node` is fully detached (no list links into it and
    /// no children). Any surviving external strong reference is a bug in
    /// the caller.
    pub(crate) fn into_value(node: NodeRef<T>) -> T {
        Rc::try_unwrap(node)
            .ok()
            .expect("detached node should have no other strong references")
            .into_inner()
            .value
    }
}

impl<T: Ord + Clone> Node<T> {
    /// Deep-clones the subtree rooted at `node` into a detached tree
    ///
    /// Values and shape are copied; identity is fresh. The clone's root
    /// has no parent and no sibling regardless of where `node` sits.
    pub(crate) fn clone_subtree(node: &NodeRef<T>) -> NodeRef<T> {
        Self::clone_subtree_under(node, None)
    }

    fn clone_subtree_under(node: &NodeRef<T>, parent: Option<&NodeRef<T>>) -> NodeRef<T> {
        let copy = {
            let src = node.borrow();
            Rc::new(RefCell::new(Node {
                value: src.value.clone(),
                order: src.order,
                parent: parent.map_or_else(Weak::new, Rc::downgrade),
                child: None,
                sibling: None,
            }))
        };

        // Clone the child list preserving its order, appending at the tail
        // so the copy's sibling chain mirrors the original's.
        let mut tail: NodePtr<T> = None;
        let mut child = node.borrow().child.clone();
        while let Some(c) = child {
            let c_copy = Self::clone_subtree_under(&c, Some(&copy));
            match &tail {
                None => copy.borrow_mut().child = Some(Rc::clone(&c_copy)),
                Some(t) => t.borrow_mut().sibling = Some(Rc::clone(&c_copy)),
            }
            tail = Some(c_copy);
            child = c.borrow().sibling.clone();
        }

        copy
    }
}
