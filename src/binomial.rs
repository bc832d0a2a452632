//! Mergeable binomial heap over a linked root list
//!
//! The heap is a forest of binomial trees whose roots form a singly linked
//! list sorted ascending by order, with at most one root per order. That
//! invariant mirrors the binary representation of the element count, and
//! `union` restores it after every structural change with a merge-sort
//! style list merge followed by carry-like coalescing of equal-order roots.
//!
//! Operations are value-keyed: `decrease_key`, `delete_key` and `find_key`
//! locate their target by searching the forest for the given value, since
//! the consuming renderer addresses nodes by what they display rather than
//! by retained handles.
//!
//! # Algorithm Overview
//!
//! - **Insert**: O(log n) worst - union a single-node tree into the root
//!   list (like adding 1 in binary)
//! - **Extract-min**: O(log n) worst - unlink the minimum root, reverse its
//!   child list into a valid root list, union it back
//! - **Decrease-key**: O(n) find, then bubble the value up by swapping
//!   values (no re-linking)
//! - **Delete-key**: cut the node out by identity, union its children back
//! - **Union**: O(log n) worst - merge root lists by order, then coalesce
//!   equal-order roots (carry propagation)
//!
//! The `order` field of a node is its live child count, not a verified
//! 2^order population: `delete_key` on an interior node and
//! `duplicate_root_tree` can thin or unbalance trees without rebuilding
//! them, so classical O(log n) height is the expected case rather than a
//! hard guarantee. Root-list order uniqueness still holds at every
//! quiescent point.

use crate::error::HeapError;
use crate::node::{Node, NodePtr, NodeRef};
use std::fmt;
use std::mem;
use std::rc::{Rc, Weak};

/// Binomial heap with value-keyed operations
///
/// # Example
///
/// ```rust
/// use binomial_forest::BinomialHeap;
///
/// let mut heap = BinomialHeap::new();
/// heap.insert(5);
/// heap.insert(2);
/// heap.insert(8);
/// assert_eq!(heap.get_min(), Ok(2));
/// assert_eq!(heap.extract_min(), Ok(2));
/// assert_eq!(heap.size(), 2);
/// ```
pub struct BinomialHeap<T: Ord> {
    /// First root, or `None` if empty
    head: NodePtr<T>,
    /// Number of elements in the heap
    ///
    /// Maintained explicitly rather than summed as 2^order over the roots:
    /// the identity-based `delete_key` can leave a tree with fewer than
    /// 2^order nodes, so the binary-representation reading of the forest is
    /// exact only while every tree is complete.
    len: usize,
}

// No manual Drop needed - Rc handles cleanup automatically when strong refs go to 0

impl<T: Ord> BinomialHeap<T> {
    /// Creates a new empty heap
    pub fn new() -> Self {
        Self { head: None, len: 0 }
    }

    /// Returns true if the heap is empty
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// The first root of the forest, or `None` if the heap is empty
    ///
    /// Entry point for observers walking the tree shape. References
    /// obtained through it are transient: drop them before the next
    /// mutating call.
    pub fn head(&self) -> NodePtr<T> {
        self.head.clone()
    }

    /// Lazy forward traversal of the root list
    pub fn roots(&self) -> Roots<T> {
        Roots {
            next: self.head.clone(),
        }
    }

    /// Number of elements in the heap
    ///
    /// While every tree is complete this equals the sum of 2^order over
    /// the roots, the forest read as a binary number with one root of
    /// order k per set bit k.
    pub fn size(&self) -> usize {
        self.len
    }

    /// Inserts a new value into the heap
    ///
    /// **Time Complexity**: O(log n) worst-case - the union may cascade a
    /// carry through every occupied order, exactly like incrementing a
    /// binary counter.
    pub fn insert(&mut self, value: T) {
        let node = Node::new(value);
        self.head = union_roots(Some(node), self.head.take());
        self.len += 1;
    }

    /// Removes and returns the minimum value
    ///
    /// **Time Complexity**: O(log n) worst-case
    ///
    /// Scans the root list tracking the minimum root and its predecessor,
    /// unlinks the minimum, reverses its child list in place (turning the
    /// LIFO child order into ascending order, which is what `union`
    /// expects of a root list) and unions the children back in. Only the
    /// removed root's record is freed; its value is returned.
    pub fn extract_min(&mut self) -> Result<T, HeapError> {
        let (min, min_prev) = {
            let head = self.head.clone().ok_or(HeapError::EmptyHeap)?;
            let mut min = Rc::clone(&head);
            let mut min_prev: NodePtr<T> = None;
            let mut prev = head;
            let mut curr = prev.borrow().sibling.clone();
            while let Some(c) = curr {
                if c.borrow().value < min.borrow().value {
                    min = Rc::clone(&c);
                    min_prev = Some(Rc::clone(&prev));
                }
                let next = c.borrow().sibling.clone();
                prev = c;
                curr = next;
            }
            (min, min_prev)
        };

        // Unlink the minimum root from the root list
        let after = min.borrow_mut().sibling.take();
        match min_prev {
            Some(p) => p.borrow_mut().sibling = after,
            None => self.head = after,
        }

        let children = reversed_children(&min);
        self.head = union_roots(self.head.take(), children);
        self.len -= 1;
        Ok(Node::into_value(min))
    }

    /// Decreases the value stored under `value` to `new_value`
    ///
    /// The new value is written in place, then bubbled up by swapping
    /// *values* with the parent while the heap order is violated. Node
    /// identity stays put; only values migrate. An observer holding a node
    /// reference across this call may therefore see a different value at
    /// the same structural position, which is why observers re-resolve by
    /// value after every mutation.
    ///
    /// # Errors
    ///
    /// `KeyNotFound` if `value` is absent; `NotDecreased` if `new_value`
    /// is not strictly less than the value currently stored.
    pub fn decrease_key(&mut self, value: &T, new_value: T) -> Result<(), HeapError> {
        let node = self.find_key(value).ok_or(HeapError::KeyNotFound)?;
        if new_value >= node.borrow().value {
            return Err(HeapError::NotDecreased);
        }
        node.borrow_mut().value = new_value;
        sift_up(node);
        Ok(())
    }

    /// Removes the first occurrence of `value` and returns it
    ///
    /// The target is cut out by identity: it is unlinked from its parent's
    /// child list (decrementing the parent's order) or from the root list,
    /// its children are reversed into a root list and unioned back, and
    /// the freed node's value is returned. No sentinel "smaller than the
    /// minimum" value is ever synthesized, so this works for any ordered
    /// type, including ones with no predecessor operation.
    pub fn delete_key(&mut self, value: &T) -> Result<T, HeapError> {
        let node = self.find_key(value).ok_or(HeapError::KeyNotFound)?;

        let parent = node.borrow().parent.upgrade();
        match parent {
            Some(parent) => unlink_child(&parent, &node),
            None => self.unlink_root(&node),
        }

        let children = reversed_children(&node);
        self.head = union_roots(self.head.take(), children);
        self.len -= 1;
        Ok(Node::into_value(node))
    }

    /// Searches the whole forest for `value`
    ///
    /// Scans each root in list order and delegates to the pre-order
    /// subtree search; the first match wins. O(n) worst case. Also serves
    /// as the existence check.
    pub fn find_key(&self, value: &T) -> NodePtr<T> {
        self.roots().find_map(|root| Node::find(&root, value))
    }

    /// Merges `other`'s entire forest into `self`, leaving `other` empty
    ///
    /// **Time Complexity**: O(log n) worst-case
    ///
    /// Ownership of every node in `other` transfers to `self`; `other`
    /// remains a valid empty heap. When both heaps hold a root of the same
    /// order, coalescing links them with the smaller-valued root on top,
    /// carrying the result upward like binary addition.
    pub fn union(&mut self, other: &mut Self) {
        self.head = union_roots(self.head.take(), other.head.take());
        self.len += mem::take(&mut other.len);
    }

    /// Drops every node and resets the heap to empty
    ///
    /// Owned links cascade, so releasing the head releases the whole
    /// forest. Calling this on an already-empty heap is a no-op.
    pub fn clear(&mut self) {
        if self.head.is_none() {
            log::debug!("clear requested on an already-empty heap");
            return;
        }
        self.head = None;
        self.len = 0;
        log::debug!("heap cleared");
    }

    /// Cuts `node` out of the root list, fixing the predecessor or `head`
    fn unlink_root(&mut self, node: &NodeRef<T>) {
        let after = node.borrow_mut().sibling.take();
        let head = self
            .head
            .clone()
            .expect("root list must contain the node being cut");
        if Rc::ptr_eq(&head, node) {
            self.head = after;
            return;
        }
        let mut prev = head;
        loop {
            let next = prev
                .borrow()
                .sibling
                .clone()
                .expect("root list must contain the node being cut");
            if Rc::ptr_eq(&next, node) {
                prev.borrow_mut().sibling = after;
                return;
            }
            prev = next;
        }
    }
}

impl<T: Ord + Clone> BinomialHeap<T> {
    /// Returns the minimum value without removing it
    ///
    /// Linear scan of the root list; the first occurrence wins ties.
    /// O(#roots) = O(log n).
    pub fn get_min(&self) -> Result<T, HeapError> {
        let head = self.head.as_ref().ok_or(HeapError::EmptyHeap)?;
        let mut min = Rc::clone(head);
        let mut curr = head.borrow().sibling.clone();
        while let Some(c) = curr {
            if c.borrow().value < min.borrow().value {
                min = Rc::clone(&c);
            }
            let next = c.borrow().sibling.clone();
            curr = next;
        }
        let value = min.borrow().value.clone();
        Ok(value)
    }

    /// Deep-clones the root tree whose root holds `value` and unions the
    /// copy back into the heap
    ///
    /// Only roots are candidates; a matching value buried inside a tree
    /// does not count. The copy shares values and shape but no identity
    /// with the original, and the following union coalesces the two
    /// equal-order trees into one of the next order.
    pub fn duplicate_root_tree(&mut self, value: &T) -> Result<(), HeapError> {
        let target = self
            .roots()
            .find(|root| root.borrow().value == *value)
            .ok_or(HeapError::KeyNotFound)?;
        let copy = Node::clone_subtree(&target);
        self.len += Node::subtree_count(&copy);
        self.head = union_roots(self.head.take(), Some(copy));
        Ok(())
    }
}

impl<T: Ord> Default for BinomialHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Deep copy: clones every root subtree into a fresh forest with the same
/// values and shape but disjoint node identity.
impl<T: Ord + Clone> Clone for BinomialHeap<T> {
    fn clone(&self) -> Self {
        let mut head: NodePtr<T> = None;
        let mut tail: NodePtr<T> = None;
        for root in self.roots() {
            let copy = Node::clone_subtree(&root);
            match &tail {
                None => head = Some(Rc::clone(&copy)),
                Some(t) => t.borrow_mut().sibling = Some(Rc::clone(&copy)),
            }
            tail = Some(copy);
        }
        Self {
            head,
            len: self.len,
        }
    }
}

/// Renders the forest as one indented block per root, headed by its order
impl<T: Ord + fmt::Debug> fmt::Debug for BinomialHeap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.head.is_none() {
            return write!(f, "BinomialHeap(empty)");
        }
        for root in self.roots() {
            writeln!(f, "B{}", root.borrow().order)?;
            fmt_subtree(f, &root, 1)?;
        }
        Ok(())
    }
}

fn fmt_subtree<T: Ord + fmt::Debug>(
    f: &mut fmt::Formatter<'_>,
    node: &NodeRef<T>,
    depth: usize,
) -> fmt::Result {
    writeln!(f, "{:indent$}{:?}", "", node.borrow().value, indent = depth * 2)?;
    let mut child = node.borrow().child.clone();
    while let Some(c) = child {
        fmt_subtree(f, &c, depth + 1)?;
        child = c.borrow().sibling.clone();
    }
    Ok(())
}

/// Iterator over the root list, front to back
pub struct Roots<T> {
    next: NodePtr<T>,
}

impl<T> Iterator for Roots<T> {
    type Item = NodeRef<T>;

    fn next(&mut self) -> Option<NodeRef<T>> {
        let node = self.next.take()?;
        self.next = node.borrow().sibling.clone();
        Some(node)
    }
}

/// Stable merge of two root lists keyed by ascending order
///
/// Like the merge step of merge-sort: when orders tie, the first list's
/// node comes first. The output may hold equal-order runs; `union_roots`
/// coalesces them afterwards.
fn merge_roots<T: Ord>(mut a: NodePtr<T>, mut b: NodePtr<T>) -> NodePtr<T> {
    let head = match (a.clone(), b.clone()) {
        (None, _) => return b,
        (_, None) => return a,
        (Some(x), Some(y)) => {
            if x.borrow().order <= y.borrow().order {
                a = x.borrow_mut().sibling.take();
                x
            } else {
                b = y.borrow_mut().sibling.take();
                y
            }
        }
    };

    let mut tail = Rc::clone(&head);
    while let (Some(x), Some(y)) = (a.clone(), b.clone()) {
        let next = if x.borrow().order <= y.borrow().order {
            a = x.borrow_mut().sibling.take();
            x
        } else {
            b = y.borrow_mut().sibling.take();
            y
        };
        tail.borrow_mut().sibling = Some(Rc::clone(&next));
        tail = next;
    }
    tail.borrow_mut().sibling = a.or(b);
    Some(head)
}

/// Merges two root lists and coalesces equal-order roots
///
/// Walks the merged list with a prev/curr/next cursor. A link is deferred
/// when three consecutive roots share an order (only the latter two may
/// link, on the next step), so at most one link happens per order per
/// pass - the carry semantics of binary addition. When two roots link,
/// the smaller value survives as the root; `curr` survives value ties.
/// The result has strictly increasing, pairwise-distinct orders.
fn union_roots<T: Ord>(a: NodePtr<T>, b: NodePtr<T>) -> NodePtr<T> {
    let mut head = match merge_roots(a, b) {
        Some(h) => h,
        None => return None,
    };

    let mut prev: NodePtr<T> = None;
    let mut curr = Rc::clone(&head);
    loop {
        let next = match curr.borrow().sibling.clone() {
            Some(n) => n,
            None => break,
        };
        let curr_order = curr.borrow().order;
        let next_order = next.borrow().order;
        let third_shares_order = next
            .borrow()
            .sibling
            .as_ref()
            .map_or(false, |after| after.borrow().order == next_order);

        if curr_order != next_order || third_shares_order {
            prev = Some(Rc::clone(&curr));
            curr = next;
        } else if curr.borrow().value <= next.borrow().value {
            // curr stays root: splice next out, hang it under curr,
            // then re-evaluate the same curr against its new sibling
            let after = next.borrow_mut().sibling.take();
            curr.borrow_mut().sibling = after;
            Node::attach_child(&curr, next).expect("link keeps the smaller value as the root");
        } else {
            // next becomes the root in curr's place
            curr.borrow_mut().sibling = None;
            match &prev {
                Some(p) => p.borrow_mut().sibling = Some(Rc::clone(&next)),
                None => head = Rc::clone(&next),
            }
            Node::attach_child(&next, curr).expect("link keeps the smaller value as the root");
            curr = next;
        }
    }
    Some(head)
}

/// Detaches `node`'s child list, reversed, with parent links cleared
///
/// Children are prepended on attach, so reversing the list yields
/// ascending order - a ready-made root list for `union_roots`.
fn reversed_children<T: Ord>(node: &NodeRef<T>) -> NodePtr<T> {
    let mut reversed: NodePtr<T> = None;
    let mut child = node.borrow_mut().child.take();
    while let Some(c) = child {
        let next = {
            let mut c_ref = c.borrow_mut();
            let n = c_ref.sibling.take();
            c_ref.sibling = reversed.take();
            c_ref.parent = Weak::new();
            n
        };
        reversed = Some(c);
        child = next;
    }
    reversed
}

/// Bubbles a too-small value toward the root by swapping with the parent
///
/// Values migrate; node identity and tree shape stay fixed.
fn sift_up<T: Ord>(node: NodeRef<T>) {
    let mut current = node;
    loop {
        let parent = match current.borrow().parent.upgrade() {
            Some(p) => p,
            None => break, // Reached a root
        };

        let out_of_order = current.borrow().value < parent.borrow().value;
        if !out_of_order {
            break;
        }

        {
            let mut current_ref = current.borrow_mut();
            let mut parent_ref = parent.borrow_mut();
            mem::swap(&mut current_ref.value, &mut parent_ref.value);
        }
        current = parent;
    }
}

/// Cuts `node` out of `parent`'s child list and drops the back-reference
///
/// The parent's order drops by one; its subtree population is no longer
/// 2^order, which the order-as-child-count convention permits.
fn unlink_child<T: Ord>(parent: &NodeRef<T>, node: &NodeRef<T>) {
    let after = node.borrow_mut().sibling.take();
    let first = parent
        .borrow()
        .child
        .clone()
        .expect("parent of a live child must have a child list");

    if Rc::ptr_eq(&first, node) {
        parent.borrow_mut().child = after;
    } else {
        let mut prev = first;
        loop {
            let next = prev
                .borrow()
                .sibling
                .clone()
                .expect("child list must contain the node being cut");
            if Rc::ptr_eq(&next, node) {
                prev.borrow_mut().sibling = after;
                break;
            }
            prev = next;
        }
    }

    parent.borrow_mut().order -= 1;
    node.borrow_mut().parent = Weak::new();
}
