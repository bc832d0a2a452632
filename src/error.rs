//! Error type for heap operations

use std::fmt;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// The heap has no elements to inspect or remove
    EmptyHeap,
    /// The requested value is not present in the heap
    KeyNotFound,
    /// The new value is not strictly less than the current value
    NotDecreased,
    /// A child with a value smaller than its prospective parent's was about
    /// to be attached. This signals a bug in a calling algorithm, not bad
    /// user input: link sites must pre-sort operands so the smaller value
    /// becomes the parent.
    AttachViolation,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::EmptyHeap => write!(f, "heap is empty"),
            HeapError::KeyNotFound => write!(f, "value not found in heap"),
            HeapError::NotDecreased => {
                write!(f, "new value is not less than current value")
            }
            HeapError::AttachViolation => {
                write!(f, "attempted to attach a child smaller than its parent")
            }
        }
    }
}

impl std::error::Error for HeapError {}
