//! Operand stack depth abstraction
//!
//! The guard only needs to know how deep the operand stack is. Hosts with
//! their own stack implement [`StackDepth`]; [`Stack`] is a plain depth
//! counter for hosts and tests that have none.

/// Anything that can report its current operand stack depth
pub trait StackDepth {
    /// Current number of items on the stack
    fn depth(&self) -> usize;
}

/// Operand stack depth with no storage behind it
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stack {
    depth: usize,
}

impl Stack {
    /// Stack holding `depth` items
    pub fn with_depth(depth: usize) -> Self {
        Self { depth }
    }
}

impl StackDepth for Stack {
    fn depth(&self) -> usize {
        self.depth
    }
}

/// Bare depth counter, for hosts that track depth separately from storage
impl StackDepth for usize {
    fn depth(&self) -> usize {
        *self
    }
}
