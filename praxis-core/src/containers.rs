//! Linear containers: a double-ended queue and a stack.
//!
//! Both accept a capacity hint at construction. The hint pre-allocates
//! storage but is not a limit; pushing past it simply grows the container.

use std::collections::VecDeque;

/// A double-ended queue. The front is the oldest element for FIFO use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deque<T> {
    items: VecDeque<T>,
}

impl<T> Deque<T> {
    #[must_use]
    pub fn new() -> Self {
        Self { items: VecDeque::new() }
    }

    /// Creates an empty deque with room for `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { items: VecDeque::with_capacity(capacity) }
    }

    pub fn push_front(&mut self, item: T) {
        self.items.push_front(item);
    }

    pub fn push_back(&mut self, item: T) {
        self.items.push_back(item);
    }

    pub fn pop_front(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    pub fn pop_back(&mut self) -> Option<T> {
        self.items.pop_back()
    }

    #[must_use]
    pub fn front(&self) -> Option<&T> {
        self.items.front()
    }

    #[must_use]
    pub fn back(&self) -> Option<&T> {
        self.items.back()
    }

    /// Returns the element `index` positions from the front.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates front to back.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<T> Default for Deque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for Deque<T> {
    /// Collects in order, so the first item ends up at the front.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self { items: iter.into_iter().collect() }
    }
}

/// A LIFO stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stack<T> {
    // Top of the stack is the last element.
    items: Vec<T>,
}

impl<T> Stack<T> {
    #[must_use]
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Creates an empty stack with room for `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { items: Vec::with_capacity(capacity) }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    /// Returns the element `depth` positions below the top (`0` is the top).
    #[must_use]
    pub fn get_from_top(&self, depth: usize) -> Option<&T> {
        let index = self.items.len().checked_sub(depth + 1)?;
        self.items.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates top to bottom.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter().rev()
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for Stack<T> {
    /// Pushes in order, so the last item ends up on top.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self { items: iter.into_iter().collect() }
    }
}
