//! Search and removal operations over queues and stacks of [`Car`]s.
//!
//! Every operation drains the primary container into an auxiliary one while
//! applying its predicate, then restores the original order. An empty
//! container or a blank search key is a no-op: nothing is removed and the
//! result is `None` or empty. Matching is case-insensitive.
//!
//! # Complexity
//! All operations are O(n) in the container length.

use crate::car::Car;
use crate::containers::{Deque, Stack};

/// Removes and returns the first car (front to back) whose plate matches.
///
/// All other cars stay in their original order. Returns `None` if no car
/// matches.
pub fn delete_first_match(queue: &mut Deque<Car>, plate: &str) -> Option<Car> {
    if queue.is_empty() || plate.trim().is_empty() {
        return None;
    }

    let mut kept = Deque::with_capacity(queue.len());
    let mut found = None;
    while let Some(car) = queue.pop_front() {
        if found.is_none() && car.has_plate(plate) {
            found = Some(car);
        } else {
            kept.push_back(car);
        }
    }
    *queue = kept;
    found
}

/// Returns every car whose model matches, in front-to-back order.
///
/// The queue is left exactly as it was.
pub fn select_all_by_model<'a>(queue: &'a mut Deque<Car>, model: &str) -> Vec<&'a Car> {
    if queue.is_empty() || model.trim().is_empty() {
        return Vec::new();
    }

    let mut restored = Deque::with_capacity(queue.len());
    let mut hits = Vec::new();
    for (index, car) in std::iter::from_fn(|| queue.pop_front()).enumerate() {
        if car.has_model(model) {
            hits.push(index);
        }
        restored.push_back(car);
    }
    *queue = restored;

    let queue: &'a Deque<Car> = queue;
    hits.into_iter().filter_map(|i| queue.get(i)).collect()
}

/// Finds the topmost car whose plate matches without removing anything.
///
/// Cars are popped until a match is found, then pushed back, so the stack
/// keeps its size and top-to-bottom order whatever the outcome.
pub fn peek_by_plate<'a>(stack: &'a mut Stack<Car>, plate: &str) -> Option<&'a Car> {
    if stack.is_empty() || plate.trim().is_empty() {
        return None;
    }

    let mut aside = Stack::with_capacity(stack.len());
    let mut depth = None;
    while let Some(car) = stack.pop() {
        let hit = car.has_plate(plate);
        aside.push(car);
        if hit {
            depth = Some(aside.len() - 1);
            break;
        }
    }
    while let Some(car) = aside.pop() {
        stack.push(car);
    }

    let stack: &'a Stack<Car> = stack;
    depth.and_then(|d| stack.get_from_top(d))
}

/// Discards every car whose owner matches.
///
/// Retained cars keep their relative order: the two stack inversions
/// (pop into the auxiliary stack, pop back) cancel out.
pub fn remove_all_by_owner(stack: &mut Stack<Car>, owner: &str) {
    if stack.is_empty() || owner.trim().is_empty() {
        return;
    }

    let mut aside = Stack::with_capacity(stack.len());
    while let Some(car) = stack.pop() {
        if !car.has_owner(owner) {
            aside.push(car);
        }
    }
    while let Some(car) = aside.pop() {
        stack.push(car);
    }
}
