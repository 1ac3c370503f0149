//! Component Registry - index allocation for the cell arrays.
//!
//! The field and each of its slots occupy one index in the parallel cell
//! arrays. The registry manages that lifecycle:
//! - ID ↔ index bidirectional mapping
//! - Free index pool for O(1) reuse
//! - ReactiveSet for the allocated set (deriveds react to add/remove)
//! - Parent context stack so slots created inside a field pick up their
//!   parent link automatically

use spark_signals::ReactiveSet;
use std::cell::RefCell;
use std::collections::HashMap;

use super::cells;

// =============================================================================
// Registry State
// =============================================================================

thread_local! {
    /// Map component ID to array index.
    static ID_TO_INDEX: RefCell<HashMap<String, usize>> = RefCell::new(HashMap::new());

    /// Map array index to component ID.
    static INDEX_TO_ID: RefCell<HashMap<usize, String>> = RefCell::new(HashMap::new());

    /// Set of currently allocated indices (for iteration).
    static ALLOCATED_INDICES: ReactiveSet<usize> = ReactiveSet::new();

    /// Pool of freed indices for reuse.
    static FREE_INDICES: RefCell<Vec<usize>> = RefCell::new(Vec::new());

    /// Next index to allocate if pool is empty.
    static NEXT_INDEX: RefCell<usize> = const { RefCell::new(0) };

    /// Counter for generating unique IDs.
    static ID_COUNTER: RefCell<usize> = const { RefCell::new(0) };

    /// Stack of parent indices for nested component creation.
    static PARENT_STACK: RefCell<Vec<usize>> = RefCell::new(Vec::new());

    /// Destroy callbacks registered per index.
    static DESTROY_CALLBACKS: RefCell<HashMap<usize, Vec<Box<dyn FnOnce()>>>> = RefCell::new(HashMap::new());
}

// =============================================================================
// Parent Context Stack
// =============================================================================

/// Get current parent index (None at root).
pub fn get_current_parent_index() -> Option<usize> {
    PARENT_STACK.with(|stack| stack.borrow().last().copied())
}

/// Push a parent index onto the stack.
pub fn push_parent_context(index: usize) {
    PARENT_STACK.with(|stack| stack.borrow_mut().push(index));
}

/// Pop a parent index from the stack.
pub fn pop_parent_context() {
    PARENT_STACK.with(|stack| {
        stack.borrow_mut().pop();
    });
}

// =============================================================================
// Index Allocation
// =============================================================================

/// Allocate an index for a new component.
///
/// When `id` is None a unique one is generated. Allocating an ID that is
/// already live returns its existing index.
pub fn allocate_index(id: Option<&str>) -> usize {
    let component_id = match id {
        Some(id) => id.to_string(),
        None => ID_COUNTER.with(|counter| {
            let mut counter = counter.borrow_mut();
            let id = format!("c{}", *counter);
            *counter += 1;
            id
        }),
    };

    let existing = ID_TO_INDEX.with(|map| map.borrow().get(&component_id).copied());
    if let Some(index) = existing {
        return index;
    }

    // Reuse a freed index or grow
    let index = FREE_INDICES.with(|free| {
        let mut free = free.borrow_mut();
        if let Some(index) = free.pop() {
            index
        } else {
            NEXT_INDEX.with(|next| {
                let mut next = next.borrow_mut();
                let index = *next;
                *next += 1;
                index
            })
        }
    });

    ID_TO_INDEX.with(|map| {
        map.borrow_mut().insert(component_id.clone(), index);
    });
    INDEX_TO_ID.with(|map| {
        map.borrow_mut().insert(index, component_id);
    });
    ALLOCATED_INDICES.with(|set| {
        set.insert(index);
    });

    cells::ensure_capacity(index);

    // Inherit the structural parent from the creation context
    cells::set_parent_index(index, get_current_parent_index());

    index
}

/// Release an index back to the pool.
///
/// Children are released first, so releasing a field tears down its slots.
pub fn release_index(index: usize) {
    let id = INDEX_TO_ID.with(|map| map.borrow().get(&index).cloned());
    let Some(id) = id else { return };

    // Collect children before mutating the set
    let children: Vec<usize> = ALLOCATED_INDICES.with(|set| {
        set.iter()
            .into_iter()
            .filter(|&child| cells::parent_of(child) == Some(index))
            .collect()
    });

    for child in children {
        release_index(child);
    }

    run_destroy_callbacks(index);

    ID_TO_INDEX.with(|map| {
        map.borrow_mut().remove(&id);
    });
    INDEX_TO_ID.with(|map| {
        map.borrow_mut().remove(&index);
    });
    ALLOCATED_INDICES.with(|set| {
        set.remove(&index);
    });

    cells::clear_at_index(index);

    FREE_INDICES.with(|free| {
        free.borrow_mut().push(index);
    });

    // When the last component goes away, drop the arrays entirely
    let is_empty = ALLOCATED_INDICES.with(|set| set.is_empty());
    if is_empty {
        cells::reset();
        FREE_INDICES.with(|free| {
            free.borrow_mut().clear();
        });
        NEXT_INDEX.with(|next| {
            *next.borrow_mut() = 0;
        });
    }
}

// =============================================================================
// Destroy Callbacks
// =============================================================================

/// Register a callback to run when the component at `index` is released.
pub fn on_destroy(index: usize, callback: impl FnOnce() + 'static) {
    DESTROY_CALLBACKS.with(|callbacks| {
        callbacks
            .borrow_mut()
            .entry(index)
            .or_default()
            .push(Box::new(callback));
    });
}

fn run_destroy_callbacks(index: usize) {
    let callbacks = DESTROY_CALLBACKS.with(|callbacks| callbacks.borrow_mut().remove(&index));
    if let Some(callbacks) = callbacks {
        for callback in callbacks {
            callback();
        }
    }
}

// =============================================================================
// Lookups
// =============================================================================

/// Get index for a component ID.
pub fn get_index(id: &str) -> Option<usize> {
    ID_TO_INDEX.with(|map| map.borrow().get(id).copied())
}

/// Get ID for an index.
pub fn get_id(index: usize) -> Option<String> {
    INDEX_TO_ID.with(|map| map.borrow().get(&index).cloned())
}

/// Check if an index is currently allocated.
pub fn is_allocated(index: usize) -> bool {
    ALLOCATED_INDICES.with(|set| set.contains(&index))
}

/// Get the count of currently allocated components.
pub fn get_allocated_count() -> usize {
    ALLOCATED_INDICES.with(|set| set.len())
}

// =============================================================================
// Reset (for testing)
// =============================================================================

/// Reset all registry state (for testing).
pub fn reset_registry() {
    ID_TO_INDEX.with(|map| map.borrow_mut().clear());
    INDEX_TO_ID.with(|map| map.borrow_mut().clear());
    ALLOCATED_INDICES.with(|set| set.clear());
    FREE_INDICES.with(|free| free.borrow_mut().clear());
    NEXT_INDEX.with(|next| *next.borrow_mut() = 0);
    ID_COUNTER.with(|counter| *counter.borrow_mut() = 0);
    PARENT_STACK.with(|stack| stack.borrow_mut().clear());
    DESTROY_CALLBACKS.with(|callbacks| callbacks.borrow_mut().clear());
    cells::reset();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::cells;

    #[test]
    fn test_allocate_index() {
        reset_registry();

        let idx1 = allocate_index(None);
        let idx2 = allocate_index(None);
        let idx3 = allocate_index(Some("otp"));

        assert_eq!(idx1, 0);
        assert_eq!(idx2, 1);
        assert_eq!(idx3, 2);

        assert!(is_allocated(0));
        assert!(is_allocated(1));
        assert!(is_allocated(2));
        assert!(!is_allocated(3));

        assert_eq!(get_allocated_count(), 3);
    }

    #[test]
    fn test_release_and_reuse() {
        reset_registry();

        let idx1 = allocate_index(None);
        let idx2 = allocate_index(None);

        release_index(idx1);
        assert!(!is_allocated(idx1));
        assert!(is_allocated(idx2));

        // Should reuse the freed index
        let idx3 = allocate_index(None);
        assert_eq!(idx3, idx1);
    }

    #[test]
    fn test_id_mapping() {
        reset_registry();

        let idx = allocate_index(Some("verify_code"));
        assert_eq!(get_index("verify_code"), Some(idx));
        assert_eq!(get_id(idx), Some("verify_code".to_string()));
    }

    #[test]
    fn test_release_cascades_to_children() {
        reset_registry();

        let field = allocate_index(Some("field"));
        push_parent_context(field);
        let slot_a = allocate_index(None);
        let slot_b = allocate_index(None);
        pop_parent_context();

        assert_eq!(cells::parent_of(slot_a), Some(field));
        assert_eq!(get_allocated_count(), 3);

        release_index(field);
        assert!(!is_allocated(field));
        assert!(!is_allocated(slot_a));
        assert!(!is_allocated(slot_b));
        assert_eq!(get_allocated_count(), 0);
    }

    #[test]
    fn test_destroy_callback() {
        use std::cell::Cell;
        use std::rc::Rc;

        reset_registry();

        let called = Rc::new(Cell::new(false));
        let called_clone = called.clone();

        let idx = allocate_index(None);
        on_destroy(idx, move || {
            called_clone.set(true);
        });

        assert!(!called.get());
        release_index(idx);
        assert!(called.get());
    }
}
