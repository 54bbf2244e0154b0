//! Index change normalization.
//!
//! The pager reports indices, the tab bar asks for route keys. Both end up in
//! one owner callback, which is only called when focus actually moves.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};

use crate::error::TabViewError;
use crate::primitives::PropValue;
use super::types::{NavigationState, Route};

/// Which path a jump took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpOutcome {
    /// The owner was asked to focus this index.
    Notified(usize),
    /// The index was already focused; the pager was told to snap to it.
    Snapped(usize),
    /// The index was already focused; nothing happened.
    Unchanged,
}

/// Routes pager and tab bar index requests to `on_index_change`.
pub struct IndexBridge<R: Route> {
    navigation_state: PropValue<NavigationState<R>>,
    on_index_change: Rc<dyn Fn(usize)>,
    pager_jump: RefCell<Option<Rc<dyn Fn(usize)>>>,
}

impl<R: Route> IndexBridge<R> {
    pub fn new(
        navigation_state: PropValue<NavigationState<R>>,
        on_index_change: Rc<dyn Fn(usize)>,
    ) -> Self {
        Self {
            navigation_state,
            on_index_change,
            pager_jump: RefCell::new(None),
        }
    }

    /// Install the pager's direct snap, once the pager has rendered.
    pub fn set_pager_jump(&self, jump: Rc<dyn Fn(usize)>) {
        *self.pager_jump.borrow_mut() = Some(jump);
    }

    /// Pager-driven change: forwarded only if `index` is not already focused.
    pub fn jump_to_index(&self, index: usize) -> JumpOutcome {
        let current = self.navigation_state.get().index;
        if index == current {
            return JumpOutcome::Unchanged;
        }
        debug!("index change {} -> {}", current, index);
        (self.on_index_change)(index);
        JumpOutcome::Notified(index)
    }

    /// Tab-bar-driven change by route key.
    ///
    /// A key naming the focused route snaps the pager instead of notifying
    /// the owner. An unknown key is an error and changes nothing.
    pub fn try_jump_to(&self, key: &str) -> Result<JumpOutcome, TabViewError> {
        let state = self.navigation_state.get();
        let index = state
            .index_of(key)
            .ok_or_else(|| TabViewError::UnknownRoute(key.to_string()))?;

        if index == state.index {
            let snap = self.pager_jump.borrow().clone();
            if let Some(snap) = snap {
                snap(index);
            }
            return Ok(JumpOutcome::Snapped(index));
        }

        Ok(self.jump_to_index(index))
    }

    /// [`try_jump_to`](Self::try_jump_to), logging and ignoring unknown keys.
    pub fn jump_to(&self, key: &str) {
        if let Err(err) = self.try_jump_to(key) {
            warn!("jump_to ignored: {}", err);
        }
    }
}
