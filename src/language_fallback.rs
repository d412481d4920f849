//! Scoped activation of field language fallback.
//!
//! Multi-lingual field reads consult [`is_active`] to decide whether an empty
//! value in the record's language should fall back to another language.
//! The builder switches fallback on or off around every computed field
//! evaluation with a [`LanguageFallbackSwitcher`]; the previous state comes
//! back when the guard drops, on success, on error and on unwind.
//!
//! The switch is kept per thread and is off outside of any scope, so
//! parallel workers each see the state of their own evaluation.
//!
//! ```
//! use docweaver::language_fallback::{self, LanguageFallbackSwitcher};
//!
//! assert!(!language_fallback::is_active());
//! {
//!     let _guard = LanguageFallbackSwitcher::enter(true);
//!     assert!(language_fallback::is_active());
//! }
//! assert!(!language_fallback::is_active());
//! ```

use std::cell::Cell;
use std::marker::PhantomData;

thread_local! {
    static ACTIVE: Cell<bool> = const { Cell::new(false) };
}

/// Whether language fallback is active on the current thread.
pub fn is_active() -> bool {
    ACTIVE.with(Cell::get)
}

/// Guard that holds a language fallback state until dropped.
#[must_use = "fallback is restored as soon as the switcher is dropped"]
#[derive(Debug)]
pub struct LanguageFallbackSwitcher {
    previous: bool,
    // Restores thread-local state, so it must drop on the thread that made it.
    _not_send: PhantomData<*const ()>,
}

impl LanguageFallbackSwitcher {
    /// Switch fallback to `enabled` for the lifetime of the returned guard.
    pub fn enter(enabled: bool) -> Self {
        let previous = ACTIVE.with(|state| state.replace(enabled));
        LanguageFallbackSwitcher {
            previous,
            _not_send: PhantomData,
        }
    }
}

impl Drop for LanguageFallbackSwitcher {
    fn drop(&mut self) {
        ACTIVE.with(|state| state.set(self.previous));
    }
}
