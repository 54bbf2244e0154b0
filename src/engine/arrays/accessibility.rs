//! Accessibility Arrays
//!
//! Per-component [`AccessFlags`]. The framework never builds an accessibility
//! tree itself; hosts read these flags and forward them.

use crate::types::AccessFlags;
use super::BindingArray;

thread_local! {
    static ACCESS_FLAGS: BindingArray<AccessFlags> = BindingArray::new(AccessFlags::empty());
}

pub fn ensure_capacity(index: usize) {
    ACCESS_FLAGS.with(|arr| arr.ensure_capacity(index));
}

pub fn clear_at_index(index: usize) {
    ACCESS_FLAGS.with(|arr| arr.clear(index));
}

pub fn reset() {
    ACCESS_FLAGS.with(|arr| arr.clear_all());
}

/// Get accessibility flags at index (reactive when bound to a getter).
pub fn get_access_flags(index: usize) -> AccessFlags {
    ACCESS_FLAGS.with(|arr| arr.get(index))
}

pub fn set_access_flags(index: usize, flags: AccessFlags) {
    ACCESS_FLAGS.with(|arr| arr.set_value(index, flags));
}

pub fn set_access_flags_getter<F>(index: usize, getter: F)
where
    F: Fn() -> AccessFlags + 'static,
{
    ACCESS_FLAGS.with(|arr| arr.set_getter(index, getter));
}

/// True when the component at `index` is hidden from assistive tech.
pub fn is_hidden_from_accessibility(index: usize) -> bool {
    get_access_flags(index).is_hidden()
}
