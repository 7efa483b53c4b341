//! `extern "C"` trampolines for the initialization slots.
//!
//! Godot calls `initialize` and `deinitialize` once per level with the
//! `userdata` pointer stored next to them. That pointer is a leaked
//! [`HookSlot`] which forwards to a [`LifecycleHooks`] implementation.

use std::ffi::c_void;

use gdclj_core::{InitLevel, LifecycleHooks};

use crate::abi::GDExtensionInitializationLevel;

pub struct HookSlot {
    hooks: &'static dyn LifecycleHooks,
}

impl HookSlot {
    /// Leak a slot for the rest of the process and return it as `userdata`.
    pub fn leak(hooks: &'static dyn LifecycleHooks) -> *mut c_void {
        let slot: &'static mut HookSlot = Box::leak(Box::new(HookSlot { hooks }));
        (slot as *mut HookSlot).cast()
    }
}

fn forward(
    userdata: *mut c_void,
    raw_level: GDExtensionInitializationLevel,
    call: impl FnOnce(&dyn LifecycleHooks, InitLevel),
) {
    let Some(level) = InitLevel::from_raw(raw_level) else {
        tracing::debug!(raw_level, "Ignoring unknown initialization level");
        return;
    };
    // SAFETY: userdata is either null or the pointer produced by
    // `HookSlot::leak`, which is never freed.
    let Some(slot) = (unsafe { userdata.cast::<HookSlot>().as_ref() }) else {
        return;
    };
    call(slot.hooks, level);
}

pub unsafe extern "C" fn initialize(
    userdata: *mut c_void,
    p_level: GDExtensionInitializationLevel,
) {
    forward(userdata, p_level, |hooks, level| hooks.initialize(level));
}

pub unsafe extern "C" fn deinitialize(
    userdata: *mut c_void,
    p_level: GDExtensionInitializationLevel,
) {
    forward(userdata, p_level, |hooks, level| hooks.deinitialize(level));
}
