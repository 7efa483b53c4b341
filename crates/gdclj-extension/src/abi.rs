//! The subset of `gdextension_interface.h` this extension touches.

use std::ffi::{c_char, c_void};

pub type GDExtensionBool = u8;
pub const GDEXTENSION_TRUE: GDExtensionBool = 1;
pub const GDEXTENSION_FALSE: GDExtensionBool = 0;

pub type GDExtensionClassLibraryPtr = *mut c_void;

pub type GDExtensionInterfaceFunctionPtr = Option<unsafe extern "C" fn()>;

pub type GDExtensionInterfaceGetProcAddress =
    Option<unsafe extern "C" fn(p_function_name: *const c_char) -> GDExtensionInterfaceFunctionPtr>;

/// C enum, passed as `int`.
pub type GDExtensionInitializationLevel = i32;

pub type GDExtensionInitializeCallback =
    Option<unsafe extern "C" fn(userdata: *mut c_void, p_level: GDExtensionInitializationLevel)>;

#[repr(C)]
pub struct GDExtensionInitialization {
    pub minimum_initialization_level: GDExtensionInitializationLevel,
    pub userdata: *mut c_void,
    pub initialize: GDExtensionInitializeCallback,
    pub deinitialize: GDExtensionInitializeCallback,
}

#[repr(C)]
pub struct GDExtensionGodotVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub string: *const c_char,
}

pub type GDExtensionInterfaceGetGodotVersion =
    unsafe extern "C" fn(r_godot_version: *mut GDExtensionGodotVersion);
