use std::ffi::{CStr, c_char};
use std::ptr;

use gdclj_core::{BridgeError, Host, HostVersion, InitLevel, LifecycleHooks};

use crate::abi::{
    GDExtensionClassLibraryPtr, GDExtensionGodotVersion, GDExtensionInitialization,
    GDExtensionInterfaceFunctionPtr, GDExtensionInterfaceGetGodotVersion,
    GDExtensionInterfaceGetProcAddress,
};
use crate::lifecycle::{self, HookSlot};

type GetProcAddress = unsafe extern "C" fn(*const c_char) -> GDExtensionInterfaceFunctionPtr;

/// The engine as seen from `godot_entry`.
pub struct GodotHost<'a> {
    get_proc_address: GetProcAddress,
    init: &'a mut GDExtensionInitialization,
}

impl<'a> GodotHost<'a> {
    /// Wrap the arguments Godot passes to the entry symbol.
    ///
    /// # Safety
    ///
    /// `r_initialization` must be null or point to a writable
    /// `GDExtensionInitialization` that outlives `'a`, and `get_proc_address`
    /// must be the engine's accessor.
    pub unsafe fn from_raw(
        get_proc_address: GDExtensionInterfaceGetProcAddress,
        library: GDExtensionClassLibraryPtr,
        r_initialization: *mut GDExtensionInitialization,
    ) -> Result<Self, BridgeError> {
        let get_proc_address = get_proc_address
            .ok_or_else(|| BridgeError::Host("get_proc_address is null".into()))?;
        // SAFETY: guaranteed by the caller.
        let init = unsafe { r_initialization.as_mut() }
            .ok_or_else(|| BridgeError::Host("r_initialization is null".into()))?;
        tracing::debug!(library = ?library, "GDExtension library handle received");
        Ok(Self {
            get_proc_address,
            init,
        })
    }

    fn proc_address(&self, name: &CStr) -> GDExtensionInterfaceFunctionPtr {
        // SAFETY: the accessor takes a NUL-terminated name and returns null
        // for unknown functions.
        unsafe { (self.get_proc_address)(name.as_ptr()) }
    }
}

impl Host for GodotHost<'_> {
    fn capability_token(&self) -> i64 {
        self.get_proc_address as usize as i64
    }

    fn version(&self) -> Option<HostVersion> {
        let function = self.proc_address(c"get_godot_version")?;
        // SAFETY: Godot registers `get_godot_version` with this signature.
        let get_version: GDExtensionInterfaceGetGodotVersion =
            unsafe { std::mem::transmute(function) };

        let mut raw = GDExtensionGodotVersion {
            major: 0,
            minor: 0,
            patch: 0,
            string: ptr::null(),
        };
        // SAFETY: `raw` is a valid out-parameter for the duration of the call.
        unsafe { get_version(&mut raw) };

        let display = if raw.string.is_null() {
            String::new()
        } else {
            // SAFETY: the engine returns a static NUL-terminated string.
            unsafe { CStr::from_ptr(raw.string) }
                .to_string_lossy()
                .into_owned()
        };

        Some(HostVersion {
            major: raw.major,
            minor: raw.minor,
            patch: raw.patch,
            display,
        })
    }

    fn register_lifecycle(
        &mut self,
        minimum_level: InitLevel,
        hooks: &'static dyn LifecycleHooks,
    ) -> Result<(), BridgeError> {
        self.init.minimum_initialization_level = minimum_level.as_raw();
        self.init.userdata = HookSlot::leak(hooks);
        self.init.initialize = Some(lifecycle::initialize);
        self.init.deinitialize = Some(lifecycle::deinitialize);
        tracing::debug!(minimum_level = %minimum_level, "Lifecycle hooks registered");
        Ok(())
    }
}
