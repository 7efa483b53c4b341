//! GDExtension entry point for gdclj.
//!
//! Godot loads this library and calls [`godot_entry`]. The entry starts the
//! embedded JVM, loads the configured Clojure namespace and hands the
//! engine's `get_proc_address` accessor to its entry function as a `Long`.
//!
//! Point the `.gdextension` file at the symbol:
//!
//! ```ini
//! [configuration]
//! entry_symbol = "godot_entry"
//! compatibility_minimum = "4.1"
//! ```
//!
//! Launch Godot from a terminal with `CLASSPATH` set; diagnostics are
//! written to stderr and controlled by `GDCLJ_LOG`.

pub mod abi;
pub mod host;
pub mod lifecycle;
pub mod logging;

use std::fmt;
use std::io::{self, Write};
use std::panic::{AssertUnwindSafe, catch_unwind};

use gdclj_core::{BootstrapLatch, EntryDispatcher, ProcessEnv};
use gdclj_jvm::JvmBootstrapper;

use crate::abi::{
    GDEXTENSION_FALSE, GDEXTENSION_TRUE, GDExtensionBool, GDExtensionClassLibraryPtr,
    GDExtensionInitialization, GDExtensionInterfaceGetProcAddress,
};
use crate::host::GodotHost;

/// Guards the one JVM this process may create.
pub static BOOTSTRAP: BootstrapLatch = BootstrapLatch::new();

/// Returns `1` once the Clojure entry point has run and both lifecycle slots
/// are filled, `0` on any failure. Godot reports `0` as a failed
/// initialization and does not call the lifecycle slots.
///
/// # Safety
///
/// Must only be called by Godot with the arguments of the GDExtension
/// initialization function.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn godot_entry(
    p_get_proc_address: GDExtensionInterfaceGetProcAddress,
    p_library: GDExtensionClassLibraryPtr,
    r_initialization: *mut GDExtensionInitialization,
) -> GDExtensionBool {
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        logging::init();
        // SAFETY: forwarded from Godot unchanged.
        let host = unsafe { GodotHost::from_raw(p_get_proc_address, p_library, r_initialization) };
        match host {
            Ok(mut host) => bootstrap(&mut host),
            Err(e) => {
                report(&mut io::stderr(), &e);
                tracing::error!(error = %e, "Invalid arguments from host");
                false
            }
        }
    }));

    match outcome {
        Ok(true) => GDEXTENSION_TRUE,
        Ok(false) => GDEXTENSION_FALSE,
        Err(_) => {
            report(&mut io::stderr(), &"panic during bootstrap");
            tracing::error!("Panic during bootstrap");
            GDEXTENSION_FALSE
        }
    }
}

fn bootstrap(host: &mut GodotHost<'_>) -> bool {
    let dispatcher = EntryDispatcher::new(JvmBootstrapper::new(), &BOOTSTRAP);
    match dispatcher.run(&ProcessEnv, host) {
        Ok(report) => {
            tracing::info!(stages = report.stages.len(), "gdclj bootstrap complete");
            true
        }
        Err(failure) => {
            report(&mut io::stderr(), &failure);
            tracing::error!(stage = %failure.reached, "gdclj bootstrap failed");
            false
        }
    }
}

/// Write a failure to the diagnostic stream whatever the log filter or the
/// host's own subscriber lets through.
fn report(out: &mut dyn Write, error: &dyn fmt::Display) {
    // Nowhere left to report a failed stderr write.
    let _ = writeln!(out, "gdclj: {error}");
}
