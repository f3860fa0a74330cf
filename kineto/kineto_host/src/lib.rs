#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//!
//! The [`kineto_host`] crate exposes the host's thread description apis, `SetThreadDescription` and `GetThreadDescription`.
//! These were added to kernel32 in Windows 10 1607, and many system import libraries and headers still in use do not declare them.
//! The crate declares them itself, with the exact name, parameter order and `"system"` calling convention of the kernel32 exports,
//! and layers an owned, safe interface on top for profilers and loggers that tag threads by role.
//!
//! Only the platform neutral pieces ([`HResult`] and the [`wide`] string helpers) are available on hosts other than windows.

/// Win32 scalar and pointer types used by the declarations
pub mod primitives;

/// Status codes returned by the thread description apis
pub mod hresult;

/// Null-terminated UTF-16 strings, as consumed and produced by the wide character Win32 apis
pub mod wide;

cfg_match::cfg_match! {
    windows => {
        /// Raw declarations of the kernel32 exports used by this crate
        pub mod processthreadsapi;

        ///
        /// Interfaces to load dynamic libraries and resolve their exports at runtime.
        /// Used to find the thread description apis on hosts where they may be missing.
        pub mod dso;

        /// The route taken to reach `SetThreadDescription` and `GetThreadDescription`, either by import or by runtime lookup
        pub mod entry;

        /// Safe access to the description of a thread
        pub mod thread;

        pub use thread::{
            current_thread_description, current_thread_id, set_current_thread_description,
            OwnedThreadHandle, ThreadDescription, ThreadHandle,
        };
    }
    _ => {}
}

pub use hresult::HResult;
pub use wide::WideString;
