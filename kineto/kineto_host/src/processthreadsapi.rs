#![allow(non_snake_case, clippy::missing_safety_doc)]
//! The thread description apis are declared here rather than taken from a bindings crate,
//! so they link against import libraries (and SDKs) that predate them.
//! When the compiler supports `raw-dylib`, no import library entry is needed at all.
//! On 32-bit x86, `"system"` imports would otherwise be emitted stdcall-decorated (`_SetThreadDescription@8`),
//! while kernel32 exports the plain names, so the imports are requested undecorated there.

use crate::primitives::{BOOL, DWORD, HANDLE, HLOCAL, HRESULT, PCWSTR, PWSTR};

/// Access right required by `SetThreadDescription`
pub const THREAD_SET_LIMITED_INFORMATION: DWORD = 0x0400;

/// Access right required by `GetThreadDescription`
pub const THREAD_QUERY_LIMITED_INFORMATION: DWORD = 0x0800;

#[cfg_attr(
    all(has_raw_dylib, target_arch = "x86"),
    link(name = "kernel32", kind = "raw-dylib", import_name_type = "undecorated")
)]
#[cfg_attr(
    all(has_raw_dylib, not(target_arch = "x86")),
    link(name = "kernel32", kind = "raw-dylib")
)]
#[cfg_attr(not(has_raw_dylib), link(name = "kernel32"))]
extern "system" {
    ///
    /// Records `lpThreadDescription` as the description of the thread `hThread`. The string is copied, and not retained past the call.
    ///
    /// `hThread` must carry [`THREAD_SET_LIMITED_INFORMATION`]. The status is returned exactly as the OS produced it.
    pub fn SetThreadDescription(hThread: HANDLE, lpThreadDescription: PCWSTR) -> HRESULT;

    ///
    /// Stores in `*ppszThreadDescription` a newly allocated copy of the description of `hThread`.
    /// The caller owns the copy and must release it with [`LocalFree`]. If no description was ever set, the copy is the empty string.
    ///
    /// `hThread` must carry [`THREAD_QUERY_LIMITED_INFORMATION`]. On failure, `*ppszThreadDescription` is unspecified.
    pub fn GetThreadDescription(hThread: HANDLE, ppszThreadDescription: *mut PWSTR) -> HRESULT;

    /// Returns the pseudo handle of the calling thread. It need not be closed.
    pub fn GetCurrentThread() -> HANDLE;

    /// Returns the id of the calling thread
    pub fn GetCurrentThreadId() -> DWORD;

    /// Opens the thread with id `dwThreadId`. Returns null on failure, with the reason in the last error.
    pub fn OpenThread(dwDesiredAccess: DWORD, bInheritHandle: BOOL, dwThreadId: DWORD) -> HANDLE;

    /// Closes a handle returned by [`OpenThread`]
    pub fn CloseHandle(hObject: HANDLE) -> BOOL;

    /// Releases memory returned by [`GetThreadDescription`]. Returns null on success.
    pub fn LocalFree(hMem: HLOCAL) -> HLOCAL;
}
