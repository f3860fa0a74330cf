#![allow(non_camel_case_types, clippy::upper_case_acronyms)]

use core::ffi::c_void;

/// An opaque reference to a kernel object, such as a thread
pub type HANDLE = *mut c_void;

/// A handle to a block allocated by `LocalAlloc`, released with `LocalFree`
pub type HLOCAL = *mut c_void;

/// A handle to a loaded module
pub type HMODULE = *mut c_void;

/// The address of an exported procedure, as returned by `GetProcAddress`
pub type FARPROC = *mut c_void;

/// A COM style status code. Negative values indicate failure.
pub type HRESULT = i32;

/// An unsigned 32-bit integer
pub type DWORD = u32;

/// A 32-bit boolean, where any nonzero value is true
pub type BOOL = i32;

/// A UTF-16 code unit
pub type WCHAR = u16;

/// A pointer to a null-terminated, caller owned, read only wide string
pub type PCWSTR = *const WCHAR;

/// A pointer to a null-terminated wide string
pub type PWSTR = *mut WCHAR;

/// A pointer to a null-terminated, read only narrow string
pub type PCSTR = *const core::ffi::c_char;

/// The false value of [`BOOL`]
pub const FALSE: BOOL = 0;
