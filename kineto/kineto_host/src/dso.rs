use std::ffi::{c_void, OsStr};

mod libloaderapi;

use libloaderapi as sys;

///
/// An unsafe helper trait used by [`Handle::function_sym`]
///
/// # Safety
/// [`Self`] must be a fn pointer type.
/// Note that it is invalid to implemented this trait in downstream code as function pointer types are not supported.
pub unsafe trait FnPtr: Sized {
    /// Converts a raw pointer into a function pointer, or `None` if the pointer is null
    ///
    /// # Safety
    /// This can produce a safe function pointer
    /// The function must be callable within the lifetime of the bounding dso, must match the abi of the symbol,
    /// And, if safe, must have defined behaviour for all statically valid inputs
    unsafe fn from_raw_ptr(p: *mut c_void) -> Option<Self>;
}

macro_rules! impl_system_fn_ptrs{
    {
        $(($($id:ident),*)),*
    } => {
        $(
            unsafe impl<R, $($id),*> FnPtr for extern "system" fn($($id),*)->R{
                unsafe fn from_raw_ptr(p: *mut c_void) -> Option<Self>{
                    core::mem::transmute(p)
                }
            }
            unsafe impl<R, $($id),*> FnPtr for unsafe extern "system" fn($($id),*)->R{
                unsafe fn from_raw_ptr(p: *mut c_void) -> Option<Self>{
                    core::mem::transmute(p)
                }
            }
        )*
    }
}

impl_system_fn_ptrs! {
    (),
    (A),
    (A,B),
    (A,B,C),
    (A,B,C,D)
}

/// A type that models a handle to a dynamically loaded library.
pub struct Handle {
    raw: sys::RawHandle,
}

impl Handle {
    /// Obtains a Handle to a library with a given name. This may be an absolute or relative path, or a library file name such as `kernel32.dll`,
    /// in which case it is searched for by the loader.
    ///
    /// Dropping the handle releases the library. Functions obtained from it must not be called after that point.
    ///
    /// # Errors
    /// Returns the OS error if loading the library fails
    pub fn open<S: AsRef<OsStr> + ?Sized>(s: &S) -> std::io::Result<Self> {
        sys::RawHandle::open(s.as_ref()).map(|raw| Self { raw })
    }

    /// Given the name of a symbol, returns a function pointer to that symbol if it exists, or None otherwise
    ///
    /// # Safety
    ///
    /// This function does *not* statically bound the lifetime of the function (as rust has no native mechanism for that).
    /// Thus, the caller is responsible for ensuring that the returned pointer is not called after dropping the Handle.
    ///
    /// The symbol must have the signature and ABI given by `F`.
    ///
    /// # Notes
    /// Only `extern "system"` function pointer types (safe or unsafe) with up to 4 parameters are supported.
    pub unsafe fn function_sym<F: FnPtr, S: AsRef<OsStr> + ?Sized>(&self, s: &S) -> Option<F> {
        F::from_raw_ptr(self.raw.get_sym_raw(s.as_ref()))
    }
}

#[cfg(test)]
mod test {
    use super::Handle;
    use crate::primitives::DWORD;

    type GetCurrentThreadId = unsafe extern "system" fn() -> DWORD;

    #[test]
    fn test_resolve_kernel32_export() {
        let kernel32 = Handle::open("kernel32.dll").unwrap();
        let f = unsafe { kernel32.function_sym::<GetCurrentThreadId, _>("GetCurrentThreadId") }
            .expect("kernel32 exports GetCurrentThreadId");
        assert_eq!(unsafe { f() }, crate::thread::current_thread_id());
    }

    #[test]
    fn test_missing_export() {
        let kernel32 = Handle::open("kernel32.dll").unwrap();
        let f = unsafe { kernel32.function_sym::<GetCurrentThreadId, _>("NoSuchKinetoExport") };
        assert!(f.is_none());
    }

    #[test]
    fn test_missing_library() {
        assert!(Handle::open("kineto-no-such-library.dll").is_err());
    }
}
