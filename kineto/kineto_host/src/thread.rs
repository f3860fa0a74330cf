use std::{
    ffi::{OsStr, OsString},
    marker::PhantomData,
    os::windows::io::AsRawHandle,
    thread::JoinHandle,
};

use crate::{
    entry,
    hresult::HResult,
    primitives::{DWORD, FALSE, HANDLE, PWSTR},
    processthreadsapi::{CloseHandle, GetCurrentThread, GetCurrentThreadId, LocalFree, OpenThread},
    wide::{to_wide_nul, WideString},
};

pub use crate::processthreadsapi::{THREAD_QUERY_LIMITED_INFORMATION, THREAD_SET_LIMITED_INFORMATION};

/// Owns a string allocated by `GetThreadDescription` and releases it on drop
struct LocalWideString(PWSTR);

impl Drop for LocalWideString {
    fn drop(&mut self) {
        if !self.0.is_null() {
            unsafe {
                LocalFree(self.0.cast());
            }
        }
    }
}

///
/// Operations on the description of a thread, for any type that can produce a thread handle.
///
/// Statuses returned by the OS are passed through in the [`HResult`] unchanged.
pub trait ThreadDescription {
    /// The raw handle of the thread
    fn as_raw(&self) -> HANDLE;

    ///
    /// Sets the description of the thread. The empty string is allowed, and clears the description.
    ///
    /// # Errors
    /// Returns [`HResult::E_INVALIDARG`] without calling the OS if `description` contains a NUL character.
    /// Otherwise returns the failure status reported by the OS, such as [`HResult::E_HANDLE`] or [`HResult::E_ACCESSDENIED`]
    fn set_description<S: AsRef<OsStr>>(&self, description: S) -> Result<(), HResult> {
        let wide = to_wide_nul(description.as_ref())?;
        let status =
            HResult::from_raw(unsafe { entry::set_thread_description(self.as_raw(), wide.as_ptr()) });
        if status.is_err() {
            tracing::debug!(%status, "SetThreadDescription failed");
        }
        status.ok()
    }

    ///
    /// Reads back the description of the thread as UTF-16. A thread that was never given a description yields the empty string.
    ///
    /// # Errors
    /// Returns the failure status reported by the OS, such as [`HResult::E_HANDLE`] or [`HResult::E_OUTOFMEMORY`]
    fn description_wide(&self) -> Result<WideString, HResult> {
        let mut raw: PWSTR = core::ptr::null_mut();
        let status = HResult::from_raw(unsafe { entry::get_thread_description(self.as_raw(), &mut raw) });
        if status.is_err() {
            tracing::debug!(%status, "GetThreadDescription failed");
            return Err(status);
        }
        let owned = LocalWideString(raw);
        Ok(unsafe { WideString::from_ptr(owned.0) })
    }

    ///
    /// Reads back the description of the thread. A thread that was never given a description yields the empty string.
    ///
    /// # Errors
    /// Returns the failure status reported by the OS, such as [`HResult::E_HANDLE`] or [`HResult::E_OUTOFMEMORY`]
    fn description(&self) -> Result<OsString, HResult> {
        self.description_wide().map(WideString::into_os_string)
    }
}

/// A borrowed thread handle.
#[derive(Clone, Copy, Debug)]
pub struct ThreadHandle<'a> {
    raw: HANDLE,
    _borrow: PhantomData<&'a ()>,
}

impl ThreadHandle<'static> {
    /// The pseudo handle of the calling thread. It carries every access right and is only meaningful on the thread that obtained it.
    #[must_use]
    pub fn current() -> Self {
        Self {
            raw: unsafe { GetCurrentThread() },
            _borrow: PhantomData,
        }
    }
}

impl<'a> ThreadHandle<'a> {
    /// Borrows the handle of a thread spawned by [`std::thread`]
    #[must_use]
    pub fn from_join_handle<T>(handle: &'a JoinHandle<T>) -> Self {
        Self {
            raw: handle.as_raw_handle().cast(),
            _borrow: PhantomData,
        }
    }

    /// Borrows a raw thread handle
    ///
    /// # Safety
    /// `raw` must either remain open for `'a` or be a value that the OS rejects as an invalid handle (such as null).
    /// It must not be a closed handle whose value could have been reused for another object.
    #[must_use]
    pub const unsafe fn borrow_raw(raw: HANDLE) -> Self {
        Self {
            raw,
            _borrow: PhantomData,
        }
    }
}

impl ThreadDescription for ThreadHandle<'_> {
    fn as_raw(&self) -> HANDLE {
        self.raw
    }
}

/// A thread handle opened by id, closed on drop
#[derive(Debug)]
pub struct OwnedThreadHandle {
    raw: HANDLE,
}

// A handle returned by OpenThread is valid on any thread of the process
unsafe impl Send for OwnedThreadHandle {}
unsafe impl Sync for OwnedThreadHandle {}

impl OwnedThreadHandle {
    ///
    /// Opens the thread with the given id, requesting `access`.
    /// Pass [`THREAD_SET_LIMITED_INFORMATION`] and/or [`THREAD_QUERY_LIMITED_INFORMATION`] according to the operations needed.
    ///
    /// # Errors
    /// Returns the OS error if the thread does not exist or the access cannot be granted
    pub fn open(thread_id: DWORD, access: DWORD) -> std::io::Result<Self> {
        let raw = unsafe { OpenThread(access, FALSE, thread_id) };
        if raw.is_null() {
            let err = std::io::Error::last_os_error();
            tracing::debug!(thread_id, access, error = %err, "OpenThread failed");
            Err(err)
        } else {
            Ok(Self { raw })
        }
    }

    /// Borrows the handle
    #[must_use]
    pub const fn borrow(&self) -> ThreadHandle<'_> {
        ThreadHandle {
            raw: self.raw,
            _borrow: PhantomData,
        }
    }
}

impl ThreadDescription for OwnedThreadHandle {
    fn as_raw(&self) -> HANDLE {
        self.raw
    }
}

impl Drop for OwnedThreadHandle {
    fn drop(&mut self) {
        unsafe {
            CloseHandle(self.raw);
        }
    }
}

/// The id of the calling thread, suitable for [`OwnedThreadHandle::open`]
#[must_use]
pub fn current_thread_id() -> DWORD {
    unsafe { GetCurrentThreadId() }
}

/// Sets the description of the calling thread
///
/// # Errors
/// See [`ThreadDescription::set_description`]
pub fn set_current_thread_description<S: AsRef<OsStr>>(description: S) -> Result<(), HResult> {
    ThreadHandle::current().set_description(description)
}

/// Reads back the description of the calling thread
///
/// # Errors
/// See [`ThreadDescription::description`]
pub fn current_thread_description() -> Result<OsString, HResult> {
    ThreadHandle::current().description()
}
