#![allow(clippy::missing_safety_doc)]

use crate::primitives::{HANDLE, HRESULT, PCWSTR, PWSTR};

cfg_match::cfg_match! {
    feature = "dynamic-lookup" => {
        mod route {
            use std::sync::OnceLock;

            use crate::dso::Handle;
            use crate::hresult::HResult;
            use crate::primitives::{HANDLE, HRESULT, PCWSTR, PWSTR};

            type SetThreadDescriptionFn = unsafe extern "system" fn(HANDLE, PCWSTR) -> HRESULT;
            type GetThreadDescriptionFn = unsafe extern "system" fn(HANDLE, *mut PWSTR) -> HRESULT;

            struct Exports {
                // Keeps the resolved functions loaded
                _kernel32: Handle,
                set: Option<SetThreadDescriptionFn>,
                get: Option<GetThreadDescriptionFn>,
            }

            static EXPORTS: OnceLock<Option<Exports>> = OnceLock::new();

            fn exports() -> Option<&'static Exports> {
                EXPORTS
                    .get_or_init(|| match Handle::open("kernel32.dll") {
                        Ok(kernel32) => {
                            let set = unsafe {
                                kernel32.function_sym::<SetThreadDescriptionFn, _>("SetThreadDescription")
                            };
                            let get = unsafe {
                                kernel32.function_sym::<GetThreadDescriptionFn, _>("GetThreadDescription")
                            };
                            tracing::debug!(
                                set = set.is_some(),
                                get = get.is_some(),
                                "resolved thread description exports"
                            );
                            Some(Exports {
                                _kernel32: kernel32,
                                set,
                                get,
                            })
                        }
                        Err(e) => {
                            tracing::debug!(error = %e, "unable to load kernel32.dll");
                            None
                        }
                    })
                    .as_ref()
            }

            unsafe fn call_set(
                f: Option<SetThreadDescriptionFn>,
                thread: HANDLE,
                description: PCWSTR,
            ) -> HRESULT {
                match f {
                    Some(f) => f(thread, description),
                    None => HResult::E_PROC_NOT_FOUND.code(),
                }
            }

            // `description` is left untouched when the export is missing
            unsafe fn call_get(
                f: Option<GetThreadDescriptionFn>,
                thread: HANDLE,
                description: *mut PWSTR,
            ) -> HRESULT {
                match f {
                    Some(f) => f(thread, description),
                    None => HResult::E_PROC_NOT_FOUND.code(),
                }
            }

            pub unsafe fn set_thread_description(thread: HANDLE, description: PCWSTR) -> HRESULT {
                call_set(exports().and_then(|exports| exports.set), thread, description)
            }

            pub unsafe fn get_thread_description(thread: HANDLE, description: *mut PWSTR) -> HRESULT {
                call_get(exports().and_then(|exports| exports.get), thread, description)
            }

            pub const fn is_dynamic() -> bool {
                true
            }

        }
    }
    _ => {
        mod route {
            use crate::processthreadsapi::{GetThreadDescription, SetThreadDescription};
            use crate::primitives::{HANDLE, HRESULT, PCWSTR, PWSTR};

            pub unsafe fn set_thread_description(thread: HANDLE, description: PCWSTR) -> HRESULT {
                SetThreadDescription(thread, description)
            }

            pub unsafe fn get_thread_description(thread: HANDLE, description: *mut PWSTR) -> HRESULT {
                GetThreadDescription(thread, description)
            }

            pub const fn is_dynamic() -> bool {
                false
            }
        }
    }
}

/// Whether the crate was built with the `dynamic-lookup` feature, and so resolves the exports at runtime
#[must_use]
pub const fn is_dynamic() -> bool {
    route::is_dynamic()
}

///
/// Calls `SetThreadDescription`, through whichever route this build uses.
///
/// With the `dynamic-lookup` feature, if the host does not export `SetThreadDescription`, returns
/// [`HResult::E_PROC_NOT_FOUND`](crate::HResult::E_PROC_NOT_FOUND) without calling anything.
///
/// # Safety
/// The same as [`SetThreadDescription`](crate::processthreadsapi::SetThreadDescription):
/// `thread` must be a thread handle or an invalid value the OS can reject, and `description` must point to a null-terminated wide string
pub unsafe fn set_thread_description(thread: HANDLE, description: PCWSTR) -> HRESULT {
    route::set_thread_description(thread, description)
}

///
/// Calls `GetThreadDescription`, through whichever route this build uses.
///
/// With the `dynamic-lookup` feature, if the host does not export `GetThreadDescription`, returns
/// [`HResult::E_PROC_NOT_FOUND`](crate::HResult::E_PROC_NOT_FOUND) and leaves `*description` untouched.
///
/// # Safety
/// The same as [`GetThreadDescription`](crate::processthreadsapi::GetThreadDescription):
/// `description` must be valid for a write, and on success the caller takes ownership of the string written there
pub unsafe fn get_thread_description(thread: HANDLE, description: *mut PWSTR) -> HRESULT {
    route::get_thread_description(thread, description)
}

#[cfg(test)]
mod test {
    use super::{get_thread_description, set_thread_description};
    use crate::{hresult::HResult, primitives::PWSTR, wide::to_wide_nul};

    #[test]
    fn test_raw_status_passthrough() {
        let description = to_wide_nul("unused").unwrap();
        let status = HResult::from_raw(unsafe {
            set_thread_description(core::ptr::null_mut(), description.as_ptr())
        });
        assert!(status.is_err());

        let mut out: PWSTR = core::ptr::null_mut();
        let status =
            HResult::from_raw(unsafe { get_thread_description(core::ptr::null_mut(), &mut out) });
        assert!(status.is_err());
    }
}
