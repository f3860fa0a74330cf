#![allow(non_snake_case)]

use std::{
    ffi::{c_void, CString, OsStr},
    os::windows::ffi::OsStrExt,
};

use crate::primitives::{BOOL, FARPROC, HMODULE, PCSTR, PCWSTR};

#[link(name = "kernel32")]
extern "system" {
    fn LoadLibraryW(lpLibFileName: PCWSTR) -> HMODULE;
    fn FreeLibrary(hLibModule: HMODULE) -> BOOL;
    fn GetProcAddress(hModule: HMODULE, lpProcName: PCSTR) -> FARPROC;
}

pub struct RawHandle {
    hdl: HMODULE,
}

// Module handles are process wide
unsafe impl Send for RawHandle {}
unsafe impl Sync for RawHandle {}

impl RawHandle {
    pub fn open(s: &OsStr) -> std::io::Result<Self> {
        let mut wstr = OsStrExt::encode_wide(s).collect::<Vec<_>>();
        wstr.push(0);
        let hdl = unsafe { LoadLibraryW(wstr.as_ptr()) };
        if hdl.is_null() {
            Err(std::io::Error::last_os_error())
        } else {
            Ok(Self { hdl })
        }
    }

    pub fn get_sym_raw(&self, s: &OsStr) -> *mut c_void {
        let Some(cstr) = s.to_str().and_then(|s| CString::new(s).ok()) else {
            return core::ptr::null_mut();
        };
        unsafe { GetProcAddress(self.hdl, cstr.as_ptr()) }
    }
}

impl Drop for RawHandle {
    fn drop(&mut self) {
        unsafe {
            FreeLibrary(self.hdl);
        }
    }
}
