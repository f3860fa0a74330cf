use core::fmt;
use std::{ffi::OsStr, string::FromUtf16Error};

#[cfg(windows)]
use std::{
    ffi::OsString,
    os::windows::ffi::{OsStrExt, OsStringExt},
};

use crate::{hresult::HResult, primitives::WCHAR};

/// The error produced when a string handed to the OS contains a NUL code unit before its end.
/// The OS would silently cut the description there, so such strings are refused instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InteriorNul {
    position: usize,
}

impl InteriorNul {
    /// The index, in UTF-16 code units, of the first NUL
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }
}

impl fmt::Display for InteriorNul {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "nul code unit found in wide string at position {}",
            self.position
        )
    }
}

impl std::error::Error for InteriorNul {}

impl From<InteriorNul> for HResult {
    fn from(_: InteriorNul) -> Self {
        Self::E_INVALIDARG
    }
}

#[cfg(windows)]
fn encode(s: &OsStr) -> Vec<WCHAR> {
    s.encode_wide().collect()
}

// Non-windows strings have no lossless UTF-16 form
#[cfg(not(windows))]
fn encode(s: &OsStr) -> Vec<WCHAR> {
    s.to_string_lossy().encode_utf16().collect()
}

///
/// Encodes `s` as UTF-16 followed by a single NUL terminator, suitable for a `PCWSTR` parameter.
///
/// # Errors
/// Returns [`InteriorNul`] if `s` contains a NUL character
pub fn to_wide_nul<S: AsRef<OsStr> + ?Sized>(s: &S) -> Result<Vec<WCHAR>, InteriorNul> {
    let mut buf = encode(s.as_ref());
    if let Some(position) = buf.iter().position(|&c| c == 0) {
        return Err(InteriorNul { position });
    }
    buf.push(0);
    Ok(buf)
}

/// Counts the code units before the terminator of a null-terminated wide string
///
/// # Safety
/// `ptr` must be non-null and point to a readable sequence of [`WCHAR`] ending in a NUL
#[must_use]
pub unsafe fn wide_len(ptr: *const WCHAR) -> usize {
    let mut len = 0;
    while *ptr.add(len) != 0 {
        len += 1;
    }
    len
}

/// An owned UTF-16 string without its terminator, such as a thread description read back from the OS
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct WideString(Vec<WCHAR>);

impl WideString {
    /// Creates an empty string
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Takes ownership of a buffer of code units. Everything from the first NUL onwards is discarded.
    #[must_use]
    pub fn from_vec(mut units: Vec<WCHAR>) -> Self {
        if let Some(nul) = units.iter().position(|&c| c == 0) {
            units.truncate(nul);
        }
        Self(units)
    }

    /// Copies a null-terminated wide string. A null pointer yields the empty string.
    ///
    /// # Safety
    /// If `ptr` is non-null, it must point to a readable sequence of [`WCHAR`] ending in a NUL
    #[must_use]
    pub unsafe fn from_ptr(ptr: *const WCHAR) -> Self {
        if ptr.is_null() {
            return Self::new();
        }
        let len = wide_len(ptr);
        Self(core::slice::from_raw_parts(ptr, len).to_vec())
    }

    /// The code units of the string, without a terminator
    #[must_use]
    pub fn as_slice(&self) -> &[WCHAR] {
        &self.0
    }

    /// The number of code units in the string
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the string has no code units
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Decodes the string, failing on unpaired surrogates
    ///
    /// # Errors
    /// Returns an error if the string is not valid UTF-16
    pub fn into_string(self) -> Result<String, FromUtf16Error> {
        String::from_utf16(&self.0)
    }

    /// Decodes the string, replacing unpaired surrogates with U+FFFD
    #[must_use]
    pub fn to_string_lossy(&self) -> String {
        String::from_utf16_lossy(&self.0)
    }

    /// Converts the string to an [`OsString`] without loss
    #[cfg(windows)]
    #[must_use]
    pub fn into_os_string(self) -> OsString {
        OsString::from_wide(&self.0)
    }

    /// Returns the code units with a NUL terminator appended
    #[must_use]
    pub fn into_vec_with_nul(mut self) -> Vec<WCHAR> {
        self.0.push(0);
        self.0
    }
}

impl From<&str> for WideString {
    fn from(s: &str) -> Self {
        Self::from_vec(s.encode_utf16().collect())
    }
}

impl fmt::Debug for WideString {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(&self.to_string_lossy(), f)
    }
}

#[cfg(test)]
mod test {
    use super::{to_wide_nul, wide_len, WideString};

    #[test]
    fn test_to_wide_nul_terminates() {
        let wide = to_wide_nul("trace").unwrap();
        assert_eq!(
            wide,
            [
                u16::from(b't'),
                u16::from(b'r'),
                u16::from(b'a'),
                u16::from(b'c'),
                u16::from(b'e'),
                0
            ]
        );
    }

    #[test]
    fn test_to_wide_nul_empty() {
        assert_eq!(to_wide_nul("").unwrap(), [0]);
    }

    #[test]
    fn test_to_wide_nul_rejects_interior_nul() {
        let err = to_wide_nul("cupti\0worker").unwrap_err();
        assert_eq!(err.position(), 5);
        assert_eq!(
            crate::HResult::from(err),
            crate::HResult::E_INVALIDARG
        );
    }

    #[test]
    fn test_to_wide_nul_surrogate_pair() {
        let wide = to_wide_nul("\u{1F9F5}").unwrap();
        assert_eq!(wide, [0xD83E, 0xDDF5, 0]);
    }

    #[test]
    fn test_wide_len() {
        let buf = [0x41, 0x42, 0x43, 0, 0x44];
        assert_eq!(unsafe { wide_len(buf.as_ptr()) }, 3);
        let empty = [0u16];
        assert_eq!(unsafe { wide_len(empty.as_ptr()) }, 0);
    }

    #[test]
    fn test_from_ptr() {
        let buf = to_wide_nul("profiler").unwrap();
        let s = unsafe { WideString::from_ptr(buf.as_ptr()) };
        assert_eq!(s.len(), 8);
        assert_eq!(s.into_string().unwrap(), "profiler");
    }

    #[test]
    fn test_from_null_ptr() {
        let s = unsafe { WideString::from_ptr(core::ptr::null()) };
        assert!(s.is_empty());
        assert_eq!(s, WideString::new());
    }

    #[test]
    fn test_from_vec_truncates_at_nul() {
        let s = WideString::from_vec(vec![0x61, 0x62, 0, 0x63]);
        assert_eq!(s.as_slice(), [0x61, 0x62]);
        assert_eq!(s.into_vec_with_nul(), [0x61, 0x62, 0]);
    }

    #[test]
    fn test_unpaired_surrogate() {
        let s = WideString::from_vec(vec![0x61, 0xD800, 0x62]);
        assert_eq!(s.to_string_lossy(), "a\u{FFFD}b");
        assert!(s.into_string().is_err());
    }

    #[test]
    fn test_debug_is_lossy_text() {
        let s = WideString::from("gpu-0");
        assert_eq!(format!("{:?}", s), "\"gpu-0\"");
    }
}
