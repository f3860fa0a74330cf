use core::fmt;

use crate::primitives::HRESULT;

const FACILITY_WIN32: u32 = 7;

///
/// A status returned by `SetThreadDescription` or `GetThreadDescription`.
///
/// The value is carried exactly as the OS produced it. The constants below only name the codes these apis are documented to return,
/// other codes pass through unchanged.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct HResult(HRESULT);

#[allow(clippy::cast_possible_wrap)]
impl HResult {
    /// The operation succeeded
    pub const S_OK: Self = Self(0);
    /// The operation is not implemented on this host
    pub const E_NOTIMPL: Self = Self(0x8000_4001_u32 as i32);
    /// The handle is not a valid thread handle (`ERROR_INVALID_HANDLE`)
    pub const E_HANDLE: Self = Self::from_win32(6);
    /// The handle lacks the access right required by the operation (`ERROR_ACCESS_DENIED`)
    pub const E_ACCESSDENIED: Self = Self::from_win32(5);
    /// The OS could not allocate the returned description (`ERROR_NOT_ENOUGH_MEMORY`)
    pub const E_OUTOFMEMORY: Self = Self::from_win32(14);
    /// An argument was rejected (`ERROR_INVALID_PARAMETER`)
    pub const E_INVALIDARG: Self = Self::from_win32(87);
    /// The export does not exist on this host (`ERROR_PROC_NOT_FOUND`)
    pub const E_PROC_NOT_FOUND: Self = Self::from_win32(127);

    /// Wraps a raw status
    #[must_use]
    pub const fn from_raw(raw: HRESULT) -> Self {
        Self(raw)
    }

    /// Builds the status corresponding to a win32 error code, as the `HRESULT_FROM_WIN32` macro does.
    /// Codes that are already zero or negative when read as an `HRESULT` are returned unchanged.
    #[must_use]
    pub const fn from_win32(code: u32) -> Self {
        if code as i32 <= 0 {
            Self(code as i32)
        } else {
            Self(((code & 0xFFFF) | (FACILITY_WIN32 << 16) | 0x8000_0000) as i32)
        }
    }

    /// The raw status
    #[must_use]
    pub const fn code(self) -> HRESULT {
        self.0
    }

    /// Whether the status indicates success (the severity bit is clear)
    #[must_use]
    pub const fn is_ok(self) -> bool {
        self.0 >= 0
    }

    /// Whether the status indicates failure (the severity bit is set)
    #[must_use]
    pub const fn is_err(self) -> bool {
        self.0 < 0
    }

    /// The facility field of the status
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn facility(self) -> u32 {
        ((self.0 as u32) >> 16) & 0x1FFF
    }

    /// The win32 error code carried by a failure status in the win32 facility, if any
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn win32_code(self) -> Option<u32> {
        if self.is_err() && self.facility() == FACILITY_WIN32 {
            Some((self.0 as u32) & 0xFFFF)
        } else {
            None
        }
    }

    /// Converts the status into a [`Result`], so it can be propagated with `?`
    ///
    /// # Errors
    /// Returns `Err(self)` if the status is a failure
    pub const fn ok(self) -> Result<(), Self> {
        if self.is_ok() {
            Ok(())
        } else {
            Err(self)
        }
    }

    const fn name(self) -> Option<&'static str> {
        match self {
            Self::S_OK => Some("S_OK"),
            Self::E_NOTIMPL => Some("E_NOTIMPL"),
            Self::E_HANDLE => Some("E_HANDLE"),
            Self::E_ACCESSDENIED => Some("E_ACCESSDENIED"),
            Self::E_OUTOFMEMORY => Some("E_OUTOFMEMORY"),
            Self::E_INVALIDARG => Some("E_INVALIDARG"),
            Self::E_PROC_NOT_FOUND => Some("E_PROC_NOT_FOUND"),
            _ => None,
        }
    }
}

impl From<HRESULT> for HResult {
    fn from(raw: HRESULT) -> Self {
        Self(raw)
    }
}

impl From<HResult> for HRESULT {
    fn from(status: HResult) -> Self {
        status.0
    }
}

impl fmt::Debug for HResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "HResult({:#010X} {})", self.0, name),
            None => write!(f, "HResult({:#010X})", self.0),
        }
    }
}

impl fmt::Display for HResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} ({:#010X})", name, self.0),
            None => write!(f, "HRESULT {:#010X}", self.0),
        }
    }
}

impl std::error::Error for HResult {}

impl From<HResult> for std::io::Error {
    fn from(status: HResult) -> Self {
        #[cfg(windows)]
        if let Some(code) = status.win32_code() {
            #[allow(clippy::cast_possible_wrap)]
            return Self::from_raw_os_error(code as i32);
        }
        Self::new(std::io::ErrorKind::Other, status)
    }
}
