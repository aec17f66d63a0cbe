use kick_sim_core::SimulationError;
use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

/// Common interface for FFI error types.
///
/// `code()` is what crosses the FFI boundary; `msg()` is kept in thread-local
/// storage for `kick_sim_get_last_error`.
pub(crate) trait KickSimError {
    /// Returns the error code to be returned across the FFI boundary.
    fn code(&self) -> KickSimErrorCode;

    /// Returns the human-readable error message.
    fn msg(&self) -> &str;
}

/// Default implementation of `KickSimError` for common FFI error scenarios.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultKickSimError {
    code: KickSimErrorCode,
    msg: String,
}

impl DefaultKickSimError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"out_trajectory"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: KickSimErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Create error for an elapsed time that falls outside the recorded flight.
    pub fn no_sample(elapsed: f32, duration: f32) -> Self {
        Self {
            code: KickSimErrorCode::NoSample,
            msg: format!("No sample at {elapsed}s (flight lasts {duration}s)"),
        }
    }
}

impl KickSimError for DefaultKickSimError {
    fn code(&self) -> KickSimErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

impl From<SimulationError> for DefaultKickSimError {
    fn from(error: SimulationError) -> Self {
        let code = match &error {
            SimulationError::InvalidParameter { .. } => KickSimErrorCode::InvalidParameter,
            SimulationError::Diverged { .. } => KickSimErrorCode::SimulationDiverged,
        };
        Self {
            code,
            msg: error.to_string(),
        }
    }
}

/// FFI error codes returned by kick simulation functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KickSimErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// A kick parameter, physical constant or time step was out of range.
    InvalidParameter = 2,

    /// The ball never came down within the step cap.
    SimulationDiverged = 3,

    /// The requested elapsed time has no recorded position.
    NoSample = 4,
}

impl From<DefaultKickSimError> for KickSimErrorCode {
    fn from(error: DefaultKickSimError) -> Self {
        error.code
    }
}

thread_local! {
    /// Most recent FFI error on this thread (C string, error code).
    /// The `CString` lives here so the pointer handed out stays valid.
    static LAST_ERROR: RefCell<(Option<CString>, KickSimErrorCode)> = const { RefCell::new((None, KickSimErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, KickSimErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, KickSimErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns `null` if no error has occurred on this thread.
///
/// # Lifetime
/// The returned pointer is valid until the next FFI call on this thread that
/// sets or clears the error, or until the thread terminates.
///
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```c
/// KickSimTrajectory* traj = NULL;
/// KickSimErrorCode err = kick_sim_trajectory_new(kick, &constants, 0.01f, &traj);
/// if (err != Ok) {
///     const char* error = kick_sim_get_last_error();
///     if (error) {
///         printf("Kick failed: %s\n", error);
///     }
/// }
/// ```
#[no_mangle]
pub extern "C" fn kick_sim_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code on this thread.
///
/// Returns `KickSimErrorCode::Ok` (0) if the last call succeeded or no call
/// has been made yet.
#[no_mangle]
pub extern "C" fn kick_sim_get_last_error_code() -> KickSimErrorCode {
    with_last_error(|(_cstring, code)| *code)
}
