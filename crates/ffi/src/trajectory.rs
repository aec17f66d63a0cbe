use kick_sim_core::{
    BallMass, Degrees, GroundPlane, KgPerCubicMeter, KickParameters, Kilograms, Meters,
    MetersPerSecond, PhysicalConstants, Seconds, Trajectory, Vec3,
};
use std::ptr;
use tracing::debug;

use crate::error::{DefaultKickSimError, KickSimErrorCode};
use crate::helpers::{clear_last_error, track_error, track_result};

/// Plain 3D vector passed by value across the C boundary.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct KickSimVec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<Vec3> for KickSimVec3 {
    fn from(v: Vec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl From<KickSimVec3> for Vec3 {
    fn from(v: KickSimVec3) -> Self {
        Vec3::new(v.x, v.y, v.z)
    }
}

/// Initial conditions of one kick.
///
/// `launch_angle` is in degrees above the horizontal; the ball travels
/// towards -z, with `curl_offset` scaling the sideways (x) launch component.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KickSimKick {
    pub launch_position: KickSimVec3,
    pub launch_speed: f32,
    pub launch_angle: f32,
    pub curl_offset: f32,
    /// Angular velocity (rad/s)
    pub spin: KickSimVec3,
}

impl From<KickSimKick> for KickParameters {
    fn from(kick: KickSimKick) -> Self {
        KickParameters::new(
            kick.launch_position.into(),
            MetersPerSecond::new(kick.launch_speed),
            Degrees::new(kick.launch_angle),
        )
        .with_curl_offset(kick.curl_offset)
        .with_spin(kick.spin.into())
    }
}

/// Ball and air parameters in C layout.
///
/// The mass is always explicit here; density-derived presets are resolved
/// before they are handed out. When `ground_under_ball` is true the ground
/// sits one radius below the launch position and `ground_height` is ignored.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KickSimConstants {
    pub gravity: KickSimVec3,
    pub air_density: f32,
    pub drag_coefficient: f32,
    pub ball_radius: f32,
    pub ball_mass: f32,
    pub magnus_coefficient: f32,
    pub ground_under_ball: bool,
    pub ground_height: f32,
}

impl From<PhysicalConstants> for KickSimConstants {
    fn from(constants: PhysicalConstants) -> Self {
        let (ground_under_ball, ground_height) = match constants.ground {
            GroundPlane::UnderBall => (true, 0.0),
            GroundPlane::Height(height) => (false, *height),
        };
        Self {
            gravity: constants.gravity.into(),
            air_density: *constants.air_density,
            drag_coefficient: constants.drag_coefficient,
            ball_radius: *constants.ball_radius,
            ball_mass: *constants.mass(),
            magnus_coefficient: constants.magnus_coefficient,
            ground_under_ball,
            ground_height,
        }
    }
}

impl From<KickSimConstants> for PhysicalConstants {
    fn from(constants: KickSimConstants) -> Self {
        let ground = if constants.ground_under_ball {
            GroundPlane::UnderBall
        } else {
            GroundPlane::Height(Meters::new(constants.ground_height))
        };
        PhysicalConstants {
            gravity: constants.gravity.into(),
            air_density: KgPerCubicMeter::new(constants.air_density),
            drag_coefficient: constants.drag_coefficient,
            ball_radius: Meters::new(constants.ball_radius),
            ball_mass: BallMass::Fixed(Kilograms::new(constants.ball_mass)),
            magnus_coefficient: constants.magnus_coefficient,
            ground,
        }
    }
}

/// Immutable computed flight, owned by the caller through an opaque pointer.
///
/// # Thread Safety
/// A trajectory is never modified after creation, so the same handle may be
/// sampled from any number of threads at once.
pub struct KickSimTrajectory {
    pub(crate) trajectory: Trajectory,
}

/// Regulation match ball at sea level.
#[no_mangle]
pub extern "C" fn kick_sim_default_constants() -> KickSimConstants {
    PhysicalConstants::regulation().into()
}

/// Oversized 1 m prototype ball, mass resolved from its density.
#[no_mangle]
pub extern "C" fn kick_sim_prototype_constants() -> KickSimConstants {
    PhysicalConstants::prototype().into()
}

/// Simulate a kick and return the trajectory via out-parameter.
///
/// Returns
/// - `KickSimErrorCode::Ok` (0) - success, `out_trajectory` holds a new handle
/// - `KickSimErrorCode::NullPointer` - `constants` or `out_trajectory` is null
/// - `KickSimErrorCode::InvalidParameter` - a kick field, constant or `time_step` is out of range
/// - `KickSimErrorCode::SimulationDiverged` - the ball never reached the ground
///
/// On failure `out_trajectory` is set to null; call `kick_sim_get_last_error()`
/// for a description.
///
/// # Safety
///
/// - `constants` must point to a valid `KickSimConstants`.
/// - `out_trajectory` must be a valid, non-null pointer to writable memory.
/// - The caller owns the returned handle and MUST release it with
///   `kick_sim_trajectory_destroy` exactly once.
///
/// Example (C)
/// ```c
/// KickSimConstants constants = kick_sim_default_constants();
/// KickSimTrajectory* traj = NULL;
/// if (kick_sim_trajectory_new(kick, &constants, 0.01f, &traj) != Ok) {
///     fprintf(stderr, "%s\n", kick_sim_get_last_error());
///     return;
/// }
/// // ... sample traj every frame ...
/// kick_sim_trajectory_destroy(traj);
/// ```
#[no_mangle]
pub unsafe extern "C" fn kick_sim_trajectory_new(
    kick: KickSimKick,
    constants: *const KickSimConstants,
    time_step: f32,
    out_trajectory: *mut *mut KickSimTrajectory,
) -> KickSimErrorCode {
    if out_trajectory.is_null() {
        return track_error(&DefaultKickSimError::null_pointer("out_trajectory"));
    }
    if constants.is_null() {
        unsafe {
            *out_trajectory = ptr::null_mut();
        }
        return track_error(&DefaultKickSimError::null_pointer("constants"));
    }

    // SAFETY: checked non-null above; validity is the caller's contract.
    let constants = PhysicalConstants::from(unsafe { *constants });
    let result = kick_sim_core::simulate(&kick.into(), &constants, Seconds::new(time_step))
        .map_err(DefaultKickSimError::from);

    match track_result(result) {
        Ok(trajectory) => {
            debug!("Created trajectory handle with {} samples", trajectory.len());
            unsafe {
                *out_trajectory = Box::into_raw(Box::new(KickSimTrajectory { trajectory }));
            }
            KickSimErrorCode::Ok
        }
        Err(code) => {
            unsafe {
                *out_trajectory = ptr::null_mut();
            }
            code
        }
    }
}

/// Position of the ball `elapsed` seconds after the kick.
///
/// Returns `KickSimErrorCode::NoSample` when `elapsed` is before the first
/// recorded step or after the landing step; `out_position` is left untouched
/// in that case and the caller should keep the ball where it is.
///
/// # Safety
///
/// - `ptr` must be a live handle from `kick_sim_trajectory_new`.
/// - `out_position` must be a valid, non-null pointer to writable memory.
#[no_mangle]
pub unsafe extern "C" fn kick_sim_trajectory_sample(
    ptr: *const KickSimTrajectory,
    elapsed: f32,
    out_position: *mut KickSimVec3,
) -> KickSimErrorCode {
    if ptr.is_null() {
        return track_error(&DefaultKickSimError::null_pointer("ptr"));
    }
    if out_position.is_null() {
        return track_error(&DefaultKickSimError::null_pointer("out_position"));
    }

    // SAFETY: checked non-null above; the handle is immutable and never freed
    // while the caller still samples it.
    let trajectory = unsafe { &(*ptr).trajectory };
    match trajectory.sample_at(Seconds::new(elapsed)) {
        Some(position) => {
            unsafe {
                *out_position = position.into();
            }
            clear_last_error();
            KickSimErrorCode::Ok
        }
        None => track_error(&DefaultKickSimError::no_sample(
            elapsed,
            *trajectory.duration(),
        )),
    }
}

/// Number of recorded samples, or 0 for a null handle.
///
/// # Safety
///
/// `ptr` must be null or a live handle from `kick_sim_trajectory_new`.
#[no_mangle]
pub unsafe extern "C" fn kick_sim_trajectory_len(ptr: *const KickSimTrajectory) -> usize {
    if ptr.is_null() {
        return 0;
    }
    unsafe { (*ptr).trajectory.len() }
}

/// Time of the landing sample in seconds, or 0 for a null handle.
///
/// # Safety
///
/// `ptr` must be null or a live handle from `kick_sim_trajectory_new`.
#[no_mangle]
pub unsafe extern "C" fn kick_sim_trajectory_duration(ptr: *const KickSimTrajectory) -> f32 {
    if ptr.is_null() {
        return 0.0;
    }
    unsafe { *(*ptr).trajectory.duration() }
}

/// Destroys a trajectory previously created by `kick_sim_trajectory_new`.
///
/// A null `ptr` is a no-op.
///
/// # Safety
/// - The pointer MUST have been created by `kick_sim_trajectory_new` and not
///   freed already.
/// - The caller must not use the pointer again afterwards.
#[no_mangle]
pub unsafe extern "C" fn kick_sim_trajectory_destroy(ptr: *mut KickSimTrajectory) {
    if ptr.is_null() {
        return;
    }

    // SAFETY: the pointer came from `Box::into_raw` in `kick_sim_trajectory_new`.
    unsafe {
        drop(Box::from_raw(ptr));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{kick_sim_get_last_error, kick_sim_get_last_error_code};
    use std::ffi::CStr;

    fn kick(speed: f32) -> KickSimKick {
        KickSimKick {
            launch_position: KickSimVec3 {
                x: 0.0,
                y: -1.4,
                z: 9.5,
            },
            launch_speed: speed,
            launch_angle: 30.0,
            curl_offset: 0.15,
            spin: KickSimVec3 {
                x: 0.0,
                y: 20.0,
                z: 0.0,
            },
        }
    }

    fn create(kick: KickSimKick, constants: &KickSimConstants) -> (KickSimErrorCode, *mut KickSimTrajectory) {
        let mut handle = ptr::null_mut();
        let code = unsafe {
            kick_sim_trajectory_new(kick, ptr::from_ref(constants), 0.01, ptr::from_mut(&mut handle))
        };
        (code, handle)
    }

    #[test]
    fn test_constants_round_trip_through_c_layout() {
        let c = kick_sim_default_constants();
        assert_eq!(PhysicalConstants::from(c), PhysicalConstants::regulation());
        assert!(c.ground_under_ball);

        let prototype = kick_sim_prototype_constants();
        assert_eq!(prototype.ball_radius, 1.0);
        assert_eq!(prototype.ball_mass, *PhysicalConstants::prototype().mass());
    }

    #[test]
    fn test_create_sample_destroy() {
        let constants = kick_sim_default_constants();
        let (code, handle) = create(kick(15.0), &constants);
        assert_eq!(code, KickSimErrorCode::Ok);
        assert!(!handle.is_null());
        assert_eq!(kick_sim_get_last_error_code(), KickSimErrorCode::Ok);

        let direct = kick_sim_core::simulate(
            &kick(15.0).into(),
            &PhysicalConstants::regulation(),
            Seconds::new(0.01),
        )
        .unwrap();
        unsafe {
            assert_eq!(kick_sim_trajectory_len(handle), direct.len());
            assert_eq!(kick_sim_trajectory_duration(handle), *direct.duration());

            let mut position = KickSimVec3::default();
            let code = kick_sim_trajectory_sample(handle, 0.5, ptr::from_mut(&mut position));
            assert_eq!(code, KickSimErrorCode::Ok);
            assert_eq!(Vec3::from(position), direct.sample_at(Seconds::new(0.5)).unwrap());

            kick_sim_trajectory_destroy(handle);
        }
    }

    #[test]
    fn test_sample_outside_flight_reports_no_sample() {
        let (_, handle) = create(kick(15.0), &kick_sim_default_constants());
        unsafe {
            let mut position = KickSimVec3::default();
            assert_eq!(
                kick_sim_trajectory_sample(handle, 0.0, ptr::from_mut(&mut position)),
                KickSimErrorCode::NoSample
            );
            assert_eq!(
                kick_sim_trajectory_sample(handle, 1000.0, ptr::from_mut(&mut position)),
                KickSimErrorCode::NoSample
            );
            assert_eq!(position, KickSimVec3::default());
            kick_sim_trajectory_destroy(handle);
        }
    }

    #[test]
    fn test_invalid_kick_maps_to_invalid_parameter() {
        let (code, handle) = create(kick(-3.0), &kick_sim_default_constants());
        assert_eq!(code, KickSimErrorCode::InvalidParameter);
        assert!(handle.is_null());
        assert_eq!(kick_sim_get_last_error_code(), KickSimErrorCode::InvalidParameter);

        let msg = unsafe { CStr::from_ptr(kick_sim_get_last_error()) };
        assert!(msg.to_str().unwrap().contains("launch_speed"));
    }

    #[test]
    fn test_weightless_kick_maps_to_diverged() {
        let constants = KickSimConstants {
            gravity: KickSimVec3::default(),
            air_density: 0.0,
            magnus_coefficient: 0.0,
            ..kick_sim_default_constants()
        };
        let mut flat = kick(10.0);
        flat.launch_angle = 0.0;
        flat.spin = KickSimVec3::default();

        let (code, handle) = create(flat, &constants);
        assert_eq!(code, KickSimErrorCode::SimulationDiverged);
        assert!(handle.is_null());
    }

    #[test]
    fn test_null_pointers() {
        let mut handle = ptr::null_mut();
        let code = unsafe {
            kick_sim_trajectory_new(kick(15.0), ptr::null(), 0.01, ptr::from_mut(&mut handle))
        };
        assert_eq!(code, KickSimErrorCode::NullPointer);
        assert!(handle.is_null());

        let constants = kick_sim_default_constants();
        let code = unsafe {
            kick_sim_trajectory_new(kick(15.0), ptr::from_ref(&constants), 0.01, ptr::null_mut())
        };
        assert_eq!(code, KickSimErrorCode::NullPointer);

        unsafe {
            let mut position = KickSimVec3::default();
            assert_eq!(
                kick_sim_trajectory_sample(ptr::null(), 0.5, ptr::from_mut(&mut position)),
                KickSimErrorCode::NullPointer
            );
            assert_eq!(kick_sim_trajectory_len(ptr::null()), 0);
            kick_sim_trajectory_destroy(ptr::null_mut());
        }
    }
}
