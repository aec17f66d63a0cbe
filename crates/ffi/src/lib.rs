//! C ABI for the kick simulator.
//!
//! A host application creates a trajectory with `kick_sim_trajectory_new`,
//! samples it once per display refresh with `kick_sim_trajectory_sample`, and
//! releases it with `kick_sim_trajectory_destroy`. Every fallible call returns
//! a `KickSimErrorCode`; the matching message is kept per thread and read with
//! `kick_sim_get_last_error`.

mod error;
mod helpers;
mod trajectory;

pub use error::{kick_sim_get_last_error, kick_sim_get_last_error_code, KickSimErrorCode};
pub use trajectory::{
    kick_sim_default_constants, kick_sim_prototype_constants, kick_sim_trajectory_destroy,
    kick_sim_trajectory_duration, kick_sim_trajectory_len, kick_sim_trajectory_new,
    kick_sim_trajectory_sample, KickSimConstants, KickSimKick, KickSimTrajectory, KickSimVec3,
};
