//! Off-thread trajectory computation
//!
//! A kick can be simulated on the rayon pool while the display loop keeps
//! running. Only whole results cross back over the channel, and each carries
//! the id of the request that produced it: when kicks arrive faster than they
//! are computed, older results are discarded so the presenter only ever
//! switches to the newest complete trajectory.

use crate::core_types::units::Seconds;
use crate::error::SimulationError;
use crate::physics::PhysicalConstants;
use crate::trajectory::{KickParameters, Trajectory, TrajectorySimulator};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use tracing::debug;

/// Identifier of one `request` call, increasing per worker
pub type RequestId = u64;

/// A finished simulation handed back from the pool.
#[derive(Debug, Clone)]
pub struct CompletedKick {
    pub request: RequestId,
    pub kick: KickParameters,
    pub result: Result<Arc<Trajectory>, SimulationError>,
}

/// Background simulator for one ball.
pub struct TrajectoryWorker {
    simulator: TrajectorySimulator,
    constants: PhysicalConstants,
    time_step: Seconds,
    sender: Sender<CompletedKick>,
    receiver: Receiver<CompletedKick>,
    last_requested: RequestId,
    last_delivered: RequestId,
}

impl TrajectoryWorker {
    pub fn new(simulator: TrajectorySimulator, constants: PhysicalConstants, time_step: Seconds) -> Self {
        let (sender, receiver) = channel();
        Self {
            simulator,
            constants,
            time_step,
            sender,
            receiver,
            last_requested: 0,
            last_delivered: 0,
        }
    }

    /// Queue a kick for simulation and return its request id.
    pub fn request(&mut self, kick: KickParameters) -> RequestId {
        self.last_requested += 1;
        let request = self.last_requested;
        let sender = self.sender.clone();
        let simulator = self.simulator;
        let constants = self.constants;
        let time_step = self.time_step;

        debug!("Queued kick request {}", request);
        rayon::spawn(move || {
            let result = simulator
                .simulate(&kick, &constants, time_step)
                .map(Arc::new);
            // The worker may have been dropped; nobody is waiting then
            let _ = sender.send(CompletedKick {
                request,
                kick,
                result,
            });
        });
        request
    }

    /// True while a requested kick newer than the last delivered one is outstanding.
    pub fn is_pending(&self) -> bool {
        self.last_requested > self.last_delivered
    }

    /// Newest completed result not yet delivered, without blocking.
    ///
    /// Results older than one already delivered are dropped.
    pub fn poll_latest(&mut self) -> Option<CompletedKick> {
        let latest = self.receiver.try_iter().max_by_key(|c| c.request);
        self.accept(latest)
    }

    /// Block until the most recently requested kick has finished.
    ///
    /// Returns `None` when nothing is outstanding.
    pub fn wait_latest(&mut self) -> Option<CompletedKick> {
        if !self.is_pending() {
            return None;
        }
        let target = self.last_requested;
        while let Ok(completed) = self.receiver.recv() {
            if completed.request == target {
                return self.accept(Some(completed));
            }
            debug!("Discarding superseded kick request {}", completed.request);
        }
        None
    }

    fn accept(&mut self, completed: Option<CompletedKick>) -> Option<CompletedKick> {
        let completed = completed?;
        if completed.request <= self.last_delivered {
            debug!("Discarding stale kick request {}", completed.request);
            return None;
        }
        self.last_delivered = completed.request;
        Some(completed)
    }
}
