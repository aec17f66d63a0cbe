use clap::Parser;
use kick_sim_core::{
    BallMass, Degrees, FrameUpdate, GroundPlane, KgPerCubicMeter, KickLifecycle, KickParameters,
    Kilograms, Meters, MetersPerSecond, PhysicalConstants, Seconds, TrajectorySimulator,
    TrajectoryWorker, Vec3,
};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info};

/// Kick simulation demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "kick-sim-demo")]
#[command(about = "Simulate a kicked ball and replay it frame by frame", long_about = None)]
struct Args {
    /// Launch speed in m/s
    #[arg(short, long, default_value_t = 15.0)]
    speed: f32,

    /// Launch angle above the horizontal in degrees
    #[arg(short, long, default_value_t = 30.0)]
    angle: f32,

    /// Sideways launch fraction (x component = curl × speed)
    #[arg(short, long, default_value_t = 0.15)]
    curl: f32,

    /// Spin about x in rad/s
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    spin_x: f32,

    /// Spin about y in rad/s (positive bends towards -x)
    #[arg(long, default_value_t = 20.0, allow_negative_numbers = true)]
    spin_y: f32,

    /// Spin about z in rad/s
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    spin_z: f32,

    /// Launch position x in meters
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    launch_x: f32,

    /// Launch position y in meters
    #[arg(long, default_value_t = -1.4, allow_negative_numbers = true)]
    launch_y: f32,

    /// Launch position z in meters
    #[arg(long, default_value_t = 9.5, allow_negative_numbers = true)]
    launch_z: f32,

    /// Integration time step in seconds
    #[arg(short, long, default_value_t = 0.01)]
    time_step: f32,

    /// Physical preset (regulation, prototype)
    #[arg(short, long, default_value = "regulation")]
    preset: String,

    /// Air density in kg/m³ (overrides preset)
    #[arg(long)]
    air_density: Option<f32>,

    /// Drag coefficient (overrides preset)
    #[arg(long)]
    drag_coefficient: Option<f32>,

    /// Magnus coefficient in kg (overrides preset)
    #[arg(long)]
    magnus: Option<f32>,

    /// Ball radius in meters (overrides preset)
    #[arg(long)]
    radius: Option<f32>,

    /// Ball mass in kg (overrides preset)
    #[arg(long)]
    mass: Option<f32>,

    /// Fixed ground plane height in meters (default: ground under the ball)
    #[arg(long, allow_negative_numbers = true)]
    ground_height: Option<f32>,

    /// Step cap before a flight counts as diverged
    #[arg(long, default_value_t = kick_sim_core::DEFAULT_MAX_STEPS)]
    max_steps: usize,

    /// Display refresh rate used for the replay
    #[arg(short, long, default_value_t = 60.0)]
    fps: f32,

    /// Print every Nth replay frame
    #[arg(short, long, default_value_t = 6)]
    report_every: usize,
}

impl Args {
    fn constants(&self) -> Option<PhysicalConstants> {
        let mut constants = PhysicalConstants::preset(&self.preset)?;
        if let Some(density) = self.air_density {
            constants = constants.with_air_density(KgPerCubicMeter::new(density));
        }
        if let Some(cd) = self.drag_coefficient {
            constants = constants.with_drag_coefficient(cd);
        }
        if let Some(magnus) = self.magnus {
            constants = constants.with_magnus_coefficient(magnus);
        }
        if let Some(radius) = self.radius {
            constants = constants.with_ball_radius(Meters::new(radius));
        }
        if let Some(mass) = self.mass {
            constants = constants.with_ball_mass(BallMass::Fixed(Kilograms::new(mass)));
        }
        if let Some(height) = self.ground_height {
            constants = constants.with_ground(GroundPlane::Height(Meters::new(height)));
        }
        Some(constants)
    }

    fn kick(&self) -> KickParameters {
        KickParameters::new(
            Vec3::new(self.launch_x, self.launch_y, self.launch_z),
            MetersPerSecond::new(self.speed),
            Degrees::new(self.angle),
        )
        .with_curl_offset(self.curl)
        .with_spin(Vec3::new(self.spin_x, self.spin_y, self.spin_z))
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    println!("=== Kick Simulation Demo ===\n");

    let Some(constants) = args.constants() else {
        eprintln!("Unknown preset '{}' (expected regulation or prototype)", args.preset);
        return ExitCode::FAILURE;
    };
    if !(args.fps.is_finite() && args.fps > 0.0) {
        eprintln!("--fps must be positive, got {}", args.fps);
        return ExitCode::FAILURE;
    }

    println!(
        "Ball: radius {}, mass {}, Cd {:.2}, Magnus {:.4} kg",
        constants.ball_radius,
        constants.mass(),
        constants.drag_coefficient,
        constants.magnus_coefficient
    );
    println!(
        "Air: {}, gravity ({:.2}, {:.2}, {:.2})",
        constants.air_density, constants.gravity.x, constants.gravity.y, constants.gravity.z
    );

    let kick = args.kick();
    println!(
        "Kick: {} at {} from ({:.2}, {:.2}, {:.2}), curl {:.2}, spin ({:.1}, {:.1}, {:.1})\n",
        kick.launch_speed(),
        kick.launch_angle(),
        args.launch_x,
        args.launch_y,
        args.launch_z,
        args.curl,
        args.spin_x,
        args.spin_y,
        args.spin_z
    );

    // Compute off the display thread, as an interactive front end would
    let mut worker = TrajectoryWorker::new(
        TrajectorySimulator::with_max_steps(args.max_steps),
        constants,
        Seconds::new(args.time_step),
    );
    worker.request(kick);
    let Some(completed) = worker.wait_latest() else {
        eprintln!("Simulation worker returned no result");
        return ExitCode::FAILURE;
    };
    let trajectory = match completed.result {
        Ok(trajectory) => trajectory,
        Err(err) => {
            eprintln!("Simulation failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!("=== Flight Summary ===");
    println!("Samples: {}", trajectory.len());
    println!("Flight time: {}", trajectory.duration());
    if let Some((t, apex)) = trajectory.apex() {
        println!("Apex: {:.2} m at {}", apex.y, t);
    }
    if let Some(landing) = trajectory.landing_point() {
        println!(
            "Landing: ({:.2}, {:.2}, {:.2})",
            landing.x, landing.y, landing.z
        );
    }
    println!("Horizontal range: {}\n", trajectory.horizontal_range());

    replay(&trajectory, args.fps, args.report_every.max(1));
    ExitCode::SUCCESS
}

/// Step a virtual display clock at `fps` and drive the lifecycle until the
/// ball lands.
fn replay(trajectory: &Arc<kick_sim_core::Trajectory>, fps: f32, report_every: usize) {
    let frame = Seconds::new(1.0 / fps);
    let mut lifecycle = KickLifecycle::new();
    let mut now = Seconds::new(0.0);
    lifecycle.kick(Arc::clone(trajectory), now);

    println!("Replay at {fps:.0} fps");
    println!("Frame | Time(s) |       x |       y |       z");
    println!("------|---------|---------|---------|--------");

    let mut frame_index = 0_usize;
    loop {
        match lifecycle.tick(now) {
            FrameUpdate::Idle => break,
            FrameUpdate::Hold => debug!("frame {frame_index}: holding at launch"),
            FrameUpdate::Move(p) => {
                debug!("frame {frame_index}: ball at ({:.3}, {:.3}, {:.3})", p.x, p.y, p.z);
                if frame_index % report_every == 0 {
                    println!(
                        "{:5} | {:7.3} | {:7.2} | {:7.2} | {:7.2}",
                        frame_index, *now, p.x, p.y, p.z
                    );
                }
            }
            FrameUpdate::Landed(p) => {
                info!("Ball landed at ({:.2}, {:.2}, {:.2})", p.x, p.y, p.z);
                println!(
                    "{:5} | {:7.3} | {:7.2} | {:7.2} | {:7.2}  landed",
                    frame_index, *now, p.x, p.y, p.z
                );
                break;
            }
        }
        frame_index += 1;
        now = frame * frame_index as f32;
    }

    println!("\n=== Replay Complete ({frame_index} frames) ===");
}
