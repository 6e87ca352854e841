//! # TVC Simulator
//!
//! Drives the vision turn controller through a synthetic road: a straight
//! lead-in, a constant-radius arc, and a straight exit. Each cycle the
//! simulator builds the lateral planner's driving path from the road
//! geometry, steers along the road, runs the controller, and follows its
//! target speed with a proportional speed loop bounded by the returned
//! acceleration limits.
//!
//! The feature toggle is read from `--params-dir` when given, otherwise it
//! is forced on in an in-memory store.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use serde::Serialize;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;
use tvc_common::config::LogLevel;
use tvc_common::consts::{DEG_TO_RAD, MS_TO_KPH, TRAJECTORY_SIZE};
use tvc_common::params::TURN_VISION_CONTROL_KEY;
use tvc_common::snapshot::{AccLimits, CycleSnapshot, LateralPlan};
use tvc_controller::config::{TvcConfig, load_config};
use tvc_controller::cycle::{CycleOutput, TurnController};
use tvc_controller::params::{FileParamStore, ManualClock, MemoryParamStore, ParamStore};

/// Planner acceleration limits before the turn controller tightens them [m/s²].
const PLANNER_ACC_LIMITS: AccLimits = AccLimits::new(-1.2, 1.5);

/// Speed loop gain [1/s].
const SPEED_KP: f64 = 0.5;

/// Spacing of the generated driving path samples [m].
const PATH_SAMPLE_STEP: f64 = 6.0;

/// Distance driven past the arc before the run ends [m].
const EXIT_LENGTH: f64 = 250.0;

/// Vision turn controller simulator.
#[derive(Parser, Debug)]
#[command(name = "tvc-sim")]
#[command(version)]
#[command(about = "Simulate the vision turn controller on a synthetic curve")]
struct Args {
    /// Controller/vehicle configuration TOML. Defaults are used when omitted.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Parameter directory holding the TurnVisionControl key file.
    #[arg(long, value_name = "DIR")]
    params_dir: Option<PathBuf>,

    /// Initial speed [m/s].
    #[arg(long, default_value_t = 25.0)]
    speed: f64,

    /// Cruise setpoint [m/s].
    #[arg(long, default_value_t = 25.0)]
    cruise: f64,

    /// Arc radius [m].
    #[arg(long, default_value_t = 120.0)]
    radius: f64,

    /// Arc length [m].
    #[arg(long, default_value_t = 150.0)]
    arc_length: f64,

    /// Straight lead-in before the arc [m].
    #[arg(long, default_value_t = 300.0)]
    lead_in: f64,

    /// Controller rate [Hz].
    #[arg(long, default_value_t = 20.0)]
    rate_hz: f64,

    /// Print one JSON record per cycle on stdout.
    #[arg(long)]
    emit_json: bool,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path),
        None => Ok(TvcConfig::default()),
    };
    let log_level = config
        .as_ref()
        .map(|c| c.shared.log_level)
        .unwrap_or_default();
    setup_tracing(&args, log_level);

    info!("TVC simulator v{} starting...", env!("CARGO_PKG_VERSION"));

    let result = config
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
        .and_then(|config| run(&args, config));
    if let Err(e) = result {
        error!("FATAL: {e}");
        process::exit(1);
    }
}

fn run(args: &Args, config: TvcConfig) -> Result<(), Box<dyn std::error::Error>> {
    let road = Road::new(args.lead_in, args.arc_length, args.radius)?;
    if !(args.rate_hz > 0.0) {
        return Err(format!("rate_hz must be > 0, got {}", args.rate_hz).into());
    }

    info!(
        "Road: lead-in {:.0} m, arc {:.0} m @ R{:.0} m, start {:.1} km/h, cruise {:.1} km/h",
        road.arc_start,
        road.arc_end - road.arc_start,
        args.radius,
        args.speed * MS_TO_KPH,
        args.cruise * MS_TO_KPH,
    );

    match &args.params_dir {
        Some(dir) => {
            info!("Reading params from {}", dir.display());
            simulate(args, &config, &road, FileParamStore::new(dir))
        }
        None => {
            let store = MemoryParamStore::new();
            store.set_bool(TURN_VISION_CONTROL_KEY, true);
            simulate(args, &config, &road, store)
        }
    }
}

/// One simulated cycle as printed with `--emit-json`.
#[derive(Debug, Serialize)]
struct CycleRecord {
    t: f64,
    s: f64,
    v_ego: f64,
    a_ego: f64,
    road_curvature: f64,
    #[serde(flatten)]
    output: CycleOutput,
}

fn simulate<S: ParamStore>(
    args: &Args,
    config: &TvcConfig,
    road: &Road,
    store: S,
) -> Result<(), Box<dyn std::error::Error>> {
    let clock = ManualClock::new(0.0);
    let mut tvc = TurnController::new(
        config.controller.clone(),
        config.vehicle,
        store,
        clock.clone(),
    );
    if !tvc.is_feature_enabled() {
        info!("{TURN_VISION_CONTROL_KEY} is off; controller will stay disabled");
    }

    let dt = 1.0 / args.rate_hz;
    let steer_gain = config.vehicle.steer_ratio * config.vehicle.wheelbase / DEG_TO_RAD;
    let end = road.arc_end + EXIT_LENGTH;

    let mut snapshot = CycleSnapshot::default();
    let mut s = 0.0;
    let mut v = args.speed;
    let mut a = 0.0;
    let mut t = 0.0;
    let mut min_v = v;

    while s < end {
        snapshot.car_state.steering_angle_deg = road.curvature_at(s) * steer_gain;
        snapshot.lateral_plan = Some(road.path_ahead(s));

        let out = tvc.update(true, v, a, args.cruise, PLANNER_ACC_LIMITS, &snapshot);
        if tvc.last_transition().is_changed() {
            info!(
                "t={t:.2}s s={s:.1}m v={:.1}km/h -> {} (target {:.1}km/h)",
                v * MS_TO_KPH,
                out.state,
                out.v_turn * MS_TO_KPH,
            );
        }
        debug!(
            "t={t:.2}s pred={:.2} cur={:.2} acc_min={:.2}",
            tvc.lat_acc_state().max_pred_lat_acc,
            tvc.lat_acc_state().current_lat_acc,
            out.acc_limits.min,
        );

        if args.emit_json {
            let record = CycleRecord {
                t,
                s,
                v_ego: v,
                a_ego: a,
                road_curvature: road.curvature_at(s),
                output: out,
            };
            println!("{}", serde_json::to_string(&record)?);
        }

        let target = out.v_turn.min(args.cruise);
        a = (SPEED_KP * (target - v)).clamp(out.acc_limits.min, out.acc_limits.max);
        v = (v + a * dt).max(0.0);
        s += v * dt;
        t += dt;
        min_v = min_v.min(v);
        clock.advance(dt);

        if v == 0.0 {
            return Err("vehicle stopped before the end of the road".into());
        }
    }

    info!(
        "Done after {t:.1}s: min speed {:.1} km/h, max lat acc on arc {:.2} m/s²",
        min_v * MS_TO_KPH,
        min_v * min_v / args.radius,
    );
    Ok(())
}

// ─── Synthetic Road ─────────────────────────────────────────────────

/// Straight → arc → straight, parametrised by travelled distance.
struct Road {
    arc_start: f64,
    arc_end: f64,
    curvature: f64,
}

impl Road {
    fn new(lead_in: f64, arc_length: f64, radius: f64) -> Result<Self, String> {
        if !(radius > 0.0) || !(arc_length >= 0.0) || !(lead_in >= 0.0) {
            return Err(format!(
                "invalid road: lead_in {lead_in}, arc_length {arc_length}, radius {radius}"
            ));
        }
        Ok(Self {
            arc_start: lead_in,
            arc_end: lead_in + arc_length,
            curvature: 1.0 / radius,
        })
    }

    fn curvature_at(&self, s: f64) -> f64 {
        if (self.arc_start..self.arc_end).contains(&s) {
            self.curvature
        } else {
            0.0
        }
    }

    /// Driving path ahead of the vehicle in its own frame.
    fn path_ahead(&self, s: f64) -> LateralPlan {
        let mut plan = LateralPlan::default();
        let mut heading = 0.0;
        let mut y = 0.0;
        let mut x = 0.0;
        for _ in 0..TRAJECTORY_SIZE {
            let step = PATH_SAMPLE_STEP;
            heading += self.curvature_at(s + x) * step;
            y += heading * step;
            x += step;
            if plan.path_x.push(x).is_err() || plan.path_y.push(y).is_err() {
                break;
            }
        }
        plan
    }
}

/// Setup tracing subscriber based on CLI arguments and the configured level.
fn setup_tracing(args: &Args, level: LogLevel) {
    let directive = if args.verbose {
        LogLevel::Debug.as_directive()
    } else {
        level.as_directive()
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .init();
    }
}
