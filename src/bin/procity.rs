#[macro_use]
extern crate log;

use procity::city::{CityOptions, Scene};
use procity::core::common::Float;
use procity::core::curve::InterpolationMode;
use procity::core::error::Result;
use procity::core::geometry::Vector3f;
use procity::core::options::{FrameWindow, SceneOptions};
use procity::core::progress_reporter::ProgressReporter;
use procity::core::vlog::set_log_level;
use structopt::StructOpt;

/// Generate a procedural city and sample the motion of its traffic.
#[derive(StructOpt, Debug)]
#[structopt(name = "procity")]
struct Args {
    /// Number of streets along x
    #[structopt(long, default_value = "40")]
    streets_x: u32,
    /// Number of streets along y
    #[structopt(long, default_value = "40")]
    streets_y: u32,
    /// Side of a city block
    #[structopt(long, default_value = "4")]
    block_size: Float,
    #[structopt(long, default_value = "4")]
    street_width: Float,
    #[structopt(long, default_value = "2")]
    min_height: Float,
    #[structopt(long, default_value = "40")]
    max_height: Float,
    #[structopt(long, default_value = "0")]
    min_variability: Float,
    #[structopt(long, default_value = "0.2")]
    max_variability: Float,
    #[structopt(long, default_value = "400")]
    vehicles: u32,
    /// Vehicle speed in streets per second
    #[structopt(long, default_value = "1.6")]
    speed: Float,
    /// Turns per route, 0 for straight crossings
    #[structopt(long, default_value = "20")]
    turns: u32,
    #[structopt(long, default_value = "0")]
    seed: u64,
    /// LINEAR, HERMITE or CATMULL
    #[structopt(long, default_value = "LINEAR")]
    interpolation: InterpolationMode,
    /// Catmull-Rom tension
    #[structopt(long, default_value = "0.1")]
    tau: Float,
    /// Gain applied to Hermite tangent handles
    #[structopt(long, default_value = "15")]
    handle_gain: Float,
    /// Model axis that points along the travel direction: x, y or z
    #[structopt(long, default_value = "y", parse(try_from_str = parse_forward))]
    forward: Vector3f,
    /// Vertical bob amplitude
    #[structopt(long, default_value = "2")]
    amplitude: Float,
    /// Vertical bob frequency
    #[structopt(long, default_value = "1")]
    frequency: Float,
    /// Bank every vehicle into its turns
    #[structopt(long)]
    banking: bool,
    /// Move vehicles at constant speed along their routes
    #[structopt(long)]
    reparametrize: bool,
    #[structopt(long, default_value = "24")]
    fps: Float,
    #[structopt(long, default_value = "0")]
    frame_start: Float,
    #[structopt(long, default_value = "250")]
    frame_end: Float,
    /// Number of vehicles whose motion is printed
    #[structopt(long, default_value = "3")]
    print: usize,
    /// Frames between printed samples
    #[structopt(long, default_value = "24")]
    every: usize,
    /// Per-frame trace verbosity (repeat for more)
    #[structopt(short = "v", parse(from_occurrences))]
    verbose: usize,
    /// No progress bar
    #[structopt(short, long)]
    quiet: bool
}

fn parse_forward(s: &str) -> std::result::Result<Vector3f, String> {
    match s.to_ascii_lowercase().as_str() {
        "x" => Ok(Vector3f::X),
        "y" => Ok(Vector3f::Y),
        "z" => Ok(Vector3f::Z),
        _ => Err(format!("forward axis must be x, y or z, got {}", s)),
    }
}

impl Args {
    fn city_options(&self) -> CityOptions {
        CityOptions {
            streets_x: self.streets_x,
            streets_y: self.streets_y,
            block_size: self.block_size,
            street_width: self.street_width,
            min_height: self.min_height,
            max_height: self.max_height,
            min_variability: self.min_variability,
            max_variability: self.max_variability,
            vehicle_count: self.vehicles,
            vehicle_speed: self.speed,
            turns: self.turns,
            seed: self.seed,
            ..CityOptions::default()
        }
    }

    fn scene_options(&self) -> SceneOptions {
        SceneOptions {
            interpolation: self.interpolation,
            tau: self.tau,
            handle_gain: self.handle_gain,
            forward: self.forward,
            banking: self.banking,
            frames_per_second: self.fps,
            window: FrameWindow::new(self.frame_start, self.frame_end),
            bob_amplitude: self.amplitude,
            bob_frequency: self.frequency,
            ..SceneOptions::default()
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let city = args.city_options();
    let scene_options = args.scene_options();
    let scene = {
        let progress = ProgressReporter::new(city.vehicle_count as u64, "Distance curves", args.quiet);
        let mut scene = Scene::generate(&city, scene_options, Some(&progress))?;
        info!("built distance curves in {} ms", progress.elapsed_ms());
        if args.reparametrize {
            let ids: Vec<_> = scene.vehicle_ids().collect();
            for id in ids {
                scene.vehicle_mut(id)?.set_reparametrize(true);
            }
        }
        scene
    };

    println!("{} buildings, {} vehicles", scene.buildings().len(), scene.len());
    let window = scene.options().window;
    for id in scene.vehicle_ids().take(args.print) {
        println!("{}", scene.vehicle(id)?.name);
        let mut frame = window.start;
        while frame <= window.end {
            let p: Vec<Float> = (0..3).map(|axis| scene.position(id, frame, axis)).collect::<Result<_>>()?;
            let q: Vec<Float> = (0..4).map(|axis| scene.orientation(id, frame, axis)).collect::<Result<_>>()?;
            println!("  {:>6} pos ({:9.3}, {:9.3}, {:9.3}) rot ({:7.4}, {:7.4}, {:7.4}, {:7.4})",
                frame, p[0], p[1], p[2], q[0], q[1], q[2], q[3]);
            frame += args.every.max(1) as Float;
        }
    }
    Ok(())
}

fn main() {
    let args = Args::from_args();
    let filter = if args.verbose > 0 { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();
    set_log_level(args.verbose);
    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}
