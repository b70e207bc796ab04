mod preview;
mod scenes;

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::Parser;
use orb_core::{load_scene, Camera, Scene};
use orb_math::DVec3;
use orb_renderer::{FrameReader, LoopConfig, RenderConfig, RenderLoop, Renderer};

#[derive(Parser, Debug)]
#[command(name = "orb")]
#[command(version)]
#[command(about = "Ray cast a sphere scene on the CPU")]
#[command(long_about = "
orb renders spheres lit by ambient, point and directional lights, with hard
shadows and Phong highlights. Frames are rendered continuously on a background
thread while a headless presenter reports each finished frame.

Example usage:
  orb --frames 10 --preview
  orb --scene scenes/three_spheres.json --seconds 5 --max-fps 30
  orb --random-spheres 50 --seed 7
")]
struct Args {
    /// Image width in pixels
    #[arg(long, default_value_t = 1024)]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 768)]
    height: u32,

    /// Distance from the camera to the viewport plane
    #[arg(long, default_value_t = 500.0)]
    distance_to_viewport: f64,

    /// Furthest visible point, as a multiple of the primary ray direction
    #[arg(long, default_value_t = 10.0)]
    view_distance_multiple: f64,

    /// JSON scene file; its camera, if any, overrides the camera flags
    #[arg(long, value_name = "FILE", conflicts_with = "random_spheres")]
    scene: Option<PathBuf>,

    /// Render this many randomly placed spheres instead of the default scene
    #[arg(long, value_name = "N")]
    random_spheres: Option<usize>,

    /// Seed for --random-spheres (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many frames
    #[arg(long, value_name = "N")]
    frames: Option<u64>,

    /// Stop after this many seconds
    #[arg(long)]
    seconds: Option<f64>,

    /// Frame rate limit for the render thread
    #[arg(long)]
    max_fps: Option<f64>,

    /// How often the presenter checks for a new frame
    #[arg(long, default_value_t = DEFAULT_PRESENT_HZ)]
    present_hz: f64,

    /// Print an ASCII preview of the last frame
    #[arg(long)]
    preview: bool,
}

/// When the presenter should shut the render loop down.
#[derive(Debug, Clone, Copy)]
struct StopCondition {
    frames: Option<u64>,
    deadline: Option<Instant>,
}

impl StopCondition {
    fn from_args(args: &Args) -> Result<Self> {
        let deadline = match args.seconds {
            Some(seconds) if seconds.is_finite() && seconds >= 0.0 => {
                Some(Instant::now() + Duration::from_secs_f64(seconds))
            }
            Some(seconds) => bail!("--seconds must be a non-negative number, got {}", seconds),
            None => None,
        };
        // Without a limit, render a single frame
        let frames = match (args.frames, deadline) {
            (None, None) => Some(1),
            (frames, _) => frames,
        };
        Ok(Self { frames, deadline })
    }

    fn reached(&self, frames: u64, now: Instant) -> bool {
        self.frames.is_some_and(|limit| frames >= limit)
            || self.deadline.is_some_and(|deadline| now >= deadline)
    }
}

fn build_scene(args: &Args, camera: Camera) -> Result<(Scene, Camera)> {
    if let Some(path) = &args.scene {
        let loaded = load_scene(path)
            .with_context(|| format!("failed to load scene {}", path.display()))?;
        return Ok((loaded.scene, loaded.camera.unwrap_or(camera)));
    }

    let scene = match args.random_spheres {
        Some(count) => {
            let seed = args.seed.unwrap_or_else(time_seed);
            scenes::random_scene(count, seed)?
        }
        None => scenes::default_scene()?,
    };
    Ok((scene, camera))
}

fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos() as u64)
}

const DEFAULT_PRESENT_HZ: f64 = 60.0;

/// Time between presenter polls, falling back to 60 Hz for unusable rates.
fn poll_interval(present_hz: f64) -> Duration {
    match Duration::try_from_secs_f64(1.0 / present_hz) {
        Ok(interval) if present_hz.is_finite() && present_hz > 0.0 => interval,
        _ => {
            log::warn!("Ignoring invalid present rate {}, polling at 60 Hz", present_hz);
            Duration::from_secs_f64(1.0 / DEFAULT_PRESENT_HZ)
        }
    }
}

/// Poll `reader` until `stop` is reached, logging every new frame.
fn present(reader: &FrameReader, present_hz: f64, stop: StopCondition) -> u64 {
    let interval = poll_interval(present_hz);
    let started = Instant::now();
    let mut last_frame = 0;
    loop {
        let frame = reader.latest();
        if frame.frame_number() != last_frame {
            last_frame = frame.frame_number();
            log::info!(
                "Presented frame {} at {:.2?}",
                last_frame,
                started.elapsed()
            );
        }

        if stop.reached(last_frame, Instant::now()) {
            return last_frame;
        }
        thread::sleep(interval);
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();
    log::info!("Starting orb");

    let camera = Camera::new(
        DVec3::ZERO,
        args.distance_to_viewport,
        args.view_distance_multiple,
    )?;
    let (scene, camera) = build_scene(&args, camera)?;
    let config = RenderConfig::default()
        .with_resolution(args.width, args.height)?
        .with_camera(camera);
    let stop = StopCondition::from_args(&args)?;

    let renderer = Renderer::with_scene(config, scene);
    let render_loop = RenderLoop::spawn(
        renderer,
        LoopConfig {
            max_fps: args.max_fps,
        },
    )?;
    let reader = render_loop.reader();

    let presented = present(&reader, args.present_hz, stop);
    let renderer = render_loop.stop()?;
    log::info!(
        "Rendered {} frames, presented up to frame {}",
        renderer.frame_count(),
        presented
    );

    if args.preview {
        print!("{}", preview::ascii_preview(&reader.latest(), 80));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("orb").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_default_args() {
        let args = parse(&[]);
        assert_eq!((args.width, args.height), (1024, 768));
        assert_eq!(args.distance_to_viewport, 500.0);
        assert_eq!(args.view_distance_multiple, 10.0);
        assert_eq!(args.present_hz, 60.0);
        assert!(!args.preview);
    }

    #[test]
    fn test_scene_conflicts_with_random() {
        let result = Args::try_parse_from(["orb", "--scene", "a.json", "--random-spheres", "3"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_stop_condition_defaults_to_one_frame() {
        let stop = StopCondition::from_args(&parse(&[])).unwrap();
        assert!(!stop.reached(0, Instant::now()));
        assert!(stop.reached(1, Instant::now()));
    }

    #[test]
    fn test_stop_condition_seconds() {
        let stop = StopCondition::from_args(&parse(&["--seconds", "0"])).unwrap();
        assert_eq!(stop.frames, None);
        assert!(stop.reached(0, Instant::now()));

        assert!(StopCondition::from_args(&parse(&["--seconds=-1"])).is_err());
    }

    #[test]
    fn test_poll_interval() {
        assert_eq!(poll_interval(50.0), Duration::from_secs_f64(0.02));

        let fallback = Duration::from_secs_f64(1.0 / DEFAULT_PRESENT_HZ);
        assert_eq!(poll_interval(0.0), fallback);
        assert_eq!(poll_interval(-1.0), fallback);
        assert_eq!(poll_interval(f64::NAN), fallback);
        // One poll every 1e30 seconds does not fit in a Duration
        assert_eq!(poll_interval(1e-30), fallback);
    }

    #[test]
    fn test_random_scene_keeps_cli_camera() {
        let args = parse(&["--random-spheres", "5", "--seed", "1"]);
        let camera = Camera::new(DVec3::ZERO, 250.0, 4.0).unwrap();

        let (scene, used) = build_scene(&args, camera).unwrap();
        assert_eq!(scene.sphere_count(), 5);
        assert_eq!(used, camera);
    }

    #[test]
    fn test_present_stops_at_frame_limit() {
        let config = RenderConfig::default().with_resolution(8, 6).unwrap();
        let renderer = Renderer::with_scene(config, scenes::default_scene().unwrap());
        let render_loop = RenderLoop::spawn(renderer, LoopConfig::default()).unwrap();

        let stop = StopCondition {
            frames: Some(2),
            deadline: Some(Instant::now() + Duration::from_secs(10)),
        };
        let presented = present(&render_loop.reader(), 1000.0, stop);
        render_loop.stop().unwrap();
        assert!(presented >= 2);
    }
}
