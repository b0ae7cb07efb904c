use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use clap::Parser;

use cascade_overlay_core::assets::domain::asset_stager::AssetStager;
use cascade_overlay_core::assets::infrastructure::dir_asset_source::DirAssetSource;
use cascade_overlay_core::assets::infrastructure::staging_dir::default_staging_dir;
use cascade_overlay_core::detection::domain::detector_bank::DetectorBank;
use cascade_overlay_core::detection::infrastructure::default_loader;
use cascade_overlay_core::overlay::domain::mode::Mode;
use cascade_overlay_core::overlay::domain::mode_selector::ModeSelector;
use cascade_overlay_core::overlay::infrastructure::outline_painter::OutlinePainter;
use cascade_overlay_core::pipeline::detection_session::{
    DetectionSession, ProgressFn, SessionConfig,
};
use cascade_overlay_core::pipeline::frame_processor::FrameProcessor;
use cascade_overlay_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use cascade_overlay_core::pipeline::trigger::{spawn_stdin_triggers, trigger_channel};
use cascade_overlay_core::video::domain::frame_sink::FrameSink;
use cascade_overlay_core::video::domain::frame_source::FrameSource;
use cascade_overlay_core::video::infrastructure::ffmpeg_source::FfmpegSource;
use cascade_overlay_core::video::infrastructure::image_file_sink::{ImageFileSink, NullFrameSink};
use cascade_overlay_core::video::infrastructure::image_sequence_source::{
    is_image_file, ImageSequenceSource,
};

/// Outlines faces, eyes and bodies on every frame with cascade classifiers.
#[derive(Parser)]
#[command(name = "cascade-overlay")]
struct Cli {
    /// Input video file, image file or directory of images.
    input: Option<PathBuf>,

    /// Use a live camera instead of a file: front or back.
    #[arg(long)]
    camera: Option<String>,

    /// Explicit camera device index (overrides --camera).
    #[arg(long)]
    camera_index: Option<i32>,

    /// Directory for annotated frames (frame_NNNNNN.png). Omit to discard.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Directory holding the bundled cascade XML files.
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// Writable directory the cascades are staged into.
    #[arg(long)]
    staging_dir: Option<PathBuf>,

    /// Initial mode: face, face-eyes, full-body, upper-body.
    #[arg(long, default_value = "face")]
    start_mode: String,

    /// Advance the mode automatically every N frames.
    #[arg(long)]
    cycle_every: Option<usize>,

    /// Advance the mode each time Enter is pressed; `q` then Enter stops.
    #[arg(long)]
    interactive: bool,

    /// Stop after this many frames.
    #[arg(long)]
    max_frames: Option<usize>,

    /// Run the detectors of multi-detector modes in parallel.
    #[arg(long)]
    parallel: bool,

    /// Log progress every N frames.
    #[arg(long, default_value = "30")]
    progress_every: usize,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    // All detectors are loaded before the first frame is read.
    let bank = build_detector_bank(&cli)?;
    let selector = Arc::new(ModeSelector::starting_at(parse_mode(&cli.start_mode)));
    let processor = FrameProcessor::new(bank, selector, Box::new(OutlinePainter::default()))
        .with_parallel(cli.parallel);

    let source = open_source(&cli)?;
    let sink: Box<dyn FrameSink> = match &cli.output {
        Some(dir) => Box::new(ImageFileSink::new(dir)),
        None => Box::new(NullFrameSink::default()),
    };

    let (sender, receiver) = trigger_channel();
    if cli.interactive {
        log::info!("Press Enter to switch detector mode, q then Enter to stop");
        spawn_stdin_triggers(sender);
    } else {
        drop(sender);
    }

    let config = SessionConfig {
        cycle_every: cli.cycle_every,
        on_progress: cli
            .max_frames
            .map(|max| -> ProgressFn { Box::new(move |done, _| done < max) }),
        ..SessionConfig::default()
    };
    let mut session = DetectionSession::new(source, sink, processor, receiver).with_config(config);
    let mut logger = StdoutPipelineLogger::new(cli.progress_every);
    let summary = session.execute(&mut logger)?;

    log::info!(
        "Processed {} frames, drew {} regions, final mode: {}",
        summary.frames_processed,
        summary.regions_drawn,
        summary.final_mode
    );
    if let Some(dir) = &cli.output {
        log::info!("Annotated frames written to {}", dir.display());
    }
    Ok(())
}

fn build_detector_bank(cli: &Cli) -> Result<DetectorBank, Box<dyn std::error::Error>> {
    let staging_dir = match &cli.staging_dir {
        Some(dir) => dir.clone(),
        None => default_staging_dir()?,
    };
    log::info!("Staging cascades into {}", staging_dir.display());

    let stager = AssetStager::new(Box::new(DirAssetSource::new(&cli.assets)), staging_dir);
    let loader = default_loader();
    Ok(DetectorBank::load_all(&stager, loader.as_ref()))
}

fn open_source(cli: &Cli) -> Result<Box<dyn FrameSource>, Box<dyn std::error::Error>> {
    if let Some(input) = &cli.input {
        return Ok(open_file_source(input));
    }
    open_camera_source(cli)
}

fn open_file_source(input: &Path) -> Box<dyn FrameSource> {
    if input.is_dir() || is_image_file(input) {
        Box::new(ImageSequenceSource::new(input))
    } else {
        Box::new(FfmpegSource::new(input))
    }
}

#[cfg(feature = "opencv")]
fn open_camera_source(cli: &Cli) -> Result<Box<dyn FrameSource>, Box<dyn std::error::Error>> {
    use cascade_overlay_core::video::infrastructure::opencv_camera_source::{
        CameraFacing, OpenCvCameraSource,
    };

    let mut source = match (cli.camera_index, cli.camera.as_deref()) {
        (Some(index), _) => OpenCvCameraSource::new(index),
        (None, Some("back")) => OpenCvCameraSource::facing(CameraFacing::Back),
        _ => OpenCvCameraSource::facing(CameraFacing::Front),
    };
    if let Some(max) = cli.max_frames {
        source = source.with_max_frames(max);
    }
    Ok(Box::new(source))
}

#[cfg(not(feature = "opencv"))]
fn open_camera_source(_cli: &Cli) -> Result<Box<dyn FrameSource>, Box<dyn std::error::Error>> {
    Err("Camera input requires building with the `opencv` feature".into())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let wants_camera = cli.camera.is_some() || cli.camera_index.is_some();
    match (&cli.input, wants_camera) {
        (Some(_), true) => {
            return Err("An input path and --camera/--camera-index are mutually exclusive".into())
        }
        (None, false) => {
            return Err("An input path, --camera or --camera-index is required".into())
        }
        (Some(input), false) if !input.exists() => {
            return Err(format!("Input not found: {}", input.display()).into())
        }
        _ => {}
    }
    if wants_camera && !cli.interactive && cli.max_frames.is_none() {
        return Err("Camera input needs --interactive or --max-frames to end the session".into());
    }
    if cli.max_frames == Some(0) {
        return Err("--max-frames must be at least 1".into());
    }
    if let Some(facing) = &cli.camera {
        if facing != "front" && facing != "back" {
            return Err(format!("Camera must be 'front' or 'back', got '{facing}'").into());
        }
    }
    if let Some(index) = cli.camera_index {
        if index < 0 {
            return Err(format!("Camera index must be non-negative, got {index}").into());
        }
    }
    if !cli.assets.is_dir() {
        return Err(format!("Asset directory not found: {}", cli.assets.display()).into());
    }
    let valid_modes = ["face", "face-eyes", "full-body", "upper-body"];
    if !valid_modes.contains(&cli.start_mode.as_str()) {
        return Err(format!(
            "Start mode must be one of: face, face-eyes, full-body, upper-body, got '{}'",
            cli.start_mode
        )
        .into());
    }
    if cli.cycle_every == Some(0) {
        return Err("--cycle-every must be at least 1".into());
    }
    if cli.progress_every == 0 {
        return Err("--progress-every must be at least 1".into());
    }
    Ok(())
}

fn parse_mode(mode: &str) -> Mode {
    match mode {
        "face-eyes" => Mode::FaceAndEyes,
        "full-body" => Mode::FullBody,
        "upper-body" => Mode::UpperBody,
        _ => Mode::FaceOnly,
    }
}
