use anyhow::{Context, Result};
use clap::Parser;
use handnav_client::{
    camera::OpenCvCamera,
    config::{self, Args, Command},
    controls::{self, Control},
    injector::EnigoScroller,
    preview::{HighGuiPreview, Preview, WINDOW_NAME},
    tone,
};
use handnav_core::FrameLoop;
use handnav_detector::{DetectorConfig, HandDetector};
use opencv::highgui;

fn run_tracker(args: &Args) -> Result<()> {
    let settings = config::resolve_settings(args).context("Failed to load settings")?;
    log::info!("Camera: {}", settings.camera);
    log::info!("Detector preset: {}", settings.preset);

    let detector = HandDetector::new(DetectorConfig::preset(settings.preset).with_zone(settings.zone));
    let preview = if args.no_window {
        Preview::Headless
    } else {
        Preview::Window(HighGuiPreview::open(WINDOW_NAME)?)
    };
    let injector = EnigoScroller::new().context("Failed to initialize scroll injection")?;

    let mut frame_loop = FrameLoop::new(
        OpenCvCamera::new(settings.camera),
        preview,
        injector,
        detector,
        settings.sensitivity,
    );

    if args.no_window {
        // No control surface: track until the process is killed
        frame_loop.start()?;
        frame_loop.run_until(|_| true);
        return Ok(());
    }

    log::info!("Keys: s start, x stop, z cycle zone, 1/2/3 sensitivity, q quit");
    frame_loop.run_until(|frame_loop| {
        if frame_loop.preview().is_closed() {
            frame_loop.stop();
            return false;
        }
        let key = match highgui::wait_key(1) {
            Ok(key) => key,
            Err(e) => {
                log::warn!("Failed to poll keyboard: {}", e);
                return true;
            }
        };
        match Control::from_key(key) {
            Some(control) => controls::apply(frame_loop, control),
            None => true,
        }
    });

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    match &args.command {
        Some(Command::Tone(tone_args)) => tone::run(tone_args, &mut std::io::stdout().lock()),
        None => {
            log::info!("Hand navigation starting...");
            run_tracker(&args).context("Hand navigation error")
        }
    }
}
