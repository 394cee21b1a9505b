use capture_loop::main::CaptureLoop;
use config::Config;
use device_camera::impl_fake::{DeviceCameraFake, FakeCameraConfig};
use device_display::impl_console::DeviceDisplayConsole;
use device_display::impl_gui::DeviceDisplayGui;
use device_display::interface::DeviceDisplay;
use image_classifier::impl_fake::ImageClassifierFake;
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use std::sync::Arc;
use std::time::Duration;

mod capture_loop;
mod config;
mod decision_policy;
mod device_camera;
mod device_display;
mod image_classifier;
mod library;
mod permission_gate;
mod render;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::default();

    let logger: Arc<dyn Logger + Send + Sync> = Arc::new(LoggerConsole::new(config.logger_timezone));

    let device_camera = Arc::new(DeviceCameraFake::new(
        FakeCameraConfig::default(),
        logger.clone(),
    ));

    let image_classifier = Arc::new(ImageClassifierFake::new(
        logger.clone(),
        Duration::from_millis(150),
    ));

    let gui = if std::env::args().any(|arg| arg == "--gui") {
        Some(Arc::new(DeviceDisplayGui::new(config.clone())))
    } else {
        None
    };

    let device_display: Arc<dyn DeviceDisplay + Send + Sync> = match &gui {
        Some(gui) => gui.clone(),
        None => Arc::new(DeviceDisplayConsole::new(config.clone())),
    };

    let capture_loop = CaptureLoop::new(
        config,
        logger.clone(),
        device_camera,
        image_classifier,
        device_display,
    );

    let runtime = tokio::runtime::Runtime::new()?;

    let shutdown = capture_loop.shutdown_handle();
    let ctrl_c_shutdown = shutdown.clone();
    let ctrl_c_logger = logger.clone();
    runtime.spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = ctrl_c_logger.info("Ctrl-C received, shutting down...");
            ctrl_c_shutdown.shutdown();
        }
    });

    let state = match gui {
        // The window owns the main thread, so the loop runs beside it.
        Some(gui) => {
            let running = std::thread::spawn(move || runtime.block_on(capture_loop.run()));
            let window = gui.run_window();
            shutdown.shutdown();
            let state = running
                .join()
                .map_err(|_| "capture loop thread panicked")?;
            window?;
            state
        }
        None => runtime.block_on(capture_loop.run()),
    };

    logger.info(&format!("Exited in {:?}", state))?;

    Ok(())
}
