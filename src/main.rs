/// Demo application: window, keyboard input and the render loop
/// Presents the scene through softbuffer, one frame per redraw
use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;
use std::error::Error;
use std::num::NonZeroU32;
use std::sync::Arc;
use terrain_raster::camera::Transform;
use terrain_raster::config::{ChunkerConfig, RenderConfig};
use terrain_raster::math::DVec3;
use terrain_raster::meshing::{cube, Model};
use terrain_raster::perf::FrameClock;
use terrain_raster::rendering::{Image, LitShader, Rasterizer};
use terrain_raster::{CameraController, Scene};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use winit::{
    event::*,
    event_loop::{ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

/// Config used when no JSON file is given on the command line.
fn demo_config() -> RenderConfig {
    let mut config = RenderConfig {
        background: [0.7, 0.85, 1.0],
        chunker: Some(ChunkerConfig::default()),
        ..Default::default()
    };
    config.camera.position = [0.0, 6.0, 0.0];
    config
}

fn load_config() -> Result<RenderConfig, Box<dyn Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            info!(%path, "loading config");
            let json = std::fs::read_to_string(&path)?;
            Ok(RenderConfig::from_json_str(&json)?)
        }
        None => Ok(demo_config()),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Controls: WASD move, Q/E down/up, arrow keys look, ESC exit");

    let config = load_config()?;
    let mut scene = Scene::from_config(&config)?;

    let light = DVec3::new(0.3, 1.0, -0.4).normalize();
    let marker = Model::new("marker", cube(2.0))
        .with_transform(Transform::new(DVec3::new(0.0, 8.0, 16.0)).with_rotation(0.6, 0.3))
        .with_shader(Arc::new(LitShader::new(DVec3::new(0.9, 0.3, 0.2), light)));
    scene.add_model(marker)?;

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Terrain Raster")
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.width as f64,
                config.height as f64,
            ))
            .build(&event_loop)?,
    );

    let context = softbuffer::Context::new(window.clone())?;
    let mut surface = softbuffer::Surface::new(&context, window.clone())?;

    let size = window.inner_size();
    let mut image = Image::new(size.width as usize, size.height as usize);
    let mut rasterizer = Rasterizer::new();
    let mut controller = CameraController::new();
    let mut clock = FrameClock::new();
    let mut frames_since_report = 0u32;

    event_loop.run(move |event, elwt| {
        elwt.set_control_flow(ControlFlow::Poll);

        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => elwt.exit(),
                WindowEvent::Resized(new_size) => {
                    image.resize(new_size.width as usize, new_size.height as usize);
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    let pressed = event.state == ElementState::Pressed;
                    if let PhysicalKey::Code(keycode) = event.physical_key {
                        match keycode {
                            KeyCode::KeyW => controller.forward_pressed = pressed,
                            KeyCode::KeyS => controller.backward_pressed = pressed,
                            KeyCode::KeyA => controller.left_pressed = pressed,
                            KeyCode::KeyD => controller.right_pressed = pressed,
                            KeyCode::KeyE => controller.up_pressed = pressed,
                            KeyCode::KeyQ => controller.down_pressed = pressed,
                            KeyCode::ArrowUp => controller.pitch_up_pressed = pressed,
                            KeyCode::ArrowDown => controller.pitch_down_pressed = pressed,
                            KeyCode::ArrowLeft => controller.yaw_left_pressed = pressed,
                            KeyCode::ArrowRight => controller.yaw_right_pressed = pressed,
                            KeyCode::Escape if pressed => elwt.exit(),
                            _ => {}
                        }
                    }
                }
                WindowEvent::RedrawRequested => {
                    let (Some(width), Some(height)) = (
                        NonZeroU32::new(image.width as u32),
                        NonZeroU32::new(image.height as u32),
                    ) else {
                        return;
                    };

                    controller.update_camera(&mut scene.camera);

                    if let Err(err) = scene.render(&mut rasterizer, &mut image) {
                        error!(%err, "render failed");
                        elwt.exit();
                        return;
                    }

                    let presented = surface.resize(width, height).and_then(|_| {
                        let mut buffer = surface.buffer_mut()?;
                        image.write_argb(&mut buffer);
                        buffer.present()
                    });
                    if let Err(err) = presented {
                        error!(%err, "presentation failed");
                        elwt.exit();
                        return;
                    }

                    clock.tick();
                    frames_since_report += 1;
                    if frames_since_report >= 60 {
                        let position = scene.camera.position();
                        info!(
                            fps = clock.fps(),
                            x = position.x,
                            y = position.y,
                            z = position.z,
                            chunks = scene.chunker.as_ref().map_or(0, |c| c.cached_count()),
                            "frame"
                        );
                        #[cfg(feature = "profiling")]
                        terrain_raster::RENDER_COUNTERS.snapshot().log_report();
                        frames_since_report = 0;
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                window.request_redraw();
            }
            _ => {}
        }
    })?;

    Ok(())
}
