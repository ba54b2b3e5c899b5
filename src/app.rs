use crate::core::canvas::Canvas;
use crate::core::color::{self, Color};
use crate::core::rasterizer::{Rasterizer, RenderMode};
use crate::error::AppError;
use crate::io::config::Config;
use crate::io::image::save_canvas;
use crate::scene::context::RenderContext;
use crate::ui::input::ControlEvent;
use crate::ui::sidebar::Sidebar;
use log::{debug, error, info, warn};
use minifb::{Key, Window, WindowOptions};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Colours used for one frame.
struct Palette {
    background: u32,
    mesh: Color,
}

impl Palette {
    fn from_config(config: &Config) -> Self {
        let [r, g, b] = config.render.background;
        let [mr, mg, mb] = config.render.mesh_color;
        Self {
            background: color::to_u32(&color::from_rgb8(r, g, b)),
            mesh: color::from_rgb8(mr, mg, mb),
        }
    }
}

fn render_mode_from_config(config: &Config) -> RenderMode {
    RenderMode::parse(&config.render.mode).unwrap_or_else(|| {
        warn!("Unknown render mode '{}', using wireframe", config.render.mode);
        RenderMode::Wireframe
    })
}

/// Clears the canvas and draws the current object. Returns the polygons drawn.
fn render_scene(context: &RenderContext, rasterizer: &Rasterizer, canvas: &mut Canvas, palette: &Palette) -> usize {
    canvas.clear(palette.background);
    let Some(frame) = context.frame() else {
        return 0;
    };

    let skipped = frame.skipped_faces();
    if skipped > 0 {
        debug!("{} faces not drawable this frame", skipped);
    }
    rasterizer.draw_polygons(canvas, frame.polygons(), &palette.mesh)
}

fn screenshot_path() -> PathBuf {
    PathBuf::from(format!(
        "screenshot_{}.png",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    ))
}

/// Runs the interactive viewer until the window is closed or Escape is pressed.
pub fn run_gui(config: Config) -> Result<(), AppError> {
    let width = config.window.width;
    let height = config.window.height;

    info!("Starting GUI mode ({}x{})...", width, height);
    info!("Controls: Arrows=Orbit, W/S=Zoom, 1-9/Click=Select model, Home=Reset, M=Render mode, P=Screenshot");

    // 1. Initialize Resources
    let mut context = RenderContext::from_config(&config)?;
    let mut rasterizer = Rasterizer::new(render_mode_from_config(&config));
    let sidebar = Sidebar::new(config.window.sidebar_width, config.window.row_height);
    let palette = Palette::from_config(&config);
    let mut canvas = Canvas::new(width, height);

    // 2. Initialize Window
    let mut window = Window::new(
        "orbit-viewer",
        width,
        height,
        WindowOptions {
            resize: false,
            ..WindowOptions::default()
        },
    )?;
    window.set_target_fps(config.window.fps);

    let mut frame_count = 0;
    let mut last_fps_update = Instant::now();
    let mut last_frame_time = Instant::now();

    // 3. Main Loop
    while window.is_open() && !window.is_key_down(Key::Escape) {
        let now = Instant::now();
        let dt = (now - last_frame_time).as_secs_f32();
        last_frame_time = now;

        // --- Input ---
        let events = context
            .controller
            .poll_events(&window, &sidebar, context.library.len());
        context.apply(&events);

        if events.contains(&ControlEvent::ToggleRenderMode) {
            rasterizer.set_mode(rasterizer.mode.toggled());
            info!("Render mode: {:?}", rasterizer.mode);
        }

        // --- Render ---
        render_scene(&context, &rasterizer, &mut canvas, &palette);
        sidebar.draw(&mut canvas, context.library.entries(), context.library.selected());

        if events.contains(&ControlEvent::Screenshot) {
            let path = screenshot_path();
            match save_canvas(&canvas, &path) {
                Ok(()) => info!("Screenshot saved: {}", path.display()),
                Err(e) => error!("Failed to save screenshot '{}': {}", path.display(), e),
            }
        }

        // --- Display ---
        window.update_with_buffer(canvas.pixels(), width, height)?;

        let (vertices, polygons) = context
            .object
            .as_ref()
            .map_or((0, 0), |o| (o.vertex_count(), o.face_count()));
        window.set_title(&format!(
            "orbit-viewer - {} - {} vertices, {} polygons - {:.1} FPS",
            context.model_name(),
            vertices,
            polygons,
            if dt > 0.0 { 1.0 / dt } else { 0.0 }
        ));

        frame_count += 1;
        if last_fps_update.elapsed().as_secs_f32() >= 2.0 {
            info!(
                "Average FPS: {:.1}",
                frame_count as f32 / last_fps_update.elapsed().as_secs_f32()
            );
            frame_count = 0;
            last_fps_update = Instant::now();
        }
    }

    info!("Viewer closed.");
    Ok(())
}

/// Renders a single frame with the start-up camera and saves it (headless).
pub fn run_cli(config: Config) -> Result<(), AppError> {
    info!("Starting CLI mode...");
    let start_time = Instant::now();

    let context = RenderContext::from_config(&config)?;
    let rasterizer = Rasterizer::new(render_mode_from_config(&config));
    let palette = Palette::from_config(&config);
    let mut canvas = Canvas::new(config.window.width, config.window.height);

    let drawn = render_scene(&context, &rasterizer, &mut canvas, &palette);
    info!(
        "Rendered '{}': {} polygons in {:.2?}",
        context.model_name(),
        drawn,
        start_time.elapsed()
    );

    info!("Saving output to '{}'...", config.render.output);
    save_canvas(&canvas, Path::new(&config.render.output))?;
    info!("Done.");
    Ok(())
}
