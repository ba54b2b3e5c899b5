use crate::error::LoadError;
use crate::io::config::Config;
use crate::io::library::ModelLibrary;
use crate::io::obj_loader::load_obj;
use crate::scene::camera::{OrbitCamera, OrbitLimits};
use crate::scene::projection::Projection;
use crate::scene::scene_object::{ProjectedMesh, Renderable, SceneObject};
use crate::ui::input::{CameraController, ControlEvent, HomeView};
use log::{debug, error, info, warn};
use std::path::Path;

/// Holds all per-session state the frame loop works on.
pub struct RenderContext {
    pub camera: OrbitCamera,
    pub projection: Projection,
    pub controller: CameraController,
    /// The mesh on screen. `None` only until the first successful load.
    pub object: Option<SceneObject>,
    pub library: ModelLibrary,
    /// Yaw (radians) applied to every mesh once when it is loaded.
    pub initial_yaw: f32,
}

impl RenderContext {
    pub fn new(
        camera: OrbitCamera,
        projection: Projection,
        controller: CameraController,
        library: ModelLibrary,
        initial_yaw: f32,
    ) -> Self {
        Self {
            camera,
            projection,
            controller,
            object: None,
            library,
            initial_yaw,
        }
    }

    /// Builds the session from the configuration and loads the start-up mesh:
    /// `model.path` when set, otherwise the first library entry that loads.
    pub fn from_config(config: &Config) -> Result<Self, LoadError> {
        let cam = &config.camera;
        let limits = OrbitLimits {
            min_distance: cam.min_distance,
            pitch_margin: cam.pitch_margin,
        };
        let home = HomeView {
            yaw: cam.yaw.to_radians(),
            pitch: cam.pitch.to_radians(),
            distance: cam.distance,
        };

        let camera = OrbitCamera::new(home.yaw, home.pitch, home.distance, limits);
        let projection = Projection::new(
            config.window.width,
            config.window.height,
            cam.fov.to_radians(),
            cam.near,
            cam.far,
        );
        let controller = CameraController::new(cam.rotation_speed, cam.zoom_speed, home);
        let library = ModelLibrary::scan(Path::new(&config.model.resources))?;

        let mut context = Self::new(
            camera,
            projection,
            controller,
            library,
            config.model.initial_yaw.to_radians(),
        );

        match &config.model.path {
            Some(path) => context.load_path(Path::new(path))?,
            None => context.load_first()?,
        }
        Ok(context)
    }

    fn load_first(&mut self) -> Result<(), LoadError> {
        for index in 0..self.library.len() {
            match self.load_selected(index) {
                Ok(()) => return Ok(()),
                Err(e) => warn!("Skipping start-up candidate: {}", e),
            }
        }
        Err(LoadError::NoModels {
            dir: self.library.dir().to_path_buf(),
        })
    }

    /// Loads the library entry at `index`. Out-of-range indices are ignored.
    ///
    /// On failure the previous mesh stays on screen.
    pub fn load_selected(&mut self, index: usize) -> Result<(), LoadError> {
        let Some(path) = self.library.path(index) else {
            debug!("No model at index {} ({} available)", index, self.library.len());
            return Ok(());
        };
        self.load_path(&path)
    }

    /// Loads a mesh from `path`, replacing the current object and re-centring
    /// the orbit on it. On failure the previous mesh stays on screen.
    pub fn load_path(&mut self, path: &Path) -> Result<(), LoadError> {
        let mesh = load_obj(path)?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mut object = SceneObject::new(name, mesh);
        object.rotate_y(self.initial_yaw);

        self.camera.set_target(object.world_vertices());
        self.camera.update_position();

        match (0..self.library.len()).find(|&i| self.library.path(i).as_deref() == Some(path)) {
            Some(index) => self.library.select(index),
            None => self.library.clear_selection(),
        }
        info!(
            "Showing '{}' ({} vertices, {} polygons)",
            object.name,
            object.vertex_count(),
            object.face_count()
        );
        self.object = Some(object);
        Ok(())
    }

    /// Applies one frame's control events: camera movement and model
    /// selection. Render mode and screenshots are left to the caller.
    pub fn apply(&mut self, events: &[ControlEvent]) {
        for event in events {
            if let ControlEvent::SelectModel(index) = *event {
                if let Err(e) = self.load_selected(index) {
                    error!("{}", e);
                }
            }
        }
        self.controller.apply(&mut self.camera, events);
    }

    /// Projects the current object with this frame's camera.
    pub fn frame(&self) -> Option<ProjectedMesh<'_>> {
        self.object
            .as_ref()
            .map(|object| object.project(&self.camera.view_matrix(), &self.projection))
    }

    pub fn model_name(&self) -> &str {
        self.object.as_ref().map_or("<none>", |o| o.name.as_str())
    }
}
