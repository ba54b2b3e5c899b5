use crate::scene::camera::OrbitCamera;
use crate::ui::sidebar::Sidebar;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window};

/// One discrete user intent, produced once per frame by [`CameraController::poll_events`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    YawLeft,
    YawRight,
    PitchUp,
    PitchDown,
    ZoomIn,
    ZoomOut,
    /// Switch to the library entry with this index.
    SelectModel(usize),
    ResetView,
    ToggleRenderMode,
    Screenshot,
}

const NUMBER_KEYS: [Key; 9] = [
    Key::Key1,
    Key::Key2,
    Key::Key3,
    Key::Key4,
    Key::Key5,
    Key::Key6,
    Key::Key7,
    Key::Key8,
    Key::Key9,
];

/// Orbit parameters restored by [`ControlEvent::ResetView`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HomeView {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
}

impl Default for HomeView {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: 10.0,
        }
    }
}

/// Turns keyboard and mouse state into control events and applies the
/// camera-related ones.
pub struct CameraController {
    /// Radians per frame while a rotation key is held.
    pub rotation_speed: f32,
    /// Distance units per frame while a zoom key is held.
    pub zoom_speed: f32,
    pub home: HomeView,

    last_left_click: bool,
}

impl CameraController {
    pub fn new(rotation_speed: f32, zoom_speed: f32, home: HomeView) -> Self {
        Self {
            rotation_speed,
            zoom_speed,
            home,
            last_left_click: false,
        }
    }

    /// Applies one frame's camera events, then refreshes the camera once.
    /// Events that do not concern the camera are ignored here.
    pub fn apply(&self, camera: &mut OrbitCamera, events: &[ControlEvent]) {
        for event in events {
            match *event {
                ControlEvent::YawLeft => camera.add_yaw(-self.rotation_speed),
                ControlEvent::YawRight => camera.add_yaw(self.rotation_speed),
                ControlEvent::PitchUp => camera.add_pitch(-self.rotation_speed),
                ControlEvent::PitchDown => camera.add_pitch(self.rotation_speed),
                ControlEvent::ZoomIn => camera.add_distance(-self.zoom_speed),
                ControlEvent::ZoomOut => camera.add_distance(self.zoom_speed),
                ControlEvent::ResetView => {
                    camera.reset_orbit(self.home.yaw, self.home.pitch, self.home.distance)
                }
                ControlEvent::SelectModel(_)
                | ControlEvent::ToggleRenderMode
                | ControlEvent::Screenshot => {}
            }
        }
        camera.update_position();
    }

    /// Reads the window's input state for this frame.
    ///
    /// Rotation and zoom keys repeat while held; selection, reset, render mode
    /// and screenshot fire once per press.
    pub fn poll_events(&mut self, window: &Window, sidebar: &Sidebar, entries: usize) -> Vec<ControlEvent> {
        let mut events = Vec::new();

        // --- 1. Held keys ---
        let held = [
            (Key::Left, ControlEvent::YawLeft),
            (Key::Right, ControlEvent::YawRight),
            (Key::Up, ControlEvent::PitchUp),
            (Key::Down, ControlEvent::PitchDown),
            (Key::W, ControlEvent::ZoomIn),
            (Key::S, ControlEvent::ZoomOut),
        ];
        events.extend(
            held.iter()
                .filter(|(key, _)| window.is_key_down(*key))
                .map(|&(_, event)| event),
        );

        // --- 2. Presses ---
        for (i, key) in NUMBER_KEYS.iter().enumerate() {
            if window.is_key_pressed(*key, KeyRepeat::No) {
                events.push(ControlEvent::SelectModel(i));
            }
        }
        if window.is_key_pressed(Key::Home, KeyRepeat::No) {
            events.push(ControlEvent::ResetView);
        }
        if window.is_key_pressed(Key::M, KeyRepeat::No) {
            events.push(ControlEvent::ToggleRenderMode);
        }
        if window.is_key_pressed(Key::P, KeyRepeat::No) {
            events.push(ControlEvent::Screenshot);
        }

        // --- 3. Side bar click ---
        let left_click = window.get_mouse_down(MouseButton::Left);
        if left_click && !self.last_left_click {
            if let Some(index) = window
                .get_mouse_pos(MouseMode::Discard)
                .and_then(|(x, y)| sidebar.hit_test(x, y, entries))
            {
                events.push(ControlEvent::SelectModel(index));
            }
        }
        self.last_left_click = left_click;

        events
    }
}
