use glam::Vec3;
use log::{debug, warn};

use crate::camera::{self, ViewCamera};
use crate::config::{IntroConfig, NavigationConfig};
use crate::core::{
    Admission, GestureOutcome, InputArbiter, InputEvent, TransitionEngine, TransitionEvent,
    TransitionToken,
};
use crate::error::{ConfigError, NavError, NavResult};
use crate::math::Easing;
use crate::registry::ViewpointRegistry;
use crate::resolver::{ObjectResolver, ResolvedObject};
use crate::traits::{CameraRig, SceneLookup};
use crate::types::{InputMode, Pose, Viewpoint};

/// Successful navigation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// A transition towards the viewpoint is running
    Started { id: String },
    /// Held until the current gesture is released
    Queued { id: String },
    /// The camera already sits exactly at the viewpoint
    AlreadyThere { id: String },
}

impl Navigation {
    pub fn id(&self) -> &str {
        match self {
            Navigation::Started { id } | Navigation::Queued { id } | Navigation::AlreadyThere { id } => id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Motion {
    duration: f32,
    easing: Easing,
}

/// Public navigation API used by UI and scene-interaction code.
///
/// Owns the live camera through the transition engine and the input
/// arbiter. The host forwards input with [`handle_input`](Self::handle_input)
/// as it arrives and calls [`update`](Self::update) once per rendered frame,
/// so a gesture is always resolved before that frame's transition step.
#[derive(Debug, Clone)]
pub struct Navigator {
    registry: ViewpointRegistry,
    resolver: ObjectResolver,
    engine: TransitionEngine,
    arbiter: InputArbiter,
    motion: Motion,
    min_zoom: f32,
    max_zoom: f32,
    intro: Option<IntroConfig>,
    /// Viewpoint the camera rests at; only set while idle
    current: Option<Viewpoint>,
    /// Viewpoint the running transition heads for
    in_flight: Option<(TransitionToken, Viewpoint)>,
    /// Most recently requested id, where next/previous continue from
    cursor: Option<String>,
    queued: Option<(Viewpoint, Motion)>,
}

impl Navigator {
    pub fn new(config: &NavigationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let registry = config.registry()?;
        Ok(Self::with_registry(registry, config))
    }

    /// Build around an existing registry; the camera starts at its first entry
    pub fn with_registry(registry: ViewpointRegistry, config: &NavigationConfig) -> Self {
        let start = registry.first().clone();
        Self {
            resolver: ObjectResolver::new(config.standoff()),
            engine: TransitionEngine::new(start.pose),
            arbiter: InputArbiter::new(config.input_priority, config.gesture_settings(), config.pivot()),
            motion: Motion {
                duration: config.duration,
                easing: config.easing,
            },
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            intro: config.intro,
            cursor: Some(start.id.clone()),
            current: Some(start),
            in_flight: None,
            queued: None,
            registry,
        }
    }

    pub fn goto_viewpoint(&mut self, id: &str) -> NavResult<Navigation> {
        let viewpoint = self
            .registry
            .viewpoint(id)
            .cloned()
            .ok_or_else(|| NavError::NotFound(id.to_string()))?;
        self.navigate(viewpoint, self.motion)
    }

    /// Go to the entry at `index`, modulo the registry size
    pub fn goto_index(&mut self, index: usize) -> NavResult<Navigation> {
        let viewpoint = self.registry.at(index).clone();
        self.navigate(viewpoint, self.motion)
    }

    pub fn next(&mut self) -> NavResult<Navigation> {
        let id = self.registry.next(self.cursor.as_deref()).to_string();
        self.goto_viewpoint(&id)
    }

    pub fn previous(&mut self) -> NavResult<Navigation> {
        let id = self.registry.previous(self.cursor.as_deref()).to_string();
        self.goto_viewpoint(&id)
    }

    /// Fly to a named scene object. `NotFound` while the scene is still
    /// loading or lacks the name; try again later.
    pub fn goto_object(&mut self, scene: Option<&dyn SceneLookup>, name: &str) -> NavResult<Navigation> {
        let Some(resolved) = self.resolver.resolve(scene, name) else {
            warn!("Scene object '{}' is not available", name);
            return Err(NavError::NotFound(name.to_string()));
        };
        self.navigate(resolved.viewpoint, self.motion)
    }

    /// Resolve a scene object without moving, e.g. to place its marker
    pub fn resolve_object(&self, scene: Option<&dyn SceneLookup>, name: &str) -> Option<ResolvedObject> {
        self.resolver.resolve(scene, name)
    }

    /// Back the camera away from the first viewpoint and glide in
    pub fn play_intro(&mut self) -> NavResult<Navigation> {
        let intro = self.intro.unwrap_or_default();
        if self.arbiter.admit() != Admission::Proceed {
            return Err(NavError::Busy);
        }

        let start = self.registry.first().clone();
        let pivot = self.arbiter.pivot();
        let direction = (start.pose.position - pivot).try_normalize().unwrap_or(Vec3::Z);
        let backed_off = Pose {
            position: start.pose.position + direction * intro.dolly,
            ..start.pose.completed_from(&self.engine.pose())
        };

        debug!("Intro: dolly {:.1} over {:.2}s", intro.dolly, intro.duration);
        self.engine.set_pose(backed_off);
        self.in_flight = None;
        self.current = None;
        self.navigate(
            start,
            Motion {
                duration: intro.duration,
                easing: self.motion.easing,
            },
        )
    }

    /// Feed one input event; takes effect immediately
    pub fn handle_input(&mut self, event: InputEvent) -> GestureOutcome {
        let outcome = self.arbiter.handle(event, &mut self.engine);

        if outcome.took_control() {
            if let Some((_, viewpoint)) = self.in_flight.take() {
                debug!("Navigation to '{}' interrupted by gesture", viewpoint.id);
            }
            self.current = None;
        }

        if outcome.released() {
            self.current = None;
            self.cursor = None;
            if let Some((viewpoint, motion)) = self.queued.take() {
                debug!("Running queued navigation to '{}'", viewpoint.id);
                if let Err(err) = self.navigate(viewpoint, motion) {
                    warn!("Queued navigation failed: {}", err);
                }
            }
        }

        outcome
    }

    /// Advance the camera by the time since the previous frame
    pub fn update(&mut self, delta_seconds: f32) {
        let Some(TransitionEvent::Completed(token)) = self.engine.update(delta_seconds) else {
            return;
        };
        match self.in_flight.take() {
            Some((expected, viewpoint)) if expected == token => {
                debug!("Arrived at viewpoint '{}'", viewpoint.id);
                self.current = Some(viewpoint);
            }
            other => self.in_flight = other,
        }
    }

    pub fn pose(&self) -> Pose {
        self.engine.pose()
    }

    pub fn pivot(&self) -> Vec3 {
        self.arbiter.pivot()
    }

    /// Render-facing camera for the current frame
    pub fn view_camera(&self) -> ViewCamera {
        ViewCamera::new(self.engine.pose(), self.arbiter.pivot())
    }

    pub fn input_mode(&self) -> InputMode {
        self.arbiter.mode(self.engine.is_transitioning())
    }

    pub fn is_busy(&self) -> bool {
        self.arbiter.admit() == Admission::Refuse
    }

    /// Id of the viewpoint the camera rests at, `None` while moving or after
    /// the user moved the camera
    pub fn current_viewpoint_id(&self) -> Option<&str> {
        self.current.as_ref().map(|viewpoint| viewpoint.id.as_str())
    }

    pub fn current_viewpoint(&self) -> Option<&Viewpoint> {
        self.current.as_ref()
    }

    /// Id the running transition heads for
    pub fn target_viewpoint_id(&self) -> Option<&str> {
        self.in_flight.as_ref().map(|(_, viewpoint)| viewpoint.id.as_str())
    }

    /// Id the UI should show: destination while moving, else the resting viewpoint
    pub fn display_id(&self) -> Option<&str> {
        self.target_viewpoint_id().or(self.current_viewpoint_id())
    }

    pub fn registry(&self) -> &ViewpointRegistry {
        &self.registry
    }

    pub fn engine(&self) -> &TransitionEngine {
        &self.engine
    }

    fn navigate(&mut self, viewpoint: Viewpoint, motion: Motion) -> NavResult<Navigation> {
        let id = viewpoint.id.clone();
        match self.arbiter.admit() {
            Admission::Refuse => {
                warn!("Navigation to '{}' refused while interacting", id);
                return Err(NavError::Busy);
            }
            Admission::Queue => {
                debug!("Navigation to '{}' queued until release", id);
                self.cursor = Some(id.clone());
                self.queued = Some((viewpoint, motion));
                return Ok(Navigation::Queued { id });
            }
            Admission::Proceed => {}
        }

        let mut target = viewpoint.pose;
        target.zoom = target.zoom.map(|zoom| zoom.clamp(self.min_zoom, self.max_zoom));

        // Blend into an explicit rotation from the rotation actually on screen
        let live = self.engine.pose();
        if target.orientation.is_some() && live.orientation.is_none() {
            let facing = camera::look_rotation(live.position, self.arbiter.pivot());
            self.engine.set_pose(live.with_orientation(facing));
        } else if target.orientation.is_none() && live.orientation.is_some() {
            // No rotation given means facing the pivot, not keeping the last one
            target.orientation = Some(camera::look_rotation(target.position, self.arbiter.pivot()));
        }

        self.cursor = Some(id.clone());
        match self.engine.request_transition(target, motion.duration, motion.easing) {
            Some(token) => {
                self.current = None;
                self.in_flight = Some((token, viewpoint));
                Ok(Navigation::Started { id })
            }
            None => {
                self.in_flight = None;
                self.current = Some(viewpoint);
                Ok(Navigation::AlreadyThere { id })
            }
        }
    }
}

impl CameraRig for Navigator {
    fn update(&mut self, delta_seconds: f32) {
        Navigator::update(self, delta_seconds);
    }

    fn pose(&self) -> Pose {
        self.engine.pose()
    }

    fn is_animating(&self) -> bool {
        self.engine.is_transitioning()
    }
}
