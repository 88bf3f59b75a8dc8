use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, warn};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use gallery_viewer::cli::Cli;
use gallery_viewer::config::NavigationConfig;
use gallery_viewer::core::{Clock, WinitGestureAdapter};
use gallery_viewer::animation::AnimationPlayer;
use gallery_viewer::loaders::{load_scene, LoadedScene};
use gallery_viewer::navigation::Navigator;
use gallery_viewer::scene::{NodeTransform, SceneGraph};
use gallery_viewer::traits::SceneLookup;
use gallery_viewer::ui::NavigationUi;
use gallery_viewer::window::GalleryWindow;

const INITIAL_WINDOW_WIDTH: u32 = 1280;
const INITIAL_WINDOW_HEIGHT: u32 = 800;

/// Scene graph arriving from the loader thread, with its looping clip
enum SceneState {
    Empty,
    Loading(Receiver<Result<LoadedScene>>),
    Ready {
        graph: SceneGraph,
        animation: Option<AnimationPlayer>,
    },
}

impl SceneState {
    fn spawn(path: PathBuf, root: NodeTransform) -> Self {
        let (sender, receiver) = mpsc::channel();
        std::thread::spawn(move || {
            // The receiver is gone only when the app already quit
            let _ = sender.send(load_scene(&path, root));
        });
        SceneState::Loading(receiver)
    }

    fn poll(&mut self) {
        let SceneState::Loading(receiver) = self else {
            return;
        };
        match receiver.try_recv() {
            Ok(Ok(loaded)) => {
                *self = SceneState::Ready {
                    graph: loaded.graph,
                    animation: loaded.animation.map(AnimationPlayer::new),
                }
            }
            Ok(Err(e)) => {
                error!("Scene failed to load: {:#}", e);
                *self = SceneState::Empty;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => *self = SceneState::Empty,
        }
    }

    /// Play the clip forward by the frame delta
    fn animate(&mut self, delta_seconds: f32) {
        if let SceneState::Ready {
            graph,
            animation: Some(player),
        } = self
        {
            player.advance(delta_seconds, graph);
        }
    }

    fn lookup(&self) -> Option<&dyn SceneLookup> {
        match self {
            SceneState::Ready { graph, .. } => Some(graph),
            _ => None,
        }
    }
}

struct App {
    window: Option<GalleryWindow>,
    navigator: Navigator,
    input: WinitGestureAdapter,
    clock: Clock,
    scene: SceneState,
    ui: Option<NavigationUi>,
    intro_pending: bool,
}

impl App {
    fn new(cli: &Cli, config: &NavigationConfig) -> Result<Self> {
        let navigator = Navigator::new(config).context("Invalid navigation config")?;
        let scene = match &cli.scene {
            Some(path) => SceneState::spawn(path.clone(), config.scene_root()),
            None => SceneState::Empty,
        };

        Ok(Self {
            window: None,
            navigator,
            input: WinitGestureAdapter::new(),
            clock: Clock::with_max_delta(config.max_frame_delta),
            scene,
            ui: (!cli.no_ui).then(|| NavigationUi::new(config.hotspots.clone())),
            intro_pending: config.intro.is_some(),
        })
    }

    fn handle_key(&mut self, key: KeyCode) {
        let result = match key {
            KeyCode::ArrowRight => self.navigator.next(),
            KeyCode::ArrowLeft => self.navigator.previous(),
            KeyCode::Home => self.navigator.goto_index(0),
            _ => return,
        };
        if let Some(ui) = &mut self.ui {
            ui.record(result);
        } else if let Err(e) = result {
            warn!("{}", e);
        }
    }

    fn redraw(&mut self) {
        self.scene.poll();
        // Scene and camera advance by the same delta
        let delta = self.clock.tick();
        self.scene.animate(delta);
        self.navigator.update(delta);

        let Some(window) = &mut self.window else {
            return;
        };
        let navigator = &mut self.navigator;
        let scene = self.scene.lookup();
        let ui = &mut self.ui;

        let result = window.render(|ctx| {
            if let Some(ui) = ui.as_mut() {
                ui.show(ctx, navigator, scene);
            }
        });
        match result {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => window.reconfigure(),
            Err(e) => error!("Render error: {}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // A suspended app must not fast-forward the camera
        self.clock.reset();
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title("Gallery")
                .with_inner_size(winit::dpi::LogicalSize::new(
                    INITIAL_WINDOW_WIDTH,
                    INITIAL_WINDOW_HEIGHT,
                )),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        match pollster::block_on(GalleryWindow::new(window)) {
            Ok(gallery) => self.window = Some(gallery),
            Err(e) => {
                error!("Failed to initialize renderer: {:#}", e);
                event_loop.exit();
                return;
            }
        }

        if std::mem::take(&mut self.intro_pending) {
            if let Err(e) = self.navigator.play_intro() {
                warn!("Intro skipped: {}", e);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        // Let egui handle the event first; a running drag still sees
        // releases and cursor moves over the overlay
        if let Some(window) = &mut self.window {
            if window.handle_event(&event) && !WinitGestureAdapter::tracks_consumed(&event) {
                return;
            }
        }

        if let Some(gesture) = self.input.process_event(&event) {
            self.navigator.handle_input(gesture);
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(key),
                        repeat: false,
                        ..
                    },
                ..
            } => self.handle_key(key),
            WindowEvent::Resized(size) => {
                if let Some(window) = &mut self.window {
                    window.resize(size);
                }
            }
            WindowEvent::Occluded(false) => self.clock.reset(),
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.window().request_redraw();
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => NavigationConfig::load(path)
            .with_context(|| format!("Failed to load config {:?}", path))?,
        None => NavigationConfig::default(),
    };
    cli.apply_overrides(&mut config);
    config.validate().context("Invalid command-line overrides")?;

    let event_loop = EventLoop::new()?;
    let mut app = App::new(&cli, &config)?;

    info!(
        "Gallery viewer: {} viewpoints. Drag to orbit, right-drag to pan, wheel to zoom, arrows to step, Escape to quit",
        app.navigator.registry().len()
    );
    event_loop.run_app(&mut app)?;

    Ok(())
}
