//! Skyring - a floating elemental island diorama with an orbiting traveler.

mod config;
mod environment;
mod events;
mod follow;
mod hud;
mod island;
mod landmarks;
mod orbit;
mod particles;
mod render;
mod traveler;
mod update;
mod zone;

use anyhow::Result;
use engine_core::Time;
use hecs::World;
use input::InputState;
use procgen::generate_sky;
use rand::rngs::StdRng;
use rand::SeedableRng;
use renderer::{Camera, Renderer};
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Fullscreen, Window, WindowId},
};

use config::GameConfig;
use environment::{blend_atmosphere, blended_sky, Atmosphere, SkyScheduler};
use follow::FollowCamera;
use hud::Compass;
use island::{build_island, IslandMeshes};
use landmarks::{build_landmarks, LandmarkMeshes};
use orbit::OrbitSim;
use particles::{wind_field, zone_field, ParticleField};
use traveler::Traveler;
use zone::{sector_blend, Zone};

pub struct GameState {
    pub world: World,
    pub time: Time,
    pub input: InputState,
    pub renderer: Renderer,
    pub camera: Camera,
    pub config: GameConfig,

    pub orbit: OrbitSim,
    pub follow: FollowCamera,
    pub compass: Compass,
    pub sky_scheduler: SkyScheduler,
    pub atmosphere: Atmosphere,

    pub island: IslandMeshes,
    pub landmarks: LandmarkMeshes,
    pub traveler: Traveler,
    pub wind: ParticleField,
    pub zone_fields: [ParticleField; 4],

    pub running: bool,
}

impl GameState {
    async fn new(window: Arc<Window>, config: GameConfig) -> Result<Self> {
        let mut renderer = Renderer::new(window.clone(), config.vsync).await?;

        let mut camera = Camera::default();
        let (width, height) = renderer.dimensions();
        camera.set_aspect(width, height);

        let mut world = World::new();

        let island = build_island(renderer.device(), config.seed);
        let landmarks = build_landmarks(renderer.device(), config.seed, &mut world);

        let mut rng = StdRng::seed_from_u64(config.seed);
        let wind = ParticleField::new(wind_field(), &mut rng);
        let zone_fields = Zone::ALL.map(|zone| ParticleField::new(zone_field(zone), &mut rng));

        // The GLB model streams in on a worker thread so startup never blocks
        // on disk; the traveler pops in once decoded.
        let traveler = Traveler::spawn_load(config.model_path.clone());

        // Seed the dome texture and lighting for the starting position so the
        // first frame is already lit.
        let blend = sector_blend(0.0);
        let atmosphere = blend_atmosphere(&blend, 0.0);
        renderer.set_sky_texture(&generate_sky(&blended_sky(&blend), config.seed));

        log::info!(
            "Skyring initialized: seed {}, {}x{} window",
            config.seed,
            width,
            height
        );

        Ok(Self {
            world,
            time: Time::new(),
            input: InputState::new(),
            renderer,
            camera,
            config,
            orbit: OrbitSim::new(),
            follow: FollowCamera::new(),
            compass: Compass::new(),
            sky_scheduler: SkyScheduler::new(),
            atmosphere,
            island,
            landmarks,
            traveler,
            wind,
            zone_fields,
            running: true,
        })
    }

    fn update(&mut self) {
        self.time.update();
        let dt = self.time.delta_seconds();
        update::frame(self, dt);
        // Clear per-frame input accumulators for next frame.
        self.input.begin_frame();
    }

    fn render(&mut self) -> Result<()> {
        render::run(self)
    }
}

/// Application handler for winit.
struct App {
    state: Option<GameState>,
}

impl App {
    fn new() -> Self {
        Self { state: None }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_none() {
            let config = GameConfig::load();
            let mut window_attrs = Window::default_attributes()
                .with_title("Skyring")
                .with_inner_size(winit::dpi::LogicalSize::new(
                    config.window_width,
                    config.window_height,
                ));
            if config.fullscreen {
                window_attrs = window_attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
            }

            let window = match event_loop.create_window(window_attrs) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    log::error!("Failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            let state = pollster::block_on(GameState::new(window.clone(), config));
            match state {
                Ok(s) => {
                    self.state = Some(s);
                    window.request_redraw();
                }
                Err(e) => {
                    log::error!("Failed to initialize game: {}", e);
                    event_loop.exit();
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(state) = &mut self.state {
            if state.handle_window_event(event) || !state.running {
                event_loop.exit();
            }
        }
    }

    fn device_event(&mut self, _: &ActiveEventLoop, _: DeviceId, event: DeviceEvent) {
        if let Some(state) = &mut self.state {
            state.handle_device_event(event);
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("╔══════════════════════════════════════════════════╗");
    println!("║                     Skyring                      ║");
    println!("╠══════════════════════════════════════════════════╣");
    println!("║  CONTROLS:                                       ║");
    println!("║    Right Arrow - Speed up     │  Drag   - Orbit  ║");
    println!("║    Left Arrow  - Reverse      │  Scroll - Zoom   ║");
    println!("║    Escape      - Quit                            ║");
    println!("╚══════════════════════════════════════════════════╝");

    log::info!("Starting Skyring");

    let event_loop = EventLoop::new()?;
    // Poll continuously so the orbit keeps advancing even without input.
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    event_loop.run_app(&mut app)?;

    Ok(())
}
