//! Headless Airborne driver
//!
//! Runs a complete game session without a renderer: scripted steering input,
//! a real frame clock, and log output instead of a HUD. Useful for soak
//! testing the simulation and for profiling the collision pass.

use airborne_core::prelude::*;
use airborne_core::scene::{MeshHandle, ModelInstance};

use std::time::Duration;

/// Frames to simulate before the driver gives up on the session
const MAX_FRAMES: u64 = 60 * 120;

/// Fixed simulation step, one display refresh at 60 Hz
const FRAME_DT: f32 = 1.0 / 60.0;

struct HeadlessApp {
    sim: Simulation,
    timer: Timer,
}

impl HeadlessApp {
    fn new(config: &GameConfig) -> Self {
        // Placeholder mesh handles; a renderer would map these to GPU buffers
        let payloads = ScenePayloads {
            player: NodePayload::Model(ModelInstance::new(MeshHandle(1))),
            pickup: NodePayload::Model(ModelInstance::new(MeshHandle(2))),
            cloud: NodePayload::Model(ModelInstance::new(MeshHandle(3))),
        };

        Self {
            sim: Simulation::with_payloads(config, payloads),
            timer: Timer::new(),
        }
    }

    fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        // A windowed build would wire this to focus events; headless, the
        // session simply starts playing immediately
        self.sim.flow_mut().focus_gained();

        for frame in 0..MAX_FRAMES {
            self.timer.update();

            let intent = Self::scripted_intent(self.sim.playtime());
            let events = self.sim.advance(FRAME_DT, &intent);

            for event in &events {
                match event {
                    GameEvent::Pickup(_) => {
                        log::info!("fuel collected, score {}", self.sim.score());
                    }
                    GameEvent::FatalCollision => log::warn!("crashed into an obstacle"),
                    GameEvent::FuelDepleted => log::warn!("ran out of fuel"),
                }
            }

            if self.sim.fuel_low() && frame % 60 == 0 {
                log::info!("low fuel: {:.0}%", self.sim.fuel_level() * 100.0);
            }

            if self.sim.flow().state() == GameState::GameOver {
                break;
            }

            std::thread::sleep(Duration::from_secs_f32(FRAME_DT));
        }

        log::info!(
            "session over: score {}, {:.1}s flown, {:.1} avg fps",
            self.sim.score(),
            self.sim.playtime(),
            self.timer.current_fps()
        );
        Ok(())
    }

    /// Gentle weaving flight path so the soak covers turning and banking
    fn scripted_intent(playtime: f32) -> SteerIntent {
        SteerIntent {
            boost: false,
            pitch_delta: 0.0,
            yaw_delta: 0.003 * (playtime * 0.25).sin(),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Starting Airborne headless session");

    let config = match GameConfig::load_from_file("airborne.toml") {
        Ok(config) => {
            log::info!("loaded configuration from airborne.toml");
            config
        }
        Err(err) => {
            log::info!("using default configuration ({err})");
            GameConfig::default()
        }
    };

    let mut app = HeadlessApp::new(&config);
    app.run()
}
