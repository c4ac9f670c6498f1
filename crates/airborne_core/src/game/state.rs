//! Game-flow state machine
//!
//! One process-wide state gates the whole per-frame update: nothing but
//! rendering happens outside [`GameState::Playing`]. Transitions are driven
//! by external focus signals and by terminal collision/fuel outcomes.

/// The four session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    /// Fresh session, never focused
    #[default]
    Start,
    /// Simulation running
    Playing,
    /// Focus lost; simulation frozen, rendering continues
    Paused,
    /// Terminal; recovery means constructing a fresh simulation
    GameOver,
}

/// State machine plus the zero-dt resume bookkeeping
///
/// Leaving [`GameState::Paused`] (or [`GameState::Start`]) arms a zero
/// elapsed-time tick so the first frame back never integrates across the
/// whole pause gap.
#[derive(Debug, Default)]
pub struct GameFlow {
    state: GameState,
    resume_armed: bool,
}

impl GameFlow {
    /// Create a flow in [`GameState::Start`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Whether the simulation should advance this frame
    pub fn is_playing(&self) -> bool {
        self.state == GameState::Playing
    }

    /// External focus-gained signal
    ///
    /// Start and Paused both enter Playing with a zero-tick armed; Playing
    /// and GameOver ignore the signal.
    pub fn focus_gained(&mut self) {
        match self.state {
            GameState::Start | GameState::Paused => {
                log::info!("focus gained: {:?} -> Playing", self.state);
                self.state = GameState::Playing;
                self.resume_armed = true;
            }
            GameState::Playing | GameState::GameOver => {}
        }
    }

    /// External focus-lost signal; only Playing pauses
    pub fn focus_lost(&mut self) {
        if self.state == GameState::Playing {
            log::info!("focus lost: Playing -> Paused");
            self.state = GameState::Paused;
        }
    }

    /// Terminal transition from a fatal collision or fuel depletion
    pub fn game_over(&mut self) {
        if self.state == GameState::Playing {
            log::info!("game over");
            self.state = GameState::GameOver;
        }
    }

    /// The dt the simulation should actually use this frame
    ///
    /// Zero unless Playing; the first Playing frame after a resume is also
    /// forced to zero (consuming the armed flag) so rendering continues while
    /// integration stands still.
    pub fn effective_dt(&mut self, dt: f32) -> f32 {
        if self.state != GameState::Playing {
            return 0.0;
        }
        if self.resume_armed {
            self.resume_armed = false;
            return 0.0;
        }
        dt
    }
}
