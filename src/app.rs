use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;
use tokio::sync::mpsc;

use crate::config::VisConfig;
use crate::dataset::Shuffler;
use crate::driver::Driver;
use crate::scene::Host;
use crate::timer::{CycleEvent, CycleHandle, CycleTimer};

pub struct App {
    pub driver: Driver,

    // Cycle timer; None while paused
    timer: Option<CycleHandle>,
    // Bumped on every respawn so ticks from a cancelled timer are dropped
    timer_generation: u64,
    cycle_tx: mpsc::Sender<CycleEvent>,

    pub show_help: bool,
    pub status_message: Option<String>,
    pub exit: bool,
}

impl App {
    /// Mount the driver into a single `.vis`-style container and start cycling
    pub fn new(
        config: VisConfig,
        shuffler: Box<dyn Shuffler>,
        cycle_tx: mpsc::Sender<CycleEvent>,
    ) -> Result<Self> {
        let class = config.selector.trim_start_matches('.').to_string();
        let driver = Driver::initialize(Host::single(&class), config, shuffler)?;

        let mut app = Self {
            driver,
            timer: None,
            timer_generation: 0,
            cycle_tx,
            show_help: false,
            status_message: None,
            exit: false,
        };
        app.start_timer();

        Ok(app)
    }

    pub fn is_paused(&self) -> bool {
        self.timer.is_none()
    }

    fn start_timer(&mut self) {
        let period = self.driver.config().cycle_interval();
        self.timer_generation += 1;
        self.timer = Some(CycleTimer::spawn(
            period,
            self.timer_generation,
            self.cycle_tx.clone(),
        ));
    }

    fn stop_timer(&mut self) {
        if let Some(handle) = self.timer.take() {
            handle.cancel();
        }
    }

    pub fn on_cycle(&mut self, event: CycleEvent, now: Instant) {
        match event {
            // A tick can still be queued from before a pause or restart
            CycleEvent::Tick { .. } if self.is_paused() => {}
            CycleEvent::Tick { generation } if generation != self.timer_generation => {
                tracing::debug!("Dropping tick from cancelled timer {}", generation);
            }
            CycleEvent::Tick { .. } => self.driver.cycle(now),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit(),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.quit(),
            KeyCode::Char(' ') => self.toggle_pause(),
            KeyCode::Char('s') => self.shuffle_now(Instant::now()),
            KeyCode::Char('?') => self.show_help = !self.show_help,
            _ => {}
        }
        Ok(())
    }

    fn quit(&mut self) {
        self.stop_timer();
        self.exit = true;
    }

    fn toggle_pause(&mut self) {
        if self.is_paused() {
            self.start_timer();
            self.status_message = Some("Resumed".to_string());
            tracing::info!("Cycle resumed");
        } else {
            self.stop_timer();
            self.status_message = Some("Paused".to_string());
            tracing::info!("Cycle paused");
        }
    }

    /// Shuffle immediately and push the next timed cycle a full period out
    fn shuffle_now(&mut self, now: Instant) {
        self.driver.cycle(now);
        if !self.is_paused() {
            self.stop_timer();
            self.start_timer();
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.stop_timer();
    }
}
