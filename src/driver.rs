//! Visualization driver
//!
//! Owns the mounted surfaces, the position scale and the dataset, and
//! binds the dataset onto circles strictly by index:
//!
//! - `RenderMode::Create` builds one circle per dataset entry
//! - `RenderMode::Update` retargets each existing circle's radius
//!
//! Circles are never recreated, so a shuffle reassigns radii across
//! fixed positions.

use std::time::{Duration, Instant};

use crate::config::{ConfigError, VisConfig};
use crate::dataset::{Dataset, Shuffler};
use crate::scale::PointScale;
use crate::scene::{CircleElement, Host, Surface};
use crate::transition::Animated;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Create,
    Update,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// Rendered once, no cycle has fired yet
    Initialized,
    Cycling,
}

pub struct Driver {
    host: Host,
    scale: PointScale,
    dataset: Dataset,
    shuffler: Box<dyn Shuffler>,
    config: VisConfig,
    state: DriverState,
    cycles: u64,
}

impl Driver {
    /// Mount a surface into every matching container and render once
    pub fn initialize(
        host: Host,
        config: VisConfig,
        shuffler: Box<dyn Shuffler>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let dataset = config.dataset()?;
        let scale = PointScale::new(dataset.len(), (0.0, config.width), config.padding);

        let mut driver = Self {
            host,
            scale,
            dataset,
            shuffler,
            config,
            state: DriverState::Initialized,
            cycles: 0,
        };
        driver.mount(Instant::now());

        Ok(driver)
    }

    /// Attach surfaces to matching containers that don't have one yet
    ///
    /// Safe to call repeatedly: mounted containers are left alone.
    pub fn mount(&mut self, now: Instant) {
        let selector = self.config.selector.clone();
        let mut mounted = 0;

        for container in self.host.select_all_mut(&selector) {
            if container.surface.is_some() {
                tracing::warn!("Container already has a surface, skipping");
                continue;
            }
            let mut surface = Surface::new(self.config.width, self.config.height);
            bind(
                &mut surface,
                &self.dataset,
                &self.scale,
                &self.config,
                RenderMode::Create,
                now,
            );
            container.surface = Some(surface);
            mounted += 1;
        }

        if mounted == 0 {
            tracing::debug!("No new containers matched {}", selector);
        } else {
            tracing::info!("Mounted {} surface(s) for {}", mounted, selector);
        }
    }

    pub fn render(&mut self, mode: RenderMode, now: Instant) {
        for surface in self.host.surfaces_mut() {
            bind(surface, &self.dataset, &self.scale, &self.config, mode, now);
        }
    }

    /// Shuffle the dataset and animate to it
    pub fn cycle(&mut self, now: Instant) {
        if !self.is_settled(now) {
            tracing::warn!("Cycle fired while a transition was still running");
        }
        self.dataset.shuffle_with(self.shuffler.as_mut());
        self.render(RenderMode::Update, now);
        self.state = DriverState::Cycling;
        self.cycles += 1;
        tracing::debug!("Cycle {} -> {:?}", self.cycles, self.dataset.values());
    }

    /// True once every radius transition has finished
    pub fn is_settled(&self, now: Instant) -> bool {
        self.host
            .surfaces()
            .flat_map(|s| s.circles())
            .all(|c| c.r.is_settled(now))
    }

    pub fn surfaces(&self) -> impl Iterator<Item = &Surface> {
        self.host.surfaces()
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn config(&self) -> &VisConfig {
        &self.config
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn transition(&self) -> Duration {
        self.config.transition()
    }
}

/// Positional join of `dataset` onto the surface's circles
fn bind(
    surface: &mut Surface,
    dataset: &Dataset,
    scale: &PointScale,
    config: &VisConfig,
    mode: RenderMode,
    now: Instant,
) {
    match mode {
        RenderMode::Create => {
            let cy = surface.height / 2.0;
            for (i, &value) in dataset.values().iter().enumerate().skip(surface.circles().len()) {
                let Some(cx) = scale.at(i) else { continue };
                surface.append(CircleElement {
                    cx,
                    cy,
                    fill: config.fill.clone(),
                    r: Animated::Fixed(value),
                });
            }
        }
        RenderMode::Update => {
            let duration = config.transition();
            for (circle, &value) in surface.circles_mut().iter_mut().zip(dataset.values()) {
                circle.r.animate_to(value, now, duration);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::RandomShuffler;
    use crate::scene::Container;

    /// Reverses the values, standing in for a random permutation
    struct ReverseShuffler;

    impl Shuffler for ReverseShuffler {
        fn shuffle(&mut self, values: &mut [f64]) {
            values.reverse();
        }
    }

    impl Driver {
        /// Displayed radii of the first surface at `now`
        fn frame(&self, now: Instant) -> Vec<f64> {
            self.surfaces()
                .next()
                .map(|s| s.circles().iter().map(|c| c.radius_at(now)).collect())
                .unwrap_or_default()
        }

        fn scale(&self) -> &PointScale {
            &self.scale
        }
    }

    fn driver_with(shuffler: Box<dyn Shuffler>) -> Driver {
        Driver::initialize(Host::single("vis"), VisConfig::default(), shuffler).unwrap()
    }

    fn sorted(mut v: Vec<f64>) -> Vec<f64> {
        v.sort_by(|a, b| a.partial_cmp(b).unwrap());
        v
    }

    #[test]
    fn test_initial_layout() {
        let driver = driver_with(Box::new(ReverseShuffler));
        let surface = driver.surfaces().next().unwrap();

        assert_eq!(surface.width, 500.0);
        assert_eq!(surface.height, 75.0);
        assert_eq!(surface.circles().len(), 6);

        for (i, circle) in surface.circles().iter().enumerate() {
            assert_eq!(circle.cx, driver.scale().at(i).unwrap());
            assert_eq!(circle.cy, 37.5);
            assert_eq!(circle.fill, "#663399");
        }

        let xs: Vec<f64> = surface.circles().iter().map(|c| c.cx).collect();
        assert!(xs.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(driver.state(), DriverState::Initialized);
    }

    #[test]
    fn test_initial_radii() {
        let driver = driver_with(Box::new(ReverseShuffler));
        let now = Instant::now();
        assert_eq!(driver.frame(now), vec![5.0, 8.0, 11.0, 14.0, 17.0, 20.0]);
        assert!(driver.is_settled(now));
    }

    #[test]
    fn test_reverse_cycle_end_to_end() {
        let mut driver = driver_with(Box::new(ReverseShuffler));
        let before = driver.surfaces().next().unwrap().clone();

        let now = Instant::now();
        driver.cycle(now);
        let done = now + Duration::from_millis(1000);

        assert_eq!(driver.state(), DriverState::Cycling);
        assert_eq!(driver.frame(done), vec![20.0, 17.0, 14.0, 11.0, 8.0, 5.0]);

        let after = driver.surfaces().next().unwrap();
        assert_eq!(after.circles().len(), 6);
        for (old, new) in before.circles().iter().zip(after.circles()) {
            assert_eq!(old.cx, new.cx);
            assert_eq!(old.cy, new.cy);
            assert_eq!(old.fill, new.fill);
        }
    }

    #[test]
    fn test_transition_only_touches_radius() {
        let mut driver = driver_with(Box::new(ReverseShuffler));
        let before = driver.surfaces().next().unwrap().clone();

        let now = Instant::now();
        driver.cycle(now);
        let mid = now + Duration::from_millis(500);

        assert!(!driver.is_settled(mid));
        let radii = driver.frame(mid);
        // Halfway through a cubic in-out tween sits at the midpoint
        assert!((radii[0] - 12.5).abs() < 1e-9);

        let surface = driver.surfaces().next().unwrap();
        for (old, new) in before.circles().iter().zip(surface.circles()) {
            assert_eq!((old.cx, old.cy, &old.fill), (new.cx, new.cy, &new.fill));
        }
        assert!(driver.is_settled(now + Duration::from_millis(1000)));
    }

    #[test]
    fn test_random_cycles_keep_values() {
        let mut driver = driver_with(Box::new(RandomShuffler::seeded(3)));
        let mut now = Instant::now();

        for _ in 0..50 {
            driver.cycle(now);
            now += Duration::from_millis(2000);

            let radii = driver.frame(now);
            assert_eq!(radii.len(), 6);
            assert_eq!(radii, driver.dataset().values().to_vec());
            assert_eq!(sorted(radii), vec![5.0, 8.0, 11.0, 14.0, 17.0, 20.0]);
        }
        assert_eq!(driver.cycles(), 50);
    }

    #[test]
    fn test_mounts_into_every_matching_container() {
        let host = Host::new(vec![
            Container::with_class("vis"),
            Container::with_class("other"),
            Container::with_class("vis"),
        ]);
        let driver =
            Driver::initialize(host, VisConfig::default(), Box::new(ReverseShuffler)).unwrap();
        assert_eq!(driver.surfaces().count(), 2);
    }

    #[test]
    fn test_missing_container_is_empty() {
        let mut driver = Driver::initialize(
            Host::single("nothing-here"),
            VisConfig::default(),
            Box::new(ReverseShuffler),
        )
        .unwrap();

        let now = Instant::now();
        driver.cycle(now);
        assert_eq!(driver.surfaces().count(), 0);
        assert!(driver.frame(now).is_empty());
        assert!(driver.is_settled(now));
    }

    #[test]
    fn test_repeated_mount_does_not_duplicate() {
        let mut driver = driver_with(Box::new(ReverseShuffler));
        driver.mount(Instant::now());
        driver.mount(Instant::now());

        assert_eq!(driver.surfaces().count(), 1);
        assert_eq!(driver.surfaces().next().unwrap().circles().len(), 6);
    }

    #[test]
    fn test_create_render_is_idempotent() {
        let mut driver = driver_with(Box::new(ReverseShuffler));
        driver.render(RenderMode::Create, Instant::now());
        assert_eq!(driver.surfaces().next().unwrap().circles().len(), 6);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = VisConfig {
            transition_ms: 5000,
            ..VisConfig::default()
        };
        let result = Driver::initialize(Host::single("vis"), config, Box::new(ReverseShuffler));
        assert!(matches!(result, Err(ConfigError::TransitionTooLong { .. })));
    }
}
