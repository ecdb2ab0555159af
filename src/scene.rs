//! Host containers, drawing surfaces and circle elements
//!
//! A tiny retained scene: the host holds containers tagged with class
//! names, and a container may own one drawing surface. Surfaces own an
//! ordered list of circles that are only ever created once.

use std::time::Instant;

use crate::transition::Animated;

/// Circle bound to one dataset position
#[derive(Debug, Clone, PartialEq)]
pub struct CircleElement {
    pub cx: f64,
    pub cy: f64,
    pub fill: String,
    pub r: Animated,
}

impl CircleElement {
    pub fn radius_at(&self, now: Instant) -> f64 {
        self.r.value_at(now)
    }
}

/// Fixed-size canvas holding the circles
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
    circles: Vec<CircleElement>,
}

impl Surface {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, circles: Vec::new() }
    }

    pub fn circles(&self) -> &[CircleElement] {
        &self.circles
    }

    pub fn circles_mut(&mut self) -> &mut [CircleElement] {
        &mut self.circles
    }

    pub fn append(&mut self, circle: CircleElement) {
        self.circles.push(circle);
    }
}

#[derive(Debug, Clone, Default)]
pub struct Container {
    pub classes: Vec<String>,
    pub surface: Option<Surface>,
}

impl Container {
    pub fn with_class(class: &str) -> Self {
        Self {
            classes: vec![class.to_string()],
            surface: None,
        }
    }

    /// Only `.class` selectors are understood
    pub fn matches(&self, selector: &str) -> bool {
        match selector.strip_prefix('.') {
            Some(class) if !class.is_empty() => self.classes.iter().any(|c| c == class),
            _ => false,
        }
    }
}

/// The environment the driver mounts into
#[derive(Debug, Clone, Default)]
pub struct Host {
    pub containers: Vec<Container>,
}

impl Host {
    pub fn new(containers: Vec<Container>) -> Self {
        Self { containers }
    }

    /// Host with a single container carrying `class`
    pub fn single(class: &str) -> Self {
        Self::new(vec![Container::with_class(class)])
    }

    pub fn select_all_mut<'a>(
        &'a mut self,
        selector: &'a str,
    ) -> impl Iterator<Item = &'a mut Container> + 'a {
        self.containers.iter_mut().filter(move |c| c.matches(selector))
    }

    pub fn surfaces(&self) -> impl Iterator<Item = &Surface> {
        self.containers.iter().filter_map(|c| c.surface.as_ref())
    }

    pub fn surfaces_mut(&mut self) -> impl Iterator<Item = &mut Surface> {
        self.containers.iter_mut().filter_map(|c| c.surface.as_mut())
    }
}
