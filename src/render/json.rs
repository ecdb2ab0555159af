//! JSON scene dump

use serde::Serialize;
use std::time::Instant;

use crate::scene::Surface;

#[derive(Debug, Serialize)]
pub struct CircleSnapshot {
    pub index: usize,
    pub cx: f64,
    pub cy: f64,
    pub fill: String,
    pub r: f64,
}

#[derive(Debug, Serialize)]
pub struct SceneSnapshot {
    pub width: f64,
    pub height: f64,
    pub circles: Vec<CircleSnapshot>,
}

impl SceneSnapshot {
    pub fn capture(surface: &Surface, now: Instant) -> Self {
        let circles = surface
            .circles()
            .iter()
            .enumerate()
            .map(|(index, c)| CircleSnapshot {
                index,
                cx: c.cx,
                cy: c.cy,
                fill: c.fill.clone(),
                r: c.radius_at(now),
            })
            .collect();

        Self {
            width: surface.width,
            height: surface.height,
            circles,
        }
    }
}

pub fn to_json(surface: &Surface, now: Instant) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&SceneSnapshot::capture(surface, now))
}
