//! Hook for non-player characters.
//!
//! The engine advances NPCs once per tick after the player has moved. NPC
//! behaviour itself lives outside this crate; [`IdleNpcs`] is used when no
//! controller is supplied.

use cgmath::Point3;

pub trait NpcController {
    /// Advances all NPCs by `dt` seconds. `observer` is the player's eye.
    fn update(&mut self, dt: f32, observer: Point3<f32>);
}

/// A controller with no NPCs.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdleNpcs;

impl NpcController for IdleNpcs {
    fn update(&mut self, _dt: f32, _observer: Point3<f32>) {}
}
