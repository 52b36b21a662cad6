//! Seams to the collaborators that live outside the simulation:
//! input polling and audio playback.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Abstract control identifier; the frontend maps it to a key or button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Control(pub u16);

impl Control {
    pub const W: Control = Control(0);
    pub const S: Control = Control(1);
    pub const UP: Control = Control(2);
    pub const DOWN: Control = Control(3);
}

/// Held-button state, queried once per paddle binding per tick
pub trait InputSource {
    fn is_held(&self, control: Control) -> bool;
}

impl InputSource for HashSet<Control> {
    fn is_held(&self, control: Control) -> bool {
        self.contains(&control)
    }
}

/// Fire-and-forget notifications for sound effects and music
pub trait AudioHooks {
    fn on_score(&mut self) {}
    fn on_finish(&mut self) {}
    fn on_hit(&mut self) {}
    fn on_pickup(&mut self) {}
    fn start_music(&mut self) {}
    fn stop_music(&mut self) {}
}

/// Silent audio
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioHooks for NullAudio {}
