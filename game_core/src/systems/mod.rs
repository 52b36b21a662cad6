pub mod collision;
pub mod movement;
pub mod scoring;
pub mod speedup;

pub use collision::*;
pub use movement::*;
pub use scoring::*;
pub use speedup::*;
