pub mod api;
pub mod core;
pub mod input;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::config::{
    BurstConfig, DensityBand, ForceConfig, FormationConfig, HaloConfig, PerfConfig, PointerConfig, SceneConfig,
    SpringParams,
};
pub use api::error::SceneError;
pub use api::types::{Bounds, ElementProbe, LocaleBurst, StaticBounds, Viewport};
pub use core::rng::Rng;
pub use core::scene::SceneState;
pub use core::time::{FrameClock, FrameTime};
pub use input::pointer::{PointerMode, PointerState};
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::commands::{DrawCommand, GradientStop, Rgba};
pub use renderer::instance::{RenderBuffer, StarInstance};
pub use renderer::traits::{HeadlessSurface, Surface};
pub use systems::burst::{BurstPhase, BurstState, BurstTransition};
pub use systems::formation::{Formation, FormationSource, ShapeTable};
pub use systems::halo::{HaloSprite, PointerHalo};
pub use systems::particle::Particle;
pub use systems::perf::PerfMonitor;
