pub mod commands;
pub mod instance;
pub mod traits;

pub use commands::{DrawCommand, GradientStop, Rgba};
pub use instance::{RenderBuffer, StarInstance};
pub use traits::{HeadlessSurface, Surface};
