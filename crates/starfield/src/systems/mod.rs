pub mod burst;
pub mod forces;
pub mod formation;
pub mod halo;
pub mod particle;
pub mod perf;
pub mod render;
