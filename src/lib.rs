pub mod block;
pub mod config;
pub mod constants;
pub mod dual;
pub mod engine;
pub mod euler;
pub mod rotation_errors;
pub mod scalar;
pub mod trig;
pub mod wigner;
pub mod zeta;

pub use config::WignerConfig;
pub use engine::Wigner;
pub use rotation_errors::RotationError;
