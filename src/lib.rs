//! Generator for the Lock N Load brand logo and favicon used by the
//! campus-bites customer and admin apps.

pub mod cli;
pub mod config;
pub mod encoder;
pub mod error;
pub mod generate;
pub mod renderer;

pub use config::{Label, LogoConfig, Target};
pub use error::LogoError;
pub use generate::{generate, GenerateOptions, Report};
