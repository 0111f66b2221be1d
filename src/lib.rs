//! phgeo-rs
//! ========
//!
//! Workspace facade. Re-exports [`phgeo_core`] so the demos under `demos/`
//! can `use phgeo_rs::*`.

pub use phgeo_core::*;
