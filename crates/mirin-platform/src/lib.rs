//! Mirin platform crate.
//!
//! Owns the platform-glue pieces that carry real state: the packaged-asset
//! file subsystem and the multi-touch pointer tracker. Windowing, graphics
//! surfaces and lifecycle dispatch live in the host and are not modelled here.

pub mod filesys;
pub mod input;
pub mod logging;
