//! 3D viewport control: orbit rotation by drag simulation and canvas
//! screenshot capture.
//!
//! Rotation is expressed in degrees and translated to a pointer drag using
//! the host application's observed orbit sensitivity. Captures return
//! base64-encoded PNG data straight from the canvas.

pub mod errors;

mod controller;

pub use controller::ViewportController;
pub use errors::CaptureError;
