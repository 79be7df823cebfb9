use thiserror::Error;

/// Configuration errors surfaced while building a `World` — all of these
/// are caller mistakes (§7: "Configuration errors... surfaced immediately
/// at startup; the program terminates with a message. Not recoverable.").
#[derive(Debug, Error, PartialEq)]
pub enum WorldError {
    #[error("sphere list is full (capacity {capacity})")]
    SphereCapacityExceeded { capacity: usize },

    #[error("plane list is full (capacity {capacity})")]
    PlaneCapacityExceeded { capacity: usize },

    #[error("sphere radius must be positive, got {radius}")]
    NonPositiveRadius { radius: f32 },

    #[error("dielectric refractive index must be positive, got {ior}")]
    NonPositiveIor { ior: f32 },

    #[error("shutter start time {start} must not exceed end time {end}")]
    InvalidShutter { start: f32, end: f32 },
}

/// Errors surfaced by the CLI front end.
#[derive(Debug, Error, PartialEq)]
pub enum CliError {
    #[error("no output filename given; usage: <program> <output-filename>")]
    MissingOutputPath,
}
