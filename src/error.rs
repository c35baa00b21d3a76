use thiserror::Error;

/// Configuration loading and validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Failures setting up the drawing surface.  All of them are fatal: the
/// game refuses to start rather than draw garbled frames.
#[derive(Error, Debug)]
pub enum SurfaceError {
    #[error("terminal IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("terminal is {cols}x{rows}, need at least {min_cols}x{min_rows}")]
    TooSmall {
        cols: u16,
        rows: u16,
        min_cols: u16,
        min_rows: u16,
    },
}

#[derive(Error, Debug)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
