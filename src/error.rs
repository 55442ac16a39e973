use thiserror::Error;

/// Startup configuration problems. These are fatal: the game refuses to run
/// on a degenerate grid.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cell size must be positive")]
    ZeroCellSize,
    #[error("field of {field_size}px cannot hold a {cell_size}px cell")]
    FieldTooSmall { field_size: u32, cell_size: u32 },
    #[error("field of {field_size}px exceeds the {max}px limit")]
    FieldTooLarge { field_size: u32, max: u32 },
    #[error("grid has {cols} columns, at least {min} are needed for the drop lanes")]
    TooFewColumns { cols: u32, min: u32 },
    #[error("could not read settings file")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("could not parse settings file")]
    Parse {
        #[from]
        source: serde_json::Error,
    },
}

/// Audio collaborator failures. Never surfaced to gameplay.
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("audio output is unavailable")]
    Unavailable,
}
