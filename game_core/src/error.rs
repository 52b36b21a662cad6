use thiserror::Error;

/// Configuration that cannot produce a playable board
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("{entity} ({size}) does not fit the board ({board})")]
    DoesNotFit {
        entity: &'static str,
        size: f32,
        board: f32,
    },

    #[error("Pickup interval is inverted: min {min} > max {max}")]
    InvertedInterval { min: u64, max: u64 },

    #[error("Pickup field is empty after margins are applied")]
    EmptyPickupField,

    #[error("Particle palette is inverted: {min} > {max}")]
    InvertedPalette { min: u8, max: u8 },
}

/// Music track data that cannot be played back as described
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrackError {
    #[error("Invalid note '{0}'")]
    InvalidNote(String),

    #[error("Unknown drum '{0}'")]
    UnknownDrum(char),

    #[error("Sound of length {len} does not loop within the longest sound ({longest})")]
    LoopMismatch { len: usize, longest: usize },

    #[error("Note {note} shifted by {octaves} octaves leaves the playable range")]
    OutOfRange { note: u8, octaves: i32 },

    #[error("No sounds to standardise")]
    Empty,
}
