/// Rejection of an assumption before it reaches the engine. `field` is the
/// kebab-case input name, shared by the CLI flag and the HTTP error body.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("--{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("--{field} must be {requirement}, got {value}")]
    OutOfRange {
        field: &'static str,
        requirement: &'static str,
        value: f64,
    },

    #[error("--{field} must be between {min} and {max} years, got {value}")]
    YearsOutOfRange {
        field: &'static str,
        min: u32,
        max: u32,
        value: u32,
    },
}

impl InputError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::NotFinite { field }
            | Self::OutOfRange { field, .. }
            | Self::YearsOutOfRange { field, .. } => field,
        }
    }
}
