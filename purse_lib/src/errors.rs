/// Errors that indicate a programming or input-format problem.  These are
/// never used to report an invalid transaction: that is what the
/// `field_errors` module is for.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Str(String),

    #[error("Invalid id {id} for {kind}")]
    UnknownId { kind: &'static str, id: u32 },

    #[error("Unknown {kind} {name:?}")]
    UnknownName { kind: &'static str, name: String },

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}
