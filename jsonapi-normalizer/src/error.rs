use thiserror::Error;

#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("Invalid input: a JSON:API document must be a JSON object, found {0}")]
    InvalidInput(&'static str),
    #[error("Invalid member `{member}`: expected {expected}")]
    InvalidMember { member: &'static str, expected: &'static str },
    #[error("Invalid resource object at `{member}[{index}]`: {source}")]
    InvalidResource {
        member: &'static str,
        index: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid key case: {0}, the valid cases: `camel`, `pascal`, `snake`, `kebab`, `preserve`")]
    UnknownKeyCase(String),
    #[error("Invalid JSON")]
    Json(#[source] serde_json::Error),
}

impl From<serde_json::Error> for NormalizeError {
    fn from(err: serde_json::Error) -> Self { NormalizeError::Json(err) }
}
