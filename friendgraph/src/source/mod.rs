use thiserror::Error;

use crate::model::Person;

pub use buffer::Buffer;
pub use vk::Vk;

mod buffer;
pub mod vk;

/// A [Source] answers friend list requests for a single person, e.g. by calling a social
/// network's API.
pub trait Source {
    fn friends(&self, user_id: &str) -> Result<Vec<Person>, FetchError>;
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The request itself failed, e.g. a connection error.
    #[error("request failed: {0}")]
    Transport(String),

    /// The response body was not the expected JSON.
    #[error("error decoding response: {0}")]
    Decode(String),

    /// The API answered with an `error` payload.
    #[error("API error {code}: {message}")]
    Api { code: i64, message: String },
}
