use std::collections::HashMap;

use crate::model::{Person, PersonId};
use crate::source::{FetchError, Source};

/// Answers friend list requests from memory. Unknown ids have no friends.
#[derive(Debug, Default, Clone)]
pub struct Buffer {
    responses: HashMap<PersonId, Result<Vec<Person>, FetchError>>,
}

impl Buffer {
    pub fn with_friends(mut self, user_id: impl ToString, friends: Vec<Person>) -> Self {
        self.responses.insert(user_id.to_string(), Ok(friends));
        self
    }

    /// Every request for `user_id` fails with `error`.
    pub fn with_error(mut self, user_id: impl ToString, error: FetchError) -> Self {
        self.responses.insert(user_id.to_string(), Err(error));
        self
    }
}

impl Source for Buffer {
    fn friends(&self, user_id: &str) -> Result<Vec<Person>, FetchError> {
        match self.responses.get(user_id) {
            Some(response) => response.clone(),
            None => Ok(vec![]),
        }
    }
}
