use std::thread;
use std::time::Duration;

use anyhow::Result;
use log::{error, info, warn};

use crate::input::Input;
use crate::model::{Person, PersonId};
use crate::source::{FetchError, Source};

pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

/// Crawls the friends of a root person and, for each of them, their own friends.
///
/// Failures never abort the crawl:
/// - a failed root request ends it with no records,
/// - a decoding or API error for a friend leaves that friend with an empty friend list,
/// - a transport error for a friend skips that friend.
pub struct Collector<S: Source> {
    source: S,
    root_id: PersonId,
    delay: Duration,
}

impl<S: Source> Collector<S> {
    pub fn new(source: S, root_id: impl ToString) -> Self {
        Self {
            source,
            root_id: root_id.to_string(),
            delay: DEFAULT_DELAY,
        }
    }

    /// Pause after each successfully processed friend.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn collect(&self) -> Vec<Person> {
        info!("Fetching friends of {}...", self.root_id);
        let friends = match self.source.friends(&self.root_id) {
            Ok(friends) => friends,
            Err(err) => {
                error!("Could not fetch friends of {}: {}", self.root_id, err);
                vec![]
            }
        };
        if friends.is_empty() {
            warn!("{} has no friends or an error occurred", self.root_id);
            return vec![];
        }

        let total = friends.len();
        let mut processed = Vec::with_capacity(total);
        for (i, friend) in friends.into_iter().enumerate() {
            info!(
                "[{}/{}] Fetching friends of {} (ID: {})...",
                i + 1,
                total,
                friend.name(),
                friend.id
            );
            let Some(friends_ids) = self.friends_ids(&friend) else {
                continue;
            };
            processed.push(friend.with_friends(friends_ids));
            if !self.delay.is_zero() {
                thread::sleep(self.delay);
            }
        }
        info!("Collected {} of {} friends", processed.len(), total);
        processed
    }

    fn friends_ids(&self, friend: &Person) -> Option<Vec<PersonId>> {
        match self.source.friends(&friend.id) {
            Ok(friends) => Some(friends.into_iter().map(|person| person.id).collect()),
            Err(err @ (FetchError::Decode(_) | FetchError::Api { .. })) => {
                warn!("No friends for {} (ID: {}): {}", friend.name(), friend.id, err);
                Some(vec![])
            }
            Err(err @ FetchError::Transport(_)) => {
                error!(
                    "Error fetching friends of {} (ID: {}), skipping: {}",
                    friend.name(),
                    friend.id,
                    err
                );
                None
            }
        }
    }
}

impl<S: Source> Input for Collector<S> {
    fn records(&mut self) -> Result<Vec<Person>> {
        Ok(self.collect())
    }
}
