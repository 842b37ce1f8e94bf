use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::Person;
use crate::source::{FetchError, Source};

pub const FRIENDS_GET_URL: &str = "https://api.vk.com/method/friends.get";
pub const AUTHORIZE_URL: &str = "https://oauth.vk.com/authorize";
pub const REDIRECT_URI: &str = "https://oauth.vk.com/blank.html";
pub const API_VERSION: &str = "5.199";

/// Maximum page size accepted by `friends.get`.
pub const MAX_COUNT: u32 = 5000;

pub const DEFAULT_FIELDS: &[&str] = &[
    "first_name",
    "last_name",
    "id",
    "sex",
    "bdate",
    "country",
    "city",
    "photo_id",
    "status",
    "can_post",
    "can_see_all_posts",
    "can_write_private_message",
    "contacts",
    "domain",
    "education",
    "has_mobile",
    "timezone",
    "last_seen",
    "nickname",
    "online",
    "relation",
    "universities",
];

/// Request parameters for [Vk]. Every field is optional when read from json.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoint: String,
    pub api_version: String,
    pub count: u32,
    pub order: String,
    pub fields: Vec<String>,
    #[serde(skip_serializing)]
    pub access_token: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: FRIENDS_GET_URL.to_string(),
            api_version: API_VERSION.to_string(),
            count: MAX_COUNT,
            order: "name".to_string(),
            fields: DEFAULT_FIELDS.iter().map(|field| field.to_string()).collect(),
            access_token: String::new(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("endpoint", &self.endpoint)
            .field("api_version", &self.api_version)
            .field("count", &self.count)
            .field("order", &self.order)
            .field("fields", &self.fields)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

/// Fetches friend lists from the VK `friends.get` method with a blocking HTTP client.
#[derive(Debug)]
pub struct Vk {
    config: Config,
    client: reqwest::blocking::Client,
}

impl Vk {
    pub fn new(config: Config) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|err| FetchError::Transport(err.to_string()))?;
        Ok(Self { config, client })
    }

    fn query(&self, user_id: &str) -> Vec<(&'static str, String)> {
        vec![
            ("user_id", user_id.to_string()),
            ("order", self.config.order.clone()),
            ("count", self.config.count.min(MAX_COUNT).to_string()),
            ("offset", "0".to_string()),
            ("fields", self.config.fields.join(",")),
            ("access_token", self.config.access_token.clone()),
            ("v", self.config.api_version.clone()),
        ]
    }
}

impl Source for Vk {
    fn friends(&self, user_id: &str) -> Result<Vec<Person>, FetchError> {
        debug!("GET {} for user {}", self.config.endpoint, user_id);
        let body = self
            .client
            .get(&self.config.endpoint)
            .query(&self.query(user_id))
            .send()
            .and_then(|response| response.text())
            .map_err(|err| FetchError::Transport(err.to_string()))?;
        parse_friends(&body, &self.config.fields)
    }
}

#[derive(Deserialize)]
struct Envelope {
    error: Option<ApiError>,
    response: Option<Response>,
}

#[derive(Deserialize)]
struct ApiError {
    #[serde(default)]
    error_code: i64,
    error_msg: Option<String>,
}

#[derive(Deserialize)]
struct Response {
    #[serde(default)]
    items: Vec<Value>,
}

/// Parses a `friends.get` response body. Only the requested `fields` are kept as profile
/// attributes; items without an id are dropped.
pub fn parse_friends<S: AsRef<str>>(body: &str, fields: &[S]) -> Result<Vec<Person>, FetchError> {
    let envelope: Envelope =
        serde_json::from_str(body).map_err(|err| FetchError::Decode(err.to_string()))?;
    if let Some(error) = envelope.error {
        return Err(FetchError::Api {
            code: error.error_code,
            message: error
                .error_msg
                .unwrap_or_else(|| "Unknown error".to_string()),
        });
    }
    let items = envelope.response.map(|r| r.items).unwrap_or_default();
    Ok(items
        .into_iter()
        .filter_map(|item| match Person::from_item(item) {
            Some(mut person) => {
                person.retain_attributes(fields);
                Some(person)
            }
            None => {
                debug!("Skipping friend list item without an id");
                None
            }
        })
        .collect())
}

/// The implicit-flow OAuth URL a user opens to obtain an access token for `app_id`.
pub fn authorize_url(app_id: &str) -> String {
    format!(
        "{AUTHORIZE_URL}?client_id={app_id}&display=page&redirect_uri={REDIRECT_URI}\
         &scope=friends,status,offline&response_type=token&revoke=1&v={API_VERSION}"
    )
}
