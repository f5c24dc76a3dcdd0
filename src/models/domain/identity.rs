use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub name: String,
    #[serde(rename = "loggedIn", alias = "isLoggedIn")]
    pub is_logged_in: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logged_in_at: Option<DateTime<Utc>>,
}

impl Identity {
    pub fn logged_in(name: &str) -> Self {
        Identity {
            name: name.to_string(),
            is_logged_in: true,
            logged_in_at: Some(Utc::now()),
        }
    }
}
