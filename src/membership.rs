use async_trait::async_trait;
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::Error;

fn default_status() -> String {
    "subscribed".to_owned()
}

/// A record in the external mailing-list roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default = "default_status")]
    pub status: String,
}

impl Member {
    /// A member the list still delivers to. Anything the roster marks
    /// `unsubscribed` counts as not a member for gating purposes.
    pub fn is_subscribed(&self) -> bool {
        self.status != "unsubscribed"
    }
}

/// The mailing-list service the gate defers membership decisions to.
#[automock]
#[async_trait]
pub trait Roster: Send + Sync {
    /// Returns the member with exactly this email address, if any.
    async fn find_member(&self, email: &str) -> Result<Option<Member>, Error>;

    /// Adds or updates a member.
    async fn put_member(&self, member: &Member) -> Result<(), Error>;
}

pub struct HttpRoster {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl HttpRoster {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    fn member_url(&self, email: &str) -> String {
        format!("{}/members/{}", self.base_url.trim_end_matches('/'), email)
    }
}

#[async_trait]
impl Roster for HttpRoster {
    async fn find_member(&self, email: &str) -> Result<Option<Member>, Error> {
        let response = self
            .client
            .get(self.member_url(email))
            .header("authToken", &self.token)
            .send()
            .await?;
        if response.status() == http::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let member = response.error_for_status()?.json().await?;
        Ok(Some(member))
    }

    async fn put_member(&self, member: &Member) -> Result<(), Error> {
        self.client
            .put(self.member_url(&member.email))
            .header("authToken", &self.token)
            .json(member)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_records_without_a_status_count_as_subscribed() {
        let member: Member =
            serde_json::from_str(r#"{"email": "a@b.c", "first_name": "A", "last_name": "B"}"#)
                .unwrap();
        assert!(member.is_subscribed());
    }

    #[test]
    fn unsubscribed_members_do_not_pass_the_gate() {
        let member = Member {
            email: "a@b.c".to_owned(),
            first_name: "A".to_owned(),
            last_name: "B".to_owned(),
            status: "unsubscribed".to_owned(),
        };
        assert!(!member.is_subscribed());
    }
}
