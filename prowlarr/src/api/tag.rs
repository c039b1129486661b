//! Tag API implementation

use serde::{Deserialize, Serialize};

use super::{ApiError, Client};

const TAG_PATH: &str = "/api/v1/tag";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default, skip_serializing_if = "is_unset")]
    pub id: i64,
    pub label: String,
}

fn is_unset(id: &i64) -> bool {
    *id == 0
}

/// Tags API for tag operations
pub struct TagsApi<'a> {
    client: &'a Client,
}

impl<'a> TagsApi<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// GET /api/v1/tag
    pub async fn list(&self) -> Result<Vec<Tag>, ApiError> {
        self.client.get(TAG_PATH).await
    }

    /// GET /api/v1/tag/{id}
    pub async fn get(&self, id: i64) -> Result<Tag, ApiError> {
        self.client.get(&format!("{}/{}", TAG_PATH, id)).await
    }

    /// POST /api/v1/tag
    pub async fn create(&self, label: &str) -> Result<Tag, ApiError> {
        let request = Tag {
            id: 0,
            label: label.to_string(),
        };
        self.client.post(TAG_PATH, &request).await
    }

    /// PUT /api/v1/tag/{id}
    pub async fn update(&self, id: i64, label: &str) -> Result<Tag, ApiError> {
        let request = Tag {
            id,
            label: label.to_string(),
        };
        self.client
            .put(&format!("{}/{}", TAG_PATH, id), &request)
            .await
    }

    /// DELETE /api/v1/tag/{id}
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("{}/{}", TAG_PATH, id)).await
    }

    /// Labels are compared case-insensitively, as the server does
    pub async fn find_by_label(&self, label: &str) -> Result<Option<Tag>, ApiError> {
        let tags = self.list().await?;
        Ok(tags
            .into_iter()
            .find(|tag| tag.label.eq_ignore_ascii_case(label)))
    }
}

#[cfg(test)]
mod tests {
    use crate::api::test_helpers::{fast_client, tag_body};
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn create_sends_label_only() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v1/tag")
            .match_body(Matcher::Json(serde_json::json!({ "label": "hd" })))
            .with_status(201)
            .with_body(tag_body(4, "hd"))
            .create_async()
            .await;

        let client = fast_client(&server.url());
        let tag = client.tags().create("hd").await.unwrap();

        assert_eq!(tag.id, 4);
        assert_eq!(tag.label, "hd");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn find_by_label_ignores_case() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1/tag")
            .with_body(r#"[{"id":1,"label":"sd"},{"id":2,"label":"uhd"}]"#)
            .create_async()
            .await;

        let client = fast_client(&server.url());

        let found = client.tags().find_by_label("UHD").await.unwrap();
        assert_eq!(found.map(|t| t.id), Some(2));

        let missing = client.tags().find_by_label("hdr").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn update_puts_id_and_label() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("PUT", "/api/v1/tag/4")
            .match_body(Matcher::Json(serde_json::json!({ "id": 4, "label": "4k" })))
            .with_status(202)
            .with_body(tag_body(4, "4k"))
            .create_async()
            .await;

        let client = fast_client(&server.url());
        let tag = client.tags().update(4, "4k").await.unwrap();

        assert_eq!(tag.label, "4k");
        mock.assert_async().await;
    }
}
