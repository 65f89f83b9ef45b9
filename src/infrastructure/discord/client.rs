//! Discord REST API client implementing the history and publish ports.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::dto::{ChannelResponse, ErrorResponse, MessageResponse};
use crate::domain::entities::{
    Attachment, AttachmentFile, Channel, ChannelId, Message, MessageId,
};
use crate::domain::errors::PlatformError;
use crate::domain::ports::{HistoryPort, PublishPort};

const DISCORD_API_BASE: &str = "https://discord.com/api/v10";
const USER_AGENT: &str = concat!("DiscordBot (artporter, ", env!("CARGO_PKG_VERSION"), ")");

/// Discord REST API client authenticated with a bot token.
pub struct DiscordRestClient {
    client: Client,
    base_url: String,
    authorization: String,
}

impl DiscordRestClient {
    /// Creates a client with the default base URL.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(token: &str) -> Result<Self, PlatformError> {
        Self::with_base_url(token, DISCORD_API_BASE)
    }

    /// Creates a client with a custom base URL.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_base_url(token: &str, base_url: impl Into<String>) -> Result<Self, PlatformError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| {
                PlatformError::unexpected(format!("failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            authorization: format!("Bot {token}"),
        })
    }

    fn map_send_error(e: &reqwest::Error) -> PlatformError {
        if e.is_timeout() {
            PlatformError::network("request timed out")
        } else if e.is_connect() {
            PlatformError::network("failed to connect to Discord")
        } else {
            PlatformError::network(e.to_string())
        }
    }

    async fn handle_error_response(
        resource: &str,
        status: StatusCode,
        response: reqwest::Response,
    ) -> PlatformError {
        let error_message = match response.json::<ErrorResponse>().await {
            Ok(error) => error.message,
            Err(_) => format!("HTTP {status}"),
        };

        match status {
            StatusCode::NOT_FOUND => PlatformError::not_found(resource),
            StatusCode::TOO_MANY_REQUESTS => PlatformError::RateLimited { retry_after_ms: 5000 },
            StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
                PlatformError::network("Discord API is temporarily unavailable")
            }
            _ => PlatformError::api(status.as_u16(), error_message),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        resource: &str,
    ) -> Result<T, PlatformError> {
        let url = format!("{}{path}", self.base_url);

        let response = self
            .client
            .get(&url)
            .header(header::AUTHORIZATION, &self.authorization)
            .send()
            .await
            .map_err(|e| {
                warn!(resource, error = %e, "Discord API request failed");
                Self::map_send_error(&e)
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::handle_error_response(resource, status, response).await);
        }

        response.json().await.map_err(|e| {
            warn!(resource, error = %e, "Failed to parse Discord response");
            PlatformError::invalid_response(e.to_string())
        })
    }

    async fn post(
        &self,
        resource: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<(), PlatformError> {
        let response = request
            .header(header::AUTHORIZATION, &self.authorization)
            .send()
            .await
            .map_err(|e| {
                warn!(resource, error = %e, "Discord API send failed");
                Self::map_send_error(&e)
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::handle_error_response(resource, status, response).await);
        }
        Ok(())
    }
}

#[async_trait]
impl HistoryPort for DiscordRestClient {
    async fn fetch_channel(&self, channel_id: ChannelId) -> Result<Channel, PlatformError> {
        debug!(%channel_id, "Fetching channel");
        self.get_json::<ChannelResponse>(
            &format!("/channels/{channel_id}"),
            &format!("channel {channel_id}"),
        )
        .await?
        .into_domain()
    }

    async fn fetch_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> Result<Message, PlatformError> {
        debug!(%channel_id, %message_id, "Fetching message");
        self.get_json::<MessageResponse>(
            &format!("/channels/{channel_id}/messages/{message_id}"),
            &format!("message {message_id}"),
        )
        .await?
        .into_domain()
    }

    async fn fetch_page(
        &self,
        channel_id: ChannelId,
        after: u64,
        limit: u8,
    ) -> Result<Vec<Message>, PlatformError> {
        let page: Vec<MessageResponse> = self
            .get_json(
                &format!("/channels/{channel_id}/messages?after={after}&limit={limit}"),
                &format!("history of channel {channel_id}"),
            )
            .await?;

        // The API returns pages newest first; the port contract is oldest
        // first.
        let mut messages = page
            .into_iter()
            .map(MessageResponse::into_domain)
            .collect::<Result<Vec<_>, _>>()?;
        messages.sort_by_key(Message::id);
        Ok(messages)
    }

    async fn download_attachment(&self, attachment: &Attachment) -> Result<Bytes, PlatformError> {
        debug!(filename = attachment.filename(), "Downloading attachment");

        // CDN urls are pre-signed; no authorization header.
        let response = self
            .client
            .get(attachment.url())
            .send()
            .await
            .map_err(|e| Self::map_send_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PlatformError::api(
                status.as_u16(),
                format!("attachment download failed: {}", attachment.filename()),
            ));
        }

        response
            .bytes()
            .await
            .map_err(|e| PlatformError::network(format!("failed to read attachment body: {e}")))
    }
}

#[async_trait]
impl PublishPort for DiscordRestClient {
    async fn send_text(&self, channel_id: ChannelId, content: &str) -> Result<(), PlatformError> {
        let url = format!("{}/channels/{channel_id}/messages", self.base_url);
        let request = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "content": content }));
        self.post(&format!("message to channel {channel_id}"), request)
            .await
    }

    async fn send_file(
        &self,
        channel_id: ChannelId,
        file: &AttachmentFile,
    ) -> Result<(), PlatformError> {
        let url = format!("{}/channels/{channel_id}/messages", self.base_url);

        let mut part = reqwest::multipart::Part::bytes(file.bytes().to_vec())
            .file_name(file.filename().to_owned());
        if let Some(content_type) = file.content_type() {
            part = part.mime_str(content_type).map_err(|e| {
                PlatformError::unexpected(format!(
                    "bad content type {content_type} for {}: {e}",
                    file.filename()
                ))
            })?;
        }

        let payload = serde_json::json!({
            "attachments": [{ "id": 0, "filename": file.filename() }]
        });
        let form = reqwest::multipart::Form::new()
            .text("payload_json", payload.to_string())
            .part("files[0]", part);

        let request = self.client.post(&url).multipart(form);
        self.post(
            &format!("file {} to channel {channel_id}", file.filename()),
            request,
        )
        .await
    }
}
