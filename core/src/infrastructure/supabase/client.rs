use reqwest::{Client, Response};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::domain::common::{SupabaseConfig, entities::app_errors::CoreError};

/// Thin client for the PostgREST API exposed by a Supabase project.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    rest_url: String,
    service_role_key: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: String,
}

impl SupabaseClient {
    pub fn new(config: SupabaseConfig) -> Result<Self, CoreError> {
        let url = config.url.trim();
        if url.is_empty() {
            return Err(CoreError::InvalidConfiguration(
                "Supabase URL must not be empty".to_string(),
            ));
        }
        if config.service_role_key.trim().is_empty() {
            return Err(CoreError::InvalidConfiguration(
                "Supabase service role key must not be empty".to_string(),
            ));
        }

        let rest_url = format!("{}/rest/v1", url.trim_end_matches('/'));

        tracing::info!(rest_url = %rest_url, "Initializing Supabase REST client");

        Ok(Self {
            rest_url,
            service_role_key: config.service_role_key,
            client: Client::new(),
        })
    }

    pub fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.rest_url, table)
    }

    pub async fn select<T>(&self, table: &str, query: &[(&str, String)]) -> Result<Vec<T>, CoreError>
    where
        T: DeserializeOwned,
    {
        let response = self
            .client
            .get(self.table_url(table))
            .query(query)
            .header("apikey", &self.service_role_key)
            .bearer_auth(&self.service_role_key)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Data store request to {} failed: {}", table, e);
                CoreError::ExternalServiceError(format!("Data store request failed: {}", e))
            })?;

        let response = Self::ensure_success(table, response).await?;

        response.json::<Vec<T>>().await.map_err(|e| {
            tracing::error!("Failed to parse {} rows: {}", table, e);
            CoreError::InvalidResponse(format!("Failed to parse {} rows: {}", table, e))
        })
    }

    /// Inserts `row`, replacing the existing row that collides on `on_conflict`.
    pub async fn upsert<T>(&self, table: &str, on_conflict: &str, row: &T) -> Result<(), CoreError>
    where
        T: Serialize + ?Sized,
    {
        let response = self
            .client
            .post(self.table_url(table))
            .query(&[("on_conflict", on_conflict)])
            .header("apikey", &self.service_role_key)
            .bearer_auth(&self.service_role_key)
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(row)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Data store upsert into {} failed: {}", table, e);
                CoreError::ExternalServiceError(format!("Data store request failed: {}", e))
            })?;

        Self::ensure_success(table, response).await?;

        Ok(())
    }

    async fn ensure_success(table: &str, response: Response) -> Result<Response, CoreError> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        let message = postgrest_error_message(status.as_u16(), &error_text);
        tracing::error!("Data store error on {}: {} - {}", table, status, error_text);

        Err(CoreError::ExternalServiceError(message))
    }
}

/// PostgREST errors carry a `message`; anything else is reported with its status.
fn postgrest_error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<PostgrestError>(body)
        .map(|error| error.message)
        .unwrap_or_else(|_| format!("{} - {}", status, body))
}
