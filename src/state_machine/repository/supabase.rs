//! Supabase-backed repository.
//!
//! Talks PostgREST directly over HTTP against the `bot_submissions`
//! table. One row per sender; absent answers are stored as NULL and read
//! back as empty strings. Rows written by older deployments may carry
//! step values this build does not know; those senders behave as idle
//! rather than wedging the conversation.

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::state_machine::repository::{IntakeRepository, RepositoryError};
use crate::state_machine::state::{IntakeStep, SellerRecord, SenderId};

const TABLE: &str = "bot_submissions";

pub struct SupabaseRepository {
    http: reqwest::Client,
    base_url: String,
    service_key: String,
}

/// Wire shape of one `bot_submissions` row.
#[derive(Debug, Serialize, Deserialize)]
struct SubmissionRow {
    user_id: String,
    step: String,
    phone_number: Option<String>,
    shop_name: Option<String>,
    location: Option<String>,
    title: Option<String>,
    description: Option<String>,
    material: Option<String>,
    min_order: Option<String>,
    price: Option<String>,
    updated_at: Option<String>,
}

impl SubmissionRow {
    fn from_record(record: &SellerRecord) -> Self {
        fn nullable(value: &str) -> Option<String> {
            if value.is_empty() {
                None
            } else {
                Some(value.to_string())
            }
        }

        SubmissionRow {
            user_id: record.sender_id.0.clone(),
            step: record.step.as_str().to_string(),
            phone_number: nullable(&record.phone_number),
            shop_name: nullable(&record.shop_name),
            location: nullable(&record.location),
            title: nullable(&record.title),
            description: nullable(&record.description),
            material: nullable(&record.material),
            min_order: nullable(&record.min_order),
            price: nullable(&record.price),
            updated_at: Some(Utc::now().to_rfc3339()),
        }
    }

    fn into_record(self) -> SellerRecord {
        SellerRecord {
            sender_id: SenderId(self.user_id),
            // Unknown step values behave as idle.
            step: IntakeStep::parse(&self.step).unwrap_or(IntakeStep::Idle),
            phone_number: self.phone_number.unwrap_or_default(),
            shop_name: self.shop_name.unwrap_or_default(),
            location: self.location.unwrap_or_default(),
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            material: self.material.unwrap_or_default(),
            min_order: self.min_order.unwrap_or_default(),
            price: self.price.unwrap_or_default(),
        }
    }
}

impl SupabaseRepository {
    pub fn new(base_url: impl Into<String>, service_key: impl Into<String>) -> Self {
        SupabaseRepository {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            service_key: service_key.into(),
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, TABLE)
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", &self.service_key)
            .header("Authorization", format!("Bearer {}", self.service_key))
    }
}

async fn ensure_success(
    operation: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response, RepositoryError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    error!("Supabase request failed during {} ({}): {}", operation, status, body);
    Err(RepositoryError::storage(
        operation,
        format!("unexpected status {}", status),
    ))
}

#[async_trait]
impl IntakeRepository for SupabaseRepository {
    async fn get(&self, sender: &SenderId) -> Result<Option<SellerRecord>, RepositoryError> {
        let operation = "record lookup";
        let url = format!(
            "{}?user_id=eq.{}&select=*&limit=1",
            self.table_url(),
            sender
        );
        debug!("Looking up intake record for sender {}", sender);

        let response = self
            .authorize(self.http.get(&url))
            .send()
            .await
            .map_err(|e| RepositoryError::storage(operation, e.to_string()))?;
        let response = ensure_success(operation, response).await?;

        let mut rows: Vec<SubmissionRow> = response
            .json()
            .await
            .map_err(|e| RepositoryError::storage(operation, e.to_string()))?;
        Ok(rows.pop().map(SubmissionRow::into_record))
    }

    async fn upsert(&self, record: &SellerRecord) -> Result<(), RepositoryError> {
        let operation = "record upsert";
        let url = format!("{}?on_conflict=user_id", self.table_url());
        debug!(
            "Upserting intake record for sender {} at step {}",
            record.sender_id, record.step
        );

        let response = self
            .authorize(self.http.post(&url))
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&SubmissionRow::from_record(record))
            .send()
            .await
            .map_err(|e| RepositoryError::storage(operation, e.to_string()))?;
        ensure_success(operation, response).await?;
        Ok(())
    }

    async fn delete(&self, sender: &SenderId) -> Result<(), RepositoryError> {
        let operation = "record delete";
        let url = format!("{}?user_id=eq.{}", self.table_url(), sender);
        debug!("Deleting intake record for sender {}", sender);

        let response = self
            .authorize(self.http.delete(&url))
            .send()
            .await
            .map_err(|e| RepositoryError::storage(operation, e.to_string()))?;
        ensure_success(operation, response).await?;
        Ok(())
    }
}
