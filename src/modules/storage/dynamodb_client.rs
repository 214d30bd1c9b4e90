//! DynamoDB-backed member table

use std::collections::HashMap;
use std::sync::Arc;

use std::error::Error as StdError;
use std::fmt::Debug;

use async_trait::async_trait;
use aws_sdk_dynamodb::{
    error::{ProvideErrorMetadata, SdkError},
    types::AttributeValue,
    Client as DynamoDbClient,
};
use serde_dynamo::{from_item, to_item};
use tracing::{debug, warn};

use super::{MemberStore, StoreError};
use crate::shared::types::Member;

type Item = HashMap<String, AttributeValue>;

/// Member table stored in DynamoDB, addressed per call by table name
pub struct DynamoDbMemberStore {
    dynamodb_client: Arc<DynamoDbClient>,
}

impl DynamoDbMemberStore {
    pub fn new(dynamodb_client: Arc<DynamoDbClient>) -> Self {
        Self { dynamodb_client }
    }
}

/// One-line description of an SDK failure, safe to show to users
///
/// Service errors are reduced to their error code and message. Other failures
/// (dispatch, timeout, unparsable response) are described by their source
/// chain, never by the raw HTTP response.
fn sdk_error_message<E, R>(err: &SdkError<E, R>) -> String
where
    E: ProvideErrorMetadata + StdError + 'static,
    R: Debug,
{
    if let Some(service_error) = err.as_service_error() {
        return match (service_error.code(), service_error.message()) {
            (Some(code), Some(message)) => format!("{}: {}", code, message),
            _ => service_error.to_string(),
        };
    }

    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Decode a scanned page item by item, skipping items that do not fit [`Member`]
fn decode_members(table_id: &str, items: Vec<Item>) -> Vec<Member> {
    items
        .into_iter()
        .filter_map(|item| match from_item::<_, Member>(item) {
            Ok(member) => Some(member),
            Err(e) => {
                warn!("Skipping undecodable item in table '{}': {}", table_id, e);
                None
            }
        })
        .collect()
}

#[async_trait]
impl MemberStore for DynamoDbMemberStore {
    /// Scan the whole table, following `LastEvaluatedKey` across pages
    async fn scan_all(&self, table_id: &str) -> Result<Vec<Member>, StoreError> {
        let mut members = Vec::new();
        let mut start_key: Option<Item> = None;
        let mut pages = 0usize;

        loop {
            let response = self
                .dynamodb_client
                .scan()
                .table_name(table_id)
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(|e| StoreError::Scan {
                    table: table_id.to_string(),
                    message: sdk_error_message(&e),
                })?;
            pages += 1;

            let items = response.items.unwrap_or_default();
            members.extend(decode_members(table_id, items));

            match response.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        debug!(
            "Scanned {} members from table '{}' in {} page(s)",
            members.len(),
            table_id,
            pages
        );
        Ok(members)
    }

    async fn put_item(&self, table_id: &str, member: &Member) -> Result<(), StoreError> {
        let item: Item = to_item(member).map_err(|e| StoreError::Put {
            table: table_id.to_string(),
            message: e.to_string(),
        })?;

        self.dynamodb_client
            .put_item()
            .table_name(table_id)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| StoreError::Put {
                table: table_id.to_string(),
                message: sdk_error_message(&e),
            })?;

        debug!(
            "Stored member '{}' in table '{}'",
            member.student_id, table_id
        );
        Ok(())
    }
}
