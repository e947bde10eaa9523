//! HTTP client for the Firestore REST API.

use serde_json::{Map, Value};
use tracing::debug;

use firecal_core::error::{ExportError, ExportResult};

use crate::auth;
use crate::credentials::ServiceAccountKey;
use crate::query::{build_query, TypeFilter};

const FIRESTORE_BASE: &str = "https://firestore.googleapis.com/v1";

/// A connected Firestore client, scoped to one project and one run.
pub struct FirestoreClient {
    http: reqwest::Client,
    project_id: String,
    token: String,
}

impl FirestoreClient {
    /// Authenticate against Firestore with the given key.
    ///
    /// The project comes from `--project` when given, otherwise from the
    /// key file itself.
    pub async fn connect(project: Option<String>, key: &ServiceAccountKey) -> ExportResult<Self> {
        let project_id = project.or_else(|| key.project_id.clone()).ok_or_else(|| {
            ExportError::InvalidArgument(
                "No project id: pass --project or use a key file with a project_id.".to_string(),
            )
        })?;

        let http = reqwest::Client::new();
        let token = auth::fetch_access_token(&http, key).await?;
        debug!(project = %project_id, "authenticated against Firestore");

        Ok(Self {
            http,
            project_id,
            token,
        })
    }

    /// Run one structured query and return the matching documents' fields.
    pub async fn run_query(
        &self,
        collection: &str,
        filter: &TypeFilter,
        order_by: Option<&str>,
    ) -> ExportResult<Vec<Map<String, Value>>> {
        let url = format!(
            "{FIRESTORE_BASE}/projects/{}/databases/(default)/documents:runQuery",
            self.project_id
        );
        let body = build_query(collection, filter, order_by);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(|e| ExportError::Retrieval(format!("Query request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ExportError::Retrieval(format!(
                "Query failed: HTTP {status} - {body}"
            )));
        }

        let rows: Vec<Value> = response
            .json()
            .await
            .map_err(|e| ExportError::Retrieval(format!("Invalid query response: {e}")))?;

        // runQuery streams one JSON object per result; rows without a
        // document carry only a readTime and are skipped.
        let documents: Vec<Map<String, Value>> = rows
            .into_iter()
            .filter_map(|mut row| {
                match row.get_mut("document")?.get_mut("fields")?.take() {
                    Value::Object(fields) => Some(fields),
                    _ => None,
                }
            })
            .collect();

        debug!(count = documents.len(), collection, "fetched documents");
        Ok(documents)
    }
}
