//! The production [RecordStore] that talks to the record API over HTTP/JSON.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    RequestBuilder, StatusCode,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};
use serde::{Serialize, de::DeserializeOwned};

use super::{
    FetchParams, MutationResult, Record, RecordId, RecordStore, response::Envelope,
};
use crate::Error;

/// How to reach and authenticate with the record API.
#[derive(Debug, Clone)]
pub struct RecordApiConfig {
    /// The base URL the `/tables/...` paths are appended to.
    pub base_url: String,
    /// The project whose tables are read and written.
    pub project_id: String,
    /// Sent as a bearer token with every request.
    pub api_key: String,
    /// How long to wait for a response before giving up.
    pub timeout: Duration,
}

#[derive(Serialize)]
struct RecordsBody {
    records: Vec<Record>,
}

#[derive(Serialize)]
struct DeleteBody<'a> {
    #[serde(rename = "RecordIds")]
    record_ids: &'a [RecordId],
}

/// A record store client backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpRecordStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRecordStore {
    /// Create a client that sends the API key and project ID with every request.
    ///
    /// # Errors
    /// Returns [Error::RecordApiUnavailable] if the API key or project ID
    /// cannot be used as a header value, or the HTTP client cannot be built.
    pub fn new(config: RecordApiConfig) -> Result<Self, Error> {
        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|error| {
                Error::RecordApiUnavailable(format!("invalid API key header value: {error}"))
            })?;
        authorization.set_sensitive(true);

        let project_id = HeaderValue::from_str(&config.project_id).map_err(|error| {
            Error::RecordApiUnavailable(format!("invalid project ID header value: {error}"))
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);
        headers.insert("X-Project-Id", project_id);

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .user_agent(concat!("moneywise/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        })
    }

    fn records_url(&self, table: &str) -> String {
        format!("{}/tables/{table}/records", self.base_url)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        description: &str,
    ) -> Result<Envelope<T>, Error> {
        let response = request.send().await.inspect_err(|error| {
            tracing::error!("could not send {description} request to the record API: {error}")
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound);
        }

        let body = response.text().await?;
        let envelope: Envelope<T> = serde_json::from_str(&body).map_err(|error| {
            tracing::error!(
                "could not decode {description} response ({status}) from the record API: {error}"
            );

            if status.is_success() {
                Error::RecordApiUnavailable(format!("invalid response body: {error}"))
            } else {
                Error::RecordApiFailure(format!("the record API responded with {status}"))
            }
        })?;

        if !envelope.success {
            let message = envelope.failure_message();
            tracing::error!("record API {description} request failed ({status}): {message}");
            return Err(Error::RecordApiFailure(message));
        }

        Ok(envelope)
    }
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    async fn fetch_records(&self, table: &str, params: &FetchParams) -> Result<Vec<Record>, Error> {
        let request = self
            .client
            .post(format!("{}/query", self.records_url(table)))
            .json(params);

        let envelope: Envelope<Vec<Record>> = self.send(request, "fetch").await?;

        Ok(envelope.data.unwrap_or_default())
    }

    async fn get_record_by_id(
        &self,
        table: &str,
        id: RecordId,
        params: &FetchParams,
    ) -> Result<Record, Error> {
        let request = self
            .client
            .post(format!("{}/{id}/query", self.records_url(table)))
            .json(&params.fields_only());

        let envelope: Envelope<Record> = self.send(request, "get by ID").await?;

        envelope.data.ok_or(Error::NotFound)
    }

    async fn create_records(
        &self,
        table: &str,
        records: Vec<Record>,
    ) -> Result<Vec<MutationResult>, Error> {
        let request = self
            .client
            .post(self.records_url(table))
            .json(&RecordsBody { records });

        let envelope: Envelope<serde_json::Value> = self.send(request, "create").await?;

        Ok(envelope.results)
    }

    async fn update_records(
        &self,
        table: &str,
        records: Vec<Record>,
    ) -> Result<Vec<MutationResult>, Error> {
        let request = self
            .client
            .patch(self.records_url(table))
            .json(&RecordsBody { records });

        let envelope: Envelope<serde_json::Value> = self.send(request, "update").await?;

        Ok(envelope.results)
    }

    async fn delete_records(
        &self,
        table: &str,
        ids: &[RecordId],
    ) -> Result<Vec<MutationResult>, Error> {
        let request = self
            .client
            .delete(self.records_url(table))
            .json(&DeleteBody { record_ids: ids });

        let envelope: Envelope<serde_json::Value> = self.send(request, "delete").await?;

        Ok(envelope.results)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{Arc, Mutex},
        time::Duration,
    };

    use axum::{
        Json, Router,
        extract::{Path, State},
        http::{HeaderMap, Method, StatusCode},
        response::IntoResponse,
        routing::post,
    };
    use serde_json::{Value, json};

    use super::{HttpRecordStore, RecordApiConfig};
    use crate::{
        Error,
        records::{FetchParams, OrderBy, RecordStore, select},
    };

    /// What the fake record API saw in the last request.
    #[derive(Debug, Default, Clone)]
    struct Seen {
        method: Option<Method>,
        path: String,
        authorization: String,
        project_id: String,
        body: Value,
    }

    type SharedSeen = Arc<Mutex<Seen>>;

    fn remember(seen: &SharedSeen, method: Method, path: String, headers: &HeaderMap, body: Value) {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default()
                .to_owned()
        };

        *seen.lock().unwrap() = Seen {
            method: Some(method),
            path,
            authorization: header("authorization"),
            project_id: header("x-project-id"),
            body,
        };
    }

    async fn query(
        State(seen): State<SharedSeen>,
        Path(table): Path<String>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> impl IntoResponse {
        remember(&seen, Method::POST, format!("/tables/{table}/records/query"), &headers, body);

        if table == "broken_c" {
            return Json(json!({"success": false, "message": "Table is locked"}));
        }

        Json(json!({"success": true, "data": [{"Id": 2, "Name": "Two"}, {"Id": 1, "Name": "One"}]}))
    }

    async fn query_one(
        State(seen): State<SharedSeen>,
        Path((table, id)): Path<(String, i64)>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> impl IntoResponse {
        remember(
            &seen,
            Method::POST,
            format!("/tables/{table}/records/{id}/query"),
            &headers,
            body,
        );

        if id == 404 {
            return (StatusCode::NOT_FOUND, Json(json!({"success": false}))).into_response();
        }

        Json(json!({"success": true, "data": {"Id": id, "Name": "Found"}})).into_response()
    }

    async fn mutate(
        State(seen): State<SharedSeen>,
        method: Method,
        Path(table): Path<String>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> impl IntoResponse {
        remember(&seen, method, format!("/tables/{table}/records"), &headers, body);

        Json(json!({
            "success": true,
            "results": [{"success": true, "data": {"Id": 11, "Name": "Created"}}]
        }))
    }

    async fn start_fake_record_api() -> (HttpRecordStore, SharedSeen) {
        let seen = SharedSeen::default();
        let app = Router::new()
            .route("/tables/{table}/records/query", post(query))
            .route("/tables/{table}/records/{id}/query", post(query_one))
            .route(
                "/tables/{table}/records",
                post(mutate).patch(mutate).delete(mutate),
            )
            .with_state(seen.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Could not bind fake record API");
        let address = listener.local_addr().expect("Could not get local address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Fake record API failed");
        });

        let store = HttpRecordStore::new(RecordApiConfig {
            base_url: format!("http://{address}/"),
            project_id: "project-123".to_owned(),
            api_key: "secret".to_owned(),
            timeout: Duration::from_secs(5),
        })
        .expect("Could not create record store client");

        (store, seen)
    }

    #[tokio::test]
    async fn fetch_posts_params_with_auth_headers() {
        let (store, seen) = start_fake_record_api().await;
        let params = FetchParams::new(select(&["Name"])).order_by(OrderBy::descending("Id"));

        let records = store
            .fetch_records("category_c", &params)
            .await
            .expect("Could not fetch records");

        assert_eq!(records.len(), 2);
        let seen = seen.lock().unwrap().clone();
        assert_eq!(seen.method, Some(Method::POST));
        assert_eq!(seen.path, "/tables/category_c/records/query");
        assert_eq!(seen.authorization, "Bearer secret");
        assert_eq!(seen.project_id, "project-123");
        assert_eq!(
            seen.body["orderBy"],
            json!([{"fieldName": "Id", "sorttype": "DESC"}])
        );
    }

    #[tokio::test]
    async fn get_by_id_sends_fields_only() {
        let (store, seen) = start_fake_record_api().await;
        let params = FetchParams::new(select(&["Name"])).order_by(OrderBy::descending("Id"));

        let record = store
            .get_record_by_id("goal_c", 5, &params)
            .await
            .expect("Could not get record");

        assert_eq!(record.get("Id"), Some(&json!(5)));
        let seen = seen.lock().unwrap().clone();
        assert_eq!(seen.path, "/tables/goal_c/records/5/query");
        assert_eq!(seen.body, json!({"fields": [{"field": {"Name": "Name"}}]}));
    }

    #[tokio::test]
    async fn missing_record_is_not_found() {
        let (store, _) = start_fake_record_api().await;

        let result = store
            .get_record_by_id("goal_c", 404, &FetchParams::default())
            .await;

        assert_eq!(result, Err(Error::NotFound));
    }

    #[tokio::test]
    async fn unsuccessful_envelope_is_api_failure() {
        let (store, _) = start_fake_record_api().await;

        let result = store
            .fetch_records("broken_c", &FetchParams::default())
            .await;

        assert_eq!(
            result,
            Err(Error::RecordApiFailure("Table is locked".to_owned()))
        );
    }

    #[tokio::test]
    async fn mutations_use_expected_methods_and_bodies() {
        let (store, seen) = start_fake_record_api().await;
        let record = json!({"Name": "Rent"}).as_object().cloned().unwrap();

        let results = store
            .create_records("category_c", vec![record.clone()])
            .await
            .expect("Could not create record");
        assert!(results[0].success);
        {
            let seen = seen.lock().unwrap();
            assert_eq!(seen.method, Some(Method::POST));
            assert_eq!(seen.body, json!({"records": [{"Name": "Rent"}]}));
        }

        store
            .update_records("category_c", vec![record])
            .await
            .expect("Could not update record");
        assert_eq!(seen.lock().unwrap().method, Some(Method::PATCH));

        store
            .delete_records("category_c", &[3, 4])
            .await
            .expect("Could not delete records");
        let seen = seen.lock().unwrap().clone();
        assert_eq!(seen.method, Some(Method::DELETE));
        assert_eq!(seen.body, json!({"RecordIds": [3, 4]}));
    }

    #[tokio::test]
    async fn unreachable_api_is_unavailable() {
        let store = HttpRecordStore::new(RecordApiConfig {
            base_url: "http://127.0.0.1:9".to_owned(),
            project_id: "project".to_owned(),
            api_key: "key".to_owned(),
            timeout: Duration::from_secs(1),
        })
        .expect("Could not create record store client");

        let result = store
            .fetch_records("category_c", &FetchParams::default())
            .await;

        assert!(matches!(result, Err(Error::RecordApiUnavailable(_))));
    }
}
