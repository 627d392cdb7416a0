//! Remote document store over the Firestore REST API.
//!
//! Only flat documents are written by this crate, but decoding accepts the
//! full typed value set so documents written by other clients still load.

use async_trait::async_trait;
use configs::FirestoreConfig;
use models::Document;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::debug;

use super::{DocumentStore, StoredDocument};
use crate::errors::StoreError;

pub struct FirestoreDocumentStore {
    client: Client,
    documents_url: Url,
    token: Option<String>,
    page_size: u32,
}

#[derive(Debug, Deserialize)]
struct FsDocument {
    name: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    #[serde(default)]
    documents: Vec<FsDocument>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RunQueryItem {
    document: Option<FsDocument>,
}

impl FirestoreDocumentStore {
    pub fn new(base_url: &str, project_id: &str, database: &str, token: Option<String>) -> Result<Self, StoreError> {
        let mut documents_url = Url::parse(base_url)
            .map_err(|e| StoreError::Unavailable(format!("firestore base url {base_url}: {e}")))?;
        documents_url
            .path_segments_mut()
            .map_err(|_| StoreError::Unavailable(format!("firestore base url {base_url} cannot hold a path")))?
            .pop_if_empty()
            .extend(["projects", project_id, "databases", database, "documents"]);
        Ok(Self { client: Client::new(), documents_url, token, page_size: 300 })
    }

    pub fn from_config(cfg: &FirestoreConfig) -> Result<Self, StoreError> {
        if cfg.project_id.trim().is_empty() {
            return Err(StoreError::Unavailable("firestore project_id is empty".into()));
        }
        let mut store = Self::new(&cfg.base_url, &cfg.project_id, &cfg.database, cfg.token.clone())?;
        store.page_size = cfg.page_size.max(1);
        Ok(store)
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(t) => req.bearer_auth(t),
            None => req,
        }
    }

    /// Each name becomes one percent-encoded path segment.
    fn url_with(&self, segments: &[&str]) -> Url {
        let mut url = self.documents_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.extend(segments);
        }
        url
    }

    fn collection_url(&self, collection: &str) -> Url {
        self.url_with(&[collection])
    }

    /// Empty, `.` and `..` cannot name a Firestore document.
    fn document_url(&self, collection: &str, id: &str) -> Result<Url, StoreError> {
        if !is_valid_document_id(id) {
            return Err(StoreError::InvalidId(id.to_string()));
        }
        Ok(self.url_with(&[collection, id]))
    }

    fn run_query_url(&self) -> Url {
        let mut url = self.documents_url.clone();
        url.set_path(&format!("{}:runQuery", self.documents_url.path()));
        url
    }

    async fn execute(&self, req: RequestBuilder) -> Result<reqwest::Response, StoreError> {
        self.authorize(req).send().await.map_err(|e| StoreError::Http(e.to_string()))
    }

    async fn send(&self, req: RequestBuilder) -> Result<reqwest::Response, StoreError> {
        let res = self.execute(req).await?;
        error_for_status(res).await
    }
}

fn is_valid_document_id(id: &str) -> bool {
    !id.is_empty() && id != "." && id != ".."
}

async fn error_for_status(res: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    if res.status().is_success() {
        return Ok(res);
    }
    let status = res.status().as_u16();
    let body = res.text().await.unwrap_or_default();
    Err(StoreError::Status { status, body })
}

#[async_trait]
impl DocumentStore for FirestoreDocumentStore {
    async fn add(&self, collection: &str, doc: Document) -> Result<String, StoreError> {
        let url = self.collection_url(collection);
        let res = self.send(self.client.post(url).json(&json!({ "fields": encode_fields(&doc) }))).await?;
        let created: FsDocument = res.json().await.map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(document_id(&created.name).to_string())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        if !is_valid_document_id(id) {
            return Ok(None);
        }
        let res = self.execute(self.client.get(self.document_url(collection, id)?)).await?;
        if res.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let res = error_for_status(res).await?;
        let doc: FsDocument = res.json().await.map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(Some(decode_fields(&doc.fields)?))
    }

    async fn set(&self, collection: &str, id: &str, doc: Document) -> Result<(), StoreError> {
        // PATCH without an update mask replaces every field and upserts.
        let body = json!({ "fields": encode_fields(&doc) });
        self.send(self.client.patch(self.document_url(collection, id)?).json(&body)).await?;
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.send(self.client.delete(self.document_url(collection, id)?)).await?;
        Ok(())
    }

    async fn list(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError> {
        let url = self.collection_url(collection);
        let mut out = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let mut query = vec![("pageSize", self.page_size.to_string())];
            if let Some(t) = &page_token {
                query.push(("pageToken", t.clone()));
            }
            let res = self.send(self.client.get(url.clone()).query(&query)).await?;
            let page: ListResponse = res.json().await.map_err(|e| StoreError::Serialization(e.to_string()))?;
            for d in page.documents {
                out.push((document_id(&d.name).to_string(), decode_fields(&d.fields)?));
            }
            match page.next_page_token {
                Some(t) if !t.is_empty() => page_token = Some(t),
                _ => break,
            }
        }
        debug!(collection, count = out.len(), "firestore list");
        Ok(out)
    }

    async fn where_equal_to(&self, collection: &str, field: &str, value: &str) -> Result<Vec<StoredDocument>, StoreError> {
        let body = equality_query(collection, field, value);
        let res = self.send(self.client.post(self.run_query_url()).json(&body)).await?;
        let items: Vec<RunQueryItem> = res.json().await.map_err(|e| StoreError::Serialization(e.to_string()))?;
        items
            .into_iter()
            .filter_map(|i| i.document)
            .map(|d| -> Result<StoredDocument, StoreError> {
                Ok((document_id(&d.name).to_string(), decode_fields(&d.fields)?))
            })
            .collect()
    }
}

fn equality_query(collection: &str, field: &str, value: &str) -> Value {
    json!({
        "structuredQuery": {
            "from": [{ "collectionId": collection }],
            "where": {
                "fieldFilter": {
                    "field": { "fieldPath": field },
                    "op": "EQUAL",
                    "value": { "stringValue": value }
                }
            }
        }
    })
}

/// Last path segment of a resource name.
fn document_id(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

fn encode_fields(doc: &Document) -> Value {
    Value::Object(doc.iter().map(|(k, v)| (k.clone(), encode_value(v))).collect())
}

fn encode_value(v: &Value) -> Value {
    match v {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) if n.is_i64() || n.is_u64() => json!({ "integerValue": n.to_string() }),
        Value::Number(n) => json!({ "doubleValue": n.as_f64() }),
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => json!({ "arrayValue": { "values": items.iter().map(encode_value).collect::<Vec<_>>() } }),
        Value::Object(map) => json!({ "mapValue": { "fields": encode_fields(map) } }),
    }
}

fn decode_fields(fields: &Map<String, Value>) -> Result<Document, StoreError> {
    fields
        .iter()
        .map(|(k, v)| -> Result<(String, Value), StoreError> { Ok((k.clone(), decode_value(v)?)) })
        .collect()
}

fn decode_value(v: &Value) -> Result<Value, StoreError> {
    let obj = v
        .as_object()
        .ok_or_else(|| StoreError::Serialization(format!("firestore value is not an object: {v}")))?;
    let (kind, inner) = obj
        .iter()
        .next()
        .ok_or_else(|| StoreError::Serialization("empty firestore value".into()))?;
    let decoded = match kind.as_str() {
        "nullValue" => Value::Null,
        "booleanValue" | "doubleValue" => inner.clone(),
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => inner.clone(),
        "integerValue" => match inner {
            Value::String(s) => s
                .parse::<i64>()
                .map(Value::from)
                .map_err(|e| StoreError::Serialization(format!("integerValue {s}: {e}")))?,
            other => other.clone(),
        },
        "arrayValue" => {
            let values = inner.get("values").and_then(Value::as_array).cloned().unwrap_or_default();
            Value::Array(values.iter().map(decode_value).collect::<Result<Vec<Value>, StoreError>>()?)
        }
        "mapValue" => {
            let fields = inner.get("fields").and_then(Value::as_object).cloned().unwrap_or_default();
            Value::Object(decode_fields(&fields)?)
        }
        other => return Err(StoreError::Serialization(format!("unsupported firestore value type `{other}`"))),
    };
    Ok(decoded)
}
