use crate::models::media::{MediaFile, MediaType, Tag};
use crate::models::query::SearchQuery;
use crate::models::session::Session;
use crate::services::api_client::ApiClient;
use crate::services::error::ApiError;
use crate::utils::file_name_from_url;
use chrono::Utc;
use log::{info, warn};
use serde::Deserialize;
use serde_json::{Value, json};
use std::future::Future;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateUrlResponse {
    presigned_url: String,
    file_key: String,
}

#[derive(Debug, Deserialize)]
struct LinksResponse {
    #[serde(default)]
    links: Vec<String>,
}

/// Outcome of the per-item full-resolution lookup during search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Enrichment {
    Resolved,
    /// The lookup failed; the hit carries only its thumbnail URL.
    ThumbnailOnly { reason: String },
}

#[derive(Debug, Clone)]
pub struct SearchHit {
    pub file: MediaFile,
    pub enrichment: Enrichment,
}

#[derive(Debug, Clone)]
pub struct SearchResult {
    pub hits: Vec<SearchHit>,
    pub total_count: usize,
}

/// The public file URL is the presigned URL with its credential query
/// stripped.
fn public_url(presigned: &str) -> String {
    presigned.split('?').next().unwrap_or(presigned).to_string()
}

/// Uploads one file: ask the API for a presigned location, PUT the raw
/// bytes there, and build the resulting media record. No retry on failure.
pub async fn upload(
    api: &ApiClient,
    session: &Session,
    file_name: &str,
    mime: &str,
    bytes: Vec<u8>,
) -> Result<MediaFile, ApiError> {
    let body = json!({ "fileName": file_name, "fileType": mime });
    let issued: GenerateUrlResponse = api.post("/generate-url", &body, session.bearer()).await?;

    info!("uploading {} ({} bytes) to presigned location", file_name, bytes.len());
    api.put_bytes(&issued.presigned_url, mime, bytes).await?;

    Ok(uploaded_file(
        session,
        file_name,
        mime,
        &issued.presigned_url,
        issued.file_key,
    ))
}

/// Builds the media record for a just-uploaded file. The service re-tags
/// asynchronously; the placeholder tags stand in until the next fetch.
fn uploaded_file(
    session: &Session,
    file_name: &str,
    mime: &str,
    presigned_url: &str,
    file_key: String,
) -> MediaFile {
    let file_url = public_url(presigned_url);
    let file_type = MediaType::from_mime(mime);
    let thumbnail_url = (file_type == MediaType::Image).then(|| file_url.clone());

    MediaFile {
        id: file_key,
        file_name: file_name.to_string(),
        file_type,
        file_url,
        thumbnail_url,
        tags: vec![Tag::new("uploaded", 1), Tag::new("new", 1)],
        upload_date: Utc::now().to_rfc3339(),
        user_id: session.email.clone(),
    }
}

pub async fn recent_uploads(api: &ApiClient, session: &Session) -> Result<Vec<MediaFile>, ApiError> {
    api.get("/recent-uploads", session.bearer()).await
}

/// Runs the filters that are present, intersects their link sets (AND), and
/// sequentially resolves each surviving link to its full-resolution URL.
/// A failed lookup degrades that single hit to thumbnail-only.
pub async fn search(
    api: &ApiClient,
    session: &Session,
    query: &SearchQuery,
) -> Result<SearchResult, ApiError> {
    let mut filters: Vec<Vec<String>> = Vec::new();

    if !query.tags.is_empty() {
        let response: LinksResponse = api
            .post("/search", &json!(query.tags), session.bearer())
            .await?;
        filters.push(response.links);
    }

    if !query.species.is_empty() {
        // The endpoint takes one species per request; terms within the
        // species filter are synonyms, so their links are unioned.
        let mut links: Vec<String> = Vec::new();
        for species in &query.species {
            let response: LinksResponse = api
                .post("/species", &json!({ "species": species }), session.bearer())
                .await?;
            for link in response.links {
                if !links.contains(&link) {
                    links.push(link);
                }
            }
        }
        filters.push(links);
    }

    if let Some(thumbnail) = &query.thumbnail_url {
        filters.push(vec![thumbnail.clone()]);
    }

    let links = intersect(filters);
    info!("search matched {} link(s)", links.len());

    Ok(enrich_links(links, |link| async move {
        resolve_full(api, session, &link).await
    })
    .await)
}

/// Resolves each link in order via `resolve`. A failed resolution never
/// drops the hit or aborts the rest; that single hit is degraded to
/// thumbnail-only, carrying the failure reason.
async fn enrich_links<F, Fut>(links: Vec<String>, mut resolve: F) -> SearchResult
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<String, ApiError>>,
{
    let mut hits = Vec::with_capacity(links.len());
    for link in links {
        let (file_url, enrichment) = match resolve(link.clone()).await {
            Ok(full) => (full, Enrichment::Resolved),
            Err(err) => {
                warn!("full-resolution lookup failed for {}: {}", link, err);
                (
                    link.clone(),
                    Enrichment::ThumbnailOnly {
                        reason: err.to_string(),
                    },
                )
            }
        };
        hits.push(SearchHit {
            file: link_to_file(&link, file_url),
            enrichment,
        });
    }

    let total_count = hits.len();
    SearchResult { hits, total_count }
}

async fn resolve_full(
    api: &ApiClient,
    session: &Session,
    thumbnail: &str,
) -> Result<String, ApiError> {
    let value: Value = api
        .post("/get-full", &json!({ "thumbnail_url": thumbnail }), session.bearer())
        .await?;

    full_url_from_response(&value).ok_or_else(|| ApiError::BadResponse {
        url: "/get-full".to_string(),
        detail: "no full_image_url in payload".to_string(),
    })
}

/// The endpoint answers `{"full_image_url": ...}`, `{"url": ...}` or a bare
/// string depending on its deployment vintage.
fn full_url_from_response(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Object(map) => map
            .get("full_image_url")
            .or_else(|| map.get("url"))
            .and_then(|v| v.as_str())
            .map(|s| s.to_string()),
        _ => None,
    }
}

fn intersect(filters: Vec<Vec<String>>) -> Vec<String> {
    let mut iter = filters.into_iter();
    let Some(first) = iter.next() else {
        return Vec::new();
    };
    iter.fold(first, |acc, set| {
        acc.into_iter().filter(|link| set.contains(link)).collect()
    })
}

fn link_to_file(thumbnail: &str, file_url: String) -> MediaFile {
    MediaFile {
        id: thumbnail.to_string(),
        file_name: file_name_from_url(thumbnail),
        file_type: MediaType::from_url(thumbnail),
        file_url,
        thumbnail_url: Some(thumbnail.to_string()),
        tags: Vec::new(),
        upload_date: String::new(),
        user_id: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session {
            token: "tok".to_string(),
            name: "Tester".to_string(),
            email: "t@example.com".to_string(),
            groups: Vec::new(),
        }
    }

    #[test]
    fn test_uploaded_image_gets_thumbnail_equal_to_file_url() {
        let file = uploaded_file(
            &session(),
            "robin.jpg",
            "image/jpeg",
            "https://bucket.s3/x/robin.jpg?X-Amz-Signature=abc",
            "key-1".to_string(),
        );
        assert_eq!(file.file_type, MediaType::Image);
        assert_eq!(file.file_url, "https://bucket.s3/x/robin.jpg");
        assert_eq!(file.thumbnail_url.as_deref(), Some("https://bucket.s3/x/robin.jpg"));
        assert_eq!(file.user_id, "t@example.com");
    }

    #[test]
    fn test_uploaded_audio_has_no_thumbnail() {
        let file = uploaded_file(
            &session(),
            "call.mp3",
            "audio/mpeg",
            "https://bucket.s3/x/call.mp3?sig=1",
            "key-2".to_string(),
        );
        assert_eq!(file.file_type, MediaType::Audio);
        assert!(file.thumbnail_url.is_none());
    }

    #[tokio::test]
    async fn test_failed_resolution_degrades_only_that_hit() {
        let links = vec![
            "https://x/thumbs/owl.jpg".to_string(),
            "https://x/thumbs/robin.jpg".to_string(),
        ];

        let result = enrich_links(links, |link| async move {
            if link.contains("owl") {
                Ok("https://x/full/owl.jpg".to_string())
            } else {
                Err(ApiError::BadResponse {
                    url: "/get-full".to_string(),
                    detail: "no full_image_url in payload".to_string(),
                })
            }
        })
        .await;

        assert_eq!(result.total_count, 2);

        assert_eq!(result.hits[0].enrichment, Enrichment::Resolved);
        assert_eq!(result.hits[0].file.file_url, "https://x/full/owl.jpg");

        match &result.hits[1].enrichment {
            Enrichment::ThumbnailOnly { reason } => {
                assert!(reason.contains("full_image_url"));
            }
            other => panic!("expected thumbnail-only hit, got {other:?}"),
        }
        // the degraded hit keeps its thumbnail as the best available URL
        assert_eq!(result.hits[1].file.file_url, "https://x/thumbs/robin.jpg");
    }

    #[test]
    fn test_public_url_strips_credential_query() {
        assert_eq!(
            public_url("https://bucket.s3/x/robin.jpg?X-Amz-Signature=abc&X-Amz-Expires=900"),
            "https://bucket.s3/x/robin.jpg"
        );
        assert_eq!(public_url("https://x/plain.jpg"), "https://x/plain.jpg");
    }

    #[test]
    fn test_full_url_response_variants() {
        assert_eq!(
            full_url_from_response(&json!({ "full_image_url": "https://x/full.jpg" })),
            Some("https://x/full.jpg".to_string())
        );
        assert_eq!(
            full_url_from_response(&json!({ "url": "https://x/full.jpg" })),
            Some("https://x/full.jpg".to_string())
        );
        assert_eq!(
            full_url_from_response(&json!("https://x/full.jpg")),
            Some("https://x/full.jpg".to_string())
        );
        assert_eq!(full_url_from_response(&json!({ "other": 1 })), None);
        assert_eq!(full_url_from_response(&json!("")), None);
    }

    #[test]
    fn test_intersection_is_logical_and() {
        let filters = vec![
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            vec!["b".to_string(), "c".to_string()],
            vec!["c".to_string(), "d".to_string()],
        ];
        assert_eq!(intersect(filters), vec!["c".to_string()]);
        assert!(intersect(Vec::new()).is_empty());
    }

    #[test]
    fn test_link_to_file() {
        let file = link_to_file("https://x/thumbs/owl.jpg", "https://x/full/owl.jpg".to_string());
        assert_eq!(file.file_name, "owl.jpg");
        assert_eq!(file.file_type, MediaType::Image);
        assert_eq!(file.thumbnail_url.as_deref(), Some("https://x/thumbs/owl.jpg"));
        assert_eq!(file.file_url, "https://x/full/owl.jpg");
    }
}
