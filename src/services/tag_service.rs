use crate::models::query::TagOperation;
use crate::services::api_client::ApiClient;
use crate::services::error::ApiError;
use log::info;
use serde_json::{Value, json};

/// Strips whitespace, backticks and stray quote characters that sneak into
/// copy-pasted URLs.
fn clean_url(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '`' && *c != '"' && *c != '\'')
        .collect()
}

/// Cleans each URL and drops the ones that clean to nothing.
pub fn clean_urls(raw: &[String]) -> Vec<String> {
    raw.iter()
        .map(|url| clean_url(url))
        .filter(|url| !url.is_empty())
        .collect()
}

/// The endpoint wants each tag as `"<name>,<quantity>"`; quantity is fixed
/// at 1 regardless of any count entered elsewhere in the UI.
fn serialize_tags(tags: &[String]) -> Vec<String> {
    tags.iter()
        .map(|name| format!("{},1", name.trim()))
        .collect()
}

fn build_tag_body(operation: &TagOperation) -> Result<Value, ApiError> {
    let urls = clean_urls(&operation.urls);
    if urls.is_empty() {
        return Err(ApiError::EmptyBatch);
    }

    Ok(json!({
        "url": urls,
        "operation": operation.kind.code(),
        "tags": serialize_tags(&operation.tags),
    }))
}

fn build_delete_body(raw_urls: &[String]) -> Result<Value, ApiError> {
    let urls = clean_urls(raw_urls);
    if urls.is_empty() {
        return Err(ApiError::EmptyBatch);
    }

    Ok(json!({ "url": urls }))
}

/// Applies one batch of tag additions or removals. Rejected before any
/// network call when no URL survives cleaning.
pub async fn modify_tags(api: &ApiClient, operation: &TagOperation) -> Result<Value, ApiError> {
    let body = build_tag_body(operation)?;
    info!(
        "tag mutation ({:?}) for {} url(s), {} tag(s)",
        operation.kind,
        body["url"].as_array().map(|a| a.len()).unwrap_or(0),
        operation.tags.len()
    );
    api.post_with_fallback("/modify-tags", &body).await
}

/// Deletes a batch of files by URL. Same cleaning and dispatch policy as
/// tag mutation, without the operation and quantity fields.
pub async fn delete_files(api: &ApiClient, raw_urls: &[String]) -> Result<Value, ApiError> {
    let body = build_delete_body(raw_urls)?;
    info!(
        "deleting {} file(s)",
        body["url"].as_array().map(|a| a.len()).unwrap_or(0)
    );
    api.post_with_fallback("/delete-files", &body).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::query::OperationKind;

    #[test]
    fn test_clean_strips_noise_characters() {
        let raw = vec![
            "  https://x/y.jpg` ".to_string(),
            "\"https://x/z.png'".to_string(),
        ];
        assert_eq!(
            clean_urls(&raw),
            vec!["https://x/y.jpg".to_string(), "https://x/z.png".to_string()]
        );
    }

    #[test]
    fn test_urls_that_clean_to_nothing_are_dropped() {
        let raw = vec!["  https://x/y.jpg` ".to_string(), " ` \" ".to_string()];
        assert_eq!(clean_urls(&raw), vec!["https://x/y.jpg".to_string()]);
    }

    #[test]
    fn test_tag_body_shape() {
        let operation = TagOperation {
            urls: vec!["https://x/a.jpg".to_string()],
            tags: vec!["robin".to_string(), " crow ".to_string()],
            kind: OperationKind::Add,
        };
        let body = build_tag_body(&operation).unwrap();

        assert_eq!(body["operation"], 1);
        assert_eq!(body["tags"][0], "robin,1");
        assert_eq!(body["tags"][1], "crow,1");
        assert_eq!(body["url"][0], "https://x/a.jpg");
    }

    #[test]
    fn test_remove_maps_to_zero() {
        let operation = TagOperation {
            urls: vec!["https://x/a.jpg".to_string()],
            tags: vec!["robin".to_string()],
            kind: OperationKind::Remove,
        };
        assert_eq!(build_tag_body(&operation).unwrap()["operation"], 0);
    }

    #[test]
    fn test_empty_batch_is_rejected_before_dispatch() {
        let operation = TagOperation {
            urls: vec!["` ".to_string()],
            tags: vec!["robin".to_string()],
            kind: OperationKind::Add,
        };
        assert!(matches!(
            build_tag_body(&operation),
            Err(ApiError::EmptyBatch)
        ));
        assert!(matches!(
            build_delete_body(&["  ".to_string()]),
            Err(ApiError::EmptyBatch)
        ));
    }

    #[test]
    fn test_delete_body_has_no_operation_field() {
        let body = build_delete_body(&["https://x/y.jpg".to_string()]).unwrap();
        assert!(body.get("operation").is_none());
        assert!(body.get("tags").is_none());
    }
}
