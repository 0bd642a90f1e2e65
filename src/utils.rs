use std::env;
use std::path::PathBuf;

pub fn get_exe_dir() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|path| path.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns the base path for config assets depending on the build mode
pub fn get_assets_path() -> PathBuf {
    if cfg!(debug_assertions) {
        // Development mode
        PathBuf::from("./src/config/")
    } else {
        // Release mode: use path relative to the executable
        let exe_dir = get_exe_dir();
        exe_dir.join("config")
    }
}

pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Last path segment of a URL, without the query string.
pub fn file_name_from_url(url: &str) -> String {
    let without_query = url.split('?').next().unwrap_or(url);
    without_query
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or(without_query)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("robin"), "Robin");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn test_file_name_from_url() {
        assert_eq!(
            file_name_from_url("https://x/media/owl.jpg?X-Amz-Signature=abc"),
            "owl.jpg"
        );
        assert_eq!(file_name_from_url("call.mp3"), "call.mp3");
    }
}
