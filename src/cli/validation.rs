//! CLI argument validation functions
//!
//! Value parsers for arguments clap cannot check on its own.

use std::fs;
use std::path::PathBuf;

use reqwest::Url;

use crate::config::validation::MAX_PAGE_SIZE;

/// Validate that a file path is accessible (exists and is readable)
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(format!("Configuration file does not exist: '{}'", path_str));
    }

    if !path.is_file() {
        return Err(format!("Configuration path is not a file: '{}'", path_str));
    }

    match fs::File::open(&path) {
        Ok(_) => Ok(path),
        Err(e) => Err(format!(
            "Cannot read configuration file '{}': {}",
            path_str, e
        )),
    }
}

/// Validate a page number (1 or more)
pub fn validate_page(page_str: &str) -> Result<u32, String> {
    let page: u32 = page_str
        .parse()
        .map_err(|_| format!("Page must be a positive number, got: '{}'", page_str))?;

    if page == 0 {
        return Err("Page numbers start at 1".to_string());
    }

    Ok(page)
}

/// Validate a page size against what the backend accepts
pub fn validate_limit(limit_str: &str) -> Result<u32, String> {
    let limit: u32 = limit_str
        .parse()
        .map_err(|_| format!("Limit must be a positive number, got: '{}'", limit_str))?;

    if limit == 0 || limit > MAX_PAGE_SIZE {
        return Err(format!(
            "Limit must be between 1 and {}, got {}",
            MAX_PAGE_SIZE, limit
        ));
    }

    Ok(limit)
}

/// Validate a backend base URL; the environment policy is checked later
pub fn validate_api_url(url_str: &str) -> Result<String, String> {
    let trimmed = url_str.trim();
    let url = Url::parse(trimmed).map_err(|e| format!("Invalid URL '{}': {}", url_str, e))?;

    match url.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(format!(
            "Unsupported URL scheme '{}'. Use http or https.",
            other
        )),
    }
}
