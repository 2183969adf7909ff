//! Path handling for the hosted object store. Uploads go to a per-user
//! prefix; the companion public URL is derived, not returned by the upload.

/// Bucket holding story media.
pub const STORIES_BUCKET: &str = "stories";

/// Object path for an upload: `<user_id>/<millis>-<sanitized-name>`. The
/// timestamp prefix keeps repeated uploads of the same file distinct.
pub fn upload_path(user_id: &str, millis: i64, file_name: &str) -> String {
    format!("{user_id}/{millis}-{}", sanitize_file_name(file_name))
}

/// Publicly fetchable URL for an object path.
pub fn public_url(base: &str, bucket: &str, path: &str) -> String {
    format!("{}/storage/v1/object/public/{bucket}/{path}", base.trim_end_matches('/'))
}

fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' => '-',
            c if c.is_whitespace() => '-',
            c => c,
        })
        .collect();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_paths_are_user_scoped_and_sanitized() {
        assert_eq!(
            upload_path("u-1", 1757000000000, "my holiday pic.png"),
            "u-1/1757000000000-my-holiday-pic.png"
        );
        assert_eq!(upload_path("u-1", 5, "../../etc"), "u-1/5-..-..-etc");
        assert_eq!(upload_path("u-1", 5, ""), "u-1/5-upload");
    }

    #[test]
    fn public_urls_follow_the_storage_layout() {
        assert_eq!(
            public_url("https://backend.example.com/", STORIES_BUCKET, "u-1/5-a.png"),
            "https://backend.example.com/storage/v1/object/public/stories/u-1/5-a.png"
        );
    }
}
