use crate::error::{ClientError, Result};

/// Resolve the repository a commit search page belongs to.
///
/// The repository is the last `/`-separated segment of the page URL or
/// path; query string and fragment are ignored and percent-escapes decoded.
pub fn resolve_repository(page: &str) -> Result<String> {
    let path = page.split(['?', '#']).next().unwrap_or_default();
    let last = path.rsplit('/').next().unwrap_or_default();

    let name = match urlencoding::decode(last) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => last.to_string(),
    };

    if name.is_empty() {
        return Err(ClientError::EmptyRepository {
            page: page.to_string(),
        });
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_segment_of_url() {
        assert_eq!(
            resolve_repository("http://localhost:9000/dashboard/myrepo").unwrap(),
            "myrepo"
        );
    }

    #[test]
    fn test_plain_name_and_relative_path() {
        assert_eq!(resolve_repository("myrepo").unwrap(), "myrepo");
        assert_eq!(resolve_repository("dashboard/myrepo").unwrap(), "myrepo");
    }

    #[test]
    fn test_query_and_fragment_ignored() {
        assert_eq!(
            resolve_repository("http://localhost:9000/dashboard/myrepo?tab=commits#top").unwrap(),
            "myrepo"
        );
    }

    #[test]
    fn test_percent_escapes_decoded() {
        assert_eq!(
            resolve_repository("http://localhost:9000/dashboard/my%20repo").unwrap(),
            "my repo"
        );
    }

    #[test]
    fn test_trailing_slash_is_an_error() {
        let err = resolve_repository("http://localhost:9000/dashboard/").unwrap_err();
        assert!(matches!(err, ClientError::EmptyRepository { .. }));
        assert!(resolve_repository("").is_err());
    }
}
