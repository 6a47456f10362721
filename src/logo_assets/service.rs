use tracing::debug;

use super::cache::LogoCache;
use crate::errors::ApiResult;
use crate::models::Logo;
use crate::services::ChannelApi;

/// Resolve the logo for `url`, creating it on the backend when needed.
///
/// Order of attempts:
/// - the run's cache
/// - `create_logo`
/// - `find_logo_by_url`, only when creation reported `AlreadyExists`
///
/// Resolved logos are cached; failures are not.
pub async fn get_or_create_logo<A>(
    api: &A,
    name: &str,
    url: &str,
    cache: &mut LogoCache,
) -> ApiResult<Logo>
where
    A: ChannelApi + ?Sized,
{
    if let Some(logo) = cache.get(url) {
        debug!("Logo cache hit for {}", url);
        return Ok(logo.clone());
    }

    let logo = match api.create_logo(name, url).await {
        Ok(logo) => logo,
        Err(e) if e.is_already_exists() => {
            debug!("Logo {} already exists, looking it up", url);
            match api.find_logo_by_url(url).await? {
                Some(logo) => logo,
                None => return Err(e),
            }
        }
        Err(e) => return Err(e),
    };

    cache.insert(logo.clone());
    Ok(logo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ApiError;
    use crate::services::MockChannelApi;
    use mockall::predicate::eq;

    fn logo(id: i64, url: &str) -> Logo {
        Logo {
            id,
            name: "ESPN".to_string(),
            url: url.to_string(),
        }
    }

    #[tokio::test]
    async fn test_creates_and_caches_logo() {
        let url = "http://logo/espn.png";
        let mut api = MockChannelApi::new();
        api.expect_create_logo()
            .with(eq("ESPN"), eq(url))
            .times(1)
            .returning(move |_, u| Ok(logo(1, u)));
        api.expect_find_logo_by_url().times(0);

        let mut cache = LogoCache::new();
        let first = get_or_create_logo(&api, "ESPN", url, &mut cache).await.unwrap();
        let second = get_or_create_logo(&api, "ESPN", url, &mut cache).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_already_exists_falls_back_to_lookup() {
        let url = "http://logo/espn.png";
        let mut api = MockChannelApi::new();
        api.expect_create_logo()
            .times(1)
            .returning(|_, u| Err(ApiError::already_exists("logo", u)));
        api.expect_find_logo_by_url()
            .with(eq(url))
            .times(1)
            .returning(|u| Ok(Some(logo(42, u))));

        let mut cache = LogoCache::new();
        let resolved = get_or_create_logo(&api, "ESPN", url, &mut cache).await.unwrap();
        assert_eq!(resolved.id, 42);
        assert_eq!(cache.get(url).map(|l| l.id), Some(42));
    }

    #[tokio::test]
    async fn test_already_exists_without_match_returns_original_error() {
        let mut api = MockChannelApi::new();
        api.expect_create_logo()
            .returning(|_, u| Err(ApiError::already_exists("logo", u)));
        api.expect_find_logo_by_url().returning(|_| Ok(None));

        let mut cache = LogoCache::new();
        let err = get_or_create_logo(&api, "ESPN", "http://x", &mut cache)
            .await
            .unwrap_err();
        assert!(err.is_already_exists());
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_other_errors_skip_lookup() {
        let mut api = MockChannelApi::new();
        api.expect_create_logo()
            .returning(|_, _| Err(ApiError::request(500, "boom")));
        api.expect_find_logo_by_url().times(0);

        let mut cache = LogoCache::new();
        let err = get_or_create_logo(&api, "ESPN", "http://x", &mut cache)
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::request(500, "boom"));
    }
}
