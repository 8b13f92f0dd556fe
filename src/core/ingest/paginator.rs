//! Sequential page crawl over the upstream API

use super::fetcher::PageFetcher;
use crate::adapters::randomuser::RawUser;
use crate::config::UpstreamConfig;
use crate::domain::{Result, RosterError};
use std::time::Duration;
use url::Url;

/// Accumulated result of a crawl
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageCrawl {
    /// Records in page-then-within-page order
    pub records: Vec<RawUser>,

    /// Pages that yielded at least one record
    pub succeeded_pages: Vec<u32>,

    /// Pages given up as empty
    pub failed_pages: Vec<u32>,
}

impl PageCrawl {
    /// Folds one page's outcome into the crawl
    pub fn record_page(mut self, page: u32, users: Vec<RawUser>) -> Self {
        if users.is_empty() {
            tracing::error!(page, "Failed to fetch users after multiple attempts");
            self.failed_pages.push(page);
        } else {
            tracing::info!(page, count = users.len(), "Fetched users");
            self.records.extend(users);
            self.succeeded_pages.push(page);
        }
        self
    }

    pub fn fetched_count(&self) -> usize {
        self.records.len()
    }
}

/// Builds `base?results=<n>&page=<page>`
pub fn page_url(base: &Url, results_per_page: u32, page: u32) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut()
        .append_pair("results", &results_per_page.to_string())
        .append_pair("page", &page.to_string());
    url
}

/// Walks pages `1..=total_pages` one at a time
pub struct Paginator {
    fetcher: PageFetcher,
    base_url: Url,
    total_pages: u32,
    results_per_page: u32,
    page_delay: Duration,
}

impl Paginator {
    /// # Errors
    ///
    /// Returns a configuration error if `base_url` is not a valid URL.
    pub fn new(fetcher: PageFetcher, config: &UpstreamConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            RosterError::Configuration(format!(
                "Invalid upstream.base_url '{}': {e}",
                config.base_url
            ))
        })?;

        Ok(Self {
            fetcher,
            base_url,
            total_pages: config.total_pages,
            results_per_page: config.results_per_page,
            page_delay: Duration::from_millis(config.page_delay_ms),
        })
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Fetches every page in ascending order
    ///
    /// Pauses for the page delay after every page, whatever its outcome.
    pub async fn crawl(&self) -> PageCrawl {
        let mut crawl = PageCrawl::default();

        for page in 1..=self.total_pages {
            let url = page_url(&self.base_url, self.results_per_page, page);
            let users = self.fetcher.fetch_with_retry(&url).await;
            crawl = crawl.record_page(page, users);

            tokio::time::sleep(self.page_delay).await;
        }

        tracing::info!(
            total_fetched = crawl.fetched_count(),
            pages_succeeded = crawl.succeeded_pages.len(),
            pages_failed = crawl.failed_pages.len(),
            "Page crawl finished"
        );

        crawl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::randomuser::PageSource;
    use crate::core::ingest::fetcher::RetryPolicy;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    /// Serves `per_page` users for every page except those listed as empty,
    /// and records requested URLs
    struct PagedSource {
        per_page: usize,
        empty_pages: Vec<u32>,
        requested: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl PageSource for PagedSource {
        async fn fetch_page(&self, url: &Url) -> Result<Vec<RawUser>> {
            self.requested.lock().unwrap().push(url.to_string());

            let page: u32 = url
                .query_pairs()
                .find(|(k, _)| k == "page")
                .and_then(|(_, v)| v.parse().ok())
                .unwrap();

            if self.empty_pages.contains(&page) {
                return Ok(Vec::new());
            }

            Ok((0..self.per_page)
                .map(|i| {
                    let id = format!("p{page}-u{i}");
                    RawUser::new(&id, "F", "L", "e@x.io", "C")
                })
                .collect())
        }
    }

    fn config(total_pages: u32) -> UpstreamConfig {
        UpstreamConfig {
            total_pages,
            results_per_page: 2,
            retry_delay_ms: 1500,
            page_delay_ms: 300,
            ..Default::default()
        }
    }

    fn paginator(source: Arc<PagedSource>, config: &UpstreamConfig) -> Paginator {
        let fetcher = PageFetcher::new(source, RetryPolicy::from_config(config));
        Paginator::new(fetcher, config).unwrap()
    }

    #[test]
    fn test_page_url() {
        let base = Url::parse("https://randomuser.me/api/").unwrap();
        assert_eq!(
            page_url(&base, 20, 7).as_str(),
            "https://randomuser.me/api/?results=20&page=7"
        );
    }

    #[test]
    fn test_page_url_keeps_existing_query() {
        let base = Url::parse("https://randomuser.me/api/?seed=abc").unwrap();
        assert_eq!(
            page_url(&base, 20, 1).as_str(),
            "https://randomuser.me/api/?seed=abc&results=20&page=1"
        );
    }

    #[test]
    fn test_invalid_base_url_is_configuration_error() {
        let source = Arc::new(PagedSource {
            per_page: 1,
            empty_pages: vec![],
            requested: Mutex::new(Vec::new()),
        });
        let config = UpstreamConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        let fetcher = PageFetcher::new(source, RetryPolicy::default());

        assert!(matches!(
            Paginator::new(fetcher, &config),
            Err(RosterError::Configuration(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_crawl_in_order_with_failed_page() {
        let source = Arc::new(PagedSource {
            per_page: 2,
            empty_pages: vec![2],
            requested: Mutex::new(Vec::new()),
        });
        let config = config(3);
        let started = tokio::time::Instant::now();

        let crawl = paginator(source.clone(), &config).crawl().await;

        assert_eq!(crawl.succeeded_pages, vec![1, 3]);
        assert_eq!(crawl.failed_pages, vec![2]);
        assert_eq!(crawl.fetched_count(), 4);
        assert_eq!(
            crawl
                .records
                .iter()
                .map(|u| u.login.as_ref().unwrap().uuid.clone().unwrap())
                .collect::<Vec<_>>(),
            vec!["p1-u0", "p1-u1", "p3-u0", "p3-u1"]
        );

        // page 1: 1 request, page 2: 3 requests, page 3: 1 request
        let requested = source.requested.lock().unwrap().clone();
        assert_eq!(requested.len(), 5);
        assert!(requested[0].ends_with("results=2&page=1"));
        assert!(requested[4].ends_with("results=2&page=3"));

        // 3 page pauses plus 2 retry waits on page 2
        assert_eq!(started.elapsed(), Duration::from_millis(3 * 300 + 2 * 1500));
    }

    #[test]
    fn test_record_page() {
        let crawl = PageCrawl::default()
            .record_page(1, vec![RawUser::default()])
            .record_page(2, Vec::new());

        assert_eq!(crawl.fetched_count(), 1);
        assert_eq!(crawl.succeeded_pages, vec![1]);
        assert_eq!(crawl.failed_pages, vec![2]);
    }
}
