// src/pipeline/aggregate.rs

//! Seed list aggregation.
//!
//! Fetches every seed entry through its provider's board, keeps London
//! entry-level postings, merges the direct portals without duplicates,
//! drops stale postings and sorts the result.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use futures::stream::{self, StreamExt};
use reqwest::Client;

use crate::models::{
    CompanySource, Config, Posting, Provider, RawPosting, ResultSet, RunStats, SourceGap,
};
use crate::providers::{CareerPortal, JobBoard, ProviderRegistry, enabled_portals};
use crate::services::{Classifier, recency};

/// Result set of one run plus its counters.
#[derive(Debug)]
pub struct AggregateOutcome {
    pub result: ResultSet,
    pub stats: RunStats,
}

/// Runs the seed list through the provider boards and portals.
pub struct Aggregator {
    registry: ProviderRegistry,
    portals: Vec<Arc<dyn CareerPortal>>,
    classifier: Classifier,
    max_age_days: u32,
    concurrency: usize,
}

impl Aggregator {
    pub fn new(registry: ProviderRegistry, classifier: Classifier) -> Self {
        Self {
            registry,
            portals: Vec::new(),
            classifier,
            max_age_days: 3,
            concurrency: 4,
        }
    }

    /// Aggregator with the standard boards and the configured portals.
    pub fn from_config(config: &Config, client: Client) -> Self {
        let portals = enabled_portals(&client, &config.portals);
        Self::new(
            ProviderRegistry::standard(client),
            Classifier::from_config(&config.filters),
        )
        .with_portals(portals)
        .with_max_age_days(config.filters.max_age_days)
        .with_concurrency(config.fetcher.max_concurrent)
    }

    pub fn with_portals(mut self, portals: Vec<Arc<dyn CareerPortal>>) -> Self {
        self.portals = portals;
        self
    }

    pub fn with_max_age_days(mut self, days: u32) -> Self {
        self.max_age_days = days;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn max_age_days(&self) -> u32 {
        self.max_age_days
    }

    /// Aggregate `sources` as of now.
    pub async fn run(&self, sources: &[CompanySource]) -> AggregateOutcome {
        self.run_at(sources, Utc::now()).await
    }

    /// Aggregate `sources`, computing posting ages against `now`.
    ///
    /// Never fails: a source that cannot be fetched is logged and left out.
    pub async fn run_at(&self, sources: &[CompanySource], now: DateTime<Utc>) -> AggregateOutcome {
        let mut stats = RunStats::new(Utc::now());
        stats.sources_total = sources.len();

        let mut jobs = Vec::new();
        for source in sources {
            match self.resolve(source) {
                Ok((board, slug)) => jobs.push((source, board, slug)),
                Err(gap) => {
                    stats.sources_skipped += 1;
                    if gap == SourceGap::DirectPortal {
                        log::debug!("Skipping {} ({}): {}", source.name, source.label(), gap);
                    } else {
                        log::info!("Skipping {} ({}): {}", source.name, source.label(), gap);
                    }
                }
            }
        }

        // `buffered` yields in seed order, so merging stays deterministic
        let mut fetches = stream::iter(jobs)
            .map(|(source, board, slug)| async move {
                let result = board.fetch(slug).await;
                (source, board.provider(), slug, result)
            })
            .buffered(self.concurrency);

        let mut postings = Vec::new();
        while let Some((source, provider, slug, result)) = fetches.next().await {
            match result {
                Ok(raw) => {
                    stats.fetched += raw.len();
                    let kept = self.keep(raw, &source.name, provider, now);
                    log::debug!("{} ({}:{}): {} postings kept", source.name, provider, slug, kept.len());
                    postings.extend(kept);
                }
                Err(error) => {
                    stats.sources_failed += 1;
                    log::warn!(
                        "Fetcher failed for {} ({}:{}): {}",
                        source.name,
                        provider,
                        slug,
                        error
                    );
                }
            }
        }

        self.merge_portals(&mut postings, &mut stats, now).await;

        let before = postings.len();
        postings.retain(|p| recency::within_window(p.age_bucket.as_deref(), self.max_age_days));
        stats.stale = before - postings.len();

        sort_postings(&mut postings);

        stats.kept = postings.len();
        stats.end_time = Utc::now();

        AggregateOutcome {
            result: ResultSet::new(postings, now),
            stats,
        }
    }

    fn resolve<'a>(
        &self,
        source: &'a CompanySource,
    ) -> Result<(Arc<dyn JobBoard>, &'a str), SourceGap> {
        let (provider, slug) = source.resolve()?;
        let board = self
            .registry
            .get(provider)
            .ok_or(SourceGap::NoAdapter(provider))?;
        Ok((board, slug))
    }

    /// Append portal postings whose `id + applyUrl` key is not already present.
    async fn merge_portals(&self, postings: &mut Vec<Posting>, stats: &mut RunStats, now: DateTime<Utc>) {
        if self.portals.is_empty() {
            return;
        }

        let results = join_all(self.portals.iter().map(|portal| portal.fetch())).await;

        let mut seen: HashSet<String> = postings.iter().map(Posting::dedupe_key).collect();
        for (portal, result) in self.portals.iter().zip(results) {
            match result {
                Ok(raw) => {
                    stats.fetched += raw.len();
                    for posting in self.keep(raw, portal.company(), Provider::Direct, now) {
                        if seen.insert(posting.dedupe_key()) {
                            postings.push(posting);
                        } else {
                            stats.duplicates += 1;
                        }
                    }
                }
                Err(error) => {
                    stats.portal_failures += 1;
                    log::warn!("Portal {} failed: {}", portal.name(), error);
                }
            }
        }
    }

    /// Relevant postings attributed to `company`.
    fn keep(
        &self,
        raw: Vec<RawPosting>,
        company: &str,
        source: Provider,
        now: DateTime<Utc>,
    ) -> Vec<Posting> {
        raw.into_iter()
            .filter(|p| self.classifier.is_relevant(&p.location, &p.title, &p.description))
            .filter_map(|p| Posting::from_raw(p, company, source, now))
            .collect()
    }
}

/// Stable sort by company, then title, byte-wise.
pub fn sort_postings(postings: &mut [Posting]) {
    postings.sort_by(|a, b| {
        a.company
            .cmp(&b.company)
            .then_with(|| a.title.cmp(&b.title))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use async_trait::async_trait;
    use chrono::TimeZone;
    use serde_json::{Value, json};

    use crate::error::{AppError, Result};
    use crate::models::RawTimestamp;
    use crate::providers::GreenhouseBoard;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
    }

    fn raw(id: &str, title: &str, location: &str, posted: Option<&str>) -> RawPosting {
        RawPosting {
            id: id.to_string(),
            title: title.to_string(),
            location: location.to_string(),
            apply_url: format!("https://jobs.example.com/{id}"),
            description: String::new(),
            posted_at: posted.map(|p| RawTimestamp::Text(p.to_string())),
        }
    }

    /// Serves a canned Greenhouse body per slug through the real mapping.
    struct GreenhouseStub {
        bodies: HashMap<String, Value>,
    }

    #[async_trait]
    impl JobBoard for GreenhouseStub {
        fn provider(&self) -> Provider {
            Provider::Greenhouse
        }

        async fn fetch(&self, slug: &str) -> Result<Vec<RawPosting>> {
            let url = GreenhouseBoard::endpoint(slug);
            match self.bodies.get(slug) {
                Some(body) => GreenhouseBoard::parse(&url, body),
                None => Err(AppError::Upstream { url, status: 404 }),
            }
        }
    }

    /// Returns fixed postings per slug; unknown slugs fail with 503.
    struct StaticBoard {
        provider: Provider,
        postings: HashMap<String, Vec<RawPosting>>,
    }

    #[async_trait]
    impl JobBoard for StaticBoard {
        fn provider(&self) -> Provider {
            self.provider
        }

        async fn fetch(&self, slug: &str) -> Result<Vec<RawPosting>> {
            self.postings.get(slug).cloned().ok_or(AppError::Upstream {
                url: format!("https://mock/{slug}"),
                status: 503,
            })
        }
    }

    struct StaticPortal {
        company: &'static str,
        postings: Option<Vec<RawPosting>>,
    }

    #[async_trait]
    impl CareerPortal for StaticPortal {
        fn name(&self) -> &str {
            "mock.portal"
        }

        fn company(&self) -> &str {
            self.company
        }

        async fn fetch(&self) -> Result<Vec<RawPosting>> {
            self.postings.clone().ok_or(AppError::Upstream {
                url: "https://mock.portal".to_string(),
                status: 500,
            })
        }
    }

    fn lever_board(entries: Vec<(&str, Vec<RawPosting>)>) -> Arc<dyn JobBoard> {
        Arc::new(StaticBoard {
            provider: Provider::Lever,
            postings: entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
        })
    }

    fn aggregator(boards: Vec<Arc<dyn JobBoard>>) -> Aggregator {
        let mut registry = ProviderRegistry::new();
        for board in boards {
            registry.register(board);
        }
        Aggregator::new(registry, Classifier::default())
    }

    #[tokio::test]
    async fn greenhouse_end_to_end() {
        let body = json!({"jobs": [
            {
                "id": 101,
                "title": "Graduate Software Engineer",
                "location": {"name": "London, United Kingdom"},
                "absolute_url": "https://boards.greenhouse.io/monzo/jobs/101",
                "updated_at": "2025-03-09T10:00:00Z"
            },
            {
                "id": 102,
                "title": "Senior Staff Engineer",
                "location": {"name": "London, United Kingdom"},
                "absolute_url": "https://boards.greenhouse.io/monzo/jobs/102",
                "updated_at": "2025-03-09T10:00:00Z"
            }
        ]});
        let stub = GreenhouseStub {
            bodies: HashMap::from([("monzo".to_string(), body)]),
        };
        let sources = vec![CompanySource::new("Monzo Bank", Provider::Greenhouse, "monzo")];

        let outcome = aggregator(vec![Arc::new(stub)]).run_at(&sources, now()).await;

        assert_eq!(outcome.result.count, 1);
        let posting = &outcome.result.postings[0];
        assert_eq!(posting.id, "101");
        assert_eq!(posting.company, "Monzo Bank");
        assert_eq!(posting.source, Provider::Greenhouse);
        assert_eq!(posting.age_bucket.as_deref(), Some("1d"));
        assert_eq!(outcome.result.generated_at, now());
        assert_eq!(outcome.stats.fetched, 2);
    }

    #[tokio::test]
    async fn failing_source_does_not_abort_run() {
        let board = lever_board(vec![(
            "wise",
            vec![raw("w1", "Junior Engineer", "London", None)],
        )]);
        let sources = vec![
            CompanySource::new("Broken Co", Provider::Lever, "broken"),
            CompanySource::new("Wise", Provider::Lever, "wise"),
        ];

        let outcome = aggregator(vec![board]).run_at(&sources, now()).await;

        assert_eq!(outcome.result.count, 1);
        assert_eq!(outcome.result.postings[0].company, "Wise");
        assert_eq!(outcome.stats.sources_failed, 1);
    }

    #[tokio::test]
    async fn configuration_gaps_are_skipped() {
        let board = lever_board(vec![(
            "wise",
            vec![raw("w1", "Graduate Analyst", "London", None)],
        )]);
        let mut no_type = CompanySource::new("No Type", Provider::Lever, "x");
        no_type.ats.kind = None;
        let mut unknown = CompanySource::new("Taleo Co", Provider::Lever, "x");
        unknown.ats.kind = Some("taleo".to_string());
        let sources = vec![
            no_type,
            unknown,
            CompanySource::new("No Slug", Provider::Lever, ""),
            CompanySource::new("Amazon", Provider::Direct, "amazon.jobs"),
            CompanySource::new("Unregistered", Provider::Ashby, "ramp"),
            CompanySource::new("Wise", Provider::Lever, "wise"),
        ];

        let outcome = aggregator(vec![board]).run_at(&sources, now()).await;

        assert_eq!(outcome.stats.sources_total, 6);
        assert_eq!(outcome.stats.sources_skipped, 5);
        assert_eq!(outcome.stats.sources_failed, 0);
        assert_eq!(outcome.result.count, 1);
    }

    #[tokio::test]
    async fn filters_region_and_seniority() {
        let board = lever_board(vec![(
            "acme",
            vec![
                raw("1", "Graduate Engineer", "London, UK", None),
                raw("2", "Graduate Engineer", "Paris, France", None),
                raw("3", "Staff Engineer", "London, UK", None),
                RawPosting {
                    description: "Ideal for a new grad".to_string(),
                    ..raw("4", "Software Engineer", "Greater London", None)
                },
            ],
        )]);
        let sources = vec![CompanySource::new("Acme", Provider::Lever, "acme")];

        let outcome = aggregator(vec![board]).run_at(&sources, now()).await;
        let ids: Vec<&str> = outcome.result.postings.iter().map(|p| p.id.as_str()).collect();

        assert_eq!(ids, vec!["1", "4"]);
    }

    #[tokio::test]
    async fn portals_merge_without_duplicates() {
        let board = lever_board(vec![(
            "amzn",
            vec![raw("a1", "Graduate SDE", "London", None)],
        )]);
        let portal = StaticPortal {
            company: "Amazon",
            postings: Some(vec![
                raw("a1", "Graduate SDE", "London", None),
                raw("a2", "New Grad SDE", "London, GBR", None),
                raw("a2", "New Grad SDE", "London, GBR", None),
                raw("a3", "New Grad SDE", "Dublin, IRL", None),
            ]),
        };
        let broken = StaticPortal {
            company: "Microsoft",
            postings: None,
        };
        let sources = vec![CompanySource::new("Amazon", Provider::Lever, "amzn")];

        let outcome = aggregator(vec![board])
            .with_portals(vec![Arc::new(broken), Arc::new(portal)])
            .run_at(&sources, now())
            .await;

        let keys: Vec<(String, Provider)> = outcome
            .result
            .postings
            .iter()
            .map(|p| (p.id.clone(), p.source))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("a1".to_string(), Provider::Lever),
                ("a2".to_string(), Provider::Direct),
            ]
        );
        assert_eq!(outcome.stats.duplicates, 2);
        assert_eq!(outcome.stats.portal_failures, 1);
    }

    #[tokio::test]
    async fn window_drops_stale_but_keeps_unknown() {
        let board = lever_board(vec![(
            "acme",
            vec![
                raw("fresh", "Graduate A", "London", Some("2025-03-08T00:00:00Z")),
                raw("edge", "Graduate B", "London", Some("2025-03-07T12:00:00Z")),
                raw("stale", "Graduate C", "London", Some("2025-03-01T00:00:00Z")),
                raw("unknown", "Graduate D", "London", Some("last week")),
                raw("missing", "Graduate E", "London", None),
            ],
        )]);
        let sources = vec![CompanySource::new("Acme", Provider::Lever, "acme")];

        let outcome = aggregator(vec![board]).run_at(&sources, now()).await;
        let ids: Vec<&str> = outcome.result.postings.iter().map(|p| p.id.as_str()).collect();

        assert_eq!(ids, vec!["fresh", "edge", "unknown", "missing"]);
        assert_eq!(outcome.stats.stale, 1);

        let outcome = aggregator(vec![lever_board(vec![(
            "acme",
            vec![raw("fresh", "Graduate A", "London", Some("2025-03-08T00:00:00Z"))],
        )])])
        .with_max_age_days(1)
        .run_at(&sources, now())
        .await;
        assert_eq!(outcome.result.count, 0);
    }

    #[tokio::test]
    async fn records_without_key_are_dropped() {
        let mut unkeyed = raw("", "Graduate Engineer", "London", None);
        unkeyed.apply_url.clear();
        let board = lever_board(vec![("acme", vec![unkeyed])]);
        let sources = vec![CompanySource::new("Acme", Provider::Lever, "acme")];

        let outcome = aggregator(vec![board]).run_at(&sources, now()).await;
        assert_eq!(outcome.result.count, 0);
    }

    #[tokio::test]
    async fn output_sorted_by_company_then_title() {
        let board = lever_board(vec![
            ("b", vec![raw("b1", "Junior Z", "London", None), raw("b2", "Junior A", "London", None)]),
            ("a", vec![raw("a1", "Junior M", "London", None)]),
            ("lower", vec![raw("l1", "Junior A", "London", None)]),
        ]);
        let sources = vec![
            CompanySource::new("Beta", Provider::Lever, "b"),
            CompanySource::new("Alpha", Provider::Lever, "a"),
            CompanySource::new("alpha", Provider::Lever, "lower"),
        ];

        let outcome = aggregator(vec![board])
            .with_concurrency(2)
            .run_at(&sources, now())
            .await;
        let ids: Vec<&str> = outcome.result.postings.iter().map(|p| p.id.as_str()).collect();

        // Upper case sorts before lower case
        assert_eq!(ids, vec!["a1", "b2", "b1", "l1"]);
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let make = |id: &str, company: &str, title: &str| {
            Posting::from_raw(raw(id, title, "London", None), company, Provider::Lever, now()).unwrap()
        };
        let mut postings = vec![
            make("3", "Acme", "Graduate"),
            make("1", "Acme", "Graduate"),
            make("0", "Acme", "Apprentice"),
            make("2", "Acme", "Graduate"),
        ];

        sort_postings(&mut postings);
        let ids: Vec<&str> = postings.iter().map(|p| p.id.as_str()).collect();

        assert_eq!(ids, vec!["0", "3", "1", "2"]);
    }
}
