use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use sw_core::{
    Article, CorrelationId, QueryService, RelatedOutcome, RelatedResult, SearchRequest,
    SummaryOutcome,
};

/// In-memory backend that answers with canned outcomes and counts calls.
pub struct FakeService {
    related: Mutex<RelatedOutcome>,
    summary: Mutex<SummaryOutcome>,
    related_calls: AtomicUsize,
    summary_ids: Mutex<Vec<String>>,
    by_query: Mutex<HashMap<String, (RelatedOutcome, Duration)>>,
}

impl FakeService {
    pub fn new(related: RelatedOutcome) -> Self {
        Self {
            related: Mutex::new(related),
            summary: Mutex::new(SummaryOutcome::NoSummary),
            related_calls: AtomicUsize::new(0),
            summary_ids: Mutex::new(Vec::new()),
            by_query: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_summary(self, summary: SummaryOutcome) -> Self {
        *self.summary.lock().unwrap() = summary;
        self
    }

    pub fn set_related(&self, related: RelatedOutcome) {
        *self.related.lock().unwrap() = related;
    }

    /// Answers `query` with `related` after `delay`, instead of the default.
    pub fn respond_to(&self, query: &str, related: RelatedOutcome, delay: Duration) {
        self.by_query
            .lock()
            .unwrap()
            .insert(query.to_string(), (related, delay));
    }

    pub fn related_calls(&self) -> usize {
        self.related_calls.load(Ordering::SeqCst)
    }

    pub fn summary_calls(&self) -> usize {
        self.summary_ids.lock().unwrap().len()
    }

    pub fn summary_ids(&self) -> Vec<String> {
        self.summary_ids.lock().unwrap().clone()
    }

    pub fn total_calls(&self) -> usize {
        self.related_calls() + self.summary_calls()
    }
}

#[async_trait]
impl QueryService for FakeService {
    async fn fetch_related(&self, request: &SearchRequest) -> RelatedOutcome {
        self.related_calls.fetch_add(1, Ordering::SeqCst);
        let canned = self
            .by_query
            .lock()
            .unwrap()
            .get(request.query().as_str())
            .cloned();
        match canned {
            Some((related, delay)) => {
                tokio::time::sleep(delay).await;
                related
            }
            None => self.related.lock().unwrap().clone(),
        }
    }

    async fn fetch_summary(&self, id: &CorrelationId) -> SummaryOutcome {
        self.summary_ids.lock().unwrap().push(id.to_string());
        self.summary.lock().unwrap().clone()
    }
}

/// Backend whose lookups panic instead of answering.
pub struct PanickingService {
    pub related: Option<RelatedOutcome>,
}

#[async_trait]
impl QueryService for PanickingService {
    async fn fetch_related(&self, _request: &SearchRequest) -> RelatedOutcome {
        match &self.related {
            Some(related) => related.clone(),
            None => panic!("related lookup blew up"),
        }
    }

    async fn fetch_summary(&self, _id: &CorrelationId) -> SummaryOutcome {
        panic!("summary lookup blew up")
    }
}

pub fn articles(count: usize, id: Option<&str>) -> RelatedResult {
    RelatedResult {
        articles: (1..=count)
            .map(|n| Article {
                title: format!("Article {}", n),
                url: format!("https://example.org/articles/{}", n),
                description: format!("Description {}", n),
                published: None,
            })
            .collect(),
        correlation_id: id.map(CorrelationId::new),
    }
}
