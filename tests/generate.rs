//! Generation tests against a canned [`PlanWriter`].
//!
//! No network: every reply comes from a lookup table keyed by section, so
//! the prompts, ordering, callbacks and error paths can be checked exactly.

use futures::future::BoxFuture;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tripdoc::{
    generate_plan, generate_plan_sync, render, Completion, GenerationConfig,
    GenerationProgressCallback, LayoutProfile, PlanRequest, PlanSection, PlanWriter, RenderConfig,
    TripDocError,
};

// ── Test helpers ─────────────────────────────────────────────────────────────

/// Replies per section; a missing entry answers with an API error.
#[derive(Default)]
struct CannedWriter {
    replies: HashMap<PlanSection, String>,
    prompts: Mutex<Vec<(PlanSection, String)>>,
}

impl CannedWriter {
    fn with(mut self, section: PlanSection, reply: &str) -> Self {
        self.replies.insert(section, reply.to_string());
        self
    }

    fn calls(&self) -> Vec<PlanSection> {
        self.prompts.lock().unwrap().iter().map(|(s, _)| *s).collect()
    }

    fn prompt_for(&self, section: PlanSection) -> Option<String> {
        self.prompts
            .lock()
            .unwrap()
            .iter()
            .find(|(s, _)| *s == section)
            .map(|(_, p)| p.clone())
    }
}

impl PlanWriter for CannedWriter {
    fn write<'a>(
        &'a self,
        section: PlanSection,
        prompt: &'a str,
    ) -> BoxFuture<'a, Result<Completion, TripDocError>> {
        Box::pin(async move {
            self.prompts
                .lock()
                .unwrap()
                .push((section, prompt.to_string()));
            match self.replies.get(&section) {
                Some(text) => Ok(Completion {
                    text: text.clone(),
                    input_tokens: 100,
                    output_tokens: 50,
                }),
                None => Err(TripDocError::LlmApiError {
                    section,
                    message: "429 Too Many Requests".to_string(),
                }),
            }
        })
    }
}

#[derive(Default)]
struct EventLog {
    events: Mutex<Vec<String>>,
}

impl GenerationProgressCallback for EventLog {
    fn on_generation_start(&self, total_sections: usize) {
        self.events.lock().unwrap().push(format!("start {total_sections}"));
    }

    fn on_section_start(&self, section: PlanSection, index: usize, total: usize) {
        self.events
            .lock()
            .unwrap()
            .push(format!("begin {section} {index}/{total}"));
    }

    fn on_section_complete(&self, section: PlanSection, _: usize, _: usize, _: usize) {
        self.events.lock().unwrap().push(format!("done {section}"));
    }

    fn on_section_error(&self, section: PlanSection, _: usize, _: usize, _: &str) {
        self.events.lock().unwrap().push(format!("error {section}"));
    }

    fn on_generation_complete(&self, total_sections: usize) {
        self.events.lock().unwrap().push(format!("complete {total_sections}"));
    }
}

const ITINERARY: &str = "```markdown\nSure! Here is your plan:\n## Day 1\n**Morning:** Belem Tower\nAfternoon: Alfama\n```";
const RESTAURANTS: &str = "Time Out Market\nPortuguese\nFood hall by the river.\nhttps://www.yelp.com/search?find_desc=Time+Out+Market&find_loc=Lisbon";
const HOTELS: &str = "Hotel Avenida\n\u{2B50}\u{2B50}\u{2B50}\u{2B50}\nClassic rooms.\nhttps://a.example\nhttps://b.example\nhttps://c.example";

fn full_writer() -> CannedWriter {
    CannedWriter::default()
        .with(PlanSection::Itinerary, ITINERARY)
        .with(PlanSection::Restaurants, RESTAURANTS)
        .with(PlanSection::Hotels, HOTELS)
}

fn lisbon() -> PlanRequest {
    PlanRequest::new("Lisbon", 2, "History, Food", "Slow mornings")
        .hotel_stars(4)
        .cuisines("Seafood")
}

fn config_for(writer: &Arc<CannedWriter>) -> GenerationConfig {
    GenerationConfig::builder()
        .writer(Arc::clone(writer) as Arc<dyn PlanWriter>)
        .build()
        .unwrap()
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn classic_requests_all_three_sections_in_order() {
    let writer = Arc::new(full_writer());
    let out = generate_plan(&lisbon(), LayoutProfile::Classic, &config_for(&writer))
        .await
        .unwrap();

    assert_eq!(
        writer.calls(),
        vec![PlanSection::Itinerary, PlanSection::Restaurants, PlanSection::Hotels]
    );
    assert_eq!(out.plan.destination, "Lisbon");
    assert_eq!(out.plan.restaurants.as_deref(), Some(RESTAURANTS));
    assert_eq!(out.stats.sections, 3);
    assert_eq!(out.stats.total_input_tokens, 300);
    assert_eq!(out.stats.total_output_tokens, 150);

    let prompt = writer.prompt_for(PlanSection::Hotels).unwrap();
    assert!(prompt.contains("4-star hotels"));
    let prompt = writer.prompt_for(PlanSection::Restaurants).unwrap();
    assert!(prompt.contains("Preferred cuisines: Seafood"));
}

#[tokio::test]
async fn generated_text_is_tidied() {
    let writer = Arc::new(full_writer());
    let out = generate_plan(&lisbon(), LayoutProfile::Classic, &config_for(&writer))
        .await
        .unwrap();
    assert_eq!(
        out.plan.itinerary,
        "## Day 1\n**Morning:** Belem Tower\nAfternoon: Alfama"
    );
}

#[tokio::test]
async fn detailed_profile_only_requests_itinerary() {
    let writer = Arc::new(full_writer());
    let out = generate_plan(&lisbon(), LayoutProfile::Detailed, &config_for(&writer))
        .await
        .unwrap();

    assert_eq!(writer.calls(), vec![PlanSection::Itinerary]);
    assert!(out.plan.hotels.is_none());
    assert!(out.plan.restaurants.is_none());
    let prompt = writer.prompt_for(PlanSection::Itinerary).unwrap();
    assert!(prompt.contains("Each day MUST include"));
}

#[tokio::test]
async fn sections_not_asked_for_are_skipped() {
    let writer = Arc::new(full_writer());
    let request = PlanRequest::new("Lisbon", 1, "Views", "None");
    let out = generate_plan(&request, LayoutProfile::Classic, &config_for(&writer))
        .await
        .unwrap();
    assert_eq!(writer.calls(), vec![PlanSection::Itinerary]);
    assert_eq!(out.stats.sections, 1);
}

#[tokio::test]
async fn failed_section_stops_generation() {
    let writer = Arc::new(
        CannedWriter::default()
            .with(PlanSection::Itinerary, ITINERARY)
            .with(PlanSection::Hotels, HOTELS),
    );
    let log = Arc::new(EventLog::default());
    let config = GenerationConfig::builder()
        .writer(Arc::clone(&writer) as Arc<dyn PlanWriter>)
        .progress_callback(Arc::clone(&log) as Arc<dyn GenerationProgressCallback>)
        .build()
        .unwrap();

    let err = generate_plan(&lisbon(), LayoutProfile::Classic, &config)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        TripDocError::LlmApiError { section: PlanSection::Restaurants, .. }
    ));
    // Hotels come after restaurants and are never requested.
    assert_eq!(
        writer.calls(),
        vec![PlanSection::Itinerary, PlanSection::Restaurants]
    );
    assert_eq!(
        *log.events.lock().unwrap(),
        vec![
            "start 3",
            "begin itinerary 1/3",
            "done itinerary",
            "begin restaurant recommendations 2/3",
            "error restaurant recommendations",
        ]
    );
}

#[tokio::test]
async fn blank_reply_is_an_error() {
    let writer = Arc::new(CannedWriter::default().with(PlanSection::Itinerary, "```\n\n```"));
    let request = PlanRequest::new("Lisbon", 1, "Views", "None");
    let err = generate_plan(&request, LayoutProfile::Classic, &config_for(&writer))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        TripDocError::EmptyGeneration { section: PlanSection::Itinerary }
    ));
}

#[tokio::test]
async fn invalid_stars_rejected_before_any_call() {
    let writer = Arc::new(full_writer());
    let request = PlanRequest::new("Lisbon", 2, "Food", "None").hotel_stars(6);
    let err = generate_plan(&request, LayoutProfile::Classic, &config_for(&writer))
        .await
        .unwrap_err();
    assert!(matches!(err, TripDocError::InvalidRequest(_)));
    assert!(writer.calls().is_empty());
}

#[test]
fn sync_wrapper_generates_and_renders() {
    let writer = Arc::new(full_writer());
    let out = generate_plan_sync(&lisbon(), LayoutProfile::Classic, &config_for(&writer)).unwrap();
    let doc = render(&out.plan, &RenderConfig::default()).unwrap();

    assert_eq!(doc.page_count(), 3);
    assert_eq!(doc.stats.day_headings, 1);
    assert_eq!(doc.stats.time_headings, 2);
    assert_eq!(doc.stats.restaurants, 1);
    assert_eq!(doc.stats.hotels, 1);
    assert!(doc.texts().any(|t| t == "Morning: Belem Tower"));
}
