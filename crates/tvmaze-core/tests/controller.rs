use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::oneshot;
use tvmaze_core::{
    ClientConfig, EpisodeSummary, FlowOutcome, Page, Result, ShowBrowser, ShowFinder, ShowSource,
    ShowSummary, TvMazeError, MISSING_IMAGE_URL,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

type Reply<T> = oneshot::Receiver<Result<T>>;

/// Show source answering from fixed tables, or from gates the test opens.
#[derive(Default)]
struct ScriptedSource {
    shows: HashMap<String, Vec<ShowSummary>>,
    episodes: HashMap<u32, Vec<EpisodeSummary>>,
    gated_shows: Mutex<HashMap<String, Reply<Vec<ShowSummary>>>>,
    gated_episodes: Mutex<HashMap<u32, Reply<Vec<EpisodeSummary>>>>,
    episode_calls: Mutex<Vec<u32>>,
}

impl ScriptedSource {
    fn gate_search(&self, term: &str) -> oneshot::Sender<Result<Vec<ShowSummary>>> {
        let (tx, rx) = oneshot::channel();
        self.gated_shows.lock().unwrap().insert(term.to_string(), rx);
        tx
    }

    fn gate_episodes(&self, show_id: u32) -> oneshot::Sender<Result<Vec<EpisodeSummary>>> {
        let (tx, rx) = oneshot::channel();
        self.gated_episodes.lock().unwrap().insert(show_id, rx);
        tx
    }
}

#[async_trait]
impl ShowSource for ScriptedSource {
    async fn search_shows(&self, term: &str) -> Result<Vec<ShowSummary>> {
        let gate = self.gated_shows.lock().unwrap().remove(term);
        match gate {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(TvMazeError::ParseError("gate dropped".to_string()))),
            None => Ok(self.shows.get(term).cloned().unwrap_or_default()),
        }
    }

    async fn list_episodes(&self, show_id: u32) -> Result<Vec<EpisodeSummary>> {
        self.episode_calls.lock().unwrap().push(show_id);
        let gate = self.gated_episodes.lock().unwrap().remove(&show_id);
        match gate {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(TvMazeError::ParseError("gate dropped".to_string()))),
            None => Ok(self.episodes.get(&show_id).cloned().unwrap_or_default()),
        }
    }
}

fn show(id: u32, name: &str) -> ShowSummary {
    ShowSummary {
        id,
        name: name.to_string(),
        summary: None,
        image: MISSING_IMAGE_URL.to_string(),
    }
}

fn episode(id: u32, name: &str, season: u32, number: u32) -> EpisodeSummary {
    EpisodeSummary {
        id,
        name: name.to_string(),
        season,
        number: Some(number),
    }
}

fn card_ids(page: &Page) -> Vec<u32> {
    page.shows
        .cards()
        .iter()
        .map(|card| card.show_id().unwrap())
        .collect()
}

async fn click<S: ShowSource>(browser: &ShowBrowser<S>, card_index: usize) -> Result<FlowOutcome> {
    let generation = browser.page().await.shows.generation();
    browser.click_episodes(generation, card_index).await
}

fn scripted() -> ScriptedSource {
    let mut source = ScriptedSource::default();
    source
        .shows
        .insert("batman".to_string(), vec![show(1, "Batman"), show(2, "Batman Returns")]);
    source
        .shows
        .insert("lost".to_string(), vec![show(3, "Lost")]);
    source
        .episodes
        .insert(1, vec![episode(10, "Pilot", 1, 1)]);
    source.episodes.insert(
        2,
        vec![episode(20, "Opening", 1, 1), episode(21, "Closing", 1, 2)],
    );
    source
}

#[tokio::test]
async fn search_renders_results_in_order_and_replaces_previous_cards() {
    let browser = ShowBrowser::new(scripted());

    assert_eq!(browser.submit_search("batman").await.unwrap(), FlowOutcome::Applied);
    assert_eq!(card_ids(&browser.page().await), vec![1, 2]);

    assert_eq!(browser.submit_search("lost").await.unwrap(), FlowOutcome::Applied);
    assert_eq!(card_ids(&browser.page().await), vec![3]);
}

#[tokio::test]
async fn empty_result_renders_empty_list() {
    let browser = ShowBrowser::new(scripted());
    browser.submit_search("batman").await.unwrap();

    browser.submit_search("nothing matches").await.unwrap();

    let page = browser.page().await;
    assert!(page.shows.cards().is_empty());
    assert_eq!(page.notice, None);
}

#[tokio::test]
async fn clicking_a_card_lists_episodes_of_that_card() {
    let browser = ShowBrowser::new(scripted());
    browser.submit_search("batman").await.unwrap();

    click(&browser, 1).await.unwrap();
    click(&browser, 0).await.unwrap();

    assert_eq!(*browser.source().episode_calls.lock().unwrap(), vec![2, 1]);

    let page = browser.page().await;
    let lines: Vec<&str> = page.episodes.items().iter().map(|i| i.text()).collect();
    assert_eq!(lines, vec!["Pilot (season 1, number 1)"]);
    assert!(page.episodes.is_visible());
}

#[tokio::test]
async fn clicking_a_missing_card_fails_without_request() {
    let browser = ShowBrowser::new(scripted());
    browser.submit_search("lost").await.unwrap();

    let result = click(&browser, 5).await;

    assert!(matches!(result, Err(TvMazeError::CardNotFound(5))));
    assert!(browser.source().episode_calls.lock().unwrap().is_empty());
    assert_eq!(browser.page().await.notice, None);
}

#[tokio::test]
async fn new_search_hides_episode_panel() {
    let browser = ShowBrowser::new(scripted());
    browser.submit_search("batman").await.unwrap();
    click(&browser, 0).await.unwrap();
    assert!(browser.page().await.episodes.is_visible());

    browser.submit_search("lost").await.unwrap();

    let snapshot = browser.snapshot().await;
    assert!(!snapshot.episodes_visible);
    assert_eq!(snapshot.show_cards.len(), 1);
}

#[tokio::test]
async fn failed_search_keeps_page_and_posts_notice() {
    let source = scripted();
    let gate = source.gate_search("broken");
    let browser = ShowBrowser::new(source);
    browser.submit_search("batman").await.unwrap();
    let before = browser.page().await;

    gate.send(Err(TvMazeError::Status {
        status: 502,
        url: "/search/shows?q=broken".to_string(),
    }))
    .unwrap();
    let result = browser.submit_search("broken").await;

    assert!(matches!(result, Err(TvMazeError::Status { status: 502, .. })));
    let after = browser.page().await;
    assert_eq!(after.shows, before.shows);
    assert_eq!(after.episodes, before.episodes);
    assert!(!after.episodes.is_visible());
    assert!(after.notice.unwrap().contains("502"));

    browser.submit_search("lost").await.unwrap();
    assert_eq!(browser.page().await.notice, None);
}

#[tokio::test]
async fn slow_older_search_cannot_overwrite_newer_one() {
    let source = scripted();
    let first = source.gate_search("first");
    let second = source.gate_search("second");
    let browser = ShowBrowser::new(source);

    let (first_outcome, second_outcome, _) = tokio::join!(
        browser.submit_search("first"),
        browser.submit_search("second"),
        async {
            second.send(Ok(vec![show(2, "Second")])).unwrap();
            tokio::task::yield_now().await;
            first.send(Ok(vec![show(1, "First")])).unwrap();
        }
    );

    assert_eq!(first_outcome.unwrap(), FlowOutcome::Superseded);
    assert_eq!(second_outcome.unwrap(), FlowOutcome::Applied);
    assert_eq!(card_ids(&browser.page().await), vec![2]);
}

#[tokio::test]
async fn older_search_finishing_first_is_still_superseded() {
    let source = scripted();
    let first = source.gate_search("first");
    let second = source.gate_search("second");
    let browser = ShowBrowser::new(source);

    let (first_outcome, second_outcome, _) = tokio::join!(
        browser.submit_search("first"),
        browser.submit_search("second"),
        async {
            first.send(Ok(vec![show(1, "First")])).unwrap();
            tokio::task::yield_now().await;
            second.send(Ok(vec![show(2, "Second")])).unwrap();
        }
    );

    // The first answer arrived while a newer request was already out.
    assert_eq!(first_outcome.unwrap(), FlowOutcome::Superseded);
    assert_eq!(second_outcome.unwrap(), FlowOutcome::Applied);
    assert_eq!(card_ids(&browser.page().await), vec![2]);
}

#[tokio::test]
async fn stale_episode_failure_is_dropped_silently() {
    let source = scripted();
    let slow = source.gate_episodes(1);
    let browser = ShowBrowser::new(source);
    browser.submit_search("batman").await.unwrap();
    let generation = browser.page().await.shows.generation();

    let (slow_outcome, fast_outcome, _) = tokio::join!(
        browser.click_episodes(generation, 0),
        browser.click_episodes(generation, 1),
        async {
            tokio::task::yield_now().await;
            slow.send(Err(TvMazeError::ParseError("late".to_string())))
                .unwrap();
        }
    );

    assert_eq!(slow_outcome.unwrap(), FlowOutcome::Superseded);
    assert_eq!(fast_outcome.unwrap(), FlowOutcome::Applied);
    let page = browser.page().await;
    assert_eq!(page.notice, None);
    assert_eq!(page.episodes.items().len(), 2);
}

#[tokio::test]
async fn click_on_card_from_replaced_list_is_rejected() {
    let browser = ShowBrowser::new(scripted());
    browser.submit_search("batman").await.unwrap();
    let clicked_generation = browser.snapshot().await.shows_generation;
    browser.submit_search("lost").await.unwrap();

    let result = browser.click_episodes(clicked_generation, 0).await;

    assert!(matches!(result, Err(TvMazeError::StaleCard { .. })));
    assert!(browser.source().episode_calls.lock().unwrap().is_empty());
    let page = browser.page().await;
    assert!(!page.episodes.is_visible());
    assert_eq!(page.notice, None);
}

#[tokio::test]
async fn pending_episodes_are_dropped_when_new_search_lands() {
    let source = scripted();
    let slow = source.gate_episodes(1);
    let browser = ShowBrowser::new(source);
    browser.submit_search("batman").await.unwrap();
    let generation = browser.page().await.shows.generation();

    let (episodes_outcome, search_outcome) = tokio::join!(
        browser.click_episodes(generation, 0),
        async {
            let outcome = browser.submit_search("lost").await;
            slow.send(Ok(vec![episode(10, "Pilot", 1, 1)])).unwrap();
            outcome
        }
    );

    assert_eq!(search_outcome.unwrap(), FlowOutcome::Applied);
    assert_eq!(episodes_outcome.unwrap(), FlowOutcome::Superseded);
    let page = browser.page().await;
    assert_eq!(card_ids(&page), vec![3]);
    assert!(!page.episodes.is_visible());
    assert!(page.episodes.items().is_empty());
}

#[tokio::test]
async fn failed_episode_lookup_keeps_panel_and_posts_notice() {
    let source = scripted();
    let gate = source.gate_episodes(1);
    let browser = ShowBrowser::new(source);
    browser.submit_search("batman").await.unwrap();
    click(&browser, 1).await.unwrap();
    let before = browser.page().await;

    gate.send(Err(TvMazeError::Status {
        status: 500,
        url: "/shows/1/episodes".to_string(),
    }))
    .unwrap();
    let result = click(&browser, 0).await;

    assert!(matches!(result, Err(TvMazeError::Status { status: 500, .. })));
    let after = browser.page().await;
    assert_eq!(after.episodes, before.episodes);
    assert!(after.episodes.is_visible());
    assert_eq!(after.episodes.items().len(), 2);
    assert_eq!(after.shows, before.shows);
    assert!(after.notice.unwrap().starts_with("Episode lookup failed"));
}

#[tokio::test]
async fn batman_scenario_against_mock_api() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/shows"))
        .and(query_param("q", "batman"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"show": {"id": 1, "name": "Batman", "summary": null, "image": null}},
            {"show": {"id": 2, "name": "Batman Returns", "summary": null,
                      "image": {"medium": "http://x/img2.jpg"}}}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/shows/1/episodes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 10, "name": "Pilot", "season": 1, "number": 1}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::default().with_base_url(&server.uri()).unwrap();
    let browser = ShowBrowser::new(ShowFinder::with_config(config).unwrap());

    browser.submit_search("batman").await.unwrap();
    let snapshot = browser.snapshot().await;
    assert_eq!(snapshot.show_cards.len(), 2);
    assert!(snapshot.show_cards[0].contains(&format!("src=\"{}\"", MISSING_IMAGE_URL)));
    assert!(snapshot.show_cards[1].contains("src=\"http://x/img2.jpg\""));
    assert!(!snapshot.episodes_visible);

    click(&browser, 0).await.unwrap();
    let snapshot = browser.snapshot().await;
    assert_eq!(snapshot.episodes, vec!["Pilot (season 1, number 1)".to_string()]);
    assert!(snapshot.episodes_visible);
}

#[tokio::test]
async fn network_error_leaves_page_unchanged() {
    let config = ClientConfig::default()
        .with_base_url("http://127.0.0.1:1")
        .unwrap();
    let browser = ShowBrowser::new(ShowFinder::with_config(config).unwrap());

    let result = browser.submit_search("batman").await;

    assert!(matches!(result, Err(TvMazeError::HttpError(_))));
    let snapshot = browser.snapshot().await;
    assert!(snapshot.show_cards.is_empty());
    assert!(!snapshot.episodes_visible);
    assert!(snapshot.notice.is_some());
}
