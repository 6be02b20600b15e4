use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use services::{ArticleSource, FetchError, GameService, GameUpdate, ParsedArticle, ScoreReporter};
use storage::repository::{
    Identity, InMemoryScoreRepository, ScoreRecord, ScoreRepository, StaticIdentityProvider,
};
use wikigolf_core::model::{GamePhase, Session, Theme, ThemeCatalog, UserId};
use wikigolf_core::time::fixed_clock;

/// Canned article source: a title maps to a resolved title plus HTML, or
/// to a source-reported error message.
#[derive(Default)]
struct FakeWiki {
    pages: HashMap<String, ParsedArticle>,
    errors: HashMap<String, String>,
}

impl FakeWiki {
    fn with_page(mut self, requested: &str, resolved: &str, html: &str) -> Self {
        self.pages.insert(
            requested.to_string(),
            ParsedArticle {
                title: resolved.to_string(),
                html: html.to_string(),
            },
        );
        self
    }

    fn with_error(mut self, requested: &str, info: &str) -> Self {
        self.errors.insert(requested.to_string(), info.to_string());
        self
    }
}

#[async_trait]
impl ArticleSource for FakeWiki {
    async fn fetch_article(&self, title: &str) -> Result<ParsedArticle, FetchError> {
        if let Some(info) = self.errors.get(title) {
            return Err(FetchError::Source(info.clone()));
        }
        self.pages
            .get(title)
            .cloned()
            .ok_or_else(|| FetchError::missing_content(title))
    }
}

fn jeans_to_paper() -> ThemeCatalog {
    ThemeCatalog::new(vec![Theme::new("ジーンズ", "紙").unwrap()]).unwrap()
}

fn player() -> (UserId, Arc<InMemoryScoreRepository>, Arc<ScoreReporter>) {
    let user = UserId::new(Uuid::from_u128(1));
    let scores = Arc::new(InMemoryScoreRepository::new(fixed_clock()));
    let reporter = Arc::new(ScoreReporter::new(
        Arc::new(StaticIdentityProvider::signed_in(Identity {
            id: user,
            username: Some("player".to_string()),
        })),
        Arc::clone(&scores) as Arc<dyn ScoreRepository>,
    ));
    (user, scores, reporter)
}

/// The score write is a detached task; give it a moment to land.
async fn wait_for_rows(
    scores: &InMemoryScoreRepository,
    user: UserId,
    expected: usize,
) -> Vec<ScoreRecord> {
    for _ in 0..200 {
        let rows = scores.recent_scores(user, 10).await.unwrap();
        if rows.len() >= expected {
            return rows;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("expected {expected} score rows, store never caught up");
}

#[tokio::test]
async fn start_loads_the_theme_start_page() {
    let wiki = FakeWiki::default().with_page(
        "ジーンズ",
        "ジーンズ",
        r#"<p><a href="/wiki/%E7%B6%BF">綿</a></p>"#,
    );
    let (_, _, reporter) = player();
    let game = GameService::new(jeans_to_paper(), Arc::new(wiki), reporter);
    let mut session = Session::new();

    let update = game.start(&mut session).await;

    assert!(matches!(update, GameUpdate::Article { .. }));
    assert_eq!(session.start_page(), "ジーンズ");
    assert_eq!(session.goal_page(), "紙");
    assert_eq!(session.current_page(), "ジーンズ");
    assert_eq!(session.click_count(), 0);
    assert!(session.is_running());
    assert_eq!(session.phase(), GamePhase::Playing);
}

#[tokio::test]
async fn three_clicks_to_the_goal_win_and_store_one_row() {
    let wiki = FakeWiki::default()
        .with_page("ジーンズ", "ジーンズ", r#"<a href="/wiki/%E7%B6%BF">綿</a>"#)
        .with_page("綿", "綿", r#"<a href="/wiki/%E6%A4%8D%E7%89%A9">植物</a>"#)
        .with_page("植物", "植物", r#"<a href="/wiki/%E7%B4%99">紙</a>"#);
    let (user, scores, reporter) = player();
    let game = GameService::new(jeans_to_paper(), Arc::new(wiki), reporter);
    let mut session = Session::new();

    game.start(&mut session).await;
    let first = game.follow_link(&mut session, Some("/wiki/%E7%B6%BF")).await;
    assert!(matches!(first, Some(GameUpdate::Article { .. })));
    let second = game
        .follow_link(&mut session, Some("/wiki/%E6%A4%8D%E7%89%A9"))
        .await;
    assert!(matches!(second, Some(GameUpdate::Article { .. })));

    let third = game.follow_link(&mut session, Some("/wiki/%E7%B4%99")).await;
    let Some(GameUpdate::Won { result }) = third else {
        panic!("expected a win, got {third:?}");
    };

    assert_eq!(result.click_count(), 3);
    assert_eq!(session.phase(), GamePhase::Won);
    assert_eq!(session.click_count(), 3);

    let rows = wait_for_rows(&scores, user, 1).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].click_count, 3);
    assert_eq!(rows[0].start_page, "ジーンズ");
    assert_eq!(rows[0].goal_page, "紙");
}

#[tokio::test]
async fn redirect_onto_the_goal_wins_once() {
    let wiki = FakeWiki::default()
        .with_page("ジーンズ", "ジーンズ", r#"<a href="/wiki/%E6%B4%8B%E7%B4%99">洋紙</a>"#)
        // The source redirects 洋紙 to the goal page.
        .with_page("洋紙", "紙", "<p>paper</p>");
    let (user, scores, reporter) = player();
    let game = GameService::new(jeans_to_paper(), Arc::new(wiki), reporter);
    let mut session = Session::new();

    game.start(&mut session).await;
    let update = game
        .follow_link(&mut session, Some("/wiki/%E6%B4%8B%E7%B4%99"))
        .await;

    let Some(GameUpdate::Won { result }) = update else {
        panic!("expected redirect win, got {update:?}");
    };
    assert_eq!(result.click_count(), 1);
    assert_eq!(session.current_page(), "紙");

    let rows = wait_for_rows(&scores, user, 1).await;
    assert_eq!(rows.len(), 1);

    // No duplicate submission sneaks in afterwards.
    tokio::time::sleep(Duration::from_millis(50)).await;
    let rows = scores.recent_scores(user, 10).await.unwrap();
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn source_error_fails_the_session_with_its_message() {
    let wiki = FakeWiki::default()
        .with_page("ジーンズ", "ジーンズ", r#"<a href="/wiki/%E7%B6%BF">綿</a>"#)
        .with_error("綿", "no such page");
    let (user, scores, reporter) = player();
    let game = GameService::new(jeans_to_paper(), Arc::new(wiki), reporter);
    let mut session = Session::new();

    game.start(&mut session).await;
    let update = game.follow_link(&mut session, Some("/wiki/%E7%B6%BF")).await;

    let Some(GameUpdate::Failed { message }) = update else {
        panic!("expected failure, got {update:?}");
    };
    assert!(message.contains("no such page"));
    assert_eq!(session.phase(), GamePhase::Failed);
    assert!(!session.is_running());
    // Progress fields survive the failure.
    assert_eq!(session.click_count(), 1);
    assert_eq!(session.start_page(), "ジーンズ");
    assert_eq!(session.goal_page(), "紙");

    // A failed session never submits a score.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(scores.recent_scores(user, 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn clicks_after_the_game_ends_are_ignored() {
    let wiki = FakeWiki::default()
        .with_page("ジーンズ", "ジーンズ", r#"<a href="/wiki/%E7%B4%99">紙</a>"#);
    let (_, _, reporter) = player();
    let game = GameService::new(jeans_to_paper(), Arc::new(wiki), reporter);
    let mut session = Session::new();

    game.start(&mut session).await;
    let won = game.follow_link(&mut session, Some("/wiki/%E7%B4%99")).await;
    assert!(matches!(won, Some(GameUpdate::Won { .. })));

    let after = game.follow_link(&mut session, Some("/wiki/%E7%B6%BF")).await;
    assert!(after.is_none());
    assert_eq!(session.click_count(), 1);
}

#[tokio::test]
async fn restarting_resets_the_click_counter() {
    let wiki = FakeWiki::default()
        .with_page("ジーンズ", "ジーンズ", r#"<a href="/wiki/%E7%B6%BF">綿</a>"#)
        .with_page("綿", "綿", "<p>cotton</p>");
    let (_, _, reporter) = player();
    let game = GameService::new(jeans_to_paper(), Arc::new(wiki), reporter);
    let mut session = Session::new();

    game.start(&mut session).await;
    game.follow_link(&mut session, Some("/wiki/%E7%B6%BF")).await;
    assert_eq!(session.click_count(), 1);

    game.start(&mut session).await;
    assert_eq!(session.click_count(), 0);
    assert_eq!(session.current_page(), "ジーンズ");
}
