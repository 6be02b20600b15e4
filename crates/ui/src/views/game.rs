use std::sync::Arc;

use dioxus::document::eval;
use dioxus::prelude::*;

use services::GameUpdate;
use wikigolf_core::model::{GamePhase, Session};

use crate::context::AppContext;

/// Delegated click handler for the article region.
///
/// Suppresses default navigation only for internal article links and
/// forwards the raw href to Rust; the session's link filter stays
/// authoritative over what counts as a move. Everything else keeps its
/// default behavior. The listener is installed once per webview; each
/// mount re-points the forwarding hook at the live eval channel.
const ARTICLE_CLICK_BRIDGE: &str = r#"
    window.__wikigolfForward = (href) => dioxus.send(href);
    if (!window.__wikigolfClickBridge) {
        window.__wikigolfClickBridge = true;
        document.addEventListener("click", (event) => {
            const anchor = event.target.closest("a");
            if (!anchor) { return; }
            const content = document.getElementById("article-content");
            if (!content || !content.contains(anchor)) { return; }
            const href = anchor.getAttribute("href") || "";
            if (href.startsWith("/wiki/") && !href.includes(":")) {
                event.preventDefault();
                if (window.__wikigolfForward) { window.__wikigolfForward(href); }
            }
        }, true);
    }
"#;

#[component]
pub fn GameView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut session = use_signal(Session::new);
    let mut update = use_signal(|| None::<GameUpdate>);
    let mut busy = use_signal(|| false);

    let bridge_game = ctx.game();
    use_future(move || {
        let game = Arc::clone(&bridge_game);
        async move {
            let mut bridge = eval(ARTICLE_CLICK_BRIDGE);
            loop {
                let Ok(href) = bridge.recv::<String>().await else {
                    break;
                };
                if busy() {
                    continue;
                }
                busy.set(true);
                let mut live = session();
                let next = game.follow_link(&mut live, Some(&href)).await;
                session.set(live);
                if let Some(next) = next {
                    update.set(Some(next));
                }
                busy.set(false);
            }
        }
    });

    let start_game = ctx.game();
    let on_start = move |_| {
        let game = Arc::clone(&start_game);
        spawn(async move {
            busy.set(true);
            let mut live = Session::new();
            let first = game.start(&mut live).await;
            session.set(live);
            update.set(Some(first));
            busy.set(false);
        });
    };

    let live = session();
    let started = live.phase() != GamePhase::Idle;

    rsx! {
        div { class: "page game-page",
            div { class: "game-header",
                button {
                    class: "start-button",
                    disabled: busy(),
                    onclick: on_start,
                    if started { "Restart" } else { "Start" }
                }
                if started {
                    dl { class: "game-status",
                        dt { "Start" }
                        dd { "{live.start_page()}" }
                        dt { "Goal" }
                        dd { "{live.goal_page()}" }
                        dt { "Now at" }
                        dd { "{live.current_page()}" }
                        dt { "Clicks" }
                        dd { "{live.click_count()}" }
                    }
                }
            }

            div { class: "article-pane",
                if busy() {
                    p { class: "loading", "Loading..." }
                } else {
                    match update() {
                        None => rsx! {
                            p { class: "hint", "Press start to draw a theme." }
                        },
                        Some(GameUpdate::Article { html }) => rsx! {
                            div { id: "article-content", dangerous_inner_html: "{html}" }
                        },
                        Some(GameUpdate::Won { result }) => rsx! {
                            div { class: "win-panel",
                                h1 { "Goal!" }
                                p {
                                    "Reached 「{result.goal_page()}」 from 「{result.start_page()}」 "
                                    "in {result.click_count()} clicks."
                                }
                            }
                        },
                        Some(GameUpdate::Failed { message }) => rsx! {
                            p { class: "error", "Error: {message}" }
                        },
                    }
                }
            }
        }
    }
}
