use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{ScoreRowVm, map_score_rows};

const RECORDS_LIMIT: u32 = 20;

#[derive(Clone, Debug, PartialEq)]
enum RecordsData {
    SignedOut,
    Scores {
        username: Option<String>,
        rows: Vec<ScoreRowVm>,
    },
}

#[component]
pub fn RecordsView() -> Element {
    let ctx = use_context::<AppContext>();
    let identity = ctx.identity();
    let scores = ctx.scores();

    let resource = use_resource(move || {
        let identity = identity.clone();
        let scores = scores.clone();
        async move {
            let Some(player) = identity
                .current_identity()
                .await
                .map_err(|_| ViewError::Unknown)?
            else {
                return Ok(RecordsData::SignedOut);
            };
            let records = scores
                .recent_scores(player.id, RECORDS_LIMIT)
                .await
                .map_err(|_| ViewError::Unknown)?;
            Ok(RecordsData::Scores {
                username: player.username,
                rows: map_score_rows(&records),
            })
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            h2 { "My Records" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading records..." }
                },
                ViewState::Ready(RecordsData::SignedOut) => rsx! {
                    p { "Sign in to keep your results." }
                },
                ViewState::Ready(RecordsData::Scores { username, rows }) => rsx! {
                    if let Some(name) = username {
                        p { class: "records-owner", "Playing as {name}" }
                    }
                    if rows.is_empty() {
                        p { "No rounds recorded yet." }
                    } else {
                        table { class: "records-table",
                            thead {
                                tr {
                                    th { "Date" }
                                    th { "Start" }
                                    th { "Goal" }
                                    th { "Clicks" }
                                }
                            }
                            tbody {
                                for row in rows {
                                    tr {
                                        td { "{row.played_at}" }
                                        td { "{row.start_page}" }
                                        td { "{row.goal_page}" }
                                        td { "{row.click_count}" }
                                    }
                                }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
            }
        }
    }
}
