use dioxus::prelude::*;
use dioxus_router::Link;

use crate::routes::Route;

#[component]
pub fn HomeView() -> Element {
    rsx! {
        div { class: "page",
            h2 { "Wikigolf" }
            p {
                "Each round draws a start article and a goal article. Reach the goal "
                "by clicking links inside the articles; every link counts as one stroke."
            }
            p {
                "Signed-in players get their results saved to the leaderboard backend; "
                "everyone else just plays."
            }
            p {
                Link { class: "cta", to: Route::Game {}, "Start a round" }
            }
        }
    }
}
