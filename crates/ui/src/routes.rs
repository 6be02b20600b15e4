use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{GameView, HomeView, RecordsView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/game", GameView)] Game {},
        #[route("/records", RecordsView)] Records {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            h1 { "Wikigolf" }
            ul {
                li { Link { to: Route::Home {}, "Home" } }
                li { Link { to: Route::Game {}, "Play" } }
                li { Link { to: Route::Records {}, "My Records" } }
            }
        }
    }
}
