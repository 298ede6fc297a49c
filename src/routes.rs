use dioxus::prelude::*;

use crate::components::dashboard::{AccountPage, RoleDashboard};
use crate::AppLayout;

#[derive(Routable, Clone, PartialEq, Debug)]
#[rustfmt::skip]
pub enum Route {
    // All routes use AppLayout which includes Sidebar and TopBar
    #[layout(AppLayout)]
        #[route("/")]
        Home {},

        #[route("/account")]
        Account {},
    #[end_layout]

    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

#[component]
fn Home() -> Element {
    rsx! { RoleDashboard {} }
}

#[component]
fn Account() -> Element {
    rsx! { AccountPage {} }
}

#[component]
fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");

    rsx! {
        div { class: "min-h-screen flex flex-col items-center justify-center text-gray-500",
            p { class: "text-lg mb-4", "Nothing lives at /{path}" }
            Link { to: Route::Home {}, class: "text-indigo-600 hover:underline", "Back to dashboard" }
        }
    }
}
