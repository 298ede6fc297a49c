use dioxus::prelude::*;

#[component]
pub fn LoadingSpinner() -> Element {
    rsx! {
        div { class: "flex items-center justify-center p-4",
            div { class: "animate-spin rounded-full h-8 w-8 border-b-2 border-indigo-600" }
        }
    }
}

#[component]
pub fn ErrorMessage(message: String) -> Element {
    rsx! {
        div { class: "bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded mb-4",
            p { "{message}" }
        }
    }
}

/// White panel with an optional heading.
#[component]
pub fn Card(children: Element, title: Option<String>) -> Element {
    rsx! {
        section { class: "bg-white rounded-xl border border-gray-200 p-6",
            if let Some(title) = title {
                h3 { class: "text-sm font-semibold uppercase tracking-wide text-gray-500 mb-3", "{title}" }
            }
            {children}
        }
    }
}

#[component]
pub fn Badge(text: String, #[props(default = "bg-gray-100 text-gray-800".to_string())] color_class: String) -> Element {
    rsx! {
        span { class: "inline-flex items-center px-2.5 py-0.5 rounded-full text-xs font-medium {color_class}",
            "{text}"
        }
    }
}
