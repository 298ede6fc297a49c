//! Cofounder Connect - Dioxus client
//!
//! Browser client for the cofounder-matching platform. The backend owns
//! all records; this crate keeps the signed-in session and renders the
//! role-specific shell around it.

mod api;
mod components;
mod config;
mod models;
mod routes;
mod state;

use std::sync::Arc;

use dioxus::prelude::*;
use api::ApiClient;
use components::common::{Badge, ErrorMessage, LoadingSpinner};
use config::AppConfig;
use models::LogoutPayload;
use routes::Route;
use state::{use_api, use_session, KeyValueStorage, SessionStore};

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("cofounder_connect=info"));
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer())
            .with(filter)
            .init();
    }

    dioxus::launch(App);
}

/// `SESSION_FILE` value that keeps the session for this run only.
#[cfg(not(target_arch = "wasm32"))]
const IN_MEMORY_SESSION: &str = ":memory:";

/// Storage and API client for this app instance.
#[derive(Clone)]
struct Services {
    storage: Arc<dyn KeyValueStorage>,
    api: ApiClient,
}

fn build_services() -> anyhow::Result<Services> {
    let config = AppConfig::load();

    #[cfg(target_arch = "wasm32")]
    let storage: Arc<dyn KeyValueStorage> = Arc::new(state::BrowserStorage);

    #[cfg(not(target_arch = "wasm32"))]
    let storage: Arc<dyn KeyValueStorage> = if config.session_file.as_os_str() == IN_MEMORY_SESSION {
        Arc::new(state::MemoryStorage::new())
    } else {
        Arc::new(state::FileStorage::open(&config.session_file))
    };

    let api = ApiClient::new(&config.api_url, storage.clone())?;
    tracing::info!("Using API at {}", config.api_url);

    Ok(Services { storage, api })
}

#[component]
fn App() -> Element {
    let services = use_hook(|| {
        build_services().map_err(|e| {
            tracing::error!("Failed to start client: {:#}", e);
            e.to_string()
        })
    });

    match services {
        Ok(services) => rsx! { SessionRoot { services } },
        Err(message) => rsx! {
            div { class: "min-h-screen flex items-center justify-center bg-gray-100",
                ErrorMessage { message }
            }
        },
    }
}

impl PartialEq for Services {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.storage, &other.storage)
    }
}

#[component]
fn SessionRoot(services: Services) -> Element {
    let Services { storage, api } = services;
    use_context_provider(|| api);
    let session = use_context_provider(|| Signal::new(SessionStore::initialize(storage)));

    let is_authenticated = session.read().is_authenticated();

    rsx! {
        if is_authenticated {
            Router::<Route> {}
        } else {
            LoginPage {}
        }
    }
}

/// Layout component that wraps all authenticated routes
#[component]
pub fn AppLayout() -> Element {
    rsx! {
        div { class: "h-screen flex flex-col bg-gray-100",
            TopBar {}

            div { class: "flex-1 flex overflow-hidden",
                Sidebar {}

                // Outlet renders the matched route
                div { class: "flex-1 flex overflow-auto",
                    Outlet::<Route> {}
                }
            }
        }
    }
}

#[component]
fn TopBar() -> Element {
    let mut session = use_session();
    let client = use_api();
    let is_admin = session.read().state().is_admin();
    let name = session
        .read()
        .current_user()
        .map(|u| u.display_name().to_string())
        .unwrap_or_else(|| "there".to_string());

    let logout = move |_| {
        api::auth::logout(&client);
        session.write().logout(LogoutPayload::default());
    };

    rsx! {
        header { class: "bg-white border-b px-6 py-3 flex items-center justify-between",
            div { class: "flex items-center gap-3",
                span { class: "text-2xl", "\u{1F91D}" }
                h1 { class: "text-xl font-bold text-gray-800", "Cofounder Connect" }
            }

            div { class: "flex items-center gap-4",
                if is_admin {
                    Badge { text: "Admin".to_string(), color_class: "bg-indigo-100 text-indigo-800".to_string() }
                }
                span { class: "text-gray-600", "Hi, {name}" }
                button {
                    class: "px-4 py-2 text-gray-600 hover:bg-gray-100 rounded-lg",
                    onclick: logout,
                    "Logout"
                }
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    let current_route = use_route::<Route>();

    let nav_items = [
        (Route::Home {}, "Dashboard", "\u{1F3E0}"),
        (Route::Account {}, "Account", "\u{1F464}"),
    ];

    rsx! {
        nav { class: "w-64 bg-white border-r flex flex-col",
            div { class: "flex-1 py-4",
                for (route, label, icon) in nav_items.iter() {
                    Link {
                        to: route.clone(),
                        class: if current_route == *route {
                            "flex items-center gap-3 px-6 py-3 bg-indigo-50 text-indigo-600 border-r-4 border-indigo-600 font-medium"
                        } else {
                            "flex items-center gap-3 px-6 py-3 text-gray-700 hover:bg-gray-100 transition-colors"
                        },
                        span { class: "text-xl", "{icon}" }
                        span { "{label}" }
                    }
                }
            }
        }
    }
}

#[component]
fn LoginPage() -> Element {
    let mut session = use_session();
    let client = use_api();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut is_loading = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);

    let mut login = move || {
        let email_val = email();
        let password_val = password();

        if email_val.is_empty() || password_val.is_empty() {
            error.set(Some("Please enter email and password".to_string()));
            return;
        }

        is_loading.set(true);
        error.set(None);

        let client = client.clone();
        spawn(async move {
            let result = api::auth::login(&client, &email_val, &password_val).await;
            is_loading.set(false);

            match result {
                Ok(response) => {
                    if let Err(e) = api::auth::establish_session(&client, &mut session.write(), response) {
                        tracing::error!("Could not persist session: {}", e);
                        error.set(Some(format!("Could not save your session: {}", e)));
                    }
                }
                Err(e) => {
                    tracing::warn!("Login failed: {}", e);
                    error.set(Some(format!("Login failed: {}", e)));
                }
            }
        });
    };

    rsx! {
        div { class: "min-h-screen flex items-center justify-center bg-gray-100",
            div { class: "bg-white rounded-lg shadow-lg p-8 w-full max-w-md",
                div { class: "text-center mb-8",
                    span { class: "text-5xl", "\u{1F91D}" }
                    h1 { class: "text-2xl font-bold mt-4", "Cofounder Connect" }
                    p { class: "text-gray-500", "Sign in to find your cofounder" }
                }

                if let Some(err) = error() {
                    ErrorMessage { message: err }
                }

                form {
                    onsubmit: move |e| {
                        e.prevent_default();
                        login();
                    },

                    div { class: "mb-4",
                        label { class: "block text-sm font-medium text-gray-700 mb-1", "Email" }
                        input {
                            class: "w-full px-4 py-3 border border-gray-300 rounded-lg focus:outline-none focus:ring-2 focus:ring-indigo-500",
                            r#type: "email",
                            placeholder: "you@example.com",
                            value: "{email}",
                            oninput: move |e| email.set(e.value()),
                        }
                    }

                    div { class: "mb-6",
                        label { class: "block text-sm font-medium text-gray-700 mb-1", "Password" }
                        input {
                            class: "w-full px-4 py-3 border border-gray-300 rounded-lg focus:outline-none focus:ring-2 focus:ring-indigo-500",
                            r#type: "password",
                            placeholder: "Enter your password",
                            value: "{password}",
                            oninput: move |e| password.set(e.value()),
                        }
                    }

                    if is_loading() {
                        LoadingSpinner {}
                    } else {
                        button {
                            class: "w-full py-3 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700 font-medium",
                            r#type: "submit",
                            "Sign In"
                        }
                    }
                }
            }
        }
    }
}
