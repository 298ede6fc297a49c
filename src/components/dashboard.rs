use dioxus::prelude::*;

use crate::components::common::{Badge, Card};
use crate::models::{UserProfile, UserRole};
use crate::state::use_session;

/// Landing page for a signed-in user, chosen by role.
#[component]
pub fn RoleDashboard() -> Element {
    let session = use_session();
    let user = session.read().current_user().cloned().unwrap_or_default();

    match user.role {
        UserRole::Admin => rsx! { AdminDashboard { user } },
        UserRole::Business => rsx! { BusinessDashboard { user } },
        UserRole::User | UserRole::Unknown => rsx! { MemberDashboard { user } },
    }
}

#[component]
fn MemberDashboard(user: UserProfile) -> Element {
    let name = user.display_name().to_string();

    rsx! {
        div { class: "flex-1 p-8 space-y-6",
            h2 { class: "text-2xl font-bold text-gray-800", "Welcome back, {name}" }
            Card { title: "Discover".to_string(),
                p { class: "text-gray-600", "Find people to build with and keep your profile up to date." }
            }
        }
    }
}

#[component]
fn BusinessDashboard(user: UserProfile) -> Element {
    let name = user.display_name().to_string();

    rsx! {
        div { class: "flex-1 p-8 space-y-6",
            h2 { class: "text-2xl font-bold text-gray-800", "{name}" }
            Card { title: "Company".to_string(),
                p { class: "text-gray-600", "Manage your company page and reach potential cofounders." }
            }
        }
    }
}

#[component]
fn AdminDashboard(user: UserProfile) -> Element {
    let name = user.display_name().to_string();

    rsx! {
        div { class: "flex-1 p-8 space-y-6",
            div { class: "flex items-center gap-3",
                h2 { class: "text-2xl font-bold text-gray-800", "Admin console" }
                Badge { text: name, color_class: "bg-indigo-100 text-indigo-800".to_string() }
            }
            Card { title: "Moderation".to_string(),
                p { class: "text-gray-600", "Review members, verification requests and reported posts." }
            }
        }
    }
}

/// Read-only view of what the session currently holds.
#[component]
pub fn AccountPage() -> Element {
    let session = use_session();
    let store = session.read();
    let state = store.state();

    let Some(user) = state.current_user.clone() else {
        return rsx! {};
    };

    let email = user.email.clone().unwrap_or_else(|| "-".to_string());
    let country = user.country.clone().unwrap_or_else(|| "-".to_string());
    let gender = user.gender.clone().unwrap_or_else(|| "-".to_string());
    let joined = user
        .created_at
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string());
    let name = user.display_name().to_string();
    let role = user.role.label();
    let favorites = state.favorite_posts.len();
    let avatar = user.profile_image.as_ref().and_then(|i| i.url()).map(str::to_string);

    rsx! {
        div { class: "flex-1 p-8 space-y-6",
            h2 { class: "text-2xl font-bold text-gray-800", "Account" }
            Card { title: "Profile".to_string(),
                if let Some(image) = avatar {
                    img { class: "h-16 w-16 rounded-full mb-4", src: "{image}", alt: "Profile image" }
                }
                dl { class: "grid grid-cols-2 gap-y-2 text-sm",
                    dt { class: "text-gray-500", "Name" }
                    dd { "{name}" }
                    dt { class: "text-gray-500", "Email" }
                    dd { "{email}" }
                    dt { class: "text-gray-500", "Role" }
                    dd { Badge { text: role.to_string() } }
                    dt { class: "text-gray-500", "Country" }
                    dd { "{country}" }
                    dt { class: "text-gray-500", "Gender" }
                    dd { "{gender}" }
                    dt { class: "text-gray-500", "Member since" }
                    dd { "{joined}" }
                    dt { class: "text-gray-500", "Favorite posts" }
                    dd { "{favorites}" }
                }
            }
        }
    }
}
