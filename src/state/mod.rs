pub mod session;
pub mod storage;
pub mod token;

pub use session::*;
pub use storage::*;
pub use token::*;

use dioxus::prelude::*;

use crate::api::ApiClient;

/// Session signal shared through context by the root component.
pub fn use_session() -> Signal<SessionStore> {
    use_context::<Signal<SessionStore>>()
}

pub fn use_api() -> ApiClient {
    use_context::<ApiClient>()
}
