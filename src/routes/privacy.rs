use axum::response::IntoResponse;

use crate::template;

#[derive(askama::Template)]
#[template(path = "privacy.html")]
pub struct PrivacyTemplate;

pub async fn page() -> impl IntoResponse {
    template::render(PrivacyTemplate)
}
