use axum::response::IntoResponse;

use crate::template;

#[derive(askama::Template)]
#[template(path = "terms.html")]
pub struct TermsTemplate;

pub async fn page() -> impl IntoResponse {
    template::render(TermsTemplate)
}
