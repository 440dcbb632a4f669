use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

#[derive(askama::Template)]
#[template(path = "404.html")]
pub struct NotFoundTemplate;

/// Render an askama template into an HTML response
pub fn render<T: askama::Template>(template: T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to render template. Error: {err}"),
        )
            .into_response(),
    }
}
