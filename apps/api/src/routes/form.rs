use axum::response::Html;

const FORM_PAGE: &str = include_str!("form.html");

/// GET /
/// The browser form that posts to the submission endpoint.
pub async fn form_handler() -> Html<&'static str> {
    Html(FORM_PAGE)
}
