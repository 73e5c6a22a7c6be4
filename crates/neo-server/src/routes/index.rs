use axum::response::Html;

use crate::page::IndexPage;

/// GET /: the empty date-range form.
pub async fn index() -> Html<String> {
    Html(IndexPage::default().render())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn index_renders_form() {
        let Html(body) = index().await;
        assert!(body.contains(r#"<form action="/plot" method="post">"#));
    }
}
