use gloo_net::http::Request;
use scene::TableSource;

/// Fetches tables and outlines over HTTP relative to the page.
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpSource;

impl TableSource for HttpSource {
    async fn fetch_text(&self, location: &str) -> Result<String, String> {
        let resp = Request::get(location)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(format!("HTTP {} {}", resp.status(), resp.status_text()));
        }
        resp.text().await.map_err(|e| e.to_string())
    }
}
