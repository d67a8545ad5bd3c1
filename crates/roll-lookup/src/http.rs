//! Response and URL checks for the lookup client.

use reqwest::Url;

use crate::error::LookupError;

/// Longest upstream error body kept in [`LookupError::Api`].
const MAX_ERROR_BODY: usize = 512;

/// Return the response unchanged on success, [`LookupError::Api`] otherwise.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, LookupError> {
    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let mut message = resp.text().await.unwrap_or_default();
        if message.len() > MAX_ERROR_BODY {
            let cut = (0..=MAX_ERROR_BODY)
                .rev()
                .find(|&i| message.is_char_boundary(i))
                .unwrap_or(0);
            message.truncate(cut);
        }
        return Err(LookupError::Api { status, message });
    }
    Ok(resp)
}

/// Parse a caller-supplied URL, accepting only `http` and `https`.
pub fn parse_page_url(raw: &str) -> Result<Url, LookupError> {
    let url = Url::parse(raw.trim()).map_err(|e| LookupError::InvalidUrl(format!("{raw}: {e}")))?;
    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(LookupError::InvalidUrl(format!(
                "unsupported scheme '{other}'"
            )));
        }
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(LookupError::InvalidUrl(format!("{raw}: missing host")));
    }
    Ok(url)
}
