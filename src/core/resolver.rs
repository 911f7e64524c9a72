use crate::core::normalizer;
use crate::domain::model::Resolution;
use regex::Regex;
use reqwest::Client;
use std::time::Duration;

const REASON_NO_LINK: &str = "no link";
const REASON_INACCESSIBLE: &str = "login required or page inaccessible";
const REASON_NOT_FOUND: &str = "job description not found";

/// 職缺頁面抓取。每筆職缺只打一次，任何失敗都收斂成 Unresolved，不往上拋
pub struct DescriptionResolver {
    client: Client,
    timeout: Duration,
    user_agent: String,
}

impl DescriptionResolver {
    pub fn new(timeout: Duration, user_agent: String) -> Self {
        Self {
            client: Client::new(),
            timeout,
            user_agent,
        }
    }

    pub async fn resolve(&self, link: Option<&str>) -> Resolution {
        let Some(url) = link else {
            return Resolution::Unresolved(REASON_NO_LINK.to_string());
        };

        tracing::debug!("Fetching job description from: {}", url);

        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .timeout(self.timeout)
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(e) => return Resolution::Unresolved(e.to_string()),
        };

        if response.status() != reqwest::StatusCode::OK {
            return Resolution::Unresolved(REASON_INACCESSIBLE.to_string());
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return Resolution::Unresolved(e.to_string()),
        };

        match extract_description(&body) {
            Some(text) => Resolution::Resolved(text),
            None => Resolution::Unresolved(REASON_NOT_FOUND.to_string()),
        }
    }
}

/// 從頁面找出職缺說明容器並攤平成文字。
/// 認兩種容器：id="jobDescriptionText"，或 class 含 "job-description"
fn extract_description(body: &str) -> Option<String> {
    let by_id =
        Regex::new(r#"(?is)<([a-z][a-z0-9]*)\b[^>]*\bid\s*=\s*["']jobDescriptionText["'][^>]*>"#)
            .unwrap();
    let by_class = Regex::new(
        r#"(?is)<([a-z][a-z0-9]*)\b[^>]*\bclass\s*=\s*["'][^"']*job-description[^"']*["'][^>]*>"#,
    )
    .unwrap();

    let caps = by_id.captures(body).or_else(|| by_class.captures(body))?;
    let tag = caps.get(1)?.as_str().to_lowercase();
    let inner_start = caps.get(0)?.end();
    let inner_end = find_element_end(body, &tag, inner_start);

    let lines = normalizer::normalize(&body[inner_start..inner_end]);
    if lines.is_empty() {
        return None;
    }
    Some(lines.join("\n"))
}

/// 以深度計數找出容器的結束位置；標籤沒關好就取到結尾 (best effort)
fn find_element_end(body: &str, tag: &str, from: usize) -> usize {
    let boundary = Regex::new(&format!(r"(?i)<(/?){}\b[^>]*>", regex::escape(tag))).unwrap();
    let mut depth = 1usize;

    for caps in boundary.captures_iter(&body[from..]) {
        let whole = caps.get(0).unwrap();
        let closing = !caps[1].is_empty();
        if closing {
            depth -= 1;
            if depth == 0 {
                return from + whole.start();
            }
        } else {
            depth += 1;
        }
    }

    body.len()
}
