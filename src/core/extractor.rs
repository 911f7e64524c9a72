use crate::domain::model::JobPosting;
use regex::Regex;

/// location 往後掃描的行數上限
const LOOKAHEAD_LINES: usize = 4;
const DEFAULT_LOCATION: &str = "Remote";
const UNKNOWN_COMPANY: &str = "Unknown";

/// 從攤平後的文字行掃出結構化職缺。
/// 每一行含 "hiring" 的行獨立產生一筆，順序照原文。
pub struct JobExtractor {
    sentence: Regex,
    link: Regex,
}

impl JobExtractor {
    pub fn new() -> Self {
        Self {
            // "<company> is hiring [a|an] <title>"，冠詞後面一定要有空白
            sentence: Regex::new(r"(?i)^(.*?) is hiring (?:an? )?(.*)$").unwrap(),
            link: Regex::new(r"https?://\S+").unwrap(),
        }
    }

    pub fn extract(&self, lines: &[String]) -> Vec<JobPosting> {
        let mut postings = Vec::new();

        for (i, line) in lines.iter().enumerate() {
            if !line.to_lowercase().contains("hiring") {
                continue;
            }

            let (company, title) = self.split_company_title(line);
            let location = self.lookahead_location(lines, i);
            let link = self.link.find(line).map(|m| m.as_str().to_string());

            postings.push(JobPosting {
                company,
                title,
                location,
                link,
            });
        }

        postings
    }

    /// 句型不符時退回 Unknown + 整行原文，不算失敗
    fn split_company_title(&self, line: &str) -> (String, String) {
        if let Some(caps) = self.sentence.captures(line) {
            let company = caps[1].trim().to_string();
            let title = caps[2].trim().to_string();
            if !company.is_empty() && !title.is_empty() {
                return (company, title);
            }
        }
        (UNKNOWN_COMPANY.to_string(), line.to_string())
    }

    /// 往後最多掃 LOOKAHEAD_LINES 行找含 "remote" 的行，整行照抄
    fn lookahead_location(&self, lines: &[String], index: usize) -> String {
        let end = (index + 1 + LOOKAHEAD_LINES).min(lines.len());
        for candidate in &lines[index + 1..end] {
            if candidate.to_lowercase().contains("remote") {
                return candidate.clone();
            }
        }
        DEFAULT_LOCATION.to_string()
    }
}

impl Default for JobExtractor {
    fn default() -> Self {
        Self::new()
    }
}
