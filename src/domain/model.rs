use serde::Serialize;

/// 從摘要信件中抽取出來的單一職缺
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobPosting {
    pub company: String,
    pub title: String,
    pub location: String,
    pub link: Option<String>,
}

/// 職缺說明抓取結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Resolution {
    Resolved(String),
    Unresolved(String),
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Resolution::Resolved(text) => Some(text),
            Resolution::Unresolved(_) => None,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Resolution::Resolved(_) => None,
            Resolution::Unresolved(reason) => Some(reason),
        }
    }
}

/// 交付階段的處理單位：職缺 + 抓取結果 + 技能關鍵字
#[derive(Debug, Clone, Serialize)]
pub struct PipelineRecord {
    pub posting: JobPosting,
    pub resolution: Resolution,
    pub keywords: Vec<String>,
}

/// 通知 channel 收到的欄位，缺值一律以固定字串補齊
#[derive(Debug, Clone, Serialize)]
pub struct JobNotification {
    pub title: String,
    pub company: String,
    pub location: String,
    pub link: String,
    pub resume_ref: String,
    pub error: String,
    /// 本地檔案路徑，有附件需求的 channel (email) 才會用到
    #[serde(skip)]
    pub resume_path: Option<String>,
}

impl JobNotification {
    pub fn new(
        posting: &JobPosting,
        resume_ref: Option<String>,
        resume_path: Option<String>,
        error: Option<String>,
    ) -> Self {
        Self {
            title: posting.title.clone(),
            company: posting.company.clone(),
            location: posting.location.clone(),
            link: posting.link.clone().unwrap_or_else(|| "N/A".to_string()),
            resume_ref: resume_ref.unwrap_or_else(|| "N/A".to_string()),
            error: error.unwrap_or_else(|| "None".to_string()),
            resume_path,
        }
    }
}

/// 一次 run 的結束訊號
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeliveryReport {
    pub extracted: usize,
    pub delivered: usize,
    pub failed: usize,
}
