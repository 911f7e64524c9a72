/// 固定技能詞彙表，輸出順序以宣告順序為準
pub const SKILL_VOCABULARY: [&str; 9] = [
    "AWS",
    "Azure",
    "Terraform",
    "Kubernetes",
    "Docker",
    "CI/CD",
    "Jenkins",
    "Ansible",
    "Python",
];

/// 抓不到職缺說明時使用的通用清單
pub const GENERIC_FALLBACK: [&str; 4] = ["AWS", "Docker", "Linux", "CI/CD"];

pub struct KeywordDeriver {
    vocabulary: Vec<String>,
}

impl KeywordDeriver {
    pub fn new() -> Self {
        Self {
            vocabulary: SKILL_VOCABULARY.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[cfg(test)]
    pub fn with_vocabulary(vocabulary: Vec<String>) -> Self {
        Self { vocabulary }
    }

    /// 回傳詞彙表中 (小寫) 子字串出現在輸入裡的項目，照詞彙表順序、不重複
    pub fn derive(&self, text: &str) -> Vec<String> {
        let haystack = text.to_lowercase();
        self.vocabulary
            .iter()
            .filter(|entry| haystack.contains(&entry.to_lowercase()))
            .cloned()
            .collect()
    }

    pub fn fallback() -> Vec<String> {
        GENERIC_FALLBACK.iter().map(|s| s.to_string()).collect()
    }
}

impl Default for KeywordDeriver {
    fn default() -> Self {
        Self::new()
    }
}
