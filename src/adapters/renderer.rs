use crate::domain::model::JobPosting;
use crate::domain::ports::ResumeRenderer;
use crate::utils::error::Result;
use minijinja::{context, Environment};
use std::path::{Path, PathBuf};

/// minijinja 模板渲染。模板有兩個具名佔位：skills 與 experience
pub struct TemplateRenderer {
    template_path: PathBuf,
    output_dir: PathBuf,
}

impl TemplateRenderer {
    pub fn new(template_path: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            template_path: template_path.into(),
            output_dir: output_dir.into(),
        }
    }

    /// 從關鍵字組出 experience 段落
    fn experience_narrative(keywords: &[String]) -> String {
        match keywords {
            [] => "Hands-on experience running production platform workloads.".to_string(),
            [only] => format!("Hands-on production experience with {only}."),
            [init @ .., last] => format!(
                "Hands-on production experience with {} and {last}.",
                init.join(", ")
            ),
        }
    }

    /// 公司名轉成安全的檔名片段
    fn slug(value: &str) -> String {
        let slug: String = value
            .to_lowercase()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        slug.trim_matches('_').to_string()
    }
}

#[async_trait::async_trait]
impl ResumeRenderer for TemplateRenderer {
    async fn render(&self, posting: &JobPosting, keywords: &[String]) -> Result<String> {
        let source = tokio::fs::read_to_string(&self.template_path).await?;

        let mut env = Environment::new();
        env.add_template("resume", &source)?;
        let template = env.get_template("resume")?;

        let rendered = template.render(context! {
            skills => keywords.join(", "),
            experience => Self::experience_narrative(keywords),
            title => posting.title,
            company => posting.company,
            location => posting.location,
        })?;

        let filename = format!(
            "resume_{}_{}.md",
            Self::slug(&posting.company),
            chrono::Local::now().format("%Y%m%d_%H%M%S")
        );
        let output_path = Path::new(&self.output_dir).join(filename);

        if let Some(parent) = output_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&output_path, rendered).await?;

        tracing::debug!("Rendered resume to {}", output_path.display());
        Ok(output_path.to_string_lossy().into_owned())
    }
}
