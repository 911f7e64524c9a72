use regex::Regex;

/// 把原始信件內文 (可能含 HTML) 攤平成非空白的文字行。
/// 壞掉的標記不會報錯，盡力取出文字即可。
pub fn normalize(raw: &str) -> Vec<String> {
    html_to_text(raw)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// HTML 轉純文字：丟掉 script/style 連同內容、區塊結尾換行、其餘標籤去掉
pub fn html_to_text(raw: &str) -> String {
    let script = Regex::new(r"(?is)<script\b[^>]*>.*?</script>").unwrap();
    let style = Regex::new(r"(?is)<style\b[^>]*>.*?</style>").unwrap();
    let block_breaks =
        Regex::new(r"(?i)<br\s*/?>|</p>|</div>|</li>|</tr>|</h[1-6]>|</ul>|</ol>|</table>")
            .unwrap();
    let tags = Regex::new(r"(?s)<[^>]*>").unwrap();

    let text = script.replace_all(raw, "");
    let text = style.replace_all(&text, "");
    let text = block_breaks.replace_all(&text, "\n");
    let text = tags.replace_all(&text, "");

    decode_entities(&text)
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passes_through() {
        let raw = "Acme Corp is hiring a Platform Engineer\n\n  Remote - US only  \n";
        let lines = normalize(raw);
        assert_eq!(
            lines,
            vec![
                "Acme Corp is hiring a Platform Engineer".to_string(),
                "Remote - US only".to_string(),
            ]
        );
    }

    #[test]
    fn test_html_markup_is_stripped() {
        let raw = r#"<html><body>
            <div><b>Acme Corp</b> is hiring a Platform Engineer</div>
            <div>Remote - US only</div>
        </body></html>"#;
        let lines = normalize(raw);
        assert_eq!(lines[0], "Acme Corp is hiring a Platform Engineer");
        assert_eq!(lines[1], "Remote - US only");
    }

    #[test]
    fn test_script_and_style_content_is_discarded() {
        let raw = "<style>.x { color: red }</style><script>var hiring = 1;</script><p>Real line</p>";
        let lines = normalize(raw);
        assert_eq!(lines, vec!["Real line".to_string()]);
    }

    #[test]
    fn test_br_tags_split_lines() {
        let raw = "First line<br>Second line<br/>Third line";
        let lines = normalize(raw);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], "Third line");
    }

    #[test]
    fn test_entities_are_decoded() {
        let raw = "<p>Ops&nbsp;&amp;&nbsp;Platform &lt;team&gt;</p>";
        let lines = normalize(raw);
        assert_eq!(lines, vec!["Ops & Platform <team>".to_string()]);
    }

    #[test]
    fn test_malformed_markup_degrades_to_text() {
        let raw = "<div><b>Broken markup with <no closing\nAcme is hiring a DevOps Engineer";
        let lines = normalize(raw);
        // 不會 panic，盡力取出剩下的文字
        assert!(!lines.is_empty());
    }

    #[test]
    fn test_whitespace_only_lines_are_dropped() {
        let raw = "line one\n   \n\t\nline two";
        let lines = normalize(raw);
        assert_eq!(lines, vec!["line one".to_string(), "line two".to_string()]);
    }
}
