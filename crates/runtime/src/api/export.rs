//! Export formats for batch results

use crate::types::ClassificationResult;

/// Output format of `POST /export`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    /// `csv` selects CSV; anything else, including no value, selects JSON.
    pub fn from_query(format: Option<&str>) -> Self {
        match format.map(|f| f.trim().to_ascii_lowercase()) {
            Some(f) if f == "csv" => ExportFormat::Csv,
            _ => ExportFormat::Json,
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv",
        }
    }

    pub fn content_disposition(&self) -> &'static str {
        match self {
            ExportFormat::Json => "attachment; filename=sentiment_analysis.json",
            ExportFormat::Csv => "attachment; filename=sentiment_analysis.csv",
        }
    }

    pub fn render(&self, results: &[ClassificationResult]) -> Result<String, serde_json::Error> {
        match self {
            ExportFormat::Json => serde_json::to_string(results),
            ExportFormat::Csv => Ok(to_csv(results)),
        }
    }
}

/// Render results as `Text,Sentiment,Score` rows.
///
/// The text column is always quoted with inner quotes doubled, so commas and
/// newlines in the input survive.
pub fn to_csv(results: &[ClassificationResult]) -> String {
    let mut out = String::from("Text,Sentiment,Score\n");
    for result in results {
        out.push_str(&format!(
            "\"{}\",{},{:.2}\n",
            result.text.replace('"', "\"\""),
            result.label,
            result.confidence
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SentimentLabel;

    fn result(text: &str, label: SentimentLabel, confidence: f64) -> ClassificationResult {
        ClassificationResult {
            text: text.to_string(),
            label,
            confidence,
        }
    }

    #[test]
    fn test_format_selection() {
        assert_eq!(ExportFormat::from_query(Some("csv")), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_query(Some("CSV")), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_query(Some("json")), ExportFormat::Json);
        assert_eq!(ExportFormat::from_query(Some("xml")), ExportFormat::Json);
        assert_eq!(ExportFormat::from_query(None), ExportFormat::Json);
    }

    #[test]
    fn test_csv_rows() {
        let rows = vec![
            result("I love it", SentimentLabel::Positive, 0.8),
            result("say \"hi\", ok", SentimentLabel::Neutral, 0.5),
        ];
        assert_eq!(
            to_csv(&rows),
            "Text,Sentiment,Score\n\"I love it\",positive,0.80\n\"say \"\"hi\"\", ok\",neutral,0.50\n"
        );
    }

    #[test]
    fn test_json_render() {
        let rows = vec![result("bad", SentimentLabel::Negative, 0.95)];
        let rendered = ExportFormat::Json.render(&rows).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(
            parsed,
            serde_json::json!([{"text": "bad", "sentiment": "negative", "score": 0.95}])
        );
    }
}
