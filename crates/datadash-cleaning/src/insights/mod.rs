//! Narrative data insights for the dashboard.
//!
//! Asks an [`AIProvider`] for insights, chart recommendations, patterns and
//! business recommendations. The call never fails: without a usable answer
//! the caller gets [`DataInsights::unavailable`], and an answer with no JSON
//! object in it yields [`DataInsights::generic`].

use crate::advisory::{PROMPT_SAMPLE_ROWS, extract_json_block};
use crate::ai::AIProvider;
use crate::types::{DataInsights, Record};
use anyhow::{Context, Result};
use tracing::{debug, info, warn};

/// Build the insights prompt for the first rows of a dataset.
pub fn build_insights_prompt(rows: &[Record], columns: &[String]) -> Result<String> {
    let sample = &rows[..rows.len().min(PROMPT_SAMPLE_ROWS)];
    let sample_json = serde_json::to_string(sample).context("Failed to serialize sample rows")?;

    Ok(format!(
        "Analyze this dataset with columns: {}.\n\
        Provide:\n\
        1. Key insights about the data\n\
        2. Recommended chart types with explanations\n\
        3. Notable patterns or anomalies\n\
        4. Business recommendations\n\n\
        Format the response as JSON with this structure:\n\
        {{\n  \
          \"insights\": [\"insight1\", \"insight2\"],\n  \
          \"recommendedCharts\": [\"bar\", \"line\", \"pie\"],\n  \
          \"patterns\": [\"pattern1\", \"pattern2\"],\n  \
          \"recommendations\": [\"rec1\", \"rec2\"]\n\
        }}\n\n\
        Sample data: {}",
        columns.join(", "),
        sample_json
    ))
}

/// Analyze a dataset with the given provider.
///
/// | Outcome                          | Result                          |
/// |----------------------------------|---------------------------------|
/// | no provider, request error       | [`DataInsights::unavailable`]   |
/// | answer without a JSON object     | [`DataInsights::generic`]       |
/// | JSON object that does not decode | [`DataInsights::unavailable`]   |
/// | decodable JSON object            | the decoded insights            |
pub fn analyze_data_with_ai(
    rows: &[Record],
    columns: &[String],
    provider: Option<&dyn AIProvider>,
) -> DataInsights {
    let Some(provider) = provider else {
        info!("No AI provider configured, insights unavailable");
        return DataInsights::unavailable();
    };

    match request_insights(rows, columns, provider) {
        Ok(insights) => insights,
        Err(e) => {
            warn!("AI insights from {} failed: {:#}", provider.name(), e);
            DataInsights::unavailable()
        }
    }
}

fn request_insights(
    rows: &[Record],
    columns: &[String],
    provider: &dyn AIProvider,
) -> Result<DataInsights> {
    let prompt = build_insights_prompt(rows, columns)?;

    debug!(
        "Requesting insights from {} ({})",
        provider.name(),
        provider.model().unwrap_or("default model")
    );
    let response = provider.generate(&prompt)?;

    let Some(block) = extract_json_block(&response) else {
        debug!("{} answered without a JSON object", provider.name());
        return Ok(DataInsights::generic());
    };

    serde_json::from_str(block).context("Failed to decode insights JSON")
}
