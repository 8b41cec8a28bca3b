//! Prompt templates for the language model.

/// Wrap a free-form farmer question.
pub fn chat_prompt(message: &str) -> String {
    format!(
        r#"You are a helpful AI assistant. Please provide a comprehensive and accurate response to this question: "{message}"

If the question is about agriculture, farming, crops, or related topics, provide expert agricultural advice suitable for Indian farming conditions.

For any other topic (education, science, technology, general knowledge, daily life, etc.), provide helpful and informative responses.

Always be friendly, clear, and provide practical information when possible."#
    )
}

/// Diagnosis request for a photographed crop. Only the crop name and the
/// optional description reach the model.
pub fn crop_analysis_prompt(crop: &str, description: Option<&str>) -> String {
    let details = description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(|d| format!("Additional Details: {d}\n"))
        .unwrap_or_default();

    format!(
        r#"As an expert agricultural pathologist and plant disease specialist, analyze this crop image:

Crop Type: {crop}
{details}
Based on the uploaded image, provide a comprehensive analysis including:

1. **Visual Assessment**: Describe what you observe in the image (leaf condition, discoloration, spots, damage patterns, etc.)
2. **Likely Diagnosis**: Identify the most probable issue (disease, pest, nutrient deficiency, or environmental stress) with confidence level
3. **Detailed Explanation**: Explain the probable cause and how it affects the plant
4. **Immediate Treatment**: Recommend specific products available in India with exact names and application methods
5. **Step-by-Step Procedure**: Provide clear instructions for treatment
6. **Prevention Strategies**: Outline measures to prevent future occurrences
7. **Recovery Timeline**: Estimate expected recovery time
8. **Follow-up Actions**: When to seek professional help or try alternative treatments

Provide specific, actionable advice suitable for Indian farming conditions with locally available treatments."#
    )
}
