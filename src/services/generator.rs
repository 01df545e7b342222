// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client for the Anthropic Messages API.
//!
//! Used for:
//! - Drafting new catalog activities for an under-covered combination
//! - Suggesting ideas for one child's age and interests
//! - Explaining an activity in words a child understands
//! - Adapting an existing activity to a different age
//! - Free-form parenting questions
//!
//! Generated text is untrusted: every draft is parsed leniently, has its
//! targeting fields forced, and is validated before it is returned.

use crate::config::Config;
use crate::error::AppError;
use crate::models::activity::{DetailedInfo, Material, MAX_CHILD_AGE};
use crate::models::{
    Activity, ActivityDraft, EnergyLevel, FilterCombination, MaterialsNeeded, MessLevel,
};
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;
use validator::Validate;

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";
const API_VERSION: &str = "2023-06-01";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const IDEA_COUNT: usize = 3;

/// Anything that can produce activity drafts for a catalog gap.
///
/// The backfill loop only depends on this, so it can run against a canned
/// source in tests.
pub trait DraftSource {
    fn generate_drafts(
        &self,
        combination: &FilterCombination,
        count: usize,
    ) -> impl Future<Output = Result<Vec<ActivityDraft>, AppError>> + Send;
}

/// Anthropic Messages API client.
#[derive(Clone)]
pub struct GeneratorService {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl GeneratorService {
    pub fn new(api_key: Option<String>, model: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            model,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.anthropic_api_key.clone(), config.anthropic_model.clone())
            .with_base_url(config.anthropic_base_url.clone())
    }

    /// Point the client at a different API host (proxies, local mocks).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Whether an API key is available.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Send a single-turn prompt and return the concatenated text blocks.
    async fn complete(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, AppError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(AppError::GenerationUnavailable)?;

        let body = serde_json::json!({
            "model": self.model,
            "max_tokens": max_tokens,
            "temperature": temperature,
            "messages": [{ "role": "user", "content": prompt }],
        });

        let response = self
            .http
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION)
            .timeout(REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Generation(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                tracing::warn!("Anthropic rate limit hit (429)");
            }

            return Err(AppError::Generation(format!("HTTP {}: {}", status, body)));
        }

        let message: MessagesResponse = response
            .json()
            .await
            .map_err(|e| AppError::Generation(format!("JSON parse error: {}", e)))?;

        Ok(message.text())
    }

    /// Ask for `count` new activities targeting `combination`.
    ///
    /// Drafts that fail validation are dropped with a warning; an empty
    /// result is not an error.
    pub async fn generate_for_combination(
        &self,
        combination: &FilterCombination,
        count: usize,
    ) -> Result<Vec<ActivityDraft>, AppError> {
        if count == 0 {
            return Ok(Vec::new());
        }

        let text = self
            .complete(&generation_prompt(combination, count), 4000, 0.8)
            .await?;

        let drafts = parse_generated_drafts(&text, combination)?;
        tracing::info!(
            combination = %combination.describe(),
            requested = count,
            received = drafts.len(),
            "Generated activity drafts"
        );

        Ok(drafts.into_iter().take(count).collect())
    }

    /// A few fresh ideas for one child. Nothing is stored.
    pub async fn generate_ideas(
        &self,
        age: u32,
        interests: &[String],
        preferences: &serde_json::Value,
    ) -> Result<Vec<ActivityDraft>, AppError> {
        let prompt = format!(
            "Generate {IDEA_COUNT} creative activity ideas for a {age}-year-old child who likes {}.\n\n\
             Preferences: {preferences}\n\n\
             Return ONLY a JSON array with this format:\n\
             [{{\n\
               \"title\": \"Activity Name\",\n\
               \"materials\": [{{\"emoji\": \"🎨\", \"name\": \"item\"}}],\n\
               \"steps\": [\"step1\", \"step2\", \"step3\"],\n\
               \"whyGreat\": \"Brief explanation\",\n\
               \"duration\": \"30 min\",\n\
               \"energyLevel\": \"active|calm|focused|silly\"\n\
             }}]",
            interests.join(", "),
        );

        let text = self.complete(&prompt, 1000, 0.7).await?;
        let drafts = parse_idea_drafts(&text, age)?;
        tracing::info!(age, received = drafts.len(), "Generated activity ideas");

        Ok(drafts.into_iter().take(IDEA_COUNT).collect())
    }

    /// Parent-facing explanation of an activity for a child of `child_age`.
    pub async fn explain_activity(
        &self,
        activity: &Activity,
        child_age: u32,
    ) -> Result<String, AppError> {
        let prompt = format!(
            "Explain this activity in simple terms a parent can use with a {child_age}-year-old:\n\n\
             Activity: {}\n\
             Steps: {}\n\n\
             Provide a fun, engaging explanation that makes the child excited to try it.",
            activity.title,
            activity.steps.join(", "),
        );

        let text = self.complete(&prompt, 500, 0.5).await?;
        Ok(text.trim().to_string())
    }

    /// Rework an activity for a different age. The result is not stored.
    pub async fn adapt_activity(
        &self,
        activity: &Activity,
        new_age: u32,
    ) -> Result<ActivityDraft, AppError> {
        let original = serde_json::to_string(activity)
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;
        let prompt = format!(
            "Adapt this activity for a {new_age}-year-old child:\n\n\
             Original activity: {original}\n\n\
             Modify the steps, materials, and complexity to be appropriate for a \
             {new_age}-year-old's developmental stage.\n\n\
             Return ONLY a JSON object with the same fields as the original."
        );

        let text = self.complete(&prompt, 1500, 0.6).await?;
        parse_adapted_draft(&text, activity, new_age)
    }

    /// Answer a parenting question, with whatever the client knows about
    /// the child passed along as `context`.
    pub async fn chat(
        &self,
        message: &str,
        context: &serde_json::Value,
    ) -> Result<String, AppError> {
        let prompt = format!(
            "You are a helpful parenting assistant for the PlaySpark app.\n\
             Context: {context}\n\n\
             User question: {message}\n\n\
             Provide helpful, friendly advice focused on activities and play for children."
        );

        let text = self.complete(&prompt, 1000, 0.7).await?;
        Ok(text.trim().to_string())
    }
}

impl DraftSource for GeneratorService {
    fn generate_drafts(
        &self,
        combination: &FilterCombination,
        count: usize,
    ) -> impl Future<Output = Result<Vec<ActivityDraft>, AppError>> + Send {
        self.generate_for_combination(combination, count)
    }
}

// ─── Wire Types ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl MessagesResponse {
    fn text(&self) -> String {
        self.content
            .iter()
            .filter(|b| b.kind == "text")
            .filter_map(|b| b.text.as_deref())
            .collect::<Vec<_>>()
            .join("")
    }
}

/// Activity as the model returns it. Targeting fields are ignored in favor
/// of the requested combination.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedActivity {
    title: String,
    #[serde(default)]
    materials: Vec<Material>,
    #[serde(default)]
    steps: Vec<String>,
    #[serde(default)]
    why_great: String,
    #[serde(default)]
    duration: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    mess_level: Option<MessLevel>,
    #[serde(default)]
    materials_needed: Option<MaterialsNeeded>,
    #[serde(default)]
    interests: Vec<String>,
    #[serde(default)]
    detailed_info: Option<DetailedInfo>,
    #[serde(default)]
    energy_level: Option<String>,
}

impl GeneratedActivity {
    fn into_draft(self, age_range: String, min_age: u32, max_age: u32) -> ActivityDraft {
        ActivityDraft {
            title: self.title,
            materials: self.materials,
            steps: self.steps,
            detailed_steps: None,
            detailed_info: self.detailed_info,
            why_great: self.why_great,
            age_range,
            min_age: Some(min_age),
            max_age: Some(max_age),
            development_stage: None,
            duration: self.duration,
            tags: self.tags,
            energy_level: self.energy_level.as_deref().and_then(energy_level_from),
            location: None,
            who_playing: None,
            mess_level: self.mess_level,
            materials_needed: self.materials_needed,
            interests: self.interests,
        }
    }
}

/// Models are loose with casing, and an unknown value just leaves the
/// field unset.
fn energy_level_from(raw: &str) -> Option<EnergyLevel> {
    let raw = raw.trim();
    EnergyLevel::ALL
        .into_iter()
        .find(|e| e.as_str().eq_ignore_ascii_case(raw))
}

/// One-year window starting at `age`, shifted down so it stays within
/// `MAX_CHILD_AGE`.
fn age_window(age: u32) -> (String, u32, u32) {
    let min = age.min(MAX_CHILD_AGE - 1);
    let max = min + 1;
    (format!("{min}-{max}"), min, max)
}

fn generation_prompt(combination: &FilterCombination, count: usize) -> String {
    format!(
        "Generate {count} creative, screen-free activity ideas for children aged {}.\n\
         Every activity must be:\n\
         - energy level: {}\n\
         - location: {}\n\
         - who is playing: {}\n\n\
         Return ONLY a JSON array with this format:\n\
         [{{\n\
           \"title\": \"Activity Name\",\n\
           \"materials\": [{{\"emoji\": \"🎨\", \"name\": \"item\"}}],\n\
           \"steps\": [\"step1\", \"step2\", \"step3\"],\n\
           \"whyGreat\": \"Brief explanation\",\n\
           \"duration\": \"30 min\",\n\
           \"tags\": [\"creative\"],\n\
           \"messLevel\": \"nomess|littlemess|messy\",\n\
           \"materialsNeeded\": \"none|basic|special\",\n\
           \"interests\": [\"arts\"]\n\
         }}]",
        combination.age_range,
        combination.energy_level.as_str(),
        combination.location.as_str(),
        combination.who_playing.as_str(),
    )
}

/// Slice out the outermost `open`..`close` span, skipping any prose or code
/// fences around it.
fn extract_json(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    (start < end).then(|| &text[start..=end])
}

/// Parse a JSON array reply, shaping each item with `shape` and keeping
/// only drafts that validate.
fn parse_drafts(
    text: &str,
    shape: impl Fn(GeneratedActivity) -> ActivityDraft,
) -> Result<Vec<ActivityDraft>, AppError> {
    let json = extract_json(text, '[', ']')
        .ok_or_else(|| AppError::Generation("Reply contained no JSON array".to_string()))?;

    let items: Vec<serde_json::Value> = serde_json::from_str(json)
        .map_err(|e| AppError::Generation(format!("Malformed activity array: {}", e)))?;

    let mut drafts = Vec::with_capacity(items.len());
    for item in items {
        let generated: GeneratedActivity = match serde_json::from_value(item) {
            Ok(g) => g,
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unparseable generated activity");
                continue;
            }
        };

        let draft = shape(generated);
        if let Err(e) = draft.validate() {
            tracing::warn!(title = %draft.title, error = %e, "Discarding invalid generated activity");
            continue;
        }
        drafts.push(draft);
    }

    Ok(drafts)
}

/// Parse a model reply into validated drafts targeting `combination`.
fn parse_generated_drafts(
    text: &str,
    combination: &FilterCombination,
) -> Result<Vec<ActivityDraft>, AppError> {
    parse_drafts(text, |generated| {
        let mut draft = generated.into_draft(
            combination.age_range.clone(),
            combination.min_age,
            combination.max_age,
        );
        draft.energy_level = Some(combination.energy_level);
        draft.location = Some(combination.location);
        draft.who_playing = Some(combination.who_playing);
        draft
    })
}

/// Parse idea suggestions for a child of `age`. The model's energy level
/// is kept; nothing else is targeted.
fn parse_idea_drafts(text: &str, age: u32) -> Result<Vec<ActivityDraft>, AppError> {
    parse_drafts(text, |generated| {
        let (age_range, min_age, max_age) = age_window(age);
        generated.into_draft(age_range, min_age, max_age)
    })
}

/// Parse an adapted activity, keeping the original's play-mode targeting.
fn parse_adapted_draft(
    text: &str,
    original: &Activity,
    new_age: u32,
) -> Result<ActivityDraft, AppError> {
    let json = extract_json(text, '{', '}')
        .ok_or_else(|| AppError::Generation("Reply contained no JSON object".to_string()))?;

    let generated: GeneratedActivity = serde_json::from_str(json)
        .map_err(|e| AppError::Generation(format!("Malformed adapted activity: {}", e)))?;

    let (age_range, min_age, max_age) = age_window(new_age);
    let mut draft = generated.into_draft(age_range, min_age, max_age);
    draft.energy_level = original.energy_level;
    draft.location = original.location;
    draft.who_playing = original.who_playing;
    draft.development_stage = original.development_stage;

    draft
        .validate()
        .map_err(|e| AppError::Generation(format!("Adapted activity is invalid: {}", e)))?;

    Ok(draft)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EnergyLevel, Location, WhoPlaying};

    fn combo() -> FilterCombination {
        FilterCombination {
            energy_level: EnergyLevel::Focused,
            location: Location::Indoor,
            who_playing: WhoPlaying::Together,
            age_range: "6-7".to_string(),
            min_age: 6,
            max_age: 7,
            activity_count: 0,
        }
    }

    const GOOD: &str = r#"{
        "title": "Button Sorting",
        "materials": [{"emoji": "🔘", "name": "Buttons"}],
        "steps": ["Pour out buttons", "Sort by color"],
        "whyGreat": "Builds classification skills",
        "duration": "15 min",
        "energyLevel": "silly",
        "location": "outdoor",
        "messLevel": "nomess"
    }"#;

    #[test]
    fn test_extract_json_skips_prose() {
        let text = "Here you go:\n```json\n[1, 2]\n```\nEnjoy!";
        assert_eq!(extract_json(text, '[', ']'), Some("[1, 2]"));
        assert_eq!(extract_json("no json here", '[', ']'), None);
        assert_eq!(extract_json("] backwards [", '[', ']'), None);
    }

    #[test]
    fn test_generated_drafts_take_requested_targeting() {
        let text = format!("Sure! [{GOOD}]");
        let drafts = parse_generated_drafts(&text, &combo()).unwrap();

        assert_eq!(drafts.len(), 1);
        let d = &drafts[0];
        assert_eq!(d.title, "Button Sorting");
        assert_eq!(d.energy_level, Some(EnergyLevel::Focused));
        assert_eq!(d.location, Some(Location::Indoor));
        assert_eq!(d.who_playing, Some(WhoPlaying::Together));
        assert_eq!(d.age_range, "6-7");
        assert_eq!((d.min_age, d.max_age), (Some(6), Some(7)));
        assert_eq!(d.mess_level, Some(MessLevel::NoMess));
    }

    #[test]
    fn test_invalid_drafts_are_dropped() {
        let no_steps = r#"{"title": "Empty", "materials": [{"emoji": "x", "name": "y"}],
            "whyGreat": "w", "duration": "5 min"}"#;
        let no_title = r#"{"steps": ["a"]}"#;
        let text = format!("[{GOOD}, {no_steps}, {no_title}]");

        let drafts = parse_generated_drafts(&text, &combo()).unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].title, "Button Sorting");
    }

    #[test]
    fn test_empty_array_is_not_an_error() {
        assert!(parse_generated_drafts("[]", &combo()).unwrap().is_empty());
    }

    #[test]
    fn test_unparseable_reply_is_generation_error() {
        assert!(matches!(
            parse_generated_drafts("I cannot help with that.", &combo()),
            Err(AppError::Generation(_))
        ));
        assert!(matches!(
            parse_generated_drafts("[not json]", &combo()),
            Err(AppError::Generation(_))
        ));
    }

    #[test]
    fn test_adapted_draft_keeps_original_targeting() {
        let original: Activity = serde_json::from_str(
            r#"{
                "id": "a1", "title": "Sock Puppets", "materials": [], "steps": ["Make"],
                "whyGreat": "Fun", "ageRange": "3-4", "duration": "20 min",
                "energyLevel": "calm", "location": "indoor", "whoPlaying": "alone"
            }"#,
        )
        .unwrap();

        let draft = parse_adapted_draft(&format!("Adapted: {GOOD}"), &original, 7).unwrap();
        assert_eq!(draft.age_range, "7-8");
        assert_eq!((draft.min_age, draft.max_age), (Some(7), Some(8)));
        assert_eq!(draft.energy_level, Some(EnergyLevel::Calm));
        assert_eq!(draft.who_playing, Some(WhoPlaying::Alone));
    }

    #[test]
    fn test_adapting_to_oldest_age_stays_valid() {
        let original: Activity = serde_json::from_str(
            r#"{
                "id": "a1", "title": "Sock Puppets", "materials": [], "steps": ["Make"],
                "whyGreat": "Fun", "ageRange": "3-4", "duration": "20 min"
            }"#,
        )
        .unwrap();

        let draft = parse_adapted_draft(GOOD, &original, MAX_CHILD_AGE).unwrap();
        assert_eq!(draft.age_range, "17-18");
        assert_eq!((draft.min_age, draft.max_age), (Some(17), Some(18)));

        let draft = parse_adapted_draft(GOOD, &original, 17).unwrap();
        assert_eq!((draft.min_age, draft.max_age), (Some(17), Some(18)));
    }

    #[test]
    fn test_age_window() {
        assert_eq!(age_window(0), ("0-1".to_string(), 0, 1));
        assert_eq!(age_window(5), ("5-6".to_string(), 5, 6));
        assert_eq!(age_window(18), ("17-18".to_string(), 17, 18));
    }

    #[test]
    fn test_idea_drafts_keep_model_energy_level() {
        let calm = r#"{"title": "Cloud Watching", "materials": [{"emoji": "☁️", "name": "Blanket"}],
            "steps": ["Lie down", "Name the shapes"], "whyGreat": "Imagination",
            "duration": "15 min", "energyLevel": "Calm"}"#;
        let vague = r#"{"title": "Dance Party", "materials": [{"emoji": "🎵", "name": "Music"}],
            "steps": ["Play music", "Dance"], "whyGreat": "Movement",
            "duration": "10 min", "energyLevel": "active|silly"}"#;
        let text = format!("[{calm}, {vague}]");

        let drafts = parse_idea_drafts(&text, 6).unwrap();
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].energy_level, Some(EnergyLevel::Calm));
        assert_eq!(drafts[1].energy_level, None);
        assert_eq!(drafts[0].age_range, "6-7");
        assert_eq!(drafts[0].location, None);
    }

    #[test]
    fn test_messages_response_text() {
        let response: MessagesResponse = serde_json::from_str(
            r#"{"content": [
                {"type": "text", "text": "Hello "},
                {"type": "tool_use", "id": "x"},
                {"type": "text", "text": "world"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(response.text(), "Hello world");
    }

    #[tokio::test]
    async fn test_unconfigured_client_is_unavailable() {
        let service = GeneratorService::new(None, DEFAULT_MODEL.to_string());
        assert!(!service.is_configured());
        let err = service.generate_for_combination(&combo(), 2).await.unwrap_err();
        assert!(matches!(err, AppError::GenerationUnavailable));
    }

    #[tokio::test]
    async fn test_zero_count_skips_the_call() {
        let service = GeneratorService::new(None, DEFAULT_MODEL.to_string());
        assert!(service
            .generate_for_combination(&combo(), 0)
            .await
            .unwrap()
            .is_empty());
    }
}
