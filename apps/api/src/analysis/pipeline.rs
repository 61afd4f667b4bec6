//! Analysis Pipeline: one questionnaire in, one stored analysis out.
//!
//! Flow: normalize form → select template variant → render prompt →
//!       LLM generate → store record under the session id → return text.
//!
//! Exactly one upstream call per run. Nothing is stored when it fails, so a
//! poller for that id keeps seeing "processing".

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};

use crate::analysis::form::{FormData, NormalizedForm};
use crate::analysis::prompts::{
    section_text, ANALYSIS_PROMPT_TEMPLATE, ANALYSIS_SYSTEM, DREAM_JOB_LINE,
    NO_PATH_PREFERENCE, PATH_PREFERENCE_LINE,
};
use crate::analysis::session::SessionId;
use crate::analysis::store::{AnalysisRecord, ResultStore};
use crate::analysis::template::{select_variant, TemplateVariant};
use crate::llm_client::prompts::{DU_FORM_INSTRUCTION, GENDER_FORM_INSTRUCTION};
use crate::llm_client::{GenerationRequest, LlmError, TextGenerator};

pub const ANALYSIS_TEMPERATURE: f32 = 0.7;

/// Model parameters for the main analysis call.
#[derive(Debug, Clone)]
pub struct AnalysisSettings {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Cheap to clone; the detached checkout task takes its own copy.
#[derive(Clone)]
pub struct AnalysisPipeline {
    llm: Arc<dyn TextGenerator>,
    store: Arc<dyn ResultStore>,
    settings: AnalysisSettings,
}

impl AnalysisPipeline {
    pub fn new(
        llm: Arc<dyn TextGenerator>,
        store: Arc<dyn ResultStore>,
        settings: AnalysisSettings,
    ) -> Self {
        Self {
            llm,
            store,
            settings,
        }
    }

    /// Runs the analysis for `session_id` and records it on success.
    pub async fn run(&self, form: FormData, session_id: SessionId) -> Result<String, LlmError> {
        info!("Starting analysis for session {session_id}");

        let variant = select_variant(&form);
        let prompt = render_prompt(&form.normalize(), &variant);
        info!(
            "Session {session_id}: template variant '{}' ({:?}, {} sections)",
            variant.category.as_str(),
            variant.focus,
            variant.sections.len()
        );

        let request = GenerationRequest {
            model: self.settings.model.clone(),
            system: ANALYSIS_SYSTEM.to_string(),
            user: prompt,
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };

        let analysis = match self.llm.generate(request).await {
            Ok(text) => text,
            Err(e) => {
                error!("Analysis generation failed for session {session_id}: {e}");
                return Err(e);
            }
        };

        self.store.put(
            session_id.clone(),
            AnalysisRecord {
                analysis: analysis.clone(),
                timestamp: Utc::now(),
                form_data: form,
            },
        );

        info!("Analysis complete for session {session_id}");
        Ok(analysis)
    }
}

/// Fills the analysis template for one questionnaire and its selected variant.
pub fn render_prompt(form: &NormalizedForm, variant: &TemplateVariant) -> String {
    let sections = variant
        .sections
        .iter()
        .enumerate()
        .map(|(i, &section)| {
            let (heading, body) = section_text(section);
            let body = body.replace("{route_question}", variant.route_question);
            format!("{}. **{heading}**\n{body}", i + 1)
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    let links = variant
        .link_templates
        .iter()
        .map(|link| format!("- {link}"))
        .collect::<Vec<_>>()
        .join("\n");

    let mut legacy_answers = String::new();
    // Any legacy answer brings the preference line with it.
    if form.path_preference.is_some() || form.dream_job.is_some() {
        let pref = form.path_preference.as_deref().unwrap_or(NO_PATH_PREFERENCE);
        legacy_answers.push_str(&fill_placeholders(PATH_PREFERENCE_LINE, &[("value", pref)]));
        legacy_answers.push('\n');
    }
    if let Some(dream) = &form.dream_job {
        legacy_answers.push_str(&fill_placeholders(DREAM_JOB_LINE, &[("value", dream)]));
        legacy_answers.push('\n');
    }

    fill_placeholders(
        ANALYSIS_PROMPT_TEMPLATE,
        &[
            ("du_instruction", DU_FORM_INSTRUCTION),
            ("gender_instruction", GENDER_FORM_INSTRUCTION),
            ("path_guidance", variant.guidance),
            ("sections", &sections),
            ("links", &links),
            ("legacy_answers", &legacy_answers),
            ("age", &form.age),
            ("situation", &form.situation),
            ("flow_activity", &form.flow_activity),
            ("anti_job", &form.anti_job),
            ("interests", &form.interests),
            ("strengths", &form.strengths),
            ("work_style", &form.work_style),
            ("work_type", &form.work_type),
            ("energy", &form.energy),
            ("priority", &form.priority),
            ("risk", &form.risk),
            ("routine", &form.routine),
            ("education", &form.education),
            ("location", &form.location),
        ],
    )
}

/// Single pass over `template`: each `{key}` with a value is substituted,
/// anything else is copied through. Inserted values are never rescanned.
fn fill_placeholders(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let hit = after.find('}').and_then(|end| {
            let key = &after[..end];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, value)| (*value, end))
        });
        match hit {
            Some((value, end)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::analysis::store::InMemoryResultStore;

    /// Records every request and answers from a fixed script.
    struct ScriptedGenerator {
        reply: Result<String, u16>,
        seen: Mutex<Vec<GenerationRequest>>,
    }

    impl ScriptedGenerator {
        fn ok(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                seen: Mutex::new(vec![]),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                reply: Err(status),
                seen: Mutex::new(vec![]),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, request: GenerationRequest) -> Result<String, LlmError> {
            self.seen.lock().unwrap().push(request);
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(LlmError::Api {
                    status: *status,
                    message: "upstream unavailable".to_string(),
                }),
            }
        }
    }

    fn settings() -> AnalysisSettings {
        AnalysisSettings {
            model: "gpt-4o".to_string(),
            max_tokens: 4000,
            temperature: ANALYSIS_TEMPERATURE,
        }
    }

    fn sample_form() -> FormData {
        serde_json::from_value(json!({
            "age": "17",
            "education": "abitur",
            "situation": "abitur",
            "interests": ["Technik", "IT"],
            "strengths": "Logisches Denken",
            "location": "Berlin",
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_run_stores_record_and_returns_text() {
        let llm = Arc::new(ScriptedGenerator::ok("<h3>Dein Profil</h3>"));
        let store = Arc::new(InMemoryResultStore::default());
        let pipeline = AnalysisPipeline::new(llm.clone(), store.clone(), settings());
        let id = SessionId::new("cs_test_42");

        let text = pipeline.run(sample_form(), id.clone()).await.unwrap();

        assert_eq!(text, "<h3>Dein Profil</h3>");
        let record = store.get(&id).unwrap();
        assert_eq!(record.analysis, text);
        assert_eq!(record.form_data, sample_form());

        let seen = llm.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].system, ANALYSIS_SYSTEM);
        assert_eq!(seen[0].max_tokens, 4000);
        assert!((seen[0].temperature - 0.7).abs() < f32::EPSILON);
        assert!(seen[0].user.contains("- Interessen: Technik, IT"));
    }

    #[tokio::test]
    async fn test_failed_generation_writes_nothing() {
        let llm = Arc::new(ScriptedGenerator::failing(503));
        let store = Arc::new(InMemoryResultStore::default());
        let pipeline = AnalysisPipeline::new(llm.clone(), store.clone(), settings());
        let id = SessionId::new("cs_test_fail");

        let result = pipeline.run(sample_form(), id.clone()).await;

        assert!(matches!(result, Err(LlmError::Api { status: 503, .. })));
        assert!(store.get(&id).is_none());
        assert_eq!(store.len(), 0);
        assert_eq!(llm.seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_render_prompt_numbers_sections_in_order() {
        let form = sample_form();
        let prompt = render_prompt(&form.normalize(), &select_variant(&form));

        let profile = prompt.find("1. **DEIN PROFIL**").unwrap();
        let careers = prompt.find("2. **DEINE TOP 3 KARRIEREWEGE**").unwrap();
        let unis = prompt.find("3. **UNI/HOCHSCHUL-EMPFEHLUNGEN**").unwrap();
        assert!(profile < careers && careers < unis);
        assert!(!prompt.contains("{route_question}"));
        assert!(prompt.contains("- Wohnort: Berlin"));
        assert!(prompt.contains("{beruf}"), "link templates keep their own slot");
    }

    #[test]
    fn test_render_prompt_for_fachabitur_has_no_university_language() {
        let form: FormData = serde_json::from_value(json!({
            "education": "fachabitur",
            "situation": "student",
        }))
        .unwrap();
        let prompt = render_prompt(&form.normalize(), &select_variant(&form));

        assert!(prompt.contains("FACHHOCHSCHUL-EMPFEHLUNGEN"));
        assert!(!prompt.contains("UNI/HOCHSCHUL-EMPFEHLUNGEN"));
        assert!(!prompt.contains("Universität"));
    }

    #[test]
    fn test_render_prompt_includes_legacy_answers_only_when_present() {
        let without = render_prompt(&sample_form().normalize(), &select_variant(&sample_form()));
        assert!(!without.contains("Traumjob-Beschreibung"));

        let form: FormData = serde_json::from_value(json!({
            "dream_job": "Spieleentwickler",
            "path_preference": "Ausbildung",
        }))
        .unwrap();
        let with = render_prompt(&form.normalize(), &select_variant(&form));
        assert!(with.contains("- Traumjob-Beschreibung: Spieleentwickler"));
        assert!(with.contains("- Studium/Ausbildung Präferenz: Ausbildung"));
    }

    #[test]
    fn test_preference_line_defaults_when_only_dream_job_given() {
        let form: FormData = serde_json::from_value(json!({
            "dream_job": "Tierärztin",
        }))
        .unwrap();
        let prompt = render_prompt(&form.normalize(), &select_variant(&form));
        assert!(prompt.contains("- Studium/Ausbildung Präferenz: Keine Präferenz"));
        assert!(prompt.contains("- Traumjob-Beschreibung: Tierärztin"));
    }

    #[test]
    fn test_user_answers_are_not_expanded_as_placeholders() {
        let form: FormData = serde_json::from_value(json!({
            "age": "17",
            "location": "Berlin",
            "strengths": "{location}",
            "interests": ["{sections}", "{education}"],
            "dream_job": "{age}",
        }))
        .unwrap();
        let prompt = render_prompt(&form.normalize(), &select_variant(&form));

        assert!(prompt.contains("- Stärken: {location}"));
        assert!(prompt.contains("- Interessen: {sections}, {education}"));
        assert!(prompt.contains("- Traumjob-Beschreibung: {age}"));
        assert!(prompt.contains("- Wohnort: Berlin"));
    }

    #[test]
    fn test_fill_placeholders_leaves_unknown_and_unclosed_braces() {
        let filled = fill_placeholders(
            "{a} {beruf} {a {b}",
            &[("a", "x"), ("b", "{a}")],
        );
        assert_eq!(filled, "x {beruf} {a {a}");
    }
}
