//! Typed AI operations with deterministic fallbacks.
//!
//! Operations whose result is an enhancement (indexing, summaries, link and
//! assignee suggestions, health reports) never fail: a collaborator error is
//! logged and replaced by a fixed fallback. Operations whose result *is* the
//! response (Q&A, task generation, cost estimates, search, safety analysis)
//! return the error to the caller.

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use groundwork_core::daily_log::{NO_LOGS_SUMMARY, SUMMARY_FAILED};
use groundwork_core::document::{fallback_index_content, DocumentCategory};
use groundwork_core::health::{HealthReport, ProjectMetrics};
use groundwork_core::safety::{NO_AI_SUMMARY, NO_INCIDENTS_REPORT};
use groundwork_core::todo::TodoPriority;
use groundwork_core::types::{DbId, Timestamp};
use groundwork_db::models::daily_log::DailyLog;
use groundwork_db::models::document::DocumentRecord;
use groundwork_db::models::safety::SafetyIncident;
use groundwork_db::models::user::User;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::AssistError;
use crate::generator::{Prompt, TextGenerator};
use crate::prompts;

/// Most link suggestions returned for one document.
pub const MAX_LINK_SUGGESTIONS: usize = 3;

/// Search answer used when no document is searchable.
pub const NO_SEARCH_RESULTS: &str = "No relevant documents were found for your search.";

static FIRST_INTEGER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// A to-do proposed for a goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskSuggestion {
    pub text: String,
    pub priority: TodoPriority,
}

/// One line of a cost breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEstimateItem {
    pub category: String,
    pub item: String,
    pub quantity: String,
    #[serde(alias = "unitCost")]
    pub unit_cost: f64,
    #[serde(alias = "totalCost")]
    pub total_cost: f64,
    #[serde(default)]
    pub justification: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSource {
    #[serde(alias = "documentId")]
    pub document_id: DbId,
    #[serde(default)]
    pub snippet: String,
}

/// Answer synthesised across a set of documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchAnswer {
    pub summary: String,
    #[serde(default)]
    pub sources: Vec<SearchSource>,
}

impl SearchAnswer {
    pub fn no_results() -> Self {
        Self {
            summary: NO_SEARCH_RESULTS.to_string(),
            sources: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeneratedTasks {
    #[serde(default)]
    tasks: Vec<GeneratedTask>,
}

#[derive(Debug, Deserialize)]
struct GeneratedTask {
    #[serde(default)]
    text: String,
    priority: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LinkSuggestions {
    #[serde(default)]
    suggested_ids: Vec<DbId>,
}

// ---------------------------------------------------------------------------
// Assistant
// ---------------------------------------------------------------------------

/// Facade over a [`TextGenerator`].
#[derive(Clone)]
pub struct Assistant {
    generator: Arc<dyn TextGenerator>,
}

impl Assistant {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    async fn text(&self, prompt: Prompt) -> Result<String, AssistError> {
        let text = self.generator.generate(&prompt).await?;
        let text = text.trim();
        if text.is_empty() {
            return Err(AssistError::EmptyResponse);
        }
        Ok(text.to_string())
    }

    async fn structured<T: DeserializeOwned>(&self, prompt: Prompt) -> Result<T, AssistError> {
        let raw = self.text(prompt).await?;
        Ok(serde_json::from_str(strip_code_fence(&raw))?)
    }

    // ---- documents ----

    /// Search-index summary for a freshly approved upload.
    pub async fn index_document(&self, name: &str, category: DocumentCategory) -> String {
        match self.text(prompts::index_document(name, category)).await {
            Ok(summary) => summary,
            Err(e) => {
                tracing::warn!(error = %e, document = name, "Content indexing failed, using fallback");
                fallback_index_content(name, category)
            }
        }
    }

    pub async fn ask_about_document(
        &self,
        indexed_content: &str,
        question: &str,
    ) -> Result<String, AssistError> {
        self.text(prompts::ask_about_document(indexed_content, question)).await
    }

    /// Up to [`MAX_LINK_SUGGESTIONS`] candidate ids. Ids outside the
    /// candidate set are dropped; failures yield an empty list.
    pub async fn suggest_links(
        &self,
        source: &DocumentRecord,
        candidates: &[DocumentRecord],
    ) -> Vec<DbId> {
        if candidates.is_empty() {
            return Vec::new();
        }
        let prompt = prompts::link_suggestions(source, candidates);
        match self.structured::<LinkSuggestions>(prompt).await {
            Ok(result) => {
                let allowed: HashSet<DbId> = candidates.iter().map(|d| d.id).collect();
                let mut seen = HashSet::new();
                result
                    .suggested_ids
                    .into_iter()
                    .filter(|id| allowed.contains(id) && seen.insert(*id))
                    .take(MAX_LINK_SUGGESTIONS)
                    .collect()
            }
            Err(e) => {
                tracing::warn!(error = %e, document_id = source.id, "Link suggestion failed");
                Vec::new()
            }
        }
    }

    /// Answer a question across documents. With nothing to search the fixed
    /// "no results" answer is returned without calling the generator.
    pub async fn search_documents(
        &self,
        query: &str,
        documents: &[DocumentRecord],
    ) -> Result<SearchAnswer, AssistError> {
        if documents.is_empty() {
            return Ok(SearchAnswer::no_results());
        }
        let mut answer: SearchAnswer = self
            .structured(prompts::cross_document_search(query, documents))
            .await?;
        let known: HashSet<DbId> = documents.iter().map(|d| d.id).collect();
        answer.sources.retain(|s| known.contains(&s.document_id));
        Ok(answer)
    }

    // ---- planning ----

    /// Break a goal into to-dos. Unknown or missing priorities become Medium.
    pub async fn generate_tasks(&self, goal: &str) -> Result<Vec<TaskSuggestion>, AssistError> {
        let generated: GeneratedTasks = self.structured(prompts::generate_tasks(goal)).await?;
        Ok(generated
            .tasks
            .into_iter()
            .filter(|t| !t.text.trim().is_empty())
            .map(|t| TaskSuggestion {
                text: t.text.trim().to_string(),
                priority: t
                    .priority
                    .as_deref()
                    .and_then(TodoPriority::parse_loose)
                    .unwrap_or_default(),
            })
            .collect())
    }

    pub async fn estimate_costs(
        &self,
        project_name: &str,
        scope: &str,
    ) -> Result<Vec<CostEstimateItem>, AssistError> {
        self.structured(prompts::estimate_costs(project_name, scope)).await
    }

    pub async fn health_report(
        &self,
        project_name: &str,
        started: Timestamp,
        metrics: &ProjectMetrics,
    ) -> HealthReport {
        match self
            .structured::<HealthReport>(prompts::health_report(project_name, started, metrics))
            .await
        {
            Ok(report) => report.normalized(),
            Err(e) => {
                tracing::warn!(error = %e, project = project_name, "Health report failed, using fallback");
                HealthReport::fallback()
            }
        }
    }

    // ---- field records ----

    pub async fn summarize_incident(&self, description: &str) -> String {
        match self.text(prompts::incident_summary(description)).await {
            Ok(summary) => summary,
            Err(e) => {
                tracing::warn!(error = %e, "Incident summary failed");
                NO_AI_SUMMARY.to_string()
            }
        }
    }

    pub async fn safety_analysis(&self, incidents: &[SafetyIncident]) -> Result<String, AssistError> {
        if incidents.is_empty() {
            return Ok(NO_INCIDENTS_REPORT.to_string());
        }
        self.text(prompts::safety_analysis(incidents)).await
    }

    pub async fn summarize_daily_logs(&self, logs: &[DailyLog]) -> String {
        if logs.is_empty() {
            return NO_LOGS_SUMMARY.to_string();
        }
        match self.text(prompts::daily_log_summary(logs)).await {
            Ok(summary) => summary,
            Err(e) => {
                tracing::warn!(error = %e, "Daily log summary failed");
                SUMMARY_FAILED.to_string()
            }
        }
    }

    /// The team member best placed to answer, if the reply names one.
    pub async fn suggest_rfi_assignee(&self, question: &str, team: &[User]) -> Option<DbId> {
        if team.is_empty() {
            return None;
        }
        let reply = match self.text(prompts::rfi_assignee(question, team)).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(error = %e, "RFI assignee suggestion failed");
                return None;
            }
        };
        parse_member_id(&reply, team)
    }
}

/// First integer in `reply`, accepted only if it names a team member.
fn parse_member_id(reply: &str, team: &[User]) -> Option<DbId> {
    let id: DbId = FIRST_INTEGER_RE.find(reply)?.as_str().parse().ok()?;
    team.iter().any(|u| u.id == id).then_some(id)
}

/// Remove a surrounding Markdown code fence, if any.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.strip_prefix("json").unwrap_or(rest);
    body.strip_suffix("```").unwrap_or(body).trim()
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use chrono::Utc;
    use groundwork_core::document::DocumentStatus;
    use groundwork_core::roles::Role;

    use super::*;
    use crate::generator::OfflineGenerator;

    /// Replies with a fixed text and records the prompts it saw.
    struct Canned {
        reply: String,
        seen: Mutex<Vec<Prompt>>,
    }

    impl Canned {
        fn assistant(reply: &str) -> (Assistant, Arc<Canned>) {
            let canned = Arc::new(Canned {
                reply: reply.to_string(),
                seen: Mutex::new(Vec::new()),
            });
            (Assistant::new(canned.clone()), canned)
        }

        fn calls(&self) -> usize {
            self.seen.lock().map(|s| s.len()).unwrap_or(0)
        }
    }

    #[async_trait]
    impl TextGenerator for Canned {
        async fn generate(&self, prompt: &Prompt) -> Result<String, AssistError> {
            if let Ok(mut seen) = self.seen.lock() {
                seen.push(prompt.clone());
            }
            Ok(self.reply.clone())
        }
    }

    fn offline() -> Assistant {
        Assistant::new(Arc::new(OfflineGenerator))
    }

    fn doc(id: DbId, name: &str) -> DocumentRecord {
        DocumentRecord {
            id,
            name: name.into(),
            url: "#".into(),
            project_id: 1,
            status: DocumentStatus::Approved,
            uploaded_at: Utc::now(),
            category: DocumentCategory::General,
            indexed_content: format!("Content of {name}"),
            version: 1,
            document_group_id: id,
            creator_id: 2,
        }
    }

    fn member(id: DbId) -> User {
        User {
            id,
            name: format!("User {id}"),
            email: format!("u{id}@example.com"),
            role: Role::Foreman,
            company_id: 1,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn code_fences_are_stripped() {
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("  {\"a\":1} "), "{\"a\":1}");
    }

    #[test]
    fn member_id_must_belong_to_team() {
        let team = vec![member(2), member(7)];
        assert_eq!(parse_member_id("7", &team), Some(7));
        assert_eq!(parse_member_id("User ID: 2.", &team), Some(2));
        assert_eq!(parse_member_id("99", &team), None);
        assert_eq!(parse_member_id("nobody", &team), None);
    }

    #[tokio::test]
    async fn offline_enhancements_fall_back() {
        let assistant = offline();
        assert_eq!(
            assistant.index_document("Plan.pdf", DocumentCategory::Blueprint).await,
            "Content indexing for Plan.pdf. Category: Blueprint / Drawing."
        );
        assert_eq!(assistant.summarize_incident("Slip").await, NO_AI_SUMMARY);
        assert_eq!(assistant.health_report("Tower", Utc::now(), &ProjectMetrics::default()).await.score, 50);
        assert!(assistant.suggest_links(&doc(1, "a"), &[doc(2, "b")]).await.is_empty());
        assert_eq!(assistant.suggest_rfi_assignee("Who?", &[member(2)]).await, None);
    }

    #[tokio::test]
    async fn offline_primary_operations_fail() {
        let assistant = offline();
        assert_matches!(
            assistant.ask_about_document("text", "why?").await,
            Err(AssistError::Unavailable)
        );
        assert_matches!(assistant.generate_tasks("Pour slab").await, Err(AssistError::Unavailable));
    }

    #[tokio::test]
    async fn empty_inputs_skip_the_generator() {
        let (assistant, canned) = Canned::assistant("unused");
        assert_eq!(assistant.safety_analysis(&[]).await.unwrap(), NO_INCIDENTS_REPORT);
        assert_eq!(assistant.summarize_daily_logs(&[]).await, NO_LOGS_SUMMARY);
        assert_eq!(
            assistant.search_documents("rebar", &[]).await.unwrap(),
            SearchAnswer::no_results()
        );
        assert!(assistant.suggest_links(&doc(1, "a"), &[]).await.is_empty());
        assert_eq!(canned.calls(), 0);
    }

    #[tokio::test]
    async fn generated_tasks_default_to_medium() {
        let (assistant, _) = Canned::assistant(
            r#"{"tasks":[{"text":"Book pump","priority":"High"},{"text":"Order forms"},{"text":"  "}]}"#,
        );
        let tasks = assistant.generate_tasks("Pour slab").await.unwrap();
        assert_eq!(
            tasks,
            vec![
                TaskSuggestion { text: "Book pump".into(), priority: TodoPriority::High },
                TaskSuggestion { text: "Order forms".into(), priority: TodoPriority::Medium },
            ]
        );
    }

    #[tokio::test]
    async fn link_suggestions_are_filtered_and_capped() {
        let (assistant, _) = Canned::assistant(r#"{"suggested_ids":[9,2,2,3,4,5]}"#);
        let candidates = [doc(2, "b"), doc(3, "c"), doc(4, "d"), doc(5, "e")];
        let ids = assistant.suggest_links(&doc(1, "a"), &candidates).await;
        assert_eq!(ids, vec![2, 3, 4]);
    }

    #[tokio::test]
    async fn search_drops_unknown_sources() {
        let (assistant, _) = Canned::assistant(
            r#"{"summary":"Use 5/8 rebar.","sources":[{"documentId":2,"snippet":"5/8"},{"documentId":40,"snippet":"?"}]}"#,
        );
        let answer = assistant.search_documents("rebar?", &[doc(2, "b")]).await.unwrap();
        assert_eq!(answer.summary, "Use 5/8 rebar.");
        assert_eq!(answer.sources.len(), 1);
        assert_eq!(answer.sources[0].document_id, 2);
    }

    #[tokio::test]
    async fn malformed_cost_estimate_is_an_error() {
        let (assistant, _) = Canned::assistant("not json");
        assert_matches!(
            assistant.estimate_costs("Tower", "Slab").await,
            Err(AssistError::Malformed(_))
        );
    }

    #[tokio::test]
    async fn health_score_is_clamped() {
        let (assistant, _) = Canned::assistant(r#"{"score":130,"summary":"Great."}"#);
        let report = assistant.health_report("Tower", Utc::now(), &ProjectMetrics::default()).await;
        assert_eq!(report.score, 100);
        assert!(report.risks.is_empty());
    }
}
