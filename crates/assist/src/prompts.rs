//! Prompt builders and response schemas.
//!
//! Every builder is pure: it renders domain data into a [`Prompt`]. Schemas
//! use the provider's OpenAPI-subset type names (`OBJECT`, `ARRAY`, ...).

use groundwork_core::document::DocumentCategory;
use groundwork_core::health::{ProjectMetrics, RECENT_ACTIVITY_DAYS};
use groundwork_core::types::Timestamp;
use groundwork_db::models::daily_log::DailyLog;
use groundwork_db::models::document::DocumentRecord;
use groundwork_db::models::safety::SafetyIncident;
use groundwork_db::models::user::User;
use serde_json::json;

use crate::generator::Prompt;

/// Phrase the document Q&A must use when the content has no answer.
pub const ANSWER_NOT_FOUND: &str = "The answer to your question cannot be found in this document.";

/// Characters of indexed content shown per link candidate.
const CANDIDATE_EXCERPT_CHARS: usize = 200;

fn date(ts: Timestamp) -> String {
    ts.format("%Y-%m-%d").to_string()
}

fn excerpt(content: &str, max_chars: usize) -> String {
    if content.chars().count() <= max_chars {
        return content.to_string();
    }
    let cut: String = content.chars().take(max_chars).collect();
    format!("{cut}...")
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

pub fn index_document(name: &str, category: DocumentCategory) -> Prompt {
    Prompt::text(format!(
        "Based on the document title \"{name}\" and its category \"{}\", generate a concise, \
         2-3 sentence summary of its likely contents for a search index within a construction \
         project management app. Focus on keywords relevant to construction.",
        category.label()
    ))
}

pub fn ask_about_document(indexed_content: &str, question: &str) -> Prompt {
    Prompt::text(question).with_system(format!(
        "You are a helpful assistant for a construction project management app. Your task is to \
         answer questions based ONLY on the provided document content. If the answer cannot be \
         found in the content, you MUST state \"{ANSWER_NOT_FOUND}\" Do not use any external \
         knowledge. Be concise.\n\nDOCUMENT CONTENT:\n---\n{indexed_content}\n---\n"
    ))
}

pub fn link_suggestions(source: &DocumentRecord, candidates: &[DocumentRecord]) -> Prompt {
    let listed: Vec<serde_json::Value> = candidates
        .iter()
        .map(|d| {
            json!({
                "id": d.id,
                "title": d.name,
                "category": d.category.label(),
                "content": excerpt(&d.indexed_content, CANDIDATE_EXCERPT_CHARS),
            })
        })
        .collect();
    let listed = serde_json::to_string_pretty(&listed).unwrap_or_default();

    Prompt::json(
        format!(
            "You are a document analysis expert for a construction management system.\n\
             Your task is to find relevant documents to link together.\n\n\
             Here is the source document:\n\
             - Title: \"{}\"\n- Category: \"{}\"\n- Content Summary: \"{}\"\n\n\
             Here is a list of other available documents on the project:\n{listed}\n\n\
             Based on content, title, and category similarity, identify up to 3 of the most \
             relevant documents from the list to link to the source document.\n\
             Prioritize documents that are complementary (e.g., a Safety Manual and a related \
             Risk Assessment) or directly related (e.g., a blueprint and a structural \
             calculation document).\n\nReturn your response as a JSON object.",
            source.name,
            source.category.label(),
            source.indexed_content,
        ),
        json!({
            "type": "OBJECT",
            "properties": {
                "suggested_ids": {
                    "type": "ARRAY",
                    "description": "An array of numeric document IDs that are most relevant.",
                    "items": { "type": "INTEGER" }
                }
            }
        }),
    )
}

pub fn cross_document_search(query: &str, documents: &[DocumentRecord]) -> Prompt {
    let context = documents
        .iter()
        .map(|d| {
            format!(
                "---\nDocument ID: {}\nDocument Name: \"{}\"\nContent: {}\n---",
                d.id, d.name, d.indexed_content
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    Prompt::json(
        format!(
            "You are a helpful AI assistant for a construction management platform.\n\
             Your task is to answer the user's question based *only* on the content of the \
             documents provided below.\nSynthesize a single, direct answer to the question.\n\
             Then, identify the source documents that support your answer, providing the \
             document ID and a relevant, concise quote or snippet from each.\n\n\
             User's Question: \"{query}\"\n\nDocuments:\n{context}"
        ),
        json!({
            "type": "OBJECT",
            "properties": {
                "summary": {
                    "type": "STRING",
                    "description": "A synthesized, direct answer to the user's question based on the documents."
                },
                "sources": {
                    "type": "ARRAY",
                    "description": "A list of source documents that contributed to the summary.",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "documentId": { "type": "INTEGER", "description": "The ID of the source document." },
                            "snippet": { "type": "STRING", "description": "A relevant quote or snippet from the document content that supports the answer." }
                        }
                    }
                }
            }
        }),
    )
}

// ---------------------------------------------------------------------------
// Planning
// ---------------------------------------------------------------------------

pub fn generate_tasks(goal: &str) -> Prompt {
    Prompt::json(
        format!(
            "The high-level goal for this phase of a construction project is: \"{goal}\". \
             Break this down into a list of actionable tasks."
        ),
        json!({
            "type": "OBJECT",
            "properties": {
                "tasks": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "text": { "type": "STRING" },
                            "priority": { "type": "STRING", "enum": ["Low", "Medium", "High"] }
                        }
                    }
                }
            }
        }),
    )
}

pub fn estimate_costs(project_name: &str, scope: &str) -> Prompt {
    Prompt::json(
        format!(
            "As a construction cost estimator, analyze the provided scope of work for the \
             project \"{project_name}\" and generate a detailed cost breakdown. Provide realistic \
             but simulated costs.\n\nScope of Work:\n---\n{scope}\n---\n\n\
             Return the breakdown as a JSON array."
        ),
        json!({
            "type": "ARRAY",
            "items": {
                "type": "OBJECT",
                "properties": {
                    "category": { "type": "STRING", "enum": ["Materials", "Labor", "Equipment", "Permits", "Other"] },
                    "item": { "type": "STRING", "description": "Specific item or task, e.g., 'Concrete 3000 PSI' or 'Electrician'." },
                    "quantity": { "type": "STRING", "description": "Amount and unit, e.g., '150 cubic yards' or '80 hours'." },
                    "unitCost": { "type": "NUMBER", "description": "Cost per unit, e.g., cost per cubic yard or per hour." },
                    "totalCost": { "type": "NUMBER", "description": "Total estimated cost for this line item." },
                    "justification": { "type": "STRING", "description": "Brief reason for this cost item." }
                }
            }
        }),
    )
}

pub fn health_report(project_name: &str, started: Timestamp, m: &ProjectMetrics) -> Prompt {
    Prompt::json(
        format!(
            "Analyze the health of the construction project \"{project_name}\".\n\n\
             Data provided:\n\
             - Start Date: {}\n\
             - Total Tasks: {}\n\
             - Completed Tasks: {}\n\
             - Overdue Tasks: {}\n\
             - High Priority Tasks: {}\n\
             - Total Safety Incidents: {}\n\
             - Critical/High Severity Incidents: {}\n\
             - Recent Activity Count (last {RECENT_ACTIVITY_DAYS} days): {}\n\
             - Team Size: {}\n\
             - Total Documents: {}\n\n\
             Based on this data, provide:\n\
             1. A \"score\" from 0-100 (100 is perfect).\n\
             2. A concise one-sentence \"summary\" of the project's status.\n\
             3. A list of 2-3 key \"risks\" or concerns.\n\
             4. A list of 2-3 key \"positives\" or areas of good progress.",
            date(started),
            m.total_tasks,
            m.completed_tasks,
            m.overdue_tasks,
            m.open_high_priority_tasks,
            m.total_incidents,
            m.serious_incidents,
            m.recent_activity,
            m.team_size,
            m.total_documents,
        ),
        json!({
            "type": "OBJECT",
            "properties": {
                "score": { "type": "INTEGER" },
                "summary": { "type": "STRING" },
                "risks": { "type": "ARRAY", "items": { "type": "STRING" } },
                "positives": { "type": "ARRAY", "items": { "type": "STRING" } }
            }
        }),
    )
}

// ---------------------------------------------------------------------------
// Field records
// ---------------------------------------------------------------------------

pub fn incident_summary(description: &str) -> Prompt {
    Prompt::text(format!(
        "Summarize this construction site safety incident report into one sentence: \"{description}\""
    ))
}

pub fn safety_analysis(incidents: &[SafetyIncident]) -> Prompt {
    let listed = incidents
        .iter()
        .map(|i| {
            format!(
                "- Type: {}, Severity: {}, Date: {}\n  Description: {}\n  Corrective Action: {}",
                i.incident_type.label(),
                i.severity.label(),
                date(i.timestamp),
                i.description,
                i.corrective_action_taken.as_deref().unwrap_or("None specified"),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    Prompt::text(format!(
        "You are a construction safety analyst. Analyze the following list of safety incidents \
         from a single project. Identify trends, common root causes, and provide 3-5 actionable, \
         specific recommendations for the Project Manager to improve site safety. Format your \
         response with clear headings (e.g., ### Analysis, ### Trends, ### Recommendations).\n\n\
         Incidents:\n{listed}"
    ))
}

pub fn daily_log_summary(logs: &[DailyLog]) -> Prompt {
    let listed = logs
        .iter()
        .map(|l| {
            format!(
                "Date: {}\nWeather: {}, {}°C\nNotes: {}",
                date(l.date),
                l.weather.label(),
                l.temperature,
                l.notes
            )
        })
        .collect::<Vec<_>>()
        .join("\n---\n");

    Prompt::text(format!(
        "You are an assistant for a construction project manager. Summarize the following daily \
         site logs into a concise, professional weekly report. Use bullet points to highlight key \
         progress, blockers, and deliveries.\n\nLogs:\n{listed}"
    ))
}

pub fn rfi_assignee(question: &str, team: &[User]) -> Prompt {
    let listed = team
        .iter()
        .map(|u| format!("- ID: {}, Name: {}, Role: {}", u.id, u.name, u.role.label()))
        .collect::<Vec<_>>()
        .join("\n");

    Prompt::text(format!(
        "A Request for Information (RFI) has been submitted with the following question:\n---\n\
         Question: \"{question}\"\n---\n\n\
         Based on the question, who from the following project team is the most appropriate \
         person to provide an answer? Respond with ONLY the numeric ID of the suggested person. \
         Do not add any other text or explanation.\n\nProject Team:\n{listed}\n"
    ))
}
