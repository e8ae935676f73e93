//! Prompt assembly from in-memory template state.

use std::fmt::Write as _;

use signstudio_core::{Field, FieldType, Geometry, Role};

// ── System prompts ──

pub const AUDIT_SYSTEM_PROMPT: &str = "\
You review e-signature templates for a nonprofit donation platform.

Given a template's title, signer roles, and placed fields, assess whether the \
layout will collect legally sound, complete signatures.

Respond ONLY with a JSON object. No markdown fences, no explanation, just raw JSON:
{
  \"score\": number from 0 to 100,
  \"status\": \"Secure\" | \"Medium Risk\" | \"High Risk\",
  \"issues\": [\"short description of each problem\"],
  \"suggestions\": [\"short actionable fix\"]
}

Flag roles with no signature field, missing date fields next to signatures, \
optional signature fields, and text fields whose label does not say what to enter.";

pub const BRIEFING_SYSTEM_PROMPT: &str = "\
You write short executive briefings for nonprofit staff. \
Summarise the template in three sentences or fewer: who signs, what they fill in, \
and anything that looks incomplete. Plain text, no markdown.";

pub const CHAT_SYSTEM_PROMPT: &str = "\
You are a giving-insights assistant for a donation platform. \
Answer the user's question in a friendly, concise way using only the context provided. \
If the context does not contain the answer, say so.";

// ── Context ──

/// One field as it appears in a prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSummary {
    pub field_type: FieldType,
    pub role_name: String,
    pub required: bool,
    pub label: Option<String>,
    pub geometry: Geometry,
}

/// Template state the insight prompts are built from.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateContext {
    pub title: String,
    pub roles: Vec<String>,
    pub fields: Vec<FieldSummary>,
}

impl TemplateContext {
    /// Resolve each field's role name. Dangling references show as `unassigned`.
    pub fn new(title: &str, roles: &[Role], fields: &[Field]) -> Self {
        let role_name = |field: &Field| {
            roles
                .iter()
                .find(|r| r.id == field.recipient_id)
                .map_or_else(|| "unassigned".to_string(), |r| r.name.clone())
        };
        Self {
            title: title.trim().to_string(),
            roles: roles.iter().map(|r| r.name.clone()).collect(),
            fields: fields
                .iter()
                .map(|f| FieldSummary {
                    field_type: f.field_type,
                    role_name: role_name(f),
                    required: f.required,
                    label: f.trimmed_label().map(str::to_string),
                    geometry: f.geometry,
                })
                .collect(),
        }
    }

    /// Plain-text rendering used as the body of every prompt.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let title = if self.title.is_empty() { "(untitled)" } else { self.title.as_str() };
        let _ = writeln!(out, "Template: {title}");
        let _ = writeln!(out, "Roles: {}", self.roles.join(", "));
        let _ = writeln!(out, "Fields ({}):", self.fields.len());
        for (i, f) in self.fields.iter().enumerate() {
            let _ = writeln!(
                out,
                "{n}. {kind} for {role}, {req}, label: {label}, at x={x:.1}% y={y:.1}% size {w:.1}%x{h:.1}%",
                n = i + 1,
                kind = f.field_type,
                role = f.role_name,
                req = if f.required { "required" } else { "optional" },
                label = f.label.as_deref().unwrap_or("none"),
                x = f.geometry.x,
                y = f.geometry.y,
                w = f.geometry.width,
                h = f.geometry.height,
            );
        }
        out
    }
}

/// Who said a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatTurn {
    pub speaker: Speaker,
    pub text: String,
}

pub fn build_audit_prompt(ctx: &TemplateContext) -> String {
    format!("Audit this signing template.\n\n{}", ctx.render())
}

pub fn build_briefing_prompt(ctx: &TemplateContext) -> String {
    format!("Write a briefing for this signing template.\n\n{}", ctx.render())
}

pub fn build_chat_prompt(context: &str, history: &[ChatTurn], question: &str) -> String {
    let mut out = format!("Context:\n{context}\n");
    if !history.is_empty() {
        out.push_str("\nConversation so far:\n");
        for turn in history {
            let who = match turn.speaker {
                Speaker::User => "User",
                Speaker::Assistant => "Assistant",
            };
            let _ = writeln!(out, "{who}: {}", turn.text);
        }
    }
    let _ = write!(out, "\nQuestion: {}", question.trim());
    out
}
