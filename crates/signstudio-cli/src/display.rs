//! Vertical card display for templates and insight results.

use signstudio_ai::{Fallback, Insight};
use signstudio_core::{AuditResult, Field};
use signstudio_editor::{SavedTemplate, TemplateDraft};

const MAX_LIST_ITEMS: usize = 10;

// ── Public API ──

/// Print a template draft as a card: document, roles, then fields.
pub fn print_template_card(draft: &TemplateDraft) {
    let title = draft.title().trim();
    println!("=== {} ===", if title.is_empty() { "(untitled)" } else { title });
    println!();

    if let Some(doc) = draft.document() {
        println!("Document");
        println!("  {:<26} {}", "file_name", doc.file_name);
        println!("  {:<26} {}", "size", format_bytes(doc.size_bytes));
        println!();
    }

    println!("Roles");
    for role in draft.roles().all() {
        println!("  {:<26} {} ({})", role.id, role.name, role.color.as_str());
    }
    println!();

    if draft.fields().is_empty() {
        println!("Fields");
        println!("  (none)");
        println!();
        return;
    }

    println!("Fields");
    for field in draft.fields().all() {
        print_field_row(draft, field);
    }
    println!();
}

/// Print an audit result with its provenance.
pub fn print_audit(insight: &Insight<AuditResult>) {
    let audit = &insight.value;
    println!("Audit");
    println!("  {:<26} {:.0}/100", "score", audit.score);
    println!("  {:<26} {}", "status", audit.status);
    println!("  {:<26} {}", "source", source_label(insight.fallback));
    print_list("issues", &audit.issues);
    print_list("suggestions", &audit.suggestions);
    println!();
}

/// Print a free-text insight (briefing or chat answer).
pub fn print_text(header: &str, insight: &Insight<String>) {
    println!("{header} [{}]", source_label(insight.fallback));
    println!("{}", insight.value);
    println!();
}

pub fn print_saved(saved: &SavedTemplate) {
    println!("Saved");
    println!("  {:<26} {}", "title", saved.title);
    println!("  {:<26} {}", "fields", saved.field_count);
    println!("  {:<26} {}", "roles", saved.role_count);
    println!("  {:<26} {}", "saved_at", saved.saved_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!();
}

// ── Row rendering ──

fn print_field_row(draft: &TemplateDraft, field: &Field) {
    let role = draft
        .roles()
        .get(&field.recipient_id)
        .map_or("(missing role)", |r| r.name.as_str());
    let marker = if draft.selected() == Some(&field.id) { "*" } else { " " };
    let g = field.geometry;
    println!(
        " {marker}{:<26} {:<10} {:<16} {:>5.1},{:>5.1}  {:>4.1}x{:<4.1} {}{}",
        field.id.as_str(),
        field.field_type.as_str(),
        role,
        g.x,
        g.y,
        g.width,
        g.height,
        if field.required { "required" } else { "optional" },
        field
            .trimmed_label()
            .map(|l| format!("  \"{l}\""))
            .unwrap_or_default(),
    );
}

fn print_list(name: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("  {:<26} {}", name, items[0]);
    for item in items.iter().skip(1).take(MAX_LIST_ITEMS - 1) {
        println!("  {:<26} {}", "", item);
    }
    if items.len() > MAX_LIST_ITEMS {
        println!("  {:<26} ... and {} more", "", items.len() - MAX_LIST_ITEMS);
    }
}

fn source_label(fallback: Option<Fallback>) -> &'static str {
    match fallback {
        None => "generated",
        Some(Fallback::Unconfigured) => "demo (no insight service configured)",
        Some(Fallback::RateLimited) => "fallback (rate limited)",
        Some(Fallback::Failed) => "fallback (service error)",
    }
}

fn format_bytes(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = KIB * 1024;
    if bytes >= MIB {
        format!("{:.1} MiB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.1} KiB", bytes as f64 / KIB as f64)
    } else {
        format!("{bytes} B")
    }
}
