//! Terminal formatting for answers and `/history` output.

use colored::Colorize;

use crate::message::{Message, Role};

/// Format a message for terminal display with role label and colors.
pub fn format_message(msg: &Message) -> String {
    let label = match msg.role {
        Role::User => format!("{}:", msg.role).green().bold().to_string(),
        Role::Assistant => format!("{}:", msg.role).cyan().bold().to_string(),
        Role::Tool => {
            let id = msg.tool_call_id.as_deref().unwrap_or("?");
            format!(
                "{} {}",
                format!("{}:", msg.role).yellow(),
                format!("[{}]", id).dimmed()
            )
        }
    };

    let mut body = match msg.role {
        Role::User => msg.text().to_string(),
        Role::Assistant => render_markdown_lite(msg.text()),
        Role::Tool => msg.text().dimmed().to_string(),
    };
    for call in &msg.tool_calls {
        if !body.is_empty() {
            body.push('\n');
        }
        body.push_str(&format!(
            "{} {} {}",
            "→".cyan(),
            call.name.bold(),
            call.arguments.dimmed()
        ));
    }

    format!("{}\n{}", label, body)
}

/// Minimal markdown renderer for terminal output.
///
/// Fenced code blocks are indented and dimmed; outside them, `**bold**` and
/// `` `code` `` spans are styled. Anything else passes through unchanged.
pub fn render_markdown_lite(text: &str) -> String {
    let mut lines = Vec::new();
    let mut in_fence = false;

    for line in text.lines() {
        if let Some(lang) = line.strip_prefix("```") {
            in_fence = !in_fence;
            if in_fence && !lang.trim().is_empty() {
                lines.push(format!("  {}", lang.trim().dimmed()));
            }
            continue;
        }
        if in_fence {
            lines.push(format!("  {}", line.dimmed()));
        } else {
            lines.push(render_inline(line));
        }
    }

    lines.join("\n")
}

/// Styles `**bold**` and `` `code` `` spans within one line.
fn render_inline(line: &str) -> String {
    let mut out = String::new();
    let mut rest = line;

    while !rest.is_empty() {
        let bold = rest.find("**");
        let code = rest.find('`');
        let (start, marker) = match (bold, code) {
            (Some(b), Some(c)) if c < b => (c, "`"),
            (Some(b), _) => (b, "**"),
            (None, Some(c)) => (c, "`"),
            (None, None) => break,
        };

        let after = &rest[start + marker.len()..];
        let Some(end) = after.find(marker) else {
            break;
        };

        out.push_str(&rest[..start]);
        let inner = &after[..end];
        if marker == "**" {
            out.push_str(&inner.bold().to_string());
        } else {
            out.push_str(&inner.dimmed().to_string());
        }
        rest = &after[end + marker.len()..];
    }

    out.push_str(rest);
    out
}
