//! Plain-HTML page rendering.
//!
//! No template engine; the pages are small enough to assemble as strings.
//! All user-supplied text goes through [`escape`] before it reaches a page.

use planner_core::{Event, EventDraft};

use crate::session::{Flash, FlashKind};

/// Escape text for safe embedding in HTML content or attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html>\n<head><meta charset=\"utf-8\"><title>{} | Planner</title></head>\n<body>\n{}\n</body>\n</html>",
        escape(title),
        body
    )
}

fn flash_banner(flash: Option<&Flash>) -> String {
    match flash {
        Some(f) => {
            let class = match f.kind {
                FlashKind::Success => "success",
                FlashKind::Error => "error",
                FlashKind::Info => "info",
            };
            format!("<p class=\"flash {}\">{}</p>\n", class, escape(&f.message))
        }
        None => String::new(),
    }
}

/// The anonymous landing page.
pub fn landing_page(flash: Option<&Flash>) -> String {
    let body = format!(
        "{}<h1>Planner</h1>\n\
         <p>Plan your events in one place.</p>\n\
         <p><a href=\"/login\">Log in</a> or <a href=\"/register\">register</a>.</p>",
        flash_banner(flash)
    );
    page("Welcome", &body)
}

/// A bare message page, used for error fallbacks.
pub fn message_page(title: &str, message: &str) -> String {
    page(
        title,
        &format!(
            "<h1>{}</h1>\n<p>{}</p>\n<p><a href=\"/\">Home</a></p>",
            escape(title),
            escape(message)
        ),
    )
}

pub fn register_page(flash: Option<&Flash>) -> String {
    let body = format!(
        "{}<h1>Register</h1>\n\
         <form method=\"post\" action=\"/register\">\n\
         <label>Username <input name=\"username\"></label><br>\n\
         <label>Email <input name=\"email\" type=\"email\"></label><br>\n\
         <label>Password <input name=\"password\" type=\"password\"></label><br>\n\
         <label>Confirm password <input name=\"confirm_password\" type=\"password\"></label><br>\n\
         <button type=\"submit\">Register</button>\n\
         </form>\n\
         <p>Already have an account? <a href=\"/login\">Log in</a>.</p>",
        flash_banner(flash)
    );
    page("Register", &body)
}

pub fn login_page(flash: Option<&Flash>) -> String {
    let body = format!(
        "{}<h1>Log in</h1>\n\
         <form method=\"post\" action=\"/login\">\n\
         <label>Username <input name=\"username\"></label><br>\n\
         <label>Password <input name=\"password\" type=\"password\"></label><br>\n\
         <button type=\"submit\">Log in</button>\n\
         </form>\n\
         <p>New here? <a href=\"/register\">Register</a>.</p>",
        flash_banner(flash)
    );
    page("Log in", &body)
}

/// The signed-in dashboard: events pre-sorted by ascending due date.
pub fn dashboard_page(username: &str, events: &[Event], flash: Option<&Flash>) -> String {
    let mut body = format!(
        "{}<h1>Dashboard</h1>\n<p>Signed in as {} (<a href=\"/logout\">log out</a>)</p>\n\
         <p><a href=\"/event/create\">New event</a></p>\n",
        flash_banner(flash),
        escape(username)
    );

    if events.is_empty() {
        body.push_str("<p>No events yet.</p>\n");
    } else {
        body.push_str(
            "<table>\n<tr><th>Title</th><th>Due</th><th>Location</th><th>Status</th><th></th></tr>\n",
        );
        for event in events {
            body.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
                 <td><a href=\"/event/{}/edit\">edit</a> \
                 <form method=\"post\" action=\"/event/{}/delete\"><button type=\"submit\">delete</button></form></td></tr>\n",
                escape(&event.title),
                escape(&event.due_date),
                escape(event.location.as_deref().unwrap_or("")),
                escape(&event.status),
                event.id,
                event.id,
            ));
        }
        body.push_str("</table>\n");
    }

    page("Dashboard", &body)
}

/// Values prefilled into the event form.
#[derive(Debug, Default)]
pub struct EventFormValues {
    pub title: String,
    pub description: String,
    pub location: String,
    pub due_date: String,
    pub status: String,
}

impl From<&Event> for EventFormValues {
    fn from(event: &Event) -> Self {
        EventFormValues {
            title: event.title.clone(),
            description: event.description.clone().unwrap_or_default(),
            location: event.location.clone().unwrap_or_default(),
            due_date: event.due_date.clone(),
            status: event.status.clone(),
        }
    }
}

impl From<&EventDraft> for EventFormValues {
    fn from(draft: &EventDraft) -> Self {
        EventFormValues {
            title: draft.title.clone(),
            description: draft.description.clone().unwrap_or_default(),
            location: draft.location.clone().unwrap_or_default(),
            due_date: draft.due_date.clone(),
            status: draft.status.clone(),
        }
    }
}

/// The shared create/edit form. `action` is the POST target.
pub fn event_form_page(
    title: &str,
    action: &str,
    values: &EventFormValues,
    flash: Option<&Flash>,
) -> String {
    let body = format!(
        "{}<h1>{}</h1>\n\
         <form method=\"post\" action=\"{}\">\n\
         <label>Title <input name=\"title\" value=\"{}\"></label><br>\n\
         <label>Description <input name=\"description\" value=\"{}\"></label><br>\n\
         <label>Location <input name=\"location\" value=\"{}\"></label><br>\n\
         <label>Due date <input name=\"due_date\" value=\"{}\"></label><br>\n\
         <label>Status <input name=\"status\" value=\"{}\"></label><br>\n\
         <button type=\"submit\">Save</button>\n\
         </form>\n\
         <p><a href=\"/dashboard\">Back to dashboard</a></p>",
        flash_banner(flash),
        escape(title),
        escape(action),
        escape(&values.title),
        escape(&values.description),
        escape(&values.location),
        escape(&values.due_date),
        escape(&values.status),
    );
    page(title, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(
            escape("<script>alert('x & y')</script>"),
            "&lt;script&gt;alert(&#39;x &amp; y&#39;)&lt;/script&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn dashboard_escapes_event_fields() {
        let event = Event {
            id: 1,
            user_id: 1,
            title: "<b>sneaky</b>".to_string(),
            description: None,
            location: Some("\"here\"".to_string()),
            due_date: "2024-01-02".to_string(),
            status: "pending".to_string(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        let html = dashboard_page("alice", &[event], None);
        assert!(!html.contains("<b>sneaky</b>"));
        assert!(html.contains("&lt;b&gt;sneaky&lt;/b&gt;"));
        assert!(html.contains("&quot;here&quot;"));
    }

    #[test]
    fn form_prefills_from_event_draft() {
        let draft = EventDraft {
            title: "Standup".to_string(),
            description: None,
            location: Some("Room 4".to_string()),
            due_date: "2024-01-02".to_string(),
            status: "pending".to_string(),
        };
        let html = event_form_page("Edit event", "/event/1/edit", &(&draft).into(), None);
        assert!(html.contains("value=\"Standup\""));
        assert!(html.contains("value=\"Room 4\""));
        assert!(html.contains("action=\"/event/1/edit\""));
    }
}
