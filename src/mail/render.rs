use askama::Template;
use thiserror::Error;

use crate::sched::{DueItem, EventType};

/// The three externally-rendered parts the composer consumes. The plain
/// body doubles as the Telegram payload.
#[derive(Debug, Clone)]
pub struct RenderedAlert {
    pub subject: String,
    pub html: String,
    pub plain: String,
}

#[derive(Debug, Error)]
#[error("template rendering failed: {0}")]
pub struct RenderError(#[from] askama::Error);

struct MailItem {
    name: String,
    date: String,
    note: String,
}

fn mail_items(items: &[DueItem]) -> Vec<MailItem> {
    items
        .iter()
        .map(|item| MailItem {
            name: item.name.clone(),
            date: item.when.format("%d/%m/%Y").to_string(),
            note: item.note.clone(),
        })
        .collect()
}

#[derive(Template)]
#[template(path = "birthday_mail.html")]
struct BirthdayHtml<'a> {
    items: &'a [MailItem],
}

#[derive(Template)]
#[template(path = "birthday_mail.txt")]
struct BirthdayPlain<'a> {
    items: &'a [MailItem],
}

#[derive(Template)]
#[template(path = "anniversary_mail.html")]
struct AnniversaryHtml<'a> {
    items: &'a [MailItem],
}

#[derive(Template)]
#[template(path = "anniversary_mail.txt")]
struct AnniversaryPlain<'a> {
    items: &'a [MailItem],
}

#[derive(Template)]
#[template(path = "webchanged_mail.html")]
struct WebChangedHtml<'a> {
    url: &'a str,
}

#[derive(Template)]
#[template(path = "webchanged_mail.txt")]
struct WebChangedPlain<'a> {
    url: &'a str,
}

pub fn render_due(kind: EventType, items: &[DueItem]) -> Result<RenderedAlert, RenderError> {
    let items = mail_items(items);
    let names = items
        .iter()
        .map(|item| item.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    match kind {
        EventType::Birthday => Ok(RenderedAlert {
            subject: format!("Birthday reminder: {}", names),
            html: BirthdayHtml { items: &items }.render()?,
            plain: BirthdayPlain { items: &items }.render()?,
        }),
        EventType::Anniversary => Ok(RenderedAlert {
            subject: format!("Anniversary reminder: {}", names),
            html: AnniversaryHtml { items: &items }.render()?,
            plain: AnniversaryPlain { items: &items }.render()?,
        }),
    }
}

pub fn render_web_changed(url: &str) -> Result<RenderedAlert, RenderError> {
    Ok(RenderedAlert {
        subject: format!("Watched page changed: {}", url),
        html: WebChangedHtml { url }.render()?,
        plain: WebChangedPlain { url }.render()?,
    })
}
