//! Marketing-site contact form: validation and message rendering.
//!
//! The site posts the form with Portuguese field names; both those and the
//! English names are accepted.

use serde::Deserialize;
use validator::Validate;

use crate::templates::STUDIO_NAME;

/// A quote request submitted through the public contact form.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ContactForm {
    #[serde(alias = "nome")]
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default, alias = "empresa")]
    pub company: Option<String>,
    #[validate(email)]
    pub email: String,
    #[serde(default, alias = "telefone")]
    #[validate(length(max = 50))]
    pub phone: String,
    #[serde(alias = "assunto")]
    #[validate(length(min = 1, max = 200))]
    pub subject: String,
    #[serde(default, alias = "orcamento")]
    pub budget: Option<String>,
    #[serde(default, alias = "prazo")]
    pub deadline: Option<String>,
    #[serde(alias = "mensagem")]
    #[validate(length(min = 1, max = 10000))]
    pub message: String,
}

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl ContactForm {
    /// A deadline mentioning urgency ("urgent", "urgente") flags the request.
    pub fn is_urgent(&self) -> bool {
        non_blank(&self.deadline).is_some_and(|d| d.to_lowercase().contains("urgent"))
    }

    pub fn email_subject(&self) -> String {
        format!("[{STUDIO_NAME}] {} - {}", self.subject.trim(), self.name.trim())
    }

    /// Plain-text body for mail clients without HTML support, and for the
    /// log-only fallback.
    pub fn render_text(&self) -> String {
        const RULE: &str = "----------------------------------------";
        format!(
            "New contact message - {STUDIO_NAME}

CLIENT
{RULE}
Name: {name}
Company: {company}
Email: {email}
Phone: {phone}

PROJECT
{RULE}
Subject: {subject}
Budget: {budget}
Deadline: {deadline}

MESSAGE
{RULE}
{message}

{RULE}
Sent from the {STUDIO_NAME} website form",
            name = self.name.trim(),
            company = non_blank(&self.company).unwrap_or("Not provided"),
            email = self.email.trim(),
            phone = self.phone.trim(),
            subject = self.subject.trim(),
            budget = non_blank(&self.budget).unwrap_or("Not provided"),
            deadline = non_blank(&self.deadline).unwrap_or("Not provided"),
            message = self.message.trim(),
        )
    }

    /// HTML body. All user-supplied values are escaped.
    pub fn render_html(&self) -> String {
        let e = |s: &str| escape_html(s.trim());
        let urgent = if self.is_urgent() {
            r#"<p style="background:#b91d73;color:#fff;padding:8px 20px;border-radius:30px;display:inline-block;font-weight:600;text-transform:uppercase;">Urgent project</p>"#
        } else {
            ""
        };
        let row = |label: &str, value: String| {
            format!(
                r#"<tr><td style="padding:12px 0;"><span style="color:#888;font-size:13px;display:block;">{label}</span><span style="font-size:16px;">{value}</span></td></tr>"#
            )
        };

        let email = e(&self.email);
        let mut rows = String::new();
        rows.push_str(&row("Name", e(&self.name)));
        rows.push_str(&row(
            "Company",
            e(non_blank(&self.company).unwrap_or("Not provided")),
        ));
        rows.push_str(&row(
            "Email",
            format!(r#"<a href="mailto:{email}">{email}</a>"#),
        ));
        rows.push_str(&row("Phone", e(&self.phone)));
        rows.push_str(&row("Subject", e(&self.subject)));
        rows.push_str(&row(
            "Budget",
            e(non_blank(&self.budget).unwrap_or("To be defined")),
        ));
        rows.push_str(&row(
            "Deadline",
            e(non_blank(&self.deadline).unwrap_or("Flexible")),
        ));

        format!(
            r#"<!DOCTYPE html>
<html lang="pt-BR">
<head><meta charset="UTF-8"></head>
<body style="margin:0;padding:0;font-family:'Segoe UI',Tahoma,Geneva,Verdana,sans-serif;">
<h1>New quote request</h1>
{urgent}
<table width="100%" cellpadding="0" cellspacing="0">{rows}</table>
<h2>Message</h2>
<p style="white-space:pre-wrap;">{message}</p>
<p style="color:#666;font-size:13px;">Sent automatically by the {STUDIO_NAME} website form.</p>
</body>
</html>"#,
            message = e(&self.message),
        )
    }
}
