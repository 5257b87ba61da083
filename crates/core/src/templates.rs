//! Default proposal and contract bodies.
//!
//! When the owner creates a document without supplying content, these
//! templates pre-fill it from the project. The text is plain Markdown-ish
//! prose; placeholders in square brackets are meant to be edited before the
//! document is sent.

use crate::billing::format_brl;
use crate::types::Date;

/// Studio name printed on generated documents.
pub const STUDIO_NAME: &str = "GV Software";

/// Studio contact address printed on contracts.
pub const STUDIO_EMAIL: &str = "contato@gvsoftware.com";

/// Project and client facts a document template draws on.
#[derive(Debug, Clone, Default)]
pub struct DocumentContext {
    pub title: String,
    pub description: String,
    pub deadline: Option<Date>,
    pub total_value: Option<f64>,
    pub client_name: Option<String>,
    pub client_company: Option<String>,
    pub client_email: Option<String>,
}

fn format_date(date: Date) -> String {
    date.format("%d/%m/%Y").to_string()
}

impl DocumentContext {
    fn deadline_text(&self) -> String {
        self.deadline
            .map(format_date)
            .unwrap_or_else(|| "[Deadline to be agreed]".into())
    }

    fn client_name_text(&self) -> &str {
        self.client_name.as_deref().unwrap_or("[Client name]")
    }
}

/// Render the default commercial proposal for a project.
pub fn default_proposal(ctx: &DocumentContext) -> String {
    let value = ctx
        .total_value
        .map(|v| format!("Total: {}", format_brl(v)))
        .unwrap_or_else(|| "To be agreed".into());

    format!(
        "Dear Client,

Please find below our proposal for the project \"{title}\".

## Project Description

{description}

## Delivery Date

Expected date: {deadline}

## Investment

{value}

## Payment Terms

[Describe the payment conditions here]

## Project Scope

[List the deliverables and features included]

## Terms and Conditions

[Add important terms, warranties, support, etc.]

We remain available for any clarification.

Kind regards,
{STUDIO_NAME}",
        title = ctx.title,
        description = ctx.description,
        deadline = ctx.deadline_text(),
    )
}

/// Render the default service contract for a project.
///
/// `today` is printed above the signature lines.
pub fn default_contract(ctx: &DocumentContext, today: Date) -> String {
    const RULE: &str = "═══════════════════════════════════════════════════════════";

    let company = ctx
        .client_company
        .as_deref()
        .map(|c| format!("\nCompany: {c}"))
        .unwrap_or_default();
    let value = ctx
        .total_value
        .map(format_brl)
        .unwrap_or_else(|| "[Value to be defined]".into());

    format!(
        "SOFTWARE DEVELOPMENT SERVICES AGREEMENT

By this private instrument, on one side:

CLIENT: {client}{company}
Email: {client_email}

And on the other side:

CONTRACTOR: {STUDIO_NAME}
Email: {STUDIO_EMAIL}

The parties agree as follows:

{RULE}

CLAUSE ONE - SUBJECT

1.1. This agreement covers software development services as specified in the project \"{title}\".

1.2. Description of services:
{description}

{RULE}

CLAUSE TWO - TERM

2.1. The services shall be delivered by {deadline}.

2.2. The term may be extended by written agreement between the parties.

{RULE}

CLAUSE THREE - PRICE AND PAYMENT

3.1. The total price of the services is {value}.

3.2. Payment shall follow these conditions:
- [Describe the payment schedule]
- [Define the payment method]

{RULE}

CLAUSE FOUR - CONTRACTOR OBLIGATIONS

4.1. Perform the services with quality and within the required technical standards.

4.2. Keep all CLIENT information confidential.

4.3. Test and validate the work before final delivery.

4.4. Provide technical documentation for the project.

{RULE}

CLAUSE FIVE - CLIENT OBLIGATIONS

5.1. Provide all information required to perform the services.

5.2. Make payments on the agreed dates.

5.3. Review and approve deliveries within [define period] business days.

{RULE}

CLAUSE SIX - INTELLECTUAL PROPERTY

6.1. Copyright and intellectual property over the delivered software transfer to the CLIENT upon full payment.

6.2. The CONTRACTOR may show the project in its portfolio unless a specific confidentiality agreement applies.

{RULE}

CLAUSE SEVEN - TERMINATION

7.1. Either party may terminate this agreement with 30 days prior notice.

7.2. Upon termination, services already performed shall be paid proportionally.

{RULE}

{today}

_________________________________
CLIENT
{client}

_________________________________
CONTRACTOR
{STUDIO_NAME}",
        client = ctx.client_name_text(),
        client_email = ctx.client_email.as_deref().unwrap_or("[Client email]"),
        title = ctx.title,
        description = ctx.description,
        deadline = ctx.deadline_text(),
        today = format_date(today),
    )
}
