//! System prompt composition: persona plus a catalog digest.

use lappybot_catalog::Catalog;
use lappybot_core::laptop::decimal_text;
use lappybot_core::message::{Message, Transcript};

/// Rows summarized into the digest unless configured otherwise.
pub const DEFAULT_DIGEST_ROWS: usize = 200;

pub const PERSONA: &str = "You are LappyBot, an AI assistant specializing in recommending laptops \
based on user preferences, including budget, use cases, and performance requirements. You can \
assist with specifications, pricing, brands, and features. Be helpful and professional, but ensure \
explanations are simple and clear. Always provide specific, detailed recommendations and explain \
why a laptop is suitable for a given use case. Do not answer if input is not related to laptops.";

/// One line per record (brand, model, price, RAM) for the first `rows`
/// records in catalog order.
pub fn catalog_digest(catalog: &Catalog, rows: usize) -> String {
    catalog
        .records()
        .iter()
        .take(rows)
        .map(|r| {
            format!(
                "Brand: {}, Model: {}, Price: MYR {}, RAM: {}GB\n",
                r.brand,
                r.model,
                decimal_text(r.price),
                r.ram_gb
            )
        })
        .collect()
}

/// Instructions wrapping the digest.
pub fn system_message(digest: &str) -> String {
    format!(
        "You are LappyBot, an assistant that provides laptop recommendations. You have access to \
         the following dataset with laptop information:\n{digest}\nIf the user asks for a \
         comparison, respond with a table format using HTML. Ensure the table includes relevant \
         specifications like Brand, Model, Price, Processor, RAM, Storage, GPU, and Display. \
         Otherwise, provide a detailed textual response."
    )
}

/// Builds the outgoing message list for a chat round.
#[derive(Debug, Clone)]
pub struct PromptComposer {
    persona: String,
    digest_rows: usize,
}

impl Default for PromptComposer {
    fn default() -> Self {
        Self {
            persona: PERSONA.to_string(),
            digest_rows: DEFAULT_DIGEST_ROWS,
        }
    }
}

impl PromptComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = persona.into();
        self
    }

    pub fn with_digest_rows(mut self, rows: usize) -> Self {
        self.digest_rows = rows;
        self
    }

    /// The single system turn: persona, a space, then the system message.
    /// The digest is rebuilt on every call.
    pub fn system_prompt(&self, catalog: &Catalog) -> String {
        let digest = catalog_digest(catalog, self.digest_rows);
        format!("{} {}", self.persona, system_message(&digest))
    }

    /// `[system] + transcript`, in order.
    pub fn compose(&self, catalog: &Catalog, transcript: &Transcript) -> Vec<Message> {
        let mut messages = Vec::with_capacity(transcript.len() + 1);
        messages.push(Message::system(self.system_prompt(catalog)));
        messages.extend(transcript.turns().iter().cloned());
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lappybot_core::laptop::LaptopRecord;
    use lappybot_core::message::{Role, SessionId};

    fn catalog(n: usize) -> Catalog {
        Catalog::from_records(
            (0..n)
                .map(|i| LaptopRecord::new("acer", format!("Model {i}"), 2000.0 + i as f64).with_ram(8))
                .collect(),
        )
    }

    #[test]
    fn digest_line_format() {
        let digest = catalog_digest(&catalog(1), DEFAULT_DIGEST_ROWS);
        assert_eq!(digest, "Brand: acer, Model: Model 0, Price: MYR 2000.0, RAM: 8GB\n");
    }

    #[test]
    fn digest_caps_rows_in_catalog_order() {
        let digest = catalog_digest(&catalog(250), DEFAULT_DIGEST_ROWS);
        let lines: Vec<&str> = digest.lines().collect();
        assert_eq!(lines.len(), 200);
        assert!(lines[0].contains("Model 0,"));
        assert!(lines[199].contains("Model 199,"));
    }

    #[test]
    fn empty_catalog_has_empty_digest() {
        assert_eq!(catalog_digest(&Catalog::empty(), DEFAULT_DIGEST_ROWS), "");
        let prompt = PromptComposer::new().system_prompt(&Catalog::empty());
        assert!(prompt.contains("laptop information:\n\nIf the user asks"));
    }

    #[test]
    fn system_prompt_joins_persona_and_message() {
        let prompt = PromptComposer::new().system_prompt(&catalog(2));
        assert!(prompt.starts_with(PERSONA));
        assert!(prompt.contains("related to laptops. You are LappyBot, an assistant"));
        assert!(prompt.contains("Model 1, Price: MYR 2001.0"));
        assert!(prompt.ends_with("provide a detailed textual response."));
    }

    #[test]
    fn compose_puts_system_first_then_history() {
        let mut transcript = Transcript::new(SessionId::from("s1"));
        transcript.push(Message::user("Which laptop for gaming?"));
        transcript.push(Message::assistant("The Omen 16."));
        transcript.push(Message::user("Cheaper?"));

        let composer = PromptComposer::new().with_persona("Custom persona.").with_digest_rows(1);
        let messages = composer.compose(&catalog(3), &transcript);
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].role, Role::System);
        assert!(messages[0].content.starts_with("Custom persona. You are LappyBot"));
        assert!(!messages[0].content.contains("Model 1"));
        assert_eq!(messages[3].content, "Cheaper?");
    }
}
