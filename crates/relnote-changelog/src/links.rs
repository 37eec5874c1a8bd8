//! Ticket reference linking

use regex::{Captures, Regex};
use tracing::debug;

use relnote_core::config::{TicketRule, TICKET_PLACEHOLDER};
use relnote_core::error::{ChangelogError, Result};

/// Compiled ticket linking rule
#[derive(Debug, Clone)]
pub struct TicketLinker {
    pattern: Regex,
    template_url: String,
}

impl TicketLinker {
    /// Compile a ticket rule
    pub fn new(rule: &TicketRule) -> Result<Self> {
        let pattern =
            Regex::new(&rule.pattern).map_err(|e| ChangelogError::MalformedLinkPattern {
                pattern: rule.pattern.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            pattern,
            template_url: rule.template_url.clone(),
        })
    }

    /// Wrap every match in `text` in an HTML link.
    ///
    /// The matched text is both the label and the value substituted into
    /// the URL template. The template is inserted literally.
    pub fn link(&self, text: &str) -> String {
        let mut count = 0usize;
        let linked = self.pattern.replace_all(text, |caps: &Captures<'_>| {
            count += 1;
            let ticket = &caps[0];
            format!(
                "<a href=\"{}\">{}</a>",
                self.template_url.replace(TICKET_PLACEHOLDER, ticket),
                ticket
            )
        });
        debug!(count, "linked ticket references");
        linked.into_owned()
    }
}
