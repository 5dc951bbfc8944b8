//! LanguageTool HTTP engine.
//!
//! Talks to a LanguageTool server (public API, premium API, or self-hosted)
//! through `POST /v2/check`. Offsets in responses are UTF-16 code units.
//! Docs: <https://languagetool.org/http-api/>

use async_trait::async_trait;
use ortho_core::{
    config::GrammarConfig, error::OrthoError, message::ProposedEdit, text::utf16_span_to_bytes,
    traits::GrammarEngine,
};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Grammar engine backed by a LanguageTool server.
pub struct LanguageToolEngine {
    client: reqwest::Client,
    base_url: String,
    language: String,
    disabled_rules: Vec<String>,
    credentials: Option<(String, String)>,
    max_text_length: usize,
}

impl LanguageToolEngine {
    /// Create from config values.
    pub fn from_config(cfg: &GrammarConfig) -> Result<Self, OrthoError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .map_err(|e| OrthoError::Engine(format!("languagetool client init failed: {e}")))?;

        let credentials = match (&cfg.username, &cfg.api_key) {
            (Some(user), Some(key)) if !user.is_empty() && !key.is_empty() => {
                Some((user.clone(), key.clone()))
            }
            _ => None,
        };

        Ok(Self {
            client,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            language: cfg.language.clone(),
            disabled_rules: cfg.disabled_rules.clone(),
            credentials,
            max_text_length: cfg.max_text_length,
        })
    }

    /// Form fields for a check request.
    fn check_form(&self, text: &str) -> Vec<(&'static str, String)> {
        let mut form = vec![
            ("text", text.to_string()),
            ("language", self.language.clone()),
        ];
        if !self.disabled_rules.is_empty() {
            form.push(("disabledRules", self.disabled_rules.join(",")));
        }
        if let Some((user, key)) = &self.credentials {
            form.push(("username", user.clone()));
            form.push(("apiKey", key.clone()));
        }
        form
    }
}

// --- Serde types ---

#[derive(Debug, Deserialize)]
struct LtCheckResponse {
    #[serde(default)]
    matches: Vec<LtMatch>,
}

#[derive(Debug, Deserialize)]
struct LtMatch {
    offset: usize,
    length: usize,
    #[serde(default)]
    replacements: Vec<LtReplacement>,
    #[serde(default)]
    rule: Option<LtRule>,
}

#[derive(Debug, Deserialize)]
struct LtReplacement {
    value: String,
}

#[derive(Debug, Deserialize)]
struct LtRule {
    id: String,
}

/// Convert LanguageTool matches into edits over `text`.
///
/// Each match contributes its first replacement; matches without any are
/// dropped. Engine order is preserved.
fn matches_to_edits(text: &str, matches: Vec<LtMatch>) -> Result<Vec<ProposedEdit>, OrthoError> {
    let mut edits = Vec::with_capacity(matches.len());
    for m in matches {
        let Some(first) = m.replacements.into_iter().next() else {
            continue;
        };
        let span = utf16_span_to_bytes(text, m.offset, m.length).ok_or_else(|| {
            OrthoError::Engine(format!(
                "languagetool span {}+{} does not fit the text",
                m.offset, m.length
            ))
        })?;
        edits.push(ProposedEdit {
            span,
            replacement: first.value,
            rule_id: m.rule.map(|r| r.id),
        });
    }
    Ok(edits)
}

#[async_trait]
impl GrammarEngine for LanguageToolEngine {
    fn name(&self) -> &str {
        "languagetool"
    }

    fn language(&self) -> &str {
        &self.language
    }

    async fn check(&self, text: &str) -> Result<Vec<ProposedEdit>, OrthoError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        let chars = text.chars().count();
        if chars > self.max_text_length {
            warn!(
                "languagetool: skipping {chars}-char text (limit {})",
                self.max_text_length
            );
            return Ok(Vec::new());
        }

        let url = format!("{}/v2/check", self.base_url);
        debug!("languagetool: POST {url} language={} chars={chars}", self.language);

        let resp = self
            .client
            .post(&url)
            .form(&self.check_form(text))
            .send()
            .await
            .map_err(|e| OrthoError::Engine(format!("languagetool request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(OrthoError::Engine(format!(
                "languagetool returned {status}: {body}"
            )));
        }

        let parsed: LtCheckResponse = resp.json().await.map_err(|e| {
            OrthoError::Engine(format!("languagetool: failed to parse response: {e}"))
        })?;

        debug!("languagetool: {} match(es)", parsed.matches.len());
        matches_to_edits(text, parsed.matches)
    }

    async fn is_available(&self) -> bool {
        let url = format!("{}/v2/languages", self.base_url);
        match self.client.get(&url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                warn!("languagetool not available: {e}");
                false
            }
        }
    }
}
