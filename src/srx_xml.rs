//! SRX 2.0 XML loading.
//!
//! Deserializes the `<srx>` document shape into the plain `serde` structs
//! below, then lowers them into an [`SrxDocument`]. Two platform quirks
//! inherited from the Java/.NET tooling this format grew up around get
//! rewritten here, since neither is a regex construct `fancy-regex`
//! understands natively: `\h` and `\v` become explicit horizontal/vertical
//! whitespace character classes before a pattern is ever compiled.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;

use crate::document::SrxDocument;
use crate::error::Error;
use crate::model::{LanguageRule, Rule};

const HORIZONTAL_WHITESPACE_CLASS: &str =
    "[\\t\\x20\\xA0\\x{1680}\\x{2000}-\\x{200A}\\x{202F}\\x{205F}\\x{3000}]";
const VERTICAL_WHITESPACE_CLASS: &str = "[\\n\\x0B\\f\\r\\x{85}\\x{2028}\\x{2029}]";

#[derive(Debug, Deserialize)]
#[serde(rename = "srx")]
struct SrxXml {
    #[serde(default)]
    header: HeaderXml,
    body: BodyXml,
}

#[derive(Debug, Deserialize)]
struct HeaderXml {
    #[serde(default = "default_cascade", rename = "cascade")]
    cascade: String,
}

impl Default for HeaderXml {
    fn default() -> Self {
        HeaderXml { cascade: default_cascade() }
    }
}

fn default_cascade() -> String {
    "yes".to_string()
}

#[derive(Debug, Deserialize)]
struct BodyXml {
    languagerules: LanguageRulesXml,
    maprules: MapRulesXml,
}

#[derive(Debug, Deserialize)]
struct LanguageRulesXml {
    #[serde(rename = "languagerule", default)]
    languagerule: Vec<LanguageRuleXml>,
}

#[derive(Debug, Deserialize)]
struct LanguageRuleXml {
    languagerulename: String,
    #[serde(rename = "rule", default)]
    rule: Vec<RuleXml>,
}

#[derive(Debug, Deserialize)]
struct RuleXml {
    #[serde(default = "default_break", rename = "break")]
    is_break: String,
    beforebreak: Option<String>,
    afterbreak: Option<String>,
}

fn default_break() -> String {
    "yes".to_string()
}

#[derive(Debug, Deserialize)]
struct MapRulesXml {
    #[serde(rename = "languagemap", default)]
    languagemap: Vec<LanguageMapXml>,
}

#[derive(Debug, Deserialize)]
struct LanguageMapXml {
    languagepattern: String,
    languagerulename: String,
}

/// Parse an SRX 2.0 document and build an [`SrxDocument`] from it.
pub fn from_xml_str(xml: &str) -> Result<SrxDocument, Error> {
    let parsed: SrxXml = serde_xml_rs::from_str(xml).map_err(|e| Error::RulesetInvalid(e.to_string()))?;
    build_document(parsed)
}

fn build_document(parsed: SrxXml) -> Result<SrxDocument, Error> {
    let cascade = parsed.header.cascade.eq_ignore_ascii_case("yes");
    let mut document = SrxDocument::new(cascade);

    let mut language_rules: HashMap<String, Arc<LanguageRule>> = HashMap::new();

    for language_rule_xml in parsed.body.languagerules.languagerule {
        let mut language_rule = LanguageRule::new(language_rule_xml.languagerulename.clone());

        for rule_xml in language_rule_xml.rule {
            let is_break = rule_xml.is_break.eq_ignore_ascii_case("yes");
            let before = rewrite_platform_classes(rule_xml.beforebreak.as_deref().unwrap_or(""));
            let after = rewrite_platform_classes(rule_xml.afterbreak.as_deref().unwrap_or(""));
            language_rule.add_rule(Rule::new(is_break, before, after));
        }

        language_rules.insert(language_rule_xml.languagerulename, Arc::new(language_rule));
    }

    for map_xml in parsed.body.maprules.languagemap {
        let language_rule = language_rules.get(&map_xml.languagerulename).cloned().ok_or_else(|| {
            Error::RulesetInvalid(format!(
                "languagemap references unknown languagerulename {:?}",
                map_xml.languagerulename
            ))
        })?;
        document.add_language_map(&map_xml.languagepattern, language_rule)?;
    }

    Ok(document)
}

/// Rewrite unescaped `\h` / `\v` to explicit whitespace character classes.
/// `\\h` (an escaped backslash followed by a literal `h`) is left alone.
fn rewrite_platform_classes(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars().peekable();
    let mut preceding_backslash_run = 0u32;

    while let Some(c) = chars.next() {
        if c == '\\' {
            let rewrite = matches!(chars.peek(), Some('h') | Some('v')) && preceding_backslash_run % 2 == 0;
            if rewrite {
                let kind = chars.next().unwrap();
                out.push_str(if kind == 'h' { HORIZONTAL_WHITESPACE_CLASS } else { VERTICAL_WHITESPACE_CLASS });
                preceding_backslash_run = 0;
            } else {
                out.push(c);
                preceding_backslash_run += 1;
            }
        } else {
            out.push(c);
            preceding_backslash_run = 0;
        }
    }

    out
}
