//! Extraction contract (spec §4.F): pull the inline challenge script, the
//! form action URL, and the expected form field names out of a
//! `JsInterstitial` response body. Deliberately dumb string/regex-free
//! scanning rather than a full HTML parser — the challenge page's shape is
//! narrow and fixed enough that a DOM tree buys nothing, matching the
//! teacher's preference for small, purpose-built parsers (e.g.
//! `http::multipart`'s boundary scanner) over general frameworks.

use crate::error::{CoreError, UnsolvableReason};

/// What was pulled out of a `JsInterstitial` body.
#[derive(Debug, Clone)]
pub struct ExtractedChallenge {
    pub script: String,
    pub form_action: String,
    /// Field names the edge expects on resubmission, in the order the form
    /// declares them (`r`, `jschl_vc`, `pass`, …, per spec §4.F).
    pub field_names: Vec<String>,
}

/// Errors are classified so the Solver can decide whether to retry (only
/// transient-looking failures, e.g. a body that looks cut off mid-script).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractError {
    NoScript,
    NoForm,
    Transient,
}

impl ExtractError {
    pub fn into_core_error(self) -> CoreError {
        CoreError::ChallengeUnsolvable { reason: UnsolvableReason::Extract, kind: None }
    }
}

/// Extract `(script, form action, field names)` from a challenge page body.
pub fn extract(body: &str) -> Result<ExtractedChallenge, ExtractError> {
    let script = extract_script(body)?;
    let form_action = extract_form_action(body).ok_or(ExtractError::NoForm)?;
    let field_names = extract_field_names(body);

    Ok(ExtractedChallenge { script, form_action, field_names })
}

fn extract_script(body: &str) -> Result<String, ExtractError> {
    let open_tag = body.find("<script").ok_or(ExtractError::NoScript)?;
    let tag_close = body[open_tag..].find('>').ok_or(ExtractError::Transient)? + open_tag + 1;
    let close_tag = body[tag_close..].find("</script>").ok_or(ExtractError::Transient)?;
    let script = body[tag_close..tag_close + close_tag].to_string();
    if script.trim().is_empty() {
        return Err(ExtractError::NoScript);
    }
    Ok(script)
}

fn extract_form_action(body: &str) -> Option<String> {
    let form_start = body.find("<form")?;
    let form_tag_end = body[form_start..].find('>')? + form_start;
    let tag = &body[form_start..form_tag_end];
    let action_pos = tag.find("action=")?;
    let rest = &tag[action_pos + "action=".len()..];
    let quote = rest.chars().next()?;
    if quote != '"' && quote != '\'' {
        return None;
    }
    let end = rest[1..].find(quote)?;
    Some(rest[1..1 + end].to_string())
}

fn extract_field_names(body: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut rest = body;
    while let Some(pos) = rest.find("name=") {
        let after = &rest[pos + "name=".len()..];
        if let Some(quote) = after.chars().next() {
            if quote == '"' || quote == '\'' {
                if let Some(end) = after[1..].find(quote) {
                    names.push(after[1..1 + end].to_string());
                    rest = &after[1 + end..];
                    continue;
                }
            }
        }
        rest = after;
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        <html><body>
        <form id="challenge-form" action="/cdn-cgi/l/chk_jschl" method="GET">
            <input type="hidden" name="r" value="abc"/>
            <input type="hidden" name="jschl_vc" value="def"/>
            <input type="hidden" name="pass" value="ghi"/>
        </form>
        <script type="text/javascript">
        var a = {};
        a.value = 42;
        </script>
        </body></html>
    "#;

    #[test]
    fn extracts_script_form_and_fields() {
        let extracted = extract(SAMPLE).unwrap();
        assert!(extracted.script.contains("a.value = 42"));
        assert_eq!(extracted.form_action, "/cdn-cgi/l/chk_jschl");
        assert_eq!(extracted.field_names, vec!["r", "jschl_vc", "pass"]);
    }

    #[test]
    fn missing_script_is_no_script_error() {
        let body = r#"<form action="/x"><input name="r" value="1"/></form>"#;
        assert_eq!(extract(body).unwrap_err(), ExtractError::NoScript);
    }

    #[test]
    fn missing_form_is_no_form_error() {
        let body = r#"<script>var a = 1;</script>"#;
        assert_eq!(extract(body).unwrap_err(), ExtractError::NoForm);
    }
}
