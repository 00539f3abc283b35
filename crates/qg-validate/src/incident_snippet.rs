use std::sync::OnceLock;

use regex::Regex;
use url::Url;

use qg_core::codes::incident_snippet as codes;
use qg_core::{labels, primary_kind_spec, FailureClass, IncidentMarkdown};

use crate::rule::Validator;
use crate::types::ContractError;

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(<[^<>]*>|\[[^\[\]]*\])$").expect("placeholder regex"))
}

/// Empty values and `<fill>` / `[todo]` style stand-ins.
pub fn is_placeholder(value: &str) -> bool {
    let v = value.trim();
    v.is_empty() || placeholder_re().is_match(v)
}

/// Absolute http(s) URL with a host.
pub fn is_absolute_url(value: &str) -> bool {
    match Url::parse(value.trim()) {
        Ok(u) => matches!(u.scheme(), "http" | "https") && u.host_str().is_some(),
        Err(_) => false,
    }
}

/// Validates a rendered incident snippet on its own.
#[derive(Default)]
pub struct IncidentSnippetValidator;

impl IncidentSnippetValidator {
    fn required<'a>(&self, md: &'a IncidentMarkdown, label: &str, out: &mut Vec<ContractError>) -> Option<&'a str> {
        match md.get(label) {
            None => {
                out.push(ContractError::new(codes::MISSING_FIELD, label, format!("Missing required line \"- {label}: ...\".")));
                None
            }
            Some(v) if is_placeholder(v) => {
                out.push(ContractError::new(
                    codes::PLACEHOLDER_FIELD,
                    label,
                    format!("Field \"{label}\" still holds a placeholder value ({v:?})."),
                ));
                None
            }
            Some(v) => Some(v),
        }
    }

    fn required_url(&self, md: &IncidentMarkdown, label: &str, out: &mut Vec<ContractError>) {
        if let Some(v) = self.required(md, label, out) {
            if !is_absolute_url(v) {
                out.push(ContractError::new(codes::INVALID_URL, label, format!("Field \"{label}\" must be an absolute URL (got {v:?}).")));
            }
        }
    }
}

impl Validator for IncidentSnippetValidator {
    type Input = str;

    fn id(&self) -> &str {
        "incident_snippet"
    }

    fn validate_detailed(&self, markdown: &str) -> Vec<ContractError> {
        let mut out = Vec::new();
        let md = IncidentMarkdown::parse(markdown);

        if !md.has_heading {
            out.push(ContractError::new(
                codes::MISSING_HEADER,
                "header",
                format!("Missing incident heading \"{}\".", qg_core::INCIDENT_HEADING),
            ));
        }

        self.required_url(&md, labels::WORKFLOW_RUN, &mut out);
        self.required_url(&md, labels::BRANCH_PR, &mut out);

        let class = self.required(&md, labels::FAILURE_CLASS, &mut out).and_then(|v| match v.parse::<FailureClass>() {
            Ok(c) => Some(c),
            Err(e) => {
                out.push(ContractError::new(codes::INVALID_FAILURE_CLASS, labels::FAILURE_CLASS, e.to_string()));
                None
            }
        });

        self.required(&md, labels::RECOMMENDATION_ID, &mut out);

        if let Some(kind) = class.and_then(primary_kind_spec) {
            let line_ok = md
                .get(kind.markdown_label)
                .map_or(false, |v| !is_placeholder(v) && is_absolute_url(v));
            let follow_up_ok = md.get(labels::FOLLOW_UP).map_or(false, |v| kind.is_mentioned_in(v));
            if !line_ok && !follow_up_ok {
                out.push(ContractError::new(
                    kind.snippet_reference_code,
                    kind.markdown_label,
                    format!(
                        "Failure class {} requires \"- {}: <url>\" or a follow-up mentioning {}.",
                        kind.failure_class, kind.markdown_label, kind.artifact_name
                    ),
                ));
            }
        }

        out
    }
}
