//! JSON rendering of a run result

use crate::types::{CheckResult, DiagnosticSeverity};
use serde_json::{json, Map, Value};

/// Output values as a flat JSON object, `previous` omitted when unset
pub fn outputs_json(result: &CheckResult) -> Value {
    let c = &result.classification;
    let mut obj = Map::new();
    obj.insert("name".into(), json!(c.name));
    obj.insert("added".into(), json!(c.added));
    obj.insert("modified".into(), json!(c.modified));
    obj.insert("removed".into(), json!(c.removed));
    obj.insert("renamed".into(), json!(c.renamed));
    if let Some(previous) = &c.previous {
        obj.insert("previous".into(), json!(previous));
    }
    Value::Object(obj)
}

/// Full report: outputs plus match metadata and diagnostics
pub fn report_json(result: &CheckResult) -> Value {
    let diagnostics: Vec<Value> = result
        .diagnostics
        .iter()
        .map(|d| {
            let severity = match d.severity {
                DiagnosticSeverity::Notice => "notice",
                DiagnosticSeverity::Warning => "warning",
            };
            json!({
                "severity": severity,
                "category": d.category.as_str(),
                "message": d.message,
            })
        })
        .collect();

    json!({
        "outputs": outputs_json(result),
        "matched": result.matched,
        "target": result.target.as_deref(),
        "base": result.range.base,
        "head": result.range.head,
        "files_checked": result.files_checked,
        "diagnostics": diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        Classification, CommitRange, Diagnostic, DiagnosticCategory, TargetPath,
    };

    fn result(classification: Classification, matched: bool) -> CheckResult {
        CheckResult {
            classification,
            matched,
            target: TargetPath::Resolved("new.txt".into()),
            range: CommitRange {
                base: "b".into(),
                head: "h".into(),
            },
            files_checked: 3,
            diagnostics: Vec::new(),
        }
    }

    #[test]
    fn test_outputs_json_rename() {
        let r = result(
            Classification {
                name: "new.txt".into(),
                renamed: true,
                previous: Some("old.txt".into()),
                ..Default::default()
            },
            true,
        );
        let v = outputs_json(&r);
        assert_eq!(v["renamed"], true);
        assert_eq!(v["previous"], "old.txt");
        assert_eq!(v["added"], false);
    }

    #[test]
    fn test_outputs_json_omits_previous() {
        let r = result(Classification::unmatched(&TargetPath::Unresolved), false);
        let v = outputs_json(&r);
        assert!(v.get("previous").is_none());
        assert_eq!(v["name"], "");
    }

    #[test]
    fn test_report_json_diagnostics() {
        let mut r = result(Classification::default(), false);
        r.target = TargetPath::Unresolved;
        r.diagnostics.push(Diagnostic {
            severity: DiagnosticSeverity::Warning,
            category: DiagnosticCategory::WorkflowDiscovery,
            message: "no workflow named 'CI'".into(),
        });
        let v = report_json(&r);
        assert_eq!(v["target"], Value::Null);
        assert_eq!(v["files_checked"], 3);
        assert_eq!(v["diagnostics"][0]["severity"], "warning");
        assert_eq!(v["diagnostics"][0]["category"], "workflow_discovery");
    }
}
