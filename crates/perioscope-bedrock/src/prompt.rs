//! Prompt assembly for the enhanced-analysis request.

use perioscope_core::models::input::{DiagnosticInput, PatientContext};

use crate::error::BedrockError;

pub const SYSTEM_PROMPT: &str = "\
You are a periodontal diagnostic assistant supporting a licensed dentist. \
Respond with a single JSON object only. Do not wrap it in code fences and \
do not add commentary before or after it.";

/// The response shape the model is asked to produce.
const RESPONSE_SHAPE: &str = r#"{
  "refinedPrognosis": {
    "status": "Good | Fair | Poor | Questionable",
    "explanation": "string",
    "riskFactors": ["string"],
    "longTermOutlook": "string"
  },
  "detailedFindings": {
    "primaryCondition": {
      "description": "string",
      "severity": "mild | moderate | severe",
      "implications": ["string"]
    },
    "secondaryFindings": [
      {
        "condition": "string",
        "description": "string",
        "severity": "mild | moderate | severe",
        "implications": ["string"]
      }
    ],
    "riskAssessment": {
      "current": "string",
      "future": "string",
      "mitigationStrategies": ["string"]
    }
  },
  "detailedTreatmentPlan": {
    "immediate": ["string"],
    "shortTerm": ["string"],
    "longTerm": ["string"],
    "preventiveMeasures": ["string"],
    "lifestyle": ["string"]
  }
}"#;

/// Build the user prompt for one case.
pub fn build_prompt(input: &DiagnosticInput) -> Result<String, BedrockError> {
    let findings = serde_json::to_string_pretty(&input.findings)?;

    let mut prompt = String::from("<case>\n");
    prompt.push_str(&format!("<diagnosis>{}</diagnosis>\n", input.diagnosis.trim()));
    prompt.push_str("<findings>\n");
    prompt.push_str(&findings);
    prompt.push_str("\n</findings>\n");
    prompt.push_str("<patient>\n");
    prompt.push_str(&describe_patient(&input.patient_context));
    prompt.push_str("</patient>\n");
    prompt.push_str("</case>\n\n");

    prompt.push_str(
        "Refine the diagnosis above into a detailed periodontal assessment. \
         Every list must contain at least one entry. Severity values must be \
         exactly mild, moderate or severe. Respond with JSON matching this shape:\n",
    );
    prompt.push_str(RESPONSE_SHAPE);

    Ok(prompt)
}

fn describe_patient(patient: &PatientContext) -> String {
    let mut out = String::new();
    match patient.age {
        Some(age) => out.push_str(&format!("- Age: {age}\n")),
        None => out.push_str("- Age: not recorded\n"),
    }
    match patient.gender.as_deref() {
        Some(gender) if !gender.trim().is_empty() => {
            out.push_str(&format!("- Gender: {}\n", gender.trim()));
        }
        _ => out.push_str("- Gender: not recorded\n"),
    }

    let risk = &patient.risk_factors;
    let factors: Vec<&str> = [
        (risk.smoking, "smoking"),
        (risk.diabetes, "diabetes"),
        (risk.hypertension, "hypertension"),
    ]
    .into_iter()
    .filter_map(|(present, name)| present.then_some(name))
    .collect();

    if !risk.any() {
        out.push_str("- Risk factors: none reported\n");
    } else {
        out.push_str(&format!("- Risk factors: {}\n", factors.join(", ")));
    }
    out
}
