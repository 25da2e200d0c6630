use perioscope_assess::confidence::score;
use perioscope_core::models::findings::{BoneLossFinding, CaseFindings, PathologyFinding, Severity};

fn bone_loss(percentage: f64, severity: Severity) -> BoneLossFinding {
    BoneLossFinding {
        percentage,
        severity,
        regions: vec![],
        measurements: vec![],
    }
}

fn pathology(confidence: f64) -> PathologyFinding {
    PathologyFinding {
        kind: "Caries".to_string(),
        confidence,
        location: None,
        severity: None,
    }
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn consistent_bone_loss_alone_scores_point_eight() {
    let findings = CaseFindings {
        bone_loss: Some(bone_loss(45.0, Severity::Moderate)),
        pathologies: vec![],
    };
    let assessment = score(&findings);
    assert!(approx(assessment.confidence_score, 0.80));
    assert_eq!(
        assessment.validations,
        vec![
            "Bone loss of 45.0% is consistent with moderate severity".to_string(),
            "No pathologies reported".to_string(),
        ]
    );
}

#[test]
fn inconsistent_bone_loss_gets_base_only() {
    let findings = CaseFindings {
        bone_loss: Some(bone_loss(45.0, Severity::Mild)),
        pathologies: vec![],
    };
    let assessment = score(&findings);
    assert!(approx(assessment.confidence_score, 0.45));
    assert!(assessment.validations[0].contains("outside the expected range for mild"));
}

#[test]
fn band_edges_count_as_consistent() {
    for (pct, severity) in [
        (0.0, Severity::Mild),
        (30.0, Severity::Mild),
        (50.0, Severity::Moderate),
        (100.0, Severity::Severe),
    ] {
        let findings = CaseFindings {
            bone_loss: Some(bone_loss(pct, severity)),
            pathologies: vec![],
        };
        assert!(
            approx(score(&findings).confidence_score, 0.80),
            "{pct}% should be consistent with {severity}"
        );
    }
}

#[test]
fn pathology_bonus_scales_with_confident_share() {
    let findings = CaseFindings {
        bone_loss: None,
        pathologies: vec![pathology(0.9), pathology(0.5)],
    };
    let assessment = score(&findings);
    assert!(approx(assessment.confidence_score, 0.45 + 0.175));
    assert!(
        assessment
            .validations
            .contains(&"1 of 2 pathologies detected with confidence above 75%".to_string())
    );
}

#[test]
fn threshold_is_strict() {
    let findings = CaseFindings {
        bone_loss: None,
        pathologies: vec![pathology(0.75)],
    };
    assert!(approx(score(&findings).confidence_score, 0.45));
}

#[test]
fn score_is_capped_at_one() {
    let findings = CaseFindings {
        bone_loss: Some(bone_loss(60.0, Severity::Severe)),
        pathologies: vec![pathology(0.95), pathology(0.8)],
    };
    assert!(approx(score(&findings).confidence_score, 1.0));
}

#[test]
fn missing_bone_loss_is_noted() {
    let findings = CaseFindings {
        bone_loss: None,
        pathologies: vec![pathology(0.9)],
    };
    let assessment = score(&findings);
    assert_eq!(assessment.validations[0], "No bone-loss measurement available");
    assert!(approx(assessment.confidence_score, 0.80));
}
