//! Unit tests for the content store

use agent_showcase::content::{self, parse_step, BULLET_MARKER};

#[test]
fn test_five_steps_in_order() {
    let titles: Vec<String> = content::load().steps.into_iter().map(|s| s.title).collect();
    assert_eq!(
        titles,
        vec![
            "Unternehmens-Analyse",
            "KI-Potenzial-Assessment",
            "Technologie-Roadmap",
            "Schulungskonzept",
            "Strategiedokument",
        ]
    );
}

#[test]
fn test_every_step_has_bullets_without_markers() {
    for step in content::load().steps {
        assert!(!step.bullets.is_empty(), "{} has no bullets", step.title);
        assert!(!step.summary.is_empty());
        for bullet in step.bullets.iter() {
            assert!(!bullet.starts_with(BULLET_MARKER));
        }
    }
}

#[test]
fn test_texts_are_present() {
    let content = content::load();
    assert!(!content.prompt.is_empty());
    assert!(content.final_summary.contains("**"));
    assert!(!content.uploading_text.is_empty());
    assert!(!content.uploaded_text.is_empty());
    assert!(!content.footer.is_empty());
    assert!(content.document_name.ends_with(".pdf"));
    assert!(content.accept_question.ends_with('?'));
}

#[test]
fn test_parse_step_uses_fixed_line_positions() {
    let step = parse_step("# Titel\n## Zusammenfassung\n\n• eins\n• zwei\n• drei");
    assert_eq!(step.title, "Titel");
    assert_eq!(step.summary, "Zusammenfassung");
    assert_eq!(step.bullets.len(), 3);
    assert_eq!(step.bullets[2], "drei");
}

#[test]
fn test_parse_step_without_header_markers() {
    let step = parse_step("Plain\nSub\n\n• x");
    assert_eq!(step.title, "Plain");
    assert_eq!(step.summary, "Sub");
    assert_eq!(step.bullets.len(), 1);
}

#[test]
fn test_content_serializes() {
    let json = serde_json::to_value(content::load()).unwrap();
    assert_eq!(json["steps"][0]["bullets"].as_array().unwrap().len(), 3);
}
