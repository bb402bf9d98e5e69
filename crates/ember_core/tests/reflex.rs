use ember_core::{EchoDraft, FigureDraft, MemoryService, SpineDraft};
use std::time::Duration;

fn service() -> MemoryService {
    MemoryService::in_memory(Duration::from_secs(1))
}

fn add_echo(service: &MemoryService, phrase: &str, tags: &[&str]) {
    service
        .echoes()
        .create(EchoDraft {
            phrase: phrase.to_string(),
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
            source: None,
        })
        .unwrap();
}

#[test]
fn echo_matches_by_tag_containment_and_unrelated_does_not() {
    let service = service();
    add_echo(&service, "the river runs", &["grief"]);
    add_echo(&service, "unrelated", &["joy"]);

    let bundle = service.reflex("I remember the river and grief").unwrap();
    assert_eq!(bundle.echoes.len(), 1);
    assert_eq!(bundle.echoes[0].phrase, "the river runs");
}

#[test]
fn echo_matches_when_phrase_occurs_in_context() {
    let service = service();
    add_echo(&service, "Hold Fast", &[]);

    let bundle = service.reflex("she told me to hold fast that winter").unwrap();
    assert_eq!(bundle.echoes.len(), 1);
}

#[test]
fn echoes_are_capped_at_two_in_collection_order() {
    let service = service();
    for phrase in ["one", "two", "three", "four", "five"] {
        add_echo(&service, phrase, &["grief"]);
    }

    let bundle = service.reflex("grief").unwrap();
    let phrases: Vec<_> = bundle
        .echoes
        .iter()
        .map(|echo| echo.phrase.as_str())
        .collect();
    assert_eq!(phrases, vec!["one", "two"]);
}

#[test]
fn figures_and_spine_are_capped_at_one() {
    let service = service();
    for name in ["Ada", "Ada Lovelace"] {
        service
            .figures()
            .create(FigureDraft {
                name: name.to_string(),
                ..FigureDraft::default()
            })
            .unwrap();
    }
    service
        .figures()
        .create(FigureDraft {
            name: "Nobody".to_string(),
            impact: "taught me patience".to_string(),
            ..FigureDraft::default()
        })
        .unwrap();
    for statement in ["be kind", "be kind always"] {
        service
            .spine()
            .create(SpineDraft {
                statement: statement.to_string(),
                ..SpineDraft::default()
            })
            .unwrap();
    }

    let bundle = service
        .reflex("ada lovelace said be kind always and taught me patience")
        .unwrap();
    assert_eq!(bundle.figures.len(), 1);
    assert_eq!(bundle.figures[0].name, "Ada");
    assert_eq!(bundle.spine.len(), 1);
    assert_eq!(bundle.spine[0].statement, "be kind");
}

#[test]
fn figure_matches_by_impact() {
    let service = service();
    service
        .figures()
        .create(FigureDraft {
            name: "Someone".to_string(),
            impact: "Taught Me Patience".to_string(),
            ..FigureDraft::default()
        })
        .unwrap();

    let bundle = service.reflex("who taught me patience?").unwrap();
    assert_eq!(bundle.figures.len(), 1);
}

#[test]
fn empty_context_matches_nothing() {
    let service = service();
    add_echo(&service, "anything", &["grief"]);
    service
        .spine()
        .create(SpineDraft::default())
        .unwrap();

    assert!(service.reflex("").unwrap().is_empty());
    assert!(service.reflex("   ").unwrap().is_empty());
}

#[test]
fn empty_fields_do_not_match_every_context() {
    let service = service();
    add_echo(&service, "", &[""]);
    service
        .spine()
        .create(SpineDraft::default())
        .unwrap();
    service
        .figures()
        .create(FigureDraft::default())
        .unwrap();

    assert!(service.reflex("any context at all").unwrap().is_empty());
}

#[test]
fn scored_echoes_rank_by_overlap() {
    let service = service();
    add_echo(&service, "quiet", &["river"]);
    add_echo(&service, "the river", &["river", "stone"]);
    add_echo(&service, "unrelated", &["joy"]);

    let scored = service.scored_echoes("a stone in the river").unwrap();
    let phrases: Vec<_> = scored
        .iter()
        .map(|entry| entry.echo.phrase.as_str())
        .collect();
    assert_eq!(phrases, vec!["the river", "quiet"]);
    assert_eq!(scored[0].score, 3);
    assert_eq!(scored[1].score, 1);
}
