//! Learning-decision scenarios against a live buffer

mod common;

use common::{add_corrections, add_llm_observations, init_tracing};
use rulechef_core::{
    build_coordinator, AgenticCoordinator, Coordinator, CoordinatorConfig, CoordinatorKind,
    ExampleBuffer, HeuristicCoordinator, LearningStrategy, Rule, RuleFormat,
};

fn current_rules() -> Vec<Rule> {
    vec![
        Rule {
            id: "org_1".to_string(),
            name: "Corporate Suffixes".to_string(),
            description: "Organization names ending in Inc., LLC, Corporation".to_string(),
            format: RuleFormat::Regex,
            content: r"\b([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\s+(?:Inc\.|LLC|Corporation))".to_string(),
            priority: 9,
            confidence: 0.85,
        },
        Rule {
            id: "person_1".to_string(),
            name: "Capitalized Names".to_string(),
            description: "First Last followed by a reporting verb".to_string(),
            format: RuleFormat::Regex,
            content: r"\b([A-Z][a-z]+\s+[A-Z][a-z]+)(?=\s+(?:said|announced))".to_string(),
            priority: 8,
            confidence: 0.8,
        },
    ]
}

#[test]
fn test_corrections_first_after_previous_learn() {
    init_tracing();
    let coordinator = HeuristicCoordinator::new(5, 2);
    let buffer = ExampleBuffer::new();

    add_llm_observations(&buffer, 6);
    buffer.mark_learned();

    add_llm_observations(&buffer, 3);
    add_corrections(&buffer, 2);

    let rules = current_rules();
    let decision = coordinator
        .should_trigger_learning(&buffer, Some(&rules))
        .unwrap();

    assert!(decision.should_learn);
    assert_eq!(decision.strategy, LearningStrategy::CorrectionsFirst);
    assert_eq!(decision.max_iterations, 2);
}

#[test]
fn test_first_learn_boundary() {
    init_tracing();
    let coordinator = HeuristicCoordinator::new(10, 10);
    let buffer = ExampleBuffer::new();

    add_llm_observations(&buffer, 9);
    assert!(!coordinator.should_trigger_learning(&buffer, None).unwrap().should_learn);

    add_llm_observations(&buffer, 1);
    let decision = coordinator.should_trigger_learning(&buffer, None).unwrap();
    assert!(decision.should_learn);
    assert_eq!(decision.strategy, LearningStrategy::Balanced);
    assert_eq!(decision.max_iterations, 3);
}

#[test]
fn test_marked_examples_do_not_count() {
    let coordinator = HeuristicCoordinator::new(4, 2);
    let buffer = ExampleBuffer::new();
    let rules = current_rules();

    add_llm_observations(&buffer, 10);
    add_corrections(&buffer, 5);
    buffer.mark_learned();

    let decision = coordinator
        .should_trigger_learning(&buffer, Some(&rules))
        .unwrap();
    assert!(!decision.should_learn);

    let analysis = coordinator.analyze_buffer(&buffer).unwrap();
    assert_eq!(analysis.stats.total_examples, 15);
    assert_eq!(analysis.stats.new_examples, 0);
    assert!(!analysis.ready_for_refinement);
}

#[test]
fn test_trait_object_is_swappable() {
    let buffer = ExampleBuffer::new();
    add_llm_observations(&buffer, 50);

    let coordinator: Box<dyn Coordinator> = build_coordinator(&CoordinatorConfig::default()).unwrap();
    let decision = coordinator.should_trigger_learning(&buffer, None).unwrap();
    assert!(decision.should_learn);

    let agentic = CoordinatorConfig {
        kind: CoordinatorKind::Agentic,
        ..CoordinatorConfig::default()
    };
    assert!(build_coordinator(&agentic).err().unwrap().is_not_implemented());
    assert!(AgenticCoordinator::new("any-model").unwrap_err().is_not_implemented());
}
