// Learning Cycle
//
// Wires the example buffer, a coordinator and the two external collaborators
// (rule synthesis and rule execution) into one decide -> learn -> evaluate ->
// report -> mark-learned pass. The cursor only advances after a successful
// pass, so failed runs are retried on the same examples next time.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::time::timeout;

use crate::buffer::ExampleBuffer;
use crate::config::RuleChefConfig;
use crate::coordinator::{
    build_coordinator, CoordinationDecision, Coordinator, LearningMetrics, LearningStrategy,
};
use crate::error::{Result, RuleChefError};
use crate::evaluation::{CorpusMetrics, LabeledDocument, Span};
use crate::types::{ObservedExample, Rule};

/// Everything the synthesizer needs for one learning run
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    pub strategy: LearningStrategy,
    pub max_iterations: u32,

    /// Examples added since the last learn (corrections included)
    pub examples: Vec<ObservedExample>,

    /// The subset of `examples` that are corrections
    pub corrections: Vec<ObservedExample>,

    /// Rules being refined; `None` on first learn
    pub current_rules: Option<Vec<Rule>>,
}

/// External rule-synthesis collaborator (typically an LLM prompt loop)
#[async_trait]
pub trait RuleSynthesizer: Send + Sync {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<Vec<Rule>>;
}

/// External rule-execution collaborator
pub trait SpanExtractor: Send + Sync {
    fn extract(&self, rules: &[Rule], text: &str) -> Result<Vec<Span>>;
}

/// Record of a completed learning run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleReport {
    pub id: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub decision: CoordinationDecision,
    pub rule_count: usize,
    pub metrics: LearningMetrics,
}

#[derive(Debug, Clone)]
pub enum CycleOutcome {
    /// Coordinator declined; nothing changed
    Skipped(CoordinationDecision),

    /// New rules are active and the cursor moved
    Learned(CycleReport),
}

impl CycleOutcome {
    pub fn learned(&self) -> bool {
        matches!(self, CycleOutcome::Learned(_))
    }
}

/// One orchestrator: single logical caller of the coordinator and the cursor
pub struct LearningCycle {
    buffer: Arc<ExampleBuffer>,
    coordinator: Box<dyn Coordinator>,
    synthesizer: Arc<dyn RuleSynthesizer>,
    extractor: Arc<dyn SpanExtractor>,
    holdout: Vec<LabeledDocument>,
    config: RuleChefConfig,
    rules: Option<Vec<Rule>>,
}

impl LearningCycle {
    pub fn new(
        buffer: Arc<ExampleBuffer>,
        coordinator: Box<dyn Coordinator>,
        synthesizer: Arc<dyn RuleSynthesizer>,
        extractor: Arc<dyn SpanExtractor>,
        config: RuleChefConfig,
    ) -> Self {
        Self {
            buffer,
            coordinator,
            synthesizer,
            extractor,
            holdout: Vec::new(),
            config,
            rules: None,
        }
    }

    /// Build with the coordinator selected in `config`
    pub fn from_config(
        buffer: Arc<ExampleBuffer>,
        synthesizer: Arc<dyn RuleSynthesizer>,
        extractor: Arc<dyn SpanExtractor>,
        config: RuleChefConfig,
    ) -> Result<Self> {
        config.validate()?;
        let coordinator = build_coordinator(&config.coordinator)?;
        Ok(Self::new(buffer, coordinator, synthesizer, extractor, config))
    }

    /// Held-out documents used to score new rules
    pub fn with_holdout(mut self, holdout: Vec<LabeledDocument>) -> Self {
        self.holdout = holdout;
        self
    }

    /// Start from previously learned rules
    pub fn with_rules(mut self, rules: Vec<Rule>) -> Self {
        self.rules = Some(rules);
        self
    }

    pub fn rules(&self) -> Option<&[Rule]> {
        self.rules.as_deref()
    }

    pub fn buffer(&self) -> &Arc<ExampleBuffer> {
        &self.buffer
    }

    pub fn coordinator(&self) -> &dyn Coordinator {
        self.coordinator.as_ref()
    }

    /// Score `rules` on the held-out documents
    pub fn evaluate(&self, rules: &[Rule]) -> Result<LearningMetrics> {
        if self.holdout.is_empty() {
            return Ok(LearningMetrics::default());
        }

        let eval = &self.config.evaluation;
        let mut corpus = CorpusMetrics::new();

        for doc in &self.holdout {
            let predictions = self.extractor.extract(rules, &doc.text)?;
            corpus.evaluate_document(
                &predictions,
                &doc.gold,
                eval.exact_match_only,
                eval.iou_threshold,
            );
        }

        tracing::debug!(
            "Evaluated {} rules on {} documents: precision {:.3}, recall {:.3}, f1 {:.3}",
            rules.len(),
            corpus.documents,
            corpus.precision(),
            corpus.recall(),
            corpus.f1()
        );

        Ok(LearningMetrics::from_corpus(corpus))
    }

    /// Run one decision cycle.
    ///
    /// The synthesizer sees the new examples as of the start of the run.
    /// Examples appended while it is working are not marked learned; they
    /// stay new and count toward the next decision.
    pub async fn run_once(&mut self) -> Result<CycleOutcome> {
        let decision = self
            .coordinator
            .should_trigger_learning(&self.buffer, self.rules.as_deref())?;

        if !decision.should_learn {
            return Ok(CycleOutcome::Skipped(decision));
        }

        let started_at = Utc::now();
        let run_id = uuid::Uuid::new_v4().to_string();

        tracing::info!(
            "Starting learning run {} with {} coordinator (strategy: {}, max iterations: {})",
            run_id,
            self.coordinator.name(),
            decision.strategy,
            decision.max_iterations
        );

        let (examples, snapshot_end) = self.buffer.snapshot_new_examples();
        let corrections = examples.iter().filter(|e| e.is_correction).cloned().collect();
        let request = SynthesisRequest {
            strategy: decision.strategy,
            max_iterations: decision.max_iterations,
            examples,
            corrections,
            current_rules: self.rules.clone(),
        };

        let limit = self.config.cycle.synthesis_timeout;
        let new_rules = match timeout(limit, self.synthesizer.synthesize(request)).await {
            Ok(Ok(rules)) => rules,
            Ok(Err(e)) => {
                tracing::error!("Learning run {} failed: {}", run_id, e);
                return Err(e);
            }
            Err(_) => {
                tracing::error!("Learning run {} timed out after {:?}", run_id, limit);
                return Err(RuleChefError::Timeout(limit));
            }
        };

        if new_rules.is_empty() {
            tracing::warn!("Learning run {} produced no rules", run_id);
            return Err(RuleChefError::Synthesis(
                "synthesizer returned no rules".to_string(),
            ));
        }

        let metrics = self.evaluate(&new_rules)?;

        self.coordinator
            .on_learning_complete(self.rules.as_deref(), &new_rules, &metrics)?;

        let pending = self.buffer.mark_learned_through(snapshot_end);
        if pending > 0 {
            tracing::warn!(
                "Learning run {}: {} examples arrived during synthesis and stay queued",
                run_id,
                pending
            );
        }

        let rule_count = new_rules.len();
        self.rules = Some(new_rules);

        tracing::info!("Learning run {} complete: {} rules active", run_id, rule_count);

        Ok(CycleOutcome::Learned(CycleReport {
            id: run_id,
            started_at,
            completed_at: Utc::now(),
            decision,
            rule_count,
            metrics,
        }))
    }
}
