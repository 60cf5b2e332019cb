use std::future::Future;
use std::sync::Arc;

use anyhow::Result;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::collaborators::Collaborators;
use crate::models::{EntityBag, Intent, Sentiment, SoapNote, Transcript};

/// Analysis stages fanned out to collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Entities,
    Summary,
    Sentiment,
    Intent,
    Soap,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Entities => "entities",
            Stage::Summary => "summary",
            Stage::Sentiment => "sentiment",
            Stage::Intent => "intent",
            Stage::Soap => "soap",
        };
        f.write_str(name)
    }
}

/// Raw collaborator results; `None` means the stage degraded
#[derive(Debug, Clone, Default)]
pub struct AnalysisResult {
    pub entities: Option<EntityBag>,
    pub summary: Option<String>,
    pub sentiment: Option<Sentiment>,
    pub intent: Option<Intent>,
    pub soap: Option<SoapNote>,
    /// Stages that failed, panicked, had no collaborator, or returned a degraded note
    pub degraded: Vec<Stage>,
}

/// Joins spawned stage tasks, turning errors and panics into `None`
#[derive(Debug, Default)]
struct StageGroup {
    degraded: Vec<Stage>,
}

impl StageGroup {
    /// Spawn `work` for a stage if its collaborator exists
    fn spawn<C, T, F, Fut>(&self, stage: Stage, collaborator: Option<C>, work: F) -> Option<JoinHandle<Result<T>>>
    where
        F: FnOnce(C) -> Fut,
        Fut: Future<Output = Result<T>> + Send + 'static,
        T: Send + 'static,
    {
        match collaborator {
            Some(c) => {
                debug!("Spawning {} stage", stage);
                Some(tokio::spawn(work(c)))
            }
            None => None,
        }
    }

    async fn settle<T>(&mut self, stage: Stage, handle: Option<JoinHandle<Result<T>>>) -> Option<T> {
        let Some(handle) = handle else {
            warn!("Stage {}: no collaborator available", stage);
            self.degraded.push(stage);
            return None;
        };

        match handle.await {
            Ok(Ok(value)) => Some(value),
            Ok(Err(e)) => {
                warn!("Stage {} failed: {:#}", stage, e);
                self.degraded.push(stage);
                None
            }
            Err(e) => {
                warn!("Stage {} task aborted: {}", stage, e);
                self.degraded.push(stage);
                None
            }
        }
    }
}

/// Execute Stage 1: run every collaborator once over the segmented transcript
///
/// Entities, summary, sentiment and intent start together. The SOAP note
/// starts once entities and summary have settled so it can use them as
/// hints, while sentiment and intent keep running. Every task is joined
/// before returning.
pub async fn execute_stage1(collaborators: &Collaborators, transcript: &Transcript) -> AnalysisResult {
    let full_text: Arc<str> = transcript.full_text().into();
    let patient_text: Arc<str> = transcript.patient_text().into();

    info!(
        "Stage 1: analyzing {} chars ({} patient chars)",
        full_text.len(),
        patient_text.len()
    );

    let mut group = StageGroup::default();

    let entities_task = group.spawn(Stage::Entities, collaborators.entities.clone(), |c| {
        let text = full_text.clone();
        async move { c.extract(&text).await }
    });
    let summary_task = group.spawn(Stage::Summary, collaborators.summarizer.clone(), |c| {
        let text = full_text.clone();
        async move { c.summarize(&text).await }
    });
    let sentiment_task = group.spawn(Stage::Sentiment, collaborators.classifier.clone(), |c| {
        let text = patient_text.clone();
        async move { c.classify_sentiment(&text).await }
    });
    let intent_task = group.spawn(Stage::Intent, collaborators.classifier.clone(), |c| {
        let text = patient_text.clone();
        async move { c.classify_intent(&text).await }
    });

    let entities = group.settle(Stage::Entities, entities_task).await;
    let summary = group.settle(Stage::Summary, summary_task).await;

    let soap_task = group.spawn(Stage::Soap, collaborators.soap.clone(), |c| {
        let text = full_text.clone();
        let hints = entities.clone().unwrap_or_default();
        let summary = summary.clone().unwrap_or_default();
        async move { Ok(c.generate(&text, &hints, &summary).await) }
    });

    let sentiment = group.settle(Stage::Sentiment, sentiment_task).await;
    let intent = group.settle(Stage::Intent, intent_task).await;
    let soap = group.settle(Stage::Soap, soap_task).await;

    if soap.as_ref().is_some_and(SoapNote::is_degraded) {
        group.degraded.push(Stage::Soap);
    }

    if let Some(bag) = &entities {
        info!("Stage 1: {} entities extracted", bag.total());
    }

    AnalysisResult {
        entities,
        summary,
        sentiment,
        intent,
        soap,
        degraded: group.degraded,
    }
}
