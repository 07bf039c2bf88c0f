use std::collections::HashMap;

use uuid::Uuid;

use crate::candidates::models::Candidate;
use crate::jobs::models::Job;
use crate::models::enums::ApplicationStage;
use crate::pipeline::models::{Application, PipelineCard, PipelineColumn};

/// Attaches candidate and job snapshots to each application.
pub fn enrich(applications: Vec<Application>, candidates: Vec<Candidate>, jobs: Vec<Job>) -> Vec<PipelineCard> {
    let candidates: HashMap<Uuid, Candidate> = candidates.into_iter().map(|c| (c.id, c)).collect();
    let jobs: HashMap<Uuid, Job> = jobs.into_iter().map(|j| (j.id, j)).collect();

    applications
        .into_iter()
        .map(|application| PipelineCard {
            candidate: candidates.get(&application.candidate_id).cloned(),
            job: jobs.get(&application.job_id).cloned(),
            application,
        })
        .collect()
}

/// Groups cards into one column per stage, in board order.
///
/// All seven columns are always present. Within a column, cards are ordered
/// by `updated_at` descending.
pub fn build_columns(mut cards: Vec<PipelineCard>) -> Vec<PipelineColumn> {
    cards.sort_by(|a, b| b.application.updated_at.cmp(&a.application.updated_at));

    let mut columns: Vec<PipelineColumn> = ApplicationStage::ALL
        .into_iter()
        .map(|stage| PipelineColumn {
            stage,
            label: stage.label().to_string(),
            applications: Vec::new(),
        })
        .collect();

    for card in cards {
        let index = column_index(card.application.stage);
        columns[index].applications.push(card);
    }
    columns
}

fn column_index(stage: ApplicationStage) -> usize {
    match stage {
        ApplicationStage::Screening => 0,
        ApplicationStage::Document => 1,
        ApplicationStage::FirstInterview => 2,
        ApplicationStage::SecondInterview => 3,
        ApplicationStage::Offer => 4,
        ApplicationStage::Hired => 5,
        ApplicationStage::Rejected => 6,
    }
}
