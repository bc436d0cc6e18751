//! Case generation.
//!
//! Cases come from the built-in scenario bank, driven by a seed. When configured, a
//! seedless request first asks the LLM to draft a case and falls back to the bank if
//! the model is unavailable or returns something unusable.

mod llm_draft;
mod templates;

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use whodunit_domain::{
    Alibi, Case, CaseDetails, Clue, ClueId, Description, DomainError, Persona, Suspect,
    SuspectId, SuspectName,
};

use crate::infrastructure::ports::{LlmPort, RandomPort};
use crate::use_cases::GameError;

pub use llm_draft::CaseGenError;
use templates::{ScenarioTemplate, SuspectTemplate, VariantTemplate, SCENARIOS};

/// Where a generated case came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseOrigin {
    Template,
    Llm,
}

#[derive(Debug, Clone)]
pub struct GeneratedCase {
    pub case: Arc<Case>,
    pub seed: u64,
    pub origin: CaseOrigin,
}

pub struct CaseGenerator {
    random: Arc<dyn RandomPort>,
    llm: Option<Arc<dyn LlmPort>>,
    temperature: f32,
}

impl CaseGenerator {
    /// Template-only generator.
    pub fn new(random: Arc<dyn RandomPort>) -> Self {
        Self {
            random,
            llm: None,
            temperature: 0.7,
        }
    }

    /// Let seedless requests try an LLM draft first.
    pub fn with_llm(mut self, llm: Arc<dyn LlmPort>, temperature: f32) -> Self {
        self.llm = Some(llm);
        self.temperature = temperature;
        self
    }

    /// Produce a valid case. An explicit seed always uses the scenario bank.
    pub async fn generate_case(&self, seed: Option<u64>) -> Result<GeneratedCase, GameError> {
        let explicit = seed.is_some();
        let seed = seed.unwrap_or_else(|| self.random.next_seed());

        if let (false, Some(llm)) = (explicit, &self.llm) {
            match self.draft_case(llm.as_ref()).await {
                Ok(case) => {
                    tracing::info!(title = %case.title(), "Using LLM-drafted case");
                    return Ok(GeneratedCase {
                        case: Arc::new(case),
                        seed,
                        origin: CaseOrigin::Llm,
                    });
                }
                Err(e) => {
                    tracing::warn!(error = %e, seed, "LLM case draft failed, using template");
                }
            }
        }

        let case = template_case(seed).map_err(|e| GameError::Internal(e.to_string()))?;
        tracing::debug!(seed, title = %case.title(), "Generated template case");
        Ok(GeneratedCase {
            case: Arc::new(case),
            seed,
            origin: CaseOrigin::Template,
        })
    }

    async fn draft_case(&self, llm: &dyn LlmPort) -> Result<Case, CaseGenError> {
        let response = llm
            .generate(llm_draft::draft_request(self.temperature))
            .await?;
        llm_draft::parse_case_draft(&response.content)
    }
}

/// Deterministically build a case from the scenario bank.
pub fn template_case(seed: u64) -> Result<Case, DomainError> {
    let mut rng = StdRng::seed_from_u64(seed);

    let scenario = pick(&mut rng, SCENARIOS)?;
    let culprit_index = rng.gen_range(0..scenario.suspects.len());
    let motive = pick(&mut rng, scenario.motives)?;
    let method = pick(&mut rng, scenario.methods)?;

    let mut order: Vec<usize> = (0..scenario.suspects.len()).collect();
    order.shuffle(&mut rng);

    let culprit = &scenario.suspects[culprit_index];
    let innocents: Vec<&SuspectTemplate> = order
        .iter()
        .filter(|&&i| i != culprit_index)
        .map(|&i| &scenario.suspects[i])
        .collect();
    let herring_target = innocents.choose(&mut rng).copied();

    let suspects = order
        .iter()
        .map(|&i| build_suspect(scenario, &scenario.suspects[i], i == culprit_index, motive, method))
        .collect::<Result<Vec<_>, _>>()?;

    let clues = build_clues(scenario, culprit, &innocents, herring_target, motive, method)?;

    Case::new(
        CaseDetails {
            title: scenario.title.to_string(),
            victim: scenario.victim.to_string(),
            location: scenario.location.to_string(),
            intro: scenario.intro.to_string(),
            motive: motive.truth.to_string(),
            method: method.truth.to_string(),
        },
        suspects,
        clues,
    )
}

fn pick<'a, T>(rng: &mut StdRng, items: &'a [T]) -> Result<&'a T, DomainError> {
    items
        .choose(rng)
        .ok_or_else(|| DomainError::validation("Scenario bank has an empty list"))
}

fn build_suspect(
    scenario: &ScenarioTemplate,
    template: &SuspectTemplate,
    guilty: bool,
    motive: &VariantTemplate,
    method: &VariantTemplate,
) -> Result<Suspect, DomainError> {
    let persona = Persona::new(Description::new(template.description)?, template.tone)
        .with_backstory(Description::new(template.backstory)?)
        .with_relationship(template.relationship);
    let mut suspect = Suspect::new(
        SuspectId::new(template.id)?,
        SuspectName::new(template.name)?,
        persona,
        Alibi::new(template.alibi, template.time_range, template.claimed_location),
    );
    for fact in template.knowledge {
        suspect = suspect.with_knowledge(*fact);
    }
    if guilty {
        suspect = suspect.guilty().with_knowledge(format!(
            "You killed {}: you {}, {}. Your alibi is a lie.",
            scenario.victim, method.truth, motive.truth
        ));
    }
    Ok(suspect)
}

fn build_clues(
    scenario: &ScenarioTemplate,
    culprit: &SuspectTemplate,
    innocents: &[&SuspectTemplate],
    herring_target: Option<&SuspectTemplate>,
    motive: &VariantTemplate,
    method: &VariantTemplate,
) -> Result<Vec<Clue>, DomainError> {
    let culprit_id = SuspectId::new(culprit.id)?;
    let mut clues = vec![
        Clue::new(
            ClueId::new("crime_scene")?,
            scenario.crime_scene,
            scenario.location,
        )
        .revealed_at_start(),
        Clue::new(
            ClueId::new(method.clue_id)?,
            method.clue.replace("{culprit}", culprit.name),
            method.clue_location,
        )
        .implicating(culprit_id.clone()),
        Clue::new(
            ClueId::new(motive.clue_id)?,
            motive.clue.replace("{culprit}", culprit.name),
            motive.clue_location,
        )
        .implicating(culprit_id.clone())
        .on_day(2),
        Clue::new(
            ClueId::new("witness_statement")?,
            format!(
                "A witness saw {} near {} at a time {} claims to have been in {}",
                culprit.name, scenario.location, culprit.name, culprit.claimed_location
            ),
            culprit.claimed_location,
        )
        .implicating(culprit_id)
        .on_day(3),
    ];

    for (index, innocent) in innocents.iter().enumerate() {
        clues.push(
            Clue::new(
                ClueId::new(format!("alibi_{}", innocent.id))?,
                innocent.alibi_proof,
                innocent.claimed_location,
            )
            .exculpating(SuspectId::new(innocent.id)?)
            .on_day(if index % 2 == 0 { 2 } else { 3 }),
        );
    }

    if let Some(target) = herring_target {
        clues.push(
            Clue::new(
                ClueId::new("loose_end")?,
                scenario.red_herring,
                scenario.location,
            )
            .implicating(SuspectId::new(target.id)?),
        );
    }

    Ok(clues)
}
