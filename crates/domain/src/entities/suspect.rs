//! Suspect entity - a person of interest with a persona and an alibi
//!
//! Persona behavior is pure data: the dialogue engine reads the persona descriptor
//! and the permitted-knowledge list, so every suspect is driven by the same code path.

use serde::{Deserialize, Serialize};

use crate::ids::SuspectId;
use crate::value_objects::{Description, SuspectName};

/// A suspect in a case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suspect {
    pub id: SuspectId,
    pub name: SuspectName,
    /// How this suspect talks and behaves under questioning
    pub persona: Persona,
    /// Where the suspect claims to have been
    pub alibi: Alibi,
    /// Exactly one suspect per case has this set
    pub is_guilty: bool,
    /// Facts this suspect may draw on when answering (beyond their own persona)
    #[serde(default)]
    pub knowledge: Vec<String>,
}

impl Suspect {
    pub fn new(id: SuspectId, name: SuspectName, persona: Persona, alibi: Alibi) -> Self {
        Self {
            id,
            name,
            persona,
            alibi,
            is_guilty: false,
            knowledge: Vec::new(),
        }
    }

    pub fn guilty(mut self) -> Self {
        self.is_guilty = true;
        self
    }

    pub fn with_knowledge(mut self, fact: impl Into<String>) -> Self {
        self.knowledge.push(fact.into());
        self
    }
}

/// Persona descriptor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    /// One-line public description shown to the player
    pub description: Description,
    /// Speaking tone (e.g., "nervous", "haughty")
    pub tone: String,
    /// Private backstory fed to the model
    pub backstory: Description,
    pub relationship_to_victim: String,
}

impl Persona {
    pub fn new(description: Description, tone: impl Into<String>) -> Self {
        Self {
            description,
            tone: tone.into(),
            backstory: Description::empty(),
            relationship_to_victim: String::new(),
        }
    }

    pub fn with_backstory(mut self, backstory: Description) -> Self {
        self.backstory = backstory;
        self
    }

    pub fn with_relationship(mut self, relationship: impl Into<String>) -> Self {
        self.relationship_to_victim = relationship.into();
        self
    }
}

/// A suspect's claimed whereabouts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Alibi {
    /// The suspect's statement in their own words
    pub statement: String,
    /// e.g., "9pm - 11pm"
    pub time_range: String,
    pub claimed_location: String,
}

impl Alibi {
    pub fn new(
        statement: impl Into<String>,
        time_range: impl Into<String>,
        claimed_location: impl Into<String>,
    ) -> Self {
        Self {
            statement: statement.into(),
            time_range: time_range.into(),
            claimed_location: claimed_location.into(),
        }
    }
}
