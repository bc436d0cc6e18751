//! Built-in scenario bank.
//!
//! A scenario fixes the cast and setting. The seed then picks which suspect is the
//! culprit, which motive and method apply and the order the cast is presented in.

pub(super) struct SuspectTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub tone: &'static str,
    pub backstory: &'static str,
    pub relationship: &'static str,
    pub alibi: &'static str,
    pub time_range: &'static str,
    pub claimed_location: &'static str,
    /// Confirms the alibi when this suspect is innocent.
    pub alibi_proof: &'static str,
    pub knowledge: &'static [&'static str],
}

pub(super) struct VariantTemplate {
    /// Ground truth text
    pub truth: &'static str,
    pub clue_id: &'static str,
    /// Evidence text; `{culprit}` is replaced with the culprit's name
    pub clue: &'static str,
    pub clue_location: &'static str,
}

pub(super) struct ScenarioTemplate {
    pub title: &'static str,
    pub victim: &'static str,
    pub location: &'static str,
    pub intro: &'static str,
    pub crime_scene: &'static str,
    pub red_herring: &'static str,
    pub suspects: &'static [SuspectTemplate],
    pub motives: &'static [VariantTemplate],
    pub methods: &'static [VariantTemplate],
}

pub(super) const SCENARIOS: &[ScenarioTemplate] = &[
    ScenarioTemplate {
        title: "Death at Ravenscroft Manor",
        victim: "Lord Edmund Ravenscroft",
        location: "the library of Ravenscroft Manor",
        intro: "A winter storm has cut Ravenscroft Manor off from the village. At midnight \
                Lord Edmund Ravenscroft was found dead in his library, the door locked from \
                the inside. Four people had reason to be in the house tonight.",
        crime_scene: "Lord Ravenscroft lies beside the hearth. The library door was locked \
                      and the key is missing.",
        red_herring: "A muddy boot print by the library window",
        suspects: &[
            SuspectTemplate {
                id: "vivian",
                name: "Vivian",
                description: "Lord Ravenscroft's niece, a painter with expensive tastes",
                tone: "sharp and theatrical",
                backstory: "Vivian came back from Paris last spring, penniless after a failed \
                            exhibition. Her uncle paid her debts and never let her forget it.",
                relationship: "niece",
                alibi: "I was in the conservatory finishing a sketch of the orchids.",
                time_range: "10pm - 12am",
                claimed_location: "the conservatory",
                alibi_proof: "A dated orchid sketch still wet with charcoal fixative",
                knowledge: &[
                    "Her uncle planned to sell the family paintings",
                    "She heard raised voices from the library around eleven",
                ],
            },
            SuspectTemplate {
                id: "hale",
                name: "Hale",
                description: "The butler, thirty years in service",
                tone: "formal and guarded",
                backstory: "Hale has kept the household running since before Lord Ravenscroft \
                            inherited. He was recently told his pension would be cut.",
                relationship: "butler",
                alibi: "I was locking up the wine cellar and checking the shutters.",
                time_range: "10:30pm - 11:45pm",
                claimed_location: "the wine cellar",
                alibi_proof: "The cellar ledger signed by Hale at 11:20pm",
                knowledge: &[
                    "The library key hangs on a hook in the pantry",
                    "Lord Ravenscroft received a visitor's letter that morning",
                ],
            },
            SuspectTemplate {
                id: "margaret",
                name: "Margaret",
                description: "Lady Ravenscroft, the victim's second wife",
                tone: "cool and composed",
                backstory: "Margaret married Lord Ravenscroft three years ago. The village \
                            whispers that the marriage was one of convenience.",
                relationship: "wife",
                alibi: "I retired early with a headache and read in my room.",
                time_range: "9:30pm - 12am",
                claimed_location: "her bedroom",
                alibi_proof: "The maid's note of delivering tea to Lady Ravenscroft at 11pm",
                knowledge: &[
                    "Her husband was redrafting his will",
                    "He had quarrelled with Doctor Finch about money",
                ],
            },
            SuspectTemplate {
                id: "finch",
                name: "Finch",
                description: "Doctor Finch, the family physician and an old friend",
                tone: "affable but evasive",
                backstory: "Doctor Finch borrowed heavily from Lord Ravenscroft to keep his \
                            practice afloat. The loan was due at the end of the month.",
                relationship: "family physician",
                alibi: "I was playing patience in the drawing room.",
                time_range: "10pm - 11:30pm",
                claimed_location: "the drawing room",
                alibi_proof: "A finished game of patience with the fire still banked beside it",
                knowledge: &[
                    "Lord Ravenscroft took a sleeping draught most nights",
                    "Vivian had asked her uncle for money again",
                ],
            },
        ],
        motives: &[
            VariantTemplate {
                truth: "to inherit before the will was changed",
                clue_id: "draft_will",
                clue: "A half-burned draft of a new will that cuts {culprit} out entirely",
                clue_location: "the library fireplace",
            },
            VariantTemplate {
                truth: "to escape a crushing debt owed to the victim",
                clue_id: "promissory_note",
                clue: "A promissory note signed by {culprit}, stamped overdue",
                clue_location: "the victim's desk drawer",
            },
            VariantTemplate {
                truth: "revenge for a ruined reputation",
                clue_id: "torn_letter",
                clue: "A torn letter in which the victim threatens to expose {culprit}",
                clue_location: "the wastepaper basket",
            },
        ],
        methods: &[
            VariantTemplate {
                truth: "poisoned the evening brandy with arsenic",
                clue_id: "brandy_glass",
                clue: "A brandy glass with a bitter residue, smudged with {culprit}'s fingerprints",
                clue_location: "the side table",
            },
            VariantTemplate {
                truth: "struck him with a brass candlestick",
                clue_id: "candlestick",
                clue: "A dented brass candlestick wiped clean, wrapped in {culprit}'s handkerchief",
                clue_location: "behind the curtains",
            },
        ],
    },
    ScenarioTemplate {
        title: "Murder on the Night Express",
        victim: "Mr Julian Crane",
        location: "compartment 7 of the night express",
        intro: "The night express from Vienna stopped for snow on the line. When the \
                steward brought breakfast, financier Julian Crane was dead in compartment 7. \
                Four passengers in his carriage are still aboard.",
        crime_scene: "Julian Crane is slumped in his seat. The compartment window is \
                      latched and his briefcase has been forced open.",
        red_herring: "A conductor's cap found in the corridor outside compartment 7",
        suspects: &[
            SuspectTemplate {
                id: "rosa",
                name: "Rosa",
                description: "A jazz singer travelling to a new engagement",
                tone: "warm and teasing",
                backstory: "Rosa once sang at a club Crane owned. He closed it overnight and \
                            kept the takings.",
                relationship: "former employee",
                alibi: "I was rehearsing in the dining car with the pianist.",
                time_range: "11pm - 1am",
                claimed_location: "the dining car",
                alibi_proof: "The dining car pianist's set list with Rosa's encores marked",
                knowledge: &[
                    "Crane was expecting someone to meet him at the next station",
                    "She saw the steward carrying two cups of cocoa",
                ],
            },
            SuspectTemplate {
                id: "otto",
                name: "Otto",
                description: "Crane's personal secretary",
                tone: "precise and nervous",
                backstory: "Otto has handled Crane's correspondence for six years and knows \
                            where every secret is filed.",
                relationship: "secretary",
                alibi: "I was typing letters in my own compartment.",
                time_range: "10:30pm - 12:30am",
                claimed_location: "compartment 8",
                alibi_proof: "A stack of letters typed and dated that night, ribbon still warm",
                knowledge: &[
                    "Crane had moved money into a numbered account",
                    "The briefcase held share certificates",
                ],
            },
            SuspectTemplate {
                id: "ines",
                name: "Ines",
                description: "A widowed countess with a quick temper",
                tone: "haughty and impatient",
                backstory: "Ines lost her late husband's fortune in one of Crane's schemes.",
                relationship: "investor",
                alibi: "I was asleep. I took a powder for the motion of the train.",
                time_range: "10pm - 7am",
                claimed_location: "compartment 5",
                alibi_proof: "The attendant's log of Ines ringing for water at midnight",
                knowledge: &[
                    "Crane boasted of a deal that would ruin a rival",
                    "Otto argued with Crane on the platform in Vienna",
                ],
            },
            SuspectTemplate {
                id: "dmitri",
                name: "Dmitri",
                description: "A young engineer inspecting the line",
                tone: "blunt and restless",
                backstory: "Dmitri's father went to prison for a fraud Crane arranged.",
                relationship: "son of a former partner",
                alibi: "I was in the guard's van checking the brake couplings.",
                time_range: "11:30pm - 12:30am",
                claimed_location: "the guard's van",
                alibi_proof: "The guard's inspection sheet countersigned by Dmitri",
                knowledge: &[
                    "The train stopped for twenty minutes near midnight",
                    "Someone walked the roof between carriages",
                ],
            },
        ],
        motives: &[
            VariantTemplate {
                truth: "to steal the share certificates and the money they were worth",
                clue_id: "certificate_stub",
                clue: "A share certificate stub tucked into {culprit}'s luggage",
                clue_location: "the luggage rack",
            },
            VariantTemplate {
                truth: "revenge for a family ruined by his fraud",
                clue_id: "old_photograph",
                clue: "An old newspaper photograph of Crane, defaced, kept by {culprit}",
                clue_location: "the corridor bin",
            },
        ],
        methods: &[
            VariantTemplate {
                truth: "stabbed him with a letter opener",
                clue_id: "letter_opener",
                clue: "A silver letter opener with blood in the engraving, traced to {culprit}",
                clue_location: "under the seat cushion",
            },
            VariantTemplate {
                truth: "poisoned his cocoa with sleeping powder",
                clue_id: "powder_packet",
                clue: "An empty powder packet in the pocket of {culprit}'s coat",
                clue_location: "the coat hooks",
            },
            VariantTemplate {
                truth: "strangled him with a silk scarf",
                clue_id: "silk_scarf",
                clue: "A creased silk scarf with a torn hem, the same as one {culprit} wore at dinner",
                clue_location: "the window blind",
            },
        ],
    },
    ScenarioTemplate {
        title: "The Lighthouse Keeper's Secret",
        victim: "Keeper Tobias Marsh",
        location: "the lamp room of Gull Point lighthouse",
        intro: "At dawn the Gull Point light was dark for the first time in forty years. \
                Keeper Tobias Marsh lay at the foot of the lamp room stairs. Only three \
                people could have reached the island on last night's tide.",
        crime_scene: "Tobias Marsh lies at the bottom of the spiral stairs. The lamp was \
                      put out by hand.",
        red_herring: "A fisherman's knife left on the jetty",
        suspects: &[
            SuspectTemplate {
                id: "nell",
                name: "Nell",
                description: "Tobias's daughter, who runs the supply boat",
                tone: "quiet and wary",
                backstory: "Nell wants to sell the island to a hotel company. Her father refused.",
                relationship: "daughter",
                alibi: "I was mending nets in the boathouse until the tide turned.",
                time_range: "8pm - 11pm",
                claimed_location: "the boathouse",
                alibi_proof: "A freshly mended net with the tide-mark timing chalked on the wall",
                knowledge: &[
                    "Her father kept a strongbox under the lamp room floor",
                    "A stranger asked about the island in the harbour pub",
                ],
            },
            SuspectTemplate {
                id: "silas",
                name: "Silas",
                description: "The assistant keeper, newly arrived",
                tone: "eager and talkative",
                backstory: "Silas came with glowing references that nobody has checked.",
                relationship: "assistant keeper",
                alibi: "I was logging the weather in the watch room.",
                time_range: "9pm - 12am",
                claimed_location: "the watch room",
                alibi_proof: "Hourly weather entries in Silas's hand through to midnight",
                knowledge: &[
                    "Tobias wrote to the coastguard about smugglers",
                    "He heard footsteps on the gallery around ten",
                ],
            },
            SuspectTemplate {
                id: "abel",
                name: "Abel",
                description: "A retired smuggler who fishes off the rocks",
                tone: "gruff and sardonic",
                backstory: "Abel and Tobias were friends until Tobias reported his boat.",
                relationship: "old friend",
                alibi: "I was on the rocks waiting for the bass to bite.",
                time_range: "9:30pm - 11:30pm",
                claimed_location: "the north rocks",
                alibi_proof: "A bucket of bass with Abel's hooks and a lantern burnt to the stub",
                knowledge: &[
                    "Tobias had a second set of keys made",
                    "Nell argued with her father on the jetty",
                ],
            },
        ],
        motives: &[
            VariantTemplate {
                truth: "to get the island sold for the money",
                clue_id: "hotel_contract",
                clue: "An unsigned hotel sale contract with {culprit}'s notes in the margin",
                clue_location: "the keeper's desk",
            },
            VariantTemplate {
                truth: "to silence him before he exposed the smuggling",
                clue_id: "coastguard_letter",
                clue: "An unsent letter to the coastguard naming {culprit}",
                clue_location: "the strongbox",
            },
        ],
        methods: &[
            VariantTemplate {
                truth: "pushed him down the stairs in a fall",
                clue_id: "torn_sleeve",
                clue: "A scrap of oilskin caught on the stair rail, torn from {culprit}'s jacket",
                clue_location: "the spiral stairs",
            },
            VariantTemplate {
                truth: "hit him over the head with a wrench",
                clue_id: "lamp_wrench",
                clue: "A heavy lamp wrench with blood on the grip, last signed out by {culprit}",
                clue_location: "the tool locker",
            },
        ],
    },
];
