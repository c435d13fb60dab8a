//! Static catalog of event templates.
//!
//! Descriptions may contain `{planetName}`, `{planetType}`, `{starName}` and
//! `{starClass}`; they are filled in when an event instance is generated.

use crate::events::{Applicability, Choice, EventTemplate, Outcome, Rarity, RiskTier};
use crate::planet_types::PlanetType;

pub static TEMPLATES: &[EventTemplate] = &[
    // universal
    EventTemplate {
        id: "distress_beacon",
        title: "Distress Beacon",
        description: "A faint distress signal pulses from the surface of {planetName}. The signal is old, perhaps decades, but the pattern is unmistakably human-made.",
        applies_to: Applicability::Universal,
        rarity: Rarity::Common,
        choices: &[
            Choice {
                label: "Investigate the source",
                risk: RiskTier::Medium,
                success_rate: 0.6,
                success: Outcome::new([5, 15], [8, 20], Some("Found a damaged survey probe with valuable star charts stored in its memory banks.")),
                failure: Some(Outcome::new([-8, -4], [2, 5], Some("The signal was a trap, an automated decoy protecting a collapsed structure. Minor hull damage from debris."))),
            },
            Choice {
                label: "Scan from orbit",
                risk: RiskTier::Safe,
                success_rate: 1.0,
                success: Outcome::new([0, 0], [4, 10], Some("Remote scans reveal the beacon belongs to a long-lost survey vessel. Location logged.")),
                failure: None,
            },
            Choice {
                label: "Mark and move on",
                risk: RiskTier::Safe,
                success_rate: 1.0,
                success: Outcome::new([0, 0], [1, 3], None),
                failure: None,
            },
        ],
    },
    EventTemplate {
        id: "derelict_ship",
        title: "Derelict Vessel",
        description: "Sensors detect a drifting ship hull in orbit around {planetName}. No life signs. The vessel's design doesn't match any known registry.",
        applies_to: Applicability::Universal,
        rarity: Rarity::Common,
        choices: &[
            Choice {
                label: "Board and salvage",
                risk: RiskTier::Medium,
                success_rate: 0.55,
                success: Outcome::new([10, 25], [10, 25], Some("The ship's cargo hold still contains sealed fuel canisters and encrypted data cores.")),
                failure: Some(Outcome::new([-5, -2], [3, 8], Some("Structural collapse during salvage. Managed to grab a few data chips before evacuating."))),
            },
            Choice {
                label: "Scan the hull remotely",
                risk: RiskTier::Safe,
                success_rate: 1.0,
                success: Outcome::new([0, 0], [6, 14], Some("External analysis reveals an unknown alloy composition. Valuable metallurgical data recorded.")),
                failure: None,
            },
        ],
    },
    EventTemplate {
        id: "cosmic_anomaly",
        title: "Cosmic Anomaly",
        description: "Instruments are registering impossible readings near {planetName}. Space-time appears to be subtly warped in a localized region.",
        applies_to: Applicability::Universal,
        rarity: Rarity::Uncommon,
        choices: &[
            Choice {
                label: "Approach cautiously",
                risk: RiskTier::High,
                success_rate: 0.45,
                success: Outcome::new([0, 0], [20, 40], Some("The anomaly is a natural wormhole echo. The readings rewrite several chapters of theoretical physics.")),
                failure: Some(Outcome::new([-15, -8], [5, 10], Some("Gravitational shear nearly tears the hull apart. Emergency retreat, but some sensor data was captured."))),
            },
            Choice {
                label: "Deploy remote probe",
                risk: RiskTier::Low,
                success_rate: 0.85,
                success: Outcome::new([0, 0], [10, 18], Some("The probe transmits stunning data before dissolving into the anomaly.")),
                failure: Some(Outcome::new([0, 0], [3, 6], Some("Probe lost immediately. Only baseline telemetry recovered."))),
            },
            Choice {
                label: "Log coordinates and leave",
                risk: RiskTier::Safe,
                success_rate: 1.0,
                success: Outcome::new([0, 0], [2, 5], None),
                failure: None,
            },
        ],
    },
    EventTemplate {
        id: "pirate_cache",
        title: "Hidden Cache",
        description: "A concealed signal leads to a camouflaged supply depot in the shadow of {planetName}. Someone went to great lengths to hide this.",
        applies_to: Applicability::Universal,
        rarity: Rarity::Uncommon,
        choices: &[
            Choice {
                label: "Crack the locks",
                risk: RiskTier::Medium,
                success_rate: 0.65,
                success: Outcome::new([15, 30], [5, 12], Some("Fuel cells, spare parts, and a cryptic star map. Someone was planning a long journey.")),
                failure: Some(Outcome::new([-5, -2], [2, 5], Some("Anti-tamper charges destroyed most of the contents. Recovered fragments of a navigation log."))),
            },
            Choice {
                label: "Take what's accessible",
                risk: RiskTier::Safe,
                success_rate: 1.0,
                success: Outcome::new([5, 12], [3, 7], Some("External containers yield modest supplies. The main vault remains sealed.")),
                failure: None,
            },
        ],
    },
    EventTemplate {
        id: "ancient_probe",
        title: "Ancient Probe",
        description: "An object of clearly artificial origin drifts near {planetName}. Its design is alien, geometric, precise, and impossibly old.",
        applies_to: Applicability::Universal,
        rarity: Rarity::Rare,
        choices: &[
            Choice {
                label: "Attempt to interface",
                risk: RiskTier::High,
                success_rate: 0.4,
                success: Outcome::new([0, 0], [30, 50], Some("The probe accepts your signal and transmits a burst of data in an unknown format. Your computers will need years to decode it all.")),
                failure: Some(Outcome::new([-10, -5], [8, 15], Some("The probe emits an electromagnetic pulse before going dark. Some peripheral data was captured, but ship systems took damage."))),
            },
            Choice {
                label: "Observe and document",
                risk: RiskTier::Safe,
                success_rate: 1.0,
                success: Outcome::new([0, 0], [10, 20], Some("High-resolution imaging and spectral analysis of the probe's surface. A remarkable discovery.")),
                failure: None,
            },
        ],
    },
    EventTemplate {
        id: "radiation_storm",
        title: "Radiation Storm",
        description: "A wave of intense radiation is sweeping across {planetName}. The storm is interfering with sensors but may reveal hidden planetary features.",
        applies_to: Applicability::Universal,
        rarity: Rarity::Common,
        choices: &[
            Choice {
                label: "Ride it out and scan",
                risk: RiskTier::Medium,
                success_rate: 0.6,
                success: Outcome::new([0, 0], [12, 22], Some("The radiation illuminates subsurface structures normally invisible to scanners. Extraordinary geological data.")),
                failure: Some(Outcome::new([-6, -3], [3, 7], Some("Sensor overload. The storm was more intense than predicted. Partial data recovered."))),
            },
            Choice {
                label: "Shield and wait",
                risk: RiskTier::Safe,
                success_rate: 1.0,
                success: Outcome::new([-2, -1], [4, 8], Some("Passive readings from behind shields still yield useful atmospheric data.")),
                failure: None,
            },
        ],
    },
    EventTemplate {
        id: "micro_singularity",
        title: "Micro-Singularity",
        description: "A pinpoint gravitational anomaly orbits {planetName}. It's too small to be a black hole, but too strong to be natural debris.",
        applies_to: Applicability::Universal,
        rarity: Rarity::Rare,
        choices: &[
            Choice {
                label: "Attempt capture with tractor beam",
                risk: RiskTier::Extreme,
                success_rate: 0.3,
                success: Outcome::new([0, 0], [40, 60], Some("The singularity is stabilized in a containment field. This could revolutionize energy research.")),
                failure: Some(Outcome::new([-20, -12], [5, 12], Some("The singularity evaporates in a burst of Hawking radiation. Significant damage to external arrays."))),
            },
            Choice {
                label: "Study from safe distance",
                risk: RiskTier::Low,
                success_rate: 0.9,
                success: Outcome::new([0, 0], [15, 25], Some("Detailed gravitational mapping of the singularity. Its quantum properties defy standard models.")),
                failure: Some(Outcome::new([0, 0], [5, 8], Some("The singularity decayed before measurements could complete."))),
            },
        ],
    },
    EventTemplate {
        id: "communication_fragment",
        title: "Signal Fragment",
        description: "A repeating transmission is bouncing off {planetName}'s atmosphere. The signal appears to originate from outside this galaxy cluster.",
        applies_to: Applicability::Universal,
        rarity: Rarity::Uncommon,
        choices: &[
            Choice {
                label: "Decode the signal",
                risk: RiskTier::Low,
                success_rate: 0.75,
                success: Outcome::new([0, 0], [12, 22], Some("The signal contains a mathematical sequence, a prime number progression. This is not natural.")),
                failure: Some(Outcome::new([0, 0], [4, 8], Some("Decoding fails, the signal degrades too quickly. Partial frequency analysis stored."))),
            },
            Choice {
                label: "Record raw transmission",
                risk: RiskTier::Safe,
                success_rate: 1.0,
                success: Outcome::new([0, 0], [5, 10], Some("Raw waveform captured for later analysis.")),
                failure: None,
            },
        ],
    },
    EventTemplate {
        id: "space_whale",
        title: "Void Leviathan",
        description: "Something immense is moving through the void near {planetName}. Bio-luminescent, kilometers long, and absolutely alive.",
        applies_to: Applicability::Universal,
        rarity: Rarity::Rare,
        choices: &[
            Choice {
                label: "Follow at a distance",
                risk: RiskTier::Medium,
                success_rate: 0.7,
                success: Outcome::new([-5, -2], [20, 35], Some("The creature leads you through a region rich in exotic particles. Its migration route is now charted.")),
                failure: Some(Outcome::new([-10, -5], [5, 10], Some("The creature takes notice and emits a powerful electromagnetic burst. Systems scrambled."))),
            },
            Choice {
                label: "Observe and catalog",
                risk: RiskTier::Safe,
                success_rate: 1.0,
                success: Outcome::new([0, 0], [10, 18], Some("High-resolution holographic recording of a spacefaring organism. A biological impossibility, now proven real.")),
                failure: None,
            },
        ],
    },
    EventTemplate {
        id: "smuggler_stash",
        title: "Smuggler's Stash",
        description: "Tucked in a crater on {planetName}, a cleverly disguised cargo pod sits waiting. Its transponder pings with an obsolete merchant code.",
        applies_to: Applicability::Universal,
        rarity: Rarity::Common,
        choices: &[
            Choice {
                label: "Open it",
                risk: RiskTier::Low,
                success_rate: 0.8,
                success: Outcome::new([8, 18], [3, 8], Some("Fuel reserves and processed minerals. Whoever stashed this never came back.")),
                failure: Some(Outcome::new([-3, -1], [1, 3], Some("The pod is rigged with a corrosive agent. Minor damage, minimal contents."))),
            },
            Choice {
                label: "Scan contents first",
                risk: RiskTier::Safe,
                success_rate: 1.0,
                success: Outcome::new([4, 8], [2, 5], Some("Non-invasive scans identify useful materials. Safe extraction.")),
                failure: None,
            },
        ],
    },
    EventTemplate {
        id: "temporal_echo",
        title: "Temporal Echo",
        description: "For a brief moment, sensors detect a duplicate of your own ship near {planetName}, same transponder code, same energy signature. Then it vanishes.",
        applies_to: Applicability::Universal,
        rarity: Rarity::Rare,
        choices: &[
            Choice {
                label: "Investigate the coordinates",
                risk: RiskTier::High,
                success_rate: 0.5,
                success: Outcome::new([0, 0], [25, 45], Some("Temporal residue at the location contains information from a possible future. The implications are staggering.")),
                failure: Some(Outcome::new([-12, -6], [5, 12], Some("The temporal field collapses violently. Systems damaged but the chronal data is preserved."))),
            },
            Choice {
                label: "Log it as an anomaly",
                risk: RiskTier::Safe,
                success_rate: 1.0,
                success: Outcome::new([0, 0], [5, 10], Some("The echo is documented. Perhaps future visits will shed more light.")),
                failure: None,
            },
        ],
    },
    EventTemplate {
        id: "mineral_vein",
        title: "Exposed Mineral Vein",
        description: "Surface scans of {planetName} reveal a massive mineral deposit exposed by recent geological activity. Rich in rare elements.",
        applies_to: Applicability::Universal,
        rarity: Rarity::Common,
        choices: &[
            Choice {
                label: "Extract samples",
                risk: RiskTier::Low,
                success_rate: 0.8,
                success: Outcome::new([5, 12], [8, 16], Some("High-purity mineral samples collected. The deposit contains several elements not in standard databases.")),
                failure: Some(Outcome::new([-3, -1], [3, 6], Some("Extraction disturbs the geological formation. Limited samples recovered before retreating."))),
            },
            Choice {
                label: "Spectral analysis only",
                risk: RiskTier::Safe,
                success_rate: 1.0,
                success: Outcome::new([0, 0], [5, 10], Some("Detailed compositional data logged from orbit.")),
                failure: None,
            },
        ],
    },
    // terran
    EventTemplate {
        id: "colony_ruins",
        title: "Colony Ruins",
        description: "Overgrown structures on {planetName} tell the story of a failed settlement. Nature has reclaimed most of it, but central buildings remain intact.",
        applies_to: Applicability::Only(&[PlanetType::Terran]),
        rarity: Rarity::Common,
        choices: &[
            Choice {
                label: "Explore the structures",
                risk: RiskTier::Medium,
                success_rate: 0.65,
                success: Outcome::new([5, 12], [12, 25], Some("Personal logs reveal the colony was abandoned due to seismic instability. Their research data is invaluable.")),
                failure: Some(Outcome::new([-5, -2], [4, 8], Some("A floor gives way. Emergency extraction needed, but some records were recovered."))),
            },
            Choice {
                label: "Aerial survey",
                risk: RiskTier::Safe,
                success_rate: 1.0,
                success: Outcome::new([0, 0], [6, 12], Some("Mapping the ruins from above reveals a settlement pattern suggesting advanced urban planning.")),
                failure: None,
            },
        ],
    },
    EventTemplate {
        id: "primitive_life",
        title: "Primitive Life Signs",
        description: "Bioscanners detect complex organic molecules and possible microbial colonies on {planetName}'s surface. This could be first-contact territory.",
        applies_to: Applicability::Only(&[PlanetType::Terran]),
        rarity: Rarity::Uncommon,
        choices: &[
            Choice {
                label: "Collect samples",
                risk: RiskTier::Medium,
                success_rate: 0.7,
                success: Outcome::new([0, 0], [15, 30], Some("Confirmed: multicellular organisms with a unique amino acid structure. This changes everything.")),
                failure: Some(Outcome::new([-4, -2], [5, 10], Some("Contamination protocols triggered. Samples compromised, but spectral data preserved."))),
            },
            Choice {
                label: "Non-invasive observation",
                risk: RiskTier::Safe,
                success_rate: 1.0,
                success: Outcome::new([0, 0], [8, 16], Some("Detailed recordings of possible biological activity. Inconclusive but promising.")),
                failure: None,
            },
        ],
    },
    EventTemplate {
        id: "breathable_atm",
        title: "Breathable Pocket",
        description: "A sheltered valley on {planetName} maintains atmospheric conditions within human tolerance. Temperature, pressure, oxygen, all viable.",
        applies_to: Applicability::Only(&[PlanetType::Terran]),
        rarity: Rarity::Uncommon,
        choices: &[
            Choice {
                label: "Land and explore on foot",
                risk: RiskTier::Medium,
                success_rate: 0.6,
                success: Outcome::new([-3, -1], [12, 22], Some("Walking on alien soil under an alien sky. Soil and air samples will be studied for decades.")),
                failure: Some(Outcome::new([-8, -4], [5, 10], Some("Unexpected weather system forced emergency liftoff. Limited ground data collected."))),
            },
            Choice {
                label: "Drop atmospheric probes",
                risk: RiskTier::Safe,
                success_rate: 1.0,
                success: Outcome::new([0, 0], [6, 14], Some("Probes confirm stable conditions. This location is flagged as a potential settlement site.")),
                failure: None,
            },
        ],
    },
    EventTemplate {
        id: "tectonic_readings",
        title: "Tectonic Activity",
        description: "Seismic sensors detect unusual periodic tremors on {planetName}. The pattern is too regular to be natural plate tectonics.",
        applies_to: Applicability::Only(&[PlanetType::Terran]),
        rarity: Rarity::Common,
        choices: &[
            Choice {
                label: "Deploy deep-core probe",
                risk: RiskTier::Medium,
                success_rate: 0.6,
                success: Outcome::new([0, 0], [10, 20], Some("The tremors originate from a massive subsurface cavity. Something resonates down there.")),
                failure: Some(Outcome::new([-4, -2], [3, 7], Some("Probe crushed by tectonic pressure. Partial data transmitted before loss."))),
            },
            Choice {
                label: "Record surface data",
                risk: RiskTier::Safe,
                success_rate: 1.0,
                success: Outcome::new([0, 0], [5, 10], Some("Seismic waveform analysis cataloged.")),
                failure: None,
            },
        ],
    },
    // desert
    EventTemplate {
        id: "buried_vault",
        title: "Buried Vault",
        description: "Ground-penetrating radar reveals a sealed chamber beneath the dunes of {planetName}. The structure is far older than any known civilization.",
        applies_to: Applicability::Only(&[PlanetType::Desert]),
        rarity: Rarity::Uncommon,
        choices: &[
            Choice {
                label: "Excavate the entrance",
                risk: RiskTier::High,
                success_rate: 0.5,
                success: Outcome::new([0, 0], [20, 35], Some("Inside: preserved artifacts of unknown origin. Crystal tablets covered in mathematical notation.")),
                failure: Some(Outcome::new([-8, -4], [5, 12], Some("The vault's internal atmosphere ignites on contact with outside air. Explosion damages equipment."))),
            },
            Choice {
                label: "Scan through the walls",
                risk: RiskTier::Safe,
                success_rate: 1.0,
                success: Outcome::new([0, 0], [8, 15], Some("Non-invasive scans map the vault's interior. Multiple chambers with metallic objects detected.")),
                failure: None,
            },
        ],
    },
    EventTemplate {
        id: "heat_minerals",
        title: "Heat-Forged Minerals",
        description: "Extreme surface temperatures on {planetName} have created crystals of extraordinary purity. They gleam through the heat haze like scattered stars.",
        applies_to: Applicability::Only(&[PlanetType::Desert]),
        rarity: Rarity::Common,
        choices: &[
            Choice {
                label: "Surface collection run",
                risk: RiskTier::Medium,
                success_rate: 0.65,
                success: Outcome::new([8, 15], [5, 12], Some("Crystals collected. Their lattice structure could improve fuel cell efficiency.")),
                failure: Some(Outcome::new([-5, -2], [2, 5], Some("Heat damage to collection equipment. Minimal samples secured."))),
            },
            Choice {
                label: "Remote analysis",
                risk: RiskTier::Safe,
                success_rate: 1.0,
                success: Outcome::new([0, 0], [4, 9], Some("Spectral data on the crystal formations logged.")),
                failure: None,
            },
        ],
    },
    EventTemplate {
        id: "sandstorm_data",
        title: "Megastorm",
        description: "A planet-wide sandstorm on {planetName} generates massive electrical discharges. The storm's electromagnetic signature contains structured patterns.",
        applies_to: Applicability::Only(&[PlanetType::Desert]),
        rarity: Rarity::Common,
        choices: &[
            Choice {
                label: "Fly into the storm edge",
                risk: RiskTier::High,
                success_rate: 0.45,
                success: Outcome::new([-5, -2], [15, 28], Some("Lightning-created glass formations on the surface contain frozen electromagnetic memories. Unprecedented.")),
                failure: Some(Outcome::new([-12, -6], [3, 8], Some("The storm was stronger than models predicted. Emergency ascent. Ship battered but intact."))),
            },
            Choice {
                label: "Monitor from orbit",
                risk: RiskTier::Safe,
                success_rate: 1.0,
                success: Outcome::new([0, 0], [6, 12], Some("Storm dynamics recorded. The electrical patterns suggest a self-organizing system.")),
                failure: None,
            },
        ],
    },
    EventTemplate {
        id: "fossilized_life",
        title: "Fossil Field",
        description: "Erosion on {planetName} has exposed a vast bed of fossilized organisms. These creatures lived millions of years ago in a now-vanished ocean.",
        applies_to: Applicability::Only(&[PlanetType::Desert]),
        rarity: Rarity::Uncommon,
        choices: &[
            Choice {
                label: "Excavate specimens",
                risk: RiskTier::Low,
                success_rate: 0.8,
                success: Outcome::new([0, 0], [12, 22], Some("Pristine fossils of beings that breathed methane. Their biology is unlike anything in known records.")),
                failure: Some(Outcome::new([-2, -1], [4, 8], Some("Specimens crumble on extraction. Imaging data preserved."))),
            },
            Choice {
                label: "Photograph and scan",
                risk: RiskTier::Safe,
                success_rate: 1.0,
                success: Outcome::new([0, 0], [6, 12], Some("Detailed 3D models of fossil structures compiled.")),
                failure: None,
            },
        ],
    },
    // ice
    EventTemplate {
        id: "subsurface_ocean",
        title: "Subsurface Ocean",
        description: "Thermal imaging reveals liquid water beneath {planetName}'s ice crust. The ocean is heated by tidal forces and may harbor life.",
        applies_to: Applicability::Only(&[PlanetType::Ice]),
        rarity: Rarity::Uncommon,
        choices: &[
            Choice {
                label: "Drill through the ice",
                risk: RiskTier::High,
                success_rate: 0.5,
                success: Outcome::new([-5, -2], [20, 35], Some("Contact with liquid water confirmed. Chemical analysis suggests complex organic chemistry.")),
                failure: Some(Outcome::new([-10, -5], [5, 10], Some("Drill head lost in a pressurized geyser eruption. Partial water samples recovered from spray."))),
            },
            Choice {
                label: "Sonar mapping",
                risk: RiskTier::Safe,
                success_rate: 1.0,
                success: Outcome::new([0, 0], [8, 15], Some("Ice-penetrating sonar reveals the ocean is 40km deep with thermal vents along the bottom.")),
                failure: None,
            },
        ],
    },
    EventTemplate {
        id: "cryo_vault",
        title: "Cryo-Preserved Data",
        description: "An artificial structure is encased in {planetName}'s ice. Inside, temperature-sensitive storage devices have been perfectly preserved.",
        applies_to: Applicability::Only(&[PlanetType::Ice]),
        rarity: Rarity::Uncommon,
        choices: &[
            Choice {
                label: "Thaw and extract",
                risk: RiskTier::Medium,
                success_rate: 0.6,
                success: Outcome::new([0, 0], [15, 30], Some("The storage devices contain navigational data from a civilization that mapped stars we haven't reached yet.")),
                failure: Some(Outcome::new([-4, -2], [5, 10], Some("Thermal shock destroys some devices. Partial data recovered from the most resilient cores."))),
            },
            Choice {
                label: "Scan through the ice",
                risk: RiskTier::Safe,
                success_rate: 1.0,
                success: Outcome::new([0, 0], [6, 12], Some("Non-invasive imaging captures the external structure. Data patterns visible but unreadable.")),
                failure: None,
            },
        ],
    },
    EventTemplate {
        id: "crystal_formations",
        title: "Crystal Caverns",
        description: "Crevasses on {planetName} lead to vast underground caverns lined with luminescent ice crystals. They pulse with an inner light.",
        applies_to: Applicability::Only(&[PlanetType::Ice]),
        rarity: Rarity::Common,
        choices: &[
            Choice {
                label: "Descend into the caverns",
                risk: RiskTier::Medium,
                success_rate: 0.65,
                success: Outcome::new([3, 8], [10, 20], Some("The crystals are natural energy capacitors. They store and release photons over millennia.")),
                failure: Some(Outcome::new([-6, -3], [3, 7], Some("An ice shelf collapses, trapping the probe. Remote-detonated charges free it with some crystal samples."))),
            },
            Choice {
                label: "Sample from the rim",
                risk: RiskTier::Safe,
                success_rate: 1.0,
                success: Outcome::new([0, 0], [5, 10], Some("Surface crystal samples collected. Their optical properties are remarkable.")),
                failure: None,
            },
        ],
    },
    // gas giant
    EventTemplate {
        id: "cloud_harvesting",
        title: "Cloud Harvesting",
        description: "The upper atmosphere of {planetName} is rich in hydrogen-3 and other fusion-grade fuels. A skimming run could replenish your tanks.",
        applies_to: Applicability::Only(&[PlanetType::GasGiant]),
        rarity: Rarity::Common,
        choices: &[
            Choice {
                label: "Deep atmospheric dive",
                risk: RiskTier::High,
                success_rate: 0.5,
                success: Outcome::new([20, 40], [5, 10], Some("Tanks filled to capacity. The dive also captured exotic atmospheric compounds.")),
                failure: Some(Outcome::new([-10, -5], [3, 6], Some("Unexpected pressure spike forces emergency ascent. Fuel spent exceeds fuel collected."))),
            },
            Choice {
                label: "Upper atmosphere skim",
                risk: RiskTier::Low,
                success_rate: 0.85,
                success: Outcome::new([10, 20], [3, 6], Some("Conservative skim yields solid fuel reserves.")),
                failure: Some(Outcome::new([2, 5], [1, 3], Some("Turbulence limits collection time. Modest reserves gathered."))),
            },
        ],
    },
    EventTemplate {
        id: "storm_dive",
        title: "Storm Formation",
        description: "A cyclone the size of a continent is forming on {planetName}. Wind speeds exceed 800 km/h. The storm's eye contains unusual readings.",
        applies_to: Applicability::Only(&[PlanetType::GasGiant]),
        rarity: Rarity::Uncommon,
        choices: &[
            Choice {
                label: "Dive into the eye",
                risk: RiskTier::Extreme,
                success_rate: 0.35,
                success: Outcome::new([0, 0], [25, 45], Some("The eye contains a stable anti-cyclone with exotic particles. A phenomenon never before documented.")),
                failure: Some(Outcome::new([-15, -8], [5, 12], Some("Caught by a wind shear. Emergency thrusters drain fuel reserves escaping the vortex."))),
            },
            Choice {
                label: "Observe from above",
                risk: RiskTier::Safe,
                success_rate: 1.0,
                success: Outcome::new([0, 0], [8, 15], Some("Storm dynamics recorded in detail. The formation pattern suggests deep atmospheric convection.")),
                failure: None,
            },
        ],
    },
    EventTemplate {
        id: "atmospheric_life",
        title: "Atmospheric Life",
        description: "Bio-luminescent organisms drift through {planetName}'s cloud bands. Vast colonies of gas-dwelling creatures, each kilometers across.",
        applies_to: Applicability::Only(&[PlanetType::GasGiant]),
        rarity: Rarity::Rare,
        choices: &[
            Choice {
                label: "Fly through a colony",
                risk: RiskTier::Medium,
                success_rate: 0.6,
                success: Outcome::new([0, 0], [20, 35], Some("The organisms communicate via bioluminescent pulses. You've captured a complete vocabulary of light patterns.")),
                failure: Some(Outcome::new([-8, -4], [8, 15], Some("The colony reacts defensively, acidic secretions damage external sensors. Partial data recovered."))),
            },
            Choice {
                label: "Observe at distance",
                risk: RiskTier::Safe,
                success_rate: 1.0,
                success: Outcome::new([0, 0], [10, 18], Some("Hours of footage documenting gas-giant biology. An entirely new branch of life.")),
                failure: None,
            },
        ],
    },
    EventTemplate {
        id: "magnetic_anomaly",
        title: "Magnetic Anomaly",
        description: "{planetName}'s magnetic field has a localized inversion. Compass readings spin wildly near the equator. Something is causing this.",
        applies_to: Applicability::Only(&[PlanetType::GasGiant]),
        rarity: Rarity::Common,
        choices: &[
            Choice {
                label: "Deploy magnetometer array",
                risk: RiskTier::Low,
                success_rate: 0.8,
                success: Outcome::new([0, 0], [10, 18], Some("The inversion is caused by a metallic asteroid core suspended deep in the atmosphere. Fascinating.")),
                failure: Some(Outcome::new([-2, -1], [3, 6], Some("Array scrambled by the magnetic field. Baseline measurements preserved."))),
            },
            Choice {
                label: "Record from orbit",
                risk: RiskTier::Safe,
                success_rate: 1.0,
                success: Outcome::new([0, 0], [5, 10], Some("Magnetic field topology mapped from safe distance.")),
                failure: None,
            },
        ],
    },
    // lava
    EventTemplate {
        id: "geothermal_energy",
        title: "Geothermal Source",
        description: "Intense geothermal vents on {planetName} radiate enough energy to power a small city. The heat could be converted to fuel.",
        applies_to: Applicability::Only(&[PlanetType::Lava]),
        rarity: Rarity::Common,
        choices: &[
            Choice {
                label: "Deploy thermal collectors",
                risk: RiskTier::Medium,
                success_rate: 0.6,
                success: Outcome::new([12, 22], [5, 10], Some("Thermal conversion successful. The vent composition suggests a deep mantle rich in rare earths.")),
                failure: Some(Outcome::new([-5, -2], [2, 5], Some("An eruption destroys the collectors. Heat damage to ship's undercarriage."))),
            },
            Choice {
                label: "Thermal imaging scan",
                risk: RiskTier::Safe,
                success_rate: 1.0,
                success: Outcome::new([0, 0], [5, 10], Some("Vent system mapped. The heat patterns reveal the planet's internal structure.")),
                failure: None,
            },
        ],
    },
    EventTemplate {
        id: "heat_artifact",
        title: "Heat-Shielded Artifact",
        description: "Something metallic glints in a lava flow on {planetName}. It should have melted, but it's structurally intact at 1,200°C.",
        applies_to: Applicability::Only(&[PlanetType::Lava]),
        rarity: Rarity::Rare,
        choices: &[
            Choice {
                label: "Retrieve with shielded drone",
                risk: RiskTier::High,
                success_rate: 0.45,
                success: Outcome::new([0, 0], [25, 40], Some("The artifact is a perfect sphere of unknown alloy. It's warm to the touch but contains intricate internal structures.")),
                failure: Some(Outcome::new([-8, -4], [5, 12], Some("Drone lost in a lava surge. Telemetry before loss suggests the artifact was artificially placed."))),
            },
            Choice {
                label: "Spectrometric analysis from orbit",
                risk: RiskTier::Safe,
                success_rate: 1.0,
                success: Outcome::new([0, 0], [8, 15], Some("The alloy has a melting point beyond any known material. Composition logged for further study.")),
                failure: None,
            },
        ],
    },
    EventTemplate {
        id: "volcanic_minerals",
        title: "Volcanic Deposits",
        description: "Recent eruptions on {planetName} have brought rare heavy elements to the surface. The cooling flows shimmer with metallic veins.",
        applies_to: Applicability::Only(&[PlanetType::Lava]),
        rarity: Rarity::Common,
        choices: &[
            Choice {
                label: "Mine the cooling flows",
                risk: RiskTier::Medium,
                success_rate: 0.6,
                success: Outcome::new([6, 14], [8, 16], Some("Heavy element extraction successful. Platinum-group metals in abundance.")),
                failure: Some(Outcome::new([-4, -2], [3, 6], Some("The flow reignites unexpectedly. Partial collection before retreat."))),
            },
            Choice {
                label: "Orbital spectrometry",
                risk: RiskTier::Safe,
                success_rate: 1.0,
                success: Outcome::new([0, 0], [4, 9], Some("Surface composition mapped in detail.")),
                failure: None,
            },
        ],
    },
    // ocean
    EventTemplate {
        id: "deep_dive",
        title: "Abyssal Discovery",
        description: "{planetName}'s oceans are kilometers deep. Sonar pings return echoes that suggest massive structures on the ocean floor.",
        applies_to: Applicability::Only(&[PlanetType::Ocean]),
        rarity: Rarity::Uncommon,
        choices: &[
            Choice {
                label: "Deploy deep submersible",
                risk: RiskTier::High,
                success_rate: 0.5,
                success: Outcome::new([0, 0], [20, 35], Some("Crystalline spires rise from the ocean floor, a natural formation that concentrates thermal energy like a living city.")),
                failure: Some(Outcome::new([-8, -4], [5, 12], Some("Submersible crushed by pressure at depth. Black box data recovered from surface debris."))),
            },
            Choice {
                label: "Sonar mapping only",
                risk: RiskTier::Safe,
                success_rate: 1.0,
                success: Outcome::new([0, 0], [8, 15], Some("Detailed bathymetric map of the ocean floor. Multiple anomalous structures identified.")),
                failure: None,
            },
        ],
    },
    EventTemplate {
        id: "aquatic_signals",
        title: "Aquatic Intelligence",
        description: "Hydrophone arrays detect complex acoustic patterns in {planetName}'s oceans. The sounds have grammar-like structure.",
        applies_to: Applicability::Only(&[PlanetType::Ocean]),
        rarity: Rarity::Rare,
        choices: &[
            Choice {
                label: "Attempt acoustic contact",
                risk: RiskTier::Medium,
                success_rate: 0.55,
                success: Outcome::new([0, 0], [25, 40], Some("The ocean responds to your transmission with new patterns. A dialogue begins. The implications are world-changing.")),
                failure: Some(Outcome::new([-5, -2], [8, 15], Some("The ocean goes silent after your transmission. Perhaps it was startled. Recording of pre-contact sounds preserved."))),
            },
            Choice {
                label: "Listen and record",
                risk: RiskTier::Safe,
                success_rate: 1.0,
                success: Outcome::new([0, 0], [12, 20], Some("Hours of acoustic data captured. Linguists will study this for years.")),
                failure: None,
            },
        ],
    },
    EventTemplate {
        id: "tidal_energy",
        title: "Tidal Resonance",
        description: "{planetName}'s tidal forces create standing waves of extraordinary power. The energy is rhythmic, predictable, and immense.",
        applies_to: Applicability::Only(&[PlanetType::Ocean]),
        rarity: Rarity::Common,
        choices: &[
            Choice {
                label: "Tidal energy harvest",
                risk: RiskTier::Medium,
                success_rate: 0.65,
                success: Outcome::new([10, 20], [5, 10], Some("Energy conversion yields significant fuel reserves. The tidal dynamics are beautifully complex.")),
                failure: Some(Outcome::new([-4, -2], [2, 5], Some("A rogue wave damages the collection array. Modest energy captured before retrieval."))),
            },
            Choice {
                label: "Tidal pattern analysis",
                risk: RiskTier::Safe,
                success_rate: 1.0,
                success: Outcome::new([0, 0], [5, 10], Some("The tidal model reveals this planet has three gravitational influences, there may be a hidden moon.")),
                failure: None,
            },
        ],
    },
    // water
    EventTemplate {
        id: "cloud_city",
        title: "Cloud Formations",
        description: "Enormous convective cells in {planetName}'s atmosphere create cathedral-like cloud structures. Stable enough to land on, theoretically.",
        applies_to: Applicability::Only(&[PlanetType::Water]),
        rarity: Rarity::Uncommon,
        choices: &[
            Choice {
                label: "Atmospheric insertion",
                risk: RiskTier::High,
                success_rate: 0.45,
                success: Outcome::new([5, 12], [15, 28], Some("Inside the cloud structure: ice crystals arranged in fractal patterns, a natural computer of sorts.")),
                failure: Some(Outcome::new([-10, -5], [5, 10], Some("Turbulence overwhelms stabilizers. Emergency ascent with partial atmospheric samples."))),
            },
            Choice {
                label: "Spectral cloud analysis",
                risk: RiskTier::Safe,
                success_rate: 1.0,
                success: Outcome::new([0, 0], [6, 12], Some("Cloud composition analysis reveals exotic chemistry. Water-ammonia gradients create natural distilleries.")),
                failure: None,
            },
        ],
    },
    EventTemplate {
        id: "atm_harvesting",
        title: "Atmospheric Harvesting",
        description: "{planetName}'s dense atmosphere contains hydrogen compounds that can be processed into fuel. The concentration is unusually high.",
        applies_to: Applicability::Only(&[PlanetType::Water]),
        rarity: Rarity::Common,
        choices: &[
            Choice {
                label: "Extended harvesting run",
                risk: RiskTier::Medium,
                success_rate: 0.65,
                success: Outcome::new([15, 25], [3, 8], Some("Fuel tanks topped off. The atmospheric chemistry suggests recent cometary bombardment.")),
                failure: Some(Outcome::new([2, 5], [2, 4], Some("Pressure fluctuations cut the run short. Partial harvest completed."))),
            },
            Choice {
                label: "Quick surface skim",
                risk: RiskTier::Safe,
                success_rate: 1.0,
                success: Outcome::new([6, 12], [2, 5], Some("Conservative skim. Safe and efficient.")),
                failure: None,
            },
        ],
    },
    EventTemplate {
        id: "pressure_anomaly",
        title: "Pressure Anomaly",
        description: "A region of {planetName}'s atmosphere maintains impossibly low pressure, a bubble of near-vacuum in an otherwise dense world.",
        applies_to: Applicability::Only(&[PlanetType::Water]),
        rarity: Rarity::Uncommon,
        choices: &[
            Choice {
                label: "Enter the bubble",
                risk: RiskTier::Medium,
                success_rate: 0.6,
                success: Outcome::new([0, 0], [12, 22], Some("Inside the bubble: perfect clarity. The low pressure zone is maintained by some kind of energy field of unknown origin.")),
                failure: Some(Outcome::new([-6, -3], [4, 8], Some("The bubble collapses as you enter. Rapid pressure equalization damages hull plating."))),
            },
            Choice {
                label: "Probe from outside",
                risk: RiskTier::Safe,
                success_rate: 1.0,
                success: Outcome::new([0, 0], [5, 10], Some("Measurements of the bubble's boundary suggest it's artificially maintained. By what?")),
                failure: None,
            },
        ],
    },
];

/// Look up a template by id.
pub fn template(id: &str) -> Option<&'static EventTemplate> {
    TEMPLATES.iter().find(|t| t.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_size() {
        assert_eq!(TEMPLATES.len(), 36);
    }

    #[test]
    fn test_unique_ids() {
        let ids: HashSet<&str> = TEMPLATES.iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), TEMPLATES.len());
    }

    #[test]
    fn test_every_template_has_choices() {
        for t in TEMPLATES {
            assert!(t.choices.len() >= 2, "{}", t.id);
            assert!(t.description.contains("{planetName}"), "{}", t.id);
        }
    }

    #[test]
    fn test_safe_choices_are_certain() {
        for t in TEMPLATES {
            for c in t.choices {
                if c.risk == RiskTier::Safe {
                    assert_eq!(c.success_rate, 1.0, "{} / {}", t.id, c.label);
                    assert!(c.failure.is_none());
                } else {
                    assert!(c.success_rate > 0.0 && c.success_rate < 1.0);
                }
            }
        }
    }

    #[test]
    fn test_ranges_ordered() {
        for t in TEMPLATES {
            for c in t.choices {
                for o in std::iter::once(&c.success).chain(c.failure.iter()) {
                    assert!(o.fuel[0] <= o.fuel[1]);
                    assert!(o.data[0] <= o.data[1]);
                }
            }
        }
    }

    #[test]
    fn test_every_planet_type_has_specific_events() {
        for kind in PlanetType::ALL {
            let specific = TEMPLATES
                .iter()
                .filter(|t| matches!(t.applies_to, Applicability::Only(types) if types.contains(&kind)))
                .count();
            assert!(specific >= 3, "{:?}", kind);
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(template("mineral_vein").map(|t| t.title), Some("Exposed Mineral Vein"));
        assert!(template("nope").is_none());
    }
}
