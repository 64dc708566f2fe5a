use std::{fmt, str::FromStr};

/// Tone of the generated roast. Each mode carries a fixed system instruction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RoastMode {
    Gentle,
    #[default]
    Maternal,
    Brutal,
}

/// Accepted spellings, including legacy names still sent by older clients.
const NAMES: &[(&str, RoastMode)] = &[
    ("gentle", RoastMode::Gentle),
    ("maternal", RoastMode::Maternal),
    ("brutal", RoastMode::Brutal),
    ("glutenfree", RoastMode::Gentle),
    ("thatmom", RoastMode::Maternal),
    ("ode_to_obesity", RoastMode::Brutal),
];

const NUTRITION_RULES: &str = "You estimate the nutrition of a single food item from its name, \
optional notes and an optional photo. Reply only with JSON matching the response schema: \
calories in kcal for the whole portion, protein_g, fat_g and carbs_g in grams when you can \
judge them (null otherwise), and a one or two sentence roast of the food choice.";

const GENTLE: &str = "Roast style: a supportive nutritionist friend. Tease lightly, \
never shame, and end on an encouraging note.";

const MATERNAL: &str = "Roast style: a loving but disappointed mother. Guilt-trip the eater \
about their choices, compare them to a cousin who eats vegetables, and sigh a lot.";

const BRUTAL: &str = "Roast style: a merciless stand-up comic. Be savage about the food \
choice itself, but never insult the person's body, health conditions or identity.";

impl RoastMode {
    pub fn as_str(self) -> &'static str {
        match self {
            RoastMode::Gentle => "gentle",
            RoastMode::Maternal => "maternal",
            RoastMode::Brutal => "brutal",
        }
    }

    /// Full system instruction handed to the estimator for this mode.
    pub fn system_instruction(self) -> String {
        let style = match self {
            RoastMode::Gentle => GENTLE,
            RoastMode::Maternal => MATERNAL,
            RoastMode::Brutal => BRUTAL,
        };
        format!("{NUTRITION_RULES}\n\n{style}")
    }
}

impl fmt::Display for RoastMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRoastMode(pub String);

impl FromStr for RoastMode {
    type Err = UnknownRoastMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        NAMES
            .iter()
            .find(|(name, _)| *name == wanted)
            .map(|(_, mode)| *mode)
            .ok_or_else(|| UnknownRoastMode(s.to_string()))
    }
}
