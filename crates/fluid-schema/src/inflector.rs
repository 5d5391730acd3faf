//! English noun singularization.
//!
//! The [`Inflector`] is a rule table: irregular nouns first, then
//! uncountable nouns, then an ordered list of regex substitutions where the
//! first matching rule wins. Words no rule matches are returned unchanged.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

const IRREGULAR: &[(&str, &str)] = &[
    ("atlas", "atlases"),
    ("axe", "axes"),
    ("beef", "beefs"),
    ("brother", "brothers"),
    ("cafe", "cafes"),
    ("chateau", "chateaux"),
    ("child", "children"),
    ("canvas", "canvases"),
    ("cookie", "cookies"),
    ("corpus", "corpuses"),
    ("cow", "cows"),
    ("criterion", "criteria"),
    ("curriculum", "curricula"),
    ("demo", "demos"),
    ("domino", "dominoes"),
    ("echo", "echoes"),
    ("foot", "feet"),
    ("fungus", "fungi"),
    ("ganglion", "ganglions"),
    ("gas", "gases"),
    ("genie", "genies"),
    ("genus", "genera"),
    ("goose", "geese"),
    ("graffito", "graffiti"),
    ("hippopotamus", "hippopotami"),
    ("hoof", "hoofs"),
    ("human", "humans"),
    ("iris", "irises"),
    ("larva", "larvae"),
    ("leaf", "leaves"),
    ("lens", "lenses"),
    ("loaf", "loaves"),
    ("man", "men"),
    ("medium", "media"),
    ("memorandum", "memoranda"),
    ("money", "monies"),
    ("mongoose", "mongooses"),
    ("motto", "mottoes"),
    ("move", "moves"),
    ("mythos", "mythoi"),
    ("niche", "niches"),
    ("niveau", "niveaux"),
    ("nucleus", "nuclei"),
    ("numen", "numina"),
    ("occiput", "occiputs"),
    ("octopus", "octopuses"),
    ("opus", "opuses"),
    ("ox", "oxen"),
    ("passerby", "passersby"),
    ("person", "people"),
    ("plateau", "plateaux"),
    ("runner-up", "runners-up"),
    ("safe", "safes"),
    ("sex", "sexes"),
    ("sieve", "sieves"),
    ("soliloquy", "soliloquies"),
    ("son-in-law", "sons-in-law"),
    ("syllabus", "syllabi"),
    ("testis", "testes"),
    ("thief", "thieves"),
    ("tooth", "teeth"),
    ("tornado", "tornadoes"),
    ("trilby", "trilbys"),
    ("turf", "turfs"),
    ("valve", "valves"),
    ("wave", "waves"),
    ("whiskey", "whiskies"),
    ("zombie", "zombies"),
];

const UNCOUNTABLE: &[&str] = &[
    r".*[nrlm]ese",
    r".*deer",
    r".*fish",
    r".*measles",
    r".*ois",
    r".*pox",
    r".*sheep",
    r".*ss",
    "audio",
    "bison",
    "bream",
    "breeches",
    "britches",
    "buffalo",
    "cantus",
    "carp",
    "cattle",
    "chassis",
    "clippers",
    "clothes",
    "cod",
    "coitus",
    "compensation",
    "contretemps",
    "corps",
    "data",
    "debris",
    "diabetes",
    "djinn",
    "education",
    "eland",
    "elk",
    "emoji",
    "equipment",
    "evidence",
    "feedback",
    "firmware",
    "flounder",
    "furniture",
    "gallows",
    "gold",
    "hardware",
    "headquarters",
    "herpes",
    "hijinks",
    "information",
    "innings",
    "jackanapes",
    "jedi",
    "kin",
    "knowledge",
    "mackerel",
    "metadata",
    "mews",
    "moose",
    "mumps",
    "news",
    "nexus",
    "nutrition",
    "offspring",
    "pants",
    "pincers",
    "plankton",
    "pliers",
    "police",
    "proceedings",
    "rabies",
    "rice",
    "rhinoceros",
    "salmon",
    "scissors",
    r"sea[- ]bass",
    "series",
    "shears",
    "siemens",
    "software",
    "species",
    "staff",
    "swine",
    "traffic",
    "trousers",
    "trout",
    "tuna",
    "wheat",
    "whiting",
    "wildebeest",
];

const RULES: &[(&str, &str)] = &[
    (r"(s)tatuses$", "${1}tatus"),
    (r"^(.*)(menu)s$", "${1}${2}"),
    (r"(quiz)zes$", "${1}"),
    (r"(matr)ices$", "${1}ix"),
    (r"(vert|ind)ices$", "${1}ex"),
    (r"^(ox)en", "${1}"),
    (r"(alias)(es)*$", "${1}"),
    (r"(buffal|her|potat|tomat|volcan)oes$", "${1}o"),
    (
        r"(alumn|bacill|cact|foc|fung|nucle|radi|stimul|syllab|termin|viri?)i$",
        "${1}us",
    ),
    (r"([ftw]ax)es", "${1}"),
    (r"(analys|ax|cris|test|thes)es$", "${1}is"),
    (r"(shoe|slave)s$", "${1}"),
    (r"(o)es$", "${1}"),
    (r"ouses$", "ouse"),
    (r"([^a])uses$", "${1}us"),
    (r"([ml])ice$", "${1}ouse"),
    (r"(x|ch|ss|sh)es$", "${1}"),
    (r"(m)ovies$", "${1}ovie"),
    (r"(s)eries$", "${1}eries"),
    (r"([^aeiouy]|qu)ies$", "${1}y"),
    (r"([lr])ves$", "${1}f"),
    (r"(tive|hive|drive|dive|olive)s$", "${1}"),
    (r"([^fo])ves$", "${1}fe"),
    (r"(^analy)ses$", "${1}sis"),
    (
        r"(analy|diagno|^ba|parenthe|progno|synop|the)ses$",
        "${1}sis",
    ),
    (r"(c)riteria$", "${1}riterion"),
    (r"([ti])a$", "${1}um"),
    (r"(p)eople$", "${1}erson"),
    (r"(m)en$", "${1}an"),
    (r"(c)hildren$", "${1}hild"),
    (r"(f)eet$", "${1}oot"),
    (r"(n)ews$", "${1}ews"),
    (r"eaus$", "eau"),
    (r"^(.*us)$", "${1}"),
    (r"s$", ""),
];

static ENGLISH: LazyLock<Inflector> = LazyLock::new(|| {
    let rules = RULES
        .iter()
        .map(|(pattern, replacement)| {
            Rule::new(pattern, replacement).expect("Invalid built-in inflection rule")
        })
        .collect();
    Inflector::from_parts(
        IRREGULAR
            .iter()
            .map(|(s, p)| ((*s).to_string(), (*p).to_string()))
            .collect(),
        UNCOUNTABLE.iter().map(|w| (*w).to_string()).collect(),
        rules,
    )
});

#[derive(Debug, Clone)]
struct Rule {
    pattern: Regex,
    replacement: String,
}

impl Rule {
    fn new(pattern: &str, replacement: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(&format!("(?i){pattern}"))?,
            replacement: replacement.to_string(),
        })
    }
}

/// Singularizes English nouns.
#[derive(Debug, Clone)]
pub struct Inflector {
    /// Plural (lowercase) to singular.
    irregular: HashMap<String, String>,
    irregular_pattern: Regex,
    uncountable: Vec<String>,
    uncountable_pattern: Regex,
    rules: Vec<Rule>,
}

impl Default for Inflector {
    fn default() -> Self {
        Self::english()
    }
}

impl Inflector {
    /// Returns the built-in English rule set.
    #[must_use]
    pub fn english() -> Self {
        ENGLISH.clone()
    }

    fn from_parts(irregular: Vec<(String, String)>, uncountable: Vec<String>, rules: Vec<Rule>) -> Self {
        let irregular: HashMap<String, String> = irregular
            .into_iter()
            .map(|(singular, plural)| (plural.to_lowercase(), singular))
            .collect();
        Self {
            irregular_pattern: irregular_pattern(&irregular),
            uncountable_pattern: uncountable_pattern(&uncountable),
            irregular,
            uncountable,
            rules,
        }
    }

    /// Adds an irregular noun.
    #[must_use]
    pub fn with_irregular(mut self, singular: &str, plural: &str) -> Self {
        self.irregular
            .insert(plural.to_lowercase(), singular.to_string());
        self.irregular_pattern = irregular_pattern(&self.irregular);
        self
    }

    /// Adds a word that is its own singular.
    #[must_use]
    pub fn with_uncountable(mut self, word: &str) -> Self {
        self.uncountable.push(regex::escape(word));
        self.uncountable_pattern = uncountable_pattern(&self.uncountable);
        self
    }

    /// Adds a substitution rule tried before every built-in rule.
    ///
    /// The pattern is matched case-insensitively; the replacement may refer
    /// to capture groups as `${1}`.
    pub fn with_rule(mut self, pattern: &str, replacement: &str) -> Result<Self, regex::Error> {
        self.rules.insert(0, Rule::new(pattern, replacement)?);
        Ok(self)
    }

    /// Returns the singular form of `word`.
    #[must_use]
    pub fn singularize(&self, word: &str) -> String {
        if let Some(caps) = self.irregular_pattern.captures(word) {
            let prefix = &caps[1];
            let plural = &caps[2];
            if let Some(singular) = self.irregular.get(&plural.to_lowercase()) {
                return format!("{prefix}{}", keep_first_char(plural, singular));
            }
        }

        if self.uncountable_pattern.is_match(word) {
            return word.to_string();
        }

        for rule in &self.rules {
            if rule.pattern.is_match(word) {
                return rule
                    .pattern
                    .replace(word, rule.replacement.as_str())
                    .into_owned();
            }
        }

        word.to_string()
    }
}

fn irregular_pattern(irregular: &HashMap<String, String>) -> Regex {
    let mut plurals: Vec<&str> = irregular.keys().map(String::as_str).collect();
    plurals.sort_unstable_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    let alternation = plurals
        .iter()
        .map(|p| regex::escape(p))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)^(.*?)\b({alternation})$")).expect("Invalid irregular noun pattern")
}

fn uncountable_pattern(uncountable: &[String]) -> Regex {
    Regex::new(&format!("(?i)^(?:{})$", uncountable.join("|")))
        .expect("Invalid uncountable noun pattern")
}

/// Keeps the first character of the matched word so `People` gives `Person`.
fn keep_first_char(matched: &str, replacement: &str) -> String {
    let mut matched_chars = matched.chars();
    let mut replacement_chars = replacement.chars();
    match (matched_chars.next(), replacement_chars.next()) {
        (Some(first), Some(_)) => {
            let mut out = String::with_capacity(replacement.len());
            out.push(first);
            out.extend(replacement_chars);
            out
        }
        _ => replacement.to_string(),
    }
}
