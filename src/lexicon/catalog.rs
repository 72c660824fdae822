//! Built-in word and phrase tables

use super::ConnectiveCategory;

/// ~150 most frequent English words. Excluded from sophistication,
/// signature-word and content-word counts; used for function-word rates.
pub(super) const HIGH_FREQUENCY_WORDS: &[&str] = &[
    "the", "be", "to", "of", "and", "a", "in", "that", "have", "i", "it", "for",
    "not", "on", "with", "he", "as", "you", "do", "at", "this", "but", "his", "by",
    "from", "they", "we", "say", "her", "she", "or", "an", "will", "my", "one",
    "all", "would", "there", "their", "what", "so", "up", "out", "if", "about",
    "who", "get", "which", "go", "me", "when", "make", "can", "like", "time", "no",
    "just", "him", "know", "take", "people", "into", "year", "your", "good", "some",
    "could", "them", "see", "other", "than", "then", "now", "look", "only", "come",
    "its", "over", "think", "also", "back", "after", "use", "two", "how", "our",
    "work", "first", "well", "way", "even", "new", "want", "because", "any", "these",
    "give", "day", "most", "us", "is", "are", "was", "were", "been", "being", "has",
    "had", "does", "did", "am", "very", "more", "much", "such", "own", "same",
    "should", "must", "may", "might", "still", "here", "where", "why", "each",
    "every", "both", "few", "many",
];

/// (phrase, category, weight, suggestion)
///
/// Weight 3 marks stock phrasing that rarely appears in unassisted prose,
/// 2 marks formal filler, 1 marks vocabulary that is only mildly formal.
pub(super) const FORMULAIC_PHRASES: &[(&str, &str, u8, &str)] = &[
    ("delve into", "stock cliché", 3, "Try \"look at\" or \"explore\""),
    ("delve", "stock cliché", 3, "Try \"dig into\" or \"examine\""),
    ("dive deep", "stock cliché", 3, "Try \"look closely\""),
    ("tapestry", "stock cliché", 3, "Name the actual mix of things"),
    ("rich tapestry", "stock cliché", 3, "Name the actual mix of things"),
    ("testament to", "stock cliché", 3, "Try \"shows\" or \"proves\""),
    ("testament", "stock cliché", 2, "Try \"proof\" or \"sign\""),
    ("landscape", "stock cliché", 2, "Try \"field\" or \"situation\""),
    ("ever-evolving", "stock cliché", 3, "Try \"changing\""),
    ("rapidly evolving", "stock cliché", 3, "Try \"changing fast\""),
    ("dynamic", "stock cliché", 1, "Say what actually changes"),
    ("realm", "stock cliché", 2, "Try \"area\" or \"field\""),
    ("beacon", "stock cliché", 2, "Try \"example\" or \"model\""),
    ("cornerstone", "stock cliché", 2, "Try \"basis\" or \"foundation\""),
    ("pinnacle", "stock cliché", 2, "Try \"peak\" or \"best\""),
    ("game-changer", "stock cliché", 3, "Say what it changed"),
    ("leverage", "stock cliché", 2, "Try \"use\""),
    ("harness", "stock cliché", 2, "Try \"use\" or \"capture\""),
    ("unleash", "stock cliché", 2, "Try \"release\" or \"start\""),
    ("unlock", "stock cliché", 1, "Try \"open\" or \"enable\""),
    ("elevate", "stock cliché", 2, "Try \"improve\" or \"raise\""),
    ("revolutionize", "stock cliché", 2, "Try \"change\""),
    ("transformative", "stock cliché", 2, "Say what it transforms"),
    ("foster", "stock cliché", 2, "Try \"encourage\" or \"build\""),
    ("cultivate", "stock cliché", 1, "Try \"grow\" or \"develop\""),
    ("spearhead", "stock cliché", 2, "Try \"lead\""),
    ("orchestrate", "stock cliché", 2, "Try \"organize\" or \"run\""),
    ("navigating", "stock cliché", 2, "Try \"handling\" or \"dealing with\""),
    ("embarked on", "stock cliché", 3, "Try \"started\""),
    ("embark", "stock cliché", 2, "Try \"start\" or \"begin\""),
    ("journey", "stock cliché", 1, "Say what actually happened"),
    ("shed light on", "stock cliché", 3, "Try \"explain\" or \"show\""),
    ("underscore", "stock cliché", 2, "Try \"show\" or \"stress\""),
    ("underscores", "stock cliché", 2, "Try \"shows\""),
    ("myriad", "stock cliché", 2, "Try \"many\""),
    ("plethora", "stock cliché", 2, "Try \"many\" or \"lots of\""),
    ("intersection", "stock cliché", 1, "Say which ideas meet"),
    ("interplay", "stock cliché", 2, "Try \"relationship\""),
    ("synergy", "stock cliché", 2, "Try \"cooperation\""),
    ("symbiotic", "stock cliché", 2, "Try \"mutual\""),
    ("multifaceted", "stock cliché", 2, "Try \"complex\" or list the facets"),
    ("nuanced", "stock cliché", 1, "Show the nuance instead"),
    ("holistic", "stock cliché", 2, "Try \"complete\" or \"whole\""),
    ("comprehensive", "stock cliché", 1, "Try \"full\" or \"complete\""),
    ("paradigm shift", "stock cliché", 3, "Try \"big change\""),
    ("paradigm", "stock cliché", 2, "Try \"model\" or \"pattern\""),
    ("crucial", "stock cliché", 1, "Try \"key\" or \"important\""),
    ("pivotal", "stock cliché", 2, "Try \"key\""),
    ("vital", "stock cliché", 1, "Try \"important\""),
    ("it is important to note", "hedging", 3, "State the point directly"),
    ("it is worth noting", "hedging", 3, "State the point directly"),
    ("it is essential to", "hedging", 2, "Try \"you must\" or state it directly"),
    ("it is crucial to", "hedging", 2, "Try \"you must\" or state it directly"),
    ("in terms of", "academic phrase", 1, "Try \"for\" or \"about\""),
    ("comprehensive understanding", "academic phrase", 2, "Try \"good grasp\""),
    ("holistic approach", "academic phrase", 3, "Say what the approach covers"),
    ("with regard to", "formal connector", 1, "Try \"about\""),
    ("with respect to", "formal connector", 1, "Try \"about\" or \"for\""),
    ("in light of", "formal connector", 1, "Try \"because of\""),
    ("furthermore", "formal connector", 1, "Try \"also\""),
    ("moreover", "formal connector", 1, "Try \"also\" or \"and\""),
    ("nevertheless", "formal connector", 1, "Try \"still\" or \"but\""),
    ("nonetheless", "formal connector", 1, "Try \"still\""),
    ("consequently", "formal connector", 1, "Try \"so\""),
    ("subsequently", "formal connector", 1, "Try \"later\" or \"then\""),
    ("plays a crucial role", "emphasis phrase", 3, "Say what it does"),
    ("plays a vital role", "emphasis phrase", 3, "Say what it does"),
    ("plays a pivotal role", "emphasis phrase", 3, "Say what it does"),
    ("first and foremost", "emphasis phrase", 2, "Try \"first\""),
    ("in conclusion", "discourse marker", 2, "End with the point itself"),
    ("to summarize", "discourse marker", 2, "End with the point itself"),
    ("in summary", "discourse marker", 2, "End with the point itself"),
    ("facilitate", "academic vocabulary", 1, "Try \"help\" or \"allow\""),
    ("utilize", "academic vocabulary", 1, "Try \"use\""),
    ("implement", "academic vocabulary", 1, "Try \"do\" or \"carry out\""),
];

pub(super) const CONNECTIVES: &[(ConnectiveCategory, &[&str])] = &[
    (
        ConnectiveCategory::Additive,
        &[
            "and", "also", "moreover", "furthermore", "additionally", "besides",
            "likewise", "similarly",
        ],
    ),
    (
        ConnectiveCategory::Adversative,
        &[
            "but", "however", "yet", "nevertheless", "nonetheless", "although",
            "though", "whereas", "while", "conversely",
        ],
    ),
    (
        ConnectiveCategory::Causal,
        &[
            "because", "therefore", "thus", "hence", "consequently", "accordingly",
            "so", "since",
        ],
    ),
    (
        ConnectiveCategory::Temporal,
        &[
            "then", "next", "finally", "subsequently", "meanwhile", "afterward",
            "previously", "first", "second", "third",
        ],
    ),
];

/// Template bigrams that dominate predictable prose
pub(super) const FORMULAIC_BIGRAMS: &[&str] = &[
    "of the", "in the", "to the", "on the", "for the", "and the", "with the",
    "it is", "that the", "is a", "as a", "such as", "can be", "has been",
    "there are", "there is", "this is", "due to", "based on", "in addition",
    "as well", "in order", "in this", "at the", "by the", "from the",
    "is the", "important to", "able to", "need to",
];

/// Template trigrams; rarer than bigrams in natural writing
pub(super) const FORMULAIC_TRIGRAMS: &[&str] = &[
    "one of the", "as well as", "in order to", "it is important", "is important to",
    "on the other", "the other hand", "in addition to", "due to the", "as a result",
    "a wide range", "wide range of", "a variety of", "in terms of", "the fact that",
    "at the same", "the same time", "in the context", "the context of",
    "with regard to", "when it comes", "it comes to", "it is essential",
    "plays a crucial", "a crucial role", "it is worth", "is worth noting",
    "in today's world", "there is no", "a number of",
];
