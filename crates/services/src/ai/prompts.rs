//! Prompt templates for each flow.

use cosmic_core::model::PlanetName;

/// Phrase the recognition model is told to answer with for non-planet images.
pub(crate) const NOT_A_PLANET: &str = "not a planet";

pub(crate) fn identify_planet() -> String {
    format!(
        "You are an astronomy expert who recognises planets in pictures.\n\
         Look at the attached image and name the planet it shows. \
         Reply with the planet's name only in `planetName`.\n\
         If the image does not show a planet, set `planetName` to \"{NOT_A_PLANET}\"."
    )
}

pub(crate) fn fun_facts(planet: &PlanetName) -> String {
    format!(
        "You write fun facts for elementary school students.\n\
         Give 3 fun facts about the planet {planet}. Each fact must be one short, \
         complete sentence that a young child can understand.\n\
         Return them as a JSON array in `funFacts`."
    )
}

pub(crate) fn quiz(planet: &PlanetName, facts: &str) -> String {
    format!(
        "You write multiple-choice quizzes for school students.\n\
         Write a quiz about {planet} using only these fun facts:\n{facts}\n\n\
         The quiz must have exactly 3 questions. Every question has exactly 4 different \
         options and one correct answer. `correctAnswer` must be copied exactly from \
         one of the options.\n\
         Return the questions in `quizQuestions`."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompts_mention_their_inputs() {
        let planet = PlanetName::new("Neptune").unwrap();
        assert!(identify_planet().contains(NOT_A_PLANET));
        assert!(fun_facts(&planet).contains("Neptune"));

        let prompt = quiz(&planet, "Neptune is windy.");
        assert!(prompt.contains("Neptune is windy."));
        assert!(prompt.contains("exactly 3 questions"));
    }
}
