use serde_json::json;

use super::{configured_for, scoring_configuration, scoring_definitions, ScoringStrategy};
use crate::dto::form_dto::{FieldDefinition, FieldOption, FieldType, FormValues};
use crate::error::{Error, Result};
use crate::models::answer::{Answer, TextSubsetAnswer};
use crate::models::answer_option::AnswerOption;
use crate::models::configuration::{
    EditorConfiguration, ScoringConfiguration, TextMatching, TextSubsetScoringConfiguration,
};
use crate::models::play_configuration::QuestionPlayConfiguration;
use crate::models::question::Question;
use crate::models::question_type::ScoringKind;
use crate::models::scoring_definition::{ScoringDefinition, TextSubsetScoringDefinition};
use crate::utils::form::{read_float, read_int, read_string};
use crate::utils::text::match_distance;

pub const VAR_TEXT_MATCHING: &str = "tss_text_matching";
pub const VAR_TEXT: &str = "tsd_text";
pub const VAR_POINTS: &str = "tsd_points";

/// Learners type a number of free answers; each one may claim one
/// not yet claimed answer option.
pub struct TextSubsetScoring;

type Definitions<'a> = Vec<(&'a AnswerOption, &'a TextSubsetScoringDefinition)>;

impl TextSubsetScoring {
    fn configuration<'a>(&self, question: &'a Question) -> Result<&'a TextSubsetScoringConfiguration> {
        scoring_configuration(question, self.kind(), |c| match c {
            ScoringConfiguration::TextSubset(c) => Some(c),
            _ => None,
        })
    }

    fn definitions<'a>(&self, question: &'a Question) -> Result<Definitions<'a>> {
        scoring_definitions(question, self.kind(), ScoringDefinition::as_text_subset)
    }

    /// Defaults to one requested answer when no editor configuration is set.
    fn requested_answers(question: &Question) -> usize {
        match question.play_configuration().editor_configuration() {
            Some(EditorConfiguration::TextSubset(c)) => c.number_of_requested_answers as usize,
            _ => 1,
        }
    }

    fn best_definitions<'a>(definitions: &Definitions<'a>, requested: usize) -> Definitions<'a> {
        let mut sorted = definitions.clone();
        sorted.sort_by(|a, b| b.1.points.total_cmp(&a.1.points));
        sorted.truncate(requested);
        sorted
    }
}

impl ScoringStrategy for TextSubsetScoring {
    fn kind(&self) -> ScoringKind {
        ScoringKind::TextSubset
    }

    fn score(&self, question: &Question, answer: &Answer) -> Result<f64> {
        let Answer::TextSubset(answer) = answer else {
            return Err(Error::wrong_answer_type(self.kind()));
        };
        let config = self.configuration(question)?;
        let requested = Self::requested_answers(question);
        if answer.answers.len() > requested {
            return Err(Error::too_many_answers(answer.answers.len(), requested as u32));
        }

        let definitions = self.definitions(question)?;
        let mut used = vec![false; definitions.len()];
        let mut score = 0.0;
        for text in &answer.answers {
            // closest text wins, then the higher points, then option order
            let hit = definitions
                .iter()
                .enumerate()
                .filter(|(i, (_, d))| !used[*i] && !d.text.trim().is_empty())
                .filter_map(|(i, (_, d))| {
                    match_distance(text, &d.text, config.text_matching).map(|distance| (i, distance, d.points))
                })
                .min_by(|a, b| a.1.cmp(&b.1).then(b.2.total_cmp(&a.2)).then(a.0.cmp(&b.0)))
                .map(|(i, _, _)| i);
            if let Some(i) = hit {
                used[i] = true;
                score += definitions[i].1.points;
            }
        }
        Ok(score)
    }

    fn best_answer(&self, question: &Question) -> Result<Answer> {
        let definitions = self.definitions(question)?;
        let best = Self::best_definitions(&definitions, Self::requested_answers(question));
        Ok(TextSubsetAnswer::create(best.iter().map(|(_, d)| d.text.clone())))
    }

    fn max_score(&self, question: &Question) -> Result<f64> {
        let definitions = self.definitions(question)?;
        Ok(Self::best_definitions(&definitions, Self::requested_answers(question))
            .iter()
            .map(|(_, d)| d.points)
            .sum())
    }

    fn is_complete(&self, question: &Question) -> bool {
        let (Ok(_), Ok(definitions)) = (self.configuration(question), self.definitions(question)) else {
            return false;
        };
        !definitions.is_empty()
            && definitions
                .iter()
                .all(|(_, d)| !d.text.trim().is_empty() && d.points > 0.0)
    }

    fn scoring_definition_fields(&self) -> Vec<FieldDefinition> {
        vec![
            FieldDefinition::new("asq_label_answer_text", FieldType::Text, VAR_TEXT).required(),
            FieldDefinition::new("asq_label_points", FieldType::Number, VAR_POINTS).required(),
        ]
    }

    fn generate_fields(&self, play: &QuestionPlayConfiguration) -> Vec<FieldDefinition> {
        let matching = match configured_for(play, self.kind()) {
            Some(ScoringConfiguration::TextSubset(c)) => Some(json!(c.text_matching.code())),
            _ => None,
        };
        let options = TextMatching::ALL
            .iter()
            .map(|m| FieldOption::new(m.label(), m.code()))
            .collect();
        vec![FieldDefinition::new("asq_label_text_matching", FieldType::Select, VAR_TEXT_MATCHING)
            .required()
            .with_options(options)
            .with_value(matching)]
    }

    fn read_config(&self, values: &FormValues) -> Result<ScoringConfiguration> {
        Ok(ScoringConfiguration::TextSubset(TextSubsetScoringConfiguration {
            text_matching: TextMatching::from_code(read_int(values, VAR_TEXT_MATCHING)?)?,
        }))
    }

    fn read_scoring_definition(&self, values: &FormValues) -> Result<ScoringDefinition> {
        Ok(TextSubsetScoringDefinition::create(
            read_string(values, VAR_TEXT)?,
            read_float(values, VAR_POINTS)?,
        ))
    }
}
