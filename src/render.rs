use crate::config::Config;
use crate::decision_policy::Outcome;

pub fn outcome_text(config: &Config, outcome: &Outcome) -> String {
    match outcome {
        Outcome::Label(label) => label.clone(),
        Outcome::NoResult => config.no_result_message.clone(),
        Outcome::ClassificationUnavailable => config.unavailable_message.clone(),
    }
}
