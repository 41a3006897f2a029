//! Filter state collected from the sidebar and committed into [`FilterCriteria`].

use crate::{FilterCriteria, LlmModel};

/// Reference list of publishers offered by the publisher search box.
pub const PUBLISHERS: &[&str] = &[
    "Elsevier",
    "Springer Nature",
    "Wiley",
    "Taylor & Francis",
    "MDPI",
    "IEEE",
    "SAGE",
    "Oxford University Press",
    "Cambridge University Press",
    "Nature Publishing Group",
];

pub const IMPACT_FACTOR_MIN: f64 = 0.0;
pub const IMPACT_FACTOR_MAX: f64 = 50.0;
/// Slider step for the impact-factor threshold.
pub const IMPACT_FACTOR_STEP: f64 = 0.1;
pub const DECISION_TIME_MIN: u32 = 1;
pub const DECISION_TIME_MAX: u32 = 90;

/// Separator used when several publishers are committed as one string.
pub const PUBLISHER_SEPARATOR: &str = ", ";

/// Clamp an impact-factor input into the accepted range.
/// NaN maps to the minimum.
pub fn clamp_impact_factor(v: f64) -> f64 {
    if v.is_nan() {
        return IMPACT_FACTOR_MIN;
    }
    v.clamp(IMPACT_FACTOR_MIN, IMPACT_FACTOR_MAX)
}

/// Clamp a decision-time input into the accepted range.
pub fn clamp_decision_time(d: u32) -> u32 {
    d.clamp(DECISION_TIME_MIN, DECISION_TIME_MAX)
}

/// Move an impact factor by `steps` slider increments, snapping to one decimal.
pub fn step_impact_factor(v: f64, steps: i32) -> f64 {
    let tenths = (v / IMPACT_FACTOR_STEP).round() + f64::from(steps);
    clamp_impact_factor(tenths / 10.0)
}

/// Starting values for a fresh [`FilterState`].
#[derive(Debug, Clone, PartialEq)]
pub struct FilterDefaults {
    pub impact_factor: f64,
    pub decision_time: u32,
    pub llm_model: LlmModel,
    pub publishers: Vec<String>,
}

impl Default for FilterDefaults {
    fn default() -> Self {
        Self {
            impact_factor: 0.0,
            decision_time: 30,
            llm_model: LlmModel::default(),
            publishers: Vec::new(),
        }
    }
}

/// Current filter selections plus the publisher search buffer.
///
/// Values are stored as given: range enforcement belongs to the input
/// control that feeds this state (see [`clamp_impact_factor`] and
/// [`clamp_decision_time`]).
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    impact_factor: f64,
    decision_time: u32,
    publishers: Vec<String>,
    llm_model: LlmModel,
    publisher_search: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self::from_defaults(&FilterDefaults::default())
    }
}

impl FilterState {
    pub fn from_defaults(defaults: &FilterDefaults) -> Self {
        let mut state = Self {
            impact_factor: defaults.impact_factor,
            decision_time: defaults.decision_time,
            publishers: Vec::new(),
            llm_model: defaults.llm_model,
            publisher_search: String::new(),
        };
        for p in &defaults.publishers {
            state.add_publisher(p);
        }
        state
    }

    pub fn impact_factor(&self) -> f64 {
        self.impact_factor
    }

    pub fn set_impact_factor(&mut self, value: f64) {
        self.impact_factor = value;
    }

    pub fn decision_time(&self) -> u32 {
        self.decision_time
    }

    pub fn set_decision_time(&mut self, value: u32) {
        self.decision_time = value;
    }

    pub fn llm_model(&self) -> LlmModel {
        self.llm_model
    }

    pub fn select_model(&mut self, model: LlmModel) {
        self.llm_model = model;
    }

    /// Selected publishers in the order they were added.
    pub fn publishers(&self) -> &[String] {
        &self.publishers
    }

    /// Add a publisher. Returns `false` if it was already selected.
    pub fn add_publisher(&mut self, name: &str) -> bool {
        if self.publishers.iter().any(|p| p == name) {
            return false;
        }
        self.publishers.push(name.to_string());
        true
    }

    /// Remove one exact match. Returns `false` if it wasn't selected.
    pub fn remove_publisher(&mut self, name: &str) -> bool {
        match self.publishers.iter().position(|p| p == name) {
            Some(pos) => {
                self.publishers.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn publisher_search(&self) -> &str {
        &self.publisher_search
    }

    pub fn set_publisher_search(&mut self, text: impl Into<String>) {
        self.publisher_search = text.into();
    }

    pub fn publisher_search_mut(&mut self) -> &mut String {
        &mut self.publisher_search
    }

    /// Reference publishers matching the search buffer (case-insensitive
    /// substring). An empty buffer yields no suggestions.
    pub fn matching_publishers(&self) -> Vec<&'static str> {
        matching_publishers(&self.publisher_search)
    }

    /// Accept a suggestion: select it and clear the search buffer.
    pub fn choose_suggestion(&mut self, name: &str) {
        self.add_publisher(name);
        self.publisher_search.clear();
    }

    /// Snapshot the current selections. Leaves this state untouched.
    pub fn commit(&self) -> FilterCriteria {
        FilterCriteria {
            impact_factor: self.impact_factor,
            first_decision_time: self.decision_time,
            publisher: self.publishers.join(PUBLISHER_SEPARATOR),
            llm_model: self.llm_model,
        }
    }

    /// Current selections as defaults (used when saving preferences).
    pub fn to_defaults(&self) -> FilterDefaults {
        FilterDefaults {
            impact_factor: self.impact_factor,
            decision_time: self.decision_time,
            llm_model: self.llm_model,
            publishers: self.publishers.clone(),
        }
    }
}

/// Case-insensitive substring match over [`PUBLISHERS`].
pub fn matching_publishers(query: &str) -> Vec<&'static str> {
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    PUBLISHERS
        .iter()
        .copied()
        .filter(|p| p.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_returns_last_set_values_over_full_range() {
        let mut state = FilterState::default();
        for tenths in 0..=500 {
            let v = f64::from(tenths) / 10.0;
            for d in [1, 2, 30, 89, 90] {
                state.set_impact_factor(v);
                state.set_decision_time(d);
                let criteria = state.commit();
                assert_eq!(criteria.impact_factor, v);
                assert_eq!(criteria.first_decision_time, d);
            }
        }
    }

    #[test]
    fn commit_does_not_reset_state() {
        let mut state = FilterState::default();
        state.set_impact_factor(4.2);
        state.add_publisher("Wiley");
        state.select_model(LlmModel::OpenAi);
        let first = state.commit();
        let second = state.commit();
        assert_eq!(first, second);
        assert_eq!(state.publishers(), ["Wiley"]);
        assert_eq!(state.llm_model(), LlmModel::OpenAi);
    }

    #[test]
    fn defaults_match_sidebar() {
        let criteria = FilterState::default().commit();
        assert_eq!(criteria.impact_factor, 0.0);
        assert_eq!(criteria.first_decision_time, 30);
        assert_eq!(criteria.publisher, "");
        assert_eq!(criteria.llm_model, LlmModel::Faiss);
    }

    #[test]
    fn add_publisher_is_idempotent() {
        let mut once = FilterState::default();
        once.add_publisher("Elsevier");

        let mut twice = FilterState::default();
        assert!(twice.add_publisher("Elsevier"));
        assert!(!twice.add_publisher("Elsevier"));

        assert_eq!(once.publishers(), twice.publishers());
    }

    #[test]
    fn publishers_keep_insertion_order() {
        let mut state = FilterState::default();
        state.add_publisher("SAGE");
        state.add_publisher("IEEE");
        state.add_publisher("Elsevier");
        assert_eq!(state.publishers(), ["SAGE", "IEEE", "Elsevier"]);
        assert_eq!(state.commit().publisher, "SAGE, IEEE, Elsevier");
    }

    #[test]
    fn remove_absent_publisher_is_noop() {
        let mut state = FilterState::default();
        state.add_publisher("MDPI");
        let before = state.publishers().to_vec();
        assert!(!state.remove_publisher("Wiley"));
        assert_eq!(state.publishers(), before.as_slice());
    }

    #[test]
    fn remove_publisher_exact_match_only() {
        let mut state = FilterState::default();
        state.add_publisher("Springer Nature");
        assert!(!state.remove_publisher("springer nature"));
        assert!(state.remove_publisher("Springer Nature"));
        assert!(state.publishers().is_empty());
    }

    #[test]
    fn publisher_search_is_case_insensitive_substring() {
        assert_eq!(
            matching_publishers("UNIVERSITY"),
            vec!["Oxford University Press", "Cambridge University Press"]
        );
        assert_eq!(matching_publishers("nat"), vec!["Springer Nature", "Nature Publishing Group"]);
        assert!(matching_publishers("zzz").is_empty());
    }

    #[test]
    fn empty_search_shows_no_suggestions() {
        let state = FilterState::default();
        assert!(state.matching_publishers().is_empty());
    }

    #[test]
    fn choosing_suggestion_clears_buffer() {
        let mut state = FilterState::default();
        state.set_publisher_search("wil");
        let pick = state.matching_publishers()[0];
        state.choose_suggestion(pick);
        assert_eq!(state.publishers(), ["Wiley"]);
        assert!(state.publisher_search().is_empty());
    }

    #[test]
    fn search_buffer_never_commits_as_selection() {
        let mut state = FilterState::default();
        state.set_publisher_search("Elsevier");
        assert_eq!(state.commit().publisher, "");
    }

    #[test]
    fn clamps_and_steps() {
        assert_eq!(clamp_impact_factor(-1.0), 0.0);
        assert_eq!(clamp_impact_factor(51.0), 50.0);
        assert_eq!(clamp_impact_factor(f64::NAN), 0.0);
        assert_eq!(clamp_decision_time(0), 1);
        assert_eq!(clamp_decision_time(120), 90);
        assert_eq!(step_impact_factor(0.0, 1), 0.1);
        assert_eq!(step_impact_factor(0.3, 1), 0.4);
        assert_eq!(step_impact_factor(2.0, -10), 1.0);
        assert_eq!(step_impact_factor(0.0, -1), 0.0);
        assert_eq!(step_impact_factor(49.95, 5), 50.0);
    }

    #[test]
    fn from_defaults_dedups_publishers() {
        let defaults = FilterDefaults {
            publishers: vec!["IEEE".into(), "IEEE".into(), "SAGE".into()],
            ..Default::default()
        };
        let state = FilterState::from_defaults(&defaults);
        assert_eq!(state.publishers(), ["IEEE", "SAGE"]);
    }
}
