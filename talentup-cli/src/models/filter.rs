use super::trainee::{Trainee, TraineeStatus};
use super::webinar::{Webinar, WebinarStatus};

/// Category dropdown: "all" or one concrete category
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategorySelector {
    #[default]
    All,
    Only(String),
}

impl CategorySelector {
    /// "all" (any case) or an empty value select everything
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            CategorySelector::All
        } else {
            CategorySelector::Only(value.to_string())
        }
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategorySelector::All => true,
            CategorySelector::Only(selected) => selected == category,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            CategorySelector::All => "All categories",
            CategorySelector::Only(selected) => selected,
        }
    }
}

/// Filter criteria for the webinar list view
#[derive(Debug, Clone, Default)]
pub struct WebinarFilter {
    pub search: String,
    pub category: CategorySelector,
    pub status: Option<WebinarStatus>,
    /// Also look for the search text in the presenter name
    pub match_presenter: bool,
}

impl WebinarFilter {
    pub fn matches(&self, webinar: &Webinar) -> bool {
        let needle = self.search.to_lowercase();

        let matches_search = webinar.title.to_lowercase().contains(&needle)
            || (self.match_presenter && webinar.presenter.to_lowercase().contains(&needle));

        if !matches_search {
            return false;
        }

        if !self.category.matches(&webinar.category) {
            return false;
        }

        if let Some(status) = self.status {
            if webinar.status != status {
                return false;
            }
        }

        true
    }

    /// Filtered subset, input order preserved
    pub fn apply<'a>(&self, webinars: &'a [Webinar]) -> Vec<&'a Webinar> {
        webinars.iter().filter(|w| self.matches(w)).collect()
    }

    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || self.category != CategorySelector::All || self.status.is_some()
    }

    /// Back to "everything" (the reset button)
    pub fn reset(&mut self) {
        self.search.clear();
        self.category = CategorySelector::All;
        self.status = None;
    }
}

/// Distinct categories in first-seen order, for the category dropdown
pub fn categories(webinars: &[Webinar]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for webinar in webinars {
        if !seen.iter().any(|c| c == &webinar.category) {
            seen.push(webinar.category.clone());
        }
    }
    seen
}

/// Filter criteria for the trainee directory
#[derive(Debug, Clone, Default)]
pub struct TraineeFilter {
    pub search: String,
    pub status: Option<TraineeStatus>,
}

impl TraineeFilter {
    pub fn matches(&self, trainee: &Trainee) -> bool {
        let needle = self.search.to_lowercase();

        let matches_search = trainee.name.to_lowercase().contains(&needle)
            || trainee.email.to_lowercase().contains(&needle);

        if !matches_search {
            return false;
        }

        if let Some(status) = self.status {
            if trainee.status != status {
                return false;
            }
        }

        true
    }

    pub fn apply<'a>(&self, trainees: &'a [Trainee]) -> Vec<&'a Trainee> {
        trainees.iter().filter(|t| self.matches(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::seed;

    #[test]
    fn test_search_react_returns_two_entries() {
        let webinars = seed::webinars();
        assert_eq!(webinars.len(), 8);

        let filter = WebinarFilter {
            search: "React".to_string(),
            ..Default::default()
        };

        let titles: Vec<&str> = filter
            .apply(&webinars)
            .iter()
            .map(|w| w.title.as_str())
            .collect();

        assert_eq!(
            titles,
            vec![
                "Introduction à React pour débutants",
                "Optimisation des performances React",
            ]
        );
    }

    #[test]
    fn test_category_devops_returns_one_entry() {
        let webinars = seed::webinars();
        let filter = WebinarFilter {
            category: CategorySelector::parse("DevOps"),
            ..Default::default()
        };

        let result = filter.apply(&webinars);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "Déploiement continu avec GitHub Actions");
    }

    #[test]
    fn test_presenter_search_is_opt_in() {
        let webinars = seed::webinars();
        let mut filter = WebinarFilter {
            search: "dubois".to_string(),
            ..Default::default()
        };
        assert!(filter.apply(&webinars).is_empty());

        filter.match_presenter = true;
        let presenters: Vec<&str> = filter
            .apply(&webinars)
            .iter()
            .map(|w| w.presenter.as_str())
            .collect();
        assert_eq!(presenters, vec!["Marie Dubois", "Marc Dubois"]);
    }

    #[test]
    fn test_status_filter_and_reset() {
        let webinars = seed::webinars();
        let mut filter = WebinarFilter {
            status: Some(WebinarStatus::Live),
            ..Default::default()
        };
        assert_eq!(filter.apply(&webinars).len(), 1);
        assert!(filter.is_active());

        filter.reset();
        assert!(!filter.is_active());
        assert_eq!(filter.apply(&webinars).len(), 8);
    }

    #[test]
    fn test_category_selector_parse() {
        assert_eq!(CategorySelector::parse("all"), CategorySelector::All);
        assert_eq!(CategorySelector::parse("ALL"), CategorySelector::All);
        assert_eq!(CategorySelector::parse(" "), CategorySelector::All);
        assert_eq!(
            CategorySelector::parse("API"),
            CategorySelector::Only("API".to_string())
        );
    }

    #[test]
    fn test_categories_first_seen_order() {
        let webinars = seed::webinars();
        assert_eq!(
            categories(&webinars),
            vec![
                "Développement Web",
                "Design Front-end",
                "Programmation",
                "Backend",
                "API",
                "Qualité logicielle",
                "DevOps",
            ]
        );
    }

    #[test]
    fn test_trainee_filter() {
        let trainees = seed::trainees();
        let filter = TraineeFilter {
            search: "MARTIN".to_string(),
            status: None,
        };
        let names: Vec<&str> = filter
            .apply(&trainees)
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(names, vec!["Sophie Martin"]);

        let completed = TraineeFilter {
            search: String::new(),
            status: Some(TraineeStatus::Completed),
        };
        assert_eq!(completed.apply(&trainees).len(), 2);
    }
}
