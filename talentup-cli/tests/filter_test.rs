use pretty_assertions::assert_eq;
use proptest::prelude::*;

use talentup_cli::models::{categories, CategorySelector, WebinarFilter, WebinarStatus};
use talentup_cli::services::seed;

fn search_term() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("react".to_string()),
        Just("INTRODUCTION".to_string()),
        Just("à".to_string()),
        "[a-zA-Z ]{1,6}",
    ]
}

fn category_choice() -> impl Strategy<Value = String> {
    let mut choices = categories(&seed::webinars());
    choices.push("all".to_string());
    choices.push("Inconnue".to_string());
    prop::sample::select(choices)
}

fn status_choice() -> impl Strategy<Value = Option<WebinarStatus>> {
    prop_oneof![
        Just(None),
        Just(Some(WebinarStatus::Upcoming)),
        Just(Some(WebinarStatus::Live)),
        Just(Some(WebinarStatus::Completed)),
        Just(Some(WebinarStatus::Cancelled)),
    ]
}

proptest! {
    #[test]
    fn prop_search_keeps_only_matching_titles(search in search_term()) {
        let webinars = seed::webinars();
        let filter = WebinarFilter { search: search.clone(), ..Default::default() };
        let needle = search.to_lowercase();

        let shown = filter.apply(&webinars);
        for webinar in &shown {
            prop_assert!(webinar.title.to_lowercase().contains(&needle));
        }

        let expected = webinars
            .iter()
            .filter(|w| w.title.to_lowercase().contains(&needle))
            .count();
        prop_assert_eq!(shown.len(), expected);
    }

    #[test]
    fn prop_category_selection_is_exact(category in category_choice()) {
        let webinars = seed::webinars();
        let selector = CategorySelector::parse(&category);
        let filter = WebinarFilter { category: selector.clone(), ..Default::default() };

        let shown = filter.apply(&webinars);
        match selector {
            CategorySelector::All => prop_assert_eq!(shown.len(), webinars.len()),
            CategorySelector::Only(selected) => {
                for webinar in &shown {
                    prop_assert_eq!(&webinar.category, &selected);
                }
            }
        }
    }

    #[test]
    fn prop_combined_filter_is_intersection(
        search in search_term(),
        category in category_choice(),
        status in status_choice(),
    ) {
        let webinars = seed::webinars();
        let combined = WebinarFilter {
            search: search.clone(),
            category: CategorySelector::parse(&category),
            status,
            match_presenter: false,
        };

        let by_search = WebinarFilter { search, ..Default::default() };
        let by_category = WebinarFilter {
            category: CategorySelector::parse(&category),
            ..Default::default()
        };

        let shown: Vec<&str> = combined.apply(&webinars).iter().map(|w| w.id.as_str()).collect();
        let expected: Vec<&str> = webinars
            .iter()
            .filter(|w| by_search.matches(w) && by_category.matches(w))
            .filter(|w| status.map_or(true, |s| w.status == s))
            .map(|w| w.id.as_str())
            .collect();
        prop_assert_eq!(shown, expected);
    }
}

#[test]
fn test_search_react_on_mock_list() {
    let webinars = seed::webinars();
    assert_eq!(webinars.len(), 8);

    let filter = WebinarFilter {
        search: "React".to_string(),
        ..Default::default()
    };
    let titles: Vec<&str> = filter.apply(&webinars).iter().map(|w| w.title.as_str()).collect();

    assert_eq!(
        titles,
        vec![
            "Introduction à React pour débutants",
            "Optimisation des performances React",
        ]
    );
}

#[test]
fn test_devops_category_on_mock_list() {
    let webinars = seed::webinars();
    let filter = WebinarFilter {
        category: CategorySelector::parse("DevOps"),
        ..Default::default()
    };
    let titles: Vec<&str> = filter.apply(&webinars).iter().map(|w| w.title.as_str()).collect();

    assert_eq!(titles, vec!["Déploiement continu avec GitHub Actions"]);
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
    let ids: Vec<&str> = filter.apply(&webinars).iter().map(|w| w.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "6"]);
}
