//! Category and keyword filtering of the template catalog.

use opsdesk_core::{Template, TemplateCombination, TemplateGroupId};

/// Which templates the catalog shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Category {
    /// Every template of every group.
    #[default]
    All,
    /// The user's favorites.
    Favorites,
    /// One template group.
    Group(TemplateGroupId),
}

/// Category selection plus a search query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateFilter {
    pub category: Category,
    pub query: String,
}

impl TemplateFilter {
    pub fn new(category: Category, query: impl Into<String>) -> Self {
        Self {
            category,
            query: query.into(),
        }
    }

    /// Display name of the selected category.
    pub fn category_name(&self, combinations: &[TemplateCombination]) -> String {
        match self.category {
            Category::All => "All templates".to_string(),
            Category::Favorites => "My favorites".to_string(),
            Category::Group(id) => combinations
                .iter()
                .find(|c| c.id == id)
                .map(|c| c.name.clone())
                .unwrap_or_default(),
        }
    }

    /// Templates of the selected category whose name contains the query,
    /// ignoring case and surrounding whitespace.
    pub fn apply<'a>(
        &self,
        combinations: &'a [TemplateCombination],
        favorites: &'a [Template],
    ) -> Vec<&'a Template> {
        let source: Vec<&'a Template> = match self.category {
            Category::All => combinations.iter().flat_map(|c| c.templates.iter()).collect(),
            Category::Favorites => favorites.iter().collect(),
            Category::Group(id) => combinations
                .iter()
                .find(|c| c.id == id)
                .map(|c| c.templates.iter().collect())
                .unwrap_or_default(),
        };

        let query = self.query.trim().to_lowercase();
        if query.is_empty() {
            return source;
        }
        source
            .into_iter()
            .filter(|t| t.name.to_lowercase().contains(&query))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opsdesk_core::TemplateId;

    fn template(id: i64, name: &str) -> Template {
        Template {
            id: TemplateId::new(id),
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn groups() -> Vec<TemplateCombination> {
        vec![
            TemplateCombination {
                id: TemplateGroupId::new(1),
                name: "Compute".to_string(),
                templates: vec![template(10, "Create VM"), template(11, "Resize VM")],
                ..Default::default()
            },
            TemplateCombination {
                id: TemplateGroupId::new(2),
                name: "Network".to_string(),
                templates: vec![template(20, "Open port")],
                ..Default::default()
            },
        ]
    }

    fn ids(templates: Vec<&Template>) -> Vec<i64> {
        templates.iter().map(|t| t.id.get()).collect()
    }

    #[test]
    fn test_categories() {
        let groups = groups();
        let favorites = vec![template(20, "Open port")];

        let all = TemplateFilter::default();
        assert_eq!(ids(all.apply(&groups, &favorites)), vec![10, 11, 20]);

        let favs = TemplateFilter::new(Category::Favorites, "");
        assert_eq!(ids(favs.apply(&groups, &favorites)), vec![20]);

        let network = TemplateFilter::new(Category::Group(TemplateGroupId::new(2)), "");
        assert_eq!(ids(network.apply(&groups, &favorites)), vec![20]);
        assert_eq!(network.category_name(&groups), "Network");

        let missing = TemplateFilter::new(Category::Group(TemplateGroupId::new(9)), "");
        assert!(missing.apply(&groups, &favorites).is_empty());
        assert_eq!(missing.category_name(&groups), "");
    }

    #[test]
    fn test_query_is_trimmed_and_case_insensitive() {
        let groups = groups();
        let filter = TemplateFilter::new(Category::All, "  vm ");
        assert_eq!(ids(filter.apply(&groups, &[])), vec![10, 11]);
    }
}
