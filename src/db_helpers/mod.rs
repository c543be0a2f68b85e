use crate::errors::RequestError;

mod article_helpers;
mod comment_helpers;
mod topic_helpers;
mod user_helpers;

pub use article_helpers::*;
pub use comment_helpers::*;
pub use topic_helpers::*;
pub use user_helpers::*;

/// Columns callers may sort the article listing by. The sort target is
/// spliced into the query text, so anything outside this list must be
/// rejected before a query is ever built.
const VALID_SORT_COLUMNS: &[&str] = &[
    "author",
    "title",
    "article_id",
    "topic",
    "created_at",
    "votes",
    "article_img_url",
    "comment_count",
];

/// Builds the article listing query: articles LEFT JOINed against comments,
/// grouped per article so each row carries a comment count, with a validated
/// dynamic ORDER BY and an optional topic filter kept as a bound parameter.
pub(crate) struct ArticleQueryBuilder {
    sort_by: String,
    order: String,
    topic: Option<String>,
}

impl ArticleQueryBuilder {
    pub(crate) fn new(
        sort_by: Option<String>,
        order: Option<String>,
        topic: Option<String>,
    ) -> Result<Self, RequestError> {
        let sort_by = sort_by.unwrap_or_else(|| String::from("created_at"));
        let order = order.unwrap_or_else(|| String::from("desc"));
        if !VALID_SORT_COLUMNS.contains(&sort_by.as_str()) {
            return Err(RequestError::InvalidSortColumn);
        }
        if order != "asc" && order != "desc" {
            return Err(RequestError::InvalidOrder);
        }
        Ok(Self {
            sort_by,
            order,
            topic,
        })
    }

    pub(crate) fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    pub(crate) fn build(&self) -> String {
        let mut query = String::from(
            "SELECT articles.author AS author, \
                    articles.title AS title, \
                    articles.article_id AS article_id, \
                    articles.topic AS topic, \
                    articles.created_at AS created_at, \
                    articles.votes AS votes, \
                    articles.article_img_url AS article_img_url, \
                    COUNT(comments.comment_id) AS comment_count \
             FROM articles \
             LEFT JOIN comments ON articles.article_id = comments.article_id",
        );
        if self.topic.is_some() {
            query.push_str(" WHERE articles.topic = $1");
        }
        query.push_str(" GROUP BY articles.article_id ORDER BY ");
        query.push_str(&self.sort_by);
        query.push(' ');
        query.push_str(&self.order);
        query
    }
}

// ----------------- Helper Functions -----------------

pub(crate) fn parse_id(raw: &str, message: &'static str) -> Result<i64, RequestError> {
    raw.parse::<i64>()
        .map_err(|_| RequestError::InvalidIdType(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_created_at_descending() {
        let builder = ArticleQueryBuilder::new(None, None, None).unwrap();
        let query = builder.build();
        assert!(query.ends_with("ORDER BY created_at desc"));
        assert!(!query.contains("WHERE"));
    }

    #[test]
    fn topic_filter_is_a_bound_parameter() {
        let builder =
            ArticleQueryBuilder::new(None, None, Some(String::from("cooking"))).unwrap();
        let query = builder.build();
        assert!(query.contains("WHERE articles.topic = $1"));
        assert!(!query.contains("cooking"));
    }

    #[test]
    fn rejects_sort_columns_outside_the_allow_list() {
        let result = ArticleQueryBuilder::new(
            Some(String::from("votes; DROP TABLE articles")),
            None,
            None,
        );
        assert!(matches!(result, Err(RequestError::InvalidSortColumn)));
    }

    #[test]
    fn rejects_unknown_order_keywords() {
        let result =
            ArticleQueryBuilder::new(Some(String::from("votes")), Some(String::from("up")), None);
        assert!(matches!(result, Err(RequestError::InvalidOrder)));
    }

    #[test]
    fn accepts_every_allow_listed_column() {
        for column in VALID_SORT_COLUMNS {
            let builder = ArticleQueryBuilder::new(
                Some(column.to_string()),
                Some(String::from("asc")),
                None,
            )
            .unwrap();
            assert!(builder.build().contains(&format!("ORDER BY {} asc", column)));
        }
    }

    #[test]
    fn parse_id_flags_non_numeric_input() {
        assert!(parse_id("7", "Invalid article ID type").is_ok());
        assert!(matches!(
            parse_id("seven", "Invalid article ID type"),
            Err(RequestError::InvalidIdType("Invalid article ID type"))
        ));
    }
}
