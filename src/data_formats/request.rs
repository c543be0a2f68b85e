use serde::Deserialize;

// Required fields are modelled as Options so that missing ones surface as a
// normalized "Missing required fields" error instead of a deserializer reject.

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct NewArticleRequest {
    pub author: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub topic: Option<String>,
    pub article_img_url: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct NewCommentRequest {
    pub username: Option<String>,
    pub body: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct NewTopicRequest {
    pub slug: Option<String>,
    pub description: Option<String>,
}

/// The delta arrives as raw JSON so a non-numeric value can be told apart
/// from an absent one.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct UpdateVotesRequest {
    pub inc_votes: Option<serde_json::Value>,
}
