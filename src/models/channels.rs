use serde::{Deserialize, Serialize};

use super::nullable;

pub const CATEGORIES: [&str; 11] = [
    "Just Chatting",
    "Gaming",
    "Music",
    "Art",
    "Technology",
    "Education",
    "Cooking",
    "Fitness",
    "Travel",
    "IRL",
    "Other",
];

pub const LANGUAGES: [(&str, &str); 11] = [
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("zh", "Chinese"),
    ("other", "Other"),
];

pub const MAX_CHANNEL_TITLE_LEN: usize = 255;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentRating {
    #[default]
    General,
    Teen,
    Mature,
}

impl ContentRating {
    pub const ALL: [ContentRating; 3] = [ContentRating::General, ContentRating::Teen, ContentRating::Mature];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentRating::General => "general",
            ContentRating::Teen => "teen",
            ContentRating::Mature => "mature",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "teen" => ContentRating::Teen,
            "mature" => ContentRating::Mature,
            _ => ContentRating::General,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContentRating::General => "General Audience",
            ContentRating::Teen => "Teen",
            ContentRating::Mature => "Mature",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ContentRating::General => "Suitable for all ages",
            ContentRating::Teen => "May contain mild language or themes",
            ContentRating::Mature => "Adult content, strong language",
        }
    }
}

fn rating_or_default<'de, D>(deserializer: D) -> Result<ContentRating, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.map(|r| ContentRating::parse(&r)).unwrap_or_default())
}

/// The signed-in streamer's own channel record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSettings {
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    #[serde(default, deserialize_with = "nullable")]
    pub language: String,
    #[serde(default, deserialize_with = "nullable")]
    pub category: String,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "rating_or_default")]
    pub content_rating: ContentRating,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

/// The four fields edited on the channel settings page; the only ones sent back on save.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ChannelForm {
    pub title: String,
    pub description: String,
    pub language: String,
    pub category: String,
}

impl ChannelSettings {
    pub fn form_fields(&self) -> ChannelForm {
        ChannelForm {
            title: self.title.clone(),
            description: self.description.clone(),
            language: self.language.clone(),
            category: self.category.clone(),
        }
    }
}

impl ChannelForm {
    pub fn validate_form(&self) -> Result<(), String> {
        if self.title.chars().count() > MAX_CHANNEL_TITLE_LEN {
            return Err(format!(
                "Title must be {MAX_CHANNEL_TITLE_LEN} characters or less"
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nulls_become_empty() {
        let s: ChannelSettings = serde_json::from_value(json!({
            "title": null,
            "description": "hi",
            "contentRating": "weird"
        }))
        .unwrap();
        assert_eq!(s.title, "");
        assert_eq!(s.description, "hi");
        assert_eq!(s.content_rating, ContentRating::General);
    }

    #[test]
    fn form_fields_leave_rating_and_tags_alone() {
        let s = ChannelSettings {
            title: "t".into(),
            tags: vec!["x".into()],
            content_rating: ContentRating::Mature,
            last_updated: Some("now".into()),
            ..Default::default()
        };
        let body = serde_json::to_value(s.form_fields()).unwrap();
        assert_eq!(
            body,
            json!({ "title": "t", "description": "", "language": "", "category": "" })
        );
        assert!(body.get("contentRating").is_none());
        assert!(body.get("tags").is_none());
    }

    #[test]
    fn rejects_long_titles() {
        let mut s = ChannelForm::default();
        s.title = "a".repeat(255);
        assert!(s.validate_form().is_ok());
        s.title.push('a');
        assert!(s.validate_form().is_err());
    }
}
