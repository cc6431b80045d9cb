//! Community feed held in memory for the session.

use crate::catalog::default_posts;
use crate::types::{new_id, Post, PostCategory, UserProfile};
use crate::{Error, Result};

/// What a user typed into the composer
#[derive(Clone, Debug, Default)]
pub struct PostDraft {
    pub content: String,
    pub category: Option<PostCategory>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Feed {
    posts: Vec<Post>,
}

impl Default for Feed {
    fn default() -> Self {
        Self {
            posts: default_posts(),
        }
    }
}

impl Feed {
    /// Newest first; `None` shows every category
    pub fn posts(&self, category: Option<PostCategory>) -> Vec<&Post> {
        self.posts
            .iter()
            .filter(|post| category.map_or(true, |c| post.category == c))
            .collect()
    }

    /// Publish a post as `author`. Needs text or media.
    pub fn publish(&mut self, author: &UserProfile, draft: PostDraft) -> Result<&Post> {
        let content = draft.content.trim().to_string();
        if content.is_empty() && draft.image_url.is_none() && draft.video_url.is_none() {
            return Err(Error::InvalidInput("post needs text or media".into()));
        }

        let avatar_seed: u32 = author.name.bytes().map(u32::from).sum();
        let post = Post {
            id: new_id(),
            user_id: author.uid.clone().unwrap_or_else(|| author.name.clone()),
            user_name: author.name.clone(),
            user_avatar: format!("https://picsum.photos/100/100?random={}", avatar_seed),
            content,
            image_url: draft.image_url,
            video_url: draft.video_url,
            likes: 0,
            comments: 0,
            timestamp: "Just now".into(),
            category: draft.category.unwrap_or(PostCategory::General),
            is_trainer: author.is_trainer.filter(|t| *t),
        };

        self.posts.insert(0, post);
        Ok(&self.posts[0])
    }

    /// Add one like to a post
    pub fn like(&mut self, post_id: &str) -> bool {
        match self.posts.iter_mut().find(|post| post.id == post_id) {
            Some(post) => {
                post.likes += 1;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Gender, Goal, Level};

    fn author(trainer: bool) -> UserProfile {
        UserProfile {
            name: "Jo".into(),
            goals: vec![Goal::Maintenance],
            level: Level::Intermediate,
            weight: 150.0,
            height: "5'5\"".into(),
            age: 28,
            gender: Gender::Other,
            is_trainer: Some(trainer),
            custom_calories: None,
            earnings_mtd: None,
            uid: None,
        }
    }

    #[test]
    fn test_filter_by_category() {
        let feed = Feed::default();
        assert_eq!(feed.posts(None).len(), 3);
        let nutrition = feed.posts(Some(PostCategory::Nutrition));
        assert_eq!(nutrition.len(), 1);
        assert_eq!(nutrition[0].user_name, "Mike T.");
    }

    #[test]
    fn test_publish_prepends() {
        let mut feed = Feed::default();
        let draft = PostDraft {
            content: "  New PR on deadlift  ".into(),
            category: Some(PostCategory::Achievement),
            ..PostDraft::default()
        };
        let post = feed.publish(&author(false), draft).unwrap();
        assert_eq!(post.content, "New PR on deadlift");
        assert_eq!(post.is_trainer, None);

        let posts = feed.posts(None);
        assert_eq!(posts.len(), 4);
        assert_eq!(posts[0].user_name, "Jo");
    }

    #[test]
    fn test_empty_post_rejected() {
        let mut feed = Feed::default();
        assert!(feed.publish(&author(true), PostDraft::default()).is_err());

        let media_only = PostDraft {
            image_url: Some("file:///pr.jpg".into()),
            ..PostDraft::default()
        };
        let post = feed.publish(&author(true), media_only).unwrap();
        assert_eq!(post.category, PostCategory::General);
        assert_eq!(post.is_trainer, Some(true));
    }

    #[test]
    fn test_like() {
        let mut feed = Feed::default();
        assert!(feed.like("2"));
        assert_eq!(feed.posts(Some(PostCategory::Achievement))[0].likes, 46);
        assert!(!feed.like("missing"));
    }
}
