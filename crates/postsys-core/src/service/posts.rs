use async_trait::async_trait;
use uuid::Uuid;

use super::references::Reference;
use super::resource::{Resource, ResourceService, patch_text, require_text};
use crate::domain::{EntityKind, NewPost, Post, PostPatch};
use crate::error::DomainError;
use crate::ports::PostRepository;

/// Post rules: owned by its keeper, filed under an active category.
pub struct PostResource;

pub type PostService = ResourceService<PostResource>;

#[async_trait]
impl Resource for PostResource {
    type Entity = Post;
    type Store = dyn PostRepository;
    type Draft = NewPost;
    type Patch = PostPatch;

    const OWNER_FIELD: Option<&'static str> = Some("keeper");

    fn draft_references(draft: &NewPost) -> Vec<Reference> {
        vec![Reference::new("category", EntityKind::Category, draft.category)]
    }

    fn patch_references(current: &Post, patch: &PostPatch) -> Vec<Reference> {
        patch
            .category
            .filter(|category| *category != current.category)
            .map(|category| Reference::new("category", EntityKind::Category, category))
            .into_iter()
            .collect()
    }

    fn build(owner: Uuid, draft: NewPost) -> Result<Post, DomainError> {
        let draft = NewPost {
            title: require_text("title", draft.title)?,
            category: draft.category,
            content: require_text("content", draft.content)?,
        };
        Ok(Post::new(owner, draft))
    }

    fn apply(post: &mut Post, patch: PostPatch) -> Result<(), DomainError> {
        if let Some(title) = patch_text("title", patch.title)? {
            post.title = title;
        }
        if let Some(content) = patch_text("content", patch.content)? {
            post.content = content;
        }
        if let Some(category) = patch.category {
            post.category = category;
        }
        Ok(())
    }

    async fn check_unique(_store: &Self::Store, _candidate: &Post) -> Result<(), DomainError> {
        Ok(())
    }
}
