use async_trait::async_trait;
use uuid::Uuid;

use super::references::Reference;
use super::resource::{Resource, ResourceService, patch_text, require_text};
use crate::domain::{Comment, CommentPatch, EntityKind, NewComment};
use crate::error::DomainError;
use crate::ports::CommentRepository;

/// Comment rules: owned by its author, attached to an active post.
pub struct CommentResource;

pub type CommentService = ResourceService<CommentResource>;

#[async_trait]
impl Resource for CommentResource {
    type Entity = Comment;
    type Store = dyn CommentRepository;
    type Draft = NewComment;
    type Patch = CommentPatch;

    const OWNER_FIELD: Option<&'static str> = Some("keeperUser");

    fn draft_references(draft: &NewComment) -> Vec<Reference> {
        vec![Reference::new("postId", EntityKind::Post, draft.post_id)]
    }

    fn patch_references(current: &Comment, patch: &CommentPatch) -> Vec<Reference> {
        patch
            .post_id
            .filter(|post| *post != current.keeper_post)
            .map(|post| Reference::new("postId", EntityKind::Post, post))
            .into_iter()
            .collect()
    }

    fn build(owner: Uuid, draft: NewComment) -> Result<Comment, DomainError> {
        let draft = NewComment {
            content: require_text("content", draft.content)?,
            post_id: draft.post_id,
        };
        Ok(Comment::new(owner, draft))
    }

    fn apply(comment: &mut Comment, patch: CommentPatch) -> Result<(), DomainError> {
        if let Some(content) = patch_text("content", patch.content)? {
            comment.content = content;
        }
        if let Some(post) = patch.post_id {
            comment.keeper_post = post;
        }
        Ok(())
    }

    async fn check_unique(
        _store: &Self::Store,
        _candidate: &Comment,
    ) -> Result<(), DomainError> {
        Ok(())
    }
}
