use std::sync::Arc;

use chrono::{Duration, Utc};

use blog_core::domain::{CategoryDraft, LocationDraft, PostDraft, ProfileChanges, Viewer};
use blog_core::ports::{BaseRepository, MediaStorage};
use blog_core::service::{BlogSettings, Repositories};
use blog_core::{BlogService, DomainError};

use super::InMemoryStore;
use crate::media::InMemoryMediaStorage;

const PNG: [u8; 12] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

struct Fixture {
    blog: BlogService,
    repos: Repositories,
    media: Arc<InMemoryMediaStorage>,
}

fn fixture() -> Fixture {
    let repos = InMemoryStore::repositories();
    let media = Arc::new(InMemoryMediaStorage::new());
    let blog = BlogService::new(repos.clone(), media.clone(), BlogSettings::default());
    Fixture { blog, repos, media }
}

impl Fixture {
    async fn user(&self, name: &str) -> Viewer {
        let user = self
            .blog
            .register_user(name.to_string(), format!("{name}@example.com"), "hash".to_string())
            .await
            .unwrap();
        Viewer::Authenticated { user_id: user.id }
    }

    async fn category(&self, slug: &str, is_published: bool) -> i64 {
        self.blog
            .create_category(CategoryDraft {
                title: slug.to_uppercase(),
                description: "About it".to_string(),
                slug: slug.to_string(),
                is_published,
            })
            .await
            .unwrap()
            .id
    }

    async fn post(&self, author: &Viewer, draft: PostDraft) -> i64 {
        self.blog.create_post(author, draft).await.unwrap().id
    }
}

fn draft(title: &str) -> PostDraft {
    PostDraft {
        title: title.to_string(),
        text: "Some text".to_string(),
        pub_date: Utc::now() - Duration::hours(1),
        location_id: None,
        category_id: None,
        is_published: true,
    }
}

fn unpublished(title: &str) -> PostDraft {
    PostDraft {
        is_published: false,
        ..draft(title)
    }
}

fn scheduled(title: &str) -> PostDraft {
    PostDraft {
        pub_date: Utc::now() + Duration::days(2),
        ..draft(title)
    }
}

fn titles(page: &blog_core::pagination::Page<blog_core::domain::PostPreview>) -> Vec<String> {
    page.items.iter().map(|p| p.post.title.clone()).collect()
}

#[tokio::test]
async fn test_unpublished_post_visible_only_to_author() {
    let f = fixture();
    let alice = f.user("alice").await;
    let bob = f.user("bob").await;
    let id = f.post(&alice, unpublished("Draft")).await;

    assert!(f.blog.post_detail(id, &alice).await.is_ok());
    assert!(matches!(
        f.blog.post_detail(id, &Viewer::Anonymous).await,
        Err(DomainError::NotFound { entity: "post", .. })
    ));
    assert!(matches!(
        f.blog.post_detail(id, &bob).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_author_edits_and_deletes_hidden_post() {
    let f = fixture();
    let alice = f.user("alice").await;
    let id = f.post(&alice, scheduled("Later")).await;

    assert!(f.blog.post_for_edit(&alice, id).await.is_ok());

    let updated = f
        .blog
        .update_post(&alice, id, unpublished("Renamed"))
        .await
        .unwrap();
    assert_eq!(updated.title, "Renamed");
    assert!(!updated.is_published);

    f.blog.delete_post(&alice, id).await.unwrap();
    assert!(matches!(
        f.blog.post_detail(id, &alice).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_non_author_is_refused_on_visible_post() {
    let f = fixture();
    let alice = f.user("alice").await;
    let bob = f.user("bob").await;
    let id = f.post(&alice, draft("Public")).await;

    assert!(matches!(
        f.blog.update_post(&bob, id, draft("Hijacked")).await,
        Err(DomainError::NotAuthor { post_id }) if post_id == id
    ));
    assert!(matches!(
        f.blog.delete_post(&bob, id).await,
        Err(DomainError::NotAuthor { .. })
    ));
}

#[tokio::test]
async fn test_non_author_gets_not_found_on_hidden_post() {
    let f = fixture();
    let alice = f.user("alice").await;
    let bob = f.user("bob").await;
    let id = f.post(&alice, unpublished("Secret")).await;

    assert!(matches!(
        f.blog.delete_post(&bob, id).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_anonymous_cannot_create_post() {
    let f = fixture();
    assert!(matches!(
        f.blog.create_post(&Viewer::Anonymous, draft("Nope")).await,
        Err(DomainError::Unauthenticated)
    ));
}

#[tokio::test]
async fn test_create_post_rejects_unknown_category() {
    let f = fixture();
    let alice = f.user("alice").await;

    let result = f
        .blog
        .create_post(
            &alice,
            PostDraft {
                category_id: Some(404),
                ..draft("Filed")
            },
        )
        .await;

    match result {
        Err(DomainError::Validation(fields)) => assert_eq!(fields[0].field, "category"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_comment_is_recorded_with_author_and_post() {
    let f = fixture();
    let alice = f.user("alice").await;
    let bob = f.user("bob").await;
    let id = f.post(&alice, draft("Open")).await;

    let comment = f
        .blog
        .add_comment(&bob, id, "Nice!".to_string())
        .await
        .unwrap();

    assert_eq!(Some(comment.author_id), bob.user_id());
    assert_eq!(comment.post_id, id);

    let detail = f.blog.post_detail(id, &Viewer::Anonymous).await.unwrap();
    assert_eq!(detail.author_username, "alice");
    assert_eq!(detail.comments.len(), 1);
    assert_eq!(detail.comments[0].author_username, "bob");
}

#[tokio::test]
async fn test_cannot_comment_on_hidden_post() {
    let f = fixture();
    let alice = f.user("alice").await;
    let bob = f.user("bob").await;
    let id = f.post(&alice, unpublished("Hidden")).await;

    assert!(matches!(
        f.blog.add_comment(&bob, id, "Hi".to_string()).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_only_comment_author_edits_or_deletes() {
    let f = fixture();
    let alice = f.user("alice").await;
    let bob = f.user("bob").await;
    let id = f.post(&alice, draft("Open")).await;
    let comment = f
        .blog
        .add_comment(&bob, id, "First".to_string())
        .await
        .unwrap();

    // Even the post author may not touch someone else's comment.
    assert!(matches!(
        f.blog
            .update_comment(&alice, id, comment.id, "Edited".to_string())
            .await,
        Err(DomainError::NotAuthor { post_id }) if post_id == id
    ));
    assert!(matches!(
        f.blog.delete_comment(&alice, id, comment.id).await,
        Err(DomainError::NotAuthor { .. })
    ));

    let edited = f
        .blog
        .update_comment(&bob, id, comment.id, "Edited".to_string())
        .await
        .unwrap();
    assert_eq!(edited.text, "Edited");
    assert_eq!(edited.created_at, comment.created_at);

    f.blog.delete_comment(&bob, id, comment.id).await.unwrap();
    let detail = f.blog.post_detail(id, &bob).await.unwrap();
    assert!(detail.comments.is_empty());
}

#[tokio::test]
async fn test_comment_must_belong_to_post_in_url() {
    let f = fixture();
    let alice = f.user("alice").await;
    let first = f.post(&alice, draft("One")).await;
    let second = f.post(&alice, draft("Two")).await;
    let comment = f
        .blog
        .add_comment(&alice, first, "On one".to_string())
        .await
        .unwrap();

    assert!(matches!(
        f.blog.comment_for_edit(&alice, second, comment.id).await,
        Err(DomainError::NotFound { entity: "comment", .. })
    ));
}

#[tokio::test]
async fn test_deleting_post_deletes_its_comments() {
    let f = fixture();
    let alice = f.user("alice").await;
    let bob = f.user("bob").await;
    let id = f.post(&alice, draft("Doomed")).await;
    let comment = f.blog.add_comment(&bob, id, "Bye".to_string()).await.unwrap();

    f.blog.delete_post(&alice, id).await.unwrap();

    assert!(f.repos.comments.find_by_id(comment.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_listings_hide_future_posts_except_on_own_profile() {
    let f = fixture();
    let alice = f.user("alice").await;
    let bob = f.user("bob").await;
    f.post(&alice, draft("Now")).await;
    f.post(&alice, scheduled("Tomorrow")).await;
    f.post(&alice, unpublished("Draft")).await;

    let index = f.blog.index(None).await.unwrap();
    assert_eq!(titles(&index), vec!["Now"]);

    let (_, seen_by_bob) = f.blog.profile("alice", &bob, None).await.unwrap();
    assert_eq!(titles(&seen_by_bob), vec!["Now"]);

    let (owner, own) = f.blog.profile("alice", &alice, None).await.unwrap();
    assert_eq!(owner.username, "alice");
    assert_eq!(own.total_items, 3);
    assert_eq!(titles(&own)[0], "Tomorrow");
}

#[tokio::test]
async fn test_index_orders_by_pub_date_and_counts_comments() {
    let f = fixture();
    let alice = f.user("alice").await;
    let older = f
        .post(
            &alice,
            PostDraft {
                pub_date: Utc::now() - Duration::days(3),
                ..draft("Older")
            },
        )
        .await;
    f.post(&alice, draft("Newer")).await;
    f.blog.add_comment(&alice, older, "a".to_string()).await.unwrap();
    f.blog.add_comment(&alice, older, "b".to_string()).await.unwrap();

    let index = f.blog.index(None).await.unwrap();
    assert_eq!(titles(&index), vec!["Newer", "Older"]);
    assert_eq!(index.items[0].comment_count, 0);
    assert_eq!(index.items[1].comment_count, 2);
    assert_eq!(index.items[1].author_username, "alice");
}

#[tokio::test]
async fn test_hidden_category_hides_page_and_posts() {
    let f = fixture();
    let alice = f.user("alice").await;
    let hidden = f.category("hidden", false).await;
    let open = f.category("open", true).await;
    f.post(
        &alice,
        PostDraft {
            category_id: Some(hidden),
            ..draft("In hidden")
        },
    )
    .await;
    f.post(
        &alice,
        PostDraft {
            category_id: Some(open),
            ..draft("In open")
        },
    )
    .await;

    assert!(matches!(
        f.blog.category_posts("hidden", None).await,
        Err(DomainError::NotFound { entity: "category", .. })
    ));
    assert!(matches!(
        f.blog.category_posts("missing", None).await,
        Err(DomainError::NotFound { .. })
    ));

    let (category, posts) = f.blog.category_posts("open", None).await.unwrap();
    assert_eq!(category.id, open);
    assert_eq!(titles(&posts), vec!["In open"]);

    let index = f.blog.index(None).await.unwrap();
    assert_eq!(titles(&index), vec!["In open"]);
}

#[tokio::test]
async fn test_deleting_category_keeps_posts_uncategorised() {
    let f = fixture();
    let alice = f.user("alice").await;
    let hidden = f.category("hidden", false).await;
    let id = f
        .post(
            &alice,
            PostDraft {
                category_id: Some(hidden),
                ..draft("Rescued")
            },
        )
        .await;
    assert!(f.blog.index(None).await.unwrap().items.is_empty());

    f.blog.delete_category(hidden).await.unwrap();

    let post = f.blog.post_detail(id, &Viewer::Anonymous).await.unwrap();
    assert!(post.post.category_id.is_none());
    assert_eq!(titles(&f.blog.index(None).await.unwrap()), vec!["Rescued"]);
}

#[tokio::test]
async fn test_deleting_location_nulls_reference() {
    let f = fixture();
    let alice = f.user("alice").await;
    let location = f
        .blog
        .create_location(LocationDraft {
            name: "Moscow".to_string(),
            is_published: true,
        })
        .await
        .unwrap();
    let id = f
        .post(
            &alice,
            PostDraft {
                location_id: Some(location.id),
                ..draft("Somewhere")
            },
        )
        .await;

    f.blog.delete_location(location.id).await.unwrap();

    let detail = f.blog.post_detail(id, &alice).await.unwrap();
    assert!(detail.location.is_none());
    assert!(detail.post.location_id.is_none());
}

#[tokio::test]
async fn test_post_form_offers_only_published_entries() {
    let f = fixture();
    f.category("travel", true).await;
    f.category("secret", false).await;
    for (name, is_published) in [("Moscow", true), ("Atlantis", false)] {
        f.blog
            .create_location(LocationDraft {
                name: name.to_string(),
                is_published,
            })
            .await
            .unwrap();
    }

    let choices = f.blog.form_choices().await.unwrap();
    let slugs: Vec<_> = choices.categories.iter().map(|c| c.slug.as_str()).collect();
    let names: Vec<_> = choices.locations.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(slugs, vec!["travel"]);
    assert_eq!(names, vec!["Moscow"]);

    let catalogue = f.blog.catalogue().await.unwrap();
    assert_eq!(catalogue.categories.len(), 2);
    assert_eq!(catalogue.locations.len(), 2);
}

#[tokio::test]
async fn test_duplicate_category_slug_rejected() {
    let f = fixture();
    f.category("travel", true).await;

    let result = f
        .blog
        .create_category(CategoryDraft {
            title: "Again".to_string(),
            description: "Dup".to_string(),
            slug: "travel".to_string(),
            is_published: true,
        })
        .await;
    assert!(matches!(result, Err(DomainError::Validation(_))));
}

#[tokio::test]
async fn test_unknown_profile_is_not_found() {
    let f = fixture();
    assert!(matches!(
        f.blog.profile("ghost", &Viewer::Anonymous, None).await,
        Err(DomainError::NotFound { entity: "user", .. })
    ));
}

#[tokio::test]
async fn test_page_past_the_end_is_not_found() {
    let f = fixture();
    let alice = f.user("alice").await;
    f.post(&alice, draft("Only")).await;

    assert!(f.blog.index(Some(1)).await.is_ok());
    assert!(matches!(
        f.blog.index(Some(2)).await,
        Err(DomainError::NotFound { entity: "page", .. })
    ));
}

#[tokio::test]
async fn test_page_number_beyond_any_offset_is_not_found() {
    let f = fixture();
    let alice = f.user("alice").await;
    f.post(&alice, draft("Only")).await;

    assert!(matches!(
        f.blog.index(Some(u64::MAX)).await,
        Err(DomainError::NotFound { entity: "page", .. })
    ));
    assert!(matches!(
        f.blog.profile("alice", &alice, Some(u64::MAX)).await,
        Err(DomainError::NotFound { entity: "page", .. })
    ));
}

#[tokio::test]
async fn test_profile_update_checks_username_clash() {
    let f = fixture();
    let alice = f.user("alice").await;
    f.user("bob").await;

    let clash = f
        .blog
        .update_profile(
            &alice,
            ProfileChanges {
                username: "bob".to_string(),
                email: "alice@example.com".to_string(),
                first_name: String::new(),
                last_name: String::new(),
            },
        )
        .await;
    assert!(matches!(clash, Err(DomainError::Validation(_))));

    let renamed = f
        .blog
        .update_profile(
            &alice,
            ProfileChanges {
                username: "alice2".to_string(),
                email: "alice@example.com".to_string(),
                first_name: "Alice".to_string(),
                last_name: "Liddell".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.username, "alice2");
    assert_eq!(renamed.first_name, "Alice");
}

#[tokio::test]
async fn test_duplicate_registration_rejected() {
    let f = fixture();
    f.user("alice").await;

    let again = f
        .blog
        .register_user("alice".to_string(), "x@example.com".to_string(), "h".to_string())
        .await;
    assert!(matches!(again, Err(DomainError::Duplicate(_))));
}

#[tokio::test]
async fn test_attach_image_replaces_previous_file() {
    let f = fixture();
    let alice = f.user("alice").await;
    let bob = f.user("bob").await;
    let id = f.post(&alice, draft("Pictured")).await;

    let first = f
        .blog
        .attach_image(&alice, id, "image/png", PNG.to_vec())
        .await
        .unwrap();
    let first_path = first.image.clone().unwrap();
    assert!(first_path.starts_with("posts_images/"));
    assert!(first_path.ends_with(".png"));

    let second = f
        .blog
        .attach_image(&alice, id, "image/png", PNG.to_vec())
        .await
        .unwrap();
    let second_path = second.image.unwrap();

    assert_ne!(first_path, second_path);
    assert!(f.media.load(&first_path).await.unwrap().is_none());
    assert!(f.media.load(&second_path).await.unwrap().is_some());

    assert!(matches!(
        f.blog
            .attach_image(&bob, id, "image/png", PNG.to_vec())
            .await,
        Err(DomainError::NotAuthor { .. })
    ));
    assert!(matches!(
        f.blog
            .attach_image(&alice, id, "image/gif", PNG.to_vec())
            .await,
        Err(DomainError::Validation(_))
    ));
}

#[tokio::test]
async fn test_deleting_user_cascades_to_posts_and_comments() {
    let f = fixture();
    let alice = f.user("alice").await;
    let bob = f.user("bob").await;
    let alice_post = f.post(&alice, draft("Alice's")).await;
    let bob_post = f.post(&bob, draft("Bob's")).await;
    let on_bob = f
        .blog
        .add_comment(&alice, bob_post, "From alice".to_string())
        .await
        .unwrap();

    f.repos.users.delete(alice.user_id().unwrap()).await.unwrap();

    assert!(f.repos.posts.find_by_id(alice_post).await.unwrap().is_none());
    assert!(f.repos.comments.find_by_id(on_bob.id).await.unwrap().is_none());
    assert!(f.repos.posts.find_by_id(bob_post).await.unwrap().is_some());
}
