use std::sync::Arc;

use actix_web::dev::ServiceResponse;
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use chrono::{Duration, Utc};
use serde_json::{Value, json};

use blog_core::domain::{CategoryDraft, PostDraft, Viewer};
use blog_core::ports::{PasswordService, TokenService};
use blog_core::service::BlogSettings;
use blog_infra::{Argon2PasswordService, JwtConfig, JwtTokenService};

use super::configure_routes;
use crate::state::AppState;

const PNG: [u8; 12] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 1, 2, 3, 4];

struct Harness {
    state: AppState,
    tokens: Arc<dyn TokenService>,
    passwords: Arc<dyn PasswordService>,
}

impl Harness {
    fn new() -> Self {
        Self::with_media_url("/media/")
    }

    fn with_media_url(media_url: &str) -> Self {
        Self {
            state: AppState::in_memory(BlogSettings::default(), media_url),
            tokens: Arc::new(JwtTokenService::new(JwtConfig::default())),
            passwords: Arc::new(Argon2PasswordService::new()),
        }
    }

    /// Register `name` directly and return a bearer header value.
    async fn login_as(&self, name: &str, roles: &[&str]) -> (i64, String) {
        let user = self
            .state
            .blog
            .register_user(name.to_string(), format!("{name}@example.com"), "x".to_string())
            .await
            .unwrap();
        let roles = roles.iter().map(|r| r.to_string()).collect();
        let token = self.tokens.generate_token(user.id, name, roles).unwrap();
        (user.id, format!("Bearer {token}"))
    }

    async fn post_by(&self, author_id: i64, draft: PostDraft) -> i64 {
        self.state
            .blog
            .create_post(&Viewer::Authenticated { user_id: author_id }, draft)
            .await
            .unwrap()
            .id
    }
}

macro_rules! app {
    ($h:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($h.state.clone()))
                .app_data(web::Data::new($h.tokens.clone()))
                .app_data(web::Data::new($h.passwords.clone()))
                .configure(|cfg| configure_routes(cfg, &$h.state.media_url)),
        )
        .await
    };
}

fn draft(title: &str) -> PostDraft {
    PostDraft {
        title: title.to_string(),
        text: "Body".to_string(),
        pub_date: Utc::now() - Duration::hours(1),
        location_id: None,
        category_id: None,
        is_published: true,
    }
}

fn form(title: &str) -> Value {
    json!({
        "title": title,
        "text": "Body",
        "pub_date": (Utc::now() - Duration::hours(1)).to_rfc3339(),
    })
}

fn location<B>(res: &ServiceResponse<B>) -> &str {
    res.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

#[actix_rt::test]
async fn test_health() {
    let h = Harness::new();
    let app = app!(h);

    let res = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn test_register_login_and_me() {
    let h = Harness::new();
    let app = app!(h);

    let req = test::TestRequest::post()
        .uri("/auth/register/")
        .set_json(json!({"username": "alice", "email": "alice@example.com", "password": "long-enough-1"}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/auth/login/")
        .set_json(json!({"username": "alice", "password": "wrong-password"}))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );

    let req = test::TestRequest::post()
        .uri("/auth/login/")
        .set_json(json!({"username": "nobody", "password": "long-enough-1"}))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );

    let req = test::TestRequest::post()
        .uri("/auth/login/")
        .set_json(json!({"username": "alice", "password": "long-enough-1"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let token = body["access_token"].as_str().unwrap().to_string();
    assert_eq!(body["token_type"], "Bearer");

    let req = test::TestRequest::get()
        .uri("/auth/me/")
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["username"], "alice");
    assert_eq!(body["data"]["is_staff"], false);
}

#[actix_rt::test]
async fn test_register_rejects_taken_username() {
    let h = Harness::new();
    h.login_as("alice", &["user"]).await;
    let app = app!(h);

    let req = test::TestRequest::post()
        .uri("/auth/register/")
        .set_json(json!({"username": "alice", "email": "other@example.com", "password": "long-enough-1"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);
}

#[actix_rt::test]
async fn test_anonymous_is_sent_to_login() {
    let h = Harness::new();
    let app = app!(h);

    let req = test::TestRequest::post()
        .uri("/posts/create/")
        .set_json(form("Anon"))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/auth/login/?next=/posts/create/");
}

#[actix_rt::test]
async fn test_create_post_redirects_to_profile() {
    let h = Harness::new();
    let (_, alice) = h.login_as("alice", &["user"]).await;
    let app = app!(h);

    let req = test::TestRequest::post()
        .uri("/posts/create/")
        .insert_header((header::AUTHORIZATION, alice))
        .set_json(form("Hello"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/profile/alice/");

    let req = test::TestRequest::get().uri("/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["total_items"], 1);
    assert_eq!(body["data"]["items"][0]["title"], "Hello");
    assert_eq!(body["data"]["items"][0]["author"], "alice");
}

#[actix_rt::test]
async fn test_invalid_form_is_unprocessable() {
    let h = Harness::new();
    let (_, alice) = h.login_as("alice", &["user"]).await;
    let app = app!(h);

    let req = test::TestRequest::post()
        .uri("/posts/create/")
        .insert_header((header::AUTHORIZATION, alice))
        .set_json(form(""))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = test::read_body_json(res).await;
    assert!(body["errors"][0].as_str().unwrap().starts_with("title"));
}

#[actix_rt::test]
async fn test_non_author_edit_redirects_to_post() {
    let h = Harness::new();
    let (alice_id, _) = h.login_as("alice", &["user"]).await;
    let (_, bob) = h.login_as("bob", &["user"]).await;
    let post_id = h.post_by(alice_id, draft("Original")).await;
    let app = app!(h);

    let req = test::TestRequest::post()
        .uri(&format!("/posts/{post_id}/edit/"))
        .insert_header((header::AUTHORIZATION, bob.clone()))
        .set_json(form("Hijacked"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), format!("/posts/{post_id}/"));

    let req = test::TestRequest::post()
        .uri(&format!("/posts/{post_id}/delete/"))
        .insert_header((header::AUTHORIZATION, bob))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FOUND);

    let req = test::TestRequest::get()
        .uri(&format!("/posts/{post_id}/"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["title"], "Original");
}

#[actix_rt::test]
async fn test_hidden_post_is_not_found_for_others() {
    let h = Harness::new();
    let (alice_id, alice) = h.login_as("alice", &["user"]).await;
    let (_, bob) = h.login_as("bob", &["user"]).await;
    let post_id = h
        .post_by(
            alice_id,
            PostDraft {
                is_published: false,
                ..draft("Secret")
            },
        )
        .await;
    let app = app!(h);
    let uri = format!("/posts/{post_id}/");

    let res = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header((header::AUTHORIZATION, bob.clone()))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri(&format!("/posts/{post_id}/edit/"))
        .insert_header((header::AUTHORIZATION, bob))
        .set_json(form("Nope"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header((header::AUTHORIZATION, alice))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn test_comment_flow() {
    let h = Harness::new();
    let (alice_id, alice) = h.login_as("alice", &["user"]).await;
    let (_, bob) = h.login_as("bob", &["user"]).await;
    let post_id = h.post_by(alice_id, draft("Discuss")).await;
    let app = app!(h);

    let req = test::TestRequest::post()
        .uri(&format!("/posts/{post_id}/comment/"))
        .insert_header((header::AUTHORIZATION, bob.clone()))
        .set_json(json!({"text": "First!"}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), format!("/posts/{post_id}/"));

    let req = test::TestRequest::get()
        .uri(&format!("/posts/{post_id}/"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let comment = &body["data"]["comments"][0];
    assert_eq!(comment["author"], "bob");
    assert_eq!(comment["text"], "First!");
    let comment_id = comment["id"].as_i64().unwrap();

    // The post author cannot edit bob's comment.
    let req = test::TestRequest::post()
        .uri(&format!("/posts/{post_id}/edit_comment/{comment_id}/"))
        .insert_header((header::AUTHORIZATION, alice))
        .set_json(json!({"text": "Censored"}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), format!("/posts/{post_id}/"));

    let req = test::TestRequest::get()
        .uri(&format!("/posts/{post_id}/edit_comment/{comment_id}/"))
        .insert_header((header::AUTHORIZATION, bob.clone()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["text"], "First!");

    let req = test::TestRequest::post()
        .uri(&format!("/posts/{post_id}/delete_comment/{comment_id}/"))
        .insert_header((header::AUTHORIZATION, bob))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FOUND);

    let req = test::TestRequest::get()
        .uri(&format!("/posts/{post_id}/"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["data"]["comments"].as_array().unwrap().is_empty());
}

#[actix_rt::test]
async fn test_category_page() {
    let h = Harness::new();
    let (alice_id, _) = h.login_as("alice", &["user"]).await;
    let category = h
        .state
        .blog
        .create_category(CategoryDraft {
            title: "Travel".to_string(),
            description: "Trips".to_string(),
            slug: "travel".to_string(),
            is_published: true,
        })
        .await
        .unwrap();
    h.post_by(
        alice_id,
        PostDraft {
            category_id: Some(category.id),
            ..draft("Abroad")
        },
    )
    .await;
    h.post_by(alice_id, draft("At home")).await;
    let app = app!(h);

    let req = test::TestRequest::get().uri("/category/travel/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["category"]["slug"], "travel");
    assert_eq!(body["data"]["posts"]["total_items"], 1);
    assert_eq!(body["data"]["posts"]["items"][0]["title"], "Abroad");

    let req = test::TestRequest::get().uri("/category/nowhere/").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_profile_shows_scheduled_posts_to_owner_only() {
    let h = Harness::new();
    let (alice_id, alice) = h.login_as("alice", &["user"]).await;
    h.post_by(alice_id, draft("Now")).await;
    h.post_by(
        alice_id,
        PostDraft {
            pub_date: Utc::now() + Duration::days(1),
            ..draft("Tomorrow")
        },
    )
    .await;
    let app = app!(h);

    let req = test::TestRequest::get().uri("/profile/alice/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["profile"]["username"], "alice");
    assert_eq!(body["data"]["posts"]["total_items"], 1);
    assert!(body["data"]["profile"].get("email").is_none());

    let req = test::TestRequest::get()
        .uri("/profile/alice/")
        .insert_header((header::AUTHORIZATION, alice))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["posts"]["total_items"], 2);

    let req = test::TestRequest::get().uri("/profile/ghost/").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_edit_profile_redirects_to_new_username() {
    let h = Harness::new();
    let (_, alice) = h.login_as("alice", &["user"]).await;
    let app = app!(h);

    let req = test::TestRequest::post()
        .uri("/edit/")
        .insert_header((header::AUTHORIZATION, alice.clone()))
        .set_json(json!({"username": "alice2", "email": "alice@example.com", "first_name": "Alice"}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/profile/alice2/");

    let req = test::TestRequest::get()
        .uri("/edit/")
        .insert_header((header::AUTHORIZATION, alice))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["first_name"], "Alice");
}

#[actix_rt::test]
async fn test_page_past_the_end_is_not_found() {
    let h = Harness::new();
    let app = app!(h);

    let req = test::TestRequest::get().uri("/?page=1").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/?page=3").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri(&format!("/?page={}", u64::MAX))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_image_upload_and_serving() {
    let h = Harness::new();
    let (alice_id, alice) = h.login_as("alice", &["user"]).await;
    let post_id = h.post_by(alice_id, draft("Pictured")).await;
    let app = app!(h);

    let req = test::TestRequest::post()
        .uri(&format!("/posts/{post_id}/image/"))
        .insert_header((header::AUTHORIZATION, alice.clone()))
        .insert_header((header::CONTENT_TYPE, "image/png"))
        .set_payload(PNG.to_vec())
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::FOUND);

    let req = test::TestRequest::get()
        .uri(&format!("/posts/{post_id}/"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let url = body["data"]["image_url"].as_str().unwrap().to_string();
    assert!(url.starts_with("/media/posts_images/"));

    let res = test::call_service(&app, test::TestRequest::get().uri(&url).to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers().get(header::CONTENT_TYPE).unwrap(), "image/png");
    assert_eq!(test::read_body(res).await.as_ref(), &PNG[..]);

    let req = test::TestRequest::post()
        .uri(&format!("/posts/{post_id}/image/"))
        .insert_header((header::AUTHORIZATION, alice))
        .insert_header((header::CONTENT_TYPE, "text/plain"))
        .set_payload("not an image")
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNPROCESSABLE_ENTITY
    );

    let req = test::TestRequest::get().uri("/media/posts_images/missing.png").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_image_served_under_custom_media_url() {
    let h = Harness::with_media_url("/uploads/");
    let (alice_id, alice) = h.login_as("alice", &["user"]).await;
    let post_id = h.post_by(alice_id, draft("Pictured")).await;
    let app = app!(h);

    let req = test::TestRequest::post()
        .uri(&format!("/posts/{post_id}/image/"))
        .insert_header((header::AUTHORIZATION, alice))
        .insert_header((header::CONTENT_TYPE, "image/png"))
        .set_payload(PNG.to_vec())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FOUND);

    let req = test::TestRequest::get()
        .uri(&format!("/posts/{post_id}/"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let url = body["data"]["image_url"].as_str().unwrap().to_string();
    assert!(url.starts_with("/uploads/posts_images/"));

    let res = test::call_service(&app, test::TestRequest::get().uri(&url).to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);

    let stale = url.replacen("/uploads/", "/media/", 1);
    let res = test::call_service(&app, test::TestRequest::get().uri(&stale).to_request()).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_staff_catalogue_requires_staff_role() {
    let h = Harness::new();
    let (_, alice) = h.login_as("alice", &["user"]).await;
    let (_, admin) = h.login_as("admin", &["user", "staff"]).await;
    let app = app!(h);
    let category = json!({"title": "News", "description": "Latest", "slug": "news"});

    let req = test::TestRequest::post()
        .uri("/staff/categories/")
        .insert_header((header::AUTHORIZATION, alice))
        .set_json(&category)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/staff/categories/")
        .insert_header((header::AUTHORIZATION, admin.clone()))
        .set_json(&category)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/staff/categories/");

    let req = test::TestRequest::post()
        .uri("/staff/categories/")
        .insert_header((header::AUTHORIZATION, admin.clone()))
        .set_json(&category)
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNPROCESSABLE_ENTITY
    );

    let req = test::TestRequest::get()
        .uri("/staff/categories/")
        .insert_header((header::AUTHORIZATION, admin.clone()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"][0]["slug"], "news");

    let req = test::TestRequest::post()
        .uri("/staff/locations/")
        .insert_header((header::AUTHORIZATION, admin))
        .set_json(json!({"name": "Berlin"}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(location(&res), "/staff/locations/");
}

#[actix_rt::test]
async fn test_bad_token_is_unauthorized() {
    let h = Harness::new();
    let app = app!(h);

    let req = test::TestRequest::get()
        .uri("/edit/")
        .insert_header((header::AUTHORIZATION, "Bearer forged"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
}
