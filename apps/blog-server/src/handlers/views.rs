//! Domain values turned into wire payloads.

use blog_core::domain::{Category, CommentView, Location, Post, PostDetail, PostPreview, User};
use blog_core::pagination::Page;
use blog_shared::PageResponse;
use blog_shared::dto::{
    AccountResponse, CategoryResponse, CommentResponse, LocationResponse, PostDetailResponse,
    PostForm, PostSummary, UserResponse,
};

use crate::state::AppState;

pub fn page<T, U>(page: Page<T>, f: impl FnMut(T) -> U) -> PageResponse<U> {
    let has_next = page.has_next();
    let has_previous = page.has_previous();
    let page = page.map(f);

    PageResponse {
        items: page.items,
        page: page.number,
        per_page: page.per_page,
        total_items: page.total_items,
        total_pages: page.total_pages,
        has_next,
        has_previous,
    }
}

pub fn post_summary(state: &AppState, preview: PostPreview) -> PostSummary {
    let post = preview.post;
    PostSummary {
        id: post.id,
        image_url: post.image.as_deref().map(|p| state.media_link(p)),
        title: post.title,
        text: post.text,
        pub_date: post.pub_date,
        author: preview.author_username,
        category_id: post.category_id,
        location_id: post.location_id,
        is_published: post.is_published,
        comment_count: preview.comment_count,
    }
}

pub fn post_detail(state: &AppState, detail: PostDetail) -> PostDetailResponse {
    let post = detail.post;
    PostDetailResponse {
        id: post.id,
        image_url: post.image.as_deref().map(|p| state.media_link(p)),
        title: post.title,
        text: post.text,
        pub_date: post.pub_date,
        author: detail.author_username,
        category: detail.category.map(category),
        location: detail.location.map(location),
        is_published: post.is_published,
        created_at: post.created_at,
        comments: detail.comments.into_iter().map(comment).collect(),
    }
}

pub fn post_form(post: &Post) -> PostForm {
    PostForm {
        title: post.title.clone(),
        text: post.text.clone(),
        pub_date: post.pub_date,
        location_id: post.location_id,
        category_id: post.category_id,
        is_published: post.is_published,
    }
}

pub fn comment(view: CommentView) -> CommentResponse {
    let comment = view.comment;
    CommentResponse {
        id: comment.id,
        post_id: comment.post_id,
        author: view.author_username,
        text: comment.text,
        created_at: comment.created_at,
    }
}

pub fn category(category: Category) -> CategoryResponse {
    CategoryResponse {
        id: category.id,
        title: category.title,
        description: category.description,
        slug: category.slug,
        is_published: category.is_published,
        created_at: category.created_at,
    }
}

pub fn location(location: Location) -> LocationResponse {
    LocationResponse {
        id: location.id,
        name: location.name,
        is_published: location.is_published,
        created_at: location.created_at,
    }
}

pub fn public_user(user: User) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username,
        first_name: user.first_name,
        last_name: user.last_name,
        date_joined: user.created_at,
    }
}

pub fn account(user: User) -> AccountResponse {
    AccountResponse {
        id: user.id,
        username: user.username,
        email: user.email,
        first_name: user.first_name,
        last_name: user.last_name,
        is_staff: user.is_staff,
        date_joined: user.created_at,
    }
}
