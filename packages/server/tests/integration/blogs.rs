use serde_json::json;

use crate::common::{TestApp, routes};

mod create {
    use super::*;

    #[tokio::test]
    async fn authenticated_user_creates_a_blog_they_own() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;
        let me = app.get_with_token(routes::ME, &token).await;

        let res = app
            .post_with_token(
                routes::BLOGS,
                &json!({
                    "title": "React patterns",
                    "author": "Michael Chan",
                    "url": "https://reactpatterns.com/",
                    "likes": 7,
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert!(res.body["id"].is_string());
        assert_eq!(res.body["title"], "React patterns");
        assert_eq!(res.body["likes"], 7);
        assert_eq!(res.body["user"], me.body["id"]);
    }

    #[tokio::test]
    async fn likes_default_to_zero() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;

        let res = app
            .post_with_token(
                routes::BLOGS,
                &json!({"title": "No likes", "author": "A", "url": "http://a.example"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["likes"], 0);
    }

    #[tokio::test]
    async fn requires_a_token() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::BLOGS,
                &json!({"title": "t", "author": "a", "url": "http://a.example"}),
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");

        let list = app.get(routes::BLOGS).await;
        assert!(list.body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_title_or_url_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;

        let no_title = app
            .post_with_token(
                routes::BLOGS,
                &json!({"author": "a", "url": "http://a.example"}),
                &token,
            )
            .await;
        assert_eq!(no_title.status, 400);
        assert_eq!(no_title.body["code"], "VALIDATION_ERROR");

        let no_url = app
            .post_with_token(routes::BLOGS, &json!({"title": "t", "author": "a"}), &token)
            .await;
        assert_eq!(no_url.status, 400);
        assert_eq!(no_url.body["code"], "VALIDATION_ERROR");

        let list = app.get(routes::BLOGS).await;
        assert!(list.body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn negative_likes_are_rejected() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;

        let res = app
            .post_with_token(
                routes::BLOGS,
                &json!({"title": "t", "author": "a", "url": "http://a.example", "likes": -3}),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod listing {
    use super::*;

    #[tokio::test]
    async fn blogs_include_owner_identity() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;
        app.create_blog(&token, "First", "Alice", 1).await;
        app.create_blog(&token, "Second", "Alice", 2).await;

        let res = app.get(routes::BLOGS).await;

        assert_eq!(res.status, 200, "{}", res.text);
        let blogs = res.body.as_array().unwrap();
        assert_eq!(blogs.len(), 2);
        assert_eq!(blogs[0]["title"], "First");
        assert_eq!(blogs[1]["title"], "Second");
        assert_eq!(blogs[0]["user"]["username"], "alice");
        assert_eq!(blogs[0]["user"]["name"], "alice display");
        assert!(blogs[0]["user"].get("password").is_none());
    }

    #[tokio::test]
    async fn unowned_blogs_list_with_null_user() {
        let app = TestApp::spawn().await;
        app.insert_unowned_blog("Legacy").await;

        let res = app.get(routes::BLOGS).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body[0]["title"], "Legacy");
        assert!(res.body[0]["user"].is_null());
    }
}

mod update {
    use super::*;

    #[tokio::test]
    async fn replaces_every_field() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;
        let id = app.create_blog(&token, "Draft", "Alice", 1).await;

        let res = app
            .put(
                &routes::blog(&id),
                &json!({
                    "title": "Final",
                    "author": "Alice A.",
                    "url": "http://final.example",
                    "likes": 10,
                }),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["id"], id);
        assert_eq!(res.body["title"], "Final");
        assert_eq!(res.body["author"], "Alice A.");
        assert_eq!(res.body["likes"], 10);

        let list = app.get(routes::BLOGS).await;
        assert_eq!(list.body[0]["title"], "Final");
        assert_eq!(list.body[0]["user"]["username"], "alice");
    }

    #[tokio::test]
    async fn does_not_require_authentication() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;
        let id = app.create_blog(&token, "Draft", "Alice", 1).await;

        let res = app
            .put(
                &routes::blog(&id),
                &json!({"title": "Edited", "author": "Alice", "url": "http://x.example", "likes": 2}),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app
            .put(
                &routes::blog(&uuid::Uuid::now_v7().to_string()),
                &json!({"title": "t", "author": "a", "url": "http://a.example", "likes": 0}),
            )
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn malformed_id_is_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app
            .put(
                &routes::blog("not-an-id"),
                &json!({"title": "t", "author": "a", "url": "http://a.example", "likes": 0}),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn blank_title_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;
        let id = app.create_blog(&token, "Draft", "Alice", 1).await;

        let res = app
            .put(
                &routes::blog(&id),
                &json!({"title": "   ", "author": "a", "url": "http://a.example", "likes": 0}),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod delete {
    use super::*;

    #[tokio::test]
    async fn owner_can_delete() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;
        let id = app.create_blog(&token, "Doomed", "Alice", 1).await;

        let res = app.delete_with_token(&routes::blog(&id), &token).await;

        assert_eq!(res.status, 204, "{}", res.text);
        assert!(res.text.is_empty());

        let list = app.get(routes::BLOGS).await;
        assert!(list.body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn other_user_is_forbidden() {
        let app = TestApp::spawn().await;
        let alice = app.create_authenticated_user("alice", "securepass").await;
        let bob = app.create_authenticated_user("bob", "securepass").await;
        let id = app.create_blog(&alice, "Mine", "Alice", 1).await;

        let res = app.delete_with_token(&routes::blog(&id), &bob).await;

        assert_eq!(res.status, 403);
        assert_eq!(res.body["code"], "PERMISSION_DENIED");

        let list = app.get(routes::BLOGS).await;
        assert_eq!(list.body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn requires_a_token() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;
        let id = app.create_blog(&token, "Mine", "Alice", 1).await;

        let res = app.delete_without_token(&routes::blog(&id)).await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;

        let res = app
            .delete_with_token(&routes::blog(&uuid::Uuid::now_v7().to_string()), &token)
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn malformed_id_is_a_validation_error() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;

        let res = app.delete_with_token(&routes::blog("12345"), &token).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn blog_without_owner_cannot_be_deleted() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;
        let id = app.insert_unowned_blog("Legacy").await;

        let res = app.delete_with_token(&routes::blog(&id), &token).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");

        let list = app.get(routes::BLOGS).await;
        assert_eq!(list.body.as_array().unwrap().len(), 1);
    }
}

mod stats {
    use super::*;

    #[tokio::test]
    async fn empty_collection_has_zero_likes_and_no_leaders() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::BLOG_STATS).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["total_likes"], 0);
        assert!(res.body["favorite_blog"].is_null());
        assert!(res.body["most_blogs"].is_null());
        assert!(res.body["most_likes"].is_null());
    }

    #[tokio::test]
    async fn aggregates_over_all_blogs() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("darius", "securepass").await;
        app.create_blog(&token, "Alpha", "Darius", 5).await;
        app.create_blog(&token, "Beta", "Ioan", 3).await;
        app.create_blog(&token, "Gamma", "Darius", 1).await;
        app.create_blog(&token, "Delta", "Ioan", 4).await;

        let res = app.get(routes::BLOG_STATS).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["total_likes"], 13);
        assert_eq!(res.body["favorite_blog"]["title"], "Alpha");
        // Both authors have two blogs; Darius appears first.
        assert_eq!(res.body["most_blogs"]["author"], "Darius");
        assert_eq!(res.body["most_blogs"]["blogs"], 2);
        assert_eq!(res.body["most_likes"]["author"], "Ioan");
        assert_eq!(res.body["most_likes"]["likes"], 7);
    }

    #[tokio::test]
    async fn total_likes_beyond_u64_is_reported_exactly() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("darius", "securepass").await;
        for title in ["One", "Two", "Three"] {
            app.create_blog(&token, title, "Darius", i64::MAX).await;
        }

        let res = app.get(routes::BLOG_STATS).await;

        assert_eq!(res.status, 200, "{}", res.text);
        let expected = (3 * i64::MAX as u128).to_string();
        assert!(
            res.text.contains(&format!("\"total_likes\":{expected}")),
            "{}",
            res.text
        );
        assert_eq!(res.body["most_likes"]["author"], "Darius");
    }
}

mod corrupt_rows {
    use super::*;

    #[tokio::test]
    async fn negative_likes_column_is_an_internal_error() {
        let app = TestApp::spawn().await;
        app.insert_raw_blog("Broken", -5).await;

        for path in [routes::BLOGS, routes::BLOG_STATS] {
            let res = app.get(path).await;
            assert_eq!(res.status, 500, "{path}: {}", res.text);
            assert_eq!(res.body["code"], "INTERNAL_ERROR");
        }
    }
}
