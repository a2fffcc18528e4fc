use serde_json::json;

use crate::common::{TestApp, routes};

mod registration {
    use super::*;

    #[tokio::test]
    async fn new_user_can_register() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::USERS,
                &json!({"username": "alice", "name": "Alice", "password": "securepass"}),
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert!(res.body["id"].is_string());
        assert_eq!(res.body["username"], "alice");
        assert_eq!(res.body["name"], "Alice");
        assert!(res.body.get("password").is_none());
    }

    #[tokio::test]
    async fn duplicate_username_conflicts() {
        let app = TestApp::spawn().await;
        let body = json!({"username": "alice", "password": "securepass"});

        let first = app.post_without_token(routes::USERS, &body).await;
        assert_eq!(first.status, 201, "{}", first.text);

        let res = app.post_without_token(routes::USERS, &body).await;

        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "USERNAME_TAKEN");
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::USERS,
                &json!({"username": "alice", "password": "short"}),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn username_with_symbols_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::USERS,
                &json!({"username": "al ice!", "password": "securepass"}),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod listing {
    use super::*;

    #[tokio::test]
    async fn users_carry_the_blogs_they_own() {
        let app = TestApp::spawn().await;
        let alice = app.create_authenticated_user("alice", "securepass").await;
        app.create_authenticated_user("bob", "securepass").await;
        let blog_id = app.create_blog(&alice, "First post", "Alice", 2).await;

        let res = app.get(routes::USERS).await;

        assert_eq!(res.status, 200, "{}", res.text);
        let users = res.body.as_array().unwrap();
        assert_eq!(users.len(), 2);

        let alice = users.iter().find(|u| u["username"] == "alice").unwrap();
        let blogs = alice["blogs"].as_array().unwrap();
        assert_eq!(blogs.len(), 1);
        assert_eq!(blogs[0]["id"], blog_id);
        assert_eq!(blogs[0]["title"], "First post");

        let bob = users.iter().find(|u| u["username"] == "bob").unwrap();
        assert!(bob["blogs"].as_array().unwrap().is_empty());
        assert!(bob.get("password").is_none());
    }
}
