use uuid::Uuid;
use warren_client::{
    api::{Error, NewComment, Store, User, UserId},
    PostThread,
};
use warren_mock_server::MockServer;

fn user(name: &str) -> User {
    User {
        id: UserId(Uuid::new_v4()),
        name: name.to_string(),
    }
}

#[tokio::test]
async fn replies_nest_and_bump_the_comment_count() -> anyhow::Result<()> {
    let alice = user("alice");
    let mut server = MockServer::new(alice.clone());
    let post = server.add_post(alice.id, "discussion", "");

    let mut thread = PostThread::fetch(&mut server, post).await?;
    let root = thread
        .submit_reply(&mut server, None, String::from("top-level"))
        .await?;
    thread.set_comments(server.post_comments(post).await?);
    let reply = thread
        .submit_reply(&mut server, Some(root), String::from("a reply"))
        .await?;
    thread.set_comments(server.post_comments(post).await?);

    assert_eq!(server.post(post).await?.comment_count, 2);
    let tree = thread.tree();
    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].comment.id, root);
    assert_eq!(tree[0].comment.depth, 0);
    assert_eq!(tree[0].replies[0].comment.id, reply);
    assert_eq!(tree[0].replies[0].comment.depth, 1);
    assert_eq!(thread.author_name(&alice.id), Some("alice"));
    Ok(())
}

#[tokio::test]
async fn replies_past_the_depth_limit_never_reach_the_store() -> anyhow::Result<()> {
    let alice = user("alice");
    let mut server = MockServer::new(alice.clone());
    let post = server.add_post(alice.id, "deep thread", "");

    let mut thread = PostThread::fetch(&mut server, post).await?;
    let mut parent = None;
    for depth in 0..4 {
        let id = thread
            .submit_reply(&mut server, parent, format!("depth {depth}"))
            .await?;
        thread.set_comments(server.post_comments(post).await?);
        parent = Some(id);
    }

    // parent is now at depth 3; one more level is refused before any write
    let err = thread
        .submit_reply(&mut server, parent, String::from("too deep"))
        .await
        .unwrap_err();
    assert_eq!(err, Error::DepthLimitExceeded { depth: 4 });
    assert_eq!(server.post(post).await?.comment_count, 4);
    Ok(())
}

#[tokio::test]
async fn replying_to_an_unknown_parent_is_refused() -> anyhow::Result<()> {
    let alice = user("alice");
    let mut server = MockServer::new(alice.clone());
    let post = server.add_post(alice.id, "lonely", "");

    let thread = PostThread::fetch(&mut server, post).await?;
    let missing = warren_client::api::CommentId(Uuid::new_v4());
    let err = thread
        .submit_reply(&mut server, Some(missing), String::from("hello?"))
        .await
        .unwrap_err();
    assert_eq!(err, Error::UnknownParent(missing));
    assert_eq!(server.post(post).await?.comment_count, 0);
    Ok(())
}

#[tokio::test]
async fn feed_delivers_full_snapshots_on_every_change() -> anyhow::Result<()> {
    let alice = user("alice");
    let mut server = MockServer::new(alice.clone());
    let post = server.add_post(alice.id, "live", "");

    let mut feed = server.comment_feed(post).await?;
    assert_eq!(feed.recv().await.unwrap(), Vec::new());

    let thread = PostThread::fetch(&mut server, post).await?;
    let first = thread
        .submit_reply(&mut server, None, String::from("one"))
        .await?;
    let snapshot = feed.recv().await.unwrap();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].id, first);

    thread
        .submit_reply(&mut server, None, String::from("two"))
        .await?;
    let snapshot = feed.recv().await.unwrap();
    assert_eq!(snapshot.len(), 2);
    Ok(())
}

#[tokio::test]
async fn editing_is_author_only_and_flags_the_comment() -> anyhow::Result<()> {
    let alice = user("alice");
    let bob = user("bob");
    let mut server = MockServer::new(alice.clone());
    server.add_user(bob.clone());
    let post = server.add_post(alice.id, "edits", "");

    let mine = server
        .create_comment(NewComment {
            post_id: post,
            parent_id: None,
            author_id: alice.id,
            text: String::from("draft"),
            depth: 0,
        })
        .await?;
    let theirs = server
        .create_comment(NewComment {
            post_id: post,
            parent_id: None,
            author_id: bob.id,
            text: String::from("bob's words"),
            depth: 0,
        })
        .await?;

    server.edit_comment(mine, String::from("final")).await?;
    let err = server
        .edit_comment(theirs, String::from("vandalism"))
        .await
        .unwrap_err();
    assert_eq!(err, Error::PermissionDenied);

    let comments = server.post_comments(post).await?;
    let edited = comments.iter().find(|c| c.id == mine).unwrap();
    assert_eq!(edited.text, "final");
    assert!(edited.is_edited);
    let untouched = comments.iter().find(|c| c.id == theirs).unwrap();
    assert_eq!(untouched.text, "bob's words");
    assert!(!untouched.is_edited);
    Ok(())
}
