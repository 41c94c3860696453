use postkeeper::{
    api::{Audio, Document, File, Message, PhotoSize, Video, API},
    archive::{self, Attachment, AttachmentKind, Archiver, ArchiveError},
    fake::FakeAPI,
    Client,
};

/// 2023-11-14 22:13:20 UTC
const DATE: i64 = 1_700_000_000;
const FOLDER: &str = "post_2023-11-14_22-13-20";

fn photo(file_id: &str, width: i64, height: i64) -> PhotoSize {
    PhotoSize {
        file_id: file_id.into(),
        file_unique_id: format!("u_{}", file_id),
        width,
        height,
        ..Default::default()
    }
}

fn fake_api() -> (FakeAPI, API) {
    postkeeper::init_logger();
    let fake = FakeAPI::new();
    let api = API::new(Client::new("token").with_post_handler(fake.clone()));
    (fake, api)
}

#[test]
fn folder_name_is_utc_timestamp() {
    assert_eq!(archive::folder_name(DATE).unwrap(), FOLDER);
    assert_eq!(archive::folder_name(0).unwrap(), "post_1970-01-01_00-00-00");
    assert!(matches!(
        archive::folder_name(i64::MAX),
        Err(ArchiveError::InvalidDate(i64::MAX))
    ));
}

#[test]
fn largest_photo_by_area() {
    let sizes = vec![photo("s", 90, 60), photo("l", 1280, 853), photo("m", 320, 213)];
    assert_eq!(archive::largest_photo(&sizes).unwrap().file_id, "l");

    // Ties go to the first size.
    let sizes = vec![photo("a", 10, 40), photo("b", 20, 20), photo("c", 5, 5)];
    assert_eq!(archive::largest_photo(&sizes).unwrap().file_id, "a");

    assert!(archive::largest_photo(&[]).is_none());
}

#[test]
fn attachments_in_order() {
    let message = Message {
        photo: Some(vec![photo("small", 10, 10), photo("big", 100, 100)]),
        video: Some(Video {
            file_id: "vid".into(),
            ..Default::default()
        }),
        document: Some(Document {
            file_id: "doc".into(),
            ..Default::default()
        }),
        audio: Some(Audio {
            file_id: "aud".into(),
            ..Default::default()
        }),
        ..Default::default()
    };

    let found: Vec<(AttachmentKind, String)> = archive::attachments(&message)
        .into_iter()
        .map(|a| (a.kind, a.file_id))
        .collect();

    assert_eq!(
        found,
        vec![
            (AttachmentKind::Photo, "big".to_string()),
            (AttachmentKind::Video, "vid".to_string()),
            (AttachmentKind::Document, "doc".to_string()),
            (AttachmentKind::Audio, "aud".to_string()),
        ]
    );

    assert!(archive::attachments(&Message::default()).is_empty());
    assert!(archive::attachments(&Message {
        photo: Some(vec![]),
        ..Default::default()
    })
    .is_empty());
}

#[test]
fn stored_name_uses_remote_identifier() {
    let attachment = Attachment {
        kind: AttachmentKind::Document,
        file_id: "BQACAgIAAx".into(),
        file_unique_id: "AgADxyz".into(),
    };

    let file = |path: Option<&str>| File {
        file_id: attachment.file_id.clone(),
        file_path: path.map(str::to_string),
        ..Default::default()
    };

    assert_eq!(
        archive::stored_name(&file(Some("documents/file_5.pdf")), &attachment),
        "file_5.pdf"
    );
    assert_eq!(archive::stored_name(&file(Some("file_9")), &attachment), "file_9");
    assert_eq!(archive::stored_name(&file(None), &attachment), "AgADxyz");
    assert_eq!(archive::stored_name(&file(Some("photos/..")), &attachment), "AgADxyz");
    assert_eq!(archive::stored_name(&file(Some("photos/")), &attachment), "AgADxyz");

    let bare = Attachment {
        file_unique_id: String::new(),
        ..attachment.clone()
    };
    assert_eq!(archive::stored_name(&file(None), &bare), "BQACAgIAAx");
}

#[tokio::test]
async fn archive_photo_post_with_caption() {
    let (fake, api) = fake_api();
    fake.add_file("small", "photos/file_1.jpg", "small").await;
    fake.add_file("big", "photos/file_2.jpg", "big photo").await;

    let dir = tempfile::tempdir().unwrap();
    let archiver = Archiver::new(dir.path().join("posts"));
    archiver.ensure_root().await.unwrap();

    let message = Message {
        message_id: 7,
        date: DATE,
        caption: Some("Look at this".into()),
        photo: Some(vec![photo("small", 90, 90), photo("big", 800, 600)]),
        ..Default::default()
    };

    let artifact = archiver.archive(&api, &message).await.unwrap();
    let post_dir = dir.path().join("posts").join(FOLDER);

    assert_eq!(artifact.dir, post_dir);
    assert_eq!(artifact.failed, 0);
    assert_eq!(artifact.text_file, Some(post_dir.join("caption.txt")));
    assert_eq!(artifact.media, vec![post_dir.join("file_2.jpg")]);

    assert_eq!(
        std::fs::read_to_string(post_dir.join("caption.txt")).unwrap(),
        "Look at this"
    );
    assert_eq!(std::fs::read(post_dir.join("file_2.jpg")).unwrap(), b"big photo");
    assert!(!post_dir.join("file_1.jpg").exists());
}

#[tokio::test]
async fn archive_text_post() {
    let (_fake, api) = fake_api();
    let dir = tempfile::tempdir().unwrap();
    let archiver = Archiver::new(dir.path());

    let message = Message {
        date: DATE,
        text: Some("Plain announcement".into()),
        ..Default::default()
    };

    let artifact = archiver.archive(&api, &message).await.unwrap();

    assert_eq!(artifact.text_file, Some(dir.path().join(FOLDER).join("text.txt")));
    assert!(artifact.media.is_empty());
    assert_eq!(
        std::fs::read_to_string(dir.path().join(FOLDER).join("text.txt")).unwrap(),
        "Plain announcement"
    );
    assert!(!dir.path().join(FOLDER).join("caption.txt").exists());
}

#[tokio::test]
async fn archive_video_document_and_audio() {
    let (fake, api) = fake_api();
    fake.add_file("vid", "videos/file_3.mp4", "video").await;
    fake.add_file("doc", "documents/file_4.pdf", "document").await;
    fake.add_file("aud", "music/file_5.mp3", "audio").await;

    let dir = tempfile::tempdir().unwrap();
    let archiver = Archiver::new(dir.path());

    let message = Message {
        date: DATE,
        video: Some(Video {
            file_id: "vid".into(),
            ..Default::default()
        }),
        document: Some(Document {
            file_id: "doc".into(),
            file_name: Some("report.pdf".into()),
            ..Default::default()
        }),
        audio: Some(Audio {
            file_id: "aud".into(),
            ..Default::default()
        }),
        ..Default::default()
    };

    let artifact = archiver.archive(&api, &message).await.unwrap();
    let post_dir = dir.path().join(FOLDER);

    assert_eq!(artifact.text_file, None);
    assert_eq!(
        artifact.media,
        vec![
            post_dir.join("file_3.mp4"),
            post_dir.join("file_4.pdf"),
            post_dir.join("file_5.mp3"),
        ]
    );
    assert_eq!(std::fs::read(post_dir.join("file_4.pdf")).unwrap(), b"document");
}

#[tokio::test]
async fn failed_download_does_not_stop_the_post() {
    let (fake, api) = fake_api();
    fake.add_oversized_file("huge").await;
    fake.add_file("doc", "documents/file_8.zip", "zip").await;

    let dir = tempfile::tempdir().unwrap();
    let archiver = Archiver::new(dir.path());

    let message = Message {
        date: DATE,
        caption: Some("Big release".into()),
        video: Some(Video {
            file_id: "huge".into(),
            ..Default::default()
        }),
        document: Some(Document {
            file_id: "doc".into(),
            ..Default::default()
        }),
        audio: Some(Audio {
            file_id: "unknown".into(),
            ..Default::default()
        }),
        ..Default::default()
    };

    let artifact = archiver.archive(&api, &message).await.unwrap();
    let post_dir = dir.path().join(FOLDER);

    assert_eq!(artifact.failed, 2);
    assert_eq!(artifact.media, vec![post_dir.join("file_8.zip")]);
    assert!(post_dir.join("caption.txt").exists());
}

#[tokio::test]
async fn posts_in_the_same_second_share_a_folder() {
    let (fake, api) = fake_api();
    fake.add_file("p1", "photos/file_1.jpg", "one").await;
    fake.add_file("p2", "photos/file_2.jpg", "two").await;

    let dir = tempfile::tempdir().unwrap();
    let archiver = Archiver::new(dir.path());

    for id in ["p1", "p2"] {
        let message = Message {
            date: DATE,
            media_group_id: Some("album".into()),
            photo: Some(vec![photo(id, 100, 100)]),
            ..Default::default()
        };
        let artifact = archiver.archive(&api, &message).await.unwrap();
        assert_eq!(artifact.album.as_deref(), Some("album"));
    }

    let mut names: Vec<String> = std::fs::read_dir(dir.path().join(FOLDER))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();

    assert_eq!(names, vec!["file_1.jpg", "file_2.jpg"]);
}

#[tokio::test]
async fn unwritable_post_directory_is_an_error() {
    let (_fake, api) = fake_api();
    let dir = tempfile::tempdir().unwrap();

    // The archive root is a regular file, so no post directory can be made.
    let root = dir.path().join("posts");
    std::fs::write(&root, "not a directory").unwrap();
    let archiver = Archiver::new(&root);

    let message = Message {
        date: DATE,
        text: Some("hello".into()),
        ..Default::default()
    };
    assert!(archiver.archive(&api, &message).await.is_err());
}

#[tokio::test]
async fn failed_text_write_still_saves_media() {
    let (fake, api) = fake_api();
    fake.add_file("big", "photos/file_7.jpg", "big photo").await;

    let dir = tempfile::tempdir().unwrap();
    let archiver = Archiver::new(dir.path());

    // A directory where the caption file should go makes the write fail.
    let post_dir = dir.path().join(FOLDER);
    std::fs::create_dir_all(post_dir.join("caption.txt")).unwrap();

    let message = Message {
        date: DATE,
        caption: Some("Sunset".into()),
        photo: Some(vec![photo("big", 1280, 960)]),
        ..Default::default()
    };
    let artifact = archiver.archive(&api, &message).await.unwrap();

    assert_eq!(artifact.failed, 1);
    assert!(artifact.text_file.is_none());
    assert_eq!(artifact.media, vec![post_dir.join("file_7.jpg")]);
    assert_eq!(
        std::fs::read(post_dir.join("file_7.jpg")).unwrap(),
        b"big photo"
    );
}
