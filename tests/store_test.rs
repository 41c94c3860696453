use postkeeper::store::{normalize_channel, ChannelStore, TrackedChannel};

#[test]
fn add_and_list_channels() {
    let store = ChannelStore::open_in_memory().unwrap();

    assert!(store.add_channel(1, "zeta", None).unwrap());
    assert!(store.add_channel(1, "alpha", Some(b"token".as_slice())).unwrap());
    assert!(store.add_channel(2, "alpha", None).unwrap());

    assert_eq!(
        store.channels_for(1).unwrap(),
        vec![
            TrackedChannel {
                user_id: 1,
                channel: "alpha".into(),
                auth: Some(b"token".to_vec()),
            },
            TrackedChannel {
                user_id: 1,
                channel: "zeta".into(),
                auth: None,
            },
        ]
    );
    assert!(store.channels_for(3).unwrap().is_empty());
    assert_eq!(store.all_channels().unwrap(), vec!["alpha", "zeta"]);
}

#[test]
fn duplicate_pair_is_ignored() {
    let store = ChannelStore::open_in_memory().unwrap();

    assert!(store.add_channel(1, "news", Some(b"first".as_slice())).unwrap());
    assert!(!store.add_channel(1, "news", Some(b"second".as_slice())).unwrap());

    // The original row is kept as is.
    assert_eq!(store.auth(1, "news").unwrap(), Some(b"first".to_vec()));
    assert_eq!(store.channels_for(1).unwrap().len(), 1);
}

#[test]
fn auth_blob_round_trips_verbatim() {
    let store = ChannelStore::open_in_memory().unwrap();
    let blob = [0u8, 159, 146, 150, 255, 0];

    store.add_channel(5, "news", Some(blob.as_slice())).unwrap();
    assert_eq!(store.auth(5, "news").unwrap(), Some(blob.to_vec()));

    assert!(store.set_auth(5, "news", None).unwrap());
    assert_eq!(store.auth(5, "news").unwrap(), None);

    assert!(!store.set_auth(5, "other", Some(b"x".as_slice())).unwrap());
    assert_eq!(store.auth(6, "news").unwrap(), None);
}

#[test]
fn remove_channel() {
    let store = ChannelStore::open_in_memory().unwrap();
    store.add_channel(1, "news", None).unwrap();
    store.add_channel(2, "news", None).unwrap();

    assert!(store.remove_channel(1, "news").unwrap());
    assert!(!store.remove_channel(1, "news").unwrap());

    // Still tracked by user 2.
    assert!(store.is_tracked("news").unwrap());
    assert!(store.remove_channel(2, "news").unwrap());
    assert!(!store.is_tracked("news").unwrap());
}

#[test]
fn store_persists_across_opens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("channels.db");

    {
        let store = ChannelStore::open(&path).unwrap();
        store.add_channel(1, "news", Some(b"blob".as_slice())).unwrap();
    }

    let store = ChannelStore::open(&path).unwrap();
    assert!(store.is_tracked("news").unwrap());
    assert_eq!(store.auth(1, "news").unwrap(), Some(b"blob".to_vec()));
}

#[test]
fn normalize_channel_names() {
    assert_eq!(normalize_channel("@BotTesters"), "bottesters");
    assert_eq!(normalize_channel("  botTesters "), "bottesters");
    assert_eq!(normalize_channel("https://t.me/BotTesters/"), "bottesters");
    assert_eq!(normalize_channel("t.me/news_feed"), "news_feed");
    assert_eq!(normalize_channel("@"), "");
}
