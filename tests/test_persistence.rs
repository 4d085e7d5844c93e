//! Integration tests for the persisted mirror: reload, schema handling,
//! composed messages and the sent-folder change signal.

mod common;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use common::{assert_one_bucket_invariant, fresh_store, ids, locations, persisted_ids, reload};
use hirebox::inbox::seed::seed_messages;
use hirebox::inbox::{Bucket, InboxView, Message, MessageFilter, MessageStore, StoreOptions};
use hirebox::storage::{FileStore, KvStore, MemoryStore, keys, schema};
use hirebox::watch;

const QUIRK: StoreOptions = StoreOptions {
    persist_composed: false,
};

#[test]
fn test_reload_applies_read_and_deleted_ids() {
    let mut store = fresh_store();
    store.mark_read("1");
    store.mark_unread("3");
    store.delete("6", Bucket::Inbox);

    let store = reload(store, StoreOptions::default());
    assert_eq!(ids(&store, Bucket::Inbox), vec!["1", "2", "3", "4", "5"]);
    assert!(store.find("1").unwrap().1.read);
    assert!(!store.find("3").unwrap().1.read);
    assert_eq!(locations(&store, "6"), vec![Bucket::Deleted]);
}

#[test]
fn test_reload_restores_archived_with_timestamps() {
    let mut store = fresh_store();
    let before = store.find("5").unwrap().1.clone();
    store.archive("5");

    let store = reload(store, StoreOptions::default());
    let (bucket, after) = store.find("5").unwrap();
    assert_eq!(bucket, Bucket::Archived);
    assert_eq!(after.timestamp, before.timestamp);
    assert_eq!(after.subject, before.subject);
    // Archived seed message does not also reappear in the inbox
    assert_eq!(locations(&store, "5"), vec![Bucket::Archived]);
}

#[test]
fn test_permanently_deleted_seed_never_returns() {
    let mut store = fresh_store();
    store.delete("2", Bucket::Inbox);
    store.permanent_delete("2");

    let store = reload(store, StoreOptions::default());
    assert!(locations(&store, "2").is_empty());
    let mut view = InboxView::new(MessageFilter::All, "");
    let mut store = store;
    assert!(!view.select(&mut store, "2"));
}

#[test]
fn test_restored_seed_message_returns_after_reload() {
    let mut store = fresh_store();
    store.delete("4", Bucket::Inbox);
    store.restore("4");
    let store = reload(store, StoreOptions::default());
    assert_eq!(locations(&store, "4"), vec![Bucket::Inbox]);
}

#[test]
fn test_archive_unarchive_across_reopen_keeps_read() {
    let mut store = fresh_store();
    assert!(!store.find("1").unwrap().1.read);
    store.archive("1");

    let mut store = reload(store, StoreOptions::default());
    assert!(store.unarchive("1"));

    let store = reload(store, StoreOptions::default());
    let (bucket, msg) = store.find("1").unwrap();
    assert_eq!(bucket, Bucket::Inbox);
    assert!(msg.read);
    assert_eq!(locations(&store, "1"), vec![Bucket::Inbox]);
}

#[test]
fn test_restore_to_inbox_across_reopen_is_unread() {
    let mut store = fresh_store();
    assert!(store.find("3").unwrap().1.read);
    store.delete("3", Bucket::Inbox);

    let mut store = reload(store, StoreOptions::default());
    assert!(store.restore("3"));

    let store = reload(store, StoreOptions::default());
    let (bucket, msg) = store.find("3").unwrap();
    assert_eq!(bucket, Bucket::Inbox);
    assert!(!msg.read);
}

#[test]
fn test_restore_to_archived_across_reopen_is_read() {
    let mut store = fresh_store();
    store.archive("2");
    store.delete("2", Bucket::Archived);

    let mut store = reload(store, StoreOptions::default());
    assert!(store.restore("2"));
    assert!(store.unarchive("2"));

    let store = reload(store, StoreOptions::default());
    let (bucket, msg) = store.find("2").unwrap();
    assert_eq!(bucket, Bucket::Inbox);
    assert!(msg.read);
}

#[test]
fn test_half_written_delete_converges_on_reopen() {
    let mut store = fresh_store();
    store.archive("3");
    let archived_before = store.port().get(keys::ARCHIVED).unwrap().unwrap();
    store.delete("3", Bucket::Archived);

    // The source snapshot never got its final write
    store.port_mut().set(keys::ARCHIVED, &archived_before).unwrap();

    let store = reload(store, StoreOptions::default());
    assert_eq!(locations(&store, "3"), vec![Bucket::Deleted]);
    assert_one_bucket_invariant(&store);
    let archived: Vec<Message> = schema::load(store.port(), keys::ARCHIVED);
    assert!(archived.is_empty());
}

#[test]
fn test_duplicate_across_sent_and_archived_keeps_archived() {
    let mut store = fresh_store();
    let id = store.send("candidate@mail.test", "Welcome", "");
    let sent_raw = store.port().get(keys::SENT).unwrap().unwrap();
    store.port_mut().set(keys::ARCHIVED, &sent_raw).unwrap();

    let store = reload(store, StoreOptions::default());
    assert_eq!(locations(&store, &id), vec![Bucket::Archived]);
    assert!(store.bucket(Bucket::Sent).is_empty());
    let sent: Vec<Message> = schema::load(store.port(), keys::SENT);
    assert!(sent.is_empty());
}

#[test]
fn test_reply_vanishes_on_reload_without_composed_persistence() {
    let mut store = MessageStore::open(MemoryStore::new(), seed_messages(), QUIRK);
    let id = store.reply("1", "Thanks").unwrap();
    assert!(store.port().get(keys::COMPOSED).unwrap().is_none());

    let store = reload(store, QUIRK);
    assert!(store.find(&id).is_none());
    assert_eq!(store.bucket(Bucket::Inbox).len(), 6);
}

#[test]
fn test_reply_survives_reload_with_composed_persistence() {
    let mut store = fresh_store();
    let reply = store.reply("1", "Thanks").unwrap();
    let fwd = store.forward("2", Some("panel@acme.test")).unwrap();

    let store = reload(store, StoreOptions::default());
    assert_eq!(ids(&store, Bucket::Inbox)[..2].to_vec(), vec![fwd, reply.clone()]);
    assert!(store.find(&reply).unwrap().1.read);
    assert_one_bucket_invariant(&store);
}

#[test]
fn test_archived_reply_leaves_composed_snapshot() {
    let mut store = fresh_store();
    let reply = store.reply("1", "Thanks").unwrap();
    store.archive(&reply);

    let composed: Vec<Message> = schema::load(store.port(), keys::COMPOSED);
    assert!(composed.is_empty());

    let store = reload(store, StoreOptions::default());
    assert_eq!(locations(&store, &reply), vec![Bucket::Archived]);
}

#[test]
fn test_unparsable_snapshots_read_as_empty() {
    let port = MemoryStore::new()
        .with_entry(keys::ARCHIVED, "{definitely not json")
        .with_entry(keys::DELETED_IDS, "42")
        .with_entry(keys::READ_IDS, r#"{"version":7,"items":["1"]}"#);
    let store = MessageStore::open(port, seed_messages(), StoreOptions::default());

    assert!(store.bucket(Bucket::Archived).is_empty());
    assert_eq!(store.bucket(Bucket::Inbox).len(), 6);
    // Read list present but unreadable: nothing counts as read
    assert!(store.bucket(Bucket::Inbox).iter().all(|m| !m.read));
}

#[test]
fn test_invalid_records_are_dropped() {
    let raw = r#"[
        {"id":"s1","sender":"You","subject":"Offer","category":"task","priority":"high",
         "read":true,"timestamp":"2024-03-19T10:00:00Z","recipient":"emma@mail.test"},
        {"id":"s2","sender":"You","subject":"Broken","category":"gossip","priority":"high",
         "timestamp":"2024-03-19T10:00:00Z"},
        {"id":"","sender":"You","subject":"No id","category":"task","priority":"low",
         "timestamp":"2024-03-19T10:00:00Z"}
    ]"#;
    let port = MemoryStore::new().with_entry(keys::SENT, raw);
    let store = MessageStore::open(port, seed_messages(), StoreOptions::default());
    assert_eq!(ids(&store, Bucket::Sent), vec!["s1"]);
    assert_eq!(
        store.find("s1").unwrap().1.recipient.as_deref(),
        Some("emma@mail.test")
    );
}

#[test]
fn test_writes_use_versioned_envelope() {
    let mut store = fresh_store();
    store.mark_read("1");
    let raw = store.port().get(keys::READ_IDS).unwrap().unwrap();
    assert!(raw.starts_with(r#"{"version":1,"items":["#));
}

#[test]
fn test_storage_event_refreshes_sent() {
    let mut store = fresh_store();

    // Another writer replaces the sent snapshot behind the store's back
    let mut other = fresh_store();
    let id = other.send("ops@acme.test", "Schedule", "See attached");
    let raw = other.port().get(keys::SENT).unwrap().unwrap();
    store.port_mut().set(keys::SENT, &raw).unwrap();
    assert!(store.bucket(Bucket::Sent).is_empty());

    assert!(!store.on_storage_event(keys::ARCHIVED));
    assert!(store.bucket(Bucket::Sent).is_empty());

    assert!(store.on_storage_event(keys::SENT));
    assert_eq!(ids(&store, Bucket::Sent), vec![id]);
}

#[test]
fn test_file_store_sees_foreign_sent_writes() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("storage");

    let mut reader = MessageStore::open(
        FileStore::open(&dir).unwrap(),
        seed_messages(),
        StoreOptions::default(),
    );
    let mut writer = MessageStore::open(
        FileStore::open(&dir).unwrap(),
        seed_messages(),
        StoreOptions::default(),
    );

    let id = writer.send("candidate@mail.test", "Welcome", "Glad to have you");
    assert!(reader.bucket(Bucket::Sent).is_empty());

    assert!(reader.on_storage_event(keys::SENT));
    assert_eq!(ids(&reader, Bucket::Sent), vec![id]);
}

#[test]
fn test_watch_poll_picks_up_foreign_send() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("storage");

    let mut reader = MessageStore::open(
        FileStore::open(&dir).unwrap(),
        seed_messages(),
        StoreOptions::default(),
    );
    let mut last_seen = reader.port().modified(keys::SENT);
    assert!(!watch::poll_once(&mut reader, &mut last_seen));

    let mut writer = MessageStore::open(
        FileStore::open(&dir).unwrap(),
        seed_messages(),
        StoreOptions::default(),
    );
    let id = writer.send("candidate@mail.test", "Welcome", "");

    assert!(watch::poll_once(&mut reader, &mut last_seen));
    assert_eq!(ids(&reader, Bucket::Sent), vec![id]);
    assert!(!watch::poll_once(&mut reader, &mut last_seen));
}

#[test]
fn test_last_writer_wins_on_sent() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("storage");
    let open = || {
        MessageStore::open(
            FileStore::open(&dir).unwrap(),
            seed_messages(),
            StoreOptions::default(),
        )
    };
    let mut a = open();
    let mut b = open();
    a.send("x@mail.test", "From A", "");
    let b_id = b.send("y@mail.test", "From B", "");

    let c = open();
    assert_eq!(ids(&c, Bucket::Sent), vec![b_id]);
}

#[test]
fn test_deleted_ids_survive_reload() {
    let mut store = fresh_store();
    store.delete("1", Bucket::Inbox);
    store.delete("3", Bucket::Inbox);
    store.restore("1");
    let store = reload(store, StoreOptions::default());
    assert_eq!(store.deleted_ids().to_vec(), vec!["3"]);
    assert_eq!(persisted_ids(store.port(), keys::DELETED_IDS), vec!["3"]);
}
