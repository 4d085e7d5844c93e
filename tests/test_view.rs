//! Integration tests for the filter/search view (src/inbox/view.rs).

mod common;

use pretty_assertions::assert_eq;

use common::fresh_store;
use hirebox::inbox::{Bucket, FilterCounts, InboxView, MessageFilter};

fn shown(view: &InboxView, store: &hirebox::inbox::MessageStore<hirebox::storage::MemoryStore>) -> Vec<String> {
    view.display(store).iter().map(|m| m.id.clone()).collect()
}

#[test]
fn test_unread_filter_with_empty_query() {
    let store = fresh_store();
    let view = InboxView::new(MessageFilter::Unread, "");
    assert_eq!(shown(&view, &store), vec!["1", "2"]);
}

#[test]
fn test_read_filter() {
    let store = fresh_store();
    let view = InboxView::new(MessageFilter::Read, "");
    assert_eq!(shown(&view, &store), vec!["3", "4", "5", "6"]);
}

#[test]
fn test_query_matches_subject_or_sender_case_insensitive() {
    let store = fresh_store();
    let view = InboxView::new(MessageFilter::All, "OFFER");
    assert_eq!(shown(&view, &store), vec!["5"]);

    let view = InboxView::new(MessageFilter::All, "david");
    assert_eq!(shown(&view, &store), vec!["3"]);
}

#[test]
fn test_query_does_not_search_body() {
    let store = fresh_store();
    // "portfolio" only appears in message bodies
    let view = InboxView::new(MessageFilter::All, "portfolio");
    assert!(shown(&view, &store).is_empty());
}

#[test]
fn test_query_whitespace_is_literal() {
    let store = fresh_store();
    // No subject or sender has a double space
    let view = InboxView::new(MessageFilter::All, "  ");
    assert!(shown(&view, &store).is_empty());

    let view = InboxView::new(MessageFilter::All, "david ");
    assert_eq!(shown(&view, &store), vec!["3"]);
    let view = InboxView::new(MessageFilter::All, " park ");
    assert!(shown(&view, &store).is_empty());
}

#[test]
fn test_query_combines_with_read_state() {
    let store = fresh_store();
    let view = InboxView::new(MessageFilter::Unread, "interview");
    assert_eq!(shown(&view, &store), vec!["2"]);
    let view = InboxView::new(MessageFilter::Read, "interview");
    assert!(shown(&view, &store).is_empty());
}

#[test]
fn test_bucket_views_ignore_query() {
    let mut store = fresh_store();
    store.archive("4");
    store.archive("1");

    let view = InboxView::new(MessageFilter::Archived, "no such text");
    assert_eq!(shown(&view, &store), vec!["1", "4"]);

    store.delete("1", Bucket::Archived);
    let view = InboxView::new(MessageFilter::Deleted, "zzz");
    assert_eq!(shown(&view, &store), vec!["1"]);
}

#[test]
fn test_sent_view() {
    let mut store = fresh_store();
    let a = store.send("a@mail.test", "First", "");
    let b = store.send("b@mail.test", "Second", "");
    let view = InboxView::new(MessageFilter::Sent, "First");
    assert_eq!(shown(&view, &store), vec![b, a]);
}

#[test]
fn test_replies_are_listed_first() {
    let mut store = fresh_store();
    let mut view = InboxView::new(MessageFilter::All, "");
    let new_id = view.reply(&mut store, "5", "Approved").unwrap();
    assert_eq!(shown(&view, &store)[0], new_id);
    assert_eq!(shown(&view, &store).len(), 7);
}

#[test]
fn test_delete_uses_current_view_bucket() {
    let mut store = fresh_store();
    store.archive("3");

    // Viewing the inbox: "3" is not there, nothing happens
    let mut inbox_view = InboxView::new(MessageFilter::Unread, "");
    assert!(!inbox_view.delete(&mut store, "3"));

    let mut archived_view = InboxView::new(MessageFilter::Archived, "");
    archived_view.select(&mut store, "3");
    assert!(archived_view.delete(&mut store, "3"));
    assert_eq!(archived_view.selected_id(), None);
}

#[test]
fn test_counts() {
    let mut store = fresh_store();
    store.archive("6");
    store.delete("5", Bucket::Inbox);
    store.send("x@mail.test", "Hi", "");

    let counts = InboxView::counts(&store);
    assert_eq!(
        counts,
        FilterCounts {
            all: 4,
            unread: 2,
            read: 2,
            sent: 1,
            archived: 1,
            deleted: 1,
        }
    );
    assert_eq!(counts.get(MessageFilter::Unread), 2);
}
