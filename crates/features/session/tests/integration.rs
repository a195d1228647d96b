use parking_lot::Mutex;
use siteline_session::*;
use siteline_storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

fn seeded_store(token: &str) -> Arc<MemoryStore> {
    let store = MemoryStore::new();
    store.set(AUTH_TOKEN_KEY, token).unwrap();
    Arc::new(store)
}

#[test]
fn test_init_reads_persisted_token_without_notification() {
    let storage = seeded_store("tok_persisted");
    let session = SessionStore::init(storage).unwrap();

    assert_eq!(session.auth_token().as_deref(), Some("tok_persisted"));
    assert_eq!(session.state(), SessionState::Authenticated);
}

#[test]
fn test_init_with_empty_storage_is_anonymous() {
    let session = SessionStore::init(Arc::new(MemoryStore::new())).unwrap();

    assert_eq!(session.auth_token(), None);
    assert_eq!(session.state(), SessionState::Anonymous);
}

#[test]
fn test_update_notifies_once_and_persists() {
    let storage = seeded_store("tok1");
    let session = SessionStore::init(storage.clone()).unwrap();

    let seen = Arc::new(Mutex::new(Vec::<Option<String>>::new()));
    let sink = seen.clone();
    session.subscribe(move |token| sink.lock().push(token.map(str::to_owned)));

    session.update_auth_token("tok2").unwrap();

    assert_eq!(*seen.lock(), vec![Some("tok2".to_owned())]);
    assert_eq!(session.auth_token().as_deref(), Some("tok2"));
    assert_eq!(storage.get(AUTH_TOKEN_KEY).unwrap().as_deref(), Some("tok2"));
}

#[test]
fn test_revoke_clears_memory_and_storage() {
    let storage = seeded_store("tok1");
    let session = SessionStore::init(storage.clone()).unwrap();

    let calls = Arc::new(Mutex::new(Vec::<Option<String>>::new()));
    let sink = calls.clone();
    session.subscribe(move |token| sink.lock().push(token.map(str::to_owned)));

    session.revoke_auth_token().unwrap();

    assert_eq!(*calls.lock(), vec![None]);
    assert_eq!(session.auth_token(), None);
    assert_eq!(session.state(), SessionState::Anonymous);
    assert_eq!(storage.get(AUTH_TOKEN_KEY).unwrap(), None);
}

#[test]
fn test_listeners_fire_in_subscription_order() {
    let session = SessionStore::init(Arc::new(MemoryStore::new())).unwrap();

    let order = Arc::new(Mutex::new(Vec::<&'static str>::new()));
    for name in ["first", "second", "third"] {
        let sink = order.clone();
        session.subscribe(move |_| sink.lock().push(name));
    }

    session.update_auth_token("tok").unwrap();

    assert_eq!(*order.lock(), vec!["first", "second", "third"]);
}

#[test]
fn test_each_registration_fires_independently() {
    // Token-based registration: subscribing twice means two invocations,
    // each removable through its own token.
    let session = SessionStore::init(Arc::new(MemoryStore::new())).unwrap();

    let count = Arc::new(AtomicUsize::new(0));
    let listener = {
        let count = count.clone();
        move |_: Option<&str>| {
            count.fetch_add(1, Ordering::SeqCst);
        }
    };

    let first = session.subscribe(listener.clone());
    let _second = session.subscribe(listener);

    session.update_auth_token("a").unwrap();
    assert_eq!(count.load(Ordering::SeqCst), 2);

    assert!(session.unsubscribe(&first));
    session.update_auth_token("b").unwrap();
    assert_eq!(count.load(Ordering::SeqCst), 3);
}

#[test]
fn test_unsubscribe_unknown_token_is_noop() {
    let session = SessionStore::init(Arc::new(MemoryStore::new())).unwrap();

    let sub = session.subscribe(|_| {});
    assert!(session.unsubscribe(&sub));
    assert!(!session.unsubscribe(&sub), "second removal should be a no-op");

    session.update_auth_token("tok").unwrap();
}

#[test]
fn test_listener_panic_aborts_remaining_notifications() {
    let session = SessionStore::init(Arc::new(MemoryStore::new())).unwrap();

    let reached = Arc::new(AtomicUsize::new(0));
    session.subscribe(|_| panic!("listener failure"));
    let sink = reached.clone();
    session.subscribe(move |_| {
        sink.fetch_add(1, Ordering::SeqCst);
    });

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        session.update_auth_token("tok").unwrap();
    }));

    assert!(result.is_err(), "listener panic should propagate to the caller");
    assert_eq!(reached.load(Ordering::SeqCst), 0, "later listeners must not run");

    // The store itself stays consistent and usable after the panic.
    assert_eq!(session.auth_token().as_deref(), Some("tok"));
}

#[test]
fn test_reentrant_unsubscribe_takes_effect_next_notification() {
    let session = SessionStore::init(Arc::new(MemoryStore::new())).unwrap();

    let count = Arc::new(AtomicUsize::new(0));
    let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

    let sub = {
        let session = session.clone();
        let slot = slot.clone();
        let count = count.clone();
        session.clone().subscribe(move |_| {
            count.fetch_add(1, Ordering::SeqCst);
            if let Some(own) = slot.lock().take() {
                session.unsubscribe(&own);
            }
        })
    };
    *slot.lock() = Some(sub);

    session.update_auth_token("a").unwrap();
    session.update_auth_token("b").unwrap();

    assert_eq!(count.load(Ordering::SeqCst), 1, "self-removed listener fires exactly once");
}

#[derive(Debug)]
struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Io {
            source: std::io::Error::other("disk on fire"),
            context: None,
        })
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Io {
            source: std::io::Error::other("disk on fire"),
            context: None,
        })
    }
}

#[test]
fn test_storage_failure_rolls_back_and_skips_listeners() {
    let session = SessionStore::init(Arc::new(FailingStore)).unwrap();

    let fired = Arc::new(AtomicUsize::new(0));
    let sink = fired.clone();
    session.subscribe(move |_| {
        sink.fetch_add(1, Ordering::SeqCst);
    });

    let err = session.update_auth_token("tok").expect_err("expected storage failure");
    match err {
        SessionError::Storage { .. } => {},
    }

    assert_eq!(session.auth_token(), None, "in-memory value must roll back");
    assert_eq!(fired.load(Ordering::SeqCst), 0, "no listener runs on the error path");
}

#[test]
fn test_token_survives_process_restart_via_file_store() {
    let temp = TempDir::new().unwrap();

    {
        let storage = FileStore::builder().root(temp.path()).open().unwrap();
        let session = SessionStore::init(Arc::new(storage)).unwrap();
        session.update_auth_token("tok_durable").unwrap();
    }

    let storage = FileStore::builder().root(temp.path()).create(false).open().unwrap();
    let session = SessionStore::init(Arc::new(storage)).unwrap();
    assert_eq!(session.auth_token().as_deref(), Some("tok_durable"));
    assert_eq!(session.state(), SessionState::Authenticated);
}
