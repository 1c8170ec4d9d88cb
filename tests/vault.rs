//! Vault flows against the file-backed store.

use std::path::Path;
use std::sync::{Arc, Barrier};
use std::thread;

use hexagon::core::domain::RecordKind;
use hexagon::core::share::{Decision, ShareLink};
use hexagon::core::store::{Filesystem, Store};
use hexagon::core::vault::Vault;
use tempfile::TempDir;

const BASE: &str = "https://hexagon-web.xyz/app/share";

fn vault(dir: &TempDir) -> Vault<Filesystem> {
    Vault::new(Filesystem::new(dir.path().join("vault.toml")))
}

#[test]
fn test_state_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let id = {
        let v = vault(&dir);
        let alice = v.register("alice@example.com", "pw").unwrap();
        v.add_record(&alice, RecordKind::Account, "github.com", &["alice", "hunter2"])
            .unwrap()
    };

    let v = vault(&dir);
    let alice = v.login("alice@example.com", "pw").unwrap();
    let record = v.reveal(&alice, &id).unwrap();
    assert_eq!(record.fields[1].1.as_str(), "hunter2");
}

#[test]
fn test_share_single_use_across_reopen() {
    let dir = TempDir::new().unwrap();
    let v = vault(&dir);
    let alice = v.register("alice@example.com", "alice-pw").unwrap();
    let bob = v.register("bob@example.com", "bob-pw").unwrap();
    let id = v
        .add_record(&alice, RecordKind::Seed, "github.com", &["SEED"])
        .unwrap();
    let (share_id, link) = v.create_share(&alice, &id, "bob@example.com", BASE).unwrap();
    let (_, secret) = ShareLink::parse(link.as_str()).unwrap();

    let v = vault(&dir);
    assert_eq!(
        v.finalize_share(&bob, &share_id, &secret, Decision::Accept).unwrap(),
        Some(id.clone())
    );
    let err = v
        .finalize_share(&bob, &share_id, &secret, Decision::Accept)
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(v.reveal(&bob, &id).unwrap().fields[0].1.as_str(), "SEED");
}

#[test]
fn test_password_change_keeps_records() {
    let dir = TempDir::new().unwrap();
    let v = vault(&dir);
    let alice = v.register("alice@example.com", "old").unwrap();
    let id = v
        .add_record(&alice, RecordKind::Note, "diary", &["dear diary"])
        .unwrap();

    v.change_password("alice@example.com", "old", "new").unwrap();

    assert!(v.login("alice@example.com", "old").unwrap_err().is_authentication());
    let again = v.login("alice@example.com", "new").unwrap();
    assert_eq!(again.uid(), alice.uid());
    assert_eq!(v.reveal(&again, &id).unwrap().fields[0].1.as_str(), "dear diary");
}

#[test]
fn test_failed_password_change_commits_nothing() {
    let dir = TempDir::new().unwrap();
    let v = vault(&dir);
    v.register("alice@example.com", "old").unwrap();
    let before = v.store().load().unwrap();

    assert!(v
        .change_password("alice@example.com", "old", "")
        .unwrap_err()
        .is_key_derivation());
    assert!(v
        .change_password("alice@example.com", "wrong", "new")
        .unwrap_err()
        .is_authentication());

    assert_eq!(v.store().load().unwrap(), before);
    assert!(v.login("alice@example.com", "old").is_ok());
}

#[test]
fn test_last_owner_removal_deletes_record() {
    let dir = TempDir::new().unwrap();
    let v = vault(&dir);
    let alice = v.register("alice@example.com", "alice-pw").unwrap();
    let bob = v.register("bob@example.com", "bob-pw").unwrap();
    let id = v
        .add_record(&alice, RecordKind::Note, "plans", &["body"])
        .unwrap();
    let (share_id, link) = v.create_share(&alice, &id, "bob@example.com", BASE).unwrap();
    let (_, secret) = ShareLink::parse(link.as_str()).unwrap();
    v.finalize_share(&bob, &share_id, &secret, Decision::Accept).unwrap();

    assert!(!v.remove_record(&alice, &id).unwrap());
    assert!(v.reveal(&bob, &id).is_ok());
    assert!(v.remove_record(&bob, &id).unwrap());
    assert!(v.store().load().unwrap().records.is_empty());
}

fn vault_at(path: &Path) -> Vault<Filesystem> {
    Vault::new(Filesystem::new(path))
}

#[test]
fn test_concurrent_finalize_consumes_token_once() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("vault.toml");
    let v = vault_at(&path);
    let alice = v.register("alice@example.com", "alice-pw").unwrap();
    v.register("bob@example.com", "bob-pw").unwrap();
    let id = v
        .add_record(&alice, RecordKind::Account, "github.com", &["alice", "hunter2"])
        .unwrap();
    let (share_id, link) = v.create_share(&alice, &id, "bob@example.com", BASE).unwrap();

    let barrier = Arc::new(Barrier::new(2));
    let handles: Vec<_> = (0..2)
        .map(|_| {
            let path = path.clone();
            let share_id = share_id.clone();
            let link = link.as_str().to_string();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let v = vault_at(&path);
                let bob = v.login("bob@example.com", "bob-pw").unwrap();
                let (_, secret) = ShareLink::parse(&link).unwrap();
                barrier.wait();
                v.finalize_share(&bob, &share_id, &secret, Decision::Accept)
            })
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let accepted = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(accepted, 1, "exactly one finalize may succeed");
    let failed = results.iter().find_map(|r| r.as_ref().err()).unwrap();
    assert!(failed.is_not_found());

    let data = v.store().load().unwrap();
    assert!(data.shares.is_empty());
    let owners: Vec<_> = data.records[&id].owners.iter().map(|o| o.username.as_str()).collect();
    assert_eq!(owners, ["alice@example.com", "bob@example.com"]);
}

#[test]
fn test_concurrent_adds_are_all_kept() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("vault.toml");
    vault_at(&path).register("alice@example.com", "pw").unwrap();

    let barrier = Arc::new(Barrier::new(4));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let path = path.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let v = vault_at(&path);
                let alice = v.login("alice@example.com", "pw").unwrap();
                barrier.wait();
                v.add_record(&alice, RecordKind::Note, &format!("note {}", i), &["body"])
                    .unwrap()
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let v = vault_at(&path);
    let alice = v.login("alice@example.com", "pw").unwrap();
    assert_eq!(v.records(&alice).unwrap().len(), 4);
}
