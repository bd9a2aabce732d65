use proptest::prelude::*;

use super::*;

const P1: &str = "0f8fad5b-d9cb-469f-a165-70867728950e";
const P2: &str = "7c9e6679-7425-40de-944b-e07fc1f90ae7";

fn player(s: &str) -> PlayerId {
	s.parse().expect("test uuid")
}

#[test]
fn load_reads_entries_in_order() {
	let store = IdentityStore::load([format!("{P1}:1111"), format!("{P2}:2222")]).expect("valid entries");
	assert_eq!(store.len(), 2);
	assert_eq!(store.lookup(player(P1)), Some(ExternalAccountId(1111)));
	assert_eq!(store.serialize(), vec![format!("{P1}:1111"), format!("{P2}:2222")]);
}

#[test]
fn load_is_fail_fast() {
	for (entry, reason) in [
		(format!("{P1}1111"), "missing ':' separator"),
		("P1:1111".to_string(), "player id is not a UUID"),
		(format!("{P1}:abc"), "account id is not an unsigned 64-bit integer"),
		(format!("{P1}:-3"), "account id is not an unsigned 64-bit integer"),
	] {
		let err = IdentityStore::load([format!("{P2}:2222"), entry.clone()]).unwrap_err();
		assert_eq!(err, StoreError::MalformedEntry { entry, reason });
	}
}

#[test]
fn load_rejects_duplicates() {
	let err = IdentityStore::load([format!("{P1}:1"), format!("{P1}:2")]).unwrap_err();
	assert!(matches!(err, StoreError::MalformedEntry { reason: "duplicate player id", .. }));

	let err = IdentityStore::load([format!("{P1}:1"), format!("{P2}:1")]).unwrap_err();
	assert!(matches!(err, StoreError::MalformedEntry { reason: "duplicate account id", .. }));
}

#[test]
fn link_never_overwrites() {
	let mut store = IdentityStore::new();
	store.link(player(P1), ExternalAccountId(1)).expect("first link");
	assert_eq!(store.link(player(P1), ExternalAccountId(2)), Err(StoreError::AlreadyLinked(player(P1))));
	assert_eq!(store.lookup(player(P1)), Some(ExternalAccountId(1)));
}

#[test]
fn account_cannot_be_shared() {
	let mut store = IdentityStore::new();
	store.link(player(P1), ExternalAccountId(1)).expect("first link");
	assert_eq!(
		store.link(player(P2), ExternalAccountId(1)),
		Err(StoreError::AccountLinkedElsewhere {
			account: ExternalAccountId(1),
			player: player(P1),
		})
	);
}

#[test]
fn unlink_requires_existing_link() {
	let mut store = IdentityStore::new();
	assert_eq!(store.unlink(player(P1)), Err(StoreError::NotLinked(player(P1))));

	store.link(player(P1), ExternalAccountId(7)).expect("link");
	assert_eq!(store.unlink(player(P1)), Ok(ExternalAccountId(7)));
	assert!(store.is_empty());
}

#[test]
fn reverse_lookup_finds_owner() {
	let store = IdentityStore::load([format!("{P1}:1"), format!("{P2}:2")]).expect("valid entries");
	assert_eq!(store.find_player(ExternalAccountId(2)), Some(player(P2)));
	assert_eq!(store.find_player(ExternalAccountId(3)), None);
}

proptest! {
	#[test]
	fn serialize_then_load_is_lossless(links in prop::collection::hash_map(any::<u128>(), any::<u64>(), 0..24)) {
		let mut store = IdentityStore::new();
		for (player, account) in links {
			// Accounts must be unique; skip collisions.
			let _ = store.link(PlayerId(uuid::Uuid::from_u128(player)), ExternalAccountId(account));
		}
		let reloaded = IdentityStore::load(store.serialize()).expect("serialized form reloads");
		prop_assert_eq!(&reloaded, &store);
		prop_assert_eq!(reloaded.serialize(), store.serialize());
	}
}
