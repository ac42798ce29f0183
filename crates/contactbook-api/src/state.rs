use std::sync::{Arc, Mutex, MutexGuard};

use async_broadcast::{InactiveReceiver, Receiver, Sender};
use contactbook_core::{Contact, ContactId, Group, filter::filter_contacts};
use log::trace;

use crate::constants::STATE_EVENT_CHANNEL_CAPACITY;

/// Emitted after a part of the state was replaced, so views know what to re-render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateEvent {
    Loading(bool),
    ContactsChanged,
    FilteredChanged,
    GroupsChanged,
}

#[derive(Debug, Default)]
struct Inner {
    contacts: Vec<Contact>,
    filtered_contacts: Vec<Contact>,
    groups: Vec<Group>,
    /// Number of store operations currently in flight
    pending: usize,
}

/// Copy of both contact collections, taken before an optimistic change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    contacts: Vec<Contact>,
    filtered_contacts: Vec<Contact>,
}

/// The local source of truth for contacts, the filtered view, groups and the loading flag.
///
/// Cloning yields another handle to the same state. Every update replaces whole collections
/// under the lock and publishes the matching [StateEvent]s after releasing it.
#[derive(Clone)]
pub struct ContactState {
    inner: Arc<Mutex<Inner>>,
    sender: Arc<Sender<StateEvent>>,
    _receiver: Arc<InactiveReceiver<StateEvent>>, // keep receiver around, so channel doesn't get closed
}

impl ContactState {
    pub fn new() -> Self {
        let (mut tx, rx) = async_broadcast::broadcast::<StateEvent>(STATE_EVENT_CHANNEL_CAPACITY);
        tx.set_overflow(true);
        tx.set_await_active(false);
        let inactive = rx.deactivate();
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
            sender: Arc::new(tx),
            _receiver: Arc::new(inactive),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn publish(&self, events: &[StateEvent]) {
        for event in events {
            if let Err(err) = self.sender.try_broadcast(*event) {
                trace!("Error publishing state event: {err}");
            }
        }
    }

    /// Subscribe to state changes. Slow subscribers lose the oldest events.
    pub fn subscribe(&self) -> Receiver<StateEvent> {
        self.sender.new_receiver()
    }

    pub fn contacts(&self) -> Vec<Contact> {
        self.lock().contacts.clone()
    }

    pub fn filtered_contacts(&self) -> Vec<Contact> {
        self.lock().filtered_contacts.clone()
    }

    pub fn groups(&self) -> Vec<Group> {
        self.lock().groups.clone()
    }

    /// True while at least one store operation is in flight
    pub fn loading(&self) -> bool {
        self.lock().pending > 0
    }

    /// Returns the contact with the given id from the full collection
    pub fn find(&self, id: &ContactId) -> Option<Contact> {
        Contact::find(&self.lock().contacts, id).cloned()
    }

    pub fn set_contacts(&self, contacts: Vec<Contact>) {
        self.lock().contacts = contacts;
        self.publish(&[StateEvent::ContactsChanged]);
    }

    pub fn set_filtered_contacts(&self, filtered_contacts: Vec<Contact>) {
        self.lock().filtered_contacts = filtered_contacts;
        self.publish(&[StateEvent::FilteredChanged]);
    }

    pub fn set_groups(&self, groups: Vec<Group>) {
        self.lock().groups = groups;
        self.publish(&[StateEvent::GroupsChanged]);
    }

    /// Overrides the number of outstanding operations with zero or one
    pub fn set_loading(&self, loading: bool) {
        self.lock().pending = usize::from(loading);
        self.publish(&[StateEvent::Loading(loading)]);
    }

    /// Marks the start of a store operation. Publishes `Loading(true)` only for the first one.
    pub fn begin_loading(&self) {
        let started = {
            let mut inner = self.lock();
            inner.pending += 1;
            inner.pending == 1
        };
        if started {
            self.publish(&[StateEvent::Loading(true)]);
        }
    }

    /// Marks the end of a store operation. Publishes `Loading(false)` once none are left.
    pub fn end_loading(&self) {
        let finished = {
            let mut inner = self.lock();
            if inner.pending == 0 {
                return;
            }
            inner.pending -= 1;
            inner.pending == 0
        };
        if finished {
            self.publish(&[StateEvent::Loading(false)]);
        }
    }

    /// Replaces contacts, filtered view and groups with freshly loaded data
    pub fn replace_all(&self, contacts: Vec<Contact>, groups: Vec<Group>) {
        {
            let mut inner = self.lock();
            inner.filtered_contacts = contacts.clone();
            inner.contacts = contacts;
            inner.groups = groups;
        }
        self.publish(&[
            StateEvent::ContactsChanged,
            StateEvent::FilteredChanged,
            StateEvent::GroupsChanged,
        ]);
    }

    /// Appends the contact to the end of both collections
    pub fn append(&self, contact: Contact) {
        {
            let mut inner = self.lock();
            inner.contacts.push(contact.clone());
            inner.filtered_contacts.push(contact);
        }
        self.publish(&[StateEvent::ContactsChanged, StateEvent::FilteredChanged]);
    }

    /// Removes the contact from both collections, returning it if it was in the full collection
    pub fn remove(&self, id: &ContactId) -> Option<Contact> {
        let removed = {
            let mut inner = self.lock();
            let removed = inner
                .contacts
                .iter()
                .position(|c| &c.id == id)
                .map(|idx| inner.contacts.remove(idx));
            inner.filtered_contacts.retain(|c| &c.id != id);
            removed
        };
        self.publish(&[StateEvent::ContactsChanged, StateEvent::FilteredChanged]);
        removed
    }

    /// Replaces the contact with the same id in both collections, keeping its position.
    /// Returns false if it wasn't in the full collection.
    pub fn replace_contact(&self, contact: Contact) -> bool {
        let replaced = {
            let mut inner = self.lock();
            let Inner {
                contacts,
                filtered_contacts,
                ..
            } = &mut *inner;
            for existing in filtered_contacts.iter_mut().filter(|c| c.id == contact.id) {
                *existing = contact.clone();
            }
            match contacts.iter_mut().find(|c| c.id == contact.id) {
                Some(existing) => {
                    *existing = contact;
                    true
                }
                None => false,
            }
        };
        self.publish(&[StateEvent::ContactsChanged, StateEvent::FilteredChanged]);
        replaced
    }

    pub fn snapshot(&self) -> Snapshot {
        let inner = self.lock();
        Snapshot {
            contacts: inner.contacts.clone(),
            filtered_contacts: inner.filtered_contacts.clone(),
        }
    }

    /// Puts both collections back to the given snapshot
    pub fn restore(&self, snapshot: Snapshot) {
        {
            let mut inner = self.lock();
            inner.contacts = snapshot.contacts;
            inner.filtered_contacts = snapshot.filtered_contacts;
        }
        self.publish(&[StateEvent::ContactsChanged, StateEvent::FilteredChanged]);
    }

    /// Derives the filtered view from the contacts as they are right now
    pub fn apply_filter(&self, query: &str) {
        {
            let mut inner = self.lock();
            inner.filtered_contacts = filter_contacts(&inner.contacts, query);
        }
        self.publish(&[StateEvent::FilteredChanged]);
    }
}

impl Default for ContactState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::tests::{contact, drain_events, ids};

    fn state_with(contacts: Vec<Contact>) -> ContactState {
        let state = ContactState::new();
        state.replace_all(contacts, vec![]);
        state
    }

    #[test]
    fn new_state_is_empty() {
        let state = ContactState::new();
        assert!(state.contacts().is_empty());
        assert!(state.filtered_contacts().is_empty());
        assert!(state.groups().is_empty());
        assert!(!state.loading());
    }

    #[test]
    fn replace_all_sets_both_collections() {
        let state = state_with(vec![contact(1, "Sara"), contact(2, "Ali")]);
        assert_eq!(state.contacts(), state.filtered_contacts());
        assert_eq!(ids(&state.contacts()), vec!["1", "2"]);
    }

    #[test]
    fn append_adds_to_the_end_of_both() {
        let state = state_with(vec![contact(1, "Sara"), contact(2, "Ali")]);
        state.apply_filter("sara");
        state.append(contact(3, "Reza"));
        assert_eq!(ids(&state.contacts()), vec!["1", "2", "3"]);
        assert_eq!(ids(&state.filtered_contacts()), vec!["1", "3"]);
    }

    #[test]
    fn remove_from_both() {
        let state = state_with(vec![contact(1, "Sara"), contact(2, "Ali"), contact(3, "Reza")]);
        let removed = state.remove(&ContactId::from(2));
        assert_eq!(removed.map(|c| c.fullname), Some("Ali".to_owned()));
        assert_eq!(ids(&state.contacts()), vec!["1", "3"]);
        assert_eq!(ids(&state.filtered_contacts()), vec!["1", "3"]);
    }

    #[test]
    fn remove_unknown_is_noop() {
        let state = state_with(vec![contact(1, "Sara")]);
        assert!(state.remove(&ContactId::from(9)).is_none());
        assert_eq!(ids(&state.contacts()), vec!["1"]);
    }

    #[test]
    fn replace_contact_keeps_position() {
        let state = state_with(vec![contact(1, "Sara"), contact(2, "Ali"), contact(3, "Reza")]);
        state.apply_filter("a");
        assert!(state.replace_contact(contact(2, "Alireza")));
        assert_eq!(state.contacts()[1].fullname, "Alireza");
        assert_eq!(ids(&state.filtered_contacts()), vec!["1", "2", "3"]);
        assert_eq!(state.filtered_contacts()[1].fullname, "Alireza");
        assert!(!state.replace_contact(contact(4, "Maryam")));
        assert_eq!(state.contacts().len(), 3);
    }

    #[test]
    fn snapshot_and_restore() {
        let state = state_with(vec![contact(1, "Sara"), contact(2, "Ali"), contact(3, "Reza")]);
        state.apply_filter("r");
        let snapshot = state.snapshot();
        state.remove(&ContactId::from(1));
        state.restore(snapshot);
        assert_eq!(ids(&state.contacts()), vec!["1", "2", "3"]);
        assert_eq!(ids(&state.filtered_contacts()), vec!["1", "3"]);
    }

    #[test]
    fn apply_filter_uses_current_contacts() {
        let state = state_with(vec![contact(1, "Sara")]);
        state.set_contacts(vec![contact(1, "Sara"), contact(2, "Sarah")]);
        state.apply_filter("SAR");
        assert_eq!(ids(&state.filtered_contacts()), vec!["1", "2"]);
        state.apply_filter("");
        assert_eq!(state.filtered_contacts(), state.contacts());
        assert_eq!(ids(&state.contacts()), vec!["1", "2"]);
    }

    #[test]
    fn clones_share_state() {
        let state = ContactState::new();
        let other = state.clone();
        other.set_loading(true);
        assert!(state.loading());
    }

    #[test]
    fn subscribers_receive_events() {
        let state = ContactState::new();
        let mut rx = state.subscribe();
        state.set_loading(true);
        state.append(contact(1, "Sara"));
        state.set_loading(false);
        assert_eq!(
            drain_events(&mut rx),
            vec![
                StateEvent::Loading(true),
                StateEvent::ContactsChanged,
                StateEvent::FilteredChanged,
                StateEvent::Loading(false),
            ]
        );
    }

    #[test]
    fn loading_stays_set_until_last_operation_ends() {
        let state = ContactState::new();
        let mut rx = state.subscribe();
        state.begin_loading();
        state.begin_loading();
        state.end_loading();
        assert!(state.loading());
        state.end_loading();
        assert!(!state.loading());
        assert_eq!(
            drain_events(&mut rx),
            vec![StateEvent::Loading(true), StateEvent::Loading(false)]
        );
    }

    #[test]
    fn end_loading_without_begin_is_ignored() {
        let state = ContactState::new();
        let mut rx = state.subscribe();
        state.end_loading();
        assert!(!state.loading());
        assert!(drain_events(&mut rx).is_empty());
        state.begin_loading();
        assert!(state.loading());
    }

    #[test]
    fn set_loading_overrides_outstanding_operations() {
        let state = ContactState::new();
        state.begin_loading();
        state.begin_loading();
        state.set_loading(false);
        assert!(!state.loading());
        state.begin_loading();
        state.end_loading();
        assert!(!state.loading());
    }

    #[test]
    fn publishing_without_subscribers_does_not_block() {
        let state = ContactState::new();
        for i in 0..(STATE_EVENT_CHANNEL_CAPACITY as u64 * 2) {
            state.append(contact(i, "Sara"));
        }
        assert_eq!(state.contacts().len(), STATE_EVENT_CHANNEL_CAPACITY * 2);
    }
}
