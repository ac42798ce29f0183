use contactbook_api::StateEvent;
use serde::Serialize;
use tsify::Tsify;

pub mod contact;

/// Pushed to subscribers whenever a part of the contact state changed
#[derive(Tsify, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[tsify(into_wasm_abi)]
#[serde(tag = "type", content = "value")]
pub enum StateEventWeb {
    Loading(bool),
    ContactsChanged,
    FilteredChanged,
    GroupsChanged,
}

impl From<StateEvent> for StateEventWeb {
    fn from(val: StateEvent) -> Self {
        match val {
            StateEvent::Loading(loading) => StateEventWeb::Loading(loading),
            StateEvent::ContactsChanged => StateEventWeb::ContactsChanged,
            StateEvent::FilteredChanged => StateEventWeb::FilteredChanged,
            StateEvent::GroupsChanged => StateEventWeb::GroupsChanged,
        }
    }
}
