//! Collaborators implemented by the view layer: toasts, the router and the confirmation dialog.

use std::fmt::Display;

use async_trait::async_trait;
use contactbook_core::{ContactId, ServiceTraitBounds};

#[cfg(test)]
use mockall::automock;

/// The pages of the app
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Contacts,
    AddContact,
    ViewContact(ContactId),
    EditContact(ContactId),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Contacts => "/contacts".to_owned(),
            Route::AddContact => "/contacts/add".to_owned(),
            Route::ViewContact(id) => format!("/contacts/{id}"),
            Route::EditContact(id) => format!("/contacts/edit/{id}"),
        }
    }

    /// Resolves a path to its route, the root redirects to the contact list
    pub fn resolve(path: &str) -> Option<Route> {
        let segments: Vec<&str> = path
            .trim_end_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();
        match segments.as_slice() {
            [] | ["contacts"] => Some(Route::Contacts),
            ["contacts", "add"] => Some(Route::AddContact),
            ["contacts", "edit", id] => id.parse().ok().map(Route::EditContact),
            ["contacts", id] => id.parse().ok().map(Route::ViewContact),
            _ => None,
        }
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}

/// User-visible notifications (toasts)
#[cfg_attr(test, automock)]
pub trait NotificationApi: ServiceTraitBounds {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

#[cfg_attr(test, automock)]
pub trait NavigationApi: ServiceTraitBounds {
    fn navigate(&self, route: Route);
}

/// The dialog asking the user to confirm a deletion
#[cfg_attr(test, automock)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait ConfirmationApi: ServiceTraitBounds {
    /// Returns true only if the user chose "confirm"
    async fn confirm_delete(&self, contact_id: &ContactId, fullname: Option<String>) -> bool;
}

#[cfg(test)]
impl ServiceTraitBounds for MockNotificationApi {}
#[cfg(test)]
impl ServiceTraitBounds for MockNavigationApi {}
#[cfg(test)]
impl ServiceTraitBounds for MockConfirmationApi {}
