use crate::Contact;

/// Returns whether the contact's full name contains the already lower-cased query.
fn matches_lowercase(contact: &Contact, query_lower: &str) -> bool {
    contact.fullname.to_lowercase().contains(query_lower)
}

/// Derives the filtered view from the full list of contacts.
///
/// An empty query yields a copy of `contacts`. Otherwise all contacts whose full name contains
/// the query (case-insensitive) are returned, keeping the order of `contacts`.
pub fn filter_contacts(contacts: &[Contact], query: &str) -> Vec<Contact> {
    if query.is_empty() {
        return contacts.to_vec();
    }
    let query_lower = query.to_lowercase();
    contacts
        .iter()
        .filter(|c| matches_lowercase(c, &query_lower))
        .cloned()
        .collect()
}
