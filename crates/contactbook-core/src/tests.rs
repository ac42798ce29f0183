#[cfg(test)]
#[allow(clippy::module_inception)]
pub mod tests {
    use crate::{Contact, ContactId, ContactValues, GroupId};

    pub fn contact(id: u64, fullname: &str) -> Contact {
        Contact {
            id: ContactId::from(id),
            fullname: fullname.to_owned(),
            photo: None,
            mobile: None,
            email: None,
            job: None,
            group: None,
        }
    }

    pub fn contacts_with_names(names: &[&str]) -> Vec<Contact> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| contact(i as u64 + 1, name))
            .collect()
    }

    pub fn valid_values() -> ContactValues {
        ContactValues {
            fullname: "Sara Ahmadi".to_owned(),
            photo: Some("https://example.com/sara.png".to_owned()),
            mobile: "09123456789".to_owned(),
            email: "sara@example.com".to_owned(),
            job: "Engineer".to_owned(),
            group: GroupId::from(1),
        }
    }
}
