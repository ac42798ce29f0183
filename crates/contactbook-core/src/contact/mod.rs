use serde::{Deserialize, Serialize};

use crate::{ContactId, Group, GroupId, id::deserialize_optional_group};

pub mod validation;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub fullname: String,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub job: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_group")]
    pub group: Option<GroupId>,
}

impl Contact {
    /// Returns the contact with the given id, if it's in the list
    pub fn find<'a>(contacts: &'a [Contact], id: &ContactId) -> Option<&'a Contact> {
        contacts.iter().find(|c| &c.id == id)
    }
}

/// The values of the create and edit form, as sent to the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactValues {
    pub fullname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    pub mobile: String,
    pub email: String,
    pub job: String,
    pub group: GroupId,
}

/// A contact together with the group it references, for the detail page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactDetails {
    pub contact: Contact,
    pub group: Option<Group>,
}
