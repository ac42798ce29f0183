use contactbook_api::data::{
    Contact, ContactDetails, ContactValues, Field, Group, GroupId, ValidationError,
};
use serde::{Deserialize, Serialize};
use tsify::Tsify;

#[derive(Tsify, Debug, Serialize)]
#[tsify(into_wasm_abi)]
pub struct ContactsResponse {
    pub contacts: Vec<ContactWeb>,
}

#[derive(Tsify, Debug, Serialize)]
#[tsify(into_wasm_abi)]
pub struct GroupsResponse {
    pub groups: Vec<GroupWeb>,
}

#[derive(Tsify, Debug, Clone, PartialEq, Eq, Serialize)]
#[tsify(into_wasm_abi)]
pub struct ContactWeb {
    pub id: String,
    pub fullname: String,
    pub photo: Option<String>,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub job: Option<String>,
    pub group: Option<String>,
}

impl From<Contact> for ContactWeb {
    fn from(val: Contact) -> Self {
        ContactWeb {
            id: val.id.to_string(),
            fullname: val.fullname,
            photo: val.photo,
            mobile: val.mobile,
            email: val.email,
            job: val.job,
            group: val.group.map(|g| g.to_string()),
        }
    }
}

#[derive(Tsify, Debug, Clone, PartialEq, Eq, Serialize)]
#[tsify(into_wasm_abi)]
pub struct GroupWeb {
    pub id: String,
    pub name: String,
}

impl From<Group> for GroupWeb {
    fn from(val: Group) -> Self {
        GroupWeb {
            id: val.id.to_string(),
            name: val.name,
        }
    }
}

#[derive(Tsify, Debug, Serialize)]
#[tsify(into_wasm_abi)]
pub struct ContactDetailWeb {
    pub contact: ContactWeb,
    pub group: Option<GroupWeb>,
}

impl From<ContactDetails> for ContactDetailWeb {
    fn from(val: ContactDetails) -> Self {
        ContactDetailWeb {
            contact: val.contact.into(),
            group: val.group.map(|g| g.into()),
        }
    }
}

/// The create and edit form
#[derive(Tsify, Debug, Deserialize)]
#[tsify(from_wasm_abi)]
pub struct ContactPayload {
    pub fullname: String,
    pub photo: Option<String>,
    pub mobile: String,
    pub email: String,
    pub job: String,
    pub group: String,
}

impl TryFrom<ContactPayload> for ContactValues {
    type Error = ValidationError;

    fn try_from(value: ContactPayload) -> Result<Self, Self::Error> {
        if value.group.trim().is_empty() {
            return Err(ValidationError::FieldEmpty(Field::Group));
        }
        Ok(ContactValues {
            fullname: value.fullname,
            photo: value.photo,
            mobile: value.mobile,
            email: value.email,
            job: value.job,
            group: GroupId::new(value.group)
                .map_err(|_| ValidationError::FieldInvalid(Field::Group))?,
        })
    }
}
