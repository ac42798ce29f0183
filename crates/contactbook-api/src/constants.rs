pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 1000;
pub const STATE_EVENT_CHANNEL_CAPACITY: usize = 32;

pub const CONTACTS_PATH: &str = "contacts";
pub const GROUPS_PATH: &str = "groups";

pub const STATUS_OK: u16 = 200;
pub const STATUS_CREATED: u16 = 201;
pub const STATUS_NOT_FOUND: u16 = 404;

pub const MSG_CONTACT_CREATED: &str = "Contact created successfully";
pub const MSG_CONTACT_UPDATED: &str = "Contact updated successfully";
pub const MSG_CONTACT_DELETED: &str = "Contact deleted successfully";
